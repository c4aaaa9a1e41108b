//! # Farm Plus Backend
//!
//! Core for the farm management dashboard: entity stores for fields,
//! plants, notes and tasks, the watering status engine, aggregation views
//! and the activity feed. All operations are synchronous; state lives in
//! memory and is mirrored to a keyed blob store after every mutation.
//!
//! The UI layers call the services on [`Backend`] and render whatever they
//! return; nothing here renders anything.

use anyhow::Result;
use chrono::Local;
use log::{info, warn};
use shared::Theme;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub mod domain;
pub mod storage;

use domain::state::UiState;
use domain::{
    ActivityService, CalendarService, DashboardService, FieldService, NoteService, PlantService,
    TaskService,
};
use storage::{
    BlobStore, FieldsRepository, JsonBlobStore, PlantsRepository, UiStateRepository,
};

/// All services for one session, constructed once and passed to handlers.
pub struct Backend {
    pub field_service: FieldService,
    pub plant_service: PlantService,
    pub note_service: NoteService,
    pub task_service: TaskService,
    pub activity_service: ActivityService,
    pub dashboard_service: DashboardService,
    pub calendar_service: CalendarService,
    ui_state: Arc<Mutex<UiState>>,
    ui_repository: UiStateRepository,
}

impl Backend {
    /// Create a backend persisting to JSON blobs under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Arc::new(JsonBlobStore::new(data_dir)?);
        Self::with_store(store)
    }

    /// Create a backend over any blob store. Loads the three persisted
    /// blobs, wires the services and runs the session-start watering sweep.
    pub fn with_store(store: Arc<dyn BlobStore>) -> Result<Self> {
        let fields_repository = FieldsRepository::new(store.clone());
        let plants_repository = PlantsRepository::new(store.clone());
        let ui_repository = UiStateRepository::new(store);

        let fields_state = Arc::new(Mutex::new(fields_repository.load()));
        let plants_state = Arc::new(Mutex::new(plants_repository.load()));
        let ui_state = Arc::new(Mutex::new(ui_repository.load()));

        let activity_service = ActivityService::new(ui_state.clone(), ui_repository.clone());
        let field_service = FieldService::new(
            fields_state,
            fields_repository,
            activity_service.clone(),
        );
        let plant_service = PlantService::new(
            plants_state,
            plants_repository,
            field_service.clone(),
            activity_service.clone(),
        );
        let note_service = NoteService::new(
            ui_state.clone(),
            ui_repository.clone(),
            activity_service.clone(),
        );
        let task_service = TaskService::new(
            ui_state.clone(),
            ui_repository.clone(),
            activity_service.clone(),
        );
        let dashboard_service = DashboardService::new(
            field_service.clone(),
            plant_service.clone(),
            task_service.clone(),
            activity_service.clone(),
        );
        let calendar_service = CalendarService::new(plant_service.clone(), task_service.clone());

        // Stored watering statuses may have gone stale since the last
        // session; sweep them before anything reads them.
        let reclassified = plant_service.recompute_all(Local::now().date_naive());
        info!(
            "Session initialized, watering sweep reclassified {} plants",
            reclassified
        );

        Ok(Backend {
            field_service,
            plant_service,
            note_service,
            task_service,
            activity_service,
            dashboard_service,
            calendar_service,
            ui_state,
            ui_repository,
        })
    }

    pub fn theme(&self) -> Theme {
        self.ui_state.lock().unwrap().theme
    }

    pub fn set_theme(&self, theme: Theme) {
        let mut ui = self.ui_state.lock().unwrap();
        ui.theme = theme;
        self.persist_ui(&ui);
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.ui_state.lock().unwrap().sidebar_collapsed
    }

    /// Flip the sidebar preference and return the new value.
    pub fn toggle_sidebar(&self) -> bool {
        let mut ui = self.ui_state.lock().unwrap();
        ui.sidebar_collapsed = !ui.sidebar_collapsed;
        let collapsed = ui.sidebar_collapsed;
        self.persist_ui(&ui);
        collapsed
    }

    fn persist_ui(&self, state: &UiState) {
        if let Err(e) = self.ui_repository.save(state) {
            warn!("Failed to persist UI state: {}", e);
        }
    }
}
