//! Activity feed for the farm management core.
//!
//! Append-only, most-recent-first log of user actions across all entities.
//! The feed is bounded: once it holds 100 entries the oldest are evicted in
//! insertion order, not by timestamp.

use chrono::Local;
use log::warn;
use shared::{ActivityAction, ActivityType, EntityKind};
use std::sync::{Arc, Mutex};

use crate::domain::models::ActivityLogEntry;
use crate::domain::state::UiState;
use crate::storage::UiStateRepository;

/// Maximum number of feed entries retained.
pub const MAX_FEED_ENTRIES: usize = 100;

/// Service owning the bounded activity feed.
#[derive(Clone)]
pub struct ActivityService {
    state: Arc<Mutex<UiState>>,
    repository: UiStateRepository,
}

impl ActivityService {
    pub fn new(state: Arc<Mutex<UiState>>, repository: UiStateRepository) -> Self {
        Self { state, repository }
    }

    /// Append an entry to the front of the feed and truncate to the bound.
    pub fn record(
        &self,
        activity_type: ActivityType,
        action: ActivityAction,
        description: impl Into<String>,
        entity: Option<(EntityKind, &str)>,
    ) -> ActivityLogEntry {
        let entry = ActivityLogEntry {
            id: ActivityLogEntry::generate_id(),
            activity_type,
            action,
            description: description.into(),
            entity_id: entity.map(|(_, id)| id.to_string()),
            entity_kind: entity.map(|(kind, _)| kind),
            timestamp: Local::now().naive_local(),
        };

        let mut ui = self.state.lock().unwrap();
        ui.activity_log.insert(0, entry.clone());
        ui.activity_log.truncate(MAX_FEED_ENTRIES);
        self.persist(&ui);
        entry
    }

    /// The most recent `limit` entries, newest first.
    pub fn recent(&self, limit: usize) -> Vec<ActivityLogEntry> {
        let ui = self.state.lock().unwrap();
        ui.activity_log.iter().take(limit).cloned().collect()
    }

    /// The whole feed, newest first.
    pub fn list(&self) -> Vec<ActivityLogEntry> {
        self.state.lock().unwrap().activity_log.clone()
    }

    /// Drop every feed entry.
    pub fn clear(&self) {
        let mut ui = self.state.lock().unwrap();
        ui.activity_log.clear();
        self.persist(&ui);
    }

    fn persist(&self, state: &UiState) {
        if let Err(e) = self.repository.save(state) {
            warn!("Failed to persist UI state: {}", e);
        }
    }
}
