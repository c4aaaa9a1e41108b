//! Domain layer: services, models and the watering status engine.

pub mod activity_service;
pub mod calendar;
pub mod commands;
pub mod dashboard;
pub mod field_service;
pub mod models;
pub mod note_service;
pub mod plant_service;
pub mod state;
pub mod task_service;
pub mod watering;

pub use activity_service::ActivityService;
pub use calendar::CalendarService;
pub use dashboard::DashboardService;
pub use field_service::FieldService;
pub use note_service::NoteService;
pub use plant_service::PlantService;
pub use task_service::TaskService;
