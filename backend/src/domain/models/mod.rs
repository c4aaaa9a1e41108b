//! Domain models for the farm management core.

pub mod activity;
pub mod field;
pub mod note;
pub mod plant;
pub mod task;

pub use activity::ActivityLogEntry;
pub use field::{Field, FieldValidationError, Zone};
pub use note::{Note, NoteValidationError};
pub use plant::{Plant, PlantNotFound, PlantType, PlantValidationError, WateringLog};
pub use task::{Recurrence, Task, TaskValidationError};
