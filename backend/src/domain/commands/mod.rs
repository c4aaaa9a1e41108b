//! Command records accepted by the domain services.
//!
//! All service inputs are plain structured records; optional fields on the
//! update commands mean "leave unchanged".

pub mod fields;
pub mod notes;
pub mod plants;
pub mod tasks;
