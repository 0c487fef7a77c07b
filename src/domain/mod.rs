//! Domain models for the clinic.
//!
//! This module contains the record types of the eight clinic tables, the
//! registry of tables with service-allocated identifiers, and API contracts.

pub mod clinical;
pub mod dto;
pub mod id_table;
pub mod people;
pub mod pets;
pub mod resource;

pub use clinical::{Appointment, ClinicalHistory, Treatment, TreatmentControl};
pub use dto::{
    ApiResponse, CreatedResponse, HealthResponse, ReadyComponents, ReadyResponse,
};
pub use id_table::{IdTable, LockKey};
pub use people::{Person, User, Veterinarian};
pub use pets::Pet;
pub use resource::{IdStrategy, Record, Resource};
