//! Service layer module.
//!
//! Business rules shared by every clinic resource.

pub mod records;

pub use records::RecordService;
