//! Storage layer module.
//!
//! Handlers and services talk to [`Storage`]; the backend behind it is
//! chosen at startup by [`create_storage`].

pub mod allocator;
pub mod factory;
pub mod memory;
pub mod postgres;
pub mod traits;

pub use allocator::{AllocationScope, allocate_next_id};
pub use factory::create_storage;
pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;
pub use traits::{DynStorage, Repository, Storage};
