//! Persisted Store
//!
//! In-memory employee collection with write-through to a durable key-value
//! backend and subscriber notification on every mutation.

pub mod employee_store;
pub mod storage;

pub use employee_store::{default_employees, EmployeeStore, StoreState, STORAGE_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
