//! Employee Registry
//!
//! Employee records with form validation and a write-through persisted store.
//!
//! This library provides:
//! - Field validation with per-field rule chains
//! - A persisted employee store with change subscriptions
//! - Localized messages, date conversion and pagination helpers
//! - Configuration and a command-line front end

pub mod cli;
pub mod config;
pub mod date;
pub mod error;
pub mod form;
pub mod i18n;
pub mod model;
pub mod observer;
pub mod pagination;
pub mod store;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use error::{ConfigError, FormError, StorageError};
pub use form::EmployeeForm;
pub use i18n::{Locale, Localizer};
pub use model::{Employee, EmployeeDraft, Field};
pub use store::{EmployeeStore, FileStorage, MemoryStorage};
pub use validation::{ErrorMap, Validator};
