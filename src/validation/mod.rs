//! Validation Engine
//!
//! Declarative per-field rule chains and the interpreter that evaluates them.

pub mod engine;
pub mod schema;

pub use engine::{ErrorMap, FieldValidation, FormValidation, Validator};
pub use schema::{Check, FieldRules, Rule, Schema};
