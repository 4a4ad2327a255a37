//! Domain Model
//!
//! Employee records and the field vocabulary shared by validation, storage and forms.

pub mod employee;

pub use employee::{Employee, EmployeeDraft, Field, FieldValues, Position, UnknownField};
