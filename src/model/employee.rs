//! Employee record types.
//!
//! `Employee` is both the in-memory record and the persisted wire shape.
//! `EmployeeDraft` is the field-keyed partial input used for creation,
//! partial updates and form editing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight editable employee fields.
///
/// Declaration order is the display order used by the list view and the
/// iteration order of error maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    DateOfEmployment,
    DateOfBirth,
    Phone,
    Email,
    Department,
    Position,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::FirstName,
        Field::LastName,
        Field::DateOfEmployment,
        Field::DateOfBirth,
        Field::Phone,
        Field::Email,
        Field::Department,
        Field::Position,
    ];

    /// Wire name of the field (camelCase, as persisted)
    pub fn as_str(self) -> &'static str {
        match self {
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::DateOfEmployment => "dateOfEmployment",
            Field::DateOfBirth => "dateOfBirth",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::Department => "department",
            Field::Position => "position",
        }
    }

    pub fn is_date(self) -> bool {
        matches!(self, Field::DateOfEmployment | Field::DateOfBirth)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known field
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employee field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Fixed set of job positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Junior,
    Senior,
    Manager,
    Specialist,
    Analyst,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Junior,
        Position::Senior,
        Position::Manager,
        Position::Specialist,
        Position::Analyst,
    ];

    /// Accepted values of the `position` field, in dropdown order
    pub const VALUES: [&'static str; 5] = ["junior", "senior", "manager", "specialist", "analyst"];

    pub fn as_str(self) -> &'static str {
        match self {
            Position::Junior => "junior",
            Position::Senior => "senior",
            Position::Manager => "manager",
            Position::Specialist => "specialist",
            Position::Analyst => "analyst",
        }
    }

    /// Dropdown options: the `select` placeholder followed by every position
    pub fn options() -> Vec<&'static str> {
        std::iter::once("select")
            .chain(Self::ALL.iter().map(|p| p.as_str()))
            .collect()
    }
}

impl FromStr for Position {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or(())
    }
}

/// Persisted employee record.
///
/// Date fields are kept in `dd/mm/yyyy` form. `position` stays a plain
/// string so records written by older builds still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_employment: String,
    pub date_of_birth: String,
    pub phone: String,
    pub email: String,
    pub department: String,
    pub position: String,
}

impl Employee {
    /// Build a record from a draft, treating absent fields as empty strings
    pub fn from_draft(id: String, draft: EmployeeDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name.unwrap_or_default(),
            last_name: draft.last_name.unwrap_or_default(),
            date_of_employment: draft.date_of_employment.unwrap_or_default(),
            date_of_birth: draft.date_of_birth.unwrap_or_default(),
            phone: draft.phone.unwrap_or_default(),
            email: draft.email.unwrap_or_default(),
            department: draft.department.unwrap_or_default(),
            position: draft.position.unwrap_or_default(),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::DateOfEmployment => &self.date_of_employment,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Department => &self.department,
            Field::Position => &self.position,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::DateOfEmployment => &mut self.date_of_employment,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::Department => &mut self.department,
            Field::Position => &mut self.position,
        }
    }

    /// Replace only the fields present in `patch`. The id is never touched.
    pub fn apply(&mut self, patch: &EmployeeDraft) {
        for field in Field::ALL {
            if let Some(value) = patch.get(field) {
                *self.slot_mut(field) = value.to_string();
            }
        }
    }

    /// First and last name joined by a space, skipping empty parts
    pub fn display_name(&self) -> String {
        join_name(&self.first_name, &self.last_name)
    }
}

pub(crate) fn join_name(first: &str, last: &str) -> String {
    [first, last]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Field-keyed partial employee input.
///
/// `None` means the field was not supplied at all, which is distinct from an
/// empty string for validation purposes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_employment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

impl EmployeeDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft with every field present and empty, as a fresh add form has
    pub fn blank() -> Self {
        let mut draft = Self::default();
        for field in Field::ALL {
            draft.set(field, String::new());
        }
        draft
    }

    /// Builder-style setter
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::FirstName => self.first_name.as_deref(),
            Field::LastName => self.last_name.as_deref(),
            Field::DateOfEmployment => self.date_of_employment.as_deref(),
            Field::DateOfBirth => self.date_of_birth.as_deref(),
            Field::Phone => self.phone.as_deref(),
            Field::Email => self.email.as_deref(),
            Field::Department => self.department.as_deref(),
            Field::Position => self.position.as_deref(),
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::DateOfEmployment => &mut self.date_of_employment,
            Field::DateOfBirth => &mut self.date_of_birth,
            Field::Phone => &mut self.phone,
            Field::Email => &mut self.email,
            Field::Department => &mut self.department,
            Field::Position => &mut self.position,
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_none())
    }
}

impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        let mut draft = Self::default();
        for field in Field::ALL {
            draft.set(field, employee.get(field));
        }
        draft
    }
}

/// Read access to field values, shared by records and drafts
pub trait FieldValues {
    fn value(&self, field: Field) -> Option<&str>;
}

impl FieldValues for Employee {
    fn value(&self, field: Field) -> Option<&str> {
        Some(self.get(field))
    }
}

impl FieldValues for EmployeeDraft {
    fn value(&self, field: Field) -> Option<&str> {
        self.get(field)
    }
}
