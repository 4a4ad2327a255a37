//! Add/edit form session.
//!
//! Keeps the values being edited (dates in input `yyyy-mm-dd` form) together
//! with the error map shown next to each field. Per-field edits validate
//! only that field; submission validates everything and then writes to the
//! store with dates converted back to storage form.

use crate::date::{convert_date_for_input, convert_date_for_storage, parse_date};
use crate::error::FormError;
use crate::i18n::Messages;
use crate::model::employee::join_name;
use crate::model::{Employee, EmployeeDraft, Field};
use crate::store::{EmployeeStore, KeyValueStorage};
use crate::validation::{ErrorMap, Validator};

/// Whether the form creates a record or edits an existing one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit { id: String },
}

/// A successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Created(Employee),
    Updated(Employee),
}

impl Saved {
    pub fn employee(&self) -> &Employee {
        match self {
            Saved::Created(e) | Saved::Updated(e) => e,
        }
    }

    /// Confirmation text such as `Record created: Ada Lovelace`
    pub fn message<M: Messages + ?Sized>(&self, messages: &M) -> String {
        let key = match self {
            Saved::Created(_) => "recordCreated",
            Saved::Updated(_) => "recordUpdated",
        };
        format!("{}: {}", messages.text(key), self.employee().display_name())
    }
}

#[derive(Debug, Clone)]
pub struct EmployeeForm {
    mode: FormMode,
    values: EmployeeDraft,
    errors: ErrorMap,
}

impl Default for EmployeeForm {
    fn default() -> Self {
        Self::add()
    }
}

impl EmployeeForm {
    /// Empty form for a new record
    pub fn add() -> Self {
        Self {
            mode: FormMode::Add,
            values: EmployeeDraft::blank(),
            errors: ErrorMap::new(),
        }
    }

    /// Form pre-filled from `employee`, dates converted to input form
    pub fn edit(employee: &Employee) -> Self {
        let mut values = EmployeeDraft::from(employee);
        for field in Field::ALL.into_iter().filter(|f| f.is_date()) {
            values.set(field, convert_date_for_input(employee.get(field)));
        }

        Self {
            mode: FormMode::Edit {
                id: employee.id.clone(),
            },
            values,
            errors: ErrorMap::new(),
        }
    }

    /// Edit form for the record with `id`, if it exists
    pub fn load<S: KeyValueStorage>(store: &EmployeeStore<S>, id: &str) -> Option<Self> {
        store.get_by_id(id).map(Self::edit)
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn values(&self) -> &EmployeeDraft {
        &self.values
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field).unwrap_or_default()
    }

    /// Set `field` and re-validate just that field. Returns whether the
    /// field is now valid.
    pub fn set_field<M: Messages + ?Sized>(
        &mut self,
        field: Field,
        value: impl Into<String>,
        validator: &Validator<'_, M>,
    ) -> bool {
        self.values.set(field, value);
        let result = validator.validate_field_with_errors(field, self.values.get(field), &self.errors);
        self.errors = result.errors;
        result.is_valid
    }

    /// Title key for the page heading
    pub fn title_key(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "addEmployee",
            FormMode::Edit { .. } => "editEmployee",
        }
    }

    pub fn display_name(&self) -> String {
        join_name(self.value(Field::FirstName), self.value(Field::LastName))
    }

    /// Validate the whole form and, when valid, create or update the record.
    ///
    /// On failure the form's error map is replaced with the full result and
    /// the store is left untouched.
    pub fn submit<S, M>(
        &mut self,
        store: &mut EmployeeStore<S>,
        validator: &Validator<'_, M>,
    ) -> Result<Saved, FormError>
    where
        S: KeyValueStorage,
        M: Messages + ?Sized,
    {
        let result = validator.validate_form(&self.values);
        self.errors = result.errors;
        if !result.is_valid {
            return Err(FormError::Invalid(self.errors.clone()));
        }

        let payload = self.storage_payload();
        match &self.mode {
            FormMode::Add => Ok(Saved::Created(store.add_employee(payload))),
            FormMode::Edit { id } => {
                if !store.update_employee(id, &payload) {
                    return Err(FormError::NotFound(id.clone()));
                }
                store
                    .get_by_id(id)
                    .cloned()
                    .map(Saved::Updated)
                    .ok_or_else(|| FormError::NotFound(id.clone()))
            }
        }
    }

    fn storage_payload(&self) -> EmployeeDraft {
        let mut payload = self.values.clone();
        for field in Field::ALL.into_iter().filter(|f| f.is_date()) {
            if let Some(value) = self.values.get(field) {
                let stored = match parse_date(value) {
                    Some(date) => date.format("%d/%m/%Y").to_string(),
                    None => convert_date_for_storage(value),
                };
                payload.set(field, stored);
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Localizer;
    use crate::store::MemoryStorage;
    use chrono::NaiveDate;

    fn filled(form: &mut EmployeeForm, v: &Validator<'_, Localizer>) {
        for (field, value) in [
            (Field::FirstName, "Grace"),
            (Field::LastName, "Hopper"),
            (Field::DateOfEmployment, "2024-05-01"),
            (Field::DateOfBirth, "1990-01-01"),
            (Field::Phone, "+1 555 123 4567"),
            (Field::Email, "grace@example.com"),
            (Field::Department, "Engineering"),
            (Field::Position, "manager"),
        ] {
            assert!(form.set_field(field, value, v), "{field} rejected");
        }
    }

    #[test]
    fn add_form_converts_dates_for_storage() {
        let localizer = Localizer::default();
        let v = Validator::new(&localizer).with_today(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        let mut store = EmployeeStore::open_with_seed(MemoryStorage::new(), Vec::new);

        let mut form = EmployeeForm::add();
        filled(&mut form, &v);
        let saved = form.submit(&mut store, &v).unwrap();

        let created = saved.employee();
        assert_eq!(created.date_of_birth, "01/01/1990");
        assert_eq!(created.date_of_employment, "01/05/2024");
        assert_eq!(saved.message(&localizer), "Record created: Grace Hopper");
        assert_eq!(store.employees()[0].id, created.id);
    }

    #[test]
    fn edit_form_loads_dates_in_input_form() {
        let store = EmployeeStore::open(MemoryStorage::new());
        let first = store.employees()[0].clone();
        let form = EmployeeForm::load(&store, &first.id).unwrap();

        assert_eq!(form.title_key(), "editEmployee");
        assert_eq!(
            form.value(Field::DateOfBirth),
            convert_date_for_input(&first.date_of_birth)
        );
    }

    #[test]
    fn invalid_submit_leaves_store_untouched() {
        let localizer = Localizer::default();
        let v = Validator::new(&localizer);
        let mut store = EmployeeStore::open(MemoryStorage::new());
        let before = store.state().clone();

        let mut form = EmployeeForm::add();
        let err = form.submit(&mut store, &v).unwrap_err();

        assert!(matches!(err, FormError::Invalid(ref errors) if errors.len() == Field::ALL.len()));
        assert_eq!(store.state(), &before);
    }
}
