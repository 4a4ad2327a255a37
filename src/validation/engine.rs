//! Validation Engine
//!
//! Interprets a [`Schema`] against field values. Whole-form validation
//! collects every failing rule of every field; single-field validation stops
//! at the first failing rule.

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::schema::Schema;
use crate::i18n::Messages;
use crate::model::{Field, FieldValues};

/// Field name to ordered violation messages. A missing key means valid.
pub type ErrorMap = BTreeMap<Field, Vec<String>>;

/// Outcome of validating one field in isolation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

/// Outcome of validating a whole form, or of merging a field result into
/// an existing error map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValidation {
    pub is_valid: bool,
    pub errors: ErrorMap,
}

impl FormValidation {
    /// Messages for `field`, empty when the field is valid
    pub fn messages(&self, field: Field) -> &[String] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Validates employee values, resolving failure messages through `M`
pub struct Validator<'a, M: Messages + ?Sized> {
    schema: Schema,
    messages: &'a M,
    today: Option<NaiveDate>,
}

impl<'a, M: Messages + ?Sized> Validator<'a, M> {
    /// Validator for the employee schema, measuring ages against the local date
    pub fn new(messages: &'a M) -> Self {
        Self::with_schema(Schema::employee(), messages)
    }

    pub fn with_schema(schema: Schema, messages: &'a M) -> Self {
        Self {
            schema,
            messages,
            today: None,
        }
    }

    /// Pin the reference date used by the age rule
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Validate only `field`, returning the first failing rule's message
    pub fn validate_field(&self, field: Field, value: Option<&str>) -> FieldValidation {
        let today = self.today();
        let failed = self
            .schema
            .rules_for(field)
            .iter()
            .find(|rule| !rule.check.passes(value, today));

        match failed {
            Some(rule) => FieldValidation {
                is_valid: false,
                error: Some(self.messages.text(rule.message_key)),
            },
            None => FieldValidation {
                is_valid: true,
                error: None,
            },
        }
    }

    /// Validate every field, collecting all violations per field
    pub fn validate_form<V: FieldValues + ?Sized>(&self, values: &V) -> FormValidation {
        let today = self.today();
        let mut errors = ErrorMap::new();

        for field_rules in self.schema.fields() {
            let value = values.value(field_rules.field);
            let messages: Vec<String> = field_rules
                .rules
                .iter()
                .filter(|rule| !rule.check.passes(value, today))
                .map(|rule| self.messages.text(rule.message_key))
                .collect();

            if !messages.is_empty() {
                errors.insert(field_rules.field, messages);
            }
        }

        log::trace!("form validation produced {} invalid field(s)", errors.len());
        FormValidation {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    /// Validate `field` and merge the result into `current_errors`.
    ///
    /// Only the entry for `field` changes: it is removed on success and set
    /// to the single failing message otherwise. `is_valid` reflects the
    /// field alone.
    pub fn validate_field_with_errors(
        &self,
        field: Field,
        value: Option<&str>,
        current_errors: &ErrorMap,
    ) -> FormValidation {
        let result = self.validate_field(field, value);
        let mut errors = current_errors.clone();

        match result.error {
            Some(message) => {
                errors.insert(field, vec![message]);
            }
            None => {
                errors.remove(&field);
            }
        }

        FormValidation {
            is_valid: result.is_valid,
            errors,
        }
    }

    /// Future-returning form of [`Validator::validate_form`] for callers
    /// written against an async validation API. Completes on first poll.
    pub async fn validate_form_async<V: FieldValues + ?Sized>(&self, values: &V) -> FormValidation {
        self.validate_form(values)
    }

    /// Future-returning form of [`Validator::validate_field`]
    pub async fn validate_field_async(&self, field: Field, value: Option<&str>) -> FieldValidation {
        self.validate_field(field, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EmployeeDraft;

    /// Messages that echo their key, so assertions can name rules
    struct Keys;

    impl Messages for Keys {
        fn text(&self, key: &str) -> String {
            key.to_string()
        }
    }

    fn validator() -> Validator<'static, Keys> {
        Validator::new(&Keys).with_today(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    #[test]
    fn single_field_reports_first_failure_only() {
        let result = validator().validate_field(Field::Phone, Some(""));
        assert!(!result.is_valid);
        assert_eq!(result.error.as_deref(), Some("phoneRequired"));
    }

    #[test]
    fn whole_form_collects_every_failure_of_a_field() {
        let draft = EmployeeDraft::blank();
        let result = validator().validate_form(&draft);

        assert!(!result.is_valid);
        assert_eq!(result.messages(Field::Phone), ["phoneRequired", "phoneInvalid"]);
        assert_eq!(
            result.messages(Field::DateOfBirth),
            ["dateOfBirthRequired", "dateInvalid", "ageMinimum"]
        );
        assert_eq!(result.messages(Field::Email), ["emailRequired"]);
    }

    #[test]
    fn absent_fields_only_report_required_and_date_rules() {
        let result = validator().validate_form(&EmployeeDraft::new());
        assert_eq!(result.messages(Field::FirstName), ["firstNameRequired"]);
        assert_eq!(result.messages(Field::Position), ["positionRequired"]);
        assert_eq!(
            result.messages(Field::DateOfEmployment),
            ["dateOfEmploymentRequired", "dateInvalid"]
        );
    }

    #[test]
    fn merging_replaces_only_the_named_field() {
        let v = validator();
        let mut current = ErrorMap::new();
        current.insert(Field::LastName, vec!["lastNameRequired".to_string()]);

        let failed = v.validate_field_with_errors(Field::Email, Some("bad@"), &current);
        assert!(!failed.is_valid);
        assert_eq!(failed.messages(Field::Email), ["emailInvalid"]);
        assert_eq!(failed.messages(Field::LastName), ["lastNameRequired"]);

        let fixed = v.validate_field_with_errors(Field::Email, Some("ok@ok.com"), &failed.errors);
        assert!(fixed.is_valid);
        assert!(!fixed.errors.contains_key(&Field::Email));
        assert_eq!(fixed.messages(Field::LastName), ["lastNameRequired"]);
    }

    #[test]
    fn field_result_is_valid_even_if_other_fields_carry_errors() {
        let mut current = ErrorMap::new();
        current.insert(Field::Phone, vec!["phoneInvalid".to_string()]);
        let result = validator().validate_field_with_errors(Field::FirstName, Some("Jo"), &current);
        assert!(result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn error_map_serializes_with_field_names() {
        let mut errors = ErrorMap::new();
        errors.insert(Field::DateOfBirth, vec!["ageMinimum".to_string()]);
        let json = serde_json::to_value(FormValidation {
            is_valid: false,
            errors,
        })
        .unwrap();
        assert_eq!(json["isValid"], false);
        assert_eq!(json["errors"]["dateOfBirth"][0], "ageMinimum");
    }
}
