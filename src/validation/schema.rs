//! Validation Schema
//!
//! Per-field rule chains as plain data: an ordered list of checks, each
//! paired with the message key reported when it fails.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::date::{age_on, parse_date};
use crate::model::{Field, Position};

/// Loose international phone shape: optional leading `+`, then 7-20 ASCII digits,
/// spaces, dashes or parentheses.
pub const PHONE_PATTERN: &str = r"^[+]?[0-9\s\-()]{7,20}$";

/// HTML living-standard email shape
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

pub const MINIMUM_AGE: i32 = 18;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern is a valid regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"));

/// A single predicate over a field value.
///
/// `None` is an absent value (field not supplied); `Some("")` is an empty one.
/// Only `Required`, `Date` and `MinimumAge` reject absent values.
#[derive(Debug, Clone)]
pub enum Check {
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// Email shape; empty strings are left to `Required`
    Email,
    Pattern(&'static LazyLock<Regex>),
    Date,
    MinimumAge(i32),
    OneOf(&'static [&'static str]),
}

impl Check {
    /// Evaluate the check against `value`, using `today` for age checks
    pub fn passes(&self, value: Option<&str>, today: NaiveDate) -> bool {
        match self {
            Check::Required => value.is_some_and(|v| !v.is_empty()),
            Check::MinLength(min) => value.is_none_or(|v| v.chars().count() >= *min),
            Check::MaxLength(max) => value.is_none_or(|v| v.chars().count() <= *max),
            Check::Email => value.is_none_or(|v| v.is_empty() || EMAIL_RE.is_match(v)),
            Check::Pattern(re) => value.is_none_or(|v| re.is_match(v)),
            Check::Date => value.and_then(parse_date).is_some(),
            Check::MinimumAge(min) => value
                .and_then(parse_date)
                .is_some_and(|birth| age_on(birth, today) >= *min),
            Check::OneOf(allowed) => value.is_none_or(|v| allowed.contains(&v)),
        }
    }
}

/// A check and the message key it reports
#[derive(Debug, Clone)]
pub struct Rule {
    pub check: Check,
    pub message_key: &'static str,
}

impl Rule {
    pub fn new(check: Check, message_key: &'static str) -> Self {
        Self { check, message_key }
    }
}

/// The rule chain of one field
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: Field,
    pub rules: Vec<Rule>,
}

/// Ordered rule chains for every validated field
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldRules>,
}

impl Default for Schema {
    fn default() -> Self {
        Self::employee()
    }
}

impl Schema {
    pub fn new(fields: Vec<FieldRules>) -> Self {
        Self { fields }
    }

    /// The employee form schema
    pub fn employee() -> Self {
        use Check::*;

        let name = |field, required, min, max| FieldRules {
            field,
            rules: vec![
                Rule::new(Required, required),
                Rule::new(MinLength(2), min),
                Rule::new(MaxLength(50), max),
            ],
        };

        Self::new(vec![
            name(
                Field::FirstName,
                "firstNameRequired",
                "firstNameMinLength",
                "firstNameMaxLength",
            ),
            name(
                Field::LastName,
                "lastNameRequired",
                "lastNameMinLength",
                "lastNameMaxLength",
            ),
            FieldRules {
                field: Field::Email,
                rules: vec![
                    Rule::new(Required, "emailRequired"),
                    Rule::new(Email, "emailInvalid"),
                    Rule::new(MaxLength(100), "emailMaxLength"),
                ],
            },
            FieldRules {
                field: Field::Phone,
                rules: vec![
                    Rule::new(Required, "phoneRequired"),
                    Rule::new(Pattern(&PHONE_RE), "phoneInvalid"),
                ],
            },
            FieldRules {
                field: Field::DateOfEmployment,
                rules: vec![
                    Rule::new(Required, "dateOfEmploymentRequired"),
                    Rule::new(Date, "dateInvalid"),
                ],
            },
            FieldRules {
                field: Field::DateOfBirth,
                rules: vec![
                    Rule::new(Required, "dateOfBirthRequired"),
                    Rule::new(Date, "dateInvalid"),
                    Rule::new(MinimumAge(MINIMUM_AGE), "ageMinimum"),
                ],
            },
            name(
                Field::Department,
                "departmentRequired",
                "departmentMinLength",
                "departmentMaxLength",
            ),
            FieldRules {
                field: Field::Position,
                rules: vec![
                    Rule::new(Required, "positionRequired"),
                    Rule::new(OneOf(&Position::VALUES), "positionInvalid"),
                ],
            },
        ])
    }

    pub fn fields(&self) -> &[FieldRules] {
        &self.fields
    }

    /// Rule chain for `field`; empty if the schema does not validate it
    pub fn rules_for(&self, field: Field) -> &[Rule] {
        self.fields
            .iter()
            .find(|f| f.field == field)
            .map(|f| f.rules.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn every_field_has_a_chain_starting_with_required() {
        let schema = Schema::employee();
        for field in Field::ALL {
            let rules = schema.rules_for(field);
            assert!(!rules.is_empty(), "{field} has no rules");
            assert!(matches!(rules[0].check, Check::Required));
        }
    }

    #[test]
    fn absent_values_skip_shape_checks() {
        assert!(Check::MinLength(2).passes(None, today()));
        assert!(Check::Pattern(&PHONE_RE).passes(None, today()));
        assert!(Check::OneOf(&Position::VALUES).passes(None, today()));
        assert!(!Check::Required.passes(None, today()));
        assert!(!Check::Date.passes(None, today()));
    }

    #[test]
    fn empty_values_hit_shape_checks_except_email() {
        assert!(!Check::MinLength(2).passes(Some(""), today()));
        assert!(!Check::Pattern(&PHONE_RE).passes(Some(""), today()));
        assert!(!Check::OneOf(&Position::VALUES).passes(Some(""), today()));
        assert!(Check::Email.passes(Some(""), today()));
    }

    #[test]
    fn phone_pattern_accepts_loose_international_numbers() {
        for ok in ["+1 555 123 4567", "(0212) 555-1234", "5551234"] {
            assert!(PHONE_RE.is_match(ok), "{ok}");
        }
        for bad in [
            "x",
            "123",
            "+1 555 abc 4567",
            "123456789012345678901",
            "١٢٣٤٥٦٧٨",
            "+90 ５５５ １２３ ４５６７",
        ] {
            assert!(!PHONE_RE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn email_pattern() {
        assert!(EMAIL_RE.is_match("john@example.com"));
        assert!(EMAIL_RE.is_match("a@b.com"));
        assert!(!EMAIL_RE.is_match("bad"));
        assert!(!EMAIL_RE.is_match("bad@"));
        assert!(!EMAIL_RE.is_match("two@@example.com"));
    }

    #[test]
    fn minimum_age_fails_on_unparseable_dates() {
        let check = Check::MinimumAge(MINIMUM_AGE);
        assert!(check.passes(Some("2000-01-01"), today()));
        assert!(!check.passes(Some("2015-01-01"), today()));
        assert!(!check.passes(Some("garbage"), today()));
    }
}
