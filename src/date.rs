//! Date helpers.
//!
//! Records store dates as `dd/mm/yyyy`; edit forms work with ISO
//! `yyyy-mm-dd`. Conversion is a pure string transform and leaves any other
//! shape untouched.

use chrono::{DateTime, Datelike, NaiveDate};

/// Convert a stored `dd/mm/yyyy` date to the `yyyy-mm-dd` input form.
///
/// Day and month are zero-padded to two digits. Strings that do not split
/// into three `/`-separated parts are returned unchanged.
pub fn convert_date_for_input(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }
    let parts: Vec<&str> = date.split('/').collect();
    match parts.as_slice() {
        [day, month, year] => format!("{year}-{month:0>2}-{day:0>2}"),
        _ => date.to_string(),
    }
}

/// Convert an input `yyyy-mm-dd` date to the stored `dd/mm/yyyy` form
pub fn convert_date_for_storage(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [year, month, day] => format!("{day}/{month}/{year}"),
        _ => date.to_string(),
    }
}

/// Parse a calendar date in any of the shapes the application produces:
/// ISO `yyyy-mm-dd`, an RFC 3339 timestamp, or stored `dd/mm/yyyy`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| NaiveDate::parse_from_str(value, "%d/%m/%Y").ok())
}

/// Whole years between `birth` and `today`, counting a year only once the
/// birthday month and day have been reached.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    let month_diff = today.month() as i32 - birth.month() as i32;
    if month_diff < 0 || (month_diff == 0 && today.day() < birth.day()) {
        age -= 1;
    }
    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn converts_storage_form_to_input_form() {
        assert_eq!(convert_date_for_input("05/10/2025"), "2025-10-05");
        assert_eq!(convert_date_for_input("5/1/2025"), "2025-01-05");
    }

    #[test]
    fn converts_input_form_to_storage_form() {
        assert_eq!(convert_date_for_storage("2025-10-05"), "05/10/2025");
    }

    #[test]
    fn empty_maps_to_empty() {
        assert_eq!(convert_date_for_input(""), "");
        assert_eq!(convert_date_for_storage(""), "");
    }

    #[test]
    fn other_shapes_pass_through() {
        assert_eq!(convert_date_for_input("2025-10-05"), "2025-10-05");
        assert_eq!(convert_date_for_storage("05/10/2025"), "05/10/2025");
        assert_eq!(convert_date_for_storage("yesterday"), "yesterday");
    }

    #[test]
    fn conversions_invert_each_other() {
        for stored in ["01/01/2000", "31/12/1999", "29/02/2024"] {
            assert_eq!(convert_date_for_storage(&convert_date_for_input(stored)), stored);
        }
        for input in ["2000-01-01", "1999-12-31"] {
            assert_eq!(convert_date_for_input(&convert_date_for_storage(input)), input);
        }
    }

    #[test]
    fn parses_supported_shapes() {
        assert_eq!(parse_date("1990-01-15"), Some(ymd(1990, 1, 15)));
        assert_eq!(parse_date("15/01/1990"), Some(ymd(1990, 1, 15)));
        assert_eq!(parse_date("1990-01-15T10:00:00Z"), Some(ymd(1990, 1, 15)));
        assert_eq!(parse_date("1990-13-01"), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn age_counts_birthday_only_once_reached() {
        let today = ymd(2026, 6, 15);
        assert_eq!(age_on(ymd(2008, 6, 15), today), 18);
        assert_eq!(age_on(ymd(2008, 6, 16), today), 17);
        assert_eq!(age_on(ymd(2008, 7, 1), today), 17);
        assert_eq!(age_on(ymd(2008, 5, 30), today), 18);
    }
}
