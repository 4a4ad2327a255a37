//! Localization
//!
//! Embedded English and Turkish catalogs behind a current-locale lookup.

pub mod catalog;

pub use catalog::{Locale, Localizer, Messages, UnknownLocale};
