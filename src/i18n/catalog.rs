//! Message catalogs and the current-locale lookup.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::observer::{Observers, Subscription};

/// Supported user interface locales
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Tr];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Tr => "tr",
        }
    }

    fn embedded_catalog(self) -> &'static str {
        match self {
            Locale::En => include_str!("../../resources/locales/en.toml"),
            Locale::Tr => include_str!("../../resources/locales/tr.toml"),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned for an unsupported locale code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale '{0}' (expected one of: en, tr)")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code() == s)
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

/// Key-to-string lookup consumed by anything that shows messages.
///
/// Implementations return the key itself when no text is known.
pub trait Messages {
    fn text(&self, key: &str) -> String;
}

/// Holds every catalog and the currently selected locale
pub struct Localizer {
    locale: Locale,
    catalogs: HashMap<Locale, HashMap<String, String>>,
    listeners: Observers<Locale>,
}

impl Default for Localizer {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

impl fmt::Debug for Localizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Localizer")
            .field("locale", &self.locale)
            .field("catalogs", &self.catalogs.len())
            .finish()
    }
}

impl Localizer {
    /// Create a localizer with the embedded catalogs loaded
    pub fn new(locale: Locale) -> Self {
        let catalogs = Locale::ALL
            .into_iter()
            .map(|locale| (locale, load_embedded(locale)))
            .collect();

        Self {
            locale,
            catalogs,
            listeners: Observers::new(),
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Switch to the locale named by `code`.
    ///
    /// Returns `false` and keeps the current locale if the code is unknown.
    /// Listeners are notified on every successful call.
    pub fn set_locale(&mut self, code: &str) -> bool {
        match code.parse::<Locale>() {
            Ok(locale) => {
                self.locale = locale;
                self.listeners.notify(&locale);
                true
            }
            Err(_) => false,
        }
    }

    /// Register a callback run after each successful locale switch
    pub fn on_locale_change<F>(&self, listener: F) -> Subscription<Locale>
    where
        F: Fn(&Locale) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Translate `key` in the current locale, falling back to the key itself
    pub fn t(&self, key: &str) -> String {
        self.catalogs
            .get(&self.locale)
            .and_then(|catalog| catalog.get(key))
            .filter(|text| !text.is_empty())
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

impl Messages for Localizer {
    fn text(&self, key: &str) -> String {
        self.t(key)
    }
}

fn load_embedded(locale: Locale) -> HashMap<String, String> {
    match toml::from_str::<HashMap<String, String>>(locale.embedded_catalog()) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::warn!(
                "Failed to parse embedded '{}' catalog: {}. Messages will show their keys.",
                locale,
                e
            );
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn embedded_catalogs_share_the_same_keys() {
        let en = load_embedded(Locale::En);
        let tr = load_embedded(Locale::Tr);
        assert!(!en.is_empty());
        let mut en_keys: Vec<_> = en.keys().collect();
        let mut tr_keys: Vec<_> = tr.keys().collect();
        en_keys.sort();
        tr_keys.sort();
        assert_eq!(en_keys, tr_keys);
    }

    #[test]
    fn translates_in_current_locale() {
        let mut localizer = Localizer::new(Locale::En);
        assert_eq!(localizer.t("employeeList"), "Employee List");
        assert!(localizer.set_locale("tr"));
        assert_eq!(localizer.t("employeeList"), "Çalışan Listesi");
    }

    #[test]
    fn missing_key_falls_back_to_key() {
        let localizer = Localizer::default();
        assert_eq!(localizer.t("noSuchKey"), "noSuchKey");
    }

    #[test]
    fn unknown_locale_is_rejected_without_notifying() {
        let mut localizer = Localizer::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let sub = localizer.on_locale_change(move |locale| sink.borrow_mut().push(*locale));

        assert!(!localizer.set_locale("de"));
        assert_eq!(localizer.locale(), Locale::En);
        assert!(localizer.set_locale("tr"));
        assert_eq!(*seen.borrow(), vec![Locale::Tr]);

        assert!(sub.unsubscribe());
        localizer.set_locale("en");
        assert_eq!(seen.borrow().len(), 1);
    }
}
