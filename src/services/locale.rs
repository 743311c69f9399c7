// Locale Catalog
// Resolves and holds the active interface language

use std::sync::Mutex;

use crate::models::AppLocale;

/// Active-locale resolution boundary. Initialization applies the persisted
/// locale (or the device locale) through this interface before anything
/// locale-dependent runs.
pub trait LocaleCatalog: Send + Sync {
    /// Resolve and apply the device locale.
    fn use_device_locale(&self);

    /// Apply an explicit locale.
    fn set_locale_raw(&self, locale: AppLocale);

    /// The locale currently applied.
    fn active(&self) -> AppLocale;
}

/// Production catalog: probes the device locale from the process environment
/// and keeps the applied value behind a lock.
pub struct DeviceLocaleCatalog {
    active: Mutex<AppLocale>,
}

impl DeviceLocaleCatalog {
    pub fn new() -> Self {
        Self {
            active: Mutex::new(AppLocale::En),
        }
    }

    fn device_locale() -> AppLocale {
        let raw = std::env::var("LC_ALL")
            .or_else(|_| std::env::var("LANG"))
            .unwrap_or_default();

        // "de_DE.UTF-8" carries the language before the territory/encoding.
        let tag = raw.split(['_', '.', '@']).next().unwrap_or("");
        AppLocale::from_language_tag(tag).unwrap_or(AppLocale::En)
    }

    fn store(&self, locale: AppLocale) {
        *self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = locale;
    }
}

impl Default for DeviceLocaleCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl LocaleCatalog for DeviceLocaleCatalog {
    fn use_device_locale(&self) {
        let locale = Self::device_locale();
        log::info!("Using device locale {}", locale.language_tag());
        self.store(locale);
    }

    fn set_locale_raw(&self, locale: AppLocale) {
        log::info!("Using persisted locale {}", locale.language_tag());
        self.store(locale);
    }

    fn active(&self) -> AppLocale {
        *self.active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
