//! Locale registry: the set of locales the front-end advertises.
//!
//! A registry is validated on construction: it must contain exactly one
//! fallback locale, and that locale must be enabled. The compiled-in default
//! registry is available as a lazily initialized singleton, while runtimes
//! and tests may build their own.

use crate::i18n::{LocaleCode, ResourceError};
use std::sync::OnceLock;

/// Configuration for a known locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    /// Locale code (e.g., "ru", "uk")
    pub code: &'static str,

    /// English name of the language (e.g., "Russian", "Ukrainian")
    pub name: &'static str,

    /// Native name of the language, shown by the language selector
    pub native_name: &'static str,

    /// Whether lookups fall back to this locale (exactly one must be true)
    pub is_fallback: bool,

    /// Whether this locale can be selected
    pub enabled: bool,
}

/// Registry of known locales.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    locales: Vec<LocaleConfig>,
    fallback: usize,
}

/// Default registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Build a registry from locale configurations.
    ///
    /// # Errors
    /// Returns `ResourceError::InvalidRegistry` when codes are duplicated, when
    /// there is not exactly one fallback locale, or when the fallback is disabled.
    pub fn new(locales: Vec<LocaleConfig>) -> Result<Self, ResourceError> {
        for (i, locale) in locales.iter().enumerate() {
            if locales[..i].iter().any(|other| other.code == locale.code) {
                return Err(ResourceError::InvalidRegistry(format!(
                    "duplicate locale code '{}'",
                    locale.code
                )));
            }
        }

        let fallbacks: Vec<usize> = locales
            .iter()
            .enumerate()
            .filter(|(_, locale)| locale.is_fallback)
            .map(|(i, _)| i)
            .collect();

        let fallback = match fallbacks.as_slice() {
            [] => {
                return Err(ResourceError::InvalidRegistry(
                    "no fallback locale defined".to_string(),
                ))
            }
            [index] => *index,
            _ => {
                return Err(ResourceError::InvalidRegistry(
                    "multiple fallback locales defined".to_string(),
                ))
            }
        };

        if !locales[fallback].enabled {
            return Err(ResourceError::InvalidRegistry(format!(
                "fallback locale '{}' is disabled",
                locales[fallback].code
            )));
        }

        Ok(Self { locales, fallback })
    }

    /// Get the compiled-in default registry.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            locales: default_locales(),
            fallback: 0,
        })
    }

    /// Return a copy of this registry with a different fallback locale.
    ///
    /// # Errors
    /// Fails when `code` is unknown or disabled.
    pub fn with_fallback(&self, code: &str) -> Result<Self, ResourceError> {
        if self.get_by_code(code).is_none() {
            return Err(ResourceError::UnknownLocale(code.to_string()));
        }

        let locales = self
            .locales
            .iter()
            .cloned()
            .map(|mut locale| {
                locale.is_fallback = locale.code == code;
                locale
            })
            .collect();

        Self::new(locales)
    }

    /// Get a locale configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// Resolve a code to a `LocaleCode`, accepting only enabled locales.
    pub fn resolve(&self, code: &str) -> Option<LocaleCode> {
        self.get_by_code(code)
            .filter(|locale| locale.enabled)
            .map(|locale| LocaleCode::new_unchecked(locale.code))
    }

    /// Get all enabled locales, in registration order.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// Get all locales (including disabled ones).
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Codes of all enabled locales, in registration order.
    pub fn enabled_codes(&self) -> Vec<LocaleCode> {
        self.list_enabled()
            .into_iter()
            .map(|locale| LocaleCode::new_unchecked(locale.code))
            .collect()
    }

    /// Get the fallback locale configuration.
    pub fn fallback_config(&self) -> &LocaleConfig {
        &self.locales[self.fallback]
    }

    /// Get the fallback locale.
    pub fn fallback(&self) -> LocaleCode {
        LocaleCode::new_unchecked(self.fallback_config().code)
    }

    /// Check if a locale code is known and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| locale.enabled)
            .unwrap_or(false)
    }
}

/// Default locale configurations.
///
/// Russian is the fallback. English is registered but not yet enabled.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "ru",
            name: "Russian",
            native_name: "Русский",
            is_fallback: true,
            enabled: true,
        },
        LocaleConfig {
            code: "uk",
            name: "Ukrainian",
            native_name: "Українська",
            is_fallback: false,
            enabled: true,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_fallback: false,
            enabled: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(code: &'static str, is_fallback: bool, enabled: bool) -> LocaleConfig {
        LocaleConfig {
            code,
            name: code,
            native_name: code,
            is_fallback,
            enabled,
        }
    }

    // ==================== Default Registry Tests ====================

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        assert!(std::ptr::eq(registry1, registry2));
    }

    #[test]
    fn test_default_registry_is_valid() {
        let rebuilt = LanguageRegistry::new(default_locales()).expect("defaults must validate");
        assert_eq!(rebuilt.fallback(), LanguageRegistry::get().fallback());
    }

    #[test]
    fn test_get_by_code_russian() {
        let config = LanguageRegistry::get()
            .get_by_code("ru")
            .expect("ru is registered");

        assert_eq!(config.name, "Russian");
        assert_eq!(config.native_name, "Русский");
        assert!(config.is_fallback);
        assert!(config.enabled);
    }

    #[test]
    fn test_get_by_code_ukrainian() {
        let config = LanguageRegistry::get()
            .get_by_code("uk")
            .expect("uk is registered");

        assert_eq!(config.native_name, "Українська");
        assert!(!config.is_fallback);
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        assert!(LanguageRegistry::get().get_by_code("fr").is_none());
    }

    #[test]
    fn test_list_enabled_excludes_disabled() {
        let registry = LanguageRegistry::get();
        let enabled: Vec<&str> = registry.list_enabled().iter().map(|l| l.code).collect();

        assert_eq!(enabled, vec!["ru", "uk"]);
        assert_eq!(registry.list_all().len(), 3);
    }

    #[test]
    fn test_fallback_is_russian() {
        assert_eq!(LanguageRegistry::get().fallback().code(), "ru");
    }

    #[test]
    fn test_resolve_rejects_disabled_and_unknown() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.resolve("uk").map(|c| c.code()), Some("uk"));
        assert!(registry.resolve("en").is_none());
        assert!(registry.resolve("fr").is_none());
        assert!(!registry.is_enabled("en"));
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_new_rejects_missing_fallback() {
        let result = LanguageRegistry::new(vec![locale("ru", false, true)]);
        assert!(matches!(result, Err(ResourceError::InvalidRegistry(_))));
    }

    #[test]
    fn test_new_rejects_multiple_fallbacks() {
        let result = LanguageRegistry::new(vec![locale("ru", true, true), locale("uk", true, true)]);
        assert!(result.unwrap_err().to_string().contains("multiple"));
    }

    #[test]
    fn test_new_rejects_disabled_fallback() {
        let result = LanguageRegistry::new(vec![locale("ru", true, false)]);
        assert!(result.unwrap_err().to_string().contains("disabled"));
    }

    #[test]
    fn test_new_rejects_duplicates() {
        let result = LanguageRegistry::new(vec![locale("ru", true, true), locale("ru", false, true)]);
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    // ==================== with_fallback Tests ====================

    #[test]
    fn test_with_fallback_switches() {
        let registry = LanguageRegistry::get()
            .with_fallback("uk")
            .expect("uk can be the fallback");

        assert_eq!(registry.fallback().code(), "uk");
        assert!(!registry.get_by_code("ru").expect("ru is kept").is_fallback);
    }

    #[test]
    fn test_with_fallback_unknown() {
        let result = LanguageRegistry::get().with_fallback("fr");
        assert!(matches!(result, Err(ResourceError::UnknownLocale(code)) if code == "fr"));
    }

    #[test]
    fn test_with_fallback_disabled() {
        assert!(LanguageRegistry::get().with_fallback("en").is_err());
    }
}
