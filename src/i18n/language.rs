//! Locale codes: validated identifiers for the languages the UI offers.

use crate::i18n::{LanguageRegistry, LocaleConfig, ResourceError};
use std::fmt;

/// A locale code that has been checked against a registry.
///
/// Codes are handed out by `LanguageRegistry::resolve`, or by `from_code`
/// for the default registry, so only known, enabled locales are constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocaleCode {
    code: &'static str,
}

impl LocaleCode {
    /// Russian, the fallback of the default registry.
    ///
    /// These constants name codes of `LanguageRegistry::get()`. A registry
    /// built with `LanguageRegistry::new` may not contain them; resolve codes
    /// through that registry instead.
    pub const RU: LocaleCode = LocaleCode { code: "ru" };

    /// Ukrainian, enabled in the default registry.
    pub const UK: LocaleCode = LocaleCode { code: "uk" };

    pub(crate) const fn new_unchecked(code: &'static str) -> Self {
        Self { code }
    }

    /// Create a LocaleCode from a code string using the default registry.
    ///
    /// # Errors
    /// Returns `ResourceError::UnknownLocale` if the code is not registered
    /// or the locale is disabled.
    pub fn from_code(code: &str) -> Result<LocaleCode, ResourceError> {
        LanguageRegistry::get()
            .resolve(code)
            .ok_or_else(|| ResourceError::UnknownLocale(code.to_string()))
    }

    /// Get the fallback locale of the default registry.
    pub fn fallback() -> LocaleCode {
        LanguageRegistry::get().fallback()
    }

    /// Get the locale code as a static string.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Look up this locale's configuration in the default registry.
    pub fn config(&self) -> Option<&'static LocaleConfig> {
        LanguageRegistry::get().get_by_code(self.code)
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}

/// Reduce a language tag or POSIX locale string to a bare lowercase
/// language code.
///
/// `uk_UA.UTF-8`, `uk-UA` and `UK` all normalize to `uk`. The POSIX `C` and
/// `POSIX` locales carry no language and yield `None`.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let without_encoding = trimmed
        .split(['.', '@'])
        .next()
        .unwrap_or(trimmed);
    let language = without_encoding
        .split(['-', '_'])
        .next()
        .unwrap_or(without_encoding)
        .to_ascii_lowercase();

    match language.as_str() {
        "" | "c" | "posix" => None,
        _ => Some(language),
    }
}
