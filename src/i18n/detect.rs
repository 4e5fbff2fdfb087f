//! Initial language detection.
//!
//! Sources are consulted in a fixed order and the first one naming an
//! enabled locale wins:
//!
//! 1. the persisted preference
//! 2. the platform language signal (e.g. `LANG`)
//! 3. the static document default
//! 4. the registry's fallback locale

use crate::i18n::language::normalize_tag;
use crate::i18n::{LanguageRegistry, LocaleCode, PreferenceStore};
use std::fmt;
use tracing::{debug, warn};

/// Where the initial language came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    Persisted,
    Platform,
    Document,
    Fallback,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectionSource::Persisted => "persisted preference",
            DetectionSource::Platform => "platform language",
            DetectionSource::Document => "document default",
            DetectionSource::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Environment-supplied language hints. Raw values; normalized on use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionSignals {
    pub platform: Option<String>,
    pub document: Option<String>,
}

impl DetectionSignals {
    pub fn with_platform(mut self, tag: &str) -> Self {
        self.platform = Some(tag.to_string());
        self
    }

    pub fn with_document(mut self, tag: &str) -> Self {
        self.document = Some(tag.to_string());
        self
    }
}

/// Outcome of detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub locale: LocaleCode,
    pub source: DetectionSource,
}

/// Choose the initial language.
///
/// A store that fails to load is treated as holding nothing.
pub fn detect_language(
    registry: &LanguageRegistry,
    store: &dyn PreferenceStore,
    signals: &DetectionSignals,
) -> Detection {
    let persisted = match store.load() {
        Ok(value) => value,
        Err(e) => {
            warn!("Ignoring unreadable language preference: {:#}", e);
            None
        }
    };

    let candidates = [
        (DetectionSource::Persisted, persisted.as_deref()),
        (DetectionSource::Platform, signals.platform.as_deref()),
        (DetectionSource::Document, signals.document.as_deref()),
    ];

    for (source, raw) in candidates {
        let Some(raw) = raw else { continue };
        match normalize_tag(raw).and_then(|code| registry.resolve(&code)) {
            Some(locale) => {
                debug!("Detected language '{}' from {}", locale, source);
                return Detection { locale, source };
            }
            None => debug!("Skipping unusable {} '{}'", source, raw),
        }
    }

    Detection {
        locale: registry.fallback(),
        source: DetectionSource::Fallback,
    }
}
