use crate::i18n::{DetectionSignals, LanguageRegistry, LocaleResources};
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variables consulted for the platform language, in order.
const PLATFORM_LANGUAGE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Clone)]
pub struct Config {
    // Resources
    pub locales_dir: Option<PathBuf>,

    // Language selection
    pub preference_file: PathBuf,
    pub fallback_language: String,
    pub document_language: Option<String>,
    pub platform_language: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let fallback_language =
            std::env::var("FALLBACK_LANGUAGE").unwrap_or_else(|_| "ru".to_string());
        if fallback_language.trim().is_empty() {
            anyhow::bail!("FALLBACK_LANGUAGE must not be empty");
        }

        Ok(Self {
            // Resources - compiled-in bundles are used when unset
            locales_dir: non_empty_var("LOCALES_DIR").map(PathBuf::from),

            // Language selection
            preference_file: non_empty_var("LANGUAGE_PREFERENCE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".i18n/preference.json")),
            fallback_language,
            document_language: non_empty_var("DOCUMENT_LANGUAGE"),
            platform_language: PLATFORM_LANGUAGE_VARS
                .iter()
                .find_map(|name| non_empty_var(name)),
        })
    }

    /// The default registry, re-targeted at the configured fallback.
    pub fn registry(&self) -> Result<LanguageRegistry> {
        LanguageRegistry::get()
            .with_fallback(&self.fallback_language)
            .context(format!(
                "FALLBACK_LANGUAGE '{}' is not a usable locale",
                self.fallback_language
            ))
    }

    /// Load bundles from `locales_dir`, or the compiled-in ones.
    pub fn load_resources(&self) -> Result<LocaleResources> {
        match &self.locales_dir {
            Some(dir) => LocaleResources::from_dir(dir)
                .context(format!("Failed to load locales from {}", dir.display())),
            None => LocaleResources::bundled().context("Failed to parse bundled locales"),
        }
    }

    pub fn detection_signals(&self) -> DetectionSignals {
        DetectionSignals {
            platform: self.platform_language.clone(),
            document: self.document_language.clone(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
