//! Resolve translation keys from the command line.
//!
//! Usage:
//!   i18n                              # Show the active language and available locales
//!   i18n <key> [name=value ...]       # Translate a key with optional interpolation args
//!   i18n --lang uk <key> [...]        # Switch (and persist) the language first
//!
//! Optional environment variables:
//! - LOCALES_DIR (defaults to the compiled-in bundles)
//! - LANGUAGE_PREFERENCE_FILE (defaults to .i18n/preference.json)
//! - FALLBACK_LANGUAGE (defaults to ru)
//! - DOCUMENT_LANGUAGE

use anyhow::{bail, Result};
use tire_service_i18n::config::Config;
use tire_service_i18n::i18n::{FilePreferenceStore, LanguageRuntime};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tire_service_i18n=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let requested_language = match args.iter().position(|arg| arg == "--lang") {
        Some(index) => {
            if index + 1 >= args.len() {
                bail!("--lang requires a language code");
            }
            let code = args.remove(index + 1);
            args.remove(index);
            Some(code)
        }
        None => None,
    };

    let config = Config::from_env()?;
    let runtime = LanguageRuntime::create(
        config.registry()?,
        &config.load_resources()?,
        FilePreferenceStore::new(&config.preference_file),
        &config.detection_signals(),
    );

    if let Some(code) = requested_language {
        if !runtime.change_language(&code) {
            bail!("Unknown language '{}'", code);
        }
    }

    let Some((key, rest)) = args.split_first() else {
        println!(
            "{} ({})",
            runtime.current_language(),
            runtime.detected_from()
        );
        for locale in runtime.registry().list_enabled() {
            println!("  {} - {}", locale.code, locale.native_name);
        }
        runtime.destroy();
        return Ok(());
    };

    let mut pairs = Vec::with_capacity(rest.len());
    for arg in rest {
        match arg.split_once('=') {
            Some(pair) => pairs.push(pair),
            None => bail!("Interpolation arguments must look like name=value, got '{}'", arg),
        }
    }

    if !runtime.exists(key) {
        info!("Key '{}' has no translation in any locale", key);
    }
    println!("{}", runtime.t_with(key, &pairs));

    runtime.destroy();
    Ok(())
}
