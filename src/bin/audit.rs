//! Audit binary - assembles every locale and reports translation gaps
//!
//! Usage:
//!   cargo run --bin audit              # Audit the compiled-in bundles
//!   LOCALES_DIR=locales cargo run --bin audit
//!
//! Exits with an error when any locale has placeholder mismatches.

use anyhow::{bail, Result};
use tire_service_i18n::config::Config;
use tire_service_i18n::i18n::{assemble_tables, TranslationValidator};
use tracing::info;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tire_service_i18n=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let registry = config.registry()?;
    let resources = config.load_resources()?;
    let tables = assemble_tables(&registry, &resources);

    info!(
        "Auditing {} locales against fallback '{}'",
        tables.len(),
        registry.fallback()
    );

    let reports = TranslationValidator::validate_all(&registry, &tables);
    let mut total_errors = 0;

    for (locale, report) in &reports {
        if report.is_clean() {
            println!("{}: clean", locale);
            continue;
        }

        let errors = report.errors().count();
        println!(
            "{}: {} errors, {} warnings",
            locale,
            errors,
            report.issues().len() - errors
        );
        for error in report.errors() {
            println!("  error: {}", error);
        }
        for warning in report.warnings() {
            println!("  warning: {}", warning);
        }
        total_errors += errors;
    }

    if total_errors > 0 {
        bail!("{} translation errors found", total_errors);
    }

    Ok(())
}
