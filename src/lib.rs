//! Locale resource composition and language selection for the tire-service
//! booking front-end.
//!
//! Translation bundles are split per locale and per functional domain
//! (base, settings, client, modals). They are deep-merged into one resolved
//! table per locale at startup and served through a `LanguageRuntime` that
//! handles lookups, fallback, interpolation and language switching.

pub mod config;
pub mod i18n;
