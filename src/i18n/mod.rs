//! Internationalization (i18n) module: locale resource composition and
//! language selection.
//!
//! # Architecture
//!
//! - `node`: Resource tree type and dotted-path resolver
//! - `merge`: Right-biased deep merge of resource maps
//! - `domain`: Resource domains and their canonical merge order
//! - `assembler`: Folds a locale's domain bundles into one resolved table
//! - `registry`: The locales the UI advertises, including the fallback
//! - `language`: Validated locale codes
//! - `interpolate`: `{{placeholder}}` substitution
//! - `store`: Durable storage for the chosen language
//! - `detect`: Initial language detection
//! - `runtime`: Lookup, language switching and change notification
//! - `selector`: Presentation model for the language selector
//! - `validator`: Translation audit against the fallback locale
//! - `metrics`: Lookup counters
//!
//! # Example
//!
//! ```rust,ignore
//! use tire_service_i18n::i18n::{
//!     DetectionSignals, LanguageRegistry, LanguageRuntime, LocaleResources, MemoryPreferenceStore,
//! };
//!
//! let runtime = LanguageRuntime::create(
//!     LanguageRegistry::get().clone(),
//!     &LocaleResources::bundled()?,
//!     MemoryPreferenceStore::new(),
//!     &DetectionSignals::default(),
//! );
//!
//! runtime.change_language("uk");
//! let label = runtime.t("forms.carBrand.fields.name");
//! ```

mod assembler;
mod detect;
mod domain;
mod error;
mod interpolate;
mod language;
mod merge;
mod metrics;
mod node;
mod registry;
mod runtime;
mod selector;
mod store;
mod validator;

pub use assembler::{assemble, assemble_tables, load_bundle, parse_bundle, LocaleResources, ResolvedTable};
pub use detect::{detect_language, Detection, DetectionSignals, DetectionSource};
pub use domain::Domain;
pub use error::ResourceError;
pub use interpolate::{interpolate, placeholders};
pub use language::{normalize_tag, LocaleCode};
pub use merge::deep_merge;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use node::{leaves, resolve_path, Node, ResourceMap};
pub use registry::{LanguageRegistry, LocaleConfig};
pub use runtime::{LanguageRuntime, Subscriber, SubscriptionId};
pub use selector::{LanguageOption, LanguageSelector};
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};
pub use validator::{TableIssue, TranslationValidator, ValidationReport};
