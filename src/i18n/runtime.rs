//! Language runtime: the lookup and language-switch service.
//!
//! A `LanguageRuntime` is an explicit service instance rather than ambient
//! global state. It owns one resolved table per enabled locale, the active
//! locale, the preference store and the subscriber list. Several runtimes can
//! coexist in one process, each with its own tables and metrics.
//!
//! Lookups never fail: a key missing from the active table is tried in the
//! fallback locale's table, and if it is missing there too the raw key is
//! returned so the gap is visible in the UI.
//!
//! On a language switch the state write happens first, then the preference
//! write, then the `watch` update, then subscriber notification. The first
//! three steps run under a switch lock, so concurrent switches cannot leave
//! the active, persisted and published languages out of step. No lock is held
//! while subscribers run, so a subscriber may read `current_language()` (and
//! observes the new value) or even switch the language again.

use crate::i18n::assembler::{assemble_tables, LocaleResources, ResolvedTable};
use crate::i18n::detect::{detect_language, DetectionSignals, DetectionSource};
use crate::i18n::interpolate::interpolate;
use crate::i18n::metrics::{MetricsReport, TranslationMetrics};
use crate::i18n::{LanguageRegistry, LocaleCode, PreferenceStore};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tokio::sync::watch;
use tracing::{debug, info, warn};

type Tables = HashMap<LocaleCode, ResolvedTable>;

/// Callback invoked with the new locale after every successful switch.
pub type Subscriber = Arc<dyn Fn(LocaleCode) + Send + Sync>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct LanguageRuntime {
    registry: LanguageRegistry,
    tables: RwLock<Arc<Tables>>,
    current: RwLock<LocaleCode>,
    switch: Mutex<()>,
    detected_from: DetectionSource,
    store: Box<dyn PreferenceStore>,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
    sender: watch::Sender<LocaleCode>,
    metrics: TranslationMetrics,
}

impl LanguageRuntime {
    /// Build a runtime: assemble every enabled locale, then detect the
    /// initial language (persisted, platform, document, fallback).
    ///
    /// # Arguments
    /// * `registry` - Locales the runtime may serve, including the fallback
    /// * `resources` - Domain bundles per locale; locales without any get an empty table
    /// * `store` - Where the chosen language is read at startup and written on switch
    /// * `signals` - Platform and document language hints for detection
    ///
    /// # Returns
    /// A runtime whose active language is the first enabled match in
    /// detection order. Detection never persists its result.
    pub fn create<S>(
        registry: LanguageRegistry,
        resources: &LocaleResources,
        store: S,
        signals: &DetectionSignals,
    ) -> Self
    where
        S: PreferenceStore + 'static,
    {
        let tables = assemble_tables(&registry, resources);
        let detection = detect_language(&registry, &store, signals);
        let (sender, _) = watch::channel(detection.locale);

        info!(
            "Language runtime ready: {} locales, active '{}' (from {})",
            tables.len(),
            detection.locale,
            detection.source
        );

        Self {
            registry,
            tables: RwLock::new(Arc::new(tables)),
            current: RwLock::new(detection.locale),
            switch: Mutex::new(()),
            detected_from: detection.source,
            store: Box::new(store),
            subscribers: Mutex::new(Vec::new()),
            next_subscription: AtomicU64::new(0),
            sender,
            metrics: TranslationMetrics::new(),
        }
    }

    /// Tear the runtime down, dropping every subscriber.
    pub fn destroy(self) {
        let subscribers = self.subscriber_count();
        info!(
            "Language runtime destroyed (active '{}', {} subscribers dropped)",
            self.current_language(),
            subscribers
        );
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Where the initial language came from.
    pub fn detected_from(&self) -> DetectionSource {
        self.detected_from
    }

    /// The active locale.
    pub fn current_language(&self) -> LocaleCode {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// The locales a language selector may offer.
    pub fn available_languages(&self) -> Vec<LocaleCode> {
        self.registry.enabled_codes()
    }

    /// Translate `key` in the active locale.
    pub fn t(&self, key: &str) -> String {
        self.t_with(key, &[])
    }

    /// Translate `key` and substitute `{{placeholder}}` tokens from `args`.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let tables = self.tables();
        let current = self.current_language();

        if let Some(text) = tables.get(&current).and_then(|table| table.text(key)) {
            self.metrics.record_hit();
            return interpolate(&text, args);
        }

        let fallback = self.registry.fallback();
        if fallback != current {
            if let Some(text) = tables.get(&fallback).and_then(|table| table.text(key)) {
                debug!("Key '{}' missing in '{}', using '{}'", key, current, fallback);
                self.metrics.record_fallback_hit();
                return interpolate(&text, args);
            }
        }

        debug!("Missing translation for key '{}'", key);
        self.metrics.record_miss();
        key.to_string()
    }

    /// Whether `key` resolves in the active or fallback locale.
    pub fn exists(&self, key: &str) -> bool {
        let tables = self.tables();
        [self.current_language(), self.registry.fallback()]
            .iter()
            .any(|locale| tables.get(locale).and_then(|t| t.text(key)).is_some())
    }

    /// Switch the active language.
    ///
    /// # Arguments
    /// * `code` - Locale code to activate (e.g. "uk")
    ///
    /// # Returns
    /// * `true` once the state, the stored preference and the `watch` channel
    ///   hold the new locale and every subscriber has been called
    /// * `false` if `code` is not an enabled locale; nothing is changed,
    ///   stored or notified
    ///
    /// A failed preference write is logged but does not undo the switch.
    pub fn change_language(&self, code: &str) -> bool {
        let Some(locale) = self.registry.resolve(code) else {
            warn!("Rejected switch to unknown language '{}'", code);
            self.metrics.record_rejected_switch();
            return false;
        };

        let previous = {
            let _switch = self.switch.lock().unwrap_or_else(PoisonError::into_inner);

            let previous = {
                let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
                std::mem::replace(&mut *current, locale)
            };

            if let Err(e) = self.store.save(locale.code()) {
                warn!("Failed to persist language '{}': {:#}", locale, e);
            }

            self.sender.send_replace(locale);
            previous
        };

        let subscribers: Vec<Subscriber> = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();
        for subscriber in subscribers {
            subscriber(locale);
        }

        info!("Language changed from '{}' to '{}'", previous, locale);
        true
    }

    /// Register a callback run after every successful switch.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(LocaleCode) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription.fetch_add(1, Ordering::Relaxed));
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(callback)));
        id
    }

    /// Remove a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = subscribers.len();
        subscribers.retain(|(existing, _)| *existing != id);
        subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// A channel that always holds the active locale.
    pub fn watch(&self) -> watch::Receiver<LocaleCode> {
        self.sender.subscribe()
    }

    /// Rebuild every table from `resources` and swap them in at once.
    ///
    /// The active language is kept even if its resources are gone; its
    /// lookups then go through the fallback chain.
    pub fn reload(&self, resources: &LocaleResources) {
        let tables = assemble_tables(&self.registry, resources);
        *self.tables.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(tables);
        info!("Reloaded translation resources");
    }

    /// Snapshot of a locale's resolved table.
    pub fn table(&self, locale: LocaleCode) -> Option<ResolvedTable> {
        self.tables().get(&locale).cloned()
    }

    pub fn metrics(&self) -> MetricsReport {
        self.metrics.report()
    }

    fn tables(&self) -> Arc<Tables> {
        Arc::clone(&self.tables.read().unwrap_or_else(PoisonError::into_inner))
    }
}
