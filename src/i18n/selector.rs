//! Presentation model for the language selector control.
//!
//! The selector has no logic of its own: it reads the active language,
//! delegates switches to the runtime and raises a redraw flag whenever the
//! runtime reports a change.

use crate::i18n::runtime::{LanguageRuntime, SubscriptionId};
use crate::i18n::LocaleCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One entry of the selector's dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageOption {
    pub code: LocaleCode,
    pub label: &'static str,
    pub selected: bool,
}

pub struct LanguageSelector {
    runtime: Arc<LanguageRuntime>,
    subscription: SubscriptionId,
    needs_render: Arc<AtomicBool>,
}

impl LanguageSelector {
    pub fn new(runtime: Arc<LanguageRuntime>) -> Self {
        let needs_render = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&needs_render);
        let subscription = runtime.subscribe(move |_| flag.store(true, Ordering::SeqCst));

        Self {
            runtime,
            subscription,
            needs_render,
        }
    }

    pub fn current(&self) -> LocaleCode {
        self.runtime.current_language()
    }

    /// Enabled locales labelled with their native names.
    pub fn options(&self) -> Vec<LanguageOption> {
        let current = self.current();
        self.runtime
            .registry()
            .list_enabled()
            .into_iter()
            .filter_map(|config| {
                let code = self.runtime.registry().resolve(config.code)?;
                Some(LanguageOption {
                    code,
                    label: config.native_name,
                    selected: code == current,
                })
            })
            .collect()
    }

    /// Forward a user choice to the runtime.
    pub fn select(&self, code: &str) -> bool {
        self.runtime.change_language(code)
    }

    /// Returns whether a redraw is due, clearing the flag.
    pub fn take_needs_render(&self) -> bool {
        self.needs_render.swap(false, Ordering::SeqCst)
    }
}

impl Drop for LanguageSelector {
    fn drop(&mut self) {
        self.runtime.unsubscribe(self.subscription);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{DetectionSignals, LanguageRegistry, LocaleResources, MemoryPreferenceStore};

    fn runtime() -> Arc<LanguageRuntime> {
        Arc::new(LanguageRuntime::create(
            LanguageRegistry::get().clone(),
            &LocaleResources::new(),
            MemoryPreferenceStore::new(),
            &DetectionSignals::default(),
        ))
    }

    #[test]
    fn test_options_list_enabled_locales() {
        let selector = LanguageSelector::new(runtime());
        let options = selector.options();

        assert_eq!(
            options,
            vec![
                LanguageOption {
                    code: LocaleCode::RU,
                    label: "Русский",
                    selected: true,
                },
                LanguageOption {
                    code: LocaleCode::UK,
                    label: "Українська",
                    selected: false,
                },
            ]
        );
    }

    #[test]
    fn test_select_switches_and_marks_dirty() {
        let selector = LanguageSelector::new(runtime());
        assert!(selector.take_needs_render());
        assert!(!selector.take_needs_render());

        assert!(selector.select("uk"));
        assert_eq!(selector.current(), LocaleCode::UK);
        assert!(selector.take_needs_render());
        assert!(selector.options().iter().any(|o| o.code == LocaleCode::UK && o.selected));
    }

    #[test]
    fn test_select_unknown_keeps_clean() {
        let selector = LanguageSelector::new(runtime());
        selector.take_needs_render();

        assert!(!selector.select("fr"));
        assert!(!selector.take_needs_render());
    }

    #[test]
    fn test_external_switch_marks_dirty() {
        let runtime = runtime();
        let selector = LanguageSelector::new(Arc::clone(&runtime));
        selector.take_needs_render();

        runtime.change_language("uk");
        assert!(selector.take_needs_render());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let runtime = runtime();
        let selector = LanguageSelector::new(Arc::clone(&runtime));
        assert_eq!(runtime.subscriber_count(), 1);

        drop(selector);
        assert_eq!(runtime.subscriber_count(), 0);
    }
}
