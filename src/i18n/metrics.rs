//! Lookup metrics for a language runtime.
//!
//! Each runtime owns its own counters, so isolated runtimes in one process
//! do not see each other's traffic.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters for translation lookups and language switches.
#[derive(Debug, Default)]
pub struct TranslationMetrics {
    /// Keys resolved in the active locale
    hits: AtomicUsize,

    /// Keys resolved only in the fallback locale
    fallback_hits: AtomicUsize,

    /// Keys resolved nowhere (the raw key was returned)
    misses: AtomicUsize,

    /// Language switches rejected because the code was unknown
    rejected_switches: AtomicUsize,
}

impl TranslationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback_hit(&self) {
        self.fallback_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_switch(&self) {
        self.rejected_switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn fallback_hits(&self) -> usize {
        self.fallback_hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn rejected_switches(&self) -> usize {
        self.rejected_switches.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallback_hits = self.fallback_hits();
        let misses = self.misses();
        let lookups = hits + fallback_hits + misses;
        let hit_rate = if lookups > 0 {
            (hits as f64 / lookups as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            lookups,
            hits,
            fallback_hits,
            misses,
            hit_rate,
            rejected_switches: self.rejected_switches(),
        }
    }
}

/// Snapshot of a runtime's translation statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    /// Total number of lookups
    pub lookups: usize,

    /// Lookups resolved in the active locale
    pub hits: usize,

    /// Lookups resolved through the fallback locale
    pub fallback_hits: usize,

    /// Lookups that returned the raw key
    pub misses: usize,

    /// Share of lookups resolved in the active locale, as a percentage (0-100)
    pub hit_rate: f64,

    /// Rejected language switches
    pub rejected_switches: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = TranslationMetrics::new();
        assert_eq!(metrics.hits(), 0);
        assert_eq!(metrics.fallback_hits(), 0);
        assert_eq!(metrics.misses(), 0);
        assert_eq!(metrics.rejected_switches(), 0);
    }

    #[test]
    fn test_record_each_counter() {
        let metrics = TranslationMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_fallback_hit();
        metrics.record_miss();
        metrics.record_rejected_switch();

        assert_eq!(metrics.hits(), 2);
        assert_eq!(metrics.fallback_hits(), 1);
        assert_eq!(metrics.misses(), 1);
        assert_eq!(metrics.rejected_switches(), 1);
    }

    #[test]
    fn test_instances_are_isolated() {
        let first = TranslationMetrics::new();
        let second = TranslationMetrics::new();
        first.record_hit();
        assert_eq!(second.hits(), 0);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = TranslationMetrics::new().report();
        assert_eq!(report.lookups, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_report_hit_rate() {
        let metrics = TranslationMetrics::new();

        // 3 hits out of 4 lookups = 75%
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_fallback_hit();

        let report = metrics.report();
        assert_eq!(report.lookups, 4);
        assert_eq!(report.hit_rate, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = TranslationMetrics::new();
        metrics.record_miss();

        let json = serde_json::to_value(metrics.report()).expect("Should serialize");
        assert_eq!(json["misses"], 1);
        assert_eq!(json["lookups"], 1);
    }
}
