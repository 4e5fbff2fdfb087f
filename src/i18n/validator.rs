//! Translation audit.
//!
//! Compares each locale's resolved table against the fallback locale's table
//! to catch gaps before they reach the UI:
//! - keys the fallback defines but the locale lacks (warning)
//! - `{{placeholder}}` sets that differ from the fallback's (error)
//! - leaves that have no text form, such as arrays or `null` (warning)

use crate::i18n::assembler::ResolvedTable;
use crate::i18n::interpolate::placeholders;
use crate::i18n::node::{leaves, Node};
use crate::i18n::{LanguageRegistry, LocaleCode};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// One problem found at a key path of a locale's table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableIssue {
    /// The fallback defines the key but the locale has no text for it.
    MissingKey { path: String },

    /// The locale's text uses other `{{placeholder}}` names than the fallback's.
    PlaceholderMismatch {
        path: String,
        expected: BTreeSet<String>,
        found: BTreeSet<String>,
    },

    /// A `null` leaf, which never renders.
    NullLeaf { path: String },
}

impl TableIssue {
    pub fn path(&self) -> &str {
        match self {
            Self::MissingKey { path }
            | Self::PlaceholderMismatch { path, .. }
            | Self::NullLeaf { path } => path,
        }
    }

    /// Errors break rendering; the other issues degrade to fallback text.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::PlaceholderMismatch { .. })
    }
}

impl fmt::Display for TableIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { path } => write!(f, "missing key '{}'", path),
            Self::PlaceholderMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "placeholder mismatch at '{}': expected {:?}, found {:?}",
                path, expected, found
            ),
            Self::NullLeaf { path } => write!(f, "null value at '{}'", path),
        }
    }
}

/// Audit result for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    locale: String,
    issues: Vec<TableIssue>,
}

impl ValidationReport {
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Every issue, in key order of the fallback table, then `null` leaves.
    pub fn issues(&self) -> &[TableIssue] {
        &self.issues
    }

    pub fn errors(&self) -> impl Iterator<Item = &TableIssue> {
        self.issues.iter().filter(|issue| issue.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &TableIssue> {
        self.issues.iter().filter(|issue| !issue.is_error())
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Validator for resolved translation tables.
pub struct TranslationValidator;

impl TranslationValidator {
    /// Validate `candidate` against the `reference` (fallback) table.
    ///
    /// Arrays are expected structure (e.g. weekday lists) and are only
    /// reported when the candidate lacks them; `null` leaves are always flagged.
    pub fn validate(reference: &ResolvedTable, candidate: &ResolvedTable) -> ValidationReport {
        let mut issues = Vec::new();

        for (path, node) in leaves(reference.root()) {
            let Some(reference_text) = node.leaf_text() else {
                if candidate.get(&path).is_none() {
                    issues.push(TableIssue::MissingKey { path });
                }
                continue;
            };

            match candidate.get(&path).and_then(Node::leaf_text) {
                None => issues.push(TableIssue::MissingKey { path }),
                Some(candidate_text) => {
                    let expected = placeholders(&reference_text);
                    let found = placeholders(&candidate_text);
                    if expected != found {
                        issues.push(TableIssue::PlaceholderMismatch {
                            path,
                            expected,
                            found,
                        });
                    }
                }
            }
        }

        for (path, node) in leaves(candidate.root()) {
            if matches!(node, Node::Value(Value::Null)) {
                issues.push(TableIssue::NullLeaf { path });
            }
        }

        ValidationReport {
            locale: candidate.locale().to_string(),
            issues,
        }
    }

    /// Validate every enabled locale against the registry's fallback locale.
    ///
    /// The fallback is validated against itself, which only surfaces its own
    /// `null` leaves. Locales without a table are skipped.
    pub fn validate_all(
        registry: &LanguageRegistry,
        tables: &HashMap<LocaleCode, ResolvedTable>,
    ) -> BTreeMap<LocaleCode, ValidationReport> {
        let fallback = registry.fallback();
        let Some(reference) = tables.get(&fallback) else {
            return BTreeMap::new();
        };

        registry
            .enabled_codes()
            .into_iter()
            .filter_map(|code| {
                let table = tables.get(&code)?;
                Some((code, Self::validate(reference, table)))
            })
            .collect()
    }
}
