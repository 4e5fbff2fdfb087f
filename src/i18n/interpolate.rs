//! `{{placeholder}}` substitution for translation templates.

use regex::{Captures, Regex};
use std::collections::BTreeSet;
use std::sync::OnceLock;

// Cached placeholder pattern; tolerates whitespace inside the braces
static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER_REGEX
        .get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.\-]+)\s*\}\}").unwrap())
}

/// Substitute `{{name}}` tokens from `args`.
///
/// Placeholders without a matching argument are left untouched so that a
/// forgotten argument is visible in the rendered UI.
pub fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    if args.is_empty() || !template.contains("{{") {
        return template.to_string();
    }

    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match args.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => (*value).to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Names of all placeholders in a template.
pub fn placeholders(template: &str) -> BTreeSet<String> {
    placeholder_regex()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}
