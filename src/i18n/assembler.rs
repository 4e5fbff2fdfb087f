//! Resource assembly: folds the domain bundles of a locale into one table.
//!
//! Bundles are stored per locale and per `Domain`, and are always folded in
//! `Domain::ORDER` (base, settings, client, modals), starting from an empty
//! map. The resulting `ResolvedTable` is immutable; reloading resources
//! rebuilds tables from scratch.

use crate::i18n::merge::deep_merge;
use crate::i18n::node::{json_kind, resolve_path, Node, ResourceMap};
use crate::i18n::{Domain, LanguageRegistry, LocaleCode, ResourceError};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// The fully merged translation dictionary for one locale.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTable {
    locale: String,
    root: ResourceMap,
}

impl ResolvedTable {
    /// An empty table for a locale without resources.
    pub fn empty(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            root: ResourceMap::new(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn root(&self) -> &ResourceMap {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Node at a dotted key path.
    pub fn get(&self, key: &str) -> Option<&Node> {
        resolve_path(&self.root, key)
    }

    /// Translation text at a dotted key path, if the leaf has a text form.
    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Node::leaf_text)
    }
}

/// Left-fold `deep_merge` over `bundles`, starting from an empty map.
///
/// # Arguments
/// * `locale` - Code recorded on the resulting table
/// * `bundles` - Domain bundles in merge order; the last bundle defining a
///   scalar key wins
///
/// # Returns
/// The resolved table. No bundles yield an empty table.
pub fn assemble<'a, I>(locale: &str, bundles: I) -> ResolvedTable
where
    I: IntoIterator<Item = &'a ResourceMap>,
{
    let mut count = 0;
    let root = bundles.into_iter().fold(ResourceMap::new(), |acc, bundle| {
        count += 1;
        deep_merge(&acc, bundle)
    });

    debug!("Assembled locale '{}' from {} bundles", locale, count);

    ResolvedTable {
        locale: locale.to_string(),
        root,
    }
}

/// Parse a JSON document into a resource bundle.
///
/// # Errors
/// Fails if the text is not valid JSON or the top-level value is not an object.
pub fn parse_bundle(origin: &str, json: &str) -> Result<ResourceMap, ResourceError> {
    let value: Value = serde_json::from_str(json).map_err(|source| ResourceError::Parse {
        origin: origin.to_string(),
        source,
    })?;

    match Node::from(value) {
        Node::Branch(map) => Ok(map),
        Node::Value(other) => Err(ResourceError::NotAnObject {
            origin: origin.to_string(),
            found: json_kind(&other),
        }),
    }
}

/// Read and parse a bundle file.
pub fn load_bundle(path: &Path) -> Result<ResourceMap, ResourceError> {
    let json = fs::read_to_string(path).map_err(|source| ResourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_bundle(&path.display().to_string(), &json)
}

/// Domain bundles for every locale, as loaded from disk or compiled in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocaleResources {
    bundles: BTreeMap<String, BTreeMap<Domain, ResourceMap>>,
}

impl LocaleResources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the bundle of one domain for one locale.
    pub fn insert(&mut self, locale: &str, domain: Domain, bundle: ResourceMap) {
        self.bundles
            .entry(locale.to_string())
            .or_default()
            .insert(domain, bundle);
    }

    /// Builder-style `insert`.
    pub fn with_bundle(mut self, locale: &str, domain: Domain, bundle: ResourceMap) -> Self {
        self.insert(locale, domain, bundle);
        self
    }

    /// Locales that have at least one bundle.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    pub fn bundle(&self, locale: &str, domain: Domain) -> Option<&ResourceMap> {
        self.bundles.get(locale)?.get(&domain)
    }

    /// Bundles of a locale in canonical domain order. Missing domains are skipped.
    pub fn ordered_bundles(&self, locale: &str) -> Vec<&ResourceMap> {
        Domain::ORDER
            .iter()
            .filter_map(|domain| self.bundle(locale, *domain))
            .collect()
    }

    /// Assemble the table of one locale.
    pub fn assemble_locale(&self, locale: &str) -> ResolvedTable {
        assemble(locale, self.ordered_bundles(locale))
    }

    /// Load bundles from a `<root>/<locale>/<domain>.json` layout.
    ///
    /// Files whose stem is not a known domain are skipped with a warning.
    pub fn from_dir(root: &Path) -> Result<Self, ResourceError> {
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source: std::io::Error| ResourceError::Io { path, source }
        };

        let mut resources = Self::new();
        let mut locale_dirs: Vec<_> = fs::read_dir(root)
            .map_err(io_error(root))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(io_error(root))?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        locale_dirs.sort();

        for locale_dir in locale_dirs {
            let Some(locale) = locale_dir.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            let mut files: Vec<_> = fs::read_dir(&locale_dir)
                .map_err(io_error(&locale_dir))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(io_error(&locale_dir))?
                .into_iter()
                .map(|entry| entry.path())
                .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("json"))
                .collect();
            files.sort();

            for file in files {
                let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
                match Domain::from_file_stem(stem) {
                    Some(domain) => {
                        let bundle = load_bundle(&file)?;
                        resources.insert(locale, domain, bundle);
                    }
                    None => warn!("Skipping unknown resource domain: {}", file.display()),
                }
            }
        }

        Ok(resources)
    }

    /// Bundles compiled into the binary.
    pub fn bundled() -> Result<Self, ResourceError> {
        const BUNDLED: [(&str, Domain, &str); 8] = [
            ("ru", Domain::Base, include_str!("../../locales/ru/base.json")),
            ("ru", Domain::Settings, include_str!("../../locales/ru/settings.json")),
            ("ru", Domain::Client, include_str!("../../locales/ru/client.json")),
            ("ru", Domain::Modals, include_str!("../../locales/ru/modals.json")),
            ("uk", Domain::Base, include_str!("../../locales/uk/base.json")),
            ("uk", Domain::Settings, include_str!("../../locales/uk/settings.json")),
            ("uk", Domain::Client, include_str!("../../locales/uk/client.json")),
            ("uk", Domain::Modals, include_str!("../../locales/uk/modals.json")),
        ];

        let mut resources = Self::new();
        for (locale, domain, json) in BUNDLED {
            let origin = format!("bundled {}/{}.json", locale, domain);
            resources.insert(locale, domain, parse_bundle(&origin, json)?);
        }
        Ok(resources)
    }
}

/// Assemble a table for every enabled locale of `registry`.
///
/// Every advertised locale gets a table: a locale without bundles gets an
/// empty one, so all of its lookups go through the fallback chain.
pub fn assemble_tables(
    registry: &LanguageRegistry,
    resources: &LocaleResources,
) -> HashMap<LocaleCode, ResolvedTable> {
    for locale in resources.locales() {
        if !registry.is_enabled(locale) {
            warn!("Ignoring resources for unregistered or disabled locale '{}'", locale);
        }
    }

    registry
        .enabled_codes()
        .into_iter()
        .map(|code| {
            let table = resources.assemble_locale(code.code());
            if table.is_empty() {
                warn!("Locale '{}' has no resources, lookups will fall back", code);
            }
            (code, table)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn bundle(value: Value) -> ResourceMap {
        match Node::from(value) {
            Node::Branch(map) => map,
            Node::Value(_) => panic!("test fixture must be an object"),
        }
    }

    // ==================== assemble Tests ====================

    #[test]
    fn test_assemble_unions_nested_keys() {
        let base = bundle(json!({"a": {"b": "1"}}));
        let overlay = bundle(json!({"a": {"c": "2"}}));

        let table = assemble("ru", [&base, &overlay]);
        assert_eq!(table.root(), &bundle(json!({"a": {"b": "1", "c": "2"}})));
        assert_eq!(table.locale(), "ru");
    }

    #[test]
    fn test_assemble_branch_replaces_scalar() {
        let base = bundle(json!({"a": "x"}));
        let overlay = bundle(json!({"a": {"b": "y"}}));

        let table = assemble("ru", [&base, &overlay]);
        assert_eq!(table.root(), &bundle(json!({"a": {"b": "y"}})));
    }

    #[test]
    fn test_assemble_empty_sequence() {
        let table = assemble("uk", std::iter::empty::<&ResourceMap>());
        assert!(table.is_empty());
        assert_eq!(table, ResolvedTable::empty("uk"));
    }

    #[test]
    fn test_assemble_is_deterministic() {
        let resources = LocaleResources::bundled().expect("bundled resources parse");
        assert_eq!(resources.assemble_locale("ru"), resources.assemble_locale("ru"));
    }

    #[test]
    fn test_assemble_order_changes_result() {
        let first = bundle(json!({"title": "first"}));
        let second = bundle(json!({"title": "second"}));

        assert_eq!(
            assemble("ru", [&first, &second]).text("title").as_deref(),
            Some("second")
        );
        assert_eq!(
            assemble("ru", [&second, &first]).text("title").as_deref(),
            Some("first")
        );
    }

    // ==================== Domain Order Tests ====================

    #[test]
    fn test_domain_order_pinned_regardless_of_insertion() {
        let resources = LocaleResources::new()
            .with_bundle("ru", Domain::Modals, bundle(json!({"k": "modals"})))
            .with_bundle("ru", Domain::Client, bundle(json!({"k": "client"})))
            .with_bundle("ru", Domain::Base, bundle(json!({"k": "base"})))
            .with_bundle("ru", Domain::Settings, bundle(json!({"k": "settings"})));

        assert_eq!(resources.assemble_locale("ru").text("k").as_deref(), Some("modals"));
    }

    #[test]
    fn test_each_domain_overrides_the_previous() {
        let layers = [
            (Domain::Base, "base"),
            (Domain::Settings, "settings"),
            (Domain::Client, "client"),
            (Domain::Modals, "modals"),
        ];

        for len in 1..=layers.len() {
            let mut resources = LocaleResources::new();
            for (domain, label) in &layers[..len] {
                resources.insert("uk", *domain, bundle(json!({"k": label})));
            }
            let expected = layers[len - 1].1;
            assert_eq!(resources.assemble_locale("uk").text("k").as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_bundled_client_overrides_base() {
        let resources = LocaleResources::bundled().expect("bundled resources parse");
        let table = resources.assemble_locale("ru");

        assert_eq!(table.text("common.status.active").as_deref(), Some("Активный"));
        assert_eq!(table.text("common.status.inactive").as_deref(), Some("Неактивен"));
        assert_eq!(
            table.text("app.subtitle").as_deref(),
            Some("Панель управления шиномонтажом")
        );
    }

    #[test]
    fn test_bundled_arrays_kept_whole() {
        let resources = LocaleResources::bundled().expect("bundled resources parse");
        let table = resources.assemble_locale("uk");

        assert_eq!(
            table.get("bookingSteps.titles"),
            Some(&Node::Value(json!(["Місто", "Сервісна точка", "Дата і час", "Перевірка"])))
        );
    }

    // ==================== Parsing Tests ====================

    #[test]
    fn test_parse_bundle_rejects_non_object() {
        let result = parse_bundle("inline", "[1, 2]");
        assert!(matches!(
            result,
            Err(ResourceError::NotAnObject { found: "array", .. })
        ));
    }

    #[test]
    fn test_parse_bundle_rejects_invalid_json() {
        let result = parse_bundle("inline", "{ not json");
        assert!(result.unwrap_err().to_string().contains("invalid JSON in inline"));
    }

    #[test]
    fn test_load_bundle_missing_file() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let result = load_bundle(&temp.path().join("missing.json"));
        assert!(matches!(result, Err(ResourceError::Io { .. })));
    }

    // ==================== from_dir Tests ====================

    #[test]
    fn test_from_dir_loads_known_domains() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let ru = temp.path().join("ru");
        fs::create_dir(&ru).expect("Failed to create locale dir");
        fs::write(ru.join("base.json"), r#"{"a": {"b": "1"}}"#).expect("write base");
        fs::write(ru.join("modals.json"), r#"{"a": {"c": "2"}}"#).expect("write modals");
        fs::write(ru.join("notes.json"), r#"{"ignored": true}"#).expect("write notes");
        fs::write(ru.join("README.md"), "not a bundle").expect("write readme");

        let resources = LocaleResources::from_dir(temp.path()).expect("Should load");
        assert_eq!(resources.locales().collect::<Vec<_>>(), vec!["ru"]);
        assert!(resources.bundle("ru", Domain::Settings).is_none());

        let table = resources.assemble_locale("ru");
        assert_eq!(table.root(), &bundle(json!({"a": {"b": "1", "c": "2"}})));
    }

    #[test]
    fn test_from_dir_fails_on_malformed_bundle() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let uk = temp.path().join("uk");
        fs::create_dir(&uk).expect("Failed to create locale dir");
        fs::write(uk.join("client.json"), "{").expect("write client");

        let result = LocaleResources::from_dir(temp.path());
        assert!(matches!(result, Err(ResourceError::Parse { .. })));
    }

    #[test]
    fn test_from_dir_missing_root() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let result = LocaleResources::from_dir(&temp.path().join("absent"));
        assert!(matches!(result, Err(ResourceError::Io { .. })));
    }

    // ==================== assemble_tables Tests ====================

    #[test]
    fn test_assemble_tables_covers_every_enabled_locale() {
        let resources = LocaleResources::new().with_bundle("ru", Domain::Base, bundle(json!({"a": "1"})));
        let tables = assemble_tables(LanguageRegistry::get(), &resources);

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[&LocaleCode::RU].text("a").as_deref(), Some("1"));
        assert!(tables[&LocaleCode::UK].is_empty());
    }

    #[test]
    fn test_assemble_tables_ignores_unknown_locales() {
        let resources = LocaleResources::new()
            .with_bundle("fr", Domain::Base, bundle(json!({"a": "1"})))
            .with_bundle("en", Domain::Base, bundle(json!({"a": "1"})));
        let tables = assemble_tables(LanguageRegistry::get(), &resources);

        assert_eq!(tables.len(), 2);
        assert!(tables.values().all(ResolvedTable::is_empty));
    }
}
