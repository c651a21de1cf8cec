//! Bundled translation catalogs.
//!
//! Each locale's strings live in `messages/{locale}.json`, compiled into the
//! binary with `include_str!`. A catalog is parsed the first time any page
//! asks for it and shared read-only afterwards.
//!
//! Keys are dotted paths into the JSON tree (`series.notFound.title`).
//! Lookup never fails:
//!
//! 1. the requested locale's catalog
//! 2. the fallback locale's catalog
//! 3. the key itself
//!
//! Placeholders use `{name}` syntax and are filled by [`Translator::t_with`].

use serde_json::Value;
use std::sync::OnceLock;

/// Locale whose bundle always exists and backs every other lookup.
pub const BUNDLE_FALLBACK: &str = "en";

const BUNDLES: &[(&str, &str)] = &[
    ("en", include_str!("../messages/en.json")),
    ("zh", include_str!("../messages/zh.json")),
];

/// One parsed locale catalog.
#[derive(Debug)]
pub struct Catalog {
    locale: &'static str,
    tree: Value,
}

impl Catalog {
    /// Resolve a dotted key to a string leaf.
    pub fn get(&self, key: &str) -> Option<&str> {
        key.split('.')
            .try_fold(&self.tree, |node, part| node.get(part))
            .and_then(Value::as_str)
    }
}

fn catalogs() -> &'static [Catalog] {
    static CATALOGS: OnceLock<Vec<Catalog>> = OnceLock::new();
    CATALOGS.get_or_init(|| {
        BUNDLES
            .iter()
            .map(|(locale, raw)| {
                tracing::debug!(locale, "parsing message bundle");
                Catalog {
                    locale,
                    tree: serde_json::from_str(raw).expect("bundled messages must be valid JSON"),
                }
            })
            .collect()
    })
}

/// Catalog for `locale`, if one is bundled.
pub fn catalog(locale: &str) -> Option<&'static Catalog> {
    catalogs().iter().find(|c| c.locale == locale)
}

/// Locales with a bundled catalog.
pub fn bundled_locales() -> Vec<&'static str> {
    BUNDLES.iter().map(|(locale, _)| *locale).collect()
}

/// Key → string lookup for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    primary: &'static Catalog,
    fallback: &'static Catalog,
}

impl Translator {
    /// Unbundled `locale` or `fallback` codes resolve to [`BUNDLE_FALLBACK`].
    pub fn new(locale: &str, fallback: &str) -> Self {
        let base = catalog(BUNDLE_FALLBACK).expect("fallback bundle is always compiled in");
        let fallback = catalog(fallback).unwrap_or(base);
        let primary = catalog(locale).unwrap_or(fallback);
        Self { primary, fallback }
    }

    /// Locale of the catalog that answers first.
    pub fn locale(&self) -> &'static str {
        self.primary.locale
    }

    pub fn t(&self, key: &str) -> String {
        self.lookup(key).to_string()
    }

    /// Look up `key` and substitute each `{name}` placeholder.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.lookup(key).to_string();
        for (name, value) in args {
            text = text.replace(&format!("{{{name}}}"), value);
        }
        text
    }

    /// Comma-separated value split into trimmed, non-empty items.
    pub fn t_list(&self, key: &str) -> Vec<String> {
        self.lookup(key)
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn lookup<'k>(&self, key: &'k str) -> &'k str {
        if let Some(text) = self.primary.get(key) {
            return text;
        }
        if let Some(text) = self.fallback.get(key) {
            tracing::debug!(key, locale = self.primary.locale, "message missing, using fallback locale");
            return text;
        }
        tracing::warn!(key, locale = self.primary.locale, "message missing in every bundle");
        key
    }
}
