//! Locale mapping for metadata standards.
//!
//! Internal locale codes (`en`, `zh`) are short path segments. Each metadata
//! standard wants its own spelling of the same locale:
//!
//! | Kind | Used for | `en` | `zh` |
//! |------|----------|------|------|
//! | [`LocaleKind::OpenGraph`] | `og:locale`, `og:locale:alternate` | `en_US` | `zh_CN` |
//! | [`LocaleKind::HtmlLang`] | `<html lang>` | `en` | `zh-CN` |
//! | [`LocaleKind::Hreflang`] | `<link rel="alternate" hreflang>`, sitemap alternates | `en-US` | `zh-CN` |
//!
//! ## Fallback
//!
//! [`LocaleMapper::map_locale`] is total: a code with no table row maps to
//! the fallback row (`en_US` / `en` / `en-US` unless configured otherwise).
//! A page never fails to render because of a mapping miss, at the price of a
//! possibly-wrong tag. The hreflang uniqueness check in
//! [`Routing::check_hreflang`](crate::routing::Routing::check_hreflang) is
//! what surfaces such a miss at startup.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The external locale representations a page needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocaleKind {
    OpenGraph,
    HtmlLang,
    Hreflang,
}

impl LocaleKind {
    pub const ALL: [LocaleKind; 3] = [
        LocaleKind::OpenGraph,
        LocaleKind::HtmlLang,
        LocaleKind::Hreflang,
    ];
}

/// One row of the mapping table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocaleTags {
    /// Open Graph locale, underscore form (`en_US`).
    pub open_graph: String,
    /// Value of the `<html lang>` attribute.
    pub html_lang: String,
    /// IETF tag for hreflang annotations (`en-US`).
    pub hreflang: String,
    /// Human-readable name shown in the language switcher.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl LocaleTags {
    pub fn new(open_graph: &str, html_lang: &str, hreflang: &str, name: &str) -> Self {
        Self {
            open_graph: open_graph.to_string(),
            html_lang: html_lang.to_string(),
            hreflang: hreflang.to_string(),
            name: name.to_string(),
        }
    }

    pub fn get(&self, kind: LocaleKind) -> &str {
        match kind {
            LocaleKind::OpenGraph => &self.open_graph,
            LocaleKind::HtmlLang => &self.html_lang,
            LocaleKind::Hreflang => &self.hreflang,
        }
    }

    /// Name of the first kind whose value is empty, if any.
    pub fn first_empty(&self) -> Option<&'static str> {
        if self.open_graph.trim().is_empty() {
            Some("open_graph")
        } else if self.html_lang.trim().is_empty() {
            Some("html_lang")
        } else if self.hreflang.trim().is_empty() {
            Some("hreflang")
        } else {
            None
        }
    }
}

/// Built-in mapping table for the locales the site ships with.
pub fn default_locale_table() -> BTreeMap<String, LocaleTags> {
    BTreeMap::from([
        (
            "en".to_string(),
            LocaleTags::new("en_US", "en", "en-US", "English"),
        ),
        (
            "zh".to_string(),
            LocaleTags::new("zh_CN", "zh-CN", "zh-CN", "中文"),
        ),
    ])
}

/// Row used for codes missing from the table.
pub fn default_fallback_tags() -> LocaleTags {
    LocaleTags::new("en_US", "en", "en-US", "")
}

/// Total mapping from internal locale codes to external tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleMapper {
    table: BTreeMap<String, LocaleTags>,
    fallback: LocaleTags,
}

impl Default for LocaleMapper {
    fn default() -> Self {
        Self::new(default_locale_table(), default_fallback_tags())
    }
}

impl LocaleMapper {
    pub fn new(table: BTreeMap<String, LocaleTags>, fallback: LocaleTags) -> Self {
        Self { table, fallback }
    }

    /// Map `locale` to its `kind` representation, falling back on a miss.
    pub fn map_locale(&self, locale: &str, kind: LocaleKind) -> &str {
        match self.table.get(locale) {
            Some(tags) => tags.get(kind),
            None => {
                tracing::debug!(locale, ?kind, "no locale mapping, using fallback");
                self.fallback.get(kind)
            }
        }
    }

    /// Whether `locale` has its own table row (as opposed to the fallback).
    pub fn is_mapped(&self, locale: &str) -> bool {
        self.table.contains_key(locale)
    }

    /// Switcher label for `locale`; the code itself when no name is configured.
    pub fn display_name<'a>(&'a self, locale: &'a str) -> &'a str {
        self.table
            .get(locale)
            .map(|t| t.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(locale)
    }
}
