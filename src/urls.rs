//! Canonical and alternate URL generation.
//!
//! Every URL on the site is derived from three inputs: the origin, a locale,
//! and a locale-independent path. Paths never carry a locale segment; the
//! prefix policy in [`Routing`] decides whether one is added.
//!
//! ```text
//! origin                 locale  path                  canonical
//! https://labubu.city    en      /series               https://labubu.city/series
//! https://labubu.city    zh      /series               https://labubu.city/zh/series
//! https://labubu.city    en      "" or "/"             https://labubu.city
//! https://labubu.city    zh      "" or "/"             https://labubu.city/zh
//! ```
//!
//! The root is canonically the empty path, so `""` and `"/"` can never yield
//! two trailing-slash variants of the same page.

use crate::locale::{LocaleKind, LocaleMapper};
use crate::routing::Routing;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

/// hreflang value pointing search engines at the language-neutral fallback.
pub const X_DEFAULT: &str = "x-default";

/// Normalize a locale-independent path.
///
/// - `""` and `"/"` → `""`
/// - leading slash added, trailing slashes removed, repeated slashes collapsed
///
/// ```
/// use labubu_city::urls::normalize_path;
/// assert_eq!(normalize_path("/"), "");
/// assert_eq!(normalize_path("series/"), "/series");
/// assert_eq!(normalize_path("//series//zimomo"), "/series/zimomo");
/// ```
pub fn normalize_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 1);
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        out.push('/');
        out.push_str(segment);
    }
    out
}

/// One `<link rel="alternate">` target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlternateLink {
    pub hreflang: String,
    pub href: String,
}

/// Ordered hreflang → URL mapping: supported locales in configured order,
/// then `x-default`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlternateLinks(Vec<AlternateLink>);

impl AlternateLinks {
    pub fn get(&self, hreflang: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|l| l.hreflang == hreflang)
            .map(|l| l.href.as_str())
    }

    pub fn x_default(&self) -> Option<&str> {
        self.get(X_DEFAULT)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlternateLink> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a AlternateLinks {
    type Item = &'a AlternateLink;
    type IntoIter = std::slice::Iter<'a, AlternateLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Serialized as a JSON object, preserving entry order.
impl Serialize for AlternateLinks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for link in &self.0 {
            map.serialize_entry(&link.hreflang, &link.href)?;
        }
        map.end()
    }
}

/// Builds every URL the site publishes.
#[derive(Debug, Clone)]
pub struct UrlGenerator {
    origin: String,
    routing: Routing,
    mapper: LocaleMapper,
}

impl UrlGenerator {
    /// Trailing slashes on `origin` are dropped.
    pub fn new(origin: &str, routing: Routing, mapper: LocaleMapper) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            routing,
            mapper,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn routing(&self) -> &Routing {
        &self.routing
    }

    pub fn mapper(&self) -> &LocaleMapper {
        &self.mapper
    }

    /// Site-relative href for `path` in `locale`. The root of an unprefixed
    /// locale is `/`.
    pub fn localized_path(&self, locale: &str, path: &str) -> String {
        let path = normalize_path(path);
        let localized = if self.routing.needs_prefix(locale) {
            format!("/{locale}{path}")
        } else {
            path
        };
        if localized.is_empty() {
            "/".to_string()
        } else {
            localized
        }
    }

    /// Absolute canonical URL for `path` in `locale`.
    pub fn canonical_url(&self, locale: &str, path: &str) -> String {
        let path = normalize_path(path);
        if self.routing.needs_prefix(locale) {
            format!("{}/{}{}", self.origin, locale, path)
        } else {
            format!("{}{}", self.origin, path)
        }
    }

    /// One entry per supported locale plus `x-default`.
    pub fn alternate_links(&self, path: &str) -> AlternateLinks {
        let mut links: Vec<AlternateLink> = self
            .routing
            .locales()
            .iter()
            .map(|locale| AlternateLink {
                hreflang: self
                    .mapper
                    .map_locale(locale, LocaleKind::Hreflang)
                    .to_string(),
                href: self.canonical_url(locale, path),
            })
            .collect();
        links.push(AlternateLink {
            hreflang: X_DEFAULT.to_string(),
            href: self.canonical_url(self.routing.default_locale(), path),
        });
        AlternateLinks(links)
    }

    /// Absolute URL for a site-rooted asset (`/og-image.jpg`). Absolute
    /// inputs are returned unchanged.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.origin, normalize_path(path))
        }
    }

    /// Inverse of [`canonical_url`](Self::canonical_url) and
    /// [`localized_path`](Self::localized_path): strip the origin and an
    /// optional supported-locale segment.
    ///
    /// Input without a locale segment belongs to the default locale. The
    /// origin only matches up to a path boundary; any other URL is kept
    /// whole as an opaque path.
    pub fn strip_locale(&self, url: &str) -> (&str, String) {
        let rest = url
            .strip_prefix(self.origin.as_str())
            .filter(|rest| rest.is_empty() || rest.starts_with('/'))
            .unwrap_or(url);
        let path = normalize_path(rest);
        let mut segments = path.trim_start_matches('/').splitn(2, '/');
        let first = segments.next().unwrap_or_default();
        match self.routing.find(first) {
            Some(locale) => (locale, normalize_path(segments.next().unwrap_or_default())),
            None => (self.routing.default_locale(), path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::LocalePrefix;

    fn generator() -> UrlGenerator {
        UrlGenerator::new(
            "https://labubu.city",
            Routing::default(),
            LocaleMapper::default(),
        )
    }

    // =========================================================================
    // normalize_path
    // =========================================================================

    #[test]
    fn normalize_root_variants_to_empty() {
        assert_eq!(normalize_path(""), "");
        assert_eq!(normalize_path("/"), "");
        assert_eq!(normalize_path("///"), "");
    }

    #[test]
    fn normalize_adds_leading_and_drops_trailing_slash() {
        assert_eq!(normalize_path("series"), "/series");
        assert_eq!(normalize_path("/series/"), "/series");
        assert_eq!(normalize_path("/series/angel-in-clouds"), "/series/angel-in-clouds");
    }

    // =========================================================================
    // canonical_url
    // =========================================================================

    #[test]
    fn canonical_default_locale_has_no_prefix() {
        assert_eq!(
            generator().canonical_url("en", "/series"),
            "https://labubu.city/series"
        );
    }

    #[test]
    fn canonical_other_locale_is_prefixed() {
        assert_eq!(
            generator().canonical_url("zh", "/series"),
            "https://labubu.city/zh/series"
        );
    }

    #[test]
    fn canonical_root_is_identical_for_empty_and_slash() {
        let urls = generator();
        for locale in ["en", "zh"] {
            assert_eq!(urls.canonical_url(locale, ""), urls.canonical_url(locale, "/"));
        }
        assert_eq!(urls.canonical_url("en", "/"), "https://labubu.city");
        assert_eq!(urls.canonical_url("zh", ""), "https://labubu.city/zh");
    }

    #[test]
    fn origin_trailing_slash_trimmed() {
        let urls = UrlGenerator::new(
            "https://example.org/",
            Routing::default(),
            LocaleMapper::default(),
        );
        assert_eq!(urls.origin(), "https://example.org");
        assert_eq!(urls.canonical_url("en", "/about"), "https://example.org/about");
    }

    #[test]
    fn always_policy_prefixes_default_locale() {
        let routing = Routing::new(
            vec!["en".into(), "zh".into()],
            "en".into(),
            LocalePrefix::Always,
        )
        .unwrap();
        let urls = UrlGenerator::new("https://labubu.city", routing, LocaleMapper::default());
        assert_eq!(urls.canonical_url("en", "/series"), "https://labubu.city/en/series");
        assert_eq!(urls.localized_path("en", ""), "/en");
    }

    // =========================================================================
    // alternate_links
    // =========================================================================

    #[test]
    fn alternate_links_for_series() {
        let links = generator().alternate_links("/series");
        assert_eq!(links.len(), 3);
        assert_eq!(links.get("en-US"), Some("https://labubu.city/series"));
        assert_eq!(links.get("zh-CN"), Some("https://labubu.city/zh/series"));
        assert_eq!(links.x_default(), Some("https://labubu.city/series"));
    }

    #[test]
    fn alternate_links_keep_locale_order_then_x_default() {
        let links = generator().alternate_links("");
        let tags: Vec<&str> = links.iter().map(|l| l.hreflang.as_str()).collect();
        assert_eq!(tags, vec!["en-US", "zh-CN", "x-default"]);
    }

    #[test]
    fn alternate_links_serialize_as_ordered_object() {
        let json = serde_json::to_string(&generator().alternate_links("/about")).unwrap();
        assert_eq!(
            json,
            r#"{"en-US":"https://labubu.city/about","zh-CN":"https://labubu.city/zh/about","x-default":"https://labubu.city/about"}"#
        );
    }

    // =========================================================================
    // localized_path / asset_url
    // =========================================================================

    #[test]
    fn localized_path_root() {
        let urls = generator();
        assert_eq!(urls.localized_path("en", ""), "/");
        assert_eq!(urls.localized_path("zh", "/"), "/zh");
        assert_eq!(urls.localized_path("zh", "/series"), "/zh/series");
    }

    #[test]
    fn asset_url_absolutizes_rooted_paths() {
        let urls = generator();
        assert_eq!(urls.asset_url("/og-image.jpg"), "https://labubu.city/og-image.jpg");
        assert_eq!(
            urls.asset_url("https://img.labubu.city/logo.png"),
            "https://img.labubu.city/logo.png"
        );
    }

    // =========================================================================
    // strip_locale
    // =========================================================================

    #[test]
    fn strip_locale_from_canonical_urls() {
        let urls = generator();
        assert_eq!(
            urls.strip_locale("https://labubu.city/zh/series/zimomo"),
            ("zh", "/series/zimomo".to_string())
        );
        assert_eq!(
            urls.strip_locale("https://labubu.city/series"),
            ("en", "/series".to_string())
        );
        assert_eq!(urls.strip_locale("https://labubu.city"), ("en", String::new()));
        assert_eq!(urls.strip_locale("https://labubu.city/zh"), ("zh", String::new()));
    }

    #[test]
    fn strip_locale_from_site_relative_paths() {
        let urls = generator();
        assert_eq!(urls.strip_locale("/zh/about"), ("zh", "/about".to_string()));
        assert_eq!(urls.strip_locale("/"), ("en", String::new()));
        // Unsupported segments are part of the path.
        assert_eq!(urls.strip_locale("/fr/about"), ("en", "/fr/about".to_string()));
    }

    #[test]
    fn strip_locale_requires_origin_boundary() {
        let urls = generator();
        let (locale, path) = urls.strip_locale("https://labubu.city.evil.test/zh/series");
        assert_eq!(locale, "en");
        assert_eq!(path, "/https:/labubu.city.evil.test/zh/series");
        assert_eq!(
            urls.strip_locale("https://labubu.cityzh/series"),
            ("en", "/https:/labubu.cityzh/series".to_string())
        );
    }
}
