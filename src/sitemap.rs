//! Sitemap enumeration plus `sitemap.xml` and `robots.txt` rendering.
//!
//! [`enumerate`] walks the site inventory path by path; for each path it
//! emits one entry per locale, in configured locale order. Every entry of a
//! path carries the same alternate set, so crawlers see the full language
//! cluster no matter which URL they land on.
//!
//! ```text
//! path                              changefreq  priority
//! ""                                daily       1.0
//! /labubu-wallpapers                weekly      0.9
//! /series/<slug>                    monthly     0.8
//! /labubu-wallpapers/<category>     daily       0.6
//! anything else                     weekly      0.6
//! ```
//!
//! Enumeration is pure: `last_modified` is passed in.

use crate::routes::{self, SERIES_PATH, WALLPAPERS_PATH};
use crate::urls::{AlternateLinks, UrlGenerator, normalize_path};
use serde::Serialize;
use std::borrow::Cow;
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFrequency {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub url: String,
    #[serde(serialize_with = "serialize_date")]
    pub last_modified: Date,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
    pub alternates: AlternateLinks,
}

/// `YYYY-MM-DD`, the W3C date form sitemaps use.
fn serialize_date<S: serde::Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(date)
}

/// Frequency and priority for a normalized path.
pub fn schedule(path: &str) -> (ChangeFrequency, f32) {
    if path.is_empty() {
        return (ChangeFrequency::Daily, 1.0);
    }
    if path == WALLPAPERS_PATH {
        return (ChangeFrequency::Weekly, 0.9);
    }
    let is_child_of = |parent: &str| {
        path.strip_prefix(parent)
            .and_then(|rest| rest.strip_prefix('/'))
            .is_some_and(|slug| !slug.is_empty())
    };
    if is_child_of(SERIES_PATH) {
        (ChangeFrequency::Monthly, 0.8)
    } else if is_child_of(WALLPAPERS_PATH) {
        (ChangeFrequency::Daily, 0.6)
    } else {
        (ChangeFrequency::Weekly, 0.6)
    }
}

/// Site paths in sitemap order.
pub fn site_paths() -> Vec<String> {
    routes::site_routes().iter().map(|r| r.path()).collect()
}

/// Entries for the full site inventory.
pub fn enumerate(urls: &UrlGenerator, last_modified: Date) -> Vec<SitemapEntry> {
    enumerate_paths(urls, &site_paths(), last_modified)
}

/// Entries for `paths`: each path once (first occurrence wins), one entry
/// per locale.
pub fn enumerate_paths<S: AsRef<str>>(
    urls: &UrlGenerator,
    paths: &[S],
    last_modified: Date,
) -> Vec<SitemapEntry> {
    let mut seen: Vec<String> = Vec::new();
    let mut entries = Vec::new();
    for path in paths {
        let path = normalize_path(path.as_ref());
        if seen.contains(&path) {
            tracing::debug!(path, "duplicate sitemap path skipped");
            continue;
        }
        let (change_frequency, priority) = schedule(&path);
        let alternates = urls.alternate_links(&path);
        for locale in urls.routing().locales() {
            entries.push(SitemapEntry {
                url: urls.canonical_url(locale, &path),
                last_modified,
                change_frequency,
                priority,
                alternates: alternates.clone(),
            });
        }
        seen.push(path);
    }
    entries
}

/// Escape text for XML character data and attribute values.
pub fn xml_escape(s: &str) -> Cow<'_, str> {
    let Some(first) = s.find(['<', '>', '"', '\'', '&']) else {
        return Cow::Borrowed(s);
    };
    let mut out = String::with_capacity(s.len() + 8);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// sitemaps.org `urlset` with `xhtml:link` alternates.
pub fn render_sitemap_xml(entries: &[SitemapEntry]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" \
         xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );
    for entry in entries {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&entry.url)));
        for link in &entry.alternates {
            xml.push_str(&format!(
                "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                xml_escape(&link.hreflang),
                xml_escape(&link.href)
            ));
        }
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", entry.last_modified));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            entry.change_frequency.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
        xml.push_str("  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Crawler rules, sitemap location and host.
pub fn render_robots_txt(origin: &str) -> String {
    let origin = origin.trim_end_matches('/');
    format!(
        "User-agent: *\n\
         Allow: /\n\
         Disallow: /api/\n\
         Disallow: /admin/\n\
         Disallow: /*.json$\n\
         Disallow: /private/\n\
         \n\
         User-agent: Googlebot\n\
         Allow: /\n\
         Disallow: /api/\n\
         Disallow: /admin/\n\
         \n\
         Sitemap: {origin}/sitemap.xml\n\
         Host: {origin}\n"
    )
}
