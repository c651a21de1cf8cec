//! CLI output formatting for every command.
//!
//! Output is **URL-centric**: the primary display for a page is its
//! site-relative href or canonical URL, with the written file or the
//! alternate set shown as indented context. That makes every listing
//! readable as a URL inventory of the site.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! en
//! 001 / → index.html
//! 002 /labubu-wallpapers → labubu-wallpapers/index.html
//! zh
//! 001 /zh → zh/index.html
//!
//! Not found
//!     404.html
//!     zh/404.html
//!
//! Stylesheet /style.css?v=1a2b3c4d
//! Sitemap 20 entries
//! Public 3 files
//!
//! Generated 20 pages in 2 locales
//! ```
//!
//! ## Urls
//!
//! ```text
//! 001 https://labubu.city
//!     en-US → https://labubu.city
//!     zh-CN → https://labubu.city/zh
//!     x-default → https://labubu.city
//! ```
//!
//! ## Check
//!
//! ```text
//! Config
//!     content/config.toml
//! Origin https://labubu.city
//! Prefix as-needed
//! Locales
//!     en (default) English: og en_US, lang en, hreflang en-US
//!     zh 中文: og zh_CN, lang zh-CN, hreflang zh-CN
//!     ja 日本語: og ja_JP, lang ja, hreflang ja-JP [en messages]
//! Pages 10 paths × 2 locales = 20 URLs
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::BuildReport;
use crate::locale::LocaleKind;
use crate::messages;
use crate::site::Site;
use crate::sitemap::SitemapEntry;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Path relative to `root`, `/`-separated; unchanged when outside it.
fn relative_display(path: &Path, root: &Path) -> String {
    let Ok(rel) = path.strip_prefix(root) else {
        return path.display().to_string();
    };
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// build
// ============================================================================

pub fn format_build_output(report: &BuildReport, output_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    let mut locales: Vec<&str> = Vec::new();
    for page in &report.pages {
        if !locales.contains(&page.locale.as_str()) {
            locales.push(&page.locale);
        }
    }

    for locale in &locales {
        lines.push(locale.to_string());
        let pages = report.pages.iter().filter(|p| p.locale == *locale);
        for (i, page) in pages.enumerate() {
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(i + 1),
                page.href,
                relative_display(&page.file, output_dir)
            ));
        }
    }

    if !report.not_found_pages.is_empty() {
        lines.push(String::new());
        lines.push("Not found".to_string());
        for file in &report.not_found_pages {
            lines.push(format!("{}{}", indent(1), relative_display(file, output_dir)));
        }
    }

    lines.push(String::new());
    lines.push(format!("Stylesheet {}", report.stylesheet_href));
    lines.push(format!(
        "Sitemap {}",
        plural(report.sitemap_entries, "entry", "entries")
    ));
    if report.assets_copied > 0 {
        lines.push(format!(
            "Public {}",
            plural(report.assets_copied, "file", "files")
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} in {}",
        plural(report.pages.len(), "page", "pages"),
        plural(locales.len(), "locale", "locales")
    ));
    lines
}

pub fn print_build_output(report: &BuildReport, output_dir: &Path) {
    for line in format_build_output(report, output_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// urls
// ============================================================================

/// Every canonical URL with its alternate set.
pub fn format_url_inventory(entries: &[SitemapEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), entry.url));
        for link in &entry.alternates {
            lines.push(format!(
                "{}{} \u{2192} {}",
                indent(1),
                link.hreflang,
                link.href
            ));
        }
    }
    lines
}

pub fn print_url_inventory(entries: &[SitemapEntry]) {
    for line in format_url_inventory(entries) {
        println!("{}", line);
    }
}

// ============================================================================
// check
// ============================================================================

/// Resolved configuration summary. `config_file` is `None` when the stock
/// defaults are in effect.
pub fn format_check_output(site: &Site, config_file: Option<&Path>, path_count: usize) -> Vec<String> {
    let routing = site.routing();
    let mapper = site.mapper();
    let bundled = messages::bundled_locales();
    let mut lines = vec!["Config".to_string()];
    match config_file {
        Some(path) => lines.push(format!("{}{}", indent(1), path.display())),
        None => lines.push(format!("{}(stock defaults)", indent(1))),
    }
    lines.push(format!("Origin {}", site.urls.origin()));
    lines.push(format!("Prefix {}", routing.prefix().as_str()));
    lines.push("Locales".to_string());
    for locale in routing.locales() {
        let marker = if routing.is_default(locale) {
            " (default)"
        } else {
            ""
        };
        let fallback = if mapper.is_mapped(locale) {
            ""
        } else {
            " [fallback tags]"
        };
        let bundle_note = if bundled.contains(&locale.as_str()) {
            String::new()
        } else {
            format!(" [{} messages]", site.translator(locale).locale())
        };
        lines.push(format!(
            "{}{}{} {}: og {}, lang {}, hreflang {}{}{}",
            indent(1),
            locale,
            marker,
            mapper.display_name(locale),
            mapper.map_locale(locale, LocaleKind::OpenGraph),
            mapper.map_locale(locale, LocaleKind::HtmlLang),
            mapper.map_locale(locale, LocaleKind::Hreflang),
            fallback,
            bundle_note
        ));
    }
    let locale_count = routing.locales().len();
    lines.push(format!(
        "Pages {} \u{d7} {} = {}",
        plural(path_count, "path", "paths"),
        plural(locale_count, "locale", "locales"),
        plural(path_count * locale_count, "URL", "URLs")
    ));
    lines
}

pub fn print_check_output(site: &Site, config_file: Option<&Path>, path_count: usize) {
    for line in format_check_output(site, config_file, path_count) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::sitemap;
    use crate::test_helpers::test_site;
    use std::path::PathBuf;
    use time::macros::date;

    fn page(locale: &str, href: &str, file: &str) -> GeneratedPage {
        GeneratedPage {
            locale: locale.to_string(),
            href: href.to_string(),
            file: PathBuf::from(file),
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn relative_display_strips_root() {
        assert_eq!(
            relative_display(Path::new("/out/zh/index.html"), Path::new("/out")),
            "zh/index.html"
        );
        assert_eq!(
            relative_display(Path::new("/elsewhere/a.html"), Path::new("/out")),
            "/elsewhere/a.html"
        );
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "page", "pages"), "1 page");
        assert_eq!(plural(0, "page", "pages"), "0 pages");
    }

    // =========================================================================
    // build
    // =========================================================================

    #[test]
    fn build_output_groups_by_locale() {
        let report = BuildReport {
            pages: vec![
                page("en", "/", "/out/index.html"),
                page("en", "/series", "/out/series/index.html"),
                page("zh", "/zh", "/out/zh/index.html"),
            ],
            not_found_pages: vec![PathBuf::from("/out/404.html")],
            stylesheet_href: "/style.css?v=deadbeef".to_string(),
            sitemap_entries: 3,
            assets_copied: 1,
        };
        let lines = format_build_output(&report, Path::new("/out"));
        assert_eq!(lines[0], "en");
        assert_eq!(lines[1], "001 / \u{2192} index.html");
        assert_eq!(lines[2], "002 /series \u{2192} series/index.html");
        assert_eq!(lines[3], "zh");
        assert_eq!(lines[4], "001 /zh \u{2192} zh/index.html");
        assert!(lines.contains(&"    404.html".to_string()));
        assert!(lines.contains(&"Sitemap 3 entries".to_string()));
        assert!(lines.contains(&"Public 1 file".to_string()));
        assert_eq!(lines.last().unwrap(), "Generated 3 pages in 2 locales");
    }

    #[test]
    fn build_output_from_real_build() {
        let site = test_site();
        let tmp = tempfile::TempDir::new().unwrap();
        let report = crate::generate::build(&site, tmp.path(), None, date!(2025 - 06 - 01)).unwrap();
        let lines = format_build_output(&report, tmp.path());

        assert_eq!(lines[0], "en");
        assert_eq!(lines[1], "001 / \u{2192} index.html");
        assert_eq!(lines.iter().filter(|l| *l == "en" || *l == "zh").count(), 2);
        assert_eq!(
            lines[10],
            "010 /labubu-wallpapers/classic \u{2192} labubu-wallpapers/classic/index.html"
        );
        assert_eq!(lines[11], "zh");
        assert_eq!(lines.last().unwrap(), "Generated 20 pages in 2 locales");
    }

    #[test]
    fn build_output_regroups_interleaved_pages() {
        let report = BuildReport {
            pages: vec![
                page("en", "/", "/out/index.html"),
                page("zh", "/zh", "/out/zh/index.html"),
                page("en", "/series", "/out/series/index.html"),
                page("zh", "/zh/series", "/out/zh/series/index.html"),
            ],
            ..BuildReport::default()
        };
        let lines = format_build_output(&report, Path::new("/out"));
        assert_eq!(
            &lines[..6],
            [
                "en",
                "001 / \u{2192} index.html",
                "002 /series \u{2192} series/index.html",
                "zh",
                "001 /zh \u{2192} zh/index.html",
                "002 /zh/series \u{2192} zh/series/index.html",
            ]
        );
        assert_eq!(lines.last().unwrap(), "Generated 4 pages in 2 locales");
    }

    #[test]
    fn build_output_omits_public_when_nothing_copied() {
        let report = BuildReport::default();
        let lines = format_build_output(&report, Path::new("/out"));
        assert!(!lines.iter().any(|l| l.starts_with("Public")));
        assert_eq!(lines.last().unwrap(), "Generated 0 pages in 0 locales");
    }

    // =========================================================================
    // urls
    // =========================================================================

    #[test]
    fn url_inventory_lists_alternates() {
        let site = test_site();
        let entries = sitemap::enumerate_paths(&site.urls, &["/series"], date!(2025 - 06 - 01));
        let lines = format_url_inventory(&entries);
        assert_eq!(lines[0], "001 https://labubu.city/series");
        assert_eq!(lines[1], "    en-US \u{2192} https://labubu.city/series");
        assert_eq!(lines[3], "    x-default \u{2192} https://labubu.city/series");
        assert_eq!(lines[4], "002 https://labubu.city/zh/series");
        assert_eq!(lines.len(), 8);
    }

    // =========================================================================
    // check
    // =========================================================================

    #[test]
    fn check_output_summarizes_locales() {
        let site = test_site();
        let lines = format_check_output(&site, None, 10);
        assert_eq!(lines[1], "    (stock defaults)");
        assert_eq!(lines[2], "Origin https://labubu.city");
        assert_eq!(lines[3], "Prefix as-needed");
        assert_eq!(
            lines[5],
            "    en (default) English: og en_US, lang en, hreflang en-US"
        );
        assert_eq!(lines[6], "    zh 中文: og zh_CN, lang zh-CN, hreflang zh-CN");
        assert_eq!(
            lines.last().unwrap(),
            "Pages 10 paths \u{d7} 2 locales = 20 URLs"
        );
    }

    #[test]
    fn check_output_flags_locales_without_messages() {
        let mut config = crate::config::SiteConfig::default();
        config.routing.locales.push("ja".into());
        config.locales.insert(
            "ja".into(),
            crate::locale::LocaleTags::new("ja_JP", "ja", "ja-JP", "日本語"),
        );
        let site = Site::from_config(config).unwrap();
        let lines = format_check_output(&site, None, 10);
        assert_eq!(
            lines[7],
            "    ja 日本語: og ja_JP, lang ja, hreflang ja-JP [en messages]"
        );
        assert!(!lines[6].contains("messages"));
    }
}
