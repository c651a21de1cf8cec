//! HTML site generation.
//!
//! Renders every `(locale, route)` pair of the site inventory to static HTML
//! and writes the crawler files next to it.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                     # Home, default locale
//! ├── 404.html                       # Soft not-found, default locale
//! ├── series/
//! │   ├── index.html
//! │   └── angel-in-clouds/index.html
//! ├── labubu-wallpapers/
//! │   ├── index.html
//! │   └── classic/index.html
//! ├── about/index.html
//! ├── zh/                            # Same tree for each prefixed locale
//! │   ├── index.html
//! │   ├── 404.html
//! │   └── ...
//! ├── style.css
//! ├── sitemap.xml
//! ├── robots.txt
//! └── ...                            # public/ copied verbatim
//! ```
//!
//! ## Head
//!
//! Every page head is driven by [`PageMetadata`]: title, description,
//! keywords, canonical link, one `hreflang` alternate per locale plus
//! `x-default`, Open Graph and Twitter tags, robots directive, and the
//! JSON-LD documents from [`jsonld`].
//!
//! ## Rendering
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Pages are rendered in parallel on the rayon pool and written sequentially.

use crate::catalog::{self, Series, Wallpaper};
use crate::jsonld;
use crate::locale::LocaleKind;
use crate::messages::Translator;
use crate::routes::{self, Route};
use crate::seo::{self, PageMetadata};
use crate::site::Site;
use crate::sitemap;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use rayon::prelude::*;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::Date;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to walk public directory: {0}")]
    Walk(#[from] walkdir::Error),
}

const CSS: &str = include_str!("../static/style.css");

/// Path of the soft not-found page under each locale root.
const NOT_FOUND_PATH: &str = "/404";

/// One written HTML file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub locale: String,
    /// Site-relative href (`/zh/series`).
    pub href: String,
    pub file: PathBuf,
}

/// Everything a build wrote.
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    pub pages: Vec<GeneratedPage>,
    pub not_found_pages: Vec<PathBuf>,
    pub stylesheet_href: String,
    pub sitemap_entries: usize,
    pub assets_copied: usize,
}

/// Short content fingerprint: first 8 hex chars of the SHA-256.
pub fn fingerprint(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    let mut hex = format!("{:x}", digest);
    hex.truncate(8);
    hex
}

/// Cache-busted stylesheet URL.
pub fn stylesheet_href() -> String {
    format!("/style.css?v={}", fingerprint(CSS.as_bytes()))
}

/// File an href is written to: `/zh/series` → `<out>/zh/series/index.html`.
pub fn output_path_for(output_dir: &Path, href: &str) -> PathBuf {
    let rel = href.trim_matches('/');
    let dir = if rel.is_empty() {
        output_dir.to_path_buf()
    } else {
        output_dir.join(rel)
    };
    dir.join("index.html")
}

/// Write the whole site into `output_dir`.
pub fn build(
    site: &Site,
    output_dir: &Path,
    public_dir: Option<&Path>,
    last_modified: Date,
) -> Result<BuildReport, GenerateError> {
    fs::create_dir_all(output_dir)?;
    let css_href = stylesheet_href();

    let inventory = routes::site_routes();
    let jobs: Vec<(&str, Route)> = site
        .routing()
        .locales()
        .iter()
        .flat_map(|locale| inventory.iter().map(move |route| (locale.as_str(), route.clone())))
        .collect();
    tracing::info!(pages = jobs.len(), "rendering pages");

    let rendered: Vec<(GeneratedPage, String)> = jobs
        .par_iter()
        .map(|(locale, route)| {
            let href = site.urls.localized_path(locale, &route.path());
            let html = render_page(site, locale, route, &css_href).into_string();
            let page = GeneratedPage {
                locale: locale.to_string(),
                file: output_path_for(output_dir, &href),
                href,
            };
            (page, html)
        })
        .collect();

    let mut report = BuildReport {
        stylesheet_href: css_href.clone(),
        ..BuildReport::default()
    };
    for (page, html) in rendered {
        write_file(&page.file, &html)?;
        report.pages.push(page);
    }

    for locale in site.routing().locales() {
        let root = site.urls.localized_path(locale, "");
        let file = output_dir.join(root.trim_matches('/')).join("404.html");
        let route = Route::Unknown(NOT_FOUND_PATH.to_string());
        write_file(&file, &render_page(site, locale, &route, &css_href).into_string())?;
        report.not_found_pages.push(file);
    }

    write_file(&output_dir.join("style.css"), CSS)?;

    let entries = sitemap::enumerate(&site.urls, last_modified);
    report.sitemap_entries = entries.len();
    write_file(
        &output_dir.join("sitemap.xml"),
        &sitemap::render_sitemap_xml(&entries),
    )?;
    write_file(
        &output_dir.join("robots.txt"),
        &sitemap::render_robots_txt(site.urls.origin()),
    )?;

    if let Some(public) = public_dir.filter(|p| p.is_dir()) {
        tracing::info!(from = %public.display(), "copying public assets");
        report.assets_copied = copy_public(public, output_dir)?;
    }

    tracing::info!(output = %output_dir.display(), "site generated");
    Ok(report)
}

fn write_file(path: &Path, contents: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    tracing::debug!(file = %path.display(), "wrote");
    Ok(())
}

/// Copy every file under `src` into `dst`, keeping relative paths.
fn copy_public(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Render one page. Never fails: unknown slugs render the localized
/// not-found body.
pub fn render_route(site: &Site, locale: &str, route: &Route) -> Markup {
    render_page(site, locale, route, &stylesheet_href())
}

fn render_page(site: &Site, locale: &str, route: &Route, css_href: &str) -> Markup {
    let meta = seo::page_metadata(site, locale, route);
    let docs = jsonld::page_documents(site, locale, route);
    let t = site.translator(locale);
    let content = page_body(site, locale, route, &t);
    base_document(site, locale, route, &meta, &docs, css_href, content)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Tags for `<head>` derived from the page metadata.
fn head_tags(site: &Site, meta: &PageMetadata, docs: &[Value], css_href: &str) -> Markup {
    let og = &meta.open_graph;
    let twitter = &meta.twitter;
    let identity = &site.config.site;
    html! {
        meta charset="UTF-8";
        meta name="viewport" content="width=device-width, initial-scale=1, maximum-scale=5";
        title { (meta.document_title) }
        meta name="description" content=(meta.description);
        @if !meta.keywords.is_empty() {
            meta name="keywords" content=(meta.keywords.join(", "));
        }
        @for author in &meta.authors {
            meta name="author" content=(author.name);
            link rel="author" href=(author.url);
        }
        meta name="creator" content=(meta.creator);
        meta name="publisher" content=(meta.publisher);
        meta name="category" content=(meta.category);
        meta name="robots" content=(meta.robots.content());
        meta name="googlebot" content=(meta.robots.googlebot());
        meta name="theme-color" content=(identity.theme_color);
        link rel="icon" href=(identity.icon);
        link rel="apple-touch-icon" href=(identity.apple_touch_icon);
        link rel="manifest" href=(identity.manifest);
        link rel="canonical" href=(meta.canonical);
        @for link in &meta.alternates {
            link rel="alternate" hreflang=(link.hreflang) href=(link.href);
        }
        meta property="og:type" content=(og.og_type.as_str());
        meta property="og:locale" content=(og.locale);
        @for alternate in &og.alternate_locales {
            meta property="og:locale:alternate" content=(alternate);
        }
        meta property="og:url" content=(og.url);
        meta property="og:title" content=(og.title);
        meta property="og:description" content=(og.description);
        meta property="og:site_name" content=(og.site_name);
        @for image in &og.images {
            meta property="og:image" content=(image.url);
            meta property="og:image:width" content=(image.width);
            meta property="og:image:height" content=(image.height);
            meta property="og:image:alt" content=(image.alt);
        }
        @for tag in &og.tags {
            meta property="article:tag" content=(tag);
        }
        meta name="twitter:card" content=(twitter.card);
        meta name="twitter:site" content=(twitter.site);
        meta name="twitter:creator" content=(twitter.creator);
        meta name="twitter:title" content=(twitter.title);
        meta name="twitter:description" content=(twitter.description);
        @for image in &twitter.images {
            meta name="twitter:image" content=(image);
        }
        link rel="stylesheet" href=(css_href);
        @for doc in docs {
            script type="application/ld+json" { (PreEscaped(jsonld::to_script_body(doc))) }
        }
    }
}

/// Renders the base HTML document structure
fn base_document(
    site: &Site,
    locale: &str,
    route: &Route,
    meta: &PageMetadata,
    docs: &[Value],
    css_href: &str,
    content: Markup,
) -> Markup {
    let t = site.translator(locale);
    html! {
        (DOCTYPE)
        html lang=(meta.html_lang) {
            head {
                (head_tags(site, meta, docs, css_href))
            }
            body {
                (site_header(site, locale, route, &t))
                main { (content) }
                footer.site-footer {
                    p { (t.t("footer.rights")) }
                }
            }
        }
    }
}

fn site_header(site: &Site, locale: &str, route: &Route, t: &Translator) -> Markup {
    let link = |r: &Route| site.urls.localized_path(locale, &r.path());
    let sections = [
        (Route::Home, "nav.home"),
        (Route::SeriesIndex, "nav.series"),
        (Route::Wallpapers, "nav.wallpapers"),
        (Route::About, "nav.about"),
    ];
    html! {
        header.site-header {
            a.brand href=(link(&Route::Home)) { (site.config.site.name) }
            nav.site-nav {
                ul {
                    @for (section, key) in &sections {
                        li class=[is_in_section(route, section).then_some("current")] {
                            a href=(link(section)) { (t.t(key)) }
                        }
                    }
                }
            }
            (language_switcher(site, locale, route, t))
        }
    }
}

fn is_in_section(route: &Route, section: &Route) -> bool {
    match (route, section) {
        (Route::SeriesDetail(_), Route::SeriesIndex) => true,
        (Route::WallpaperCategory(_), Route::Wallpapers) => true,
        _ => route == section,
    }
}

/// Links to the current page in every locale.
pub fn language_switcher(site: &Site, locale: &str, route: &Route, t: &Translator) -> Markup {
    let path = route.path();
    let mapper = site.mapper();
    html! {
        nav.language-switcher aria-label=(t.t("nav.language")) {
            ul {
                @for other in site.routing().locales() {
                    @let is_current = other == locale;
                    li {
                        a href=(site.urls.localized_path(other, &path))
                            hreflang=(mapper.map_locale(other, LocaleKind::Hreflang))
                            lang=(mapper.map_locale(other, LocaleKind::HtmlLang))
                            aria-current=[is_current.then_some("page")] {
                            (mapper.display_name(other))
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Bodies
// ============================================================================

fn page_body(site: &Site, locale: &str, route: &Route, t: &Translator) -> Markup {
    match route {
        Route::Home => home_body(site, locale, t),
        Route::SeriesIndex => series_index_body(site, locale, t),
        Route::SeriesDetail(slug) => match catalog::find_series(slug) {
            Ok(series) => series_detail_body(site, locale, series, t),
            Err(err) => {
                tracing::debug!(%err, locale, "rendering series not-found page");
                not_found_body(
                    t.t("series.notFound.title"),
                    t.t("series.notFound.description"),
                    site.urls.localized_path(locale, &Route::SeriesIndex.path()),
                    t.t("series.backToSeries"),
                )
            }
        },
        Route::Wallpapers => wallpapers_body(site, locale, t),
        Route::WallpaperCategory(category) => match catalog::find_wallpaper_category(category) {
            Ok(category) => wallpaper_category_body(site, locale, category, t),
            Err(err) => {
                tracing::debug!(%err, locale, "rendering category not-found page");
                not_found_body(
                    t.t("wallpapers.notFound.title"),
                    t.t("wallpapers.notFound.description"),
                    site.urls.localized_path(locale, &Route::Wallpapers.path()),
                    t.t("wallpapers.heading"),
                )
            }
        },
        Route::About => about_body(t),
        Route::Unknown(_) => not_found_body(
            t.t("notFound.title"),
            t.t("notFound.description"),
            site.urls.localized_path(locale, ""),
            t.t("notFound.backHome"),
        ),
    }
}

fn series_card(site: &Site, locale: &str, series: &Series, t: &Translator) -> Markup {
    let href = site
        .urls
        .localized_path(locale, &Route::SeriesDetail(series.slug.to_string()).path());
    html! {
        article.series-card {
            img src=(series.image_url) alt=(series.name) loading="lazy";
            h3 { (series.name) }
            p.series-meta {
                span.rarity { (series.rarity.label()) }
                " · "
                span.price { (series.price) }
            }
            a href=(href) { (t.t("series.viewDetails")) }
        }
    }
}

fn wallpaper_card(wallpaper: &Wallpaper, t: &Translator) -> Markup {
    html! {
        figure.wallpaper-card {
            img src=(wallpaper.thumbnail_url) alt=(wallpaper.description) loading="lazy";
            figcaption {
                span.wallpaper-title { (wallpaper.title) }
                span.resolution { (t.t("wallpapers.resolution")) ": " (wallpaper.resolution) }
                a.download href=(wallpaper.download_url) download=(wallpaper.filename) {
                    (t.t("wallpapers.download"))
                }
            }
        }
    }
}

fn home_body(site: &Site, locale: &str, t: &Translator) -> Markup {
    html! {
        section.hero {
            h1 { (t.t("home.heroTitle")) }
            p { (t.t("home.heroSubtitle")) }
        }
        section.featured {
            h2 { (t.t("home.featuredSeries")) }
            div.series-grid {
                @for series in catalog::all_series() {
                    (series_card(site, locale, series, t))
                }
            }
        }
        p.cta {
            a href=(site.urls.localized_path(locale, &Route::Wallpapers.path())) {
                (t.t("home.browseWallpapers"))
            }
        }
    }
}

fn series_index_body(site: &Site, locale: &str, t: &Translator) -> Markup {
    html! {
        h1 { (t.t("series.heading")) }
        p.intro { (t.t("series.intro")) }
        div.series-grid {
            @for series in catalog::all_series() {
                (series_card(site, locale, series, t))
            }
        }
    }
}

fn series_detail_body(site: &Site, locale: &str, series: &Series, t: &Translator) -> Markup {
    html! {
        article.series-detail {
            h1 { (series.name) }
            img src=(series.image_url) alt={ (series.name) " - " (t.t("series.imageAlt")) };
            p { (series.description) }
            dl {
                dt { (t.t("series.releaseDate")) }
                dd { time datetime=(series.release_date) { (series.release_date) } }
                dt { (t.t("series.price")) }
                dd { (series.price) }
                dt { (t.t("series.rarity")) }
                dd { (series.rarity.label()) }
                dt { (t.t("series.colors")) }
                dd { (series.color_variants.join(", ")) }
                dt { (t.t("series.status")) }
                dd { (series.status) }
            }
            a.back href=(site.urls.localized_path(locale, &Route::SeriesIndex.path())) {
                (t.t("series.backToSeries"))
            }
        }
    }
}

fn wallpapers_body(site: &Site, locale: &str, t: &Translator) -> Markup {
    html! {
        h1 { (t.t("wallpapers.heading")) }
        p.intro { (t.t("wallpapers.intro")) }
        nav.categories {
            h2 { (t.t("wallpapers.categories")) }
            ul {
                @for category in catalog::wallpaper_categories() {
                    li {
                        a href=(site.urls.localized_path(locale, &Route::WallpaperCategory(category.to_string()).path())) {
                            (catalog::display_title(category))
                        }
                    }
                }
            }
        }
        div.wallpaper-grid {
            @for wallpaper in catalog::wallpapers_by_category(catalog::ALL_CATEGORY) {
                (wallpaper_card(wallpaper, t))
            }
        }
    }
}

fn wallpaper_category_body(site: &Site, locale: &str, category: &str, t: &Translator) -> Markup {
    let name = catalog::display_title(category);
    let wallpapers = catalog::wallpapers_by_category(category);
    html! {
        h1 { (t.t_with("wallpapers.categoryTitle", &[("category", &name)])) }
        p.intro { (t.t_with("wallpapers.categoryDescription", &[("category", &name)])) }
        div.wallpaper-grid {
            @for wallpaper in &wallpapers {
                (wallpaper_card(wallpaper, t))
            }
        }
        a.back href=(site.urls.localized_path(locale, &Route::Wallpapers.path())) {
            (t.t("wallpapers.heading"))
        }
    }
}

/// Renders the about page from localized markdown
fn about_body(t: &Translator) -> Markup {
    let body = t.t("about.body");
    let parser = Parser::new(&body);
    let mut body_html = String::new();
    md_html::push_html(&mut body_html, parser);

    html! {
        article.about-content {
            h1 { (t.t("about.title")) }
            p.subtitle { (t.t("about.subtitle")) }
            (PreEscaped(body_html))
        }
    }
}

fn not_found_body(title: String, description: String, back_href: String, back_label: String) -> Markup {
    html! {
        section.not-found {
            h1 { (title) }
            p { (description) }
            a href=(back_href) { (back_label) }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
