//! Per-page SEO metadata.
//!
//! Every page gets one [`PageMetadata`]: the structured form of everything
//! that ends up in `<head>`. Builders differ only in their text and social
//! image; canonical URL, hreflang alternates, `html lang` and the Open Graph
//! locale fields always come from the [`UrlGenerator`](crate::urls::UrlGenerator)
//! and [`LocaleMapper`](crate::locale::LocaleMapper), so no page can drift
//! from the prefix policy.
//!
//! Unknown slugs still produce metadata (soft not-found): the localized
//! not-found title and description, with `noindex` so the page stays out of
//! search results.

use crate::catalog::{self, Series};
use crate::locale::LocaleKind;
use crate::messages::Translator;
use crate::routes::Route;
use crate::site::Site;
use crate::urls::AlternateLinks;
use serde::Serialize;

const DEFAULT_IMAGE_WIDTH: u32 = 1200;
const DEFAULT_IMAGE_HEIGHT: u32 = 630;
const SERIES_IMAGE_SIZE: u32 = 1200;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: String,
    /// `<title>` text: `title` run through the site template.
    pub document_title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub canonical: String,
    pub alternates: AlternateLinks,
    pub html_lang: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub robots: Robots,
    pub authors: Vec<Author>,
    pub creator: String,
    pub publisher: String,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    pub url: String,
}

/// Site-wide metadata every page inherits from the locale layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteDefaults {
    pub default_title: String,
    /// `%s` is replaced by the page title.
    pub title_template: String,
    pub author: Author,
    pub creator: String,
    pub publisher: String,
    pub category: String,
}

impl SiteDefaults {
    /// Document title for a page title. The site title itself is not
    /// templated.
    pub fn document_title(&self, title: &str) -> String {
        if title.is_empty() || title == self.default_title {
            self.default_title.clone()
        } else {
            self.title_template.replace("%s", title)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OgType {
    Website,
    Article,
}

impl OgType {
    pub fn as_str(self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraph {
    #[serde(rename = "type")]
    pub og_type: OgType,
    pub locale: String,
    pub alternate_locales: Vec<String>,
    pub url: String,
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub images: Vec<OgImage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OgImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: &'static str,
    pub site: String,
    pub creator: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Robots {
    pub index: bool,
    pub follow: bool,
}

impl Robots {
    pub const INDEX: Robots = Robots {
        index: true,
        follow: true,
    };
    pub const NOINDEX: Robots = Robots {
        index: false,
        follow: true,
    };

    /// Value of `<meta name="robots">`.
    pub fn content(self) -> String {
        format!(
            "{}, {}",
            if self.index { "index" } else { "noindex" },
            if self.follow { "follow" } else { "nofollow" }
        )
    }

    /// Value of `<meta name="googlebot">`. Indexable pages allow full
    /// snippets and large image previews.
    pub fn googlebot(self) -> String {
        let base = self.content();
        if self.index {
            format!("{base}, max-video-preview:-1, max-image-preview:large, max-snippet:-1")
        } else {
            base
        }
    }
}

/// Page-specific inputs; everything else is derived.
struct PageText {
    title: String,
    description: String,
    keywords: Vec<String>,
    og_type: OgType,
    image: Option<OgImage>,
    tags: Vec<String>,
    robots: Robots,
}

impl PageText {
    fn website(title: String, description: String, keywords: Vec<String>) -> Self {
        Self {
            title,
            description,
            keywords,
            og_type: OgType::Website,
            image: None,
            tags: Vec::new(),
            robots: Robots::INDEX,
        }
    }

    fn not_found(title: String, description: String) -> Self {
        Self {
            robots: Robots::NOINDEX,
            ..Self::website(title, description, Vec::new())
        }
    }
}

fn assemble(site: &Site, locale: &str, path: &str, text: PageText) -> PageMetadata {
    let defaults = layout(site, locale);
    let urls = &site.urls;
    let mapper = site.mapper();
    let canonical = urls.canonical_url(locale, path);
    let image = text.image.unwrap_or_else(|| OgImage {
        url: urls.asset_url(&site.config.site.og_image),
        width: DEFAULT_IMAGE_WIDTH,
        height: DEFAULT_IMAGE_HEIGHT,
        alt: text.title.clone(),
    });
    let alternate_locales = site
        .routing()
        .locales()
        .iter()
        .filter(|l| l.as_str() != locale)
        .map(|l| mapper.map_locale(l, LocaleKind::OpenGraph).to_string())
        .collect();

    PageMetadata {
        canonical: canonical.clone(),
        alternates: urls.alternate_links(path),
        html_lang: mapper.map_locale(locale, LocaleKind::HtmlLang).to_string(),
        open_graph: OpenGraph {
            og_type: text.og_type,
            locale: mapper.map_locale(locale, LocaleKind::OpenGraph).to_string(),
            alternate_locales,
            url: canonical,
            title: text.title.clone(),
            description: text.description.clone(),
            site_name: site.config.site.name.clone(),
            images: vec![image.clone()],
            tags: text.tags,
        },
        twitter: TwitterCard {
            card: "summary_large_image",
            site: site.config.site.twitter_handle.clone(),
            creator: site.config.site.twitter_handle.clone(),
            title: text.title.clone(),
            description: text.description.clone(),
            images: vec![image.url],
        },
        robots: text.robots,
        document_title: defaults.document_title(&text.title),
        title: text.title,
        description: text.description,
        keywords: text.keywords,
        authors: vec![defaults.author],
        creator: defaults.creator,
        publisher: defaults.publisher,
        category: defaults.category,
    }
}

/// Metadata for any route.
pub fn page_metadata(site: &Site, locale: &str, route: &Route) -> PageMetadata {
    match route {
        Route::Home => home(site, locale),
        Route::SeriesIndex => series_index(site, locale),
        Route::SeriesDetail(slug) => series_detail(site, locale, slug),
        Route::Wallpapers => wallpapers(site, locale),
        Route::WallpaperCategory(category) => wallpaper_category(site, locale, category),
        Route::About => about(site, locale),
        Route::Unknown(path) => not_found(site, locale, path),
    }
}

/// Site-wide defaults for `locale`, merged into every page.
pub fn layout(site: &Site, locale: &str) -> SiteDefaults {
    let t = site.translator(locale);
    SiteDefaults {
        default_title: t.t("meta.siteTitle"),
        title_template: format!("%s | {}", site.config.site.name),
        author: Author {
            name: t.t("meta.authorName"),
            url: site.urls.origin().to_string(),
        },
        creator: t.t("meta.creator"),
        publisher: t.t("meta.publisher"),
        category: t.t("meta.category"),
    }
}

pub fn home(site: &Site, locale: &str) -> PageMetadata {
    let t = site.translator(locale);
    let text = PageText::website(
        t.t("home.title"),
        t.t("home.description"),
        t.t_list("meta.keywords"),
    );
    assemble(site, locale, &Route::Home.path(), text)
}

pub fn series_index(site: &Site, locale: &str) -> PageMetadata {
    let t = site.translator(locale);
    let text = PageText::website(
        t.t("series.title"),
        t.t("series.description"),
        t.t_list("series.keywords"),
    );
    assemble(site, locale, &Route::SeriesIndex.path(), text)
}

fn series_text(t: &Translator, series: &Series, site: &Site) -> PageText {
    let title = format!("{} | {}", series.name, t.t("series.detailMetaTitle"));
    let description = t.t_with(
        "series.detailMetaDescription",
        &[
            ("seriesName", series.name),
            ("releaseDate", series.release_date),
            ("price", series.price),
            ("rarity", series.rarity.label()),
            ("description", series.description),
        ],
    );
    let mut tags = vec![series.rarity.label().to_string()];
    tags.extend(series.color_variants.iter().map(|c| c.to_string()));
    PageText {
        keywords: vec![
            "Labubu".to_string(),
            series.name.to_string(),
            series.rarity.label().to_string(),
            "collectible toys".to_string(),
            "designer toys".to_string(),
        ],
        og_type: OgType::Article,
        image: Some(OgImage {
            url: site.urls.asset_url(series.image_url),
            width: SERIES_IMAGE_SIZE,
            height: SERIES_IMAGE_SIZE,
            alt: format!("{} - {}", series.name, t.t("series.imageAlt")),
        }),
        tags,
        robots: Robots::INDEX,
        title,
        description,
    }
}

/// Series detail; an unknown slug yields the soft not-found metadata.
pub fn series_detail(site: &Site, locale: &str, slug: &str) -> PageMetadata {
    let t = site.translator(locale);
    let path = Route::SeriesDetail(slug.to_string()).path();
    let text = match catalog::find_series(slug) {
        Ok(series) => series_text(&t, series, site),
        Err(_) => PageText::not_found(
            t.t("series.notFound.title"),
            t.t("series.notFound.description"),
        ),
    };
    assemble(site, locale, &path, text)
}

pub fn wallpapers(site: &Site, locale: &str) -> PageMetadata {
    let t = site.translator(locale);
    let text = PageText::website(
        t.t("wallpapers.title"),
        t.t("wallpapers.description"),
        t.t_list("wallpapers.keywords"),
    );
    assemble(site, locale, &Route::Wallpapers.path(), text)
}

pub fn wallpaper_category(site: &Site, locale: &str, category: &str) -> PageMetadata {
    let t = site.translator(locale);
    let path = Route::WallpaperCategory(category.to_string()).path();
    let text = match catalog::find_wallpaper_category(category) {
        Ok(category) => {
            let name = catalog::display_title(category);
            let mut text = PageText::website(
                t.t_with("wallpapers.categoryTitle", &[("category", &name)]),
                t.t_with("wallpapers.categoryDescription", &[("category", &name)]),
                t.t_list("wallpapers.keywords"),
            );
            if let Some(first) = catalog::wallpapers_by_category(category).first() {
                text.image = Some(OgImage {
                    url: site.urls.asset_url(first.thumbnail_url),
                    width: DEFAULT_IMAGE_WIDTH,
                    height: DEFAULT_IMAGE_HEIGHT,
                    alt: first.title.to_string(),
                });
            }
            text
        }
        Err(_) => PageText::not_found(
            t.t("wallpapers.notFound.title"),
            t.t("wallpapers.notFound.description"),
        ),
    };
    assemble(site, locale, &path, text)
}

pub fn about(site: &Site, locale: &str) -> PageMetadata {
    let t = site.translator(locale);
    let text = PageText::website(t.t("about.title"), t.t("about.description"), Vec::new());
    assemble(site, locale, &Route::About.path(), text)
}

/// Metadata for a path with no page behind it.
pub fn not_found(site: &Site, locale: &str, path: &str) -> PageMetadata {
    let t = site.translator(locale);
    let text = PageText::not_found(t.t("notFound.title"), t.t("notFound.description"));
    assemble(site, locale, path, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::test_site;

    #[test]
    fn series_index_canonical_and_alternates() {
        let site = test_site();
        let meta = series_index(&site, "zh");
        assert_eq!(meta.canonical, "https://labubu.city/zh/series");
        assert_eq!(meta.alternates.len(), 3);
        assert_eq!(meta.alternates.get("en-US"), Some("https://labubu.city/series"));
        assert_eq!(meta.alternates.x_default(), Some("https://labubu.city/series"));
        assert_eq!(meta.open_graph.url, meta.canonical);
    }

    #[test]
    fn locale_fields_use_mapper() {
        let site = test_site();
        let meta = home(&site, "zh");
        assert_eq!(meta.html_lang, "zh-CN");
        assert_eq!(meta.open_graph.locale, "zh_CN");
        assert_eq!(meta.open_graph.alternate_locales, vec!["en_US"]);

        let meta = home(&site, "en");
        assert_eq!(meta.html_lang, "en");
        assert_eq!(meta.open_graph.alternate_locales, vec!["zh_CN"]);
    }

    #[test]
    fn home_canonical_has_no_trailing_slash() {
        let site = test_site();
        assert_eq!(home(&site, "en").canonical, "https://labubu.city");
        assert_eq!(home(&site, "zh").canonical, "https://labubu.city/zh");
    }

    #[test]
    fn series_detail_is_article_with_tags() {
        let site = test_site();
        let meta = series_detail(&site, "en", "angel-in-clouds");
        assert_eq!(meta.title, "Angel in Clouds | Labubu Series Guide");
        assert!(meta.description.contains("Limited Edition"));
        assert!(meta.description.contains("2024-01-15"));
        assert_eq!(meta.open_graph.og_type, OgType::Article);
        assert_eq!(meta.open_graph.tags[0], "Limited Edition");
        assert!(meta.open_graph.tags.contains(&"Gold".to_string()));
        assert_eq!(
            meta.open_graph.images[0].url,
            "https://labubu.city/series/angel-in-clouds.jpg"
        );
        assert_eq!(meta.twitter.images, vec!["https://labubu.city/series/angel-in-clouds.jpg"]);
        assert_eq!(meta.robots, Robots::INDEX);
    }

    #[test]
    fn unknown_series_soft_not_found() {
        let site = test_site();
        let meta = series_detail(&site, "en", "nonexistent-series");
        assert_eq!(meta.title, "Series Not Found");
        assert_eq!(meta.robots, Robots::NOINDEX);
        assert_eq!(meta.canonical, "https://labubu.city/series/nonexistent-series");

        let meta = series_detail(&site, "zh", "nonexistent-series");
        assert_eq!(meta.title, "未找到该系列");
    }

    #[test]
    fn wallpaper_category_title_is_localized() {
        let site = test_site();
        let meta = wallpaper_category(&site, "en", "angel-in-clouds");
        assert_eq!(meta.title, "Angel In Clouds Wallpapers");
        assert_eq!(
            meta.canonical,
            "https://labubu.city/labubu-wallpapers/angel-in-clouds"
        );
        let meta = wallpaper_category(&site, "en", "space");
        assert_eq!(meta.robots, Robots::NOINDEX);
    }

    #[test]
    fn default_social_image_is_absolute() {
        let site = test_site();
        let meta = about(&site, "en");
        assert_eq!(meta.open_graph.images[0].url, "https://labubu.city/og-image.jpg");
        assert_eq!(meta.open_graph.images[0].height, 630);
        assert_eq!(meta.twitter.site, "@labubu");
    }

    #[test]
    fn layout_uses_site_strings() {
        let site = test_site();
        let defaults = layout(&site, "zh");
        assert_eq!(defaults.default_title, "Labubu.city - Labubu 收藏中心");
        assert_eq!(defaults.title_template, "%s | Labubu.city");
        assert_eq!(defaults.author.name, "Labubu.city 团队");
        assert_eq!(defaults.author.url, "https://labubu.city");
        assert_eq!(defaults.category, "娱乐");
    }

    #[test]
    fn pages_inherit_layout_defaults() {
        let site = test_site();
        let meta = series_index(&site, "en");
        assert_eq!(meta.document_title, format!("{} | Labubu.city", meta.title));
        assert_eq!(meta.authors[0].name, "Labubu.city Team");
        assert_eq!(meta.publisher, "Labubu.city");
        assert_eq!(meta.category, "Entertainment");
        // og:title stays untemplated.
        assert_eq!(meta.open_graph.title, meta.title);
    }

    #[test]
    fn site_title_is_not_templated() {
        let defaults = layout(&test_site(), "en");
        assert_eq!(
            defaults.document_title("Labubu.city - Labubu Collection Hub"),
            "Labubu.city - Labubu Collection Hub"
        );
        assert_eq!(defaults.document_title(""), "Labubu.city - Labubu Collection Hub");
        assert_eq!(defaults.document_title("About"), "About | Labubu.city");
    }

    #[test]
    fn googlebot_directives_follow_indexing() {
        assert_eq!(
            Robots::INDEX.googlebot(),
            "index, follow, max-video-preview:-1, max-image-preview:large, max-snippet:-1"
        );
        assert_eq!(Robots::NOINDEX.googlebot(), "noindex, follow");
    }

    #[test]
    fn page_metadata_dispatches_unknown_to_not_found() {
        let site = test_site();
        let meta = page_metadata(&site, "en", &Route::Unknown("/contact".into()));
        assert_eq!(meta.title, "Page Not Found");
        assert_eq!(meta.robots.content(), "noindex, follow");
    }

    #[test]
    fn metadata_serializes_og_type_field() {
        let site = test_site();
        let json = serde_json::to_value(series_detail(&site, "en", "zimomo")).unwrap();
        assert_eq!(json["open_graph"]["type"], "article");
        assert_eq!(json["alternates"]["zh-CN"], "https://labubu.city/zh/series/zimomo");
    }
}
