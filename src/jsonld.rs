//! schema.org structured data embedded as `application/ld+json`.
//!
//! Three documents per page: the site-wide `WebSite` (with a `SearchAction`)
//! and `Organization`, plus a `BreadcrumbList` for the current route. All
//! URLs come from the [`UrlGenerator`](crate::urls::UrlGenerator), so a
//! localized page links its own locale's breadcrumb trail.

use crate::catalog;
use crate::locale::LocaleKind;
use crate::routes::Route;
use crate::site::Site;
use serde_json::{Value, json};

const SCHEMA_CONTEXT: &str = "https://schema.org";

/// `WebSite` document for the locale's home page.
pub fn website(site: &Site, locale: &str) -> Value {
    let t = site.translator(locale);
    let home = site.urls.canonical_url(locale, "");
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "WebSite",
        "name": t.t("meta.siteTitle"),
        "alternateName": site.config.site.name,
        "url": home,
        "description": t.t("meta.siteDescription"),
        "inLanguage": site.mapper().map_locale(locale, LocaleKind::Hreflang),
        "publisher": organization_ref(site),
        "potentialAction": {
            "@type": "SearchAction",
            "target": {
                "@type": "EntryPoint",
                "urlTemplate": format!("{}/search?q={{search_term_string}}", site.urls.origin()),
            },
            "query-input": "required name=search_term_string",
        },
    })
}

fn organization_ref(site: &Site) -> Value {
    json!({
        "@type": "Organization",
        "name": site.config.site.name,
        "url": site.urls.origin(),
        "logo": {
            "@type": "ImageObject",
            "url": site.urls.asset_url(&site.config.site.og_image),
        },
    })
}

/// Standalone `Organization` document.
pub fn organization(site: &Site) -> Value {
    let mut org = organization_ref(site);
    if let Value::Object(map) = &mut org {
        map.insert("@context".into(), SCHEMA_CONTEXT.into());
        let handle = site.config.site.twitter_handle.trim_start_matches('@');
        if !handle.is_empty() {
            map.insert("sameAs".into(), json!([format!("https://twitter.com/{handle}")]));
        }
    }
    org
}

/// Trail from the locale home to `route`, as `(name, path)` pairs.
fn trail(site: &Site, locale: &str, route: &Route) -> Vec<(String, String)> {
    let t = site.translator(locale);
    let mut crumbs = vec![(t.t("nav.home"), Route::Home.path())];
    match route {
        Route::Home | Route::Unknown(_) => {}
        Route::SeriesIndex => crumbs.push((t.t("nav.series"), route.path())),
        Route::SeriesDetail(slug) => {
            crumbs.push((t.t("nav.series"), Route::SeriesIndex.path()));
            let name = catalog::find_series(slug)
                .map(|s| s.name.to_string())
                .unwrap_or_else(|_| t.t("series.notFound.title"));
            crumbs.push((name, route.path()));
        }
        Route::Wallpapers => crumbs.push((t.t("nav.wallpapers"), route.path())),
        Route::WallpaperCategory(category) => {
            crumbs.push((t.t("nav.wallpapers"), Route::Wallpapers.path()));
            crumbs.push((catalog::display_title(category), route.path()));
        }
        Route::About => crumbs.push((t.t("nav.about"), route.path())),
    }
    crumbs
}

/// `BreadcrumbList` for `route`, positions starting at 1.
pub fn breadcrumbs(site: &Site, locale: &str, route: &Route) -> Value {
    let items: Vec<Value> = trail(site, locale, route)
        .into_iter()
        .enumerate()
        .map(|(i, (name, path))| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": site.urls.canonical_url(locale, &path),
            })
        })
        .collect();
    json!({
        "@context": SCHEMA_CONTEXT,
        "@type": "BreadcrumbList",
        "itemListElement": items,
    })
}

/// All documents for one page, in embedding order.
pub fn page_documents(site: &Site, locale: &str, route: &Route) -> Vec<Value> {
    vec![
        website(site, locale),
        organization(site),
        breadcrumbs(site, locale, route),
    ]
}

/// Serialize for a `<script>` body. `</` is escaped so page data can never
/// close the script element early.
pub fn to_script_body(doc: &Value) -> String {
    doc.to_string().replace("</", "<\\/")
}
