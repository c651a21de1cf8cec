//! Page routes and request-path resolution.
//!
//! ```text
//! /                                  Home
//! /series                            SeriesIndex
//! /series/{slug}                     SeriesDetail
//! /labubu-wallpapers                 Wallpapers
//! /labubu-wallpapers/{category}      WallpaperCategory
//! /about                             About
//! ```
//!
//! Any of these may be preceded by a supported locale segment (`/zh/series`).
//! A leading segment naming a locale the mapper knows but the site does not
//! serve (`/fr/series`) is rejected here, so the metadata layer only ever
//! sees supported locales. Every other path belongs to the default locale.

use crate::catalog;
use crate::locale::LocaleMapper;
use crate::routing::Routing;
use crate::urls::normalize_path;
use thiserror::Error;

pub const SERIES_PATH: &str = "/series";
pub const WALLPAPERS_PATH: &str = "/labubu-wallpapers";
pub const ABOUT_PATH: &str = "/about";

/// First path segments owned by pages; never usable as locale codes.
pub const RESERVED_SEGMENTS: [&str; 3] = ["series", "labubu-wallpapers", "about"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("unsupported locale '{0}'")]
    UnsupportedLocale(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    SeriesIndex,
    SeriesDetail(String),
    Wallpapers,
    WallpaperCategory(String),
    About,
    /// A path no page is registered for.
    Unknown(String),
}

impl Route {
    /// Match a locale-independent path.
    pub fn from_path(path: &str) -> Route {
        let path = normalize_path(path);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["series"] => Route::SeriesIndex,
            ["series", slug] => Route::SeriesDetail(slug.to_string()),
            ["labubu-wallpapers"] => Route::Wallpapers,
            ["labubu-wallpapers", category] => Route::WallpaperCategory(category.to_string()),
            ["about"] => Route::About,
            _ => Route::Unknown(path),
        }
    }

    /// Normalized locale-independent path.
    pub fn path(&self) -> String {
        match self {
            Route::Home => String::new(),
            Route::SeriesIndex => SERIES_PATH.to_string(),
            Route::SeriesDetail(slug) => format!("{SERIES_PATH}/{slug}"),
            Route::Wallpapers => WALLPAPERS_PATH.to_string(),
            Route::WallpaperCategory(category) => format!("{WALLPAPERS_PATH}/{category}"),
            Route::About => ABOUT_PATH.to_string(),
            Route::Unknown(path) => normalize_path(path),
        }
    }

    /// Whether the route names a page that exists in the catalog.
    pub fn exists(&self) -> bool {
        match self {
            Route::SeriesDetail(slug) => catalog::find_series(slug).is_ok(),
            Route::WallpaperCategory(category) => catalog::find_wallpaper_category(category).is_ok(),
            Route::Unknown(_) => false,
            _ => true,
        }
    }
}

/// Every page the site publishes, in sitemap order: static pages, then
/// series details, then wallpaper categories.
pub fn site_routes() -> Vec<Route> {
    let mut routes = vec![
        Route::Home,
        Route::Wallpapers,
        Route::SeriesIndex,
        Route::About,
    ];
    routes.extend(
        catalog::all_series()
            .iter()
            .map(|s| Route::SeriesDetail(s.slug.to_string())),
    );
    routes.extend(
        catalog::wallpaper_categories()
            .into_iter()
            .map(|c| Route::WallpaperCategory(c.to_string())),
    );
    routes
}

/// Split a request path into its locale and route.
pub fn resolve<'a>(
    routing: &'a Routing,
    mapper: &LocaleMapper,
    request_path: &str,
) -> Result<(&'a str, Route), RouteError> {
    let path = normalize_path(request_path);
    let trimmed = path.trim_start_matches('/');
    let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));

    if let Some(locale) = routing.find(first) {
        return Ok((locale, Route::from_path(rest)));
    }
    if mapper.is_mapped(first) {
        return Err(RouteError::UnsupportedLocale(first.to_string()));
    }
    Ok((routing.default_locale(), Route::from_path(&path)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::{LocaleTags, default_fallback_tags, default_locale_table};

    #[test]
    fn from_path_matches_every_page() {
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path("/series"), Route::SeriesIndex);
        assert_eq!(
            Route::from_path("/series/zimomo/"),
            Route::SeriesDetail("zimomo".into())
        );
        assert_eq!(Route::from_path("/labubu-wallpapers"), Route::Wallpapers);
        assert_eq!(
            Route::from_path("/labubu-wallpapers/classic"),
            Route::WallpaperCategory("classic".into())
        );
        assert_eq!(Route::from_path("about"), Route::About);
        assert_eq!(
            Route::from_path("/series/a/b"),
            Route::Unknown("/series/a/b".into())
        );
    }

    #[test]
    fn path_inverts_from_path() {
        for route in site_routes() {
            assert_eq!(Route::from_path(&route.path()), route);
        }
    }

    #[test]
    fn site_routes_all_exist() {
        let routes = site_routes();
        assert_eq!(routes.len(), 4 + 3 + 3);
        assert!(routes.iter().all(Route::exists));
    }

    #[test]
    fn unknown_slugs_do_not_exist() {
        assert!(!Route::SeriesDetail("nonexistent-series".into()).exists());
        assert!(!Route::WallpaperCategory("space".into()).exists());
    }

    /// Default routing with a mapper that also knows `fr` and `pt-BR`.
    fn known_mapper() -> LocaleMapper {
        let mut table = default_locale_table();
        table.insert("fr".into(), LocaleTags::new("fr_FR", "fr", "fr-FR", "Français"));
        table.insert("pt-BR".into(), LocaleTags::new("pt_BR", "pt-BR", "pt-BR", "Português"));
        LocaleMapper::new(table, default_fallback_tags())
    }

    #[test]
    fn resolve_default_locale_paths() {
        let routing = Routing::default();
        let mapper = known_mapper();
        assert_eq!(resolve(&routing, &mapper, "/").unwrap(), ("en", Route::Home));
        assert_eq!(
            resolve(&routing, &mapper, "/series").unwrap(),
            ("en", Route::SeriesIndex)
        );
    }

    #[test]
    fn resolve_prefixed_paths() {
        let routing = Routing::default();
        let mapper = known_mapper();
        assert_eq!(resolve(&routing, &mapper, "/zh").unwrap(), ("zh", Route::Home));
        assert_eq!(
            resolve(&routing, &mapper, "/zh/series/zimomo").unwrap(),
            ("zh", Route::SeriesDetail("zimomo".into()))
        );
        // Explicit default prefix is accepted too.
        assert_eq!(
            resolve(&routing, &mapper, "/en/about").unwrap(),
            ("en", Route::About)
        );
    }

    #[test]
    fn resolve_rejects_known_but_unserved_locale() {
        let routing = Routing::default();
        let mapper = known_mapper();
        assert_eq!(
            resolve(&routing, &mapper, "/fr/series"),
            Err(RouteError::UnsupportedLocale("fr".into()))
        );
        assert_eq!(
            resolve(&routing, &mapper, "/pt-BR"),
            Err(RouteError::UnsupportedLocale("pt-BR".into()))
        );
    }

    #[test]
    fn resolve_short_unknown_segments_are_pages() {
        let routing = Routing::default();
        let mapper = known_mapper();
        for path in ["/faq", "/new", "/api", "/contact"] {
            assert_eq!(
                resolve(&routing, &mapper, path).unwrap(),
                ("en", Route::Unknown(path.into()))
            );
        }
    }

    #[test]
    fn resolve_unmapped_locale_like_segment_is_a_page() {
        let routing = Routing::default();
        assert_eq!(
            resolve(&routing, &LocaleMapper::default(), "/fr/series").unwrap(),
            ("en", Route::Unknown("/fr/series".into()))
        );
    }

    #[test]
    fn reserved_segments_match_page_paths() {
        for path in [SERIES_PATH, WALLPAPERS_PATH, ABOUT_PATH] {
            assert!(RESERVED_SEGMENTS.contains(&path.trim_start_matches('/')));
        }
    }
}
