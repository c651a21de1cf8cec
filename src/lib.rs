//! # Labubu.city
//!
//! Static site generator for the Labubu collectible-toy fan hub. One
//! catalog, one set of pages, rendered once per supported locale with
//! consistent canonical URLs, hreflang clusters, social metadata, and
//! sitemaps.
//!
//! # Architecture: Everything Derives From the URL Core
//!
//! ```text
//! config.toml ─┐
//!              ├─ Routing + LocaleMapper ─ UrlGenerator ─┬─ seo / jsonld ─┐
//! defaults ────┘                                         ├─ sitemap ──────┼─ generate → dist/
//!                                                        └─ routes ───────┘
//! ```
//!
//! Pages never build URLs by hand. A page is identified by a
//! locale-independent path (`/series/zimomo`); the [`urls::UrlGenerator`]
//! turns `(locale, path)` into the canonical URL, the full alternate set,
//! and the site-relative href. Because every consumer (head metadata,
//! sitemap, navigation, language switcher) goes through the same
//! generator, they cannot disagree about what a page's URL is.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`routing`] | Supported locales, default locale, prefix policy; validated once |
//! | [`locale`] | Internal code → Open Graph / `html lang` / hreflang tags |
//! | [`urls`] | Canonical URLs, alternate links, localized hrefs, locale stripping |
//! | [`routes`] | Page routes, site inventory, request-path resolution |
//! | [`catalog`] | Static series and wallpaper data with typed lookup misses |
//! | [`messages`] | Bundled translation catalogs with fallback lookup |
//! | [`seo`] | Per-page metadata: title, description, Open Graph, Twitter, robots |
//! | [`jsonld`] | schema.org `WebSite`, `Organization`, `BreadcrumbList` |
//! | [`sitemap`] | Sitemap enumeration, `sitemap.xml` and `robots.txt` |
//! | [`site`] | Validated config plus URL machinery, built once at startup |
//! | [`generate`] | Renders every page with Maud and writes the output tree |
//! | [`config`] | `config.toml` loading, stock defaults, merging, validation |
//! | [`output`] | CLI output formatting for every command |
//!
//! # Design Decisions
//!
//! ## The Root Path Is Empty
//!
//! `""` and `"/"` both name the home page and normalize to `""`. The home
//! page canonical is `https://labubu.city`, never `https://labubu.city/`, so
//! a locale's root URL has exactly one spelling everywhere it appears.
//!
//! ## Soft Not-Found
//!
//! An unknown series or wallpaper category still renders: the localized
//! not-found body, the not-found title, and `noindex`. Rendering a single
//! path never fails on a catalog miss.
//!
//! ## Fail Fast on Routing
//!
//! An empty locale list, a default locale outside the list, or two locales
//! sharing an hreflang tag is a startup error. Nothing downstream re-checks.

pub mod catalog;
pub mod config;
pub mod generate;
pub mod jsonld;
pub mod locale;
pub mod messages;
pub mod output;
pub mod routes;
pub mod routing;
pub mod seo;
pub mod site;
pub mod sitemap;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;
