//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the source directory next to the optional `public/` assets folder:
//!
//! ```text
//! content/
//! ├── config.toml      # Site config (optional, overrides stock defaults)
//! └── public/          # Copied verbatim to the output root (optional)
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! origin = "https://labubu.city"    # Overridden by SITE_URL / --origin
//! name = "Labubu.city"
//! twitter_handle = "@labubu"
//! og_image = "/og-image.jpg"
//! icon = "/favicon.ico"
//! apple_touch_icon = "/apple-touch-icon.png"
//! manifest = "/manifest.json"
//! theme_color = "#3b82f6"
//!
//! [routing]
//! locales = ["en", "zh"]            # Order drives hreflang and sitemap order
//! default_locale = "en"
//! locale_prefix = "as-needed"       # or "always"
//!
//! [locales.en]
//! open_graph = "en_US"
//! html_lang = "en"
//! hreflang = "en-US"
//! name = "English"
//!
//! [locale_fallback]                 # Tags for codes with no [locales.*] row
//! open_graph = "en_US"
//! html_lang = "en"
//! hreflang = "en-US"
//!
//! [build]
//! max_threads = 4                   # Omit for auto = CPU cores
//! ```
//!
//! Unknown keys are rejected to catch typos early. Routing invariants
//! (default locale membership, unique hreflang tags) are checked when the
//! [`Site`](crate::site::Site) is assembled, before anything is rendered.

use crate::locale::{LocaleTags, default_fallback_tags, default_locale_table};
use crate::routing::LocalePrefix;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Origin used when neither the config file nor the environment sets one.
pub const DEFAULT_ORIGIN: &str = "https://labubu.city";

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Identity of the published site.
    pub site: SiteSection,
    /// Supported locales and the prefix policy.
    pub routing: RoutingConfig,
    /// Per-locale external tags, keyed by internal code.
    pub locales: BTreeMap<String, LocaleTags>,
    /// Tags for locale codes missing from `locales`.
    pub locale_fallback: LocaleTags,
    /// Rendering settings.
    pub build: BuildConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteSection::default(),
            routing: RoutingConfig::default(),
            locales: default_locale_table(),
            locale_fallback: default_fallback_tags(),
            build: BuildConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values that don't depend on each other.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_origin(&self.site.origin)?;
        if self.site.name.trim().is_empty() {
            return Err(ConfigError::Validation("site.name must not be empty".into()));
        }
        for (code, tags) in &self.locales {
            if let Some(field) = tags.first_empty() {
                return Err(ConfigError::Validation(format!(
                    "locales.{code}.{field} must not be empty"
                )));
            }
        }
        if let Some(field) = self.locale_fallback.first_empty() {
            return Err(ConfigError::Validation(format!(
                "locale_fallback.{field} must not be empty"
            )));
        }
        if self.build.max_threads == Some(0) {
            return Err(ConfigError::Validation(
                "build.max_threads must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Replace the configured origin (from `SITE_URL` or `--origin`) and
    /// re-validate it.
    pub fn override_origin(&mut self, origin: &str) -> Result<(), ConfigError> {
        validate_origin(origin)?;
        self.site.origin = origin.trim_end_matches('/').to_string();
        Ok(())
    }
}

fn validate_origin(origin: &str) -> Result<(), ConfigError> {
    let rest = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"));
    match rest {
        Some(host) if !host.trim_end_matches('/').is_empty() && !host.contains(char::is_whitespace) => {
            if host.trim_end_matches('/').contains('/') {
                Err(ConfigError::Validation(format!(
                    "site.origin must not contain a path: {origin}"
                )))
            } else {
                Ok(())
            }
        }
        _ => Err(ConfigError::Validation(format!(
            "site.origin must be an http(s) URL: {origin:?}"
        ))),
    }
}

/// Identity of the published site.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Scheme + host every canonical URL starts with.
    pub origin: String,
    /// `og:site_name` and the JSON-LD publisher name.
    pub name: String,
    /// `twitter:site` / `twitter:creator`.
    pub twitter_handle: String,
    /// Default social-card image (site-rooted or absolute).
    pub og_image: String,
    /// `<link rel="icon">` target.
    pub icon: String,
    /// `<link rel="apple-touch-icon">` target.
    pub apple_touch_icon: String,
    /// Web app manifest, linked from every page.
    pub manifest: String,
    /// `<meta name="theme-color">`.
    pub theme_color: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            name: "Labubu.city".to_string(),
            twitter_handle: "@labubu".to_string(),
            og_image: "/og-image.jpg".to_string(),
            icon: "/favicon.ico".to_string(),
            apple_touch_icon: "/apple-touch-icon.png".to_string(),
            manifest: "/manifest.json".to_string(),
            theme_color: "#3b82f6".to_string(),
        }
    }
}

/// Raw routing table, checked by [`Routing::new`](crate::routing::Routing::new).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    pub locales: Vec<String>,
    pub default_locale: String,
    pub locale_prefix: LocalePrefix,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string(), "zh".to_string()],
            default_locale: "en".to_string(),
            locale_prefix: LocalePrefix::AsNeeded,
        }
    }
}

/// Rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Maximum number of parallel page renderers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_threads: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &BuildConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_threads.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, so a
///   `routing.locales` array in the overlay replaces the stock list.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, layered over the
/// stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(dir)?;
    tracing::debug!(dir = %dir.display(), found = overlay.is_some(), "loading config");
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# labubu-city Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Scheme + host of the published site. The SITE_URL environment variable
# and the --origin flag take precedence over this value.
origin = "https://labubu.city"

# Used for og:site_name and the JSON-LD publisher.
name = "Labubu.city"

# twitter:site and twitter:creator.
twitter_handle = "@labubu"

# Default social-card image, site-rooted or absolute.
og_image = "/og-image.jpg"

# Head links shared by every page. Paths are site-rooted; put the files
# in public/ so the build copies them.
icon = "/favicon.ico"
apple_touch_icon = "/apple-touch-icon.png"
manifest = "/manifest.json"
theme_color = "#3b82f6"

# ---------------------------------------------------------------------------
# Routing
# ---------------------------------------------------------------------------
[routing]
# Supported locales. Order drives hreflang links and sitemap order.
locales = ["en", "zh"]

# Must be one of the locales above.
default_locale = "en"

# "as-needed": only non-default locales get a /{locale} URL prefix.
# "always":    every locale, including the default, is prefixed.
locale_prefix = "as-needed"

# ---------------------------------------------------------------------------
# Locale tags for metadata standards
# ---------------------------------------------------------------------------
# Two locales must never share an hreflang tag.
[locales.en]
open_graph = "en_US"
html_lang = "en"
hreflang = "en-US"
name = "English"

[locales.zh]
open_graph = "zh_CN"
html_lang = "zh-CN"
hreflang = "zh-CN"
name = "中文"

# Used for any locale code without its own [locales.*] table.
[locale_fallback]
open_graph = "en_US"
html_lang = "en"
hreflang = "en-US"

# ---------------------------------------------------------------------------
# Build
# ---------------------------------------------------------------------------
[build]
# Maximum parallel page renderers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_threads = 4
"##
}
