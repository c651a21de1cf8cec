//! Routing configuration: supported locales, default locale, prefix policy.
//!
//! A [`Routing`] can only be obtained through [`Routing::new`], which checks
//! the invariants once. Everything downstream (URL generation, sitemap,
//! rendering) assumes a valid routing and never re-checks.
//!
//! ## Prefix Policy
//!
//! ```text
//! as-needed   en (default) → /series        zh → /zh/series
//! always      en (default) → /en/series     zh → /zh/series
//! ```

use crate::locale::{LocaleKind, LocaleMapper};
use crate::routes::RESERVED_SEGMENTS;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoutingError {
    #[error("routing.locales must not be empty")]
    NoLocales,
    #[error("default locale '{0}' is not one of routing.locales")]
    DefaultNotSupported(String),
    #[error("locale '{0}' is listed more than once")]
    DuplicateLocale(String),
    #[error("locale code '{0}' is not a valid URL path segment")]
    InvalidLocaleCode(String),
    #[error("locale code '{0}' collides with a page path")]
    ReservedLocaleCode(String),
    #[error("locales '{first}' and '{second}' both map to hreflang '{tag}'")]
    DuplicateHreflang {
        tag: String,
        first: String,
        second: String,
    },
}

/// When a locale code appears as the first URL path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocalePrefix {
    /// Omit the prefix for the default locale, include it for all others.
    #[default]
    AsNeeded,
    /// Prefix every locale, including the default.
    Always,
}

impl LocalePrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            LocalePrefix::AsNeeded => "as-needed",
            LocalePrefix::Always => "always",
        }
    }
}

/// Validated routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routing {
    locales: Vec<String>,
    default_locale: String,
    prefix: LocalePrefix,
}

impl Default for Routing {
    fn default() -> Self {
        Self {
            locales: vec!["en".to_string(), "zh".to_string()],
            default_locale: "en".to_string(),
            prefix: LocalePrefix::AsNeeded,
        }
    }
}

fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !code.starts_with('-')
        && !code.ends_with('-')
}

impl Routing {
    pub fn new(
        locales: Vec<String>,
        default_locale: String,
        prefix: LocalePrefix,
    ) -> Result<Self, RoutingError> {
        if locales.is_empty() {
            return Err(RoutingError::NoLocales);
        }
        let mut seen = HashSet::new();
        for code in &locales {
            if !is_valid_code(code) {
                return Err(RoutingError::InvalidLocaleCode(code.clone()));
            }
            if RESERVED_SEGMENTS.contains(&code.as_str()) {
                return Err(RoutingError::ReservedLocaleCode(code.clone()));
            }
            if !seen.insert(code.as_str()) {
                return Err(RoutingError::DuplicateLocale(code.clone()));
            }
        }
        if !seen.contains(default_locale.as_str()) {
            return Err(RoutingError::DefaultNotSupported(default_locale));
        }
        Ok(Self {
            locales,
            default_locale,
            prefix,
        })
    }

    /// Supported locale codes in configured order.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn prefix(&self) -> LocalePrefix {
        self.prefix
    }

    pub fn is_default(&self, code: &str) -> bool {
        self.default_locale == code
    }

    /// Look up a supported locale, returning the routing's own copy.
    pub fn find(&self, code: &str) -> Option<&str> {
        self.locales
            .iter()
            .find(|l| l.as_str() == code)
            .map(String::as_str)
    }

    /// Whether URLs for `code` carry a `/{code}` segment.
    pub fn needs_prefix(&self, code: &str) -> bool {
        match self.prefix {
            LocalePrefix::AsNeeded => !self.is_default(code),
            LocalePrefix::Always => true,
        }
    }

    /// Reject two supported locales sharing one hreflang tag.
    ///
    /// A supported locale missing from the mapper's table silently receives
    /// the fallback tag, so this is also where an incomplete table shows up.
    pub fn check_hreflang(&self, mapper: &LocaleMapper) -> Result<(), RoutingError> {
        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
        for code in &self.locales {
            if !mapper.is_mapped(code) {
                tracing::warn!(locale = %code, "locale has no mapping row, fallback tags apply");
            }
            let tag = mapper.map_locale(code, LocaleKind::Hreflang);
            if let Some(first) = owners.insert(tag, code) {
                return Err(RoutingError::DuplicateHreflang {
                    tag: tag.to_string(),
                    first: first.to_string(),
                    second: code.clone(),
                });
            }
        }
        Ok(())
    }
}
