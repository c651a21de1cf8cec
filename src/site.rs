//! The assembled, validated site context.

use crate::config::SiteConfig;
use crate::locale::LocaleMapper;
use crate::messages::Translator;
use crate::routing::{Routing, RoutingError};
use crate::urls::UrlGenerator;

/// Config plus the URL machinery derived from it. Built once at startup;
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct Site {
    pub config: SiteConfig,
    pub urls: UrlGenerator,
}

impl Site {
    /// Check the routing invariants and assemble the URL generator.
    ///
    /// Fails on any routing misconfiguration, including two locales that
    /// share an hreflang tag.
    pub fn from_config(config: SiteConfig) -> Result<Self, RoutingError> {
        let routing = Routing::new(
            config.routing.locales.clone(),
            config.routing.default_locale.clone(),
            config.routing.locale_prefix,
        )?;
        let mapper = LocaleMapper::new(config.locales.clone(), config.locale_fallback.clone());
        routing.check_hreflang(&mapper)?;
        let urls = UrlGenerator::new(&config.site.origin, routing, mapper);
        Ok(Self { config, urls })
    }

    pub fn routing(&self) -> &Routing {
        self.urls.routing()
    }

    pub fn mapper(&self) -> &LocaleMapper {
        self.urls.mapper()
    }

    pub fn translator(&self, locale: &str) -> Translator {
        Translator::new(locale, self.routing().default_locale())
    }
}
