//! Shared test utilities for the labubu-city test suite.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = test_site();
//! assert_eq!(site.urls.canonical_url("zh", "/series"), "https://labubu.city/zh/series");
//!
//! let tmp = setup_fixtures();
//! let site = fixture_site(tmp.path());
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::{self, SiteConfig};
use crate::site::Site;

// =========================================================================
// Sites
// =========================================================================

/// Site built from the stock defaults: `en` (default) + `zh`, as-needed
/// prefixes, origin `https://labubu.city`.
pub fn test_site() -> Site {
    Site::from_config(SiteConfig::default()).unwrap()
}

/// Site loaded from the `config.toml` under `dir`.
pub fn fixture_site(dir: &Path) -> Site {
    let config = config::load_config(dir).unwrap();
    Site::from_config(config).unwrap()
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_config_loads() {
        let tmp = setup_fixtures();
        let site = fixture_site(tmp.path());
        assert_eq!(site.routing().locales(), &["en", "zh"]);
        assert_eq!(site.config.site.name, "Labubu.city");
        assert!(tmp.path().join("public/manifest.json").is_file());
        // `fr` is mapped but not served.
        assert!(site.mapper().is_mapped("fr"));
        assert_eq!(site.routing().find("fr"), None);
    }
}
