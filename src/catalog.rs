//! Static catalog: figure series and wallpapers.
//!
//! The catalog is compiled into the binary. Nothing mutates it; lookups hand
//! out `&'static` references. Pages only rely on an entity's slug and on
//! whether it exists; the remaining fields are display data.
//!
//! A slug miss is a typed [`NotFound`], never a panic. Callers render a
//! localized not-found page instead of failing the build.

use serde::Serialize;
use thiserror::Error;

/// Entity lookup miss.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no {kind} with slug '{slug}'")]
pub struct NotFound {
    pub kind: &'static str,
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rarity {
    Regular,
    Rare,
    SuperRare,
    LimitedEdition,
    UltraRare,
}

impl Rarity {
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Regular => "Regular",
            Rarity::Rare => "Rare",
            Rarity::SuperRare => "Super Rare",
            Rarity::LimitedEdition => "Limited Edition",
            Rarity::UltraRare => "Ultra Rare",
        }
    }
}

/// A blind-box figure series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub id: &'static str,
    pub slug: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// ISO date, `YYYY-MM-DD`.
    pub release_date: &'static str,
    pub price: &'static str,
    pub rarity: Rarity,
    pub color_variants: &'static [&'static str],
    pub status: &'static str,
    pub image_url: &'static str,
}

/// A downloadable wallpaper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wallpaper {
    pub id: &'static str,
    pub title: &'static str,
    /// Category slug, also the URL segment under `/labubu-wallpapers`.
    pub category: &'static str,
    pub tags: &'static [&'static str],
    pub resolution: &'static str,
    pub filename: &'static str,
    pub download_url: &'static str,
    pub thumbnail_url: &'static str,
    pub description: &'static str,
}

static SERIES: &[Series] = &[
    Series {
        id: "1",
        slug: "angel-in-clouds",
        name: "Angel in Clouds",
        description: "Labubu with angel wings drifting through soft pastel clouds.",
        release_date: "2024-01-15",
        price: "$12.99",
        rarity: Rarity::LimitedEdition,
        color_variants: &["White", "Pink", "Blue", "Gold"],
        status: "Available",
        image_url: "/series/angel-in-clouds.jpg",
    },
    Series {
        id: "2",
        slug: "the-monsters",
        name: "The Monsters",
        description: "Labubu as a cast of small, mischievous monster variants.",
        release_date: "2024-02-20",
        price: "$11.99",
        rarity: Rarity::Regular,
        color_variants: &["Green", "Purple", "Orange", "Black"],
        status: "Available",
        image_url: "/series/the-monsters.jpg",
    },
    Series {
        id: "3",
        slug: "zimomo",
        name: "Zimomo Special",
        description: "A collaboration series starring Zimomo in the classic Labubu style.",
        release_date: "2024-03-10",
        price: "$14.99",
        rarity: Rarity::SuperRare,
        color_variants: &["Classic", "Special Edition"],
        status: "Limited",
        image_url: "/series/zimomo.jpg",
    },
];

static WALLPAPERS: &[Wallpaper] = &[
    Wallpaper {
        id: "1",
        title: "Labubu Angel in Clouds",
        category: "angel-in-clouds",
        tags: &["angel", "clouds", "cute", "fantasy"],
        resolution: "1920x1080",
        filename: "labubu-angel-clouds-01.jpg",
        download_url: "/wallpapers/labubu-angel-clouds-01.jpg",
        thumbnail_url: "/wallpapers/thumbs/labubu-angel-clouds-01-thumb.jpg",
        description: "Labubu angel floating in dreamy clouds",
    },
    Wallpaper {
        id: "2",
        title: "Labubu Monsters Series",
        category: "monsters",
        tags: &["monster", "cute", "colorful"],
        resolution: "2560x1440",
        filename: "labubu-monsters-01.jpg",
        download_url: "/wallpapers/labubu-monsters-01.jpg",
        thumbnail_url: "/wallpapers/thumbs/labubu-monsters-01-thumb.jpg",
        description: "A lineup of Labubu monster variants",
    },
    Wallpaper {
        id: "3",
        title: "Labubu Classic Collection",
        category: "classic",
        tags: &["classic", "original", "collection"],
        resolution: "3840x2160",
        filename: "labubu-classic-01.jpg",
        download_url: "/wallpapers/labubu-classic-01.jpg",
        thumbnail_url: "/wallpapers/thumbs/labubu-classic-01-thumb.jpg",
        description: "The classic Labubu design in 4K",
    },
];

/// Pseudo-category selecting every wallpaper.
pub const ALL_CATEGORY: &str = "all";

pub fn all_series() -> &'static [Series] {
    SERIES
}

pub fn wallpapers() -> &'static [Wallpaper] {
    WALLPAPERS
}

pub fn find_series(slug: &str) -> Result<&'static Series, NotFound> {
    SERIES.iter().find(|s| s.slug == slug).ok_or_else(|| NotFound {
        kind: "series",
        slug: slug.to_string(),
    })
}

/// Distinct wallpaper categories in first-seen order.
pub fn wallpaper_categories() -> Vec<&'static str> {
    let mut categories: Vec<&'static str> = Vec::new();
    for wallpaper in WALLPAPERS {
        if !categories.contains(&wallpaper.category) {
            categories.push(wallpaper.category);
        }
    }
    categories
}

pub fn find_wallpaper_category(slug: &str) -> Result<&'static str, NotFound> {
    WALLPAPERS
        .iter()
        .map(|w| w.category)
        .find(|c| *c == slug)
        .ok_or_else(|| NotFound {
            kind: "wallpaper category",
            slug: slug.to_string(),
        })
}

/// Wallpapers in `category`; [`ALL_CATEGORY`] selects everything.
pub fn wallpapers_by_category(category: &str) -> Vec<&'static Wallpaper> {
    WALLPAPERS
        .iter()
        .filter(|w| category == ALL_CATEGORY || w.category == category)
        .collect()
}

/// Display title for a slug: dashes become spaces, words are capitalized.
///
/// `"angel-in-clouds"` → `"Angel In Clouds"`
pub fn display_title(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
