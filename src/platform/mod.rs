//! Supported advertising platforms and their detection catalogs.
//!
//! Platforms are pure data: each one maps to a `PlatformCatalog` holding the
//! regexes and tokens the detectors run. The detection algorithms are the same
//! for every platform, so adding a platform means adding a catalog entry.
//! Unknown platform names resolve to an empty catalog, which degrades every
//! catalog-driven check to "not found" without raising an error.

mod catalog;

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

pub use catalog::PlatformCatalog;

/// A platform with a known detection catalog, named by its display name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, Serialize,
)]
pub enum Platform {
    Facebook,
    #[strum(serialize = "Google Ads")]
    #[serde(rename = "Google Ads")]
    GoogleAds,
    TikTok,
    Pinterest,
    LinkedIn,
    Snapchat,
    Reddit,
    Amazon,
    Xandr,
    GroundTruth,
    Nextdoor,
}

impl Platform {
    /// Looks a platform up by its exact display name (`"Google Ads"`, `"TikTok"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        name.trim().parse().ok()
    }

    pub fn catalog(self) -> &'static PlatformCatalog {
        catalog::for_platform(self)
    }
}

/// The catalog for a platform name, or the empty catalog when it is unknown.
pub fn catalog_for(name: &str) -> &'static PlatformCatalog {
    match Platform::from_name(name) {
        Some(platform) => platform.catalog(),
        None => {
            log::debug!("Unknown platform {name:?}; using empty catalog");
            catalog::empty()
        }
    }
}
