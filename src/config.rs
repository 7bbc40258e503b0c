use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

pub const UNIVERSALIS_API_BASE: &str = "https://universalis.app/api/v2";
pub const UNIVERSALIS_MARKET_URL: &str = "https://universalis.app/market/";
pub const XIVAPI_BASE: &str = "https://xivapi.com";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_TOPOLOGY_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

pub const NOT_AVAILABLE: &str = "Not available";

/// Reference documents the topology is built from, keyed by logical name.
pub fn topology_files() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("data_centers", "data-centers"),
        ("worlds", "worlds"),
    ])
}

/// Short region codes accepted from users, mapped to listing-source region names.
pub fn region_aliases() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("jp", "Japan"),
        ("eu", "Europe"),
        ("na", "North-America"),
        ("oc", "Oceania"),
    ])
}

pub fn default_cache_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("marketboard")
    } else {
        PathBuf::from(".marketboard-cache")
    }
}
