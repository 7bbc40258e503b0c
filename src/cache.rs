//! Local cache of the world/datacenter reference documents.
//!
//! The topology rarely changes, so the `data-centers` and `worlds` documents
//! are downloaded once and reused until they are older than the configured
//! maximum age. Listings themselves are never cached.

use crate::config;
use crate::error::{MarketboardError, Result};
use crate::topology::{DataCenterDto, Topology, WorldDto};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

/// Downloads and caches the topology documents.
pub struct TopologyCache {
    /// Directory where cached files are stored.
    pub cache_dir: PathBuf,
    /// If true, never download (use cached files only).
    pub offline: bool,
    api_base: String,
    timeout: Duration,
    max_age: Duration,
    client: Option<Client>,
}

impl TopologyCache {
    /// Create a new cache.
    ///
    /// If `cache_dir` is `None`, uses the platform-appropriate default cache directory.
    /// Creates the cache directory if it does not exist.
    pub fn new(
        cache_dir: Option<PathBuf>,
        offline: bool,
        api_base: &str,
        timeout: Duration,
        max_age: Duration,
    ) -> Result<Self> {
        let dir = cache_dir.unwrap_or_else(config::default_cache_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            cache_dir: dir,
            offline,
            api_base: api_base.trim_end_matches('/').to_string(),
            timeout,
            max_age,
            client: None,
        })
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<Client> {
        let client = match self.client.take() {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?,
        };
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Local path of a cached document.
    pub fn path_of(&self, name: &str) -> Result<PathBuf> {
        let files = config::topology_files();
        let endpoint = files.get(name).ok_or_else(|| {
            MarketboardError::NotFound(format!("Unknown topology document: {}", name))
        })?;
        Ok(self.cache_dir.join(format!("{}.json", endpoint)))
    }

    /// A file is stale when missing, unreadable, or older than the maximum age.
    pub fn is_stale(&self, path: &Path) -> bool {
        let modified = fs::metadata(path).and_then(|m| m.modified());
        match modified {
            Ok(at) => SystemTime::now()
                .duration_since(at)
                .map(|age| age > self.max_age)
                .unwrap_or(false),
            Err(_) => true,
        }
    }

    /// Download a single document.
    ///
    /// Writes to a temp file first and renames on success, so an interrupted
    /// download never leaves a partial file behind.
    fn download_file(&mut self, endpoint: &str, dest: &Path) -> Result<()> {
        let url = format!("{}/{}", self.api_base, endpoint);
        info!(%url, "downloading topology document");

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp_dest = dest.with_extension("json.tmp");

        let client = self.client()?;
        let result = (|| -> Result<()> {
            let resp = client.get(&url).send()?.error_for_status()?;
            let bytes = resp.bytes()?;
            fs::write(&tmp_dest, &bytes)?;
            fs::rename(&tmp_dest, dest)?;
            Ok(())
        })();

        if result.is_err() {
            let _ = fs::remove_file(&tmp_dest);
        }

        result
    }

    /// Ensure a document is cached locally, downloading if missing or stale.
    ///
    /// Offline, a stale copy is still served; a missing one is an error.
    pub fn ensure_file(&mut self, name: &str) -> Result<PathBuf> {
        let local_path = self.path_of(name)?;

        if self.is_stale(&local_path) {
            if self.offline {
                if local_path.exists() {
                    return Ok(local_path);
                }
                return Err(MarketboardError::NotFound(format!(
                    "Topology document {} not cached and offline mode is enabled",
                    local_path.display()
                )));
            }
            let endpoint = config::topology_files()
                .get(name)
                .copied()
                .unwrap_or(name);
            self.download_file(endpoint, &local_path)?;
        }

        Ok(local_path)
    }

    /// Load and parse a cached document.
    ///
    /// A corrupt file is deleted so the next call downloads a fresh copy.
    pub fn load_json<T: DeserializeOwned>(&mut self, name: &str) -> Result<T> {
        let path = self.ensure_file(name)?;
        let contents = fs::read_to_string(&path)?;

        serde_json::from_str(&contents).map_err(|e| {
            warn!(path = %path.display(), error = %e, "corrupt topology cache file, removing");
            let _ = fs::remove_file(&path);
            MarketboardError::Json(e)
        })
    }

    /// Build the topology from the cached documents.
    pub fn load_topology(&mut self) -> Result<Topology> {
        let data_centers: Vec<DataCenterDto> = self.load_json("data_centers")?;
        let worlds: Vec<WorldDto> = self.load_json("worlds")?;
        Topology::from_universalis(&data_centers, &worlds)
    }

    /// Remove all cached files and recreate the cache directory.
    pub fn clear(&self) -> Result<()> {
        if self.cache_dir.exists() {
            fs::remove_dir_all(&self.cache_dir)?;
            fs::create_dir_all(&self.cache_dir)?;
        }
        Ok(())
    }
}
