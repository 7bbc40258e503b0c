//! Marketboard listing aggregation for Final Fantasy XIV.
//!
//! Fetches current listings for an item from a [`ListingSource`]
//! (Universalis by default), finds the cheapest NQ and HQ offers per server,
//! datacenter and region, and splits the result into pages sized for chat
//! embeds.
//!
//! The aggregation itself lives in [`engine`] and is a pure function of
//! listings, topology and [`PageLimits`]; [`Marketboard`] wires it to the
//! network.
//!
//! # Quick start
//!
//! ```no_run
//! use marketboard::{ItemInfo, Marketboard};
//!
//! let mb = Marketboard::builder().build().unwrap();
//! let item = ItemInfo { id: 5057, name: "Iron Ingot".into(), icon: String::new() };
//!
//! for page in mb.lookup(&item, "Elemental").unwrap() {
//!     println!("{} ({}/{})\n{}", page.title, page.page_number, page.page_count, page.summary);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod source;
pub mod topology;

#[cfg(feature = "async")]
pub use async_client::AsyncMarketboard;
pub use cache::TopologyCache;
pub use engine::{aggregate, PageLimits};
pub use error::{MarketboardError, Result};
pub use models::{ItemInfo, ItemPage, Listing, MarketData, Page, PageEntry, ScopeBreakdown, ScopeKind};
pub use source::{ListingSource, UniversalisSource};
pub use topology::{Topology, TopologyProvider};

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

// ---------------------------------------------------------------------------
// MarketboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`Marketboard`].
///
/// Use [`Marketboard::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](MarketboardBuilder::build).
pub struct MarketboardBuilder {
    api_base: String,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Duration,
    topology_max_age: Duration,
    limits: PageLimits,
    topology: Option<Topology>,
    source: Option<Box<dyn ListingSource + Send>>,
}

impl Default for MarketboardBuilder {
    fn default() -> Self {
        Self {
            api_base: config::UNIVERSALIS_API_BASE.to_string(),
            cache_dir: None,
            offline: false,
            timeout: config::DEFAULT_TIMEOUT,
            topology_max_age: config::DEFAULT_TOPOLOGY_MAX_AGE,
            limits: PageLimits::default(),
            topology: None,
            source: None,
        }
    }
}

impl MarketboardBuilder {
    /// Base URL of the Universalis API. Defaults to the public instance.
    pub fn api_base(mut self, url: &str) -> Self {
        self.api_base = url.to_string();
        self
    }

    /// Set a custom directory for the cached topology documents.
    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Never download topology documents; use cached copies only.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Age after which cached topology documents are downloaded again.
    pub fn topology_max_age(mut self, max_age: Duration) -> Self {
        self.topology_max_age = max_age;
        self
    }

    /// Rendering limits applied to every result.
    pub fn limits(mut self, limits: PageLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Use a fixed topology instead of the cached Universalis documents.
    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = Some(topology);
        self
    }

    /// Use a custom listing source instead of Universalis.
    pub fn source<S: ListingSource + Send + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Build the client.
    ///
    /// No network traffic happens here; the topology is loaded on first use.
    pub fn build(self) -> Result<Marketboard> {
        self.limits.validate()?;

        let source: Box<dyn ListingSource + Send> = match self.source {
            Some(source) => source,
            None => Box::new(UniversalisSource::new(&self.api_base, self.timeout)?),
        };

        let cache = match self.topology {
            Some(_) => None,
            None => Some(RefCell::new(TopologyCache::new(
                self.cache_dir,
                self.offline,
                &self.api_base,
                self.timeout,
                self.topology_max_age,
            )?)),
        };

        Ok(Marketboard {
            source,
            cache,
            topology: RefCell::new(self.topology),
            limits: self.limits,
        })
    }
}

// ---------------------------------------------------------------------------
// Marketboard
// ---------------------------------------------------------------------------

/// Entry point: resolves a scope, fetches listings and returns assembled pages.
///
/// Created via [`Marketboard::builder()`].
pub struct Marketboard {
    source: Box<dyn ListingSource + Send>,
    cache: Option<RefCell<TopologyCache>>,
    topology: RefCell<Option<Topology>>,
    limits: PageLimits,
}

impl Marketboard {
    /// Create a new builder.
    pub fn builder() -> MarketboardBuilder {
        MarketboardBuilder::default()
    }

    pub fn limits(&self) -> &PageLimits {
        &self.limits
    }

    fn ensure_topology(&self) -> Result<()> {
        if self.topology.borrow().is_some() {
            return Ok(());
        }
        let cache = self.cache.as_ref().ok_or_else(|| {
            MarketboardError::NotFound("No topology configured".to_string())
        })?;
        let loaded = cache.borrow_mut().load_topology()?;
        *self.topology.borrow_mut() = Some(loaded);
        Ok(())
    }

    /// A copy of the current topology, loading it if necessary.
    pub fn topology(&self) -> Result<Topology> {
        self.ensure_topology()?;
        self.topology
            .borrow()
            .clone()
            .ok_or_else(|| MarketboardError::NotFound("No topology configured".to_string()))
    }

    /// Resolve a user-supplied name to a scope kind and its canonical name.
    pub fn classify(&self, scope: &str) -> Result<(ScopeKind, String)> {
        self.ensure_topology()?;
        let guard = self.topology.borrow();
        guard
            .as_ref()
            .and_then(|t| t.classify(scope))
            .ok_or_else(|| {
                MarketboardError::UnknownScope(format!(
                    "'{}' is not a known server, datacenter or region",
                    scope
                ))
            })
    }

    /// Look up the cheapest listings of `item` within `scope`.
    ///
    /// `scope` may be a server, datacenter, region or region alias. Returns
    /// at least one page, or an error: [`MarketboardError::ServiceUnavailable`]
    /// when the listing source is down, [`MarketboardError::NoData`] when it
    /// has nothing purchasable, [`MarketboardError::UnknownScope`] for names
    /// outside the topology.
    pub fn lookup(&self, item: &ItemInfo, scope: &str) -> Result<Vec<ItemPage>> {
        let (kind, name) = self.classify(scope)?;
        debug!(item = item.id, %kind, scope = %name, "marketboard lookup");

        let data = self.source.fetch(item.id, &name)?;

        let guard = self.topology.borrow();
        let topology = guard
            .as_ref()
            .ok_or_else(|| MarketboardError::NotFound("No topology configured".to_string()))?;
        let pages = aggregate(kind, &name, &data.listings, topology, &self.limits)?;

        if pages.is_empty() {
            return Err(MarketboardError::NoData(format!(
                "{} '{}' has no servers to show",
                kind, name
            )));
        }
        Ok(engine::assemble(item, data.last_upload(), pages))
    }

    /// Drop the cached topology documents and load them again.
    ///
    /// A no-op for a fixed topology supplied to the builder.
    pub fn refresh_topology(&self) -> Result<()> {
        let Some(cache) = self.cache.as_ref() else {
            return Ok(());
        };
        cache.borrow().clear()?;
        *self.topology.borrow_mut() = None;
        self.ensure_topology()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for Marketboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let regions = self
            .topology
            .borrow()
            .as_ref()
            .map(|t| t.regions().len())
            .unwrap_or(0);
        match &self.cache {
            Some(cache) => {
                let cache = cache.borrow();
                write!(
                    f,
                    "Marketboard(cache_dir={}, regions={}, offline={})",
                    cache.cache_dir.display(),
                    regions,
                    cache.offline
                )
            }
            None => write!(f, "Marketboard(fixed topology, regions={})", regions),
        }
    }
}
