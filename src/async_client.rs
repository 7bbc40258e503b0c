//! Async wrapper around [`Marketboard`] for use in async runtimes (Tokio, etc.).
//!
//! Runs every operation on the blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the event loop free while the
//! blocking HTTP client waits on the listing source.
//!
//! # Example
//!
//! ```no_run
//! use marketboard::{AsyncMarketboard, ItemInfo};
//!
//! # async fn example() -> marketboard::Result<()> {
//! let mb = AsyncMarketboard::builder().build().await?;
//! let item = ItemInfo { id: 5057, name: "Iron Ingot".into(), icon: String::new() };
//!
//! let pages = mb.lookup(item, "jp").await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::{MarketboardError, Result};
use crate::models::{ItemInfo, ItemPage};
use crate::{Marketboard, PageLimits, Topology};

// ---------------------------------------------------------------------------
// AsyncMarketboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncMarketboard`].
#[derive(Default)]
pub struct AsyncMarketboardBuilder {
    api_base: Option<String>,
    cache_dir: Option<PathBuf>,
    offline: bool,
    timeout: Option<Duration>,
    limits: Option<PageLimits>,
    topology: Option<Topology>,
}

impl AsyncMarketboardBuilder {
    pub fn api_base(mut self, url: &str) -> Self {
        self.api_base = Some(url.to_string());
        self
    }

    pub fn cache_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.cache_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn limits(mut self, limits: PageLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn topology(mut self, topology: Topology) -> Self {
        self.topology = Some(topology);
        self
    }

    /// Build on the blocking thread pool; the blocking HTTP client must not
    /// be created on an async worker.
    pub async fn build(self) -> Result<AsyncMarketboard> {
        tokio::task::spawn_blocking(move || {
            let mut builder = Marketboard::builder().offline(self.offline);
            if let Some(url) = self.api_base {
                builder = builder.api_base(&url);
            }
            if let Some(dir) = self.cache_dir {
                builder = builder.cache_dir(dir);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(limits) = self.limits {
                builder = builder.limits(limits);
            }
            if let Some(topology) = self.topology {
                builder = builder.topology(topology);
            }
            Ok(AsyncMarketboard {
                inner: Arc::new(Mutex::new(builder.build()?)),
            })
        })
        .await
        .map_err(|e| MarketboardError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncMarketboard
// ---------------------------------------------------------------------------

/// Async wrapper around [`Marketboard`].
///
/// The inner client uses `RefCell` for its lazily loaded topology, so it is
/// kept behind a [`Mutex`] and only touched from blocking threads.
pub struct AsyncMarketboard {
    inner: Arc<Mutex<Marketboard>>,
}

impl AsyncMarketboard {
    pub fn builder() -> AsyncMarketboardBuilder {
        AsyncMarketboardBuilder::default()
    }

    /// Run a sync operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Marketboard) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let mb = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = mb
                .lock()
                .map_err(|_| MarketboardError::InvalidArgument("Marketboard lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| MarketboardError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Async [`Marketboard::lookup`].
    pub async fn lookup(&self, item: ItemInfo, scope: &str) -> Result<Vec<ItemPage>> {
        let scope = scope.to_string();
        self.run(move |mb| mb.lookup(&item, &scope)).await
    }

    /// Async [`Marketboard::refresh_topology`].
    pub async fn refresh_topology(&self) -> Result<()> {
        self.run(|mb| mb.refresh_topology()).await
    }
}
