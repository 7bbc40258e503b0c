//! Marketboard aggregation engine.
//!
//! Pure and synchronous: callers fetch listings and topology first, then
//! hand fully materialized data to [`aggregate`]. The pipeline is
//! filter → aggregate → page; [`assemble`](assemble::assemble) attaches
//! item metadata afterwards.

pub mod aggregate;
pub mod assemble;
pub mod extremum;
pub mod filter;
pub mod pager;

pub use aggregate::aggregate_scope;
pub use assemble::assemble;
pub use extremum::{cheapest, lowest_listing};
pub use filter::purchasable;
pub use pager::{paginate, server_page};

use crate::error::{MarketboardError, Result};
use crate::models::{Listing, Page, ScopeKind};
use crate::topology::TopologyProvider;

// ---------------------------------------------------------------------------
// PageLimits
// ---------------------------------------------------------------------------

/// Rendering limits of the target medium.
///
/// The defaults match chat embeds: 25 fields per message, 1024 characters
/// per field value, 4096 characters of description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLimits {
    pub max_entries_per_page: usize,
    pub max_entry_value_len: usize,
    pub max_summary_len: usize,
    /// Region entries are rendered inline once a result has more rows than this.
    pub inline_threshold: usize,
    /// Listings shown on a single-server page.
    pub server_listing_limit: usize,
    /// List datacenter roll-ups instead of servers on region results.
    pub rollup_datacenters: bool,
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            max_entries_per_page: 25,
            max_entry_value_len: 1024,
            max_summary_len: 4096,
            inline_threshold: 8,
            server_listing_limit: 20,
            rollup_datacenters: false,
        }
    }
}

impl PageLimits {
    pub fn validate(&self) -> Result<()> {
        let zero = [
            ("max_entries_per_page", self.max_entries_per_page),
            ("max_entry_value_len", self.max_entry_value_len),
            ("max_summary_len", self.max_summary_len),
            ("server_listing_limit", self.server_listing_limit),
        ]
        .into_iter()
        .find(|(_, v)| *v == 0);

        match zero {
            Some((name, _)) => Err(MarketboardError::InvalidArgument(format!(
                "{} must be greater than zero",
                name
            ))),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Aggregate `listings` over one scope and page the result.
///
/// Display-only listings are dropped first. Fails with
/// [`MarketboardError::UnknownScope`] for a datacenter or region missing
/// from `topology`, and with [`MarketboardError::NoData`] when no
/// purchasable listing is left. A resolved scope without servers yields
/// an empty page list.
pub fn aggregate<T>(
    kind: ScopeKind,
    scope: &str,
    listings: &[Listing],
    topology: &T,
    limits: &PageLimits,
) -> Result<Vec<Page>>
where
    T: TopologyProvider + ?Sized,
{
    limits.validate()?;

    let usable = purchasable(listings);
    let breakdown = aggregate_scope(kind, scope, &usable, topology)?;

    if usable.is_empty() {
        return Err(MarketboardError::NoData(format!(
            "no purchasable listings for {} '{}'",
            kind, scope
        )));
    }

    match kind {
        ScopeKind::Server => Ok(vec![server_page(&breakdown, &usable, limits)]),
        ScopeKind::Datacenter | ScopeKind::Region => Ok(paginate(&breakdown, limits)),
    }
}
