//! Listing sources.
//!
//! [`UniversalisSource`] fetches current listings from the Universalis API.
//! Anything else implementing [`ListingSource`] can be plugged into
//! [`Marketboard`](crate::Marketboard) instead.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::config;
use crate::error::{MarketboardError, Result};
use crate::models::MarketData;

/// Supplies current listings for an item within a server, datacenter or region.
pub trait ListingSource {
    /// Fetch listings for `item_id` in `scope`.
    ///
    /// A server-side failure must surface as
    /// [`MarketboardError::ServiceUnavailable`], never as an empty result.
    fn fetch(&self, item_id: u32, scope: &str) -> Result<MarketData>;
}

// ---------------------------------------------------------------------------
// UniversalisSource
// ---------------------------------------------------------------------------

pub struct UniversalisSource {
    base_url: String,
    client: Client,
}

impl UniversalisSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Request URL for an item in a scope; the scope's first letter is upper-cased.
    pub fn listings_url(&self, item_id: u32, scope: &str) -> String {
        format!("{}/{}/{}", self.base_url, capitalize(scope), item_id)
    }
}

impl ListingSource for UniversalisSource {
    fn fetch(&self, item_id: u32, scope: &str) -> Result<MarketData> {
        let url = self.listings_url(item_id, scope);
        debug!(%url, "fetching marketboard listings");

        let resp = match self.client.get(&url).send() {
            Ok(resp) => resp,
            Err(e) => {
                warn!(%url, error = %e, "listing request failed");
                return Err(MarketboardError::ServiceUnavailable {
                    status: e.status().map(|s| s.as_u16()),
                });
            }
        };

        let status = resp.status().as_u16();
        if let Some(err) = status_error(status, item_id, scope) {
            warn!(%url, status, "listing source returned an error status");
            return Err(err);
        }

        let mut data: MarketData = resp.json().map_err(|e| {
            warn!(%url, error = %e, "could not decode listing response");
            MarketboardError::ServiceUnavailable { status: Some(status) }
        })?;
        data.fill_world_names(&capitalize(scope));
        Ok(data)
    }
}

/// Map a non-success HTTP status to the error it stands for.
///
/// 5xx means the service is down; any other failure status means there is
/// nothing to show for this item and scope.
pub fn status_error(status: u16, item_id: u32, scope: &str) -> Option<MarketboardError> {
    match status {
        200..=299 => None,
        500.. => Some(MarketboardError::ServiceUnavailable { status: Some(status) }),
        _ => Some(MarketboardError::NoData(format!(
            "item {} has no listings in '{}' (HTTP {})",
            item_id, scope, status
        ))),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
