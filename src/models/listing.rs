use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

// ---------------------------------------------------------------------------
// Listing — One sell order on one server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Empty on world-scoped responses until filled from the envelope.
    #[serde(default)]
    pub world_name: String,
    pub price_per_unit: u64,
    pub quantity: u32,
    #[serde(rename = "hq", default)]
    pub is_high_quality: bool,
    #[serde(rename = "onMannequin", default)]
    pub is_display_only: bool,
}

impl Listing {
    /// A purchasable listing.
    pub fn new(world_name: &str, price_per_unit: u64, quantity: u32, is_high_quality: bool) -> Self {
        Self {
            world_name: world_name.to_string(),
            price_per_unit,
            quantity,
            is_high_quality,
            is_display_only: false,
        }
    }

    /// Mark the listing as a mannequin/display-only entry.
    pub fn display_only(mut self) -> Self {
        self.is_display_only = true;
        self
    }
}

// ---------------------------------------------------------------------------
// MarketData — Listing source response for one item in one scope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketData {
    #[serde(rename = "itemID", default)]
    pub item_id: u32,
    /// Only present on world-scoped responses.
    #[serde(default)]
    pub world_name: Option<String>,
    #[serde(default)]
    pub listings: Vec<Listing>,
    /// Epoch milliseconds.
    #[serde(default)]
    pub last_upload_time: i64,
}

impl MarketData {
    /// Give every listing without a world the response-level world (or `fallback`).
    pub fn fill_world_names(&mut self, fallback: &str) {
        let world = self.world_name.clone().unwrap_or_else(|| fallback.to_string());
        for listing in self.listings.iter_mut().filter(|l| l.world_name.is_empty()) {
            listing.world_name = world.clone();
        }
    }

    /// Last upload time as a UTC timestamp, `None` when absent or out of range.
    pub fn last_upload(&self) -> Option<OffsetDateTime> {
        if self.last_upload_time <= 0 {
            return None;
        }
        let nanos = i128::from(self.last_upload_time) * 1_000_000;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).ok()
    }
}

// ---------------------------------------------------------------------------
// ItemInfo — Static item metadata supplied by the item lookup
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemInfo {
    #[serde(rename = "ID")]
    pub id: u32,
    pub name: String,
    /// Icon path relative to the item API base, e.g. `/i/020000/020801.png`.
    #[serde(default)]
    pub icon: String,
}
