//! Drops listings that cannot be bought.

use crate::models::Listing;

/// Listings minus mannequin/display-only and empty (zero quantity)
/// entries, order preserved.
pub fn purchasable(listings: &[Listing]) -> Vec<Listing> {
    listings
        .iter()
        .filter(|l| !l.is_display_only && l.quantity > 0)
        .cloned()
        .collect()
}
