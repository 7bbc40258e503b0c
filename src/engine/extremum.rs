//! Cheapest-listing selection.
//!
//! Ties on price go to the listing encountered first. Quantity and every
//! other field are ignored.

use crate::models::{Listing, Quality};

/// Cheapest listing of the given quality, `None` when there is none.
pub fn lowest_listing(listings: &[Listing], quality: Quality) -> Option<&Listing> {
    cheapest(listings.iter().filter(|l| quality.matches(l)))
}

/// Cheapest listing of an arbitrary sequence.
///
/// Used directly for the roll-up, where the candidates are the children's
/// already-selected extrema.
pub fn cheapest<'a, I>(candidates: I) -> Option<&'a Listing>
where
    I: IntoIterator<Item = &'a Listing>,
{
    let mut best: Option<&Listing> = None;
    for listing in candidates {
        match best {
            Some(b) if listing.price_per_unit >= b.price_per_unit => {}
            _ => best = Some(listing),
        }
    }
    best
}
