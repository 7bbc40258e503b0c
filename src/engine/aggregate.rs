//! Recursive scope aggregation.
//!
//! A server is a leaf holding the cheapest NQ/HQ listing on that world. A
//! datacenter or region aggregates its members in topology order and rolls
//! their extrema up by price.

use crate::engine::extremum::cheapest;
use crate::error::{MarketboardError, Result};
use crate::models::{Listing, Quality, ScopeBreakdown, ScopeKind};
use crate::topology::TopologyProvider;

/// Build the breakdown tree for one scope.
///
/// `listings` is expected to be pre-filtered to purchasable entries.
/// Datacenter and region names absent from the topology fail with
/// [`MarketboardError::UnknownScope`]; no partial tree is returned.
pub fn aggregate_scope<T>(
    kind: ScopeKind,
    name: &str,
    listings: &[Listing],
    topology: &T,
) -> Result<ScopeBreakdown>
where
    T: TopologyProvider + ?Sized,
{
    let members = match kind {
        ScopeKind::Server => return Ok(leaf(name, listings)),
        ScopeKind::Datacenter if topology.has_datacenter(name) => topology.servers_of(name),
        ScopeKind::Region if topology.has_region(name) => topology.datacenters_of(name),
        _ => {
            return Err(MarketboardError::UnknownScope(format!(
                "{} '{}' is not in the topology",
                kind, name
            )))
        }
    };

    let child_kind = kind.child().unwrap_or(ScopeKind::Server);
    let children = members
        .iter()
        .map(|member| aggregate_scope(child_kind, member, listings, topology))
        .collect::<Result<Vec<_>>>()?;

    Ok(ScopeBreakdown {
        scope_name: name.to_string(),
        kind,
        lowest_nq: roll_up(&children, Quality::Normal),
        lowest_hq: roll_up(&children, Quality::High),
        children,
    })
}

fn leaf(server: &str, listings: &[Listing]) -> ScopeBreakdown {
    let lowest_on_server = |quality: Quality| {
        cheapest(
            listings
                .iter()
                .filter(|l| l.world_name.eq_ignore_ascii_case(server) && quality.matches(l)),
        )
        .cloned()
    };

    ScopeBreakdown {
        scope_name: server.to_string(),
        kind: ScopeKind::Server,
        lowest_nq: lowest_on_server(Quality::Normal),
        lowest_hq: lowest_on_server(Quality::High),
        children: Vec::new(),
    }
}

fn roll_up(children: &[ScopeBreakdown], quality: Quality) -> Option<Listing> {
    cheapest(children.iter().filter_map(|c| c.lowest(quality))).cloned()
}
