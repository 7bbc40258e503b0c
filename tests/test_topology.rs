//! Topology construction, lookups and scope classification.

mod common;

use common::{data_centers_json, japan_topology, worlds_json};
use marketboard::topology::{DataCenterDto, WorldDto};
use marketboard::{MarketboardError, ScopeKind, Topology, TopologyProvider};

// ---------------------------------------------------------------------------
// insert
// ---------------------------------------------------------------------------

#[test]
fn insert_groups_datacenters_by_region_in_order() {
    let mut topology = Topology::new();
    topology.insert("Japan", "Elemental", &["Aegis"]).unwrap();
    topology.insert("Europe", "Chaos", &["Omega"]).unwrap();
    topology.insert("japan", "Gaia", &["Alexander"]).unwrap();

    let regions: Vec<&str> = topology.regions().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(regions, vec!["Japan", "Europe"]);
    assert_eq!(topology.datacenters_of("Japan"), vec!["Elemental", "Gaia"]);
}

#[test]
fn insert_rejects_duplicate_datacenter() {
    let mut topology = japan_topology();
    let err = topology.insert("Japan", "gaia", &["Nowhere"]).unwrap_err();
    assert!(matches!(err, MarketboardError::InvalidArgument(_)));
}

#[test]
fn insert_rejects_server_in_two_datacenters() {
    let mut topology = japan_topology();
    let err = topology.insert("Japan", "Crystal", &["Ultima"]).unwrap_err();
    assert!(matches!(err, MarketboardError::InvalidArgument(_)));
    assert!(!topology.has_datacenter("Crystal"));
}

// ---------------------------------------------------------------------------
// provider
// ---------------------------------------------------------------------------

#[test]
fn servers_of_keeps_presentation_order() {
    let servers = japan_topology().servers_of("Meteor");
    assert_eq!(servers.first().map(String::as_str), Some("Belias"));
    assert_eq!(servers.last().map(String::as_str), Some("Zeromus"));
    assert_eq!(servers.len(), 8);
}

#[test]
fn unknown_names_resolve_to_empty() {
    let topology = japan_topology();
    assert!(topology.servers_of("Crystal").is_empty());
    assert!(topology.datacenters_of("Europe").is_empty());
    assert!(!topology.has_datacenter("Crystal"));
    assert!(!topology.has_region("Europe"));
    assert!(topology.has_region("JAPAN"));
}

// ---------------------------------------------------------------------------
// classify
// ---------------------------------------------------------------------------

#[test]
fn classify_resolves_each_level() {
    let topology = japan_topology();
    assert_eq!(topology.classify("japan"), Some((ScopeKind::Region, "Japan".to_string())));
    assert_eq!(topology.classify("mana"), Some((ScopeKind::Datacenter, "Mana".to_string())));
    assert_eq!(topology.classify("ixion"), Some((ScopeKind::Server, "Ixion".to_string())));
    assert_eq!(topology.classify("Balmung"), None);
}

#[test]
fn classify_expands_region_aliases() {
    let topology = japan_topology();
    assert_eq!(topology.classify("JP"), Some((ScopeKind::Region, "Japan".to_string())));
}

#[test]
fn alias_for_unloaded_region_does_not_classify() {
    let mut topology = japan_topology();
    assert_eq!(topology.classify("na"), None);
    assert_eq!(topology.classify("oc"), None);

    topology.insert("Oceania", "Materia", &["Bismarck", "Ravana"]).unwrap();
    assert_eq!(topology.classify("oc"), Some((ScopeKind::Region, "Oceania".to_string())));
}

// ---------------------------------------------------------------------------
// from_universalis
// ---------------------------------------------------------------------------

#[test]
fn from_universalis_maps_world_ids_in_document_order() {
    let data_centers: Vec<DataCenterDto> = serde_json::from_value(data_centers_json()).unwrap();
    let worlds: Vec<WorldDto> = serde_json::from_value(worlds_json()).unwrap();

    let topology = Topology::from_universalis(&data_centers, &worlds).unwrap();

    assert_eq!(topology.datacenters_of("Japan"), vec!["Elemental", "Gaia"]);
    assert_eq!(topology.servers_of("Elemental"), vec!["Carbuncle", "Kujata", "Typhon"]);
    // World 999 has no entry and is dropped.
    assert_eq!(topology.servers_of("Chaos"), vec!["Omega", "Moogle"]);
    assert_eq!(topology.classify("eu"), Some((ScopeKind::Region, "Europe".to_string())));
}
