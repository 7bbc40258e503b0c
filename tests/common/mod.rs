//! Shared test fixtures for the marketboard integration tests.
//!
//! Provides small hand-built topologies, listing helpers, Universalis-shaped
//! JSON documents and a [`FixedSource`] that answers every fetch with the
//! same canned response.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use marketboard::source::status_error;
use marketboard::{ItemInfo, Listing, ListingSource, MarketData, Result, Topology};

/// Japan region: four datacenters of eight worlds each.
pub fn japan_topology() -> Topology {
    let mut topology = Topology::new();
    topology
        .insert(
            "Japan",
            "Elemental",
            &["Aegis", "Atomos", "Carbuncle", "Garuda", "Gungnir", "Kujata", "Tonberry", "Typhon"],
        )
        .unwrap();
    topology
        .insert(
            "Japan",
            "Gaia",
            &["Alexander", "Bahamut", "Durandal", "Fenrir", "Ifrit", "Ridill", "Tiamat", "Ultima"],
        )
        .unwrap();
    topology
        .insert(
            "Japan",
            "Mana",
            &["Anima", "Asura", "Chocobo", "Hades", "Ixion", "Masamune", "Pandaemonium", "Titan"],
        )
        .unwrap();
    topology
        .insert(
            "Japan",
            "Meteor",
            &["Belias", "Mandragora", "Ramuh", "Shinryu", "Unicorn", "Valefor", "Yojimbo", "Zeromus"],
        )
        .unwrap();
    topology
}

/// One region `region` holding `datacenters` datacenters named `DC1..`, each
/// with `servers` worlds named `DC1-S1..`.
pub fn grid_topology(region: &str, datacenters: usize, servers: usize) -> Topology {
    let mut topology = Topology::new();
    for d in 1..=datacenters {
        let dc = format!("DC{}", d);
        let names: Vec<String> = (1..=servers).map(|s| format!("{}-S{}", dc, s)).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        topology.insert(region, &dc, &refs).unwrap();
    }
    topology
}

/// Every server name of a topology, in presentation order.
pub fn all_servers(topology: &Topology) -> Vec<String> {
    topology
        .regions()
        .iter()
        .flat_map(|r| r.datacenters.iter())
        .flat_map(|dc| dc.servers.iter().cloned())
        .collect()
}

pub fn nq(world: &str, price: u64, quantity: u32) -> Listing {
    Listing::new(world, price, quantity, false)
}

pub fn hq(world: &str, price: u64, quantity: u32) -> Listing {
    Listing::new(world, price, quantity, true)
}

pub fn iron_ingot() -> ItemInfo {
    ItemInfo {
        id: 5057,
        name: "Iron Ingot".to_string(),
        icon: "/i/020000/020801.png".to_string(),
    }
}

pub fn market_data(listings: Vec<Listing>) -> MarketData {
    MarketData {
        item_id: 5057,
        world_name: None,
        listings,
        last_upload_time: 1_709_665_440_000,
    }
}

// ---------------------------------------------------------------------------
// FixedSource
// ---------------------------------------------------------------------------

/// Listing source returning one canned answer and recording requested scopes.
#[derive(Clone)]
pub struct FixedSource {
    answer: std::result::Result<MarketData, u16>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl FixedSource {
    pub fn ok(data: MarketData) -> Self {
        Self {
            answer: Ok(data),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer every request with an HTTP error status.
    pub fn status(status: u16) -> Self {
        Self {
            answer: Err(status),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ListingSource for FixedSource {
    fn fetch(&self, item_id: u32, scope: &str) -> Result<MarketData> {
        self.requests.lock().unwrap().push(scope.to_string());
        match &self.answer {
            Ok(data) => Ok(data.clone()),
            Err(status) => Err(status_error(*status, item_id, scope)
                .expect("FixedSource::status needs a failure status")),
        }
    }
}

// ---------------------------------------------------------------------------
// Universalis reference documents
// ---------------------------------------------------------------------------

pub fn data_centers_json() -> serde_json::Value {
    serde_json::json!([
        {"name": "Elemental", "region": "Japan", "worlds": [45, 49, 33]},
        {"name": "Gaia", "region": "Japan", "worlds": [43, 46]},
        {"name": "Chaos", "region": "Europe", "worlds": [39, 71, 999]}
    ])
}

pub fn worlds_json() -> serde_json::Value {
    serde_json::json!([
        {"id": 33, "name": "Typhon"},
        {"id": 39, "name": "Omega"},
        {"id": 43, "name": "Alexander"},
        {"id": 45, "name": "Carbuncle"},
        {"id": 46, "name": "Fenrir"},
        {"id": 49, "name": "Kujata"},
        {"id": 71, "name": "Moogle"}
    ])
}

/// Write both topology documents into a cache directory.
pub fn write_topology_documents(dir: &Path) {
    fs::write(dir.join("data-centers.json"), data_centers_json().to_string()).unwrap();
    fs::write(dir.join("worlds.json"), worlds_json().to_string()).unwrap();
}
