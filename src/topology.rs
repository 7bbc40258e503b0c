//! Server / datacenter / region hierarchy.
//!
//! The [`TopologyProvider`] trait is what the aggregation engine consumes.
//! [`Topology`] is the in-memory implementation, built either by hand or from
//! the Universalis `data-centers` and `worlds` documents.

use std::collections::HashMap;

use serde::Deserialize;

use crate::config;
use crate::error::{MarketboardError, Result};
use crate::models::ScopeKind;

/// Read-only view of the hierarchy.
///
/// Unknown names yield empty member lists; use the `has_*` methods to tell
/// an unknown scope apart from one that resolves to no members.
pub trait TopologyProvider {
    /// Member servers of a datacenter, in presentation order.
    fn servers_of(&self, datacenter: &str) -> Vec<String>;

    /// Member datacenters of a region, in presentation order.
    fn datacenters_of(&self, region: &str) -> Vec<String>;

    fn has_datacenter(&self, datacenter: &str) -> bool;

    fn has_region(&self, region: &str) -> bool;
}

// ---------------------------------------------------------------------------
// Topology
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datacenter {
    pub name: String,
    pub servers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    pub datacenters: Vec<Datacenter>,
}

/// In-memory hierarchy. Name lookups are ASCII case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    regions: Vec<Region>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a datacenter (and its region, if new) with its servers.
    ///
    /// Fails if the datacenter already exists or one of the servers already
    /// belongs to another datacenter.
    pub fn insert(&mut self, region: &str, datacenter: &str, servers: &[&str]) -> Result<()> {
        if self.find_datacenter(datacenter).is_some() {
            return Err(MarketboardError::InvalidArgument(format!(
                "Datacenter '{}' is already part of the topology",
                datacenter
            )));
        }
        if let Some(dup) = servers.iter().find(|s| self.find_server(s).is_some()) {
            return Err(MarketboardError::InvalidArgument(format!(
                "Server '{}' already belongs to another datacenter",
                dup
            )));
        }

        let dc = Datacenter {
            name: datacenter.to_string(),
            servers: servers.iter().map(|s| s.to_string()).collect(),
        };

        match self
            .regions
            .iter_mut()
            .find(|r| r.name.eq_ignore_ascii_case(region))
        {
            Some(r) => r.datacenters.push(dc),
            None => self.regions.push(Region {
                name: region.to_string(),
                datacenters: vec![dc],
            }),
        }
        Ok(())
    }

    /// Build from the Universalis `data-centers` and `worlds` documents.
    ///
    /// Regions and datacenters keep document order; world IDs without a
    /// matching world entry are skipped.
    pub fn from_universalis(data_centers: &[DataCenterDto], worlds: &[WorldDto]) -> Result<Self> {
        let names: HashMap<u32, &str> = worlds.iter().map(|w| (w.id, w.name.as_str())).collect();

        let mut topology = Topology::new();
        for dc in data_centers {
            let servers: Vec<&str> = dc
                .worlds
                .iter()
                .filter_map(|id| names.get(id).copied())
                .collect();
            topology.insert(&dc.region, &dc.name, &servers)?;
        }
        Ok(topology)
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn find_region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }

    pub fn find_datacenter(&self, name: &str) -> Option<&Datacenter> {
        self.regions
            .iter()
            .flat_map(|r| r.datacenters.iter())
            .find(|dc| dc.name.eq_ignore_ascii_case(name))
    }

    /// Canonical spelling of a server name.
    pub fn find_server(&self, name: &str) -> Option<&str> {
        self.regions
            .iter()
            .flat_map(|r| r.datacenters.iter())
            .flat_map(|dc| dc.servers.iter())
            .find(|s| s.eq_ignore_ascii_case(name))
            .map(|s| s.as_str())
    }

    /// Work out which level a user-supplied name refers to.
    ///
    /// Region aliases (`jp`, `eu`, `na`, `oc`) are checked first, then
    /// regions, datacenters and servers. Returns the canonical name, or
    /// `None` when nothing in the topology matches (including an alias
    /// whose region is not loaded).
    pub fn classify(&self, name: &str) -> Option<(ScopeKind, String)> {
        let lowered = name.to_ascii_lowercase();
        if let Some(alias) = config::region_aliases().get(lowered.as_str()) {
            return self
                .find_region(alias)
                .map(|r| (ScopeKind::Region, r.name.clone()));
        }
        if let Some(r) = self.find_region(name) {
            return Some((ScopeKind::Region, r.name.clone()));
        }
        if let Some(dc) = self.find_datacenter(name) {
            return Some((ScopeKind::Datacenter, dc.name.clone()));
        }
        self.find_server(name)
            .map(|s| (ScopeKind::Server, s.to_string()))
    }
}

impl TopologyProvider for Topology {
    fn servers_of(&self, datacenter: &str) -> Vec<String> {
        self.find_datacenter(datacenter)
            .map(|dc| dc.servers.clone())
            .unwrap_or_default()
    }

    fn datacenters_of(&self, region: &str) -> Vec<String> {
        self.find_region(region)
            .map(|r| r.datacenters.iter().map(|dc| dc.name.clone()).collect())
            .unwrap_or_default()
    }

    fn has_datacenter(&self, datacenter: &str) -> bool {
        self.find_datacenter(datacenter).is_some()
    }

    fn has_region(&self, region: &str) -> bool {
        self.find_region(region).is_some()
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Entry of the Universalis `data-centers` document.
#[derive(Debug, Clone, Deserialize)]
pub struct DataCenterDto {
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub worlds: Vec<u32>,
}

/// Entry of the Universalis `worlds` document.
#[derive(Debug, Clone, Deserialize)]
pub struct WorldDto {
    pub id: u32,
    pub name: String,
}
