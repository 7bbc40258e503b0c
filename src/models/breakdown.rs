use std::fmt;

use serde::{Deserialize, Serialize};

use super::listing::Listing;

// ---------------------------------------------------------------------------
// ScopeKind — Level of the server/datacenter/region hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    Server,
    Datacenter,
    Region,
}

impl ScopeKind {
    /// The level directly below this one, `None` for a server.
    pub fn child(self) -> Option<ScopeKind> {
        match self {
            ScopeKind::Region => Some(ScopeKind::Datacenter),
            ScopeKind::Datacenter => Some(ScopeKind::Server),
            ScopeKind::Server => None,
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScopeKind::Server => "server",
            ScopeKind::Datacenter => "datacenter",
            ScopeKind::Region => "region",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Quality — NQ / HQ flag
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    Normal,
    High,
}

impl Quality {
    pub fn matches(self, listing: &Listing) -> bool {
        listing.is_high_quality == (self == Quality::High)
    }

    /// Short tag used in rendered text.
    pub fn tag(self) -> &'static str {
        match self {
            Quality::Normal => "NQ",
            Quality::High => "HQ",
        }
    }
}

// ---------------------------------------------------------------------------
// ScopeBreakdown — Aggregation result for one scope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeBreakdown {
    pub scope_name: String,
    pub kind: ScopeKind,
    pub lowest_nq: Option<Listing>,
    pub lowest_hq: Option<Listing>,
    /// Sub-scopes in topology order; empty for a server.
    pub children: Vec<ScopeBreakdown>,
}

impl ScopeBreakdown {
    pub fn lowest(&self, quality: Quality) -> Option<&Listing> {
        match quality {
            Quality::Normal => self.lowest_nq.as_ref(),
            Quality::High => self.lowest_hq.as_ref(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Server-level descendants in topology order (the breakdown itself for a server).
    pub fn leaves(&self) -> Vec<&ScopeBreakdown> {
        if self.kind == ScopeKind::Server {
            return vec![self];
        }
        self.children.iter().flat_map(|c| c.leaves()).collect()
    }
}
