use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PageEntry — One labelled field on a page
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub label: String,
    pub value: String,
    pub inline: bool,
}

// ---------------------------------------------------------------------------
// Page — Pager output, before item metadata is attached
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Name of the aggregated scope.
    pub title: String,
    /// Scope-wide answer, identical on every page of one result.
    pub summary: String,
    pub entries: Vec<PageEntry>,
}

// ---------------------------------------------------------------------------
// ItemPage — Final page handed to a renderer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPage {
    pub title: String,
    pub scope: String,
    pub url: String,
    pub thumbnail: Option<String>,
    pub footer: Option<String>,
    /// 1-based.
    pub page_number: usize,
    pub page_count: usize,
    pub summary: String,
    pub entries: Vec<PageEntry>,
}
