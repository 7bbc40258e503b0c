//! Splits a breakdown into renderable pages.
//!
//! Every page of one result carries the same summary, computed once from
//! the root's rolled-up extrema, so any single page answers "where is it
//! cheapest".

use crate::config::NOT_AVAILABLE;
use crate::engine::PageLimits;
use crate::models::{Listing, Page, PageEntry, Quality, ScopeBreakdown, ScopeKind};

const QUALITIES: [Quality; 2] = [Quality::Normal, Quality::High];

/// Page a datacenter or region breakdown.
///
/// One entry per server in topology order, or per datacenter when
/// `limits.rollup_datacenters` is set on a region. No entries, no pages.
/// Only region results go inline, and only past `limits.inline_threshold`.
pub fn paginate(root: &ScopeBreakdown, limits: &PageLimits) -> Vec<Page> {
    let rows: Vec<&ScopeBreakdown> = if limits.rollup_datacenters && root.kind == ScopeKind::Region {
        root.children.iter().collect()
    } else {
        root.leaves()
    };
    if rows.is_empty() {
        return Vec::new();
    }

    let summary = truncate(&scope_summary(root), limits.max_summary_len);
    let inline = root.kind == ScopeKind::Region && rows.len() > limits.inline_threshold;

    rows.chunks(limits.max_entries_per_page)
        .map(|chunk| Page {
            title: root.scope_name.clone(),
            summary: summary.clone(),
            entries: chunk
                .iter()
                .map(|row| PageEntry {
                    label: row.scope_name.clone(),
                    value: truncate(&entry_value(row), limits.max_entry_value_len),
                    inline,
                })
                .collect(),
        })
        .collect()
}

/// Page a single server: a summary of both extrema plus one entry listing
/// the cheapest offers on that world in ascending price order.
pub fn server_page(leaf: &ScopeBreakdown, listings: &[Listing], limits: &PageLimits) -> Page {
    let summary = QUALITIES
        .iter()
        .map(|&q| {
            let price = leaf
                .lowest(q)
                .map(|l| format!("{} x {}", format_price(l.price_per_unit), l.quantity))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            format!("Cheapest {}: {}", q.tag(), price)
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut on_server: Vec<&Listing> = listings
        .iter()
        .filter(|l| l.world_name.eq_ignore_ascii_case(&leaf.scope_name))
        .collect();
    on_server.sort_by_key(|l| l.price_per_unit);

    let value = if on_server.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        on_server
            .iter()
            .take(limits.server_listing_limit)
            .map(|l| listing_line(l))
            .collect::<Vec<_>>()
            .join("\n")
    };

    Page {
        title: leaf.scope_name.clone(),
        summary: truncate(&summary, limits.max_summary_len),
        entries: vec![PageEntry {
            label: leaf.scope_name.clone(),
            value: truncate(&value, limits.max_entry_value_len),
            inline: false,
        }],
    }
}

/// Scope-wide summary for a datacenter or region root.
pub fn scope_summary(root: &ScopeBreakdown) -> String {
    let mut lines: Vec<String> = QUALITIES
        .iter()
        .map(|&q| match root.lowest(q) {
            Some(l) => format!(
                "Cheapest [{}] on **{}** {} x {}",
                q.tag(),
                l.world_name,
                format_price(l.price_per_unit),
                l.quantity
            ),
            None => format!("Cheapest [{}]: {}", q.tag(), NOT_AVAILABLE),
        })
        .collect();

    lines.push(format!(
        "Showing data from {} servers from the {} {}",
        root.leaves().len(),
        root.scope_name,
        root.kind
    ));
    lines.join("\n")
}

/// `"90g [NQ] x 2\n500g [HQ] x 1"`; a missing quality reads "Not available".
pub fn entry_value(row: &ScopeBreakdown) -> String {
    if row.lowest_nq.is_none() && row.lowest_hq.is_none() {
        return NOT_AVAILABLE.to_string();
    }
    QUALITIES
        .iter()
        .map(|&q| match row.lowest(q) {
            Some(l) => listing_line(l),
            None => format!("[{}] {}", q.tag(), NOT_AVAILABLE),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn listing_line(listing: &Listing) -> String {
    let tag = if listing.is_high_quality { "HQ" } else { "NQ" };
    format!(
        "{} [{}] x {}",
        format_price(listing.price_per_unit),
        tag,
        listing.quantity
    )
}

/// Gil amount with thousands separators: `1234567` → `"1,234,567g"`.
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('g');
    out
}

/// Cut `text` to at most `max` characters, ending in `…` when shortened.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
