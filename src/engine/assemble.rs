//! Attaches item metadata to pager output.

use time::macros::format_description;
use time::OffsetDateTime;

use crate::config;
use crate::models::{ItemInfo, ItemPage, Page};

/// Combine pages with the item's name, links and upload time.
pub fn assemble(item: &ItemInfo, last_upload: Option<OffsetDateTime>, pages: Vec<Page>) -> Vec<ItemPage> {
    let page_count = pages.len();
    let url = format!("{}{}", config::UNIVERSALIS_MARKET_URL, item.id);
    let thumbnail = (!item.icon.is_empty()).then(|| format!("{}{}", config::XIVAPI_BASE, item.icon));
    let footer = last_upload
        .and_then(format_upload_time)
        .map(|t| format!("Data from {}", t));

    pages
        .into_iter()
        .enumerate()
        .map(|(i, page)| ItemPage {
            title: item.name.clone(),
            scope: page.title,
            url: url.clone(),
            thumbnail: thumbnail.clone(),
            footer: footer.clone(),
            page_number: i + 1,
            page_count,
            summary: page.summary,
            entries: page.entries,
        })
        .collect()
}

/// `"05 Mar 2024 7:04 PM"`, in UTC.
pub fn format_upload_time(at: OffsetDateTime) -> Option<String> {
    let fmt = format_description!(
        "[day] [month repr:short] [year] [hour repr:12 padding:none]:[minute] [period]"
    );
    at.format(&fmt).ok()
}
