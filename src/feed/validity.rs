// Candidate validity filter.
//
// Scraped feed content is noisy: missing descriptions, blank links, dates
// in whatever format the publisher felt like. Items that fail this filter
// are dropped silently before topic scoring — a bad record must not fail
// the ranking pass for every other record.

use chrono::{DateTime, Duration, Utc};

use crate::model::Item;

/// Inclusive recency window for eligible items.
const MAX_AGE_DAYS: i64 = 30;

/// Whether an item is complete and recent enough to rank.
///
/// Requires title, description, link, published, and thumbnail all present
/// and non-blank, and a publish date that parses and falls within
/// `[now − 30 days, now]` inclusive.
pub fn is_eligible(item: &Item, now: DateTime<Utc>) -> bool {
    if item.title.trim().is_empty()
        || item.description.trim().is_empty()
        || item.link.trim().is_empty()
    {
        return false;
    }
    if !item
        .thumbnail
        .as_deref()
        .is_some_and(|t| !t.trim().is_empty())
    {
        return false;
    }
    let Some(published) = item
        .published
        .as_deref()
        .filter(|p| !p.trim().is_empty())
    else {
        return false;
    };
    let Some(published) = crate::model::parse_published(published) else {
        return false;
    };
    published <= now && published >= now - Duration::days(MAX_AGE_DAYS)
}
