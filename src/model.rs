// Data models — the records that cross the collaborator boundary.
//
// Items come from the feed/scrape layer, interactions from the persistence
// layer. Both arrive as JSON and are deliberately loose: publish dates stay
// raw strings (upstream scraping produces malformed ones at normal rates)
// and interaction kinds stay strings so a single bad event can be rejected
// without failing the batch it arrived in.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RecommendError;

/// A content item (article/link) as handed in by the feed collaborator.
///
/// Immutable once scored in a ranking pass. The `id` is the canonical URL
/// and is the only cross-snapshot identity the core recognizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Item {
    /// The text used for vectorization: title and description together.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// The source this item belongs to, for diversity grouping.
    ///
    /// Uses the explicit `source` field when present, otherwise the host
    /// of the link (falling back to the id, which is a canonical URL).
    pub fn source_key(&self) -> String {
        if let Some(source) = &self.source {
            if !source.trim().is_empty() {
                return source.clone();
            }
        }
        let url = if self.link.trim().is_empty() {
            &self.id
        } else {
            &self.link
        };
        host_of(url).unwrap_or(url).to_string()
    }

    /// Parsed publish instant, if the raw date is present and parseable.
    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published.as_deref().and_then(parse_published)
    }
}

/// Extract the host portion of a URL without pulling in a URL parser.
fn host_of(url: &str) -> Option<&str> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let host = rest.split(['/', '?', '#']).next()?;
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Parse a publish date leniently.
///
/// Feeds emit RFC 3339, RFC 2822 (RSS pubDate), and bare ISO-8601 naive
/// timestamps; naive values are treated as UTC. Anything else is `None` —
/// a malformed date means "no freshness bonus", never an error.
pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

/// An interaction event from the persistence layer. Append-only; the core
/// only ever folds these into profile weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: String,
    pub item_id: String,
    /// Raw kind string; parsed via [`InteractionKind::parse`].
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    /// Engagement duration in minutes, when the client measured one.
    #[serde(default)]
    pub duration_minutes: Option<f64>,
}

/// The known interaction taxonomy, ordered by signal strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    View,
    Bookmark,
    Highlight,
    Note,
}

impl InteractionKind {
    /// Parse a wire kind string. Unknown kinds are the one malformed-input
    /// condition that is a typed error rather than a silent degrade.
    pub fn parse(raw: &str) -> Result<Self, RecommendError> {
        match raw {
            "view" => Ok(InteractionKind::View),
            "bookmark" => Ok(InteractionKind::Bookmark),
            "highlight" => Ok(InteractionKind::Highlight),
            "note" => Ok(InteractionKind::Note),
            other => Err(RecommendError::UnknownInteractionKind(other.to_string())),
        }
    }

    /// Base profile weight per kind.
    pub fn base_weight(self) -> f64 {
        match self {
            InteractionKind::View => 1.0,
            InteractionKind::Bookmark => 2.0,
            InteractionKind::Highlight => 3.0,
            InteractionKind::Note => 4.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InteractionKind::View => "view",
            InteractionKind::Bookmark => "bookmark",
            InteractionKind::Highlight => "highlight",
            InteractionKind::Note => "note",
        }
    }
}

/// Multiplier for measured engagement time: `min(1 + minutes/10, 3.0)`,
/// or neutral when the client sent no duration.
pub fn engagement_multiplier(duration_minutes: Option<f64>) -> f64 {
    match duration_minutes {
        Some(minutes) => (1.0 + minutes / 10.0).min(3.0),
        None => 1.0,
    }
}

/// One entry of a ranking result. Ephemeral — never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredItem {
    pub item_id: String,
    pub score: f64,
}

/// A group's aggregated profile: L1-normalized weights over the item-id
/// space (all-zero when no member has interacted with anything).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupProfile {
    pub group_id: String,
    pub weights: HashMap<String, f64>,
}

impl GroupProfile {
    pub fn empty(group_id: &str) -> Self {
        Self {
            group_id: group_id.to_string(),
            weights: HashMap::new(),
        }
    }
}
