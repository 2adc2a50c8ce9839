// Keyword/topic scoring with freshness weighting.
//
// Scores a candidate by how often the curated keywords of the user's
// declared interest categories occur in its text, plus a bonus for recent
// publication. Purely lexical — no vector space required — which makes it
// the fallback strategy when no corpus model has been built yet.

use chrono::{DateTime, Duration, Utc};

use crate::feed::categories;
use crate::model::{parse_published, Item, ScoredItem};
use crate::scoring::{sort_ranking, Scorer, ScoringContext};

/// Occurrence multiplier for interest keyword matches.
const MATCH_WEIGHT: f64 = 2.0;

/// Freshness tiers: (max age in days, bonus).
const FRESHNESS_TIERS: [(i64, f64); 3] = [(7, 5.0), (14, 3.0), (30, 1.0)];

/// The keyword/topic ranking strategy.
#[derive(Default)]
pub struct TopicScorer;

impl TopicScorer {
    /// Score raw text against declared interests and an optional raw
    /// publish date. Never errors: unknown interests contribute no
    /// keywords and malformed dates earn no bonus.
    pub fn score_text(
        &self,
        text: &str,
        interests: &[String],
        published: Option<&str>,
        now: DateTime<Utc>,
    ) -> f64 {
        keyword_score(text, interests) + freshness_bonus(published.and_then(parse_published), now)
    }
}

impl Scorer for TopicScorer {
    fn score(&self, ctx: &ScoringContext<'_>, candidates: &[Item]) -> Vec<ScoredItem> {
        let mut ranking: Vec<ScoredItem> = candidates
            .iter()
            .map(|item| ScoredItem {
                item_id: item.id.clone(),
                score: self.score_text(
                    &item.text(),
                    ctx.interests,
                    item.published.as_deref(),
                    ctx.now,
                ),
            })
            .collect();
        sort_ranking(&mut ranking);
        ranking
    }
}

/// Case-insensitive keyword occurrence count across all interests, × 2.
fn keyword_score(text: &str, interests: &[String]) -> f64 {
    let lower = text.to_lowercase();
    let mut matches = 0usize;
    for interest in interests {
        for keyword in categories::keywords_for(interest) {
            matches += lower.matches(keyword).count();
        }
    }
    matches as f64 * MATCH_WEIGHT
}

/// Freshness bonus by publish age: +5 within a week, +3 within two,
/// +1 within a month, nothing after that or without a parseable date.
fn freshness_bonus(published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(published) = published else {
        return 0.0;
    };
    let age = now - published;
    for (days, bonus) in FRESHNESS_TIERS {
        if age <= Duration::days(days) {
            return bonus;
        }
    }
    0.0
}

/// Items whose text mentions two different interest categories by name,
/// labeled with the pair ("Technology & Science"). Advisory output layered
/// on top of the main ranking, capped at `max` entries.
pub fn combined_matches(
    candidates: &[Item],
    interests: &[String],
    max: usize,
) -> Vec<(Item, String)> {
    let mut combined = Vec::new();
    for (i, first) in interests.iter().enumerate() {
        for second in &interests[i + 1..] {
            let (first_lower, second_lower) = (first.to_lowercase(), second.to_lowercase());
            for item in candidates {
                if combined.len() >= max {
                    return combined;
                }
                let text = item.text().to_lowercase();
                if text.contains(&first_lower) && text.contains(&second_lower) {
                    combined.push((item.clone(), format!("{first} & {second}")));
                }
            }
        }
    }
    combined
}
