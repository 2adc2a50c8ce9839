use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;

use hearth::config::Config;
use hearth::engine::RecommendationEngine;
use hearth::feed::categories;
use hearth::model::{Interaction, Item};
use hearth::output::terminal;
use hearth::scoring::topic;

/// Hearth: content recommendation for personal feed readers.
///
/// Ranks candidate articles for a user from their interaction history,
/// declared interests, and a content-similarity model. Items and
/// interactions are read from JSON files produced by the fetch and
/// persistence layers.
#[derive(Parser)]
#[command(name = "hearth", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the corpus for a user via the similarity strategy
    Recommend {
        /// The user to recommend for
        user: String,

        /// JSON file of candidate items
        #[arg(long)]
        items: PathBuf,

        /// JSON file of interaction events
        #[arg(long)]
        interactions: PathBuf,

        /// Groups the user belongs to, as group_id=member,member,...
        #[arg(long)]
        group: Vec<String>,

        /// Number of recommendations (default: 10)
        #[arg(long, default_value = "10")]
        count: usize,
    },

    /// Rank candidate items by declared interests and freshness
    Topics {
        /// JSON file of candidate items
        #[arg(long)]
        items: PathBuf,

        /// Interest categories, e.g. --interest Technology --interest Science
        #[arg(long = "interest")]
        interests: Vec<String>,

        /// Number of recommendations (default: 10)
        #[arg(long, default_value = "10")]
        count: usize,
    },

    /// Show the items most similar to a given item
    Similar {
        /// The item id (canonical URL) to query
        id: String,

        /// JSON file of candidate items
        #[arg(long)]
        items: PathBuf,

        /// Number of similar items (default: 5)
        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// Diversity-constrained selection across sources for a user
    Select {
        /// The user whose profile steers selection
        user: String,

        /// JSON file of candidate items
        #[arg(long)]
        items: PathBuf,

        /// JSON file of interaction events
        #[arg(long)]
        interactions: PathBuf,

        /// Number of items to select (default: 5)
        #[arg(long, default_value = "5")]
        count: usize,
    },

    /// List the interest categories, their keywords, and their feeds
    Categories,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hearth=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Recommend {
            user,
            items,
            interactions,
            group,
            count,
        } => {
            let engine = RecommendationEngine::new(config.engine_settings());
            let items = load_items(&items)?;
            engine.build_vector_space(&corpus_of(&items))?;
            apply_interactions(&engine, &load_interactions(&interactions)?);

            let mut group_ids = Vec::new();
            for spec in &group {
                let (group_id, members) = parse_group(spec)?;
                engine.aggregate_group(&group_id, &members);
                group_ids.push(group_id);
            }

            let ranking = engine.recommend_by_similarity(&user, &group_ids, count);
            terminal::display_ranking(&ranking, &user);
        }

        Commands::Topics {
            items,
            interests,
            count,
        } => {
            if interests.is_empty() {
                anyhow::bail!(
                    "No interests given. Pass at least one --interest; \
                     run `hearth categories` to list them."
                );
            }
            let engine = RecommendationEngine::new(config.engine_settings());
            let items = load_items(&items)?;
            let now = Utc::now();

            let ranked = engine.recommend_by_topic(&items, &interests, count, now);
            terminal::display_items(&ranked, "Topic recommendations");

            let combined = topic::combined_matches(&items, &interests, 3);
            terminal::display_combined(&combined);
        }

        Commands::Similar { id, items, count } => {
            let engine = RecommendationEngine::new(config.engine_settings());
            let items = load_items(&items)?;
            let space = engine.build_vector_space(&corpus_of(&items))?;

            let similar = space.similar_items(&id, count);
            if similar.is_empty() {
                println!("No item with id {id} in the corpus.");
            } else {
                println!("\n{}", format!("=== Similar to {id} ===").bold());
                for (item_id, score) in similar {
                    println!("  {score:.3}  {item_id}");
                }
                println!();
            }
        }

        Commands::Select {
            user,
            items,
            interactions,
            count,
        } => {
            let engine = RecommendationEngine::new(config.engine_settings());
            let items = load_items(&items)?;
            engine.build_vector_space(&corpus_of(&items))?;
            apply_interactions(&engine, &load_interactions(&interactions)?);

            let Some(user_vector) = engine.profile_vector(&user) else {
                println!("No usable profile for {user} — nothing to steer selection with.");
                return Ok(());
            };

            let mut source_groups: HashMap<String, Vec<Item>> = HashMap::new();
            for item in items {
                source_groups.entry(item.source_key()).or_default().push(item);
            }

            let picked = engine.select_diverse(source_groups, &user_vector, count);
            terminal::display_items(&picked, &format!("Diverse picks for {user}"));
        }

        Commands::Categories => {
            println!("\n{}", "=== Interest categories ===".bold());
            for category in categories::CATEGORIES {
                println!("\n  {}", category.name.bold());
                println!("    Keywords: {}", category.keywords.join(", ").dimmed());
                for feed in category.feeds {
                    println!("    Feed: {}", feed.dimmed());
                }
            }
            println!();
        }
    }

    Ok(())
}

fn load_items(path: &Path) -> Result<Vec<Item>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading items file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing items in {}", path.display()))
}

fn load_interactions(path: &Path) -> Result<Vec<Interaction>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading interactions file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parsing interactions in {}", path.display()))
}

/// Corpus for the vectorizer: item id → title + description text.
fn corpus_of(items: &[Item]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|item| (item.id.clone(), item.text()))
        .collect()
}

/// Fold interaction events into profiles, one update batch per user.
fn apply_interactions(engine: &RecommendationEngine, interactions: &[Interaction]) {
    let now = Utc::now();
    let mut by_user: HashMap<&str, Vec<Interaction>> = HashMap::new();
    for interaction in interactions {
        by_user
            .entry(interaction.user_id.as_str())
            .or_default()
            .push(interaction.clone());
    }
    for (user, batch) in by_user {
        let outcome = engine.update_profile(user, &batch, now);
        if outcome.rejected > 0 {
            eprintln!(
                "{}",
                format!(
                    "warning: {} interaction(s) for {user} had an unknown kind and were skipped",
                    outcome.rejected
                )
                .yellow()
            );
        }
    }
}

/// Parse a `group_id=member,member,...` argument.
fn parse_group(spec: &str) -> Result<(String, Vec<String>)> {
    let (group_id, members) = spec.split_once('=').with_context(|| {
        format!("group spec {spec:?} is not of the form group_id=member,member")
    })?;
    let members: Vec<String> = members
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect();
    Ok((group_id.to_string(), members))
}
