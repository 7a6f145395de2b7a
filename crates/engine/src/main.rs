//! Worldloom inspection binary.
//!
//! Loads an exported world file, prints a summary, and optionally asks the
//! AI collaborator for a fresh world introduction.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;
use worldloom_domain::{ArticleKind, World};
use worldloom_engine::layout::timeline;
use worldloom_engine::{Assistant, PromptTarget, SystemClock, WorldStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let describe = args.iter().any(|a| a == "--describe");
    let path = args.iter().find(|a| !a.starts_with("--"));

    let mut store = WorldStore::new(Arc::new(SystemClock::new()));
    if let Some(path) = path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {path}"))?;
        store
            .import(&text)
            .with_context(|| format!("could not import {path}"))?;
        info!(path = %path, "imported world file");
    }

    summarize(store.active());

    if describe {
        let assistant = Assistant::from_env();
        if assistant.is_configured() {
            let text = assistant
                .generate(store.active(), PromptTarget::WorldDescription)
                .await
                .context("generation failed")?;
            println!("\n--- generated introduction ---\n{text}");
        } else {
            println!("\nAI collaborator not configured (set WORLDLOOM_LLM_URL)");
        }
    }

    Ok(())
}

fn summarize(world: &World) {
    println!("{} ({})", world.name, world.genre);
    println!("  last modified: {}", world.last_modified.to_rfc3339());
    println!(
        "  characters: {}, relations: {}, maps: {}",
        world.characters.len(),
        world.relations.len(),
        world.maps.len()
    );
    println!(
        "  concepts: {} in {:?}",
        world.concepts.len(),
        world.article_categories(ArticleKind::Concept)
    );
    println!(
        "  lore: {} in {:?}",
        world.lore.len(),
        world.article_categories(ArticleKind::Lore)
    );
    let extent = timeline::overview_extent(&world.timeline);
    println!(
        "  timeline: {} events on {} tracks, years {}..{}",
        world.timeline.len(),
        world.timeline_tracks.len(),
        extent.min,
        extent.max
    );
}
