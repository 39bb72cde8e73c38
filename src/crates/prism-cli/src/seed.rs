//! JSON seed files for `prism run`: an initial post corpus and agent
//! roster. Not part of the checkpoint format — just a convenient way to
//! hand the CLI a starting point.

use anyhow::{Context, Result};
use prism_agents::Agent;
use prism_feed::Post;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct SeedPost {
    id: String,
    author_id: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct SeedAgent {
    agent_id: String,
    name: String,
    interests: Vec<String>,
    #[serde(default)]
    personality: Option<String>,
    #[serde(default)]
    engagement_threshold: Option<f64>,
    #[serde(default)]
    timeout_threshold: Option<u32>,
}

pub fn load_posts(path: &Path) -> Result<Vec<Post>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed posts file {}", path.display()))?;
    let seeds: Vec<SeedPost> =
        serde_json::from_str(&contents).with_context(|| format!("failed to parse seed posts file {}", path.display()))?;

    Ok(seeds.into_iter().map(|s| Post::new(s.id, s.author_id, s.text)).collect())
}

pub fn load_agents(path: &Path) -> Result<Vec<Agent>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read seed agents file {}", path.display()))?;
    let seeds: Vec<SeedAgent> =
        serde_json::from_str(&contents).with_context(|| format!("failed to parse seed agents file {}", path.display()))?;

    Ok(seeds
        .into_iter()
        .map(|s| {
            let mut agent = Agent::new(s.agent_id, s.name, s.interests);
            if let Some(personality) = s.personality {
                agent.personality = personality;
            }
            if let Some(threshold) = s.engagement_threshold {
                agent.engagement_threshold = threshold;
            }
            if let Some(threshold) = s.timeout_threshold {
                agent.timeout_threshold = threshold;
            }
            agent
        })
        .collect())
}
