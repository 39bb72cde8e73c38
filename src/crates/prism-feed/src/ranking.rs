//! Ranking modes and the X-algorithm reranker.

use crate::error::{FeedError, Result};
use crate::post::Post;
use serde::{Deserialize, Serialize};

/// Feed retrieval/ranking mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingMode {
    Preference,
    Random,
    XAlgo,
}

/// Configuration for the X-algorithm reranker.
///
/// Constraint: `author_diversity_floor <= author_diversity_decay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub mode: RankingMode,
    pub out_of_network_scale: f64,
    pub reply_scale: f64,
    pub author_diversity_decay: f64,
    pub author_diversity_floor: f64,
    pub in_network_limit: usize,
    pub out_of_network_limit: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            mode: RankingMode::Preference,
            out_of_network_scale: 0.75,
            reply_scale: 0.75,
            author_diversity_decay: 0.5,
            author_diversity_floor: 0.25,
            in_network_limit: 50,
            out_of_network_limit: 50,
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.author_diversity_floor > self.author_diversity_decay {
            return Err(FeedError::InvalidRankingConfig {
                floor: self.author_diversity_floor,
                decay: self.author_diversity_decay,
            });
        }
        Ok(())
    }
}

/// A candidate post scored by base relevance, tagged with whether it is
/// authored by someone the viewer follows.
pub struct Candidate {
    pub post: Post,
    pub base_relevance: f64,
    pub in_network: bool,
}

/// Apply the X-algorithm rerank: bucket by network membership (up to each
/// bucket's limit), scale by network/reply penalties, apply author
/// diversity decay, then truncate to `feed_size`.
pub fn rerank(candidates: Vec<Candidate>, config: &RankingConfig, feed_size: usize) -> Vec<Post> {
    let (mut in_network, mut out_of_network): (Vec<Candidate>, Vec<Candidate>) =
        candidates.into_iter().partition(|c| c.in_network);

    in_network.truncate(config.in_network_limit);
    out_of_network.truncate(config.out_of_network_limit);

    let mut scored: Vec<(f64, Post)> = in_network
        .into_iter()
        .map(|c| (score(&c, config, false), c.post))
        .chain(
            out_of_network
                .into_iter()
                .map(|c| (score(&c, config, true), c.post)),
        )
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap().then_with(|| a.1.id.cmp(&b.1.id)));

    let mut author_occurrences: std::collections::HashMap<String, i32> =
        std::collections::HashMap::new();
    let mut decayed: Vec<(f64, Post)> = scored
        .into_iter()
        .map(|(base_score, post)| {
            let occurrence = *author_occurrences.get(&post.author_id).unwrap_or(&0);
            author_occurrences.insert(post.author_id.clone(), occurrence + 1);
            let multiplier = config
                .author_diversity_decay
                .powi(occurrence)
                .max(config.author_diversity_floor);
            (base_score * multiplier, post)
        })
        .collect();

    decayed.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap().then_with(|| a.1.id.cmp(&b.1.id)));
    decayed.truncate(feed_size);
    decayed.into_iter().map(|(_, post)| post).collect()
}

fn score(candidate: &Candidate, config: &RankingConfig, out_of_network: bool) -> f64 {
    let mut s = candidate.base_relevance;
    if out_of_network {
        s *= config.out_of_network_scale;
    }
    if candidate.post.is_reply() {
        s *= config.reply_scale;
    }
    s
}
