//! Cumulative simulation state: the single source of truth an
//! [`crate::round_controller`] loop advances round by round.

use crate::error::{Result, SimError};
use prism_agents::{Agent, SimAgent};
use prism_core::{queries, AgentState, Statechart};
use prism_feed::Post;
use std::collections::HashMap;

/// Cumulative engagement counters across the whole simulation.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct EngagementMetrics {
    pub total_likes: u64,
    pub total_reshares: u64,
    pub total_replies: u64,
    pub posts_created: u64,
}

impl EngagementMetrics {
    pub fn increment_like(&mut self) {
        self.total_likes += 1;
    }

    pub fn increment_reshare(&mut self) {
        self.total_reshares += 1;
    }

    pub fn increment_reply(&mut self) {
        self.total_replies += 1;
    }

    pub fn increment_post_created(&mut self) {
        self.posts_created += 1;
    }
}

/// All mutable data shared across one agent's turn and across rounds.
/// `agents` must never be empty.
#[derive(Debug)]
pub struct SimulationState {
    pub posts: Vec<Post>,
    pub agents: Vec<Agent>,
    pub round_number: u64,
    pub metrics: EngagementMetrics,
    pub statechart: Statechart<Agent>,
}

impl SimulationState {
    pub fn new(agents: Vec<Agent>, statechart: Statechart<Agent>) -> Result<Self> {
        if agents.is_empty() {
            return Err(SimError::EmptyAgents);
        }
        Ok(Self {
            posts: Vec::new(),
            agents,
            round_number: 0,
            metrics: EngagementMetrics::default(),
            statechart,
        })
    }

    pub fn get_state_distribution(&self) -> HashMap<AgentState, usize> {
        queries::state_distribution(self.agents.iter().map(|a| &a.state))
    }

    pub fn get_post_by_id(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == post_id)
    }

    pub fn get_post_by_id_mut(&mut self, post_id: &str) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == post_id)
    }

    pub fn add_post(&mut self, post: Post) {
        self.posts.push(post);
        self.metrics.increment_post_created();
    }

    pub fn advance_round(&mut self) {
        self.round_number += 1;
    }
}
