//! The capability interface the simulation drives agents through, plus a
//! bare, non-LLM-backed implementation used when reconstructing agents
//! from a checkpoint.

use prism_core::AgentState;
use std::collections::{HashSet, VecDeque};

/// Default cap on how many past transitions an [`Agent`] retains.
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 100;

/// Default number of ticks an agent may spend in a state before it's
/// considered timed out.
pub const DEFAULT_TIMEOUT_THRESHOLD: u32 = 5;

/// Map an agent's current state (and whether its feed is empty) to the
/// trigger the round executor should fire on the statechart. A timed-out
/// agent always yields `"timeout"`, regardless of state.
pub fn determine_trigger(state: AgentState, feed_is_empty: bool, is_timed_out: bool) -> &'static str {
    if is_timed_out {
        return "timeout";
    }

    match state {
        AgentState::Idle => "start_browsing",
        AgentState::Scrolling => {
            if feed_is_empty {
                "feed_empty"
            } else {
                "sees_post"
            }
        }
        AgentState::Evaluating => "decides",
        AgentState::Composing => "finishes_composing",
        AgentState::EngagingLike | AgentState::EngagingReply | AgentState::EngagingReshare => {
            "finishes_engaging"
        }
        AgentState::Resting => "rested",
    }
}

/// A past state transition recorded in an agent's bounded history.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub from_state: AgentState,
    pub to_state: AgentState,
    pub trigger: String,
}

/// The minimal surface the round executor needs from an agent, regardless
/// of what (if anything) backs its decision-making.
pub trait SimAgent {
    fn agent_id(&self) -> &str;
    fn name(&self) -> &str;
    fn interests(&self) -> &[String];
    fn personality(&self) -> &str;
    fn following(&self) -> &HashSet<String>;
    fn state(&self) -> AgentState;
    fn ticks_in_state(&self) -> u32;
    fn engagement_threshold(&self) -> f64;
    fn timeout_threshold(&self) -> u32;

    /// Increment the in-state tick counter. Called once per round before
    /// the trigger is determined.
    fn tick(&mut self);

    /// Whether the agent has spent longer than its timeout threshold in
    /// the current state. Strict `>`: an agent exactly at the threshold
    /// has not yet timed out. Independent of `engagement_threshold`,
    /// which governs whether to engage with a post, not how long to
    /// linger in a state.
    fn is_timed_out(&self) -> bool {
        self.ticks_in_state() > self.timeout_threshold()
    }

    fn transition_to(&mut self, new_state: AgentState, trigger: &str);

    /// Whether a post of the given relevance is worth engaging with.
    fn should_engage(&self, relevance: f64) -> bool {
        relevance >= self.engagement_threshold()
    }
}

/// A plain, checkpoint-reconstructible agent: identity, behavioral state,
/// and bounded transition history, with no attached decision backend.
#[derive(Debug, Clone)]
pub struct Agent {
    pub agent_id: String,
    pub name: String,
    pub interests: Vec<String>,
    pub personality: String,
    pub following: HashSet<String>,
    pub state: AgentState,
    pub ticks_in_state: u32,
    pub engagement_threshold: f64,
    pub timeout_threshold: u32,
    history: VecDeque<HistoryEntry>,
    max_history_depth: usize,
}

impl Agent {
    pub fn new(agent_id: impl Into<String>, name: impl Into<String>, interests: Vec<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            name: name.into(),
            interests,
            personality: "neutral".to_string(),
            following: HashSet::new(),
            state: AgentState::Idle,
            ticks_in_state: 0,
            engagement_threshold: 0.5,
            timeout_threshold: DEFAULT_TIMEOUT_THRESHOLD,
            history: VecDeque::new(),
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }
}

impl SimAgent for Agent {
    fn agent_id(&self) -> &str {
        &self.agent_id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn interests(&self) -> &[String] {
        &self.interests
    }

    fn personality(&self) -> &str {
        &self.personality
    }

    fn following(&self) -> &HashSet<String> {
        &self.following
    }

    fn state(&self) -> AgentState {
        self.state
    }

    fn ticks_in_state(&self) -> u32 {
        self.ticks_in_state
    }

    fn engagement_threshold(&self) -> f64 {
        self.engagement_threshold
    }

    fn timeout_threshold(&self) -> u32 {
        self.timeout_threshold
    }

    fn tick(&mut self) {
        self.ticks_in_state += 1;
    }

    fn transition_to(&mut self, new_state: AgentState, trigger: &str) {
        if new_state != self.state {
            self.history.push_back(HistoryEntry {
                from_state: self.state,
                to_state: new_state,
                trigger: trigger.to_string(),
            });
            if self.history.len() > self.max_history_depth {
                self.history.pop_front();
            }
            self.state = new_state;
            self.ticks_in_state = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn determine_trigger_matches_standard_chart() {
        assert_eq!(determine_trigger(AgentState::Idle, true, false), "start_browsing");
        assert_eq!(determine_trigger(AgentState::Scrolling, false, false), "sees_post");
        assert_eq!(determine_trigger(AgentState::Scrolling, true, false), "feed_empty");
        assert_eq!(determine_trigger(AgentState::Evaluating, false, false), "decides");
        assert_eq!(determine_trigger(AgentState::Composing, false, false), "finishes_composing");
        assert_eq!(determine_trigger(AgentState::EngagingLike, false, false), "finishes_engaging");
        assert_eq!(determine_trigger(AgentState::Resting, false, false), "rested");
    }

    #[test]
    fn timeout_overrides_every_state() {
        assert_eq!(determine_trigger(AgentState::Scrolling, false, true), "timeout");
        assert_eq!(determine_trigger(AgentState::Idle, true, true), "timeout");
    }

    #[test]
    fn is_timed_out_uses_strict_greater_than() {
        let mut agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        agent.timeout_threshold = 3;
        agent.ticks_in_state = 3;
        assert!(!agent.is_timed_out());
        agent.ticks_in_state = 4;
        assert!(agent.is_timed_out());
    }

    #[test]
    fn is_timed_out_is_independent_of_engagement_threshold() {
        let mut agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        agent.engagement_threshold = 0.5;
        agent.ticks_in_state = 1;
        assert!(!agent.is_timed_out());
    }

    #[test]
    fn transition_to_resets_ticks_and_records_history() {
        let mut agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        agent.ticks_in_state = 5;
        agent.transition_to(AgentState::Scrolling, "start_browsing");
        assert_eq!(agent.state, AgentState::Scrolling);
        assert_eq!(agent.ticks_in_state, 0);
        assert_eq!(agent.history().count(), 1);
    }

    #[test]
    fn transition_to_same_state_is_a_no_op() {
        let mut agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        agent.ticks_in_state = 5;
        agent.transition_to(AgentState::Idle, "start_browsing");
        assert_eq!(agent.ticks_in_state, 5);
        assert_eq!(agent.history().count(), 0);
    }

    #[test]
    fn history_is_bounded() {
        let mut agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        agent.max_history_depth = 2;
        agent.transition_to(AgentState::Scrolling, "t1");
        agent.transition_to(AgentState::Idle, "t2");
        agent.transition_to(AgentState::Scrolling, "t3");
        assert_eq!(agent.history().count(), 2);
    }
}
