//! An [`Agent`] paired with a chat backend that makes the per-post
//! engage/ignore decision.

use crate::agent::{Agent, SimAgent};
use crate::decision::{AgentDecision, Choice, DecisionError};
use crate::profile::AgentProfile;
use prism_core::AgentState;
use prism_feed::Post;
use prism_llm::{ChatModel, ChatOptions, ResponseFormat};
use std::collections::HashSet;

/// Build the system prompt establishing an agent's persona and the
/// decision contract it must follow.
pub fn build_system_prompt(name: &str, interests: &[String], personality: &str) -> String {
    format!(
        "You are {name}, a social media user with the following profile:\n\n\
         Interests: {interests}\n\
         Personality: {personality}\n\n\
         You are browsing your social media feed. For each post you see, you must decide\n\
         what action to take.\n\n\
         Valid choices:\n\
         - LIKE: Show appreciation for the post without commenting\n\
         - REPLY: Write a response to the post\n\
         - RESHARE: Share the post with your own commentary\n\
         - SCROLL: Skip the post without interacting\n\n\
         Decision criteria:\n\
         - LIKE posts that align with your interests but don't require a response\n\
         - REPLY when you have something meaningful to contribute to the conversation\n\
         - RESHARE when you want your followers to see important or interesting content\n\
         - SCROLL past posts that don't interest you or aren't worth engaging with\n\n\
         You MUST respond with valid JSON in this exact format:\n\
         {{\n  \"choice\": \"LIKE\" | \"REPLY\" | \"RESHARE\" | \"SCROLL\",\n  \
         \"reason\": \"1-3 sentence explanation of your decision\",\n  \
         \"content\": \"Your reply or reshare comment (required for REPLY/RESHARE)\"\n}}\n\n\
         Important:\n\
         - Always include a reason for your decision\n\
         - When choice is REPLY or RESHARE, you MUST provide content\n\
         - When choice is LIKE or SCROLL, content should be null\n\
         - Stay in character based on your personality and interests",
        name = name,
        interests = interests.join(", "),
        personality = personality,
    )
}

/// Build the user prompt presenting the head-of-feed post to decide on.
pub fn build_feed_prompt(post: &Post) -> String {
    format!(
        "Here is a post from your feed:\n\n{}\n\nWhat do you decide to do? Respond with JSON only.",
        post.text
    )
}

/// An [`Agent`] that delegates its per-post engage/ignore decision to a
/// [`ChatModel`].
pub struct LlmAgent {
    pub agent: Agent,
    client: Box<dyn ChatModel>,
    system_prompt: String,
}

impl LlmAgent {
    pub fn new(profile: AgentProfile, client: Box<dyn ChatModel>) -> Self {
        let system_prompt = build_system_prompt(&profile.name, &profile.interests, &profile.personality);
        let mut agent = Agent::new(profile.id, profile.name, profile.interests);
        agent.personality = profile.personality;
        Self {
            agent,
            client,
            system_prompt,
        }
    }

    /// Decide how to engage with the head of `feed`. Returns `Ok(None)`
    /// when the feed is empty — there's nothing to decide about.
    pub async fn decide(&self, feed: &[Post]) -> Result<Option<AgentDecision>, DecisionError> {
        let Some(post) = feed.first() else {
            return Ok(None);
        };

        let prompt = build_feed_prompt(post);
        let options = ChatOptions {
            response_format: Some(ResponseFormat::Json),
            ..Default::default()
        };

        let (choice, reason, content) = match self.client.chat(&self.system_prompt, &prompt, &options).await {
            Ok(response) => parse_decision(&response.text),
            Err(_) => fallback_decision(),
        };

        let decision = AgentDecision::new(choice, reason, Some(post.id.clone()), content)?;
        Ok(Some(decision))
    }
}

fn fallback_decision() -> (Choice, String, Option<String>) {
    (Choice::Ignore, "unable to reach the language model".to_string(), None)
}

fn parse_decision(response_text: &str) -> (Choice, String, Option<String>) {
    let Some(value) = prism_llm::extract_json(response_text) else {
        return fallback_decision();
    };

    let raw_choice = value.get("choice").and_then(|v| v.as_str()).unwrap_or("");
    let choice = Choice::from_str_loose(raw_choice).unwrap_or(Choice::Ignore);

    let reason = value
        .get("reason")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("no reason given")
        .to_string();

    let content = value
        .get("content")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let content = match choice {
        Choice::Ignore | Choice::Like => None,
        Choice::Reply | Choice::Reshare => content,
    };

    (choice, reason, content)
}

// Only used to satisfy trait bounds exercised by the round executor;
// kept here so `LlmAgent` can stand in wherever a `SimAgent` is expected.
impl SimAgent for LlmAgent {
    fn agent_id(&self) -> &str {
        self.agent.agent_id()
    }

    fn name(&self) -> &str {
        self.agent.name()
    }

    fn interests(&self) -> &[String] {
        self.agent.interests()
    }

    fn personality(&self) -> &str {
        self.agent.personality()
    }

    fn following(&self) -> &HashSet<String> {
        self.agent.following()
    }

    fn state(&self) -> AgentState {
        self.agent.state()
    }

    fn ticks_in_state(&self) -> u32 {
        self.agent.ticks_in_state()
    }

    fn engagement_threshold(&self) -> f64 {
        self.agent.engagement_threshold()
    }

    fn timeout_threshold(&self) -> u32 {
        self.agent.timeout_threshold()
    }

    fn tick(&mut self) {
        self.agent.tick()
    }

    fn transition_to(&mut self, new_state: AgentState, trigger: &str) {
        self.agent.transition_to(new_state, trigger)
    }
}
