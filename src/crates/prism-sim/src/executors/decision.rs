//! Statechart-driven decision step: tick, trigger, fire, resolve
//! ambiguity, transition, derive the action taken.

use crate::results::{ActionResult, DecisionResult};
use prism_agents::{determine_trigger, SimAgent};
use prism_core::{AgentState, Statechart};
use prism_feed::Post;
use prism_llm::Reasoner;
use tracing::warn;

pub struct AgentDecisionExecutor<'a> {
    reasoner: Option<&'a Reasoner>,
}

impl<'a> AgentDecisionExecutor<'a> {
    pub fn new(reasoner: Option<&'a Reasoner>) -> Self {
        Self { reasoner }
    }

    pub async fn execute<A: SimAgent>(
        &self,
        agent: &mut A,
        statechart: &Statechart<A>,
        feed: &[Post],
    ) -> DecisionResult {
        agent.tick();
        let from_state = agent.state();

        let trigger = determine_trigger(from_state, feed.is_empty(), agent.is_timed_out());

        // `valid_targets` ignores guards, so its length is the true measure
        // of ambiguity; `fire`'s first-match rule would otherwise silently
        // pick one of several equally valid targets without the reasoner
        // ever getting a say.
        let targets = statechart.valid_targets(from_state, trigger);
        let mut reasoner_used = false;

        let new_state = match targets.len() {
            0 => statechart.fire(trigger, from_state, agent, None),
            1 => statechart.fire(trigger, from_state, agent, None).or(Some(targets[0])),
            _ => match self.reasoner {
                Some(reasoner) => {
                    reasoner_used = true;
                    let chosen = reasoner
                        .decide(
                            agent.name(),
                            agent.interests(),
                            agent.personality(),
                            from_state,
                            trigger,
                            &targets,
                            None,
                        )
                        .await
                        .unwrap_or(targets[0]);
                    Some(chosen)
                }
                None => {
                    warn!(
                        agent_id = agent.agent_id(),
                        targets = ?targets,
                        fallback = ?targets[0],
                        "multiple targets but no reasoner configured, using fallback"
                    );
                    Some(targets[0])
                }
            },
        };

        let to_state = match new_state {
            Some(state) if state != agent.state() => {
                agent.transition_to(state, trigger);
                state
            }
            Some(state) => state,
            None => agent.state(),
        };

        let action = derive_action(from_state, feed);

        DecisionResult {
            agent_id: agent.agent_id().to_string(),
            trigger: trigger.to_string(),
            from_state,
            to_state,
            action: Some(action),
            reasoner_used,
        }
    }
}

/// Actions are based on the state the agent was in before the round's
/// transition, not where it's headed next.
fn derive_action(from_state: AgentState, feed: &[Post]) -> ActionResult {
    let target_post_id = feed.first().map(|p| p.id.clone());

    match from_state {
        AgentState::Composing => ActionResult::new("compose", None),
        AgentState::EngagingLike => ActionResult::new("like", target_post_id),
        AgentState::EngagingReply => ActionResult::new("reply", target_post_id),
        AgentState::EngagingReshare => ActionResult::new("reshare", target_post_id),
        AgentState::Idle | AgentState::Scrolling | AgentState::Evaluating | AgentState::Resting => {
            ActionResult::new("scroll", None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_agents::Agent;
    use prism_core::create_social_media_statechart;

    #[tokio::test]
    async fn idle_agent_with_no_reasoner_starts_browsing() {
        let chart = create_social_media_statechart::<Agent>();
        let mut agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        let executor = AgentDecisionExecutor::new(None);

        let result = executor.execute(&mut agent, &chart, &[]).await;

        assert_eq!(result.trigger, "start_browsing");
        assert_eq!(result.to_state, AgentState::Scrolling);
        assert_eq!(result.action.unwrap().action, "scroll");
    }

    #[tokio::test]
    async fn ambiguous_decision_without_reasoner_falls_back_to_first_target() {
        let chart = create_social_media_statechart::<Agent>();
        let mut agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        agent.state = AgentState::Evaluating;
        let executor = AgentDecisionExecutor::new(None);

        let result = executor.execute(&mut agent, &chart, &[]).await;

        assert_eq!(result.trigger, "decides");
        assert!(!result.reasoner_used);
        assert_eq!(result.to_state, AgentState::Composing);
    }

    #[tokio::test]
    async fn ambiguous_decision_with_reasoner_uses_its_choice() {
        use prism_llm::{ChatModel, ChatOptions, ChatResponse, Reasoner};

        struct FixedResponse(String);
        #[async_trait::async_trait]
        impl ChatModel for FixedResponse {
            async fn chat(&self, _: &str, _: &str, _: &ChatOptions) -> prism_llm::Result<ChatResponse> {
                Ok(ChatResponse { text: self.0.clone(), parsed: None })
            }
        }

        let chart = create_social_media_statechart::<Agent>();
        let mut agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        agent.state = AgentState::Evaluating;
        let reasoner = Reasoner::new(Box::new(FixedResponse(r#"{"next_state": "engaging_like"}"#.to_string())));
        let executor = AgentDecisionExecutor::new(Some(&reasoner));

        let result = executor.execute(&mut agent, &chart, &[]).await;

        assert!(result.reasoner_used);
        assert_eq!(result.to_state, AgentState::EngagingLike);
    }

    #[tokio::test]
    async fn timeout_overrides_trigger_regardless_of_state() {
        let chart = create_social_media_statechart::<Agent>();
        let mut agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        agent.state = AgentState::Scrolling;
        agent.timeout_threshold = 1;
        agent.ticks_in_state = 5;
        let executor = AgentDecisionExecutor::new(None);

        let result = executor.execute(&mut agent, &chart, &[]).await;

        assert_eq!(result.trigger, "timeout");
        assert_eq!(result.to_state, AgentState::Idle);
    }

    #[tokio::test]
    async fn action_reflects_state_before_transition() {
        let chart = create_social_media_statechart::<Agent>();
        let mut agent = Agent::new("a1", "Ava", vec!["tech".into()]);
        agent.state = AgentState::EngagingLike;
        let feed = vec![Post::new("p1", "author", "hi")];
        let executor = AgentDecisionExecutor::new(None);

        let result = executor.execute(&mut agent, &chart, &feed).await;

        let action = result.action.unwrap();
        assert_eq!(action.action, "like");
        assert_eq!(action.target_post_id.as_deref(), Some("p1"));
    }
}
