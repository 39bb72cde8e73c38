//! Factory for the standard social-media behaviour statechart.

use crate::states::AgentState;
use crate::statechart::Statechart;
use crate::transitions::Transition;
use std::collections::HashSet;

/// Build the standard social-media behaviour statechart.
///
/// `decides` is intentionally ambiguous: five transitions share the same
/// `(evaluating, decides)` pair without guards, so `fire` resolves to the
/// first (`composing`) while `valid_targets` exposes all five for the
/// reasoner to choose among.
pub fn create_social_media_statechart<A>() -> Statechart<A> {
    let states: HashSet<AgentState> = AgentState::ALL.into_iter().collect();

    let transitions = vec![
        Transition::new("start_browsing", AgentState::Idle, AgentState::Scrolling),
        Transition::new("sees_post", AgentState::Scrolling, AgentState::Evaluating),
        Transition::new("feed_empty", AgentState::Scrolling, AgentState::Resting),
        Transition::new("decides", AgentState::Evaluating, AgentState::Composing),
        Transition::new("decides", AgentState::Evaluating, AgentState::EngagingLike),
        Transition::new("decides", AgentState::Evaluating, AgentState::EngagingReply),
        Transition::new("decides", AgentState::Evaluating, AgentState::EngagingReshare),
        Transition::new("decides", AgentState::Evaluating, AgentState::Scrolling),
        Transition::new(
            "finishes_composing",
            AgentState::Composing,
            AgentState::Scrolling,
        ),
        Transition::new(
            "finishes_engaging",
            AgentState::EngagingLike,
            AgentState::Scrolling,
        ),
        Transition::new(
            "finishes_engaging",
            AgentState::EngagingReply,
            AgentState::Scrolling,
        ),
        Transition::new(
            "finishes_engaging",
            AgentState::EngagingReshare,
            AgentState::Scrolling,
        ),
        Transition::new("rested", AgentState::Resting, AgentState::Idle),
        Transition::new("timeout", AgentState::Scrolling, AgentState::Idle),
        Transition::new("timeout", AgentState::Evaluating, AgentState::Idle),
        Transition::new("timeout", AgentState::Composing, AgentState::Idle),
        Transition::new("timeout", AgentState::EngagingLike, AgentState::Idle),
        Transition::new("timeout", AgentState::EngagingReply, AgentState::Idle),
        Transition::new("timeout", AgentState::EngagingReshare, AgentState::Idle),
        Transition::new("timeout", AgentState::Resting, AgentState::Idle),
    ];

    Statechart::new(states, transitions, AgentState::Idle)
        .expect("standard chart is internally consistent")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    #[test]
    fn decides_is_ambiguous_with_five_targets() {
        let chart = create_social_media_statechart::<Dummy>();
        let targets = chart.valid_targets(AgentState::Evaluating, "decides");
        assert_eq!(targets.len(), 5);
        assert_eq!(
            chart.fire("decides", AgentState::Evaluating, &Dummy, None),
            Some(AgentState::Composing)
        );
    }

    #[test]
    fn timeout_leads_every_non_idle_state_to_idle() {
        let chart = create_social_media_statechart::<Dummy>();
        for state in AgentState::ALL {
            if state == AgentState::Idle {
                continue;
            }
            assert_eq!(
                chart.fire("timeout", state, &Dummy, None),
                Some(AgentState::Idle),
                "state {state} should time out to idle"
            );
        }
    }
}
