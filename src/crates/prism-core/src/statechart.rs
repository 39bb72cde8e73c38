//! The guarded statechart engine.

use crate::error::{Result, StatechartError};
use crate::states::AgentState;
use crate::transitions::{Context, Transition};
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// A guarded finite-state machine over [`AgentState`].
///
/// Construction validates that every transition's source and target, and
/// the initial state, belong to the declared state set. The chart is
/// immutable thereafter: `transitions` are scanned in declaration order
/// by [`Statechart::fire`].
pub struct Statechart<A> {
    states: HashSet<AgentState>,
    transitions: Vec<Transition<A>>,
    initial: AgentState,
}

impl<A> std::fmt::Debug for Statechart<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Statechart")
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .field("initial", &self.initial)
            .finish()
    }
}

impl<A> Statechart<A> {
    pub fn new(
        states: HashSet<AgentState>,
        transitions: Vec<Transition<A>>,
        initial: AgentState,
    ) -> Result<Self> {
        if !states.contains(&initial) {
            return Err(StatechartError::UnknownInitialState(initial));
        }
        for t in &transitions {
            if !states.contains(&t.source) {
                return Err(StatechartError::UnknownTransitionState {
                    trigger: t.trigger.clone(),
                    state: t.source,
                });
            }
            if !states.contains(&t.target) {
                return Err(StatechartError::UnknownTransitionState {
                    trigger: t.trigger.clone(),
                    state: t.target,
                });
            }
        }
        Ok(Self {
            states,
            transitions,
            initial,
        })
    }

    pub fn initial(&self) -> AgentState {
        self.initial
    }

    pub fn states(&self) -> &HashSet<AgentState> {
        &self.states
    }

    /// Scans transitions in declaration order; returns the target of the
    /// first transition whose trigger and source match and whose guard
    /// (if present) evaluates true. A guard that panics is treated as a
    /// `false` result and iteration continues. A matched action, if
    /// present, runs before the target is returned; a panicking action
    /// is swallowed and does not prevent the transition.
    pub fn fire(
        &self,
        trigger: &str,
        current_state: AgentState,
        agent: &A,
        context: Option<&Context>,
    ) -> Option<AgentState> {
        for t in &self.transitions {
            if t.trigger != trigger || t.source != current_state {
                continue;
            }
            if let Some(guard) = &t.guard {
                let passed = catch_unwind(AssertUnwindSafe(|| guard(agent, context)))
                    .unwrap_or(false);
                if !passed {
                    continue;
                }
            }
            if let Some(action) = &t.action {
                let _ = catch_unwind(AssertUnwindSafe(|| action(agent, context)));
            }
            return Some(t.target);
        }
        None
    }

    /// All targets of transitions matching `(state, trigger)`, irrespective
    /// of guards, in declaration order (duplicates preserved).
    pub fn valid_targets(&self, state: AgentState, trigger: &str) -> Vec<AgentState> {
        self.transitions
            .iter()
            .filter(|t| t.source == state && t.trigger == trigger)
            .map(|t| t.target)
            .collect()
    }

    /// First-occurrence-deduplicated trigger names for transitions leaving
    /// `state`, in declaration order.
    pub fn valid_triggers(&self, state: AgentState) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut triggers = Vec::new();
        for t in &self.transitions {
            if t.source == state && seen.insert(t.trigger.clone()) {
                triggers.push(t.trigger.clone());
            }
        }
        triggers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Dummy;

    fn standard_chart() -> Statechart<Dummy> {
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
        ];
        Statechart::new(states, transitions, AgentState::Idle).unwrap()
    }

    #[test]
    fn fire_returns_first_matching_transition() {
        let chart = standard_chart();
        let target = chart.fire("decides", AgentState::Evaluating, &Dummy, None);
        assert_eq!(target, Some(AgentState::Composing));
    }

    #[test]
    fn fire_returns_none_on_no_match() {
        let chart = standard_chart();
        assert_eq!(chart.fire("decides", AgentState::Idle, &Dummy, None), None);
    }

    #[test]
    fn valid_targets_exposes_all_ambiguous_options() {
        let chart = standard_chart();
        let targets = chart.valid_targets(AgentState::Evaluating, "decides");
        assert_eq!(
            targets,
            vec![
                AgentState::Composing,
                AgentState::EngagingLike,
                AgentState::EngagingReply,
                AgentState::EngagingReshare,
                AgentState::Scrolling,
            ]
        );
    }

    #[test]
    fn valid_triggers_is_deduplicated_and_ordered() {
        let chart = standard_chart();
        assert_eq!(chart.valid_triggers(AgentState::Evaluating), vec!["decides"]);
    }

    #[test]
    fn guard_panic_is_treated_as_false() {
        let states: HashSet<AgentState> = AgentState::ALL.into_iter().collect();
        let transitions = vec![Transition::new(
            "start_browsing",
            AgentState::Idle,
            AgentState::Scrolling,
        )
        .with_guard(std::sync::Arc::new(|_: &Dummy, _| panic!("boom")))];
        let chart: Statechart<Dummy> =
            Statechart::new(states, transitions, AgentState::Idle).unwrap();
        assert_eq!(chart.fire("start_browsing", AgentState::Idle, &Dummy, None), None);
    }

    #[test]
    fn construction_rejects_unknown_initial_state() {
        let states: HashSet<AgentState> = [AgentState::Idle].into_iter().collect();
        let err = Statechart::<Dummy>::new(states, vec![], AgentState::Scrolling).unwrap_err();
        assert!(matches!(err, StatechartError::UnknownInitialState(_)));
    }

    #[test]
    fn construction_rejects_transition_with_undeclared_state() {
        let states: HashSet<AgentState> = [AgentState::Idle].into_iter().collect();
        let transitions = vec![Transition::new(
            "start_browsing",
            AgentState::Idle,
            AgentState::Scrolling,
        )];
        let err = Statechart::<Dummy>::new(states, transitions, AgentState::Idle).unwrap_err();
        assert!(matches!(err, StatechartError::UnknownTransitionState { .. }));
    }
}
