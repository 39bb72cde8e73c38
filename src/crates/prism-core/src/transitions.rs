//! Transition types for the statechart engine.

use crate::states::AgentState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Free-form context passed to guards, actions, and recorded in history.
pub type Context = HashMap<String, Value>;

/// A guard predicate: `(agent, context) -> bool`. Any panic raised inside
/// is caught by the statechart and treated as `false`.
pub type Guard<A> = Arc<dyn Fn(&A, Option<&Context>) -> bool + Send + Sync>;

/// A transition action: `(agent, context) -> ()`. Panics are caught and
/// swallowed; the transition still fires.
pub type Action<A> = Arc<dyn Fn(&A, Option<&Context>) + Send + Sync>;

/// Defines a state transition with an optional guard and action.
///
/// Immutable once constructed. `guard`/`action` default to `None`, in
/// which case the transition always fires and performs no side effect.
#[derive(Clone)]
pub struct Transition<A> {
    pub trigger: String,
    pub source: AgentState,
    pub target: AgentState,
    pub guard: Option<Guard<A>>,
    pub action: Option<Action<A>>,
}

impl<A> std::fmt::Debug for Transition<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("trigger", &self.trigger)
            .field("source", &self.source)
            .field("target", &self.target)
            .field("guard", &self.guard.is_some())
            .field("action", &self.action.is_some())
            .finish()
    }
}

impl<A> Transition<A> {
    pub fn new(trigger: impl Into<String>, source: AgentState, target: AgentState) -> Self {
        Self {
            trigger: trigger.into(),
            source,
            target,
            guard: None,
            action: None,
        }
    }

    pub fn with_guard(mut self, guard: Guard<A>) -> Self {
        self.guard = Some(guard);
        self
    }

    pub fn with_action(mut self, action: Action<A>) -> Self {
        self.action = Some(action);
        self
    }
}

/// Records a single historical state transition for an agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateTransition {
    pub from_state: AgentState,
    pub to_state: AgentState,
    pub trigger: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
}
