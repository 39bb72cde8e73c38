//! Guarded statechart engine driving PRISM agent behaviour.
//!
//! This crate owns the behavioural vocabulary shared by the rest of the
//! workspace: the closed [`AgentState`] enum, the [`Transition`]/
//! [`StateTransition`] records, the [`Statechart`] engine that resolves
//! triggers to target states, and the factory that assembles the standard
//! social-media behaviour chart.
//!
//! The statechart is generic over the agent type `A` it is fired against
//! so that guards and actions can close over concrete agent state without
//! this crate depending on `prism-agents`.

pub mod error;
pub mod factory;
pub mod queries;
pub mod states;
pub mod statechart;
pub mod transitions;

pub use error::{Result, StatechartError};
pub use factory::create_social_media_statechart;
pub use states::AgentState;
pub use statechart::Statechart;
pub use transitions::{Action, Context, Guard, StateTransition, Transition};
