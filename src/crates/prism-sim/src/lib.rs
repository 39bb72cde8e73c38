//! Round loop, executor pipeline, and cumulative state for PRISM
//! simulations. Wires `prism-core`'s statechart, `prism-agents`' agents,
//! `prism-feed`'s retriever, `prism-llm`'s reasoner, and
//! `prism-checkpoint`'s persistence into a runnable round-by-round loop.

pub mod config;
pub mod error;
pub mod executors;
pub mod results;
pub mod round_controller;
pub mod state;

pub use config::{SimulationConfig, SimulationConfigError};
pub use error::{Result, SimError};
pub use executors::{AgentDecisionExecutor, AgentRoundExecutor, FeedRetrievalExecutor, LoggingExecutor, StateUpdateExecutor};
pub use results::{ActionResult, DecisionResult, RoundResult, SimulationResult};
pub use round_controller::RoundController;
pub use state::{EngagementMetrics, SimulationState};
