pub mod decision;
pub mod feed;
pub mod logging;
pub mod round;
pub mod state_update;

pub use decision::AgentDecisionExecutor;
pub use feed::FeedRetrievalExecutor;
pub use logging::LoggingExecutor;
pub use round::AgentRoundExecutor;
pub use state_update::StateUpdateExecutor;
