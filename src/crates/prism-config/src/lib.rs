//! Root TOML configuration schema and loader for PRISM. Aggregates the
//! LLM connection, feed/ranking, simulation-loop, and logging settings
//! each other crate defines or consumes.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, Result};
pub use loader::{load_config, load_config_or_default};
pub use schema::{LlmConfig, LoggingConfig, PrismConfig, RagConfig};
