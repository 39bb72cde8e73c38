//! `prism`: a thin driver over the simulation engine. It wires a config
//! file, a seed corpus, and a vector store into a [`prism_sim::RoundController`]
//! run; the engine itself never depends on this binary.

mod seed;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prism_agents::Agent;
use prism_checkpoint::Checkpointer;
use prism_config::{LoggingConfig, PrismConfig};
use prism_core::create_social_media_statechart;
use prism_feed::{FeedRetriever, InMemoryVectorStore, VectorStore};
use prism_llm::{OllamaChatModel, Reasoner};
use prism_sim::executors::{FeedRetrievalExecutor, LoggingExecutor};
use prism_sim::{RoundController, SimulationState};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "prism")]
#[command(about = "Run and resume PRISM social-media agent simulations", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a fresh simulation from a seed corpus.
    Run {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        seed_posts: Option<PathBuf>,
        #[arg(long)]
        seed_agents: Option<PathBuf>,
    },
    /// Resume a simulation from a checkpoint file.
    Resume {
        #[arg(long)]
        checkpoint: PathBuf,
        #[arg(long)]
        config: PathBuf,
    },
    /// Load and validate a config file without running anything.
    ValidateConfig {
        #[arg(long)]
        config: PathBuf,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_new(&logging.level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).with_ansi(false);

    if !logging.timestamps {
        let builder = builder.without_time();
        if logging.format == "json" {
            builder.json().init();
        } else {
            builder.init();
        }
    } else if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_reasoner(config: &PrismConfig) -> Option<Reasoner> {
    if !config.simulation.reasoner_enabled {
        return None;
    }
    let client = OllamaChatModel::new(config.llm.host.clone(), config.llm.model_id.clone(), config.rag.ollama_timeout_secs);
    Some(Reasoner::new(Box::new(client)))
}

async fn build_feed_executor(config: &PrismConfig, seed_posts: &[prism_feed::Post]) -> Result<FeedRetrievalExecutor> {
    let store: Arc<dyn VectorStore> = Arc::new(InMemoryVectorStore::new());
    if !seed_posts.is_empty() {
        store.upsert(seed_posts).await.context("failed to index seed posts")?;
    }
    let retriever = Arc::new(
        FeedRetriever::new(store, config.rag.feed_size, config.rag.ranking.clone())
            .context("invalid ranking configuration")?,
    );
    Ok(FeedRetrievalExecutor::new(retriever, None))
}

async fn run(config_path: PathBuf, seed_posts: Option<PathBuf>, seed_agents: Option<PathBuf>) -> Result<()> {
    let config = prism_config::load_config_or_default(Some(&config_path))?;
    init_tracing(&config.logging);
    config.simulation.validate().context("invalid simulation configuration")?;

    let posts = match &seed_posts {
        Some(path) => seed::load_posts(path)?,
        None => Vec::new(),
    };
    let agents = match &seed_agents {
        Some(path) => seed::load_agents(path)?,
        None => vec![Agent::new("agent-1", "Seed Agent", vec!["general".to_string()])],
    };

    info!(agents = agents.len(), posts = posts.len(), "starting simulation");

    let statechart = create_social_media_statechart::<Agent>();
    let mut state = SimulationState::new(agents, statechart)?;
    let feed_executor = build_feed_executor(&config, &posts).await?;
    // Seed posts are indexed in the feed's vector store above; they also
    // belong in `state.posts` so likes/replies/reshares on them can
    // resolve. Assigned directly rather than via `add_post`, which would
    // wrongly count them as posts created during the run.
    state.posts = posts;
    let reasoner = build_reasoner(&config);
    let logging = if config.simulation.log_decisions {
        Some(LoggingExecutor::new(config.simulation.log_file.clone())?)
    } else {
        None
    };

    let mut controller = RoundController::new();
    let result = controller
        .run_simulation(&config.simulation, &mut state, &feed_executor, reasoner.as_ref(), logging)
        .await?;

    println!("Ran {} rounds.", result.total_rounds);
    println!(
        "Final metrics: {} likes, {} reshares, {} replies, {} posts created",
        result.final_metrics.total_likes,
        result.final_metrics.total_reshares,
        result.final_metrics.total_replies,
        result.final_metrics.posts_created
    );

    Ok(())
}

async fn resume(checkpoint_path: PathBuf, config_path: PathBuf) -> Result<()> {
    let config = prism_config::load_config_or_default(Some(&config_path))?;
    init_tracing(&config.logging);
    config.simulation.validate().context("invalid simulation configuration")?;

    let checkpoint_dir = checkpoint_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("checkpoint path {} has no parent directory", checkpoint_path.display()))?;
    let checkpoint_data = Checkpointer::new(checkpoint_dir)?.load(&checkpoint_path)?;

    info!(round = checkpoint_data.round_number, "resuming from checkpoint");

    let statechart = create_social_media_statechart::<Agent>();
    let feed_executor = build_feed_executor(&config, &checkpoint_data.posts).await?;
    let reasoner = build_reasoner(&config);
    let logging = if config.simulation.log_decisions {
        Some(LoggingExecutor::new(config.simulation.log_file.clone())?)
    } else {
        None
    };

    let mut controller = RoundController::new();
    let result = controller
        .resume_from_checkpoint(&checkpoint_path, &config.simulation, statechart, &feed_executor, reasoner.as_ref(), logging)
        .await?;

    println!("Ran {} additional rounds.", result.total_rounds);
    println!(
        "Final metrics: {} likes, {} reshares, {} replies, {} posts created",
        result.final_metrics.total_likes,
        result.final_metrics.total_reshares,
        result.final_metrics.total_replies,
        result.final_metrics.posts_created
    );

    Ok(())
}

fn validate_config(config_path: PathBuf) -> Result<()> {
    // `load_config` already range-checks `llm`/`rag.feed_size` and errors
    // out rather than silently clamping; these cover the remaining
    // sub-configs it doesn't own.
    let config = prism_config::load_config(&config_path)?;
    config.simulation.validate().context("invalid simulation configuration")?;
    config.rag.ranking.validate().context("invalid ranking configuration")?;

    println!("Configuration at {} is valid.", config_path.display());
    println!("  llm.provider = {}", config.llm.provider);
    println!("  llm.model_id = {}", config.llm.model_id);
    println!("  rag.ranking.mode = {:?}", config.rag.ranking.mode);
    println!("  simulation.max_rounds = {}", config.simulation.max_rounds);
    println!("  simulation.checkpoint_frequency = {}", config.simulation.checkpoint_frequency);
    println!("  logging.level = {}", config.logging.level);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, seed_posts, seed_agents } => run(config, seed_posts, seed_agents).await,
        Commands::Resume { checkpoint, config } => resume(checkpoint, config).await,
        Commands::ValidateConfig { config } => validate_config(config),
    }
}
