//! Calculus Agent - command line entry point.
//!
//! Solves the problem given as the first argument (or a default example)
//! and prints the final answer.

use std::sync::Arc;

use calculus_agent::{
    agent::Agent, config::Config, llm::OpenRouterClient, preferences::PreferencesStore,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PROBLEM: &str = "∫4x^6 - 2x^3 + 7x - 4 dx";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calculus_agent=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.default_model);

    let store = PreferencesStore::load(&config.preferences_path);
    if !store.path().exists() {
        // Persist defaults so they can be edited for the next run.
        store.save()?;
    }
    info!("Solving for {}", store.preferences().name);

    let llm = Arc::new(OpenRouterClient::with_base_url(
        config.api_key.clone(),
        config.base_url.clone(),
        config.llm_timeout,
    ));
    let agent = Agent::new(config, llm, store.preferences().clone());

    let problem = std::env::args()
        .nth(1)
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_PROBLEM.to_string());
    info!("Problem: {}", problem);

    let outcome = agent.solve(&problem).await?;
    info!(
        "Agent completed in {} iterations ({} log entries, {} tokens)",
        outcome.iterations,
        outcome.log.len(),
        outcome.usage.total_tokens
    );
    println!("{}", outcome.answer);

    Ok(())
}
