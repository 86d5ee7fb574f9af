//! Kindred - swipe deck and auto-saving profile editor
//!
//! Runs a scripted demo session against the configured backends (in-memory
//! when none are configured).

use anyhow::Context;
use kindred_app::utils::logging::init_logging;
use kindred_app::{demo, AppContext};
use kindred_infra::config;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load().context("failed to load configuration")?;
    init_logging(&config.logging).context("failed to initialise logging")?;

    let ctx = AppContext::new_with_config(config).await.context("failed to build application context")?;
    let summary = demo::run(&ctx).await.context("demo session failed")?;

    info!(
        load = ?summary.load,
        liked = summary.decisions.iter().filter(|d| d.direction.is_like()).count(),
        passed = summary.decisions.iter().filter(|d| !d.direction.is_like()).count(),
        remaining = summary.remaining,
        saved = summary.saved,
        name = %summary.profile.name,
        "demo complete"
    );

    ctx.shutdown().await.context("shutdown failed")?;
    Ok(())
}
