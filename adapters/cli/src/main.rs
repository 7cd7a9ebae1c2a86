#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a match against the engine over stdio.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use harvest_bot_core::{ItemType, UpgradeType};
use harvest_bot_system_decision::{Chaser, Farmer, Policy, Rules};
use harvest_bot_transport::LineTransport;
use tracing_subscriber::EnvFilter;

mod session;

/// Policies selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyKind {
    /// Buy, plant, wait, harvest.
    Farmer,
    /// Follow the opponent and harvest on the way.
    Chaser,
}

/// Turn-based farming bot speaking the engine's line protocol on stdio.
#[derive(Debug, Parser)]
#[command(name = "harvest-bot", version)]
struct Args {
    /// Item carried into the match.
    #[arg(long, default_value = "coffee-thermos")]
    item: ItemType,
    /// Passive upgrade selected for the match.
    #[arg(long, default_value = "longer-legs")]
    upgrade: UpgradeType,
    /// Decision policy to play with.
    #[arg(long, value_enum, default_value_t = PolicyKind::Farmer)]
    policy: PolicyKind,
    /// TOML file overriding individual farming rules.
    #[arg(long)]
    rules: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, default_value = "info")]
    log_filter: String,
}

/// Entry point for the harvest bot.
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_filter)?;

    let mut policy: Box<dyn Policy> = match args.policy {
        PolicyKind::Farmer => Box::new(Farmer::new(load_rules(args.rules.as_deref())?)),
        PolicyKind::Chaser => Box::new(Chaser::new(args.item)),
    };

    let mut transport = LineTransport::stdio();
    session::run(&mut transport, policy.as_mut(), args.item, args.upgrade)
}

fn init_logging(fallback: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(fallback)
            .with_context(|| format!("invalid log filter `{fallback}`"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_rules(path: Option<&Path>) -> Result<Rules> {
    let Some(path) = path else {
        return Ok(Rules::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse rules file at {}", path.display()))
}
