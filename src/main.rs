//! survivor-backtest - Main Entry Point
//!
//! Runs the Survivor options-selling strategy over a synthetic price series
//! and prints a performance report.

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use std::path::Path;

use survivor_backtest::{
    generate_random_walk, load_config, run_backtest, summarize, BacktestConfig, DataConfig,
    SimBroker, SurvivorConfig, SurvivorStrategy,
};

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Override the RNG seed for the synthetic price feed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of years of synthetic history
    #[arg(long)]
    years: Option<u32>,

    /// Emit the summary as JSON instead of a text report
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting survivor-backtest");
    info!("Configuration file: {}", args.config);

    let mut config = if Path::new(&args.config).exists() {
        load_config(Some(&args.config))?
    } else {
        info!("config file not found, using NIFTY defaults");
        BacktestConfig {
            initial_capital: rust_decimal_macros::dec!(100000),
            data: DataConfig::default(),
            strategy: SurvivorConfig::nifty_defaults(),
        }
    };
    if let Some(seed) = args.seed {
        config.data.seed = seed;
    }
    if let Some(years) = args.years {
        config.data.years = years;
    }

    let feed = generate_random_walk(&config.data);
    info!(ticks = feed.len(), "generated synthetic price feed");

    let mut broker = SimBroker::new(config.initial_capital);
    let mut strategy = SurvivorStrategy::new(config.strategy.clone())?;

    let run = run_backtest(feed, &mut strategy, &mut broker);

    if !run.tick_errors.is_empty() {
        warn!(
            count = run.tick_errors.len(),
            "some ticks were skipped or had their decisions dropped"
        );
    }
    info!(
        fills = broker.fills().len(),
        rejected = broker.rejected().len(),
        "simulation finished"
    );

    match summarize(&run.history, config.initial_capital) {
        Ok(summary) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary.render_text());
            }
        }
        Err(e) => {
            // an empty feed is reported as "no data", not as a 0% return
            warn!(error = %e, "no trading history to report");
            println!("No trading history to generate a report.");
        }
    }

    Ok(())
}
