//! Command-line front end that prices a vehicle's passages for one day.

mod input;

use std::io::{self, Write};

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use tollgate_calendar_sweden as sweden;
use tollgate_core::{config::TollConfig, model::Fee, service::TollCalculator};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::input::Args;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    // Configuration + service setup
    let config = match &args.config {
        Some(path) => {
            let config = TollConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!(path = %path.display(), "configuration loaded");
            config
        }
        None => TollConfig::default(),
    };

    let plugins = vec![sweden::plugin()?];
    let calculator = TollCalculator::from_config(config, plugins);

    let passages = args.passages()?;
    let fee = calculator.get_toll_fee(&args.vehicle, &passages)?;

    report(&calculator, &args, &passages, fee)
}

fn report(
    calculator: &TollCalculator,
    args: &Args,
    passages: &[NaiveDateTime],
    fee: Fee,
) -> Result<()> {
    let mut stdout = io::stdout().lock();

    writeln!(stdout, "Vehicle: {}", args.vehicle)?;
    for passage in passages {
        let note = if calculator.is_toll_free_date(passage.date()) {
            String::from("toll-free date")
        } else {
            format!("band fee {}", calculator.calculate_toll_fee(*passage))
        };
        writeln!(stdout, "  {} {note}", passage.format("%Y-%m-%d %H:%M"))?;
    }
    writeln!(stdout, "Daily fee: {fee}")?;

    Ok(())
}
