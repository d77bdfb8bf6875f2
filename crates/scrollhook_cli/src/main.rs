//! Scrollhook CLI
//!
//! Run and check scroll hook scenarios against the headless host.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scenario;

use scenario::{Scenario, StepReport};

#[derive(Parser)]
#[command(name = "scrollhook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scroll-triggered class transitions, simulated", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario and print class lists after each step
    Run {
        /// Scenario file (TOML)
        scenario: PathBuf,

        /// Only print the final state
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate a scenario without running it
    Check {
        /// Scenario file (TOML)
        scenario: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Run { scenario, quiet } => cmd_run(&scenario, quiet),
        Commands::Check { scenario } => cmd_check(&scenario),
    }
}

fn cmd_run(path: &Path, quiet: bool) -> Result<()> {
    let scenario = Scenario::load(path)?;
    info!(
        "Running {} ({} elements, {} hooks, {} steps)",
        path.display(),
        scenario.elements.len(),
        scenario.hooks.len(),
        scenario.steps.len()
    );

    let reports = scenario.run()?;
    let shown: &[StepReport] = if quiet {
        reports.last().map(std::slice::from_ref).unwrap_or(&[])
    } else {
        &reports
    };

    for (index, report) in shown.iter().enumerate() {
        let number = if quiet { reports.len() } else { index + 1 };
        print_report(number, report);
    }

    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;

    if scenario.steps.is_empty() {
        info!("{} has no steps", path.display());
    }
    info!("{} is valid", path.display());
    Ok(())
}

fn print_report(number: usize, report: &StepReport) {
    println!(
        "[{number}] {} (t={}ms, bottom={}, pending={:?}{})",
        report.step,
        report.at.as_millis(),
        report.view_bottom,
        report.pending,
        if report.listening { "" } else { ", idle" }
    );

    for element in &report.elements {
        println!(
            "    {:<16} @{:<6} {}",
            element.id,
            element.offset_top,
            element.classes.join(" ")
        );
    }
}
