//! Taqvim CLI
//!
//! Jalali conversions and a scripted run of the scroll picker.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use taqvim_calendar::{
    days_in_year, is_leap_year, month_name, month_name_latin, to_gregorian, to_jalali_display,
    to_jalali_string, JalaliDate, MAX_YEAR, MIN_YEAR,
};
use taqvim_picker::JalaliPicker;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod simulate;

use config::TaqvimConfig;
use simulate::{parse_script, Simulation};

#[derive(Parser)]
#[command(name = "taqvim")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Jalali calendar and scroll picker tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./taqvim.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a date between the Jalali and Gregorian calendars
    Convert {
        /// Date as YYYY-MM-DD (Jalali unless --gregorian)
        date: String,

        /// Treat the input as a Gregorian date
        #[arg(short, long)]
        gregorian: bool,
    },

    /// Show month lengths and leap information for a Jalali year
    Month {
        /// Jalali year
        year: i32,
    },

    /// Show today's date in both calendars
    Today,

    /// Run a gesture script against a picker and print notifications as JSON
    Simulate {
        /// Steps separated by ';' (e.g. "drag day 90; wait 300; select month 11")
        script: Option<String>,

        /// Frame length in milliseconds
        #[arg(short, long)]
        frame_ms: Option<u64>,
    },

    /// Print the effective configuration
    Config,
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
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Convert { date, gregorian } => cmd_convert(&date, gregorian),

        Commands::Month { year } => cmd_month(year),

        Commands::Today => cmd_today(),

        Commands::Simulate { script, frame_ms } => {
            cmd_simulate(cli.config, script.as_deref(), frame_ms)
        }

        Commands::Config => cmd_config(cli.config),
    }
}

fn load_config(explicit: Option<PathBuf>) -> Result<TaqvimConfig> {
    let cwd = std::env::current_dir()?;
    TaqvimConfig::load(explicit.as_deref(), &cwd)
}

fn print_date(date: &JalaliDate) {
    println!("Jalali:    {}", to_jalali_string(date));
    println!("Gregorian: {}", to_gregorian(date));
    println!("Display:   {}", to_jalali_display(date));
}

fn cmd_convert(input: &str, gregorian: bool) -> Result<()> {
    let date = if gregorian {
        let parsed = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid Gregorian date '{}'", input))?;
        JalaliDate::from_gregorian(parsed)
            .with_context(|| format!("No Jalali equivalent for {}", parsed))?
    } else {
        input
            .parse::<JalaliDate>()
            .with_context(|| format!("Invalid Jalali date '{}'", input))?
    };

    print_date(&date);
    Ok(())
}

fn cmd_month(year: i32) -> Result<()> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        anyhow::bail!(
            "Year {} is outside the supported range {}..={}",
            year,
            MIN_YEAR,
            MAX_YEAR
        );
    }

    println!(
        "{} ({} days, {})",
        year,
        days_in_year(year),
        if is_leap_year(year) { "leap" } else { "common" }
    );
    println!();
    for month in 1..=12u8 {
        println!(
            "{:>2}  {:<12} {:<10} {}",
            month,
            month_name_latin(month),
            month_name(month),
            taqvim_calendar::days_in_month(year, month)
        );
    }

    Ok(())
}

fn cmd_today() -> Result<()> {
    print_date(&JalaliDate::today());
    Ok(())
}

fn cmd_simulate(
    config_path: Option<PathBuf>,
    script: Option<&str>,
    frame_ms: Option<u64>,
) -> Result<()> {
    let config = load_config(config_path)?;

    let script = script
        .map(str::to_string)
        .or(config.simulate.script)
        .context("No script given on the command line or in [simulate]")?;
    let steps = parse_script(&script)?;
    let frame = Duration::from_millis(frame_ms.unwrap_or(config.simulate.frame_ms));

    let picker: JalaliPicker = JalaliPicker::new(config.picker);
    info!("Simulating {} steps from {}", steps.len(), picker.date());

    let (picker, changes) = Simulation::new(picker, frame).run(&steps);
    for change in &changes {
        println!("{}", serde_json::to_string(change)?);
    }

    info!(
        "{} notification(s), final date {}",
        changes.len(),
        picker.date()
    );
    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;
    print!("{}", config.to_toml()?);

    let resolved = config.picker.resolve(JalaliDate::today());
    info!(
        "Years {}..={}, {} rows of {}px, starting at {}",
        resolved.min_year,
        resolved.max_year,
        resolved.geometry.visible_rows,
        resolved.geometry.item_height,
        resolved.initial
    );
    Ok(())
}
