//! euro-rates CLI - inspect, smooth and slice the EUR/USD reference rate history
//!
//! ## Example Usage
//!
//! ```bash
//! # Look at the raw table before cleaning
//! euro-rates inspect euro-daily-hist_1999_2022.csv
//!
//! # Clean, add the 30-day rolling mean and export for charting
//! euro-rates process euro-daily-hist_1999_2022.csv --output rates.csv
//!
//! # Compare the configured periods (recession, pandemic, ...)
//! euro-rates periods euro-daily-hist_1999_2022.csv
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use euro_rates::config::AnalysisConfig;
use euro_rates::export;
use euro_rates::prelude::*;
use std::path::{Path, PathBuf};
use std::process;

const MAX_LISTED_REJECTIONS: usize = 5;

/// euro-rates: EUR/USD reference rate analysis
#[derive(Parser)]
#[command(name = "euro-rates")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clean, smooth and slice the EUR/USD reference rate history", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the head and tail of the raw table, price value counts and a summary
    ///
    /// Always parses leniently so a malformed file can still be inspected;
    /// the `strict` setting does not apply here.
    Inspect {
        /// Source CSV (defaults to `data_path` from config)
        #[arg(value_name = "CSV")]
        csv: Option<PathBuf>,

        /// Rows to show at each end
        #[arg(short = 'n', long, default_value = "5")]
        rows: usize,
    },

    /// Clean the series, add the rolling mean and export it
    Process {
        #[arg(value_name = "CSV")]
        csv: Option<PathBuf>,

        /// Rolling window in observations
        #[arg(short = 'w', long)]
        window: Option<usize>,

        /// Skip unparseable rows instead of failing
        #[arg(short = 'l', long)]
        lenient: bool,

        /// Output file (.csv or .json); prints a table when omitted
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Summarize each configured period
    Periods {
        #[arg(value_name = "CSV")]
        csv: Option<PathBuf>,

        #[arg(short = 'w', long)]
        window: Option<usize>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = AnalysisConfig::load(cli.config.as_deref())
        .context("Failed to load configuration")
        .and_then(|config| run(cli.command, cli.verbose, config));

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(command: Commands, verbose: bool, mut config: AnalysisConfig) -> Result<()> {
    if verbose {
        println!(
            "{} v{}",
            "euro-rates".cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
    }

    match command {
        Commands::Inspect { csv, rows } => inspect(&source_path(csv, &config)?, rows, &config),
        Commands::Process {
            csv,
            window,
            lenient,
            output,
        } => {
            if let Some(window) = window {
                config.window = window;
            }
            if lenient {
                config.strict = false;
            }
            config.validate()?;
            process_series(&source_path(csv, &config)?, output.as_deref(), verbose, &config)
        }
        Commands::Periods { csv, window } => {
            if let Some(window) = window {
                config.window = window;
            }
            config.validate()?;
            show_periods(&source_path(csv, &config)?, &config)
        }
    }
}

fn source_path(csv: Option<PathBuf>, config: &AnalysisConfig) -> Result<PathBuf> {
    match csv.or_else(|| config.data_path.clone()) {
        Some(path) => Ok(path),
        None => bail!("No input file given and no data_path configured"),
    }
}

fn load_rows(path: &Path, config: &AnalysisConfig) -> Result<Vec<RawRecord>> {
    config
        .loader()
        .load_path(path)
        .with_context(|| format!("Failed to load {}", path.display()))
}

fn inspect(path: &Path, n: usize, config: &AnalysisConfig) -> Result<()> {
    let rows = load_rows(path, config)?;

    println!("{} ({} rows)", "Raw table".green().bold(), rows.len());
    print_raw(rows.iter().take(n));
    if rows.len() > n {
        println!("  {}", "...".dimmed());
        print_raw(rows.iter().skip(rows.len().saturating_sub(n).max(n)));
    }
    println!();

    println!("{}", "Price value counts".green().bold());
    for (value, count) in value_counts(&rows).into_iter().take(10) {
        let value = if value == SENTINEL {
            value.yellow().to_string()
        } else {
            value
        };
        println!("  {:<12} {}", value, count);
    }
    println!();

    let report = RateSeriesProcessor::lenient().parse_with_report(&rows)?;
    println!("{}", "Cleaned series".green().bold());
    println!("  Missing ({}):  {}", SENTINEL, report.missing);
    println!("  Unparseable:  {}", report.rejected.len());
    for line in rejection_lines(&report.rejected, MAX_LISTED_REJECTIONS) {
        println!("    {}", line.red());
    }

    let series = RateSeriesProcessor::with_rolling_mean(report.records, config.window)?;
    match SeriesSummary::from_series(&series) {
        Some(summary) => print_summary(&summary),
        None => println!("  {}", "no observations".yellow()),
    }

    Ok(())
}

fn process_series(
    path: &Path,
    output: Option<&Path>,
    verbose: bool,
    config: &AnalysisConfig,
) -> Result<()> {
    let rows = load_rows(path, config)?;
    let report = config.processor().parse_with_report(&rows)?;
    report_rejections(&report.rejected);

    if verbose {
        println!("  {} {}", "Rows:".bold(), rows.len());
        println!("  {} {}", "Missing:".bold(), report.missing);
        println!("  {} {}", "Rejected:".bold(), report.rejected.len());
        println!("  {} {}", "Window:".bold(), config.window);
    }

    let series = RateSeriesProcessor::with_rolling_mean(report.records, config.window)?;

    match output {
        Some(output) => {
            export::write_file(&series, output)?;
            println!(
                "{} {} records to {}",
                "Wrote".green().bold(),
                series.len(),
                output.display()
            );
        }
        None => {
            println!("{:<12} {:>8} {:>14}", "date", "rate", "rolling_mean");
            println!("{:-<36}", "");
            for record in &series {
                let mean = record
                    .rolling_mean
                    .map(|m| format!("{:.4}", m))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:<12} {:>8.4} {:>14}",
                    record.timestamp.to_string(),
                    record.rate,
                    mean
                );
            }
        }
    }

    Ok(())
}

fn show_periods(path: &Path, config: &AnalysisConfig) -> Result<()> {
    let rows = load_rows(path, config)?;
    let report = config.processor().parse_with_report(&rows)?;
    report_rejections(&report.rejected);
    let series = RateSeriesProcessor::with_rolling_mean(report.records, config.window)?;

    println!(
        "{:<14} {:<11} {:>6} {:>8} {:>8} {:>8} {:>10}",
        "period", "years", "obs", "min", "max", "mean", "last avg"
    );
    println!("{:-<71}", "");

    for (name, range) in &config.periods {
        let period = PeriodSummary::compute(name.clone(), *range, &series);
        match period.summary {
            Some(s) => println!(
                "{:<14} {:<11} {:>6} {:>8.4} {:>8.4} {:>8.4} {:>10}",
                period.name.cyan(),
                period.range.to_string(),
                s.count,
                s.min,
                s.max,
                s.mean,
                s.last_rolling_mean
                    .map(|m| format!("{:.4}", m))
                    .unwrap_or_else(|| "-".to_string())
            ),
            None => println!(
                "{:<14} {:<11} {:>6}",
                period.name.cyan(),
                period.range.to_string(),
                "none".yellow()
            ),
        }
    }

    Ok(())
}

/// One line per rejected row up to `limit`, then a count of the rest
fn rejection_lines(rejected: &[ParseError], limit: usize) -> Vec<String> {
    let mut lines: Vec<String> = rejected
        .iter()
        .take(limit)
        .map(|e| format!("Skipped {}", e))
        .collect();
    if rejected.len() > limit {
        lines.push(format!("... and {} more", rejected.len() - limit));
    }
    lines
}

fn report_rejections(rejected: &[ParseError]) {
    if rejected.is_empty() {
        return;
    }
    eprintln!(
        "{} {} unparseable row(s) skipped",
        "Warning:".yellow().bold(),
        rejected.len()
    );
    for line in rejection_lines(rejected, MAX_LISTED_REJECTIONS) {
        eprintln!("  {}", line.red());
    }
}

fn print_raw<'a>(rows: impl Iterator<Item = &'a RawRecord>) {
    for row in rows {
        println!("  {:<12} {}", row.label, row.price);
    }
}

fn print_summary(summary: &SeriesSummary) {
    println!("  Observations: {}", summary.count);
    println!("  From:         {}", summary.start);
    println!("  To:           {}", summary.end);
    println!("  Min:          {:.4}", summary.min);
    println!("  Max:          {:.4}", summary.max);
    println!("  Mean:         {:.4}", summary.mean);
    if let Some(std_dev) = summary.std_dev {
        println!("  Std dev:      {:.4}", std_dev);
    }
    if let Some(mean) = summary.last_rolling_mean {
        println!("  Last rolling: {}", format!("{:.4}", mean).cyan());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = vec!["euro-rates", "inspect", "rates.csv"];
        let _cli = Cli::try_parse_from(args).unwrap();
    }

    #[test]
    fn test_process_command() {
        let args = vec![
            "euro-rates",
            "process",
            "rates.csv",
            "--window",
            "10",
            "--lenient",
            "--output",
            "out.json",
        ];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Process {
                window, lenient, ..
            } => {
                assert_eq!(window, Some(10));
                assert!(lenient);
            }
            _ => panic!("expected process command"),
        }
    }

    #[test]
    fn test_periods_command_with_config() {
        let args = vec!["euro-rates", "--config", "euro.toml", "periods"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("euro.toml")));
    }

    #[test]
    fn test_rejection_lines_name_row_and_label() {
        let rows = vec![
            RawRecord::new("1999-01-04", "1.1789"),
            RawRecord::new("1999-01-05", "N/A"),
            RawRecord::new("1999-01-06", "1.1790"),
        ];
        let report = RateSeriesProcessor::lenient()
            .parse_with_report(&rows)
            .unwrap();

        let lines = rejection_lines(&report.rejected, MAX_LISTED_REJECTIONS);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("row 2"));
        assert!(lines[0].contains("1999-01-05"));
        assert!(lines[0].contains("N/A"));
    }

    #[test]
    fn test_rejection_lines_truncate_with_count() {
        let rejected: Vec<ParseError> = (1..=8)
            .map(|row| ParseError::InvalidRate {
                row,
                label: format!("2020-03-{:02}", row),
                value: "n.a.".to_string(),
            })
            .collect();

        let lines = rejection_lines(&rejected, 5);
        assert_eq!(lines.len(), 6);
        assert!(lines[4].contains("row 5"));
        assert_eq!(lines[5], "... and 3 more");

        assert!(rejection_lines(&[], 5).is_empty());
    }

    #[test]
    fn test_source_path_requires_input() {
        let config = AnalysisConfig::default();
        assert!(source_path(None, &config).is_err());
        assert_eq!(
            source_path(Some(PathBuf::from("a.csv")), &config).unwrap(),
            PathBuf::from("a.csv")
        );
    }
}
