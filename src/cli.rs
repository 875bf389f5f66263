use crate::config::AppConfig;
use crate::criteria::CriteriaMap;
use crate::models::SummaryRow;
use crate::scoring::{Diagnostics, ScoringEngine};
use crate::storage::{read_table, write_detailed, write_summary};
use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vendor-scorer")]
#[command(about = "Weighted vendor functionality scoring (Rust)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score the vendor matrix against a criteria file.
    Score(ScoreCmd),
    #[command(subcommand)]
    Settings(SettingsCmd),
}

#[derive(Parser, Debug)]
pub struct ScoreCmd {
    /// Vendor response matrix CSV; defaults to the configured path.
    #[arg(long)]
    pub vendors: Option<PathBuf>,
    /// Criteria CSV; prompted for interactively when omitted.
    #[arg(long)]
    pub criteria: Option<PathBuf>,
    #[arg(long)]
    pub summary_out: Option<PathBuf>,
    #[arg(long)]
    pub detailed_out: Option<PathBuf>,
    /// How many vendors the closing report lists.
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCmd {
    Show,
}

pub fn run(cli: Cli, cfg: &AppConfig) -> Result<()> {
    match cli.command {
        Commands::Score(score_cmd) => handle_score(score_cmd, cfg),
        Commands::Settings(settings_cmd) => handle_settings(settings_cmd, cfg),
    }
}

fn handle_score(cmd: ScoreCmd, cfg: &AppConfig) -> Result<()> {
    println!("\n=== Vendor Functionality Scoring Tool ===");

    let vendors_path = cmd
        .vendors
        .unwrap_or_else(|| cfg.settings.paths.vendors_csv.clone());
    let criteria_path = match cmd.criteria {
        Some(path) => path,
        None => prompt_for_criteria()?,
    };
    if !criteria_path.exists() {
        bail!("File not found: {}", criteria_path.display());
    }

    println!("Loading vendor file: {}", vendors_path.display());
    let vendor_table = read_table(&vendors_path)?;
    let criteria_table = read_table(&criteria_path)?;
    let criteria = CriteriaMap::from_table(&criteria_table)?;
    println!(
        "Loaded {} vendors against {} criteria functions.",
        vendor_table.row_count(),
        criteria.function_count()
    );

    let engine = ScoringEngine::new(&cfg.scoring, &criteria);
    let output = engine.score_table(&vendor_table)?;

    let summary_path = cmd
        .summary_out
        .unwrap_or_else(|| cfg.settings.paths.summary_csv.clone());
    let detailed_path = cmd
        .detailed_out
        .unwrap_or_else(|| cfg.settings.paths.detailed_csv.clone());
    write_summary(&summary_path, &output.summaries)?;
    write_detailed(&detailed_path, &output.details)?;

    println!("\nScoring complete.");
    println!("Summary saved to: {}", summary_path.display());
    println!("Detailed results saved to: {}", detailed_path.display());

    let top = cmd.top.unwrap_or(cfg.settings.report.top_vendors);
    print_top_vendors(&output.summaries, top, cfg.scoring.meets_threshold);
    print_diagnostics(&output.diagnostics);
    Ok(())
}

fn prompt_for_criteria() -> Result<PathBuf> {
    print!("\nEnter path to new system criteria CSV: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read criteria path")?;
    Ok(PathBuf::from(line.trim()))
}

fn print_top_vendors(summaries: &[SummaryRow], top: usize, threshold: f64) {
    if summaries.is_empty() {
        println!("\nNo vendors found.");
        return;
    }
    println!("\nTop Vendors by Total Score:");
    let mut ranked: Vec<&SummaryRow> = summaries.iter().collect();
    // Stable sort keeps input order for tied totals.
    ranked.sort_by(|a, b| b.total_pct.total_cmp(&a.total_pct));
    for summary in ranked.iter().take(top) {
        let mut pct_str = format!("{:.2}", summary.total_pct);
        if summary.total_pct >= threshold {
            pct_str = pct_str.green().to_string();
        } else if summary.total_pct < 50.0 {
            pct_str = pct_str.red().to_string();
        }
        println!("{} | {}%", summary.vendor, pct_str);
    }
}

fn print_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.is_clean() {
        return;
    }
    if diagnostics.unmatched_functions > 0 {
        println!(
            "Note: {} vendor column(s) had no criteria entry and were skipped.",
            diagnostics.unmatched_functions
        );
    }
    if diagnostics.unrecognized_levels > 0 {
        println!(
            "Note: {} vendor column(s) carried an unrecognized requirement level and were skipped.",
            diagnostics.unrecognized_levels
        );
    }
    if diagnostics.unrecognized_responses > 0 {
        println!(
            "Note: {} response(s) were not yes/no/not provided and scored 0.",
            diagnostics.unrecognized_responses
        );
    }
}

fn handle_settings(cmd: SettingsCmd, cfg: &AppConfig) -> Result<()> {
    match cmd {
        SettingsCmd::Show => {
            println!("Config directory: {}", cfg.base_dir.display());
            println!("Vendors CSV: {}", cfg.settings.paths.vendors_csv.display());
            println!("Summary CSV: {}", cfg.settings.paths.summary_csv.display());
            println!(
                "Detailed CSV: {}",
                cfg.settings.paths.detailed_csv.display()
            );
            println!("Top vendors reported: {}", cfg.settings.report.top_vendors);
            println!("Meets threshold: {}%", cfg.scoring.meets_threshold);
        }
    }
    Ok(())
}
