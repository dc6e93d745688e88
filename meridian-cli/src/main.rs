//! Meridian CLI - editorial risk governance and escalation briefing tool

#![deny(warnings)]

// Global invariants enforced:
// - All scoring is deterministic in the inputs; wall clock and randomness
//   enter only here, at the process boundary
// - History writes are atomic and (year, week) slots are write-once

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use meridian_core::config;
use meridian_core::eri::{self, DevelopmentInput, DimensionScores, GenerationInput};
use meridian_core::policy::{check_safe_mode, mitigation_suggestions};
use meridian_core::trends::analyze_history;
use meridian_core::{
    generate_assessment, generate_weekly_brief, render_brief, BriefInput, ContentItem,
    EriAssessment, HistoryStore, RiskAssessment,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "meridian")]
#[command(about = "Editorial risk governance and escalation briefing tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a content item for legal, defamation, platform, and political risk
    Risk {
        /// Content headline
        #[arg(long)]
        headline: String,

        /// Content summary
        #[arg(long, default_value = "")]
        summary: String,

        /// Comma-separated content tags
        #[arg(long)]
        tags: Option<String>,

        /// Content item identifier
        #[arg(long, default_value = "adhoc")]
        id: String,

        /// Assessor recorded on the assessment (overrides config)
        #[arg(long)]
        assessed_by: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Generate a weekly Escalation Risk Index assessment and record it
    Eri {
        /// ISO week number
        #[arg(long)]
        week: u32,

        /// Year
        #[arg(long)]
        year: i32,

        /// Military dimension score (0-100)
        #[arg(long)]
        military: u32,

        /// Political dimension score (0-100)
        #[arg(long)]
        political: u32,

        /// Proxy dimension score (0-100)
        #[arg(long)]
        proxy: u32,

        /// Economic dimension score (0-100)
        #[arg(long)]
        economic: u32,

        /// Diplomatic dimension score (0-100)
        #[arg(long)]
        diplomatic: u32,

        /// Path to a JSON file with key developments
        #[arg(long)]
        developments: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Generate the weekly intelligence brief from recorded assessments
    Brief {
        /// ISO week number of the recorded assessment (default: latest)
        #[arg(long, requires = "year")]
        week: Option<u32>,

        /// Year of the recorded assessment (default: latest)
        #[arg(long, requires = "week")]
        year: Option<i32>,

        /// Output format (text writes the HTML document and prints a summary)
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Output file path for the HTML document (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Summarize ERI movement across recorded assessments
    Trends {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Validate or show the resolved configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without running anything
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Risk {
            headline,
            summary,
            tags,
            id,
            assessed_by,
            format,
            config: config_path,
        } => {
            let project_root = std::env::current_dir()?;
            let resolved = config::load_and_resolve(&project_root, config_path.as_deref())
                .context("failed to load configuration")?;

            let tags: Vec<String> = tags
                .map(|t| {
                    t.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default();

            let item = ContentItem {
                id,
                headline,
                summary,
                tags,
            };

            let assessed_by = assessed_by.unwrap_or(resolved.assessed_by);
            let mut assessment = generate_assessment(&item, &assessed_by, Utc::now());

            let safe_mode = check_safe_mode(&assessment.factors, resolved.safe_mode);
            if safe_mode.violated {
                assessment.apply_safe_mode(&safe_mode);
            }

            match format {
                OutputFormat::Text => print!("{}", render_risk_text(&assessment)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assessment)?),
            }

            if assessment.safe_mode_blocked {
                std::process::exit(2);
            }
        }
        Commands::Eri {
            week,
            year,
            military,
            political,
            proxy,
            economic,
            diplomatic,
            developments,
            format,
        } => {
            for (name, score) in [
                ("military", military),
                ("political", political),
                ("proxy", proxy),
                ("economic", economic),
                ("diplomatic", diplomatic),
            ] {
                if score > 100 {
                    anyhow::bail!("--{} must be between 0 and 100 (got {})", name, score);
                }
            }

            let key_developments: Vec<DevelopmentInput> = match developments {
                Some(path) => {
                    let json = std::fs::read_to_string(&path).with_context(|| {
                        format!("failed to read developments file: {}", path.display())
                    })?;
                    serde_json::from_str(&json).with_context(|| {
                        format!("failed to parse developments file: {}", path.display())
                    })?
                }
                None => Vec::new(),
            };

            let input = GenerationInput {
                week_number: week,
                year,
                dimension_scores: DimensionScores {
                    military,
                    political,
                    proxy,
                    economic,
                    diplomatic,
                },
                key_developments,
            };

            let assessment = eri::generate_assessment(&input, Utc::now(), &mut rand::thread_rng());

            let store = HistoryStore::open(&std::env::current_dir()?);
            let previous = store.latest()?;
            store.append(&assessment).context("failed to record assessment")?;

            match format {
                OutputFormat::Text => {
                    print!("{}", render_eri_text(&assessment, previous.as_ref()));
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&assessment)?),
            }
        }
        Commands::Brief {
            week,
            year,
            format,
            output,
            config: config_path,
        } => {
            let project_root = std::env::current_dir()?;
            let resolved = config::load_and_resolve(&project_root, config_path.as_deref())
                .context("failed to load configuration")?;

            let store = HistoryStore::open(&project_root);
            let (selected, previous) = match (year, week) {
                (Some(year), Some(week)) => {
                    let selected = store.find(year, week)?.with_context(|| {
                        format!("no recorded assessment for week {} of {}", week, year)
                    })?;
                    (selected, store.before(year, week)?)
                }
                _ => {
                    let latest = store.latest()?.context(
                        "no recorded assessments; run `meridian eri` before generating a brief",
                    )?;
                    (latest, store.previous()?)
                }
            };

            let input = BriefInput {
                week_number: selected.week_number,
                year: selected.year,
                eri_assessment: selected,
                previous_eri: previous,
                custom_developments: Vec::new(),
                version: Some(resolved.brief_version.clone()),
            };
            let brief = generate_weekly_brief(&input, Utc::now());

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&brief)?),
                OutputFormat::Text => {
                    let output_path = output.unwrap_or_else(|| {
                        if resolved.output.is_relative() {
                            project_root.join(&resolved.output)
                        } else {
                            resolved.output.clone()
                        }
                    });
                    let html = render_brief(&brief);
                    meridian_core::history::atomic_write(&output_path, &html)
                        .context("failed to write brief")?;
                    println!(
                        "Brief {} (ERI {} {}) written to {}",
                        brief.id,
                        brief.eri_score,
                        brief.eri_section.classification.as_str(),
                        output_path.display()
                    );
                }
            }
        }
        Commands::Trends { format } => {
            let store = HistoryStore::open(&std::env::current_dir()?);
            let history = store.load()?;
            let stats = analyze_history(&history);

            match format {
                OutputFormat::Text => {
                    println!("Assessments: {}", history.len());
                    println!("Trend:       {}", stats.trend.as_str());
                    println!("Average:     {}", stats.average);
                    println!("Peak:        {}", stats.peak);
                    println!("Low:         {}", stats.low);
                    println!("Volatility:  {}", stats.volatility);
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref());

                match resolved {
                    Ok(config) => {
                        if let Some(ref p) = config.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let project_root = std::env::current_dir()?;
                let resolved = config::load_and_resolve(&project_root, path.as_deref())
                    .context("failed to load configuration")?;

                println!("Configuration:");
                if let Some(ref p) = resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                println!("  safe_mode:     {}", resolved.safe_mode);
                println!("  assessed_by:   {}", resolved.assessed_by);
                println!("  brief_version: {}", resolved.brief_version);
                println!("  output:        {}", resolved.output.display());
            }
        },
    }

    Ok(())
}

fn render_risk_text(assessment: &RiskAssessment) -> String {
    let mut out = String::new();
    let scores = &assessment.scores;

    out.push_str(&format!("Assessment {}\n", assessment.id));
    out.push_str(&format!(
        "Content:           {} (by {})\n",
        assessment.content_id, assessment.assessed_by
    ));
    out.push_str(&format!(
        "Overall:           {} ({})\n",
        scores.overall_score,
        meridian_core::classify_risk(scores.overall_score).as_str()
    ));
    out.push_str(&format!("  Legal:           {}\n", scores.legal_risk));
    out.push_str(&format!("  Defamation:      {}\n", scores.defamation_risk));
    out.push_str(&format!("  Platform:        {}\n", scores.platform_risk));
    out.push_str(&format!(
        "  Political:       {}\n",
        scores.political_sensitivity
    ));

    let active = assessment.factors.active();
    if active.is_empty() {
        out.push_str("Factors:           none\n");
    } else {
        out.push_str(&format!("Factors:           {}\n", active.join(", ")));
    }

    out.push_str(&format!("Notes:             {}\n", assessment.notes));
    if assessment.requires_senior_review {
        out.push_str("Senior review:     required\n");
    }
    if assessment.safe_mode_blocked {
        out.push_str("Safe mode:         BLOCKED\n");
    }

    let suggestions = mitigation_suggestions(&assessment.factors);
    if !suggestions.is_empty() {
        out.push_str("Mitigations:\n");
        for suggestion in suggestions {
            out.push_str(&format!("  - {}\n", suggestion));
        }
    }

    out
}

fn render_eri_text(assessment: &EriAssessment, previous: Option<&EriAssessment>) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}: ERI {} ({})\n",
        assessment.id,
        assessment.overall_score,
        assessment.classification.as_str()
    ));
    for dim in &assessment.dimensions {
        out.push_str(&format!("  {:<12} {}\n", dim.name, dim.score));
    }

    if let Some(previous) = previous {
        let trend = eri::calculate_trend(assessment.overall_score, previous.overall_score);
        out.push_str(&format!(
            "Trend vs {}: {}\n",
            previous.id,
            trend.as_str()
        ));
        let comparison = eri::compare(assessment, previous);
        for shift in &comparison.significant_shifts {
            out.push_str(&format!("  Shift: {}\n", shift));
        }
    }

    if !assessment.key_developments.is_empty() {
        out.push_str("Developments:\n");
        for kd in &assessment.key_developments {
            out.push_str(&format!(
                "  [{}] {} (impact {}/10)\n",
                kd.id, kd.headline, kd.escalation_impact
            ));
        }
    }

    if !assessment.indicators_to_watch.is_empty() {
        out.push_str("Watch:\n");
        for indicator in &assessment.indicators_to_watch {
            out.push_str(&format!("  - {}\n", indicator));
        }
    }

    out
}
