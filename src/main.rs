mod pipeline;
mod platforms;
mod search;
mod store;
mod summarize;
mod table;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "influencer_tracker", about = "AI influencer tracker via Tavily + Ollama")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, summarize, and persist influencers for selected platforms
    Run {
        /// Platform to analyze (repeatable; default: LinkedIn, X (Twitter), YouTube)
        #[arg(short, long = "platform")]
        platforms: Vec<String>,
        /// Accumulation CSV path
        #[arg(short, long, default_value = store::OUTPUT_CSV)]
        output: PathBuf,
    },
    /// Show the first rows of the accumulation file
    Overview {
        /// Filter by PlatformGroup (e.g. "LinkedIn")
        #[arg(short, long)]
        platform: Option<String>,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
        /// Accumulation CSV path
        #[arg(short, long, default_value = store::OUTPUT_CSV)]
        output: PathBuf,
    },
    /// Row counts per platform
    Stats {
        /// Accumulation CSV path
        #[arg(short, long, default_value = store::OUTPUT_CSV)]
        output: PathBuf,
    },
    /// List supported platforms and their search queries
    Platforms,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { platforms: selected, output } => {
            let selected: Vec<String> = if selected.is_empty() {
                platforms::DEFAULT_SELECTION
                    .iter()
                    .map(|p| p.to_string())
                    .collect()
            } else {
                selected
            };
            for p in &selected {
                if !platforms::is_supported(p) {
                    bail!(
                        "Unknown platform '{}'. Supported: {}",
                        p,
                        platforms::SUPPORTED.join(", ")
                    );
                }
            }
            let Ok(api_key) = std::env::var("TAVILY_API_KEY") else {
                bail!("TAVILY_API_KEY must be set to run the tracker");
            };

            println!("Tracking AI influencers on {} platform(s)...", selected.len());
            let stats = pipeline::run_platforms(&selected, api_key, &output).await?;
            println!(
                "Done: {} platforms processed ({} ok, {} failed).",
                stats.total, stats.ok, stats.errors
            );

            if stats.ok > 0 {
                println!();
                print_overview(&output, None, 20)?;
            }
            Ok(())
        }
        Commands::Overview { platform, limit, output } => {
            print_overview(&output, platform.as_deref(), limit)
        }
        Commands::Stats { output } => {
            let Some(t) = store::load(&output)? else {
                println!("No data collected yet. Run 'run' first.");
                return Ok(());
            };
            println!("Total rows: {}", t.rows.len());

            if let Some(tag) = t.column_index("PlatformGroup") {
                let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
                for row in &t.rows {
                    *counts.entry(row[tag].as_str()).or_default() += 1;
                }
                for (group, count) in counts {
                    println!("  {:<14} {}", group, count);
                }
            }

            let modified: chrono::DateTime<chrono::Local> =
                std::fs::metadata(&output)?.modified()?.into();
            println!("Updated:    {}", modified.format("%Y-%m-%d %H:%M:%S"));
            Ok(())
        }
        Commands::Platforms => {
            for p in platforms::SUPPORTED {
                println!("{:<14} {}", p, platforms::search_query(p));
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

/// Print the first `limit` rows of the accumulation file as an aligned
/// text table, optionally filtered by PlatformGroup.
fn print_overview(path: &Path, platform: Option<&str>, limit: usize) -> Result<()> {
    let Some(t) = store::load(path)? else {
        println!("No data collected yet. Run 'run' first.");
        return Ok(());
    };

    let tag = t.column_index("PlatformGroup");
    let rows: Vec<&Vec<String>> = t
        .rows
        .iter()
        .filter(|row| match (platform, tag) {
            (Some(p), Some(i)) => row[i] == p,
            (Some(_), None) => false,
            (None, _) => true,
        })
        .take(limit)
        .collect();

    if rows.is_empty() {
        println!("No rows to display.");
        return Ok(());
    }

    // Column widths from header + shown rows, capped for readability.
    let widths: Vec<usize> = t
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
                .min(28)
        })
        .collect();

    let header: Vec<String> = t
        .columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{:<width$}", truncate(c, *w), width = w))
        .collect();
    let header_line = header.join(" | ");
    println!("{}", header_line);
    println!("{}", "-".repeat(header_line.chars().count()));

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", truncate(c, *w), width = w))
            .collect();
        println!("{}", cells.join(" | "));
    }

    println!("\n{} of {} rows shown | {}", rows.len(), t.rows.len(), path.display());
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_limit() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long influencer name", 10), "a very ...");
    }

    #[test]
    fn format_duration_scales_units() {
        assert_eq!(format_duration(std::time::Duration::from_secs(5)), "5.0s");
        assert_eq!(format_duration(std::time::Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(std::time::Duration::from_secs(3725)), "1h 2m 5s");
    }
}
