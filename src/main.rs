use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

use netflix_insights::config::Config;
use netflix_insights::logging;
use netflix_insights::pipeline::{Pipeline, PipelineReport};
use netflix_insights::stats;
use netflix_insights::types::TitleRecord;

#[derive(Parser)]
#[command(name = "netflix_insights")]
#[command(about = "Netflix catalog cleaner, trend analyzer and chart generator")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the catalog CSV (overrides config.toml)
    #[arg(long, global = true)]
    input: Option<PathBuf>,

    /// How many entries the top-genre and top-rated listings keep
    #[arg(long, global = true)]
    top: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary statistics, top genres and top-rated titles
    Summary,
    /// Render the charts without printing the summary
    Charts {
        /// Directory to write chart images into
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Run the full pipeline: summary plus charts
    Run {
        /// Directory to write chart images into
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn apply_overrides(config: &mut Config, cli: &Cli, out_dir: Option<&PathBuf>) {
    if let Some(input) = &cli.input {
        config.dataset.path = input.clone();
    }
    if let Some(top) = cli.top {
        config.analysis.top_genres = top;
        config.analysis.top_titles = top;
    }
    if let Some(dir) = out_dir {
        config.charts.output_dir = dir.clone();
    }
}

fn print_summary(config: &Config, records: &[TitleRecord]) {
    let summary = stats::summary(records);
    println!("\n📊 Summary Statistics:");
    println!("   Total titles: {}", summary.total_titles);
    println!(
        "   Movies: {} | TV Shows: {}",
        summary.movies, summary.shows
    );
    if let (Some(earliest), Some(latest)) = (summary.earliest_release, summary.latest_release) {
        println!("   Release years: {earliest} to {latest}");
    }
    if let Some(mean) = summary.mean_score {
        println!("   Average score: {mean:.2}");
    }

    let mut genres = stats::genre_counts(records);
    genres.truncate(config.analysis.top_genres);
    if !genres.is_empty() {
        println!("\n🎬 Top {} Genres by Title Count:", genres.len());
        for genre in &genres {
            println!("   {}: {}", genre.genre, genre.count);
        }
    }

    let top = stats::top_rated(records, config.analysis.top_titles);
    if top.is_empty() {
        println!("\n⚠️  No numeric scores in the dataset; skipping top-rated listing");
    } else {
        println!("\n⭐ Top {} Rated Titles:", top.len());
        for title in &top {
            println!(
                "   {} ({}, score {:.1})",
                title.title,
                title.release_year,
                title.score.unwrap_or(0.0)
            );
        }
    }

    let yearly = stats::additions_per_year(records);
    if let Some((year, count)) = yearly.iter().max_by_key(|(year, count)| (**count, -**year)) {
        println!("\n📅 Busiest addition year: {year} ({count} titles)");
    }
}

fn print_report(report: &PipelineReport) {
    println!("\n📊 Pipeline Results:");
    println!("   Total rows: {}", report.total_rows);
    println!("   Cleaned records: {}", report.cleaned_records);
    println!("   Dropped records: {}", report.dropped_records);
    println!("   Charts written: {}", report.charts_written.len());
    for path in &report.charts_written {
        println!("   - {}", path.display());
    }
    if !report.chart_errors.is_empty() {
        println!("\n⚠️  Charts that failed:");
        for chart_error in &report.chart_errors {
            println!("   - {chart_error}");
        }
    }
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    let result = match &cli.command {
        Commands::Summary => {
            apply_overrides(&mut config, &cli, None);
            println!("📋 Summarizing catalog...");
            Pipeline::load_records(&config).map(|(records, _, _)| {
                print_summary(&config, &records);
            })
        }
        Commands::Charts { out_dir } => {
            apply_overrides(&mut config, &cli, out_dir.as_ref());
            println!("🖼️  Rendering charts...");
            Pipeline::run(&config).map(|report| print_report(&report))
        }
        Commands::Run { out_dir } => {
            apply_overrides(&mut config, &cli, out_dir.as_ref());
            println!("🚀 Running full analysis...");
            Pipeline::load_records(&config).and_then(|(records, total, dropped)| {
                print_summary(&config, &records);
                Pipeline::render_charts(&config, &records, total, dropped)
            })
            .map(|report| print_report(&report))
        }
    };

    if let Err(e) = &result {
        error!("run failed: {}", e);
        println!("❌ Run failed: {e}");
    }
    result.map_err(Into::into)
}
