use crate::charts;
use crate::cleaner;
use crate::config::Config;
use crate::error::Result;
use crate::loader;
use crate::stats;
use crate::types::TitleRecord;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// Result of a complete pipeline run.
#[derive(Debug)]
pub struct PipelineReport {
    pub total_rows: usize,
    pub cleaned_records: usize,
    pub dropped_records: usize,
    pub charts_written: Vec<PathBuf>,
    pub chart_errors: Vec<String>,
}

pub struct Pipeline;

impl Pipeline {
    /// Load and clean the dataset, returning the validated records.
    #[instrument(skip_all)]
    pub fn load_records(config: &Config) -> Result<(Vec<TitleRecord>, usize, usize)> {
        info!("📡 Loading dataset from {}", config.dataset.path.display());
        println!("📡 Loading dataset from {}...", config.dataset.path.display());
        let loaded = loader::load_dataset(&config.dataset.path)?;
        let total_rows = loaded.rows.len() + loaded.skipped_rows;
        println!("✅ Loaded {} raw rows", loaded.rows.len());

        info!("🔧 Cleaning records...");
        println!("🔧 Cleaning records...");
        let outcome = cleaner::clean(&loaded.rows);
        let dropped = outcome.dropped.len() + loaded.skipped_rows;
        println!(
            "✅ Kept {} records ({} dropped)",
            outcome.records.len(),
            dropped
        );

        Ok((outcome.records, total_rows, dropped))
    }

    /// Run the whole pipeline: load, clean, aggregate, render.
    ///
    /// A chart failure is reported and skipped; the remaining charts still
    /// render. Only a loader failure aborts the run.
    #[instrument(skip_all)]
    pub fn run(config: &Config) -> Result<PipelineReport> {
        let (records, total_rows, dropped) = Self::load_records(config)?;
        Self::render_charts(config, &records, total_rows, dropped)
    }

    /// Aggregate already-cleaned records and render the charts.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn render_charts(
        config: &Config,
        records: &[TitleRecord],
        total_rows: usize,
        dropped: usize,
    ) -> Result<PipelineReport> {
        info!("📊 Computing aggregates...");
        println!("📊 Computing aggregates...");
        let mut genre_counts = stats::genre_counts(records);
        genre_counts.truncate(config.analysis.top_genres);
        let top_rated = stats::top_rated(records, config.analysis.top_titles);
        let yearly = stats::additions_per_year(records);

        let out_dir = &config.charts.output_dir;
        fs::create_dir_all(out_dir)?;
        info!("🖼️  Rendering charts into {}", out_dir.display());
        println!("🖼️  Rendering charts into {}...", out_dir.display());

        let mut charts_written = Vec::new();
        let mut chart_errors = Vec::new();

        let jobs: Vec<(PathBuf, crate::error::Result<()>)> = vec![
            {
                let path = out_dir.join("genre_counts.png");
                let result = charts::genre_bar_chart(&genre_counts, &path);
                (path, result)
            },
            {
                let path = out_dir.join("top_rated.png");
                let result = charts::top_rated_chart(&top_rated, &path);
                (path, result)
            },
            {
                let path = out_dir.join("yearly_additions.png");
                let result = charts::yearly_additions_chart(&yearly, &path);
                (path, result)
            },
        ];

        for (path, result) in jobs {
            match result {
                Ok(()) => {
                    if path.exists() {
                        charts_written.push(path);
                    }
                }
                Err(e) => {
                    // Terminal for this chart only; the rest proceed
                    error!("chart {} failed: {}", path.display(), e);
                    println!("⚠️  Chart {} failed: {}", path.display(), e);
                    chart_errors.push(format!("{}: {}", path.display(), e));
                }
            }
        }

        if !chart_errors.is_empty() {
            warn!("{} charts failed to render", chart_errors.len());
        }

        Ok(PipelineReport {
            total_rows,
            cleaned_records: records.len(),
            dropped_records: dropped,
            charts_written,
            chart_errors,
        })
    }
}
