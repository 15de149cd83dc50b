use crate::error::{InsightsError, Result};
use crate::stats::GenreCount;
use crate::types::TitleRecord;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, warn};

const CHART_SIZE: (u32, u32) = (1024, 640);
const BAR_COLOR: RGBColor = RGBColor(86, 156, 214);
const RATING_COLOR: RGBColor = RGBColor(255, 140, 0);
const LINE_COLOR: RGBColor = RGBColor(46, 139, 87);

fn render_err<E: std::fmt::Display>(e: E) -> InsightsError {
    InsightsError::Render(e.to_string())
}

/// Vertical bar chart of title counts per genre.
pub fn genre_bar_chart(counts: &[GenreCount], path: &Path) -> Result<()> {
    if counts.is_empty() {
        warn!("no genre counts to chart, skipping {}", path.display());
        return Ok(());
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let y_max = counts.iter().map(|c| c.count).max().unwrap_or(1);
    let y_max = y_max + y_max / 10 + 1;
    let n = counts.len() as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Top {} Genres by Title Count", counts.len()),
            ("sans-serif", 28),
        )
        .margin(12)
        .x_label_area_size(110)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), 0u64..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Genre")
        .y_desc("Number of Titles")
        .x_labels(counts.len())
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => counts
                .get(*i as usize)
                .map(|c| c.genre.clone())
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        })
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, c)| {
            let i = i as i32;
            Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0),
                    (SegmentValue::Exact(i + 1), c.count),
                ],
                BAR_COLOR.mix(0.8).filled(),
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!("wrote genre chart to {}", path.display());
    Ok(())
}

/// Horizontal bar chart of the highest-scored titles, best at the top.
pub fn top_rated_chart(titles: &[TitleRecord], path: &Path) -> Result<()> {
    let ranked: Vec<&TitleRecord> = titles.iter().filter(|t| t.score.is_some()).collect();
    if ranked.is_empty() {
        warn!("no scored titles to chart, skipping {}", path.display());
        return Ok(());
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let x_max = ranked
        .iter()
        .filter_map(|t| t.score)
        .fold(0.0f64, f64::max);
    let x_max = (x_max * 1.1).max(1.0);
    let n = ranked.len() as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Top {} Rated Titles", ranked.len()),
            ("sans-serif", 28),
        )
        .margin(12)
        .x_label_area_size(50)
        .y_label_area_size(220)
        .build_cartesian_2d(0f64..x_max, (0..n).into_segmented())
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .x_desc("Score")
        .y_labels(ranked.len())
        .y_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                // Row 0 sits at the bottom, so reverse to put rank 1 on top
                let idx = (n - 1 - *i) as usize;
                ranked.get(idx).map(|t| t.title.clone()).unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(ranked.iter().enumerate().map(|(rank, t)| {
            let row = n - 1 - rank as i32;
            Rectangle::new(
                [
                    (0.0, SegmentValue::Exact(row)),
                    (t.score.unwrap_or(0.0), SegmentValue::Exact(row + 1)),
                ],
                RATING_COLOR.mix(0.8).filled(),
            )
        }))
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!("wrote top-rated chart to {}", path.display());
    Ok(())
}

/// Line chart of titles added per calendar year.
pub fn yearly_additions_chart(counts: &BTreeMap<i32, u64>, path: &Path) -> Result<()> {
    if counts.is_empty() {
        warn!("no yearly counts to chart, skipping {}", path.display());
        return Ok(());
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let min_year = *counts.keys().next().unwrap_or(&0);
    let max_year = *counts.keys().next_back().unwrap_or(&0);
    let y_max = counts.values().copied().max().unwrap_or(1);
    let y_max = y_max + y_max / 10 + 1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Titles Added per Year", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(min_year..max_year + 1, 0u64..y_max)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Year Added")
        .y_desc("Number of Titles")
        .x_label_formatter(&|y| y.to_string())
        .draw()
        .map_err(render_err)?;

    let points: Vec<(i32, u64)> = counts.iter().map(|(y, c)| (*y, *c)).collect();
    chart
        .draw_series(LineSeries::new(points.iter().copied(), &LINE_COLOR))
        .map_err(render_err)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|(x, y)| Circle::new((*x, *y), 4, LINE_COLOR.filled())),
        )
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!("wrote yearly additions chart to {}", path.display());
    Ok(())
}
