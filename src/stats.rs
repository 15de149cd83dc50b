use crate::types::{TitleKind, TitleRecord};
use std::collections::{BTreeMap, HashMap};

/// A genre label with the number of titles carrying it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCount {
    pub genre: String,
    pub count: u64,
}

/// High-level figures for the whole catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_titles: usize,
    pub movies: usize,
    pub shows: usize,
    pub earliest_release: Option<i32>,
    pub latest_release: Option<i32>,
    pub mean_score: Option<f64>,
}

/// Count how many titles carry each genre label. A title with several
/// genres contributes to each of them. Sorted by count descending, with
/// ties broken by genre name ascending so the ordering is stable across
/// runs regardless of input order.
pub fn genre_counts(records: &[TitleRecord]) -> Vec<GenreCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for record in records {
        for genre in &record.genres {
            *counts.entry(genre.as_str()).or_insert(0) += 1;
        }
    }

    let mut out: Vec<GenreCount> = counts
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_owned(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
    out
}

/// The `n` highest-scored titles. Titles without a numeric score are not
/// ranked. Ties break by release year descending (newer first), then by
/// title ascending for full determinism.
pub fn top_rated(records: &[TitleRecord], n: usize) -> Vec<TitleRecord> {
    let mut rated: Vec<&TitleRecord> = records.iter().filter(|r| r.score.is_some()).collect();
    rated.sort_by(|a, b| {
        let score_a = a.score.unwrap_or(f64::NEG_INFINITY);
        let score_b = b.score.unwrap_or(f64::NEG_INFINITY);
        score_b
            .total_cmp(&score_a)
            .then_with(|| b.release_year.cmp(&a.release_year))
            .then_with(|| a.title.cmp(&b.title))
    });
    rated.into_iter().take(n).cloned().collect()
}

/// Number of titles added to the catalog per calendar year, keyed by the
/// year portion of date-added. The BTreeMap keeps years ascending.
pub fn additions_per_year(records: &[TitleRecord]) -> BTreeMap<i32, u64> {
    use chrono::Datelike;

    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.date_added.year()).or_insert(0) += 1;
    }
    counts
}

/// Catalog-wide summary figures, mirroring what the `summary` command
/// prints: totals, movie/show split, release-year span, mean score.
pub fn summary(records: &[TitleRecord]) -> SummaryStats {
    let movies = records.iter().filter(|r| r.kind == TitleKind::Movie).count();
    let shows = records.iter().filter(|r| r.kind == TitleKind::Show).count();

    let scores: Vec<f64> = records.iter().filter_map(|r| r.score).collect();
    let mean_score = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    SummaryStats {
        total_titles: records.len(),
        movies,
        shows,
        earliest_release: records.iter().map(|r| r.release_year).min(),
        latest_release: records.iter().map(|r| r.release_year).max(),
        mean_score,
    }
}
