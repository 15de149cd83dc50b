use crate::types::{parse_date_added, RawTitleRow, TitleKind, TitleRecord};
use std::collections::HashSet;
use tracing::{debug, info, instrument};

/// Why a row was rejected during cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    MissingId,
    MissingTitle,
    MissingKind,
    MissingGenres,
    MissingReleaseYear,
    MissingDateAdded,
    DuplicateId,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::MissingId => "missing identifier",
            Self::MissingTitle => "missing title",
            Self::MissingKind => "missing or unrecognized type",
            Self::MissingGenres => "no genre labels",
            Self::MissingReleaseYear => "missing or malformed release year",
            Self::MissingDateAdded => "missing or malformed date added",
            Self::DuplicateId => "duplicate identifier",
        };
        write!(f, "{reason}")
    }
}

/// Result of a cleaning pass: validated records plus what was dropped,
/// keyed by the row's position in the input.
#[derive(Debug, Default)]
pub struct CleanOutcome {
    pub records: Vec<TitleRecord>,
    pub dropped: Vec<(usize, DropReason)>,
}

/// Validate raw rows into title records.
///
/// Rows missing any required field are dropped whole, never kept in a
/// partial state. A malformed date or year counts as missing; the policy
/// is to drop rather than guess. Duplicate identifiers collapse to the
/// first occurrence. The pass is deterministic and idempotent: cleaning
/// already-clean data changes nothing.
#[instrument(skip_all, fields(rows = rows.len()))]
pub fn clean(rows: &[RawTitleRow]) -> CleanOutcome {
    let mut outcome = CleanOutcome::default();
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (index, row) in rows.iter().enumerate() {
        match validate_row(row) {
            Ok(record) => {
                if seen_ids.insert(record.id.clone()) {
                    outcome.records.push(record);
                } else {
                    debug!("dropping row {}: duplicate id {}", index, record.id);
                    outcome.dropped.push((index, DropReason::DuplicateId));
                }
            }
            Err(reason) => {
                debug!("dropping row {}: {}", index, reason);
                outcome.dropped.push((index, reason));
            }
        }
    }

    info!(
        "cleaned {} rows into {} records ({} dropped)",
        rows.len(),
        outcome.records.len(),
        outcome.dropped.len()
    );
    outcome
}

fn validate_row(row: &RawTitleRow) -> std::result::Result<TitleRecord, DropReason> {
    let id = required_string(&row.id).ok_or(DropReason::MissingId)?;
    let title = required_string(&row.title).ok_or(DropReason::MissingTitle)?;
    let kind = row
        .kind
        .as_deref()
        .and_then(TitleKind::parse)
        .ok_or(DropReason::MissingKind)?;
    let genres = split_genres(row.genres.as_deref().unwrap_or(""));
    if genres.is_empty() {
        return Err(DropReason::MissingGenres);
    }
    let release_year = row
        .release_year
        .as_deref()
        .and_then(|y| y.trim().parse::<i32>().ok())
        .ok_or(DropReason::MissingReleaseYear)?;
    let date_added = row
        .date_added
        .as_deref()
        .and_then(parse_date_added)
        .ok_or(DropReason::MissingDateAdded)?;

    // Score is optional; a value that fails to parse degrades to None
    let score = row.score.as_deref().and_then(|s| s.trim().parse::<f64>().ok());
    let maturity_rating = required_string(&row.rating);

    Ok(TitleRecord {
        id,
        title,
        kind,
        genres,
        maturity_rating,
        score,
        release_year,
        date_added,
    })
}

fn required_string(field: &Option<String>) -> Option<String> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Split a comma-separated genre list, trimming each label and collapsing
/// repeats while preserving first-seen order.
fn split_genres(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .filter(|g| seen.insert(g.to_lowercase()))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(id: &str, date_added: &str) -> RawTitleRow {
        RawTitleRow {
            id: Some(id.to_owned()),
            kind: Some("Movie".to_owned()),
            title: Some(format!("Title {id}")),
            genres: Some("Dramas, International Movies".to_owned()),
            rating: Some("PG-13".to_owned()),
            score: Some("7.5".to_owned()),
            release_year: Some("2019".to_owned()),
            date_added: Some(date_added.to_owned()),
        }
    }

    #[test]
    fn keeps_wellformed_rows() {
        let rows = vec![row("s1", "November 22, 2019")];
        let outcome = clean(&rows);

        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.dropped.is_empty());

        let record = &outcome.records[0];
        assert_eq!(record.id, "s1");
        assert_eq!(record.kind, TitleKind::Movie);
        assert_eq!(record.genres, vec!["Dramas", "International Movies"]);
        assert_eq!(record.score, Some(7.5));
        assert_eq!(
            record.date_added,
            NaiveDate::from_ymd_opt(2019, 11, 22).unwrap()
        );
    }

    #[test]
    fn drops_rows_with_malformed_dates() {
        let rows = vec![row("s1", "not a date"), row("s2", "May 5, 2020")];
        let outcome = clean(&rows);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, "s2");
        assert_eq!(outcome.dropped, vec![(0, DropReason::MissingDateAdded)]);
    }

    #[test]
    fn drops_rows_without_genres() {
        let mut bad = row("s1", "May 5, 2020");
        bad.genres = Some("  , ,".to_owned());
        let outcome = clean(&[bad]);

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.dropped, vec![(0, DropReason::MissingGenres)]);
    }

    #[test]
    fn first_occurrence_wins_on_duplicate_ids() {
        let mut second = row("s1", "June 1, 2021");
        second.title = Some("Different Title".to_owned());
        let rows = vec![row("s1", "May 5, 2020"), second];
        let outcome = clean(&rows);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].title, "Title s1");
        assert_eq!(outcome.dropped, vec![(1, DropReason::DuplicateId)]);
    }

    #[test]
    fn malformed_score_degrades_to_none() {
        let mut bad_score = row("s1", "May 5, 2020");
        bad_score.score = Some("N/A".to_owned());
        let outcome = clean(&[bad_score]);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].score, None);
    }

    #[test]
    fn repeated_genre_labels_collapse() {
        let mut dup = row("s1", "May 5, 2020");
        dup.genres = Some("Dramas, dramas, Thrillers".to_owned());
        let outcome = clean(&[dup]);

        assert_eq!(outcome.records[0].genres, vec!["Dramas", "Thrillers"]);
    }

    #[test]
    fn cleaning_is_deterministic() {
        let rows = vec![row("s1", "May 5, 2020"), row("s2", "bad"), row("s1", "May 5, 2020")];
        let first = clean(&rows);
        let second = clean(&rows);

        assert_eq!(first.records, second.records);
        assert_eq!(first.dropped, second.dropped);
    }
}
