use anyhow::Result;
use netflix_insights::cleaner;
use netflix_insights::config::Config;
use netflix_insights::loader;
use netflix_insights::pipeline::Pipeline;
use netflix_insights::stats;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const FIXTURE: &str = "\
show_id,type,title,listed_in,rating,imdb_score,release_year,date_added
s1,Movie,Dark Waters,\"Dramas, Thrillers\",PG-13,7.6,2019,\"November 22, 2019\"
s2,TV Show,Mindhunter,\"Crime TV Shows, TV Dramas\",TV-MA,8.6,2017,\"October 13, 2017\"
s3,Movie,The Irishman,Dramas,R,7.8,2019,\"November 27, 2019\"
s4,Movie,No Date Added,Dramas,PG,6.0,2018,
s5,Movie,Bad Date,Comedies,PG,6.5,2018,someday soon
s1,Movie,Dark Waters Duplicate,Dramas,PG-13,7.6,2019,\"November 22, 2019\"
s6,Movie,Genreless,,PG,5.0,2018,\"January 5, 2020\"
s7,Movie,Unscored,Comedies,PG,,2020,\"March 5, 2020\"
";

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("netflix_titles.csv");
    fs::write(&path, FIXTURE).unwrap();
    path
}

#[test]
fn cleaning_drops_invalid_rows_and_keeps_the_rest() -> Result<()> {
    let dir = tempdir()?;
    let csv_path = write_fixture(dir.path());

    let loaded = loader::load_dataset(&csv_path)?;
    assert_eq!(loaded.rows.len(), 8);

    let outcome = cleaner::clean(&loaded.rows);

    // s4 (no date), s5 (bad date), s6 (no genres) and the duplicate s1 drop
    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.dropped.len(), 4);

    // Cleaned table is a subset of the raw table: every kept id came in
    let raw_ids: Vec<&str> = loaded
        .rows
        .iter()
        .filter_map(|r| r.id.as_deref())
        .collect();
    for record in &outcome.records {
        assert!(raw_ids.contains(&record.id.as_str()));
    }

    // A record with missing date-added never reaches the aggregates
    let yearly = stats::additions_per_year(&outcome.records);
    assert!(outcome.records.iter().all(|r| r.id != "s4"));
    assert_eq!(
        yearly.values().sum::<u64>(),
        outcome.records.len() as u64
    );

    Ok(())
}

#[test]
fn cleaning_already_clean_data_changes_nothing() -> Result<()> {
    let dir = tempdir()?;
    let csv_path = write_fixture(dir.path());

    let loaded = loader::load_dataset(&csv_path)?;
    let first = cleaner::clean(&loaded.rows);

    // Feed the cleaned records back through as raw rows
    let as_raw: Vec<netflix_insights::types::RawTitleRow> = first
        .records
        .iter()
        .map(|r| netflix_insights::types::RawTitleRow {
            id: Some(r.id.clone()),
            kind: Some(r.kind.to_string()),
            title: Some(r.title.clone()),
            genres: Some(r.genres.join(", ")),
            rating: r.maturity_rating.clone(),
            score: r.score.map(|s| s.to_string()),
            release_year: Some(r.release_year.to_string()),
            date_added: Some(r.date_added.format("%B %d, %Y").to_string()),
        })
        .collect();

    let second = cleaner::clean(&as_raw);
    assert_eq!(first.records, second.records);
    assert!(second.dropped.is_empty());

    Ok(())
}

#[test]
fn aggregates_hold_their_invariants_over_the_fixture() -> Result<()> {
    let dir = tempdir()?;
    let csv_path = write_fixture(dir.path());

    let loaded = loader::load_dataset(&csv_path)?;
    let records = cleaner::clean(&loaded.rows).records;

    let genres = stats::genre_counts(&records);
    let genre_total: u64 = genres.iter().map(|c| c.count).sum();
    assert!(genre_total >= records.len() as u64);
    // Dramas appears in s1, s3; sorted first by count
    assert_eq!(genres[0].genre, "Dramas");
    assert_eq!(genres[0].count, 2);

    let top = stats::top_rated(&records, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].id, "s2"); // 8.6 beats 7.8
    assert_eq!(top[1].id, "s3");
    assert!(top[0].score >= top[1].score);

    // Unscored titles are never ranked
    let all = stats::top_rated(&records, 100);
    assert!(all.iter().all(|t| t.id != "s7"));

    let summary = stats::summary(&records);
    assert_eq!(summary.total_titles, 4);
    assert_eq!(summary.movies, 3);
    assert_eq!(summary.shows, 1);
    assert_eq!(summary.earliest_release, Some(2017));
    assert_eq!(summary.latest_release, Some(2020));

    Ok(())
}

#[test]
fn full_pipeline_reports_counts_and_tolerates_chart_failures() -> Result<()> {
    let dir = tempdir()?;
    let csv_path = write_fixture(dir.path());

    let config = Config {
        dataset: netflix_insights::config::DatasetConfig { path: csv_path },
        charts: netflix_insights::config::ChartsConfig {
            output_dir: dir.path().join("charts"),
        },
        ..Config::default()
    };

    let report = Pipeline::run(&config)?;

    assert_eq!(report.total_rows, 8);
    assert_eq!(report.cleaned_records, 4);
    assert_eq!(report.dropped_records, 4);

    // Chart rendering depends on a usable font backend; written charts
    // must exist on disk, failures must be reported per chart, and the
    // run as a whole must still have succeeded either way
    for path in &report.charts_written {
        assert!(path.exists());
    }
    assert!(report.charts_written.len() + report.chart_errors.len() <= 3);

    Ok(())
}

#[test]
fn missing_dataset_aborts_the_run() {
    let config = Config {
        dataset: netflix_insights::config::DatasetConfig {
            path: "definitely/not/here.csv".into(),
        },
        ..Config::default()
    };

    let result = Pipeline::run(&config);
    assert!(matches!(
        result,
        Err(netflix_insights::error::InsightsError::DataFormat(_))
    ));
}
