use crate::error::{InsightsError, Result};
use crate::types::RawTitleRow;
use csv::{ReaderBuilder, Trim};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Outcome of loading the dataset: the rows that deserialized plus a count
/// of rows the CSV layer could not make sense of.
#[derive(Debug)]
pub struct LoadOutcome {
    pub rows: Vec<RawTitleRow>,
    pub skipped_rows: usize,
}

/// Load the catalog CSV into raw rows.
///
/// A missing or unreadable file and unreadable headers are fatal. A row
/// that fails to deserialize is a record-level problem: it is skipped,
/// counted and logged, and the load continues.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<LoadOutcome> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(InsightsError::DataFormat(format!(
            "dataset file not found: {}",
            path.display()
        )));
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| {
            InsightsError::DataFormat(format!("failed to open {}: {}", path.display(), e))
        })?;

    // Force header parsing up front so a structurally broken file fails fast
    reader.headers().map_err(|e| {
        InsightsError::DataFormat(format!("failed to read CSV headers: {e}"))
    })?;

    let mut rows = Vec::new();
    let mut skipped_rows = 0;
    for (index, result) in reader.deserialize::<RawTitleRow>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                debug!("skipping unreadable row {}: {}", index + 1, e);
                skipped_rows += 1;
            }
        }
    }

    if skipped_rows > 0 {
        warn!("{} rows could not be read and were skipped", skipped_rows);
    }
    info!("loaded {} raw rows", rows.len());

    Ok(LoadOutcome { rows, skipped_rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_rows_from_csv() {
        let file = write_fixture(
            "show_id,type,title,listed_in,rating,release_year,date_added\n\
             s1,Movie,Dark Waters,Dramas,PG-13,2019,\"November 22, 2019\"\n\
             s2,TV Show,Mindhunter,\"Crime TV Shows, TV Dramas\",TV-MA,2017,\"October 13, 2017\"\n",
        );

        let outcome = load_dataset(file.path()).unwrap();
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.skipped_rows, 0);
        assert_eq!(outcome.rows[0].title.as_deref(), Some("Dark Waters"));
        assert_eq!(
            outcome.rows[1].genres.as_deref(),
            Some("Crime TV Shows, TV Dramas")
        );
    }

    #[test]
    fn missing_file_is_a_data_format_error() {
        let err = load_dataset("no/such/file.csv").unwrap_err();
        assert!(matches!(err, InsightsError::DataFormat(_)));
    }

    #[test]
    fn sparse_rows_still_load() {
        // Missing trailing fields should surface as None, not a load failure
        let file = write_fixture(
            "show_id,type,title,listed_in,rating,release_year,date_added\n\
             s1,Movie,Unfinished,Dramas,,,\n",
        );

        let outcome = load_dataset(file.path()).unwrap();
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(outcome.rows[0].date_added, None);
        assert_eq!(outcome.rows[0].release_year, None);
    }
}
