use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date formats seen in Netflix catalog exports, tried in order.
/// The primary export format spells months out ("September 9, 2019").
const DATE_ADDED_FORMATS: &[&str] = &["%B %d, %Y", "%Y-%m-%d"];

/// One row of the catalog CSV, exactly as read from disk.
///
/// Every field is optional so a sparse or partially malformed row still
/// deserializes; validation happens in the cleaner, not here. Aliases cover
/// the header spellings found across published versions of the dataset.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawTitleRow {
    #[serde(default, rename = "show_id", alias = "id")]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "listed_in", alias = "genre", alias = "genres")]
    pub genres: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(
        default,
        rename = "imdb_score",
        alias = "IMDb Score",
        alias = "IMDB Score",
        alias = "score"
    )]
    pub score: Option<String>,
    #[serde(default)]
    pub release_year: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
}

/// Whether a title is a feature film or a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleKind {
    Movie,
    Show,
}

impl TitleKind {
    /// Parse the dataset's `type` column. `None` for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Movie" => Some(Self::Movie),
            "TV Show" | "Show" => Some(Self::Show),
            _ => None,
        }
    }
}

impl std::fmt::Display for TitleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Movie => write!(f, "Movie"),
            Self::Show => write!(f, "TV Show"),
        }
    }
}

/// A validated catalog record. Only the cleaner constructs these, so every
/// one is guaranteed to carry a parsed date-added and at least one genre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleRecord {
    pub id: String,
    pub title: String,
    pub kind: TitleKind,
    pub genres: Vec<String>,
    /// Categorical content rating like "TV-MA" or "PG-13".
    pub maturity_rating: Option<String>,
    /// Numeric review score, when the dataset carries one.
    pub score: Option<f64>,
    pub release_year: i32,
    pub date_added: NaiveDate,
}

/// Parse a date-added value, trying each known export format.
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_ADDED_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}
