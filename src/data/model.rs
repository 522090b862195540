use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

/// Placeholder written into empty `country` / `director` / `cast` cells.
pub const UNKNOWN: &str = "Unknown";

/// Columns every catalog file must carry.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "type",
    "title",
    "director",
    "cast",
    "country",
    "date_added",
    "release_year",
    "duration",
    "listed_in",
];

/// Columns computed by the cleaner and appended on export.
pub const DERIVED_COLUMNS: [&str; 2] = ["year_added", "month_added"];

/// Separator between genres in `listed_in`.
pub const GENRE_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentType {
    Movie,
    TvShow,
}

impl ContentType {
    /// Parse the `type` column. Accepts `"TVShow"` next to the catalog's
    /// `"TV Show"`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Movie" => Some(ContentType::Movie),
            "TV Show" | "TVShow" => Some(ContentType::TvShow),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TitleRecord – one row of the catalog
// ---------------------------------------------------------------------------

/// A single catalog item.
///
/// Fields below `release_year` marked "derived" are filled by
/// [`clean`](super::clean::clean); right after loading they are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TitleRecord {
    pub content_type: ContentType,
    pub title: String,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    /// `date_added` exactly as stored in the source file.
    pub date_added_raw: Option<String>,
    /// Derived: parsed `date_added_raw`, `None` when absent or unparsable.
    pub date_added: Option<NaiveDate>,
    /// Derived from `date_added`.
    pub year_added: Option<i32>,
    /// Derived from `date_added`, 1-based.
    pub month_added: Option<u32>,
    pub release_year: i32,
    /// Raw duration text, e.g. `"90 min"` or `"3 Seasons"`.
    pub duration: Option<String>,
    /// Raw comma-separated genre list.
    pub listed_in: Option<String>,
    /// Derived: `listed_in` split on `", "`.
    pub genres: Vec<String>,
    /// Pass-through columns (`show_id`, `rating`, `description`, ...).
    pub extra: BTreeMap<String, Option<String>>,
}

impl TitleRecord {
    /// A record with only the mandatory fields set.
    pub fn new(content_type: ContentType, title: impl Into<String>, release_year: i32) -> Self {
        TitleRecord {
            content_type,
            title: title.into(),
            director: None,
            cast: None,
            country: None,
            date_added_raw: None,
            date_added: None,
            year_added: None,
            month_added: None,
            release_year,
            duration: None,
            listed_in: None,
            genres: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn show_id(&self) -> Option<&str> {
        self.extra.get("show_id").and_then(|v| v.as_deref())
    }

    /// Country bucket used for aggregation.
    pub fn country_label(&self) -> &str {
        self.country.as_deref().unwrap_or(UNKNOWN)
    }

    /// Running time in minutes. Only defined for movies.
    pub fn duration_minutes(&self) -> Option<u32> {
        match self.content_type {
            ContentType::Movie => self.duration.as_deref().and_then(leading_number),
            ContentType::TvShow => None,
        }
    }

    /// Number of seasons. Only defined for TV shows.
    pub fn num_seasons(&self) -> Option<u32> {
        match self.content_type {
            ContentType::TvShow => self.duration.as_deref().and_then(leading_number),
            ContentType::Movie => None,
        }
    }

    /// Text form of a column as it is written on export. Unknown column
    /// names are looked up among the pass-through columns.
    pub fn cell(&self, column: &str) -> Option<String> {
        match column {
            "type" => Some(self.content_type.to_string()),
            "title" => Some(self.title.clone()),
            "director" => self.director.clone(),
            "cast" => self.cast.clone(),
            "country" => self.country.clone(),
            "date_added" => self.date_added.map(|d| d.format("%Y-%m-%d").to_string()),
            "year_added" => self.year_added.map(|y| y.to_string()),
            "month_added" => self.month_added.map(|m| m.to_string()),
            "release_year" => Some(self.release_year.to_string()),
            "duration" => self.duration.clone(),
            "listed_in" => self.listed_in.clone(),
            other => self.extra.get(other).cloned().flatten(),
        }
    }
}

/// First run of ASCII digits in `s` (`"90 min"` → 90, `"3 Seasons"` → 3).
pub fn leading_number(s: &str) -> Option<u32> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let digits = &s[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}

// ---------------------------------------------------------------------------
// Catalog – the complete loaded table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Source column names in file order (derived columns excluded).
    pub columns: Vec<String>,
    pub records: Vec<TitleRecord>,
}

impl Catalog {
    pub fn new(columns: Vec<String>, records: Vec<TitleRecord>) -> Self {
        Catalog { columns, records }
    }

    /// Number of titles.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Column order used on export: source columns, then derived ones.
    pub fn export_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .cloned()
            .chain(DERIVED_COLUMNS.iter().map(|c| c.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_accepts_both_spellings() {
        assert_eq!(ContentType::parse("Movie"), Some(ContentType::Movie));
        assert_eq!(ContentType::parse("TV Show"), Some(ContentType::TvShow));
        assert_eq!(ContentType::parse(" TVShow "), Some(ContentType::TvShow));
        assert_eq!(ContentType::parse("Podcast"), None);
        assert_eq!(ContentType::TvShow.to_string(), "TV Show");
    }

    #[test]
    fn leading_number_takes_first_digit_run() {
        assert_eq!(leading_number("90 min"), Some(90));
        assert_eq!(leading_number("3 Seasons"), Some(3));
        assert_eq!(leading_number("1 Season"), Some(1));
        assert_eq!(leading_number("approx. 45 min"), Some(45));
        assert_eq!(leading_number("min"), None);
        assert_eq!(leading_number(""), None);
    }

    #[test]
    fn duration_fields_follow_content_type() {
        let mut movie = TitleRecord::new(ContentType::Movie, "Heat", 1995);
        movie.duration = Some("170 min".into());
        assert_eq!(movie.duration_minutes(), Some(170));
        assert_eq!(movie.num_seasons(), None);

        let mut show = TitleRecord::new(ContentType::TvShow, "Dark", 2017);
        show.duration = Some("3 Seasons".into());
        assert_eq!(show.num_seasons(), Some(3));
        assert_eq!(show.duration_minutes(), None);
    }

    #[test]
    fn cell_falls_back_to_pass_through_columns() {
        let mut rec = TitleRecord::new(ContentType::Movie, "Heat", 1995);
        rec.extra.insert("show_id".into(), Some("s1".into()));
        rec.extra.insert("rating".into(), None);
        rec.date_added = NaiveDate::from_ymd_opt(2021, 9, 25);

        assert_eq!(rec.cell("show_id").as_deref(), Some("s1"));
        assert_eq!(rec.show_id(), Some("s1"));
        assert_eq!(rec.cell("rating"), None);
        assert_eq!(rec.cell("date_added").as_deref(), Some("2021-09-25"));
        assert_eq!(rec.cell("release_year").as_deref(), Some("1995"));
        assert_eq!(rec.country_label(), UNKNOWN);
    }
}
