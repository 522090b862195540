use chrono::{Datelike, NaiveDate};

use super::error::CatalogError;
use super::model::{Catalog, TitleRecord, GENRE_SEPARATOR, UNKNOWN};

/// Textual forms `date_added` is stored in. The first entry is the one the
/// raw catalog uses; the ISO forms are what [`export`](super::export) writes.
const DATE_FORMATS: [&str; 6] = [
    "%B %d, %Y",
    "%b %d, %Y",
    "%Y-%m-%d",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y",
    "%d-%b-%y",
];

/// Per-row problems the cleaner tolerated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    /// `country` / `director` / `cast` cells replaced with "Unknown".
    pub filled_unknown: usize,
    /// Rows whose `date_added` text could not be parsed.
    pub unparsed_dates: usize,
    /// Rows without any `date_added` text.
    pub missing_dates: usize,
    /// Rows whose duration carries no number.
    pub unparsed_durations: usize,
    /// Rows with an empty `listed_in`.
    pub empty_genres: usize,
}

impl CleanReport {
    /// Rows that lost a value to a parse failure.
    pub fn parse_failures(&self) -> usize {
        self.unparsed_dates + self.unparsed_durations
    }
}

/// Clean a freshly loaded catalog in place.
///
/// Every step is idempotent, so cleaning an already cleaned catalog leaves it
/// unchanged.
pub fn clean(catalog: &mut Catalog) -> Result<CleanReport, CatalogError> {
    let missing: Vec<String> = ["listed_in", "date_added"]
        .into_iter()
        .filter(|c| !catalog.has_column(c))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::Schema { missing });
    }

    let mut report = CleanReport::default();
    for record in &mut catalog.records {
        report.filled_unknown += fill_unknown(record);

        let parsed = parse_date_added(record);
        match (record.date_added_raw.is_some(), parsed) {
            (false, _) => report.missing_dates += 1,
            (true, None) => report.unparsed_dates += 1,
            (true, Some(_)) => {}
        }
        derive_calendar_parts(record);

        split_genres(record);
        if record.genres.iter().all(String::is_empty) {
            report.empty_genres += 1;
        }

        if record.duration_minutes().or(record.num_seasons()).is_none() {
            report.unparsed_durations += 1;
        }
    }

    log::info!(
        "Cleaned {} titles ({} cells filled with \"{UNKNOWN}\")",
        catalog.len(),
        report.filled_unknown
    );
    if report.unparsed_dates > 0 {
        log::warn!("{} rows have an unparsable date_added", report.unparsed_dates);
    }
    if report.unparsed_durations > 0 {
        log::warn!("{} rows have no numeric duration", report.unparsed_durations);
    }
    if report.empty_genres > 0 {
        log::warn!("{} rows have an empty listed_in", report.empty_genres);
    }

    Ok(report)
}

/// Replace missing `country`, `director` and `cast` with "Unknown".
/// Returns the number of cells filled.
pub fn fill_unknown(record: &mut TitleRecord) -> usize {
    let mut filled = 0;
    for field in [&mut record.country, &mut record.director, &mut record.cast] {
        if field.is_none() {
            *field = Some(UNKNOWN.to_string());
            filled += 1;
        }
    }
    filled
}

/// Parse `date_added_raw` into `date_added`.
pub fn parse_date_added(record: &mut TitleRecord) -> Option<NaiveDate> {
    record.date_added = record.date_added_raw.as_deref().and_then(parse_date);
    record.date_added
}

pub fn derive_calendar_parts(record: &mut TitleRecord) {
    record.year_added = record.date_added.map(|d| d.year());
    record.month_added = record.date_added.map(|d| d.month());
}

/// Split `listed_in` on `", "`. An empty list still yields one (empty) genre.
pub fn split_genres(record: &mut TitleRecord) {
    record.genres = record
        .listed_in
        .as_deref()
        .unwrap_or("")
        .split(GENRE_SEPARATOR)
        .map(str::to_string)
        .collect();
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(t, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::{duration_distribution, DurationDistribution};
    use crate::data::filter::TypeFilter;
    use crate::data::loader::parse_csv;
    use std::path::Path;

    const HEADER: &str =
        "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description";

    fn load(body: &str) -> Catalog {
        let text = format!("{HEADER}\n{body}");
        parse_csv(text.as_bytes(), Path::new("test.csv")).unwrap()
    }

    #[test]
    fn parses_catalog_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2021, 9, 25);
        assert_eq!(parse_date("September 25, 2021"), expected);
        assert_eq!(parse_date(" September 25, 2021 "), expected);
        assert_eq!(parse_date("Sep 25, 2021"), expected);
        assert_eq!(parse_date("2021-09-25"), expected);
        assert_eq!(parse_date("09/25/2021"), expected);
        assert_eq!(parse_date("August 4, 2017"), NaiveDate::from_ymd_opt(2017, 8, 4));
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn cleans_movie_with_missing_country() {
        let mut catalog = load("s1,Movie,Heat,,,,,2020,,90 min,\"Drama, Comedy\",\n");
        let report = clean(&mut catalog).unwrap();

        let rec = &catalog.records[0];
        assert_eq!(rec.country.as_deref(), Some("Unknown"));
        assert_eq!(rec.director.as_deref(), Some("Unknown"));
        assert_eq!(rec.cast.as_deref(), Some("Unknown"));
        assert_eq!(rec.genres, vec!["Drama", "Comedy"]);
        assert_eq!(report.filled_unknown, 3);
        assert_eq!(report.missing_dates, 1);

        match duration_distribution(&catalog.records, TypeFilter::Movie) {
            DurationDistribution::Minutes(values) => assert!(values.contains(&90)),
            other => panic!("expected minutes, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_date_keeps_the_row() {
        let mut catalog = load(
            "s1,Movie,Heat,,,,not-a-date,1995,,170 min,Dramas,\n\
             s2,Movie,Ronin,,,,\"July 1, 2019\",1998,,122 min,Action,\n",
        );
        let report = clean(&mut catalog).unwrap();

        assert_eq!(catalog.len(), 2);
        let bad = &catalog.records[0];
        assert_eq!(bad.date_added, None);
        assert_eq!(bad.year_added, None);
        assert_eq!(bad.month_added, None);

        let good = &catalog.records[1];
        assert_eq!(good.year_added, Some(2019));
        assert_eq!(good.month_added, Some(7));
        assert_eq!(report.unparsed_dates, 1);
    }

    #[test]
    fn empty_listed_in_yields_one_empty_genre() {
        let mut catalog = load("s1,TV Show,Untitled,,,,,2020,,1 Season,,\n");
        let report = clean(&mut catalog).unwrap();
        assert_eq!(catalog.records[0].genres, vec![String::new()]);
        assert_eq!(report.empty_genres, 1);
    }

    #[test]
    fn counts_durations_without_a_number() {
        let mut catalog = load(
            "s1,Movie,Louis C.K. 2017,,,,,2017,74 min,,Movies,\n\
             s2,TV Show,Dark,,,,,2017,,3 Seasons,TV Dramas,\n",
        );
        let report = clean(&mut catalog).unwrap();
        assert_eq!(report.unparsed_durations, 1);
        assert_eq!(report.parse_failures(), 1);
    }

    #[test]
    fn cleaning_is_idempotent() {
        let mut catalog = load(
            "s1,Movie,Heat,,,,\"December 15, 1995\",1995,,170 min,\"Dramas, Thrillers\",\n\
             s2,TV Show,Dark,Baran bo Odar,,Germany,garbage,2017,,3 Seasons,TV Dramas,\n",
        );
        clean(&mut catalog).unwrap();
        let once = catalog.clone();

        let second = clean(&mut catalog).unwrap();
        assert_eq!(catalog, once);
        assert_eq!(second.filled_unknown, 0);
    }

    #[test]
    fn missing_source_columns_are_fatal() {
        let mut catalog = Catalog::new(
            vec!["type".into(), "title".into(), "release_year".into()],
            Vec::new(),
        );
        let err = clean(&mut catalog).unwrap_err();
        assert!(
            matches!(&err, CatalogError::Schema { missing } if missing == &["listed_in", "date_added"]),
            "{err:?}"
        );
    }
}
