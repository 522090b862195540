use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::CatalogError;
use super::model::{
    Catalog, ContentType, TitleRecord, DERIVED_COLUMNS, REQUIRED_COLUMNS,
};

/// A row of raw cells; empty cells are `None`.
type RawRow = Vec<Option<String>>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the catalog column names
/// * `.parquet` – any column types; every column is read as text
pub fn load_file(path: &Path) -> Result<Catalog, CatalogError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let catalog = match ext.as_str() {
        "csv" => load_csv(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
    };
    log::info!("Loaded {} titles from {}", catalog.len(), path.display());
    Ok(catalog)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Catalog, CatalogError> {
    let file = File::open(path).map_err(|e| CatalogError::data_source(path, e))?;
    parse_csv(file, path)
}

/// Parse CSV text into a catalog. `origin` is only used in error messages.
pub fn parse_csv<R: Read>(reader: R, origin: &Path) -> Result<Catalog, CatalogError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CatalogError::data_source(origin, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| CatalogError::data_source(origin, e))?;
        rows.push(record.iter().map(cell).collect());
    }

    build_catalog(origin, headers, rows)
}

fn cell(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet catalog. Columns of any primitive type are cast to text so
/// that Parquet and CSV input share one row builder.
fn load_parquet(path: &Path) -> Result<Catalog, CatalogError> {
    let file = File::open(path).map_err(|e| CatalogError::data_source(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| CatalogError::data_source(path, e))?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder
        .build()
        .map_err(|e| CatalogError::data_source(path, e))?;

    let mut rows: Vec<RawRow> = Vec::new();
    for batch_result in reader {
        let batch = batch_result.map_err(|e| CatalogError::data_source(path, e))?;
        let text_columns: Vec<ArrayRef> = batch
            .columns()
            .iter()
            .map(|col| cast(col.as_ref(), &DataType::Utf8))
            .collect::<Result<_, _>>()
            .map_err(|e| CatalogError::data_source(path, e))?;

        for row in 0..batch.num_rows() {
            rows.push(
                text_columns
                    .iter()
                    .map(|col| {
                        let strings = col.as_string::<i32>();
                        if strings.is_null(row) {
                            None
                        } else {
                            cell(strings.value(row))
                        }
                    })
                    .collect(),
            );
        }
    }

    build_catalog(path, headers, rows)
}

// ---------------------------------------------------------------------------
// Row building (shared by all formats)
// ---------------------------------------------------------------------------

fn build_catalog(
    origin: &Path,
    headers: Vec<String>,
    rows: Vec<RawRow>,
) -> Result<Catalog, CatalogError> {
    let present: HashSet<&str> = headers.iter().map(String::as_str).collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !present.contains(*c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(CatalogError::Schema { missing });
    }

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, cells)| parse_record(origin, &headers, i + 1, cells))
        .collect::<Result<Vec<_>, _>>()?;

    let columns = headers
        .into_iter()
        .filter(|h| !DERIVED_COLUMNS.contains(&h.as_str()))
        .collect();

    Ok(Catalog::new(columns, records))
}

fn parse_record(
    origin: &Path,
    headers: &[String],
    row: usize,
    cells: RawRow,
) -> Result<TitleRecord, CatalogError> {
    let malformed = |reason: String| CatalogError::Malformed {
        path: origin.to_path_buf(),
        row,
        reason,
    };

    let mut fields: BTreeMap<String, Option<String>> =
        headers.iter().cloned().zip(cells).collect();

    let raw_type = take(&mut fields, "type").ok_or_else(|| malformed("missing type".into()))?;
    let content_type = ContentType::parse(&raw_type)
        .ok_or_else(|| malformed(format!("unknown content type '{raw_type}'")))?;
    let title = take(&mut fields, "title").ok_or_else(|| malformed("missing title".into()))?;
    let raw_year = take(&mut fields, "release_year")
        .ok_or_else(|| malformed("missing release_year".into()))?;
    let release_year = parse_year(&raw_year)
        .ok_or_else(|| malformed(format!("release_year '{raw_year}' is not a year")))?;

    let mut record = TitleRecord::new(content_type, title, release_year);
    record.director = take(&mut fields, "director");
    record.cast = take(&mut fields, "cast");
    record.country = take(&mut fields, "country");
    record.date_added_raw = take(&mut fields, "date_added");
    record.duration = take(&mut fields, "duration");
    record.listed_in = take(&mut fields, "listed_in");

    // Stale derived values from a previously cleaned file are recomputed.
    for derived in DERIVED_COLUMNS {
        fields.remove(derived);
    }
    record.extra = fields;

    Ok(record)
}

fn take(fields: &mut BTreeMap<String, Option<String>>, name: &str) -> Option<String> {
    fields.remove(name).flatten()
}

/// Accepts `"2020"` as well as `"2020.0"` (float columns written by pandas).
fn parse_year(s: &str) -> Option<i32> {
    let s = s.trim();
    s.parse::<i32>().ok().or_else(|| {
        s.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .map(|f| f as i32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description";

    fn parse(body: &str) -> Result<Catalog, CatalogError> {
        let text = format!("{HEADER}\n{body}");
        parse_csv(text.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn parses_required_and_pass_through_columns() {
        let catalog = parse(
            "s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,\"September 25, 2021\",2020,PG-13,90 min,Documentaries,A film.\n\
             s2,TV Show,Blood & Water,,\"Ama Qamata, Khosi Ngema\",South Africa,\"September 24, 2021\",2021,TV-MA,2 Seasons,\"International TV Shows, TV Dramas\",After crossing paths.\n",
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.columns.len(), 12);

        let movie = &catalog.records[0];
        assert_eq!(movie.content_type, ContentType::Movie);
        assert_eq!(movie.cast, None);
        assert_eq!(movie.date_added_raw.as_deref(), Some("September 25, 2021"));
        assert_eq!(movie.show_id(), Some("s1"));
        assert_eq!(movie.extra.get("rating"), Some(&Some("PG-13".to_string())));

        let show = &catalog.records[1];
        assert_eq!(show.content_type, ContentType::TvShow);
        assert_eq!(show.director, None);
        assert_eq!(show.listed_in.as_deref(), Some("International TV Shows, TV Dramas"));
        // Not derived yet.
        assert!(show.genres.is_empty());
    }

    #[test]
    fn missing_columns_are_a_schema_error() {
        let text = "type,title,release_year\nMovie,Heat,1995\n";
        let err = parse_csv(text.as_bytes(), Path::new("test.csv")).unwrap_err();
        match err {
            CatalogError::Schema { missing } => {
                assert_eq!(
                    missing,
                    vec!["director", "cast", "country", "date_added", "duration", "listed_in"]
                );
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn bad_required_values_name_the_row() {
        let err = parse(
            "s1,Movie,Heat,,,,,1995,R,170 min,Dramas,\n\
             s2,Podcast,Serial,,,,,2014,,,Crime,\n",
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { row: 2, .. }), "{err:?}");

        let err = parse("s1,Movie,Heat,,,,,soon,R,170 min,Dramas,\n").unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { row: 1, .. }), "{err:?}");
    }

    #[test]
    fn ragged_rows_are_a_data_source_error() {
        let err = parse("s1,Movie,Heat\n").unwrap_err();
        assert!(matches!(err, CatalogError::DataSource { .. }), "{err:?}");
    }

    #[test]
    fn derived_columns_are_dropped_on_load() {
        let text = "type,title,director,cast,country,date_added,release_year,duration,listed_in,year_added,month_added\n\
                    Movie,Heat,Michael Mann,Unknown,United States,1995-12-15,1995.0,170 min,Dramas,1995.0,12.0\n";
        let catalog = parse_csv(text.as_bytes(), Path::new("cleaned.csv")).unwrap();
        assert!(!catalog.has_column("year_added"));
        assert!(!catalog.has_column("month_added"));
        let rec = &catalog.records[0];
        assert_eq!(rec.release_year, 1995);
        assert!(rec.extra.is_empty());
        assert_eq!(rec.year_added, None);
    }

    #[test]
    fn load_file_reports_missing_and_unsupported_files() {
        let err = load_file(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::DataSource { .. }));

        let err = load_file(Path::new("catalog.xlsx")).unwrap_err();
        assert!(matches!(err, CatalogError::UnsupportedFormat(ext) if ext == "xlsx"));
    }

    #[test]
    fn load_file_reads_csv_from_disk() {
        let mut tmp = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(tmp, "{HEADER}").unwrap();
        writeln!(tmp, "s1,Movie,Heat,,,,,1995,R,170 min,Dramas,").unwrap();
        tmp.flush().unwrap();

        let catalog = load_file(tmp.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records[0].title, "Heat");
    }
}
