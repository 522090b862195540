//! Plain-text tables for the batch cleaner, rendered with Arrow's
//! pretty-printer.

use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::aggregate::HistogramBin;
use crate::data::export::records_to_batch;
use crate::data::model::Catalog;

/// Columns shown by [`preview`] when the catalog has them.
const PREVIEW_COLUMNS: [&str; 7] = [
    "show_id",
    "type",
    "title",
    "country",
    "date_added",
    "release_year",
    "duration",
];

fn render(batch: RecordBatch) -> Result<String, ArrowError> {
    Ok(pretty_format_batches(&[batch])?.to_string())
}

/// The first `n` titles.
pub fn preview(catalog: &Catalog, n: usize) -> Result<String, ArrowError> {
    let all = catalog.export_columns();
    let columns: Vec<String> = PREVIEW_COLUMNS
        .iter()
        .filter(|c| all.iter().any(|a| a == *c))
        .map(|c| c.to_string())
        .collect();
    let head = &catalog.records[..n.min(catalog.len())];
    render(records_to_batch(&columns, head)?)
}

/// Non-null and null cell counts per exported column.
pub fn column_summary(catalog: &Catalog) -> Result<String, ArrowError> {
    let columns = catalog.export_columns();
    let non_null: Vec<u64> = columns
        .iter()
        .map(|c| {
            catalog
                .records
                .iter()
                .filter(|r| r.cell(c).is_some())
                .count() as u64
        })
        .collect();
    let null: Vec<u64> = non_null
        .iter()
        .map(|n| catalog.len() as u64 - n)
        .collect();

    let batch = RecordBatch::try_from_iter(vec![
        ("column", Arc::new(StringArray::from(columns)) as ArrayRef),
        ("non_null", Arc::new(UInt64Array::from(non_null)) as ArrayRef),
        ("null", Arc::new(UInt64Array::from(null)) as ArrayRef),
    ])?;
    render(batch)
}

/// A two-column `(label, count)` table.
pub fn counts_table<K: ToString>(label: &str, rows: &[(K, usize)]) -> Result<String, ArrowError> {
    let keys: Vec<String> = rows.iter().map(|(k, _)| k.to_string()).collect();
    let counts: Vec<u64> = rows.iter().map(|(_, c)| *c as u64).collect();
    let batch = RecordBatch::try_from_iter(vec![
        (label, Arc::new(StringArray::from(keys)) as ArrayRef),
        ("count", Arc::new(UInt64Array::from(counts)) as ArrayRef),
    ])?;
    render(batch)
}

/// Histogram bins as `start-end | count` rows.
pub fn histogram_table(label: &str, bins: &[HistogramBin]) -> Result<String, ArrowError> {
    let rows: Vec<(String, usize)> = bins
        .iter()
        .map(|b| (format!("{:.0}-{:.0}", b.start, b.end), b.count))
        .collect();
    counts_table(label, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean::clean;
    use crate::data::loader::parse_csv;
    use std::path::Path;

    fn catalog() -> Catalog {
        let text = "show_id,type,title,director,cast,country,date_added,release_year,duration,listed_in\n\
                    s1,Movie,Heat,,,United States,\"December 15, 1995\",1995,170 min,Dramas\n\
                    s2,TV Show,Dark,,,Germany,,2017,3 Seasons,TV Dramas\n\
                    s3,Movie,Ronin,,,,,1998,122 min,Action\n";
        let mut catalog = parse_csv(text.as_bytes(), Path::new("test.csv")).unwrap();
        clean(&mut catalog).unwrap();
        catalog
    }

    #[test]
    fn preview_shows_only_the_head() {
        let table = preview(&catalog(), 2).unwrap();
        assert!(table.contains("Heat"));
        assert!(table.contains("Dark"));
        assert!(!table.contains("Ronin"));
        assert!(table.contains("release_year"));
    }

    #[test]
    fn column_summary_counts_nulls() {
        let table = column_summary(&catalog()).unwrap();
        let date_line = table
            .lines()
            .find(|l| l.contains("| date_added"))
            .unwrap();
        assert!(date_line.contains("| 1 "), "{date_line}");
        assert!(date_line.contains("| 2 "), "{date_line}");
    }

    #[test]
    fn counts_table_lists_rows_in_order() {
        let table = counts_table("genre", &[("Dramas", 3), ("Action", 1)]).unwrap();
        let dramas = table.find("Dramas").unwrap();
        let action = table.find("Action").unwrap();
        assert!(dramas < action);
        assert!(table.contains("| genre"));
    }

    #[test]
    fn histogram_table_labels_bin_ranges() {
        let bins = [HistogramBin {
            start: 90.0,
            end: 100.0,
            count: 4,
        }];
        let table = histogram_table("minutes", &bins).unwrap();
        assert!(table.contains("90-100"));
    }
}
