use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use super::error::CatalogError;
use super::model::{Catalog, TitleRecord};

/// Default output of the batch cleaner and input of the dashboard.
pub const CLEANED_FILE: &str = "netflix_cleaned.csv";

/// Columns stored as integers in Parquet output.
const INTEGER_COLUMNS: [&str; 3] = ["release_year", "year_added", "month_added"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write a cleaned catalog, replacing any existing file.  Dispatch by
/// extension: `.parquet` / `.pq` write Parquet, anything else CSV.
///
/// All source columns are written in their original order, followed by
/// `year_added` and `month_added`.
pub fn export_file(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => export_parquet(catalog, path)?,
        _ => export_csv(catalog, path)?,
    }
    log::info!("Wrote {} titles to {}", catalog.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV writer
// ---------------------------------------------------------------------------

fn export_csv(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    let columns = catalog.export_columns();
    let mut writer = csv::Writer::from_path(path).map_err(|e| CatalogError::write(path, e))?;

    writer
        .write_record(&columns)
        .map_err(|e| CatalogError::write(path, e))?;
    for record in &catalog.records {
        writer
            .write_record(columns.iter().map(|c| record.cell(c).unwrap_or_default()))
            .map_err(|e| CatalogError::write(path, e))?;
    }
    writer.flush().map_err(|e| CatalogError::write(path, e))
}

// ---------------------------------------------------------------------------
// Parquet writer
// ---------------------------------------------------------------------------

fn export_parquet(catalog: &Catalog, path: &Path) -> Result<(), CatalogError> {
    let batch = records_to_batch(&catalog.export_columns(), &catalog.records)
        .map_err(|e| CatalogError::write(path, e))?;

    let file = File::create(path).map_err(|e| CatalogError::write(path, e))?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).map_err(|e| CatalogError::write(path, e))?;
    writer
        .write(&batch)
        .map_err(|e| CatalogError::write(path, e))?;
    writer.close().map_err(|e| CatalogError::write(path, e))?;
    Ok(())
}

/// Build an Arrow batch with the given columns of `records`.
pub fn records_to_batch(
    columns: &[String],
    records: &[TitleRecord],
) -> Result<RecordBatch, ArrowError> {
    let mut fields = Vec::with_capacity(columns.len());
    let mut arrays: Vec<ArrayRef> = Vec::with_capacity(columns.len());

    for name in columns {
        let values: Vec<Option<String>> = records.iter().map(|r| r.cell(name)).collect();
        if INTEGER_COLUMNS.contains(&name.as_str()) {
            let ints: Vec<Option<i64>> = values
                .iter()
                .map(|v| v.as_deref().and_then(|s| s.parse().ok()))
                .collect();
            fields.push(Field::new(name, DataType::Int64, true));
            arrays.push(Arc::new(Int64Array::from(ints)));
        } else {
            fields.push(Field::new(name, DataType::Utf8, true));
            arrays.push(Arc::new(StringArray::from(values)));
        }
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
}
