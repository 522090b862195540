//! Netflix catalog pipeline: load, clean, aggregate and export the titles
//! table. The dashboard (`netflix-eda`) and the batch cleaner
//! (`clean_titles`) are thin front ends over this crate.

pub mod data;
pub mod report;
pub mod settings;

pub use data::CatalogError;
pub use settings::Settings;
