//! Data layer: catalog types, loading, cleaning, aggregation and export.
//!
//! Architecture:
//! ```text
//!  netflix_titles.csv / .parquet
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Catalog (raw cells, required columns checked)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  clean    │  fill "Unknown", parse dates, split genres → CleanReport
//!   └──────────┘
//!        │
//!        ├──────────────────────────┐
//!        ▼                          ▼
//!   ┌──────────┐              ┌──────────┐
//!   │  filter   │ All/Movie/TV │  export   │  → netflix_cleaned.csv
//!   └──────────┘              └──────────┘
//!        │
//!        ▼
//!   ┌───────────┐
//!   │ aggregate  │  genre / year / country / duration counts
//!   └───────────┘
//! ```
//!
//! `cache` wraps loader + clean for callers that reload the same file.

pub mod aggregate;
pub mod cache;
pub mod clean;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;

pub use error::CatalogError;
