use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::export::CLEANED_FILE;

/// Default raw catalog read by the batch cleaner.
pub const RAW_FILE: &str = "netflix_titles.csv";

/// Runtime settings shared by the batch cleaner and the dashboard.
///
/// Read from an optional JSON file; missing keys keep their defaults:
///
/// ```json
/// { "raw_path": "data/netflix_titles.csv", "top_k": 15 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Raw catalog read by `clean_titles`.
    pub raw_path: PathBuf,
    /// Cleaned catalog written by `clean_titles` and opened by the dashboard.
    pub cleaned_path: PathBuf,
    /// Rows in the top-genre and top-country charts.
    pub top_k: usize,
    /// Bins of the movie duration histogram.
    pub movie_bins: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            raw_path: PathBuf::from(RAW_FILE),
            cleaned_path: PathBuf::from(CLEANED_FILE),
            top_k: 10,
            movie_bins: 30,
        }
    }
}

impl Settings {
    /// Settings from `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings file {}", path.display()))?;
        let settings: Settings = serde_json::from_str(&text)
            .with_context(|| format!("parsing settings file {}", path.display()))?;
        log::debug!("Loaded settings from {}: {settings:?}", path.display());
        Ok(settings)
    }
}
