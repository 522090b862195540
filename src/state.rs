use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use netflix_eda::data::aggregate::{histogram, DurationDistribution, HistogramBin, Summary};
use netflix_eda::data::cache::{CatalogCache, LoadedCatalog};
use netflix_eda::data::clean::CleanReport;
use netflix_eda::data::filter::{filtered_indices, TypeFilter};
use netflix_eda::data::model::{Catalog, TitleRecord};
use netflix_eda::Settings;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub settings: Settings,

    /// Loaded and cleaned catalogs, keyed by path and modification time.
    pub cache: CatalogCache,

    /// File the current catalog came from.
    pub source: Option<PathBuf>,

    /// Current catalog (None until a file loaded successfully).
    pub catalog: Option<Arc<Catalog>>,

    /// What the cleaner tolerated while loading `catalog`.
    pub report: CleanReport,

    /// Content-type selection.
    pub type_filter: TypeFilter,

    /// Indices of titles passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    /// Aggregates of the visible titles (cached).
    pub summary: Summary,

    /// Movie histogram, only when the movie filter is active.
    pub duration_bins: Vec<HistogramBin>,

    /// Genre colours, stable across filter changes.
    pub genre_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            cache: CatalogCache::new(),
            source: None,
            catalog: None,
            report: CleanReport::default(),
            type_filter: TypeFilter::default(),
            visible_indices: Vec::new(),
            summary: Summary::default(),
            duration_bins: Vec::new(),
            genre_colors: None,
            status_message: None,
        }
    }

    /// Load (or reuse from cache) the catalog at `path`.
    pub fn open(&mut self, path: &Path) {
        match self.cache.load(path) {
            Ok(loaded) => self.set_catalog(path, loaded),
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Re-open the current file; only re-parses it if it changed on disk.
    pub fn reload(&mut self) {
        if let Some(path) = self.source.clone() {
            self.open(&path);
        }
    }

    /// Drop the cached catalog and re-read the current file.
    pub fn force_reload(&mut self) {
        self.cache.invalidate();
        self.reload();
    }

    fn set_catalog(&mut self, path: &Path, loaded: LoadedCatalog) {
        let genres: BTreeSet<String> = loaded
            .catalog
            .records
            .iter()
            .flat_map(|r| r.genres.iter())
            .filter(|g| !g.is_empty())
            .cloned()
            .collect();
        self.genre_colors = Some(ColorMap::new(&genres));

        self.source = Some(path.to_path_buf());
        self.catalog = Some(loaded.catalog);
        self.report = loaded.report;
        self.status_message = None;
        self.refilter();
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) {
        if self.type_filter != filter {
            self.type_filter = filter;
            self.refilter();
        }
    }

    /// Recompute `visible_indices` and the aggregates after a filter change.
    pub fn refilter(&mut self) {
        let Some(catalog) = &self.catalog else {
            return;
        };
        self.visible_indices = filtered_indices(catalog, self.type_filter);
        let titles: Vec<&TitleRecord> = self
            .visible_indices
            .iter()
            .map(|&i| &catalog.records[i])
            .collect();

        self.summary = Summary::compute(&titles, self.type_filter, self.settings.top_k);
        self.duration_bins = match &self.summary.durations {
            DurationDistribution::Minutes(minutes) => histogram(minutes, self.settings.movie_bins),
            _ => Vec::new(),
        };
    }
}
