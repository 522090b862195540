use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use super::clean::{clean, CleanReport};
use super::error::CatalogError;
use super::loader::load_file;
use super::model::Catalog;

/// Identity of a loaded file: its path and last modification time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl CacheKey {
    pub fn for_path(path: &Path) -> Result<Self, CatalogError> {
        let modified = std::fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map_err(|e| CatalogError::data_source(path, e))?;
        Ok(CacheKey {
            path: path.to_path_buf(),
            modified,
        })
    }
}

/// A cleaned catalog together with what the cleaner tolerated.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Arc<Catalog>,
    pub report: CleanReport,
}

/// Keeps the most recently loaded and cleaned catalog.
///
/// The entry is reused while both the path and the file's modification time
/// are unchanged; any change reloads and re-cleans the file.
#[derive(Debug, Default)]
pub struct CatalogCache {
    entry: Option<(CacheKey, LoadedCatalog)>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<LoadedCatalog, CatalogError> {
        let key = CacheKey::for_path(path)?;
        if let Some((cached_key, loaded)) = &self.entry {
            if *cached_key == key {
                log::debug!("Catalog cache hit for {}", path.display());
                return Ok(loaded.clone());
            }
        }

        let mut catalog = load_file(path)?;
        let report = clean(&mut catalog)?;
        let loaded = LoadedCatalog {
            catalog: Arc::new(catalog),
            report,
        };
        self.entry = Some((key, loaded.clone()));
        Ok(loaded)
    }

    /// Whether `path` is cached under its current modification time.
    pub fn is_fresh(&self, path: &Path) -> bool {
        match (&self.entry, CacheKey::for_path(path)) {
            (Some((cached_key, _)), Ok(key)) => *cached_key == key,
            _ => false,
        }
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;

    const CSV: &str = "type,title,director,cast,country,date_added,release_year,duration,listed_in\n\
                       Movie,Heat,,,,\"December 15, 1995\",1995,170 min,Dramas\n";

    fn write_catalog(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("titles.csv");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reuses_catalog_while_file_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(dir.path(), CSV);
        let mut cache = CatalogCache::new();

        let first = cache.load(&path).unwrap();
        let second = cache.load(&path).unwrap();
        assert!(Arc::ptr_eq(&first.catalog, &second.catalog));
        assert!(cache.is_fresh(&path));
        assert_eq!(first.catalog.records[0].country.as_deref(), Some("Unknown"));
    }

    #[test]
    fn reloads_when_modification_time_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(dir.path(), CSV);
        let mut cache = CatalogCache::new();
        let first = cache.load(&path).unwrap();

        std::fs::write(&path, format!("{CSV}TV Show,Dark,,,Germany,,2017,3 Seasons,TV Dramas\n")).unwrap();
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(SystemTime::now() + Duration::from_secs(60))
            .unwrap();
        assert!(!cache.is_fresh(&path));

        let second = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first.catalog, &second.catalog));
        assert_eq!(second.catalog.len(), 2);
    }

    #[test]
    fn invalidate_forces_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_catalog(dir.path(), CSV);
        let mut cache = CatalogCache::new();

        let first = cache.load(&path).unwrap();
        cache.invalidate();
        assert!(!cache.is_fresh(&path));
        let second = cache.load(&path).unwrap();
        assert!(!Arc::ptr_eq(&first.catalog, &second.catalog));
        assert_eq!(*first.catalog, *second.catalog);
    }

    #[test]
    fn missing_file_is_a_data_source_error() {
        let mut cache = CatalogCache::new();
        let err = cache.load(Path::new("no/such/catalog.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::DataSource { .. }));
    }
}
