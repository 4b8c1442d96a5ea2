//! Load-once cache for the sales dataset.
//!
//! A `DataStore` is built once at startup and handed to the front ends by
//! reference. The first `load()` reads the source; every later call, from any
//! thread, sees the same dataset. A missing or unreadable source yields an
//! empty dataset and an advisory instead of an error.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::warn;

use crate::domain::SalesDataset;
use crate::error::LoadError;
use crate::io::ingest::{load_sales_csv, LoadReport};

/// Result of the one and only load.
#[derive(Debug)]
struct Cached {
    dataset: SalesDataset,
    report: Option<LoadReport>,
    advisory: Option<LoadError>,
}

#[derive(Debug)]
pub struct DataStore {
    source: PathBuf,
    cache: OnceLock<Cached>,
}

impl DataStore {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            cache: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Return the dataset, reading the source on first use.
    pub fn load(&self) -> &SalesDataset {
        &self.cached().dataset
    }

    /// Why the dataset is empty, if the source could not be loaded.
    pub fn advisory(&self) -> Option<&LoadError> {
        self.cached().advisory.as_ref()
    }

    /// Ingest report of the first load (absent when the source was unavailable).
    pub fn report(&self) -> Option<&LoadReport> {
        self.cached().report.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    fn cached(&self) -> &Cached {
        self.cache.get_or_init(|| match load_sales_csv(&self.source) {
            Ok(loaded) => Cached {
                dataset: loaded.dataset,
                report: Some(loaded.report),
                advisory: None,
            },
            Err(err) => {
                warn!(error = %err, "sales source unavailable, continuing with an empty dataset");
                Cached {
                    dataset: SalesDataset::empty(),
                    report: None,
                    advisory: Some(err),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Arc;
    use std::thread;

    fn fixture(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "sales_dashboard_{}_{name}.csv",
            std::process::id()
        ));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_source_yields_empty_dataset_and_advisory() {
        let store = DataStore::new("no/such/dir/vendas.csv");
        assert!(store.load().is_empty());
        assert!(matches!(store.advisory(), Some(LoadError::SourceUnavailable { .. })));
        assert!(store.report().is_none());
    }

    #[test]
    fn second_load_returns_cached_value() {
        let path = fixture("cache", "sector,month,sales\nVarejo,Jan,10\n");
        let store = DataStore::new(&path);

        let first = store.load().clone();
        // Source changes after the first load are not observed.
        fs::write(&path, "sector,month,sales\nVarejo,Jan,10\nVarejo,Fev,20\n").unwrap();
        let second = store.load();

        assert_eq!(&first, second);
        assert_eq!(second.len(), 1);
        assert!(std::ptr::eq(store.load(), second));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn concurrent_first_loads_publish_one_dataset() {
        let path = fixture("concurrent", "sector,month,sales\nSaude,Jan,5\nSaude,Fev,6\n");
        let store = Arc::new(DataStore::new(&path));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.load() as *const SalesDataset as usize)
            })
            .collect();

        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.load().len(), 2);
        let _ = fs::remove_file(path);
    }
}
