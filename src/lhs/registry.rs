use crate::errors::SearchError;
use crate::lhs::LhsHashTable;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Process-lifetime cache of loaded hash tables, keyed by file path.
///
/// A table can take minutes to build and hundreds of megabytes to hold, so re-opening the
/// same path must be free and every worker must share one immutable instance. The registry
/// is an explicit value the caller owns and passes by reference; it is never written after
/// a table lands in it, only read.
pub struct TableRegistry {
    cache: Mutex<HashMap<PathBuf, Arc<LhsHashTable>>>,
}

impl TableRegistry {
    pub fn new() -> Self {
        TableRegistry {
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The table stored at `path`, from cache when it was seen before, from disk otherwise.
    /// Disk errors propagate.
    pub fn load(&self, path: &Path) -> Result<Arc<LhsHashTable>, SearchError> {
        let mut cache = self.cache.lock().expect("table registry mutex poisoned");
        if let Some(table) = cache.get(path) {
            return Ok(Arc::clone(table));
        }
        let table = Arc::new(LhsHashTable::load(path)?);
        cache.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Records a freshly built (and saved) table so later loads of `path` hit the cache.
    pub fn store(&self, path: &Path, table: &Arc<LhsHashTable>) {
        self.cache
            .lock()
            .expect("table registry mutex poisoned")
            .insert(path.to_path_buf(), Arc::clone(table));
    }
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new()
    }
}
