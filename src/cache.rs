//! A load-once-per-key store for expensive, immutable objects such as word
//! graphs and letter distributions.

use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use hashbrown::HashMap;
use log::{debug, trace};
use once_cell::sync::OnceCell;

use crate::error::Result;

/// A concurrent memoizing store keyed by name.
///
/// [`load`](Cache::load) runs the loader at most once per key. Callers that
/// race on the same key block until the first load finishes and then share
/// its value. A failed load leaves the key empty, so a later call retries.
pub struct Cache<T> {
    entries: Mutex<HashMap<String, Arc<OnceCell<Arc<T>>>>>,
}

impl<T> Cache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Cache {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the value cached under `key`, running `loader` to produce it
    /// if this is the first request for that key.
    pub fn load<F>(&self, key: &str, loader: F) -> Result<Arc<T>>
    where
        F: FnOnce(&str) -> Result<T>,
    {
        let cell = self.cell(key);
        if let Some(value) = cell.get() {
            trace!("cache hit: {key}");
            return Ok(Arc::clone(value));
        }
        cell.get_or_try_init(|| loader(key).map(Arc::new)).cloned()
    }

    /// Returns the value cached under `key` without loading it.
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).and_then(|cell| cell.get().cloned())
    }

    /// Returns the number of successfully loaded values.
    pub fn len(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.values().filter(|cell| cell.get().is_some()).count()
    }

    /// Returns true if nothing has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn cell(&self, key: &str) -> Arc<OnceCell<Arc<T>>> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cell) = entries.get(key) {
            return Arc::clone(cell);
        }
        let cell = Arc::new(OnceCell::new());
        entries.insert(key.to_owned(), Arc::clone(&cell));
        cell
    }
}

impl<T> Default for Cache<T> {
    fn default() -> Self {
        Cache::new()
    }
}

/// Opens `path` for reading and returns the file together with its length
/// in bytes.
pub fn open(path: impl AsRef<Path>) -> Result<(File, u64)> {
    let path = path.as_ref();
    debug!("Opening {}", path.display());
    let file = File::open(path)?;
    let len = file.metadata()?.len();
    Ok((file, len))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn loads_once_per_key() {
        let cache = Cache::new();
        let calls = AtomicUsize::new(0);
        let loader = |key: &str| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(key.len())
        };
        let a = cache.load("CSW21", loader).unwrap();
        let b = cache.load("CSW21", loader).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(*a, 5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.load("NWL20", loader).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn failed_load_is_retried() {
        let cache: Cache<u32> = Cache::new();
        let res = cache.load("x", |_| Err(Error::MissingDataPath));
        assert!(matches!(res, Err(Error::MissingDataPath)));
        assert!(cache.get("x").is_none());
        assert!(cache.is_empty());
        assert_eq!(*cache.load("x", |_| Ok(7)).unwrap(), 7);
        assert_eq!(cache.get("x").as_deref(), Some(&7));
    }

    #[test]
    fn concurrent_callers_share_one_load() {
        let cache: Cache<u64> = Cache::new();
        let calls = AtomicUsize::new(0);
        let values: Vec<Arc<u64>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        cache
                            .load("shared", |_| {
                                calls.fetch_add(1, Ordering::SeqCst);
                                thread::sleep(std::time::Duration::from_millis(20));
                                Ok(42)
                            })
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(values.iter().all(|v| Arc::ptr_eq(v, &values[0])));
    }

    #[test]
    fn open_reports_length() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        let (_, len) = open(file.path()).unwrap();
        assert_eq!(len, 8);
        assert!(matches!(open("/nonexistent/file.kwg"), Err(Error::Io(_))));
    }
}
