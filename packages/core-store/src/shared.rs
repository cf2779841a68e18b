//! A cloneable, lock-guarded handle for sharing one tree across threads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{Error, Object, Path, Reader, Store, Value, Writer};

/// A [`Store`] behind a single mutex.
///
/// Every operation takes the lock for its whole duration, so producers run
/// while the tree is locked and must not call back into the same handle.
///
/// # Example
///
/// ```rust
/// use permstore_core::{SharedStore, Store, Value};
///
/// let shared = SharedStore::new(Store::new());
/// let worker = shared.clone();
///
/// std::thread::spawn(move || worker.write("jobs:done", 3).unwrap())
///     .join()
///     .unwrap();
///
/// assert_eq!(shared.read("jobs:done").unwrap(), Value::from(3));
/// ```
#[derive(Clone, Debug, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        // Writes land in a single insert after all checks pass; a poisoned
        // tree is still consistent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn read(&self, path: &str) -> Result<Value, Error> {
        self.lock().read(path)
    }

    pub fn write(&self, path: &str, value: impl Into<Value>) -> Result<Value, Error> {
        self.lock().write(path, value)
    }

    pub fn write_entries<K, V, I>(&self, entries: I) -> Result<(), Error>
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.lock().write_entries(entries)
    }

    pub fn entries(&self) -> Object {
        self.lock().entries()
    }

    pub fn allowed_to_read(&self, name: &str) -> bool {
        self.lock().allowed_to_read(name)
    }

    pub fn allowed_to_write(&self, name: &str) -> bool {
        self.lock().allowed_to_write(name)
    }

    /// Run `f` with shared access to the locked tree.
    pub fn with<R>(&self, f: impl FnOnce(&Store) -> R) -> R {
        f(&self.lock())
    }

    /// Run `f` with exclusive access to the locked tree, e.g. to declare
    /// permissions.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        f(&mut self.lock())
    }
}

impl From<Store> for SharedStore {
    fn from(store: Store) -> Self {
        SharedStore::new(store)
    }
}

impl Reader for SharedStore {
    fn read(&self, from: &Path) -> Result<Value, Error> {
        self.lock().read_path(from)
    }

    fn entries(&self) -> Object {
        SharedStore::entries(self)
    }
}

impl Writer for SharedStore {
    fn write(&mut self, to: &Path, value: Value) -> Result<Value, Error> {
        self.lock().write_path(to, value)
    }
}
