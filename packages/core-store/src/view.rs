//! Read-only handles to nodes handed out by reads.

use std::fmt;
use std::sync::Arc;

use crate::{Error, Object, Path, Reader, Store, Value};

/// A read-only handle to a governed node.
///
/// Reads never return a [`Store`] itself. A node reached by a read comes back
/// as a view, which offers only the permission-checked operations: its table
/// cannot be changed through it and unreadable properties stay unreachable.
/// Clones share the same snapshot.
///
/// # Example
///
/// ```rust
/// use permstore_core::{Permission, Store};
///
/// let mut store = Store::new();
/// store.write("account:user", "ann").unwrap();
/// store.write("account:token", "t0k3n").unwrap();
/// store.node_mut("account").unwrap().declare("token", Permission::None);
///
/// let account = store.read("account").unwrap();
/// let view = account.as_view().unwrap();
/// assert!(view.read("token").is_err());
/// assert!(view.entries().get("token").is_none());
/// ```
#[derive(Clone)]
pub struct StoreView {
    node: Arc<Store>,
}

impl StoreView {
    pub(crate) fn new(node: Store) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    pub(crate) fn node(&self) -> &Store {
        &self.node
    }

    pub fn read(&self, path: &str) -> Result<Value, Error> {
        self.node.read(path)
    }

    pub fn read_path(&self, path: &Path) -> Result<Value, Error> {
        self.node.read_path(path)
    }

    pub fn entries(&self) -> Object {
        self.node.entries()
    }

    pub fn allowed_to_read(&self, name: &str) -> bool {
        self.node.allowed_to_read(name)
    }

    pub fn allowed_to_write(&self, name: &str) -> bool {
        self.node.allowed_to_write(name)
    }
}

impl fmt::Debug for StoreView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let readable: Vec<&str> = self
            .node
            .keys()
            .filter(|name| self.node.allowed_to_read(name))
            .collect();
        f.debug_struct("StoreView")
            .field("readable", &readable)
            .finish()
    }
}

impl PartialEq for StoreView {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node) || self.node == other.node
    }
}

impl Reader for StoreView {
    fn read(&self, from: &Path) -> Result<Value, Error> {
        self.read_path(from)
    }

    fn entries(&self) -> Object {
        StoreView::entries(self)
    }
}
