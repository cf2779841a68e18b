//! The permission-gated store node.
//!
//! A [`Store`] is both the root of a tree and every governed node inside it.
//! Each node owns its properties and its own [`PermissionTable`]; nothing is
//! inherited from the parent.

use crate::error::{Access, Error};
use crate::path::Path;
use crate::permission::{Permission, PermissionTable};
use crate::value::{Object, Value};
use crate::view::StoreView;

/// A node holding named values behind per-property permissions.
///
/// # Example
///
/// ```rust
/// use permstore_core::{Permission, Store, Value};
///
/// let mut settings = Store::new();
/// settings.declare("token", Permission::None);
///
/// settings.write("display:theme", "dark").unwrap();
/// settings.write("token", "hunter2").unwrap();
///
/// assert_eq!(settings.read("display:theme").unwrap(), Value::from("dark"));
/// assert!(settings.read("token").is_err());
/// assert!(settings.entries().get("token").is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Store {
    permissions: PermissionTable,
    properties: Object,
}

impl Store {
    /// Create an empty node with the `ReadWrite` default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty node with the given default policy and no overrides.
    pub fn with_policy(default_policy: Permission) -> Self {
        Self::with_permissions(PermissionTable::new(default_policy))
    }

    /// Create an empty node governed by a prepared permission table.
    pub fn with_permissions(permissions: PermissionTable) -> Self {
        Self {
            permissions,
            properties: Object::new(),
        }
    }

    // === Permission registry ===

    /// Declare an explicit permission for a property of this node.
    pub fn declare(&mut self, name: impl Into<String>, permission: Permission) -> &mut Self {
        self.permissions.declare(name, permission);
        self
    }

    /// Pin the current default policy as the explicit permission for `name`.
    pub fn declare_default(&mut self, name: impl Into<String>) -> &mut Self {
        self.permissions.declare_default(name);
        self
    }

    pub fn permissions(&self) -> &PermissionTable {
        &self.permissions
    }

    pub fn default_policy(&self) -> Permission {
        self.permissions.default_policy()
    }

    pub fn set_default_policy(&mut self, policy: Permission) {
        self.permissions.set_default_policy(policy);
    }

    pub fn allowed_to_read(&self, name: &str) -> bool {
        self.permissions.allowed_to_read(name)
    }

    pub fn allowed_to_write(&self, name: &str) -> bool {
        self.permissions.allowed_to_write(name)
    }

    fn ensure_readable(&self, name: &str) -> Result<(), Error> {
        if self.allowed_to_read(name) {
            return Ok(());
        }
        log::debug!("read of '{}' denied", name);
        Err(Error::denied(name, Access::Read))
    }

    fn ensure_writable(&self, name: &str) -> Result<(), Error> {
        if self.allowed_to_write(name) {
            return Ok(());
        }
        log::debug!("write of '{}' denied", name);
        Err(Error::denied(name, Access::Write))
    }

    // === Inspection (not permission-checked) ===

    /// Number of properties owned directly by this node.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Whether this node owns a property named `name`, readable or not.
    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Property names in insertion order, readable or not.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.properties.keys()
    }

    /// The child node at `path`, reached without permission checks.
    ///
    /// This is the owner's way to govern nested nodes after they exist.
    /// Returns `None` when the path is invalid or does not end at a node.
    pub fn node_mut(&mut self, path: &str) -> Option<&mut Store> {
        let path = Path::parse(path).ok()?;
        self.node_mut_path(&path)
    }

    /// [`node_mut`](Self::node_mut) with an already parsed path.
    pub fn node_mut_path(&mut self, path: &Path) -> Option<&mut Store> {
        let mut current = self;
        for segment in path.iter() {
            current = current.properties.get_mut(segment)?.as_node_mut()?;
        }
        Some(current)
    }

    // === Read ===

    /// Read the value at a colon-delimited path.
    ///
    /// Every node crossed must allow reading the segment taken out of it.
    /// Producers met along the way are invoked. A segment that does not exist
    /// leaves the cursor where it was, so a missing path yields the last value
    /// that was reached (possibly this node itself). Nodes in the result come
    /// back as [`StoreView`]s.
    pub fn read(&self, path: &str) -> Result<Value, Error> {
        self.read_path(&Path::parse(path)?)
    }

    /// [`read`](Self::read) with an already parsed path.
    pub fn read_path(&self, path: &Path) -> Result<Value, Error> {
        let mut cursor = Cursor::Node(self);
        for segment in path.iter() {
            cursor = cursor.step(segment)?;
        }
        Ok(cursor.into_value())
    }

    // === Write ===

    /// Write `value` at a colon-delimited path, returning the value as given.
    ///
    /// Intermediate segments are created as fresh nodes when missing (which
    /// requires write permission on them) and passed through when present
    /// (which requires read or write). An intermediate that holds anything
    /// other than a node is replaced by a fresh node. The final segment
    /// requires write permission. Plain objects are normalized into nodes
    /// before being stored.
    pub fn write(&mut self, path: &str, value: impl Into<Value>) -> Result<Value, Error> {
        self.write_path(&Path::parse(path)?, value.into())
    }

    /// [`write`](Self::write) with an already parsed path.
    pub fn write_path(&mut self, path: &Path, value: Value) -> Result<Value, Error> {
        let (last, parents) = path.split_last();

        let mut current: &mut Store = self;
        for segment in parents {
            current = current.child_for_write(segment)?;
        }

        current.ensure_writable(last)?;
        let stored = normalize(value.clone())?;
        current.properties.insert(last, stored);
        Ok(value)
    }

    /// Write each entry in order through [`write`](Self::write).
    ///
    /// Keys are parsed as paths. Stops at the first failure; entries written
    /// before it stay written.
    pub fn write_entries<K, V, I>(&mut self, entries: I) -> Result<(), Error>
    where
        K: AsRef<str>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in entries {
            self.write(key.as_ref(), value)?;
        }
        Ok(())
    }

    /// Descend into `segment` on behalf of a write, creating a node there if
    /// it is missing or not a node.
    fn child_for_write(&mut self, segment: &str) -> Result<&mut Store, Error> {
        let permitted = if self.contains(segment) {
            self.allowed_to_read(segment) || self.allowed_to_write(segment)
        } else {
            self.allowed_to_write(segment)
        };
        if !permitted {
            log::debug!("traversal of '{}' denied", segment);
            return Err(Error::denied(segment, Access::Traverse));
        }

        let slot = self
            .properties
            .get_or_insert_with(segment, || Value::from(Store::new()));
        if !slot.is_node() {
            log::trace!("replacing non-node value at '{}' with a new node", segment);
            *slot = Value::from(Store::new());
        }
        slot.as_node_mut()
            .ok_or_else(|| Error::denied(segment, Access::Traverse))
    }

    // === Serialize ===

    /// Dump this node into a plain object.
    ///
    /// Unreadable properties are omitted. Child nodes are dumped recursively
    /// and producers are invoked once, with their result used as-is apart
    /// from nodes in it becoming views.
    pub fn entries(&self) -> Object {
        self.properties
            .iter()
            .filter(|(name, _)| self.allowed_to_read(name))
            .map(|(name, value)| {
                let dumped = match value {
                    Value::Node(node) => Value::Object(node.entries()),
                    Value::View(view) => Value::Object(view.entries()),
                    Value::Producer(producer) => seal(producer.produce()),
                    other => seal(other.clone()),
                };
                (name, dumped)
            })
            .collect()
    }
}

/// Turn a plain object into a fresh node, recursively through
/// [`Store::write_entries`]. Everything else passes through.
fn normalize(value: Value) -> Result<Value, Error> {
    match value {
        Value::Object(object) => {
            log::trace!("normalizing object with {} entries", object.len());
            let mut node = Store::new();
            node.write_entries(object)?;
            Ok(Value::from(node))
        }
        other => Ok(other),
    }
}

/// Swap every node in a value leaving the tree for a read-only view.
/// Producers are wrapped so that what they return is sealed as well.
fn seal(value: Value) -> Value {
    match value {
        Value::Node(node) => Value::View(StoreView::new(*node)),
        Value::Array(items) => Value::Array(items.into_iter().map(seal).collect()),
        Value::Object(object) => Value::Object(
            object
                .into_iter()
                .map(|(name, value)| (name, seal(value)))
                .collect(),
        ),
        Value::Producer(producer) => Value::producer(move || seal(producer.produce())),
        other => other,
    }
}

/// Position of a read walk: borrowed from the tree until a producer hands
/// back an owned value.
enum Cursor<'a> {
    Node(&'a Store),
    Borrowed(&'a Value),
    Owned(Value),
}

impl<'a> Cursor<'a> {
    fn at(value: &'a Value) -> Self {
        match value {
            Value::Node(node) => Cursor::Node(&**node),
            Value::View(view) => Cursor::Node(view.node()),
            Value::Producer(producer) => Cursor::Owned(producer.produce()),
            other => Cursor::Borrowed(other),
        }
    }

    fn step(self, segment: &str) -> Result<Self, Error> {
        match self {
            Cursor::Node(node) => {
                node.ensure_readable(segment)?;
                Ok(match node.properties.get(segment) {
                    Some(value) => Cursor::at(value),
                    None => Cursor::Node(node),
                })
            }
            Cursor::Borrowed(value) => Ok(match value {
                Value::Object(object) => match object.get(segment) {
                    Some(child) => Cursor::at(child),
                    None => Cursor::Borrowed(value),
                },
                _ => Cursor::Borrowed(value),
            }),
            Cursor::Owned(Value::Node(mut node)) => {
                node.ensure_readable(segment)?;
                Ok(match node.properties.remove(segment) {
                    Some(value) => Cursor::Owned(value.materialize()),
                    None => Cursor::Owned(Value::Node(node)),
                })
            }
            Cursor::Owned(Value::View(view)) => {
                view.node().ensure_readable(segment)?;
                let child = view.node().properties.get(segment).cloned();
                Ok(match child {
                    Some(value) => Cursor::Owned(value.materialize()),
                    None => Cursor::Owned(Value::View(view)),
                })
            }
            Cursor::Owned(Value::Object(mut object)) => Ok(match object.remove(segment) {
                Some(value) => Cursor::Owned(value.materialize()),
                None => Cursor::Owned(Value::Object(object)),
            }),
            Cursor::Owned(value) => Ok(Cursor::Owned(value)),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Cursor::Node(node) => Value::View(StoreView::new(node.clone())),
            Cursor::Borrowed(value) => seal(value.clone()),
            Cursor::Owned(value) => seal(value),
        }
    }
}
