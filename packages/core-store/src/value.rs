//! The value model held by store properties.
//!
//! A property holds a primitive, an array, a plain object (only ever seen
//! before normalization or inside arrays and producer results), a nested
//! [`Store`] node, or a [`Producer`] that computes a value on demand. Reads
//! hand nodes back as read-only [`StoreView`]s.

use std::fmt;
use std::sync::Arc;

use crate::store::Store;
use crate::view::StoreView;

/// A value that can be read from or written to a [`Store`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    /// Ordered sequence. Arrays are stored as-is; objects inside them are
    /// not turned into nodes.
    Array(Vec<Value>),
    /// Plain ordered-key object. Written objects are normalized into nodes.
    Object(Object),
    /// A permission-governed child node, owned by its parent.
    Node(Box<Store>),
    /// A node as returned by a read. Cannot be re-governed.
    View(StoreView),
    /// Computed on every read and every serialization, never cached.
    Producer(Producer),
}

impl Value {
    /// Create an empty plain object.
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// Wrap a closure as a producer value.
    pub fn producer<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::Producer(Producer::new(f))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Value::Node(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn is_producer(&self) -> bool {
        matches!(self, Value::Producer(_))
    }

    pub fn is_view(&self) -> bool {
        matches!(self, Value::View(_))
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Store> {
        match self {
            Value::Node(node) => Some(&mut **node),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    pub fn as_view(&self) -> Option<&StoreView> {
        match self {
            Value::View(view) => Some(view),
            _ => None,
        }
    }

    /// Invoke the value if it is a producer, otherwise return it unchanged.
    ///
    /// Only one level is unwrapped: a producer returning a producer yields
    /// the inner producer.
    pub fn materialize(self) -> Value {
        match self {
            Value::Producer(producer) => producer.produce(),
            other => other,
        }
    }
}

/// A zero-argument callable stored as a property value.
///
/// Clones share the same callable. Two producers are equal only when they
/// are clones of one another.
#[derive(Clone)]
pub struct Producer(Arc<dyn Fn() -> Value + Send + Sync>);

impl Producer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Producer(Arc::new(f))
    }

    /// Invoke the callable.
    pub fn produce(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Producer(..)")
    }
}

impl PartialEq for Producer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A map with string keys that remembers insertion order.
///
/// Inserting an existing key replaces its value without moving it. Lookups
/// are linear, which suits the small, settings-sized maps this holds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let i = self.position(key)?;
        Some(&mut self.entries[i].1)
    }

    /// Insert or replace, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.position(&key) {
            Some(i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Get the value for `key`, inserting `default()` at the end first if it
    /// is missing.
    pub fn get_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> Value,
    ) -> &mut Value {
        let i = match self.position(key) {
            Some(i) => i,
            None => {
                self.entries.push((key.to_string(), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    /// Remove `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let i = self.position(key)?;
        Some(self.entries.remove(i).1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut object = Object::new();
        object.extend(iter);
        object
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Object {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v.into());
        }
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl From<Store> for Value {
    fn from(v: Store) -> Self {
        Value::Node(Box::new(v))
    }
}

impl From<Producer> for Value {
    fn from(v: Producer) -> Self {
        Value::Producer(v)
    }
}
