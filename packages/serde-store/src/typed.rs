//! Typed reader and writer extension traits.

use serde::de::DeserializeOwned;
use serde::Serialize;

use permstore_core::{Error, Path, Reader, Value, Writer};

use crate::convert::{from_value, object_to_json, to_value};

/// Extension trait for typed reads.
///
/// This trait is automatically implemented for all `Reader` implementations.
/// Permissions apply exactly as for [`Reader::read`]; unreadable properties
/// of a node are absent from what gets deserialized.
///
/// # Example
///
/// ```rust
/// use permstore_core::{path, Store};
/// use permstore_serde::TypedReader;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Window {
///     width: u32,
///     height: u32,
/// }
///
/// let mut store = Store::new();
/// store.write("window:width", 800).unwrap();
/// store.write("window:height", 600).unwrap();
///
/// let window: Window = store.read_as(&path!("window")).unwrap();
/// assert_eq!(window.width, 800);
/// ```
pub trait TypedReader: Reader {
    /// Read a value and deserialize it into a Rust type.
    fn read_as<T: DeserializeOwned>(&self, from: &Path) -> Result<T, Error> {
        let value = self.read(from)?;
        from_value(value)
    }

    /// Read a value as a serde_json::Value.
    fn read_json(&self, from: &Path) -> Result<serde_json::Value, Error> {
        self.read_as(from)
    }

    /// Deserialize every readable property of the whole store.
    fn entries_as<T: DeserializeOwned>(&self) -> Result<T, Error> {
        from_value(Value::Object(self.entries()))
    }

    /// Dump the whole store as a JSON object.
    fn entries_json(&self) -> serde_json::Value {
        object_to_json(self.entries())
    }
}

// Blanket implementation for all Readers
impl<R: Reader + ?Sized> TypedReader for R {}

/// Extension trait for typed writes.
///
/// Structs and maps are serialized to plain objects, so they land in the
/// store as freshly normalized nodes.
pub trait TypedWriter: Writer {
    /// Serialize a Rust type and write it to the store.
    fn write_as<T: Serialize>(&mut self, to: &Path, data: &T) -> Result<Value, Error> {
        let value = to_value(data)?;
        self.write(to, value)
    }

    /// Write a serde_json::Value to the store.
    fn write_json(&mut self, to: &Path, data: serde_json::Value) -> Result<Value, Error> {
        self.write_as(to, &data)
    }
}

// Blanket implementation for all Writers
impl<W: Writer + ?Sized> TypedWriter for W {}
