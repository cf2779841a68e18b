//! JSON text encoding of values and whole stores.

use permstore_core::{Error, Store, Value};

use crate::convert::{json_to_value, object_to_json, value_to_json};

/// Converts between [`Value`]s (or whole stores) and JSON text.
///
/// Encoding goes through the same path as [`Store::entries`]: unreadable
/// properties are left out and producers are invoked. Decoding a JSON object
/// into a store writes each top-level key through the permission-checked
/// write path, so nested objects become nodes.
///
/// # Example
///
/// ```rust
/// use permstore_core::{Permission, Store};
/// use permstore_serde::JsonCodec;
///
/// let codec = JsonCodec::default();
/// let mut store = codec.decode_store(r#"{"ui": {"theme": "dark"}, "token": "t"}"#).unwrap();
/// store.declare("token", Permission::None);
///
/// assert_eq!(codec.encode_store(&store).unwrap(), r#"{"ui":{"theme":"dark"}}"#);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// A codec producing indented output.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn decode(&self, text: &str) -> Result<Value, Error> {
        let json: serde_json::Value =
            serde_json::from_str(text).map_err(|e| Error::decode(e.to_string()))?;
        Ok(json_to_value(json))
    }

    pub fn encode(&self, value: &Value) -> Result<String, Error> {
        self.render(&value_to_json(value.clone()))
    }

    /// Build a fresh store from a JSON object.
    pub fn decode_store(&self, text: &str) -> Result<Store, Error> {
        let mut store = Store::new();
        self.decode_into(&mut store, text)?;
        Ok(store)
    }

    /// Write every top-level key of a JSON object into an existing store.
    ///
    /// Keys are written in document order and the first refused key stops
    /// the load, leaving earlier keys in place.
    pub fn decode_into(&self, store: &mut Store, text: &str) -> Result<(), Error> {
        match self.decode(text)? {
            Value::Object(object) => {
                log::debug!("loading {} top-level entries", object.len());
                store.write_entries(object)
            }
            _ => Err(Error::decode("expected a JSON object at the top level")),
        }
    }

    /// Dump the readable contents of a store as JSON text.
    pub fn encode_store(&self, store: &Store) -> Result<String, Error> {
        self.render(&object_to_json(store.entries()))
    }

    fn render(&self, json: &serde_json::Value) -> Result<String, Error> {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(json)
        } else {
            serde_json::to_string(json)
        };
        rendered.map_err(|e| Error::encode(e.to_string()))
    }
}
