//! Declarative store shapes loaded from configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use permstore_core::{Error, PermissionTable, Store};

use crate::convert::json_to_value;

/// The shape of one node: its permission table, the child nodes it starts
/// with, and its initial values.
///
/// ```json
/// {
///   "default": "r",
///   "permissions": { "volume": "rw", "serial": "none", "network": "rw" },
///   "nodes": {
///     "network": { "default": "rw", "permissions": { "password": "w" } }
///   },
///   "values": { "volume": 7 }
/// }
/// ```
///
/// Building happens in three steps: the node is created with its table,
/// every child in `nodes` is built and attached, then `values` are written in
/// document order through the normal permission-checked write path. A value
/// that targets a property the node itself does not allow writing fails the
/// build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(flatten)]
    pub permissions: PermissionTable,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub nodes: BTreeMap<String, StoreConfig>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub values: serde_json::Map<String, serde_json::Value>,
}

impl StoreConfig {
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::decode(e.to_string()))
    }

    pub fn from_json(json: serde_json::Value) -> Result<Self, Error> {
        serde_json::from_value(json).map_err(|e| Error::decode(e.to_string()))
    }

    /// Build the configured tree.
    pub fn into_store(self) -> Result<Store, Error> {
        let mut store = Store::with_permissions(self.permissions);

        for (name, child) in self.nodes {
            log::trace!("building configured node '{}'", name);
            let node = child.into_store()?;
            store.write(&name, node)?;
        }

        store.write_entries(
            self.values
                .into_iter()
                .map(|(k, v)| (k, json_to_value(v))),
        )?;
        Ok(store)
    }
}

impl TryFrom<StoreConfig> for Store {
    type Error = Error;

    fn try_from(config: StoreConfig) -> Result<Self, Self::Error> {
        config.into_store()
    }
}

/// Shorthand for `StoreConfig::from_json_str(text)?.into_store()`.
pub fn store_from_config(text: &str) -> Result<Store, Error> {
    StoreConfig::from_json_str(text)?.into_store()
}
