//! permstore: a hierarchical key/value store with per-property permissions.
//!
//! Every nested object is a node with its own permission table; callers
//! holding only the [`Reader`]/[`Writer`] interface can neither see nor change
//! properties the owning node refuses them. The layers:
//!
//! - `permstore-core`: values, paths, permissions and the [`Store`] node
//! - `permstore-serde`: JSON bridge, typed access and declarative
//!   [`StoreConfig`]s

pub use permstore_core::{
    path, Access, Accessor, Error, Object, Path, PathError, Permission, PermissionTable,
    Producer, Reader, SharedStore, Store, StoreView, Value, Writer,
};
pub use permstore_serde::{
    from_value, json_to_value, store_from_config, to_value, value_to_json, JsonCodec,
    StoreConfig, TypedReader, TypedWriter,
};
