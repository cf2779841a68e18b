//! Serde Integration for permstore
//!
//! This layer connects permission-gated stores to serde. It adds:
//! - `TypedReader`: Read directly into Rust types
//! - `TypedWriter`: Write Rust types directly
//! - `JsonCodec`: JSON text in and out of values and whole stores
//! - `StoreConfig`: Store shapes (permissions, child nodes, initial values)
//!   described in JSON
//! - Value <-> serde conversions
//!
//! Everything here goes through the core's permission checks: serializing a
//! store only ever sees what `entries()` exposes, and loading data into a
//! store goes through the ordinary write path.
//!
//! # Example
//!
//! ```rust
//! use permstore_core::{path, Store};
//! use permstore_serde::{TypedReader, TypedWriter};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let mut store = Store::new();
//! let ann = User { name: "Ann".into(), age: 41 };
//! store.write_as(&path!("users:ann"), &ann).unwrap();
//!
//! let back: User = store.read_as(&path!("users:ann")).unwrap();
//! assert_eq!(back, ann);
//! ```

mod codec;
mod config;
mod convert;
mod typed;

pub use codec::JsonCodec;
pub use config::{store_from_config, StoreConfig};
pub use convert::{from_value, json_to_value, object_to_json, to_value, value_to_json};
pub use typed::{TypedReader, TypedWriter};

// Re-export core types for convenience
pub use permstore_core::{
    Accessor, Error, Object, Path, PathError, Permission, PermissionTable, Reader, Store,
    StoreView, Value, Writer,
};
