//! Permstore core: a permission-gated hierarchical store.
//!
//! A tree of [`Store`] nodes, each holding named values behind its own
//! per-property permissions:
//! - `Path`: colon-delimited path (`"display:colors:background"`)
//! - `Value`: primitives, arrays, plain objects, child nodes, producers
//! - `Permission` / `PermissionTable`: per-node access policy
//! - `Reader` / `Writer`: the accessor interface callers hold instead of a
//!   concrete store
//! - `StoreView`: the read-only form in which reads return nodes
//!
//! Plain objects written into a store become nodes themselves, so every
//! nested object can be governed. Producers are re-evaluated on every read
//! and every dump.
//!
//! # Example
//!
//! ```rust
//! use permstore_core::{Object, Permission, Store, Value};
//!
//! let mut store = Store::new();
//! store.declare("secret", Permission::None);
//!
//! let profile: Object = [("name", "ann"), ("lang", "en")].into_iter().collect();
//! store.write("profile", profile.clone()).unwrap();
//! store.write("secret", "s3cr3t").unwrap();
//!
//! assert_eq!(store.read("profile:name").unwrap(), Value::from("ann"));
//! assert!(store.read("secret").unwrap_err().is_permission_denied());
//!
//! let dumped = store.entries();
//! assert_eq!(dumped.get("profile"), Some(&Value::Object(profile)));
//! assert!(dumped.get("secret").is_none());
//! ```

mod error;
mod path;
mod permission;
mod shared;
mod store;
mod traits;
mod value;
mod view;

pub use error::{Access, Error};
pub use path::{Path, PathError, SEPARATOR};
pub use permission::{ParsePermissionError, Permission, PermissionTable};
pub use shared::SharedStore;
pub use store::Store;
pub use traits::{Accessor, Reader, Writer};
pub use value::{Object, Producer, Value};
pub use view::StoreView;
