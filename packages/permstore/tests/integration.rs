use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use permstore::{
    path, json_to_value, Access, Accessor, Error, JsonCodec, Object, Permission, Reader,
    SharedStore, Store, StoreConfig, TypedReader, TypedWriter, Value,
};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
struct Display {
    theme: String,
    scale: f64,
}

/// Settings root as an application would set it up before handing out
/// accessor-only views.
fn settings() -> Store {
    let mut root = Store::new();
    root.write("display:theme", "dark").unwrap();
    root.write("display:scale", 1.5).unwrap();
    root.write("license_key", "ABCD-1234").unwrap();
    root.write("build", Value::producer(|| Value::from("2024.1")))
        .unwrap();

    root.declare("license_key", Permission::None)
        .declare("build", Permission::Read)
        .declare("audit", Permission::Write);
    root
}

fn plugin_reads(reader: &dyn Reader, p: &str) -> Result<Value, Error> {
    reader.read(&path!(p))
}

fn plugin_writes(accessor: &mut dyn Accessor, p: &str, value: Value) -> Result<Value, Error> {
    accessor.write(&path!(p), value)
}

#[test]
fn test_accessor_only_caller_cannot_see_hidden_properties() {
    let root = settings();

    assert_eq!(
        plugin_reads(&root, "display:theme").unwrap(),
        Value::from("dark")
    );
    assert_eq!(
        plugin_reads(&root, "license_key").unwrap_err(),
        Error::PermissionDenied {
            name: "license_key".to_string(),
            access: Access::Read,
        }
    );

    let dumped = Reader::entries(&root);
    assert!(dumped.get("license_key").is_none());
    assert!(dumped.get("audit").is_none());
    assert_eq!(dumped.get("build"), Some(&Value::from("2024.1")));
}

#[test]
fn test_reader_cannot_unlock_hidden_properties_from_read_results() {
    let mut root = settings();
    root.write("display:pin", 1234).unwrap();
    root.node_mut("display")
        .unwrap()
        .declare("pin", Permission::None);

    // A missing segment hands back the root itself.
    let mut whole = plugin_reads(&root, "nope").unwrap();
    assert!(whole.as_node_mut().is_none());
    let whole = whole.as_view().unwrap();
    assert!(whole.read("license_key").unwrap_err().is_permission_denied());
    assert!(whole.entries().get("license_key").is_none());

    let display = plugin_reads(&root, "display").unwrap();
    let display = display.as_view().unwrap();
    assert!(display.read("pin").unwrap_err().is_permission_denied());
    assert!(!format!("{:?}", display).contains("1234"));
}

#[test]
fn test_accessor_only_caller_cannot_change_locked_properties() {
    let mut root = settings();

    let err = plugin_writes(&mut root, "build", Value::from("hacked")).unwrap_err();
    assert!(err.is_permission_denied());

    let err = plugin_writes(&mut root, "license_key:nested", Value::from(1)).unwrap_err();
    assert!(err.is_permission_denied());

    plugin_writes(&mut root, "audit", Value::from("plugin loaded")).unwrap();
    assert!(root.read("audit").unwrap_err().is_permission_denied());
}

#[test]
fn test_round_trip_of_plain_structure() {
    let mut store = Store::new();
    let input = json_to_value(json!({ "a": { "b": 1 } }));
    let Value::Object(object) = input else {
        panic!("expected object");
    };

    store.write_entries(object.clone()).unwrap();
    assert_eq!(store.entries(), object);
}

#[test]
fn test_entries_idempotent_with_pure_producers() {
    let mut store = settings();
    store
        .write("computed", Value::producer(|| Value::from(6 * 7)))
        .unwrap();

    assert_eq!(store.entries(), store.entries());
}

#[test]
fn test_clock_like_producer_changes_between_reads() {
    let ticks = Arc::new(AtomicI64::new(100));
    let source = ticks.clone();

    let mut store = Store::new();
    store
        .write(
            "clock:now",
            Value::producer(move || Value::from(source.load(Ordering::SeqCst))),
        )
        .unwrap();

    assert_eq!(store.read("clock:now").unwrap(), Value::from(100));
    ticks.store(250, Ordering::SeqCst);
    assert_eq!(store.read("clock:now").unwrap(), Value::from(250));

    let dumped = store.entries();
    let Some(Value::Object(clock)) = dumped.get("clock") else {
        panic!("expected clock object");
    };
    assert_eq!(clock.get("now"), Some(&Value::from(250)));
}

#[test]
fn test_write_to_absent_branch_needs_write_permission() {
    let mut allowed = Store::new();
    allowed.write("a:b", 1).unwrap();
    assert_eq!(allowed.read("a:b").unwrap(), Value::from(1));

    let mut read_only = Store::new();
    read_only.declare("a", Permission::Read);
    assert_eq!(
        read_only.write("a:b", 1).unwrap_err(),
        Error::PermissionDenied {
            name: "a".to_string(),
            access: Access::Traverse,
        }
    );
}

#[test]
fn test_nested_normalization_gives_independent_nodes() {
    let mut store = Store::new();
    store
        .write("root", json_to_value(json!({ "x": { "y": { "z": 5 } } })))
        .unwrap();

    store
        .node_mut("root:x")
        .unwrap()
        .declare("y", Permission::Read);
    store
        .node_mut("root:x:y")
        .unwrap()
        .declare("z", Permission::None);

    assert!(store.read("root:x:y:z").unwrap_err().is_permission_denied());
    assert!(store.read("root:x").unwrap().is_view());
    assert!(store.allowed_to_read("root"));
    assert_eq!(
        JsonCodec::default().encode_store(&store).unwrap(),
        r#"{"root":{"x":{"y":{}}}}"#
    );
}

#[test]
fn test_typed_access_through_facade() {
    let mut store = Store::new();
    let display = Display {
        theme: "light".to_string(),
        scale: 2.0,
    };

    store.write_as(&path!("display"), &display).unwrap();
    let back: Display = store.read_as(&path!("display")).unwrap();
    assert_eq!(back, display);
}

#[test]
fn test_typed_read_sees_only_readable_fields() {
    let mut root = settings();
    root.write("display:secret_mode", true).unwrap();

    root.node_mut("display")
        .unwrap()
        .declare("secret_mode", Permission::None);

    assert_eq!(
        root.read_json(&path!("display")).unwrap(),
        json!({ "theme": "dark", "scale": 1.5 })
    );
}

#[test]
fn test_config_then_shared_handle() {
    let config = StoreConfig::from_json(json!({
        "permissions": { "pin": "w" },
        "values": { "pin": 1234, "owner": { "name": "ann" } }
    }))
    .unwrap();

    let shared = SharedStore::new(config.into_store().unwrap());
    let reader = shared.clone();

    assert_eq!(reader.read("owner:name").unwrap(), Value::from("ann"));
    assert!(reader.read("pin").unwrap_err().is_permission_denied());

    let expected: Object = [(
        "owner",
        Value::Object([("name", "ann")].into_iter().collect()),
    )]
    .into_iter()
    .collect();
    assert_eq!(shared.entries(), expected);
}

#[test]
fn test_write_entries_is_not_transactional() {
    let mut store = Store::new();
    store.declare("frozen", Permission::Read);

    let result = JsonCodec::default()
        .decode_into(&mut store, r#"{"first": 1, "frozen": 2, "last": 3}"#);

    assert!(result.unwrap_err().is_permission_denied());
    assert_eq!(store.keys().collect::<Vec<_>>(), vec!["first"]);
}

#[test]
fn test_invalid_paths_are_rejected() {
    let mut store = Store::new();
    assert!(matches!(store.read(""), Err(Error::InvalidPath(_))));
    assert!(matches!(store.write("a::b", 1), Err(Error::InvalidPath(_))));
}
