//! Per-property access control.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Access granted on a single property.
///
/// Only used as a set-membership check: `Read` and `ReadWrite` allow reads,
/// `Write` and `ReadWrite` allow writes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    #[serde(rename = "r")]
    Read,
    #[serde(rename = "w")]
    Write,
    #[default]
    #[serde(rename = "rw")]
    ReadWrite,
    #[serde(rename = "none")]
    None,
}

impl Permission {
    /// Whether this permission allows reading.
    pub fn can_read(self) -> bool {
        matches!(self, Permission::Read | Permission::ReadWrite)
    }

    /// Whether this permission allows writing.
    pub fn can_write(self) -> bool {
        matches!(self, Permission::Write | Permission::ReadWrite)
    }

    /// The short spelling used in configuration (`r`, `w`, `rw`, `none`).
    pub fn as_str(self) -> &'static str {
        match self {
            Permission::Read => "r",
            Permission::Write => "w",
            Permission::ReadWrite => "rw",
            Permission::None => "none",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown permission spelling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission '{0}', expected one of: r, w, rw, none")]
pub struct ParsePermissionError(pub String);

impl FromStr for Permission {
    type Err = ParsePermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(Permission::Read),
            "w" => Ok(Permission::Write),
            "rw" => Ok(Permission::ReadWrite),
            "none" => Ok(Permission::None),
            other => Err(ParsePermissionError(other.to_string())),
        }
    }
}

/// The permission registry of one node.
///
/// A property's effective permission is its override when one was declared,
/// otherwise the table's default policy. Tables are independent: a child
/// node never consults its parent's table.
///
/// # Example
///
/// ```rust
/// use permstore_core::{Permission, PermissionTable};
///
/// let table = PermissionTable::new(Permission::ReadWrite)
///     .with("secret", Permission::None)
///     .with("version", Permission::Read);
///
/// assert!(!table.allowed_to_read("secret"));
/// assert!(table.allowed_to_read("version"));
/// assert!(!table.allowed_to_write("version"));
/// assert!(table.allowed_to_write("anything_else"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTable {
    #[serde(rename = "default", default)]
    default_policy: Permission,
    #[serde(rename = "permissions", default)]
    overrides: HashMap<String, Permission>,
}

impl PermissionTable {
    /// Create a table with no overrides.
    pub fn new(default_policy: Permission) -> Self {
        Self {
            default_policy,
            overrides: HashMap::new(),
        }
    }

    /// Builder form of [`declare`](Self::declare).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, permission: Permission) -> Self {
        self.declare(name, permission);
        self
    }

    /// Record an explicit permission for `name`, replacing any earlier one.
    pub fn declare(&mut self, name: impl Into<String>, permission: Permission) -> &mut Self {
        self.overrides.insert(name.into(), permission);
        self
    }

    /// Record the current default policy as an explicit override for `name`.
    ///
    /// The value is captured now; later changes to the default policy do not
    /// affect it.
    pub fn declare_default(&mut self, name: impl Into<String>) -> &mut Self {
        let permission = self.default_policy;
        self.declare(name, permission)
    }

    pub fn default_policy(&self) -> Permission {
        self.default_policy
    }

    pub fn set_default_policy(&mut self, policy: Permission) {
        self.default_policy = policy;
    }

    /// The explicit override for `name`, if any.
    pub fn override_for(&self, name: &str) -> Option<Permission> {
        self.overrides.get(name).copied()
    }

    /// Iterate over declared overrides in no particular order.
    pub fn overrides(&self) -> impl Iterator<Item = (&str, Permission)> {
        self.overrides.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Effective permission: override if present, else the default policy.
    pub fn resolve(&self, name: &str) -> Permission {
        self.override_for(name).unwrap_or(self.default_policy)
    }

    pub fn allowed_to_read(&self, name: &str) -> bool {
        self.resolve(name).can_read()
    }

    pub fn allowed_to_write(&self, name: &str) -> bool {
        self.resolve(name).can_write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Permission; 4] = [
        Permission::Read,
        Permission::Write,
        Permission::ReadWrite,
        Permission::None,
    ];

    #[test]
    fn membership_checks() {
        assert!(Permission::Read.can_read());
        assert!(!Permission::Read.can_write());
        assert!(!Permission::Write.can_read());
        assert!(Permission::Write.can_write());
        assert!(Permission::ReadWrite.can_read());
        assert!(Permission::ReadWrite.can_write());
        assert!(!Permission::None.can_read());
        assert!(!Permission::None.can_write());
    }

    #[test]
    fn default_permission_is_read_write() {
        assert_eq!(Permission::default(), Permission::ReadWrite);
        assert_eq!(PermissionTable::default().default_policy(), Permission::ReadWrite);
    }

    #[test]
    fn unlisted_names_follow_default_policy() {
        for policy in ALL {
            let table = PermissionTable::new(policy);
            assert_eq!(table.allowed_to_read("whatever"), policy.can_read());
            assert_eq!(table.allowed_to_write("whatever"), policy.can_write());
        }
    }

    #[test]
    fn override_wins_over_default() {
        let table = PermissionTable::new(Permission::None).with("open", Permission::ReadWrite);
        assert!(table.allowed_to_read("open"));
        assert!(table.allowed_to_write("open"));
        assert!(!table.allowed_to_read("closed"));
    }

    #[test]
    fn declare_default_captures_policy_once() {
        let mut table = PermissionTable::new(Permission::Read);
        table.declare_default("pinned");
        table.set_default_policy(Permission::None);

        assert_eq!(table.resolve("pinned"), Permission::Read);
        assert_eq!(table.resolve("other"), Permission::None);
    }

    #[test]
    fn redeclare_replaces() {
        let mut table = PermissionTable::default();
        table.declare("x", Permission::Read).declare("x", Permission::Write);
        assert_eq!(table.override_for("x"), Some(Permission::Write));
    }

    #[test]
    fn parse_and_display_agree() {
        for permission in ALL {
            let parsed: Permission = permission.to_string().parse().unwrap();
            assert_eq!(parsed, permission);
        }
        let err = "rwx".parse::<Permission>().unwrap_err();
        assert!(err.to_string().contains("rwx"));
    }

    #[test]
    fn serde_uses_short_spellings() {
        assert_eq!(serde_json::to_string(&Permission::ReadWrite).unwrap(), "\"rw\"");
        let p: Permission = serde_json::from_str("\"none\"").unwrap();
        assert_eq!(p, Permission::None);
    }

    #[test]
    fn table_deserializes_from_config_shape() {
        let table: PermissionTable = serde_json::from_value(serde_json::json!({
            "default": "r",
            "permissions": { "token": "none", "theme": "rw" }
        }))
        .unwrap();

        assert_eq!(table.default_policy(), Permission::Read);
        assert_eq!(table.resolve("token"), Permission::None);
        assert_eq!(table.resolve("theme"), Permission::ReadWrite);
        assert_eq!(table.resolve("unlisted"), Permission::Read);
    }

    #[test]
    fn table_fields_default_when_missing() {
        let table: PermissionTable = serde_json::from_str("{}").unwrap();
        assert_eq!(table, PermissionTable::default());
    }
}
