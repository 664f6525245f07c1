use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role
///
/// A viewer role identifier. Roles are opaque strings: anything outside the known
/// set is simply a role that no node lists, so it never fails a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Bypasses role membership on every frontend-visible node.
    pub const ADMIN: Role = Role(Cow::Borrowed("admin"));
    /// The role of a viewer without a session.
    pub const UNLOGGED: Role = Role(Cow::Borrowed("unlogged"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_admin(&self) -> bool {
        *self == Self::ADMIN
    }

    pub fn is_unlogged(&self) -> bool {
        *self == Self::UNLOGGED
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::UNLOGGED
    }
}

impl From<&str> for Role {
    fn from(name: &str) -> Self {
        Self(Cow::Owned(name.to_string()))
    }
}

impl From<String> for Role {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
