use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are exact-match capability strings of the form
/// `<verb>:<resource>` (e.g. "delete:movies"). There is no wildcard and no
/// implication between permissions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::from_static(value)
    }
}

pub const GET_ACTORS: Permission = Permission::from_static("get:actors");
pub const POST_ACTORS: Permission = Permission::from_static("post:actors");
pub const DELETE_ACTORS: Permission = Permission::from_static("delete:actors");
pub const GET_MOVIES: Permission = Permission::from_static("get:movies");
pub const POST_MOVIES: Permission = Permission::from_static("post:movies");
pub const PATCH_MOVIES: Permission = Permission::from_static("patch:movies");
pub const DELETE_MOVIES: Permission = Permission::from_static("delete:movies");
