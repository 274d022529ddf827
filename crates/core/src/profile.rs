//! Authenticated user profiles.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CoreError, CoreResult};

macro_rules! name_newtype {
    ($(#[$meta:meta])* $t:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $t(Cow<'static, str>);

        impl $t {
            pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
                Self(name.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&'static str> for $t {
            fn from(value: &'static str) -> Self {
                Self::new(value)
            }
        }
    };
}

name_newtype!(
    /// Role granted to a profile by its identity provider.
    Role
);

name_newtype!(
    /// Fine-grained permission granted to a profile.
    Permission
);

const ANONYMOUS_ID: &str = "anonymous";

/// A user profile produced by authentication.
///
/// A profile is either anonymous (the sentinel issued by an anonymous client),
/// remembered (restored from a long-lived token), or fully authenticated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    client_name: Option<String>,
    #[serde(default)]
    roles: Vec<Role>,
    #[serde(default)]
    permissions: Vec<Permission>,
    #[serde(default)]
    remembered: bool,
    #[serde(default)]
    anonymous: bool,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
}

impl UserProfile {
    /// Profile for an identified user. The id must not be blank.
    pub fn new(id: impl Into<String>) -> CoreResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CoreError::validation("profile id must not be blank"));
        }
        Ok(Self {
            id,
            client_name: None,
            roles: Vec::new(),
            permissions: Vec::new(),
            remembered: false,
            anonymous: false,
            attributes: BTreeMap::new(),
        })
    }

    /// The sentinel profile carried by unauthenticated users.
    pub fn anonymous() -> Self {
        Self {
            id: ANONYMOUS_ID.to_string(),
            client_name: None,
            roles: Vec::new(),
            permissions: Vec::new(),
            remembered: false,
            anonymous: true,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<Role>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn with_permission(mut self, permission: impl Into<Permission>) -> Self {
        self.permissions.push(permission.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn remembered(mut self, remembered: bool) -> Self {
        self.remembered = remembered;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client_name.as_deref()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    pub fn is_remembered(&self) -> bool {
        self.remembered
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r.as_str() == role)
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p.as_str() == permission)
    }
}
