//! Role and permission authorizers, meant to be registered under custom names.

use warden_core::{Permission, Role, SessionStore, UserProfile, WebContext};

use crate::authorizer::Authorizer;

/// Some profile holds at least one of the roles. No roles configured allows.
#[derive(Debug, Clone, Default)]
pub struct RequireAnyRole {
    roles: Vec<Role>,
}

/// Some profile holds every one of the roles.
#[derive(Debug, Clone, Default)]
pub struct RequireAllRoles {
    roles: Vec<Role>,
}

/// Some profile holds at least one of the permissions. No permissions configured allows.
#[derive(Debug, Clone, Default)]
pub struct RequireAnyPermission {
    permissions: Vec<Permission>,
}

impl RequireAnyRole {
    pub fn new<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

impl RequireAllRoles {
    pub fn new<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<Role>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }
}

impl RequireAnyPermission {
    pub fn new<I, P>(permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }
}

impl Authorizer for RequireAnyRole {
    fn decide(
        &self,
        _context: &mut dyn WebContext,
        _session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
    ) -> anyhow::Result<bool> {
        if self.roles.is_empty() {
            return Ok(true);
        }
        Ok(profiles
            .iter()
            .any(|p| self.roles.iter().any(|r| p.has_role(r.as_str()))))
    }
}

impl Authorizer for RequireAllRoles {
    fn decide(
        &self,
        _context: &mut dyn WebContext,
        _session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
    ) -> anyhow::Result<bool> {
        Ok(profiles
            .iter()
            .any(|p| self.roles.iter().all(|r| p.has_role(r.as_str()))))
    }
}

impl Authorizer for RequireAnyPermission {
    fn decide(
        &self,
        _context: &mut dyn WebContext,
        _session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
    ) -> anyhow::Result<bool> {
        if self.permissions.is_empty() {
            return Ok(true);
        }
        Ok(profiles.iter().any(|p| {
            self.permissions
                .iter()
                .any(|perm| p.has_permission(perm.as_str()))
        }))
    }
}
