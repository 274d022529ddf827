//! Authorizers over the authentication level of the profiles.

use warden_core::{SessionStore, UserProfile, WebContext};

use crate::authorizer::Authorizer;

/// At least one profile is not the anonymous sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAuthenticated;

/// Every profile is the anonymous sentinel.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAnonymous;

/// At least one profile authenticated in this session (not remembered).
#[derive(Debug, Clone, Copy, Default)]
pub struct IsFullyAuthenticated;

/// At least one profile restored from a remember-me token.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsRemembered;

impl Authorizer for IsAuthenticated {
    fn decide(
        &self,
        _context: &mut dyn WebContext,
        _session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
    ) -> anyhow::Result<bool> {
        Ok(profiles.iter().any(|p| !p.is_anonymous()))
    }
}

impl Authorizer for IsAnonymous {
    fn decide(
        &self,
        _context: &mut dyn WebContext,
        _session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
    ) -> anyhow::Result<bool> {
        Ok(profiles.iter().all(UserProfile::is_anonymous))
    }
}

impl Authorizer for IsFullyAuthenticated {
    fn decide(
        &self,
        _context: &mut dyn WebContext,
        _session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
    ) -> anyhow::Result<bool> {
        Ok(profiles
            .iter()
            .any(|p| !p.is_anonymous() && !p.is_remembered()))
    }
}

impl Authorizer for IsRemembered {
    fn decide(
        &self,
        _context: &mut dyn WebContext,
        _session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
    ) -> anyhow::Result<bool> {
        Ok(profiles.iter().any(|p| !p.is_anonymous() && p.is_remembered()))
    }
}
