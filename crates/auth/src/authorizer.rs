//! The authorizer contract.

use std::sync::Arc;

use warden_core::{SessionStore, UserProfile, WebContext};

/// A named predicate over the current request and its authenticated profiles.
///
/// Implementations must not keep per-request state in their fields: a single
/// instance is shared by every request (and thread) that resolves its name.
/// Per-request state belongs in the context or the session store.
///
/// Returning `Err` is not a deny; the error surfaces to the caller of the
/// authorization check unchanged.
pub trait Authorizer: core::fmt::Debug + Send + Sync {
    fn decide(
        &self,
        context: &mut dyn WebContext,
        session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
    ) -> anyhow::Result<bool>;
}

/// Shared handle to an authorizer, as stored in registries and lists.
pub type SharedAuthorizer = Arc<dyn Authorizer>;

/// Two handles designate the same authorizer instance.
pub fn same_instance(a: &SharedAuthorizer, b: &SharedAuthorizer) -> bool {
    Arc::ptr_eq(a, b)
}

/// Authorizer backed by a closure.
pub struct FnAuthorizer<F> {
    name: String,
    decide: F,
}

impl<F> FnAuthorizer<F>
where
    F: Fn(&mut dyn WebContext, &mut dyn SessionStore, &[UserProfile]) -> anyhow::Result<bool>
        + Send
        + Sync,
{
    pub fn new(name: impl Into<String>, decide: F) -> Self {
        Self {
            name: name.into(),
            decide,
        }
    }
}

impl<F> core::fmt::Debug for FnAuthorizer<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("FnAuthorizer").field(&self.name).finish()
    }
}

impl<F> Authorizer for FnAuthorizer<F>
where
    F: Fn(&mut dyn WebContext, &mut dyn SessionStore, &[UserProfile]) -> anyhow::Result<bool>
        + Send
        + Sync,
{
    fn decide(
        &self,
        context: &mut dyn WebContext,
        session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
    ) -> anyhow::Result<bool> {
        (self.decide)(context, session_store, profiles)
    }
}

/// Wrap a closure into a [`SharedAuthorizer`].
pub fn authorizer_fn<F>(name: impl Into<String>, decide: F) -> SharedAuthorizer
where
    F: Fn(&mut dyn WebContext, &mut dyn SessionStore, &[UserProfile]) -> anyhow::Result<bool>
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnAuthorizer::new(name, decide))
}
