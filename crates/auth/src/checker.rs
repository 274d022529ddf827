//! Authorization checking: build the authorizer list for a request, then
//! require every authorizer in it to agree.

use std::sync::Arc;

use tracing::{debug, trace};
use warden_core::{Client, SessionStore, UserProfile, WebContext};

use crate::authorizer::{SharedAuthorizer, same_instance};
use crate::builtins::DefaultAuthorizer;
use crate::error::AuthorizationError;
use crate::expression::AuthorizerExpression;
use crate::registry::AuthorizerRegistry;

/// Decides whether authenticated profiles may proceed with a request.
pub trait AuthorizationChecker {
    /// `Ok(false)` is a deny. Errors are configuration or programming
    /// mistakes, or failures raised by an authorizer.
    fn is_authorized(
        &self,
        context: &mut dyn WebContext,
        session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
        expression: Option<&str>,
        registry: Option<&AuthorizerRegistry>,
        clients: &[Arc<dyn Client>],
    ) -> Result<bool, AuthorizationError>;
}

/// The stock checker: defaults from clients, expression edits, conjunction.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultAuthorizationChecker;

impl DefaultAuthorizationChecker {
    /// Authorizers implied by the clients in use:
    /// `csrfCheck` when any client is indirect, then `isAuthenticated` unless
    /// an anonymous client is present. The registry may override either.
    pub fn default_authorizers(
        &self,
        clients: &[Arc<dyn Client>],
        registry: Option<&AuthorizerRegistry>,
    ) -> Vec<SharedAuthorizer> {
        let empty = AuthorizerRegistry::new();
        let registry = registry.unwrap_or(&empty);

        let mut authorizers = Vec::with_capacity(2);
        if clients.iter().any(|c| c.is_indirect()) {
            authorizers.push(registry.resolve_default(DefaultAuthorizer::CsrfCheck));
        }
        if !clients.iter().any(|c| c.is_anonymous()) {
            authorizers.push(registry.resolve_default(DefaultAuthorizer::IsAuthenticated));
        }
        authorizers
    }

    /// Turn an expression into the ordered list of authorizers to evaluate.
    pub fn compute_authorizers(
        &self,
        expression: Option<&str>,
        registry: Option<&AuthorizerRegistry>,
        clients: &[Arc<dyn Client>],
    ) -> Result<Vec<SharedAuthorizer>, AuthorizationError> {
        let parsed = AuthorizerExpression::parse(expression);
        trace!(expression = %parsed, "computing authorizers");

        match parsed {
            AuthorizerExpression::Default => Ok(self.default_authorizers(clients, registry)),
            AuthorizerExpression::Modify { add, remove } => {
                let mut authorizers = self.default_authorizers(clients, registry);
                remove_builtins(&mut authorizers, &remove)?;
                if !add.is_empty() {
                    let registry = require_registry(registry, expression)?;
                    authorizers.extend(resolve_all(&add, registry)?);
                }
                Ok(authorizers)
            }
            AuthorizerExpression::Explicit(names) => {
                if names.is_empty() {
                    return Ok(Vec::new());
                }
                let registry = require_registry(registry, expression)?;
                resolve_all(&names, registry)
            }
        }
    }

    /// Conjunction over `authorizers`, in order, stopping at the first deny.
    /// An empty list allows.
    pub fn evaluate(
        &self,
        context: &mut dyn WebContext,
        session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
        authorizers: &[SharedAuthorizer],
    ) -> Result<bool, AuthorizationError> {
        ensure_profiles(profiles)?;

        for authorizer in authorizers {
            let authorized = authorizer
                .decide(context, session_store, profiles)
                .map_err(|source| AuthorizationError::Authorizer {
                    authorizer: format!("{authorizer:?}"),
                    source,
                })?;
            debug!(?authorizer, authorized, "checked authorizer");
            if !authorized {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl AuthorizationChecker for DefaultAuthorizationChecker {
    fn is_authorized(
        &self,
        context: &mut dyn WebContext,
        session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
        expression: Option<&str>,
        registry: Option<&AuthorizerRegistry>,
        clients: &[Arc<dyn Client>],
    ) -> Result<bool, AuthorizationError> {
        ensure_profiles(profiles)?;
        let authorizers = self.compute_authorizers(expression, registry, clients)?;
        self.evaluate(context, session_store, profiles, &authorizers)
    }
}

/// Check a request with the [`DefaultAuthorizationChecker`].
pub fn is_authorized(
    context: &mut dyn WebContext,
    session_store: &mut dyn SessionStore,
    profiles: &[UserProfile],
    expression: Option<&str>,
    registry: Option<&AuthorizerRegistry>,
    clients: &[Arc<dyn Client>],
) -> Result<bool, AuthorizationError> {
    DefaultAuthorizationChecker.is_authorized(
        context,
        session_store,
        profiles,
        expression,
        registry,
        clients,
    )
}

fn ensure_profiles(profiles: &[UserProfile]) -> Result<(), AuthorizationError> {
    if profiles.is_empty() {
        return Err(AuthorizationError::NoProfiles);
    }
    Ok(())
}

fn require_registry<'a>(
    registry: Option<&'a AuthorizerRegistry>,
    expression: Option<&str>,
) -> Result<&'a AuthorizerRegistry, AuthorizationError> {
    registry.ok_or_else(|| AuthorizationError::MissingRegistry {
        expression: expression.unwrap_or_default().to_string(),
    })
}

fn resolve_all(
    names: &[String],
    registry: &AuthorizerRegistry,
) -> Result<Vec<SharedAuthorizer>, AuthorizationError> {
    names
        .iter()
        .map(|name| {
            registry
                .resolve(name)
                .ok_or_else(|| AuthorizationError::unknown(name.as_str()))
        })
        .collect()
}

/// Removal only knows the built-in instances: a registry override of a
/// reserved name stays in the list.
fn remove_builtins(
    authorizers: &mut Vec<SharedAuthorizer>,
    names: &[String],
) -> Result<(), AuthorizationError> {
    let builtins_only = AuthorizerRegistry::new();
    for name in names {
        let target = builtins_only
            .resolve(name)
            .ok_or_else(|| AuthorizationError::unknown(name.as_str()))?;
        if let Some(position) = authorizers.iter().position(|a| same_instance(a, &target)) {
            authorizers.remove(position);
        }
    }
    Ok(())
}
