//! Security configuration: the clients and authorizers of an application.
//!
//! Passed explicitly to whoever performs authorization checks; there is no
//! process-wide instance.

use std::sync::Arc;

use warden_core::{Client, SessionStore, UserProfile, WebContext};

use crate::authorizer::{Authorizer, SharedAuthorizer};
use crate::checker::{AuthorizationChecker, DefaultAuthorizationChecker};
use crate::error::AuthorizationError;
use crate::registry::AuthorizerRegistry;

#[derive(Debug, Clone, Default)]
pub struct SecurityConfig {
    clients: Vec<Arc<dyn Client>>,
    authorizers: AuthorizerRegistry,
}

impl SecurityConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(mut self, client: impl Client + 'static) -> Self {
        self.clients.push(Arc::new(client));
        self
    }

    pub fn with_clients(mut self, clients: impl IntoIterator<Item = Arc<dyn Client>>) -> Self {
        self.clients.extend(clients);
        self
    }

    pub fn with_authorizer(
        mut self,
        name: impl Into<String>,
        authorizer: impl Authorizer + 'static,
    ) -> Self {
        self.add_authorizer(name, Arc::new(authorizer));
        self
    }

    /// Replace the whole registry.
    pub fn with_authorizers(mut self, authorizers: AuthorizerRegistry) -> Self {
        self.authorizers = authorizers;
        self
    }

    pub fn add_authorizer(&mut self, name: impl Into<String>, authorizer: SharedAuthorizer) {
        self.authorizers.insert(name, authorizer);
    }

    /// Register an authorizer under its type name (e.g. `RequireAnyRole`).
    pub fn set_authorizer<A: Authorizer + 'static>(&mut self, authorizer: A) {
        let name = short_type_name::<A>();
        self.authorizers.insert(name, Arc::new(authorizer));
    }

    pub fn clients(&self) -> &[Arc<dyn Client>] {
        &self.clients
    }

    pub fn authorizers(&self) -> &AuthorizerRegistry {
        &self.authorizers
    }

    /// Check a request against this configuration's clients and authorizers.
    pub fn is_authorized(
        &self,
        context: &mut dyn WebContext,
        session_store: &mut dyn SessionStore,
        profiles: &[UserProfile],
        expression: Option<&str>,
    ) -> Result<bool, AuthorizationError> {
        DefaultAuthorizationChecker.is_authorized(
            context,
            session_store,
            profiles,
            expression,
            Some(&self.authorizers),
            &self.clients,
        )
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    let path = full.split('<').next().unwrap_or(full);
    path.rsplit("::").next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use warden_core::{AnonymousClient, HttpMethod, InMemorySessionStore, InMemoryWebContext, NamedClient};

    use super::*;
    use crate::require::RequireAnyRole;

    #[test]
    fn set_authorizer_uses_type_name() {
        let mut config = SecurityConfig::new();
        config.set_authorizer(RequireAnyRole::new(["admin"]));
        assert_eq!(config.authorizers().names().collect::<Vec<_>>(), vec!["RequireAnyRole"]);
    }

    #[test]
    fn checks_with_configured_clients_and_authorizers() {
        let config = SecurityConfig::new()
            .with_client(NamedClient::direct("HeaderClient"))
            .with_authorizer("admin", RequireAnyRole::new(["admin"]));

        let mut ctx = InMemoryWebContext::new(HttpMethod::Get);
        let mut store = InMemorySessionStore::new();
        let admin = [UserProfile::new("root").unwrap().with_role("admin")];
        let user = [UserProfile::new("joe").unwrap()];

        assert!(config.is_authorized(&mut ctx, &mut store, &admin, Some("+admin")).unwrap());
        assert!(!config.is_authorized(&mut ctx, &mut store, &user, Some("+admin")).unwrap());
        assert!(config.is_authorized(&mut ctx, &mut store, &user, None).unwrap());
    }

    #[test]
    fn anonymous_client_lifts_authentication_default() {
        let config = SecurityConfig::new().with_client(AnonymousClient);
        let mut ctx = InMemoryWebContext::default();
        let mut store = InMemorySessionStore::new();
        let anon = [UserProfile::anonymous()];

        assert!(config.is_authorized(&mut ctx, &mut store, &anon, None).unwrap());
        assert!(!config.is_authorized(&mut ctx, &mut store, &anon, Some("isAuthenticated")).unwrap());
    }
}
