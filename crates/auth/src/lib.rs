//! `warden-auth` — authorization checks run after authentication.
//!
//! An authorizer expression such as `"+admin-csrfCheck"` is resolved against a
//! registry of named authorizers (falling back to the built-ins) and the
//! clients in use, then every resulting authorizer must allow the request.
//!
//! No IO beyond what individual authorizers do; no async; no global state.

pub mod authorizer;
pub mod builtins;
pub mod checker;
pub mod config;
pub mod error;
pub mod expression;
pub mod registry;
pub mod require;

pub use authorizer::{Authorizer, FnAuthorizer, SharedAuthorizer, authorizer_fn, same_instance};
pub use builtins::{
    CsrfCheck, CsrfSettings, CsrfTokenGenerator, DefaultAuthorizer, IsAnonymous, IsAuthenticated,
    IsFullyAuthenticated, IsRemembered,
};
pub use checker::{AuthorizationChecker, DefaultAuthorizationChecker, is_authorized};
pub use config::SecurityConfig;
pub use error::AuthorizationError;
pub use expression::AuthorizerExpression;
pub use registry::AuthorizerRegistry;
pub use require::{RequireAllRoles, RequireAnyPermission, RequireAnyRole};
