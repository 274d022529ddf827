//! Authorization error model.

use thiserror::Error;

/// Failures of the authorization check itself.
///
/// A denied request is *not* an error: the checker returns `Ok(false)`.
#[derive(Debug, Error)]
pub enum AuthorizationError {
    /// An expression referenced a name known neither to the registry nor to
    /// the built-in authorizers.
    #[error("the authorizer '{name}' must be defined in the security configuration")]
    UnknownAuthorizer { name: String },

    /// Authorization runs after authentication; at least one profile is required.
    #[error("profiles must not be empty")]
    NoProfiles,

    /// Names had to be resolved against a registry but none was supplied.
    #[error("an authorizer registry is required to resolve '{expression}'")]
    MissingRegistry { expression: String },

    /// An authorizer failed while deciding.
    #[error("authorizer {authorizer} failed")]
    Authorizer {
        authorizer: String,
        #[source]
        source: anyhow::Error,
    },
}

impl AuthorizationError {
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownAuthorizer { name: name.into() }
    }
}
