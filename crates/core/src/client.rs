//! Authentication clients, reduced to the capabilities authorization cares about.

use serde::{Deserialize, Serialize};

/// How a client obtains credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientKind {
    /// Credentials come with every request (basic auth, bearer token, ...).
    Direct,
    /// Redirect-based login flow; the session it creates is exposed to CSRF.
    Indirect,
    /// Issues the anonymous sentinel profile.
    Anonymous,
}

/// An authentication client in use for the current request.
pub trait Client: core::fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn kind(&self) -> ClientKind;

    fn is_indirect(&self) -> bool {
        self.kind() == ClientKind::Indirect
    }

    fn is_anonymous(&self) -> bool {
        self.kind() == ClientKind::Anonymous
    }
}

/// A client described only by its name and kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedClient {
    pub name: String,
    pub kind: ClientKind,
}

impl NamedClient {
    pub fn new(name: impl Into<String>, kind: ClientKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn direct(name: impl Into<String>) -> Self {
        Self::new(name, ClientKind::Direct)
    }

    pub fn indirect(name: impl Into<String>) -> Self {
        Self::new(name, ClientKind::Indirect)
    }
}

impl Client for NamedClient {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ClientKind {
        self.kind
    }
}

/// Client that authenticates everybody as [`UserProfile::anonymous`].
///
/// [`UserProfile::anonymous`]: crate::UserProfile::anonymous
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnonymousClient;

impl Client for AnonymousClient {
    fn name(&self) -> &str {
        "AnonymousClient"
    }

    fn kind(&self) -> ClientKind {
        ClientKind::Anonymous
    }
}
