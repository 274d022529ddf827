//! Built-in authorizers and the reserved names they answer to.
//!
//! A registry may shadow any of these names; otherwise lookup falls back to
//! the process-wide instance held here.

use std::sync::{Arc, LazyLock};

use crate::authorizer::SharedAuthorizer;
use crate::registry::names_match;

pub mod authentication;
pub mod csrf;

pub use authentication::{IsAnonymous, IsAuthenticated, IsFullyAuthenticated, IsRemembered};
pub use csrf::{CsrfCheck, CsrfSettings, CsrfTokenGenerator};

/// Reserved authorizer names backed by a built-in instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefaultAuthorizer {
    CsrfCheck,
    IsAnonymous,
    IsAuthenticated,
    IsFullyAuthenticated,
    IsRemembered,
}

static INSTANCES: LazyLock<[SharedAuthorizer; 5]> = LazyLock::new(|| {
    let instances: [SharedAuthorizer; 5] = [
        Arc::new(CsrfCheck::default()),
        Arc::new(IsAnonymous),
        Arc::new(IsAuthenticated),
        Arc::new(IsFullyAuthenticated),
        Arc::new(IsRemembered),
    ];
    instances
});

impl DefaultAuthorizer {
    pub const ALL: [Self; 5] = [
        Self::CsrfCheck,
        Self::IsAnonymous,
        Self::IsAuthenticated,
        Self::IsFullyAuthenticated,
        Self::IsRemembered,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::CsrfCheck => "csrfCheck",
            Self::IsAnonymous => "isAnonymous",
            Self::IsAuthenticated => "isAuthenticated",
            Self::IsFullyAuthenticated => "isFullyAuthenticated",
            Self::IsRemembered => "isRemembered",
        }
    }

    /// Reserved name lookup (trimmed, case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| names_match(d.name(), name))
    }

    /// The shared built-in instance. Every call returns the same allocation.
    pub fn instance(self) -> SharedAuthorizer {
        let index = match self {
            Self::CsrfCheck => 0,
            Self::IsAnonymous => 1,
            Self::IsAuthenticated => 2,
            Self::IsFullyAuthenticated => 3,
            Self::IsRemembered => 4,
        };
        Arc::clone(&INSTANCES[index])
    }
}

impl core::fmt::Display for DefaultAuthorizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
