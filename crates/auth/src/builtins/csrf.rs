//! Cross-site request forgery protection.
//!
//! [`CsrfTokenGenerator`] stores a token and its expiry in the session and
//! hands it to the client in a response header. [`CsrfCheck`] then requires
//! state-changing requests to echo that token back.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use uuid::Uuid;

use warden_core::{SessionStore, UserProfile, WebContext, read_value, write_value};

use crate::authorizer::Authorizer;

/// Session key holding the current token.
pub const CSRF_TOKEN_KEY: &str = "warden.csrf.token";
/// Session key holding the token expiry (RFC 3339).
pub const CSRF_EXPIRES_AT_KEY: &str = "warden.csrf.expires_at";

const DEFAULT_TOKEN_TTL_SECS: u32 = 4 * 60 * 60;

/// Where the token is read from and how long it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsrfSettings {
    /// Request parameter carrying the token.
    pub parameter_name: String,
    /// Request header carrying the token (and response header exposing it).
    pub header_name: String,
    pub token_ttl_secs: u32,
    /// Check every request, not only POST/PUT/PATCH/DELETE.
    pub check_all_methods: bool,
}

impl Default for CsrfSettings {
    fn default() -> Self {
        Self {
            parameter_name: "csrfToken".to_string(),
            header_name: "X-CSRF-Token".to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            check_all_methods: false,
        }
    }
}

impl CsrfSettings {
    /// Defaults overridden by `WARDEN_CSRF_TOKEN_TTL_SECS` and
    /// `WARDEN_CSRF_CHECK_ALL_METHODS`.
    pub fn from_env() -> Self {
        let mut settings = Self::default();

        if let Ok(raw) = std::env::var("WARDEN_CSRF_TOKEN_TTL_SECS") {
            match raw.trim().parse::<u32>() {
                Ok(ttl) => settings.token_ttl_secs = ttl,
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring invalid WARDEN_CSRF_TOKEN_TTL_SECS"),
            }
        }

        settings.check_all_methods = std::env::var("WARDEN_CSRF_CHECK_ALL_METHODS")
            .unwrap_or_else(|_| "false".to_string())
            .trim()
            .parse::<bool>()
            .unwrap_or(false);

        settings
    }

    fn token_ttl(&self) -> Duration {
        Duration::seconds(i64::from(self.token_ttl_secs))
    }
}

/// Requires the session CSRF token on state-changing requests.
///
/// Requests that are not checked are allowed. A checked request is denied
/// when the session holds no token, the token has expired, or neither the
/// request parameter nor the header matches it.
#[derive(Debug, Clone, Default)]
pub struct CsrfCheck {
    settings: CsrfSettings,
}

impl CsrfCheck {
    pub fn new(settings: CsrfSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CsrfSettings {
        &self.settings
    }
}

impl Authorizer for CsrfCheck {
    fn decide(
        &self,
        context: &mut dyn WebContext,
        session_store: &mut dyn SessionStore,
        _profiles: &[UserProfile],
    ) -> anyhow::Result<bool> {
        let method = context.request_method();
        if !self.settings.check_all_methods && !method.is_state_changing() {
            return Ok(true);
        }

        let token: Option<String> = read_value(session_store, CSRF_TOKEN_KEY)?;
        let expires_at: Option<DateTime<Utc>> = read_value(session_store, CSRF_EXPIRES_AT_KEY)?;
        let (Some(token), Some(expires_at)) = (token, expires_at) else {
            tracing::trace!(%method, "no csrf token in session");
            return Ok(false);
        };

        if Utc::now() > expires_at {
            tracing::trace!(%method, %expires_at, "csrf token expired");
            return Ok(false);
        }

        let from_parameter = context.request_parameter(&self.settings.parameter_name);
        let from_header = context.request_header(&self.settings.header_name);
        Ok([from_parameter, from_header]
            .iter()
            .flatten()
            .any(|candidate| tokens_match(candidate, &token)))
    }
}

/// Constant-time token comparison.
fn tokens_match(candidate: &str, token: &str) -> bool {
    candidate.as_bytes().ct_eq(token.as_bytes()).into()
}

/// Makes sure the session carries a live CSRF token and exposes it.
///
/// Never denies. Register it under a name of your choice and list it before
/// `csrfCheck` on the pages that render forms.
#[derive(Debug, Clone, Default)]
pub struct CsrfTokenGenerator {
    settings: CsrfSettings,
}

impl CsrfTokenGenerator {
    pub fn new(settings: CsrfSettings) -> Self {
        Self { settings }
    }

    /// Current session token, generating a fresh one when absent or expired.
    pub fn ensure_token(&self, session_store: &mut dyn SessionStore) -> anyhow::Result<String> {
        let now = Utc::now();
        let token: Option<String> = read_value(session_store, CSRF_TOKEN_KEY)?;
        let expires_at: Option<DateTime<Utc>> = read_value(session_store, CSRF_EXPIRES_AT_KEY)?;

        if let (Some(token), Some(expires_at)) = (token, expires_at) {
            if expires_at > now {
                return Ok(token);
            }
        }

        let token = Uuid::new_v4().simple().to_string();
        write_value(session_store, CSRF_TOKEN_KEY, &token)?;
        write_value(session_store, CSRF_EXPIRES_AT_KEY, &(now + self.settings.token_ttl()))?;
        tracing::trace!("csrf token generated");
        Ok(token)
    }
}

impl Authorizer for CsrfTokenGenerator {
    fn decide(
        &self,
        context: &mut dyn WebContext,
        session_store: &mut dyn SessionStore,
        _profiles: &[UserProfile],
    ) -> anyhow::Result<bool> {
        let token = self.ensure_token(session_store)?;
        context.set_response_header(&self.settings.header_name, &token);
        Ok(true)
    }
}
