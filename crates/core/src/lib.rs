//! `warden-core` — request-side collaborators of the authorization layer.
//!
//! Web context, session store, user profiles and client capabilities. Nothing
//! here decides anything; `warden-auth` consumes these through narrow traits.

pub mod client;
pub mod context;
pub mod error;
pub mod id;
pub mod profile;
pub mod session;

pub use client::{AnonymousClient, Client, ClientKind, NamedClient};
pub use context::{HttpMethod, InMemoryWebContext, WebContext};
pub use error::{CoreError, CoreResult};
pub use id::SessionId;
pub use profile::{Permission, Role, UserProfile};
pub use session::{InMemorySessionStore, SessionStore, read_value, write_value};
