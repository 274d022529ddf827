//! Name -> authorizer mapping supplied by the security configuration.

use std::sync::Arc;

use crate::authorizer::{Authorizer, SharedAuthorizer};
use crate::builtins::DefaultAuthorizer;

/// Authorizer names compare trimmed and case-insensitively.
pub fn names_match(a: &str, b: &str) -> bool {
    let (a, b) = (a.trim(), b.trim());
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Registered authorizers, keyed by name in their original spelling.
///
/// Registries are small, so lookup is a linear scan with normalized comparison
/// rather than a map over normalized keys. At most one entry exists per name
/// (under the same comparison).
#[derive(Debug, Clone, Default)]
pub struct AuthorizerRegistry {
    entries: Vec<(String, SharedAuthorizer)>,
}

impl AuthorizerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `authorizer` under `name`.
    ///
    /// An entry whose name matches replaces the previous one in place; the
    /// replaced authorizer is returned.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        authorizer: SharedAuthorizer,
    ) -> Option<SharedAuthorizer> {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| names_match(key, &name)) {
            Some(entry) => {
                let previous = std::mem::replace(&mut entry.1, authorizer);
                entry.0 = name;
                Some(previous)
            }
            None => {
                self.entries.push((name, authorizer));
                None
            }
        }
    }

    pub fn with(mut self, name: impl Into<String>, authorizer: impl Authorizer + 'static) -> Self {
        self.insert(name, Arc::new(authorizer));
        self
    }

    /// Registered authorizer for `name`, ignoring built-ins.
    pub fn get(&self, name: &str) -> Option<&SharedAuthorizer> {
        self.entries
            .iter()
            .find(|(key, _)| names_match(key, name))
            .map(|(_, authorizer)| authorizer)
    }

    /// Registered authorizer for `name`, falling back to the built-in
    /// authorizer of that reserved name.
    pub fn resolve(&self, name: &str) -> Option<SharedAuthorizer> {
        self.get(name)
            .cloned()
            .or_else(|| DefaultAuthorizer::from_name(name).map(DefaultAuthorizer::instance))
    }

    /// Resolve a reserved name; always succeeds.
    pub fn resolve_default(&self, name: DefaultAuthorizer) -> SharedAuthorizer {
        self.get(name.name()).cloned().unwrap_or_else(|| name.instance())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SharedAuthorizer)> {
        self.entries.iter().map(|(key, a)| (key.as_str(), a))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, SharedAuthorizer)> for AuthorizerRegistry {
    fn from_iter<T: IntoIterator<Item = (S, SharedAuthorizer)>>(iter: T) -> Self {
        let mut registry = Self::new();
        for (name, authorizer) in iter {
            registry.insert(name, authorizer);
        }
        registry
    }
}
