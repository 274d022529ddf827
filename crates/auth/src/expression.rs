//! Authorizer expressions.
//!
//! ```text
//! expression := blank | explicit | modifier
//! explicit   := name (',' name)*
//! modifier   := ('+' name (',' name)*)? ('-' name (',' name)*)?
//! ```
//!
//! A blank expression selects the default authorizers. A modifier (leading
//! `+` or `-`) edits the defaults. Anything else is an explicit list that
//! replaces them. The `none` name contributes nothing wherever it appears.

use crate::registry::names_match;

/// Separates names inside a list.
pub const ELEMENT_SEPARATOR: char = ',';
/// Introduces the names appended to the defaults.
pub const ADD_ELEMENT: char = '+';
/// Introduces the names removed from the defaults.
pub const REMOVE_ELEMENT: char = '-';
/// Placeholder name that selects nothing.
pub const NONE: &str = "none";

/// A parsed authorizer expression. Names are trimmed, `none` already dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizerExpression {
    /// Use the defaults derived from the clients.
    Default,
    /// Start from the defaults, remove then append.
    Modify { add: Vec<String>, remove: Vec<String> },
    /// Exactly these authorizers, in this order.
    Explicit(Vec<String>),
}

impl AuthorizerExpression {
    pub fn parse(expression: Option<&str>) -> Self {
        let Some(raw) = expression.filter(|e| !e.trim().is_empty()) else {
            return Self::Default;
        };

        let trimmed = raw.trim_start();
        if !trimmed.starts_with(ADD_ELEMENT) && !trimmed.starts_with(REMOVE_ELEMENT) {
            return Self::Explicit(split_names(raw));
        }

        let remove = raw
            .split_once(REMOVE_ELEMENT)
            .map_or("", |(_, after)| after);
        let add = raw.split_once(ADD_ELEMENT).map_or("", |(_, after)| {
            after
                .split_once(REMOVE_ELEMENT)
                .map_or(after, |(between, _)| between)
        });

        Self::Modify {
            add: split_names(add),
            remove: split_names(remove),
        }
    }
}

/// Split a list segment into trimmed names, dropping `none`.
///
/// A blank segment holds no names and trailing blank elements are dropped
/// (`"a,b,"` lists `a` and `b`). Leading or interior blank elements are kept
/// as empty names so that resolution reports them.
fn split_names(segment: &str) -> Vec<String> {
    let mut names: Vec<&str> = segment.split(ELEMENT_SEPARATOR).map(str::trim).collect();
    while names.last().is_some_and(|name| name.is_empty()) {
        names.pop();
    }
    names
        .into_iter()
        .filter(|name| !is_none(name))
        .map(str::to_string)
        .collect()
}

pub fn is_none(name: &str) -> bool {
    names_match(name, NONE)
}

fn join(names: &[String]) -> String {
    names.join(&ELEMENT_SEPARATOR.to_string())
}

impl core::fmt::Display for AuthorizerExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Default => Ok(()),
            Self::Explicit(names) if names.is_empty() => f.write_str(NONE),
            Self::Explicit(names) => f.write_str(&join(names)),
            Self::Modify { add, remove } => {
                if !add.is_empty() || remove.is_empty() {
                    write!(f, "{ADD_ELEMENT}{}", join(add))?;
                }
                if !remove.is_empty() {
                    write!(f, "{REMOVE_ELEMENT}{}", join(remove))?;
                }
                Ok(())
            }
        }
    }
}
