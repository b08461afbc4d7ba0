//! Implements a read-only view of the variables available to an expansion.

use std::collections::HashMap;

/// Describes what a lookup found for a given variable name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParameterState<'a> {
    /// The variable is not defined.
    Undefined,
    /// The variable is defined, but holds the empty string.
    DefinedEmptyString,
    /// The variable is defined and holds a non-empty value.
    NonZeroLength(&'a str),
}

/// Represents the set of variables an expansion resolves references against.
///
/// Built from `NAME=VALUE` entries; an entry without `=` is ignored, and a later
/// entry for a name replaces an earlier one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    /// Returns a new, empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an environment from `NAME=VALUE` entries.
    ///
    /// # Arguments
    ///
    /// * `pairs` - The entries to parse, in order.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        pairs.into_iter().collect()
    }

    /// Looks up the value of the named variable; returns `None` if it's not defined.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the variable.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Classifies the named variable as undefined, empty, or holding a value.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the variable.
    pub fn state(&self, name: &str) -> ParameterState<'_> {
        match self.lookup(name) {
            None => ParameterState::Undefined,
            Some("") => ParameterState::DefinedEmptyString,
            Some(value) => ParameterState::NonZeroLength(value),
        }
    }

    /// Returns the number of distinct variables defined.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns whether no variables are defined.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Environment {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        let mut vars = HashMap::new();

        for entry in iter {
            if let Some((name, value)) = entry.as_ref().split_once('=') {
                vars.insert(name.to_owned(), value.to_owned());
            }
        }

        Self { vars }
    }
}
