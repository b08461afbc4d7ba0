use std::fmt::Display;

/// Represents an error that occurred while expanding a template.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The template is malformed.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// One or more references broke the configured restrictions.
    #[error(transparent)]
    Restricted(#[from] Violations),
}

/// Represents a malformed template.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    /// A `${` was never closed.
    #[error("closing brace expected")]
    UnterminatedBrace {
        /// The byte offset of the `$` opening the reference, relative to the text
        /// being scanned.
        index: usize,
    },
}

/// A reference that broke one of the configured restrictions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// The referenced variable is not defined.
    #[error("variable ${{{0}}} not set")]
    Unset(String),

    /// The referenced variable is defined, but empty.
    #[error("variable ${{{0}}} set but empty")]
    Empty(String),
}

impl Violation {
    /// Returns the name of the variable whose reference caused the violation.
    pub fn name(&self) -> &str {
        match self {
            Self::Unset(name) | Self::Empty(name) => name.as_str(),
        }
    }
}

/// The violations collected during one expansion, in the order they were encountered.
///
/// Displays as one line per violation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub(crate) const fn new() -> Self {
        Self(Vec::new())
    }

    pub(crate) fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    /// Returns an iterator over the violations.
    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.0.iter()
    }

    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether there are no violations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Violation> for Violations {
    fn from(violation: Violation) -> Self {
        Self(vec![violation])
    }
}

impl From<Violation> for Error {
    fn from(violation: Violation) -> Self {
        Self::Restricted(violation.into())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Violations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{violation}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Violations {}
