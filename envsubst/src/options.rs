/// Options restricting which references an expansion accepts.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "fuzz-testing", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restrictions {
    /// Whether a reference to an undefined variable is an error.
    pub no_unset: bool,
    /// Whether a reference to a variable holding the empty string is an error.
    pub no_empty: bool,
    /// Whether an unbraced name starting with a digit (e.g. `$1`) is left as literal text.
    ///
    /// Braced names may always start with a digit: `${1}` is a reference either way.
    pub no_digit: bool,
    /// Whether an undefined variable referenced without an operator is left as literal
    /// text rather than expanding to the empty string.
    pub no_replace: bool,
}

impl Restrictions {
    /// No restrictions at all.
    pub const RELAXED: Self = Self {
        no_unset: false,
        no_empty: false,
        no_digit: false,
        no_replace: false,
    };

    /// Undefined variables are an error.
    pub const NO_UNSET: Self = Self {
        no_unset: true,
        ..Self::RELAXED
    };

    /// Empty variables are an error.
    pub const NO_EMPTY: Self = Self {
        no_empty: true,
        ..Self::RELAXED
    };

    /// Undefined and empty variables are both errors.
    pub const STRICT: Self = Self {
        no_unset: true,
        no_empty: true,
        ..Self::RELAXED
    };
}

/// Selects how restriction violations are reported.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "fuzz-testing", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorMode {
    /// Stop at the first violation.
    #[default]
    FailFast,
    /// Expand the whole input and report every violation, in the order encountered.
    AllErrors,
}

impl ErrorMode {
    /// Returns whether evaluation should stop at the first violation.
    pub const fn is_fail_fast(self) -> bool {
        matches!(self, Self::FailFast)
    }
}
