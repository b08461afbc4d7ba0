//! Expansion of scanned templates against an environment.

use crate::env::{Environment, ParameterState};
use crate::error::{self, Violation, Violations};
use crate::options::{ErrorMode, Restrictions};
use crate::word::{self, Clause, ParameterExpr, ParameterTestType, Template, WordPiece};

/// Expands templates against an environment, enforcing a set of restrictions.
///
/// Violations are either returned immediately or collected for the caller,
/// depending on the error mode.
pub(crate) struct WordExpander<'a> {
    env: &'a Environment,
    restrictions: Restrictions,
    mode: ErrorMode,
    violations: Violations,
}

/// What a parameter expression expands to.
enum Resolution<'a> {
    /// A value, used as is.
    Value(&'a str),
    /// The expansion of one of the expression's clauses.
    Clause(Clause),
    /// The expression's own source text.
    Unchanged,
}

impl<'a> WordExpander<'a> {
    pub const fn new(env: &'a Environment, restrictions: Restrictions, mode: ErrorMode) -> Self {
        Self {
            env,
            restrictions,
            mode,
            violations: Violations::new(),
        }
    }

    /// Expands the given template in full; any violation, whether reported
    /// immediately or collected along the way, makes this an error.
    pub fn expand_to_str(mut self, input: &str) -> Result<String, error::Error> {
        tracing::debug!(target: "expansion", "Expanding '{}' ({:?})", input, self.mode);

        let template = word::parse(input, self.restrictions)?;
        let expanded = self.expand(&template)?;

        if self.violations.is_empty() {
            Ok(expanded)
        } else {
            Err(self.violations.into())
        }
    }

    /// Walks the template's pieces in order, descending into a clause whenever
    /// an expression resolves to it. Clauses are tracked on an explicit stack,
    /// so nesting depth is bounded only by memory.
    fn expand(&mut self, template: &Template) -> Result<String, error::Error> {
        let mut expanded = String::with_capacity(template.source().len());
        let mut levels = vec![template.pieces().iter()];

        while let Some(level) = levels.last_mut() {
            let Some(piece) = level.next() else {
                levels.pop();
                continue;
            };

            match &piece.piece {
                WordPiece::Text(text) => expanded.push_str(text.as_str()),
                WordPiece::EscapedDollar => expanded.push('$'),
                WordPiece::ParameterExpansion(expr) => match self.resolve(expr)? {
                    Resolution::Value(value) => expanded.push_str(value),
                    Resolution::Clause(clause) => {
                        levels.push(template.clause_pieces(&clause).iter());
                    }
                    Resolution::Unchanged => expanded.push_str(template.piece_text(piece)),
                },
            }
        }

        Ok(expanded)
    }

    fn resolve(&mut self, expr: &ParameterExpr) -> Result<Resolution<'a>, error::Error> {
        let env = self.env;
        let name = expr.name();
        let state = env.state(name);

        let resolution = match expr {
            ParameterExpr::Parameter { .. } => match state {
                ParameterState::Undefined => {
                    if self.restrictions.no_unset {
                        self.violation(Violation::Unset(name.to_owned()))?;
                        Resolution::Value("")
                    } else if self.restrictions.no_replace {
                        Resolution::Unchanged
                    } else {
                        Resolution::Value("")
                    }
                }
                ParameterState::DefinedEmptyString => self.resolve_empty(name)?,
                ParameterState::NonZeroLength(value) => Resolution::Value(value),
            },
            ParameterExpr::UseDefaultValues {
                test_type,
                default_value,
                ..
            }
            | ParameterExpr::AssignDefaultValues {
                test_type,
                default_value,
                ..
            } => match (test_type, state) {
                (_, ParameterState::NonZeroLength(value)) => Resolution::Value(value),
                (ParameterTestType::Unset, ParameterState::DefinedEmptyString) => {
                    self.resolve_empty(name)?
                }
                _ => Resolution::Clause(*default_value),
            },
            // `:+` selects the alternative for an empty variable just like `+` does.
            ParameterExpr::UseAlternativeValue {
                alternative_value, ..
            } => match state {
                ParameterState::Undefined => Resolution::Value(""),
                ParameterState::DefinedEmptyString | ParameterState::NonZeroLength(_) => {
                    Resolution::Clause(*alternative_value)
                }
            },
        };

        Ok(resolution)
    }

    fn resolve_empty(&mut self, name: &str) -> Result<Resolution<'a>, error::Error> {
        if self.restrictions.no_empty {
            self.violation(Violation::Empty(name.to_owned()))?;
        }
        Ok(Resolution::Value(""))
    }

    fn violation(&mut self, violation: Violation) -> Result<(), error::Error> {
        tracing::trace!(target: "expansion", "{violation}");

        if self.mode.is_fail_fast() {
            return Err(violation.into());
        }

        self.violations.push(violation);
        Ok(())
    }
}
