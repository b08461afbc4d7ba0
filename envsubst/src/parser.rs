use bon::Builder;

use crate::env::Environment;
use crate::error;
use crate::expansion::WordExpander;
use crate::options::{ErrorMode, Restrictions};

/// Implements expansion of templates against a fixed environment and policy.
///
/// # Examples
///
/// ```
/// use envsubst::{Environment, ErrorMode, Parser, Restrictions};
///
/// let parser = Parser::builder()
///     .name("greeting")
///     .env(Environment::from_pairs(["NAME=world"]))
///     .restrictions(Restrictions::STRICT)
///     .mode(ErrorMode::AllErrors)
///     .build();
///
/// assert_eq!(parser.parse("hello ${NAME:-you}").unwrap(), "hello world");
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct Parser {
    /// Name used to identify this parser in logs.
    #[builder(into, default)]
    name: String,
    /// The variables references are resolved against.
    #[builder(default)]
    env: Environment,
    /// The restrictions to enforce.
    #[builder(default)]
    restrictions: Restrictions,
    /// How violations of the restrictions are reported.
    #[builder(default)]
    mode: ErrorMode,
}

impl Parser {
    /// Returns a new parser instance.
    ///
    /// # Arguments
    ///
    /// * `env` - The variables references are resolved against.
    /// * `restrictions` - The restrictions to enforce.
    /// * `mode` - How violations of the restrictions are reported.
    pub fn new(env: Environment, restrictions: Restrictions, mode: ErrorMode) -> Self {
        Self {
            name: String::new(),
            env,
            restrictions,
            mode,
        }
    }

    /// Returns the name of this parser.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the variables references are resolved against.
    pub const fn env(&self) -> &Environment {
        &self.env
    }

    /// Returns the restrictions enforced by this parser.
    pub const fn restrictions(&self) -> Restrictions {
        self.restrictions
    }

    /// Returns how this parser reports violations.
    pub const fn mode(&self) -> ErrorMode {
        self.mode
    }

    /// Expands all references in the given template.
    ///
    /// On error, no partially expanded text is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - The template to expand.
    pub fn parse(&self, input: &str) -> Result<String, error::Error> {
        let _span = tracing::debug_span!(target: "expansion", "parse", parser = self.name.as_str())
            .entered();

        WordExpander::new(&self.env, self.restrictions, self.mode).expand_to_str(input)
    }
}

/// Expands all references in the given template against `NAME=VALUE` entries.
///
/// # Arguments
///
/// * `input` - The template to expand.
/// * `env` - The `NAME=VALUE` entries to resolve references against; later entries
///   for a name take precedence over earlier ones.
/// * `restrictions` - The restrictions to enforce.
/// * `mode` - How violations of the restrictions are reported.
pub fn evaluate<I, S>(
    input: &str,
    env: I,
    restrictions: Restrictions,
    mode: ErrorMode,
) -> Result<String, error::Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Parser::new(Environment::from_pairs(env), restrictions, mode).parse(input)
}

#[cfg(test)]
mod tests;
