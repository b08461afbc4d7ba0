//! Implements shell-style parameter expansion of environment variables in text.
//!
//! Supports plain (`$NAME`, `${NAME}`) references, the default/alternate operators
//! (`-`, `:-`, `=`, `:=`, `+`, `:+`), `$$` escapes, and configurable restrictions
//! on unset or empty variables.

pub mod env;
pub mod word;

mod error;
mod expansion;
mod options;
mod parser;

pub use env::{Environment, ParameterState};
pub use error::{Error, SyntaxError, Violation, Violations};
pub use options::{ErrorMode, Restrictions};
pub use parser::{Parser, evaluate};
