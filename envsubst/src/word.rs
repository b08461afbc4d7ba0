//! Scanner for templates, used by expansion and other contexts.
//!
//! A template is scanned once, in full, into a [`Template`]. Each level of the
//! template (the top level, and the clause of every operator expression) is a
//! sequence of:
//!
//! - Literal text.
//! - `$$` escape sequences.
//! - Parameter expansion expressions (`$NAME`, `${NAME}`, `${NAME<op><clause>}`).
//!
//! Levels are stored side by side rather than nested, and an expression refers
//! to its clause's level through a [`Clause`].

use std::collections::HashMap;

use crate::Restrictions;
use crate::error;

/// Encapsulates a `WordPiece` together with its position in the template it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WordPieceWithSource {
    /// The word piece.
    pub piece: WordPiece,
    /// The start byte index of the piece in the template.
    pub start_index: usize,
    /// The end byte index of the piece in the template.
    pub end_index: usize,
}

/// Represents a piece of a template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordPiece {
    /// Literal text, copied through unchanged.
    Text(String),
    /// A `$$` sequence, standing for a single literal `$`.
    EscapedDollar,
    /// A parameter expansion.
    ParameterExpansion(ParameterExpr),
}

/// Type of a parameter test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterTestType {
    /// Check for unset or null (the `:`-prefixed operators).
    UnsetOrNull,
    /// Check for unset.
    Unset,
}

/// The default or alternative clause of a parameter expression, already scanned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    level: usize,
    /// The start byte index of the clause text in the template.
    pub start_index: usize,
    /// The end byte index of the clause text in the template.
    pub end_index: usize,
}

/// A parameter expression, used in a parameter expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterExpr {
    /// A plain reference to a variable.
    Parameter {
        /// Variable name.
        name: String,
        /// Whether the reference was written with braces.
        braced: bool,
    },
    /// Conditionally use a default value (`-`, `:-`).
    UseDefaultValues {
        /// Variable name.
        name: String,
        /// The type of test to perform.
        test_type: ParameterTestType,
        /// Default value.
        default_value: Clause,
    },
    /// Conditionally use a default value (`=`, `:=`). The variable itself is left
    /// untouched.
    AssignDefaultValues {
        /// Variable name.
        name: String,
        /// The type of test to perform.
        test_type: ParameterTestType,
        /// Default value.
        default_value: Clause,
    },
    /// Conditionally use an alternative value (`+`, `:+`).
    UseAlternativeValue {
        /// Variable name.
        name: String,
        /// The type of test to perform.
        test_type: ParameterTestType,
        /// Alternative value.
        alternative_value: Clause,
    },
}

impl ParameterExpr {
    /// Returns the name of the referenced variable.
    pub fn name(&self) -> &str {
        match self {
            Self::Parameter { name, .. }
            | Self::UseDefaultValues { name, .. }
            | Self::AssignDefaultValues { name, .. }
            | Self::UseAlternativeValue { name, .. } => name.as_str(),
        }
    }
}

/// A fully scanned template.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    source: String,
    levels: Vec<Vec<WordPieceWithSource>>,
}

impl Template {
    /// Returns the text the template was scanned from.
    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    /// Returns the top-level pieces of the template.
    pub fn pieces(&self) -> &[WordPieceWithSource] {
        self.level(0)
    }

    /// Returns the pieces of the given clause.
    ///
    /// # Arguments
    ///
    /// * `clause` - A clause of an expression in this template.
    pub fn clause_pieces(&self, clause: &Clause) -> &[WordPieceWithSource] {
        self.level(clause.level)
    }

    /// Returns the unexpanded text of the given clause.
    pub fn clause_text(&self, clause: &Clause) -> &str {
        self.text(clause.start_index, clause.end_index)
    }

    /// Returns the text the given piece was scanned from.
    pub fn piece_text(&self, piece: &WordPieceWithSource) -> &str {
        self.text(piece.start_index, piece.end_index)
    }

    fn level(&self, level: usize) -> &[WordPieceWithSource] {
        self.levels.get(level).map(Vec::as_slice).unwrap_or_default()
    }

    fn text(&self, start: usize, end: usize) -> &str {
        self.source.get(start..end).unwrap_or_default()
    }
}

/// Scan a template into its constituent pieces.
///
/// # Arguments
///
/// * `input` - The template text to scan.
/// * `restrictions` - The restrictions in effect; only `no_digit` affects scanning.
pub fn parse(input: &str, restrictions: Restrictions) -> Result<Template, error::SyntaxError> {
    tracing::debug!(target: "parse", "Scanning template '{}'", input);

    let closing = match_braces(input)?;
    let template = Scanner::new(input, restrictions.no_digit, closing).scan();

    tracing::debug!(target: "parse", "Scanned template '{}' => {{{:?}}}", input, template.levels);

    Ok(template)
}

/// Pairs the `$` of every `${` with the index of its closing `}`. Inside braces,
/// a nested `${` opens a further level; `$$` never does.
fn match_braces(input: &str) -> Result<HashMap<usize, usize>, error::SyntaxError> {
    let bytes = input.as_bytes();
    let mut open = vec![];
    let mut closing = HashMap::new();
    let mut index = 0;

    while let Some(c) = bytes.get(index) {
        match (c, bytes.get(index + 1)) {
            (b'$', Some(b'$')) => index += 2,
            (b'$', Some(b'{')) => {
                open.push(index);
                index += 2;
            }
            (b'}', _) => {
                if let Some(dollar) = open.pop() {
                    closing.insert(dollar, index);
                }
                index += 1;
            }
            _ => index += 1,
        }
    }

    // The outermost unclosed brace is the one reported.
    match open.first() {
        Some(index) => Err(error::SyntaxError::UnterminatedBrace { index: *index }),
        None => Ok(closing),
    }
}

const fn is_name_char(c: u8) -> bool {
    c == b'_' || c.is_ascii_alphanumeric()
}

/// A level still waiting to be scanned.
struct PendingLevel {
    level: usize,
    start: usize,
    end: usize,
}

struct Scanner<'a> {
    input: &'a str,
    no_digit: bool,
    closing: HashMap<usize, usize>,
    levels: Vec<Vec<WordPieceWithSource>>,
    pending: Vec<PendingLevel>,
}

impl<'a> Scanner<'a> {
    const fn new(input: &'a str, no_digit: bool, closing: HashMap<usize, usize>) -> Self {
        Self {
            input,
            no_digit,
            closing,
            levels: vec![],
            pending: vec![],
        }
    }

    fn scan(mut self) -> Template {
        self.add_level(0, self.input.len());

        while let Some(pending) = self.pending.pop() {
            let pieces = self.scan_level(pending.start, pending.end);
            if let Some(level) = self.levels.get_mut(pending.level) {
                *level = pieces;
            }
        }

        Template {
            source: self.input.to_owned(),
            levels: self.levels,
        }
    }

    fn add_level(&mut self, start: usize, end: usize) -> usize {
        let level = self.levels.len();
        self.levels.push(vec![]);
        self.pending.push(PendingLevel { level, start, end });
        level
    }

    fn scan_level(&mut self, start: usize, end: usize) -> Vec<WordPieceWithSource> {
        let input = self.input;
        let bytes = input.as_bytes();
        let mut pieces = LevelPieces::new(input, start);
        let mut index = start;

        while let Some(offset) = bytes
            .get(index..end)
            .and_then(|rest| rest.iter().position(|c| *c == b'$'))
        {
            let dollar = index + offset;

            index = match bytes.get(dollar + 1) {
                Some(b'$') => {
                    pieces.push(WordPiece::EscapedDollar, dollar, dollar + 2);
                    dollar + 2
                }
                Some(b'{') => self.scan_braced(&mut pieces, dollar),
                Some(c) if self.is_name_start(*c) => scan_bare(&mut pieces, dollar),
                // A lone `$` is just text.
                _ => dollar + 1,
            };
        }

        pieces.finish(end)
    }

    const fn is_name_start(&self, c: u8) -> bool {
        c == b'_' || c.is_ascii_alphabetic() || (!self.no_digit && c.is_ascii_digit())
    }

    fn scan_braced(&mut self, pieces: &mut LevelPieces<'_>, dollar: usize) -> usize {
        let body_start = dollar + 2;
        // Every `${` was paired up front.
        let Some(close) = self.closing.get(&dollar).copied() else {
            return body_start;
        };

        let body = self.input.get(body_start..close).unwrap_or_default();

        // Anything that doesn't parse as an expression is left as text.
        if let Some(body) = parse_braced_body(body) {
            let name = body.name.to_owned();
            let expr = match body.operator {
                None => ParameterExpr::Parameter { name, braced: true },
                Some((operator, clause_offset)) => {
                    let clause_start = body_start + clause_offset;
                    let clause = Clause {
                        level: self.add_level(clause_start, close),
                        start_index: clause_start,
                        end_index: close,
                    };
                    operator.into_expr(name, clause)
                }
            };
            pieces.push(WordPiece::ParameterExpansion(expr), dollar, close + 1);
        }

        close + 1
    }
}

fn scan_bare(pieces: &mut LevelPieces<'_>, dollar: usize) -> usize {
    let name_len = pieces.input.as_bytes().get(dollar + 1..).map_or(0, |rest| {
        rest.iter().take_while(|c| is_name_char(**c)).count()
    });
    let end = dollar + 1 + name_len;
    let name = pieces.input.get(dollar + 1..end).unwrap_or_default();

    // `$_` is reserved; leave it as text.
    if name != "_" {
        let expr = ParameterExpr::Parameter {
            name: name.to_owned(),
            braced: false,
        };
        pieces.push(WordPiece::ParameterExpansion(expr), dollar, end);
    }

    end
}

/// The pieces of one level, with literal runs between expressions coalesced.
struct LevelPieces<'a> {
    input: &'a str,
    pieces: Vec<WordPieceWithSource>,
    text_start: usize,
}

impl<'a> LevelPieces<'a> {
    const fn new(input: &'a str, start: usize) -> Self {
        Self {
            input,
            pieces: vec![],
            text_start: start,
        }
    }

    fn push(&mut self, piece: WordPiece, start_index: usize, end_index: usize) {
        self.flush_text(start_index);
        self.pieces.push(WordPieceWithSource {
            piece,
            start_index,
            end_index,
        });
        self.text_start = end_index;
    }

    fn flush_text(&mut self, end_index: usize) {
        if end_index > self.text_start {
            if let Some(text) = self.input.get(self.text_start..end_index) {
                self.pieces.push(WordPieceWithSource {
                    piece: WordPiece::Text(text.to_owned()),
                    start_index: self.text_start,
                    end_index,
                });
            }
        }
        self.text_start = end_index;
    }

    fn finish(mut self, end_index: usize) -> Vec<WordPieceWithSource> {
        self.flush_text(end_index);
        self.pieces
    }
}

#[derive(Clone, Copy)]
enum Operator {
    UseDefault(ParameterTestType),
    AssignDefault(ParameterTestType),
    UseAlternative(ParameterTestType),
}

impl Operator {
    // Two-character operators take priority over their one-character suffixes.
    const ALL: [(&'static str, Self); 6] = [
        (":-", Self::UseDefault(ParameterTestType::UnsetOrNull)),
        (":=", Self::AssignDefault(ParameterTestType::UnsetOrNull)),
        (":+", Self::UseAlternative(ParameterTestType::UnsetOrNull)),
        ("-", Self::UseDefault(ParameterTestType::Unset)),
        ("=", Self::AssignDefault(ParameterTestType::Unset)),
        ("+", Self::UseAlternative(ParameterTestType::Unset)),
    ];

    const fn into_expr(self, name: String, clause: Clause) -> ParameterExpr {
        match self {
            Self::UseDefault(test_type) => ParameterExpr::UseDefaultValues {
                name,
                test_type,
                default_value: clause,
            },
            Self::AssignDefault(test_type) => ParameterExpr::AssignDefaultValues {
                name,
                test_type,
                default_value: clause,
            },
            Self::UseAlternative(test_type) => ParameterExpr::UseAlternativeValue {
                name,
                test_type,
                alternative_value: clause,
            },
        }
    }
}

struct BracedBody<'a> {
    name: &'a str,
    /// The operator, and the offset of its clause within the body.
    operator: Option<(Operator, usize)>,
}

fn parse_braced_body(body: &str) -> Option<BracedBody<'_>> {
    let name_len = body.bytes().take_while(|c| is_name_char(*c)).count();
    let (name, rest) = body.split_at(name_len);

    if name.is_empty() || name == "_" {
        return None;
    }

    if rest.is_empty() {
        return Some(BracedBody {
            name,
            operator: None,
        });
    }

    let (token, operator) = Operator::ALL
        .into_iter()
        .find(|(token, _)| rest.starts_with(token))?;

    Some(BracedBody {
        name,
        operator: Some((operator, name_len + token.len())),
    })
}
