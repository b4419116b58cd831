#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the plain clause-per-line formula format.
//!
//! The format is a stripped-down cousin of DIMACS CNF:
//! - One clause per line; literals are whitespace-separated signed integers.
//! - Each line is terminated by a literal value of `0`. The terminator is
//!   wire syntax only and is stripped before the in-memory [`Clause`] is
//!   built; a `0` anywhere else on a line is a hard parse error.
//! - A blank line separates consecutive formulas when a stream carries more
//!   than one.
//!
//! There is no problem line and no comment syntax. [`Cnf`]'s `Display`
//! implementation renders the inverse of this format.

use crate::sat::clause::Clause;
use crate::sat::cnf::Cnf;
use crate::sat::literal::Literal;
use std::fmt;
use std::io::{self, BufRead};
use std::path::Path;

/// Failure while reading or decoding formula text.
#[derive(Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    Io(io::Error),
    /// A token was not a signed integer.
    BadToken { line: usize, token: String },
    /// A `0` appeared before the end of a clause line.
    UnexpectedZero { line: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read formula text: {err}"),
            Self::BadToken { line, token } => {
                write!(f, "line {line}: token '{token}' is not a literal")
            }
            Self::UnexpectedZero { line } => {
                write!(f, "line {line}: literal 0 before end of clause")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Decodes one clause line. The trailing `0` terminator is tolerated and
/// stripped; its absence is tolerated too, since the last line of a stream
/// commonly omits it.
fn parse_clause(line_no: usize, line: &str) -> Result<Clause, ParseError> {
    let mut values = line
        .split_whitespace()
        .map(|token| {
            token.parse::<i32>().map_err(|_| ParseError::BadToken {
                line: line_no,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<i32>, _>>()?;

    if values.last() == Some(&0) {
        values.pop();
    }

    values
        .into_iter()
        .map(|value| {
            Literal::new(value).map_err(|_| ParseError::UnexpectedZero { line: line_no })
        })
        .collect()
}

/// Parses a single formula from `reader`, skipping blank lines.
///
/// # Errors
///
/// Propagates I/O failures and token/terminator violations as [`ParseError`].
pub fn parse_formula<R: BufRead>(reader: R) -> Result<Cnf, ParseError> {
    let mut clauses = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        clauses.push(parse_clause(idx + 1, &line)?);
    }

    Ok(Cnf::new(clauses))
}

/// Parses a stream of formulas separated by blank lines.
///
/// Consecutive blank lines collapse; leading and trailing blank lines are
/// ignored. A stream with no clause lines yields no formulas.
///
/// # Errors
///
/// Propagates I/O failures and token/terminator violations as [`ParseError`].
pub fn parse_formulas<R: BufRead>(reader: R) -> Result<Vec<Cnf>, ParseError> {
    let mut formulas = Vec::new();
    let mut current = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            if !current.is_empty() {
                formulas.push(Cnf::new(std::mem::take(&mut current)));
            }
            continue;
        }
        current.push(parse_clause(idx + 1, &line)?);
    }

    if !current.is_empty() {
        formulas.push(Cnf::new(current));
    }

    Ok(formulas)
}

/// Reads a single formula from the file at `path`.
///
/// # Errors
///
/// See [`parse_formula`].
pub fn read_file(path: impl AsRef<Path>) -> Result<Cnf, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_formula(io::BufReader::new(file))
}

/// Reads every blank-line-separated formula from the file at `path`.
///
/// # Errors
///
/// See [`parse_formulas`].
pub fn read_formulas(path: impl AsRef<Path>) -> Result<Vec<Cnf>, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_formulas(io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_single_formula() {
        let input = "1 -2 0\n2 3 0\n";
        let cnf = parse_formula(Cursor::new(input)).expect("parses");

        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.to_string(), "-2 1 0\n2 3 0");
    }

    #[test]
    fn test_terminator_is_optional_on_last_line() {
        let cnf = parse_formula(Cursor::new("1 2 0\n-1 3")).expect("parses");
        assert_eq!(cnf.len(), 2);
        assert_eq!(cnf.literal_count(), 4);
    }

    #[test]
    fn test_lone_zero_is_the_empty_clause() {
        let cnf = parse_formula(Cursor::new("0\n")).expect("parses");
        assert_eq!(cnf.len(), 1);
        assert!(cnf.has_empty_clause());
    }

    #[test]
    fn test_zero_mid_clause_is_rejected() {
        let err = parse_formula(Cursor::new("1 0 2 0\n")).expect_err("inner zero");
        assert!(matches!(err, ParseError::UnexpectedZero { line: 1 }));
    }

    #[test]
    fn test_bad_token_is_rejected() {
        let err = parse_formula(Cursor::new("1 two 0\n")).expect_err("bad token");
        match err {
            ParseError::BadToken { line, token } => {
                assert_eq!(line, 1);
                assert_eq!(token, "two");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_blank_lines_split_formulas() {
        let input = "1 2 0\n-1 0\n\n\n3 0\n\n";
        let formulas = parse_formulas(Cursor::new(input)).expect("parses");

        assert_eq!(formulas.len(), 2);
        assert_eq!(formulas[0].len(), 2);
        assert_eq!(formulas[1].len(), 1);
    }

    #[test]
    fn test_empty_stream_yields_no_formulas() {
        let formulas = parse_formulas(Cursor::new("\n\n")).expect("parses");
        assert!(formulas.is_empty());
    }

    #[test]
    fn test_display_round_trip() {
        let input = "-2 1 0\n2 3 0";
        let cnf = parse_formula(Cursor::new(input)).expect("parses");
        let reparsed = parse_formula(Cursor::new(cnf.to_string())).expect("reparses");
        assert_eq!(cnf, reparsed);
    }
}
