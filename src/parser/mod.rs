/*
    This module reads grammar files of the form `S>aS|b`, one rule per line
*/

mod lexer;

use std::fmt::Display;
use std::fs::File;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::grammar::*;
use crate::error_handling::*;
use lexer::*;

// Why a line is not a `NAME>alt1|alt2|...` rule
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RuleDefect {
    // The line does not start with a single uppercase letter
    MissingNonterminal,
    // The nonterminal is not followed by `>`
    MissingArrow,
    // Nothing between two `|`, or nothing at all after `>`
    EmptyAlternative,
}

impl Display for RuleDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleDefect::MissingNonterminal => write!(f, "expected a single uppercase nonterminal at the start of the line"),
            RuleDefect::MissingArrow => write!(f, "expected `>` after the nonterminal"),
            RuleDefect::EmptyAlternative => write!(f, "alternatives must not be empty"),
        }
    }
}

#[derive(Debug)]
pub enum CompileErrorType {
    // A line does not have the shape of a rule
    MalformedRule(RuleDefect),
    // The grammar source could not be opened or read
    UnreadableSource(std::io::Error),
}

impl ErrorType for CompileErrorType {}

impl PartialEq for CompileErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CompileErrorType::UnreadableSource(a), CompileErrorType::UnreadableSource(b)) => a.kind() == b.kind(),
            (CompileErrorType::MalformedRule(a), CompileErrorType::MalformedRule(b)) => a == b,
            _ => std::mem::discriminant(self) == std::mem::discriminant(other),
        }
    }
}

impl Display for CompileErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileErrorType::MalformedRule(defect) => write!(f, "Malformed rule: {}", defect),
            CompileErrorType::UnreadableSource(e) => write!(f, "Could not read grammar: {}", e),
        }
    }
}

pub type CompileError = Error<CompileErrorType>;

pub type Result<T> = std::result::Result<T, CompileErrorType>;
pub type LineResult<T> = std::result::Result<T, CompileError>;

fn io_error(error: std::io::Error, location: Location) -> CompileError {
    CompileError::at(location, CompileErrorType::UnreadableSource(error))
}

// The lexer never puts two `Text` tokens side by side, so between two `Or`s
// there is either one alternative or nothing
fn parse_alternative(tokens: &[Token]) -> Result<Alternative> {
    match tokens {
        [Token::Text(text)] => Ok(text.clone()),
        _ => Err(CompileErrorType::MalformedRule(RuleDefect::EmptyAlternative))
    }
}

fn parse_alternatives(tokens: &[Token]) -> Result<Vec<Alternative>> {
    tokens.split(|t| *t == Token::Or).map(parse_alternative).collect()
}

fn parse_line(line: LexedLine) -> Result<Rule> {
    let alternatives = parse_alternatives(&line.body)?;

    return Ok(Rule {
        nonterminal: line.nonterminal,
        alternatives
    });
}

fn parse_lex_line(line: &str, location: Location) -> LineResult<Rule> {
    lexer::lex_line(line)
        .and_then(parse_line)
        .map_err(|error| CompileError::at(location, error))
}

// Returns an iterator over the trimmed, non-blank lines of a source, with
// their 1-based line numbers and io errors wrapped in CompileError
fn source_line_nums<'a>(source: impl BufRead + 'a, path: &'a Path) -> impl Iterator<Item = (Location, LineResult<String>)> + 'a {
    source
        .lines()
        .enumerate()
        .map(move |(num, line)| {
            let location = Location {
                file: path.to_path_buf(),
                line: num + 1
            };
            let line = line
                .map(|l| l.trim().to_string())
                .map_err(|e| io_error(e, location.clone()));
            (location, line)
        })
        .filter(|(_, line)| line.as_ref().map_or(true, |l| !l.is_empty()))
}

// Reads rules until the first line that is not one
pub fn parse_source(source: impl BufRead, path: &Path) -> LineResult<Grammar> {
    let rules = source_line_nums(source, path)
        .map(|(location, line_res)| line_res.and_then(|line| parse_lex_line(&line, location)))
        .collect::<LineResult<Vec<Rule>>>()?;

    return Ok(Grammar { rules });
}

pub fn parse_str(source: &str) -> LineResult<Grammar> {
    parse_source(source.as_bytes(), Path::new("<string>"))
}

pub fn parse_file(path: &PathBuf) -> LineResult<Grammar> {
    let file = File::open(path).map_err(|e| io_error(e, Location::whole(path.clone())))?;
    parse_source(std::io::BufReader::new(file), path)
}
