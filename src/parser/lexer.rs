use itertools::{Itertools, PeekingNext};

use super::{CompileErrorType, Result, RuleDefect};

#[derive(PartialEq, Debug)]
pub enum Token {
    Or,
    Text(String)
}

// A rule line split into its head and the tokens after `>`. The head is
// fully checked here, so the body only ever holds `Or` and `Text`
#[derive(PartialEq, Debug)]
pub struct LexedLine {
    pub nonterminal: char,
    pub body: Vec<Token>
}

fn malformed(defect: RuleDefect) -> CompileErrorType {
    CompileErrorType::MalformedRule(defect)
}

// A rule always starts with a single uppercase letter
pub fn lex_nonterminal(line: &mut impl Iterator<Item = char>) -> Result<char> {
    match line.next() {
        Some(c) if c.is_ascii_uppercase() => Ok(c),
        _ => Err(malformed(RuleDefect::MissingNonterminal))
    }
}

pub fn lex_arrow(line: &mut impl Iterator<Item = char>) -> Result<()> {
    match line.next() {
        Some('>') => Ok(()),
        _ => Err(malformed(RuleDefect::MissingArrow))
    }
}

// Everything up to the next `|` is taken literally, `>` included
pub fn lex_text(line: &mut impl PeekingNext<Item = char>) -> Token {
    Token::Text(line.peeking_take_while(|&c| c != '|').collect())
}

pub fn lex_line(line: &str) -> Result<LexedLine> {
    let mut line_chars = line.chars().peekable();

    let nonterminal = lex_nonterminal(&mut line_chars)?;
    lex_arrow(&mut line_chars)?;

    let mut body = Vec::new();
    while let Some(c) = line_chars.peek() {
        if *c == '|' {
            line_chars.next();
            body.push(Token::Or);
        } else {
            body.push(lex_text(&mut line_chars));
        }
    }

    return Ok(LexedLine { nonterminal, body });
}
