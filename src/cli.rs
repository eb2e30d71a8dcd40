use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar, one `S>alt|alt` rule per line
    pub file: PathBuf,

    /// Start symbol (default: nonterminal of the first rule)
    #[arg(short, long, value_name = "SYMBOL")]
    pub start: Option<char>,

    /// Check this string instead of reading from stdin (repeatable)
    #[arg(short, long, value_name = "STRING")]
    pub input: Vec<String>,

    /// Don't print the alphabets and transition table
    #[arg(short, long)]
    pub quiet: bool,

    /// Report search statistics for every check on stderr
    #[arg(short, long)]
    pub verbose: bool
}
