mod cli;

use std::io::{BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use pushdown::automaton::{self, StackSymbol};
use pushdown::parser;
use pushdown::recognizer::{Recognizer, Verdict};

use cli::Cli;

fn check(recognizer: &Recognizer, input: &str, verbose: bool) {
    let (verdict, stats) = recognizer.search(input);

    match verdict {
        Verdict::Accepted(chain) => {
            println!("Valid string");
            println!();
            println!("Configuration chain:");
            println!("{}", chain);
        }
        Verdict::Rejected => println!("Invalid string"),
    }

    if verbose {
        eprintln!("{:?}: {}", input, stats);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let grammar = parser::parse_file(&cli.file).map_err(|e| e.to_string())?;
    let table = automaton::compile(&grammar);

    if !cli.quiet {
        println!("{}", table);
    }

    let mut recognizer = Recognizer::new(&table);
    if let Some(start) = cli.start {
        recognizer = recognizer.with_start(StackSymbol::Symbol(start));
    }

    if !cli.input.is_empty() {
        for input in &cli.input {
            check(&recognizer, input, cli.verbose);
        }
        return Ok(());
    }

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Enter a string: ");
        std::io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line.map_err(|e| e.to_string())?;

        check(&recognizer, &line, cli.verbose);
        println!();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
