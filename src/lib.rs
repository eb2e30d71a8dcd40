/*
    Compiles one-letter context-free grammars into pushdown automata and
    checks strings against them, keeping the configuration chain of every
    accepted string
*/

pub mod automaton;
pub mod error_handling;
pub mod grammar;
pub mod parser;
pub mod recognizer;
