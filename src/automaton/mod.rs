/*
    This module compiles a grammar into a single-state pushdown automaton
*/

use std::fmt::Display;

use itertools::Itertools;

use crate::grammar::*;

// Control state of the automaton. Every compiled transition starts and ends
// in the initial state, but the tables are keyed on it all the same
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct State(pub u32);

pub const INITIAL_STATE: State = State(0);

impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s{}", self.0)
    }
}

// What a transition requires from the remaining input
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum InputGuard {
    // Matches without consuming anything
    Lambda,
    Symbol(char),
}

impl InputGuard {
    pub fn admits(&self, next: char) -> bool {
        match self {
            InputGuard::Lambda => true,
            InputGuard::Symbol(c) => *c == next,
        }
    }

    pub fn consumes(&self) -> bool {
        matches!(self, InputGuard::Symbol(_))
    }
}

impl Display for InputGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputGuard::Lambda => write!(f, "lambda"),
            InputGuard::Symbol(c) => write!(f, "{}", c),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum StackSymbol {
    Bottom,
    Symbol(char),
}

impl Display for StackSymbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StackSymbol::Bottom => write!(f, "h0"),
            StackSymbol::Symbol(c) => write!(f, "{}", c),
        }
    }
}

// The left-hand side of a transition: f(state, input, stack top)
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Key {
    pub state: State,
    pub input: InputGuard,
    pub top: StackSymbol,
}

// One nondeterministic choice of a transition. `push` replaces the popped
// stack top and its last symbol becomes the new top
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Outcome {
    pub state: State,
    pub push: Vec<StackSymbol>,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub struct Transition {
    pub key: Key,
    pub outcomes: Vec<Outcome>,
}

impl Transition {
    pub fn matches(&self, state: State, next: char, top: StackSymbol) -> bool {
        self.key.state == state && self.key.top == top && self.key.input.admits(next)
    }
}

impl Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outcomes = self.outcomes.iter()
            .map(|outcome| {
                if outcome.push.is_empty() {
                    format!("({}, lambda)", outcome.state)
                } else {
                    format!("({}, {})", outcome.state, outcome.push.iter().join(""))
                }
            })
            .join("; ");
        write!(f, "f({}, {}, {}) = {{{}}}", self.key.state, self.key.input, self.key.top, outcomes)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TransitionTable {
    // The symbol the stack is seeded with
    pub start: StackSymbol,
    pub input_alphabet: Vec<char>,
    pub nonterminals: Vec<char>,
    pub transitions: Vec<Transition>,
}

impl TransitionTable {
    // Nonterminals, then terminals, then the bottom marker
    pub fn stack_alphabet(&self) -> Vec<StackSymbol> {
        self.nonterminals.iter()
            .chain(self.input_alphabet.iter())
            .unique()
            .map(|&c| StackSymbol::Symbol(c))
            .chain(std::iter::once(StackSymbol::Bottom))
            .collect()
    }

    // First transition, in compile order, that applies to a configuration
    pub fn find(&self, state: State, next: char, top: StackSymbol) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.matches(state, next, top))
    }
}

impl Display for TransitionTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Input alphabet:")?;
        writeln!(f, "P = {{ {} }}", self.input_alphabet.iter().join(", "))?;
        writeln!(f)?;
        writeln!(f, "Stack alphabet:")?;
        writeln!(f, "Z = {{ {} }}", self.stack_alphabet().iter().join(", "))?;
        writeln!(f)?;
        writeln!(f, "Transitions:")?;
        for transition in &self.transitions {
            writeln!(f, "{}", transition)?;
        }
        Ok(())
    }
}

// Stack contents are read top-down, so an alternative has to be pushed back
// to front for its first symbol to end up on top. "abc" is stored as "cba"
pub fn push_order(alternative: &str) -> Vec<StackSymbol> {
    alternative.chars().rev().map(StackSymbol::Symbol).collect()
}

fn expansion(rule: &Rule) -> Transition {
    Transition {
        key: Key {
            state: INITIAL_STATE,
            input: InputGuard::Lambda,
            top: StackSymbol::Symbol(rule.nonterminal),
        },
        outcomes: rule.alternatives.iter()
            .map(|alternative| Outcome {
                state: INITIAL_STATE,
                push: push_order(alternative),
            })
            .collect(),
    }
}

// Pops a terminal off the stack when it is also the next input symbol
fn terminal_match(terminal: char) -> Transition {
    Transition {
        key: Key {
            state: INITIAL_STATE,
            input: InputGuard::Symbol(terminal),
            top: StackSymbol::Symbol(terminal),
        },
        outcomes: vec![Outcome { state: INITIAL_STATE, push: Vec::new() }],
    }
}

fn bottom_pop() -> Transition {
    Transition {
        key: Key {
            state: INITIAL_STATE,
            input: InputGuard::Lambda,
            top: StackSymbol::Bottom,
        },
        outcomes: vec![Outcome { state: INITIAL_STATE, push: Vec::new() }],
    }
}

pub fn compile(grammar: &Grammar) -> TransitionTable {
    let nonterminals = grammar.nonterminals().unique().collect_vec();

    // Every character of every alternative, in order of first appearance,
    // minus the ones that name a nonterminal
    let input_alphabet = grammar.rules.iter()
        .flat_map(|rule| rule.alternatives.iter())
        .flat_map(|alternative| alternative.chars())
        .unique()
        .filter(|c| !nonterminals.contains(c))
        .collect_vec();

    let transitions = grammar.rules.iter()
        .map(expansion)
        .chain(input_alphabet.iter().map(|&c| terminal_match(c)))
        .chain(std::iter::once(bottom_pop()))
        .collect();

    // Without any rules the bottom marker is all there is to start from
    let start = grammar.start_symbol().map_or(StackSymbol::Bottom, StackSymbol::Symbol);

    TransitionTable {
        start,
        input_alphabet,
        nonterminals,
        transitions,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::iter::zip;

    use proptest::prelude::*;

    use super::*;
    use crate::parser::parse_str;

    fn symbols(text: &str) -> Vec<StackSymbol> {
        text.chars().map(StackSymbol::Symbol).collect()
    }

    #[test]
    fn alternatives_are_pushed_reversed() {
        let alternatives = vec!["abc", "aS", "b", "(E)"];
        let answers = vec!["cba", "Sa", "b", ")E("];

        for (alternative, answer) in zip(alternatives, answers) {
            assert_eq!(push_order(alternative), symbols(answer));
        }
    }

    #[test]
    fn compile_a_star_b() {
        let table = compile(&parse_str("S>aS|b").unwrap());

        assert_eq!(table.nonterminals, vec!['S']);
        assert_eq!(table.input_alphabet, vec!['a', 'b']);
        assert_eq!(table.start, StackSymbol::Symbol('S'));

        let rendered = table.transitions.iter().map(|t| t.to_string()).collect_vec();
        assert_eq!(rendered, vec![
            "f(s0, lambda, S) = {(s0, Sa); (s0, b)}",
            "f(s0, a, a) = {(s0, lambda)}",
            "f(s0, b, b) = {(s0, lambda)}",
            "f(s0, lambda, h0) = {(s0, lambda)}",
        ]);
    }

    #[test]
    fn nonterminals_leave_the_input_alphabet() {
        let table = compile(&parse_str("E>T+E|T\nT>F*T|F\nF>(E)|x").unwrap());

        assert_eq!(table.nonterminals, vec!['E', 'T', 'F']);
        assert_eq!(table.input_alphabet, vec!['+', '*', '(', ')', 'x']);
        assert_eq!(table.transitions.len(), 3 + 5 + 1);
    }

    #[test]
    fn undefined_uppercase_is_a_terminal() {
        let table = compile(&parse_str("S>aB").unwrap());
        assert_eq!(table.input_alphabet, vec!['a', 'B']);
    }

    #[test]
    fn display_table() {
        let table = compile(&parse_str("S>aS|b").unwrap());
        let expected = "Input alphabet:\n\
            P = { a, b }\n\
            \n\
            Stack alphabet:\n\
            Z = { S, a, b, h0 }\n\
            \n\
            Transitions:\n\
            f(s0, lambda, S) = {(s0, Sa); (s0, b)}\n\
            f(s0, a, a) = {(s0, lambda)}\n\
            f(s0, b, b) = {(s0, lambda)}\n\
            f(s0, lambda, h0) = {(s0, lambda)}\n";
        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn empty_grammar_starts_on_bottom_marker() {
        let table = compile(&Grammar::default());
        assert!(table.input_alphabet.is_empty());
        assert_eq!(table.transitions, vec![bottom_pop()]);
        assert_eq!(table.start, StackSymbol::Bottom);
    }

    #[test]
    fn find_prefers_compile_order() {
        // The second line for S can never be reached
        let table = compile(&parse_str("S>a\nS>b").unwrap());
        let found = table.find(INITIAL_STATE, 'b', StackSymbol::Symbol('S')).unwrap();
        assert_eq!(found.outcomes[0].push, symbols("a"));
        assert!(table.find(INITIAL_STATE, 'c', StackSymbol::Symbol('c')).is_none());
    }

    // Up to three rules over letters that mix terminals with nonterminal
    // names, some of which never get a rule of their own
    fn grammar_strategy() -> impl Strategy<Value = Grammar> {
        prop::collection::vec(prop::collection::vec("[abcSAB]{1,3}", 1..=3), 1..=3)
            .prop_map(|rules| Grammar {
                rules: zip(['S', 'A', 'B'], rules)
                    .map(|(nonterminal, alternatives)| Rule { nonterminal, alternatives })
                    .collect()
            })
    }

    proptest! {
        #[test]
        fn alphabets_are_disjoint(grammar in grammar_strategy()) {
            let table = compile(&grammar);
            let terminals: HashSet<_> = table.input_alphabet.iter().collect();
            prop_assert!(table.nonterminals.iter().all(|n| !terminals.contains(n)));
        }

        #[test]
        fn compilation_is_idempotent(grammar in grammar_strategy()) {
            let first = compile(&grammar);
            let second = compile(&grammar);
            let as_set = |t: &TransitionTable| t.transitions.iter().cloned().collect::<HashSet<_>>();
            prop_assert_eq!(as_set(&first), as_set(&second));
            prop_assert_eq!(first, second);
        }
    }
}
