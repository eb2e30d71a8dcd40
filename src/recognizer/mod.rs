/*
    This module decides whether a string is derivable by running the
    compiled automaton with a depth-first, backtracking search
*/

use std::fmt::Display;

use itertools::Itertools;

use crate::automaton::*;

// A snapshot of the automaton. `input` borrows the tail of the string being
// checked, `stack` is stored bottom first
#[derive(Debug, PartialEq, Clone)]
pub struct Configuration<'i> {
    pub state: State,
    pub input: &'i str,
    pub stack: Vec<StackSymbol>,
}

impl<'i> Configuration<'i> {
    fn seed(input: &'i str, start: StackSymbol) -> Self {
        Configuration {
            state: INITIAL_STATE,
            input,
            stack: vec![start],
        }
    }

    pub fn top(&self) -> Option<StackSymbol> {
        self.stack.last().copied()
    }

    // The configuration reached by taking `outcome` of a transition guarded
    // by `guard`: pop the top, push the outcome, drop one input symbol if the
    // guard consumed one
    fn successor(&self, guard: InputGuard, outcome: &Outcome) -> Self {
        let mut input = self.input.chars();
        if guard.consumes() {
            input.next();
        }

        let mut stack = self.stack.clone();
        stack.pop();
        stack.extend(outcome.push.iter().copied());

        Configuration {
            state: outcome.state,
            input: input.as_str(),
            stack,
        }
    }

    pub fn is_accepting(&self) -> bool {
        self.input.is_empty() && self.stack.is_empty()
    }

    // Every stack symbol needs at least one input symbol to get rid of it,
    // so a stack taller than the remaining input can never empty in time
    fn outgrows_input(&self) -> bool {
        self.input.chars().count() < self.stack.len()
    }
}

impl Display for Configuration<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let input = if self.input.is_empty() { "lambda" } else { self.input };
        write!(f, "({}, {}, h0{})", self.state, input, self.stack.iter().join(""))
    }
}

// The path the search is currently on. Once a string is accepted this is the
// derivation, from the seed to the accepting configuration
#[derive(Debug, PartialEq, Clone, Default)]
pub struct ConfigurationChain<'i> {
    configurations: Vec<Configuration<'i>>,
}

impl<'i> ConfigurationChain<'i> {
    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Configuration<'i>> {
        self.configurations.iter()
    }

    pub fn last(&self) -> Option<&Configuration<'i>> {
        self.configurations.last()
    }

    fn push(&mut self, configuration: Configuration<'i>) {
        self.configurations.push(configuration);
    }

    fn pop(&mut self) {
        self.configurations.pop();
    }

    fn clear(&mut self) {
        self.configurations.clear();
    }
}

impl Display for ConfigurationChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for configuration in &self.configurations {
            write!(f, "{} ⊢ ", configuration)?;
        }
        write!(f, "({}, lambda, lambda)", INITIAL_STATE)
    }
}

#[derive(Debug, PartialEq)]
pub enum Verdict<'i> {
    Accepted(ConfigurationChain<'i>),
    Rejected,
}

impl<'i> Verdict<'i> {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }

    pub fn trace(&self) -> Option<&ConfigurationChain<'i>> {
        match self {
            Verdict::Accepted(chain) => Some(chain),
            Verdict::Rejected => None,
        }
    }
}

// How much work one check took
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct SearchStats {
    // Candidates pushed onto the chain, pruned ones included
    pub configurations: usize,
    pub pruned: usize,
    pub backtracks: usize,
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} configurations, {} pruned, {} backtracks", self.configurations, self.pruned, self.backtracks)
    }
}

// Runs checks against a compiled table. The table is only ever read, so one
// recognizer can check any number of strings
#[derive(Debug, Clone, Copy)]
pub struct Recognizer<'t> {
    table: &'t TransitionTable,
    start: StackSymbol,
    pruning: bool,
}

impl<'t> Recognizer<'t> {
    pub fn new(table: &'t TransitionTable) -> Self {
        Recognizer {
            table,
            start: table.start,
            pruning: true,
        }
    }

    // Seed the stack with something other than the first rule's nonterminal
    pub fn with_start(self, start: StackSymbol) -> Self {
        Recognizer { start, ..self }
    }

    // Search without discarding configurations whose stack outgrows the
    // input. Only terminates for grammars without left recursion
    pub fn without_pruning(self) -> Self {
        Recognizer { pruning: false, ..self }
    }

    pub fn accept<'i>(&self, input: &'i str) -> Verdict<'i> {
        self.search(input).0
    }

    pub fn search<'i>(&self, input: &'i str) -> (Verdict<'i>, SearchStats) {
        let mut search = Search {
            table: self.table,
            pruning: self.pruning,
            chain: ConfigurationChain::default(),
            stats: SearchStats::default(),
        };
        search.chain.push(Configuration::seed(input, self.start));

        let verdict = if search.extend() {
            Verdict::Accepted(search.chain)
        } else {
            search.chain.clear();
            Verdict::Rejected
        };
        (verdict, search.stats)
    }
}

// The state of a single check. The chain is owned here and nowhere else
struct Search<'t, 'i> {
    table: &'t TransitionTable,
    pruning: bool,
    chain: ConfigurationChain<'i>,
    stats: SearchStats,
}

impl<'t, 'i> Search<'t, 'i> {
    // Tries to extend the chain from its last configuration to an accepting
    // one. On failure the chain is left exactly as it was found
    fn extend(&mut self) -> bool {
        let table = self.table;

        let Some(current) = self.chain.last() else {
            return false;
        };
        // Nothing moves once either the input or the stack has run out
        let (Some(next), Some(top)) = (current.input.chars().next(), current.top()) else {
            return false;
        };
        let Some(transition) = table.find(current.state, next, top) else {
            return false;
        };

        let candidates = transition.outcomes.iter()
            .map(|outcome| current.successor(transition.key.input, outcome))
            .collect_vec();

        for candidate in candidates {
            let accepting = candidate.is_accepting();
            let hopeless = candidate.outgrows_input();

            self.chain.push(candidate);
            self.stats.configurations += 1;

            if self.pruning && hopeless {
                self.chain.pop();
                self.stats.pruned += 1;
                continue;
            }

            if accepting || self.extend() {
                return true;
            }

            self.chain.pop();
            self.stats.backtracks += 1;
        }

        false
    }
}
