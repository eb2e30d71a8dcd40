/*
    This module is for storing grammars once they have been read
*/

// The raw characters of a single alternative, e.g. "aS"
pub type Alternative = String;

// One line of the grammar: a nonterminal and its alternatives, in the order
// they were written
#[derive(Debug, PartialEq, Clone)]
pub struct Rule {
    pub nonterminal: char,
    pub alternatives: Vec<Alternative>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Grammar {
    pub rules: Vec<Rule>,
}

impl Grammar {
    // The nonterminal of the first rule
    pub fn start_symbol(&self) -> Option<char> {
        self.rules.first().map(|rule| rule.nonterminal)
    }

    pub fn nonterminals(&self) -> impl Iterator<Item = char> + '_ {
        self.rules.iter().map(|rule| rule.nonterminal)
    }
}
