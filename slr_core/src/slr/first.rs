use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::debug;

use crate::{AugmentedGrammar, Symbol};

/// FIRST set of a symbol or symbol sequence
///
/// `epsilon` is the marker for "may derive the empty string". It lives apart from the terminal
/// set so that it can never be confused with a terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirstSet {
    pub terminals: BTreeSet<String>,
    pub epsilon: bool,
}

impl FirstSet {
    fn terminal(t: &str) -> Self {
        let mut terminals = BTreeSet::new();
        terminals.insert(t.to_owned());
        Self {
            terminals,
            epsilon: false,
        }
    }

    /// Merge `other` into `self`, returning whether anything was added
    fn absorb(&mut self, other: &FirstSet) -> bool {
        let before = self.terminals.len();
        self.terminals.extend(other.terminals.iter().cloned());
        let gained_epsilon = other.epsilon && !self.epsilon;
        self.epsilon |= other.epsilon;
        gained_epsilon || self.terminals.len() != before
    }
}

impl fmt::Display for FirstSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let mut members: Vec<&str> = self.terminals.iter().map(String::as_str).collect();
        if self.epsilon {
            members.push("ε");
        }
        write!(f, "{{{}}}", members.join(", "))
    }
}

/// FIRST sets of every terminal and nonterminal of an augmented grammar
#[derive(Debug, Clone)]
pub struct FirstSets {
    sets: BTreeMap<Symbol, FirstSet>,
    passes: usize,
}

impl FirstSets {
    /// Compute the FIRST sets by fixed-point iteration
    ///
    /// Every set only ever grows inside the finite universe of terminals plus the epsilon marker,
    /// so the loop stops after at most `|terminals| + 1` passes per nonterminal.
    pub fn compute(grammar: &AugmentedGrammar) -> Self {
        let grammar = grammar.grammar();
        let mut sets = BTreeMap::new();
        for t in grammar.terminals() {
            sets.insert(Symbol::Terminal(t.clone()), FirstSet::terminal(t));
        }
        for n in grammar.nonterminals() {
            sets.insert(Symbol::Nonterminal(n.clone()), FirstSet::default());
        }

        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            for rule in grammar.rules() {
                let addition = sequence_first(&sets, &rule.rhs);
                let entry = sets
                    .entry(Symbol::Nonterminal(rule.lhs.clone()))
                    .or_default();
                if entry.absorb(&addition) {
                    changed = true;
                }
            }
        }

        debug!("FIRST sets converged after {} pass(es)", passes);
        Self { sets, passes }
    }

    /// FIRST set of a single symbol
    ///
    /// Panics if the symbol does not belong to the grammar the sets were computed for.
    pub fn first(&self, symbol: &Symbol) -> &FirstSet {
        &self.sets[symbol]
    }

    pub fn get(&self, symbol: &Symbol) -> Option<&FirstSet> {
        self.sets.get(symbol)
    }

    /// FIRST set of a symbol sequence; the empty sequence yields `{ε}`
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> FirstSet {
        sequence_first(&self.sets, symbols)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &FirstSet)> {
        self.sets.iter()
    }

    /// Number of full passes the fixed-point loop needed
    pub fn passes(&self) -> usize {
        self.passes
    }
}

fn sequence_first(sets: &BTreeMap<Symbol, FirstSet>, symbols: &[Symbol]) -> FirstSet {
    let mut result = FirstSet::default();
    for symbol in symbols {
        match sets.get(symbol) {
            Some(first) => {
                result.terminals.extend(first.terminals.iter().cloned());
                if !first.epsilon {
                    return result;
                }
            }
            None => {
                if let Symbol::Terminal(t) = symbol {
                    result.terminals.insert(t.clone());
                }
                return result;
            }
        }
    }
    result.epsilon = true;
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::slr::fixtures;

    fn terminals(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    fn nonterminal(name: &str) -> Symbol {
        Symbol::Nonterminal(name.to_owned())
    }

    #[test]
    fn test_terminals_are_their_own_first_set() {
        let grammar = AugmentedGrammar::new(fixtures::arithmetic());
        let first_sets = FirstSets::compute(&grammar);
        for t in grammar.grammar().terminals() {
            let first = first_sets.first(&Symbol::Terminal(t.clone()));
            assert_eq!(first.terminals, terminals(&[t.as_str()]));
            assert!(!first.epsilon);
        }
    }

    #[test]
    fn test_arithmetic_first_sets() {
        let grammar = AugmentedGrammar::new(fixtures::arithmetic());
        let first_sets = FirstSets::compute(&grammar);
        for n in &["S'", "E", "T", "F"] {
            let first = first_sets.first(&nonterminal(n));
            assert_eq!(first.terminals, terminals(&["(", "id"]));
            assert!(!first.epsilon);
        }
    }

    #[test]
    fn test_nullable_nonterminals() {
        let grammar = AugmentedGrammar::new(fixtures::optional_suffixes());
        let first_sets = FirstSets::compute(&grammar);

        let a = first_sets.first(&nonterminal("A"));
        assert_eq!(a.terminals, terminals(&["a"]));
        assert!(a.epsilon);

        let s = first_sets.first(&nonterminal("S"));
        assert_eq!(s.terminals, terminals(&["a", "b", "c"]));
        assert!(!s.epsilon);

        assert_eq!(format!("{}", a), "{a, ε}");
    }

    #[test]
    fn test_first_sets_only_hold_terminals() {
        let grammar = AugmentedGrammar::new(fixtures::optional_suffixes());
        let first_sets = FirstSets::compute(&grammar);
        for (_, first) in first_sets.iter() {
            for t in &first.terminals {
                assert!(grammar.grammar().is_terminal(t));
            }
        }
    }

    #[test]
    fn test_first_of_sequence() {
        let grammar = AugmentedGrammar::new(fixtures::optional_suffixes());
        let first_sets = FirstSets::compute(&grammar);

        let empty = first_sets.first_of_sequence(&[]);
        assert!(empty.terminals.is_empty());
        assert!(empty.epsilon);

        let ab = first_sets.first_of_sequence(&[nonterminal("A"), nonterminal("B")]);
        assert_eq!(ab.terminals, terminals(&["a", "b"]));
        assert!(ab.epsilon);
    }
}
