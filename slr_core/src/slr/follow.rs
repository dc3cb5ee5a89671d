use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use crate::{AugmentedGrammar, FirstSets, Symbol};

/// FOLLOW sets of every nonterminal of an augmented grammar
///
/// Taking the finished `FirstSets` as an argument means FOLLOW can only be computed once FIRST
/// has reached its fixed point.
#[derive(Debug, Clone)]
pub struct FollowSets {
    sets: BTreeMap<String, BTreeSet<String>>,
    passes: usize,
}

impl FollowSets {
    pub fn compute(grammar: &AugmentedGrammar, first_sets: &FirstSets) -> Self {
        let mut sets: BTreeMap<String, BTreeSet<String>> = grammar
            .grammar()
            .nonterminals()
            .iter()
            .map(|n| (n.clone(), BTreeSet::new()))
            .collect();
        sets.entry(grammar.start().to_owned())
            .or_default()
            .insert(grammar.end().to_owned());

        let mut passes = 0;
        let mut changed = true;
        while changed {
            changed = false;
            passes += 1;
            for rule in grammar.rules() {
                // Terminals that may follow the current position, swept right to left
                let mut trailer = sets.get(&rule.lhs).cloned().unwrap_or_default();
                for symbol in rule.rhs.iter().rev() {
                    match symbol {
                        Symbol::Nonterminal(n) => {
                            let follow = sets.entry(n.clone()).or_default();
                            let before = follow.len();
                            follow.extend(trailer.iter().cloned());
                            if follow.len() != before {
                                changed = true;
                            }

                            let first = first_sets.first(symbol);
                            if first.epsilon {
                                trailer.extend(first.terminals.iter().cloned());
                            } else {
                                trailer = first.terminals.clone();
                            }
                        }
                        Symbol::Terminal(t) => {
                            trailer = BTreeSet::new();
                            trailer.insert(t.clone());
                        }
                    }
                }
            }
        }

        debug!("FOLLOW sets converged after {} pass(es)", passes);
        Self { sets, passes }
    }

    /// FOLLOW set of a nonterminal
    ///
    /// Panics if `nonterminal` is not part of the grammar.
    pub fn follow(&self, nonterminal: &str) -> &BTreeSet<String> {
        &self.sets[nonterminal]
    }

    pub fn get(&self, nonterminal: &str) -> Option<&BTreeSet<String>> {
        self.sets.get(nonterminal)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.sets.iter()
    }

    pub fn passes(&self) -> usize {
        self.passes
    }
}
