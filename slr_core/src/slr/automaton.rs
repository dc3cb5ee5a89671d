use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use log::{debug, trace};

use crate::slr::item::{closure, goto};
use crate::{AugmentedGrammar, Item, ItemSet, Symbol};

/// Canonical collection of LR(0) item sets
///
/// States are numbered from 1 in order of discovery. State 1 is the closure of the augmented
/// start item `S' -> • S $`.
#[derive(Debug, Clone)]
pub struct Automaton {
    states: Vec<ItemSet>,
    transitions: Vec<BTreeMap<Symbol, usize>>,
}

impl Automaton {
    /// Build the canonical collection and its transition function
    ///
    /// Successor symbols of a state are visited in `Symbol` order (terminals first, then
    /// nonterminals, each sorted by name), so numbering is identical across runs.
    pub fn build(grammar: &AugmentedGrammar) -> Self {
        let initial = closure(grammar, std::iter::once(Item::new(0, 0)).collect());

        let mut states = vec![initial.clone()];
        let mut transitions = vec![BTreeMap::new()];
        let mut numbers: HashMap<ItemSet, usize> = HashMap::new();
        numbers.insert(initial, 1);

        let mut next_states = VecDeque::<usize>::new();
        next_states.push_back(1);

        while let Some(current_state) = next_states.pop_front() {
            let item_set = states[current_state - 1].clone();

            let symbols: BTreeSet<&Symbol> = item_set
                .iter()
                .filter_map(|item| item.next_symbol(grammar))
                .collect();

            for symbol in symbols {
                let next_state = goto(grammar, &item_set, symbol);
                if next_state.is_empty() {
                    continue;
                }

                // Reuse an existing state with the same item set if there is one
                let idx = match numbers.get(&next_state) {
                    Some(&state_idx) => state_idx,
                    None => {
                        states.push(next_state.clone());
                        transitions.push(BTreeMap::new());
                        let idx = states.len();
                        numbers.insert(next_state, idx);
                        next_states.push_back(idx);
                        trace!("discovered state {} via {} from {}", idx, symbol, current_state);
                        idx
                    }
                };

                transitions[current_state - 1].insert(symbol.clone(), idx);
            }
        }

        debug!("LR(0) automaton has {} state(s)", states.len());
        Self {
            states,
            transitions,
        }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Item set of state `number`
    ///
    /// Panics if there is no such state.
    pub fn state(&self, number: usize) -> &ItemSet {
        &self.states[number - 1]
    }

    /// All states with their numbers, in numbering order
    pub fn states(&self) -> impl Iterator<Item = (usize, &ItemSet)> {
        self.states
            .iter()
            .enumerate()
            .map(|(idx, item_set)| (idx + 1, item_set))
    }

    pub fn transition(&self, number: usize, symbol: &Symbol) -> Option<usize> {
        self.transitions
            .get(number.wrapping_sub(1))
            .and_then(|row| row.get(symbol))
            .cloned()
    }

    /// Outgoing transitions of state `number`, ordered by symbol
    pub fn transitions(&self, number: usize) -> &BTreeMap<Symbol, usize> {
        &self.transitions[number - 1]
    }
}
