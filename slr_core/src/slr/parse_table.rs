use log::{debug, trace, warn};

use crate::error::GenerationError;
use crate::{
    Action, AugmentedGrammar, Automaton, Conflict, ConflictKind, FirstSets, FollowSets, Grammar,
    State,
};

/// SLR(1) parse table together with every artifact it was derived from
///
/// States are numbered from 1, matching the numbering of the `automaton`.
#[derive(Debug)]
pub struct ParseTable {
    pub grammar: AugmentedGrammar,
    pub first_sets: FirstSets,
    pub follow_sets: FollowSets,
    pub automaton: Automaton,
    pub states: Vec<State>,
    pub conflicts: Vec<Conflict>,
}

impl ParseTable {
    /// Generate an SLR(1) parse table
    ///
    /// Validates the grammar, augments it, computes FIRST and FOLLOW sets, builds the LR(0)
    /// automaton and finally the table. An invalid grammar is rejected before any of the later
    /// phases run. Conflicts do not make generation fail, they are collected in `conflicts`.
    pub fn generate(grammar: Grammar) -> Result<Self, GenerationError> {
        let problems = grammar.validate();
        if !problems.is_empty() {
            return Err(GenerationError::InvalidGrammar(problems));
        }

        let grammar = AugmentedGrammar::new(grammar);
        let first_sets = FirstSets::compute(&grammar);
        let follow_sets = FollowSets::compute(&grammar, &first_sets);
        let automaton = Automaton::build(&grammar);

        Ok(Self::build(grammar, first_sets, follow_sets, automaton))
    }

    /// Derive the ACTION and GOTO tables from an automaton and the FOLLOW sets
    pub fn build(
        grammar: AugmentedGrammar,
        first_sets: FirstSets,
        follow_sets: FollowSets,
        automaton: Automaton,
    ) -> Self {
        let mut generator = ParseTableGenerator {
            grammar: &grammar,
            follow_sets: &follow_sets,
            automaton: &automaton,
            conflicts: Vec::new(),
        };

        let mut states = Vec::with_capacity(automaton.len());
        for (number, _) in automaton.states() {
            let mut state = State::default();
            generator.expand_nonterminals(&mut state, number);
            generator.advance_terminals(&mut state, number);
            generator.add_reduce_actions(&mut state, number);
            states.push(state);
        }
        let conflicts = generator.conflicts;

        debug!(
            "SLR(1) table has {} state(s) and {} conflict(s)",
            states.len(),
            conflicts.len()
        );

        Self {
            grammar,
            first_sets,
            follow_sets,
            automaton,
            states,
            conflicts,
        }
    }

    /// A grammar is SLR(1) iff its table has no conflicts
    pub fn is_slr1(&self) -> bool {
        self.conflicts.is_empty()
    }

    /// Row of state `number`
    ///
    /// Panics if there is no such state.
    pub fn state(&self, number: usize) -> &State {
        &self.states[number - 1]
    }

    pub fn action(&self, number: usize, terminal: &str) -> Option<Action> {
        self.states
            .get(number.wrapping_sub(1))
            .and_then(|state| state.action_map.get(terminal))
            .cloned()
    }

    pub fn goto(&self, number: usize, nonterminal: &str) -> Option<usize> {
        self.states
            .get(number.wrapping_sub(1))
            .and_then(|state| state.goto_map.get(nonterminal))
            .cloned()
    }
}

struct ParseTableGenerator<'t> {
    grammar: &'t AugmentedGrammar,
    follow_sets: &'t FollowSets,
    automaton: &'t Automaton,
    conflicts: Vec<Conflict>,
}

impl<'t> ParseTableGenerator<'t> {
    /// Fill the goto row of a state
    ///
    /// Transitions are functional, so goto entries never conflict.
    fn expand_nonterminals(&self, state: &mut State, number: usize) {
        for item in self.automaton.state(number) {
            let symbol = match item.next_symbol(self.grammar) {
                Some(symbol) if !symbol.is_terminal() => symbol,
                _ => continue,
            };
            if let Some(target) = self.automaton.transition(number, symbol) {
                state.goto_map.insert(symbol.name().to_owned(), target);
            }
        }
    }

    /// Create shift and accept actions for items with the dot in front of a terminal
    fn advance_terminals(&mut self, state: &mut State, number: usize) {
        let (grammar, automaton) = (self.grammar, self.automaton);
        for item in automaton.state(number) {
            let symbol = match item.next_symbol(grammar) {
                Some(symbol) if symbol.is_terminal() => symbol,
                _ => continue,
            };
            if let Some(target) = automaton.transition(number, symbol) {
                let t = symbol.name();
                let action = if item.rule_idx == 0 && t == grammar.end() {
                    // S' -> S • $
                    Action::Accept
                } else {
                    Action::Shift(target)
                };
                self.insert_action(state, number, t, action);
            }
        }
    }

    /// Create reduce actions for items with the dot at the end, on every FOLLOW terminal
    fn add_reduce_actions(&mut self, state: &mut State, number: usize) {
        let (grammar, automaton, follow_sets) = (self.grammar, self.automaton, self.follow_sets);
        for item in automaton.state(number) {
            if item.rule_idx == 0 || !item.is_pos_at_end(grammar) {
                continue;
            }
            let lhs = &grammar.rule(item.rule_idx).lhs;
            for t in follow_sets.follow(lhs) {
                self.insert_action(state, number, t, Action::Reduce(item.rule_idx));
            }
        }
    }

    /// Write an action unless the cell already holds a different one
    ///
    /// The first action written to a cell is kept. A different later action is recorded as a
    /// conflict and dropped.
    fn insert_action(&mut self, state: &mut State, number: usize, terminal: &str, action: Action) {
        match state.action_map.get(terminal).cloned() {
            None => {
                trace!("ACTION[{}, {}] = {}", number, terminal, action);
                state.action_map.insert(terminal.to_owned(), action);
            }
            Some(existing) if existing == action => {}
            Some(existing) => {
                let conflict = Conflict {
                    state: number,
                    symbol: terminal.to_owned(),
                    kind: ConflictKind::between(&existing, &action),
                    existing,
                    attempted: action,
                };
                warn!("{}", conflict);
                self.conflicts.push(conflict);
            }
        }
    }
}
