use std::fmt;

use crate::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    ShiftReduce,
    ReduceReduce,
}

impl ConflictKind {
    /// Classify two competing actions for the same table cell
    pub fn between(existing: &Action, attempted: &Action) -> Self {
        if existing.is_reduce() && attempted.is_reduce() {
            ConflictKind::ReduceReduce
        } else {
            ConflictKind::ShiftReduce
        }
    }
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            ConflictKind::ShiftReduce => write!(f, "shift/reduce"),
            ConflictKind::ReduceReduce => write!(f, "reduce/reduce"),
        }
    }
}

/// Two actions demanded for the same `(state, symbol)` cell
///
/// `existing` is the action that was written first and stays in the table, `attempted` is the
/// action that was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub state: usize,
    pub symbol: String,
    pub kind: ConflictKind,
    pub existing: Action,
    pub attempted: Action,
}

impl Conflict {
    /// Indices of the productions referenced by reduce actions of this conflict
    pub fn rules(&self) -> Vec<usize> {
        [self.existing, self.attempted]
            .iter()
            .filter_map(|action| match action {
                Action::Reduce(rule_idx) => Some(*rule_idx),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "{} conflict in state {} on '{}': {} vs {}",
            self.kind, self.state, self.symbol, self.existing, self.attempted
        )
    }
}
