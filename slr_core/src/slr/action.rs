use std::fmt;

/// Entry of the ACTION table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Consume the lookahead and move to the given state
    Shift(usize),
    /// Reduce by the production with the given index
    Reduce(usize),
    Accept,
}

impl Action {
    pub fn is_reduce(&self) -> bool {
        match self {
            Action::Reduce(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Action::Shift(state) => write!(f, "s{}", state),
            Action::Reduce(rule_idx) => write!(f, "r{}", rule_idx),
            Action::Accept => write!(f, "acc"),
        }
    }
}
