mod grammar;
pub use self::grammar::{AugmentedGrammar, Grammar};

mod rule;
pub use self::rule::Rule;

mod symbol;
pub use self::symbol::Symbol;

mod first;
pub use self::first::{FirstSet, FirstSets};

mod follow;
pub use self::follow::FollowSets;

mod item;
pub use self::item::{closure, goto, Item, ItemSet};

mod automaton;
pub use self::automaton::Automaton;

mod action;
pub use self::action::Action;

mod state;
pub use self::state::State;

mod conflict;
pub use self::conflict::{Conflict, ConflictKind};

mod parse_table;
pub use self::parse_table::ParseTable;

#[cfg(test)]
pub(crate) mod fixtures;
