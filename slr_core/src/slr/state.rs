use std::collections::BTreeMap;

use crate::Action;

/// One row of the SLR(1) table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub action_map: BTreeMap<String, Action>,
    pub goto_map: BTreeMap<String, usize>,
}
