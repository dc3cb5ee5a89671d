use std::collections::{BTreeSet, VecDeque};

use crate::{AugmentedGrammar, Symbol};

/// LR(0) item
///
/// `pos` is the dot position inside the right-hand side of production `rule_idx`, ranging from
/// `0` to `rhs.len()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub rule_idx: usize,
    pub pos: usize,
}

/// Type alias for LR(0) item sets
///
/// A `BTreeSet` keeps items in `(rule_idx, pos)` order and is hashable, so an item set can be
/// used directly as the identity of a state.
pub type ItemSet = BTreeSet<Item>;

impl Item {
    pub fn new(rule_idx: usize, pos: usize) -> Self {
        Self { rule_idx, pos }
    }

    pub fn next_symbol<'g>(&self, grammar: &'g AugmentedGrammar) -> Option<&'g Symbol> {
        grammar.rule(self.rule_idx).rhs.get(self.pos)
    }

    pub fn is_pos_at_end(&self, grammar: &AugmentedGrammar) -> bool {
        self.pos == grammar.rule(self.rule_idx).rhs.len()
    }

    /// The same item with the dot moved over one symbol
    pub fn advance(&self) -> Self {
        Self {
            rule_idx: self.rule_idx,
            pos: self.pos + 1,
        }
    }

    /// Render the item as `A -> x • y`
    pub fn augmented_rule_string(&self, grammar: &AugmentedGrammar) -> String {
        let rule = grammar.rule(self.rule_idx);
        let mut parts: Vec<String> = Vec::with_capacity(rule.rhs.len() + 1);
        for (p, symbol) in rule.rhs.iter().enumerate() {
            if p == self.pos {
                parts.push("•".to_owned());
            }
            parts.push(format!("{}", symbol));
        }
        if self.pos == rule.rhs.len() {
            parts.push("•".to_owned());
        }
        format!("{} -> {}", rule.lhs, parts.join(" "))
    }
}

/// Close an item set
///
/// Whenever the dot stands in front of a nonterminal `B`, every production of `B` is added with
/// the dot at position 0, until nothing new can be added.
pub fn closure(grammar: &AugmentedGrammar, item_set: ItemSet) -> ItemSet {
    let mut closure = item_set;
    let mut unclosed: VecDeque<Item> = closure.iter().cloned().collect();

    while let Some(item) = unclosed.pop_front() {
        if let Some(Symbol::Nonterminal(n)) = item.next_symbol(grammar) {
            for &rule_idx in grammar.rules_for(n) {
                let new_item = Item::new(rule_idx, 0);
                if closure.insert(new_item) {
                    unclosed.push_back(new_item);
                }
            }
        }
    }

    closure
}

/// Advance the dot over `symbol` in every item that expects it, then close the result
///
/// Returns an empty set if no item of `item_set` expects `symbol`.
pub fn goto(grammar: &AugmentedGrammar, item_set: &ItemSet, symbol: &Symbol) -> ItemSet {
    let kernel: ItemSet = item_set
        .iter()
        .filter(|item| item.next_symbol(grammar) == Some(symbol))
        .map(Item::advance)
        .collect();
    if kernel.is_empty() {
        return kernel;
    }
    closure(grammar, kernel)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::slr::fixtures;

    fn items(pairs: &[(usize, usize)]) -> ItemSet {
        pairs.iter().map(|&(r, p)| Item::new(r, p)).collect()
    }

    #[test]
    fn test_closure_of_start_item() {
        let grammar = AugmentedGrammar::new(fixtures::arithmetic());
        let closed = closure(&grammar, items(&[(0, 0)]));
        // S' -> • E $ plus every production of E, T and F
        assert_eq!(
            closed,
            items(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0), (6, 0)])
        );
    }

    #[test]
    fn test_closure_is_idempotent() {
        let grammar = AugmentedGrammar::new(fixtures::nested_lists());
        for seed in &[items(&[(0, 0)]), items(&[(1, 1)]), items(&[(4, 2), (1, 2)])] {
            let once = closure(&grammar, seed.clone());
            let twice = closure(&grammar, once.clone());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_goto() {
        let grammar = AugmentedGrammar::new(fixtures::nested_lists());
        let start = closure(&grammar, items(&[(0, 0)]));

        let open = goto(&grammar, &start, &Symbol::Terminal("(".to_owned()));
        // S -> ( • L ), then L -> • S, L -> • L , S, S -> • ( L ), S -> • x
        assert_eq!(open, items(&[(1, 0), (1, 1), (2, 0), (3, 0), (4, 0)]));
        assert_eq!(
            open,
            goto(&grammar, &start, &Symbol::Terminal("(".to_owned()))
        );

        assert!(goto(&grammar, &start, &Symbol::Terminal(")".to_owned())).is_empty());
    }

    #[test]
    fn test_goto_over_nonterminal() {
        let grammar = AugmentedGrammar::new(fixtures::nested_lists());
        let start = closure(&grammar, items(&[(0, 0)]));
        let after_s = goto(&grammar, &start, &Symbol::Nonterminal("S".to_owned()));
        assert_eq!(after_s, items(&[(0, 1)]));
    }

    #[test]
    fn test_augmented_rule_string() {
        let grammar = AugmentedGrammar::new(fixtures::arithmetic());
        assert_eq!(
            Item::new(1, 1).augmented_rule_string(&grammar),
            "E -> E • + T"
        );
        assert_eq!(Item::new(6, 1).augmented_rule_string(&grammar), "F -> id •");
        assert_eq!(Item::new(0, 0).augmented_rule_string(&grammar), "S' -> • E $");
    }
}
