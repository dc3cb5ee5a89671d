use std::fmt;

use crate::Symbol;

/// A production `lhs -> rhs`
///
/// An empty `rhs` is an ε-production.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub lhs: String,
    pub rhs: Vec<Symbol>,
}

impl Rule {
    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    pub fn rhs_string(&self) -> String {
        if self.rhs.is_empty() {
            return "ε".to_owned();
        }
        let symbols: Vec<String> = self.rhs.iter().map(|s| format!("{}", s)).collect();
        symbols.join(" ")
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} -> {}", self.lhs, self.rhs_string())
    }
}
