use std::collections::{HashMap, HashSet};
use std::fmt;

use log::debug;

use crate::error::{GenerationError, GrammarProblem};
use crate::{Rule, Symbol};

/// Context-free grammar with indexed productions
///
/// Symbol kinds are resolved once, in `Grammar::new`: a right-hand side name that is declared as a
/// nonterminal becomes `Symbol::Nonterminal`, every other name becomes `Symbol::Terminal`.
/// Undeclared terminals are caught later by `validate`.
#[derive(Debug, Clone)]
pub struct Grammar {
    start: String,
    end: String,
    terminals: Vec<String>,
    nonterminals: Vec<String>,
    rules: Vec<Rule>,
    rules_by_lhs: HashMap<String, Vec<usize>>,
}

impl Grammar {
    /// Build a grammar from declared symbols and `(lhs, rhs)` productions
    ///
    /// Production indices follow declaration order. Construction never fails, call `validate`
    /// (or use `Grammar::validated`) to find out whether the grammar is well-formed.
    pub fn new(
        terminals: Vec<String>,
        nonterminals: Vec<String>,
        start: String,
        end: String,
        productions: Vec<(String, Vec<String>)>,
    ) -> Self {
        let terminals = dedup(terminals);
        let nonterminals = dedup(nonterminals);

        let rules = {
            let declared: HashSet<&str> = nonterminals.iter().map(String::as_str).collect();
            productions
                .into_iter()
                .map(|(lhs, rhs)| Rule {
                    lhs,
                    rhs: rhs
                        .into_iter()
                        .map(|name| {
                            if declared.contains(name.as_str()) {
                                Symbol::Nonterminal(name)
                            } else {
                                Symbol::Terminal(name)
                            }
                        })
                        .collect(),
                })
                .collect()
        };

        Self::from_parts(terminals, nonterminals, start, end, rules)
    }

    /// Build and validate in one step
    pub fn validated(
        terminals: Vec<String>,
        nonterminals: Vec<String>,
        start: String,
        end: String,
        productions: Vec<(String, Vec<String>)>,
    ) -> Result<Self, GenerationError> {
        let grammar = Self::new(terminals, nonterminals, start, end, productions);
        let problems = grammar.validate();
        if problems.is_empty() {
            Ok(grammar)
        } else {
            Err(GenerationError::InvalidGrammar(problems))
        }
    }

    fn from_parts(
        terminals: Vec<String>,
        nonterminals: Vec<String>,
        start: String,
        end: String,
        rules: Vec<Rule>,
    ) -> Self {
        let mut rules_by_lhs: HashMap<String, Vec<usize>> = HashMap::new();
        for (rule_idx, rule) in rules.iter().enumerate() {
            rules_by_lhs
                .entry(rule.lhs.clone())
                .or_default()
                .push(rule_idx);
        }
        Self {
            start,
            end,
            terminals,
            nonterminals,
            rules,
            rules_by_lhs,
        }
    }

    /// Check the grammar for well-formedness
    ///
    /// Returns every problem found. An empty list means the grammar can be fed to the rest of
    /// the pipeline.
    pub fn validate(&self) -> Vec<GrammarProblem> {
        let mut problems = Vec::new();

        if self.rules_for(&self.start).is_empty() {
            problems.push(GrammarProblem::MissingStartRule {
                start: self.start.clone(),
            });
        }

        for rule in &self.rules {
            if !self.is_nonterminal(&rule.lhs) {
                problems.push(GrammarProblem::UndeclaredLhs { rule: rule.clone() });
            }
            for symbol in &rule.rhs {
                if let Symbol::Terminal(t) = symbol {
                    if !self.is_terminal(t) {
                        problems.push(GrammarProblem::UndeclaredSymbol {
                            symbol: t.clone(),
                            rule: rule.clone(),
                        });
                    }
                }
            }
        }

        let overlapping: Vec<String> = self
            .terminals
            .iter()
            .filter(|t| self.is_nonterminal(t))
            .cloned()
            .collect();
        if !overlapping.is_empty() {
            problems.push(GrammarProblem::OverlappingSymbols(overlapping));
        }

        if self.is_nonterminal(&self.end) {
            problems.push(GrammarProblem::EndMarkerIsNonterminal {
                end: self.end.clone(),
            });
        }

        debug!("grammar validation found {} problem(s)", problems.len());
        problems
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// Terminals in declaration order
    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    /// Nonterminals in declaration order
    pub fn nonterminals(&self) -> &[String] {
        &self.nonterminals
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, rule_idx: usize) -> &Rule {
        &self.rules[rule_idx]
    }

    /// Indices of all productions with `lhs` as left-hand side, in declaration order
    pub fn rules_for(&self, lhs: &str) -> &[usize] {
        self.rules_by_lhs
            .get(lhs)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.iter().any(|t| t == name)
    }

    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.nonterminals.iter().any(|n| n == name)
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        writeln!(f, "Terminals: {}", self.terminals.join(", "))?;
        writeln!(f, "Nonterminals: {}", self.nonterminals.join(", "))?;
        writeln!(f, "Start symbol: {}", self.start)?;
        writeln!(f, "End marker: {}", self.end)?;
        writeln!(f, "Productions:")?;
        for (rule_idx, rule) in self.rules.iter().enumerate() {
            writeln!(f, "  {}: {}", rule_idx, rule)?;
        }
        Ok(())
    }
}

/// Grammar extended with the synthetic start production `S' -> S $` at index 0
///
/// All productions of the wrapped grammar are shifted by one index.
#[derive(Debug, Clone)]
pub struct AugmentedGrammar {
    grammar: Grammar,
    original_start: String,
}

impl AugmentedGrammar {
    pub fn new(grammar: Grammar) -> Self {
        let mut start = "S'".to_owned();
        while grammar.is_nonterminal(&start)
            || grammar.is_terminal(&start)
            || start == grammar.end
        {
            start.push('\'');
        }

        let Grammar {
            start: original_start,
            end,
            mut terminals,
            nonterminals,
            rules,
            ..
        } = grammar;

        if !terminals.contains(&end) {
            terminals.push(end.clone());
        }

        let mut augmented_nonterminals = Vec::with_capacity(nonterminals.len() + 1);
        augmented_nonterminals.push(start.clone());
        augmented_nonterminals.extend(nonterminals);

        let mut augmented_rules = Vec::with_capacity(rules.len() + 1);
        augmented_rules.push(Rule {
            lhs: start.clone(),
            rhs: vec![
                Symbol::Nonterminal(original_start.clone()),
                Symbol::Terminal(end.clone()),
            ],
        });
        augmented_rules.extend(rules);

        debug!(
            "augmented grammar with {} -> {} {}",
            start, original_start, end
        );

        Self {
            grammar: Grammar::from_parts(
                terminals,
                augmented_nonterminals,
                start,
                end,
                augmented_rules,
            ),
            original_start,
        }
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Start symbol of the grammar before augmentation
    pub fn original_start(&self) -> &str {
        &self.original_start
    }

    /// The synthetic start symbol
    pub fn start(&self) -> &str {
        self.grammar.start()
    }

    pub fn end(&self) -> &str {
        self.grammar.end()
    }

    pub fn rules(&self) -> &[Rule] {
        self.grammar.rules()
    }

    pub fn rule(&self, rule_idx: usize) -> &Rule {
        self.grammar.rule(rule_idx)
    }

    pub fn rules_for(&self, lhs: &str) -> &[usize] {
        self.grammar.rules_for(lhs)
    }
}

fn dedup(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
