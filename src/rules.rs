//! Deterministic, context-free production rules: at most one successor per symbol.

use crate::error::{LSystemError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Returns `true` if `symbol` may appear as a rule predecessor.
pub fn is_legal_symbol(symbol: char) -> bool {
    !symbol.is_whitespace() && !symbol.is_control()
}

/// A table mapping each predecessor symbol to its successor sequence.
///
/// Symbols without a rule are terminals and rewrite to themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: BTreeMap<char, String>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the rule `predecessor -> successor`, replacing any existing successor.
    pub fn add_rule(&mut self, predecessor: char, successor: impl Into<String>) -> Result<()> {
        if !is_legal_symbol(predecessor) {
            return Err(LSystemError::InvalidSymbol(predecessor));
        }
        self.rules.insert(predecessor, successor.into());
        Ok(())
    }

    /// Removes the rule for `predecessor`, returning its successor.
    pub fn remove_rule(&mut self, predecessor: char) -> Result<String> {
        self.rules
            .remove(&predecessor)
            .ok_or(LSystemError::NotFound(predecessor))
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear();
    }

    /// Returns the successor of `predecessor`, or the symbol itself if it is a terminal.
    pub fn get_rule(&self, predecessor: char) -> Cow<'_, str> {
        match self.rules.get(&predecessor) {
            Some(successor) => Cow::Borrowed(successor.as_str()),
            None => Cow::Owned(predecessor.to_string()),
        }
    }

    /// Like [`get_rule`](Self::get_rule) but `None` for terminals.
    pub fn successor(&self, predecessor: char) -> Option<&str> {
        self.rules.get(&predecessor).map(String::as_str)
    }

    pub fn has_rule(&self, predecessor: char) -> bool {
        self.rules.contains_key(&predecessor)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates over `(predecessor, successor)` pairs in predecessor order.
    pub fn iter(&self) -> impl Iterator<Item = (char, &str)> {
        self.rules.iter().map(|(&p, s)| (p, s.as_str()))
    }
}

impl<S: Into<String>> TryFrom<Vec<(char, S)>> for RuleTable {
    type Error = LSystemError;

    /// Builds a table from pairs; later pairs replace earlier ones with the same predecessor.
    fn try_from(pairs: Vec<(char, S)>) -> Result<Self> {
        let mut table = RuleTable::new();
        for (predecessor, successor) in pairs {
            table.add_rule(predecessor, successor)?;
        }
        Ok(table)
    }
}
