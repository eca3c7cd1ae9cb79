//! The production engine: expands an axiom through a [`RuleTable`] and caches every
//! intermediate iteration together with its per-symbol generation counts.
//!
//! ```text
//! axiom: "F"   rules: F -> "F+G", G -> "F-G"   markers: {F, G}
//!
//! iteration 0:  F                 counts [0]
//! iteration 1:  F+G               counts [1,1,1]
//! iteration 2:  F+G+F-G           counts [2,2,2,1,2,2,2]
//! ```
//!
//! A symbol's generation count is its parent's count, plus one if the parent is a
//! marker. The new count is shared by the whole successor run that replaced the parent.

use crate::error::{LSystemError, Result};
use crate::rules::RuleTable;
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One cached iteration of an [`LSystem`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Generation {
    /// The produced symbol sequence.
    pub sequence: String,
    /// Generation count of each symbol of `sequence`, indexed by `char` position.
    pub counts: Vec<u32>,
    /// The largest value in `counts` (0 if empty).
    pub max_count: u32,
}

impl Generation {
    fn from_axiom(axiom: &str) -> Self {
        Self {
            sequence: axiom.to_owned(),
            counts: vec![0; axiom.chars().count()],
            max_count: 0,
        }
    }

    /// Number of symbols in the sequence.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Serializable configuration of an [`LSystem`]: everything needed to restore it verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LSystemSnapshot {
    pub axiom: String,
    pub rules: RuleTable,
    pub markers: BTreeSet<char>,
}

/// A deterministic, context-free L-System with a per-iteration cache.
///
/// The cache always holds the contiguous range of iterations `0..=cached_iterations()`.
/// Every successful mutation drops all iterations above 0 (and replaces iteration 0
/// when the axiom changes) and bumps [`revision`](Self::revision), which downstream
/// consumers compare to decide whether their derived geometry is stale.
#[derive(Clone, Debug)]
pub struct LSystem {
    axiom: String,
    rules: RuleTable,
    markers: BTreeSet<char>,
    cache: Vec<Generation>,
    revision: u64,
}

impl Default for LSystem {
    fn default() -> Self {
        Self::new("", RuleTable::new(), [])
    }
}

impl LSystem {
    /// Creates an L-System from an axiom, a rule table and the marker symbols.
    pub fn new(
        axiom: impl Into<String>,
        rules: RuleTable,
        markers: impl IntoIterator<Item = char>,
    ) -> Self {
        let axiom = axiom.into();
        let cache = vec![Generation::from_axiom(&axiom)];
        Self {
            axiom,
            rules,
            markers: markers.into_iter().collect(),
            cache,
            revision: 0,
        }
    }

    pub fn axiom(&self) -> &str {
        &self.axiom
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Symbols whose derivation increments the generation count of their successors.
    pub fn markers(&self) -> &BTreeSet<char> {
        &self.markers
    }

    /// Monotonic counter bumped by every successful mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Highest iteration currently held in the cache.
    pub fn cached_iterations(&self) -> usize {
        self.cache.len() - 1
    }

    /// Replaces the axiom and resets the whole cache.
    pub fn set_axiom(&mut self, axiom: impl Into<String>) {
        self.axiom = axiom.into();
        self.cache.clear();
        self.cache.push(Generation::from_axiom(&self.axiom));
        self.revision += 1;
    }

    /// Adds or replaces the rule `predecessor -> successor`.
    pub fn add_rule(&mut self, predecessor: char, successor: impl Into<String>) -> Result<()> {
        self.rules.add_rule(predecessor, successor)?;
        self.invalidate();
        Ok(())
    }

    /// Removes the rule for `predecessor`, returning its former successor.
    pub fn remove_rule(&mut self, predecessor: char) -> Result<String> {
        let successor = self.rules.remove_rule(predecessor)?;
        self.invalidate();
        Ok(successor)
    }

    pub fn clear_rules(&mut self) {
        self.rules.clear_rules();
        self.invalidate();
    }

    /// Replaces the whole rule table.
    pub fn set_rules(&mut self, rules: RuleTable) {
        self.rules = rules;
        self.invalidate();
    }

    pub fn set_markers(&mut self, markers: impl IntoIterator<Item = char>) {
        self.markers = markers.into_iter().collect();
        self.invalidate();
    }

    /// Returns the successor of `predecessor`, or the symbol itself for terminals.
    pub fn get_rule(&self, predecessor: char) -> std::borrow::Cow<'_, str> {
        self.rules.get_rule(predecessor)
    }

    /// Captures the configuration for an external persistence layer.
    pub fn snapshot(&self) -> LSystemSnapshot {
        LSystemSnapshot {
            axiom: self.axiom.clone(),
            rules: self.rules.clone(),
            markers: self.markers.clone(),
        }
    }

    fn invalidate(&mut self) {
        self.cache.truncate(1);
        self.revision += 1;
    }

    /// Returns iteration `n`, computing and caching every missing iteration up to it.
    ///
    /// The result is a pure function of the axiom, rules, markers and `n`. Growth is
    /// multiplicative per iteration and nothing here limits `n`; callers must bound it.
    ///
    /// # Errors
    ///
    /// [`LSystemError::ResourceExhaustion`] if the next iteration's size overflows or
    /// cannot be allocated. Iterations cached before the failure are kept.
    pub fn produce(&mut self, n: usize) -> Result<&Generation> {
        if n < self.cache.len() {
            debug!("produce({n}): cache hit");
            return Ok(&self.cache[n]);
        }

        debug!(
            "produce({n}): extending cache from iteration {}",
            self.cached_iterations()
        );
        for iteration in self.cache.len()..=n {
            let next = self.derive(&self.cache[iteration - 1], iteration)?;
            trace!(
                "iteration {iteration}: {} symbols, max generation {}",
                next.len(),
                next.max_count
            );
            self.cache.push(next);
        }
        Ok(&self.cache[n])
    }

    /// Applies one rewriting pass over `previous`.
    fn derive(&self, previous: &Generation, iteration: usize) -> Result<Generation> {
        let exhausted = |requested| LSystemError::ResourceExhaustion {
            iteration,
            requested,
        };

        // Exact sizes of the next level, so a blow-up fails before any copying.
        let mut bytes: usize = 0;
        let mut symbols: usize = 0;
        for c in previous.sequence.chars() {
            let (b, s) = match self.rules.successor(c) {
                Some(successor) => (successor.len(), successor.chars().count()),
                None => (c.len_utf8(), 1),
            };
            bytes = bytes.checked_add(b).ok_or(exhausted(usize::MAX))?;
            symbols = symbols.checked_add(s).ok_or(exhausted(usize::MAX))?;
        }

        let mut sequence = String::new();
        sequence.try_reserve_exact(bytes).map_err(|_| exhausted(bytes))?;
        let count_bytes = symbols.saturating_mul(std::mem::size_of::<u32>());
        let mut counts: Vec<u32> = Vec::new();
        counts.try_reserve_exact(symbols).map_err(|_| exhausted(count_bytes))?;

        let mut max_count = 0;
        for (c, &parent_count) in previous.sequence.chars().zip(&previous.counts) {
            let count = if self.markers.contains(&c) {
                parent_count + 1
            } else {
                parent_count
            };
            match self.rules.successor(c) {
                Some(successor) => {
                    sequence.push_str(successor);
                    let run = successor.chars().count();
                    counts.extend(std::iter::repeat_n(count, run));
                    if run > 0 {
                        max_count = max_count.max(count);
                    }
                }
                None => {
                    sequence.push(c);
                    counts.push(count);
                    max_count = max_count.max(count);
                }
            }
        }

        Ok(Generation {
            sequence,
            counts,
            max_count,
        })
    }
}

impl From<LSystemSnapshot> for LSystem {
    fn from(snapshot: LSystemSnapshot) -> Self {
        LSystem::new(snapshot.axiom, snapshot.rules, snapshot.markers)
    }
}
