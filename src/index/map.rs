//! Key-to-index mapping for a single tensor mode
//!
//! An `IndexMap` collects the distinct keys observed in one column during the
//! accumulation pass, then assigns each a contiguous 1-based index under a
//! fixed ordering policy. Accumulation and lookup are separated by a single
//! `build()` call; the map is immutable afterwards.
//!
//! # Invariants
//!
//! - Indices assigned by a built map are exactly `{1, ..., N}` for `N`
//!   distinct keys, each used once
//! - Every assigned key was accumulated first
//! - A map never mutates after `build()`; violations are rejected, not
//!   silently absorbed

use std::borrow::Cow;
use std::collections::HashMap;
use std::io::Write;

use indexmap::IndexSet;

use super::errors::{IndexError, IndexResult};

/// Ordering policy for index assignment, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOrder {
    /// Indices follow the order keys were first accumulated (default).
    #[default]
    FirstSeen,
    /// Keys sorted ascending by byte-wise string comparison.
    ///
    /// This is `Ord for str`: locale-independent, case-sensitive, so
    /// `"Apple" < "banana"` (uppercase bytes sort before lowercase).
    Lexicographic,
    /// Keys parsed as `i64` and sorted ascending by integer value.
    ///
    /// A key that does not parse fails the build. Keys are stored under the
    /// integer's canonical decimal rendering, so `"007"` and `"7"` are the
    /// same key.
    Numeric,
}

/// Mapping from string keys to contiguous 1-based tensor indices.
///
/// Lifecycle: `new` → zero or more `accumulate` → exactly one `build` →
/// `lookup` / `write_inverse`. Keys of any origin are canonicalized to a
/// string form once, at the boundary of every operation, so a value always
/// looks up the way it was inserted.
#[derive(Debug)]
pub struct IndexMap {
    /// Distinct canonical keys in first-seen order
    keys: IndexSet<String>,
    /// Canonical key -> 1-based index, populated by build()
    assignment: HashMap<String, u64>,
    /// Keys in ascending index order, populated by build()
    by_index: Vec<String>,
    /// Ordering policy, immutable
    order: KeyOrder,
    /// One-way flag set by build()
    built: bool,
}

impl IndexMap {
    /// Creates an empty map with the given ordering policy.
    pub fn new(order: KeyOrder) -> Self {
        Self {
            keys: IndexSet::new(),
            assignment: HashMap::new(),
            by_index: Vec::new(),
            order,
            built: false,
        }
    }

    /// Returns the ordering policy this map was constructed with.
    pub fn order(&self) -> KeyOrder {
        self.order
    }

    /// Returns whether `build()` has been called.
    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Renders a raw value into the canonical key form for this map.
    ///
    /// Total and deterministic. Under `Numeric`, integer spellings collapse
    /// to the canonical decimal rendering (whitespace-trimmed, no leading
    /// zeros); anything that does not parse passes through verbatim so the
    /// build can report it. Other policies use the exact string.
    fn canonical<'a>(&self, raw: &'a str) -> Cow<'a, str> {
        match self.order {
            KeyOrder::Numeric => match raw.trim().parse::<i64>() {
                Ok(v) => Cow::Owned(v.to_string()),
                Err(_) => Cow::Borrowed(raw),
            },
            _ => Cow::Borrowed(raw),
        }
    }

    /// Records a key observation. Idempotent: re-accumulating a key that is
    /// already present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `TNS_INDEX_REBUILD` if the map has already been built.
    pub fn accumulate(&mut self, raw: &str) -> IndexResult<()> {
        if self.built {
            return Err(IndexError::rebuild("accumulate"));
        }

        let key = self.canonical(raw);
        if !self.keys.contains(key.as_ref()) {
            self.keys.insert(key.into_owned());
        }
        Ok(())
    }

    /// Assigns indices to all accumulated keys under the ordering policy and
    /// freezes the map. Must be called exactly once.
    ///
    /// # Errors
    ///
    /// - `TNS_INDEX_REBUILD` if already built
    /// - `TNS_INDEX_NON_NUMERIC_KEY` under `Numeric` if any key fails to
    ///   parse as an integer; the error names the key and no assignment is
    ///   produced
    pub fn build(&mut self) -> IndexResult<()> {
        if self.built {
            return Err(IndexError::rebuild("build"));
        }

        let ordered: Vec<String> = match self.order {
            KeyOrder::FirstSeen => self.keys.iter().cloned().collect(),
            KeyOrder::Lexicographic => {
                let mut keys: Vec<String> = self.keys.iter().cloned().collect();
                keys.sort_unstable();
                keys
            }
            KeyOrder::Numeric => {
                let mut values = Vec::with_capacity(self.keys.len());
                for key in &self.keys {
                    let value = key
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| IndexError::non_numeric_key(key.clone()))?;
                    values.push(value);
                }
                values.sort_unstable();
                values.into_iter().map(|v| v.to_string()).collect()
            }
        };

        self.assignment.reserve(ordered.len());
        for (i, key) in ordered.iter().enumerate() {
            self.assignment.insert(key.clone(), i as u64 + 1);
        }
        self.by_index = ordered;
        self.built = true;
        Ok(())
    }

    /// Returns the 1-based index assigned to a key.
    ///
    /// The query is canonicalized exactly as `accumulate` canonicalized the
    /// inserted value, so raw field text from a second input pass resolves
    /// to the same key.
    ///
    /// # Errors
    ///
    /// - `TNS_INDEX_NOT_BUILT` if called before `build()`
    /// - `TNS_INDEX_KEY_NOT_FOUND` if the key is absent; the error carries
    ///   the key
    pub fn lookup(&self, raw: &str) -> IndexResult<u64> {
        if !self.built {
            return Err(IndexError::not_built("lookup"));
        }

        let key = self.canonical(raw);
        self.assignment
            .get(key.as_ref())
            .copied()
            .ok_or_else(|| IndexError::key_not_found(key.into_owned()))
    }

    /// Returns the number of assigned indices (0 before build).
    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    /// Returns whether the map holds no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    /// Writes the inverse mapping to `sink`: one key per line, in ascending
    /// index order, so line `i` (1-indexed) is the key with index `i`.
    ///
    /// Buffering and flushing are the caller's responsibility.
    ///
    /// # Errors
    ///
    /// - `TNS_INDEX_NOT_BUILT` if called before `build()`
    /// - `TNS_INDEX_DUMP_FAILED` on write failure
    pub fn write_inverse<W: Write>(&self, sink: &mut W) -> IndexResult<()> {
        if !self.built {
            return Err(IndexError::not_built("write_inverse"));
        }

        for key in &self.by_index {
            writeln!(sink, "{}", key)
                .map_err(|e| IndexError::dump_failed("failed to write inverse mapping", e))?;
        }
        Ok(())
    }
}
