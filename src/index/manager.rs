//! Mode manager: one `IndexMap` per tensor mode
//!
//! The manager owns the per-mode index maps and the designated value column.
//! During the accumulation pass it routes each record's raw field values into
//! the matching map; `build_all` then finalizes every map exactly once, in
//! declared mode order. Coordinate emission queries the finalized maps.
//!
//! Modes are independent: no state is shared between their maps.

use std::collections::HashMap;

use super::errors::{IndexError, IndexResult};
use super::map::{IndexMap, KeyOrder};

/// Coordinator for the index maps of a tensor's modes.
pub struct ModeManager {
    /// Mode names in declared order (build and emission order)
    mode_order: Vec<String>,
    /// Mode name -> its index map
    maps: HashMap<String, IndexMap>,
    /// Designated value column, if the tensor is not binary
    value_field: Option<String>,
}

impl ModeManager {
    /// Creates a manager with one empty `IndexMap` per `(name, order)` pair.
    ///
    /// The slice order is the declared mode order: `build_all`, `dims`, and
    /// coordinate emission all follow it.
    pub fn new(modes: &[(String, KeyOrder)], value_field: Option<String>) -> Self {
        let mut mode_order = Vec::with_capacity(modes.len());
        let mut maps = HashMap::with_capacity(modes.len());
        for (name, order) in modes {
            mode_order.push(name.clone());
            maps.insert(name.clone(), IndexMap::new(*order));
        }

        Self {
            mode_order,
            maps,
            value_field,
        }
    }

    /// Returns the mode names in declared order.
    pub fn mode_names(&self) -> &[String] {
        &self.mode_order
    }

    /// Returns the number of modes.
    pub fn mode_count(&self) -> usize {
        self.mode_order.len()
    }

    /// Returns the designated value column, if any.
    pub fn value_field(&self) -> Option<&str> {
        self.value_field.as_deref()
    }

    /// Accumulates one raw field value into the named mode's map.
    ///
    /// # Errors
    ///
    /// `TNS_INDEX_UNKNOWN_MODE` if the mode was not declared; otherwise
    /// whatever `IndexMap::accumulate` reports.
    pub fn observe(&mut self, mode: &str, raw: &str) -> IndexResult<()> {
        self.maps
            .get_mut(mode)
            .ok_or_else(|| IndexError::unknown_mode(mode))?
            .accumulate(raw)
    }

    /// Accumulates one record's field values, aligned with declared mode
    /// order.
    pub fn observe_record(&mut self, fields: &[&str]) -> IndexResult<()> {
        debug_assert_eq!(fields.len(), self.mode_order.len());

        for (mode, raw) in self.mode_order.iter().zip(fields) {
            // mode_order and maps are constructed together; the entry exists
            self.maps
                .get_mut(mode)
                .ok_or_else(|| IndexError::unknown_mode(mode.clone()))?
                .accumulate(raw)?;
        }
        Ok(())
    }

    /// Builds every mode's map exactly once, in declared mode order.
    ///
    /// The first failure propagates immediately; a numeric parse error in
    /// one mode aborts the whole build with no partial assignment for that
    /// mode.
    pub fn build_all(&mut self) -> IndexResult<()> {
        for mode in &self.mode_order {
            self.maps
                .get_mut(mode)
                .ok_or_else(|| IndexError::unknown_mode(mode.clone()))?
                .build()?;
        }
        Ok(())
    }

    /// Returns whether every mode's map has been built.
    pub fn is_built(&self) -> bool {
        self.maps.values().all(IndexMap::is_built)
    }

    /// Looks up the 1-based index of a raw value in the named mode.
    pub fn lookup(&self, mode: &str, raw: &str) -> IndexResult<u64> {
        self.map(mode)?.lookup(raw)
    }

    /// Returns the named mode's map.
    pub fn map(&self, mode: &str) -> IndexResult<&IndexMap> {
        self.maps
            .get(mode)
            .ok_or_else(|| IndexError::unknown_mode(mode))
    }

    /// Returns the per-mode dimension sizes in declared mode order.
    pub fn dims(&self) -> Vec<u64> {
        self.mode_order
            .iter()
            .map(|mode| self.maps[mode].len() as u64)
            .collect()
    }
}
