//! Load Set
//!
//! An ordered, caller-owned collection of loads with add/update/remove/clear
//! by id. The engine never holds on to a set; it borrows the loads as a
//! slice for the duration of one call.

use serde::{Deserialize, Serialize};

use super::input::LoadInput;
use super::load_types::{generate_load_id, Load, LoadKind};
use crate::errors::{CalcError, CalcResult};
use crate::validation::validate_load;

/// Collection of loads acting on one span.
///
/// # Example
/// ```
/// use clapeyron_core::loads::{Load, LoadInput, LoadSet};
///
/// let mut set = LoadSet::new("Scenario C")
///     .with_load(Load::point(20.0, 2.0));
///
/// let id = set.add_input(&LoadInput::moment(8.0, 15.0), 10.0).unwrap();
/// assert_eq!(set.load_count(), 2);
///
/// set.remove_load(&id);
/// assert_eq!(set.load_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadSet {
    /// User label for this set
    #[serde(default)]
    pub label: String,

    /// Loads in insertion order
    pub loads: Vec<Load>,
}

impl LoadSet {
    /// Create a new empty set with a label
    pub fn new(label: impl Into<String>) -> Self {
        LoadSet {
            label: label.into(),
            loads: Vec::new(),
        }
    }

    /// Add a load and return self (builder pattern)
    pub fn with_load(mut self, load: Load) -> Self {
        self.loads.push(load);
        self
    }

    /// Add an already validated load
    pub fn add_load(&mut self, load: Load) {
        self.loads.push(load);
    }

    /// Validate `input` against `span_m` and the current loads, then add it.
    ///
    /// Returns the id of the new load.
    pub fn add_input(&mut self, input: &LoadInput, span_m: f64) -> CalcResult<String> {
        let load = input.into_load(span_m, &self.loads)?;
        let id = load.id().to_string();
        log::debug!("adding {} ({})", load, id);
        self.loads.push(load);
        Ok(id)
    }

    /// Replace the load with `id` by a freshly validated one, keeping its id
    /// and position in the set.
    pub fn update_load(&mut self, id: &str, input: &LoadInput, span_m: f64) -> CalcResult<()> {
        let index = self
            .loads
            .iter()
            .position(|l| l.id() == id)
            .ok_or_else(|| CalcError::invalid_input("id", id, "No load with this id"))?;

        let others: Vec<Load> = self
            .loads
            .iter()
            .filter(|l| l.id() != id)
            .cloned()
            .collect();

        let validation = validate_load(input, span_m, &others);
        if let Some(err) = validation.errors.into_iter().next() {
            return Err(err);
        }

        self.loads[index] = input.to_si().build(id.to_string())?;
        Ok(())
    }

    /// Remove a load by id
    pub fn remove_load(&mut self, id: &str) -> Option<Load> {
        let pos = self.loads.iter().position(|l| l.id() == id)?;
        Some(self.loads.remove(pos))
    }

    /// Get a load by id
    pub fn get_load(&self, id: &str) -> Option<&Load> {
        self.loads.iter().find(|l| l.id() == id)
    }

    /// Remove every load
    pub fn clear(&mut self) {
        self.loads.clear();
    }

    /// Borrow the loads for an engine call
    pub fn as_slice(&self) -> &[Load] {
        &self.loads
    }

    /// Check if there are any loads defined
    pub fn is_empty(&self) -> bool {
        self.loads.is_empty()
    }

    /// Get count of loads
    pub fn load_count(&self) -> usize {
        self.loads.len()
    }

    /// Loads of one kind
    pub fn loads_of_kind(&self, kind: LoadKind) -> impl Iterator<Item = &Load> {
        self.loads.iter().filter(move |l| l.kind() == kind)
    }

    /// Sum of signed vertical resultants (kN)
    pub fn total_vertical_load(&self) -> f64 {
        self.loads.iter().map(Load::vertical_resultant).sum()
    }

    /// Make sure every load has a non-empty id unique within the set,
    /// generating ids where needed. Returns how many ids were replaced.
    pub fn ensure_unique_ids(&mut self) -> usize {
        let mut seen = std::collections::HashSet::new();
        let mut replaced = 0;
        for load in &mut self.loads {
            if load.id().is_empty() || !seen.insert(load.id().to_string()) {
                let fresh = generate_load_id();
                seen.insert(fresh.clone());
                *load = load.clone().with_id(fresh);
                replaced += 1;
            }
        }
        replaced
    }
}

impl From<Vec<Load>> for LoadSet {
    fn from(loads: Vec<Load>) -> Self {
        LoadSet {
            label: String::new(),
            loads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_counts() {
        let set = LoadSet::new("Mixed")
            .with_load(Load::point(20.0, 2.0))
            .with_load(Load::uniform(5.0, 0.0, 10.0))
            .with_load(Load::moment(15.0, 8.0));

        assert_eq!(set.load_count(), 3);
        assert_eq!(set.loads_of_kind(LoadKind::Point).count(), 1);
        assert_eq!(set.loads_of_kind(LoadKind::Moment).count(), 1);
        assert_eq!(set.total_vertical_load(), 70.0);
    }

    #[test]
    fn test_add_input_rejects_invalid() {
        let mut set = LoadSet::new("Test");
        let bad = LoadInput::distributed(4.0, 2.0, 1.0, 1.0);
        assert!(set.add_input(&bad, 10.0).is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn test_update_keeps_id_and_order() {
        let mut set = LoadSet::new("Test")
            .with_load(Load::point(10.0, 1.0).with_id("A"))
            .with_load(Load::point(10.0, 9.0).with_id("B"));

        set.update_load("A", &LoadInput::moment(5.0, 12.0), 10.0).unwrap();

        assert_eq!(set.loads[0].id(), "A");
        assert_eq!(set.loads[0].kind(), LoadKind::Moment);
        assert_eq!(set.loads[1].id(), "B");
    }

    #[test]
    fn test_update_unknown_id() {
        let mut set = LoadSet::new("Test");
        let err = set
            .update_load("missing", &LoadInput::point(1.0, 1.0), 10.0)
            .unwrap_err();
        assert_eq!(err.field(), Some("id"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut set = LoadSet::new("Test")
            .with_load(Load::point(10.0, 1.0).with_id("A"))
            .with_load(Load::point(10.0, 2.0).with_id("B"));

        assert!(set.remove_load("A").is_some());
        assert!(set.remove_load("A").is_none());
        assert!(set.get_load("B").is_some());

        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_ensure_unique_ids() {
        let mut set = LoadSet::from(vec![
            Load::point(1.0, 1.0).with_id("X"),
            Load::point(2.0, 2.0).with_id("X"),
            Load::point(3.0, 3.0).with_id(""),
        ]);

        assert_eq!(set.ensure_unique_ids(), 2);
        assert_eq!(set.loads[0].id(), "X");
        assert_ne!(set.loads[1].id(), "X");
        assert!(!set.loads[2].id().is_empty());
    }

    #[test]
    fn test_serialization() {
        let set = LoadSet::new("Floor").with_load(Load::point(100.0, 5.0).with_id("P1"));
        let json = serde_json::to_string_pretty(&set).unwrap();
        let roundtrip: LoadSet = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, set);
    }
}
