//! Weighted, undirected preference graph over people.
//!
//! People are interned in first-seen order and referred to internally by
//! a dense [`PersonId`]. Edges are keyed by the unordered pair of ids, so
//! `weight(a, b) == weight(b, a)` holds by construction.

use crate::error::{AllocError, Result};
use std::collections::{HashMap, HashSet};

/// Dense index of a registered person.
pub type PersonId = usize;

/// Preference relation between people, built once per run.
///
/// # Examples
///
/// ```
/// use u_seating::graph::PreferenceGraph;
///
/// let mut graph = PreferenceGraph::new();
/// graph.add_preference("ann", ["bob", "cid"], 2.0).unwrap();
/// assert!(graph.has_edge("bob", "ann"));
/// assert_eq!(graph.edge_weight("cid", "ann"), Some(2.0));
/// assert_eq!(graph.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PreferenceGraph {
    names: Vec<String>,
    index: HashMap<String, PersonId>,
    edges: HashMap<(PersonId, PersonId), f64>,
}

impl PreferenceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a person without any preferences. Returns its id.
    ///
    /// Registering an existing person is a no-op that returns the
    /// existing id.
    pub fn add_person(&mut self, person: &str) -> PersonId {
        if let Some(&id) = self.index.get(person) {
            return id;
        }
        let id = self.names.len();
        self.names.push(person.to_owned());
        self.index.insert(person.to_owned(), id);
        id
    }

    /// Registers `person` and every preferred person, and sets an edge of
    /// `weight` between `person` and each of them.
    ///
    /// Repeated pairs overwrite the previous weight. A person listing
    /// themselves is registered but gets no self-edge.
    ///
    /// # Errors
    ///
    /// [`AllocError::InvalidConfiguration`] if `weight` is not a finite,
    /// strictly positive number, or if the new edges would push
    /// [`Self::total_weight`] past `f64::MAX`. Nothing is registered in
    /// either case.
    pub fn add_preference<I, S>(&mut self, person: &str, preferred: I, weight: f64) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(AllocError::invalid(format!(
                "preference weight must be finite and positive, got {weight}"
            )));
        }
        let preferred: Vec<S> = preferred.into_iter().collect();
        let total = self.total_after(person, &preferred, weight);
        if !total.is_finite() {
            return Err(AllocError::invalid(format!(
                "total preference weight overflows with weight {weight}"
            )));
        }

        let a = self.add_person(person);
        for other in &preferred {
            let b = self.add_person(other.as_ref());
            if a != b {
                self.edges.insert(pair_key(a, b), weight);
            }
        }
        Ok(())
    }

    /// Sum of edge weights once `person` is linked to every name in
    /// `preferred` at `weight`, without touching the graph.
    fn total_after<S: AsRef<str>>(&self, person: &str, preferred: &[S], weight: f64) -> f64 {
        let mut seen = HashSet::new();
        let mut total = self.total_weight();
        for other in preferred.iter().map(AsRef::as_ref) {
            if other == person || !seen.insert(other) {
                continue;
            }
            let old = match (self.id_of(person), self.id_of(other)) {
                (Some(a), Some(b)) => self.weight(a, b),
                _ => 0.0,
            };
            total += weight - old;
        }
        total
    }

    /// Number of registered people.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Registered names in insertion order (index = [`PersonId`]).
    pub fn people(&self) -> &[String] {
        &self.names
    }

    pub fn id_of(&self, person: &str) -> Option<PersonId> {
        self.index.get(person).copied()
    }

    /// Resolves a name, failing with [`AllocError::UnknownPerson`].
    pub fn require(&self, person: &str) -> Result<PersonId> {
        self.id_of(person)
            .ok_or_else(|| AllocError::UnknownPerson(person.to_owned()))
    }

    pub fn name(&self, id: PersonId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.edge_weight(a, b).is_some()
    }

    /// Weight of the edge between two named people, if any.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        let (a, b) = (self.id_of(a)?, self.id_of(b)?);
        self.edges.get(&pair_key(a, b)).copied()
    }

    /// Edge weight by id; `0.0` when the pair is not connected.
    #[inline]
    pub fn weight(&self, a: PersonId, b: PersonId) -> f64 {
        self.edges.get(&pair_key(a, b)).copied().unwrap_or(0.0)
    }

    /// Iterates edges as `(low_id, high_id, weight)`, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = (PersonId, PersonId, f64)> + '_ {
        self.edges.iter().map(|(&(a, b), &w)| (a, b, w))
    }

    /// Sum of all edge weights: the score of a seating that satisfies
    /// every preference.
    pub fn total_weight(&self) -> f64 {
        self.edges.values().sum()
    }
}

#[inline]
fn pair_key(a: PersonId, b: PersonId) -> (PersonId, PersonId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_symmetric() {
        let mut g = PreferenceGraph::new();
        g.add_preference("a", ["b"], 1.5).unwrap();
        assert_eq!(g.edge_weight("a", "b"), Some(1.5));
        assert_eq!(g.edge_weight("b", "a"), Some(1.5));
        let (a, b) = (g.id_of("a").unwrap(), g.id_of("b").unwrap());
        assert_eq!(g.weight(a, b), g.weight(b, a));
    }

    #[test]
    fn test_last_write_wins() {
        let mut g = PreferenceGraph::new();
        g.add_preference("a", ["b"], 1.0).unwrap();
        g.add_preference("b", ["a"], 3.0).unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_weight("a", "b"), Some(3.0));
        assert!((g.total_weight() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_self_reference_skipped() {
        let mut g = PreferenceGraph::new();
        g.add_preference("a", ["a", "b"], 1.0).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(!g.has_edge("a", "a"));
    }

    #[test]
    fn test_insertion_order_ids() {
        let mut g = PreferenceGraph::new();
        g.add_preference("carol", ["alice", "bob"], 1.0).unwrap();
        g.add_person("dave");
        assert_eq!(g.people(), &["carol", "alice", "bob", "dave"]);
        assert_eq!(g.add_person("alice"), 1);
        assert_eq!(g.name(3), Some("dave"));
    }

    #[test]
    fn test_rejects_bad_weight() {
        let mut g = PreferenceGraph::new();
        assert!(g.add_preference("a", ["b"], 0.0).is_err());
        assert!(g.add_preference("a", ["b"], -1.0).is_err());
        assert!(g.add_preference("a", ["b"], f64::NAN).is_err());
        assert!(g.is_empty());
    }

    #[test]
    fn test_rejects_overflowing_total() {
        let mut g = PreferenceGraph::new();
        g.add_preference("a", ["b"], 1e308).unwrap();
        let err = g.add_preference("c", ["d"], 1e308);
        assert!(matches!(err, Err(AllocError::InvalidConfiguration(_))));
        // Rejected call registers nobody and keeps the total finite.
        assert_eq!(g.len(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.total_weight().is_finite());

        // Overwriting the existing pair replaces its weight, so it fits.
        g.add_preference("b", ["a", "a"], 1.5e308).unwrap();
        assert_eq!(g.edge_weight("a", "b"), Some(1.5e308));
        assert!(g.total_weight().is_finite());
    }

    #[test]
    fn test_unknown_lookups() {
        let mut g = PreferenceGraph::new();
        g.add_person("a");
        assert!(!g.has_edge("a", "ghost"));
        assert_eq!(
            g.require("ghost"),
            Err(AllocError::UnknownPerson("ghost".into()))
        );
    }
}
