//! Seating allocation expressed as an [`AnnealingProblem`].

use super::moves;
use super::scoring;
use super::types::{Assignment, TableConfig};
use crate::anneal::{AnnealingProblem, Candidate};
use crate::error::Result;
use crate::graph::PreferenceGraph;
use rand::Rng;

/// Binds a preference graph to a table layout.
#[derive(Debug, Clone, Copy)]
pub struct SeatingProblem<'a> {
    graph: &'a PreferenceGraph,
    layout: TableConfig,
}

impl<'a> SeatingProblem<'a> {
    /// # Errors
    ///
    /// [`AllocError::InvalidConfiguration`](crate::AllocError) if the layout has
    /// no tables or zero-size tables.
    pub fn new(graph: &'a PreferenceGraph, layout: TableConfig) -> Result<Self> {
        layout.validate()?;
        Ok(Self { graph, layout })
    }

    pub fn graph(&self) -> &'a PreferenceGraph {
        self.graph
    }

    pub fn layout(&self) -> &TableConfig {
        &self.layout
    }
}

impl AnnealingProblem for SeatingProblem<'_> {
    type Solution = Assignment;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Assignment {
        moves::initial_assignment(self.graph.len(), &self.layout, rng)
    }

    fn score(&self, assignment: &Assignment) -> f64 {
        scoring::score(self.graph, assignment)
    }

    fn neighbor<R: Rng>(
        &self,
        assignment: &Assignment,
        rng: &mut R,
    ) -> Option<Candidate<Assignment>> {
        let (solution, mv) = moves::neighbor(assignment, rng)?;
        let delta = scoring::swap_delta(self.graph, assignment, &mv);
        Some(Candidate { solution, delta })
    }
}
