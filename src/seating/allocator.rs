//! Entry point for the spreadsheet layer: collect preferences, solve.

use super::problem::SeatingProblem;
use super::report::Allocation;
use super::types::{Assignment, TableConfig};
use crate::anneal::{AnnealConfig, AnnealResult, AnnealRunner};
use crate::error::Result;
use crate::graph::PreferenceGraph;
use tracing::{info, warn};

/// Collects preferences for a fixed table layout and solves the seating.
///
/// # Examples
///
/// ```
/// use u_seating::anneal::AnnealConfig;
/// use u_seating::seating::{TableAllocator, TableConfig};
///
/// let mut allocator = TableAllocator::new(TableConfig::new(2, 2, 4)).unwrap();
/// allocator.add_preference("ann", ["bea"], 1.0).unwrap();
/// allocator.add_preference("cal", ["dov"], 1.0).unwrap();
///
/// let allocation = allocator
///     .solve(&AnnealConfig::default().with_max_iterations(500).with_seed(1))
///     .unwrap();
/// assert_eq!(allocation.seated_count(), 4);
/// assert_eq!(allocation.table_of("ann"), allocation.table_of("bea"));
/// ```
#[derive(Debug, Clone)]
pub struct TableAllocator {
    layout: TableConfig,
    graph: PreferenceGraph,
}

impl TableAllocator {
    /// # Errors
    ///
    /// [`AllocError::InvalidConfiguration`](crate::AllocError) for zero
    /// tables or a zero table size.
    pub fn new(layout: TableConfig) -> Result<Self> {
        layout.validate()?;
        Ok(Self {
            layout,
            graph: PreferenceGraph::new(),
        })
    }

    /// See [`PreferenceGraph::add_preference`].
    pub fn add_preference<I, S>(&mut self, person: &str, preferred: I, weight: f64) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.graph.add_preference(person, preferred, weight)
    }

    /// Registers someone who listed no preferences.
    pub fn add_person(&mut self, person: &str) {
        self.graph.add_person(person);
    }

    pub fn graph(&self) -> &PreferenceGraph {
        &self.graph
    }

    pub fn layout(&self) -> &TableConfig {
        &self.layout
    }

    /// Number of registered people that cannot be seated.
    pub fn overflow(&self) -> usize {
        self.graph.len().saturating_sub(self.layout.capacity())
    }

    /// Runs one annealing trajectory and returns the best seating seen.
    pub fn solve(&self, config: &AnnealConfig) -> Result<Allocation> {
        let problem = self.prepare(config)?;
        let result = AnnealRunner::run(&problem, config)?;
        Ok(self.finish(result))
    }

    /// Best of `runs` independent trajectories.
    pub fn solve_multi_start(&self, config: &AnnealConfig, runs: usize) -> Result<Allocation> {
        let problem = self.prepare(config)?;
        let result = AnnealRunner::run_multi_start(&problem, config, runs)?;
        Ok(self.finish(result))
    }

    fn prepare(&self, config: &AnnealConfig) -> Result<SeatingProblem<'_>> {
        config.validate()?;
        let problem = SeatingProblem::new(&self.graph, self.layout)?;

        info!(
            tables = self.layout.num_tables,
            table_size = self.layout.table_size,
            people = self.graph.len(),
            edges = self.graph.edge_count(),
            "solving seating allocation"
        );
        if self.graph.len() != self.layout.num_people {
            warn!(
                declared = self.layout.num_people,
                registered = self.graph.len(),
                "declared head-count differs from registered people"
            );
        }
        let overflow = self.overflow();
        if overflow > 0 {
            warn!(
                overflow,
                capacity = self.layout.capacity(),
                "more people than seats, excess people stay unassigned"
            );
        }
        Ok(problem)
    }

    fn finish(&self, result: AnnealResult<Assignment>) -> Allocation {
        info!(
            best_score = result.best_score,
            iterations = result.iterations,
            final_temperature = result.final_temperature,
            reheats = result.reheats,
            "seating allocation finished"
        );
        Allocation::from_run(&self.graph, result)
    }
}
