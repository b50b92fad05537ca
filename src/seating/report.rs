//! Projection of the internal assignment into the external allocation and
//! its satisfaction report.

use super::scoring;
use super::types::Assignment;
use crate::anneal::AnnealResult;
use crate::error::Result;
use crate::graph::{PersonId, PreferenceGraph};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Final seating keyed by 0-based table index.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    /// Every table index, including empty tables.
    pub tables: BTreeMap<usize, BTreeSet<String>>,

    /// People excluded because the tables were full.
    pub unassigned: Vec<String>,

    /// Satisfaction score of the seating.
    pub score: f64,

    /// Temperature after each executed iteration.
    pub temperature_trace: Vec<f64>,

    pub iterations: usize,
    pub final_temperature: f64,
    pub accepted_moves: usize,
    pub reheats: usize,

    /// Whether the search stopped early because no swap was possible.
    pub stalled: bool,
}

impl Allocation {
    /// Names an assignment without any run statistics attached.
    pub fn from_assignment(graph: &PreferenceGraph, assignment: &Assignment) -> Self {
        let tables = assignment
            .tables()
            .iter()
            .enumerate()
            .map(|(i, table)| (i, names(graph, table).collect()))
            .collect();
        Self {
            tables,
            unassigned: names(graph, assignment.unassigned()).collect(),
            score: scoring::score(graph, assignment),
            temperature_trace: Vec::new(),
            iterations: 0,
            final_temperature: 0.0,
            accepted_moves: 0,
            reheats: 0,
            stalled: false,
        }
    }

    /// Names the best assignment of a run and carries over its statistics.
    pub fn from_run(graph: &PreferenceGraph, result: AnnealResult<Assignment>) -> Self {
        let mut allocation = Self::from_assignment(graph, &result.best);
        allocation.temperature_trace = result.temperature_trace;
        allocation.iterations = result.iterations;
        allocation.final_temperature = result.final_temperature;
        allocation.accepted_moves = result.accepted_moves;
        allocation.reheats = result.reheats;
        allocation.stalled = result.stalled;
        allocation
    }

    pub fn table_of(&self, person: &str) -> Option<usize> {
        self.tables
            .iter()
            .find(|(_, people)| people.contains(person))
            .map(|(&i, _)| i)
    }

    pub fn seated_count(&self) -> usize {
        self.tables.values().map(BTreeSet::len).sum()
    }

    /// Builds the per-table summary and satisfaction metrics.
    ///
    /// Scores are recomputed from names, independently of [`Self::score`].
    ///
    /// # Errors
    ///
    /// [`AllocError::UnknownPerson`](crate::AllocError) if a seated name is
    /// not registered in `graph`.
    pub fn report(&self, graph: &PreferenceGraph) -> Result<AllocationReport> {
        let mut rows = Vec::with_capacity(self.seated_count());
        let mut summary = Vec::with_capacity(self.tables.len());
        let mut total_score = 0.0;

        for (&table, people) in &self.tables {
            let ids = people
                .iter()
                .map(|name| graph.require(name))
                .collect::<Result<Vec<PersonId>>>()?;
            let score = scoring::table_score(graph, &ids);
            total_score += score;
            rows.extend(people.iter().map(|person| AllocationRow {
                table,
                person: person.clone(),
            }));
            summary.push(TableSummary {
                table,
                num_people: people.len(),
                score,
            });
        }

        Ok(AllocationReport {
            rows,
            summary,
            metrics: SatisfactionMetrics::new(total_score, graph.total_weight()),
            unassigned: self.unassigned.clone(),
        })
    }
}

fn names<'a>(graph: &'a PreferenceGraph, ids: &'a [PersonId]) -> impl Iterator<Item = String> + 'a {
    ids.iter()
        .filter_map(move |&id| graph.name(id))
        .map(str::to_owned)
}

/// One `(table, person)` line of the allocation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationRow {
    pub table: usize,
    pub person: String,
}

/// Head-count and score of one table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableSummary {
    pub table: usize,
    pub num_people: usize,
    pub score: f64,
}

/// Qualitative band of the satisfaction rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rating {
    /// Above 80 %.
    Excellent,
    /// Above 60 %.
    Good,
    NeedsReview,
}

impl Rating {
    pub fn from_rate(rate: f64) -> Self {
        if rate > 80.0 {
            Rating::Excellent
        } else if rate > 60.0 {
            Rating::Good
        } else {
            Rating::NeedsReview
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Excellent => write!(f, "Excellent"),
            Rating::Good => write!(f, "Good"),
            Rating::NeedsReview => write!(f, "Needs Review"),
        }
    }
}

/// Aggregate satisfaction figures.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatisfactionMetrics {
    pub total_score: f64,

    /// Sum of all edge weights.
    pub max_possible_score: f64,

    /// `total / max * 100`, or `0` when there are no preferences or the
    /// maximum is not finite.
    pub satisfaction_rate: f64,

    pub rating: Rating,
}

impl SatisfactionMetrics {
    pub fn new(total_score: f64, max_possible_score: f64) -> Self {
        let satisfaction_rate = if max_possible_score.is_finite() && max_possible_score > 0.0 {
            total_score / max_possible_score * 100.0
        } else {
            0.0
        };
        Self {
            total_score,
            max_possible_score,
            satisfaction_rate,
            rating: Rating::from_rate(satisfaction_rate),
        }
    }
}

/// Everything the spreadsheet writer needs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocationReport {
    /// Ordered by table, then name.
    pub rows: Vec<AllocationRow>,
    pub summary: Vec<TableSummary>,
    pub metrics: SatisfactionMetrics,
    pub unassigned: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> PreferenceGraph {
        let mut g = PreferenceGraph::new();
        g.add_preference("ann", ["bea"], 2.0).unwrap();
        g.add_preference("cal", ["dov"], 2.0).unwrap();
        g.add_preference("ann", ["cal"], 1.0).unwrap();
        g.add_person("eli");
        g
    }

    #[test]
    fn test_projection_names_tables() {
        let g = graph();
        // ann=0 bea=1 cal=2 dov=3 eli=4
        let asg = Assignment::from_parts(vec![vec![0, 1], vec![3, 2], vec![]], vec![4]);
        let alloc = Allocation::from_assignment(&g, &asg);

        assert_eq!(alloc.tables.len(), 3);
        assert_eq!(
            alloc.tables[&1],
            BTreeSet::from(["cal".to_string(), "dov".to_string()])
        );
        assert!(alloc.tables[&2].is_empty());
        assert_eq!(alloc.unassigned, vec!["eli".to_string()]);
        assert_eq!(alloc.table_of("bea"), Some(0));
        assert_eq!(alloc.table_of("eli"), None);
        assert!((alloc.score - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_report_metrics() {
        let g = graph();
        let asg = Assignment::from_parts(vec![vec![0, 1], vec![2, 3]], vec![4]);
        let report = Allocation::from_assignment(&g, &asg).report(&g).unwrap();

        assert_eq!(report.rows.len(), 4);
        assert_eq!(report.rows[0].table, 0);
        assert_eq!(report.rows[0].person, "ann");
        assert_eq!(report.summary[1].num_people, 2);
        assert!((report.summary[1].score - 2.0).abs() < 1e-12);
        assert!((report.metrics.total_score - 4.0).abs() < 1e-12);
        assert!((report.metrics.max_possible_score - 5.0).abs() < 1e-12);
        assert!((report.metrics.satisfaction_rate - 80.0).abs() < 1e-9);
        assert_eq!(report.metrics.rating, Rating::Good);
        assert_eq!(report.unassigned, vec!["eli".to_string()]);
    }

    #[test]
    fn test_report_unknown_person() {
        let g = graph();
        let asg = Assignment::from_parts(vec![vec![0]], vec![]);
        let mut alloc = Allocation::from_assignment(&g, &asg);
        alloc.tables.entry(0).or_default().insert("ghost".into());
        assert!(alloc.report(&g).is_err());
    }

    #[test]
    fn test_rating_bands() {
        assert_eq!(Rating::from_rate(95.0), Rating::Excellent);
        assert_eq!(Rating::from_rate(80.0), Rating::Good);
        assert_eq!(Rating::from_rate(60.0), Rating::NeedsReview);
        assert_eq!(Rating::NeedsReview.to_string(), "Needs Review");
        let empty = SatisfactionMetrics::new(0.0, 0.0);
        assert_eq!(empty.satisfaction_rate, 0.0);
    }

    #[test]
    fn test_non_finite_maximum_rates_zero() {
        let metrics = SatisfactionMetrics::new(1.0, f64::INFINITY);
        assert_eq!(metrics.satisfaction_rate, 0.0);
        assert_eq!(metrics.rating, Rating::NeedsReview);
        let metrics = SatisfactionMetrics::new(f64::INFINITY, f64::INFINITY);
        assert!(!metrics.satisfaction_rate.is_nan());
    }
}
