//! Satisfaction objective and incremental swap delta.
//!
//! Each co-seated unordered pair contributes its edge weight exactly once.

use super::types::{Assignment, SwapMove};
use crate::graph::{PersonId, PreferenceGraph};

/// Sum of edge weights over every unordered pair seated at one table.
pub fn table_score(graph: &PreferenceGraph, table: &[PersonId]) -> f64 {
    let mut total = 0.0;
    for (i, &a) in table.iter().enumerate() {
        for &b in &table[i + 1..] {
            total += graph.weight(a, b);
        }
    }
    total
}

/// Total satisfaction score of an assignment.
pub fn score(graph: &PreferenceGraph, assignment: &Assignment) -> f64 {
    assignment
        .tables()
        .iter()
        .map(|t| table_score(graph, t))
        .sum()
}

/// Score change if the two people of `mv` traded tables, computed without
/// building the new assignment.
///
/// Each person gains their ties to the other table's remaining occupants
/// and loses their ties to their own table. The edge between the two
/// swapped people is never counted: neither sits with the other before or
/// after the swap.
pub fn swap_delta(graph: &PreferenceGraph, assignment: &Assignment, mv: &SwapMove) -> f64 {
    if mv.table_a == mv.table_b {
        return 0.0;
    }
    let (Some(table_a), Some(table_b)) =
        (assignment.table(mv.table_a), assignment.table(mv.table_b))
    else {
        return 0.0;
    };

    let ties = |person: PersonId, table: &[PersonId], skip: PersonId| -> f64 {
        table
            .iter()
            .filter(|&&other| other != skip)
            .map(|&other| graph.weight(person, other))
            .sum()
    };

    let a_gain =
        ties(mv.person_a, table_b, mv.person_b) - ties(mv.person_a, table_a, mv.person_a);
    let b_gain =
        ties(mv.person_b, table_a, mv.person_a) - ties(mv.person_b, table_b, mv.person_b);
    a_gain + b_gain
}
