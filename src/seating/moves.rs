//! Initial construction and the swap neighborhood.

use super::types::{Assignment, SwapMove, TableConfig};
use crate::graph::PersonId;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

/// Shuffles `0..num_people` and fills tables in order up to capacity.
///
/// People beyond total capacity go to the unassigned list; they are not
/// retried elsewhere.
pub fn initial_assignment<R: Rng>(
    num_people: usize,
    layout: &TableConfig,
    rng: &mut R,
) -> Assignment {
    let mut people: Vec<PersonId> = (0..num_people).collect();
    people.shuffle(rng);

    let mut rest = people.into_iter();
    let tables: Vec<Vec<PersonId>> = (0..layout.num_tables)
        .map(|_| rest.by_ref().take(layout.table_size).collect())
        .collect();
    Assignment::from_parts(tables, rest.collect())
}

/// Draws a swap between two distinct occupied tables, uniformly over
/// ordered table pairs and then over each table's occupants.
///
/// Returns `None` when fewer than two tables are occupied.
pub fn swap_candidates<R: Rng>(assignment: &Assignment, rng: &mut R) -> Option<SwapMove> {
    let occupied = assignment.occupied_tables();
    if occupied.len() < 2 {
        return None;
    }

    let i = rng.random_range(0..occupied.len());
    let mut j = rng.random_range(0..occupied.len() - 1);
    if j >= i {
        j += 1;
    }
    let (table_a, table_b) = (occupied[i], occupied[j]);

    let person_a = *assignment.table(table_a)?.choose(rng)?;
    let person_b = *assignment.table(table_b)?.choose(rng)?;
    Some(SwapMove {
        table_a,
        person_a,
        table_b,
        person_b,
    })
}

/// Proposes a neighbor by one cross-table swap. The input is not mutated.
pub fn neighbor<R: Rng>(assignment: &Assignment, rng: &mut R) -> Option<(Assignment, SwapMove)> {
    let mv = swap_candidates(assignment, rng)?;
    Some((assignment.swapped(&mv), mv))
}
