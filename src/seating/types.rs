//! Table layout and seating assignment types.

use crate::error::{AllocError, Result};
use crate::graph::PersonId;

/// Table layout for a run.
///
/// `num_people` is the head-count the caller declared; the people actually
/// seated are the ones registered with the preference graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableConfig {
    pub num_tables: usize,
    pub table_size: usize,
    pub num_people: usize,
}

impl TableConfig {
    pub fn new(num_tables: usize, table_size: usize, num_people: usize) -> Self {
        Self {
            num_tables,
            table_size,
            num_people,
        }
    }

    /// Total number of seats.
    pub fn capacity(&self) -> usize {
        self.num_tables.saturating_mul(self.table_size)
    }

    /// Rejects layouts without any seats.
    pub fn validate(&self) -> Result<()> {
        if self.num_tables == 0 {
            return Err(AllocError::invalid("num_tables must be positive"));
        }
        if self.table_size == 0 {
            return Err(AllocError::invalid("table_size must be positive"));
        }
        Ok(())
    }
}

/// A single cross-table swap: `person_a` (at `table_a`) trades seats with
/// `person_b` (at `table_b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapMove {
    pub table_a: usize,
    pub person_a: PersonId,
    pub table_b: usize,
    pub person_b: PersonId,
}

/// People seated per table, plus whoever did not fit.
///
/// Tables are pairwise disjoint and never exceed the table size they were
/// built with. Swaps never touch the unassigned list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    tables: Vec<Vec<PersonId>>,
    unassigned: Vec<PersonId>,
}

impl Assignment {
    pub(crate) fn from_parts(tables: Vec<Vec<PersonId>>, unassigned: Vec<PersonId>) -> Self {
        Self { tables, unassigned }
    }

    pub fn tables(&self) -> &[Vec<PersonId>] {
        &self.tables
    }

    pub fn table(&self, index: usize) -> Option<&[PersonId]> {
        self.tables.get(index).map(Vec::as_slice)
    }

    pub fn num_tables(&self) -> usize {
        self.tables.len()
    }

    /// People left out because the tables were full.
    pub fn unassigned(&self) -> &[PersonId] {
        &self.unassigned
    }

    /// Total occupied seats.
    pub fn seated_count(&self) -> usize {
        self.tables.iter().map(Vec::len).sum()
    }

    /// Table index of a seated person.
    pub fn table_of(&self, person: PersonId) -> Option<usize> {
        self.tables.iter().position(|t| t.contains(&person))
    }

    /// Indices of tables with at least one occupant.
    pub fn occupied_tables(&self) -> Vec<usize> {
        self.tables
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns a copy with the swap applied; `self` is left untouched.
    ///
    /// A move whose people are not at the stated tables yields an
    /// unchanged copy.
    pub fn swapped(&self, mv: &SwapMove) -> Assignment {
        let mut next = self.clone();
        let slot_a = self.slot(mv.table_a, mv.person_a);
        let slot_b = self.slot(mv.table_b, mv.person_b);
        if let (Some(a), Some(b)) = (slot_a, slot_b) {
            if mv.table_a != mv.table_b {
                next.tables[mv.table_a][a] = mv.person_b;
                next.tables[mv.table_b][b] = mv.person_a;
            }
        }
        next
    }

    fn slot(&self, table: usize, person: PersonId) -> Option<usize> {
        self.tables.get(table)?.iter().position(|&p| p == person)
    }
}
