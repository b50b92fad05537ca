//! Preference-driven table seating.
//!
//! People are split across a fixed number of equally sized tables so as to
//! maximize the total weight of satisfied seating preferences. The only
//! move is a two-person swap across tables, which keeps every table at its
//! initial occupancy; the search itself is [`crate::anneal`].

mod allocator;
pub mod moves;
mod problem;
mod report;
pub mod scoring;
mod types;

pub use allocator::TableAllocator;
pub use problem::SeatingProblem;
pub use report::{
    Allocation, AllocationReport, AllocationRow, Rating, SatisfactionMetrics, TableSummary,
};
pub use types::{Assignment, SwapMove, TableConfig};
