//! Table seating allocation by adaptive simulated annealing.
//!
//! Assigns a population of people to equally sized tables so as to maximize
//! the weight of satisfied pairwise seating preferences, a bounded-capacity
//! graph-partitioning problem solved heuristically.
//!
//! - [`graph`]: the weighted, undirected preference relation.
//! - [`anneal`]: a domain-agnostic annealing controller whose temperature
//!   follows the acceptance rate over a sliding window of recent moves.
//! - [`seating`]: the allocation problem itself, its objective and swap
//!   move, and the projection into a named allocation report.
//!
//! # Example
//!
//! ```
//! use u_seating::anneal::AnnealConfig;
//! use u_seating::seating::{TableAllocator, TableConfig};
//!
//! let mut allocator = TableAllocator::new(TableConfig::new(2, 3, 6))?;
//! for group in [["a1", "a2", "a3"], ["b1", "b2", "b3"]] {
//!     for person in group {
//!         let others = group.iter().filter(|&&p| p != person);
//!         allocator.add_preference(person, others, 2.0)?;
//!     }
//! }
//!
//! let allocation = allocator.solve(&AnnealConfig::default().with_seed(42))?;
//! let report = allocation.report(allocator.graph())?;
//! assert!(report.metrics.total_score <= report.metrics.max_possible_score);
//! # Ok::<(), u_seating::AllocError>(())
//! ```

pub mod anneal;
pub mod error;
pub mod graph;
pub mod seating;

pub use error::{AllocError, Result};
