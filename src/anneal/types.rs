//! Core trait for adaptive annealing.

use rand::Rng;

/// A proposed move: the neighbor solution plus its score change relative
/// to the solution it was derived from.
#[derive(Debug, Clone)]
pub struct Candidate<S> {
    pub solution: S,
    pub delta: f64,
}

/// Defines a maximization problem for [`AnnealRunner`](super::AnnealRunner).
///
/// The problem supplies the initial solution, the objective and the
/// neighbor move. The controller handles acceptance, best tracking and
/// temperature feedback.
///
/// # Maximization
///
/// Higher scores are better.
///
/// # Examples
///
/// ```ignore
/// struct OneMax { n: usize }
///
/// impl AnnealingProblem for OneMax {
///     type Solution = Vec<bool>;
///
///     fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Vec<bool> {
///         vec![false; self.n]
///     }
///
///     fn score(&self, bits: &Vec<bool>) -> f64 {
///         bits.iter().filter(|&&b| b).count() as f64
///     }
///
///     fn neighbor<R: Rng>(&self, bits: &Vec<bool>, rng: &mut R) -> Option<Candidate<Vec<bool>>> {
///         let i = rng.random_range(0..self.n);
///         let mut next = bits.clone();
///         next[i] = !next[i];
///         let delta = if next[i] { 1.0 } else { -1.0 };
///         Some(Candidate { solution: next, delta })
///     }
/// }
/// ```
pub trait AnnealingProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates a random initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Self::Solution;

    /// Objective value of a solution. Higher is better.
    fn score(&self, solution: &Self::Solution) -> f64;

    /// Proposes a neighbor of `solution` without mutating it.
    ///
    /// `delta` must equal `score(neighbor) - score(solution)`. Returns
    /// `None` when the instance admits no move at all; the controller then
    /// stops the run.
    fn neighbor<R: Rng>(
        &self,
        solution: &Self::Solution,
        rng: &mut R,
    ) -> Option<Candidate<Self::Solution>>;
}
