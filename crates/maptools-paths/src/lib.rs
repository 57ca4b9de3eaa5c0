//! Budget-bounded movement range search on layered grids.
//!
//! Given a start [`Position`](maptools_core::Position), a movement budget and
//! a passability oracle, [`RangeSolver`] finds every cell reachable within the
//! budget together with the cheapest [`StepPath`] discovered to it.
//!
//! Movement is 8-directional. Orthogonal steps cost [`STRAIGHT_COST`] and
//! diagonal steps cost [`DIAGONAL_COST`], a truncated √2. Distances are exact
//! fixed-point decimals, so sums of diagonal steps are reproducible across
//! platforms and runs.
//!
//! # Trait hierarchy
//!
//! | Trait | Consumed by |
//! |---|---|
//! | [`AllowsMovement`] | [`RangeSolver::reachable`] |
//! | [`TryAllowsMovement`] | [`RangeSolver::try_reachable`] |

mod cost;
mod path;
mod solver;
mod traits;

pub use cost::{DIAGONAL_COST, STRAIGHT_COST, step_cost};
pub use path::StepPath;
pub use rust_decimal::Decimal;
pub use solver::{Expansion, RangeSolver, SolveStats, SolverConfig};
pub use traits::{AllowAll, AllowsMovement, TryAllowsMovement};
