use std::cmp::Ordering;
use std::collections::BinaryHeap;

use indexmap::IndexMap;
use maptools_core::Position;
use rust_decimal::Decimal;

use crate::path::StepPath;
use crate::traits::{AllowsMovement, Infallibly, TryAllowsMovement};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Order in which discovered paths are expanded.
///
/// Both strategies re-expand a position every time a strictly cheaper path
/// to it is found, so they agree on which positions are reachable and on
/// their distances. Equal-cost alternatives may be recorded differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expansion {
    /// Depth-first relaxation: the improved neighbours of a path are each
    /// expanded to exhaustion, in direction order, before the next one.
    #[default]
    DepthFirst,
    /// Cheapest-first relaxation driven by a binary heap. Expands each
    /// position far fewer times on cluttered maps.
    BestFirst,
}

/// Configuration for a [`RangeSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig {
    pub expansion: Expansion,
}

/// Counters describing the most recent solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveStats {
    /// Paths whose neighbours were generated.
    pub expansions: usize,
    /// Times a recorded path was replaced by a strictly cheaper one.
    pub improvements: usize,
    /// Passability queries issued.
    pub oracle_calls: usize,
}

// ---------------------------------------------------------------------------
// Best-first frontier entry
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Frontier {
    distance: Decimal,
    seq: u64,
    path: StepPath,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the cheapest, oldest entry first.
        other
            .distance
            .cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// RangeSolver
// ---------------------------------------------------------------------------

/// Finds every position reachable from a start within a movement budget.
///
/// The solver owns its working buffers and reuses them between solves. Each
/// solve starts from a clean slate; the results of the last one stay
/// queryable through [`RangeSolver::path_at`] until the next.
#[derive(Debug, Default)]
pub struct RangeSolver {
    config: SolverConfig,
    start: Option<Position>,
    // Best path per position, in discovery order. Replacing an entry keeps
    // its slot.
    best: IndexMap<Position, StepPath>,
    results: Vec<StepPath>,
    stack: Vec<StepPath>,
    heap: BinaryHeap<Frontier>,
    stats: SolveStats,
}

impl RangeSolver {
    /// Create a solver using depth-first expansion.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[inline]
    pub fn config(&self) -> SolverConfig {
        self.config
    }

    /// Counters for the most recent solve.
    #[inline]
    pub fn stats(&self) -> SolveStats {
        self.stats
    }

    /// Compute every path reachable from `start` within `budget`.
    ///
    /// Returns one path per reached position, the cheapest found, sorted by
    /// ascending distance. Equal distances keep the order in which their
    /// positions were first discovered. The start itself is never included,
    /// and a negative budget reaches nothing.
    pub fn reachable<A: AllowsMovement + ?Sized>(
        &mut self,
        oracle: &A,
        start: Position,
        budget: impl Into<Decimal>,
    ) -> &[StepPath] {
        match self.try_reachable(&Infallibly(oracle), start, budget) {
            Ok(paths) => paths,
            Err(never) => match never {},
        }
    }

    /// Like [`RangeSolver::reachable`], with an oracle that may fail.
    ///
    /// The first oracle error aborts the solve and is returned unchanged.
    /// Nothing from the aborted solve remains queryable.
    pub fn try_reachable<A: TryAllowsMovement + ?Sized>(
        &mut self,
        oracle: &A,
        start: Position,
        budget: impl Into<Decimal>,
    ) -> Result<&[StepPath], A::Error> {
        let budget = budget.into();
        self.reset();

        let root = StepPath::new(start);
        self.best.insert(start, root.clone());

        let outcome = match self.config.expansion {
            Expansion::DepthFirst => self.relax_depth_first(oracle, root, budget),
            Expansion::BestFirst => self.relax_best_first(oracle, root, budget),
        };
        if let Err(e) = outcome {
            self.reset();
            return Err(e);
        }

        self.results
            .extend(self.best.values().filter(|p| p.end() != start).cloned());
        // Stable: ties stay in discovery order.
        self.results.sort_by(|a, b| a.distance().cmp(&b.distance()));
        self.start = Some(start);

        log::debug!(
            "range from {start} within {budget}: {} reached, {} expansions, {} improvements",
            self.results.len(),
            self.stats.expansions,
            self.stats.improvements,
        );
        Ok(&self.results)
    }

    /// The paths found by the most recent solve, cheapest first.
    #[inline]
    pub fn results(&self) -> &[StepPath] {
        &self.results
    }

    /// The best path to `p` found by the most recent solve.
    ///
    /// `None` means `p` was not reached: it is over budget, blocked, walled
    /// off, or it is the start position.
    pub fn path_at(&self, p: Position) -> Option<&StepPath> {
        if self.start == Some(p) {
            return None;
        }
        self.best.get(&p)
    }

    fn reset(&mut self) {
        self.start = None;
        self.best.clear();
        self.results.clear();
        self.stack.clear();
        self.heap.clear();
        self.stats = SolveStats::default();
    }

    /// Fold the in-budget, passable neighbours of `path` into `best`, handing
    /// each new or strictly improved one to `mark` in direction order.
    fn relax<A: TryAllowsMovement + ?Sized>(
        &mut self,
        oracle: &A,
        path: &StepPath,
        budget: Decimal,
        mut mark: impl FnMut(StepPath),
    ) -> Result<(), A::Error> {
        self.stats.expansions += 1;
        for n in path.neighbors() {
            if n.distance() > budget {
                continue;
            }
            self.stats.oracle_calls += 1;
            if !oracle.try_is_allowed(n.end())? {
                continue;
            }
            match self.best.get_mut(&n.end()) {
                None => {
                    self.best.insert(n.end(), n.clone());
                }
                Some(existing) if existing.distance() > n.distance() => {
                    log::trace!(
                        "{}: {} improves on {}",
                        n.end(),
                        n.distance(),
                        existing.distance()
                    );
                    self.stats.improvements += 1;
                    *existing = n.clone();
                }
                Some(_) => continue,
            }
            mark(n);
        }
        Ok(())
    }

    fn relax_depth_first<A: TryAllowsMovement + ?Sized>(
        &mut self,
        oracle: &A,
        root: StepPath,
        budget: Decimal,
    ) -> Result<(), A::Error> {
        let mut stack = std::mem::take(&mut self.stack);
        stack.push(root);

        let mut marked = Vec::with_capacity(8);
        let outcome = loop {
            let Some(path) = stack.pop() else {
                break Ok(());
            };
            marked.clear();
            if let Err(e) = self.relax(oracle, &path, budget, |n| marked.push(n)) {
                break Err(e);
            }
            // Reverse so the first marked neighbour is expanded first.
            stack.extend(marked.drain(..).rev());
        };

        stack.clear();
        self.stack = stack;
        outcome
    }

    fn relax_best_first<A: TryAllowsMovement + ?Sized>(
        &mut self,
        oracle: &A,
        root: StepPath,
        budget: Decimal,
    ) -> Result<(), A::Error> {
        let mut heap = std::mem::take(&mut self.heap);
        let mut seq = 0u64;
        heap.push(Frontier {
            distance: root.distance(),
            seq,
            path: root,
        });

        let outcome = loop {
            let Some(Frontier { path, .. }) = heap.pop() else {
                break Ok(());
            };
            // Skip entries superseded by a cheaper path pushed later.
            let stale = self
                .best
                .get(&path.end())
                .is_some_and(|b| b.distance() < path.distance());
            if stale {
                continue;
            }
            let pushed = self.relax(oracle, &path, budget, |n| {
                seq += 1;
                heap.push(Frontier {
                    distance: n.distance(),
                    seq,
                    path: n,
                });
            });
            if let Err(e) = pushed {
                break Err(e);
            }
        };

        heap.clear();
        self.heap = heap;
        outcome
    }
}
