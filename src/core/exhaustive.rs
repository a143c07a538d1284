use crate::core::{Catalog, Solution, Solver};
use crate::domain::money::{Money, Profit};
use crate::utils::error::{OptimizerError, Result};
use rayon::prelude::*;

/// Subsets are encoded as `u64` masks, bit `j` selecting item `j`.
pub const MAX_EXHAUSTIVE_ITEMS: usize = 63;

/// Past this size enumeration still runs but takes a very long time.
pub const PRACTICAL_EXHAUSTIVE_ITEMS: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    profit: u64,
    mask: u64,
}

/// Total order over candidates: higher profit first, then the lower mask.
/// The lower mask is the subset a sequential scan with strict improvement
/// would have found first, so the result does not depend on reduction order.
fn prefer(a: Candidate, b: Candidate) -> Candidate {
    if b.profit > a.profit || (b.profit == a.profit && b.mask < a.mask) {
        b
    } else {
        a
    }
}

/// Cost and profit of one subset, or `None` when it exceeds the budget.
/// Sums cannot overflow: the whole catalog was checked up front.
fn evaluate(costs: &[i64], profits: &[u64], budget: i64, mask: u64) -> Option<Candidate> {
    let mut cost = 0i64;
    let mut profit = 0u64;
    let mut bits = mask;
    while bits != 0 {
        let j = bits.trailing_zeros() as usize;
        cost += costs[j];
        if cost > budget {
            return None;
        }
        profit += profits[j];
        bits &= bits - 1;
    }
    // 0 利潤的子集不取代空解
    (profit > 0).then_some(Candidate { profit, mask })
}

/// Enumerates every non-empty subset and keeps the most profitable feasible one.
///
/// Among equally profitable subsets the one with the lowest mask wins, which
/// is the first one found when masks are enumerated in ascending order. With
/// more than one worker the masks are evaluated on a rayon pool and reduced
/// with the same ordering, so the answer matches the single-threaded scan.
#[derive(Debug, Clone, Copy)]
pub struct ExhaustiveSolver {
    workers: usize,
}

impl Default for ExhaustiveSolver {
    fn default() -> Self {
        Self { workers: 1 }
    }
}

impl ExhaustiveSolver {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    fn search(&self, catalog: &Catalog, budget: Money) -> Result<Option<Candidate>> {
        let n = catalog.len();
        let costs: Vec<i64> = catalog.items().iter().map(|i| i.cost().cents()).collect();
        let profits: Vec<u64> = catalog.items().iter().map(|i| i.profit().micros()).collect();
        let budget = budget.cents();
        let end = 1u64 << n;

        if self.workers == 1 {
            return Ok((1..end)
                .filter_map(|mask| evaluate(&costs, &profits, budget, mask))
                .reduce(prefer));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
            .map_err(|e| OptimizerError::TaskError {
                message: format!("could not start exhaustive search workers: {}", e),
            })?;
        tracing::debug!("Exhaustive search on {} worker threads", pool.current_num_threads());

        Ok(pool.install(|| {
            (1..end)
                .into_par_iter()
                .filter_map(|mask| evaluate(&costs, &profits, budget, mask))
                .reduce_with(prefer)
        }))
    }
}

impl Solver for ExhaustiveSolver {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve(&self, catalog: &Catalog, budget: Money) -> Result<Solution> {
        let n = catalog.len();
        if n > MAX_EXHAUSTIVE_ITEMS {
            return Err(OptimizerError::CatalogTooLarge {
                items: n,
                max: MAX_EXHAUSTIVE_ITEMS,
            });
        }
        budget.ensure_non_negative()?;
        if n == 0 || budget.cents() == 0 {
            return Ok(Solution::empty());
        }
        if n > PRACTICAL_EXHAUSTIVE_ITEMS {
            tracing::warn!(
                "Exhaustive search over {} items evaluates {} subsets, this may take a long time",
                n,
                (1u64 << n) - 1
            );
        }

        // 整體總和不溢位 => 任何子集都不會溢位
        catalog.total_cost()?;
        catalog
            .items()
            .iter()
            .try_fold(Profit::ZERO, |acc, item| acc.checked_add(item.profit()))
            .ok_or_else(|| OptimizerError::ArithmeticOverflow {
                context: "summing catalog profits".to_string(),
            })?;

        let best = self.search(catalog, budget)?;
        let indices = match best {
            Some(candidate) => (0..n).filter(|&j| (candidate.mask >> j) & 1 == 1).collect(),
            None => Vec::new(),
        };
        Solution::from_indices(catalog, indices)
    }
}

/// Exhaustive search on a single thread.
pub fn solve_exhaustive(catalog: &Catalog, budget: Money) -> Result<Solution> {
    ExhaustiveSolver::default().solve(catalog, budget)
}
