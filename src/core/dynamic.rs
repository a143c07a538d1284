use crate::core::{Catalog, Solution, Solver};
use crate::domain::money::{Money, Profit};
use crate::utils::error::{OptimizerError, Result};

/// Decision cells are one bit each, so the default table is 64 MB.
pub const DEFAULT_MAX_TABLE_CELLS: u64 = 512_000_000;

/// One bit per `(i, b)` for `i` in `1..=n`: set when
/// `dp[i][b] == dp[i - 1][b - cost] + profit`.
///
/// Profits themselves only need two rolling rows; the bits are what the
/// backtrack reads.
struct DecisionTable {
    width: usize,
    bits: Vec<u64>,
}

impl DecisionTable {
    fn new(rows: usize, width: usize) -> Self {
        Self {
            width,
            bits: vec![0; (rows * width).div_ceil(64)],
        }
    }

    fn set(&mut self, i: usize, b: usize) {
        let at = (i - 1) * self.width + b;
        self.bits[at / 64] |= 1 << (at % 64);
    }

    fn taken(&self, i: usize, b: usize) -> bool {
        let at = (i - 1) * self.width + b;
        (self.bits[at / 64] >> (at % 64)) & 1 == 1
    }
}

/// Computes row `i` of the profit table from row `i - 1` and records the
/// take decisions for it.
fn fill_row(
    previous: &[u64],
    current: &mut [u64],
    decisions: &mut DecisionTable,
    i: usize,
    cost: usize,
    profit: u64,
) {
    let width = current.len();
    let unreachable = cost.min(width);
    current[..unreachable].copy_from_slice(&previous[..unreachable]);
    for b in cost..width {
        let with = profit + previous[b - cost];
        current[b] = previous[b].max(with);
        if current[b] == with {
            decisions.set(i, b);
        }
    }
}

/// Pseudo-polynomial 0/1 knapsack over budget columns in cents.
///
/// Reconstruction walks back from `(n, B)`: item `i - 1` is taken whenever
/// `dp[i][b] == dp[i - 1][b - cost] + profit`, which includes the case where
/// skipping it would score the same. `max_table_cells` bounds the
/// `n * (B + 1)` decision bits.
#[derive(Debug, Clone, Copy)]
pub struct DynamicSolver {
    max_table_cells: u64,
}

impl Default for DynamicSolver {
    fn default() -> Self {
        Self {
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
        }
    }
}

impl DynamicSolver {
    pub fn new(max_table_cells: u64) -> Self {
        Self { max_table_cells }
    }
}

impl Solver for DynamicSolver {
    fn name(&self) -> &'static str {
        "dynamic"
    }

    fn solve(&self, catalog: &Catalog, budget: Money) -> Result<Solution> {
        let n = catalog.len();
        budget.ensure_non_negative()?;
        if n == 0 || budget.cents() == 0 {
            return Ok(Solution::empty());
        }

        // 超過目錄總成本的欄位與最後一欄相同，不必配置
        let total_cost = catalog.total_cost()?;
        let budget_cents = budget.cents().min(total_cost.cents());

        let cells = n as u128 * (budget_cents as u128 + 1);
        if cells > self.max_table_cells as u128 {
            return Err(OptimizerError::TableTooLarge {
                cells,
                max: self.max_table_cells,
            });
        }

        catalog
            .items()
            .iter()
            .try_fold(Profit::ZERO, |acc, item| acc.checked_add(item.profit()))
            .ok_or_else(|| OptimizerError::ArithmeticOverflow {
                context: "summing catalog profits".to_string(),
            })?;

        // Both fit in usize: the table size bounds them.
        let budget_cents = budget_cents as usize;
        let costs: Vec<usize> = catalog
            .items()
            .iter()
            .map(|item| item.cost().cents() as usize)
            .collect();
        let profits: Vec<u64> = catalog.items().iter().map(|i| i.profit().micros()).collect();

        let width = budget_cents + 1;
        tracing::debug!("Building {}x{} decision table", n, width);

        let mut decisions = DecisionTable::new(n, width);
        let mut previous = vec![0u64; width];
        let mut current = vec![0u64; width];
        for i in 1..=n {
            fill_row(&previous, &mut current, &mut decisions, i, costs[i - 1], profits[i - 1]);
            std::mem::swap(&mut previous, &mut current);
        }
        let best = previous[budget_cents];

        let mut indices = Vec::new();
        let mut b = budget_cents;
        let mut i = n;
        while i >= 1 {
            if decisions.taken(i, b) {
                indices.push(i - 1);
                b -= costs[i - 1];
            }
            i -= 1;
        }
        indices.reverse();

        tracing::debug!(
            "Best profit {} with {} items",
            Profit::from_micros(best),
            indices.len()
        );

        Solution::from_indices(catalog, indices)
    }
}

/// Dynamic programming with the default table size limit.
pub fn solve_dynamic(catalog: &Catalog, budget: Money) -> Result<Solution> {
    DynamicSolver::default().solve(catalog, budget)
}
