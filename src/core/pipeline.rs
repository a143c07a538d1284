use crate::adapters::{parse_catalog, reporter_for};
use crate::core::dynamic::DynamicSolver;
use crate::core::exhaustive::ExhaustiveSolver;
use crate::core::{Catalog, ConfigProvider, Pipeline, Solution, Solver, Storage, Strategy};
use crate::utils::error::{OptimizerError, Result};

pub fn solver_for(strategy: Strategy, workers: usize, max_table_cells: u64) -> Box<dyn Solver> {
    match strategy {
        Strategy::Exhaustive => Box::new(ExhaustiveSolver::new(workers)),
        Strategy::Dynamic => Box::new(DynamicSolver::new(max_table_cells)),
    }
}

/// Loads a catalog from storage, runs the configured solver and renders the result.
pub struct PortfolioPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PortfolioPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PortfolioPipeline<S, C> {
    async fn extract(&self) -> Result<Catalog> {
        tracing::debug!("Reading catalog from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;

        let (catalog, report) =
            parse_catalog(&data, &self.config.columns(), self.config.skip_invalid())?;
        if report.skipped > 0 {
            tracing::info!("Skipped {} invalid rows", report.skipped);
        }
        Ok(catalog)
    }

    async fn optimize(&self, catalog: Catalog) -> Result<Solution> {
        let budget = self.config.budget()?;
        let solver = solver_for(
            self.config.strategy(),
            self.config.workers(),
            self.config.max_table_cells(),
        );
        tracing::debug!(
            "Solving with {} strategy, budget {}, {} items",
            solver.name(),
            budget,
            catalog.len()
        );

        // CPU 密集運算移出 async runtime
        tokio::task::spawn_blocking(move || solver.solve(&catalog, budget))
            .await
            .map_err(|e| OptimizerError::TaskError {
                message: e.to_string(),
            })?
    }

    async fn load(&self, solution: Solution) -> Result<String> {
        let budget = self.config.budget()?;
        let strategy = self.config.strategy().to_string();
        let report = reporter_for(self.config.report_format(), &strategy).render(&solution, budget)?;

        if let Some(path) = self.config.output_path() {
            tracing::debug!("Writing report to: {}", path);
            self.storage.write_file(path, report.as_bytes()).await?;
        }
        Ok(report)
    }
}
