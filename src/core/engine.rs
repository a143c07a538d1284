use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct OptimizerEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> OptimizerEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Runs extract, optimize and load in order and returns the rendered report.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting portfolio optimization");

        let catalog = self.pipeline.extract().await?;
        tracing::info!("Loaded {} items", catalog.len());

        let solution = self.pipeline.optimize(catalog).await?;
        tracing::info!(
            "Selected {} items, total cost {}, total profit {}",
            solution.chosen.len(),
            solution.total_cost,
            solution.total_profit
        );

        self.pipeline.load(solution).await
    }
}
