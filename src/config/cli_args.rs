use crate::core::dynamic::DEFAULT_MAX_TABLE_CELLS;
use crate::domain::money::Money;
use crate::domain::ports::{ConfigProvider, ReportFormat, SourceColumns, Strategy};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio-knapsack")]
#[command(about = "Pick the most profitable set of investments that fits a budget")]
pub struct CliConfig {
    /// CSV catalog with a header row
    #[arg(short, long, default_value = "actions.csv")]
    pub input: String,

    /// Budget in currency units, at most two decimals
    #[arg(short, long, default_value = "500")]
    pub budget: String,

    #[arg(short, long, value_enum, default_value_t = Strategy::Dynamic)]
    pub strategy: Strategy,

    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Write the report to this path instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Worker threads for the exhaustive strategy
    #[arg(long, default_value = "1")]
    pub workers: usize,

    /// Upper bound on dynamic programming decision cells (one bit each)
    #[arg(long, default_value_t = DEFAULT_MAX_TABLE_CELLS)]
    pub max_table_cells: u64,

    /// Fail on the first invalid row instead of skipping it
    #[arg(long)]
    pub strict: bool,

    #[arg(long, default_value = "name")]
    pub name_column: String,

    #[arg(long, default_value = "cost")]
    pub cost_column: String,

    #[arg(long, default_value = "profit")]
    pub profit_column: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn budget(&self) -> Result<Money> {
        validation::validate_budget("budget", &self.budget)
    }

    fn strategy(&self) -> Strategy {
        self.strategy
    }

    fn report_format(&self) -> ReportFormat {
        self.format
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_deref()
    }

    fn columns(&self) -> SourceColumns {
        SourceColumns {
            name: self.name_column.clone(),
            cost: self.cost_column.clone(),
            profit: self.profit_column.clone(),
        }
    }

    fn skip_invalid(&self) -> bool {
        !self.strict
    }

    fn workers(&self) -> usize {
        self.workers
    }

    fn max_table_cells(&self) -> u64 {
        self.max_table_cells
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extension("input", &self.input, &["csv"])?;
        validation::validate_budget("budget", &self.budget)?;
        validation::validate_positive_number("workers", self.workers as u64, 1)?;
        validation::validate_positive_number("max_table_cells", self.max_table_cells, 1)?;
        validation::validate_non_empty_string("name_column", &self.name_column)?;
        validation::validate_non_empty_string("cost_column", &self.cost_column)?;
        validation::validate_non_empty_string("profit_column", &self.profit_column)?;
        if let Some(output) = &self.output {
            validation::validate_path("output", output)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["portfolio-knapsack"]);
        assert_eq!(config.input, "actions.csv");
        assert_eq!(config.budget().unwrap(), Money::from_cents(50_000));
        assert_eq!(config.strategy(), Strategy::Dynamic);
        assert!(config.skip_invalid());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = CliConfig::parse_from([
            "portfolio-knapsack",
            "--budget",
            "10.001",
            "--strategy",
            "exhaustive",
        ]);
        assert_eq!(config.strategy(), Strategy::Exhaustive);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["portfolio-knapsack", "--workers", "0"]);
        assert!(config.validate().is_err());

        let config = CliConfig::parse_from(["portfolio-knapsack", "--input", "data.json"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_column_overrides() {
        let config = CliConfig::parse_from([
            "portfolio-knapsack",
            "--name-column",
            "Action",
            "--cost-column",
            "Coût",
            "--profit-column",
            "Bénéfice",
        ]);
        let columns = config.columns();
        assert_eq!(columns.name, "Action");
        assert_eq!(columns.cost, "Coût");
        assert_eq!(columns.profit, "Bénéfice");
        assert!(config.validate().is_ok());
    }
}
