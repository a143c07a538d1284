use crate::core::dynamic::DEFAULT_MAX_TABLE_CELLS;
use crate::domain::money::Money;
use crate::domain::ports::{ConfigProvider, ReportFormat, SourceColumns, Strategy};
use crate::utils::error::{OptimizerError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub optimizer: OptimizerConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub budget: String,
    #[serde(default)]
    pub strategy: Strategy,
    pub workers: Option<usize>,
    pub max_table_cells: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    #[serde(default)]
    pub columns: SourceColumns,
    pub skip_invalid: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,
    pub output_path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OptimizerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OptimizerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BUDGET})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OptimizerError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_file_extension("source.path", &self.source.path, &["csv"])?;
        validation::validate_budget("optimizer.budget", &self.optimizer.budget)?;

        if let Some(workers) = self.optimizer.workers {
            validation::validate_positive_number("optimizer.workers", workers as u64, 1)?;
        }
        if let Some(cells) = self.optimizer.max_table_cells {
            validation::validate_positive_number("optimizer.max_table_cells", cells, 1)?;
        }

        validation::validate_non_empty_string("source.columns.name", &self.source.columns.name)?;
        validation::validate_non_empty_string("source.columns.cost", &self.source.columns.cost)?;
        validation::validate_non_empty_string("source.columns.profit", &self.source.columns.profit)?;

        if let Some(output) = &self.report.output_path {
            validation::validate_path("report.output_path", output)?;
        }
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn budget(&self) -> Result<Money> {
        validation::validate_budget("optimizer.budget", &self.optimizer.budget)
    }

    fn strategy(&self) -> Strategy {
        self.optimizer.strategy
    }

    fn report_format(&self) -> ReportFormat {
        self.report.format
    }

    fn output_path(&self) -> Option<&str> {
        self.report.output_path.as_deref()
    }

    fn columns(&self) -> SourceColumns {
        self.source.columns.clone()
    }

    fn skip_invalid(&self) -> bool {
        self.source.skip_invalid.unwrap_or(true)
    }

    fn workers(&self) -> usize {
        self.optimizer.workers.unwrap_or(1)
    }

    fn max_table_cells(&self) -> u64 {
        self.optimizer.max_table_cells.unwrap_or(DEFAULT_MAX_TABLE_CELLS)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[optimizer]
budget = "500"
strategy = "exhaustive"
workers = 4

[source]
path = "data/actions.csv"

[source.columns]
name = "Action"

[report]
format = "json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.strategy(), Strategy::Exhaustive);
        assert_eq!(config.workers(), 4);
        assert_eq!(config.report_format(), ReportFormat::Json);
        assert_eq!(config.columns().name, "Action");
        assert_eq!(config.columns().cost, "cost");
        assert_eq!(config.max_table_cells(), DEFAULT_MAX_TABLE_CELLS);
        assert!(config.skip_invalid());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PORTFOLIO_TEST_BUDGET", "123.45");

        let toml_content = r#"
[optimizer]
budget = "${PORTFOLIO_TEST_BUDGET}"

[source]
path = "actions.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.budget().unwrap(), Money::from_cents(12_345));

        std::env::remove_var("PORTFOLIO_TEST_BUDGET");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[optimizer]
budget = "-10"

[source]
path = "actions.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_strategy_fails_to_parse() {
        let toml_content = r#"
[optimizer]
budget = "10"
strategy = "greedy"

[source]
path = "actions.csv"
"#;
        assert!(TomlConfig::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[optimizer]
budget = "500"

[source]
path = "actions.csv"
skip_invalid = false
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.strategy(), Strategy::Dynamic);
        assert!(!config.skip_invalid());
    }
}
