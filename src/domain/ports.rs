use crate::domain::model::{Catalog, Solution};
use crate::domain::money::Money;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Exhaustive,
    #[default]
    Dynamic,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Exhaustive => write!(f, "exhaustive"),
            Strategy::Dynamic => write!(f, "dynamic"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Header names the source loader looks up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceColumns {
    pub name: String,
    pub cost: String,
    pub profit: String,
}

impl Default for SourceColumns {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            cost: "cost".to_string(),
            profit: "profit".to_string(),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn budget(&self) -> Result<Money>;
    fn strategy(&self) -> Strategy;
    fn report_format(&self) -> ReportFormat;
    fn output_path(&self) -> Option<&str>;
    fn columns(&self) -> SourceColumns;
    fn skip_invalid(&self) -> bool;
    fn workers(&self) -> usize;
    fn max_table_cells(&self) -> u64;
}

/// Interchangeable knapsack strategies: pure functions of `(catalog, budget)`.
pub trait Solver: Send + Sync {
    fn name(&self) -> &'static str;
    fn solve(&self, catalog: &Catalog, budget: Money) -> Result<Solution>;
}

pub trait Reporter: Send + Sync {
    fn render(&self, solution: &Solution, budget: Money) -> Result<String>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Catalog>;
    async fn optimize(&self, catalog: Catalog) -> Result<Solution>;
    async fn load(&self, solution: Solution) -> Result<String>;
}
