use crate::domain::model::Solution;
use crate::domain::money::Money;
use crate::domain::ports::{ReportFormat, Reporter};
use crate::utils::error::{OptimizerError, Result};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ReportItem {
    pub name: String,
    pub cost: String,
    pub profit_rate: String,
    pub profit: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolutionReport {
    pub strategy: String,
    pub budget: String,
    pub total_cost: String,
    pub total_profit: String,
    pub remaining: String,
    pub items: Vec<ReportItem>,
}

impl SolutionReport {
    pub fn new(strategy: &str, solution: &Solution, budget: Money) -> Result<Self> {
        let remaining = budget
            .checked_sub(solution.total_cost)
            .ok_or_else(|| OptimizerError::ArithmeticOverflow {
                context: "computing the remaining budget".to_string(),
            })?;

        Ok(Self {
            strategy: strategy.to_string(),
            budget: budget.to_string(),
            total_cost: solution.total_cost.to_string(),
            total_profit: solution.total_profit.to_string(),
            remaining: remaining.to_string(),
            items: solution
                .chosen
                .iter()
                .map(|item| ReportItem {
                    name: item.name().to_string(),
                    cost: item.cost().to_string(),
                    profit_rate: item.profit_rate().to_string(),
                    profit: item.profit().to_string(),
                })
                .collect(),
        })
    }
}

pub struct TextReporter {
    strategy: String,
}

impl TextReporter {
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
        }
    }
}

impl Reporter for TextReporter {
    fn render(&self, solution: &Solution, budget: Money) -> Result<String> {
        let report = SolutionReport::new(&self.strategy, solution, budget)?;
        let width = report
            .items
            .iter()
            .map(|i| i.name.len())
            .max()
            .unwrap_or(0)
            .max("Item".len());

        let mut lines = vec![format!(
            "Selected items ({} strategy, budget {}):",
            report.strategy, report.budget
        )];
        if report.items.is_empty() {
            lines.push("  (none)".to_string());
        } else {
            lines.push(format!(
                "  {:<width$}  {:>12}  {:>8}  {:>12}",
                "Item",
                "Cost",
                "Rate %",
                "Profit",
                width = width
            ));
            for item in &report.items {
                lines.push(format!(
                    "  {:<width$}  {:>12}  {:>8}  {:>12}",
                    item.name,
                    item.cost,
                    item.profit_rate,
                    item.profit,
                    width = width
                ));
            }
        }
        lines.push(String::new());
        lines.push(format!("Total cost:   {}", report.total_cost));
        lines.push(format!("Total profit: {}", report.total_profit));
        lines.push(format!("Remaining:    {}", report.remaining));

        Ok(lines.join("\n"))
    }
}

pub struct JsonReporter {
    strategy: String,
}

impl JsonReporter {
    pub fn new(strategy: impl Into<String>) -> Self {
        Self {
            strategy: strategy.into(),
        }
    }
}

impl Reporter for JsonReporter {
    fn render(&self, solution: &Solution, budget: Money) -> Result<String> {
        let report = SolutionReport::new(&self.strategy, solution, budget)?;
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

pub fn reporter_for(format: ReportFormat, strategy: &str) -> Box<dyn Reporter> {
    match format {
        ReportFormat::Text => Box::new(TextReporter::new(strategy)),
        ReportFormat::Json => Box::new(JsonReporter::new(strategy)),
    }
}
