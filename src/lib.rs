pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    engine::OptimizerEngine, pipeline::PortfolioPipeline, solve_dynamic, solve_exhaustive,
    DynamicSolver, ExhaustiveSolver,
};
pub use domain::model::{Catalog, Item, Solution};
pub use domain::money::{Money, Profit, ProfitRate};
pub use domain::ports::{ReportFormat, Solver, Strategy};
pub use utils::error::{OptimizerError, Result};
