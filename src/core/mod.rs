pub mod dynamic;
pub mod engine;
pub mod exhaustive;
pub mod pipeline;

pub use crate::domain::model::{Catalog, Item, Solution};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Solver, Storage, Strategy};
pub use crate::utils::error::Result;
pub use dynamic::{solve_dynamic, DynamicSolver};
pub use exhaustive::{solve_exhaustive, ExhaustiveSolver};
