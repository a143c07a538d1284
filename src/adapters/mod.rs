// Adapters layer: concrete collaborators around the solvers (catalog source, reporting).

pub mod csv_source;
pub mod report;

pub use csv_source::{parse_catalog, LoadReport};
pub use report::{reporter_for, JsonReporter, SolutionReport, TextReporter};
