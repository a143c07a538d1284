// Domain layer: fixed-point amounts, catalog/solution models and the ports the adapters implement.

pub mod model;
pub mod money;
pub mod ports;
