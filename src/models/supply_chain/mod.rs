pub mod constraints;
pub mod model;
pub mod objective;
pub mod sets_and_parameters;
pub mod topology;
pub mod variables;

pub use model::{SupplyChainModel, SupplyChainSolver};
