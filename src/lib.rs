pub mod diagnostics;
pub mod error;
pub mod lp;
pub mod models;
pub mod problem;
pub mod report;
pub mod solver;

pub use error::{Error, Result};
pub use models::supply_chain::{SupplyChainModel, SupplyChainSolver};
