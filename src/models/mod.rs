pub mod supply_chain;
pub mod utils;
