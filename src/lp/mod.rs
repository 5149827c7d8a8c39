//! Solver-agnostic representation of linear and mixed-integer programs.
//!
//! Models are assembled with [`Model`] and frozen into a [`ModelDefinition`],
//! which is what solver backends consume.

pub mod expr;
pub mod lp_format;
pub mod model;

pub use expr::{LinExpr, Var};
pub use model::{
    eq, ge, le, Constr, IneqExpr, Model, ModelDefinition, ModelSense, Sense, VarDef, VarFamily,
    VarType,
};
