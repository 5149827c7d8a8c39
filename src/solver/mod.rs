//! Solver backends. A backend consumes a [`ModelDefinition`] and reports a termination
//! status, and a value for every variable when a solution was found.

#[cfg(feature = "gurobi")]
pub mod gurobi;
pub mod microlp;

use crate::error::{Error, Result};
use crate::lp::{ModelDefinition, Var};
use derive_more::Display;
use log::{debug, info, warn};

/// Tolerance for constraints without variable terms
const CONSTANT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Display)]
pub enum Status {
    #[display(fmt = "optimal")]
    Optimal,
    #[display(fmt = "infeasible")]
    Infeasible,
    #[display(fmt = "unbounded")]
    Unbounded,
    /// Presolve proved there is no optimum, but not which of the two cases holds
    #[display(fmt = "infeasible or unbounded")]
    InfeasibleOrUnbounded,
    /// A solution was found, but it is not proven optimal
    #[display(fmt = "feasible")]
    Feasible,
    #[display(fmt = "{}", _0)]
    Other(String),
}

impl Status {
    /// Whether the solver returns usable variable values with this status
    pub fn has_solution(&self) -> bool {
        matches!(self, Status::Optimal | Status::Feasible)
    }

    /// Whether infeasibility diagnostics and artifacts apply
    pub fn may_be_infeasible(&self) -> bool {
        matches!(self, Status::Infeasible | Status::InfeasibleOrUnbounded)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Wall-clock limit in seconds, for backends that support one
    pub time_limit: Option<f64>,
    /// Suppress the solver's own output
    pub quiet: bool,
}

/// Irreducible infeasible subsystem reported by a solver
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Iis {
    /// Positions in [`ModelDefinition::constrs`]
    pub constrs: Vec<usize>,
    pub lower_bounds: Vec<Var>,
    pub upper_bounds: Vec<Var>,
}

#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Name of the backend that produced the outcome
    pub solver: &'static str,
    pub status: Status,
    pub objective: Option<f64>,
    /// One value per variable, in model order
    pub values: Option<Vec<f64>>,
    /// One dual value per constraint, for pure LPs
    pub duals: Option<Vec<f64>>,
    pub iis: Option<Iis>,
}

impl SolveOutcome {
    pub fn new(solver: &'static str, status: Status) -> SolveOutcome {
        SolveOutcome {
            solver,
            status,
            objective: None,
            values: None,
            duals: None,
            iis: None,
        }
    }

    pub fn with_solution(mut self, objective: f64, values: Vec<f64>) -> SolveOutcome {
        self.objective = Some(objective);
        self.values = Some(values);
        self
    }
}

pub trait Solver {
    fn name(&self) -> &'static str;

    /// Whether the backend can be used in this build and environment
    fn is_available(&self) -> bool;

    fn solve(&self, model: &ModelDefinition, options: &SolveOptions) -> Result<SolveOutcome>;
}

/// Commercial solver first, then the bundled one
pub const DEFAULT_PREFERENCE: &[&str] = &["gurobi", "microlp"];

/// The backend called `name`, if it is compiled in
pub fn solver_by_name(name: &str) -> Option<Box<dyn Solver>> {
    match name {
        #[cfg(feature = "gurobi")]
        "gurobi" => Some(Box::new(gurobi::Gurobi)),
        "microlp" => Some(Box::new(microlp::MicroLp)),
        _ => None,
    }
}

/// The first available backend in `preference`
pub fn select_solver<S: AsRef<str>>(preference: &[S]) -> Result<Box<dyn Solver>> {
    let mut tried = Vec::with_capacity(preference.len());
    for name in preference {
        let name = name.as_ref();
        tried.push(name.to_string());
        match solver_by_name(name) {
            Some(solver) if solver.is_available() => {
                info!("Using solver {}", solver.name());
                return Ok(solver);
            }
            Some(_) => debug!("solver {} is not available", name),
            None => debug!("solver {} is not compiled in", name),
        }
    }
    Err(Error::SolverUnavailable { tried })
}

/// An `Infeasible` outcome if some constraint without variable terms is violated.
/// Such constraints are never handed to a backend.
pub(crate) fn trivially_infeasible(
    solver: &'static str,
    model: &ModelDefinition,
) -> Option<SolveOutcome> {
    let violated: Vec<&str> = model
        .violated_constant_constrs(CONSTANT_TOLERANCE)
        .map(|c| c.name.as_str())
        .collect();
    if violated.is_empty() {
        return None;
    }
    warn!("constraints without variables are violated: {:?}", violated);
    Some(SolveOutcome::new(solver, Status::Infeasible))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn microlp_is_always_selectable() {
        let solver = select_solver(DEFAULT_PREFERENCE).unwrap();
        assert!(solver.is_available());
        assert!(solver_by_name("microlp").is_some());
    }

    #[test]
    fn unknown_solvers_are_reported() {
        match select_solver(&["cplex", "glpk"]) {
            Err(Error::SolverUnavailable { tried }) => assert_eq!(tried, vec!["cplex", "glpk"]),
            Err(e) => panic!("unexpected error {}", e),
            Ok(solver) => panic!("unexpected solver {}", solver.name()),
        }
    }

    #[test]
    fn status_display() {
        assert_eq!(Status::Optimal.to_string(), "optimal");
        assert_eq!(Status::Other("time limit".to_string()).to_string(), "time limit");
        assert!(Status::Feasible.has_solution());
        assert!(!Status::Unbounded.has_solution());
    }

    #[test]
    fn undecided_presolve_counts_as_possibly_infeasible() {
        let status = Status::InfeasibleOrUnbounded;
        assert_eq!(status.to_string(), "infeasible or unbounded");
        assert!(status.may_be_infeasible());
        assert!(!status.has_solution());
        assert!(Status::Infeasible.may_be_infeasible());
        assert!(!Status::Unbounded.may_be_infeasible());
    }
}
