use super::{trivially_infeasible, SolveOptions, SolveOutcome, Solver, Status};
use crate::error::Result;
use crate::lp::{ModelDefinition, ModelSense, Sense, Var, VarDef, VarType};
use good_lp::solvers::microlp::microlp;
use good_lp::variable::VariableDefinition;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use log::{debug, info};

/// Pure Rust simplex and branch-and-bound, through `good_lp`. Always available.
pub struct MicroLp;

fn definition(var: &VarDef) -> VariableDefinition {
    match var.vtype {
        VarType::Binary => variable().binary(),
        VarType::Continuous => {
            let mut def = variable();
            if var.lb.is_finite() {
                def = def.min(var.lb);
            }
            if var.ub.is_finite() {
                def = def.max(var.ub);
            }
            def
        }
    }
}

fn expression(terms: &[(Var, f64)], constant: f64, handles: &[Variable]) -> Expression {
    let mut expr = Expression::from(constant);
    for (var, coeff) in terms {
        expr += *coeff * handles[var.index()];
    }
    expr
}

impl Solver for MicroLp {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn solve(&self, model: &ModelDefinition, options: &SolveOptions) -> Result<SolveOutcome> {
        if let Some(outcome) = trivially_infeasible(self.name(), model) {
            return Ok(outcome);
        }
        if let Some(limit) = options.time_limit {
            info!("microlp does not support a time limit, ignoring {}s", limit);
        }

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model.vars().iter().map(|v| vars.add(definition(v))).collect();

        let objective = model.objective();
        let objective = expression(&objective.compacted(), objective.constant_term(), &handles);
        let unsolved = match model.sense() {
            ModelSense::Maximize => vars.maximise(objective),
            ModelSense::Minimize => vars.minimise(objective),
        };
        let mut problem = unsolved.using(microlp);

        let mut count = 0;
        for constr in model.constrs().iter().filter(|c| !c.terms.is_empty()) {
            let lhs = expression(&constr.terms, 0.0, &handles);
            let row = match constr.sense {
                Sense::Eq => constraint::eq(lhs, constr.rhs),
                Sense::Le => constraint::leq(lhs, constr.rhs),
                Sense::Ge => constraint::geq(lhs, constr.rhs),
            };
            problem = problem.with(row);
            count += 1;
        }
        debug!("microlp: {} variables, {} constraints", handles.len(), count);

        let outcome = match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = handles.iter().map(|v| solution.value(*v)).collect();
                let objective = model.objective().evaluate(&values);
                SolveOutcome::new(self.name(), Status::Optimal).with_solution(objective, values)
            }
            Err(ResolutionError::Infeasible) => SolveOutcome::new(self.name(), Status::Infeasible),
            Err(ResolutionError::Unbounded) => SolveOutcome::new(self.name(), Status::Unbounded),
            Err(other) => SolveOutcome::new(self.name(), Status::Other(other.to_string())),
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::{ge, le, Model};
    use float_eq::assert_float_eq;

    #[test]
    fn solves_a_small_mip() {
        // max 2x + 3y s.t. x + y <= 4.5 with y binary
        let mut model = Model::new("small");
        let f = model.add_family("x", &["I"]);
        let x = model.add_var(f, &["a"], VarType::Continuous, 0.0, f64::INFINITY).unwrap();
        let y = model.add_var(f, &["b"], VarType::Binary, 0.0, 1.0).unwrap();
        model.add_constr("cap", le(x + y, 4.5));
        model.set_objective(2.0 * x + 3.0 * y, ModelSense::Maximize);
        let model = model.finish();

        let outcome = MicroLp.solve(&model, &SolveOptions::default()).unwrap();
        assert_eq!(outcome.status, Status::Optimal);
        let values = outcome.values.unwrap();
        assert_float_eq!(values[y.index()], 1.0, abs <= 1e-6);
        assert_float_eq!(values[x.index()], 3.5, abs <= 1e-6);
        assert_float_eq!(outcome.objective.unwrap(), 10.0, abs <= 1e-6);
    }

    #[test]
    fn reports_infeasibility() {
        let mut model = Model::new("bad");
        let f = model.add_family("x", &["I"]);
        let x = model.add_var(f, &["a"], VarType::Continuous, 0.0, f64::INFINITY).unwrap();
        model.add_constr("low", ge(x, 5.0));
        model.add_constr("high", le(x, 2.0));
        model.set_objective(x, ModelSense::Maximize);

        let outcome = MicroLp.solve(&model.finish(), &SolveOptions::default()).unwrap();
        assert_eq!(outcome.status, Status::Infeasible);
        assert!(outcome.values.is_none());
    }

    #[test]
    fn violated_constant_constraint_is_infeasible() {
        let mut model = Model::new("constant");
        let f = model.add_family("x", &["I"]);
        let x = model.add_var(f, &["a"], VarType::Continuous, 0.0, 1.0).unwrap();
        model.add_constr("impossible", ge(0.0 * x, 3.0));
        model.set_objective(x, ModelSense::Maximize);

        let outcome = MicroLp.solve(&model.finish(), &SolveOptions::default()).unwrap();
        assert_eq!(outcome.status, Status::Infeasible);
    }
}
