use super::{trivially_infeasible, Iis, SolveOptions, SolveOutcome, Solver, Status};
use crate::error::Result;
use crate::lp::{ModelDefinition, ModelSense, Sense, Var, VarType};
use grb::prelude::*;
use log::{debug, info};

/// Gurobi through `grb`. Available when an environment (and so a licence) can be created.
pub struct Gurobi;

/// Any termination other than a proof (time or node limit, interruption, ...) counts as
/// `Feasible` when an incumbent exists.
fn status(status: grb::Status, solutions: i32) -> Status {
    match status {
        grb::Status::Optimal => Status::Optimal,
        grb::Status::Infeasible => Status::Infeasible,
        grb::Status::Unbounded => Status::Unbounded,
        grb::Status::InfOrUnbd => Status::InfeasibleOrUnbounded,
        _ if solutions > 0 => Status::Feasible,
        other => Status::Other(format!("{:?}", other)),
    }
}

impl Gurobi {
    fn iis(
        model: &mut Model,
        vars: &[grb::Var],
        constrs: &[Option<grb::Constr>],
    ) -> grb::Result<Iis> {
        model.compute_iis()?;
        let mut iis = Iis::default();
        for (i, c) in constrs.iter().enumerate() {
            if let Some(c) = c {
                if model.get_obj_attr(attr::IISConstr, c)? > 0 {
                    iis.constrs.push(i);
                }
            }
        }
        for (i, v) in vars.iter().enumerate() {
            if model.get_obj_attr(attr::IISLB, v)? > 0 {
                iis.lower_bounds.push(Var(i));
            }
            if model.get_obj_attr(attr::IISUB, v)? > 0 {
                iis.upper_bounds.push(Var(i));
            }
        }
        Ok(iis)
    }
}

impl Solver for Gurobi {
    fn name(&self) -> &'static str {
        "gurobi"
    }

    fn is_available(&self) -> bool {
        match Env::new("") {
            Ok(_) => true,
            Err(e) => {
                debug!("gurobi environment could not be created: {:?}", e);
                false
            }
        }
    }

    fn solve(&self, definition: &ModelDefinition, options: &SolveOptions) -> Result<SolveOutcome> {
        if let Some(outcome) = trivially_infeasible(self.name(), definition) {
            return Ok(outcome);
        }

        let env = Env::new("")?;
        let mut model = Model::with_env(definition.name(), &env)?;
        if options.quiet {
            model.set_param(param::OutputFlag, 0)?;
        }
        if let Some(limit) = options.time_limit {
            model.set_param(param::TimeLimit, limit)?;
        }

        let vars = definition
            .vars()
            .iter()
            .map(|v| {
                let vtype = match v.vtype {
                    VarType::Continuous => grb::VarType::Continuous,
                    VarType::Binary => grb::VarType::Binary,
                };
                model.add_var(&v.name, vtype, 0.0, v.lb, v.ub, std::iter::empty())
            })
            .collect::<grb::Result<Vec<grb::Var>>>()?;

        let expr = |terms: &[(Var, f64)], constant: f64| {
            let mut lin = grb::expr::LinExpr::new();
            for (var, coeff) in terms {
                lin.add_term(*coeff, vars[var.index()]);
            }
            lin.add_constant(constant);
            Expr::from(lin)
        };

        // None for constraints without variables, which are not passed on
        let mut constrs = Vec::with_capacity(definition.constrs().len());
        for constr in definition.constrs() {
            if constr.terms.is_empty() {
                constrs.push(None);
                continue;
            }
            let lhs = expr(&constr.terms, 0.0);
            let rhs = constr.rhs;
            let added = match constr.sense {
                Sense::Eq => model.add_constr(&constr.name, c!(lhs == rhs))?,
                Sense::Le => model.add_constr(&constr.name, c!(lhs <= rhs))?,
                Sense::Ge => model.add_constr(&constr.name, c!(lhs >= rhs))?,
            };
            constrs.push(Some(added));
        }

        let objective = definition.objective();
        let sense = match definition.sense() {
            ModelSense::Maximize => grb::ModelSense::Maximize,
            ModelSense::Minimize => grb::ModelSense::Minimize,
        };
        model.set_objective(expr(&objective.compacted(), objective.constant_term()), sense)?;
        model.update()?;

        model.optimize()?;
        let mut raw = model.status()?;
        if raw == grb::Status::InfOrUnbd {
            info!("gurobi returned INF_OR_UNBD, resolving without dual reductions");
            model.set_param(param::DualReductions, 0)?;
            model.optimize()?;
            raw = model.status()?;
        }
        let status = status(raw, model.get_attr(attr::SolCount)?);
        info!("gurobi finished with status {}", status);
        let mut outcome = SolveOutcome::new(self.name(), status.clone());

        if status.has_solution() {
            let values = vars
                .iter()
                .map(|v| model.get_obj_attr(attr::X, v))
                .collect::<grb::Result<Vec<f64>>>()?;
            outcome = outcome.with_solution(model.get_attr(attr::ObjVal)?, values);

            if status == Status::Optimal && !definition.is_mip() {
                let duals = constrs
                    .iter()
                    .map(|c| match c {
                        Some(c) => model.get_obj_attr(attr::Pi, c),
                        None => Ok(0.0),
                    })
                    .collect::<grb::Result<Vec<f64>>>()?;
                outcome.duals = Some(duals);
            }
        }

        if status.may_be_infeasible() {
            match Self::iis(&mut model, &vars, &constrs) {
                Ok(iis) => outcome.iis = Some(iis),
                Err(e) => info!("no IIS available from gurobi: {:?}", e),
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limits_with_an_incumbent_are_feasible() {
        assert_eq!(status(grb::Status::TimeLimit, 1), Status::Feasible);
        assert_eq!(status(grb::Status::NodeLimit, 3), Status::Feasible);
        assert_eq!(status(grb::Status::SubOptimal, 1), Status::Feasible);
        assert_eq!(status(grb::Status::TimeLimit, 0), Status::Other("TimeLimit".to_string()));
    }

    #[test]
    fn proofs_do_not_depend_on_incumbents() {
        assert_eq!(status(grb::Status::Optimal, 1), Status::Optimal);
        assert_eq!(status(grb::Status::Infeasible, 0), Status::Infeasible);
        assert_eq!(status(grb::Status::Unbounded, 0), Status::Unbounded);
        assert_eq!(status(grb::Status::InfOrUnbd, 0), Status::InfeasibleOrUnbounded);
        assert!(status(grb::Status::InfOrUnbd, 0).may_be_infeasible());
    }
}
