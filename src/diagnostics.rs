//! Best-effort explanations of why a solve did not succeed. Every check runs on its own:
//! a check that cannot be carried out is logged and the others still run.

use crate::error::DiagnosticUnavailable;
use crate::lp::{ModelDefinition, VarType};
use crate::solver::SolveOutcome;
use derive_more::Display;
use float_ord::FloatOrd;
use log::{info, warn};
use std::cmp::Reverse;

#[derive(Debug, Clone, PartialEq, Display)]
pub enum Finding {
    #[display(fmt = "bound violated: {} = {} not in [{}, {}]", var, value, lb, ub)]
    Bound {
        var: String,
        value: f64,
        lb: f64,
        ub: f64,
    },
    #[display(fmt = "constraint violated: {} by {}", constr, violation)]
    Constraint { constr: String, violation: f64 },
    #[display(fmt = "binary variable {} = {}", var, value)]
    FractionalBinary { var: String, value: f64 },
    #[display(fmt = "in IIS: constraint {}", constr)]
    IisConstraint { constr: String },
    #[display(fmt = "in IIS: {} bound of {}", side, var)]
    IisBound { var: String, side: &'static str },
}

type Check =
    fn(&ModelDefinition, &SolveOutcome, f64) -> Result<Vec<Finding>, DiagnosticUnavailable>;

/// Run every check, logging each finding at `warn`
pub fn diagnose(model: &ModelDefinition, outcome: &SolveOutcome, tolerance: f64) -> Vec<Finding> {
    let checks: [Check; 4] = [
        bound_violations,
        constraint_violations,
        fractional_binaries,
        iis_members,
    ];

    let mut findings = Vec::new();
    for check in checks {
        match check(model, outcome, tolerance) {
            Ok(found) => {
                for finding in &found {
                    warn!("{}", finding);
                }
                findings.extend(found);
            }
            Err(unavailable) => info!("{}", unavailable),
        }
    }
    findings
}

fn candidate<'a>(
    outcome: &'a SolveOutcome,
    diagnostic: &'static str,
) -> Result<&'a [f64], DiagnosticUnavailable> {
    outcome
        .values
        .as_deref()
        .ok_or_else(|| DiagnosticUnavailable {
            diagnostic,
            reason: format!("{} returned no candidate point", outcome.solver),
        })
}

/// Variables whose value lies outside their bounds by more than `tolerance`
pub fn bound_violations(
    model: &ModelDefinition,
    outcome: &SolveOutcome,
    tolerance: f64,
) -> Result<Vec<Finding>, DiagnosticUnavailable> {
    let values = candidate(outcome, "bound check")?;
    Ok(model
        .vars()
        .iter()
        .zip(values)
        .filter(|&(v, &x)| x < v.lb - tolerance || x > v.ub + tolerance)
        .map(|(v, &x)| Finding::Bound {
            var: v.name.clone(),
            value: x,
            lb: v.lb,
            ub: v.ub,
        })
        .collect())
}

/// Constraints violated by more than `tolerance`, largest violation first
pub fn constraint_violations(
    model: &ModelDefinition,
    outcome: &SolveOutcome,
    tolerance: f64,
) -> Result<Vec<Finding>, DiagnosticUnavailable> {
    let values = candidate(outcome, "constraint check")?;
    let mut violated = model.check_feasibility(values, tolerance);
    violated.sort_by_key(|(_, violation)| Reverse(FloatOrd(*violation)));
    Ok(violated
        .into_iter()
        .map(|(c, violation)| Finding::Constraint {
            constr: c.name.clone(),
            violation,
        })
        .collect())
}

/// Binary variables that are not within `tolerance` of 0 or 1
pub fn fractional_binaries(
    model: &ModelDefinition,
    outcome: &SolveOutcome,
    tolerance: f64,
) -> Result<Vec<Finding>, DiagnosticUnavailable> {
    let values = candidate(outcome, "binary check")?;
    Ok(model
        .vars()
        .iter()
        .zip(values)
        .filter(|&(v, &x)| v.vtype == VarType::Binary && x.min(1.0 - x).abs() > tolerance)
        .map(|(v, &x)| Finding::FractionalBinary {
            var: v.name.clone(),
            value: x,
        })
        .collect())
}

/// Constraints and bounds the solver placed in an irreducible infeasible subsystem
pub fn iis_members(
    model: &ModelDefinition,
    outcome: &SolveOutcome,
    _: f64,
) -> Result<Vec<Finding>, DiagnosticUnavailable> {
    let iis = outcome.iis.as_ref().ok_or_else(|| DiagnosticUnavailable {
        diagnostic: "IIS",
        reason: format!("{} does not report an IIS", outcome.solver),
    })?;

    let constrs = iis.constrs.iter().map(|&i| Finding::IisConstraint {
        constr: model.constrs()[i].name.clone(),
    });
    let lower = iis.lower_bounds.iter().map(|&v| Finding::IisBound {
        var: model.var(v).name.clone(),
        side: "lower",
    });
    let upper = iis.upper_bounds.iter().map(|&v| Finding::IisBound {
        var: model.var(v).name.clone(),
        side: "upper",
    });
    Ok(constrs.chain(lower).chain(upper).collect())
}
