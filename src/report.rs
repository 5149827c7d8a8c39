//! Human readable and JSON renditions of a solve outcome.

use crate::error::Result;
use crate::lp::ModelDefinition;
use crate::solver::{SolveOutcome, Status};
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Values with an absolute value at or below this are not reported
pub const DEFAULT_THRESHOLD: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub index: Vec<String>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonReport {
    pub status: String,
    pub objective: Option<f64>,
    pub variables: BTreeMap<String, Vec<Entry>>,
}

pub struct Report<'a> {
    model: &'a ModelDefinition,
    outcome: &'a SolveOutcome,
    threshold: f64,
}

impl<'a> Report<'a> {
    pub fn new(model: &'a ModelDefinition, outcome: &'a SolveOutcome) -> Report<'a> {
        Report {
            model,
            outcome,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Report<'a> {
        self.threshold = threshold;
        self
    }

    /// Values are only trusted for statuses that carry a solution
    fn values(&self) -> Option<&'a [f64]> {
        match self.outcome.status.has_solution() {
            true => self.outcome.values.as_deref(),
            false => None,
        }
    }

    /// Non-trivial values per family, in family declaration order. Families without any are
    /// left out.
    pub fn nonzero(&self) -> Vec<(&'a str, Vec<Entry>)> {
        let values = match self.values() {
            Some(values) => values,
            None => return Vec::new(),
        };

        self.model
            .families()
            .iter()
            .filter_map(|family| {
                let entries = family
                    .vars
                    .iter()
                    .filter(|v| values[v.index()].abs() > self.threshold)
                    .map(|&v| Entry {
                        index: self.model.var(v).index.clone(),
                        value: values[v.index()],
                    })
                    .collect::<Vec<_>>();
                match entries.is_empty() {
                    true => None,
                    false => Some((family.name.as_str(), entries)),
                }
            })
            .collect()
    }

    pub fn json(&self) -> JsonReport {
        JsonReport {
            status: self.outcome.status.to_string(),
            objective: self.values().and(self.outcome.objective),
            variables: self
                .nonzero()
                .into_iter()
                .map(|(family, entries)| (family.to_string(), entries))
                .collect(),
        }
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &self.json())?;
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome.status {
            Status::Optimal => writeln!(f, "Model solved optimally.")?,
            Status::Infeasible => writeln!(f, "Model is infeasible.")?,
            other => writeln!(f, "Model status: {}", other)?,
        }

        if self.outcome.status == Status::Feasible && self.values().is_some() {
            writeln!(f, "The reported solution is feasible but not proven optimal.")?;
        }
        if let (Some(objective), Some(_)) = (self.outcome.objective, self.values()) {
            writeln!(f, "Objective: {:.4}", objective)?;
        }

        for (family, entries) in self.nonzero() {
            writeln!(f, "\nVariable {}:", family)?;
            for entry in entries {
                writeln!(f, "  ({}): {:.4}", entry.index.iter().join(", "), entry.value)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::{le, Model, ModelSense, VarType};

    fn model() -> ModelDefinition {
        let mut model = Model::new("t");
        let x = model.add_family("x", &["I", "J"]);
        let a = model.add_var(x, &["a", "1"], VarType::Continuous, 0.0, 10.0).unwrap();
        model.add_var(x, &["b", "1"], VarType::Continuous, 0.0, 10.0).unwrap();
        let y = model.add_family("y", &["I"]);
        model.add_var(y, &["a"], VarType::Binary, 0.0, 1.0).unwrap();
        model.add_constr("cap", le(a, 10.0));
        model.set_objective(a, ModelSense::Maximize);
        model.finish()
    }

    #[test]
    fn optimal_outcome_lists_nonzero_values() {
        let model = model();
        let outcome =
            SolveOutcome::new("test", Status::Optimal).with_solution(2.5, vec![2.5, 1e-9, 0.0]);
        let text = Report::new(&model, &outcome).to_string();
        assert_eq!(
            text,
            "Model solved optimally.\nObjective: 2.5000\n\nVariable x:\n  (a, 1): 2.5000\n"
        );
    }

    #[test]
    fn infeasible_outcome_has_no_values() {
        let model = model();
        let mut outcome = SolveOutcome::new("test", Status::Infeasible);
        outcome.values = Some(vec![1.0, 1.0, 1.0]);
        let report = Report::new(&model, &outcome);
        assert_eq!(report.to_string(), "Model is infeasible.\n");
        assert!(report.nonzero().is_empty());
    }

    #[test]
    fn feasible_values_are_caveated() {
        let model = model();
        let outcome =
            SolveOutcome::new("test", Status::Feasible).with_solution(1.0, vec![1.0, 0.0, 1.0]);
        let text = Report::new(&model, &outcome).to_string();
        assert!(text.starts_with(
            "Model status: feasible\nThe reported solution is feasible but not proven optimal.\n"
        ));
        assert!(text.contains("\nVariable y:\n  (a): 1.0000\n"));
    }

    #[test]
    fn json_groups_values_by_family() {
        let model = model();
        let outcome =
            SolveOutcome::new("test", Status::Optimal).with_solution(3.0, vec![2.0, 0.0, 1.0]);
        let json = serde_json::to_value(Report::new(&model, &outcome).json()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "status": "optimal",
                "objective": 3.0,
                "variables": {
                    "x": [{ "index": ["a", "1"], "value": 2.0 }],
                    "y": [{ "index": ["a"], "value": 1.0 }],
                }
            })
        );
    }
}
