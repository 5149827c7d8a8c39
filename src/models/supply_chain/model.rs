use super::constraints::add_constraints;
use super::objective::expected_profit;
use super::sets_and_parameters::{Parameters, Sets};
use super::variables::{SupplyChainResults, Variables};
use crate::error::{ConstructionError, Result};
use crate::lp::{Model, ModelDefinition, ModelSense};
use crate::problem::Instance;
use crate::solver::{SolveOptions, SolveOutcome, Solver};
use log::info;

/// A built supply chain model together with the data it was built from
pub struct SupplyChainModel {
    pub sets: Sets,
    pub parameters: Parameters,
    pub variables: Variables,
    pub definition: ModelDefinition,
}

impl SupplyChainModel {
    /// Values of the main families, if the outcome carries a solution
    pub fn results(&self, outcome: &SolveOutcome) -> Option<SupplyChainResults> {
        let values = outcome.values.as_ref()?;
        let objective = outcome.objective?;
        Some(SupplyChainResults::new(&self.variables, objective, values))
    }
}

pub struct SupplyChainSolver {}

impl SupplyChainSolver {
    pub fn build(instance: &Instance) -> std::result::Result<SupplyChainModel, ConstructionError> {
        info!("Building supply chain model.");

        let sets = Sets::new(instance)?;
        let parameters = Parameters::new(instance, &sets)?;

        let mut model = Model::new(&instance.name);
        let variables = Variables::new(&mut model, &sets)?;
        add_constraints(&mut model, &sets, &parameters, &variables);
        model.set_objective(
            expected_profit(&sets, &parameters, &variables),
            ModelSense::Maximize,
        );

        info!(
            "Successfully built supply chain model with {} variables and {} constraints",
            model.num_vars(),
            model.num_constrs()
        );

        Ok(SupplyChainModel {
            sets,
            parameters,
            variables,
            definition: model.finish(),
        })
    }

    pub fn solve(
        instance: &Instance,
        solver: &dyn Solver,
        options: &SolveOptions,
    ) -> Result<(SupplyChainModel, SolveOutcome)> {
        let model = SupplyChainSolver::build(instance)?;
        let outcome = solver.solve(&model.definition, options)?;
        info!("Solver {} reports {}", outcome.solver, outcome.status);
        Ok((model, outcome))
    }
}
