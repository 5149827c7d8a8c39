use float_eq::assert_float_eq;
use petroplan::lp::{ModelDefinition, VarType};
use petroplan::models::supply_chain::sets_and_parameters::{Facility, Sets};
use petroplan::problem::{Instance, ParamData};
use petroplan::solver::microlp::MicroLp;
use petroplan::solver::{SolveOptions, SolveOutcome, Solver, Status};
use petroplan::{SupplyChainModel, SupplyChainSolver};

fn solve(instance: &Instance) -> (SupplyChainModel, SolveOutcome) {
    SupplyChainSolver::solve(instance, &MicroLp, &SolveOptions::default()).unwrap()
}

fn value(model: &ModelDefinition, values: &[f64], family: &str, index: &[&str]) -> f64 {
    let var = model.lookup(family, index).unwrap();
    values[var.index()]
}

#[test]
fn base_case_is_solved_optimally() {
    let (model, outcome) = solve(&Instance::base_case());
    assert_eq!(outcome.status, Status::Optimal);

    let results = model.results(&outcome).unwrap();
    let throughput = results.qmo[0][0][0][0];
    assert!(throughput >= 100.0 - 1e-6, "qmo = {}", throughput);
    assert!(throughput <= 400.0 + 1e-6, "qmo = {}", throughput);

    // Only 24 units are demanded domestically, the rest leaves as surplus or overseas sales
    let values = outcome.values.as_ref().unwrap();
    let sold = value(&model.definition, values, "qps", &["p1", "c1", "b1", "SC1", "tp1"]);
    let surplus = value(&model.definition, values, "qsp", &["p1", "c1", "SC1", "tp1"]);
    let backlog = value(&model.definition, values, "qbp", &["p1", "c1", "SC1", "tp1"]);
    assert_float_eq!(sold, 24.0 + surplus - backlog, abs <= 1e-6);
}

#[test]
fn shipped_instance_file_solves_like_the_built_in_one() {
    let shipped = Instance::from_path("data/base_case.json").unwrap();
    let (_, from_file) = solve(&shipped);
    let (_, built_in) = solve(&Instance::base_case());
    assert_eq!(from_file.status, Status::Optimal);
    assert_float_eq!(
        from_file.objective.unwrap(),
        built_in.objective.unwrap(),
        abs <= 1e-6
    );
}

#[test]
fn null_instance_has_zero_objective_and_no_flow() {
    let (model, outcome) = solve(&Instance::single_element("null"));
    assert_eq!(outcome.status, Status::Optimal);
    assert_float_eq!(outcome.objective.unwrap(), 0.0, abs <= 1e-9);

    let values = outcome.values.unwrap();
    for (def, x) in model.definition.vars().iter().zip(&values) {
        if def.vtype == VarType::Continuous {
            assert_float_eq!(*x, 0.0, abs <= 1e-6, "{}", def.name);
        }
    }
}

#[test]
fn solution_conserves_flow() {
    let (model, outcome) = solve(&Instance::base_case());
    let values = outcome.values.unwrap();

    assert!(model.definition.check_feasibility(&values, 1e-6).is_empty());
    for family in ["MaterialBalance", "TerminalBalance", "BaseBalance", "RefineryProductBalance"] {
        let mut count = 0;
        for constr in model.definition.constr_family(family) {
            assert_float_eq!(constr.activity(&values), constr.rhs, abs <= 1e-6, "{}", constr.name);
            count += 1;
        }
        assert!(count > 0, "no {} constraints", family);
    }
}

#[test]
fn surplus_and_backlog_exclude_each_other() {
    let (model, outcome) = solve(&Instance::base_case());
    let results = model.results(&outcome).unwrap();

    let pairs = [
        (&results.iqsp, &results.iqbp, &results.qsp, &results.qbp),
        (&results.iqsp_oc, &results.iqbp_oc, &results.qsp_oc, &results.qbp_oc),
    ];
    for (iqs, iqb, qs, qb) in pairs {
        let flat = |x: &Vec<Vec<Vec<Vec<f64>>>>| {
            x.iter().flatten().flatten().flatten().copied().collect::<Vec<_>>()
        };
        let (iqs, iqb, qs, qb) = (flat(iqs), flat(iqb), flat(qs), flat(qb));
        for i in 0..iqs.len() {
            assert!(iqs[i] + iqb[i] <= 1.0 + 1e-6);
            if iqs[i] < 0.5 {
                assert_float_eq!(qs[i], 0.0, abs <= 1e-6);
            }
            if iqb[i] < 0.5 {
                assert_float_eq!(qb[i], 0.0, abs <= 1e-6);
            }
        }
    }
}

#[test]
fn zero_surplus_limit_forces_zero_surplus() {
    let instance = Instance::base_case().with_param("QSU", ParamData::new(0.0, &[]));
    let (model, outcome) = solve(&instance);
    assert_eq!(outcome.status, Status::Optimal);

    let values = outcome.values.unwrap();
    let surplus = value(&model.definition, &values, "qsp", &["p1", "c1", "SC1", "tp1"]);
    assert_float_eq!(surplus, 0.0, abs <= 1e-6);
}

#[test]
fn first_period_balance_has_no_dangling_reference() {
    let model = SupplyChainSolver::build(&Instance::base_case()).unwrap();
    let balance = model
        .definition
        .constr("MaterialBalance(m1,r1,tp1,SC1)")
        .unwrap();

    let inventories = balance
        .terms
        .iter()
        .map(|(v, _)| model.definition.var(*v))
        .filter(|def| def.name.starts_with("qmsto("))
        .count();
    assert_eq!(inventories, 1);
    for (var, _) in &balance.terms {
        assert!(model.definition.var(*var).index.iter().any(|l| l == "tp1"));
    }
}

#[test]
fn every_facility_resolves_to_nodes() {
    let instance = Instance::base_case();
    let sets = Sets::new(&instance).unwrap();
    for kind in Facility::ALL {
        let facilities = sets.dim(kind.dim());
        for i in facilities.indices() {
            let label = facilities.label(i);
            let origin = sets.topology.origin(label).unwrap();
            let destination = sets.topology.destination(label).unwrap();
            assert_eq!(sets.N.label(sets.origin(kind, i)), origin);
            assert_eq!(sets.NP.label(sets.destination(kind, i)), destination);
        }
    }
}

#[test]
fn infeasible_instance_is_reported_not_raised() {
    // Throughput must reach 100, but only 50 units can be bought
    let limit = ParamData::new(0.0, &[(&["m1", "tp1"][..], 50.0)]);
    let instance = Instance::base_case().with_param("MPU", limit);
    let (model, outcome) = solve(&instance);
    assert_eq!(outcome.status, Status::Infeasible);
    assert!(model.results(&outcome).is_none());
    assert_eq!(MicroLp.name(), outcome.solver);
}

#[test]
fn inventory_carries_over_across_periods_in_every_scenario() {
    let mut instance = Instance::base_case();
    instance.sets.periods.push("tp2".to_string());
    instance.sets.scenarios.push("SC2".to_string());
    let instance = instance.with_param(
        "PROB",
        ParamData::new(0.0, &[(&["SC1"][..], 1.0), (&["SC2"][..], 1.0)]),
    );

    let (model, outcome) = solve(&instance);
    assert_eq!(outcome.status, Status::Optimal);
    let values = outcome.values.unwrap();
    assert!(model.definition.check_feasibility(&values, 1e-6).is_empty());

    let carried = model
        .definition
        .lookup("qpsto", &["p1", "te1", "SC2", "tp1"])
        .unwrap();
    let balance = model
        .definition
        .constr("TerminalBalance(p1,te1,tp2,SC2)")
        .unwrap();
    assert!(balance.terms.contains(&(carried, 1.0)));
    assert_float_eq!(balance.activity(&values), balance.rhs, abs <= 1e-6);

    // Every period and scenario gets its own balance
    assert_eq!(model.definition.constr_family("TerminalBalance").count(), 4);
    assert_eq!(model.definition.constr_family("MaterialBalance").count(), 4);
}
