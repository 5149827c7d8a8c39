use super::sets_and_parameters::{Parameters, Sets};
use super::variables::Variables;
use crate::lp::{LinExpr, Var};
use itertools::iproduct;

fn add(expr: &mut LinExpr, coeff: f64, var: Var) {
    if coeff != 0.0 {
        expr.add_term(coeff, var);
    }
}

/// Expected profit: weighted revenue minus every cost term. Materials are bought before the
/// scenario is known, so their purchase and transport costs are not weighted.
pub fn expected_profit(sets: &Sets, parameters: &Parameters, variables: &Variables) -> LinExpr {
    revenue(sets, parameters, variables)
        - material_purchase(sets, parameters, variables)
        - material_transport(sets, parameters, variables)
        - carbon_tax(sets, parameters, variables)
        - scenario_costs(sets, parameters, variables)
}

/// Weighted sales to domestic and overseas customers
pub fn revenue(sets: &Sets, parameters: &Parameters, variables: &Variables) -> LinExpr {
    let mut expr = LinExpr::new();
    for sc in sets.SC.indices() {
        let weight = parameters.PROB.at(&[sc]);
        for (p, oc, te, tp) in iproduct!(
            sets.P.indices(),
            sets.OC.indices(),
            sets.TE.indices(),
            sets.TP.indices()
        ) {
            let price = parameters.PUP.at(&[p, te, sc, tp]);
            add(&mut expr, weight * price, variables.qps_oc[p][oc][te][sc][tp]);
        }
        for (p, c, b, tp) in iproduct!(
            sets.P.indices(),
            sets.C.indices(),
            sets.B.indices(),
            sets.TP.indices()
        ) {
            let price = parameters.PUP_b.at(&[p, b, sc, tp]);
            add(&mut expr, weight * price, variables.qps[p][c][b][sc][tp]);
        }
    }
    expr
}

/// Weighted operating costs: refinery operation, holding, product transport, extra purchases,
/// surplus and backlog penalties
pub fn scenario_costs(sets: &Sets, parameters: &Parameters, variables: &Variables) -> LinExpr {
    let mut expr = LinExpr::new();
    let v = variables;
    for sc in sets.SC.indices() {
        let w = parameters.PROB.at(&[sc]);

        for (r, m, tp) in iproduct!(sets.R.indices(), sets.M.indices(), sets.TP.indices()) {
            add(&mut expr, w * parameters.ROUP.at(&[r, m, tp]), v.qmo[r][m][sc][tp]);
            add(&mut expr, w * parameters.IVUP.at(&[m, r, tp]), v.qmsto[m][r][sc][tp]);
        }

        for (p, te, tp) in iproduct!(sets.P.indices(), sets.TE.indices(), sets.TP.indices()) {
            add(&mut expr, w * parameters.IVUP_te.at(&[p, te, tp]), v.qpsto[p][te][sc][tp]);
            add(&mut expr, w * parameters.EPUP.at(&[p, te, tp]), v.qepp[p][te][sc][tp]);
        }

        for (p, b, tp) in iproduct!(sets.P.indices(), sets.B.indices(), sets.TP.indices()) {
            add(&mut expr, w * parameters.IVUP_b.at(&[p, b, tp]), v.qpsto_b[p][b][sc][tp]);
        }

        for (p, n, np, tr, tp) in iproduct!(
            sets.P.indices(),
            sets.N.indices(),
            sets.NP.indices(),
            sets.TR.indices(),
            sets.TP.indices()
        ) {
            let cost = parameters.PTUP.at(&[p, n, np, tr, tp]) * parameters.DIS.at(&[n, np]);
            add(&mut expr, w * cost, v.qptr[p][n][np][tr][sc][tp]);
        }

        for (p, tp) in iproduct!(sets.P.indices(), sets.TP.indices()) {
            let surplus = w * parameters.SUR.at(&[p, tp]);
            let backlog = w * parameters.BCK.at(&[p, tp]);
            for c in sets.C.indices() {
                add(&mut expr, surplus, v.qsp[p][c][sc][tp]);
                add(&mut expr, backlog, v.qbp[p][c][sc][tp]);
            }
            for oc in sets.OC.indices() {
                add(&mut expr, surplus, v.qsp_oc[p][oc][sc][tp]);
                add(&mut expr, backlog, v.qbp_oc[p][oc][sc][tp]);
            }
        }
    }
    expr
}

pub fn material_purchase(sets: &Sets, parameters: &Parameters, variables: &Variables) -> LinExpr {
    let mut expr = LinExpr::new();
    for (m, r, tp) in iproduct!(sets.M.indices(), sets.R.indices(), sets.TP.indices()) {
        for te in sets.TE.indices() {
            add(&mut expr, parameters.MUP.at(&[m, te, tp]), variables.qmp[m][te][r][tp]);
        }
        for of in sets.OF.indices() {
            add(&mut expr, parameters.MUP_of.at(&[m, of, tp]), variables.qmp_of[m][of][r][tp]);
        }
    }
    expr
}

pub fn material_transport(sets: &Sets, parameters: &Parameters, variables: &Variables) -> LinExpr {
    let mut expr = LinExpr::new();
    for (m, n, np, tr, tp) in iproduct!(
        sets.M.indices(),
        sets.N.indices(),
        sets.NP.indices(),
        sets.TR.indices(),
        sets.TP.indices()
    ) {
        let cost = parameters.MTUP.at(&[m, n, np, tr, tp]) * parameters.DIS.at(&[n, np]);
        add(&mut expr, cost, variables.qmtr[m][n][np][tr][tp]);
    }
    expr
}

/// Tax on the emissions of material transport, refinery throughput and product transport.
/// Emission factors are non-negative, so the tax grows with both emissions and rate.
pub fn carbon_tax(sets: &Sets, parameters: &Parameters, variables: &Variables) -> LinExpr {
    let mut expr = LinExpr::new();
    let tax = parameters.TAXC;

    for (m, n, np, tr, tp) in iproduct!(
        sets.M.indices(),
        sets.N.indices(),
        sets.NP.indices(),
        sets.TR.indices(),
        sets.TP.indices()
    ) {
        let emission = parameters.CCOEF.at(&[tr]) * parameters.DIS.at(&[n, np]);
        add(&mut expr, tax * emission, variables.qmtr[m][n][np][tr][tp]);
    }

    for sc in sets.SC.indices() {
        let w = parameters.PROB.at(&[sc]);
        for (r, m, tp) in iproduct!(sets.R.indices(), sets.M.indices(), sets.TP.indices()) {
            add(&mut expr, w * tax * parameters.EC.at(&[r]), variables.qmo[r][m][sc][tp]);
        }
        for (p, n, np, tr, tp) in iproduct!(
            sets.P.indices(),
            sets.N.indices(),
            sets.NP.indices(),
            sets.TR.indices(),
            sets.TP.indices()
        ) {
            let emission = parameters.CCOEF.at(&[tr]) * parameters.DIS.at(&[n, np]);
            add(&mut expr, w * tax * emission, variables.qptr[p][n][np][tr][sc][tp]);
        }
    }
    expr
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::{Model, ModelDefinition};
    use crate::problem::{Instance, ParamData};

    fn coefficients(instance: &Instance) -> (ModelDefinition, Vec<(Var, f64)>) {
        let sets = Sets::new(instance).unwrap();
        let parameters = Parameters::new(instance, &sets).unwrap();
        let mut model = Model::new("t");
        let variables = Variables::new(&mut model, &sets).unwrap();
        let objective = expected_profit(&sets, &parameters, &variables).compacted();
        (model.finish(), objective)
    }

    fn coefficient(
        model: &ModelDefinition,
        objective: &[(Var, f64)],
        family: &str,
        index: &[&str],
    ) -> f64 {
        let var = model.lookup(family, index).unwrap();
        objective
            .iter()
            .find(|(v, _)| *v == var)
            .map(|(_, c)| *c)
            .unwrap_or(0.0)
    }

    #[test]
    fn base_case_coefficients() {
        let (model, objective) = coefficients(&Instance::base_case());
        let c = |family, index: &[&str]| coefficient(&model, &objective, family, index);

        assert_eq!(c("qps", &["p1", "c1", "b1", "SC1", "tp1"]), 936.0);
        // operation cost plus tax on refinery emissions
        assert_eq!(c("qmo", &["r1", "m1", "SC1", "tp1"]), -(50.0 + 10.0 * 79.0));
        assert_eq!(c("qmp_of", &["m1", "of1", "r1", "tp1"]), -800.0);
        assert_eq!(
            c("qmtr", &["m1", "o_of", "i_r1", "tr1", "tp1"]),
            -(85.0 * 10.0 + 10.0 * 5304.0 * 10.0)
        );
        assert_eq!(c("qsp", &["p1", "c1", "SC1", "tp1"]), -30.0);
        assert_eq!(c("qbp_oc", &["p1", "oc1", "SC1", "tp1"]), -50.0);
        // zero distance between terminal and refinery
        assert_eq!(c("qmtr", &["m1", "o_te", "i_r1", "tr1", "tp1"]), 0.0);
    }

    #[test]
    fn scenario_weights_are_not_normalised() {
        let weights = ParamData::new(0.0, &[(&["SC1"][..], 2.0)]);
        let instance = Instance::base_case().with_param("PROB", weights);
        let (model, objective) = coefficients(&instance);
        assert_eq!(
            coefficient(&model, &objective, "qps", &["p1", "c1", "b1", "SC1", "tp1"]),
            2.0 * 936.0
        );
        // material purchases happen before the scenario is known
        assert_eq!(
            coefficient(&model, &objective, "qmp_of", &["m1", "of1", "r1", "tp1"]),
            -800.0
        );
    }

    #[test]
    fn carbon_tax_grows_with_the_rate() {
        let mut instance = Instance::base_case();
        let (model, low) = coefficients(&instance);
        instance.carbon_tax = 20.0;
        let (_, high) = coefficients(&instance);
        let index = ["r1", "m1", "SC1", "tp1"];
        assert!(
            coefficient(&model, &high, "qmo", &index) < coefficient(&model, &low, "qmo", &index)
        );
    }
}
