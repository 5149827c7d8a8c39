use super::sets_and_parameters::{Facility, Parameters, Sets};
use super::variables::Variables;
use crate::lp::{eq, ge, le, LinExpr, Model};
use itertools::iproduct;
use log::debug;

type Family = fn(&mut Model, &Sets, &Parameters, &Variables);

/// Constraint groups of the model, in the order they are added
pub const FAMILIES: &[(&str, Family)] = &[
    ("MaterialBalance", material_balance),
    ("TransportCapacity", transport_capacity),
    ("TerminalToRefineryFlow", terminal_to_refinery_flow),
    ("OilfieldToRefineryFlow", oilfield_to_refinery_flow),
    ("RefineryToBaseFlow", refinery_to_base_flow),
    ("RefineryToTerminalFlow", refinery_to_terminal_flow),
    ("BaseToCustomerFlow", base_to_customer_flow),
    ("TerminalToOverseasFlow", terminal_to_overseas_flow),
    ("TerminalToBaseExtraFlow", terminal_to_base_extra_flow),
    ("RefineryProductBalance", refinery_product_balance),
    ("TerminalBalance", terminal_balance),
    ("BaseBalance", base_balance),
    ("SulfurConstraint", sulfur_content),
    ("MaterialProcurementLimit", material_procurement_limit),
    ("ExtraProcurementLimit", extra_procurement_limit),
    ("RefineryBounds", refinery_bounds),
    ("InventoryCapacity", inventory_capacity),
    ("Demand", demand),
    ("BacklogSurplusLimits", backlog_and_surplus_limits),
    ("LogicalRelation", logical_relation),
];

/// Add all constraint families to `model`
pub fn add_constraints(
    model: &mut Model,
    sets: &Sets,
    parameters: &Parameters,
    variables: &Variables,
) {
    for (family, add) in FAMILIES {
        let before = model.num_constrs();
        add(model, sets, parameters, variables);
        debug!("{}: {} constraints", family, model.num_constrs() - before);
    }
}

fn name(family: &str, labels: &[&str]) -> String {
    format!("{}({})", family, labels.join(","))
}

/// Purchases and the inventory carried over equal throughput plus the inventory kept.
/// The first period has no carried-over inventory.
fn material_balance(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (m, r, tp, sc) in iproduct!(
        sets.M.indices(),
        sets.R.indices(),
        sets.TP.indices(),
        sets.SC.indices()
    ) {
        let mut inflow: LinExpr = sets.TE.indices().map(|te| v.qmp[m][te][r][tp]).sum();
        inflow += sets.OF.indices().map(|of| v.qmp_of[m][of][r][tp]).sum::<LinExpr>();
        if let Some(prev) = sets.TP.prev(tp) {
            inflow += v.qmsto[m][r][sc][prev];
        }

        let labels = [sets.M.label(m), sets.R.label(r), sets.TP.label(tp), sets.SC.label(sc)];
        model.add_constr(
            &name("MaterialBalance", &labels),
            eq(inflow, v.qmo[r][m][sc][tp] + v.qmsto[m][r][sc][tp]),
        );
    }
}

/// Material flow and the product flow of all scenarios share the capacity of a route
fn transport_capacity(model: &mut Model, sets: &Sets, parameters: &Parameters, v: &Variables) {
    for (n, np, tr, tp) in iproduct!(
        sets.N.indices(),
        sets.NP.indices(),
        sets.TR.indices(),
        sets.TP.indices()
    ) {
        let mut lhs: LinExpr = sets.M.indices().map(|m| v.qmtr[m][n][np][tr][tp]).sum();
        lhs += iproduct!(sets.P.indices(), sets.SC.indices())
            .map(|(p, sc)| v.qptr[p][n][np][tr][sc][tp])
            .sum::<LinExpr>();

        let labels = [sets.N.label(n), sets.NP.label(np), sets.TR.label(tr), sets.TP.label(tp)];
        model.add_constr(
            &name("TransportCapacity", &labels),
            le(lhs, parameters.TCAU.at(&[n, np, tr, tp])),
        );
    }
}

/// Material moved from the origin node of `from` to the destination node of `to`, over all tools
fn material_route(
    sets: &Sets,
    v: &Variables,
    m: usize,
    from: (Facility, usize),
    to: (Facility, usize),
    tp: usize,
) -> LinExpr {
    let n = sets.origin(from.0, from.1);
    let np = sets.destination(to.0, to.1);
    sets.TR.indices().map(|tr| v.qmtr[m][n][np][tr][tp]).sum()
}

/// Product moved from the origin node of `from` to the destination node of `to`, over all tools
fn product_route(
    sets: &Sets,
    v: &Variables,
    p: usize,
    from: (Facility, usize),
    to: (Facility, usize),
    sc: usize,
    tp: usize,
) -> LinExpr {
    let n = sets.origin(from.0, from.1);
    let np = sets.destination(to.0, to.1);
    sets.TR.indices().map(|tr| v.qptr[p][n][np][tr][sc][tp]).sum()
}

fn terminal_to_refinery_flow(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (m, te, r, tp) in iproduct!(
        sets.M.indices(),
        sets.TE.indices(),
        sets.R.indices(),
        sets.TP.indices()
    ) {
        let routed = material_route(
            sets,
            v,
            m,
            (Facility::Terminal, te),
            (Facility::Refinery, r),
            tp,
        );
        let labels = [sets.M.label(m), sets.TE.label(te), sets.R.label(r), sets.TP.label(tp)];
        model.add_constr(&name("TerminalToRefineryFlow", &labels), eq(v.qmp[m][te][r][tp], routed));
    }
}

fn oilfield_to_refinery_flow(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (m, of, r, tp) in iproduct!(
        sets.M.indices(),
        sets.OF.indices(),
        sets.R.indices(),
        sets.TP.indices()
    ) {
        let routed = material_route(
            sets,
            v,
            m,
            (Facility::OilField, of),
            (Facility::Refinery, r),
            tp,
        );
        let labels = [sets.M.label(m), sets.OF.label(of), sets.R.label(r), sets.TP.label(tp)];
        model.add_constr(
            &name("OilfieldToRefineryFlow", &labels),
            eq(v.qmp_of[m][of][r][tp], routed),
        );
    }
}

fn refinery_to_base_flow(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (p, r, b, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.R.indices(),
        sets.B.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let routed = product_route(
            sets,
            v,
            p,
            (Facility::Refinery, r),
            (Facility::Base, b),
            sc,
            tp,
        );
        let labels = [
            sets.P.label(p),
            sets.R.label(r),
            sets.B.label(b),
            sets.SC.label(sc),
            sets.TP.label(tp),
        ];
        model.add_constr(&name("RefineryToBaseFlow", &labels), eq(v.qpb[p][r][b][sc][tp], routed));
    }
}

fn refinery_to_terminal_flow(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (p, r, te, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.R.indices(),
        sets.TE.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let routed = product_route(
            sets,
            v,
            p,
            (Facility::Refinery, r),
            (Facility::Terminal, te),
            sc,
            tp,
        );
        let labels = [
            sets.P.label(p),
            sets.R.label(r),
            sets.TE.label(te),
            sets.SC.label(sc),
            sets.TP.label(tp),
        ];
        model.add_constr(
            &name("RefineryToTerminalFlow", &labels),
            eq(v.qpte[p][r][te][sc][tp], routed),
        );
    }
}

fn base_to_customer_flow(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (p, b, c, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.B.indices(),
        sets.C.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let routed = product_route(
            sets,
            v,
            p,
            (Facility::Base, b),
            (Facility::Customer, c),
            sc,
            tp,
        );
        let labels = [
            sets.P.label(p),
            sets.B.label(b),
            sets.C.label(c),
            sets.SC.label(sc),
            sets.TP.label(tp),
        ];
        model.add_constr(&name("BaseToCustomerFlow", &labels), eq(v.qps[p][c][b][sc][tp], routed));
    }
}

fn terminal_to_overseas_flow(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (p, te, oc, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.TE.indices(),
        sets.OC.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let routed = product_route(
            sets,
            v,
            p,
            (Facility::Terminal, te),
            (Facility::OverseasCustomer, oc),
            sc,
            tp,
        );
        let labels = [
            sets.P.label(p),
            sets.TE.label(te),
            sets.OC.label(oc),
            sets.SC.label(sc),
            sets.TP.label(tp),
        ];
        model.add_constr(
            &name("TerminalToOverseasFlow", &labels),
            eq(v.qps_oc[p][oc][te][sc][tp], routed),
        );
    }
}

fn terminal_to_base_extra_flow(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (p, te, b, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.TE.indices(),
        sets.B.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let routed = product_route(
            sets,
            v,
            p,
            (Facility::Terminal, te),
            (Facility::Base, b),
            sc,
            tp,
        );
        let labels = [
            sets.P.label(p),
            sets.TE.label(te),
            sets.B.label(b),
            sets.SC.label(sc),
            sets.TP.label(tp),
        ];
        model.add_constr(
            &name("TerminalToBaseExtraFlow", &labels),
            eq(v.qepb[p][b][te][sc][tp], routed),
        );
    }
}

/// Shipments of a product out of a refinery, to terminals and bases
fn refinery_output(
    sets: &Sets,
    v: &Variables,
    p: usize,
    r: usize,
    sc: usize,
    tp: usize,
) -> LinExpr {
    let mut out: LinExpr = sets.TE.indices().map(|te| v.qpte[p][r][te][sc][tp]).sum();
    out += sets.B.indices().map(|b| v.qpb[p][r][b][sc][tp]).sum::<LinExpr>();
    out
}

fn refinery_product_balance(
    model: &mut Model,
    sets: &Sets,
    parameters: &Parameters,
    v: &Variables,
) {
    for (m, p, r, tp, sc) in iproduct!(
        sets.M.indices(),
        sets.P.indices(),
        sets.R.indices(),
        sets.TP.indices(),
        sets.SC.indices()
    ) {
        let production = parameters.YDR.at(&[r, m, p]) * v.qmo[r][m][sc][tp];
        let labels = [
            sets.M.label(m),
            sets.P.label(p),
            sets.R.label(r),
            sets.TP.label(tp),
            sets.SC.label(sc),
        ];
        model.add_constr(
            &name("RefineryProductBalance", &labels),
            eq(production, refinery_output(sets, v, p, r, sc, tp)),
        );
    }
}

fn terminal_balance(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (p, te, tp, sc) in iproduct!(
        sets.P.indices(),
        sets.TE.indices(),
        sets.TP.indices(),
        sets.SC.indices()
    ) {
        let mut inflow: LinExpr = sets.R.indices().map(|r| v.qpte[p][r][te][sc][tp]).sum();
        inflow += v.qepp[p][te][sc][tp];
        if let Some(prev) = sets.TP.prev(tp) {
            inflow += v.qpsto[p][te][sc][prev];
        }

        let mut outflow: LinExpr = sets.OC.indices().map(|oc| v.qps_oc[p][oc][te][sc][tp]).sum();
        outflow += sets.B.indices().map(|b| v.qepb[p][b][te][sc][tp]).sum::<LinExpr>();
        outflow += v.qpsto[p][te][sc][tp];

        let labels = [sets.P.label(p), sets.TE.label(te), sets.TP.label(tp), sets.SC.label(sc)];
        model.add_constr(&name("TerminalBalance", &labels), eq(inflow, outflow));
    }
}

fn base_balance(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (p, b, tp, sc) in iproduct!(
        sets.P.indices(),
        sets.B.indices(),
        sets.TP.indices(),
        sets.SC.indices()
    ) {
        let mut inflow: LinExpr = sets.R.indices().map(|r| v.qpb[p][r][b][sc][tp]).sum();
        inflow += sets.TE.indices().map(|te| v.qepb[p][b][te][sc][tp]).sum::<LinExpr>();
        if let Some(prev) = sets.TP.prev(tp) {
            inflow += v.qpsto_b[p][b][sc][prev];
        }

        let mut outflow: LinExpr = sets.C.indices().map(|c| v.qps[p][c][b][sc][tp]).sum();
        outflow += v.qpsto_b[p][b][sc][tp];

        let labels = [sets.P.label(p), sets.B.label(b), sets.TP.label(tp), sets.SC.label(sc)];
        model.add_constr(&name("BaseBalance", &labels), eq(inflow, outflow));
    }
}

/// Sulfur left after desulfurisation may not exceed the limit times the output. Written as a
/// product so that zero output gives `0 <= 0`.
fn sulfur_content(model: &mut Model, sets: &Sets, parameters: &Parameters, v: &Variables) {
    for (p, r, tp, sc) in iproduct!(
        sets.P.indices(),
        sets.R.indices(),
        sets.TP.indices(),
        sets.SC.indices()
    ) {
        let mut sulfur = LinExpr::new();
        for m in sets.M.indices() {
            let coeff = parameters.SC_m.at(&[m, tp])
                * (1.0 - parameters.DSR.at(&[r, m]))
                * parameters.YDR.at(&[r, m, p]);
            sulfur.add_term(coeff, v.qmo[r][m][sc][tp]);
        }
        let limit = parameters.SC_p.at(&[p, tp]) * refinery_output(sets, v, p, r, sc, tp);

        let labels = [sets.P.label(p), sets.R.label(r), sets.TP.label(tp), sets.SC.label(sc)];
        model.add_constr(&name("SulfurConstraint", &labels), le(sulfur, limit));
    }
}

fn material_procurement_limit(
    model: &mut Model,
    sets: &Sets,
    parameters: &Parameters,
    v: &Variables,
) {
    for (m, tp) in iproduct!(sets.M.indices(), sets.TP.indices()) {
        let mut bought: LinExpr = iproduct!(sets.TE.indices(), sets.R.indices())
            .map(|(te, r)| v.qmp[m][te][r][tp])
            .sum();
        bought += iproduct!(sets.OF.indices(), sets.R.indices())
            .map(|(of, r)| v.qmp_of[m][of][r][tp])
            .sum::<LinExpr>();

        let labels = [sets.M.label(m), sets.TP.label(tp)];
        model.add_constr(
            &name("MaterialProcurementLimit", &labels),
            le(bought, parameters.MPU.at(&[m, tp])),
        );
    }
}

fn extra_procurement_limit(model: &mut Model, sets: &Sets, parameters: &Parameters, v: &Variables) {
    for (p, tp, sc) in iproduct!(sets.P.indices(), sets.TP.indices(), sets.SC.indices()) {
        let bought: LinExpr = sets.TE.indices().map(|te| v.qepp[p][te][sc][tp]).sum();
        let labels = [sets.P.label(p), sets.TP.label(tp), sets.SC.label(sc)];
        model.add_constr(
            &name("ExtraProcurementLimit", &labels),
            le(bought, parameters.EPPU.at(&[p, tp])),
        );
    }
}

fn refinery_bounds(model: &mut Model, sets: &Sets, parameters: &Parameters, v: &Variables) {
    for (r, m, tp, sc) in iproduct!(
        sets.R.indices(),
        sets.M.indices(),
        sets.TP.indices(),
        sets.SC.indices()
    ) {
        let labels = [sets.R.label(r), sets.M.label(m), sets.TP.label(tp), sets.SC.label(sc)];
        let throughput = v.qmo[r][m][sc][tp];
        model.add_constr(
            &name("RefineryLowerBound", &labels),
            ge(throughput, parameters.CAPL.at(&[r, m, tp])),
        );
        model.add_constr(
            &name("RefineryUpperBound", &labels),
            le(throughput, parameters.CAPU.at(&[r, m, tp])),
        );
    }
}

fn inventory_capacity(model: &mut Model, sets: &Sets, parameters: &Parameters, v: &Variables) {
    for (m, r, sc, tp) in iproduct!(
        sets.M.indices(),
        sets.R.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let labels = [sets.M.label(m), sets.R.label(r), sets.SC.label(sc), sets.TP.label(tp)];
        model.add_constr(
            &name("MaterialInventoryCapacity", &labels),
            le(v.qmsto[m][r][sc][tp], parameters.IVU.at(&[m, r, tp])),
        );
    }

    for (p, te, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.TE.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let labels = [sets.P.label(p), sets.TE.label(te), sets.SC.label(sc), sets.TP.label(tp)];
        model.add_constr(
            &name("TerminalInventoryCapacity", &labels),
            le(v.qpsto[p][te][sc][tp], parameters.IVU_te.at(&[p, te, tp])),
        );
    }

    for (p, b, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.B.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let labels = [sets.P.label(p), sets.B.label(b), sets.SC.label(sc), sets.TP.label(tp)];
        model.add_constr(
            &name("BaseInventoryCapacity", &labels),
            le(v.qpsto_b[p][b][sc][tp], parameters.IVU_b.at(&[p, b, tp])),
        );
    }
}

/// Sales equal demand plus surplus minus backlog, per selling facility
fn demand(model: &mut Model, sets: &Sets, parameters: &Parameters, v: &Variables) {
    for (p, oc, te, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.OC.indices(),
        sets.TE.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let rhs = v.qsp_oc[p][oc][sc][tp] - v.qbp_oc[p][oc][sc][tp]
            + parameters.DEM_oc.at(&[p, oc, sc, tp]);
        let labels = [
            sets.P.label(p),
            sets.OC.label(oc),
            sets.TE.label(te),
            sets.SC.label(sc),
            sets.TP.label(tp),
        ];
        model.add_constr(&name("ExternalDemand", &labels), eq(v.qps_oc[p][oc][te][sc][tp], rhs));
    }

    for (p, c, b, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.C.indices(),
        sets.B.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let rhs = v.qsp[p][c][sc][tp] - v.qbp[p][c][sc][tp] + parameters.DEM.at(&[p, c, sc, tp]);
        let labels = [
            sets.P.label(p),
            sets.C.label(c),
            sets.B.label(b),
            sets.SC.label(sc),
            sets.TP.label(tp),
        ];
        model.add_constr(&name("InternalDemand", &labels), eq(v.qps[p][c][b][sc][tp], rhs));
    }
}

/// A backlog or surplus may only be positive when its indicator is set
fn backlog_and_surplus_limits(
    model: &mut Model,
    sets: &Sets,
    parameters: &Parameters,
    v: &Variables,
) {
    for (p, oc, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.OC.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let labels = [sets.P.label(p), sets.OC.label(oc), sets.SC.label(sc), sets.TP.label(tp)];
        model.add_constr(
            &name("BacklogLimitOverseas", &labels),
            le(
                v.qbp_oc[p][oc][sc][tp],
                parameters.QBU_oc.at(&[p, oc, tp]) * v.iqbp_oc[p][oc][sc][tp],
            ),
        );
        model.add_constr(
            &name("SurplusLimitOverseas", &labels),
            le(
                v.qsp_oc[p][oc][sc][tp],
                parameters.QSU_oc.at(&[p, oc, tp]) * v.iqsp_oc[p][oc][sc][tp],
            ),
        );
    }

    for (p, c, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.C.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let labels = [sets.P.label(p), sets.C.label(c), sets.SC.label(sc), sets.TP.label(tp)];
        model.add_constr(
            &name("BacklogLimitDomestic", &labels),
            le(v.qbp[p][c][sc][tp], parameters.QBU.at(&[p, c, tp]) * v.iqbp[p][c][sc][tp]),
        );
        model.add_constr(
            &name("SurplusLimitDomestic", &labels),
            le(v.qsp[p][c][sc][tp], parameters.QSU.at(&[p, c, tp]) * v.iqsp[p][c][sc][tp]),
        );
    }
}

/// Surplus and backlog exclude each other
fn logical_relation(model: &mut Model, sets: &Sets, _: &Parameters, v: &Variables) {
    for (p, oc, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.OC.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let labels = [sets.P.label(p), sets.OC.label(oc), sets.SC.label(sc), sets.TP.label(tp)];
        model.add_constr(
            &name("LogicalRelationOverseas", &labels),
            le(v.iqsp_oc[p][oc][sc][tp] + v.iqbp_oc[p][oc][sc][tp], 1.0),
        );
    }

    for (p, c, sc, tp) in iproduct!(
        sets.P.indices(),
        sets.C.indices(),
        sets.SC.indices(),
        sets.TP.indices()
    ) {
        let labels = [sets.P.label(p), sets.C.label(c), sets.SC.label(sc), sets.TP.label(tp)];
        model.add_constr(
            &name("LogicalRelationDomestic", &labels),
            le(v.iqsp[p][c][sc][tp] + v.iqbp[p][c][sc][tp], 1.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lp::{ModelDefinition, Sense};
    use crate::problem::Instance;

    fn build(instance: &Instance) -> ModelDefinition {
        let sets = Sets::new(instance).unwrap();
        let parameters = Parameters::new(instance, &sets).unwrap();
        let mut model = Model::new("t");
        let variables = Variables::new(&mut model, &sets).unwrap();
        add_constraints(&mut model, &sets, &parameters, &variables);
        model.finish()
    }

    fn two_periods() -> Instance {
        let mut instance = Instance::base_case();
        instance.sets.periods.push("tp2".to_string());
        instance
    }

    #[test]
    fn first_period_has_no_previous_inventory() {
        let model = build(&Instance::base_case());
        let balance = model.constr("MaterialBalance(m1,r1,tp1,SC1)").unwrap();
        let names: Vec<&str> = balance
            .terms
            .iter()
            .map(|(v, _)| model.var(*v).name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "qmp(m1,te1,r1,tp1)",
                "qmp_of(m1,of1,r1,tp1)",
                "qmo(r1,m1,SC1,tp1)",
                "qmsto(m1,r1,SC1,tp1)"
            ]
        );
    }

    #[test]
    fn later_periods_carry_inventory_over() {
        let model = build(&two_periods());
        let balance = model.constr("TerminalBalance(p1,te1,tp2,SC1)").unwrap();
        let carried = model.lookup("qpsto", &["p1", "te1", "SC1", "tp1"]).unwrap();
        let kept = model.lookup("qpsto", &["p1", "te1", "SC1", "tp2"]).unwrap();
        assert!(balance.terms.contains(&(carried, 1.0)));
        assert!(balance.terms.contains(&(kept, -1.0)));
        assert_eq!(balance.sense, Sense::Eq);
    }

    #[test]
    fn routing_uses_resolved_nodes() {
        let model = build(&Instance::base_case());
        let flow = model.constr("TerminalToRefineryFlow(m1,te1,r1,tp1)").unwrap();
        let routed = model.lookup("qmtr", &["m1", "o_te", "i_r1", "tr1", "tp1"]).unwrap();
        assert!(flow.terms.contains(&(routed, -1.0)));
        assert_eq!(flow.rhs, 0.0);
    }

    #[test]
    fn families_have_their_full_domain() {
        let model = build(&two_periods());
        assert_eq!(model.constr_family("MaterialBalance").count(), 2);
        // 6 origins x 6 destinations x 1 tool x 2 periods
        assert_eq!(model.constr_family("TransportCapacity").count(), 72);
        assert_eq!(model.constr_family("RefineryLowerBound").count(), 2);
        assert_eq!(model.constr_family("LogicalRelationDomestic").count(), 2);
    }

    #[test]
    fn sulfur_constraint_is_a_product_inequality() {
        let model = build(&Instance::base_case());
        let sulfur = model.constr("SulfurConstraint(p1,r1,tp1,SC1)").unwrap();
        let qmo = model.lookup("qmo", &["r1", "m1", "SC1", "tp1"]).unwrap();
        let qpb = model.lookup("qpb", &["p1", "r1", "b1", "SC1", "tp1"]).unwrap();
        // 50 ppm, half of it removed, full yield
        assert!(sulfur.terms.contains(&(qmo, 25.0)));
        assert!(sulfur.terms.contains(&(qpb, -50.0)));
        assert_eq!(sulfur.sense, Sense::Le);
        assert_eq!(sulfur.rhs, 0.0);
    }

    #[test]
    fn zero_limit_gates_the_surplus() {
        let model = build(&Instance::single_element("null"));
        let limit = model.constr("SurplusLimitDomestic(p1,c1,SC1,tp1)").unwrap();
        let qsp = model.lookup("qsp", &["p1", "c1", "SC1", "tp1"]).unwrap();
        assert_eq!(limit.terms, vec![(qsp, 1.0)]);
        assert_eq!(limit.rhs, 0.0);
    }
}
