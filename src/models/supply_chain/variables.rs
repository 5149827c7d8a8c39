use super::sets_and_parameters::Sets;
use crate::error::ConstructionError;
use crate::lp::{Model, Var};
use crate::models::utils::{AddVars, ConvertVars};
use log::debug;

type V4 = Vec<Vec<Vec<Vec<Var>>>>;
type V5 = Vec<Vec<Vec<Vec<Vec<Var>>>>>;
type V6 = Vec<Vec<Vec<Vec<Vec<Vec<Var>>>>>>;

/// The decision variables of the supply chain model, indexed by set positions in the
/// order of the family's domain.
pub struct Variables {
    /// Product sold to an overseas customer through a terminal [P, OC, TE, SC, TP]
    pub qps_oc: V5,
    /// Product sold to a domestic customer through a base [P, C, B, SC, TP]
    pub qps: V5,
    /// Material bought at a terminal for a refinery [M, TE, R, TP]
    pub qmp: V4,
    /// Material bought at an oil field for a refinery [M, OF, R, TP]
    pub qmp_of: V4,
    /// Material moved between two nodes with a tool [M, N, NP, TR, TP]
    pub qmtr: V5,
    /// Refinery throughput [R, M, SC, TP]
    pub qmo: V4,
    /// Material inventory at a refinery [M, R, SC, TP]
    pub qmsto: V4,
    /// Product inventory at a terminal [P, TE, SC, TP]
    pub qpsto: V4,
    /// Product inventory at a base [P, B, SC, TP]
    pub qpsto_b: V4,
    /// Product moved between two nodes with a tool [P, N, NP, TR, SC, TP]
    pub qptr: V6,
    /// Extra product bought at a terminal [P, TE, SC, TP]
    pub qepp: V4,
    /// Domestic surplus [P, C, SC, TP]
    pub qsp: V4,
    /// Overseas surplus [P, OC, SC, TP]
    pub qsp_oc: V4,
    /// Domestic backlog [P, C, SC, TP]
    pub qbp: V4,
    /// Overseas backlog [P, OC, SC, TP]
    pub qbp_oc: V4,
    /// Product shipped from a refinery to a terminal [P, R, TE, SC, TP]
    pub qpte: V5,
    /// Product shipped from a refinery to a base [P, R, B, SC, TP]
    pub qpb: V5,
    /// Extra product moved from a terminal to a base [P, B, TE, SC, TP]
    pub qepb: V5,
    /// 1 if a domestic surplus is allowed
    pub iqsp: V4,
    /// 1 if an overseas surplus is allowed
    pub iqsp_oc: V4,
    /// 1 if a domestic backlog is allowed
    pub iqbp: V4,
    /// 1 if an overseas backlog is allowed
    pub iqbp_oc: V4,
}

impl Variables {
    /// Create every family over its full index domain
    pub fn new(model: &mut Model, sets: &Sets) -> Result<Variables, ConstructionError> {
        let s = sets;

        let variables = Variables {
            qps_oc: (&s.P, &s.OC, &s.TE, &s.SC, &s.TP).cont(model, "qps_oc")?,
            qps: (&s.P, &s.C, &s.B, &s.SC, &s.TP).cont(model, "qps")?,
            qmp: (&s.M, &s.TE, &s.R, &s.TP).cont(model, "qmp")?,
            qmp_of: (&s.M, &s.OF, &s.R, &s.TP).cont(model, "qmp_of")?,
            qmtr: (&s.M, &s.N, &s.NP, &s.TR, &s.TP).cont(model, "qmtr")?,
            qmo: (&s.R, &s.M, &s.SC, &s.TP).cont(model, "qmo")?,
            qmsto: (&s.M, &s.R, &s.SC, &s.TP).cont(model, "qmsto")?,
            qpsto: (&s.P, &s.TE, &s.SC, &s.TP).cont(model, "qpsto")?,
            qpsto_b: (&s.P, &s.B, &s.SC, &s.TP).cont(model, "qpsto_b")?,
            qptr: (&s.P, &s.N, &s.NP, &s.TR, &s.SC, &s.TP).cont(model, "qptr")?,
            qepp: (&s.P, &s.TE, &s.SC, &s.TP).cont(model, "qepp")?,
            qsp: (&s.P, &s.C, &s.SC, &s.TP).cont(model, "qsp")?,
            qsp_oc: (&s.P, &s.OC, &s.SC, &s.TP).cont(model, "qsp_oc")?,
            qbp: (&s.P, &s.C, &s.SC, &s.TP).cont(model, "qbp")?,
            qbp_oc: (&s.P, &s.OC, &s.SC, &s.TP).cont(model, "qbp_oc")?,
            qpte: (&s.P, &s.R, &s.TE, &s.SC, &s.TP).cont(model, "qpte")?,
            qpb: (&s.P, &s.R, &s.B, &s.SC, &s.TP).cont(model, "qpb")?,
            qepb: (&s.P, &s.B, &s.TE, &s.SC, &s.TP).cont(model, "qepb")?,
            iqsp: (&s.P, &s.C, &s.SC, &s.TP).binary(model, "iqsp")?,
            iqsp_oc: (&s.P, &s.OC, &s.SC, &s.TP).binary(model, "iqsp_oc")?,
            iqbp: (&s.P, &s.C, &s.SC, &s.TP).binary(model, "iqbp")?,
            iqbp_oc: (&s.P, &s.OC, &s.SC, &s.TP).binary(model, "iqbp_oc")?,
        };

        debug!("created {} variables", model.num_vars());
        Ok(variables)
    }
}

/// Variable values of a solved model, in the layout of [`Variables`]
pub struct SupplyChainResults {
    pub objective: f64,
    pub qmo: Vec<Vec<Vec<Vec<f64>>>>,
    pub qmsto: Vec<Vec<Vec<Vec<f64>>>>,
    pub qsp: Vec<Vec<Vec<Vec<f64>>>>,
    pub qbp: Vec<Vec<Vec<Vec<f64>>>>,
    pub qsp_oc: Vec<Vec<Vec<Vec<f64>>>>,
    pub qbp_oc: Vec<Vec<Vec<Vec<f64>>>>,
    pub iqsp: Vec<Vec<Vec<Vec<f64>>>>,
    pub iqbp: Vec<Vec<Vec<Vec<f64>>>>,
    pub iqsp_oc: Vec<Vec<Vec<Vec<f64>>>>,
    pub iqbp_oc: Vec<Vec<Vec<Vec<f64>>>>,
    pub qps: Vec<Vec<Vec<Vec<Vec<f64>>>>>,
    pub qps_oc: Vec<Vec<Vec<Vec<Vec<f64>>>>>,
}

impl SupplyChainResults {
    pub fn new(variables: &Variables, objective: f64, values: &[f64]) -> SupplyChainResults {
        SupplyChainResults {
            objective,
            qmo: variables.qmo.convert(values),
            qmsto: variables.qmsto.convert(values),
            qsp: variables.qsp.convert(values),
            qbp: variables.qbp.convert(values),
            qsp_oc: variables.qsp_oc.convert(values),
            qbp_oc: variables.qbp_oc.convert(values),
            iqsp: variables.iqsp.convert(values),
            iqbp: variables.iqbp.convert(values),
            iqsp_oc: variables.iqsp_oc.convert(values),
            iqbp_oc: variables.iqbp_oc.convert(values),
            qps: variables.qps.convert(values),
            qps_oc: variables.qps_oc.convert(values),
        }
    }
}
