use super::topology::Topology;
use crate::error::ConstructionError;
use crate::problem::{Instance, ParamData};
use itertools::iproduct;
use log::{debug, warn};
use std::collections::HashMap;
use std::ops::Range;

pub type MaterialIndex = usize;
pub type ProductIndex = usize;
pub type PeriodIndex = usize;
pub type ToolIndex = usize;
pub type ScenarioIndex = usize;
pub type NodeIndex = usize;

/// An ordered, finite set of labelled elements.
#[derive(Debug, Clone)]
pub struct Set {
    name: &'static str,
    elements: Vec<String>,
    position: HashMap<String, usize>,
}

impl Set {
    pub fn new(name: &'static str, elements: &[String]) -> Result<Set, ConstructionError> {
        let mut position = HashMap::with_capacity(elements.len());
        for (i, element) in elements.iter().enumerate() {
            if position.insert(element.clone(), i).is_some() {
                return Err(ConstructionError::DuplicateElement {
                    set: name.to_string(),
                    element: element.clone(),
                });
            }
        }

        Ok(Set {
            name,
            elements: elements.to_vec(),
            position,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn indices(&self) -> Range<usize> {
        0..self.elements.len()
    }

    pub fn label(&self, i: usize) -> &str {
        &self.elements[i]
    }

    pub fn labels(&self) -> &[String] {
        &self.elements
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.position.get(label).copied()
    }

    /// The element preceding `i`, if any. There is no wraparound.
    pub fn prev(&self, i: usize) -> Option<usize> {
        i.checked_sub(1)
    }
}

/// The index sets a parameter or variable family can range over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dim {
    M,
    P,
    TP,
    TR,
    SC,
    B,
    C,
    OC,
    OF,
    R,
    TE,
    N,
    NP,
}

/// The facility types that take part in transport relations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facility {
    OilField,
    Terminal,
    Refinery,
    Base,
    Customer,
    OverseasCustomer,
}

impl Facility {
    /// In the order node labels are assigned
    pub const ALL: [Facility; 6] = [
        Facility::OilField,
        Facility::Terminal,
        Facility::Refinery,
        Facility::Base,
        Facility::Customer,
        Facility::OverseasCustomer,
    ];

    pub fn dim(self) -> Dim {
        match self {
            Facility::OilField => Dim::OF,
            Facility::Terminal => Dim::TE,
            Facility::Refinery => Dim::R,
            Facility::Base => Dim::B,
            Facility::Customer => Dim::C,
            Facility::OverseasCustomer => Dim::OC,
        }
    }
}

/// Sets of the supply chain model
#[derive(Debug)]
#[allow(non_snake_case)]
pub struct Sets {
    /// Materials (crude oil grades)
    pub M: Set,
    /// Products
    pub P: Set,
    /// Time periods, ordered
    pub TP: Set,
    /// Transportation tools
    pub TR: Set,
    /// Scenarios
    pub SC: Set,
    /// Distribution bases
    pub B: Set,
    /// Domestic customers
    pub C: Set,
    /// Overseas customers
    pub OC: Set,
    /// Oil fields
    pub OF: Set,
    /// Refineries
    pub R: Set,
    /// Terminals
    pub TE: Set,
    /// Origin nodes
    pub N: Set,
    /// Destination nodes
    pub NP: Set,
    /// Label resolver backing N and NP
    pub topology: Topology,
    /// origin[facility type][facility] = index in N
    origin: Vec<Vec<NodeIndex>>,
    /// destination[facility type][facility] = index in NP
    destination: Vec<Vec<NodeIndex>>,
}

#[allow(non_snake_case)]
impl Sets {
    pub fn new(instance: &Instance) -> Result<Sets, ConstructionError> {
        let data = &instance.sets;
        let M = Set::new("M", &data.materials)?;
        let P = Set::new("P", &data.products)?;
        let TP = Set::new("TP", &data.periods)?;
        let TR = Set::new("TR", &data.tools)?;
        let SC = Set::new("SC", &data.scenarios)?;
        let B = Set::new("B", &data.bases)?;
        let C = Set::new("C", &data.customers)?;
        let OC = Set::new("OC", &data.overseas_customers)?;
        let OF = Set::new("OF", &data.oil_fields)?;
        let R = Set::new("R", &data.refineries)?;
        let TE = Set::new("TE", &data.terminals)?;

        for set in [&TP, &SC] {
            if set.is_empty() {
                return Err(ConstructionError::EmptySet {
                    set: set.name().to_string(),
                });
            }
        }

        // facility identifiers key the topology table, so they must be unique across types
        let facilities: Vec<&str> = [&OF, &TE, &R, &B, &C, &OC]
            .iter()
            .flat_map(|s| s.labels().iter().map(String::as_str))
            .collect();
        Set::new(
            "facilities",
            &facilities.iter().map(|f| f.to_string()).collect::<Vec<_>>(),
        )?;

        let topology = Topology::new(&facilities, instance.topology.as_ref())?;
        let N = Set::new("N", topology.origins())?;
        let NP = Set::new("NP", topology.destinations())?;

        let mut sets = Sets {
            M,
            P,
            TP,
            TR,
            SC,
            B,
            C,
            OC,
            OF,
            R,
            TE,
            N,
            NP,
            topology,
            origin: Vec::new(),
            destination: Vec::new(),
        };

        for kind in Facility::ALL {
            let set = sets.dim(kind.dim());
            let mut origin = Vec::with_capacity(set.len());
            let mut destination = Vec::with_capacity(set.len());
            for f in set.labels() {
                let o = sets.topology.origin(f)?;
                let d = sets.topology.destination(f)?;
                // N and NP were built from the same topology, so the labels always resolve
                origin.push(sets.N.position(o).unwrap_or_default());
                destination.push(sets.NP.position(d).unwrap_or_default());
            }
            sets.origin.push(origin);
            sets.destination.push(destination);
        }

        debug!(
            "sets: |M|={} |P|={} |TP|={} |TR|={} |SC|={} |N|={} |N'|={}",
            sets.M.len(),
            sets.P.len(),
            sets.TP.len(),
            sets.TR.len(),
            sets.SC.len(),
            sets.N.len(),
            sets.NP.len()
        );

        Ok(sets)
    }

    pub fn dim(&self, dim: Dim) -> &Set {
        match dim {
            Dim::M => &self.M,
            Dim::P => &self.P,
            Dim::TP => &self.TP,
            Dim::TR => &self.TR,
            Dim::SC => &self.SC,
            Dim::B => &self.B,
            Dim::C => &self.C,
            Dim::OC => &self.OC,
            Dim::OF => &self.OF,
            Dim::R => &self.R,
            Dim::TE => &self.TE,
            Dim::N => &self.N,
            Dim::NP => &self.NP,
        }
    }

    /// Index in N of the origin node of facility `i` of type `kind`
    pub fn origin(&self, kind: Facility, i: usize) -> NodeIndex {
        self.origin[kind as usize][i]
    }

    /// Index in N' of the destination node of facility `i` of type `kind`
    pub fn destination(&self, kind: Facility, i: usize) -> NodeIndex {
        self.destination[kind as usize][i]
    }
}

/// A parameter indexed over a product of sets, stored densely.
#[derive(Debug, Clone)]
pub struct ParamTable {
    name: &'static str,
    domain: Vec<Dim>,
    shape: Vec<usize>,
    default: f64,
    values: Vec<f64>,
}

impl ParamTable {
    fn new(
        name: &'static str,
        domain: &[Dim],
        sets: &Sets,
        data: Option<&ParamData>,
    ) -> Result<ParamTable, ConstructionError> {
        let shape: Vec<usize> = domain.iter().map(|d| sets.dim(*d).len()).collect();
        let default = data.map(|d| d.default).unwrap_or(0.0);
        let mut table = ParamTable {
            name,
            domain: domain.to_vec(),
            values: vec![default; shape.iter().product()],
            shape,
            default,
        };

        for (key, value) in data.iter().flat_map(|d| d.values.iter()) {
            if key.len() != domain.len() {
                return Err(ConstructionError::ArityMismatch {
                    parameter: name.to_string(),
                    expected: domain.len(),
                    actual: key.len(),
                });
            }
            let index = table
                .resolve(sets, key.iter().map(String::as_str))
                .ok_or_else(|| ConstructionError::OutOfDomain {
                    parameter: name.to_string(),
                    key: key.clone(),
                })?;
            let offset = table.offset(&index);
            table.values[offset] = *value;
        }

        Ok(table)
    }

    fn resolve<'a>(&self, sets: &Sets, key: impl Iterator<Item = &'a str>) -> Option<Vec<usize>> {
        self.domain
            .iter()
            .zip(key)
            .map(|(dim, label)| sets.dim(*dim).position(label))
            .collect()
    }

    fn offset(&self, index: &[usize]) -> usize {
        debug_assert_eq!(index.len(), self.shape.len(), "arity of {}", self.name);
        index
            .iter()
            .zip(&self.shape)
            .fold(0, |acc, (i, n)| acc * n + i)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn domain(&self) -> &[Dim] {
        &self.domain
    }

    pub fn default(&self) -> f64 {
        self.default
    }

    /// Value at a tuple of set positions, in domain order
    pub fn at(&self, index: &[usize]) -> f64 {
        self.values[self.offset(index)]
    }

    /// Value at a tuple of element labels. Keys outside the table take the default.
    pub fn get(&self, sets: &Sets, labels: &[&str]) -> f64 {
        if labels.len() != self.domain.len() {
            return self.default;
        }
        match self.resolve(sets, labels.iter().copied()) {
            Some(index) => self.at(&index),
            None => self.default,
        }
    }

    fn entries(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    fn map(mut self, f: impl Fn(f64) -> f64) -> Self {
        self.values.iter_mut().for_each(|v| *v = f(*v));
        self.default = f(self.default);
        self
    }
}

pub use catalogue::CATALOGUE;

mod catalogue {
    use super::Dim::{self, *};

    /// Every indexed parameter and its index domain
    pub const CATALOGUE: &[(&str, &[Dim])] = &[
        ("BCK", &[P, TP]),
        ("CAPL", &[R, M, TP]),
        ("CAPU", &[R, M, TP]),
        ("DEM", &[P, C, SC, TP]),
        ("DEM_oc", &[P, OC, SC, TP]),
        ("DIS", &[N, NP]),
        ("DSR", &[R, M]),
        ("EPPU", &[P, TP]),
        ("EPUP", &[P, TE, TP]),
        ("IVU", &[M, R, TP]),
        ("IVU_b", &[P, B, TP]),
        ("IVU_te", &[P, TE, TP]),
        ("IVUP", &[M, R, TP]),
        ("IVUP_b", &[P, B, TP]),
        ("IVUP_te", &[P, TE, TP]),
        ("MPU", &[M, TP]),
        ("MUP", &[M, TE, TP]),
        ("MUP_of", &[M, OF, TP]),
        ("MTUP", &[M, N, NP, TR, TP]),
        ("PTUP", &[P, N, NP, TR, TP]),
        ("PUP", &[P, TE, SC, TP]),
        ("PUP_b", &[P, B, SC, TP]),
        ("QBU", &[P, C, TP]),
        ("QBU_oc", &[P, OC, TP]),
        ("QSU", &[P, C, TP]),
        ("QSU_oc", &[P, OC, TP]),
        ("ROUP", &[R, M, TP]),
        ("SC_m", &[M, TP]),
        ("SC_p", &[P, TP]),
        ("SUR", &[P, TP]),
        ("TCAU", &[N, NP, TR, TP]),
        ("YDR", &[R, M, P]),
        ("YDR_tp", &[R, M, TP]),
        ("CCOEF", &[TR]),
        ("EC", &[R]),
        ("PROB", &[SC]),
    ];
}

/// Parameters of the supply chain model
#[allow(non_snake_case)]
pub struct Parameters {
    /// Backlog penalty per unit of product
    pub BCK: ParamTable,
    /// Lower refinery throughput capacity
    pub CAPL: ParamTable,
    /// Upper refinery throughput capacity
    pub CAPU: ParamTable,
    /// Domestic customer demand
    pub DEM: ParamTable,
    /// Overseas customer demand
    pub DEM_oc: ParamTable,
    /// Distance between an origin and a destination node
    pub DIS: ParamTable,
    /// Desulfurisation ratio of a refinery for a material
    pub DSR: ParamTable,
    /// Extra product purchase limit
    pub EPPU: ParamTable,
    /// Extra product unit price at a terminal
    pub EPUP: ParamTable,
    /// Material inventory capacity at a refinery
    pub IVU: ParamTable,
    /// Product inventory capacity at a base
    pub IVU_b: ParamTable,
    /// Product inventory capacity at a terminal
    pub IVU_te: ParamTable,
    /// Material holding cost at a refinery
    pub IVUP: ParamTable,
    /// Product holding cost at a base
    pub IVUP_b: ParamTable,
    /// Product holding cost at a terminal
    pub IVUP_te: ParamTable,
    /// Material procurement limit
    pub MPU: ParamTable,
    /// Material price at a terminal
    pub MUP: ParamTable,
    /// Material price at an oil field
    pub MUP_of: ParamTable,
    /// Material transport price per distance unit and ton
    pub MTUP: ParamTable,
    /// Product transport price per distance unit and ton
    pub PTUP: ParamTable,
    /// Selling price at a terminal (overseas channel)
    pub PUP: ParamTable,
    /// Selling price at a base (domestic channel)
    pub PUP_b: ParamTable,
    /// Backlog limit, domestic
    pub QBU: ParamTable,
    /// Backlog limit, overseas
    pub QBU_oc: ParamTable,
    /// Surplus limit, domestic
    pub QSU: ParamTable,
    /// Surplus limit, overseas
    pub QSU_oc: ParamTable,
    /// Refinery operation cost
    pub ROUP: ParamTable,
    /// Sulfur content of a material
    pub SC_m: ParamTable,
    /// Sulfur content limit of a product
    pub SC_p: ParamTable,
    /// Surplus penalty per unit of product
    pub SUR: ParamTable,
    /// Transport capacity of a node pair and tool
    pub TCAU: ParamTable,
    /// Yield of a product from a material at a refinery
    pub YDR: ParamTable,
    /// Yield of a material at a refinery per period
    pub YDR_tp: ParamTable,
    /// Emission factor of a transport tool, always non-negative
    pub CCOEF: ParamTable,
    /// Emission factor of a refinery, always non-negative
    pub EC: ParamTable,
    /// Scenario weight. Not normalised: weights are used exactly as given.
    pub PROB: ParamTable,
    /// Carbon tax per unit of CO2
    pub TAXC: f64,
}

#[allow(non_snake_case)]
impl Parameters {
    pub fn new(instance: &Instance, sets: &Sets) -> Result<Parameters, ConstructionError> {
        if let Some(unknown) = instance
            .parameters
            .keys()
            .find(|name| !CATALOGUE.iter().any(|(known, _)| known == name))
        {
            return Err(ConstructionError::UnknownParameter {
                name: unknown.clone(),
            });
        }

        let take = |name: &'static str| -> Result<ParamTable, ConstructionError> {
            let domain = CATALOGUE
                .iter()
                .find(|(known, _)| *known == name)
                .map(|(_, domain)| *domain)
                .ok_or_else(|| ConstructionError::UnknownParameter {
                    name: name.to_string(),
                })?;
            ParamTable::new(name, domain, sets, instance.parameters.get(name))
        };

        let parameters = Parameters {
            BCK: take("BCK")?,
            CAPL: take("CAPL")?,
            CAPU: take("CAPU")?,
            DEM: take("DEM")?,
            DEM_oc: take("DEM_oc")?,
            DIS: take("DIS")?,
            DSR: take("DSR")?,
            EPPU: take("EPPU")?,
            EPUP: take("EPUP")?,
            IVU: take("IVU")?,
            IVU_b: take("IVU_b")?,
            IVU_te: take("IVU_te")?,
            IVUP: take("IVUP")?,
            IVUP_b: take("IVUP_b")?,
            IVUP_te: take("IVUP_te")?,
            MPU: take("MPU")?,
            MUP: take("MUP")?,
            MUP_of: take("MUP_of")?,
            MTUP: take("MTUP")?,
            PTUP: take("PTUP")?,
            PUP: take("PUP")?,
            PUP_b: take("PUP_b")?,
            QBU: take("QBU")?,
            QBU_oc: take("QBU_oc")?,
            QSU: take("QSU")?,
            QSU_oc: take("QSU_oc")?,
            ROUP: take("ROUP")?,
            SC_m: take("SC_m")?,
            SC_p: take("SC_p")?,
            SUR: take("SUR")?,
            TCAU: take("TCAU")?,
            YDR: take("YDR")?,
            YDR_tp: take("YDR_tp")?,
            CCOEF: Self::non_negative(take("CCOEF")?),
            EC: Self::non_negative(take("EC")?),
            PROB: take("PROB")?,
            TAXC: instance.carbon_tax,
        };

        for (r, m, tp) in iproduct!(sets.R.indices(), sets.M.indices(), sets.TP.indices()) {
            let lower = parameters.CAPL.at(&[r, m, tp]);
            let upper = parameters.CAPU.at(&[r, m, tp]);
            if lower > upper {
                return Err(ConstructionError::InconsistentBounds {
                    name: format!(
                        "refinery capacity ({},{},{})",
                        sets.R.label(r),
                        sets.M.label(m),
                        sets.TP.label(tp)
                    ),
                    lower,
                    upper,
                });
            }
        }

        let total_weight: f64 = parameters.PROB.entries().sum();
        if (total_weight - 1.0).abs() > 1e-9 {
            debug!(
                "scenario weights sum to {}, they are used without normalisation",
                total_weight
            );
        }

        Ok(parameters)
    }

    /// Emission factors count as a cost whichever sign the data uses.
    fn non_negative(table: ParamTable) -> ParamTable {
        if table.entries().any(|v| *v < 0.0) || table.default() < 0.0 {
            warn!(
                "negative emission factors in `{}` are taken by absolute value",
                table.name()
            );
        }
        table.map(f64::abs)
    }

    /// The table of parameter `name`, if it exists
    pub fn table(&self, name: &str) -> Option<&ParamTable> {
        let table = match name {
            "BCK" => &self.BCK,
            "CAPL" => &self.CAPL,
            "CAPU" => &self.CAPU,
            "DEM" => &self.DEM,
            "DEM_oc" => &self.DEM_oc,
            "DIS" => &self.DIS,
            "DSR" => &self.DSR,
            "EPPU" => &self.EPPU,
            "EPUP" => &self.EPUP,
            "IVU" => &self.IVU,
            "IVU_b" => &self.IVU_b,
            "IVU_te" => &self.IVU_te,
            "IVUP" => &self.IVUP,
            "IVUP_b" => &self.IVUP_b,
            "IVUP_te" => &self.IVUP_te,
            "MPU" => &self.MPU,
            "MUP" => &self.MUP,
            "MUP_of" => &self.MUP_of,
            "MTUP" => &self.MTUP,
            "PTUP" => &self.PTUP,
            "PUP" => &self.PUP,
            "PUP_b" => &self.PUP_b,
            "QBU" => &self.QBU,
            "QBU_oc" => &self.QBU_oc,
            "QSU" => &self.QSU,
            "QSU_oc" => &self.QSU_oc,
            "ROUP" => &self.ROUP,
            "SC_m" => &self.SC_m,
            "SC_p" => &self.SC_p,
            "SUR" => &self.SUR,
            "TCAU" => &self.TCAU,
            "YDR" => &self.YDR,
            "YDR_tp" => &self.YDR_tp,
            "CCOEF" => &self.CCOEF,
            "EC" => &self.EC,
            "PROB" => &self.PROB,
            _ => return None,
        };
        Some(table)
    }

    /// Name-based lookup: the configured value, or the parameter's default for keys
    /// that are not listed.
    pub fn get(&self, sets: &Sets, name: &str, labels: &[&str]) -> Result<f64, ConstructionError> {
        let table = self
            .table(name)
            .ok_or_else(|| ConstructionError::UnknownParameter {
                name: name.to_string(),
            })?;
        if labels.len() != table.domain().len() {
            return Err(ConstructionError::ArityMismatch {
                parameter: name.to_string(),
                expected: table.domain().len(),
                actual: labels.len(),
            });
        }
        Ok(table.get(sets, labels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> (Sets, Parameters) {
        let instance = Instance::base_case();
        let sets = Sets::new(&instance).unwrap();
        let parameters = Parameters::new(&instance, &sets).unwrap();
        (sets, parameters)
    }

    #[test]
    fn node_sets_follow_facility_order() {
        let (sets, _) = base();
        let origins: Vec<&str> = sets.N.labels().iter().map(String::as_str).collect();
        assert_eq!(origins, ["o_of", "o_te", "o_r1", "o_b1", "o_c1", "o_oc1"]);
        assert_eq!(sets.NP.label(sets.destination(Facility::Refinery, 0)), "i_r1");
        assert_eq!(sets.N.label(sets.origin(Facility::Terminal, 0)), "o_te");
    }

    #[test]
    fn every_facility_resolves() {
        let (sets, _) = base();
        for kind in Facility::ALL {
            for f in sets.dim(kind.dim()).labels() {
                assert!(sets.topology.origin(f).is_ok());
                assert!(sets.topology.destination(f).is_ok());
            }
        }
    }

    #[test]
    fn first_period_has_no_predecessor() {
        let (sets, _) = base();
        assert_eq!(sets.TP.prev(0), None);
        assert_eq!(sets.TP.prev(3), Some(2));
    }

    #[test]
    fn unlisted_keys_fall_back_to_default() {
        let (sets, parameters) = base();
        assert_eq!(parameters.get(&sets, "DIS", &["o_of", "i_r1"]), Ok(10.0));
        assert_eq!(parameters.get(&sets, "DIS", &["o_r1", "i_of"]), Ok(0.0));
        assert_eq!(parameters.get(&sets, "DIS", &["node_x", "node_y"]), Ok(0.0));
        assert!(matches!(
            parameters.get(&sets, "NOPE", &["a"]),
            Err(ConstructionError::UnknownParameter { .. })
        ));
        assert!(matches!(
            parameters.get(&sets, "DIS", &["o_of"]),
            Err(ConstructionError::ArityMismatch { .. })
        ));
    }

    #[test]
    fn declared_default_is_used() {
        let instance = Instance::base_case().with_param("SUR", ParamData::new(7.5, &[]));
        let sets = Sets::new(&instance).unwrap();
        let parameters = Parameters::new(&instance, &sets).unwrap();
        assert_eq!(parameters.SUR.at(&[0, 0]), 7.5);
    }

    #[test]
    fn out_of_domain_key_is_a_construction_error() {
        let stray = ParamData::new(0.0, &[(&["p9", "tp1"][..], 1.0)]);
        let instance = Instance::base_case().with_param("BCK", stray);
        let sets = Sets::new(&instance).unwrap();
        assert_eq!(
            Parameters::new(&instance, &sets).err(),
            Some(ConstructionError::OutOfDomain {
                parameter: "BCK".to_string(),
                key: vec!["p9".to_string(), "tp1".to_string()],
            })
        );
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let instance = Instance::base_case().with_param("BigM", ParamData::new(1e6, &[]));
        let sets = Sets::new(&instance).unwrap();
        assert!(matches!(
            Parameters::new(&instance, &sets),
            Err(ConstructionError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn capacity_bounds_must_be_ordered() {
        let instance = Instance::base_case().with_param(
            "CAPL",
            ParamData::new(0.0, &[(&["r1", "m1", "tp1"][..], 500.0)]),
        );
        let sets = Sets::new(&instance).unwrap();
        assert!(matches!(
            Parameters::new(&instance, &sets),
            Err(ConstructionError::InconsistentBounds { .. })
        ));
    }

    #[test]
    fn emission_factors_are_made_positive() {
        let instance = Instance::base_case()
            .with_param("CCOEF", ParamData::new(0.0, &[(&["tr1"][..], -5304.0)]))
            .with_param("EC", ParamData::new(-1.0, &[]));
        let sets = Sets::new(&instance).unwrap();
        let parameters = Parameters::new(&instance, &sets).unwrap();
        assert_eq!(parameters.CCOEF.at(&[0]), 5304.0);
        assert_eq!(parameters.EC.at(&[0]), 1.0);
    }

    #[test]
    fn duplicate_facility_identifiers_are_rejected() {
        let mut instance = Instance::base_case();
        instance.sets.customers.push("b1".to_string());
        assert!(matches!(
            Sets::new(&instance),
            Err(ConstructionError::DuplicateElement { .. })
        ));
    }

    #[test]
    fn periods_must_not_be_empty() {
        let mut instance = Instance::base_case();
        instance.sets.periods.clear();
        assert!(matches!(
            Sets::new(&instance),
            Err(ConstructionError::EmptySet { .. })
        ));
    }
}
