use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// The raw data of a supply chain instance, as read from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// The name of the instance
    pub name: String,
    /// The elements of every index set
    pub sets: SetData,
    /// Facility identifier to network node labels. Defaults to (`o_<id>`, `i_<id>`) for every
    /// facility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<BTreeMap<String, NodePair>>,
    /// Carbon tax per unit of emitted CO2
    #[serde(default)]
    pub carbon_tax: f64,
    /// Indexed parameters, by name
    #[serde(default)]
    pub parameters: BTreeMap<String, ParamData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetData {
    pub materials: Vec<String>,
    pub products: Vec<String>,
    /// Ordered; the position defines the "previous period"
    pub periods: Vec<String>,
    pub tools: Vec<String>,
    pub scenarios: Vec<String>,
    pub bases: Vec<String>,
    pub customers: Vec<String>,
    pub overseas_customers: Vec<String>,
    pub oil_fields: Vec<String>,
    pub refineries: Vec<String>,
    pub terminals: Vec<String>,
}

/// The origin and destination node labels of a facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePair {
    pub origin: String,
    pub destination: String,
}

/// The entries of one indexed parameter. Keys that are not listed take `default`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamData {
    #[serde(default)]
    pub default: f64,
    #[serde(default)]
    pub values: Vec<(Vec<String>, f64)>,
}

impl ParamData {
    pub fn new(default: f64, values: &[(&[&str], f64)]) -> ParamData {
        ParamData {
            default,
            values: values
                .iter()
                .map(|(key, value)| (key.iter().map(|s| s.to_string()).collect(), *value))
                .collect(),
        }
    }
}

fn labels(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

impl Instance {
    pub fn from_json(json: &str) -> Result<Instance> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Instance> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// An instance with a single element in every set and no parameter data.
    /// Every parameter therefore takes its default of zero.
    pub fn single_element(name: &str) -> Instance {
        Instance {
            name: name.to_string(),
            sets: SetData {
                materials: labels(&["m1"]),
                products: labels(&["p1"]),
                periods: labels(&["tp1"]),
                tools: labels(&["tr1"]),
                scenarios: labels(&["SC1"]),
                bases: labels(&["b1"]),
                customers: labels(&["c1"]),
                overseas_customers: labels(&["oc1"]),
                oil_fields: labels(&["of1"]),
                refineries: labels(&["r1"]),
                terminals: labels(&["te1"]),
            },
            topology: None,
            carbon_tax: 0.0,
            parameters: BTreeMap::new(),
        }
    }

    /// Set (or replace) the data of parameter `name`
    pub fn with_param(mut self, name: &str, data: ParamData) -> Instance {
        self.parameters.insert(name.to_string(), data);
        self
    }

    /// The smallest network: one oil field, terminal, refinery, base, domestic and
    /// overseas customer, one material, product, tool, scenario and period.
    pub fn base_case() -> Instance {
        let topology = [
            ("of1", "o_of", "i_of"),
            ("te1", "o_te", "i_te"),
            ("r1", "o_r1", "i_r1"),
            ("b1", "o_b1", "i_b1"),
            ("c1", "o_c1", "i_c1"),
            ("oc1", "o_oc1", "i_oc1"),
        ]
        .iter()
        .map(|(f, o, i)| {
            (
                f.to_string(),
                NodePair {
                    origin: o.to_string(),
                    destination: i.to_string(),
                },
            )
        })
        .collect();

        let mut instance = Instance::single_element("base_case");
        instance.topology = Some(topology);
        instance.carbon_tax = 10.0;

        let routes = [
            ("o_of", "i_r1"),
            ("o_te", "i_r1"),
            ("o_r1", "i_te"),
            ("o_r1", "i_b1"),
            ("o_te", "i_oc1"),
            ("o_b1", "i_c1"),
        ];
        let distances: Vec<(&[&str], f64)> = vec![
            (&["o_of", "i_r1"][..], 10.0),
            (&["o_te", "i_r1"][..], 0.0),
            (&["o_r1", "i_te"][..], 10.0),
            (&["o_r1", "i_b1"][..], 10.0),
            (&["o_te", "i_oc1"][..], 10.0),
            (&["o_b1", "i_c1"][..], 10.0),
        ];
        let capacity: Vec<Vec<&str>> =
            routes.iter().map(|(o, i)| vec![*o, *i, "tr1", "tp1"]).collect();
        let capacity: Vec<(&[&str], f64)> = capacity.iter().map(|k| (&k[..], 1000.0)).collect();

        let one = |key: &[&str], value: f64| ParamData::new(0.0, &[(key, value)]);

        instance
            .with_param("BCK", one(&["p1", "tp1"][..], 50.0))
            .with_param("CAPL", one(&["r1", "m1", "tp1"][..], 100.0))
            .with_param("CAPU", one(&["r1", "m1", "tp1"][..], 400.0))
            .with_param("DEM", one(&["p1", "c1", "SC1", "tp1"][..], 24.0))
            .with_param("DEM_oc", one(&["p1", "oc1", "SC1", "tp1"][..], 24.0))
            .with_param("DIS", ParamData::new(0.0, &distances))
            .with_param("DSR", one(&["r1", "m1"][..], 0.5))
            .with_param("EPPU", one(&["p1", "tp1"][..], 300.0))
            .with_param("EPUP", one(&["p1", "te1", "tp1"][..], 50.0))
            .with_param("IVU", one(&["m1", "r1", "tp1"][..], 100.0))
            .with_param("IVU_b", one(&["p1", "b1", "tp1"][..], 100.0))
            .with_param("IVU_te", one(&["p1", "te1", "tp1"][..], 100.0))
            .with_param("IVUP", one(&["m1", "r1", "tp1"][..], 100.0))
            .with_param("IVUP_b", one(&["p1", "b1", "tp1"][..], 100.0))
            .with_param("IVUP_te", one(&["p1", "te1", "tp1"][..], 100.0))
            .with_param("MPU", one(&["m1", "tp1"][..], 150.0))
            .with_param("MUP", one(&["m1", "te1", "tp1"][..], 800.0))
            .with_param("MUP_of", one(&["m1", "of1", "tp1"][..], 800.0))
            .with_param(
                "MTUP",
                ParamData::new(
                    0.0,
                    &[
                        (&["m1", "o_of", "i_r1", "tr1", "tp1"][..], 85.0),
                        (&["m1", "o_te", "i_r1", "tr1", "tp1"][..], 85.0),
                    ],
                ),
            )
            .with_param(
                "PTUP",
                ParamData::new(
                    0.0,
                    &[
                        (&["p1", "o_r1", "i_te", "tr1", "tp1"][..], 10.0),
                        (&["p1", "o_r1", "i_b1", "tr1", "tp1"][..], 10.0),
                        (&["p1", "o_te", "i_oc1", "tr1", "tp1"][..], 10.0),
                        (&["p1", "o_b1", "i_c1", "tr1", "tp1"][..], 10.0),
                    ],
                ),
            )
            .with_param("PUP", one(&["p1", "te1", "SC1", "tp1"][..], 936.0))
            .with_param("PUP_b", one(&["p1", "b1", "SC1", "tp1"][..], 936.0))
            .with_param("QBU", one(&["p1", "c1", "tp1"][..], 500.0))
            .with_param("QBU_oc", one(&["p1", "oc1", "tp1"][..], 500.0))
            .with_param("QSU", one(&["p1", "c1", "tp1"][..], 500.0))
            .with_param("QSU_oc", one(&["p1", "oc1", "tp1"][..], 500.0))
            .with_param("ROUP", one(&["r1", "m1", "tp1"][..], 50.0))
            .with_param("SC_m", one(&["m1", "tp1"][..], 50.0))
            .with_param("SC_p", one(&["p1", "tp1"][..], 50.0))
            .with_param("SUR", one(&["p1", "tp1"][..], 30.0))
            .with_param("TCAU", ParamData::new(0.0, &capacity))
            .with_param("YDR", one(&["r1", "m1", "p1"][..], 1.0))
            .with_param("YDR_tp", one(&["r1", "m1", "tp1"][..], 1.0))
            .with_param("CCOEF", one(&["tr1"][..], 5304.0))
            .with_param("EC", one(&["r1"][..], 79.0))
            .with_param("PROB", one(&["SC1"][..], 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_base_case_matches_built_in() {
        let shipped = Instance::from_json(include_str!("../data/base_case.json")).unwrap();
        assert_eq!(shipped, Instance::base_case());
    }

    #[test]
    fn json_round_trip_keeps_parameters() {
        let instance = Instance::base_case();
        let parsed = Instance::from_json(&instance.json().unwrap()).unwrap();
        assert_eq!(parsed.parameters["CAPL"].values[0].1, 100.0);
        assert_eq!(parsed, instance);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let instance = Instance::from_json(r#"{"name": "x", "sets": {"periods": ["t"]}}"#).unwrap();
        assert!(instance.topology.is_none());
        assert_eq!(instance.carbon_tax, 0.0);
        assert!(instance.sets.materials.is_empty());
        assert!(instance.parameters.is_empty());
    }
}
