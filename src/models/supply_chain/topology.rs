use crate::error::ConstructionError;
use crate::problem::NodePair;
use log::warn;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Maps facility identifiers to the origin/destination node labels that key
/// distances, transport prices and transport capacities.
#[derive(Debug, Clone)]
pub struct Topology {
    pairs: HashMap<String, NodePair>,
    /// Origin labels, in facility order
    origins: Vec<String>,
    /// Destination labels, in facility order
    destinations: Vec<String>,
}

impl Topology {
    /// Resolve every facility in `facilities` against `table`. Without a table, facility `f`
    /// maps to (`o_f`, `i_f`).
    ///
    /// Every facility must have exactly one entry and no label may be shared by two facilities.
    pub fn new(
        facilities: &[&str],
        table: Option<&BTreeMap<String, NodePair>>,
    ) -> Result<Topology, ConstructionError> {
        let mut pairs = HashMap::with_capacity(facilities.len());
        let mut origins = Vec::with_capacity(facilities.len());
        let mut destinations = Vec::with_capacity(facilities.len());
        let mut seen_origins = HashSet::new();
        let mut seen_destinations = HashSet::new();

        for &facility in facilities {
            let pair = match table {
                Some(table) => table
                    .get(facility)
                    .cloned()
                    .ok_or_else(|| ConstructionError::UnknownFacility {
                        facility: facility.to_string(),
                    })?,
                None => NodePair {
                    origin: format!("o_{}", facility),
                    destination: format!("i_{}", facility),
                },
            };

            if !seen_origins.insert(pair.origin.clone()) {
                return Err(ConstructionError::DuplicateNodeLabel { label: pair.origin });
            }
            if !seen_destinations.insert(pair.destination.clone()) {
                return Err(ConstructionError::DuplicateNodeLabel {
                    label: pair.destination,
                });
            }

            origins.push(pair.origin.clone());
            destinations.push(pair.destination.clone());
            pairs.insert(facility.to_string(), pair);
        }

        if let Some(table) = table {
            for unused in table.keys().filter(|f| !pairs.contains_key(*f)) {
                warn!("topology entry for unknown facility `{}` is ignored", unused);
            }
        }

        Ok(Topology {
            pairs,
            origins,
            destinations,
        })
    }

    pub fn origin(&self, facility: &str) -> Result<&str, ConstructionError> {
        self.pair(facility).map(|p| p.origin.as_str())
    }

    pub fn destination(&self, facility: &str) -> Result<&str, ConstructionError> {
        self.pair(facility).map(|p| p.destination.as_str())
    }

    fn pair(&self, facility: &str) -> Result<&NodePair, ConstructionError> {
        self.pairs
            .get(facility)
            .ok_or_else(|| ConstructionError::UnknownFacility {
                facility: facility.to_string(),
            })
    }

    /// The origin node set N
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    /// The destination node set N'
    pub fn destinations(&self) -> &[String] {
        &self.destinations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(o: &str, i: &str) -> NodePair {
        NodePair {
            origin: o.to_string(),
            destination: i.to_string(),
        }
    }

    #[test]
    fn resolves_from_table() {
        let table: BTreeMap<_, _> = [
            ("of1".to_string(), pair("o_of", "i_of")),
            ("r1".to_string(), pair("o_r1", "i_r1")),
        ]
            .into_iter()
            .collect();
        let topology = Topology::new(&["of1", "r1"], Some(&table)).unwrap();
        assert_eq!(topology.origin("of1"), Ok("o_of"));
        assert_eq!(topology.destination("r1"), Ok("i_r1"));
        assert_eq!(topology.origins(), &["o_of".to_string(), "o_r1".to_string()]);
    }

    #[test]
    fn missing_entry_fails_eagerly() {
        let table: BTreeMap<_, _> =
            [("of1".to_string(), pair("o_of", "i_of"))].into_iter().collect();
        let err = Topology::new(&["of1", "r1"], Some(&table)).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::UnknownFacility {
                facility: "r1".to_string()
            }
        );
    }

    #[test]
    fn unknown_lookup_is_an_error() {
        let topology = Topology::new(&["b1"], None).unwrap();
        assert_eq!(topology.origin("b1"), Ok("o_b1"));
        assert!(matches!(
            topology.destination("b2"),
            Err(ConstructionError::UnknownFacility { .. })
        ));
    }

    #[test]
    fn shared_labels_are_rejected() {
        let table: BTreeMap<_, _> = [
            ("of1".to_string(), pair("o_of", "i_of1")),
            ("of2".to_string(), pair("o_of", "i_of2")),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            Topology::new(&["of1", "of2"], Some(&table)),
            Err(ConstructionError::DuplicateNodeLabel { .. })
        ));
    }
}
