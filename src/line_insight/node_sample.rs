use std::collections::HashSet;

use super::error::{LineInsightError, LineInsightResult};
use super::parameter::Parameter;
use super::phasor::Phasor;
use super::types::*;

/// Snapshot of one grid node: its voltage and the currents flowing out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSample {
    node_number: NodeNumber,
    voltage: Parameter,       // start = node_number, destination = ground
    currents: Vec<Parameter>, // start = node_number, destination = neighbour
    rated_voltage: f64,
    rated_current: f64,
}

fn validate_rating(node: NodeNumber, rating: f64) -> LineInsightResult<f64> {
    if rating.is_finite() && rating > 0.0 {
        Ok(rating)
    } else {
        Err(LineInsightError::InvalidRating { node, rating })
    }
}

fn check_owned_by(node: NodeNumber, parameter: &Parameter) -> LineInsightResult<()> {
    if parameter.start_node() != node {
        return Err(LineInsightError::ForeignParameter {
            node,
            name: parameter.name().to_string(),
            start: parameter.start_node(),
        });
    }
    Ok(())
}

impl NodeSample {
    /// Build a node from its voltage phasor and `(current, destination node)` pairs,
    /// naming them `V<node>` and `I<node><destination>`. Ratings default to
    /// [`DEFAULT_RATED_VOLTAGE`] and [`DEFAULT_RATED_CURRENT`].
    pub fn new(
        node_number: NodeNumber,
        voltage: Phasor,
        currents: &[(Phasor, NodeNumber)],
    ) -> LineInsightResult<Self> {
        let voltage = Parameter::from_phasor(
            voltage,
            format!("V{node_number}"),
            VOLTAGE_UNITS,
            node_number,
            GROUND,
        );

        let currents = currents
            .iter()
            .map(|&(phasor, destination)| {
                Parameter::from_phasor(
                    phasor,
                    format!("I{node_number}{destination}"),
                    CURRENT_UNITS,
                    node_number,
                    destination,
                )
            })
            .collect();

        Self::from_parameters(node_number, voltage, currents)
    }

    /// Build a node from parameters created elsewhere, e.g. estimated from samples.
    pub fn from_parameters(
        node_number: NodeNumber,
        voltage: Parameter,
        currents: Vec<Parameter>,
    ) -> LineInsightResult<Self> {
        check_owned_by(node_number, &voltage)?;
        if voltage.destination_node() != GROUND {
            return Err(LineInsightError::VoltageNotToGround {
                node: node_number,
                name: voltage.name().to_string(),
                destination: voltage.destination_node(),
            });
        }

        let mut destinations = HashSet::with_capacity(currents.len());
        for current in &currents {
            check_owned_by(node_number, current)?;
            if !destinations.insert(current.destination_node()) {
                return Err(LineInsightError::DuplicateDestination {
                    node: node_number,
                    destination: current.destination_node(),
                });
            }
        }

        Ok(Self {
            node_number,
            voltage,
            currents,
            rated_voltage: DEFAULT_RATED_VOLTAGE,
            rated_current: DEFAULT_RATED_CURRENT,
        })
    }

    pub fn with_ratings(mut self, rated_voltage: f64, rated_current: f64) -> LineInsightResult<Self> {
        self.rated_voltage = validate_rating(self.node_number, rated_voltage)?;
        self.rated_current = validate_rating(self.node_number, rated_current)?;
        Ok(self)
    }

    pub fn node_number(&self) -> NodeNumber {
        self.node_number
    }

    pub fn voltage(&self) -> &Parameter {
        &self.voltage
    }

    pub fn currents(&self) -> &[Parameter] {
        &self.currents
    }

    pub fn rated_voltage(&self) -> f64 {
        self.rated_voltage
    }

    pub fn rated_current(&self) -> f64 {
        self.rated_current
    }

    /// Position of the current flowing from this node to `destination`.
    pub fn current_index_to(&self, destination: NodeNumber) -> Option<usize> {
        self.currents
            .iter()
            .position(|current| current.destination_node() == destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node2() -> NodeSample {
        NodeSample::new(
            2,
            Phasor::new(245_000.0, 13.0),
            &[
                (Phasor::new(25.0, -165.0), 1),
                (Phasor::new(15.0, 15.0), 0),
                (Phasor::new(10.0, 15.0), 3),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_parameters_are_named_and_tagged() {
        let node = node2();
        assert_eq!(node.voltage().name(), "V2");
        assert_eq!(node.voltage().node_pair(), (2, GROUND));
        assert_eq!(node.voltage().units(), VOLTAGE_UNITS);

        let names: Vec<_> = node.currents().iter().map(|c| c.name()).collect();
        assert_eq!(names, ["I21", "I20", "I23"]);
        assert!(node.currents().iter().all(|c| c.start_node() == 2));
        assert_eq!(node.rated_voltage(), DEFAULT_RATED_VOLTAGE);
        assert_eq!(node.rated_current(), DEFAULT_RATED_CURRENT);
    }

    #[test]
    fn test_current_index_to() {
        let node = node2();
        assert_eq!(node.current_index_to(3), Some(2));
        assert_eq!(node.current_index_to(7), None);
    }

    #[test]
    fn test_duplicate_destination_is_rejected() {
        let err = NodeSample::new(
            1,
            Phasor::new(250_000.0, 15.0),
            &[(Phasor::new(25.0, -165.0), 2), (Phasor::new(5.0, 15.0), 2)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            LineInsightError::DuplicateDestination {
                node: 1,
                destination: 2
            }
        );
    }

    #[test]
    fn test_foreign_current_is_rejected() {
        let voltage = Parameter::from_phasor(Phasor::new(1.0, 0.0), "V1", "V", 1, GROUND);
        let stray = Parameter::from_phasor(Phasor::new(1.0, 0.0), "I32", "A", 3, 2);
        assert!(matches!(
            NodeSample::from_parameters(1, voltage, vec![stray]),
            Err(LineInsightError::ForeignParameter { node: 1, start: 3, .. })
        ));
    }

    #[test]
    fn test_voltage_must_be_to_ground() {
        let voltage = Parameter::from_phasor(Phasor::new(1.0, 0.0), "V15", "V", 1, 5);
        let current = Parameter::from_phasor(Phasor::new(1.0, 0.0), "I12", "A", 1, 2);
        assert_eq!(
            NodeSample::from_parameters(1, voltage, vec![current]).unwrap_err(),
            LineInsightError::VoltageNotToGround {
                node: 1,
                name: "V15".to_string(),
                destination: 5
            }
        );
    }

    #[test]
    fn test_ratings() {
        let node = node2().with_ratings(500_000.0, 40.0).unwrap();
        assert_eq!(node.rated_voltage(), 500_000.0);
        assert_eq!(node.rated_current(), 40.0);
        assert!(node2().with_ratings(0.0, 25.0).is_err());
        assert!(node2().with_ratings(250_000.0, f64::NAN).is_err());
    }
}
