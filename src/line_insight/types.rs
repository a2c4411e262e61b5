use super::error::{LineInsightError, LineInsightResult};

pub const DEFAULT_RATED_VOLTAGE: f64 = 250_000.0; // Volts
pub const DEFAULT_RATED_CURRENT: f64 = 25.0; // Amps

pub const DEFAULT_LINE_WEIGHT: f64 = 20.0;
pub const DEFAULT_NODE_WEIGHT: f64 = 4.0;
pub const DEFAULT_OTHER_WEIGHT: f64 = 1.0;

pub const DEFAULT_NEAREST_NEIGHBORS: usize = 5;

/// Node number used as the destination of node voltages (ground).
pub const GROUND: NodeNumber = 0;

pub const VOLTAGE_UNITS: &str = "V";
pub const CURRENT_UNITS: &str = "A";

pub type NodeNumber = u32;

/// An instantaneous measurement of a voltage or current at an exact time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InstantaneousMeasurement {
    pub time_stamp: f64, // Seconds
    pub value: f64,      // Signal amplitude in base units
}

impl InstantaneousMeasurement {
    pub fn new(time_stamp: f64, value: f64) -> Self {
        Self { time_stamp, value }
    }
}

/// Weights of each feature group in the line sample distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceWeights {
    pub line: f64,  // Line currents, split evenly between both ends
    pub node: f64,  // Node voltages, split evenly between both ends
    pub other: f64, // Other currents, split evenly across each node's list
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self {
            line: DEFAULT_LINE_WEIGHT,
            node: DEFAULT_NODE_WEIGHT,
            other: DEFAULT_OTHER_WEIGHT,
        }
    }
}

impl DistanceWeights {
    /// Every weight must be finite and non-negative so distances stay real and ordered.
    pub fn validate(&self) -> LineInsightResult<()> {
        for (group, weight) in [("line", self.line), ("node", self.node), ("other", self.other)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(LineInsightError::InvalidWeight { group, weight });
            }
        }
        Ok(())
    }
}

/// Inititial configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LineInsightConfig {
    pub rated_voltage: f64,
    pub rated_current: f64,
    pub weights: DistanceWeights,
    pub nearest_neighbors: usize,
}

impl Default for LineInsightConfig {
    fn default() -> Self {
        Self {
            rated_voltage: DEFAULT_RATED_VOLTAGE,
            rated_current: DEFAULT_RATED_CURRENT,
            weights: DistanceWeights::default(),
            nearest_neighbors: DEFAULT_NEAREST_NEIGHBORS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_are_valid() {
        assert!(DistanceWeights::default().validate().is_ok());
        assert!(DistanceWeights { line: 0.0, node: 0.0, other: 0.0 }.validate().is_ok());
    }

    #[test]
    fn test_negative_or_non_finite_weights_are_rejected() {
        let negative = DistanceWeights {
            other: -50.0,
            ..Default::default()
        };
        assert_eq!(
            negative.validate(),
            Err(LineInsightError::InvalidWeight {
                group: "other",
                weight: -50.0
            })
        );

        let infinite = DistanceWeights {
            line: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            infinite.validate(),
            Err(LineInsightError::InvalidWeight { group: "line", .. })
        ));

        let nan = DistanceWeights {
            node: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(LineInsightError::InvalidWeight { group: "node", .. })
        ));
    }
}
