//! Weighted euclidean distance between a known and an unknown line sample.

use std::sync::Arc;

use super::error::{LineInsightError, LineInsightResult};
use super::line_sample::LineSample;
use super::parameter::Parameter;
use super::types::DistanceWeights;

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceSample {
    distance: f64,
    is_working: bool, // Status of the known line
    line: Arc<LineSample>,
    weights: DistanceWeights,
}

fn same_pairs(known: &[Parameter], unknown: &[Parameter]) -> bool {
    known.len() == unknown.len()
        && known
            .iter()
            .zip(unknown)
            .all(|(k, u)| k.node_pair() == u.node_pair())
}

/*
* @brief Describe why two line samples cannot be compared.
* @return None when they are samples of the same line
*/
fn mismatch(known: &LineSample, unknown: &LineSample) -> Option<&'static str> {
    if known.node1_line_current_norm().node_pair() != unknown.node1_line_current_norm().node_pair()
        || known.node2_line_current_norm().node_pair() != unknown.node2_line_current_norm().node_pair()
    {
        return Some("line currents connect different nodes");
    }
    if known.node1_voltage_norm().start_node() != unknown.node1_voltage_norm().start_node()
        || known.node2_voltage_norm().start_node() != unknown.node2_voltage_norm().start_node()
    {
        return Some("node voltages belong to different nodes");
    }
    if !same_pairs(known.node1_other_currents_norm(), unknown.node1_other_currents_norm()) {
        return Some("node 1 other currents differ");
    }
    if !same_pairs(known.node2_other_currents_norm(), unknown.node2_other_currents_norm()) {
        return Some("node 2 other currents differ");
    }
    None
}

/// True when both samples have the same node pairing on every feature, in order.
pub fn are_samples_of_the_same_line(known: &LineSample, unknown: &LineSample) -> bool {
    mismatch(known, unknown).is_none()
}

fn squared_difference(known: &Parameter, unknown: &Parameter) -> f64 {
    (known.phasor() - unknown.phasor()).rms_value().powi(2)
}

fn other_currents_term(known: &[Parameter], unknown: &[Parameter], weight: f64) -> f64 {
    let count = known.len() as f64;
    known
        .iter()
        .zip(unknown)
        .map(|(k, u)| weight / (2.0 * count) * squared_difference(k, u))
        .sum()
}

/*
* @brief Calculate the weighted euclidean distance between two comparable line samples.
* @param known Line sample with a known status
* @param unknown Line sample with an unknown status
* @param weights Feature group weights
* @return sqrt of the weighted sum of squared phasor differences
*/
pub fn calculate_distance(known: &LineSample, unknown: &LineSample, weights: &DistanceWeights) -> f64 {
    let line = weights.line / 2.0
        * (squared_difference(known.node1_line_current_norm(), unknown.node1_line_current_norm())
            + squared_difference(known.node2_line_current_norm(), unknown.node2_line_current_norm()));

    let node = weights.node / 2.0
        * (squared_difference(known.node1_voltage_norm(), unknown.node1_voltage_norm())
            + squared_difference(known.node2_voltage_norm(), unknown.node2_voltage_norm()));

    let other = other_currents_term(
        known.node1_other_currents_norm(),
        unknown.node1_other_currents_norm(),
        weights.other,
    ) + other_currents_term(
        known.node2_other_currents_norm(),
        unknown.node2_other_currents_norm(),
        weights.other,
    );

    log::debug!("distance terms: line {line:.6}, node {node:.6}, other {other:.6}");

    (line + node + other).sqrt()
}

impl DistanceSample {
    pub fn new(known: Arc<LineSample>, unknown: &LineSample) -> LineInsightResult<Self> {
        Self::with_weights(known, unknown, DistanceWeights::default())
    }

    pub fn with_weights(
        known: Arc<LineSample>,
        unknown: &LineSample,
        weights: DistanceWeights,
    ) -> LineInsightResult<Self> {
        weights.validate()?;

        if let Some(reason) = mismatch(&known, unknown) {
            log::warn!("refusing to compare line samples: {reason}");
            return Err(LineInsightError::NotSameLine {
                reason: reason.to_string(),
            });
        }

        Ok(Self {
            distance: calculate_distance(&known, unknown, &weights),
            is_working: known.is_working(),
            line: known,
            weights,
        })
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn is_working(&self) -> bool {
        self.is_working
    }

    pub fn line(&self) -> &Arc<LineSample> {
        &self.line
    }

    pub fn weights(&self) -> &DistanceWeights {
        &self.weights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_insight::node_sample::NodeSample;
    use crate::line_insight::phasor::Phasor;

    fn line(
        v1: Phasor,
        node1_currents: &[(Phasor, u32)],
        v2: Phasor,
        node2_currents: &[(Phasor, u32)],
        is_working: bool,
    ) -> LineSample {
        let node1 = Arc::new(NodeSample::new(1, v1, node1_currents).unwrap());
        let node2 = Arc::new(NodeSample::new(2, v2, node2_currents).unwrap());
        LineSample::new(node1, node2, is_working).unwrap()
    }

    fn reference_line() -> LineSample {
        line(
            Phasor::new(250_000.0, 15.0),
            &[(Phasor::new(25.0, -165.0), 0), (Phasor::new(25.0, 15.0), 2)],
            Phasor::new(245_000.0, 13.0),
            &[
                (Phasor::new(25.0, -165.0), 1),
                (Phasor::new(15.0, 15.0), 0),
                (Phasor::new(10.0, 15.0), 3),
            ],
            true,
        )
    }

    #[test]
    fn test_identical_samples_are_at_zero_distance() {
        let known = Arc::new(reference_line());
        let distance = DistanceSample::new(known, &reference_line()).unwrap();
        assert_eq!(distance.distance(), 0.0);
        assert!(distance.is_working());
    }

    #[test]
    fn test_weighted_terms() {
        // Only the node 1 voltage differs, by 0.1 pu
        let other = line(
            Phasor::new(275_000.0, 15.0),
            &[(Phasor::new(25.0, -165.0), 0), (Phasor::new(25.0, 15.0), 2)],
            Phasor::new(245_000.0, 13.0),
            &[
                (Phasor::new(25.0, -165.0), 1),
                (Phasor::new(15.0, 15.0), 0),
                (Phasor::new(10.0, 15.0), 3),
            ],
            false,
        );
        let distance = DistanceSample::new(Arc::new(other), &reference_line()).unwrap();
        // sqrt(4 / 2 * 0.1^2)
        assert!((distance.distance() - (0.02f64).sqrt()).abs() < 1e-9);
        assert!(!distance.is_working());

        // Only one of node 2's two other currents differs, by 0.2 pu
        let other = line(
            Phasor::new(250_000.0, 15.0),
            &[(Phasor::new(25.0, -165.0), 0), (Phasor::new(25.0, 15.0), 2)],
            Phasor::new(245_000.0, 13.0),
            &[
                (Phasor::new(25.0, -165.0), 1),
                (Phasor::new(20.0, 15.0), 0),
                (Phasor::new(10.0, 15.0), 3),
            ],
            true,
        );
        let distance = DistanceSample::new(Arc::new(other), &reference_line()).unwrap();
        // sqrt(1 / (2 * 2) * 0.2^2)
        assert!((distance.distance() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_weights_are_refused() {
        let weights = DistanceWeights {
            node: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            DistanceSample::with_weights(Arc::new(reference_line()), &reference_line(), weights),
            Err(LineInsightError::InvalidWeight { group: "node", .. })
        ));
    }

    #[test]
    fn test_custom_weights() {
        let other = line(
            Phasor::new(250_000.0, 15.0),
            &[(Phasor::new(25.0, -165.0), 0), (Phasor::new(50.0, 15.0), 2)],
            Phasor::new(245_000.0, 13.0),
            &[
                (Phasor::new(25.0, -165.0), 1),
                (Phasor::new(15.0, 15.0), 0),
                (Phasor::new(10.0, 15.0), 3),
            ],
            true,
        );
        let weights = DistanceWeights {
            line: 2.0,
            node: 0.0,
            other: 0.0,
        };
        let distance = DistanceSample::with_weights(Arc::new(other), &reference_line(), weights).unwrap();
        // sqrt(2 / 2 * 1.0^2)
        assert!((distance.distance() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_different_other_current_counts_are_not_comparable() {
        let fewer = line(
            Phasor::new(250_000.0, 15.0),
            &[(Phasor::new(25.0, -165.0), 0), (Phasor::new(25.0, 15.0), 2)],
            Phasor::new(245_000.0, 13.0),
            &[(Phasor::new(25.0, -165.0), 1), (Phasor::new(15.0, 15.0), 0)],
            true,
        );
        let reference = reference_line();
        assert!(!are_samples_of_the_same_line(&fewer, &reference));
        assert!(matches!(
            DistanceSample::new(Arc::new(fewer), &reference),
            Err(LineInsightError::NotSameLine { .. })
        ));
    }

    #[test]
    fn test_reordered_other_currents_are_not_comparable() {
        let reordered = line(
            Phasor::new(250_000.0, 15.0),
            &[(Phasor::new(25.0, -165.0), 0), (Phasor::new(25.0, 15.0), 2)],
            Phasor::new(245_000.0, 13.0),
            &[
                (Phasor::new(25.0, -165.0), 1),
                (Phasor::new(10.0, 15.0), 3),
                (Phasor::new(15.0, 15.0), 0),
            ],
            true,
        );
        assert!(!are_samples_of_the_same_line(&reordered, &reference_line()));
    }

    #[test]
    fn test_swapped_nodes_are_not_comparable() {
        let reference = reference_line();
        let swapped = LineSample::new(reference.node2().clone(), reference.node1().clone(), true).unwrap();
        assert!(!are_samples_of_the_same_line(&swapped, &reference));
        assert!(are_samples_of_the_same_line(&reference, &reference));
    }
}
