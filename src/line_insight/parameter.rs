use std::f64::consts::SQRT_2;

use super::error::{LineInsightError, LineInsightResult};
use super::phasor::Phasor;
use super::types::{InstantaneousMeasurement, NodeNumber};

pub const PER_UNIT: &str = "pu";

/// A parameter of interest in the power grid like a node voltage or line current.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    samples: Vec<InstantaneousMeasurement>, // Empty when built from a phasor
    phasor: Phasor,
    name: String,
    units: String,
    start_node: NodeNumber,
    destination_node: NodeNumber, // 0 is ground
}

/*
* @brief Calculate the RMS value of a set of samples.
* @param samples Instantaneous measurements
* @return sqrt(1/n * SUM(xi^2)), or 0 for an empty slice
*/
pub fn calculate_rms(samples: &[InstantaneousMeasurement]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }

    let square: f64 = samples.iter().map(|s| s.value * s.value).sum();

    (square / samples.len() as f64).sqrt()
}

/*
* @brief Calculate the phase angle of a sinusoid from its first two samples.
* @param samples Instantaneous measurements (at least 2)
* @param rms RMS value of the samples
* @return Phase angle in degrees, or InsufficientSamples with fewer than 2 samples
* @note The slope between the first two samples decides between asin() and its
*       second or third quadrant mirror.
*/
pub fn calculate_phase_angle(samples: &[InstantaneousMeasurement], rms: f64) -> LineInsightResult<f64> {
    let (first, second) = match samples {
        [first, second, ..] => (first.value, second.value),
        _ => return Err(LineInsightError::InsufficientSamples { found: samples.len() }),
    };
    let peak = rms * SQRT_2;

    let angle = if first >= peak {
        90.0
    } else if first <= -peak {
        -90.0
    } else if second >= first {
        // Ascending
        (first / peak).asin().to_degrees()
    } else if first >= 0.0 {
        // Descending, Q2
        180.0 - (first / peak).asin().to_degrees()
    } else {
        // Descending, Q3
        -180.0 - (first / peak).asin().to_degrees()
    };

    Ok(angle)
}

/// Estimate the phasor of a set of samples assumed to be a pure sinusoid.
pub fn estimate_phasor(samples: &[InstantaneousMeasurement]) -> LineInsightResult<Phasor> {
    let rms = calculate_rms(samples);
    let angle = calculate_phase_angle(samples, rms)?;

    Ok(Phasor::new(rms, angle))
}

impl Parameter {
    pub fn from_phasor(
        phasor: Phasor,
        name: impl Into<String>,
        units: impl Into<String>,
        start_node: NodeNumber,
        destination_node: NodeNumber,
    ) -> Self {
        Self {
            samples: Vec::new(),
            phasor,
            name: name.into(),
            units: units.into(),
            start_node,
            destination_node,
        }
    }

    /// Build a parameter whose phasor is estimated from `samples`, which are kept.
    pub fn from_samples(
        samples: Vec<InstantaneousMeasurement>,
        name: impl Into<String>,
        units: impl Into<String>,
        start_node: NodeNumber,
        destination_node: NodeNumber,
    ) -> LineInsightResult<Self> {
        let phasor = estimate_phasor(&samples)?;

        Ok(Self {
            samples,
            phasor,
            name: name.into(),
            units: units.into(),
            start_node,
            destination_node,
        })
    }

    /// Same name and node pair, with `phasor` divided by `(rating, 0deg)`.
    pub fn per_unit(&self, rating: f64) -> LineInsightResult<Parameter> {
        let phasor = self.phasor.checked_div(Phasor::new(rating, 0.0))?;

        Ok(Parameter::from_phasor(
            phasor,
            self.name.clone(),
            PER_UNIT,
            self.start_node,
            self.destination_node,
        ))
    }

    pub fn samples(&self) -> &[InstantaneousMeasurement] {
        &self.samples
    }

    pub fn number_of_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn phasor(&self) -> Phasor {
        self.phasor
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &str {
        &self.units
    }

    pub fn start_node(&self) -> NodeNumber {
        self.start_node
    }

    pub fn destination_node(&self) -> NodeNumber {
        self.destination_node
    }

    /// The `(start, destination)` pair used to check two samples are commensurable.
    pub fn node_pair(&self) -> (NodeNumber, NodeNumber) {
        (self.start_node, self.destination_node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line_insight::generate_signal::sample_sinusoid;

    fn percent_error(reference: Phasor, estimated: Phasor) -> f64 {
        100.0 * (reference - estimated).rms_value() / reference.rms_value()
    }

    #[test]
    fn test_estimation_accuracy() {
        let reference = Phasor::new(120.0, 30.0);
        let samples = sample_sinusoid(reference, 60.0, 32_000.0, 1.0, 0.0);
        assert_eq!(samples.len(), 32_000);

        let parameter = Parameter::from_samples(samples, "V1", "V", 1, 0).unwrap();
        assert_eq!(parameter.number_of_samples(), 32_000);
        assert!(percent_error(reference, parameter.phasor()) < 0.01);
    }

    #[test]
    fn test_estimation_in_every_quadrant() {
        for angle in [-150.0, -90.0, -45.0, 0.0, 60.0, 90.0, 150.0, 180.0] {
            let reference = Phasor::new(25.0, angle);
            let samples = sample_sinusoid(reference, 60.0, 32_000.0, 1.0, 0.0);
            let estimated = estimate_phasor(&samples).unwrap();
            assert!(
                percent_error(reference, estimated) < 0.1,
                "{reference} estimated as {estimated}"
            );
        }
    }

    #[test]
    fn test_insufficient_samples() {
        let one = vec![InstantaneousMeasurement::new(0.0, 1.0)];
        assert_eq!(
            estimate_phasor(&one),
            Err(LineInsightError::InsufficientSamples { found: 1 })
        );
        assert!(Parameter::from_samples(Vec::new(), "I12", "A", 1, 2).is_err());
    }

    #[test]
    fn test_rms() {
        let samples: Vec<_> = [3.0, -3.0, 3.0, -3.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| InstantaneousMeasurement::new(i as f64, v))
            .collect();
        assert_eq!(calculate_rms(&samples), 3.0);
        assert_eq!(calculate_rms(&[]), 0.0);
    }

    #[test]
    fn test_first_sample_at_peak() {
        let samples = [
            InstantaneousMeasurement::new(0.0, 2.0),
            InstantaneousMeasurement::new(1.0, 0.0),
        ];
        // rms = sqrt(2), peak = 2
        assert_eq!(calculate_phase_angle(&samples, calculate_rms(&samples)), Ok(90.0));
    }

    #[test]
    fn test_phase_angle_needs_two_samples() {
        let one = [InstantaneousMeasurement::new(0.0, 1.0)];
        assert_eq!(
            calculate_phase_angle(&one, 1.0),
            Err(LineInsightError::InsufficientSamples { found: 1 })
        );
        assert_eq!(
            calculate_phase_angle(&[], 1.0),
            Err(LineInsightError::InsufficientSamples { found: 0 })
        );
    }

    #[test]
    fn test_from_phasor_keeps_no_samples() {
        let p = Parameter::from_phasor(Phasor::new(25.0, -165.0), "I12", "A", 1, 2);
        assert_eq!(p.number_of_samples(), 0);
        assert_eq!(p.node_pair(), (1, 2));
        assert_eq!(p.units(), "A");
    }

    #[test]
    fn test_per_unit() {
        let p = Parameter::from_phasor(Phasor::new(25.0, -165.0), "I12", "A", 1, 2);
        let norm = p.per_unit(25.0).unwrap();
        assert!((norm.phasor().rms_value() - 1.0).abs() < 1e-12);
        assert!((norm.phasor().phase_angle_degrees() + 165.0).abs() < 1e-12);
        assert_eq!(norm.name(), "I12");
        assert_eq!(norm.units(), PER_UNIT);
        assert!(p.per_unit(0.0).is_err());
    }
}
