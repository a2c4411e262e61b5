use ndarray::Array1;
use rand::Rng;
use std::f64::consts::{PI, SQRT_2};
use std::sync::Arc;

use super::error::{LineInsightError, LineInsightResult};
use super::line_sample::LineSample;
use super::node_sample::NodeSample;
use super::parameter::Parameter;
use super::phasor::Phasor;
use super::types::*;

pub const FREQ_NOMINAL_60: f64 = 60.0;
pub const SAMPLES_PER_SECOND: f64 = 32_000.0;
pub const SAMPLING_TIME: f64 = 1.0; // Seconds

const LINES_WORKING: usize = 6;
const LINES_NOT_WORKING: usize = 4;
const SCALE_MIN: f64 = 0.9;
const SCALE_SPREAD: f64 = 0.2;

fn noise(rng: &mut impl Rng, amplitude: f64, percent: f64) -> f64 {
    if percent > 0.0 {
        amplitude * percent / 100.0 * rng.gen_range(-1.0..1.0)
    } else {
        0.0
    }
}

/*
* @brief Sample the sinusoid described by a phasor.
* @param reference Phasor of the signal (RMS and phase angle)
* @param frequency Signal frequency in Hz
* @param samples_per_second Sampling rate
* @param duration Sampling time in seconds
* @param noise_percent Uniform noise as a percentage of the peak (0 disables it)
* @return A * sin(2*pi*f*t + theta) with A = sqrt(2) * RMS, from t = 0
*/
pub fn sample_sinusoid(
    reference: Phasor,
    frequency: f64,
    samples_per_second: f64,
    duration: f64,
    noise_percent: f64,
) -> Vec<InstantaneousMeasurement> {
    let mut rng = rand::thread_rng();
    let num_samples = (samples_per_second * duration) as usize;
    let samples = Array1::range(0.0, num_samples as f64, 1.0);

    let amplitude = SQRT_2 * reference.rms_value();
    let theta = reference.phase_angle_degrees().to_radians();

    samples
        .iter()
        .map(|&s| {
            let t = s / samples_per_second;
            let value = amplitude * (2.0 * PI * frequency * t + theta).sin() + noise(&mut rng, amplitude, noise_percent);
            InstantaneousMeasurement::new(t, value)
        })
        .collect()
}

/// Waveform capture settings for [`sample_node_sample`].
#[derive(Debug, Clone, Copy)]
pub struct SamplingConfig {
    pub frequency: f64,
    pub samples_per_second: f64,
    pub duration: f64,
    pub noise_percent: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            frequency: FREQ_NOMINAL_60,
            samples_per_second: SAMPLES_PER_SECOND,
            duration: SAMPLING_TIME,
            noise_percent: 0.0,
        }
    }
}

/// Build a node sample whose parameters are estimated from sampled waveforms
/// of the given reference phasors.
pub fn sample_node_sample(
    node_number: NodeNumber,
    voltage: Phasor,
    currents: &[(Phasor, NodeNumber)],
    sampling: &SamplingConfig,
) -> LineInsightResult<NodeSample> {
    let capture = |reference: Phasor| {
        sample_sinusoid(
            reference,
            sampling.frequency,
            sampling.samples_per_second,
            sampling.duration,
            sampling.noise_percent,
        )
    };

    let voltage = Parameter::from_samples(
        capture(voltage),
        format!("V{node_number}"),
        VOLTAGE_UNITS,
        node_number,
        GROUND,
    )?;

    let currents = currents
        .iter()
        .map(|&(reference, destination)| {
            Parameter::from_samples(
                capture(reference),
                format!("I{node_number}{destination}"),
                CURRENT_UNITS,
                node_number,
                destination,
            )
        })
        .collect::<LineInsightResult<Vec<_>>>()?;

    NodeSample::from_parameters(node_number, voltage, currents)
}

/// Average phasors of one node with the line working and not working.
#[derive(Debug, Clone)]
pub struct NodeScenario {
    pub node_number: NodeNumber,
    pub working_voltage: Phasor,
    pub not_working_voltage: Phasor,
    pub working_currents: Vec<(Phasor, NodeNumber)>,
    pub not_working_currents: Vec<(Phasor, NodeNumber)>,
}

#[derive(Debug, Clone)]
pub struct LineScenario {
    pub node1: NodeScenario,
    pub node2: NodeScenario,
    pub lines_working: usize,
    pub lines_not_working: usize,
    pub noise_percent: f64, // Random jitter on the 0.9 - 1.1 spread, below 100 (0 disables it)
    pub rated_voltage: f64,
    pub rated_current: f64,
}

impl Default for LineScenario {
    fn default() -> Self {
        Self {
            node1: NodeScenario {
                node_number: 1,
                working_voltage: Phasor::new(250_000.0, 15.0),
                not_working_voltage: Phasor::new(50_000.0, -150.0),
                working_currents: vec![(Phasor::new(25.0, 165.0), GROUND), (Phasor::new(25.0, -15.0), 2)],
                not_working_currents: vec![(Phasor::new(250.0, -70.0), GROUND), (Phasor::new(250.0, 110.0), 2)],
            },
            node2: NodeScenario {
                node_number: 2,
                working_voltage: Phasor::new(250_000.0, 15.0),
                not_working_voltage: Phasor::new(75_000.0, -120.0),
                working_currents: vec![(Phasor::new(25.0, -15.0), 1), (Phasor::new(25.0, 165.0), GROUND)],
                not_working_currents: vec![(Phasor::new(250.0, 70.0), 1), (Phasor::new(250.0, -110.0), GROUND)],
            },
            lines_working: LINES_WORKING,
            lines_not_working: LINES_NOT_WORKING,
            noise_percent: 0.0,
            rated_voltage: DEFAULT_RATED_VOLTAGE,
            rated_current: DEFAULT_RATED_CURRENT,
        }
    }
}

fn scaled_node_sample(
    scenario: &LineScenario,
    node: &NodeScenario,
    is_working: bool,
    scale: f64,
) -> LineInsightResult<Arc<NodeSample>> {
    let factor = Phasor::new(scale, 0.0);
    let (voltage, currents) = if is_working {
        (node.working_voltage, &node.working_currents)
    } else {
        (node.not_working_voltage, &node.not_working_currents)
    };

    let currents: Vec<_> = currents
        .iter()
        .map(|&(current, destination)| (current * factor, destination))
        .collect();

    let sample = NodeSample::new(node.node_number, voltage * factor, &currents)?
        .with_ratings(scenario.rated_voltage, scenario.rated_current)?;

    Ok(Arc::new(sample))
}

fn scaled_line_sample(scenario: &LineScenario, is_working: bool, scale: f64) -> LineInsightResult<LineSample> {
    LineSample::new(
        scaled_node_sample(scenario, &scenario.node1, is_working, scale)?,
        scaled_node_sample(scenario, &scenario.node2, is_working, scale)?,
        is_working,
    )
}

/*
* @brief Generate line samples with known statuses and one with an unknown status.
* @param scenario Average phasors and number of samples per status
* @return (known samples, unknown sample), or InvalidNoisePercent outside 0 - 100%
* @note Known samples are spread over 0.9 - 1.1 times the average of their status,
*       working ones first. The unknown sample sits at the working average.
*/
pub fn generate_line_samples(scenario: &LineScenario) -> LineInsightResult<(Vec<LineSample>, LineSample)> {
    // Jitter below 100% keeps every scale positive
    let percent = scenario.noise_percent;
    if !(0.0..100.0).contains(&percent) {
        return Err(LineInsightError::InvalidNoisePercent { percent });
    }

    let mut rng = rand::thread_rng();
    let mut knowns = Vec::with_capacity(scenario.lines_working + scenario.lines_not_working);

    for (is_working, count) in [(true, scenario.lines_working), (false, scenario.lines_not_working)] {
        for index in 0..count {
            let scale = SCALE_MIN + SCALE_SPREAD * index as f64 / count as f64;
            let scale = scale + noise(&mut rng, scale, scenario.noise_percent);
            knowns.push(scaled_line_sample(scenario, is_working, scale)?);
        }
    }

    let unknown = scaled_line_sample(scenario, true, 1.0)?;

    Ok((knowns, unknown))
}
