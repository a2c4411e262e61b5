pub mod distance;
pub mod error;
pub mod generate_signal;
pub mod knn;
pub mod line_sample;
pub mod node_sample;
pub mod parameter;
pub mod phasor;
pub mod print;
pub mod processing;
pub mod types;

pub use distance::{are_samples_of_the_same_line, DistanceSample};
pub use error::{LineInsightError, LineInsightResult, PhasorError};
pub use generate_signal::{generate_line_samples, sample_node_sample, sample_sinusoid, LineScenario, SamplingConfig};
pub use knn::{majority_vote, KnnPredictor};
pub use line_sample::LineSample;
pub use node_sample::NodeSample;
pub use parameter::{estimate_phasor, Parameter};
pub use phasor::Phasor;
pub use processing::LineInsight;
pub use types::*;
