use std::sync::Arc;

use crate::line_insight::{
    error::LineInsightResult,
    knn::KnnPredictor,
    line_sample::LineSample,
    node_sample::NodeSample,
    phasor::Phasor,
    print::print_prediction,
    types::*,
};

/// Runs the line status pipeline with one configuration.
#[derive(Debug, Clone, Default)]
pub struct LineInsight {
    pub config: LineInsightConfig,
}

impl LineInsight {
    pub fn new(config: LineInsightConfig) -> Self {
        Self { config }
    }

    /// Node sample rated with the configured voltage and current.
    pub fn node_sample(
        &self,
        node_number: NodeNumber,
        voltage: Phasor,
        currents: &[(Phasor, NodeNumber)],
    ) -> LineInsightResult<Arc<NodeSample>> {
        let node = NodeSample::new(node_number, voltage, currents)?
            .with_ratings(self.config.rated_voltage, self.config.rated_current)?;

        Ok(Arc::new(node))
    }

    pub fn line_sample(
        &self,
        node1: Arc<NodeSample>,
        node2: Arc<NodeSample>,
        is_working: bool,
    ) -> LineInsightResult<Arc<LineSample>> {
        Ok(Arc::new(LineSample::new(node1, node2, is_working)?))
    }

    pub fn predict(
        &self,
        samples_with_known_statuses: Vec<Arc<LineSample>>,
        sample_with_unknown_status: Arc<LineSample>,
    ) -> LineInsightResult<KnnPredictor> {
        KnnPredictor::with_weights(
            samples_with_known_statuses,
            sample_with_unknown_status,
            self.config.nearest_neighbors,
            self.config.weights,
        )
    }

    pub fn print_prediction_report(&self, predictor: &KnnPredictor) {
        log::info!(
            "Rated voltage {:.1} V, rated current {:.1} A, k = {}",
            self.config.rated_voltage,
            self.config.rated_current,
            predictor.number_of_nearest_neighbors()
        );
        print_prediction(predictor);
    }
}
