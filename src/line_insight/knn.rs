//! K nearest neighbours prediction of the status of a line sample.
//!
//! Every known line sample is compared with the unknown one through a
//! [`DistanceSample`]. The k closest are kept in ascending order with an
//! incremental insertion sort and the predicted status is the majority
//! status among them. Ties predict a line that is not working.

use std::sync::Arc;

use super::distance::DistanceSample;
use super::error::{LineInsightError, LineInsightResult};
use super::line_sample::LineSample;
use super::types::{DistanceWeights, DEFAULT_NEAREST_NEIGHBORS};

#[derive(Debug, Clone)]
pub struct KnnPredictor {
    samples_with_known_statuses: Vec<Arc<LineSample>>,
    sample_with_unknown_status: Arc<LineSample>,
    number_of_nearest_neighbors: usize,
    weights: DistanceWeights,
    nearest: Vec<DistanceSample>, // Ascending by distance, length k
    predicted_status: bool,
}

/*
* @brief Offer a candidate to the ascending top-k list.
* @param nearest Ascending list holding at most k entries
* @param k Number of entries to keep (at least 1)
* @param candidate New entry
* @param distance Sort key
* @note While the list is not full the candidate goes to the tail; afterwards it
*       only replaces the tail when closer. It is then swapped leftwards while
*       smaller than its neighbour.
*/
fn offer_nearest<T, F>(nearest: &mut Vec<T>, k: usize, candidate: T, distance: F)
where
    F: Fn(&T) -> f64,
{
    if nearest.len() < k {
        nearest.push(candidate);
    } else if distance(&candidate) < distance(&nearest[k - 1]) {
        nearest[k - 1] = candidate;
    } else {
        return;
    }

    let mut index = nearest.len() - 1;
    while index > 0 && distance(&nearest[index]) < distance(&nearest[index - 1]) {
        nearest.swap(index, index - 1);
        index -= 1;
    }
}

/// Strict majority of working statuses; a tie predicts not working.
pub fn majority_vote<I>(statuses: I) -> bool
where
    I: IntoIterator<Item = bool>,
{
    let (working, not_working) = statuses
        .into_iter()
        .fold((0usize, 0usize), |(w, n), is_working| {
            if is_working {
                (w + 1, n)
            } else {
                (w, n + 1)
            }
        });

    working > not_working
}

impl KnnPredictor {
    /// Predict with the default number of nearest neighbours.
    pub fn new(
        samples_with_known_statuses: Vec<Arc<LineSample>>,
        sample_with_unknown_status: Arc<LineSample>,
    ) -> LineInsightResult<Self> {
        Self::with_neighbors(
            samples_with_known_statuses,
            sample_with_unknown_status,
            DEFAULT_NEAREST_NEIGHBORS,
        )
    }

    pub fn with_neighbors(
        samples_with_known_statuses: Vec<Arc<LineSample>>,
        sample_with_unknown_status: Arc<LineSample>,
        number_of_nearest_neighbors: usize,
    ) -> LineInsightResult<Self> {
        Self::with_weights(
            samples_with_known_statuses,
            sample_with_unknown_status,
            number_of_nearest_neighbors,
            DistanceWeights::default(),
        )
    }

    pub fn with_weights(
        samples_with_known_statuses: Vec<Arc<LineSample>>,
        sample_with_unknown_status: Arc<LineSample>,
        number_of_nearest_neighbors: usize,
        weights: DistanceWeights,
    ) -> LineInsightResult<Self> {
        weights.validate()?;

        let mut predictor = Self {
            samples_with_known_statuses,
            sample_with_unknown_status,
            number_of_nearest_neighbors,
            weights,
            nearest: Vec::new(),
            predicted_status: false,
        };

        predictor.nearest = predictor.set_distances(number_of_nearest_neighbors)?;
        predictor.predicted_status = predictor.predict_status();

        Ok(predictor)
    }

    /*
    * @brief Compute the ascending list of the k nearest known samples.
    * @param k Number of nearest neighbours
    * @return The new list; the predictor itself is left untouched
    */
    fn set_distances(&self, k: usize) -> LineInsightResult<Vec<DistanceSample>> {
        let available = self.samples_with_known_statuses.len();
        if k == 0 || k > available {
            return Err(LineInsightError::InvalidNeighborCount {
                requested: k,
                available,
            });
        }

        let mut nearest = Vec::with_capacity(k);

        for (index, known) in self.samples_with_known_statuses.iter().enumerate() {
            let candidate = DistanceSample::with_weights(known.clone(), &self.sample_with_unknown_status, self.weights)?;
            log::debug!(
                "known sample {index}: distance {:.6}, working = {}",
                candidate.distance(),
                candidate.is_working()
            );
            offer_nearest(&mut nearest, k, candidate, DistanceSample::distance);
        }

        Ok(nearest)
    }

    fn predict_status(&self) -> bool {
        majority_vote(self.nearest.iter().map(DistanceSample::is_working))
    }

    /// Recompute the nearest neighbours for a new `k`. An invalid `k` leaves
    /// the previous neighbours and prediction in place.
    pub fn change_number_of_nearest_neighbors(&mut self, number_of_nearest_neighbors: usize) -> LineInsightResult<()> {
        if number_of_nearest_neighbors == self.number_of_nearest_neighbors {
            return Ok(());
        }

        self.nearest = self.set_distances(number_of_nearest_neighbors).map_err(|err| {
            log::warn!("keeping k = {}: {err}", self.number_of_nearest_neighbors);
            err
        })?;
        self.number_of_nearest_neighbors = number_of_nearest_neighbors;
        self.predicted_status = self.predict_status();

        Ok(())
    }

    pub fn samples_with_known_statuses(&self) -> &[Arc<LineSample>] {
        &self.samples_with_known_statuses
    }

    pub fn sample_with_unknown_status(&self) -> &Arc<LineSample> {
        &self.sample_with_unknown_status
    }

    pub fn number_of_nearest_neighbors(&self) -> usize {
        self.number_of_nearest_neighbors
    }

    pub fn nearest(&self) -> &[DistanceSample] {
        &self.nearest
    }

    pub fn predicted_status(&self) -> bool {
        self.predicted_status
    }
}
