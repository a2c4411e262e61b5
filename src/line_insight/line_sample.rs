//! Per-unit features of the line between two instrumented nodes.

use std::sync::Arc;

use super::error::{LineInsightError, LineInsightResult};
use super::node_sample::NodeSample;
use super::parameter::Parameter;

/// A sample of the line between `node1` and `node2` with its known or assumed status.
///
/// The node samples are shared, so one node sample may feed several line samples.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSample {
    node1: Arc<NodeSample>,
    node2: Arc<NodeSample>,
    is_working: bool,
    node1_line_current_norm: Parameter,
    node2_line_current_norm: Parameter,
    node1_voltage_norm: Parameter,
    node2_voltage_norm: Parameter,
    node1_other_currents_norm: Vec<Parameter>,
    node2_other_currents_norm: Vec<Parameter>,
}

/*
* @brief Split the currents of `from` into its line current towards `to` and the others.
* @return (line current, other currents), all normalized by the rated current of `from`
* @note Fails when `from` has no current going to `to`.
*/
fn split_currents(from: &NodeSample, to: &NodeSample) -> LineInsightResult<(Parameter, Vec<Parameter>)> {
    let line_index = from
        .current_index_to(to.node_number())
        .ok_or(LineInsightError::MissingLineCurrent {
            from: from.node_number(),
            to: to.node_number(),
        })?;

    let rating = from.rated_current();
    let line_current = from.currents()[line_index].per_unit(rating)?;

    let other_currents = from
        .currents()
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != line_index)
        .map(|(_, current)| current.per_unit(rating))
        .collect::<LineInsightResult<Vec<_>>>()?;

    Ok((line_current, other_currents))
}

impl LineSample {
    pub fn new(node1: Arc<NodeSample>, node2: Arc<NodeSample>, is_working: bool) -> LineInsightResult<Self> {
        let (node1_line_current_norm, node1_other_currents_norm) = split_currents(&node1, &node2)?;
        let (node2_line_current_norm, node2_other_currents_norm) = split_currents(&node2, &node1)?;

        let node1_voltage_norm = node1.voltage().per_unit(node1.rated_voltage())?;
        let node2_voltage_norm = node2.voltage().per_unit(node2.rated_voltage())?;

        log::debug!(
            "line sample {}-{}: {} + {} other currents, working = {}",
            node1.node_number(),
            node2.node_number(),
            node1_other_currents_norm.len(),
            node2_other_currents_norm.len(),
            is_working
        );

        Ok(Self {
            node1,
            node2,
            is_working,
            node1_line_current_norm,
            node2_line_current_norm,
            node1_voltage_norm,
            node2_voltage_norm,
            node1_other_currents_norm,
            node2_other_currents_norm,
        })
    }

    pub fn node1(&self) -> &Arc<NodeSample> {
        &self.node1
    }

    pub fn node2(&self) -> &Arc<NodeSample> {
        &self.node2
    }

    pub fn is_working(&self) -> bool {
        self.is_working
    }

    pub fn node1_line_current_norm(&self) -> &Parameter {
        &self.node1_line_current_norm
    }

    pub fn node2_line_current_norm(&self) -> &Parameter {
        &self.node2_line_current_norm
    }

    pub fn node1_voltage_norm(&self) -> &Parameter {
        &self.node1_voltage_norm
    }

    pub fn node2_voltage_norm(&self) -> &Parameter {
        &self.node2_voltage_norm
    }

    pub fn node1_other_currents_norm(&self) -> &[Parameter] {
        &self.node1_other_currents_norm
    }

    pub fn node2_other_currents_norm(&self) -> &[Parameter] {
        &self.node2_other_currents_norm
    }
}
