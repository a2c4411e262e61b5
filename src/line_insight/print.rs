use super::distance::DistanceSample;
use super::knn::KnnPredictor;
use super::line_sample::LineSample;
use super::node_sample::NodeSample;
use super::parameter::Parameter;
use super::phasor::Phasor;

/*
* @brief Functions to report the line status pipeline through the log facade.
* @note Nothing here affects the numeric results.
*/
pub fn print_phasor(label: &str, phasor: &Phasor) {
    log::info!("{label}: {phasor}");
}

/*
* @brief Print the name, number of samples, phasor and node pair of a parameter.
* @param parameter Parameter to print
*/
pub fn print_parameter(parameter: &Parameter) {
    log::info!("Name: {}", parameter.name());
    log::info!("  Number of samples: {}", parameter.number_of_samples());
    log::info!("  Phasor: {} {}", parameter.phasor(), parameter.units());
    log::info!("  Starting Node: {}", parameter.start_node());
    log::info!("  Destination Node: {}", parameter.destination_node());
}

/*
* @brief Print a node sample with its voltage and currents.
* @param node Node sample to print
*/
pub fn print_node_sample(node: &NodeSample) {
    log::info!("Node {}:", node.node_number());
    log::info!("  Rated Voltage: {:.3} V", node.rated_voltage());
    log::info!("  Rated Current: {:.3} A", node.rated_current());
    print_parameter(node.voltage());
    for current in node.currents() {
        print_parameter(current);
    }
}

/*
* @brief Print both nodes, the line status and the normalized parameters.
* @param line Line sample to print
*/
pub fn print_line_sample(line: &LineSample) {
    print_node_sample(line.node1());
    print_node_sample(line.node2());
    log::info!("Line status: {}", line.is_working());
    log::info!("Node 1 Normalized Line Current:");
    print_parameter(line.node1_line_current_norm());
    log::info!("Node 2 Normalized Line Current:");
    print_parameter(line.node2_line_current_norm());
    log::info!("Node 1 Normalized Voltage:");
    print_parameter(line.node1_voltage_norm());
    log::info!("Node 2 Normalized Voltage:");
    print_parameter(line.node2_voltage_norm());
    log::info!("Node 1 Normalized Other Currents:");
    line.node1_other_currents_norm().iter().for_each(print_parameter);
    log::info!("Node 2 Normalized Other Currents:");
    line.node2_other_currents_norm().iter().for_each(print_parameter);
}

pub fn print_distance_sample(distance: &DistanceSample) {
    print_line_sample(distance.line());
    log::info!("Wline = {:.6}", distance.weights().line);
    log::info!("Wnode = {:.6}", distance.weights().node);
    log::info!("Wother = {:.6}", distance.weights().other);
    log::info!("distance = {:.6}", distance.distance());
    log::info!("isWorking = {}\n", distance.is_working());
}

/*
* @brief Print the distances of the nearest neighbours and the prediction.
* @param predictor KNN predictor to print
*/
pub fn print_prediction(predictor: &KnnPredictor) {
    log::info!("KNN Algorithm:");
    for (index, neighbor) in predictor.nearest().iter().enumerate() {
        log::info!(
            "  distances[{index}] distance: {:.6} (working = {})",
            neighbor.distance(),
            neighbor.is_working()
        );
    }
    log::info!("Line Status Prediction: {}\n", predictor.predicted_status());
}
