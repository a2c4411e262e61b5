use std::process;
use std::sync::Arc;

use clap::Parser;
use line_insight::generate_signal::{
    generate_line_samples, sample_sinusoid, LineScenario, FREQ_NOMINAL_60, SAMPLES_PER_SECOND,
};
use line_insight::print::{print_distance_sample, print_line_sample, print_parameter, print_phasor};
use line_insight::{
    LineInsight, LineInsightConfig, LineInsightResult, Parameter, Phasor, DEFAULT_NEAREST_NEIGHBORS, GROUND,
    VOLTAGE_UNITS,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Power line status prediction with weighted KNN", long_about = None)]
struct Args {
    /// Known samples taken while the line was working
    #[arg(long, default_value_t = 6)]
    working: usize,

    /// Known samples taken while the line was down
    #[arg(long, default_value_t = 4)]
    not_working: usize,

    /// Number of nearest neighbours
    #[arg(short = 'k', long, default_value_t = DEFAULT_NEAREST_NEIGHBORS)]
    k: usize,

    /// Uniform noise added to the generated samples (percent of peak)
    #[arg(long, default_value_t = 0.0)]
    noise_percent: f64,

    #[arg(long, default_value_t = SAMPLES_PER_SECOND)]
    samples_per_second: f64,

    #[arg(long, default_value_t = FREQ_NOMINAL_60)]
    frequency: f64,
}

fn phasor_error_demo() {
    let value = Phasor::new(1.0, 0.0);

    log::info!("Dividing by the zero phasor:");
    print_phasor("1 / 0", &(value / Phasor::ZERO));

    log::info!("Raising the zero phasor to a negative power:");
    print_phasor("0 ^ -1", &Phasor::ZERO.pow(-1.0));

    print_phasor("(1 @ 30deg) ^ 2", &Phasor::new(1.0, 30.0).pow(2.0));
}

fn estimation_demo(args: &Args) -> LineInsightResult<()> {
    let reference = Phasor::new(250_000.0, 15.0);
    let samples = sample_sinusoid(reference, args.frequency, args.samples_per_second, 1.0, args.noise_percent);
    let parameter = Parameter::from_samples(samples, "V1", VOLTAGE_UNITS, 1, GROUND)?;
    print_parameter(&parameter);

    let estimated = parameter.phasor();
    log::info!(
        "RMS error: {:.6}%, phase error: {:.6} deg",
        (estimated.rms_value() - reference.rms_value()).abs() / reference.rms_value() * 100.0,
        (estimated.phase_angle_degrees() - reference.phase_angle_degrees()).abs()
    );

    Ok(())
}

fn prediction_demo(args: &Args) -> LineInsightResult<()> {
    let scenario = LineScenario {
        lines_working: args.working,
        lines_not_working: args.not_working,
        noise_percent: args.noise_percent,
        ..Default::default()
    };
    let (knowns, unknown) = generate_line_samples(&scenario)?;

    log::info!("Line sample with unknown status:");
    print_line_sample(&unknown);

    let insight = LineInsight::new(LineInsightConfig {
        rated_voltage: scenario.rated_voltage,
        rated_current: scenario.rated_current,
        nearest_neighbors: args.k,
        ..Default::default()
    });
    let knowns = knowns.into_iter().map(Arc::new).collect();
    let predictor = insight.predict(knowns, Arc::new(unknown))?;
    if let Some(closest) = predictor.nearest().first() {
        log::info!("Closest known line sample:");
        print_distance_sample(closest);
    }
    insight.print_prediction_report(&predictor);

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    phasor_error_demo();

    if let Err(e) = estimation_demo(&args).and_then(|_| prediction_demo(&args)) {
        log::error!("{e}");
        process::exit(1);
    }
}
