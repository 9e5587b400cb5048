use std::env;
use std::process::ExitCode;

use bounded_queue::{
    config::{self, DemoConfig},
    error::AppError,
    parity,
    scenario::{self, Outcome},
    sort,
};

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let config = match env::args().nth(1) {
        Some(path) => config::load_config(path)?,
        None => DemoConfig::default(),
    };
    log::debug!("{:?}", config);

    show_parity(config.parity_sample);
    show_scenarios(config.scenario_dir.as_deref());
    show_sort(&config)?;
    return Ok(());
}

fn show_parity(value: i32) {
    println!("Using Modulo: {}", parity::is_even_modulo(value));
    println!("Using Bitwise: {}", parity::is_even_bitwise(value));
}

fn show_scenarios(directory: Option<&str>) {
    let scenarios = scenario::scenarios_or_builtin(directory);
    for report in scenario::run_scenarios(&scenarios) {
        let name = &report.name;
        for outcome in &report.outcomes {
            match outcome {
                Outcome::Dequeued(value) => println!("Dequeued from {}: {}", name, value),
                Outcome::Empty => println!("Dequeued from {}: <empty>", name),
                Outcome::Rejected(value) => println!("Rejected by {}: {}", name, value),
                Outcome::Enqueued(_) => {}
            }
        }
        if !report.matches_expectation() {
            log::warn!("Scenario {} did not dequeue the expected values", name);
        }
    }
}

fn show_sort(config: &DemoConfig) -> Result<(), AppError> {
    let mut values = sort::random_values(config.sort_size, config.sort_max_value, config.sort_seed)?;
    let elapsed = sort::timed_sort(&mut values);
    println!(
        "Time taken to sort array of size {}: {} seconds.",
        values.len(),
        elapsed.as_secs_f64()
    );
    return Ok(());
}
