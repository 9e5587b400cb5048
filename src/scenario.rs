use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::{
    error::{AppError, ErrorType},
    queue::BoundedQueue,
};

#[cfg(not(test))]
use log::error;

type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Enqueue,
    Dequeue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub op: StepKind,
    pub value: Option<i32>,
}

impl Step {
    pub fn enqueue(value: i32) -> Self {
        Self {
            op: StepKind::Enqueue,
            value: Some(value),
        }
    }

    pub fn dequeue() -> Self {
        Self {
            op: StepKind::Dequeue,
            value: None,
        }
    }
}

/// A scripted run against a fresh queue.
/// Scenario yaml files use this schema
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// Signed so that a negative value in a file is reported, not a parse error
    pub capacity: i64,
    pub steps: Vec<Step>,
    /// Expected sequence of successfully dequeued values
    pub expect: Option<Vec<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Enqueued(i32),
    Rejected(i32),
    Dequeued(i32),
    Empty,
}

#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: String,
    pub outcomes: Vec<Outcome>,
    expect: Option<Vec<i32>>,
}

impl ScenarioReport {
    pub fn dequeued(&self) -> Vec<i32> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                Outcome::Dequeued(value) => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// True when the scenario declares no expectation.
    pub fn matches_expectation(&self) -> bool {
        match &self.expect {
            Some(expected) => *expected == self.dequeued(),
            None => true,
        }
    }
}

pub fn run_scenario(scenario: &Scenario) -> Result<ScenarioReport> {
    let capacity = usize::try_from(scenario.capacity).map_err(|_| {
        AppError::new(
            ErrorType::InvalidArgument,
            format!(
                "scenario {}: capacity {} is negative",
                scenario.name, scenario.capacity
            ),
        )
    })?;
    let mut queue = BoundedQueue::new(capacity).map_err(|e| {
        AppError::new(
            e.error_type,
            format!("scenario {}: {}", scenario.name, e.message),
        )
    })?;
    let mut outcomes = Vec::with_capacity(scenario.steps.len());

    for (index, step) in scenario.steps.iter().enumerate() {
        let outcome = match step.op {
            StepKind::Enqueue => {
                let Some(value) = step.value else {
                    return Err(AppError::new(
                        ErrorType::InvalidArgument,
                        format!("scenario {}: step {} enqueues no value", scenario.name, index),
                    ));
                };
                match queue.enqueue(value) {
                    Ok(()) => Outcome::Enqueued(value),
                    Err(e) if e.is_recoverable() => Outcome::Rejected(value),
                    Err(e) => return Err(e),
                }
            }
            StepKind::Dequeue => match queue.dequeue() {
                Ok(value) => Outcome::Dequeued(value),
                Err(e) if e.is_recoverable() => Outcome::Empty,
                Err(e) => return Err(e),
            },
        };
        log::debug!(
            "scenario {}: step {} -> {:?}; {:?} {}/{}",
            scenario.name,
            index,
            outcome,
            queue.state(),
            queue.len(),
            queue.capacity()
        );
        outcomes.push(outcome);
    }

    return Ok(ScenarioReport {
        name: scenario.name.clone(),
        outcomes,
        expect: scenario.expect.clone(),
    });
}

/// Runs every scenario in name order. A scenario that cannot run is logged
/// and skipped so the rest still produce reports.
pub fn run_scenarios(scenarios: &BTreeMap<String, Scenario>) -> Vec<ScenarioReport> {
    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in scenarios.values() {
        match run_scenario(scenario) {
            Ok(report) => reports.push(report),
            Err(e) => error!("Scenario {} skipped: {}", scenario.name, e),
        }
    }
    return reports;
}

fn demo_scenario(name: &str, values: &[i32]) -> Scenario {
    let mut steps: Vec<Step> = values.iter().map(|value| Step::enqueue(*value)).collect();
    steps.extend((0..=values.len()).map(|_| Step::dequeue()));
    Scenario {
        name: name.to_string(),
        capacity: 5,
        steps,
        expect: Some(values.to_vec()),
    }
}

lazy_static! {
    pub static ref BUILTIN_SCENARIOS: BTreeMap<String, Scenario> = {
        let mut scenarios = BTreeMap::new();
        for scenario in [
            demo_scenario("array-buffer", &[1, 2, 3, 4, 5]),
            demo_scenario("vector-buffer", &[10, 20, 30, 40, 50]),
        ] {
            scenarios.insert(scenario.name.clone(), scenario);
        }
        scenarios
    };
}

/// scenario loader
pub fn load_scenarios<P: AsRef<Path>>(directory: P) -> BTreeMap<String, Scenario> {
    let mut scenarios = BTreeMap::new();

    for entry in WalkDir::new(directory) {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };

        if entry.file_type().is_file() {
            let path = entry.path();
            if let Some(ext) = path.extension() {
                if ext == "yaml" || ext == "yml" {
                    match fs::read_to_string(path) {
                        Ok(content) => match serde_yaml::from_str::<Scenario>(&content) {
                            Ok(scenario) => {
                                scenarios.insert(scenario.name.clone(), scenario);
                            }
                            Err(e) => error!("YAML parse error in {:?}: {}", path, e),
                        },
                        Err(e) => error!("File read error in {:?}: {}", path, e),
                    }
                }
            }
        }
    }

    return scenarios;
}

/// Scenarios from `directory`, or the built-in ones when it is unset or
/// holds none.
pub fn scenarios_or_builtin(directory: Option<&str>) -> BTreeMap<String, Scenario> {
    if let Some(directory) = directory {
        let scenarios = load_scenarios(directory);
        if !scenarios.is_empty() {
            return scenarios;
        }
        log::warn!("No scenarios found in {}; using built-in ones", directory);
    }
    BUILTIN_SCENARIOS.clone()
}

#[cfg(test)]
use std::eprintln as error;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_demo_matches_original_output() {
        let Some(scenario) = BUILTIN_SCENARIOS.get("array-buffer") else {
            panic!("array-buffer must be built in");
        };
        let report = run_scenario(scenario).unwrap();
        assert_eq!(report.dequeued(), vec![1, 2, 3, 4, 5]);
        assert_eq!(report.outcomes.last(), Some(&Outcome::Empty));
        assert!(report.matches_expectation());

        let Some(scenario) = BUILTIN_SCENARIOS.get("vector-buffer") else {
            panic!("vector-buffer must be built in");
        };
        let report = run_scenario(scenario).unwrap();
        assert_eq!(report.dequeued(), vec![10, 20, 30, 40, 50]);
        assert!(report.matches_expectation());
    }

    #[test]
    fn test_full_queue_rejects() {
        let scenario = Scenario {
            name: "overflow".to_string(),
            capacity: 2,
            steps: vec![Step::enqueue(1), Step::enqueue(2), Step::enqueue(3), Step::dequeue()],
            expect: Some(vec![1]),
        };
        let report = run_scenario(&scenario).unwrap();
        assert_eq!(
            report.outcomes,
            vec![
                Outcome::Enqueued(1),
                Outcome::Enqueued(2),
                Outcome::Rejected(3),
                Outcome::Dequeued(1),
            ]
        );
        assert!(report.matches_expectation());
    }

    #[test]
    fn test_expectation_mismatch() {
        let scenario = Scenario {
            name: "mismatch".to_string(),
            capacity: 2,
            steps: vec![Step::enqueue(1), Step::dequeue()],
            expect: Some(vec![2]),
        };
        let report = run_scenario(&scenario).unwrap();
        assert!(!report.matches_expectation());
    }

    #[test]
    fn test_non_positive_capacity() {
        for capacity in [0, -1] {
            let scenario = Scenario {
                name: "bad".to_string(),
                capacity,
                steps: vec![],
                expect: None,
            };
            let Err(error) = run_scenario(&scenario) else {
                panic!("capacity {} must be rejected", capacity);
            };
            assert_eq!(error.error_type, ErrorType::InvalidArgument);
        }
    }

    #[test]
    fn test_capacity_errors_name_the_scenario() {
        for capacity in [0, -1, 1 << 60] {
            let scenario = Scenario {
                name: "bad-capacity".to_string(),
                capacity,
                steps: vec![Step::enqueue(1)],
                expect: None,
            };
            let Err(error) = run_scenario(&scenario) else {
                panic!("capacity {} must be rejected", capacity);
            };
            assert_eq!(error.error_type, ErrorType::InvalidArgument);
            assert!(
                error.message.contains("bad-capacity"),
                "message lacks scenario name: {}",
                error.message
            );
        }
    }

    #[test]
    fn test_run_scenarios_skips_unrunnable() {
        let mut scenarios = BUILTIN_SCENARIOS.clone();
        for (name, capacity) in [("empty-ring", 0), ("huge-ring", 1 << 60)] {
            scenarios.insert(
                name.to_string(),
                Scenario {
                    name: name.to_string(),
                    capacity,
                    steps: vec![Step::dequeue()],
                    expect: None,
                },
            );
        }
        let reports = run_scenarios(&scenarios);
        let names: Vec<&str> = reports.iter().map(|report| report.name.as_str()).collect();
        assert_eq!(names, vec!["array-buffer", "vector-buffer"]);
        assert!(reports.iter().all(|report| report.matches_expectation()));
    }

    #[test]
    fn test_enqueue_without_value() {
        let scenario = Scenario {
            name: "novalue".to_string(),
            capacity: 1,
            steps: vec![Step {
                op: StepKind::Enqueue,
                value: None,
            }],
            expect: None,
        };
        let Err(error) = run_scenario(&scenario) else {
            panic!("enqueue without a value must be rejected");
        };
        assert_eq!(error.error_type, ErrorType::InvalidArgument);
    }

    #[test]
    fn test_scenario_loading() {
        let scenarios = load_scenarios("scenarios");
        assert_eq!(scenarios.len(), 2);

        let Some(wrap) = scenarios.get("wrap-around") else {
            panic!("wrap-around scenario must be found");
        };
        assert_eq!(wrap.capacity, 3);
        let report = run_scenario(wrap).unwrap();
        assert_eq!(report.dequeued(), vec![1, 2, 3, 4, 5]);
        assert!(report.matches_expectation());

        let Some(sentinel) = scenarios.get("negative-values") else {
            panic!("negative-values scenario must be found");
        };
        let report = run_scenario(sentinel).unwrap();
        assert_eq!(report.dequeued(), vec![-1, 0, -1]);
        assert_eq!(report.outcomes.last(), Some(&Outcome::Empty));
    }

    #[test]
    fn test_loader_skips_invalid_files() {
        let scenarios = load_scenarios("fixtures/mixed-scenarios");
        assert_eq!(scenarios.len(), 1);
        let Some(valid) = scenarios.get("single-slot") else {
            panic!("single-slot scenario must be found");
        };
        let report = run_scenario(valid).unwrap();
        assert_eq!(report.dequeued(), vec![7]);
        assert!(report.matches_expectation());
    }

    #[test]
    fn test_fallback_to_builtin() {
        assert_eq!(scenarios_or_builtin(None).len(), 2);
        let scenarios = scenarios_or_builtin(Some("no-such-directory"));
        assert!(scenarios.contains_key("array-buffer"));
    }
}
