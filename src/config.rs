use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AppError;

/// Demo driver settings. Every field may be omitted from the YAML file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct DemoConfig {
    pub parity_sample: i32,
    pub sort_size: usize,
    pub sort_max_value: i32,
    pub sort_seed: Option<u64>,
    pub scenario_dir: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            parity_sample: 5,
            sort_size: 1_000_000,
            sort_max_value: 1000,
            sort_seed: None,
            scenario_dir: None,
        }
    }
}

impl DemoConfig {
    pub fn from_yaml(content: &str) -> std::result::Result<Self, AppError> {
        serde_yaml::from_str(content)
            .map_err(|e| AppError::config(format!("YAML parse error: {}", e)))
    }
}

pub fn load_config<P: AsRef<Path>>(path: P) -> std::result::Result<DemoConfig, AppError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::config(format!("File read error in {:?}: {}", path, e)))?;
    let config = DemoConfig::from_yaml(&content)?;
    log::info!("Configuration loaded from {:?}", path);
    return Ok(config);
}
