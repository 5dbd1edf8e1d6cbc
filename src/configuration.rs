use std::fs::File;
use std::io::{
    BufReader,
    Read
};
use std::path::{
    Path,
    PathBuf
};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// 示範程式的設定，JSON 格式，所有欄位皆有預設值：
///
/// ```json
/// {
///     "output_dir": "out",
///     "sample_counts": [10, 20, 30],
///     "sample_step": 0.1,
///     "log_base": 2.718281828459045
/// }
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Configuration {
    output_dir: PathBuf,
    sample_counts: Vec<usize>,
    sample_step: f64,
    log_base: f64
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration {
            output_dir: PathBuf::from("."),
            sample_counts: vec![10, 20, 30],
            sample_step: 0.1,
            log_base: std::f64::consts::E
        }
    }
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        Configuration::parse(BufReader::new(file))
    }

    pub fn parse<R: Read>(reader: R) -> Result<Configuration, ConfigurationError> {
        let configuration: Configuration = serde_json::from_reader(reader)?;
        configuration.validate()?;
        Ok(configuration)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.sample_step.is_finite() && self.sample_step > 0.0) {
            return Err(ConfigurationError::Invalid(
                format!("sample_step must be positive, got {}", self.sample_step)
            ));
        }
        if self.sample_counts.is_empty() {
            return Err(ConfigurationError::Invalid("sample_counts is empty".to_owned()));
        }
        if let Some(count) = self.sample_counts.iter().find(|&&count| count < 2) {
            return Err(ConfigurationError::Invalid(
                format!("sample count must be at least 2, got {}", count)
            ));
        }
        if !self.log_base.is_finite() || self.log_base <= 0.0 || self.log_base == 1.0 {
            return Err(ConfigurationError::Invalid(
                format!("log_base must be positive, finite and not 1, got {}", self.log_base)
            ));
        }
        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn set_output_dir(&mut self, output_dir: PathBuf) {
        self.output_dir = output_dir;
    }

    pub fn sample_counts(&self) -> &[usize] {
        &self.sample_counts
    }

    pub fn sample_step(&self) -> f64 {
        self.sample_step
    }

    pub fn log_base(&self) -> f64 {
        self.log_base
    }
}
