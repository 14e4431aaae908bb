//! Configuration validation.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// First error as a [`ConfigError`], for callers that refuse to start
    /// on an invalid config.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

const LARGE_MAX_STEPS: u32 = 1000;
const LARGE_MAX_ACTIONS_PER_STEP: usize = 50;
const LOG_FORMATS: &[&str] = &["pretty", "json"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_agent(config, &mut result);
        Self::validate_actions(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    fn validate_agent(config: &Config, result: &mut ValidationResult) {
        let agent = &config.agent;

        if agent.max_failures == 0 {
            result.add_error(ValidationError::new(
                "agent.max_failures",
                "must be greater than 0",
            ));
        }

        if agent.max_actions_per_step == 0 {
            result.add_error(ValidationError::new(
                "agent.max_actions_per_step",
                "must be greater than 0",
            ));
        } else if agent.max_actions_per_step > LARGE_MAX_ACTIONS_PER_STEP {
            result.add_warning(ValidationWarning::new(
                "agent.max_actions_per_step",
                format!(
                    "{} actions per step is unusually high",
                    agent.max_actions_per_step
                ),
            ));
        }

        if agent.max_steps == 0 {
            result.add_error(ValidationError::new(
                "agent.max_steps",
                "must be greater than 0",
            ));
        } else if agent.max_steps > LARGE_MAX_STEPS {
            result.add_warning(ValidationWarning::new(
                "agent.max_steps",
                format!("{} steps may run for a very long time", agent.max_steps),
            ));
        }
    }

    fn validate_actions(config: &Config, result: &mut ValidationResult) {
        let mut seen = HashSet::new();

        for (i, name) in config.actions.excluded.iter().enumerate() {
            let path = format!("actions.excluded[{}]", i);
            if name.trim().is_empty() {
                result.add_error(ValidationError::new(path, "action name is empty"));
            } else if !seen.insert(name.as_str()) {
                result.add_warning(ValidationWarning::new(
                    path,
                    format!("'{}' is excluded more than once", name),
                ));
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let logging = &config.logging;

        if !LOG_FORMATS
            .iter()
            .any(|f| f.eq_ignore_ascii_case(&logging.format))
        {
            result.add_error(ValidationError::new(
                "logging.format",
                format!(
                    "unknown log format '{}', expected one of: {}",
                    logging.format,
                    LOG_FORMATS.join(", ")
                ),
            ));
        }

        if logging.level.trim().is_empty() {
            result.add_error(ValidationError::new("logging.level", "must not be empty"));
        }

        if let Some(dir) = &logging.directory {
            if dir.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "logging.directory",
                    "must not be empty when set",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
