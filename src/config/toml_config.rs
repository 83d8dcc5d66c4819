use crate::core::guidance::DEFAULT_REVIEW_MONTHS;
use crate::core::reference::{CurveTables, ReferenceData};
use crate::utils::error::{GrowthError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{
    validate_one_of, validate_range, MeasurementBounds, Validate, AGE_BOUNDS, WEIGHT_BOUNDS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreeningConfig {
    pub input: Option<InputConfig>,
    pub follow_up: Option<FollowUpConfig>,
    pub logging: Option<LoggingConfig>,
    pub reference: Option<ReferenceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub max_age_months: Option<f64>,
    pub max_weight_kg: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowUpConfig {
    pub review_interval_months: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceConfig {
    pub male: Option<CurveTables>,
    pub female: Option<CurveTables>,
}

impl ScreeningConfig {
    /// Loads and parses a TOML configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GrowthError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GrowthError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GrowthError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn age_bounds(&self) -> MeasurementBounds {
        let max = self
            .input
            .as_ref()
            .and_then(|i| i.max_age_months)
            .unwrap_or(AGE_BOUNDS.max);
        MeasurementBounds::new(AGE_BOUNDS.min, max)
    }

    pub fn weight_bounds(&self) -> MeasurementBounds {
        let max = self
            .input
            .as_ref()
            .and_then(|i| i.max_weight_kg)
            .unwrap_or(WEIGHT_BOUNDS.max);
        MeasurementBounds::new(WEIGHT_BOUNDS.min, max)
    }

    pub fn review_months(&self) -> u32 {
        self.follow_up
            .as_ref()
            .and_then(|f| f.review_interval_months)
            .unwrap_or(DEFAULT_REVIEW_MONTHS)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_format(&self) -> LogFormat {
        match self.logging.as_ref().and_then(|l| l.format.as_deref()) {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }

    /// Custom tables when both sexes are configured, the built-in ones otherwise.
    pub fn reference_data(&self) -> Result<Option<ReferenceData>> {
        let Some(reference) = &self.reference else {
            return Ok(None);
        };
        match (&reference.male, &reference.female) {
            (Some(male), Some(female)) => {
                ReferenceData::from_tables(male.clone(), female.clone()).map(Some)
            }
            (None, _) => Err(GrowthError::MissingConfigError {
                field: "reference.male".to_string(),
            }),
            (_, None) => Err(GrowthError::MissingConfigError {
                field: "reference.female".to_string(),
            }),
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(input) = &self.input {
            if let Some(max_age) = input.max_age_months {
                validate_range("input.max_age_months", max_age, 1.0, AGE_BOUNDS.max)?;
            }
            if let Some(max_weight) = input.max_weight_kg {
                validate_range("input.max_weight_kg", max_weight, 1.0, 50.0)?;
            }
        }

        if let Some(follow_up) = &self.follow_up {
            if let Some(months) = follow_up.review_interval_months {
                validate_range("follow_up.review_interval_months", months, 1, 12)?;
            }
        }

        if let Some(logging) = &self.logging {
            if let Some(level) = &logging.level {
                validate_one_of(
                    "logging.level",
                    level,
                    &["trace", "debug", "info", "warn", "error"],
                )?;
            }
            if let Some(format) = &logging.format {
                validate_one_of("logging.format", format, &["compact", "json"])?;
            }
        }

        self.reference_data()?;
        Ok(())
    }
}

impl Validate for ScreeningConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
