use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrowthError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Malformed reference table ({sex} {percentile}): {reason}")]
    ReferenceTableError {
        sex: String,
        percentile: String,
        reason: String,
    },

    #[error("Unknown risk factor: {key}")]
    UnknownRiskFactor { key: String },

    #[error("Invalid input for '{field}': {message}")]
    InvalidInputError { field: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    ReferenceData,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GrowthError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GrowthError::IoError(_) => ErrorCategory::Io,
            GrowthError::CsvError(_)
            | GrowthError::SerializationError(_)
            | GrowthError::ProcessingError { .. } => ErrorCategory::Data,
            GrowthError::ConfigValidationError { .. }
            | GrowthError::InvalidConfigValueError { .. }
            | GrowthError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GrowthError::ReferenceTableError { .. } => ErrorCategory::ReferenceData,
            GrowthError::UnknownRiskFactor { .. } | GrowthError::InvalidInputError { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Io | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            // A bad table would silently misclassify every child.
            ErrorCategory::ReferenceData => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            GrowthError::IoError(_) => {
                "Check that the file exists and that you have permission to read/write it".to_string()
            }
            GrowthError::CsvError(_) => {
                "Check the CSV header: id,age_months,weight_kg,sex,risks".to_string()
            }
            GrowthError::SerializationError(_) => "Retry without --json".to_string(),
            GrowthError::ConfigValidationError { field, .. }
            | GrowthError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in the configuration file", field)
            }
            GrowthError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file", field)
            }
            GrowthError::ReferenceTableError { .. } => {
                "Each table needs 25 positive weights (months 0-24) with p15 <= p50 <= p85 at every month"
                    .to_string()
            }
            GrowthError::UnknownRiskFactor { .. } => {
                "Run `growth-screen risks` to list the valid risk factor keys".to_string()
            }
            GrowthError::InvalidInputError { .. } => {
                "Use 'male' or 'female' for sex and decimal numbers for age and weight".to_string()
            }
            GrowthError::ProcessingError { .. } => {
                "Check the offending row in the input file".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not access a file: {}", self),
            ErrorCategory::Data => format!("Could not process the data: {}", self),
            ErrorCategory::Configuration => format!("The configuration is invalid: {}", self),
            ErrorCategory::ReferenceData => {
                format!("The reference growth tables are unusable: {}", self)
            }
            ErrorCategory::Input => format!("The input was not understood: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, GrowthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_errors_are_critical() {
        let err = GrowthError::ReferenceTableError {
            sex: "male".to_string(),
            percentile: "p50".to_string(),
            reason: "expected 25 points, got 24".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::ReferenceData);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.to_string().contains("male p50"));
    }

    #[test]
    fn test_unknown_risk_suggests_listing() {
        let err = GrowthError::UnknownRiskFactor {
            key: "smoking".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("growth-screen risks"));
        assert!(err.user_friendly_message().contains("smoking"));
    }
}
