use thiserror::Error;

#[derive(Error, Debug)]
pub enum FleetError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error on '{field}': {reason}")]
    ValidationError { field: String, reason: String },

    #[error("Command #{index} ({op}) rejected: {source}")]
    CommandError {
        index: usize,
        op: String,
        #[source]
        source: Box<FleetError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FleetError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        FleetError::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            FleetError::IoError(_) => ErrorCategory::Io,
            FleetError::SerializationError(_) | FleetError::CsvError(_) => ErrorCategory::Data,
            FleetError::ConfigError { .. }
            | FleetError::ConfigValidationError { .. }
            | FleetError::InvalidConfigValueError { .. }
            | FleetError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FleetError::ValidationError { .. } => ErrorCategory::Validation,
            FleetError::CommandError { source, .. } => source.category(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// 針對錯誤類別給出修復建議
    pub fn recovery_suggestion(&self) -> String {
        match self {
            FleetError::IoError(_) => "Check that the file exists and is readable".to_string(),
            FleetError::SerializationError(_) => {
                "Check the JSON command file against the documented command shapes".to_string()
            }
            FleetError::CsvError(_) => "Retry with --format json".to_string(),
            FleetError::ConfigError { .. } | FleetError::ConfigValidationError { .. } => {
                "Fix the TOML configuration file and try again".to_string()
            }
            FleetError::InvalidConfigValueError { field, .. } => {
                format!("Use one of the supported values for '{}'", field)
            }
            FleetError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file", field)
            }
            FleetError::ValidationError { field, .. } => {
                format!("Correct '{}' before submitting", field)
            }
            FleetError::CommandError { source, .. } => source.recovery_suggestion(),
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FleetError::IoError(e) => format!("Could not read file: {}", e),
            FleetError::ValidationError { field, reason } => format!("{}: {}", field, reason),
            FleetError::CommandError { index, op, source } => {
                format!("Command #{} ({}) was rejected: {}", index, op, source.user_friendly_message())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FleetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_error_inherits_category() {
        let err = FleetError::CommandError {
            index: 2,
            op: "add_van".to_string(),
            source: Box::new(FleetError::validation("capacity", "must be greater than 0")),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert_eq!(
            err.user_friendly_message(),
            "Command #2 (add_van) was rejected: capacity: must be greater than 0"
        );
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: FleetError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
