use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdGenError {
    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("{reason}")]
    InvalidInput { field: String, reason: String },

    #[error("A generation is already in progress")]
    Busy,

    #[error("Model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTML rendering error: {0}")]
    Template(#[from] askama::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Validation,
    Transport,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdGenError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdGenError::MissingConfig { .. }
            | AdGenError::InvalidConfigValue { .. }
            | AdGenError::ConfigParse { .. } => ErrorCategory::Configuration,
            AdGenError::InvalidInput { .. } | AdGenError::Busy => ErrorCategory::Validation,
            AdGenError::Api { .. } | AdGenError::Http(_) => ErrorCategory::Transport,
            AdGenError::Io(_)
            | AdGenError::Serialization(_)
            | AdGenError::Csv(_)
            | AdGenError::Template(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Transport => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Output => 1,
            ErrorCategory::Transport => 2,
            ErrorCategory::Configuration => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AdGenError::MissingConfig { field } if field == "GEMINI_API_KEY" => {
                "Set GEMINI_API_KEY in the environment or api_key under [model] in the config file"
            }
            AdGenError::MissingConfig { .. } => "Add the missing value to the config file or CLI",
            AdGenError::InvalidConfigValue { .. } => "Fix the reported value and run again",
            AdGenError::ConfigParse { .. } => "Check the config file for TOML syntax errors",
            AdGenError::InvalidInput { .. } => {
                "Provide a full URL including the scheme, e.g. https://example.com"
            }
            AdGenError::Busy => "Wait for the current generation to finish",
            AdGenError::Api { status: 401 | 403, .. } => "Check that the API key is valid",
            AdGenError::Api { status: 429, .. } => "Quota exceeded; try again later",
            AdGenError::Api { .. } | AdGenError::Http(_) => {
                "Check network connectivity and the model service status"
            }
            AdGenError::Io(_) => "Check that the output path exists and is writable",
            AdGenError::Serialization(_) | AdGenError::Csv(_) | AdGenError::Template(_) => {
                "Try a different output format"
            }
        }
    }

    /// Message shown to the user. For API failures this is the service's own
    /// description when it sent one.
    pub fn user_friendly_message(&self) -> String {
        match self {
            AdGenError::Api { message, .. } if !message.is_empty() => message.clone(),
            AdGenError::InvalidInput { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdGenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_prefers_service_description() {
        let err = AdGenError::Api {
            status: 400,
            message: "API key not valid. Please pass a valid API key.".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "API key not valid. Please pass a valid API key."
        );

        let bare = AdGenError::Api {
            status: 503,
            message: String::new(),
        };
        assert_eq!(bare.user_friendly_message(), "Model API error (503): ");
    }

    #[test]
    fn test_exit_codes_follow_category() {
        assert_eq!(
            AdGenError::MissingConfig {
                field: "GEMINI_API_KEY".to_string()
            }
            .exit_code(),
            3
        );
        assert_eq!(AdGenError::Busy.exit_code(), 1);
        assert_eq!(
            AdGenError::Api {
                status: 429,
                message: "quota".to_string()
            }
            .exit_code(),
            2
        );
    }
}
