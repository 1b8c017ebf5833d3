use thiserror::Error;

#[derive(Error, Debug)]
pub enum MtgaError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Catalog returned HTTP {status} for {url}")]
    CatalogStatusError { status: u16, url: String },

    #[error("Failed to decode catalog response from {url}: {source}")]
    CatalogDecodeError {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache file {path} is corrupt: {source}")]
    CacheCorruptError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Analysis pass '{pass}' failed on card '{card}': {message}")]
    AnalysisError {
        pass: String,
        card: String,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Storage,
    Data,
    Configuration,
    Analysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Transient, worth retrying as-is.
    Medium,
    High,
    Critical,
}

impl MtgaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MtgaError::ApiError(_) | MtgaError::CatalogStatusError { .. } => ErrorCategory::Network,
            MtgaError::IoError(_) | MtgaError::CacheCorruptError { .. } => ErrorCategory::Storage,
            MtgaError::CatalogDecodeError { .. } | MtgaError::SerializationError(_) => {
                ErrorCategory::Data
            }
            MtgaError::ConfigError { .. }
            | MtgaError::ConfigValidationError { .. }
            | MtgaError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MtgaError::AnalysisError { .. } => ErrorCategory::Analysis,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MtgaError::ApiError(_) => ErrorSeverity::Medium,
            MtgaError::CatalogStatusError { status, .. } if *status >= 500 || *status == 429 => {
                ErrorSeverity::Medium
            }
            MtgaError::CatalogStatusError { .. }
            | MtgaError::CatalogDecodeError { .. }
            | MtgaError::SerializationError(_)
            | MtgaError::CacheCorruptError { .. }
            | MtgaError::AnalysisError { .. } => ErrorSeverity::High,
            MtgaError::IoError(_)
            | MtgaError::ConfigError { .. }
            | MtgaError::ConfigValidationError { .. }
            | MtgaError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for this error; never zero.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MtgaError::ApiError(e) if e.is_timeout() => {
                "The card catalog did not answer in time".to_string()
            }
            MtgaError::ApiError(_) => "Could not reach the card catalog".to_string(),
            MtgaError::CatalogStatusError { status, .. } => {
                format!("The card catalog refused the request (HTTP {})", status)
            }
            MtgaError::CatalogDecodeError { .. } => {
                "The card catalog sent data this tool does not understand".to_string()
            }
            MtgaError::CacheCorruptError { path, .. } => {
                format!("The cached data in {} could not be read", path)
            }
            MtgaError::AnalysisError { pass, card, .. } => {
                format!("Scoring stopped in the '{}' pass at card '{}'", pass, card)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your network connection and the catalog host, then try again",
            ErrorCategory::Storage => {
                "Run the command again with --refresh to rebuild the cache, or check the cache directory permissions"
            }
            ErrorCategory::Data => "Run the command again with --refresh; if it persists the catalog format may have changed",
            ErrorCategory::Configuration => "Fix the configuration file or command-line options and try again",
            ErrorCategory::Analysis => "Re-run with --verbose to see which card failed to score",
        }
    }
}

pub type Result<T> = std::result::Result<T, MtgaError>;
