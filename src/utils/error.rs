use thiserror::Error;

#[derive(Error, Debug)]
pub enum BechdelError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Document '{id}' could not be parsed: {reason}")]
    UnparsableDocument { id: String, reason: String },

    #[error("Lexicon error: {message}")]
    LexiconError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BechdelError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BechdelError::ConfigError { .. }
            | BechdelError::ConfigValidationError { .. }
            | BechdelError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            BechdelError::UnparsableDocument { .. } | BechdelError::LexiconError { .. } => {
                ErrorCategory::Input
            }
            BechdelError::CsvError(_)
            | BechdelError::SerializationError(_)
            | BechdelError::ProcessingError { .. } => ErrorCategory::Processing,
            BechdelError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單一劇本解析失敗只會被跳過
            BechdelError::UnparsableDocument { .. } => ErrorSeverity::Low,
            BechdelError::CsvError(_) | BechdelError::SerializationError(_) => {
                ErrorSeverity::Medium
            }
            BechdelError::ConfigError { .. }
            | BechdelError::ConfigValidationError { .. }
            | BechdelError::InvalidConfigValueError { .. }
            | BechdelError::LexiconError { .. }
            | BechdelError::ProcessingError { .. } => ErrorSeverity::High,
            BechdelError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BechdelError::ConfigError { .. } | BechdelError::ConfigValidationError { .. } => {
                "Check the configuration file syntax and section names"
            }
            BechdelError::InvalidConfigValueError { .. } => {
                "Fix the highlighted value and run again"
            }
            BechdelError::UnparsableDocument { .. } => {
                "The document lacks a <pre> body block; it will be skipped"
            }
            BechdelError::LexiconError { .. } => {
                "Make sure the name list files exist and contain one name per line"
            }
            BechdelError::IoError(_) => "Check that the paths exist and are readable/writable",
            BechdelError::CsvError(_) | BechdelError::SerializationError(_) => {
                "Check free disk space and permissions on the output directory"
            }
            BechdelError::ProcessingError { .. } => "Run with --verbose to see which script failed",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Input problem: {}", self),
            ErrorCategory::Processing => format!("Analysis failed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, BechdelError>;
