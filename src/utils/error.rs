use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Lookup file error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid crew pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Input is missing required column '{column}'")]
    MissingColumnError { column: String },

    #[error("Row {row}: cannot read {column} value '{value}' as {expected}")]
    CoercionError {
        row: usize,
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("Input format error: {message}")]
    InputFormatError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Transformation,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed run.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Medium => 2,
            Self::High => 1,
            Self::Critical => 3,
        }
    }
}

impl ImportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TomlError(_)
            | Self::PatternError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::MissingColumnError { .. }
            | Self::InputFormatError { .. } => ErrorCategory::Input,
            Self::CoercionError { .. } => ErrorCategory::Transformation,
            Self::IoError(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
                ErrorCategory::Output
            }
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Transformation => ErrorSeverity::High,
            ErrorCategory::Output | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::MissingColumnError { column } => format!(
                "Export the booking sheet again and make sure it has a '{}' column",
                column
            ),
            Self::CoercionError { row, column, .. } => format!(
                "Fix the {} value on row {} so it holds a number, then convert again",
                column, row
            ),
            Self::TomlError(_) | Self::PatternError(_) => {
                "Check the lookup file syntax and its crew patterns".to_string()
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Review the command-line options with --help".to_string()
            }
            Self::CsvError(_) | Self::SerializationError(_) | Self::InputFormatError { .. } => {
                "Make sure the input is a CSV export or a JSON array of rows".to_string()
            }
            Self::IoError(_) => "Check that the paths exist and are writable".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Input => format!("Could not read the booking data: {}", self),
            ErrorCategory::Transformation => {
                format!("Conversion stopped, no file was written: {}", self)
            }
            ErrorCategory::Output => format!("Could not write the import file: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
