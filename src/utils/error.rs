use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptimizerError {
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

    #[error("Source is missing required column '{column}'")]
    MissingColumn { column: String },

    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("Invalid item at row {row}: {reason}")]
    InvalidItem { row: usize, reason: String },

    #[error("Catalog has {items} items, exhaustive search supports at most {max}")]
    CatalogTooLarge { items: usize, max: usize },

    #[error("Decision table needs {cells} cells, limit is {max}")]
    TableTooLarge { cells: u128, max: u64 },

    #[error("Arithmetic overflow while {context}")]
    ArithmeticOverflow { context: String },

    #[error("Background task failed: {message}")]
    TaskError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Capacity,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a failed run. Never 0.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,   // 調整參數後重試
            ErrorSeverity::High => 1,     // 輸入或配置錯誤
            ErrorSeverity::Critical => 3, // 系統錯誤
        }
    }
}

impl OptimizerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CsvError(_)
            | Self::MissingColumn { .. }
            | Self::InvalidAmount { .. }
            | Self::InvalidItem { .. } => ErrorCategory::Input,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::CatalogTooLarge { .. }
            | Self::TableTooLarge { .. }
            | Self::ArithmeticOverflow { .. } => ErrorCategory::Capacity,
            Self::IoError(_) | Self::SerializationError(_) | Self::TaskError { .. } => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            // 調整預算或演算法後可重試
            ErrorCategory::Capacity => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not access a file: {}", e),
            Self::CsvError(e) => format!("The catalog file could not be read as CSV: {}", e),
            Self::CatalogTooLarge { items, max } => format!(
                "Exhaustive search cannot handle {} items (maximum {})",
                items, max
            ),
            Self::TableTooLarge { cells, .. } => format!(
                "The budget is too fine-grained for the dynamic solver ({} table cells)",
                cells
            ),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the input path exists and is readable",
            Self::CsvError(_) | Self::MissingColumn { .. } => {
                "Check the CSV header and the configured column names"
            }
            Self::InvalidAmount { .. } | Self::InvalidItem { .. } => {
                "Fix the offending value or drop --strict to skip invalid rows"
            }
            Self::CatalogTooLarge { .. } => "Use the dynamic strategy for large catalogs",
            Self::TableTooLarge { .. } => {
                "Lower the budget or raise max_table_cells if memory allows"
            }
            Self::ArithmeticOverflow { .. } => "Reduce the catalog size or the amounts involved",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => "Review the configuration values",
            Self::SerializationError(_) | Self::TaskError { .. } => {
                "Re-run with --verbose and report the log output"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, OptimizerError>;
