use thiserror::Error;

#[derive(Error, Debug)]
pub enum DoseError {
    #[error("Remote request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Failed to load reference table from {source_name}: {message}")]
    LoadError { source_name: String, message: String },

    #[error("Malformed reference row {row}: field '{field}' = '{value}' ({reason})")]
    MalformedRow {
        row: u64,
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate reference entry at row {row}: drug \"{drug}\" for species \"{species}\" already defined")]
    DuplicateEntry {
        row: u64,
        drug: String,
        species: String,
    },

    #[error("Weight must be a positive number")]
    InvalidWeight { value: f64 },

    #[error("Drug \"{drug}\" not found for species \"{species}\"")]
    DrugNotFound { drug: String, species: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

pub type Result<T> = std::result::Result<T, DoseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Load,
    Validation,
    NotFound,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DoseError {
    pub fn load(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        DoseError::LoadError {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            DoseError::HttpError(_)
            | DoseError::CsvError(_)
            | DoseError::IoError(_)
            | DoseError::LoadError { .. }
            | DoseError::MalformedRow { .. }
            | DoseError::DuplicateEntry { .. } => ErrorCategory::Load,
            DoseError::InvalidWeight { .. } => ErrorCategory::Validation,
            DoseError::DrugNotFound { .. } => ErrorCategory::NotFound,
            DoseError::TomlError(_)
            | DoseError::ConfigError { .. }
            | DoseError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DoseError::InternalError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Load | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    /// HTTP status an adapter should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => 400,
            ErrorCategory::NotFound => 404,
            _ => 500,
        }
    }

    /// Message safe to show to a caller. Only client errors carry their details.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::NotFound => self.to_string(),
            ErrorCategory::Load => "Failed to load drug data".to_string(),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Internal => "Failed to calculate dose".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DoseError::InvalidWeight { .. } => "Enter the animal's weight in kilograms as a number greater than zero",
            DoseError::DrugNotFound { .. } => "Run the `drugs` command to list the available drugs and species",
            DoseError::MalformedRow { .. } => "Fix the reported row so that both numeric columns hold positive numbers",
            DoseError::DuplicateEntry { .. } => "Remove the repeated drug/species row or use --duplicates first-wins",
            DoseError::IoError(_) | DoseError::LoadError { .. } => "Check that the reference table path exists and is readable",
            DoseError::HttpError(_) => "Check network connectivity and the reference table URL",
            DoseError::CsvError(_) => "Check the reference table is comma-delimited with a header row",
            DoseError::TomlError(_)
            | DoseError::ConfigError { .. }
            | DoseError::InvalidConfigValueError { .. } => "Review the configuration file and command-line flags",
            DoseError::InternalError { .. } => "Re-run with --verbose and report the logged details",
        }
    }
}
