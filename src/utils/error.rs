use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Could not obtain authorization token (status {status}): {message}")]
    AuthError { status: u16, message: String },

    #[error("Could not create project '{project}' (status {status}): {message}")]
    ProjectCreationError {
        project: String,
        status: u16,
        message: String,
    },

    #[error("Could not add product '{external_id}' to project (status {status}): {message}")]
    ProductUploadError {
        external_id: String,
        status: u16,
        message: String,
    },

    #[error("Could not query {resource} (status {status}): {message}")]
    QueryError {
        resource: String,
        status: u16,
        message: String,
    },

    #[error("Could not find product '{external_id}' in the local product list")]
    LookupError { external_id: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Authentication,
    RemoteService,
    DataIntegrity,
    Network,
    Io,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code; every failure exits non-zero.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SyncError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SyncError::AuthError { .. } => ErrorCategory::Authentication,
            SyncError::ProjectCreationError { .. }
            | SyncError::ProductUploadError { .. }
            | SyncError::QueryError { .. } => ErrorCategory::RemoteService,
            SyncError::LookupError { .. }
            | SyncError::CsvError(_)
            | SyncError::SerializationError(_) => ErrorCategory::DataIntegrity,
            SyncError::ApiError(_) => ErrorCategory::Network,
            SyncError::IoError(_) => ErrorCategory::Io,
            SyncError::UrlError(_)
            | SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 5xx and transport failures usually clear up when the flow is invoked again
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::RemoteService => match self.status() {
                Some(status) if status >= 500 => ErrorSeverity::Medium,
                _ => ErrorSeverity::High,
            },
            ErrorCategory::Authentication
            | ErrorCategory::DataIntegrity
            | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// HTTP status reported by the remote service, if this error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            SyncError::AuthError { status, .. }
            | SyncError::ProjectCreationError { status, .. }
            | SyncError::ProductUploadError { status, .. }
            | SyncError::QueryError { status, .. } => Some(*status),
            SyncError::ApiError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SyncError::AuthError { .. } => {
                "Check api.client_id and api.client_secret in the configuration file"
            }
            SyncError::ProjectCreationError { .. } => {
                "A project with this name may already exist; use `poll --project` to query it"
            }
            SyncError::ProductUploadError { .. } => {
                "Verify the product record; products uploaded before the failure stay in the project"
            }
            SyncError::QueryError { .. } => "Invoke the poll again later",
            SyncError::LookupError { .. } => {
                "The remote project contains a product that is missing from the local product file"
            }
            SyncError::ApiError(_) => "Check the network connection and api.base_url",
            SyncError::UrlError(_) => "Check api.base_url in the configuration file",
            SyncError::CsvError(_) => {
                "Expected header: id,article_number,name,weight,dimensions,tariff_number"
            }
            SyncError::IoError(_) => "Check that the file exists and is accessible",
            SyncError::SerializationError(_) => "The remote service returned an unexpected payload",
            SyncError::ConfigValidationError { .. }
            | SyncError::InvalidConfigValueError { .. }
            | SyncError::MissingConfigError { .. } => "Fix the configuration file and run again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Authentication => format!("Authentication failed: {}", self),
            ErrorCategory::RemoteService => format!("Classification service error: {}", self),
            ErrorCategory::DataIntegrity => format!("Product data error: {}", self),
            ErrorCategory::Network => format!("Network error: {}", self),
            ErrorCategory::Io => format!("File error: {}", self),
            ErrorCategory::Configuration => format!("Configuration error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
