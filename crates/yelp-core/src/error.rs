use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("CliError: {0}")]
    Cli(#[from] CliError),
    #[error("ApiError: {0}")]
    Api(#[from] ApiError),
    #[error("AuthError: {0}")]
    Auth(#[from] AuthError),
    #[error("ConfigError: {0}")]
    Config(#[from] ConfigError),
    #[error("StorageError: {0}")]
    Storage(#[from] StorageError),
    #[error("ExportError: {0}")]
    Export(#[from] ExportError),
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64, endpoint: String },
    #[error("HTTP error: {status} {message}")]
    Http {
        status: u16,
        endpoint: String,
        message: String,
    },
    #[error("Authentication failed")]
    Unauthorized {
        status: u16,
        endpoint: String,
        server_message: String,
    },
    #[error("Malformed response from {endpoint}: {message}")]
    Malformed { endpoint: String, message: String },
}

impl ApiError {
    pub fn endpoint(&self) -> &str {
        match self {
            ApiError::Timeout { endpoint, .. }
            | ApiError::Http { endpoint, .. }
            | ApiError::Unauthorized { endpoint, .. }
            | ApiError::Malformed { endpoint, .. } => endpoint,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token request failed: {0}")]
    TokenRequestFailed(#[source] ApiError),
    #[error("Token response did not contain an access_token")]
    MissingAccessToken,
    #[error("Missing credential: {field}")]
    MissingCredentials { field: String },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("File I/O error at {path}: {source}")]
    FileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },
    #[error("Configuration directory not found")]
    ConfigDirNotFound,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration value for '{field}': {value}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Output I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Row write failed: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ErrorSeverity {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorSeverity::Critical => "critical",
            ErrorSeverity::High => "error",
            ErrorSeverity::Medium => "warning",
            ErrorSeverity::Low => "notice",
        }
    }
}

impl AppError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Cli(_) => ErrorSeverity::Medium,
            AppError::Api(api_error) => match api_error {
                ApiError::Unauthorized { .. } => ErrorSeverity::High,
                ApiError::Timeout { .. } => ErrorSeverity::Medium,
                ApiError::Http { status, .. } if *status >= 500 => ErrorSeverity::High,
                ApiError::Malformed { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Medium,
            },
            AppError::Auth(_) => ErrorSeverity::Critical,
            AppError::Config(_) => ErrorSeverity::High,
            AppError::Storage(_) => ErrorSeverity::Medium,
            AppError::Export(_) => ErrorSeverity::High,
        }
    }

    pub fn troubleshooting_hint(&self) -> Option<String> {
        match self {
            AppError::Auth(AuthError::MissingCredentials { .. }) => Some(
                "Set YELP_CLIENT_ID / YELP_CLIENT_SECRET or run 'yelp-export config set'"
                    .to_string(),
            ),
            AppError::Auth(_) | AppError::Api(ApiError::Unauthorized { .. }) => {
                Some("Run 'yelp-export config validate' to check your client id and secret".to_string())
            }
            AppError::Api(ApiError::Timeout { .. }) => {
                Some("Check your internet connection or raise timeout_seconds".to_string())
            }
            AppError::Storage(StorageError::ConfigParseError { .. }) => {
                Some("Run 'yelp-export config show' to inspect the loaded configuration".to_string())
            }
            _ => None,
        }
    }
}
