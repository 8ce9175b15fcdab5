use thiserror::Error;

/// Failure talking to the recommendation backend.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("Request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Backend rejected the request: {0}")]
    Rejected(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }

    /// Short text for the status line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { status, .. } if *status >= 500 => {
                format!("Server error ({})", status)
            }
            ApiError::Status { status, .. } => format!("Request failed ({})", status),
            ApiError::Transport { source, .. } if source.is_connect() => {
                "Cannot reach the backend".to_string()
            }
            ApiError::Transport { .. } => "Network error".to_string(),
            ApiError::Decode { .. } => "Unexpected response from the backend".to_string(),
            ApiError::Rejected(msg) => msg.clone(),
        }
    }
}

/// Failure loading runtime settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid environment configuration: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid API url '{0}'")]
    ApiUrl(String),

    #[error("Could not determine a home directory")]
    NoHomeDir,
}

/// Failure reading or creating the persistent user id.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("User id file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;
