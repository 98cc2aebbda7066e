use rmcp::ErrorData as RpcError;

use thiserror::Error;

use crate::client::Method;

pub type ServiceResult<T> = core::result::Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("CLICKUP_API_TOKEN environment variable is required")]
    MissingToken,
    #[error("ClickUp API {method} {path} failed ({status}): {body}")]
    Upstream {
        method: Method,
        path: String,
        status: u16,
        body: String,
    },
    #[error("{0}")]
    Usage(String),
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
    #[error("Malformed ClickUp response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request task failed: {0}")]
    Join(String),
}

impl ServiceError {
    pub fn usage(message: impl Into<String>) -> Self {
        ServiceError::Usage(message.into())
    }
}

impl From<ServiceError> for RpcError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Usage(_) | ServiceError::InvalidParams(_) => {
                RpcError::invalid_params(err.to_string(), None)
            }
            other => RpcError::internal_error(other.to_string(), None),
        }
    }
}
