use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn loading() -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "deals are still loading".to_string(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Failure of the one-shot upstream deals request.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("deals request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("deals API answered with status {0}")]
    Status(u16),
    #[error("deals payload is not a valid deal list: {0}")]
    Decode(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_messages() {
        assert_eq!(
            FetchError::Status(500).to_string(),
            "deals API answered with status 500"
        );
        let decode = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        assert!(FetchError::from(decode).to_string().starts_with("deals payload"));
    }

    #[test]
    fn app_error_statuses() {
        assert_eq!(AppError::loading().status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(AppError::upstream("x").status, StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::not_found("x").status, StatusCode::NOT_FOUND);
    }
}
