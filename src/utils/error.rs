use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;

use crate::utils::metrics;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(String),
    PaymentError(String),
    InvalidRequest(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::PaymentError(msg) => write!(f, "Payment error: {}", msg),
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::DatabaseError(err.to_string())
    }
}

/// Every route returns `Result<_, AppError>`, so this is the one place where
/// failures become HTTP responses. Internal details stay in the log.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) | AppError::PaymentError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        metrics::increment_error_count();

        match self {
            AppError::InvalidRequest(_) => {
                log::warn!("⚠️  {}", self);
                HttpResponse::BadRequest()
                    .content_type("text/plain; charset=utf-8")
                    .body(self.to_string())
            }
            _ => {
                log::error!("❌ {}", self);
                HttpResponse::InternalServerError()
                    .content_type("text/plain; charset=utf-8")
                    .body("Internal Server Error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_store_errors_hide_details() {
        let err = AppError::DatabaseError("connection refused by 10.0.0.7".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        assert_eq!(body, "Internal Server Error");
    }

    #[actix_web::test]
    async fn test_invalid_request_is_bad_request() {
        let err = AppError::InvalidRequest("'abc' is not a valid id".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        assert_eq!(body, "Invalid request: 'abc' is not a valid id");
    }
}
