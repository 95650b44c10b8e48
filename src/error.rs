use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

/// Crate-wide error taxonomy. The boundary maps each variant to an HTTP
/// status; internal variants never leak their details to the client.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Blocking task was canceled")]
    Canceled,

    #[error("{0}")]
    Internal(String),
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(_: actix_web::error::BlockingError) -> Self {
        ApiError::Canceled
    }
}

impl From<crate::vision::RecognitionError> for ApiError {
    fn from(err: crate::vision::RecognitionError) -> Self {
        match err {
            crate::vision::RecognitionError::EmptyImage => {
                ApiError::Validation(err.to_string())
            }
            crate::vision::RecognitionError::Backend(msg) => ApiError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Database(_)
            | ApiError::Pool(_)
            | ApiError::Canceled
            | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::Validation(m) | ApiError::NotFound(m) | ApiError::Unauthorized(m) => {
                m.clone()
            }
            other => {
                log::error!("Internal error: {}", other);
                "Internal server error".to_string()
            }
        };

        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::ResponseError;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::Validation("Ingredient is required".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::NotFound("Recipe not found".to_string());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_errors_map_to_500() {
        let err = ApiError::Database(diesel::result::Error::RollbackTransaction);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
