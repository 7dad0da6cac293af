use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use storefront_core::domain::common::entities::app_errors::CoreError;
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, "E_BAD_REQUEST", message.clone())
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "E_NOT_FOUND", message.clone()),
            ApiError::UnprocessableEntity(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "E_UNPROCESSABLE_ENTITY",
                message.clone(),
            ),
            ApiError::InternalServerError(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "E_INTERNAL_SERVER_ERROR",
                message.clone(),
            ),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound => ApiError::NotFound("resource not found".to_string()),
            CoreError::Invalid(message) => ApiError::BadRequest(message),
            CoreError::Storage(message) => {
                tracing::error!("storage failure: {}", message);
                ApiError::InternalServerError("failed to load".to_string())
            }
            CoreError::InternalServerError => {
                ApiError::InternalServerError("internal server error".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = ApiErrorResponse {
            code: code.to_string(),
            message,
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

/// JSON body extractor that runs `validator` rules before the handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::UnprocessableEntity(errors.to_string()))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_status() {
        assert_eq!(
            ApiError::from(CoreError::NotFound).parts().0,
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CoreError::Invalid("quantity".to_string())),
            ApiError::BadRequest("quantity".to_string())
        );
        assert_eq!(
            ApiError::from(CoreError::Storage("connection reset".to_string())),
            ApiError::InternalServerError("failed to load".to_string())
        );
    }

    #[test]
    fn test_error_body() {
        let response = ApiError::NotFound("product not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
