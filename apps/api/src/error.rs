use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use civicdesk_application::ReportServiceError;
use civicdesk_core::AppError;
use civicdesk_domain::ReportWorkflowError;
use serde::Serialize;

/// API error payload.
///
/// Geofence rejections additionally carry the verdict and the measured
/// accuracy/distance so clients can render precise guidance ("you are
/// 430 m away").
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accuracy_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_meters: Option<f64>,
}

impl ErrorResponse {
    fn message_only(message: String) -> Self {
        Self {
            message,
            verdict: None,
            accuracy_meters: None,
            distance_meters: None,
        }
    }
}

/// HTTP API error wrapper around orchestrator errors.
#[derive(Debug)]
pub struct ApiError(pub ReportServiceError);

impl From<ReportServiceError> for ApiError {
    fn from(value: ReportServiceError) -> Self {
        Self(value)
    }
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(ReportServiceError::App(value))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, payload) = match self.0 {
            ReportServiceError::App(error) => {
                let status = match error {
                    AppError::Validation(_) => StatusCode::BAD_REQUEST,
                    AppError::NotFound(_) => StatusCode::NOT_FOUND,
                    AppError::Conflict(_) => StatusCode::CONFLICT,
                    AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                    AppError::Forbidden(_) => StatusCode::FORBIDDEN,
                    AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };

                (status, ErrorResponse::message_only(error.to_string()))
            }
            ReportServiceError::Workflow(error) => {
                let status = match error {
                    ReportWorkflowError::InvalidTransition { .. } => StatusCode::CONFLICT,
                    ReportWorkflowError::NotAssignedStaff { .. }
                    | ReportWorkflowError::NotOriginalCitizen { .. } => StatusCode::FORBIDDEN,
                    ReportWorkflowError::UnknownStaff { .. } => StatusCode::NOT_FOUND,
                    ReportWorkflowError::GeofenceRejected { .. }
                    | ReportWorkflowError::MissingProofArtifact => StatusCode::BAD_REQUEST,
                };

                let payload = match &error {
                    ReportWorkflowError::GeofenceRejected { result } => ErrorResponse {
                        message: error.to_string(),
                        verdict: Some(result.verdict().as_str()),
                        accuracy_meters: Some(result.accuracy_meters()),
                        distance_meters: result.distance_meters(),
                    },
                    _ => ErrorResponse::message_only(error.to_string()),
                };

                (status, payload)
            }
        };

        (status, Json(payload)).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
