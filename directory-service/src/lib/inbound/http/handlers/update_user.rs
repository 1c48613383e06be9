use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use axum_extra::extract::WithRejection;

use crate::domain::session::models::VerifiedIdentity;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PublicInfoRequest;
use crate::inbound::http::handlers::PublicInfoResponse;
use crate::inbound::http::router::AppState;

/// Replace the public fields of the caller's own record.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    WithRejection(Json(req), _): WithRejection<Json<PublicInfoRequest>, ApiError>,
) -> Result<ApiSuccess<PublicInfoResponse>, ApiError> {
    state
        .access_service
        .update_public_info(&identity.subject, req.into())
        .await
        .map_err(ApiError::from)
        .map(|info| ApiSuccess::new(StatusCode::OK, info.into()))
}
