use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use axum_extra::extract::WithRejection;

use crate::domain::session::models::VerifiedIdentity;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PublicInfoRequest;
use crate::inbound::http::handlers::UserResponse;
use crate::inbound::http::router::AppState;

/// Register the caller's own record under its verified subject identifier.
pub async fn add_user(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
    WithRejection(Json(req), _): WithRejection<Json<PublicInfoRequest>, ApiError>,
) -> Result<ApiSuccess<UserResponse>, ApiError> {
    state
        .access_service
        .add_user(identity.subject, req.into())
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}
