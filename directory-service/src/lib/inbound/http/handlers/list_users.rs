use axum::extract::State;
use axum::http::StatusCode;

use crate::inbound::http::guards::RequireAdmin;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserResponse;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> Result<ApiSuccess<Vec<UserResponse>>, ApiError> {
    state
        .access_service
        .list_all_users()
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                users.into_iter().map(UserResponse::from).collect(),
            )
        })
}
