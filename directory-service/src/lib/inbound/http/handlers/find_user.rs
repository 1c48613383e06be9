use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::PublicInfoResponse;
use crate::inbound::http::router::AppState;

#[derive(Debug, Deserialize)]
pub struct FindUserParams {
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

pub async fn find_user(
    State(state): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<FindUserParams>, ApiError>,
) -> Result<ApiSuccess<PublicInfoResponse>, ApiError> {
    state
        .access_service
        .get_public_info(&params.phone_number)
        .await
        .map_err(ApiError::from)
        .map(|info| ApiSuccess::new(StatusCode::OK, info.into()))
}
