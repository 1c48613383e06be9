use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::domain::user::models::PublicInfoDraft;
use crate::domain::user::models::UserDraft;
use crate::inbound::http::guards::RequireAdmin;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserResponse;
use crate::inbound::http::router::AppState;

/// HTTP request body for replacing a whole record (raw JSON)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateFullInfoRequest {
    #[serde(rename = "ID")]
    pub id: String,
    pub isu: i64,
    pub email: String,
    pub phone_number: String,
    pub role: i64,
    pub full_name: String,
}

impl From<UpdateFullInfoRequest> for UserDraft {
    fn from(req: UpdateFullInfoRequest) -> Self {
        Self {
            id: req.id,
            public: PublicInfoDraft {
                reference_number: req.isu,
                email: req.email,
                phone_number: req.phone_number,
                display_name: req.full_name,
            },
            role: req.role,
        }
    }
}

pub async fn update_full_info(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    WithRejection(Json(req), _): WithRejection<Json<UpdateFullInfoRequest>, ApiError>,
) -> Result<ApiSuccess<UserResponse>, ApiError> {
    tracing::debug!(admin = %admin.subject, target = %req.id, "Full info update requested");

    state
        .access_service
        .update_full_info(req.into())
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::OK, user.into()))
}
