use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::header::LOCATION;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::models::PublicInfo;
use crate::domain::user::models::PublicInfoDraft;
use crate::domain::user::models::User;
use crate::user::errors::UserError;

pub mod add_user;
pub mod begin_login;
pub mod callback;
pub mod find_user;
pub mod list_users;
pub mod update_full_info;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
        };

        (status, Json(ApiResponseBody::<()>::new_error(message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(_) => ApiError::BadRequest(err.to_string()),
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::AlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::Storage(detail) => {
                tracing::error!(error = %detail, "User store operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Response envelope: exactly one of `Data` and `Error` is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    #[serde(rename = "Data")]
    data: Option<T>,
    #[serde(rename = "Error")]
    error: String,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(data: T) -> Self {
        Self {
            data: Some(data),
            error: String::new(),
        }
    }

    pub fn new_error(message: String) -> Self {
        Self {
            data: None,
            error: message,
        }
    }
}

/// `302 Found` pointing at `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}

/// Public fields as sent by a self-service caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PublicInfoRequest {
    pub isu: i64,
    pub email: String,
    pub phone_number: String,
    pub full_name: String,
}

impl From<PublicInfoRequest> for PublicInfoDraft {
    fn from(req: PublicInfoRequest) -> Self {
        Self {
            reference_number: req.isu,
            email: req.email,
            phone_number: req.phone_number,
            display_name: req.full_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct PublicInfoResponse {
    pub isu: i64,
    pub email: String,
    pub phone_number: String,
    pub full_name: String,
}

impl From<PublicInfo> for PublicInfoResponse {
    fn from(info: PublicInfo) -> Self {
        Self {
            isu: info.reference_number,
            email: info.email.as_str().to_string(),
            phone_number: info.phone_number.as_str().to_string(),
            full_name: info.display_name,
        }
    }
}

/// Full identity record as returned to callers.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct UserResponse {
    #[serde(rename = "ID")]
    pub id: String,
    pub isu: i64,
    pub email: String,
    pub phone_number: String,
    pub role: i64,
    pub full_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            isu: user.reference_number,
            email: user.email.as_str().to_string(),
            phone_number: user.phone_number.as_str().to_string(),
            role: user.role.code(),
            full_name: user.display_name,
        }
    }
}
