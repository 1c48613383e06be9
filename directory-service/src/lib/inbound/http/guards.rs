use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;

use crate::domain::session::models::VerifiedIdentity;
use crate::domain::user::models::Role;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Extractor admitting only callers whose record has role Admin.
///
/// Must run behind the `authenticate` middleware. Rejections carry no body.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub VerifiedIdentity);

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = parts
            .extensions
            .get::<VerifiedIdentity>()
            .cloned()
            .ok_or_else(|| {
                tracing::error!("Admin route reached without a verified identity");
                StatusCode::FORBIDDEN
            })?;

        match state.access_service.get_role(&identity.subject).await {
            Ok(Role::Admin) => Ok(RequireAdmin(identity)),
            Ok(role) => {
                tracing::warn!(subject = %identity.subject, role = %role, "Admin access denied");
                Err(StatusCode::FORBIDDEN)
            }
            Err(UserError::NotFound(_)) => {
                tracing::warn!(subject = %identity.subject, "Admin access denied to unregistered subject");
                Err(StatusCode::FORBIDDEN)
            }
            Err(e) => {
                tracing::error!(subject = %identity.subject, error = %e, "Role lookup failed");
                Err(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
