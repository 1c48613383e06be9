use auth::StateToken;
use axum::extract::Query;
use axum::extract::State;
use axum_extra::extract::CookieJar;
use axum_extra::extract::WithRejection;
use serde::Deserialize;

use crate::inbound::http::cookies;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub const AUTHORIZED_MESSAGE: &str = "You are authorized, please send your request to the endpoint again";

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// OIDC redirect target: check the state, exchange the code, set session cookies.
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Query(params), _): WithRejection<Query<CallbackParams>, ApiError>,
) -> Result<(CookieJar, &'static str), ApiError> {
    let expected_state = cookies::value(&jar, cookies::STATE_COOKIE)
        .ok_or_else(|| ApiError::BadRequest("state not found".to_string()))?;

    let returned_state = params.state.unwrap_or_default();
    if !StateToken::matches(&expected_state, &returned_state) {
        tracing::warn!("Login callback state mismatch");
        return Err(ApiError::BadRequest("state did not match".to_string()));
    }

    let code = params
        .code
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ApiError::BadRequest("code not found".to_string()))?;

    let tokens = state
        .identity_provider
        .exchange_code(&code)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Authorization code exchange failed");
            ApiError::BadGateway("Failed to exchange token".to_string())
        })?;

    let mut jar = jar.add(cookies::build(
        cookies::ACCESS_TOKEN_COOKIE,
        tokens.access_token,
        &state.cookies,
    ));
    if let Some(refresh_token) = tokens.refresh_token {
        jar = jar.add(cookies::build(
            cookies::REFRESH_TOKEN_COOKIE,
            refresh_token,
            &state.cookies,
        ));
    }
    let jar = cookies::remove(jar, cookies::STATE_COOKIE);

    tracing::info!("Login completed");
    Ok((jar, AUTHORIZED_MESSAGE))
}
