use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::domain::session::models::SessionOutcome;
use crate::domain::session::models::SessionTokens;
use crate::inbound::http::cookies;
use crate::inbound::http::handlers::found;
use crate::inbound::http::router::AppState;

/// Login endpoint unauthenticated clients are sent to.
pub const LOGIN_PATH: &str = "/auth";

/// Middleware that establishes the caller's session from its cookies.
///
/// On success the `VerifiedIdentity` is inserted into this request's
/// extensions. Tokens renewed on the way are handed back as new cookies,
/// including the refresh token when the provider rotated it.
pub async fn authenticate(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let tokens = SessionTokens::new(
        cookies::value(&jar, cookies::ACCESS_TOKEN_COOKIE),
        cookies::value(&jar, cookies::REFRESH_TOKEN_COOKIE),
    );

    match state.session_gateway.resolve(&tokens).await {
        SessionOutcome::Authorized(identity) => {
            let refreshed = identity.refreshed_tokens.clone();
            req.extensions_mut().insert(identity);

            let response = next.run(req).await;

            match refreshed {
                Some(tokens) => {
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
                    (jar, response).into_response()
                }
                None => response,
            }
        }
        SessionOutcome::Redirect => found(LOGIN_PATH),
        SessionOutcome::Denied(_) => StatusCode::FORBIDDEN.into_response(),
    }
}
