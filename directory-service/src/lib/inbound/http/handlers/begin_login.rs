use auth::StateToken;
use axum::extract::State;
use axum::response::Response;
use axum_extra::extract::CookieJar;

use crate::inbound::http::cookies;
use crate::inbound::http::handlers::found;
use crate::inbound::http::router::AppState;

/// Start a login: remember a fresh state token and send the client to the provider.
pub async fn begin_login(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    let login_state = StateToken::generate();
    let authorization_url = state
        .identity_provider
        .authorization_url(login_state.as_str());

    let jar = jar.add(cookies::build(
        cookies::STATE_COOKIE,
        login_state.into_string(),
        &state.cookies,
    ));

    (jar, found(&authorization_url))
}
