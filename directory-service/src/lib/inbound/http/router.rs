use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_user::add_user;
use super::handlers::begin_login::begin_login;
use super::handlers::callback::callback;
use super::handlers::find_user::find_user;
use super::handlers::list_users::list_users;
use super::handlers::update_full_info::update_full_info;
use super::handlers::update_user::update_user;
use super::middleware::authenticate;
use crate::config::CookieConfig;
use crate::domain::session::gateway::SessionGateway;
use crate::domain::session::ports::IdentityProvider;
use crate::user::ports::AccessServicePort;

#[derive(Clone)]
pub struct AppState {
    pub access_service: Arc<dyn AccessServicePort>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub session_gateway: Arc<SessionGateway<dyn IdentityProvider>>,
    pub cookies: CookieConfig,
}

pub fn create_router(
    access_service: Arc<dyn AccessServicePort>,
    identity_provider: Arc<dyn IdentityProvider>,
    cookies: CookieConfig,
) -> Router {
    let state = AppState {
        access_service,
        session_gateway: Arc::new(SessionGateway::new(Arc::clone(&identity_provider))),
        identity_provider,
        cookies,
    };

    let public_routes = Router::new()
        .route("/", get(callback))
        .route("/auth", get(begin_login));

    let user_routes = Router::new()
        .route("/user/users/add", post(add_user))
        .route("/user/users/find", get(find_user))
        .route("/user/users/update", put(update_user));

    let admin_routes = Router::new().route("/admin/users", get(list_users).put(update_full_info));

    let protected_routes = user_routes
        .merge(admin_routes)
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %logged_path(request),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                path = %logged_path(request),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// Query strings carry login codes and phone numbers.
fn logged_path<B>(request: &Request<B>) -> &str {
    request.uri().path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_path_drops_query() {
        let request = Request::builder()
            .uri("/?state=abcdefghijklmnop&code=secret-code")
            .body(())
            .unwrap();
        assert_eq!(logged_path(&request), "/");

        let request = Request::builder()
            .uri("/user/users/find?phoneNumber=%2B7%20812")
            .body(())
            .unwrap();
        assert_eq!(logged_path(&request), "/user/users/find");
    }
}
