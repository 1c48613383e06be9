use std::sync::Arc;

use auth::Authenticator;
use directory_service::config::Config;
use directory_service::domain::user::service::AccessService;
use directory_service::inbound::http::router::create_router;
use directory_service::outbound::identity::OidcIdentityProvider;
use directory_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "directory_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "directory-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        issuer = %config.oidc.issuer_url,
        client_id = %config.oidc.client_id,
        secure_cookies = config.cookies.secure,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::discover(&config.oidc).await?);
    tracing::info!(issuer = %config.oidc.issuer_url, "OIDC provider discovered");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let access_service = Arc::new(AccessService::new(user_repository));
    let identity_provider = Arc::new(OidcIdentityProvider::new(authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(access_service, identity_provider, config.cookies);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");
    Ok(())
}
