use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use directory_service::config::CookieConfig;
use directory_service::domain::session::errors::SessionError;
use directory_service::domain::session::models::IssuedTokens;
use directory_service::domain::session::ports::IdentityProvider;
use directory_service::domain::user::models::EmailAddress;
use directory_service::domain::user::models::PhoneNumber;
use directory_service::domain::user::models::Role;
use directory_service::domain::user::models::SubjectId;
use directory_service::domain::user::models::User;
use directory_service::domain::user::service::AccessService;
use directory_service::inbound::http::router::create_router;
use directory_service::outbound::repositories::InMemoryUserRepository;
use reqwest::header::COOKIE;
use reqwest::header::SET_COOKIE;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const USER_TOKEN: &str = "user-token";
pub const NEWCOMER_TOKEN: &str = "newcomer-token";
pub const EXPIRED_TOKEN: &str = "expired-token";
pub const USER_REFRESH_TOKEN: &str = "user-refresh";
pub const ROTATING_REFRESH_TOKEN: &str = "user-refresh-rotating";
pub const ROTATED_REFRESH_TOKEN: &str = "user-refresh-2";
pub const REFRESHED_USER_TOKEN: &str = "user-token-2";
pub const LOGIN_CODE: &str = "login-code";
pub const AUTHORIZE_URL: &str = "https://id.example.com/authorize";

pub const USER_PHONE: &str = "+7 (812) 555-01-01";
pub const ADMIN_PHONE: &str = "+1-202-555-0100";

/// Identity provider answering from fixed tables instead of a real OIDC issuer.
#[derive(Default)]
pub struct StaticIdentityProvider {
    access_tokens: HashMap<String, String>,
    refresh_tokens: HashMap<String, IssuedTokens>,
    codes: HashMap<String, IssuedTokens>,
    refresh_calls: AtomicUsize,
}

impl StaticIdentityProvider {
    pub fn with_access_token(mut self, token: &str, subject: &str) -> Self {
        self.access_tokens
            .insert(token.to_string(), subject.to_string());
        self
    }

    pub fn with_refresh_token(
        mut self,
        refresh_token: &str,
        access_token: &str,
        rotated_refresh_token: Option<&str>,
    ) -> Self {
        self.refresh_tokens.insert(
            refresh_token.to_string(),
            IssuedTokens {
                access_token: access_token.to_string(),
                refresh_token: rotated_refresh_token.map(str::to_string),
            },
        );
        self
    }

    pub fn with_code(mut self, code: &str, tokens: IssuedTokens) -> Self {
        self.codes.insert(code.to_string(), tokens);
        self
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!("{}?response_type=code&state={}", AUTHORIZE_URL, state)
    }

    async fn exchange_code(&self, code: &str) -> Result<IssuedTokens, SessionError> {
        self.codes
            .get(code)
            .cloned()
            .ok_or_else(|| SessionError::ExchangeFailed("invalid_grant".to_string()))
    }

    async fn verify(&self, token: &str) -> Result<SubjectId, SessionError> {
        let subject = self
            .access_tokens
            .get(token)
            .ok_or_else(|| SessionError::InvalidToken("token is expired".to_string()))?;
        SubjectId::new(subject.as_str()).map_err(|e| SessionError::InvalidToken(e.to_string()))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<IssuedTokens, SessionError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.refresh_tokens
            .get(refresh_token)
            .cloned()
            .ok_or_else(|| SessionError::RefreshFailed("invalid_grant".to_string()))
    }
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub repository: Arc<InMemoryUserRepository>,
    pub identity_provider: Arc<StaticIdentityProvider>,
}

pub fn user(id: &str, phone: &str, role: Role) -> User {
    User {
        id: SubjectId::new(id).unwrap(),
        reference_number: 1000,
        email: EmailAddress::new(format!("{}@example.com", id)).unwrap(),
        phone_number: PhoneNumber::new(phone.to_string()).unwrap(),
        role,
        display_name: format!("Name of {}", id),
    }
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    ///
    /// The store holds `admin-1` (Admin) and `user-1` (User); `newcomer-1`
    /// can log in but has no record yet.
    pub async fn spawn() -> Self {
        let identity_provider = StaticIdentityProvider::default()
            .with_access_token(ADMIN_TOKEN, "admin-1")
            .with_access_token(USER_TOKEN, "user-1")
            .with_access_token(REFRESHED_USER_TOKEN, "user-1")
            .with_access_token(NEWCOMER_TOKEN, "newcomer-1")
            .with_refresh_token(USER_REFRESH_TOKEN, REFRESHED_USER_TOKEN, None)
            .with_refresh_token(
                ROTATING_REFRESH_TOKEN,
                REFRESHED_USER_TOKEN,
                Some(ROTATED_REFRESH_TOKEN),
            )
            .with_refresh_token(ROTATED_REFRESH_TOKEN, REFRESHED_USER_TOKEN, None)
            .with_code(
                LOGIN_CODE,
                IssuedTokens {
                    access_token: USER_TOKEN.to_string(),
                    refresh_token: Some(USER_REFRESH_TOKEN.to_string()),
                },
            );

        let repository = Arc::new(InMemoryUserRepository::with_users([
            user("admin-1", ADMIN_PHONE, Role::Admin),
            user("user-1", USER_PHONE, Role::User),
        ]));

        Self::spawn_with(repository, Arc::new(identity_provider)).await
    }

    pub async fn spawn_with(
        repository: Arc<InMemoryUserRepository>,
        identity_provider: Arc<StaticIdentityProvider>,
    ) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let access_service = Arc::new(AccessService::new(Arc::clone(&repository)));

        let router = create_router(
            access_service,
            identity_provider.clone(),
            CookieConfig::default(),
        );

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("Failed to create reqwest client"),
            repository,
            identity_provider,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }
}

/// Attach session cookies the way a browser would after login.
pub fn with_session(
    request: reqwest::RequestBuilder,
    access_token: Option<&str>,
    refresh_token: Option<&str>,
) -> reqwest::RequestBuilder {
    let cookies: Vec<String> = [("access_token", access_token), ("refresh_token", refresh_token)]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| format!("{}={}", name, value)))
        .collect();

    if cookies.is_empty() {
        request
    } else {
        request.header(COOKIE, cookies.join("; "))
    }
}

/// All `Set-Cookie` headers of a response.
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// The `Set-Cookie` header for `name`, if any.
pub fn set_cookie(response: &reqwest::Response, name: &str) -> Option<String> {
    set_cookies(response)
        .into_iter()
        .find(|cookie| cookie.starts_with(&format!("{}=", name)))
}
