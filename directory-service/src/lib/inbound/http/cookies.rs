use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::CookieJar;

use crate::config::CookieConfig;

pub const STATE_COOKIE: &str = "state";
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// HTTP-only cookie scoped to the whole site.
pub fn build(name: &'static str, value: String, config: &CookieConfig) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .max_age(time::Duration::seconds(config.max_age_secs))
        .build()
}

/// Expire a cookie previously set with [`build`].
pub fn remove(jar: CookieJar, name: &'static str) -> CookieJar {
    jar.remove(Cookie::build(name).path("/"))
}

/// Non-empty value of a cookie, if present.
pub fn value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_applies_config() {
        let config = CookieConfig {
            secure: true,
            max_age_secs: 3600,
        };

        let cookie = build(ACCESS_TOKEN_COOKIE, "token".to_string(), &config);

        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "token");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::hours(1)));
    }

    #[test]
    fn test_value_ignores_empty_cookie() {
        let jar = CookieJar::new()
            .add(Cookie::new(ACCESS_TOKEN_COOKIE, ""))
            .add(Cookie::new(REFRESH_TOKEN_COOKIE, "refresh"));

        assert_eq!(value(&jar, ACCESS_TOKEN_COOKIE), None);
        assert_eq!(value(&jar, REFRESH_TOKEN_COOKIE), Some("refresh".to_string()));
        assert_eq!(value(&jar, STATE_COOKIE), None);
    }
}
