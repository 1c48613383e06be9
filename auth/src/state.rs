use rand::distributions::Alphanumeric;
use rand::Rng;

/// Length of generated login-state values.
pub const STATE_LENGTH: usize = 16;

/// Random value tying an authorization callback to the browser that started the login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateToken(String);

impl StateToken {
    /// Generate a fresh alphanumeric state value.
    ///
    /// # Returns
    /// StateToken of `STATE_LENGTH` characters from a thread-local CSPRNG
    pub fn generate() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(STATE_LENGTH)
            .map(char::from)
            .collect();
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Compare a returned state against the stored one in constant time.
    ///
    /// Empty values never match.
    pub fn matches(expected: &str, actual: &str) -> bool {
        let expected = expected.as_bytes();
        let actual = actual.as_bytes();
        if expected.is_empty() || expected.len() != actual.len() {
            return false;
        }

        expected
            .iter()
            .zip(actual)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }
}
