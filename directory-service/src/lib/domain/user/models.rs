use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::user::errors::EmailError;
use crate::user::errors::PhoneNumberError;
use crate::user::errors::RoleError;
use crate::user::errors::SubjectIdError;

/// Identity record aggregate.
///
/// Owned by the user store and keyed by the subject identifier the identity
/// provider assigned at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: SubjectId,
    pub reference_number: i64,
    pub email: EmailAddress,
    pub phone_number: PhoneNumber,
    pub role: Role,
    pub display_name: String,
}

impl User {
    /// Project the fields a self-service caller may see and modify.
    pub fn public_info(&self) -> PublicInfo {
        PublicInfo {
            reference_number: self.reference_number,
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// Public fields of an identity record (everything except id and role).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicInfo {
    pub reference_number: i64,
    pub email: EmailAddress,
    pub phone_number: PhoneNumber,
    pub display_name: String,
}

/// Stable provider-issued identifier of an authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectId(String);

impl SubjectId {
    /// Wrap a subject identifier.
    ///
    /// # Arguments
    /// * `subject` - Raw `sub` claim value
    ///
    /// # Returns
    /// SubjectId value object
    ///
    /// # Errors
    /// * `Empty` - Subject is empty or whitespace
    pub fn new(subject: impl Into<String>) -> Result<Self, SubjectIdError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(SubjectIdError::Empty);
        }
        Ok(Self(subject))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Optional country code, digit groups with separators, optional extension.
static PHONE_NUMBER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:(?:\(?(?:00|\+)([1-4]\d\d|[1-9]\d?)\)?)?[-. \\/]?)?((?:\(?\d+\)?[-. \\/]?)*)(?:[-. \\/]?(?:#|ext\.?|extension|x)[-. \\/]?(\d+))?$",
    )
    .expect("phone number pattern is valid")
});

/// Phone number type
///
/// Accepts international numbers such as `+1-202-555-0101`,
/// `(00 44) 20 7946 0958` or `8 (812) 555-01-01 ext. 12`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new validated phone number.
    ///
    /// # Arguments
    /// * `phone_number` - Raw phone number string
    ///
    /// # Returns
    /// Validated PhoneNumber value object
    ///
    /// # Errors
    /// * `Empty` - Phone number is empty
    /// * `InvalidFormat` - Phone number does not match the accepted pattern
    pub fn new(phone_number: String) -> Result<Self, PhoneNumberError> {
        if phone_number.trim().is_empty() {
            return Err(PhoneNumberError::Empty);
        }
        if !PHONE_NUMBER_PATTERN.is_match(&phone_number) {
            return Err(PhoneNumberError::InvalidFormat(phone_number));
        }
        Ok(Self(phone_number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Authorization tier of an identity record.
///
/// Closed set; the integer codes are the stored and wire representation.
/// Access checks compare for equality, there is no ordering between tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn code(self) -> i64 {
        match self {
            Role::User => 1,
            Role::Admin => 2,
        }
    }
}

impl TryFrom<i64> for Role {
    type Error = RoleError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Role::User),
            2 => Ok(Role::Admin),
            other => Err(RoleError::Unsupported(other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => f.write_str("user"),
            Role::Admin => f.write_str("admin"),
        }
    }
}

/// Unvalidated public fields as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicInfoDraft {
    pub reference_number: i64,
    pub email: String,
    pub phone_number: String,
    pub display_name: String,
}

/// Unvalidated full identity record as received from an administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub id: String,
    pub public: PublicInfoDraft,
    pub role: i64,
}
