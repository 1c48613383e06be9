//! The identity record rule set.
//!
//! Every write path goes through these functions; a draft either turns into
//! fully typed values or is rejected as a whole, so no partial write can follow.

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::PublicInfo;
use crate::domain::user::models::PublicInfoDraft;
use crate::domain::user::models::Role;
use crate::domain::user::models::SubjectId;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDraft;
use crate::user::errors::ValidationError;

/// Validate the public fields of a record.
///
/// # Errors
/// * `Email` - Email is not a valid mailbox address
/// * `PhoneNumber` - Phone number is empty or malformed
pub fn validate_public_info(draft: PublicInfoDraft) -> Result<PublicInfo, ValidationError> {
    let email = EmailAddress::new(draft.email)?;
    let phone_number = PhoneNumber::new(draft.phone_number)?;

    Ok(PublicInfo {
        reference_number: draft.reference_number,
        email,
        phone_number,
        display_name: draft.display_name,
    })
}

/// Validate a complete record including identifier and role.
///
/// # Errors
/// * `SubjectId` - Identifier is empty
/// * `Role` - Role code is neither User nor Admin
/// * `Email` / `PhoneNumber` - As for [`validate_public_info`]
pub fn validate_user(draft: UserDraft) -> Result<User, ValidationError> {
    let id = SubjectId::new(draft.id)?;
    let role = Role::try_from(draft.role)?;
    Ok(with_identity(id, role, validate_public_info(draft.public)?))
}

/// Assemble a record from already validated parts.
pub fn with_identity(id: SubjectId, role: Role, public: PublicInfo) -> User {
    User {
        id,
        reference_number: public.reference_number,
        email: public.email,
        phone_number: public.phone_number,
        role,
        display_name: public.display_name,
    }
}
