use async_trait::async_trait;

use crate::domain::user::models::PublicInfo;
use crate::domain::user::models::PublicInfoDraft;
use crate::domain::user::models::Role;
use crate::domain::user::models::SubjectId;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDraft;
use crate::user::errors::UserError;

/// Port for identity record operations.
///
/// Every read and write of identity records goes through this port; it is
/// the only place the record rule set is applied.
#[async_trait]
pub trait AccessServicePort: Send + Sync + 'static {
    /// Register the caller's own record with role User.
    ///
    /// # Arguments
    /// * `id` - Verified subject identifier of the caller
    /// * `draft` - Unvalidated public fields
    ///
    /// # Returns
    /// Created identity record
    ///
    /// # Errors
    /// * `Validation` - Draft violates the rule set, nothing written
    /// * `AlreadyExists` - A record with this identifier exists
    /// * `Storage` - Store operation failed
    async fn add_user(&self, id: SubjectId, draft: PublicInfoDraft) -> Result<User, UserError>;

    /// Look up public fields by phone number.
    ///
    /// # Arguments
    /// * `phone_number` - Phone number exactly as stored
    ///
    /// # Returns
    /// Public fields of the matching record
    ///
    /// # Errors
    /// * `NotFound` - No record with this phone number
    /// * `Storage` - Store operation failed
    async fn get_public_info(&self, phone_number: &str) -> Result<PublicInfo, UserError>;

    /// Replace the public fields of the caller's own record.
    ///
    /// Role and identifier are never touched by this path.
    ///
    /// # Arguments
    /// * `id` - Verified subject identifier of the caller
    /// * `draft` - Unvalidated public fields
    ///
    /// # Returns
    /// The new public fields
    ///
    /// # Errors
    /// * `Validation` - Draft violates the rule set, nothing written
    /// * `NotFound` - Caller has no record
    /// * `Storage` - Store operation failed
    async fn update_public_info(
        &self,
        id: &SubjectId,
        draft: PublicInfoDraft,
    ) -> Result<PublicInfo, UserError>;

    /// Replace every field of a record, role included. Administrators only.
    ///
    /// # Arguments
    /// * `draft` - Unvalidated full record naming its target by identifier
    ///
    /// # Returns
    /// Updated identity record
    ///
    /// # Errors
    /// * `Validation` - Draft violates the rule set, nothing written
    /// * `NotFound` - No record with the draft's identifier
    /// * `Storage` - Store operation failed
    async fn update_full_info(&self, draft: UserDraft) -> Result<User, UserError>;

    /// List every identity record. Administrators only.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn list_all_users(&self) -> Result<Vec<User>, UserError>;

    /// Resolve the role of a subject for authorization decisions.
    ///
    /// # Errors
    /// * `NotFound` - Subject has no record
    /// * `Storage` - Store operation failed
    async fn get_role(&self, id: &SubjectId) -> Result<Role, UserError>;
}

/// Persistence operations for identity records.
///
/// Consistency of writes is the store's responsibility.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new record.
    ///
    /// # Errors
    /// * `AlreadyExists` - Identifier is taken
    /// * `Storage` - Store operation failed
    async fn add(&self, user: User) -> Result<User, UserError>;

    /// Overwrite every field of the record with the same identifier.
    ///
    /// # Errors
    /// * `NotFound` - No record with this identifier
    /// * `Storage` - Store operation failed
    async fn update_all(&self, user: User) -> Result<User, UserError>;

    /// Overwrite only the public fields of a record.
    ///
    /// # Errors
    /// * `NotFound` - No record with this identifier
    /// * `Storage` - Store operation failed
    async fn update_public_fields(
        &self,
        id: &SubjectId,
        public: PublicInfo,
    ) -> Result<PublicInfo, UserError>;

    /// Retrieve all records.
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_all(&self) -> Result<Vec<User>, UserError>;

    /// Retrieve the first record with this phone number.
    ///
    /// # Returns
    /// Optional record (None if not found)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, UserError>;

    /// Retrieve the role of a record.
    ///
    /// # Returns
    /// Optional role (None if no record with this identifier)
    ///
    /// # Errors
    /// * `Storage` - Store operation failed
    async fn find_role(&self, id: &SubjectId) -> Result<Option<Role>, UserError>;
}
