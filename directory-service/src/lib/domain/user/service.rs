use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::PublicInfo;
use crate::domain::user::models::PublicInfoDraft;
use crate::domain::user::models::Role;
use crate::domain::user::models::SubjectId;
use crate::domain::user::models::User;
use crate::domain::user::models::UserDraft;
use crate::domain::user::validation;
use crate::user::errors::UserError;
use crate::user::ports::AccessServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for identity record operations.
///
/// Concrete implementation of AccessServicePort with dependency injection.
pub struct AccessService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> AccessService<UR>
where
    UR: UserRepository,
{
    /// Create a new access service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User store implementation
    ///
    /// # Returns
    /// Configured access service instance
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> AccessServicePort for AccessService<UR>
where
    UR: UserRepository,
{
    async fn add_user(&self, id: SubjectId, draft: PublicInfoDraft) -> Result<User, UserError> {
        let public = validation::validate_public_info(draft)?;
        let user = validation::with_identity(id, Role::User, public);

        let created_user = self.repository.add(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn get_public_info(&self, phone_number: &str) -> Result<PublicInfo, UserError> {
        self.repository
            .find_by_phone(phone_number)
            .await?
            .map(|user| user.public_info())
            .ok_or(UserError::NotFound(phone_number.to_string()))
    }

    async fn update_public_info(
        &self,
        id: &SubjectId,
        draft: PublicInfoDraft,
    ) -> Result<PublicInfo, UserError> {
        let public = validation::validate_public_info(draft)?;

        let updated = self.repository.update_public_fields(id, public).await?;
        tracing::info!(user_id = %id, "Public info updated");

        Ok(updated)
    }

    async fn update_full_info(&self, draft: UserDraft) -> Result<User, UserError> {
        let user = validation::validate_user(draft)?;

        let updated_user = self.repository.update_all(user).await?;
        tracing::info!(
            user_id = %updated_user.id,
            role = %updated_user.role,
            "Full info updated"
        );

        Ok(updated_user)
    }

    async fn list_all_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.find_all().await
    }

    async fn get_role(&self, id: &SubjectId) -> Result<Role, UserError> {
        self.repository
            .find_role(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }
}
