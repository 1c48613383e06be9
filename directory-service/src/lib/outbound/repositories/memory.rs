use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::PublicInfo;
use crate::domain::user::models::Role;
use crate::domain::user::models::SubjectId;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// In-process implementation of UserRepository.
///
/// Records are ordered by subject identifier so lookups behave like the
/// PostgreSQL store. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<BTreeMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with records.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let users = users
            .into_iter()
            .map(|user| (user.id.as_str().to_string(), user))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn add(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.contains_key(user.id.as_str()) {
            return Err(UserError::AlreadyExists(user.id.to_string()));
        }
        users.insert(user.id.as_str().to_string(), user.clone());
        Ok(user)
    }

    async fn update_all(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(user.id.as_str())
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;
        *stored = user.clone();
        Ok(user)
    }

    async fn update_public_fields(
        &self,
        id: &SubjectId,
        public: PublicInfo,
    ) -> Result<PublicInfo, UserError> {
        let mut users = self.users.write().await;
        let stored = users
            .get_mut(id.as_str())
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;

        stored.reference_number = public.reference_number;
        stored.email = public.email.clone();
        stored.phone_number = public.phone_number.clone();
        stored.display_name = public.display_name.clone();

        Ok(public)
    }

    async fn find_all(&self) -> Result<Vec<User>, UserError> {
        Ok(self.users.read().await.values().cloned().collect())
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|user| user.phone_number.as_str() == phone_number)
            .cloned())
    }

    async fn find_role(&self, id: &SubjectId) -> Result<Option<Role>, UserError> {
        Ok(self.users.read().await.get(id.as_str()).map(|user| user.role))
    }
}
