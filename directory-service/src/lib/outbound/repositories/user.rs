use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PhoneNumber;
use crate::domain::user::models::PublicInfo;
use crate::domain::user::models::Role;
use crate::domain::user::models::SubjectId;
use crate::domain::user::models::User;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

/// PostgreSQL implementation of UserRepository.
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new PostgreSQL user repository.
    ///
    /// # Arguments
    /// * `pool` - PostgreSQL connection pool
    ///
    /// # Returns
    /// Configured repository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    isu: i64,
    email: String,
    phone_number: String,
    role: i64,
    full_name: String,
}

impl TryFrom<UserRow> for User {
    type Error = UserError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: SubjectId::new(row.id.clone()).map_err(|e| corrupt_record(&row.id, e))?,
            reference_number: row.isu,
            email: EmailAddress::new(row.email).map_err(|e| corrupt_record(&row.id, e))?,
            phone_number: PhoneNumber::new(row.phone_number)
                .map_err(|e| corrupt_record(&row.id, e))?,
            role: Role::try_from(row.role).map_err(|e| corrupt_record(&row.id, e))?,
            display_name: row.full_name,
        })
    }
}

// Stored rows that no longer satisfy the rule set are storage faults.
fn corrupt_record(id: &str, e: impl std::fmt::Display) -> UserError {
    UserError::Storage(format!("Corrupt user record {}: {}", id, e))
}

fn storage_error(e: sqlx::Error) -> UserError {
    UserError::Storage(e.to_string())
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn add(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, isu, email, phone_number, role, full_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user.id.as_str())
        .bind(user.reference_number)
        .bind(user.email.as_str())
        .bind(user.phone_number.as_str())
        .bind(user.role.code())
        .bind(&user.display_name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return UserError::AlreadyExists(user.id.to_string());
                }
            }
            storage_error(e)
        })?;

        Ok(user)
    }

    async fn update_all(&self, user: User) -> Result<User, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET isu = $2, email = $3, phone_number = $4, role = $5, full_name = $6
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_str())
        .bind(user.reference_number)
        .bind(user.email.as_str())
        .bind(user.phone_number.as_str())
        .bind(user.role.code())
        .bind(&user.display_name)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(user.id.to_string()));
        }

        Ok(user)
    }

    async fn update_public_fields(
        &self,
        id: &SubjectId,
        public: PublicInfo,
    ) -> Result<PublicInfo, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET isu = $2, email = $3, phone_number = $4, full_name = $5
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(public.reference_number)
        .bind(public.email.as_str())
        .bind(public.phone_number.as_str())
        .bind(&public.display_name)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(UserError::NotFound(id.to_string()));
        }

        Ok(public)
    }

    async fn find_all(&self) -> Result<Vec<User>, UserError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
            SELECT id, isu, email, phone_number, role, full_name
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, UserError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT id, isu, email, phone_number, role, full_name
            FROM users
            WHERE phone_number = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_role(&self, id: &SubjectId) -> Result<Option<Role>, UserError> {
        let role: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT role
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        role.map(|code| Role::try_from(code).map_err(|e| corrupt_record(id.as_str(), e)))
            .transpose()
    }
}
