//! User service - Handles user-related business logic.
//!
//! SOLID (SRP): Handles user-related use cases only.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use convert::{ConverterContext, ConverterRegistry};
use domain::{User, UserChangeset, UserDto};

use crate::mappers;
use crate::repository::UserRepository;

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create a new user; fails with a conflict if the email is taken
    async fn create_user(&self, email: String) -> AppResult<User>;

    /// Get user by ID
    async fn get_user(&self, id: Uuid) -> AppResult<User>;

    /// Get user by email
    async fn get_user_by_email(&self, email: &str) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Apply a changeset to a user
    async fn update_user(&self, id: Uuid, changeset: UserChangeset) -> AppResult<User>;

    /// Delete user
    async fn delete_user(&self, id: Uuid) -> AppResult<()>;

    /// Get user in wire form
    async fn export_user(&self, id: Uuid) -> AppResult<proto::User>;

    /// Convert an already loaded user to wire form
    fn to_wire(&self, user: &User) -> AppResult<proto::User>;

    /// Get user as a transfer snapshot
    async fn snapshot_user(&self, id: Uuid) -> AppResult<UserDto>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
    converters: Arc<ConverterRegistry>,
}

impl UserManager {
    /// Create new user service instance with repository and converters
    pub fn new(repo: Arc<dyn UserRepository>, converters: Arc<ConverterRegistry>) -> Self {
        Self { repo, converters }
    }

    fn context(&self) -> &dyn ConverterContext {
        self.converters.as_ref()
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn create_user(&self, email: String) -> AppResult<User> {
        User::validate_email(&email)?;

        if self.repo.find_by_email(&email).await?.is_some() {
            warn!("User with email {} already exists", email);
            return Err(AppError::conflict("Email"));
        }

        let user = self.repo.create(email).await?;
        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: Uuid) -> AppResult<User> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<User> {
        self.repo.find_by_email(email).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.repo.list().await
    }

    async fn update_user(&self, id: Uuid, changeset: UserChangeset) -> AppResult<User> {
        let mut user = self.get_user(id).await?;

        if changeset.is_empty() {
            debug!(user_id = %id, "Empty changeset, nothing to update");
            return Ok(user);
        }

        changeset.apply_to(&mut user);

        match self.repo.save(&user).await {
            Ok(user) => {
                info!(user_id = %id, "User updated");
                Ok(user)
            }
            Err(AppError::NotFound) => Err(AppError::update_failed(format!(
                "user {} was deleted during update",
                id
            ))),
            Err(err) => Err(err),
        }
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn export_user(&self, id: Uuid) -> AppResult<proto::User> {
        let user = self.get_user(id).await?;
        self.to_wire(&user)
    }

    fn to_wire(&self, user: &User) -> AppResult<proto::User> {
        self.context()
            .to_proto::<User, proto::User>(Some(user))?
            .ok_or_else(|| AppError::internal("User converter produced no message"))
    }

    async fn snapshot_user(&self, id: Uuid) -> AppResult<UserDto> {
        let user = self.get_user(id).await?;
        Ok(mappers::user_dto(&user, self.context())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappers::default_registry;
    use crate::repository::MockUserRepository;
    use chrono::{FixedOffset, TimeZone};
    use domain::{
        HumanName, HumanNameChangeset, Patch, PersonalDetails, PersonalDetailsChangeset,
    };
    use mockall::predicate::eq;

    fn create_test_user(id: Uuid) -> User {
        User::new(id, "user@example.com".to_string())
    }

    fn service(repo: MockUserRepository) -> UserManager {
        UserManager::new(Arc::new(repo), Arc::new(default_registry()))
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("user@example.com"))
            .returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|email| Ok(User::new(Uuid::new_v4(), email)));

        let result = service(repo)
            .create_user("user@example.com".to_string())
            .await;

        assert_eq!(result.unwrap().email, "user@example.com");
    }

    #[tokio::test]
    async fn test_create_user_conflict() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(create_test_user(Uuid::new_v4()))));
        repo.expect_create().never();

        let result = service(repo)
            .create_user("user@example.com".to_string())
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_user_invalid_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_create().never();

        let result = service(repo).create_user("nope".to_string()).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(user_id))
            .returning(|id| Ok(Some(create_test_user(id))));

        let result = service(repo).get_user(user_id).await;

        assert_eq!(result.unwrap().id, user_id);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = service(repo).get_user(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_user_applies_changeset() {
        let user_id = Uuid::new_v4();
        let dob = FixedOffset::east_opt(7200)
            .unwrap()
            .with_ymd_and_hms(2000, 4, 2, 15, 10, 0)
            .unwrap();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(create_test_user(id))));
        repo.expect_save()
            .times(1)
            .returning(|user| Ok(user.clone()));

        let changeset = UserChangeset {
            personal_details: Some(PersonalDetailsChangeset {
                name: Some(HumanNameChangeset {
                    first_name: Patch::Set("Maxi".to_string()),
                    last_name: Patch::Set("Barmetler".to_string()),
                    middle_names: Some(vec!["Erich".to_string()]),
                }),
                date_of_birth: Patch::Set(dob),
            }),
            ..Default::default()
        };

        let user = service(repo).update_user(user_id, changeset).await.unwrap();

        let mut expected = create_test_user(user_id);
        expected.personal_details = Some(PersonalDetails::new(
            Some(HumanName::new("Maxi", "Barmetler").with_middle_names(["Erich"])),
            Some(dob),
        ));
        assert_eq!(user, expected);
    }

    #[tokio::test]
    async fn test_update_user_empty_changeset_skips_save() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(create_test_user(id))));
        repo.expect_save().never();

        let result = service(repo)
            .update_user(Uuid::new_v4(), UserChangeset::default())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_deleted_concurrently() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(create_test_user(id))));
        repo.expect_save().returning(|_| Err(AppError::NotFound));

        let changeset = UserChangeset {
            password_hash: Patch::Set("digest".to_string()),
            ..Default::default()
        };
        let result = service(repo).update_user(Uuid::new_v4(), changeset).await;

        assert!(matches!(result, Err(AppError::UpdateFailed(_))));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_save().never();

        let result = service(repo)
            .update_user(Uuid::new_v4(), UserChangeset::default())
            .await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_user() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_delete()
            .with(eq(user_id))
            .returning(|_| Ok(()));

        assert!(service(repo).delete_user(user_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_delete().returning(|_| Err(AppError::NotFound));

        let result = service(repo).delete_user(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_export_user_without_details() {
        let user_id = Uuid::new_v4();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(create_test_user(id))));

        let message = service(repo).export_user(user_id).await.unwrap();

        assert_eq!(message.id, user_id.to_string());
        assert_eq!(message.email, "user@example.com");
        assert!(message.personal_details.is_none());
    }

    #[tokio::test]
    async fn test_snapshot_user_converts_details() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|id| {
            let mut user = create_test_user(id);
            user.personal_details = Some(PersonalDetails::new(
                Some(HumanName::new("Maxi", "Barmetler")),
                None,
            ));
            Ok(Some(user))
        });

        let dto = service(repo).snapshot_user(Uuid::new_v4()).await.unwrap();

        let details = dto.personal_details.unwrap();
        assert_eq!(
            details.name.unwrap().last_name.as_deref(),
            Some("Barmetler")
        );
        assert!(details.date_of_birth.is_none());
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut repo = MockUserRepository::new();
        repo.expect_list().returning(|| {
            Ok(vec![
                create_test_user(Uuid::new_v4()),
                create_test_user(Uuid::new_v4()),
            ])
        });

        assert_eq!(service(repo).list_users().await.unwrap().len(), 2);
    }
}
