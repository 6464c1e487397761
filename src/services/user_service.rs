use crate::error::{AppError, Resource, Result};
use crate::models::{CreateUserRequest, NewUser, UpdateUserRequest, User};
use crate::repositories::UserRepository;
use crate::validation::validate_required;
use std::sync::Arc;
use tracing::info;

pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.repository.list_users().await?)
    }

    pub async fn get_user(&self, id: i32) -> Result<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::User, id))
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let user = normalize(request.name, request.email, request.password)?;

        // Friendly pre-check; the unique index on LOWER(email) still guards
        // concurrent inserts.
        if self.repository.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::DuplicateEmail);
        }

        let created = self.repository.create_user(&user).await?;
        info!("Created user {} <{}>", created.id, created.email);
        Ok(created)
    }

    pub async fn update_user(&self, id: i32, request: UpdateUserRequest) -> Result<User> {
        let user = normalize(request.name, request.email, request.password)?;

        if self.repository.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(Resource::User, id));
        }

        if let Some(owner) = self.repository.find_by_email(&user.email).await? {
            if owner.id != id {
                return Err(AppError::DuplicateEmail);
            }
        }

        let updated = self
            .repository
            .update_user(id, &user)
            .await?
            .ok_or(AppError::NotFound(Resource::User, id))?;

        info!("Updated user {}", updated.id);
        Ok(updated)
    }

    pub async fn delete_user(&self, id: i32) -> Result<User> {
        let deleted = self
            .repository
            .delete_user(id)
            .await?
            .ok_or(AppError::NotFound(Resource::User, id))?;

        info!("Deleted user {}", deleted.id);
        Ok(deleted)
    }
}

fn normalize(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<NewUser> {
    validate_required(&[("name", name.as_deref()), ("email", email.as_deref())])?;
    Ok(NewUser::normalized(
        name.as_deref().unwrap_or_default(),
        email.as_deref().unwrap_or_default(),
        password,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::user_repository::MockUserRepository;
    use crate::repositories::RepositoryError;
    use mockall::predicate::*;

    fn ada(id: i32) -> User {
        User {
            id,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: None,
        }
    }

    #[tokio::test]
    async fn test_create_user_normalizes_fields() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_email()
            .withf(|email| email == "ada@example.com")
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create_user()
            .withf(|user| {
                user.name == "Ada"
                    && user.email == "ada@example.com"
                    && user.password.as_deref() == Some("pw")
            })
            .times(1)
            .returning(|_| Ok(ada(1)));

        let service = UserService::new(Arc::new(mock_repo));

        let request = CreateUserRequest {
            name: Some("  Ada  ".to_string()),
            email: Some(" ADA@Example.com ".to_string()),
            password: Some("pw".to_string()),
        };

        let user = service.create_user(request).await.expect("Expected Ok result");
        assert_eq!(user.id, 1);
    }

    #[tokio::test]
    async fn test_create_user_missing_fields() {
        let mock_repo = MockUserRepository::new();
        let service = UserService::new(Arc::new(mock_repo));

        let request = CreateUserRequest {
            name: Some("Ada".to_string()),
            email: None,
            password: None,
        };

        let result = service.create_user(request).await;
        assert!(matches!(result, Err(AppError::IncompleteData(ref f)) if f == &vec!["email"]));
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_precheck() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(ada(7))));
        mock_repo.expect_create_user().never();

        let service = UserService::new(Arc::new(mock_repo));
        let request = CreateUserRequest {
            name: Some("Other".to_string()),
            email: Some("ADA@example.com".to_string()),
            password: None,
        };

        let result = service.create_user(request).await;
        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_create_user_unique_violation_maps_to_duplicate() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));
        mock_repo
            .expect_create_user()
            .returning(|_| Err(RepositoryError::AlreadyExists));

        let service = UserService::new(Arc::new(mock_repo));
        let request = CreateUserRequest {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            password: None,
        };

        let result = service.create_user(request).await;
        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_update_user_keeps_own_email() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .with(eq(1))
            .returning(|id| Ok(Some(ada(id))));
        mock_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(ada(1))));
        mock_repo
            .expect_update_user()
            .withf(|id, user| *id == 1 && user.name == "Ada L." && user.password.is_none())
            .times(1)
            .returning(|id, user| {
                Ok(Some(User {
                    id,
                    name: user.name.clone(),
                    email: user.email.clone(),
                    password: None,
                }))
            });

        let service = UserService::new(Arc::new(mock_repo));
        let request = UpdateUserRequest {
            name: Some("Ada L.".to_string()),
            email: Some("ada@example.com".to_string()),
            password: None,
        };

        let user = service.update_user(1, request).await.unwrap();
        assert_eq!(user.name, "Ada L.");
    }

    #[tokio::test]
    async fn test_update_user_email_owned_by_someone_else() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_by_id()
            .returning(|id| Ok(Some(ada(id))));
        mock_repo
            .expect_find_by_email()
            .returning(|_| Ok(Some(ada(2))));
        mock_repo.expect_update_user().never();

        let service = UserService::new(Arc::new(mock_repo));
        let request = UpdateUserRequest {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            password: None,
        };

        let result = service.update_user(1, request).await;
        assert!(matches!(result, Err(AppError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_id().returning(|_| Ok(None));

        let service = UserService::new(Arc::new(mock_repo));
        let request = UpdateUserRequest {
            name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            password: None,
        };

        let result = service.update_user(42, request).await;
        assert!(matches!(
            result,
            Err(AppError::NotFound(Resource::User, 42))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_user() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_delete_user()
            .with(eq(5))
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(mock_repo));
        let result = service.delete_user(5).await;
        assert!(matches!(result, Err(AppError::NotFound(Resource::User, 5))));
    }
}
