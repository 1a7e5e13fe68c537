//! In-memory `UserRepository` implementation.

use async_trait::async_trait;

use crate::domain::ports::{NewUser, StoredCredentials, UserPersistenceError, UserRepository};
use crate::domain::{ProfileUpdate, User, UserId, Username};

use super::store::{MemoryStore, UserRecord};

/// [`UserRepository`] backed by a [`MemoryStore`].
#[derive(Debug, Clone)]
pub struct MemoryUserRepository {
    store: MemoryStore,
}

impl MemoryUserRepository {
    /// Create a repository over `store`.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut state = self.store.lock();
        if state.user_by_username(user.username.as_ref()).is_some() {
            return Err(UserPersistenceError::duplicate_username(
                user.username.to_string(),
            ));
        }

        let created = User::new(
            user.id,
            user.username.clone(),
            user.name.clone(),
            user.bio.clone(),
            None,
        );
        state.users.insert(
            user.id,
            UserRecord {
                user: created.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(created)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .store
            .lock()
            .users
            .get(id)
            .map(|record| record.user.clone()))
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .store
            .lock()
            .user_by_username(username.as_ref())
            .map(|record| record.user.clone()))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        Ok(self
            .store
            .lock()
            .user_by_username(username)
            .map(|record| StoredCredentials {
                user_id: *record.user.id(),
                password_hash: record.password_hash.clone(),
            }))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut state = self.store.lock();
        let Some(record) = state.users.get_mut(id) else {
            return Ok(None);
        };
        let current = &record.user;
        let updated = User::new(
            *current.id(),
            current.username().clone(),
            update.name.clone().unwrap_or_else(|| current.name().clone()),
            update.bio.clone().or_else(|| current.bio().cloned()),
            update
                .image_url
                .clone()
                .or_else(|| current.image_url().cloned()),
        );
        record.user = updated.clone();
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{Bio, DisplayName};

    #[fixture]
    fn new_user() -> NewUser {
        NewUser {
            id: UserId::random(),
            username: Username::new("grace").expect("valid username"),
            name: DisplayName::new("Grace Hopper").expect("valid name"),
            bio: None,
            password_hash: "$argon2id$stored".to_owned(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn created_users_are_found_by_id_and_handle(new_user: NewUser) {
        let repo = MemoryUserRepository::new(MemoryStore::new());

        let created = repo.create(&new_user).await.expect("user created");

        assert_eq!(
            repo.find_by_id(&new_user.id).await.expect("lookup"),
            Some(created.clone())
        );
        assert_eq!(
            repo.find_by_username(&new_user.username)
                .await
                .expect("lookup"),
            Some(created)
        );
        let credentials = repo
            .find_credentials("grace")
            .await
            .expect("lookup")
            .expect("credentials stored");
        assert_eq!(credentials.user_id, new_user.id);
        assert_eq!(credentials.password_hash, "$argon2id$stored");
    }

    #[rstest]
    #[tokio::test]
    async fn taken_handles_are_rejected(new_user: NewUser) {
        let repo = MemoryUserRepository::new(MemoryStore::new());
        repo.create(&new_user).await.expect("first user created");

        let clash = NewUser {
            id: UserId::random(),
            ..new_user
        };
        let err = repo.create(&clash).await.expect_err("duplicate handle");

        assert_eq!(err, UserPersistenceError::duplicate_username("grace"));
    }

    #[rstest]
    #[tokio::test]
    async fn profile_updates_keep_untouched_fields(new_user: NewUser) {
        let repo = MemoryUserRepository::new(MemoryStore::new());
        repo.create(&new_user).await.expect("user created");

        let update = ProfileUpdate {
            bio: Some(Bio::new("COBOL").expect("valid bio")),
            ..ProfileUpdate::default()
        };
        let updated = repo
            .update_profile(&new_user.id, &update)
            .await
            .expect("update")
            .expect("user exists");

        assert_eq!(updated.name().as_ref(), "Grace Hopper");
        assert_eq!(updated.bio().map(AsRef::as_ref), Some("COBOL"));
        assert!(
            repo.update_profile(&UserId::random(), &update)
                .await
                .expect("update")
                .is_none()
        );
    }
}
