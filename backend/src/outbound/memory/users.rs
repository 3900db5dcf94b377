//! In-memory `UserRepository`.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId};

/// Users keyed by id.
#[derive(Debug, Default)]
pub struct MemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn upsert(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.users.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_many(&self, ids: &[UserId]) -> Result<Vec<User>, UserPersistenceError> {
        let guard = self.users.read().await;
        Ok(ids.iter().filter_map(|id| guard.get(id).cloned()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DisplayName;
    use crate::domain::test_fixtures::make_user;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn upsert_replaces_existing_records() {
        let repo = MemoryUserRepository::new();
        let mut ada = make_user("Ada");
        repo.upsert(&ada).await.expect("insert");
        ada.name = DisplayName::new("Ada Lovelace").expect("name");
        repo.upsert(&ada).await.expect("update");

        let stored = repo.find_by_id(&ada.id).await.expect("lookup");
        assert_eq!(stored.map(|u| u.name), Some(ada.name));
    }

    #[rstest]
    #[tokio::test]
    async fn find_many_skips_unknown_ids() {
        let repo = MemoryUserRepository::new();
        let ada = make_user("Ada");
        repo.upsert(&ada).await.expect("insert");

        let found = repo
            .find_many(&[UserId::random(), ada.id])
            .await
            .expect("lookup");
        assert_eq!(found, vec![ada]);
    }
}
