//! In-memory `IngredientRepository`.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::IngredientEntry;
use crate::domain::ports::{IngredientRepository, IngredientRepositoryError};

/// Catalogue entries keyed by their case-insensitive name, so iteration is
/// already in listing order.
#[derive(Debug, Default)]
pub struct MemoryIngredientRepository {
    entries: RwLock<BTreeMap<String, IngredientEntry>>,
}

impl MemoryIngredientRepository {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IngredientRepository for MemoryIngredientRepository {
    async fn list(&self) -> Result<Vec<IngredientEntry>, IngredientRepositoryError> {
        Ok(self.entries.read().await.values().cloned().collect())
    }

    async fn insert(&self, entry: &IngredientEntry) -> Result<(), IngredientRepositoryError> {
        let mut guard = self.entries.write().await;
        let key = entry.name.key();
        if guard.contains_key(&key) {
            return Err(IngredientRepositoryError::conflict(entry.name.as_str()));
        }
        guard.insert(key, entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::IngredientName;
    use crate::domain::test_fixtures::fixture_timestamp;
    use rstest::rstest;
    use uuid::Uuid;

    fn entry(name: &str) -> IngredientEntry {
        IngredientEntry {
            id: Uuid::new_v4(),
            name: IngredientName::new(name).expect("name"),
            created_by: None,
            created_at: fixture_timestamp(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn listing_is_sorted_ignoring_case() {
        let repo = MemoryIngredientRepository::new();
        for name in ["thyme", "Basil", "apple"] {
            repo.insert(&entry(name)).await.expect("insert");
        }
        let names: Vec<String> = repo
            .list()
            .await
            .expect("list")
            .into_iter()
            .map(|e| e.name.as_str().to_owned())
            .collect();
        assert_eq!(names, vec!["apple", "Basil", "thyme"]);
    }

    #[rstest]
    #[tokio::test]
    async fn case_variants_conflict() {
        let repo = MemoryIngredientRepository::new();
        repo.insert(&entry("Basil")).await.expect("insert");
        assert_eq!(
            repo.insert(&entry("BASIL")).await,
            Err(IngredientRepositoryError::conflict("BASIL"))
        );
    }
}
