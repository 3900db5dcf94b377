//! In-memory `RecipeRepository`.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{RecipeRepository, RecipeRepositoryError};
use crate::domain::{
    Comment, FeedQuery, LikeOutcome, Recipe, RecipeId, TagCount, UserId, count_tags, select_page,
};

/// Recipes held in a map behind one async lock.
#[derive(Debug, Default)]
pub struct MemoryRecipeRepository {
    recipes: RwLock<HashMap<RecipeId, Recipe>>,
}

impl MemoryRecipeRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Change one stored recipe while holding the write guard.
    async fn mutate<T>(
        &self,
        id: &RecipeId,
        change: impl FnOnce(&mut Recipe) -> T + Send,
    ) -> Option<(Recipe, T)> {
        let mut guard = self.recipes.write().await;
        let recipe = guard.get_mut(id)?;
        let outcome = change(recipe);
        Some((recipe.clone(), outcome))
    }
}

fn newest_first(left: &Recipe, right: &Recipe) -> Ordering {
    right
        .created_at
        .cmp(&left.created_at)
        .then_with(|| left.id.as_uuid().cmp(right.id.as_uuid()))
}

fn collect_newest_first<'a>(recipes: impl Iterator<Item = &'a Recipe>) -> Vec<Recipe> {
    let mut selected: Vec<Recipe> = recipes.cloned().collect();
    selected.sort_by(newest_first);
    selected
}

#[async_trait]
impl RecipeRepository for MemoryRecipeRepository {
    async fn insert_many(&self, recipes: &[Recipe]) -> Result<(), RecipeRepositoryError> {
        let mut guard = self.recipes.write().await;
        if let Some(clash) = recipes.iter().find(|r| guard.contains_key(&r.id)) {
            return Err(RecipeRepositoryError::query(format!(
                "recipe {} already exists",
                clash.id
            )));
        }
        guard.extend(recipes.iter().map(|r| (r.id, r.clone())));
        Ok(())
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, RecipeRepositoryError> {
        Ok(self.recipes.read().await.get(id).cloned())
    }

    async fn update(&self, recipe: &Recipe) -> Result<(), RecipeRepositoryError> {
        let mut guard = self.recipes.write().await;
        let slot = guard
            .get_mut(&recipe.id)
            .ok_or_else(|| RecipeRepositoryError::not_found(recipe.id.to_string()))?;
        slot.name = recipe.name.clone();
        slot.instructions = recipe.instructions.clone();
        slot.additional_information = recipe.additional_information.clone();
        slot.updated_at = recipe.updated_at;
        Ok(())
    }

    async fn toggle_like(
        &self,
        id: &RecipeId,
        user: &UserId,
        at: DateTime<Utc>,
    ) -> Result<Option<(Recipe, LikeOutcome)>, RecipeRepositoryError> {
        Ok(self.mutate(id, |recipe| recipe.toggle_like(*user, at)).await)
    }

    async fn push_comment(
        &self,
        id: &RecipeId,
        comment: &Comment,
    ) -> Result<Option<Recipe>, RecipeRepositoryError> {
        let at = comment.created_at;
        Ok(self
            .mutate(id, |recipe| recipe.add_comment(comment.clone(), at))
            .await
            .map(|(recipe, ())| recipe))
    }

    async fn delete(&self, id: &RecipeId) -> Result<bool, RecipeRepositoryError> {
        Ok(self.recipes.write().await.remove(id).is_some())
    }

    async fn query_feed(
        &self,
        query: &FeedQuery,
    ) -> Result<(Vec<Recipe>, u64), RecipeRepositoryError> {
        Ok(select_page(self.recipes.read().await.values(), query))
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let guard = self.recipes.read().await;
        Ok(collect_newest_first(
            guard.values().filter(|r| r.is_owned_by(owner)),
        ))
    }

    async fn list_liked_by(&self, user: &UserId) -> Result<Vec<Recipe>, RecipeRepositoryError> {
        let guard = self.recipes.read().await;
        Ok(collect_newest_first(
            guard.values().filter(|r| r.is_liked_by(user)),
        ))
    }

    async fn popular_tags(&self, limit: usize) -> Result<Vec<TagCount>, RecipeRepositoryError> {
        Ok(count_tags(self.recipes.read().await.values(), limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_fixtures::{fixture_timestamp, make_recipe, make_user};
    use crate::domain::{SearchTerm, SortOption};
    use chrono::Duration;
    use pagination::PageRequest;
    use rstest::rstest;

    async fn seeded(recipes: &[Recipe]) -> MemoryRecipeRepository {
        let repo = MemoryRecipeRepository::new();
        repo.insert_many(recipes).await.expect("seed");
        repo
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_ids_are_rejected_atomically() {
        let ada = make_user("Ada");
        let first = make_recipe(&ada, "Soup");
        let repo = seeded(std::slice::from_ref(&first)).await;
        let fresh = make_recipe(&ada, "Stew");

        let err = repo
            .insert_many(&[fresh.clone(), first])
            .await
            .expect_err("clash");
        assert!(matches!(err, RecipeRepositoryError::Query { .. }));
        assert_eq!(repo.find_by_id(&fresh.id).await.expect("lookup"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn update_requires_an_existing_recipe() {
        let repo = MemoryRecipeRepository::new();
        let recipe = make_recipe(&make_user("Ada"), "Soup");
        assert!(matches!(
            repo.update(&recipe).await,
            Err(RecipeRepositoryError::NotFound { .. })
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_stored_likes_and_comments() {
        let ada = make_user("Ada");
        let grace = make_user("Grace");
        let recipe = make_recipe(&ada, "Soup");
        let repo = seeded(std::slice::from_ref(&recipe)).await;
        repo.toggle_like(&recipe.id, &grace.id, fixture_timestamp())
            .await
            .expect("like");

        let mut stale = recipe.clone();
        stale.name = crate::domain::RecipeName::new("Stew").expect("name");
        repo.update(&stale).await.expect("update");

        let stored = repo
            .find_by_id(&recipe.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.name.as_str(), "Stew");
        assert!(stored.is_liked_by(&grace.id));
    }

    #[rstest]
    #[tokio::test]
    async fn like_and_comment_on_missing_recipe_yield_none() {
        let repo = MemoryRecipeRepository::new();
        let id = RecipeId::random();
        let ada = make_user("Ada");
        assert!(
            repo.toggle_like(&id, &ada.id, fixture_timestamp())
                .await
                .expect("like")
                .is_none()
        );
        let comment = Comment {
            id: uuid::Uuid::new_v4(),
            author: ada.id,
            text: crate::domain::CommentText::new("Hi").expect("text"),
            created_at: fixture_timestamp(),
        };
        assert!(repo.push_comment(&id, &comment).await.expect("comment").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_likes_and_comments_are_all_kept() {
        let owner = make_user("Ada");
        let recipe = make_recipe(&owner, "Soup");
        let repo = std::sync::Arc::new(seeded(std::slice::from_ref(&recipe)).await);

        let tasks: Vec<_> = (0..64)
            .map(|n| {
                let repo = std::sync::Arc::clone(&repo);
                let id = recipe.id;
                tokio::spawn(async move {
                    let fan = UserId::random();
                    repo.toggle_like(&id, &fan, fixture_timestamp())
                        .await
                        .expect("like");
                    let comment = Comment {
                        id: uuid::Uuid::new_v4(),
                        author: fan,
                        text: crate::domain::CommentText::new(format!("comment {n}"))
                            .expect("text"),
                        created_at: fixture_timestamp(),
                    };
                    repo.push_comment(&id, &comment).await.expect("comment");
                })
            })
            .collect();
        for task in tasks {
            task.await.expect("task");
        }

        let stored = repo
            .find_by_id(&recipe.id)
            .await
            .expect("lookup")
            .expect("present");
        assert_eq!(stored.like_count(), 64);
        assert_eq!(stored.comments.len(), 64);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_whether_the_recipe_existed() {
        let recipe = make_recipe(&make_user("Ada"), "Soup");
        let repo = seeded(std::slice::from_ref(&recipe)).await;
        assert!(repo.delete(&recipe.id).await.expect("delete"));
        assert!(!repo.delete(&recipe.id).await.expect("delete again"));
    }

    #[rstest]
    #[tokio::test]
    async fn feed_filters_orders_and_pages() {
        let ada = make_user("Ada");
        let grace = make_user("Grace");
        let mut older = make_recipe(&ada, "Tomato Soup");
        older.created_at = fixture_timestamp() - Duration::hours(1);
        older.toggle_like(grace.id, fixture_timestamp());
        let newer = make_recipe(&ada, "Tomato Salad");
        let other = make_recipe(&grace, "Bread");
        let repo = seeded(&[older.clone(), newer.clone(), other]).await;

        let query = FeedQuery {
            page: PageRequest::new(1, 1).expect("page"),
            sort: SortOption::Recent,
            search: SearchTerm::parse("soup").expect("term"),
        };
        let (page, total) = repo.query_feed(&query).await.expect("feed");
        assert_eq!(total, 1);
        assert_eq!(page, vec![older.clone()]);

        let popular = FeedQuery {
            page: PageRequest::new(1, 2).expect("page"),
            sort: SortOption::Popular,
            search: SearchTerm::parse("tomato s").expect("term"),
        };
        let (page, total) = repo.query_feed(&popular).await.expect("feed");
        assert_eq!(total, 2);
        let ids: Vec<RecipeId> = page.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![older.id, newer.id]);
    }

    #[rstest]
    #[tokio::test]
    async fn owner_and_liked_listings_are_newest_first() {
        let ada = make_user("Ada");
        let grace = make_user("Grace");
        let mut old = make_recipe(&ada, "Old");
        old.created_at = fixture_timestamp() - Duration::days(1);
        old.toggle_like(grace.id, fixture_timestamp());
        let mut new = make_recipe(&ada, "New");
        new.toggle_like(grace.id, fixture_timestamp());
        let repo = seeded(&[old.clone(), new.clone()]).await;

        let owned = repo.list_by_owner(&ada.id).await.expect("owned");
        assert_eq!(owned.iter().map(|r| r.id).collect::<Vec<_>>(), vec![new.id, old.id]);
        let liked = repo.list_liked_by(&grace.id).await.expect("liked");
        assert_eq!(liked.len(), 2);
        assert!(repo.list_liked_by(&ada.id).await.expect("none").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn popular_tags_count_every_recipe() {
        let ada = make_user("Ada");
        let repo = seeded(&[make_recipe(&ada, "A"), make_recipe(&ada, "B")]).await;
        let tags = repo.popular_tags(5).await.expect("tags");
        assert_eq!(
            tags,
            vec![TagCount {
                tag: "tomato".to_owned(),
                count: 2
            }]
        );
    }
}
