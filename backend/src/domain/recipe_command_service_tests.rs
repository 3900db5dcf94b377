//! Tests for the recipe command service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MockNotificationRepository, MockRecipeRepository, MockUserRepository,
    NotificationRepositoryError,
};
use crate::domain::test_fixtures::{
    fixture_clock, fixture_timestamp, make_draft, make_recipe, make_user,
};
use crate::domain::{ErrorCode, NotificationKind, RecipeName};

type Service =
    RecipeCommandService<MockRecipeRepository, MockUserRepository, MockNotificationRepository>;

fn make_service(
    recipes: MockRecipeRepository,
    users: MockUserRepository,
    notifications: MockNotificationRepository,
) -> Service {
    RecipeCommandService::new(
        Arc::new(recipes),
        Arc::new(users),
        Arc::new(notifications),
        fixture_clock(),
    )
}

fn users_returning(actor: User, profiles: Vec<User>) -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(actor)));
    users.expect_find_many().return_once(move |_| Ok(profiles));
    users
}

fn recipes_holding(recipe: Recipe) -> MockRecipeRepository {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(recipe)));
    recipes
}

fn recipes_liking(recipe: Recipe) -> MockRecipeRepository {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_toggle_like()
        .times(1)
        .return_once(move |_, user, at| {
            let mut stored = recipe;
            let outcome = stored.toggle_like(*user, at);
            Ok(Some((stored, outcome)))
        });
    recipes
}

fn recipes_commenting(recipe: Recipe) -> MockRecipeRepository {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_push_comment()
        .times(1)
        .return_once(move |_, comment| {
            let mut stored = recipe;
            stored.add_comment(comment.clone(), comment.created_at);
            Ok(Some(stored))
        });
    recipes
}

#[tokio::test]
async fn save_assigns_ids_owner_and_tags() {
    let owner = UserId::random();
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_insert_many().times(1).returning(move |stored| {
        assert_eq!(stored.len(), 2);
        for recipe in stored {
            assert_eq!(recipe.owner, owner);
            assert_eq!(recipe.tags, vec!["tomato".to_owned()]);
            assert_eq!(recipe.created_at, fixture_timestamp());
        }
        Ok(())
    });
    let service = make_service(
        recipes,
        MockUserRepository::new(),
        MockNotificationRepository::new(),
    );

    let ids = service
        .save(&owner, vec![make_draft("Salad"), make_draft("Soup")])
        .await
        .expect("save");
    assert_eq!(ids.len(), 2);
    assert_ne!(ids.first(), ids.get(1));
}

#[tokio::test]
async fn save_rejects_empty_and_oversized_batches() {
    let service = make_service(
        MockRecipeRepository::new(),
        MockUserRepository::new(),
        MockNotificationRepository::new(),
    );
    let viewer = UserId::random();

    let empty = service.save(&viewer, Vec::new()).await.expect_err("empty");
    assert_eq!(empty.code(), ErrorCode::InvalidRequest);

    let many = (0..=MAX_RECIPES_PER_SAVE)
        .map(|n| make_draft(&format!("Dish {n}")))
        .collect();
    let oversized = service.save(&viewer, many).await.expect_err("too many");
    assert_eq!(oversized.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn save_reports_which_draft_is_invalid() {
    let mut broken = make_draft("Nothing");
    broken.instructions = vec!["   ".to_owned()];
    let service = make_service(
        MockRecipeRepository::new(),
        MockUserRepository::new(),
        MockNotificationRepository::new(),
    );

    let err = service
        .save(&UserId::random(), vec![make_draft("Fine"), broken])
        .await
        .expect_err("invalid draft");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert_eq!(err.details(), Some(&serde_json::json!({ "index": 1 })));
}

#[tokio::test]
async fn liking_someone_elses_recipe_notifies_the_owner() {
    let owner = make_user("Ada Lovelace");
    let fan = make_user("Grace Hopper");
    let recipe = make_recipe(&owner, "Tomato Salad");
    let id = recipe.id;

    let recipes = recipes_liking(recipe);
    let users = users_returning(fan.clone(), vec![owner.clone(), fan.clone()]);
    let mut notifications = MockNotificationRepository::new();
    let owner_id = owner.id;
    notifications
        .expect_insert()
        .times(1)
        .withf(move |n| n.recipient == owner_id && n.kind == NotificationKind::Like)
        .returning(|_| Ok(()));

    let view = make_service(recipes, users, notifications)
        .toggle_like(&fan.id, &id)
        .await
        .expect("like");
    assert!(view.liked);
    assert_eq!(view.liked_by.len(), 1);
}

#[tokio::test]
async fn unliking_never_notifies() {
    let owner = make_user("Ada Lovelace");
    let fan = make_user("Grace Hopper");
    let mut recipe = make_recipe(&owner, "Tomato Salad");
    recipe.liked_by.push(fan.id);
    let id = recipe.id;

    let recipes = recipes_liking(recipe);
    let users = users_returning(fan.clone(), vec![owner, fan.clone()]);
    let mut notifications = MockNotificationRepository::new();
    notifications.expect_insert().never();

    let view = make_service(recipes, users, notifications)
        .toggle_like(&fan.id, &id)
        .await
        .expect("unlike");
    assert!(!view.liked);
    assert!(view.liked_by.is_empty());
}

#[tokio::test]
async fn owners_liking_their_own_recipe_are_not_notified() {
    let owner = make_user("Ada Lovelace");
    let recipe = make_recipe(&owner, "Tomato Salad");
    let id = recipe.id;

    let recipes = recipes_liking(recipe);
    let users = users_returning(owner.clone(), vec![owner.clone()]);
    let mut notifications = MockNotificationRepository::new();
    notifications.expect_insert().never();

    let view = make_service(recipes, users, notifications)
        .toggle_like(&owner.id, &id)
        .await
        .expect("like");
    assert!(view.liked && view.owns);
}

#[tokio::test]
async fn notification_failures_do_not_fail_the_comment() {
    let owner = make_user("Ada Lovelace");
    let critic = make_user("Grace Hopper");
    let recipe = make_recipe(&owner, "Tomato Salad");
    let id = recipe.id;

    let recipes = recipes_commenting(recipe);
    let users = users_returning(critic.clone(), vec![owner, critic.clone()]);
    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_insert()
        .times(1)
        .returning(|_| Err(NotificationRepositoryError::connection("down")));

    let text = CommentText::new("Needs salt").expect("comment");
    let view = make_service(recipes, users, notifications)
        .add_comment(&critic.id, &id, text)
        .await
        .expect("comment");
    let comment = view.comments.first().expect("comment rendered");
    assert_eq!(comment.comment, "Needs salt");
    assert_eq!(comment.user.name, "Grace Hopper");
}

#[tokio::test]
async fn liking_a_missing_recipe_is_not_found() {
    let fan = make_user("Grace Hopper");
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_toggle_like().return_once(|_, _, _| Ok(None));
    let mut users = MockUserRepository::new();
    let actor = fan.clone();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(actor)));
    let mut notifications = MockNotificationRepository::new();
    notifications.expect_insert().never();

    let err = make_service(recipes, users, notifications)
        .toggle_like(&fan.id, &RecipeId::random())
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn unregistered_commenters_are_unauthorised() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_push_comment().never();
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let err = make_service(recipes, users, MockNotificationRepository::new())
        .add_comment(
            &UserId::random(),
            &RecipeId::random(),
            CommentText::new("Hello").expect("comment"),
        )
        .await
        .expect_err("unknown actor");
    assert_eq!(err.code(), ErrorCode::Unauthorized);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_likes_from_many_users_are_all_counted() {
    use crate::outbound::memory::{
        MemoryNotificationRepository, MemoryRecipeRepository, MemoryUserRepository,
    };

    let owner = make_user("Ada Lovelace");
    let recipe = make_recipe(&owner, "Tomato Salad");
    let id = recipe.id;
    let recipes = Arc::new(MemoryRecipeRepository::new());
    recipes
        .insert_many(std::slice::from_ref(&recipe))
        .await
        .expect("seed recipe");
    let users = Arc::new(MemoryUserRepository::new());
    users.upsert(&owner).await.expect("seed owner");
    let fans: Vec<User> = (0..64).map(|n| make_user(&format!("Fan {n}"))).collect();
    for fan in &fans {
        users.upsert(fan).await.expect("seed fan");
    }
    let notifications = Arc::new(MemoryNotificationRepository::new());
    let service = Arc::new(RecipeCommandService::new(
        Arc::clone(&recipes),
        users,
        Arc::clone(&notifications),
        fixture_clock(),
    ));

    let tasks: Vec<_> = fans
        .iter()
        .map(|fan| {
            let service = Arc::clone(&service);
            let fan = fan.id;
            tokio::spawn(async move { service.toggle_like(&fan, &id).await })
        })
        .collect();
    for task in tasks {
        task.await.expect("join").expect("like");
    }

    let stored = recipes
        .find_by_id(&id)
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(stored.like_count(), 64);
}

#[tokio::test]
async fn update_by_non_owner_is_forbidden() {
    let owner = make_user("Ada Lovelace");
    let recipe = make_recipe(&owner, "Tomato Salad");
    let id = recipe.id;
    let mut recipes = recipes_holding(recipe);
    recipes.expect_update().never();

    let edit = RecipeEdit {
        name: Some(RecipeName::new("Stolen").expect("name")),
        ..RecipeEdit::default()
    };
    let err = make_service(
        recipes,
        MockUserRepository::new(),
        MockNotificationRepository::new(),
    )
    .update(&UserId::random(), &id, edit)
    .await
    .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[tokio::test]
async fn owner_update_persists_and_confirms() {
    let owner = make_user("Ada Lovelace");
    let recipe = make_recipe(&owner, "Tomato Salad");
    let id = recipe.id;
    let mut recipes = recipes_holding(recipe);
    recipes
        .expect_update()
        .times(1)
        .withf(|r| r.name.as_str() == "Tomato Tart")
        .returning(|_| Ok(()));
    let mut users = MockUserRepository::new();
    let profile = owner.clone();
    users
        .expect_find_many()
        .return_once(move |_| Ok(vec![profile]));
    let mut notifications = MockNotificationRepository::new();
    let owner_id = owner.id;
    notifications
        .expect_insert()
        .times(1)
        .withf(move |n| n.kind == NotificationKind::Update && n.recipient == owner_id)
        .returning(|_| Ok(()));

    let edit = RecipeEdit {
        name: Some(RecipeName::new("Tomato Tart").expect("name")),
        ..RecipeEdit::default()
    };
    let view = make_service(recipes, users, notifications)
        .update(&owner.id, &id, edit)
        .await
        .expect("update");
    assert_eq!(view.name, "Tomato Tart");
}

#[tokio::test]
async fn delete_removes_recipe_and_its_notifications() {
    let owner = make_user("Ada Lovelace");
    let recipe = make_recipe(&owner, "Tomato Salad");
    let id = recipe.id;
    let mut recipes = recipes_holding(recipe);
    recipes.expect_delete().times(1).returning(|_| Ok(true));
    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_delete_for_recipe()
        .times(1)
        .returning(|_| Ok(3));

    make_service(recipes, MockUserRepository::new(), notifications)
        .delete(&owner.id, &id)
        .await
        .expect("delete");
}

#[tokio::test]
async fn failed_notification_cleanup_keeps_the_recipe() {
    let owner = make_user("Ada Lovelace");
    let recipe = make_recipe(&owner, "Tomato Salad");
    let id = recipe.id;
    let mut recipes = recipes_holding(recipe);
    recipes.expect_delete().never();
    let mut notifications = MockNotificationRepository::new();
    notifications
        .expect_delete_for_recipe()
        .times(1)
        .returning(|_| Err(NotificationRepositoryError::connection("down")));

    let err = make_service(recipes, MockUserRepository::new(), notifications)
        .delete(&owner.id, &id)
        .await
        .expect_err("cleanup failed");
    assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn delete_of_missing_recipe_is_not_found() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_find_by_id().returning(|_| Ok(None));
    let err = make_service(
        recipes,
        MockUserRepository::new(),
        MockNotificationRepository::new(),
    )
    .delete(&UserId::random(), &RecipeId::random())
    .await
    .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_by_non_owner_is_forbidden() {
    let owner = make_user("Ada Lovelace");
    let recipe = make_recipe(&owner, "Tomato Salad");
    let id = recipe.id;
    let mut recipes = recipes_holding(recipe);
    recipes.expect_delete().never();

    let err = make_service(
        recipes,
        MockUserRepository::new(),
        MockNotificationRepository::new(),
    )
    .delete(&UserId::random(), &id)
    .await
    .expect_err("forbidden");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}
