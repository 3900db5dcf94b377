//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Uuid,
        display_name -> Varchar,
        email -> Varchar,
        image -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Saved recipes. Ingredient lines, steps, extras, and comments are JSONB;
    /// likes are an array of user ids with `like_count` kept in step for
    /// ordering.
    recipes (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        ingredients -> Jsonb,
        instructions -> Jsonb,
        dietary_preference -> Array<Text>,
        additional_information -> Jsonb,
        image_url -> Nullable<Text>,
        tags -> Array<Text>,
        liked_by -> Array<Uuid>,
        like_count -> Int4,
        comments -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Shared ingredient catalogue. `name_key` is unique.
    ingredients (id) {
        id -> Uuid,
        name -> Varchar,
        name_key -> Varchar,
        created_by -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Per-user activity notifications.
    notifications (id) {
        id -> Uuid,
        recipient_id -> Uuid,
        initiator_id -> Uuid,
        kind -> Varchar,
        recipe_id -> Uuid,
        message -> Text,
        read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> users (owner_id));

diesel::allow_tables_to_appear_in_same_query!(users, recipes, ingredients, notifications);
