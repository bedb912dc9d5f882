//! Diesel table definitions mirroring `backend/migrations`.
//!
//! Keep in sync with the SQL migrations; these declarations are checked at
//! compile time only against each other, not against a live database.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login email (max 120 characters).
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published blog posts.
    posts (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Post title (max 80 characters).
        title -> Varchar,
        /// Author name (max 100 characters).
        author -> Varchar,
        /// Post body (max 15000 characters).
        body -> Text,
        /// Publish timestamp; listings sort on it.
        pub_date -> Timestamptz,
    }
}

diesel::table! {
    /// Post categories.
    categories (id) {
        /// Serial primary key.
        id -> Int4,
        /// Category name (max 50 characters).
        name -> Varchar,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, posts, categories);
