//! Diesel table definitions; must match `backend/migrations`.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Notes; `slug` is globally unique.
    notes (id) {
        id -> Uuid,
        title -> Varchar,
        text -> Text,
        slug -> Varchar,
        author_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(notes -> users (author_id));
diesel::allow_tables_to_appear_in_same_query!(notes, users);
