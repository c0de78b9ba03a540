//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `username` carries a unique index.
    users (id) {
        id -> Uuid,
        username -> Varchar,
        email -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        phone_number -> Nullable<Varchar>,
        /// One of `seeker`, `recruiter`, `admin`.
        role -> Varchar,
        /// Argon2 PHC string. Never selected outside the login path.
        password_hash -> Text,
        date_joined -> Timestamptz,
    }
}

diesel::table! {
    /// Job postings owned by `posted_by`.
    jobs (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        location -> Varchar,
        salary -> Nullable<Int8>,
        posted_by -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Applications; `(job_id, applicant)` is unique.
    applications (id) {
        id -> Uuid,
        job_id -> Uuid,
        applicant -> Uuid,
        cover_letter -> Text,
        status -> Varchar,
        applied_at -> Timestamptz,
    }
}

diesel::table! {
    /// One profile per user; `user_id` is unique.
    profiles (id) {
        id -> Uuid,
        user_id -> Uuid,
        bio -> Text,
        location -> Varchar,
        birth_date -> Nullable<Date>,
        skills -> Text,
        contact -> Varchar,
    }
}

diesel::joinable!(jobs -> users (posted_by));
diesel::joinable!(applications -> jobs (job_id));
diesel::joinable!(profiles -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(users, jobs, applications, profiles);
