/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations.
 */

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::{PublicUser, UserSummary};

/// User struct representing a user in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Normalized (trimmed, lowercase) email address
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Profile image URL, empty when unset
    pub profile_pic: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Profile safe to return to clients (no password hash)
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            profile_pic: self.profile_pic.clone(),
        }
    }

    /// Sidebar entry for this user
    pub fn to_summary(&self) -> UserSummary {
        self.to_public().into()
    }
}

/// Create a new user
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - Normalized email
/// * `full_name` - Trimmed display name
/// * `password_hash` - Hashed password
/// * `profile_pic` - Profile image URL or empty string
///
/// # Returns
/// Created user or error. A duplicate email surfaces as a unique violation.
pub async fn create_user(
    pool: &PgPool,
    email: &str,
    full_name: &str,
    password_hash: &str,
    profile_pic: &str,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, full_name, password_hash, profile_pic, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, email, full_name, password_hash, profile_pic, created_at, updated_at
        "#
    )
    .bind(id)
    .bind(email)
    .bind(full_name)
    .bind(password_hash)
    .bind(profile_pic)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - Normalized email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, full_name, password_hash, profile_pic, created_at, updated_at
        FROM users
        WHERE email = $1
        "#
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `id` - User ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, full_name, password_hash, profile_pic, created_at, updated_at
        FROM users
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Update a user's profile picture
///
/// # Returns
/// The updated user, or None if the user no longer exists
pub async fn update_profile_pic(
    pool: &PgPool,
    user_id: Uuid,
    profile_pic: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        UPDATE users
        SET profile_pic = $1, updated_at = $2
        WHERE id = $3
        RETURNING id, email, full_name, password_hash, profile_pic, created_at, updated_at
        "#
    )
    .bind(profile_pic)
    .bind(Utc::now())
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// List every user except one, oldest account first
///
/// Used for the contacts sidebar.
pub async fn list_other_users(
    pool: &PgPool,
    exclude: Uuid,
) -> Result<Vec<UserSummary>, sqlx::Error> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, full_name, password_hash, profile_pic, created_at, updated_at
        FROM users
        WHERE id <> $1
        ORDER BY created_at ASC
        "#
    )
    .bind(exclude)
    .fetch_all(pool)
    .await?;

    Ok(users.iter().map(User::to_summary).collect())
}
