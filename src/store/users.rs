//! Account management and authentication
//!
//! Passwords are stored bcrypt-hashed; plaintext never leaves the
//! function that receives it.

use super::{Result, StoreError};
use sqlx::SqlitePool;

/// A registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: String,
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    email: String,
    password: String,
    created_at: String,
}

/// Create an account with a bcrypt-hashed password.
///
/// Duplicate emails are rejected before any hashing work.
pub async fn create_user(pool: &SqlitePool, email: &str, password: &str) -> Result<User> {
    if find_user(pool, email).await?.is_some() {
        return Err(StoreError::EmailTaken(email.to_string()));
    }

    let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    sqlx::query("INSERT INTO users (email, password) VALUES (?, ?)")
        .bind(email)
        .bind(&hash)
        .execute(pool)
        .await?;

    find_user(pool, email)
        .await?
        .ok_or_else(|| StoreError::UnknownUser(email.to_string()))
}

/// Look up an account by email.
pub async fn find_user(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, email, created_at FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(user)
}

/// Verify credentials and return the account.
pub async fn authenticate_user(pool: &SqlitePool, email: &str, password: &str) -> Result<User> {
    let row = sqlx::query_as::<_, CredentialRow>(
        "SELECT id, email, password, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| StoreError::UnknownUser(email.to_string()))?;

    if !bcrypt::verify(password, &row.password)? {
        return Err(StoreError::InvalidPassword(row.email));
    }

    Ok(User {
        id: row.id,
        email: row.email,
        created_at: row.created_at,
    })
}
