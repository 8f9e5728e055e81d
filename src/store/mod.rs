//! SQLite persistence for accounts and imported tracks
//!
//! Every song row is scoped to an owning account; parsed libraries are
//! append-only (re-importing an export inserts fresh rows). Uses SQLx
//! with SQLite and embedded migrations.

mod import;
mod users;

pub use import::import_tracks;
pub use users::{authenticate_user, create_user, find_user, User};

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;

/// Default location of the importer's database (tilde-expanded by the CLI).
pub const DEFAULT_DB_PATH: &str = "~/.local/share/itunes-importer/library.db";

pub type Result<T> = std::result::Result<T, StoreError>;

/// Storage-layer error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("password hashing error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    #[error("an account already exists for {0}")]
    EmailTaken(String),

    #[error("no account found for {0}")]
    UnknownUser(String),

    #[error("invalid password for {0}")]
    InvalidPassword(String),
}

/// Build a SQLite connection URL from a database path.
pub fn db_url(path: &Path) -> String {
    format!("sqlite:{}", path.display())
}

/// Initialize the connection pool and run migrations.
///
/// Creates the database file if it does not exist yet.
pub async fn open(db_url: &str) -> Result<SqlitePool> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use tempfile::TempDir;

    /// Fresh migrated database in a tempdir. Keep the guard alive for
    /// the duration of the test.
    pub(crate) async fn open_temp() -> (TempDir, SqlitePool) {
        let dir = TempDir::new().expect("failed to create temp dir");
        let path = dir.path().join("test.db");
        let pool = open(&db_url(&path)).await.expect("failed to open database");
        (dir, pool)
    }
}
