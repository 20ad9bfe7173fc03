//! Opening the accounts database.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::account_repo::SqliteAccountRepository;
use crate::error::StorageError;

/// How long a writer waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// An open accounts database with its schema up to date.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open the database at `database_url` (e.g. `sqlite:accounts.db` or
    /// `sqlite::memory:`), creating the file when missing, and apply any
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Database`] if the URL is invalid or the
    /// connection fails, and [`StorageError::Migration`] if the schema cannot
    /// be brought up to date.
    pub async fn open(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(BUSY_TIMEOUT);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// A repository sharing this database's pool.
    #[must_use]
    pub fn accounts(&self) -> SqliteAccountRepository {
        SqliteAccountRepository::new(self.pool.clone())
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_create_accounts_table_when_opening_memory_db() {
        let db = Database::open("sqlite::memory:").await.unwrap();

        let columns: Vec<(String, i64)> =
            sqlx::query_as("SELECT name, \"notnull\" FROM pragma_table_info('accounts') ORDER BY cid")
                .fetch_all(db.pool())
                .await
                .unwrap();

        assert_eq!(
            columns,
            vec![
                ("id".to_string(), 0),
                ("name".to_string(), 1),
                ("email".to_string(), 1),
                ("address".to_string(), 1),
                ("phone_number".to_string(), 0),
                ("date_joined".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn should_keep_schema_when_migrations_rerun() {
        let db = Database::open("sqlite::memory:").await.unwrap();

        sqlx::migrate!("./migrations").run(db.pool()).await.unwrap();

        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' AND name != '_sqlx_migrations'",
        )
        .fetch_all(db.pool())
        .await
        .unwrap();
        assert_eq!(tables, vec![("accounts".to_string(),)]);
    }
}
