//! `SQLite` implementation of [`AccountRepository`].

use std::future::Future;

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use accounts_app::ports::AccountRepository;
use accounts_domain::account::{Account, AccountFields};
use accounts_domain::error::{AccountsError, NotFoundError};
use accounts_domain::id::AccountId;

use crate::error::StorageError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Wrapper for converting database rows into domain [`Account`].
struct Wrapper(Account);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Account> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let email: String = row.try_get("email")?;
        let address: String = row.try_get("address")?;
        let phone_number: Option<String> = row.try_get("phone_number")?;
        let date_joined: String = row.try_get("date_joined")?;

        let date_joined = NaiveDate::parse_from_str(&date_joined, DATE_FORMAT)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Account::new(
            AccountId::from_raw(id),
            AccountFields {
                name,
                email,
                address,
                phone_number,
                date_joined,
            },
        )))
    }
}

const INSERT: &str = "INSERT INTO accounts (name, email, address, phone_number, date_joined) VALUES (?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM accounts WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM accounts ORDER BY id";
const UPDATE: &str = "UPDATE accounts SET name = ?, email = ?, address = ?, phone_number = ?, date_joined = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM accounts WHERE id = ?";

/// `SQLite`-backed account repository.
pub struct SqliteAccountRepository {
    pool: SqlitePool,
}

impl SqliteAccountRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for SqliteAccountRepository {
    fn create(
        &self,
        fields: AccountFields,
    ) -> impl Future<Output = Result<Account, AccountsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(INSERT)
                .bind(&fields.name)
                .bind(&fields.email)
                .bind(&fields.address)
                .bind(fields.phone_number.as_deref())
                .bind(fields.date_joined.format(DATE_FORMAT).to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Account::new(
                AccountId::from_raw(result.last_insert_rowid()),
                fields,
            ))
        }
    }

    fn get_by_id(
        &self,
        id: AccountId,
    ) -> impl Future<Output = Result<Option<Account>, AccountsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Account>, AccountsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        account: Account,
    ) -> impl Future<Output = Result<Account, AccountsError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(UPDATE)
                .bind(&account.fields.name)
                .bind(&account.fields.email)
                .bind(&account.fields.address)
                .bind(account.fields.phone_number.as_deref())
                .bind(account.fields.date_joined.format(DATE_FORMAT).to_string())
                .bind(account.id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            if result.rows_affected() == 0 {
                return Err(NotFoundError {
                    entity: "Account",
                    id: account.id.to_string(),
                }
                .into());
            }

            Ok(account)
        }
    }

    fn delete(&self, id: AccountId) -> impl Future<Output = Result<(), AccountsError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }
}
