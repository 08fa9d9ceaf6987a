use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};

use crate::db::models::{Calculation, NewCalculation};
use crate::db::schema::SQLITE_INIT;
use crate::error::ReckonError;

pub type SqlitePool = Pool<Sqlite>;

/// Upper bound on the entries `list` returns, newest first.
pub const HISTORY_LIMIT: i64 = 50;

/// Open (and create when missing) the SQLite database behind `database_url`.
pub async fn connect(database_url: &str) -> Result<SqlitePool, ReckonError> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct CalculationsStorage {
    pool: SqlitePool,
}

impl CalculationsStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), ReckonError> {
        // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Most recent entries, newest first, capped at [`HISTORY_LIMIT`].
    pub async fn list(&self) -> Result<Vec<Calculation>, ReckonError> {
        let rows = sqlx::query(
            r#"SELECT id, expression, result, created_at
               FROM calculations
               ORDER BY created_at DESC, id DESC
               LIMIT ?"#,
        )
        .bind(HISTORY_LIMIT)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_model).collect()
    }

    /// Persist one calculation with a fresh id and a store-assigned
    /// timestamp; returns the created entity.
    pub async fn append(&self, input: NewCalculation) -> Result<Calculation, ReckonError> {
        let created_at = Utc::now();
        let res = sqlx::query(
            "INSERT INTO calculations (expression, result, created_at) VALUES (?, ?, ?)",
        )
        .bind(&input.expression)
        .bind(&input.result)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(Calculation {
            id: res.last_insert_rowid(),
            expression: input.expression,
            result: input.result,
            created_at,
        })
    }

    /// Delete all entries. Idempotent; clearing an empty store succeeds.
    pub async fn clear(&self) -> Result<(), ReckonError> {
        sqlx::query("DELETE FROM calculations").execute(&self.pool).await?;
        Ok(())
    }

    /// Insert the stock entries once, on a fresh database only.
    pub async fn seed_if_empty(&self) -> Result<(), ReckonError> {
        if !self.list().await?.is_empty() {
            return Ok(());
        }
        for (expression, result) in [("2 + 2", "4"), ("10 * 5", "50"), ("100 / 4", "25")] {
            self.append(NewCalculation {
                expression: expression.to_string(),
                result: result.to_string(),
            })
            .await?;
        }
        Ok(())
    }

    fn row_to_model(row: SqliteRow) -> Result<Calculation, ReckonError> {
        let id: i64 = row.try_get("id")?;
        let expression: String = row.try_get("expression")?;
        let result: String = row.try_get("result")?;
        let created_at_str: String = row.try_get("created_at")?;

        let created_at: DateTime<Utc> = chrono::DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(Calculation {
            id,
            expression,
            result,
            created_at,
        })
    }
}
