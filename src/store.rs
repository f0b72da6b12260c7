//! The boundary to the external table store.
//!
//! Sheets are stored schemaless: each row is a JSONB map of column header
//! to cell text, so the remote keeps the spreadsheet's semantics (cells
//! are text, columns come and go). Reads return the whole sheet at once;
//! writes replace the whole sheet at once, guarded by a per-sheet version
//! counter so a stale editor cannot silently clobber newer data.

use sqlx::types::Json;

use crate::coerce;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::sheet::{ColumnSpec, Row, Sheet};

#[derive(Clone)]
pub struct SheetStore {
    pool: DbPool,
}

impl SheetStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Read the full sheet, normalized to the canonical column set. A
    /// sheet that does not exist yet reads as empty at version 0 rather
    /// than as an error; connection failures still surface.
    pub async fn read(&self, sheet: &str, columns: &[ColumnSpec]) -> AppResult<Sheet> {
        let version: Option<(i64,)> = sqlx::query_as("SELECT version FROM sheets WHERE name = $1")
            .bind(sheet)
            .fetch_optional(&self.pool)
            .await?;
        let Some((version,)) = version else {
            return Ok(Sheet::empty());
        };

        let cells: Vec<(Json<Row>,)> =
            sqlx::query_as("SELECT cells FROM sheet_rows WHERE sheet = $1 ORDER BY pos")
                .bind(sheet)
                .fetch_all(&self.pool)
                .await?;

        let mut rows: Vec<Row> = cells.into_iter().map(|(Json(row),)| row).collect();
        coerce::normalize_rows(&mut rows, columns);
        Ok(Sheet { version, rows })
    }

    /// Replace the whole sheet. The write happens in one transaction:
    /// either the remote ends up exactly at `rows` with a bumped version,
    /// or it is untouched. A version mismatch means another writer got
    /// there first; the caller re-reads and retries.
    pub async fn replace(
        &self,
        sheet: &str,
        rows: &[Row],
        expected_version: i64,
    ) -> AppResult<i64> {
        let mut txn = self.pool.begin().await?;

        sqlx::query("INSERT INTO sheets (name, version) VALUES ($1, 0) ON CONFLICT (name) DO NOTHING")
            .bind(sheet)
            .execute(&mut *txn)
            .await?;

        let (version,): (i64,) =
            sqlx::query_as("SELECT version FROM sheets WHERE name = $1 FOR UPDATE")
                .bind(sheet)
                .fetch_one(&mut *txn)
                .await?;

        if version != expected_version {
            return Err(AppError::Conflict(format!(
                "sheet '{sheet}' is at version {version}, write was based on {expected_version}"
            )));
        }

        sqlx::query("DELETE FROM sheet_rows WHERE sheet = $1")
            .bind(sheet)
            .execute(&mut *txn)
            .await?;

        for (pos, row) in rows.iter().enumerate() {
            sqlx::query("INSERT INTO sheet_rows (sheet, pos, cells) VALUES ($1, $2, $3)")
                .bind(sheet)
                .bind(pos as i32)
                .bind(Json(row))
                .execute(&mut *txn)
                .await?;
        }

        let new_version = version + 1;
        sqlx::query("UPDATE sheets SET version = $2, updated_at = now() WHERE name = $1")
            .bind(sheet)
            .bind(new_version)
            .execute(&mut *txn)
            .await?;

        txn.commit().await?;
        Ok(new_version)
    }
}
