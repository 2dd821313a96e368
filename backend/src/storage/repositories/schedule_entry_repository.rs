use anyhow::{Context, Result};
use shared::{EntryStatus, ScheduleEntry};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;

/// Repository for schedule entry rows
#[derive(Clone)]
pub struct ScheduleEntryRepository {
    db: DbConnection,
}

impl ScheduleEntryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Entries with `start <= date < end`, ordered by date then staff
    pub async fn list_entries_in_range(&self, start: &str, end: &str) -> Result<Vec<ScheduleEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, staff_id, date, status, value, note
            FROM schedule_entries
            WHERE date >= ? AND date < ?
            ORDER BY date ASC, staff_id ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(map_entry_row).collect()
    }

    pub async fn get_entry(&self, entry_id: &str) -> Result<Option<ScheduleEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, staff_id, date, status, value, note
            FROM schedule_entries
            WHERE id = ?
            "#,
        )
        .bind(entry_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(map_entry_row).transpose()
    }

    pub async fn get_entry_for_cell(&self, staff_id: &str, date: &str) -> Result<Option<ScheduleEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, staff_id, date, status, value, note
            FROM schedule_entries
            WHERE staff_id = ? AND date = ?
            "#,
        )
        .bind(staff_id)
        .bind(date)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(map_entry_row).transpose()
    }

    /// Insert the entry, or overwrite status/value/note of the row already
    /// holding `(staff_id, date)`. The existing row keeps its id.
    pub async fn upsert_entry(&self, entry: &ScheduleEntry, updated_at: &str) -> Result<ScheduleEntry> {
        sqlx::query(
            r#"
            INSERT INTO schedule_entries (id, staff_id, date, status, value, note, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (staff_id, date) DO UPDATE SET
                status = excluded.status,
                value = excluded.value,
                note = excluded.note,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.staff_id)
        .bind(&entry.date)
        .bind(entry.status.as_str())
        .bind(entry.value.map(i64::from))
        .bind(&entry.note)
        .bind(updated_at)
        .execute(self.db.pool())
        .await?;

        self.get_entry_for_cell(&entry.staff_id, &entry.date)
            .await?
            .context("Upserted entry vanished")
    }

    /// Returns true if a row was updated
    pub async fn update_entry(&self, entry: &ScheduleEntry, updated_at: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE schedule_entries
            SET status = ?, value = ?, note = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(entry.status.as_str())
        .bind(entry.value.map(i64::from))
        .bind(&entry.note)
        .bind(updated_at)
        .bind(&entry.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns true if a row was deleted
    pub async fn delete_entry(&self, entry_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM schedule_entries WHERE id = ?")
            .bind(entry_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns the number of rows deleted
    pub async fn delete_entries_for_staff(&self, staff_id: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM schedule_entries WHERE staff_id = ?")
            .bind(staff_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected())
    }
}

fn map_entry_row(row: &SqliteRow) -> Result<ScheduleEntry> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<EntryStatus>()
        .map_err(anyhow::Error::msg)
        .context("Corrupt status column")?;

    let value: Option<i64> = row.try_get("value")?;
    let value = value
        .map(u32::try_from)
        .transpose()
        .context("Corrupt value column")?;

    Ok(ScheduleEntry {
        id: row.try_get("id")?,
        staff_id: row.try_get("staff_id")?,
        date: row.try_get("date")?,
        status,
        value,
        note: row.try_get("note")?,
    })
}
