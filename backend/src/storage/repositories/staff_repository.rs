use anyhow::{Context, Result};
use shared::{StaffGroup, StaffMember};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use crate::storage::connection::DbConnection;

/// Repository for staff rows
#[derive(Clone)]
pub struct StaffRepository {
    db: DbConnection,
}

impl StaffRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn store_staff(&self, staff: &StaffMember) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO staff (id, name, handle, staff_group, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&staff.id)
        .bind(&staff.name)
        .bind(&staff.handle)
        .bind(staff.group.as_str())
        .bind(&staff.created_at)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    pub async fn get_staff(&self, staff_id: &str) -> Result<Option<StaffMember>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, handle, staff_group, created_at
            FROM staff
            WHERE id = ?
            "#,
        )
        .bind(staff_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(map_staff_row).transpose()
    }

    /// List all staff ordered by name
    pub async fn list_staff(&self) -> Result<Vec<StaffMember>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, handle, staff_group, created_at
            FROM staff
            ORDER BY name ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(map_staff_row).collect()
    }

    pub async fn update_staff(&self, staff: &StaffMember) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE staff
            SET name = ?, handle = ?, staff_group = ?
            WHERE id = ?
            "#,
        )
        .bind(&staff.name)
        .bind(&staff.handle)
        .bind(staff.group.as_str())
        .bind(&staff.id)
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    /// Returns true if a row was deleted
    pub async fn delete_staff(&self, staff_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM staff WHERE id = ?")
            .bind(staff_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn map_staff_row(row: &SqliteRow) -> Result<StaffMember> {
    let group: String = row.try_get("staff_group")?;
    let group = group
        .parse::<StaffGroup>()
        .map_err(anyhow::Error::msg)
        .context("Corrupt staff_group column")?;

    Ok(StaffMember {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        handle: row.try_get("handle")?,
        group,
        created_at: row.try_get("created_at")?,
    })
}
