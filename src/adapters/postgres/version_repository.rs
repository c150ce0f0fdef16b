//! PostgreSQL implementation of VersionRepository.
//!
//! `create_next` locks the parent item row before computing the next number,
//! which serializes concurrent snapshot creation per item. The unique
//! `(content_item_id, version_number)` constraint backs this up.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{
    AuthorId, ContentItemId, DomainError, ErrorCode, Timestamp, VersionId,
};
use crate::domain::version::{NewVersion, VersionNumber, VersionSnapshot, VersionedFields};
use crate::ports::VersionRepository;

/// PostgreSQL implementation of VersionRepository.
#[derive(Clone)]
pub struct PostgresVersionRepository {
    pool: PgPool,
}

impl PostgresVersionRepository {
    /// Creates a new PostgresVersionRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VersionRepository for PostgresVersionRepository {
    async fn create_next(&self, version: NewVersion) -> Result<VersionSnapshot, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database("Failed to begin transaction", e))?;

        let locked = sqlx::query("SELECT id FROM content_items WHERE id = $1 FOR UPDATE")
            .bind(version.content_item_id.as_uuid())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DomainError::database("Failed to lock content item", e))?;

        if locked.is_none() {
            return Err(DomainError::new(
                ErrorCode::ContentItemNotFound,
                format!("Content item not found: {}", version.content_item_id),
            ));
        }

        let id = VersionId::new();
        let created_at = Timestamp::now();
        let fields = &version.fields;

        let row = sqlx::query(
            r#"
            INSERT INTO content_versions (
                id, content_item_id, version_number,
                title, body, excerpt, category, cover_image, read_time,
                created_at, created_by
            )
            SELECT $1, $2, COALESCE(MAX(version_number), 0) + 1,
                   $3, $4, $5, $6, $7, $8, $9, $10
            FROM content_versions
            WHERE content_item_id = $2
            RETURNING version_number
            "#,
        )
        .bind(id.as_uuid())
        .bind(version.content_item_id.as_uuid())
        .bind(&fields.title)
        .bind(&fields.body)
        .bind(&fields.excerpt)
        .bind(&fields.category)
        .bind(&fields.cover_image)
        .bind(fields.read_time.map(|m| m as i32))
        .bind(created_at.as_datetime())
        .bind(version.created_by.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DomainError::database("Failed to insert version", e))?;

        let number: i32 = row
            .try_get("version_number")
            .map_err(|e| DomainError::database("Failed to get version_number", e))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database("Failed to commit transaction", e))?;

        Ok(VersionSnapshot::reconstitute(
            id,
            version.content_item_id,
            to_version_number(number)?,
            version.fields,
            created_at,
            version.created_by,
        ))
    }

    async fn list_for_item(
        &self,
        item_id: &ContentItemId,
    ) -> Result<Vec<VersionSnapshot>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, content_item_id, version_number, title, body, excerpt, category,
                   cover_image, read_time, created_at, created_by
            FROM content_versions
            WHERE content_item_id = $1
            ORDER BY version_number DESC
            "#,
        )
        .bind(item_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch versions", e))?;

        rows.into_iter().map(row_to_snapshot).collect()
    }

    async fn find(
        &self,
        item_id: &ContentItemId,
        version: VersionNumber,
    ) -> Result<Option<VersionSnapshot>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, content_item_id, version_number, title, body, excerpt, category,
                   cover_image, read_time, created_at, created_by
            FROM content_versions
            WHERE content_item_id = $1 AND version_number = $2
            "#,
        )
        .bind(item_id.as_uuid())
        .bind(version.value() as i32)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch version", e))?;

        row.map(row_to_snapshot).transpose()
    }

    async fn delete_all_for_item(&self, item_id: &ContentItemId) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM content_versions WHERE content_item_id = $1")
            .bind(item_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete versions", e))?;

        Ok(result.rows_affected())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn to_version_number(value: i32) -> Result<VersionNumber, DomainError> {
    let value = u32::try_from(value)
        .map_err(|e| DomainError::database("Invalid version_number", e))?;
    VersionNumber::new(value).map_err(|e| DomainError::database("Invalid version_number", e))
}

fn row_to_snapshot(row: PgRow) -> Result<VersionSnapshot, DomainError> {
    let get_err = |name: &str, e: sqlx::Error| DomainError::database(&format!("Failed to get {}", name), e);

    let id: uuid::Uuid = row.try_get("id").map_err(|e| get_err("id", e))?;
    let item_id: uuid::Uuid = row
        .try_get("content_item_id")
        .map_err(|e| get_err("content_item_id", e))?;
    let number: i32 = row
        .try_get("version_number")
        .map_err(|e| get_err("version_number", e))?;
    let read_time: Option<i32> = row.try_get("read_time").map_err(|e| get_err("read_time", e))?;
    let created_at: DateTime<Utc> = row
        .try_get("created_at")
        .map_err(|e| get_err("created_at", e))?;
    let created_by: String = row
        .try_get("created_by")
        .map_err(|e| get_err("created_by", e))?;

    let fields = VersionedFields {
        title: row.try_get("title").map_err(|e| get_err("title", e))?,
        body: row.try_get("body").map_err(|e| get_err("body", e))?,
        excerpt: row.try_get("excerpt").map_err(|e| get_err("excerpt", e))?,
        category: row.try_get("category").map_err(|e| get_err("category", e))?,
        cover_image: row
            .try_get("cover_image")
            .map_err(|e| get_err("cover_image", e))?,
        read_time: read_time.map(|m| m.max(0) as u32),
    };

    Ok(VersionSnapshot::reconstitute(
        VersionId::from_uuid(id),
        ContentItemId::from_uuid(item_id),
        to_version_number(number)?,
        fields,
        Timestamp::from_datetime(created_at),
        AuthorId::new(created_by).map_err(|e| DomainError::database("Invalid created_by", e))?,
    ))
}
