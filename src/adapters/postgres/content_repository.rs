//! PostgreSQL implementation of ContentRepository.
//!
//! Revision checks and the scheduled-publish flip are expressed as guarded
//! `UPDATE ... WHERE` statements so that the database arbitrates races.
//! `update` never writes a draft value; it only clears the stored one when
//! the command discarded it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::content::{ContentFields, ContentItem, Publication};
use crate::domain::foundation::{AuthorId, ContentItemId, DomainError, ErrorCode, Timestamp};
use crate::ports::ContentRepository;

const SELECT_COLUMNS: &str = r#"
    id, author_id, title, slug, excerpt, body, category, cover_image, read_time,
    published, published_at, scheduled_at, draft_snapshot, revision,
    created_at, updated_at
"#;

/// PostgreSQL implementation of ContentRepository.
#[derive(Clone)]
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    /// Creates a new PostgresContentRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, id: &ContentItemId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM content_items WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to check content item existence", e))?;

        Ok(result.0 > 0)
    }
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn save(&self, item: &ContentItem) -> Result<(), DomainError> {
        let fields = item.fields();
        sqlx::query(
            r#"
            INSERT INTO content_items (
                id, author_id, title, slug, excerpt, body, category, cover_image, read_time,
                published, published_at, scheduled_at, draft_snapshot, revision,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.author_id().as_str())
        .bind(&fields.title)
        .bind(&fields.slug)
        .bind(&fields.excerpt)
        .bind(&fields.body)
        .bind(&fields.category)
        .bind(&fields.cover_image)
        .bind(fields.read_time.map(|m| m as i32))
        .bind(item.is_published())
        .bind(item.published_at().map(|t| *t.as_datetime()))
        .bind(item.scheduled_at().map(|t| *t.as_datetime()))
        .bind(item.draft_snapshot())
        .bind(item.revision() as i64)
        .bind(item.created_at().as_datetime())
        .bind(item.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert content item", e))?;

        Ok(())
    }

    async fn update(&self, item: &ContentItem) -> Result<u64, DomainError> {
        let fields = item.fields();
        let row = sqlx::query(
            r#"
            UPDATE content_items SET
                title = $3,
                slug = $4,
                excerpt = $5,
                body = $6,
                category = $7,
                cover_image = $8,
                read_time = $9,
                published = $10,
                published_at = $11,
                scheduled_at = $12,
                draft_snapshot = CASE WHEN $13 THEN NULL ELSE draft_snapshot END,
                updated_at = $14,
                revision = revision + 1
            WHERE id = $1 AND revision = $2
            RETURNING revision
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.revision() as i64)
        .bind(&fields.title)
        .bind(&fields.slug)
        .bind(&fields.excerpt)
        .bind(&fields.body)
        .bind(&fields.category)
        .bind(&fields.cover_image)
        .bind(fields.read_time.map(|m| m as i32))
        .bind(item.is_published())
        .bind(item.published_at().map(|t| *t.as_datetime()))
        .bind(item.scheduled_at().map(|t| *t.as_datetime()))
        .bind(item.discards_draft())
        .bind(item.updated_at().as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update content item", e))?;

        match row {
            Some(row) => {
                let revision: i64 = row
                    .try_get("revision")
                    .map_err(|e| DomainError::database("Failed to get revision", e))?;
                Ok(revision as u64)
            }
            None if self.exists(item.id()).await? => Err(DomainError::new(
                ErrorCode::Conflict,
                format!(
                    "Content item {} was modified concurrently (written revision {})",
                    item.id(),
                    item.revision()
                ),
            )),
            None => Err(DomainError::new(
                ErrorCode::ContentItemNotFound,
                format!("Content item not found: {}", item.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &ContentItemId) -> Result<Option<ContentItem>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM content_items WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch content item", e))?;

        row.map(row_to_item).transpose()
    }

    async fn save_draft_snapshot(
        &self,
        id: &ContentItemId,
        snapshot: &str,
    ) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE content_items SET draft_snapshot = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(snapshot)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to save draft snapshot", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ContentItemNotFound,
                format!("Content item not found: {}", id),
            ));
        }

        Ok(())
    }

    async fn find_due_scheduled(&self, now: Timestamp) -> Result<Vec<ContentItem>, DomainError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM content_items
            WHERE published = FALSE AND scheduled_at IS NOT NULL AND scheduled_at <= $1
            ORDER BY scheduled_at ASC
            "#,
            SELECT_COLUMNS
        ))
        .bind(now.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch due scheduled items", e))?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn publish_if_due(
        &self,
        id: &ContentItemId,
        now: Timestamp,
    ) -> Result<Option<Timestamp>, DomainError> {
        let row = sqlx::query(
            r#"
            UPDATE content_items SET
                published = TRUE,
                published_at = scheduled_at,
                scheduled_at = NULL,
                updated_at = $2,
                revision = revision + 1
            WHERE id = $1
              AND published = FALSE
              AND scheduled_at IS NOT NULL
              AND scheduled_at <= $2
            RETURNING published_at
            "#,
        )
        .bind(id.as_uuid())
        .bind(now.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to publish scheduled item", e))?;

        match row {
            Some(row) => {
                let published_at: DateTime<Utc> = row
                    .try_get("published_at")
                    .map_err(|e| DomainError::database("Failed to get published_at", e))?;
                Ok(Some(Timestamp::from_datetime(published_at)))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ContentItemId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete content item", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ContentItemNotFound,
                format!("Content item not found: {}", id),
            ));
        }

        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to get {}", name), e))
}

fn row_to_item(row: PgRow) -> Result<ContentItem, DomainError> {
    let id: uuid::Uuid = column(&row, "id")?;
    let author_id: String = column(&row, "author_id")?;
    let read_time: Option<i32> = column(&row, "read_time")?;

    let fields = ContentFields {
        title: column(&row, "title")?,
        slug: column(&row, "slug")?,
        excerpt: column(&row, "excerpt")?,
        body: column(&row, "body")?,
        category: column(&row, "category")?,
        cover_image: column(&row, "cover_image")?,
        read_time: read_time.map(|m| m.max(0) as u32),
    };

    let published: bool = column(&row, "published")?;
    let published_at: Option<DateTime<Utc>> = column(&row, "published_at")?;
    let scheduled_at: Option<DateTime<Utc>> = column(&row, "scheduled_at")?;
    let publication = Publication::from_columns(
        published,
        published_at.map(Timestamp::from_datetime),
        scheduled_at.map(Timestamp::from_datetime),
    )?;

    let revision: i64 = column(&row, "revision")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;
    let updated_at: DateTime<Utc> = column(&row, "updated_at")?;

    Ok(ContentItem::reconstitute(
        ContentItemId::from_uuid(id),
        AuthorId::new(author_id)
            .map_err(|e| DomainError::database("Invalid author_id", e))?,
        fields,
        publication,
        column(&row, "draft_snapshot")?,
        revision.max(0) as u64,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
