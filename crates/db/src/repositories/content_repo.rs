//! Repository for the `content_items` table and its YouTube links.

use lms_core::types::DbId;
use sqlx::PgPool;

use super::like_pattern;
use crate::models::content::{
    ContentDetail, ContentFilter, ContentItem, CreateContent, UpdateContent,
};
use crate::models::youtube_link::LinkParent;
use crate::repositories::YoutubeLinkRepo;

const SELECT_COLUMNS: &str = "ci.id, ci.title, ci.description, ci.content_type, \
    ci.course_id, c.title AS course_title, ci.author_id, u.full_name AS author_name, \
    ci.url, ci.body, ci.file_size_bytes, ci.duration_minutes, ci.views_count, \
    ci.status, ci.created_at, ci.updated_at";

const FROM_JOINED: &str = "FROM content_items ci \
    LEFT JOIN courses c ON c.id = ci.course_id \
    LEFT JOIN users u ON u.id = ci.author_id";

/// Provides CRUD operations for content library items.
pub struct ContentRepo;

impl ContentRepo {
    /// Insert an item and its links in one transaction, then return the
    /// joined representation.
    pub async fn create(
        pool: &PgPool,
        input: &CreateContent,
    ) -> Result<ContentDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO content_items \
                (title, description, content_type, course_id, author_id, url, body, \
                 file_size_bytes, duration_minutes, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, 'draft')) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.content_type)
        .bind(input.course_id)
        .bind(input.author_id)
        .bind(&input.url)
        .bind(&input.body)
        .bind(input.file_size_bytes)
        .bind(input.duration_minutes)
        .bind(&input.status)
        .fetch_one(&mut *tx)
        .await?;

        YoutubeLinkRepo::insert_all(&mut tx, LinkParent::Content(id), &input.links).await?;
        tx.commit().await?;

        Self::find_detail(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ContentItem>, sqlx::Error> {
        let query = format!("SELECT {SELECT_COLUMNS} {FROM_JOINED} WHERE ci.id = $1");
        sqlx::query_as::<_, ContentItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ContentDetail>, sqlx::Error> {
        let Some(item) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let links = YoutubeLinkRepo::list_for(pool, LinkParent::Content(id)).await?;
        Ok(Some(ContentDetail { item, links }))
    }

    /// List items matching `filter`, newest first, each with its links.
    pub async fn list(
        pool: &PgPool,
        filter: &ContentFilter,
    ) -> Result<Vec<ContentDetail>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.content_type.is_some() {
            conditions.push(format!("ci.content_type = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.course_id.is_some() {
            conditions.push(format!("ci.course_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("ci.status = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(ci.title ILIKE ${bind_idx} OR ci.description ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {SELECT_COLUMNS} {FROM_JOINED} {where_clause} \
             ORDER BY ci.created_at DESC, ci.id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, ContentItem>(&query);
        if let Some(ref content_type) = filter.content_type {
            q = q.bind(content_type);
        }
        if let Some(course_id) = filter.course_id {
            q = q.bind(course_id);
        }
        if let Some(ref status) = filter.status {
            q = q.bind(status);
        }
        if let Some(ref search) = filter.search {
            q = q.bind(like_pattern(search));
        }
        let items = q
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = items.iter().map(|i| i.id).collect();
        let mut links = YoutubeLinkRepo::list_for_contents(pool, &ids).await?;

        Ok(items
            .into_iter()
            .map(|item| {
                let links = links.remove(&item.id).unwrap_or_default();
                ContentDetail { item, links }
            })
            .collect())
    }

    /// Partial update; `links: Some(..)` replaces every link in the same
    /// transaction.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateContent,
    ) -> Result<Option<ContentDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE content_items SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                content_type = COALESCE($4, content_type), \
                course_id = COALESCE($5, course_id), \
                author_id = COALESCE($6, author_id), \
                url = COALESCE($7, url), \
                body = COALESCE($8, body), \
                file_size_bytes = COALESCE($9, file_size_bytes), \
                duration_minutes = COALESCE($10, duration_minutes), \
                status = COALESCE($11, status) \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.content_type)
        .bind(input.course_id)
        .bind(input.author_id)
        .bind(&input.url)
        .bind(&input.body)
        .bind(input.file_size_bytes)
        .bind(input.duration_minutes)
        .bind(&input.status)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        if let Some(ref links) = input.links {
            YoutubeLinkRepo::replace(&mut tx, LinkParent::Content(id), links).await?;
        }
        tx.commit().await?;

        Self::find_detail(pool, id).await
    }

    /// Delete the item's links, then the item, in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let links_removed = YoutubeLinkRepo::delete_for(&mut tx, LinkParent::Content(id)).await?;
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(content_id = id, links_removed, "Deleted content item");
        Ok(result.rows_affected() > 0)
    }

    /// Bump the view counter. Returns the new count, or `None` if the item
    /// does not exist.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE content_items SET views_count = views_count + 1 \
             WHERE id = $1 RETURNING views_count",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
