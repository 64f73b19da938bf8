//! Repository for the `youtube_links` table.
//!
//! Writes take an open transaction so links are saved or removed together
//! with their parent row.

use std::collections::HashMap;

use lms_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::youtube_link::{LinkParent, NewYoutubeLink, YoutubeLink};

const COLUMNS: &str = "id, course_id, content_id, title, url, video_id, description, \
                       sort_order, created_at, updated_at";

pub struct YoutubeLinkRepo;

impl YoutubeLinkRepo {
    /// Links of one parent, ordered for display.
    pub async fn list_for(
        pool: &PgPool,
        parent: LinkParent,
    ) -> Result<Vec<YoutubeLink>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM youtube_links WHERE {col} = $1 \
             ORDER BY sort_order, id",
            col = parent.column(),
        );
        sqlx::query_as::<_, YoutubeLink>(&query)
            .bind(parent.id())
            .fetch_all(pool)
            .await
    }

    /// Links for many courses at once, grouped by course id.
    pub async fn list_for_courses(
        pool: &PgPool,
        course_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<YoutubeLink>>, sqlx::Error> {
        Self::list_grouped(pool, "course_id", course_ids, |link| link.course_id).await
    }

    /// Links for many content items at once, grouped by content id.
    pub async fn list_for_contents(
        pool: &PgPool,
        content_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<YoutubeLink>>, sqlx::Error> {
        Self::list_grouped(pool, "content_id", content_ids, |link| link.content_id).await
    }

    /// Delete the parent's links and insert `links` in their place.
    pub async fn replace(
        conn: &mut PgConnection,
        parent: LinkParent,
        links: &[NewYoutubeLink],
    ) -> Result<(), sqlx::Error> {
        Self::delete_for(conn, parent).await?;
        Self::insert_all(conn, parent, links).await
    }

    /// Insert links for a freshly created parent.
    pub async fn insert_all(
        conn: &mut PgConnection,
        parent: LinkParent,
        links: &[NewYoutubeLink],
    ) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO youtube_links \
                ({col}, title, url, video_id, description, sort_order) \
             VALUES ($1, $2, $3, $4, $5, $6)",
            col = parent.column(),
        );
        for link in links {
            sqlx::query(&query)
                .bind(parent.id())
                .bind(&link.title)
                .bind(&link.url)
                .bind(&link.video_id)
                .bind(&link.description)
                .bind(link.sort_order)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Remove every link of the parent. Returns the number removed.
    pub async fn delete_for(
        conn: &mut PgConnection,
        parent: LinkParent,
    ) -> Result<u64, sqlx::Error> {
        let query = format!(
            "DELETE FROM youtube_links WHERE {col} = $1",
            col = parent.column()
        );
        let result = sqlx::query(&query)
            .bind(parent.id())
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    async fn list_grouped(
        pool: &PgPool,
        column: &'static str,
        ids: &[DbId],
        owner: fn(&YoutubeLink) -> Option<DbId>,
    ) -> Result<HashMap<DbId, Vec<YoutubeLink>>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM youtube_links WHERE {column} = ANY($1) \
             ORDER BY sort_order, id"
        );
        let rows = sqlx::query_as::<_, YoutubeLink>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<YoutubeLink>> = HashMap::new();
        for row in rows {
            if let Some(owner) = owner(&row) {
                grouped.entry(owner).or_default().push(row);
            }
        }
        Ok(grouped)
    }
}
