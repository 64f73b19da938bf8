//! Repository for the `courses` table and its YouTube links.

use lms_core::types::DbId;
use sqlx::PgPool;

use super::like_pattern;
use crate::models::course::{Course, CourseDetail, CourseFilter, CreateCourse, UpdateCourse};
use crate::models::youtube_link::LinkParent;
use crate::repositories::YoutubeLinkRepo;

/// Course columns plus the instructor name, for `FROM courses c LEFT JOIN users u`.
const SELECT_COLUMNS: &str = "c.id, c.title, c.description, c.instructor_id, \
    u.full_name AS instructor_name, c.category, c.level, c.duration_minutes, \
    c.students_count, c.rating, c.price, c.status, c.thumbnail_url, \
    c.created_at, c.updated_at";

const FROM_JOINED: &str = "FROM courses c LEFT JOIN users u ON u.id = c.instructor_id";

/// Provides CRUD operations for courses.
pub struct CourseRepo;

impl CourseRepo {
    /// Insert a course and its links in one transaction, then return the
    /// joined representation.
    pub async fn create(pool: &PgPool, input: &CreateCourse) -> Result<CourseDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO courses \
                (title, description, instructor_id, category, level, duration_minutes, \
                 students_count, rating, price, status, thumbnail_url) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 0), COALESCE($7, 0), \
                     COALESCE($8, 0), COALESCE($9, 0), COALESCE($10, 'draft'), $11) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.instructor_id)
        .bind(&input.category)
        .bind(&input.level)
        .bind(input.duration_minutes)
        .bind(input.students_count)
        .bind(input.rating)
        .bind(input.price)
        .bind(&input.status)
        .bind(&input.thumbnail_url)
        .fetch_one(&mut *tx)
        .await?;

        YoutubeLinkRepo::insert_all(&mut tx, LinkParent::Course(id), &input.links).await?;
        tx.commit().await?;

        Self::find_detail(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Course>, sqlx::Error> {
        let query = format!("SELECT {SELECT_COLUMNS} {FROM_JOINED} WHERE c.id = $1");
        sqlx::query_as::<_, Course>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A course with its instructor name and ordered links.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<CourseDetail>, sqlx::Error> {
        let Some(course) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let links = YoutubeLinkRepo::list_for(pool, LinkParent::Course(id)).await?;
        Ok(Some(CourseDetail { course, links }))
    }

    /// List courses matching `filter`, newest first, each with its links.
    pub async fn list(
        pool: &PgPool,
        filter: &CourseFilter,
    ) -> Result<Vec<CourseDetail>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.status.is_some() {
            conditions.push(format!("c.status = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.category.is_some() {
            conditions.push(format!("LOWER(c.category) = LOWER(${bind_idx})"));
            bind_idx += 1;
        }
        if filter.instructor_id.is_some() {
            conditions.push(format!("c.instructor_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(c.title ILIKE ${bind_idx} OR c.description ILIKE ${bind_idx})"
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
             ORDER BY c.created_at DESC, c.id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Course>(&query);
        if let Some(ref status) = filter.status {
            q = q.bind(status);
        }
        if let Some(ref category) = filter.category {
            q = q.bind(category);
        }
        if let Some(instructor_id) = filter.instructor_id {
            q = q.bind(instructor_id);
        }
        if let Some(ref search) = filter.search {
            q = q.bind(like_pattern(search));
        }
        let courses = q
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = courses.iter().map(|c| c.id).collect();
        let mut links = YoutubeLinkRepo::list_for_courses(pool, &ids).await?;

        Ok(courses
            .into_iter()
            .map(|course| {
                let links = links.remove(&course.id).unwrap_or_default();
                CourseDetail { course, links }
            })
            .collect())
    }

    /// Apply a partial update and, when given, replace the links. Both happen
    /// in one transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCourse,
    ) -> Result<Option<CourseDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<(DbId,)> = sqlx::query_as(
            "UPDATE courses SET \
                title = COALESCE($2, title), \
                description = COALESCE($3, description), \
                instructor_id = COALESCE($4, instructor_id), \
                category = COALESCE($5, category), \
                level = COALESCE($6, level), \
                duration_minutes = COALESCE($7, duration_minutes), \
                students_count = COALESCE($8, students_count), \
                rating = COALESCE($9, rating), \
                price = COALESCE($10, price), \
                status = COALESCE($11, status), \
                thumbnail_url = COALESCE($12, thumbnail_url) \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.instructor_id)
        .bind(&input.category)
        .bind(&input.level)
        .bind(input.duration_minutes)
        .bind(input.students_count)
        .bind(input.rating)
        .bind(input.price)
        .bind(&input.status)
        .bind(&input.thumbnail_url)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        if let Some(ref links) = input.links {
            YoutubeLinkRepo::replace(&mut tx, LinkParent::Course(id), links).await?;
        }
        tx.commit().await?;

        Self::find_detail(pool, id).await
    }

    /// Delete the course's links, then the course, in one transaction.
    ///
    /// Returns `true` if the course existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let links_removed = YoutubeLinkRepo::delete_for(&mut tx, LinkParent::Course(id)).await?;
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(course_id = id, links_removed, "Deleted course");
        Ok(result.rows_affected() > 0)
    }
}
