//! Repository for the `users` table.

use lms_core::types::DbId;
use sqlx::PgPool;

use super::like_pattern;
use crate::models::user::{CreateUser, UpdateUser, User, UserFilter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, password_hash, role, level, status, phone, \
                       avatar_url, bio, last_login_at, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row. Emails are stored lower-cased.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users \
                (full_name, email, password_hash, role, level, status, phone, avatar_url, bio) \
             VALUES ($1, LOWER($2), $3, $4, $5, COALESCE($6, 'active'), $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .bind(&input.level)
            .bind(&input.status)
            .bind(&input.phone)
            .bind(&input.avatar_url)
            .bind(&input.bio)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Resolve a display name to a user id (case-insensitive, trimmed).
    ///
    /// When several users share the name the oldest account wins.
    pub async fn find_id_by_full_name(
        pool: &PgPool,
        full_name: &str,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM users WHERE LOWER(full_name) = LOWER(TRIM($1)) \
             ORDER BY id LIMIT 1",
        )
        .bind(full_name)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(|(id,)| id))
    }

    /// List users matching `filter`, newest first.
    pub async fn list(pool: &PgPool, filter: &UserFilter) -> Result<Vec<User>, sqlx::Error> {
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if filter.role.is_some() {
            conditions.push(format!("role = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.level.is_some() {
            conditions.push(format!("LOWER(level) = LOWER(${bind_idx})"));
            bind_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.search.is_some() {
            conditions.push(format!(
                "(full_name ILIKE ${bind_idx} OR email ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM users {where_clause} \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, User>(&query);
        if let Some(ref role) = filter.role {
            q = q.bind(role);
        }
        if let Some(ref level) = filter.level {
            q = q.bind(level);
        }
        if let Some(ref status) = filter.status {
            q = q.bind(status);
        }
        if let Some(ref search) = filter.search {
            q = q.bind(like_pattern(search));
        }
        q.bind(filter.limit).bind(filter.offset).fetch_all(pool).await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET \
                full_name = COALESCE($2, full_name), \
                email = COALESCE(LOWER($3), email), \
                role = COALESCE($4, role), \
                level = COALESCE($5, level), \
                status = COALESCE($6, status), \
                phone = COALESCE($7, phone), \
                avatar_url = COALESCE($8, avatar_url), \
                bio = COALESCE($9, bio) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.role)
            .bind(&input.level)
            .bind(&input.status)
            .bind(&input.phone)
            .bind(&input.avatar_url)
            .bind(&input.bio)
            .fetch_optional(pool)
            .await
    }

    /// Replace a user's password hash. Returns `true` if the row was updated.
    pub async fn set_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stamp `last_login_at` with the current time.
    pub async fn record_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a user. Courses and content they authored keep existing with
    /// a `NULL` author. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
