//! Cafe repository for database operations
//!
//! Cafes are soft-deleted: `deleted_at` is set and every query here filters
//! on `deleted_at IS NULL`.

use cafetify_shared::CafeFilter;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

/// Cafe record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CafeRecord {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a cafe
#[derive(Debug, Clone)]
pub struct CreateCafe {
    pub user_id: i64,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Partial cafe update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateCafe {
    pub name: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Escape `%`, `_` and `\` so user input matches literally inside LIKE
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Cafe repository for database operations
pub struct CafeRepository;

impl CafeRepository {
    /// Insert a new cafe
    pub async fn create(conn: &mut PgConnection, input: CreateCafe) -> sqlx::Result<CafeRecord> {
        sqlx::query_as::<_, CafeRecord>(
            r#"
            INSERT INTO cafes (user_id, name, address, latitude, longitude)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, name, address, latitude, longitude, created_at, updated_at
            "#,
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.latitude)
        .bind(input.longitude)
        .fetch_one(&mut *conn)
        .await
    }

    /// Find a live (not deleted) cafe by ID
    pub async fn find_by_id(conn: &mut PgConnection, id: i64) -> sqlx::Result<Option<CafeRecord>> {
        sqlx::query_as::<_, CafeRecord>(
            r#"
            SELECT id, user_id, name, address, latitude, longitude, created_at, updated_at
            FROM cafes
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Apply a partial update to a live cafe
    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        changes: UpdateCafe,
    ) -> sqlx::Result<Option<CafeRecord>> {
        sqlx::query_as::<_, CafeRecord>(
            r#"
            UPDATE cafes SET
                name = COALESCE($2, name),
                address = COALESCE($3, address),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING id, user_id, name, address, latitude, longitude, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.address)
        .bind(changes.latitude)
        .bind(changes.longitude)
        .fetch_optional(&mut *conn)
        .await
    }

    /// Mark a cafe owned by `user_id` deleted; returns false if no live row matched
    pub async fn soft_delete(conn: &mut PgConnection, id: i64, user_id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE cafes SET deleted_at = NOW()
            WHERE id = $1 AND user_id = $2 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List live cafes matching the filter, newest first
    pub async fn list(pool: &PgPool, filter: &CafeFilter) -> sqlx::Result<Vec<CafeRecord>> {
        sqlx::query_as::<_, CafeRecord>(
            r#"
            SELECT c.id, c.user_id, c.name, c.address, c.latitude, c.longitude,
                   c.created_at, c.updated_at
            FROM cafes c
            WHERE c.deleted_at IS NULL
              AND ($1::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM cafe_tags ct
                    JOIN tags t ON t.id = ct.tag_id
                    WHERE ct.cafe_id = c.id AND t.name = $1))
              AND ($2::TEXT IS NULL OR c.name ILIKE '%' || $2 || '%')
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.tag.as_deref())
        .bind(filter.search.as_deref().map(escape_like))
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(pool)
        .await
    }

    /// Count live cafes matching the filter (ignores limit/offset)
    pub async fn count(pool: &PgPool, filter: &CafeFilter) -> sqlx::Result<i64> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM cafes c
            WHERE c.deleted_at IS NULL
              AND ($1::TEXT IS NULL OR EXISTS (
                    SELECT 1 FROM cafe_tags ct
                    JOIN tags t ON t.id = ct.tag_id
                    WHERE ct.cafe_id = c.id AND t.name = $1))
              AND ($2::TEXT IS NULL OR c.name ILIKE '%' || $2 || '%')
            "#,
        )
        .bind(filter.tag.as_deref())
        .bind(filter.search.as_deref().map(escape_like))
        .fetch_one(pool)
        .await
    }
}
