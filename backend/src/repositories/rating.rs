//! Personal rating repository

use cafetify_shared::PersonalRating;
use chrono::{DateTime, Utc};
use sqlx::PgConnection;

/// Personal rating record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RatingRecord {
    pub id: i64,
    pub user_id: i64,
    pub cafe_id: i64,
    pub ambience_rating: i32,
    pub service_rating: i32,
    pub price_level: String,
    pub menu_variety: String,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RatingRecord> for PersonalRating {
    fn from(r: RatingRecord) -> Self {
        PersonalRating {
            id: r.id,
            user_id: r.user_id,
            cafe_id: r.cafe_id,
            ambience_rating: r.ambience_rating,
            service_rating: r.service_rating,
            price_level: r.price_level,
            menu_variety: r.menu_variety,
            notes: r.notes,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Input for creating a rating
#[derive(Debug, Clone)]
pub struct CreateRating {
    pub user_id: i64,
    pub cafe_id: i64,
    pub ambience_rating: i32,
    pub service_rating: i32,
    pub price_level: String,
    pub menu_variety: String,
    pub notes: String,
}

/// Partial rating update
#[derive(Debug, Clone, Default)]
pub struct UpdateRating {
    pub ambience_rating: Option<i32>,
    pub service_rating: Option<i32>,
    pub price_level: Option<String>,
    pub menu_variety: Option<String>,
    pub notes: Option<String>,
}

impl UpdateRating {
    pub fn is_empty(&self) -> bool {
        self.ambience_rating.is_none()
            && self.service_rating.is_none()
            && self.price_level.is_none()
            && self.menu_variety.is_none()
            && self.notes.is_none()
    }
}

const RATING_COLUMNS: &str = "id, user_id, cafe_id, ambience_rating, service_rating, \
    price_level, menu_variety, notes, created_at, updated_at";

/// Rating repository for database operations
pub struct RatingRepository;

impl RatingRepository {
    /// Insert a rating
    pub async fn create(conn: &mut PgConnection, input: CreateRating) -> sqlx::Result<RatingRecord> {
        let sql = format!(
            r#"
            INSERT INTO personal_ratings
                (user_id, cafe_id, ambience_rating, service_rating, price_level, menu_variety, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {RATING_COLUMNS}
            "#
        );
        sqlx::query_as::<_, RatingRecord>(&sql)
            .bind(input.user_id)
            .bind(input.cafe_id)
            .bind(input.ambience_rating)
            .bind(input.service_rating)
            .bind(&input.price_level)
            .bind(&input.menu_variety)
            .bind(&input.notes)
            .fetch_one(&mut *conn)
            .await
    }

    /// The user's most recent rating of a cafe
    pub async fn find_latest(
        conn: &mut PgConnection,
        cafe_id: i64,
        user_id: i64,
    ) -> sqlx::Result<Option<RatingRecord>> {
        let sql = format!(
            r#"
            SELECT {RATING_COLUMNS}
            FROM personal_ratings
            WHERE cafe_id = $1 AND user_id = $2
            ORDER BY created_at DESC, id DESC
            LIMIT 1
            "#
        );
        sqlx::query_as::<_, RatingRecord>(&sql)
            .bind(cafe_id)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Apply a partial update to a rating
    pub async fn update(
        conn: &mut PgConnection,
        id: i64,
        changes: UpdateRating,
    ) -> sqlx::Result<RatingRecord> {
        let sql = format!(
            r#"
            UPDATE personal_ratings SET
                ambience_rating = COALESCE($2, ambience_rating),
                service_rating = COALESCE($3, service_rating),
                price_level = COALESCE($4, price_level),
                menu_variety = COALESCE($5, menu_variety),
                notes = COALESCE($6, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {RATING_COLUMNS}
            "#
        );
        sqlx::query_as::<_, RatingRecord>(&sql)
            .bind(id)
            .bind(changes.ambience_rating)
            .bind(changes.service_rating)
            .bind(changes.price_level)
            .bind(changes.menu_variety)
            .bind(changes.notes)
            .fetch_one(&mut *conn)
            .await
    }

    /// All ratings of the given cafes, oldest first
    pub async fn for_cafes(
        conn: &mut PgConnection,
        cafe_ids: &[i64],
    ) -> sqlx::Result<Vec<RatingRecord>> {
        let sql = format!(
            r#"
            SELECT {RATING_COLUMNS}
            FROM personal_ratings
            WHERE cafe_id = ANY($1)
            ORDER BY created_at, id
            "#
        );
        sqlx::query_as::<_, RatingRecord>(&sql)
            .bind(cafe_ids)
            .fetch_all(&mut *conn)
            .await
    }
}
