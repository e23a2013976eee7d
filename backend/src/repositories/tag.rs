//! Tag repository and cafe tag reconciliation

use cafetify_shared::{parse_tag_names, Tag};
use sqlx::{PgConnection, PgPool};

/// Tag record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TagRecord {
    pub id: i64,
    pub name: String,
}

impl From<TagRecord> for Tag {
    fn from(record: TagRecord) -> Self {
        Tag {
            id: record.id,
            name: record.name,
        }
    }
}

/// Tag attached to a cafe, as loaded for listings
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CafeTagRecord {
    pub cafe_id: i64,
    pub id: i64,
    pub name: String,
}

/// Tag repository for database operations
pub struct TagRepository;

impl TagRepository {
    /// Look up a tag by its unique name, inserting it if absent
    pub async fn find_or_create(conn: &mut PgConnection, name: &str) -> sqlx::Result<TagRecord> {
        // The no-op update makes RETURNING yield the existing row on conflict
        sqlx::query_as::<_, TagRecord>(
            r#"
            INSERT INTO tags (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(name)
        .fetch_one(&mut *conn)
        .await
    }

    /// Set a cafe's tags to exactly `tag_ids`
    pub async fn replace_for_cafe(
        conn: &mut PgConnection,
        cafe_id: i64,
        tag_ids: &[i64],
    ) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            DELETE FROM cafe_tags
            WHERE cafe_id = $1 AND NOT (tag_id = ANY($2))
            "#,
        )
        .bind(cafe_id)
        .bind(tag_ids)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO cafe_tags (cafe_id, tag_id)
            SELECT $1, UNNEST($2::BIGINT[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(cafe_id)
        .bind(tag_ids)
        .execute(&mut *conn)
        .await?;

        Ok(())
    }

    /// Resolve a comma-separated tag string and replace the cafe's tag set.
    ///
    /// Must run on a transaction shared with the owning cafe write so a
    /// failure here discards the whole operation.
    pub async fn reconcile(
        conn: &mut PgConnection,
        cafe_id: i64,
        tags_input: &str,
    ) -> sqlx::Result<Vec<TagRecord>> {
        let mut tags = Vec::new();
        for name in parse_tag_names(tags_input) {
            tags.push(Self::find_or_create(&mut *conn, &name).await?);
        }

        let tag_ids: Vec<i64> = tags.iter().map(|t| t.id).collect();
        Self::replace_for_cafe(&mut *conn, cafe_id, &tag_ids).await?;

        Ok(tags)
    }

    /// Tags attached to any of the given cafes
    pub async fn for_cafes(
        conn: &mut PgConnection,
        cafe_ids: &[i64],
    ) -> sqlx::Result<Vec<CafeTagRecord>> {
        sqlx::query_as::<_, CafeTagRecord>(
            r#"
            SELECT ct.cafe_id, t.id, t.name
            FROM cafe_tags ct
            JOIN tags t ON t.id = ct.tag_id
            WHERE ct.cafe_id = ANY($1)
            ORDER BY t.name
            "#,
        )
        .bind(cafe_ids)
        .fetch_all(&mut *conn)
        .await
    }

    /// All tags, alphabetically
    pub async fn list_all(pool: &PgPool) -> sqlx::Result<Vec<TagRecord>> {
        sqlx::query_as::<_, TagRecord>(
            r#"
            SELECT id, name
            FROM tags
            ORDER BY name
            "#,
        )
        .fetch_all(pool)
        .await
    }
}
