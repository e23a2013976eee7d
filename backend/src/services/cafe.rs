//! Cafe service: cafe CRUD, personal ratings and tag assignment
//!
//! Every multi-step write runs on one transaction. An early `?` return drops
//! the transaction, which rolls it back, so a cafe is never left without its
//! rating or with half of its tags.

use crate::auth::check_ownership;
use crate::error::ApiError;
use crate::repositories::{
    CafeRecord, CafeRepository, CreateCafe, CreateRating, RatingRepository, TagRepository,
    UpdateCafe, UpdateRating,
};
use cafetify_shared::validation::{
    validate_latitude, validate_longitude, validate_rating, validate_required_text,
    validate_tags_input, MAX_CAFE_NAME_LENGTH, MAX_LABEL_LENGTH,
};
use cafetify_shared::{
    Cafe, CafeListQuery, CafeListResponse, CreateCafeRequest, PersonalRating, RateCafeRequest,
    Tag, UpdateCafeRequest,
};
use sqlx::{PgConnection, PgPool};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Cafe service for cafe and rating operations
pub struct CafeService;

impl CafeService {
    /// Create a cafe together with the creator's rating and tags
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        request: CreateCafeRequest,
    ) -> Result<Cafe, ApiError> {
        validate_create(&request).map_err(ApiError::Validation)?;

        let mut tx = pool.begin().await?;
        let cafe = Self::insert_with_details(&mut tx, user_id, request).await?;
        tx.commit().await?;

        info!(cafe_id = cafe.id, user_id, "Cafe created");
        Ok(cafe)
    }

    /// Insert a cafe, its first rating and its tags on `conn`
    ///
    /// Does not validate; callers own the transaction and the commit.
    pub async fn insert_with_details(
        conn: &mut PgConnection,
        user_id: i64,
        request: CreateCafeRequest,
    ) -> Result<Cafe, ApiError> {
        let record = CafeRepository::create(
            &mut *conn,
            CreateCafe {
                user_id,
                name: request.name.trim().to_string(),
                address: request.address.trim().to_string(),
                latitude: request.latitude,
                longitude: request.longitude,
            },
        )
        .await?;

        RatingRepository::create(
            &mut *conn,
            CreateRating {
                user_id,
                cafe_id: record.id,
                ambience_rating: request.ambience_rating,
                service_rating: request.service_rating,
                price_level: request.price_level.trim().to_string(),
                menu_variety: request.menu_variety.trim().to_string(),
                notes: request.notes,
            },
        )
        .await?;

        if let Some(tags_input) = supplied_tags(request.tags_input.as_deref()) {
            TagRepository::reconcile(&mut *conn, record.id, tags_input).await?;
        }

        Self::with_details(&mut *conn, record).await
    }

    /// List live cafes with their ratings and tags
    pub async fn list(pool: &PgPool, query: CafeListQuery) -> Result<CafeListResponse, ApiError> {
        let filter = query.normalize();
        debug!(?filter, "Listing cafes");

        let records = CafeRepository::list(pool, &filter).await?;
        let total = CafeRepository::count(pool, &filter).await?;

        let mut conn = pool.acquire().await?;
        let cafes = Self::attach_details(&mut conn, records).await?;

        Ok(CafeListResponse {
            cafes,
            total,
            limit: filter.limit,
            offset: filter.offset,
        })
    }

    /// Fetch one live cafe
    pub async fn get(pool: &PgPool, cafe_id: i64) -> Result<Cafe, ApiError> {
        let mut conn = pool.acquire().await?;
        let record = CafeRepository::find_by_id(&mut conn, cafe_id)
            .await?
            .ok_or_else(cafe_not_found)?;

        Self::with_details(&mut conn, record).await
    }

    /// Update a cafe the caller owns
    ///
    /// Cafe fields follow "absent means unchanged". Rating fields go to the
    /// caller's most recent rating of the cafe, or create one when the caller
    /// has none yet and supplied both star ratings.
    pub async fn update(
        pool: &PgPool,
        user_id: i64,
        cafe_id: i64,
        request: UpdateCafeRequest,
    ) -> Result<Cafe, ApiError> {
        validate_update(&request).map_err(ApiError::Validation)?;

        let mut tx = pool.begin().await?;

        let existing = CafeRepository::find_by_id(&mut tx, cafe_id)
            .await?
            .ok_or_else(cafe_not_found)?;
        if let Err(e) = check_ownership(existing.user_id, user_id) {
            warn!(cafe_id, user_id, "Rejected cafe update by non-owner");
            return Err(e);
        }

        let record = CafeRepository::update(
            &mut tx,
            cafe_id,
            UpdateCafe {
                name: non_blank(request.name),
                address: non_blank(request.address),
                latitude: request.latitude,
                longitude: request.longitude,
            },
        )
        .await?
        .ok_or_else(cafe_not_found)?;

        let changes = UpdateRating {
            ambience_rating: request.ambience_rating,
            service_rating: request.service_rating,
            price_level: non_blank(request.price_level),
            menu_variety: non_blank(request.menu_variety),
            notes: request.notes,
        };

        match RatingRepository::find_latest(&mut tx, cafe_id, user_id).await? {
            Some(latest) if !changes.is_empty() => {
                RatingRepository::update(&mut tx, latest.id, changes).await?;
            }
            Some(_) => {}
            None => {
                if let (Some(ambience_rating), Some(service_rating)) =
                    (changes.ambience_rating, changes.service_rating)
                {
                    RatingRepository::create(
                        &mut tx,
                        CreateRating {
                            user_id,
                            cafe_id,
                            ambience_rating,
                            service_rating,
                            price_level: changes.price_level.unwrap_or_default(),
                            menu_variety: changes.menu_variety.unwrap_or_default(),
                            notes: changes.notes.unwrap_or_default(),
                        },
                    )
                    .await?;
                }
            }
        }

        if let Some(tags_input) = supplied_tags(request.tags_input.as_deref()) {
            TagRepository::reconcile(&mut tx, cafe_id, tags_input).await?;
        }

        let cafe = Self::with_details(&mut tx, record).await?;
        tx.commit().await?;

        info!(cafe_id, user_id, "Cafe updated");
        Ok(cafe)
    }

    /// Soft-delete a cafe the caller owns
    pub async fn delete(pool: &PgPool, user_id: i64, cafe_id: i64) -> Result<(), ApiError> {
        let mut tx = pool.begin().await?;

        let existing = CafeRepository::find_by_id(&mut tx, cafe_id)
            .await?
            .ok_or_else(cafe_not_found)?;
        if let Err(e) = check_ownership(existing.user_id, user_id) {
            warn!(cafe_id, user_id, "Rejected cafe delete by non-owner");
            return Err(e);
        }

        if !CafeRepository::soft_delete(&mut tx, cafe_id, user_id).await? {
            return Err(cafe_not_found());
        }
        tx.commit().await?;

        info!(cafe_id, user_id, "Cafe deleted");
        Ok(())
    }

    /// Add a rating by the caller, optionally replacing the cafe's tags
    pub async fn rate(
        pool: &PgPool,
        user_id: i64,
        cafe_id: i64,
        request: RateCafeRequest,
    ) -> Result<PersonalRating, ApiError> {
        validate_rate(&request).map_err(ApiError::Validation)?;

        let mut tx = pool.begin().await?;

        CafeRepository::find_by_id(&mut tx, cafe_id)
            .await?
            .ok_or_else(cafe_not_found)?;

        let rating = RatingRepository::create(
            &mut tx,
            CreateRating {
                user_id,
                cafe_id,
                ambience_rating: request.ambience_rating,
                service_rating: request.service_rating,
                price_level: request.price_level.trim().to_string(),
                menu_variety: request.menu_variety.trim().to_string(),
                notes: request.notes,
            },
        )
        .await?;

        if let Some(tags_input) = supplied_tags(request.tags_input.as_deref()) {
            TagRepository::reconcile(&mut tx, cafe_id, tags_input).await?;
        }

        tx.commit().await?;

        info!(cafe_id, user_id, rating_id = rating.id, "Cafe rated");
        Ok(rating.into())
    }

    async fn with_details(conn: &mut PgConnection, record: CafeRecord) -> Result<Cafe, ApiError> {
        let mut cafes = Self::attach_details(conn, vec![record]).await?;
        cafes.pop().ok_or_else(cafe_not_found)
    }

    /// Load ratings and tags for all `records` with one query each
    async fn attach_details(
        conn: &mut PgConnection,
        records: Vec<CafeRecord>,
    ) -> Result<Vec<Cafe>, ApiError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = records.iter().map(|c| c.id).collect();

        let mut ratings: HashMap<i64, Vec<PersonalRating>> = HashMap::new();
        for rating in RatingRepository::for_cafes(&mut *conn, &ids).await? {
            ratings.entry(rating.cafe_id).or_default().push(rating.into());
        }

        let mut tags: HashMap<i64, Vec<Tag>> = HashMap::new();
        for tag in TagRepository::for_cafes(&mut *conn, &ids).await? {
            tags.entry(tag.cafe_id).or_default().push(Tag {
                id: tag.id,
                name: tag.name,
            });
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let id = record.id;
                into_cafe(
                    record,
                    ratings.remove(&id).unwrap_or_default(),
                    tags.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}

fn into_cafe(record: CafeRecord, ratings: Vec<PersonalRating>, tags: Vec<Tag>) -> Cafe {
    Cafe {
        id: record.id,
        user_id: record.user_id,
        name: record.name,
        address: record.address,
        latitude: record.latitude,
        longitude: record.longitude,
        ratings,
        tags,
        created_at: record.created_at,
        updated_at: record.updated_at,
    }
}

fn cafe_not_found() -> ApiError {
    ApiError::NotFound("Cafe not found".to_string())
}

/// `None` when the caller left the tag set alone
fn supplied_tags(tags_input: Option<&str>) -> Option<&str> {
    tags_input.filter(|s| !s.is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_create(request: &CreateCafeRequest) -> Result<(), String> {
    validate_required_text("Name", &request.name, MAX_CAFE_NAME_LENGTH)?;
    validate_required_text("Address", &request.address, usize::MAX)?;
    validate_latitude(request.latitude)?;
    validate_longitude(request.longitude)?;
    validate_rating("Ambience rating", request.ambience_rating)?;
    validate_rating("Service rating", request.service_rating)?;
    validate_required_text("Price level", &request.price_level, MAX_LABEL_LENGTH)?;
    validate_required_text("Menu variety", &request.menu_variety, MAX_LABEL_LENGTH)?;
    if let Some(tags_input) = &request.tags_input {
        validate_tags_input(tags_input)?;
    }
    Ok(())
}

fn validate_update(request: &UpdateCafeRequest) -> Result<(), String> {
    if let Some(name) = request.name.as_deref().filter(|s| !s.trim().is_empty()) {
        validate_required_text("Name", name, MAX_CAFE_NAME_LENGTH)?;
    }
    if let Some(latitude) = request.latitude {
        validate_latitude(latitude)?;
    }
    if let Some(longitude) = request.longitude {
        validate_longitude(longitude)?;
    }
    if let Some(rating) = request.ambience_rating {
        validate_rating("Ambience rating", rating)?;
    }
    if let Some(rating) = request.service_rating {
        validate_rating("Service rating", rating)?;
    }
    if let Some(price_level) = request.price_level.as_deref().filter(|s| !s.trim().is_empty()) {
        validate_required_text("Price level", price_level, MAX_LABEL_LENGTH)?;
    }
    if let Some(menu_variety) = request.menu_variety.as_deref().filter(|s| !s.trim().is_empty()) {
        validate_required_text("Menu variety", menu_variety, MAX_LABEL_LENGTH)?;
    }
    if let Some(tags_input) = &request.tags_input {
        validate_tags_input(tags_input)?;
    }
    Ok(())
}

fn validate_rate(request: &RateCafeRequest) -> Result<(), String> {
    validate_rating("Ambience rating", request.ambience_rating)?;
    validate_rating("Service rating", request.service_rating)?;
    validate_required_text("Price level", &request.price_level, MAX_LABEL_LENGTH)?;
    validate_required_text("Menu variety", &request.menu_variety, MAX_LABEL_LENGTH)?;
    if let Some(tags_input) = &request.tags_input {
        validate_tags_input(tags_input)?;
    }
    Ok(())
}
