use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{ListQuery, Page, ProductListResponse, ProductTypeInfo, WizardCheck},
    filter::{active_filter_count, available_countries, filter_and_sort},
    model::{Product, ProductType},
    wizard::ProductDraft,
};
use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    state::AppState,
    validation::{form::missing_fields, step_status},
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/countries", get(list_countries))
        .route("/products/types", get(list_types))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/:id", delete(delete_product))
        .route("/products/wizard/check", post(check_draft))
}

async fn require_verified(state: &AppState, user_id: Uuid) -> Result<(), ApiError> {
    if state.accounts.is_email_verified(user_id).await? {
        Ok(())
    } else {
        warn!(%user_id, "unverified user touched the collection");
        Err(ApiError::EmailNotVerified)
    }
}

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductListResponse>, ApiError> {
    require_verified(&state, user_id).await?;
    let filters = query.filter_config()?;

    let collection = state.collections.snapshot(user_id).await;
    let matching = filter_and_sort(collection.products(), &filters);
    let page = Page::slice(matching, query.page, state.config.page_size);

    Ok(Json(ProductListResponse {
        page,
        active_filters: active_filter_count(&filters),
        filters,
    }))
}

#[instrument(skip(state, draft))]
pub async fn create_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    require_verified(&state, user_id).await?;

    let product = draft
        .finish(Uuid::new_v4(), OffsetDateTime::now_utc())
        .map_err(ApiError::Validation)?;
    state.collections.add(user_id, product.clone()).await;

    info!(%user_id, product_id = %product.id, "product added");
    Ok((StatusCode::CREATED, Json(product)))
}

#[instrument(skip(state))]
pub async fn delete_product(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_verified(&state, user_id).await?;
    if !state.collections.remove(user_id, id).await {
        return Err(ApiError::NotFound("product"));
    }
    info!(%user_id, product_id = %id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip_all)]
pub async fn check_draft(_: AuthUser, Json(draft): Json<ProductDraft>) -> Json<WizardCheck> {
    Json(WizardCheck {
        status: step_status(&draft),
        missing: missing_fields(&draft),
    })
}

#[instrument(skip(state))]
pub async fn list_countries(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<String>>, ApiError> {
    require_verified(&state, user_id).await?;
    let collection = state.collections.snapshot(user_id).await;
    Ok(Json(available_countries(collection.products())))
}

pub async fn list_types() -> Json<Vec<ProductTypeInfo>> {
    Json(ProductType::ALL.into_iter().map(ProductTypeInfo::from).collect())
}
