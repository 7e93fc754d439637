//! HTTP handlers for the REST API.
//!
//! Each handler builds the service it needs from [`AppState`] and maps the
//! result to JSON. Errors go through [`AppError`].

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{ActionResponse, DeleteResponse, HealthResponse, ListResponse, OptionsResponse};
use super::error::AppError;
use super::state::AppState;
use crate::models::{
    Animal, AnimalId, Category, CategoryDetail, CategoryId, EnclosureDetail, EnclosureId,
    NewAnimal, NewCategory, NewEnclosure, NewZoo, Zoo, ZooDetail, ZooId,
};
use crate::services::{AutoAssignOutcome, ConstraintReport};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Result type for handlers that create a record.
pub type CreatedResult<T> = Result<(StatusCode, Json<T>), AppError>;

// =============================================================================
// Health Check & Options
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

/// GET /v1/options
pub async fn get_options() -> Json<OptionsResponse> {
    Json(OptionsResponse::collect())
}

// =============================================================================
// Animals
// =============================================================================

/// GET /v1/animals
pub async fn list_animals(State(state): State<AppState>) -> HandlerResult<ListResponse<Animal>> {
    Ok(Json(state.animals().list().await?.into()))
}

/// POST /v1/animals
pub async fn create_animal(
    State(state): State<AppState>,
    Json(input): Json<NewAnimal>,
) -> CreatedResult<Animal> {
    let animal = state.animals().create(&input).await?;
    Ok((StatusCode::CREATED, Json(animal)))
}

/// GET /v1/animals/{id}
pub async fn get_animal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Animal> {
    Ok(Json(state.animals().get(AnimalId(id)).await?))
}

/// PUT /v1/animals/{id}
pub async fn update_animal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<NewAnimal>,
) -> HandlerResult<Animal> {
    Ok(Json(state.animals().update(AnimalId(id), &input).await?))
}

/// DELETE /v1/animals/{id}
pub async fn delete_animal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<DeleteResponse> {
    state.animals().delete(AnimalId(id)).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// POST /v1/animals/{id}/sunrise
pub async fn animal_sunrise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ActionResponse> {
    Ok(Json(state.animals().sunrise(AnimalId(id)).await?.into()))
}

/// POST /v1/animals/{id}/sunset
pub async fn animal_sunset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ActionResponse> {
    Ok(Json(state.animals().sunset(AnimalId(id)).await?.into()))
}

/// POST /v1/animals/{id}/feedingtime
pub async fn animal_feeding_time(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ActionResponse> {
    Ok(Json(state.animals().feeding_time(AnimalId(id)).await?.into()))
}

// =============================================================================
// Categories
// =============================================================================

/// GET /v1/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> HandlerResult<ListResponse<Category>> {
    Ok(Json(state.categories().list().await?.into()))
}

/// POST /v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<NewCategory>,
) -> CreatedResult<CategoryDetail> {
    let category = state.categories().create(&input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<CategoryDetail> {
    Ok(Json(state.categories().get(CategoryId(id)).await?))
}

/// PUT /v1/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<NewCategory>,
) -> HandlerResult<CategoryDetail> {
    Ok(Json(state.categories().update(CategoryId(id), &input).await?))
}

/// DELETE /v1/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<DeleteResponse> {
    state.categories().delete(CategoryId(id)).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// GET /v1/categories/{id}/animals
pub async fn category_animals(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ListResponse<Animal>> {
    Ok(Json(state.categories().animals(CategoryId(id)).await?.into()))
}

/// POST /v1/categories/{id}/assign/{animal_id}
pub async fn category_assign_animal(
    State(state): State<AppState>,
    Path((id, animal_id)): Path<(i64, i64)>,
) -> HandlerResult<Animal> {
    Ok(Json(
        state
            .categories()
            .assign_animal(CategoryId(id), AnimalId(animal_id))
            .await?,
    ))
}

// =============================================================================
// Enclosures
// =============================================================================

/// GET /v1/enclosures
pub async fn list_enclosures(
    State(state): State<AppState>,
) -> HandlerResult<ListResponse<EnclosureDetail>> {
    Ok(Json(state.enclosures().list().await?.into()))
}

/// POST /v1/enclosures
pub async fn create_enclosure(
    State(state): State<AppState>,
    Json(input): Json<NewEnclosure>,
) -> CreatedResult<EnclosureDetail> {
    let enclosure = state.enclosures().create(&input).await?;
    Ok((StatusCode::CREATED, Json(enclosure)))
}

/// GET /v1/enclosures/{id}
pub async fn get_enclosure(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<EnclosureDetail> {
    Ok(Json(state.enclosures().get(EnclosureId(id)).await?))
}

/// PUT /v1/enclosures/{id}
pub async fn update_enclosure(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<NewEnclosure>,
) -> HandlerResult<EnclosureDetail> {
    Ok(Json(
        state.enclosures().update(EnclosureId(id), &input).await?,
    ))
}

/// DELETE /v1/enclosures/{id}
pub async fn delete_enclosure(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<DeleteResponse> {
    state.enclosures().delete(EnclosureId(id)).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// POST /v1/enclosures/{id}/addanimal/{animal_id}
pub async fn enclosure_add_animal(
    State(state): State<AppState>,
    Path((id, animal_id)): Path<(i64, i64)>,
) -> HandlerResult<EnclosureDetail> {
    Ok(Json(
        state
            .enclosures()
            .add_animal(EnclosureId(id), AnimalId(animal_id))
            .await?,
    ))
}

/// POST /v1/enclosures/{id}/removeanimal/{animal_id}
pub async fn enclosure_remove_animal(
    State(state): State<AppState>,
    Path((id, animal_id)): Path<(i64, i64)>,
) -> HandlerResult<EnclosureDetail> {
    Ok(Json(
        state
            .enclosures()
            .remove_animal(EnclosureId(id), AnimalId(animal_id))
            .await?,
    ))
}

/// POST /v1/enclosures/{id}/assignanimal/{animal_id}
pub async fn enclosure_assign_animal(
    State(state): State<AppState>,
    Path((id, animal_id)): Path<(i64, i64)>,
) -> HandlerResult<Animal> {
    Ok(Json(
        state
            .enclosures()
            .assign_animal(EnclosureId(id), AnimalId(animal_id))
            .await?,
    ))
}

/// POST /v1/enclosures/{id}/sunrise
pub async fn enclosure_sunrise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ActionResponse> {
    Ok(Json(state.enclosures().sunrise(EnclosureId(id)).await?.into()))
}

/// POST /v1/enclosures/{id}/sunset
pub async fn enclosure_sunset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ActionResponse> {
    Ok(Json(state.enclosures().sunset(EnclosureId(id)).await?.into()))
}

/// POST /v1/enclosures/{id}/feedingtime
pub async fn enclosure_feeding_time(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ActionResponse> {
    Ok(Json(
        state
            .enclosures()
            .feeding_time(EnclosureId(id))
            .await?
            .into(),
    ))
}

/// POST /v1/enclosures/{id}/checkconstraints
pub async fn enclosure_check_constraints(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ConstraintReport> {
    Ok(Json(
        state.enclosures().check_constraints(EnclosureId(id)).await?,
    ))
}

// =============================================================================
// Zoos
// =============================================================================

/// GET /v1/zoos
pub async fn list_zoos(State(state): State<AppState>) -> HandlerResult<ListResponse<Zoo>> {
    Ok(Json(state.zoos().list().await?.into()))
}

/// POST /v1/zoos
pub async fn create_zoo(
    State(state): State<AppState>,
    Json(input): Json<NewZoo>,
) -> CreatedResult<ZooDetail> {
    let zoo = state.zoos().create(&input).await?;
    Ok((StatusCode::CREATED, Json(zoo)))
}

/// GET /v1/zoos/{id}
pub async fn get_zoo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ZooDetail> {
    Ok(Json(state.zoos().get(ZooId(id)).await?))
}

/// PUT /v1/zoos/{id}
pub async fn update_zoo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<NewZoo>,
) -> HandlerResult<ZooDetail> {
    Ok(Json(state.zoos().update(ZooId(id), &input).await?))
}

/// DELETE /v1/zoos/{id}
pub async fn delete_zoo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<DeleteResponse> {
    state.zoos().delete(ZooId(id)).await?;
    Ok(Json(DeleteResponse::new(id)))
}

/// POST /v1/zoos/{id}/addanimal/{animal_id}
pub async fn zoo_add_animal(
    State(state): State<AppState>,
    Path((id, animal_id)): Path<(i64, i64)>,
) -> HandlerResult<ZooDetail> {
    Ok(Json(
        state
            .zoos()
            .add_animal(ZooId(id), AnimalId(animal_id))
            .await?,
    ))
}

/// POST /v1/zoos/{id}/removeanimal/{animal_id}
pub async fn zoo_remove_animal(
    State(state): State<AppState>,
    Path((id, animal_id)): Path<(i64, i64)>,
) -> HandlerResult<ZooDetail> {
    Ok(Json(
        state
            .zoos()
            .remove_animal(ZooId(id), AnimalId(animal_id))
            .await?,
    ))
}

/// POST /v1/zoos/{id}/sunrise
pub async fn zoo_sunrise(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ActionResponse> {
    Ok(Json(state.zoos().sunrise(ZooId(id)).await?.into()))
}

/// POST /v1/zoos/{id}/sunset
pub async fn zoo_sunset(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ActionResponse> {
    Ok(Json(state.zoos().sunset(ZooId(id)).await?.into()))
}

/// POST /v1/zoos/{id}/feeding-time
pub async fn zoo_feeding_time(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ActionResponse> {
    Ok(Json(state.zoos().feeding_time(ZooId(id)).await?.into()))
}

/// POST /v1/zoos/{id}/auto-assign
pub async fn zoo_auto_assign(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<AutoAssignOutcome> {
    Ok(Json(state.zoos().auto_assign(ZooId(id)).await?))
}

/// POST /v1/zoos/{id}/check-constraints
pub async fn zoo_check_constraints(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<ConstraintReport> {
    Ok(Json(state.zoos().check_constraints(ZooId(id)).await?))
}
