use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ConnectionTrait, TransactionTrait};
use tracing::instrument;

use crate::entity::example;
use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::extractors::query::AppQuery;
use crate::models::example::*;
use crate::state::AppState;
use crate::store::ExampleStore;

#[utoipa::path(
    get,
    path = "/",
    tag = "Examples",
    operation_id = "listExamples",
    summary = "List examples with pagination",
    description = "Returns a page of examples ordered by creation time, newest first. `page` defaults to 1 and `limit` to 10 (max 100). `totalCount` counts all examples regardless of paging.",
    params(ExampleListQuery),
    responses(
        (status = 200, description = "Page of examples", body = ExampleListResponse),
        (status = 400, description = "Malformed query parameters (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_examples(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ExampleListQuery>,
) -> Result<Json<ExampleListResponse>, AppError> {
    let (page, limit) = normalize_page_params(query.page, query.limit);
    let offset = (page - 1) * limit;

    let (items, total_count) = ExampleStore::new(&state.db).list(offset, limit).await?;

    Ok(Json(ExampleListResponse {
        examples: items.into_iter().map(ExampleResponse::from).collect(),
        pagination: Pagination::new(page, limit, total_count),
    }))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Examples",
    operation_id = "createExample",
    summary = "Create a new example",
    description = "Creates an example. `title` and `content` are required; `description` defaults to null and `metadata` to `{}`.",
    request_body = ExampleRequest,
    responses(
        (status = 201, description = "Example created", body = ExampleResponse),
        (status = 400, description = "Title or content missing (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn create_example(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ExampleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let fields = validate_example_request(payload)?;

    let model = ExampleStore::new(&state.db).create(fields).await?;
    tracing::debug!(id = %model.id, "Example created");

    Ok((StatusCode::CREATED, Json(ExampleResponse::from(model))))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Examples",
    operation_id = "getExample",
    summary = "Get an example by ID",
    params(("id" = String, Path, description = "Example ID")),
    responses(
        (status = 200, description = "Example details", body = ExampleResponse),
        (status = 404, description = "Example not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_example(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ExampleResponse>, AppError> {
    let model = find_example(&state.db, &id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Examples",
    operation_id = "replaceExample",
    summary = "Replace an existing example",
    description = "Replaces all mutable fields. `title` and `content` are required; an omitted `description` becomes null and an omitted `metadata` becomes `{}`.",
    params(("id" = String, Path, description = "Example ID")),
    request_body = ExampleRequest,
    responses(
        (status = 200, description = "Example replaced", body = ExampleResponse),
        (status = 400, description = "Title or content missing (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Example not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn replace_example(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<ExampleRequest>,
) -> Result<Json<ExampleResponse>, AppError> {
    let fields = validate_example_request(payload)?;

    let txn = state.db.begin().await?;
    let model = ExampleStore::new(&txn)
        .update(&id, fields)
        .await?
        .ok_or_else(example_not_found)?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    patch,
    path = "/{id}",
    tag = "Examples",
    operation_id = "updateExample",
    summary = "Partially update an example",
    description = "Updates only the supplied fields. An explicit null `description` clears it and a null `metadata` resets it to `{}`. An empty payload returns the current resource unchanged.",
    params(("id" = String, Path, description = "Example ID")),
    request_body = PatchExampleRequest,
    responses(
        (status = 200, description = "Example updated", body = ExampleResponse),
        (status = 400, description = "Blank title or content (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "Example not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_example(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<PatchExampleRequest>,
) -> Result<Json<ExampleResponse>, AppError> {
    validate_patch_example(&payload)?;

    let txn = state.db.begin().await?;
    let model = ExampleStore::new(&txn)
        .patch(&id, payload.into())
        .await?
        .ok_or_else(example_not_found)?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Examples",
    operation_id = "deleteExample",
    summary = "Delete an example by ID",
    params(("id" = String, Path, description = "Example ID")),
    responses(
        (status = 200, description = "Example deleted", body = MessageResponse),
        (status = 404, description = "Example not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_example(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    if !ExampleStore::new(&state.db).delete(&id).await? {
        return Err(example_not_found());
    }

    Ok(Json(MessageResponse {
        message: "Example deleted successfully".into(),
    }))
}

/// Find an example by ID or return 404.
pub(crate) async fn find_example<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> Result<example::Model, AppError> {
    ExampleStore::new(db)
        .get(id)
        .await?
        .ok_or_else(example_not_found)
}

fn example_not_found() -> AppError {
    AppError::NotFound(NOT_FOUND_MESSAGE.into())
}
