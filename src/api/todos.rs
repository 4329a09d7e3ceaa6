// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Todo CRUD handlers.
//!
//! The list is shared: authentication gates access, but todos carry no
//! owner. Titles are trimmed on write and must not be blank; blank titles
//! produce a field-level validation body. Unknown ids produce an empty 404.

use axum::{
    extract::{Path, State},
    http::{header::LOCATION, HeaderName, StatusCode},
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateTodoRequest, Todo, UpdateTodoRequest},
    state::AppState,
};

fn validated_title(raw: &str) -> Result<&str, ApiError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ApiError::validation("title", "Title is required."));
    }
    Ok(title)
}

#[utoipa::path(
    get,
    path = "/api/v1/todos",
    tag = "Todos",
    responses((status = 200, body = [Todo]), (status = 401))
)]
pub async fn list_todos(
    _auth: Auth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    Ok(Json(state.store.list()?))
}

#[utoipa::path(
    get,
    path = "/api/v1/todos/{id}",
    params(("id" = u64, Path, description = "Todo identifier")),
    tag = "Todos",
    responses((status = 200, body = Todo), (status = 404), (status = 401))
)]
pub async fn get_todo(
    _auth: Auth,
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<Json<Todo>, ApiError> {
    Ok(Json(state.store.get(id)?))
}

#[utoipa::path(
    post,
    path = "/api/v1/todos",
    request_body = CreateTodoRequest,
    tag = "Todos",
    responses((status = 201, body = Todo), (status = 400), (status = 401))
)]
pub async fn create_todo(
    _auth: Auth,
    State(state): State<AppState>,
    Json(request): Json<CreateTodoRequest>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Todo>), ApiError> {
    let title = validated_title(&request.title)?;
    let todo = state.store.create(title)?;

    tracing::info!(id = todo.id, "todo created");
    let location = format!("/api/v1/todos/{}", todo.id);
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(todo)))
}

#[utoipa::path(
    put,
    path = "/api/v1/todos/{id}",
    params(("id" = u64, Path, description = "Todo identifier")),
    request_body = UpdateTodoRequest,
    tag = "Todos",
    responses((status = 200, body = Todo), (status = 400), (status = 404), (status = 401))
)]
pub async fn update_todo(
    _auth: Auth,
    Path(id): Path<u64>,
    State(state): State<AppState>,
    Json(request): Json<UpdateTodoRequest>,
) -> Result<Json<Todo>, ApiError> {
    let title = validated_title(&request.title)?;
    let todo = state.store.update(id, title, request.is_completed)?;
    Ok(Json(todo))
}

#[utoipa::path(
    delete,
    path = "/api/v1/todos/{id}",
    params(("id" = u64, Path, description = "Todo identifier")),
    tag = "Todos",
    responses((status = 204), (status = 404), (status = 401))
)]
pub async fn delete_todo(
    _auth: Auth,
    Path(id): Path<u64>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id)?;
    tracing::info!(id, "todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
