use axum::{
    extract::{rejection::{JsonRejection, PathRejection, QueryRejection}, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use common::types::ApiResponse;
use models::student::{self, Model as Student};
use service::student::domain::{SearchFilter, StudentInput};

use crate::errors::JsonApiError;
use crate::state::ServerState;

type JsonResult<T> = Result<Json<ApiResponse<T>>, JsonApiError>;
type CreatedResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), JsonApiError>;

/// Extract a positive path id; malformed or non-positive ids are a 400.
fn path_id(id: Result<Path<i32>, PathRejection>) -> Result<i32, JsonApiError> {
    let Path(id) = id?;
    student::validate_id(id).map_err(|e| JsonApiError::bad_request(e.to_string()))?;
    Ok(id)
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, JsonApiError> {
    let Json(value) = payload?;
    Ok(value)
}

#[utoipa::path(
    get, path = "/api/std", tag = "students",
    responses(
        (status = 200, description = "All students", body = crate::openapi::StudentListEnvelopeDoc),
        (status = 500, description = "Store failure")
    )
)]
pub async fn list(State(state): State<ServerState>) -> JsonResult<Vec<Student>> {
    let all = state.students.get_all().await?;
    info!(count = all.len(), "list students");
    Ok(Json(ApiResponse::ok(format!("fetched {} students", all.len()), all)))
}

#[utoipa::path(
    get, path = "/api/std/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentEnvelopeDoc),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, id: Result<Path<i32>, PathRejection>) -> JsonResult<Student> {
    let id = path_id(id)?;
    let found = state.students.get_by_id(id).await?;
    Ok(Json(ApiResponse::ok("student found", found)))
}

#[utoipa::path(
    get, path = "/api/std/search", tag = "students",
    params(
        ("firstName" = Option<String>, Query, description = "Exact first name"),
        ("lastName" = Option<String>, Query, description = "Exact last name"),
        ("major" = Option<String>, Query, description = "Exact major")
    ),
    responses(
        (status = 200, description = "Matching students, possibly none", body = crate::openapi::StudentListEnvelopeDoc),
        (status = 400, description = "Malformed query string"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn search(State(state): State<ServerState>, filter: Result<Query<SearchFilter>, QueryRejection>) -> JsonResult<Vec<Student>> {
    let Query(filter) = filter?;
    let found = state.students.search(filter).await?;
    let message = if found.is_empty() {
        "no students match the given filters".to_string()
    } else {
        format!("found {} students", found.len())
    };
    Ok(Json(ApiResponse::ok(message, found)))
}

#[utoipa::path(
    post, path = "/api/std", tag = "students",
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::StudentEnvelopeDoc),
        (status = 400, description = "Invalid student data"),
        (status = 409, description = "Duplicate name"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create(State(state): State<ServerState>, payload: Result<Json<StudentInput>, JsonRejection>) -> CreatedResult<Student> {
    let input = body(payload)?;
    let created = state.students.create(input).await?;
    info!(id = created.id, "created student");
    Ok((StatusCode::CREATED, Json(ApiResponse::created("student created", created))))
}

#[utoipa::path(
    post, path = "/api/std/bulk", tag = "students",
    request_body = [crate::openapi::StudentInputDoc],
    responses(
        (status = 201, description = "All created", body = crate::openapi::StudentListEnvelopeDoc),
        (status = 400, description = "Empty or invalid list"),
        (status = 409, description = "One or more duplicate names; nothing stored"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn create_many(State(state): State<ServerState>, payload: Result<Json<Vec<StudentInput>>, JsonRejection>) -> CreatedResult<Vec<Student>> {
    let inputs = body(payload)?;
    if inputs.is_empty() {
        return Err(JsonApiError::bad_request("invalid student data: list must not be empty"));
    }
    let created = state.students.create_many(inputs).await?;
    info!(count = created.len(), "created students in bulk");
    Ok((StatusCode::CREATED, Json(ApiResponse::created(format!("{} students created", created.len()), created))))
}

#[utoipa::path(
    put, path = "/api/std/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    request_body = crate::openapi::StudentInputDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::StudentEnvelopeDoc),
        (status = 400, description = "Invalid id or data"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<StudentInput>, JsonRejection>,
) -> JsonResult<Student> {
    let id = path_id(id)?;
    let input = body(payload)?;
    let updated = state.students.update(id, input).await?;
    Ok(Json(ApiResponse::ok("student updated", updated)))
}

#[utoipa::path(
    delete, path = "/api/std/{id}", tag = "students",
    params(("id" = i32, Path, description = "Student ID")),
    responses(
        (status = 200, description = "Deleted; returns the removed record", body = crate::openapi::StudentEnvelopeDoc),
        (status = 400, description = "Invalid id"),
        (status = 404, description = "Not Found"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete(State(state): State<ServerState>, id: Result<Path<i32>, PathRejection>) -> JsonResult<Student> {
    let id = path_id(id)?;
    let deleted = state.students.delete(id).await?;
    Ok(Json(ApiResponse::ok("student deleted", deleted)))
}

#[utoipa::path(
    delete, path = "/api/std/all", tag = "students",
    responses(
        (status = 200, description = "All deleted; returns the removed records", body = crate::openapi::StudentListEnvelopeDoc),
        (status = 500, description = "Store failure")
    )
)]
pub async fn delete_all(State(state): State<ServerState>) -> JsonResult<Vec<Student>> {
    let removed = state.students.delete_all().await?;
    Ok(Json(ApiResponse::ok(format!("{} students deleted", removed.len()), removed)))
}
