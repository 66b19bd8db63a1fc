use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use models::{Address, NewStudent, Student, StudentSummary};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::{errors::JsonApiError, routes::ServerState};

/// Raw list filters. Kept as strings so that `?age=` means "no filter"
/// rather than a parse failure.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Exact match on `address.country`; empty or missing applies no filter.
    pub country: Option<String>,
    /// Minimum age (inclusive); empty or missing applies no filter.
    pub age: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedOutput { pub id: String }

#[derive(Debug, Serialize)]
pub struct StudentOutput {
    pub id: String,
    pub name: String,
    pub age: i32,
    pub address: Address,
}

impl From<Student> for StudentOutput {
    fn from(s: Student) -> Self {
        Self { id: s.id.to_hex(), name: s.name, age: s.age, address: s.address }
    }
}

#[utoipa::path(
    post, path = "/students", tag = "students",
    request_body = crate::openapi::CreateStudentDoc,
    responses(
        (status = 201, description = "Created; returns only the new id", body = crate::openapi::CreatedDoc),
        (status = 422, description = "Missing or invalid fields")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedOutput>), JsonApiError> {
    let Json(input) = payload.map_err(|e| JsonApiError::validation(e.body_text()))?;
    let id = state.students.create(input).await?;
    info!(id = %id, "created student");
    Ok((StatusCode::CREATED, Json(CreatedOutput { id: id.to_hex() })))
}

#[utoipa::path(
    get, path = "/students", tag = "students",
    params(ListQuery),
    responses(
        (status = 200, description = "Matching students as name/age pairs", body = [crate::openapi::StudentSummaryDoc]),
        (status = 422, description = "Age is not an integer")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<StudentSummary>>, JsonApiError> {
    let list = state.students.list(q.country.as_deref(), q.age.as_deref()).await?;
    info!(count = list.len(), "list students");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/students/{id}", tag = "students",
    params(("id" = String, Path, description = "Student id returned by create")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::StudentDoc),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Malformed id")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<StudentOutput>, JsonApiError> {
    let student = state.students.get(&id).await?;
    Ok(Json(student.into()))
}

#[utoipa::path(
    patch, path = "/students/{id}", tag = "students",
    params(("id" = String, Path, description = "Student id returned by create")),
    request_body = crate::openapi::UpdateStudentDoc,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "No data provided for update"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Unknown field, wrong type or malformed id")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, JsonApiError> {
    let fields = parse_update_body(&body)?;
    state.students.update(&id, fields).await?;
    info!(id = %id, "updated student");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete, path = "/students/{id}", tag = "students",
    params(("id" = String, Path, description = "Student id returned by create")),
    responses(
        (status = 200, description = "Deleted; empty object body"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Malformed id")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, JsonApiError> {
    state.students.delete(&id).await?;
    info!(id = %id, "deleted student");
    Ok(Json(Value::Object(Map::new())))
}

/// A missing body counts as an empty mapping; anything other than a JSON
/// object is a validation error.
fn parse_update_body(body: &[u8]) -> Result<Map<String, Value>, JsonApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(JsonApiError::validation("update body must be a JSON object")),
        Err(e) => Err(JsonApiError::validation(format!("invalid JSON body: {e}"))),
    }
}
