use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header::LOCATION, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    error::{ApiError, ValidationError},
    state::AppState,
    students::{
        dto::{MessageResponse, StudentPayload, StudentResponse},
        services::validate_payload,
    },
};

pub fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students).post(create_student))
        .route(
            "/students/:id",
            get(get_student).put(update_student).delete(delete_student),
        )
}

// A non-integer id can never match a row.
fn student_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    id.map(|Path(id)| id).map_err(|e| {
        debug!(error = %e, "unparsable student id");
        ApiError::NotFound
    })
}

fn body(payload: Result<Json<StudentPayload>, JsonRejection>) -> Result<StudentPayload, ValidationError> {
    payload.map(|Json(p)| p).map_err(|e| {
        warn!(error = %e, "malformed student body");
        ValidationError::MalformedBody(e.body_text())
    })
}

#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let students = state.store.list().await.map_err(|e| {
        error!(error = %e, "list students failed");
        ApiError::internal(e)
    })?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<StudentResponse>, ApiError> {
    let id = student_id(id)?;
    match state.store.get(id).await {
        Ok(Some(student)) => Ok(Json(student.into())),
        Ok(None) => Err(ApiError::NotFound),
        Err(e) => {
            error!(error = %e, id, "get student failed");
            Err(ApiError::internal(e))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap, Json<StudentResponse>), ApiError> {
    let new = validate_payload(body(payload)?)?;

    let student = state.store.insert(new).await.map_err(|e| {
        error!(error = %e, "insert student failed");
        ApiError::write_rejected(e)
    })?;
    info!(student_id = student.id, "student created");

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/students/{}", student.id)) {
        headers.insert(LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(student.into())))
}

#[instrument(skip(state, payload))]
pub async fn update_student(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<StudentPayload>, JsonRejection>,
) -> Result<Json<StudentResponse>, ApiError> {
    let id = student_id(id)?;

    let fields = match body(payload).and_then(validate_payload) {
        Ok(fields) => fields,
        Err(invalid) => {
            // an unknown id is reported before a bad body
            let existing = state.store.get(id).await.map_err(ApiError::write_rejected)?;
            return Err(match existing {
                Some(_) => invalid.into(),
                None => ApiError::NotFound,
            });
        }
    };

    let student = state
        .store
        .update(id, fields)
        .await
        .map_err(|e| {
            error!(error = %e, id, "update student failed");
            ApiError::write_rejected(e)
        })?
        .ok_or(ApiError::NotFound)?;

    info!(student_id = student.id, "student updated");
    Ok(Json(student.into()))
}

#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = student_id(id)?;
    let deleted = state.store.delete(id).await.map_err(|e| {
        error!(error = %e, id, "delete student failed");
        ApiError::internal(e)
    })?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    info!(student_id = id, "student deleted");
    Ok(Json(MessageResponse {
        message: "Student deleted successfully",
    }))
}
