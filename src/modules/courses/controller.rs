use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use tollgate_core::{AppError, ErrorResponse};
use tollgate_models::{Course, CreateCourseDto, UpdateCourseDto};

use crate::middleware::auth::AuthUser;
use crate::middleware::role::RequireInstructor;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::CourseService;

/// List all courses
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "All courses, newest first", body = Vec<Course>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = CourseService::list(state.courses.as_ref()).await?;
    Ok(Json(courses))
}

/// Create a course owned by the calling instructor
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller is not an instructor", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    RequireInstructor(auth_user): RequireInstructor,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create(state.courses.as_ref(), auth_user.claim(), dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

/// Update a course the caller owns
#[utoipa::path(
    patch,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    AuthUser(claim): AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(changes): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course =
        CourseService::update(state.courses.as_ref(), &state.access, &claim, id, changes).await?;
    Ok(Json(course))
}

/// Delete a course the caller owns
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(("id" = Uuid, Path, description = "Course id")),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the course", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    AuthUser(claim): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    CourseService::delete(state.courses.as_ref(), &state.access, &claim, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
