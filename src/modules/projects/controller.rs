use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use tollgate_core::{AppError, ErrorResponse};
use tollgate_models::{CreateProjectDto, CreateTaskDto, Project, Task, UpdateTaskDto};

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

use super::service::ProjectService;

/// Create a project owned by the caller
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = CreateProjectDto,
    responses(
        (status = 201, description = "Project created", body = Project),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    AuthUser(claim): AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateProjectDto>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let project = ProjectService::create_project(state.projects.as_ref(), &claim, dto).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// Delete a project and its tasks
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the project", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    AuthUser(claim): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ProjectService::delete_project(state.projects.as_ref(), &state.access, &claim, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List the tasks of a project
#[utoipa::path(
    get,
    path = "/api/projects/{id}/tasks",
    params(("id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 200, description = "Tasks, oldest first", body = Vec<Task>),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    tag = "Projects"
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = ProjectService::list_tasks(state.projects.as_ref(), id).await?;
    Ok(Json(tasks))
}

/// Add a task to a project the caller owns
#[utoipa::path(
    post,
    path = "/api/projects/{id}/tasks",
    params(("id" = Uuid, Path, description = "Project id")),
    request_body = CreateTaskDto,
    responses(
        (status = 201, description = "Task created", body = Task),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the project", body = ErrorResponse),
        (status = 404, description = "Project not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn create_task(
    State(state): State<AppState>,
    AuthUser(claim): AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<CreateTaskDto>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task =
        ProjectService::create_task(state.projects.as_ref(), &state.access, &claim, id, dto).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task in a project the caller owns
#[utoipa::path(
    patch,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    request_body = UpdateTaskDto,
    responses(
        (status = 200, description = "Task updated", body = Task),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the task's project", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn update_task(
    State(state): State<AppState>,
    AuthUser(claim): AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(changes): ValidatedJson<UpdateTaskDto>,
) -> Result<Json<Task>, AppError> {
    let task =
        ProjectService::update_task(state.projects.as_ref(), &state.access, &claim, id, changes)
            .await?;
    Ok(Json(task))
}

/// Delete a task in a project the caller owns
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = Uuid, Path, description = "Task id")),
    responses(
        (status = 204, description = "Task deleted"),
        (status = 401, description = "Missing, invalid or expired token", body = ErrorResponse),
        (status = 403, description = "Caller does not own the task's project", body = ErrorResponse),
        (status = 404, description = "Task not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Projects"
)]
pub async fn delete_task(
    State(state): State<AppState>,
    AuthUser(claim): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    ProjectService::delete_task(state.projects.as_ref(), &state.access, &claim, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
