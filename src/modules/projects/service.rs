use tracing::{info, instrument};
use uuid::Uuid;

use tollgate_auth::SessionClaim;
use tollgate_core::AppError;
use tollgate_db::ProjectStore;
use tollgate_models::{
    CreateProjectDto, CreateTaskDto, NewProject, NewTask, Project, ResourceKind, Task,
    UpdateTaskDto,
};

use crate::utils::auth_helpers::AccessGuard;

/// Projects and their tasks. Adding a task or deleting a project needs
/// ownership of the project; changing a task needs ownership of the project
/// it belongs to.
pub struct ProjectService;

impl ProjectService {
    #[instrument(skip(store, claim, dto), fields(user_id = %claim.sub))]
    pub async fn create_project(
        store: &dyn ProjectStore,
        claim: &SessionClaim,
        dto: CreateProjectDto,
    ) -> Result<Project, AppError> {
        let project = store
            .create_project(NewProject::from_dto(dto, claim.sub))
            .await
            .map_err(AppError::internal)?;

        info!(project_id = %project.id, "Project created");
        Ok(project)
    }

    #[instrument(skip(store, guard, claim), fields(identity_id = %claim.sub))]
    pub async fn delete_project(
        store: &dyn ProjectStore,
        guard: &AccessGuard,
        claim: &SessionClaim,
        id: Uuid,
    ) -> Result<(), AppError> {
        guard
            .ensure_can_mutate(claim, ResourceKind::Project, id)
            .await?;

        if !store.delete_project(id).await.map_err(AppError::internal)? {
            return Err(AppError::not_found("Project not found"));
        }

        info!(project_id = %id, "Project deleted");
        Ok(())
    }

    pub async fn list_tasks(
        store: &dyn ProjectStore,
        project_id: Uuid,
    ) -> Result<Vec<Task>, AppError> {
        let project = store
            .find_project(project_id)
            .await
            .map_err(AppError::internal)?;
        if project.is_none() {
            return Err(AppError::not_found("Project not found"));
        }

        store.list_tasks(project_id).await.map_err(AppError::internal)
    }

    #[instrument(skip(store, guard, claim, dto), fields(identity_id = %claim.sub))]
    pub async fn create_task(
        store: &dyn ProjectStore,
        guard: &AccessGuard,
        claim: &SessionClaim,
        project_id: Uuid,
        dto: CreateTaskDto,
    ) -> Result<Task, AppError> {
        guard
            .ensure_can_mutate(claim, ResourceKind::Project, project_id)
            .await?;

        let task = store
            .create_task(NewTask::from_dto(dto, project_id))
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        info!(task_id = %task.id, %project_id, "Task created");
        Ok(task)
    }

    #[instrument(skip(store, guard, claim, changes), fields(identity_id = %claim.sub))]
    pub async fn update_task(
        store: &dyn ProjectStore,
        guard: &AccessGuard,
        claim: &SessionClaim,
        id: Uuid,
        changes: UpdateTaskDto,
    ) -> Result<Task, AppError> {
        guard.ensure_can_mutate(claim, ResourceKind::Task, id).await?;

        store
            .update_task(id, changes)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found("Task not found"))
    }

    #[instrument(skip(store, guard, claim), fields(identity_id = %claim.sub))]
    pub async fn delete_task(
        store: &dyn ProjectStore,
        guard: &AccessGuard,
        claim: &SessionClaim,
        id: Uuid,
    ) -> Result<(), AppError> {
        guard.ensure_can_mutate(claim, ResourceKind::Task, id).await?;

        if !store.delete_task(id).await.map_err(AppError::internal)? {
            return Err(AppError::not_found("Task not found"));
        }

        info!(task_id = %id, "Task deleted");
        Ok(())
    }
}
