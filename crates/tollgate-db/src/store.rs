use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use tollgate_models::{
    Course, Identity, NewCourse, NewIdentity, NewProject, NewTask, Project, ResourceKind, Task,
    UpdateCourseDto, UpdateTaskDto,
};

/// Postgres SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness rule rejected the write. Carries the violated field.
    #[error("{0} already exists")]
    Conflict(&'static str),
    #[error("store is unavailable")]
    Unavailable,
    #[error("database error")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn from_sqlx(e: sqlx::Error, unique_field: &'static str) -> Self {
        if let sqlx::Error::Database(dbe) = &e {
            if dbe.code().as_deref() == Some(UNIQUE_VIOLATION) {
                return StoreError::Conflict(unique_field);
            }
        }
        StoreError::Database(e)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Database(e)
    }
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Exact, case-sensitive email match.
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    /// Atomically inserts the identity, failing with [`StoreError::Conflict`]
    /// when the email is already taken.
    async fn create_identity(&self, identity: NewIdentity) -> Result<Identity, StoreError>;
}

#[async_trait]
pub trait OwnershipStore: Send + Sync {
    /// Owning identity of a resource, or `None` when the resource does not exist.
    async fn find_resource_owner_id(
        &self,
        kind: ResourceKind,
        id: Uuid,
    ) -> Result<Option<Uuid>, StoreError>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError>;

    async fn create_course(&self, course: NewCourse) -> Result<Course, StoreError>;

    /// `None` when the course vanished between the ownership check and the write.
    async fn update_course(
        &self,
        id: Uuid,
        changes: UpdateCourseDto,
    ) -> Result<Option<Course>, StoreError>;

    async fn delete_course(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ProjectStore: Send + Sync {
    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError>;

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError>;

    /// Removes the project together with its tasks.
    async fn delete_project(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Tasks of one project, oldest first.
    async fn list_tasks(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError>;

    /// `None` when the parent project no longer exists.
    async fn create_task(&self, task: NewTask) -> Result<Option<Task>, StoreError>;

    async fn update_task(
        &self,
        id: Uuid,
        changes: UpdateTaskDto,
    ) -> Result<Option<Task>, StoreError>;

    async fn delete_task(&self, id: Uuid) -> Result<bool, StoreError>;
}
