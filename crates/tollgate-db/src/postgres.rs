//! PostgreSQL-backed store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use tollgate_models::{
    Course, Identity, NewCourse, NewIdentity, NewProject, NewTask, Project, ResourceKind, Task,
    UpdateCourseDto, UpdateTaskDto,
};

use crate::store::{CourseStore, IdentityStore, OwnershipStore, ProjectStore, StoreError};

const IDENTITY_COLUMNS: &str = "id, email, name, role, password_hash, created_at";
const COURSE_COLUMNS: &str = "id, title, description, price, instructor_id, created_at";
const PROJECT_COLUMNS: &str = "id, title, description, user_id, created_at";
const TASK_COLUMNS: &str = "id, title, description, status, priority, project_id, created_at";

/// Connects to PostgreSQL and runs pending migrations.
///
/// Called once during startup; the returned pool is cheaply cloneable.
pub async fn init_db_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    sqlx::migrate!("../../migrations").run(&pool).await?;

    Ok(pool)
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl IdentityStore for PgStore {
    #[instrument(skip(self))]
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let identity = sqlx::query_as::<_, Identity>(&format!(
            "SELECT {IDENTITY_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(identity)
    }

    #[instrument(skip(self, identity), fields(email = %identity.email))]
    async fn create_identity(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        // The unique index on email makes this a single conditional write.
        let created = sqlx::query_as::<_, Identity>(&format!(
            "INSERT INTO users (email, name, role, password_hash)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (email) DO NOTHING
             RETURNING {IDENTITY_COLUMNS}"
        ))
        .bind(&identity.email)
        .bind(&identity.name)
        .bind(identity.role)
        .bind(&identity.password_hash)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "email"))?;

        created.ok_or(StoreError::Conflict("email"))
    }
}

#[async_trait]
impl OwnershipStore for PgStore {
    #[instrument(skip(self))]
    async fn find_resource_owner_id(
        &self,
        kind: ResourceKind,
        id: Uuid,
    ) -> Result<Option<Uuid>, StoreError> {
        let sql = match kind {
            ResourceKind::Course => "SELECT instructor_id FROM courses WHERE id = $1",
            ResourceKind::Project => "SELECT user_id FROM projects WHERE id = $1",
            ResourceKind::Task => {
                "SELECT p.user_id FROM tasks t JOIN projects p ON p.id = t.project_id WHERE t.id = $1"
            }
        };

        let owner = sqlx::query_scalar::<_, Uuid>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(owner)
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(courses)
    }

    #[instrument(skip(self, course), fields(instructor_id = %course.instructor_id))]
    async fn create_course(&self, course: NewCourse) -> Result<Course, StoreError> {
        let created = sqlx::query_as::<_, Course>(&format!(
            "INSERT INTO courses (title, description, price, instructor_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(&course.title)
        .bind(&course.description)
        .bind(course.price)
        .bind(course.instructor_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    #[instrument(skip(self, changes))]
    async fn update_course(
        &self,
        id: Uuid,
        changes: UpdateCourseDto,
    ) -> Result<Option<Course>, StoreError> {
        let updated = sqlx::query_as::<_, Course>(&format!(
            "UPDATE courses
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 price = COALESCE($4, price)
             WHERE id = $1
             RETURNING {COURSE_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_course(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ProjectStore for PgStore {
    #[instrument(skip(self, project), fields(user_id = %project.user_id))]
    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError> {
        let created = sqlx::query_as::<_, Project>(&format!(
            "INSERT INTO projects (title, description, user_id)
             VALUES ($1, $2, $3)
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        let project = sqlx::query_as::<_, Project>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(project)
    }

    #[instrument(skip(self))]
    async fn delete_project(&self, id: Uuid) -> Result<bool, StoreError> {
        // Tasks go with it through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_tasks(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = $1 ORDER BY created_at"
        ))
        .bind(project_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    #[instrument(skip(self, task), fields(project_id = %task.project_id))]
    async fn create_task(&self, task: NewTask) -> Result<Option<Task>, StoreError> {
        // Selecting from projects turns a vanished parent into zero rows
        // instead of a foreign key violation.
        let created = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (title, description, status, priority, project_id)
             SELECT $1, $2, $3, $4, id FROM projects WHERE id = $5
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.status)
        .bind(task.priority)
        .bind(task.project_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(created)
    }

    #[instrument(skip(self, changes))]
    async fn update_task(
        &self,
        id: Uuid,
        changes: UpdateTaskDto,
    ) -> Result<Option<Task>, StoreError> {
        let updated = sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 status = COALESCE($4, status),
                 priority = COALESCE($5, priority)
             WHERE id = $1
             RETURNING {TASK_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.status)
        .bind(changes.priority)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete_task(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
