//! In-process store used by tests and local runs without PostgreSQL.
//!
//! Every operation takes the lock once, so check-and-insert sequences are
//! atomic with respect to concurrent callers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use tollgate_models::{
    Course, Identity, NewCourse, NewIdentity, NewProject, NewTask, Project, ResourceKind, Task,
    UpdateCourseDto, UpdateTaskDto,
};

use crate::store::{CourseStore, IdentityStore, OwnershipStore, ProjectStore, StoreError};

#[derive(Debug, Default)]
struct Tables {
    identities: HashMap<Uuid, Identity>,
    email_index: HashMap<String, Uuid>,
    courses: HashMap<Uuid, Course>,
    projects: HashMap<Uuid, Project>,
    tasks: HashMap<Uuid, Task>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(())
    }

    pub async fn identity_count(&self) -> usize {
        self.tables.read().await.identities.len()
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn find_identity_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .email_index
            .get(email)
            .and_then(|id| tables.identities.get(id))
            .cloned())
    }

    async fn create_identity(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;

        if tables.email_index.contains_key(&identity.email) {
            return Err(StoreError::Conflict("email"));
        }

        let created = Identity {
            id: Uuid::new_v4(),
            email: identity.email,
            name: identity.name,
            role: identity.role,
            password_hash: identity.password_hash,
            created_at: Utc::now(),
        };
        tables.email_index.insert(created.email.clone(), created.id);
        tables.identities.insert(created.id, created.clone());

        Ok(created)
    }
}

#[async_trait]
impl OwnershipStore for MemoryStore {
    async fn find_resource_owner_id(
        &self,
        kind: ResourceKind,
        id: Uuid,
    ) -> Result<Option<Uuid>, StoreError> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let owner = match kind {
            ResourceKind::Course => tables.courses.get(&id).map(|c| c.instructor_id),
            ResourceKind::Project => tables.projects.get(&id).map(|p| p.user_id),
            ResourceKind::Task => tables
                .tasks
                .get(&id)
                .and_then(|task| tables.projects.get(&task.project_id))
                .map(|p| p.user_id),
        };
        Ok(owner)
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list_courses(&self) -> Result<Vec<Course>, StoreError> {
        self.check_available()?;
        let mut courses: Vec<Course> = self.tables.read().await.courses.values().cloned().collect();
        courses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(courses)
    }

    async fn create_course(&self, course: NewCourse) -> Result<Course, StoreError> {
        self.check_available()?;
        let created = Course {
            id: Uuid::new_v4(),
            title: course.title,
            description: course.description,
            price: course.price,
            instructor_id: course.instructor_id,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .courses
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_course(
        &self,
        id: Uuid,
        changes: UpdateCourseDto,
    ) -> Result<Option<Course>, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let Some(course) = tables.courses.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            course.title = title;
        }
        if let Some(description) = changes.description {
            course.description = Some(description);
        }
        if let Some(price) = changes.price {
            course.price = price;
        }

        Ok(Some(course.clone()))
    }

    async fn delete_course(&self, id: Uuid) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.tables.write().await.courses.remove(&id).is_some())
    }
}

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create_project(&self, project: NewProject) -> Result<Project, StoreError> {
        self.check_available()?;
        let created = Project {
            id: Uuid::new_v4(),
            title: project.title,
            description: project.description,
            user_id: project.user_id,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .projects
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_project(&self, id: Uuid) -> Result<Option<Project>, StoreError> {
        self.check_available()?;
        Ok(self.tables.read().await.projects.get(&id).cloned())
    }

    async fn delete_project(&self, id: Uuid) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.projects.remove(&id).is_none() {
            return Ok(false);
        }
        tables.tasks.retain(|_, task| task.project_id != id);
        Ok(true)
    }

    async fn list_tasks(&self, project_id: Uuid) -> Result<Vec<Task>, StoreError> {
        self.check_available()?;
        let mut tasks: Vec<Task> = self
            .tables
            .read()
            .await
            .tasks
            .values()
            .filter(|task| task.project_id == project_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(tasks)
    }

    async fn create_task(&self, task: NewTask) -> Result<Option<Task>, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if !tables.projects.contains_key(&task.project_id) {
            return Ok(None);
        }

        let created = Task {
            id: Uuid::new_v4(),
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            project_id: task.project_id,
            created_at: Utc::now(),
        };
        tables.tasks.insert(created.id, created.clone());
        Ok(Some(created))
    }

    async fn update_task(
        &self,
        id: Uuid,
        changes: UpdateTaskDto,
    ) -> Result<Option<Task>, StoreError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let Some(task) = tables.tasks.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = changes.title {
            task.title = title;
        }
        if let Some(description) = changes.description {
            task.description = Some(description);
        }
        if let Some(status) = changes.status {
            task.status = status;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }

        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: Uuid) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.tables.write().await.tasks.remove(&id).is_some())
    }
}
