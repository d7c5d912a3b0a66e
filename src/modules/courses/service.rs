use tracing::{info, instrument};
use uuid::Uuid;

use tollgate_auth::SessionClaim;
use tollgate_core::AppError;
use tollgate_db::CourseStore;
use tollgate_models::{Course, CreateCourseDto, NewCourse, ResourceKind, UpdateCourseDto};

use crate::utils::auth_helpers::AccessGuard;

/// Course operations. Every mutation of an existing course is authorized
/// through [`AccessGuard`] before the store is written.
pub struct CourseService;

impl CourseService {
    #[instrument(skip(store))]
    pub async fn list(store: &dyn CourseStore) -> Result<Vec<Course>, AppError> {
        store.list_courses().await.map_err(AppError::internal)
    }

    /// Creates a course owned by the caller. Role gating happens in the extractor.
    #[instrument(skip(store, claim, dto), fields(instructor_id = %claim.sub))]
    pub async fn create(
        store: &dyn CourseStore,
        claim: &SessionClaim,
        dto: CreateCourseDto,
    ) -> Result<Course, AppError> {
        let course = store
            .create_course(NewCourse::from_dto(dto, claim.sub))
            .await
            .map_err(AppError::internal)?;

        info!(course_id = %course.id, "Course created");
        Ok(course)
    }

    #[instrument(skip(store, guard, claim, changes), fields(identity_id = %claim.sub))]
    pub async fn update(
        store: &dyn CourseStore,
        guard: &AccessGuard,
        claim: &SessionClaim,
        id: Uuid,
        changes: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        guard
            .ensure_can_mutate(claim, ResourceKind::Course, id)
            .await?;

        store
            .update_course(id, changes)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found("Course not found"))
    }

    #[instrument(skip(store, guard, claim), fields(identity_id = %claim.sub))]
    pub async fn delete(
        store: &dyn CourseStore,
        guard: &AccessGuard,
        claim: &SessionClaim,
        id: Uuid,
    ) -> Result<(), AppError> {
        guard
            .ensure_can_mutate(claim, ResourceKind::Course, id)
            .await?;

        let deleted = store.delete_course(id).await.map_err(AppError::internal)?;
        if !deleted {
            return Err(AppError::not_found("Course not found"));
        }

        info!(course_id = %id, "Course deleted");
        Ok(())
    }
}
