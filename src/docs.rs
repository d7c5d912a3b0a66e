use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use tollgate_core::ErrorResponse;
use tollgate_models::{
    Course, CreateCourseDto, CreateProjectDto, CreateTaskDto, LoginRequest, LoginResponse, Project,
    Role, SessionResponse, SignupRequest, SignupResponse, Task, TaskPriority, TaskStatus,
    UpdateCourseDto, UpdateTaskDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::me,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::projects::controller::create_project,
        crate::modules::projects::controller::delete_project,
        crate::modules::projects::controller::list_tasks,
        crate::modules::projects::controller::create_task,
        crate::modules::projects::controller::update_task,
        crate::modules::projects::controller::delete_task,
    ),
    components(
        schemas(
            Role,
            SignupRequest,
            SignupResponse,
            LoginRequest,
            LoginResponse,
            SessionResponse,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            Project,
            Task,
            TaskStatus,
            TaskPriority,
            CreateProjectDto,
            CreateTaskDto,
            UpdateTaskDto,
            ErrorResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "Authentication", description = "Signup, login and session endpoints"),
        (name = "Courses", description = "Instructor-owned courses"),
        (name = "Projects", description = "Projects and the tasks they own")
    ),
    info(
        title = "Tollgate API",
        version = "0.1.0",
        description = "Authentication and ownership-based authorization over a relational store.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

pub(crate) const BEARER_SCHEME: &str = "bearer_auth";

/// Registers the JWT bearer scheme referenced by protected operations.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let scheme = SecurityScheme::Http(
            HttpBuilder::new()
                .scheme(HttpAuthScheme::Bearer)
                .bearer_format("JWT")
                .description(Some("Session token returned by /api/auth/login"))
                .build(),
        );
        openapi
            .components
            .get_or_insert_with(Default::default)
            .add_security_scheme(BEARER_SCHEME, scheme);
    }
}
