//! # Tollgate Models
//!
//! Domain models and DTOs shared by the store, the auth core and the HTTP layer.
//!
//! - [`identity`]: registered accounts and their [`Role`]
//! - [`resources`]: owned resources and the [`ResourceKind`] used for ownership lookups
//! - [`projects`]: projects and the tasks nested under them
//! - [`auth`]: signup/login request and response bodies

pub mod auth;
pub mod identity;
pub mod projects;
pub mod resources;

// Re-export commonly used types at crate root for convenience
pub use auth::{LoginRequest, LoginResponse, SessionResponse, SignupRequest, SignupResponse};
pub use identity::{Identity, NewIdentity, Role};
pub use projects::{
    CreateProjectDto, CreateTaskDto, NewProject, NewTask, Project, Task, TaskPriority, TaskStatus,
    UpdateTaskDto,
};
pub use resources::{Course, CreateCourseDto, NewCourse, ResourceKind, UpdateCourseDto};
