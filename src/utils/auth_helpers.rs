//! Store-backed authorization.
//!
//! [`AccessGuard`] is the single place mutation handlers go through before
//! touching the store. It resolves the resource owner first, so a missing
//! resource is reported as not found before ownership is considered, and it
//! delegates the actual rule to [`tollgate_auth::access`].

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use tollgate_auth::{AccessDecision, SessionClaim, access};
use tollgate_core::AppError;
use tollgate_db::{OwnershipStore, StoreError};
use tollgate_models::{ResourceKind, Role};
use tollgate_observability::track_access_denied;

#[derive(Clone)]
pub struct AccessGuard {
    ownership: Arc<dyn OwnershipStore>,
}

impl AccessGuard {
    pub fn new(ownership: Arc<dyn OwnershipStore>) -> Self {
        Self { ownership }
    }

    /// Decides whether `claim` may mutate the resource `(kind, id)`.
    pub async fn authorize_mutation(
        &self,
        claim: &SessionClaim,
        kind: ResourceKind,
        id: Uuid,
    ) -> Result<AccessDecision, StoreError> {
        let owner = self.ownership.find_resource_owner_id(kind, id).await?;
        Ok(access::decide_mutation(claim, owner))
    }

    pub fn authorize_role_action(&self, claim: &SessionClaim, required: Role) -> AccessDecision {
        access::decide_role_action(claim, required)
    }

    /// [`authorize_mutation`](Self::authorize_mutation) mapped to HTTP outcomes:
    /// 404 for a missing resource, 403 for someone else's.
    pub async fn ensure_can_mutate(
        &self,
        claim: &SessionClaim,
        kind: ResourceKind,
        id: Uuid,
    ) -> Result<(), AppError> {
        let decision = self
            .authorize_mutation(claim, kind, id)
            .await
            .map_err(AppError::internal)?;

        match decision {
            AccessDecision::Allow => {
                debug!(identity_id = %claim.sub, %kind, resource_id = %id, "Mutation allowed");
                Ok(())
            }
            AccessDecision::NotFound => {
                track_access_denied("not_found");
                Err(AppError::not_found(format!("{} not found", capitalize(kind.as_str()))))
            }
            AccessDecision::Deny => {
                track_access_denied("deny");
                warn!(identity_id = %claim.sub, %kind, resource_id = %id, "Mutation denied");
                Err(AppError::forbidden(format!("You do not own this {kind}")))
            }
        }
    }

    pub fn ensure_role(&self, claim: &SessionClaim, required: Role) -> Result<(), AppError> {
        if self.authorize_role_action(claim, required).is_allowed() {
            return Ok(());
        }

        track_access_denied("deny");
        warn!(identity_id = %claim.sub, required = %required, "Role action denied");
        Err(AppError::forbidden(format!(
            "Access denied. Required role: {required}"
        )))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use tollgate_db::{MemoryStore, ProjectStore};
    use tollgate_models::{NewProject, NewTask};

    fn claim(sub: Uuid, role: Option<Role>) -> SessionClaim {
        SessionClaim {
            sub,
            role,
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[tokio::test]
    async fn test_task_ownership_follows_project() {
        let store = Arc::new(MemoryStore::new());
        let owner = Uuid::new_v4();
        let project = store
            .create_project(NewProject {
                title: "Launch".to_string(),
                description: None,
                user_id: owner,
            })
            .await
            .unwrap();
        let task = store
            .create_task(NewTask {
                title: "Write docs".to_string(),
                description: None,
                status: Default::default(),
                priority: Default::default(),
                project_id: project.id,
            })
            .await
            .unwrap()
            .unwrap()
            .id;
        let guard = AccessGuard::new(store);

        let decision = guard
            .authorize_mutation(&claim(owner, None), ResourceKind::Task, task)
            .await
            .unwrap();
        assert_eq!(decision, AccessDecision::Allow);

        let decision = guard
            .authorize_mutation(&claim(Uuid::new_v4(), None), ResourceKind::Task, task)
            .await
            .unwrap();
        assert_eq!(decision, AccessDecision::Deny);
    }

    #[tokio::test]
    async fn test_missing_resource_maps_to_404_before_ownership() {
        let guard = AccessGuard::new(Arc::new(MemoryStore::new()));

        let err = guard
            .ensure_can_mutate(
                &claim(Uuid::new_v4(), Some(Role::Admin)),
                ResourceKind::Project,
                Uuid::new_v4(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Project not found");
    }

    #[tokio::test]
    async fn test_store_failure_is_internal() {
        let store = Arc::new(MemoryStore::new());
        store.set_unavailable(true);
        let guard = AccessGuard::new(store);

        let err = guard
            .ensure_can_mutate(&claim(Uuid::new_v4(), None), ResourceKind::Course, Uuid::new_v4())
            .await
            .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_ensure_role() {
        let guard = AccessGuard::new(Arc::new(MemoryStore::new()));
        let student = claim(Uuid::new_v4(), Some(Role::Student));

        assert!(guard.ensure_role(&student, Role::Student).is_ok());
        assert_eq!(
            guard.ensure_role(&student, Role::Instructor).unwrap_err().status,
            StatusCode::FORBIDDEN
        );
    }
}
