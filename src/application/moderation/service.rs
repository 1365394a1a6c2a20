use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::moderation::entity::{
    ContentType, ContentVisibility, ModerationItem, ModerationStatus,
};
use crate::domain::moderation::errors::GovernanceError;
use crate::domain::moderation::repository::{ContentRepository, ModerationRepository};
use crate::domain::role::authority::ApprovalAuthority;
use crate::domain::shared::clock::Clock;
use crate::infrastructure::screening::ContentScreener;

use super::dto::{Actor, SubmitContentRequest};

/// Orchestrates the moderation workflow: submission, decision, status
/// resolution and the pending-queue count.
///
/// Every status change mirrors the denormalized visibility pair onto
/// the content document inside the same service call, so readers never
/// see a decided record with a stale flag. The service does not
/// serialize concurrent calls; two moderators racing on one record is
/// last-writer-wins at the store, accepted under the product's
/// single-moderator-per-city assumption.
pub struct ModerationService {
    moderation_repo: Arc<dyn ModerationRepository>,
    content_repo: Arc<dyn ContentRepository>,
    screener: Arc<dyn ContentScreener>,
    clock: Arc<dyn Clock>,
}

impl ModerationService {
    pub fn new(
        moderation_repo: Arc<dyn ModerationRepository>,
        content_repo: Arc<dyn ContentRepository>,
        screener: Arc<dyn ContentScreener>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        info!("Initializing ModerationService");
        Self {
            moderation_repo,
            content_repo,
            screener,
            clock,
        }
    }

    /// Hand content over for review.
    ///
    /// Runs the injected screener synchronously so `ai_flags` is
    /// populated at creation time, writes the pending record, then
    /// drops the content's visibility. Edited content re-enters through
    /// this same path: the fresh pending record supersedes any earlier
    /// decision and the content disappears from ordinary viewers until
    /// re-approved.
    ///
    /// # Errors
    /// - [`GovernanceError::Validation`] for an empty content id
    /// - [`GovernanceError::Unavailable`] when the actor has no active
    ///   city or the store cannot be reached
    #[instrument(skip(self, actor, request), fields(
        content_type = request.content_type.as_str(),
        content_id = %request.content_id,
        submitted_by = %actor.user_id,
    ))]
    pub async fn submit_for_moderation(
        &self,
        actor: &Actor,
        request: SubmitContentRequest,
    ) -> Result<ModerationItem, GovernanceError> {
        let content_id = request.content_id.trim();
        if content_id.is_empty() {
            return Err(GovernanceError::Validation(
                "content id must not be empty".to_string(),
            ));
        }
        let city_id = active_city(actor)?;

        let ai_flags = self
            .screener
            .screen(request.content_type, &request.content_data);
        if !ai_flags.is_empty() {
            info!(?ai_flags, "screening flagged submission for review");
        }

        let item = ModerationItem {
            id: Uuid::now_v7(),
            content_id: content_id.to_string(),
            content_type: request.content_type,
            content_data: request.content_data,
            status: ModerationStatus::Pending,
            submitted_by: actor.user_id.clone(),
            submitted_at: self.clock.now(),
            city_id,
            moderated_by: None,
            moderated_at: None,
            reason: None,
            ai_flags,
        };

        let created = self.moderation_repo.create(&item).await?;
        self.content_repo
            .apply_visibility(
                created.content_type,
                &created.content_id,
                &ContentVisibility::pending(),
            )
            .await?;

        info!(
            moderation_id = %created.id,
            collection = created.content_type.collection(),
            "content submitted for moderation"
        );
        Ok(created)
    }

    /// Approve a pending record and make the content visible.
    ///
    /// # Errors
    /// - [`GovernanceError::Unauthorized`] when the actor lacks approval
    ///   authority or the record belongs to another city
    /// - [`GovernanceError::NotFound`] when the id does not resolve
    /// - [`GovernanceError::Validation`] when the record is already
    ///   decided
    #[instrument(skip(self, actor), fields(moderation_id = %moderation_id, actor = %actor.user_id))]
    pub async fn approve_content(
        &self,
        actor: &Actor,
        moderation_id: Uuid,
    ) -> Result<ModerationItem, GovernanceError> {
        let item = self.load_for_decision(actor, moderation_id).await?;

        let mut decided = item;
        decided.status = ModerationStatus::Approved;
        decided.moderated_by = Some(actor.user_id.clone());
        decided.moderated_at = Some(self.clock.now());

        let updated = self.moderation_repo.update(&decided).await?;
        self.content_repo
            .apply_visibility(
                updated.content_type,
                &updated.content_id,
                &ContentVisibility::approved(),
            )
            .await?;

        info!("content approved");
        Ok(updated)
    }

    /// Reject a pending record with a reason and keep the content
    /// hidden.
    ///
    /// # Errors
    /// Same as [`approve_content`](Self::approve_content), plus
    /// [`GovernanceError::Validation`] for a blank reason.
    #[instrument(skip(self, actor, reason), fields(moderation_id = %moderation_id, actor = %actor.user_id))]
    pub async fn reject_content(
        &self,
        actor: &Actor,
        moderation_id: Uuid,
        reason: &str,
    ) -> Result<ModerationItem, GovernanceError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(GovernanceError::Validation(
                "a rejection reason is required".to_string(),
            ));
        }

        let item = self.load_for_decision(actor, moderation_id).await?;

        let mut decided = item;
        decided.status = ModerationStatus::Rejected;
        decided.moderated_by = Some(actor.user_id.clone());
        decided.moderated_at = Some(self.clock.now());
        decided.reason = Some(reason.to_string());

        let updated = self.moderation_repo.update(&decided).await?;
        self.content_repo
            .apply_visibility(
                updated.content_type,
                &updated.content_id,
                &ContentVisibility::rejected(),
            )
            .await?;

        info!("content rejected");
        Ok(updated)
    }

    /// Status of the most recent moderation record for a content item
    /// in the actor's city.
    ///
    /// Returns `None` when no record exists, when the actor has no
    /// active city, or when the store is unreachable; store failures
    /// are logged and treated as "unknown", which the visibility gate
    /// renders fail-closed.
    pub async fn check_moderation_status(
        &self,
        actor: &Actor,
        content_type: ContentType,
        content_id: &str,
    ) -> Option<ModerationStatus> {
        let city_id = actor.city_id.as_deref()?;
        match self
            .moderation_repo
            .find_latest_for_content(content_type, content_id, city_id)
            .await
        {
            Ok(latest) => latest.map(|item| item.status),
            Err(err) => {
                warn!(%content_id, error = %err, "status check failed, treating as unknown");
                None
            }
        }
    }

    /// Live count of pending records in the actor's city, recomputed on
    /// demand for admin dashboards.
    ///
    /// # Errors
    /// [`GovernanceError::Unavailable`] when the actor has no active
    /// city or the store cannot be reached.
    pub async fn pending_moderation_count(&self, actor: &Actor) -> Result<u64, GovernanceError> {
        let city_id = active_city(actor)?;
        self.moderation_repo.count_pending(&city_id).await
    }

    /// Shared guard for approve/reject: authority, city scope, record
    /// existence and the terminal-state check, in that order. Nothing
    /// is mutated when any step fails.
    async fn load_for_decision(
        &self,
        actor: &Actor,
        moderation_id: Uuid,
    ) -> Result<ModerationItem, GovernanceError> {
        if !ApprovalAuthority::allows(actor.role) {
            warn!(role = actor.role.as_str(), "moderation decision denied");
            return Err(GovernanceError::Unauthorized(format!(
                "role '{}' may not moderate content",
                actor.role.as_str()
            )));
        }
        let city_id = active_city(actor)?;

        let item = self
            .moderation_repo
            .find_by_id(moderation_id)
            .await?
            .ok_or_else(|| {
                GovernanceError::NotFound(format!(
                    "moderation record {} does not exist",
                    moderation_id
                ))
            })?;

        if item.city_id != city_id {
            warn!(record_city = %item.city_id, actor_city = %city_id, "cross-city moderation denied");
            return Err(GovernanceError::Unauthorized(format!(
                "record belongs to city '{}', actor is scoped to '{}'",
                item.city_id, city_id
            )));
        }

        if item.status.is_terminal() {
            return Err(GovernanceError::Validation(format!(
                "record is already {}",
                item.status.as_str()
            )));
        }

        Ok(item)
    }
}

fn active_city(actor: &Actor) -> Result<String, GovernanceError> {
    actor
        .city_id
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .ok_or_else(|| GovernanceError::Unavailable("no active city selected".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::moderation::repository::{
        MockContentRepository, MockModerationRepository,
    };
    use crate::domain::role::Role;
    use crate::domain::shared::clock::SystemClock;
    use crate::infrastructure::screening::KeywordScreener;
    use chrono::Utc;

    fn service_with(
        moderation_repo: MockModerationRepository,
        content_repo: MockContentRepository,
    ) -> ModerationService {
        ModerationService::new(
            Arc::new(moderation_repo),
            Arc::new(content_repo),
            Arc::new(KeywordScreener::default()),
            Arc::new(SystemClock),
        )
    }

    fn pending_item(city: &str) -> ModerationItem {
        ModerationItem {
            id: Uuid::now_v7(),
            content_id: "event-1".to_string(),
            content_type: ContentType::Event,
            content_data: serde_json::json!({}),
            status: ModerationStatus::Pending,
            submitted_by: "user-1".to_string(),
            submitted_at: Utc::now(),
            city_id: city.to_string(),
            moderated_by: None,
            moderated_at: None,
            reason: None,
            ai_flags: vec![],
        }
    }

    #[tokio::test]
    async fn organiser_cannot_approve_and_nothing_is_touched() {
        // No expectations set: any store call would panic the mock.
        let service = service_with(
            MockModerationRepository::new(),
            MockContentRepository::new(),
        );
        let organiser = Actor::new("org-1", Role::Organiser, Some("vienna".to_string()));

        let err = service
            .approve_content(&organiser, Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, GovernanceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn cross_city_approval_fails_without_update() {
        let mut moderation_repo = MockModerationRepository::new();
        let record = pending_item("graz");
        let found = record.clone();
        moderation_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));

        let service = service_with(moderation_repo, MockContentRepository::new());
        let admin = Actor::new("admin-1", Role::Admin, Some("vienna".to_string()));

        let err = service
            .approve_content(&admin, record.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GovernanceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn blank_rejection_reason_is_a_validation_error() {
        let service = service_with(
            MockModerationRepository::new(),
            MockContentRepository::new(),
        );
        let admin = Actor::new("admin-1", Role::Admin, Some("vienna".to_string()));

        let err = service
            .reject_content(&admin, Uuid::now_v7(), "   ")
            .await
            .unwrap_err();
        assert!(matches!(err, GovernanceError::Validation(_)));
    }

    #[tokio::test]
    async fn submission_without_active_city_is_unavailable() {
        let service = service_with(
            MockModerationRepository::new(),
            MockContentRepository::new(),
        );
        let parent = Actor::new("parent-1", Role::Parent, None);

        let err = service
            .submit_for_moderation(
                &parent,
                SubmitContentRequest {
                    content_type: ContentType::Comment,
                    content_id: "comment-1".to_string(),
                    content_data: serde_json::json!({ "text": "hello" }),
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_retryable());
        assert!(matches!(err, GovernanceError::Unavailable(_)));
    }

    #[tokio::test]
    async fn unreachable_store_makes_status_unknown() {
        let mut moderation_repo = MockModerationRepository::new();
        moderation_repo
            .expect_find_latest_for_content()
            .returning(|_, _, _| {
                Err(GovernanceError::Unavailable(
                    "store connection lost".to_string(),
                ))
            });

        let service = service_with(moderation_repo, MockContentRepository::new());
        let parent = Actor::new("parent-1", Role::Parent, Some("vienna".to_string()));

        let status = service
            .check_moderation_status(&parent, ContentType::Event, "event-1")
            .await;
        assert_eq!(status, None);
    }

    #[tokio::test]
    async fn decided_records_accept_no_further_transition() {
        let mut moderation_repo = MockModerationRepository::new();
        let mut record = pending_item("vienna");
        record.status = ModerationStatus::Rejected;
        record.reason = Some("duplicate listing".to_string());
        let found = record.clone();
        moderation_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(found.clone())));

        let service = service_with(moderation_repo, MockContentRepository::new());
        let admin = Actor::new("admin-1", Role::Admin, Some("vienna".to_string()));

        let err = service
            .approve_content(&admin, record.id)
            .await
            .unwrap_err();
        assert!(matches!(err, GovernanceError::Validation(_)));
    }
}
