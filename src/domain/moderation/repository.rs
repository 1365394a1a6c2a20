use super::entity::{ContentType, ContentVisibility, ModerationItem};
use super::errors::GovernanceError;
use async_trait::async_trait;
use uuid::Uuid;

/// Narrow view of the `moderation` collection in the document store.
///
/// Implementations are plain async calls returning success or error;
/// timeouts and retries belong to the store adapter, not to this crate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ModerationRepository: Send + Sync {
    async fn create(&self, item: &ModerationItem) -> Result<ModerationItem, GovernanceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ModerationItem>, GovernanceError>;

    async fn update(&self, item: &ModerationItem) -> Result<ModerationItem, GovernanceError>;

    /// The most recently submitted record for a content item within a
    /// city. Ordering is by `submitted_at` with ties broken by record
    /// id, so the result is deterministic.
    async fn find_latest_for_content(
        &self,
        content_type: ContentType,
        content_id: &str,
        city_id: &str,
    ) -> Result<Option<ModerationItem>, GovernanceError>;

    async fn count_pending(&self, city_id: &str) -> Result<u64, GovernanceError>;
}

/// Narrow view of the content collections (`events`, `comments`,
/// `profiles`, `venues`) limited to the mirrored visibility pair.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Write the denormalized visibility pair onto the content document.
    async fn apply_visibility(
        &self,
        content_type: ContentType,
        content_id: &str,
        visibility: &ContentVisibility,
    ) -> Result<(), GovernanceError>;

    async fn visibility(
        &self,
        content_type: ContentType,
        content_id: &str,
    ) -> Result<Option<ContentVisibility>, GovernanceError>;
}
