//! In-memory document store backing tests and UI preview builds.
//!
//! The production store adapter lives with the app shell; this one
//! implements the same repository traits over hash maps so the whole
//! pipeline runs without any backing service.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::moderation::entity::{ContentType, ContentVisibility, ModerationItem};
use crate::domain::moderation::errors::GovernanceError;
use crate::domain::moderation::repository::{ContentRepository, ModerationRepository};

#[derive(Default)]
struct StoreInner {
    moderation: HashMap<Uuid, ModerationItem>,
    content_visibility: HashMap<(ContentType, String), ContentVisibility>,
}

/// Thread-safe in-memory store implementing both repository traits.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<StoreInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModerationRepository for MemoryStore {
    async fn create(&self, item: &ModerationItem) -> Result<ModerationItem, GovernanceError> {
        let mut inner = self.inner.write().await;
        inner.moderation.insert(item.id, item.clone());
        Ok(item.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ModerationItem>, GovernanceError> {
        let inner = self.inner.read().await;
        Ok(inner.moderation.get(&id).cloned())
    }

    async fn update(&self, item: &ModerationItem) -> Result<ModerationItem, GovernanceError> {
        let mut inner = self.inner.write().await;
        if !inner.moderation.contains_key(&item.id) {
            return Err(GovernanceError::NotFound(format!(
                "moderation record {} does not exist",
                item.id
            )));
        }
        inner.moderation.insert(item.id, item.clone());
        Ok(item.clone())
    }

    async fn find_latest_for_content(
        &self,
        content_type: ContentType,
        content_id: &str,
        city_id: &str,
    ) -> Result<Option<ModerationItem>, GovernanceError> {
        let inner = self.inner.read().await;
        Ok(inner
            .moderation
            .values()
            .filter(|item| {
                item.content_type == content_type
                    && item.content_id == content_id
                    && item.city_id == city_id
            })
            // Deterministic: latest submission wins, ties broken by id.
            .max_by_key(|item| (item.submitted_at, item.id))
            .cloned())
    }

    async fn count_pending(&self, city_id: &str) -> Result<u64, GovernanceError> {
        let inner = self.inner.read().await;
        Ok(inner
            .moderation
            .values()
            .filter(|item| item.city_id == city_id && !item.status.is_terminal())
            .count() as u64)
    }
}

#[async_trait]
impl ContentRepository for MemoryStore {
    async fn apply_visibility(
        &self,
        content_type: ContentType,
        content_id: &str,
        visibility: &ContentVisibility,
    ) -> Result<(), GovernanceError> {
        let mut inner = self.inner.write().await;
        inner
            .content_visibility
            .insert((content_type, content_id.to_string()), visibility.clone());
        Ok(())
    }

    async fn visibility(
        &self,
        content_type: ContentType,
        content_id: &str,
    ) -> Result<Option<ContentVisibility>, GovernanceError> {
        let inner = self.inner.read().await;
        Ok(inner
            .content_visibility
            .get(&(content_type, content_id.to_string()))
            .cloned())
    }
}
