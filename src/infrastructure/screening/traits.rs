use crate::domain::moderation::entity::ContentType;

/// Pre-screening hook run synchronously on every submission, before the
/// moderation record is written.
///
/// Flags are advisory string tokens for the human moderator; they never
/// block submission or auto-reject. The default implementation is
/// [`super::KeywordScreener`]; a model-backed screener can be injected
/// in its place without touching the service.
pub trait ContentScreener: Send + Sync {
    fn screen(&self, content_type: ContentType, payload: &serde_json::Value) -> Vec<String>;
}
