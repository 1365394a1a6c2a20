use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kinds of user-generated content that pass through moderation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Event,
    Comment,
    Profile,
    Venue,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Event => "event",
            ContentType::Comment => "comment",
            ContentType::Profile => "profile",
            ContentType::Venue => "venue",
        }
    }

    /// Name of the document-store collection holding this content.
    pub fn collection(&self) -> &'static str {
        match self {
            ContentType::Event => "events",
            ContentType::Comment => "comments",
            ContentType::Profile => "profiles",
            ContentType::Venue => "venues",
        }
    }
}

/// Moderation outcome states.
///
/// `Pending` is the only non-terminal state; once a record reaches
/// `Approved` or `Rejected` no further transition is accepted. Edited
/// content re-enters the pipeline as a *new* pending record rather than
/// by reopening a decided one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ModerationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ModerationStatus::Approved | ModerationStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Pending => "pending",
            ModerationStatus::Approved => "approved",
            ModerationStatus::Rejected => "rejected",
        }
    }
}

/// One moderation decision, in progress or completed.
///
/// # Invariants
/// - `city_id` equals the submitting user's active city and never
///   changes after creation
/// - `status` moves pending → approved|rejected and never leaves a
///   terminal state
/// - `reason` is non-empty whenever `status` is rejected
/// - `ai_flags` is populated at creation time, never retro-fitted
///
/// Records are created by submission, mutated only by approve/reject,
/// and never deleted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModerationItem {
    pub id: Uuid,

    /// Document id of the content under review, in its own collection
    pub content_id: String,

    pub content_type: ContentType,

    /// Opaque snapshot of the content as submitted
    pub content_data: serde_json::Value,

    pub status: ModerationStatus,

    /// User id of the submitter
    pub submitted_by: String,

    pub submitted_at: DateTime<Utc>,

    /// City the content belongs to; cross-city actions are rejected
    pub city_id: String,

    /// User id of the deciding moderator, once decided
    pub moderated_by: Option<String>,

    pub moderated_at: Option<DateTime<Utc>>,

    /// Human-readable grounds for rejection
    pub reason: Option<String>,

    /// Advisory screening flags attached for the moderator's attention
    pub ai_flags: Vec<String>,
}

/// Denormalized pair mirrored onto the content document itself so
/// ordinary read paths never join against the moderation collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentVisibility {
    pub moderation_status: ModerationStatus,
    pub is_visible: bool,
}

impl ContentVisibility {
    pub fn pending() -> Self {
        Self {
            moderation_status: ModerationStatus::Pending,
            is_visible: false,
        }
    }

    pub fn approved() -> Self {
        Self {
            moderation_status: ModerationStatus::Approved,
            is_visible: true,
        }
    }

    pub fn rejected() -> Self {
        Self {
            moderation_status: ModerationStatus::Rejected,
            is_visible: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_is_non_terminal() {
        assert!(!ModerationStatus::Pending.is_terminal());
        assert!(ModerationStatus::Approved.is_terminal());
        assert!(ModerationStatus::Rejected.is_terminal());
    }

    #[test]
    fn collection_names_match_the_store_layout() {
        assert_eq!(ContentType::Event.collection(), "events");
        assert_eq!(ContentType::Comment.collection(), "comments");
        assert_eq!(ContentType::Profile.collection(), "profiles");
        assert_eq!(ContentType::Venue.collection(), "venues");
    }

    #[test]
    fn visibility_is_true_only_once_approved() {
        assert!(!ContentVisibility::pending().is_visible);
        assert!(ContentVisibility::approved().is_visible);
        assert!(!ContentVisibility::rejected().is_visible);
    }
}
