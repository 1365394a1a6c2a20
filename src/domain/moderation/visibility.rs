//! The visibility gate: what a given viewer sees for a given moderation
//! status. Pure and stateless so it is testable against a truth table.
//!
//! Pending preview follows [`PreviewAuthority`] (admin or organiser),
//! which is deliberately broader than the approval rule; see
//! `domain::role::authority`.

use crate::domain::role::{Role, authority::PreviewAuthority};

use super::entity::ModerationStatus;

/// How the UI should present one content item to one viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPresentation {
    /// Approved content, shown normally
    Visible,

    /// Pending content shown to a privileged viewer with a "pending"
    /// badge and an optional moderate action
    PendingWithBadge,

    /// Pending content replaced by a neutral "pending review"
    /// placeholder; the underlying content is never rendered
    PendingPlaceholder,

    /// Rejected content shown dimmed to a privileged viewer, with a
    /// "rejected" badge and the recorded reason
    RejectedWithBadge,

    /// Nothing is rendered, not even a placeholder
    Hidden,
}

/// Decide the presentation for `viewer`.
///
/// `status` is `None` when no moderation record could be resolved; that
/// case fails closed and hides the content.
pub fn resolve_presentation(
    status: Option<ModerationStatus>,
    viewer: Role,
) -> ContentPresentation {
    match status {
        Some(ModerationStatus::Approved) => ContentPresentation::Visible,
        Some(ModerationStatus::Pending) => {
            if PreviewAuthority::allows(viewer) {
                ContentPresentation::PendingWithBadge
            } else {
                ContentPresentation::PendingPlaceholder
            }
        }
        Some(ModerationStatus::Rejected) => {
            if PreviewAuthority::allows(viewer) {
                ContentPresentation::RejectedWithBadge
            } else {
                ContentPresentation::Hidden
            }
        }
        None => ContentPresentation::Hidden,
    }
}
