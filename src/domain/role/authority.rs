//! Named authority policies over moderation.
//!
//! The product carries two deliberately different rules and they must
//! not be unified without a product decision:
//!
//! - [`ApprovalAuthority`] — who may approve or reject. Follows the
//!   `moderate_content` permission, which only admin holds; organisers
//!   are excluded by business rule.
//! - [`PreviewAuthority`] — who may see pending content in the UI.
//!   Broader: admin *and* organiser preview unmoderated content.

use super::{Permission, Role};

/// Who may decide a moderation record.
pub struct ApprovalAuthority;

impl ApprovalAuthority {
    pub fn allows(role: Role) -> bool {
        role.has_permission(Permission::ModerateContent)
    }
}

/// Who may see pending content ahead of a decision.
pub struct PreviewAuthority;

impl PreviewAuthority {
    pub fn allows(role: Role) -> bool {
        matches!(role, Role::Admin | Role::Organiser)
    }
}
