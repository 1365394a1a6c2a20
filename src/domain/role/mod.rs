//! Roles, permissions and screen access.
//!
//! Everything here is a pure lookup against tables built once at first
//! use. Roles arrive from externally-stored profile documents as plain
//! strings, so every entry point accepts the string form and compares by
//! underlying value rather than enum identity.
//!
//! `ROLE_PERMISSIONS` is the single source of truth for capability
//! checks. `ROLE_HIERARCHY` exists for display and grouping only and is
//! never consulted when deciding what a role may do; a unit test keeps
//! the two tables from drifting apart.

pub mod authority;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Closed set of account roles. Immutable for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Guest,
    Parent,
    Organiser,
    Admin,
    Partner,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Guest,
        Role::Parent,
        Role::Organiser,
        Role::Admin,
        Role::Partner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Parent => "parent",
            Role::Organiser => "organiser",
            Role::Admin => "admin",
            Role::Partner => "partner",
        }
    }

    /// Parse the stored string form. Case-insensitive, surrounding
    /// whitespace ignored; `None` for anything outside the closed set.
    pub fn parse(input: &str) -> Option<Role> {
        match input.trim().to_lowercase().as_str() {
            "guest" => Some(Role::Guest),
            "parent" => Some(Role::Parent),
            "organiser" => Some(Role::Organiser),
            "admin" => Some(Role::Admin),
            "partner" => Some(Role::Partner),
            _ => None,
        }
    }

    pub fn permissions(&self) -> &'static HashSet<Permission> {
        &ROLE_PERMISSIONS[self]
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

/// Closed set of capability tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewEvents,
    CreateEvent,
    EditOwnEvent,
    DeleteOwnEvent,
    CommentOnEvent,
    ReportContent,
    ManageOwnProfile,
    ManagePromotions,
    ViewEventAnalytics,
    ModerateContent,
    ManageUsers,
    ManageVenues,
}

impl Permission {
    /// The full permission universe. `admin` maps to exactly this set.
    pub const ALL: [Permission; 12] = [
        Permission::ViewEvents,
        Permission::CreateEvent,
        Permission::EditOwnEvent,
        Permission::DeleteOwnEvent,
        Permission::CommentOnEvent,
        Permission::ReportContent,
        Permission::ManageOwnProfile,
        Permission::ManagePromotions,
        Permission::ViewEventAnalytics,
        Permission::ModerateContent,
        Permission::ManageUsers,
        Permission::ManageVenues,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::ViewEvents => "view_events",
            Permission::CreateEvent => "create_event",
            Permission::EditOwnEvent => "edit_own_event",
            Permission::DeleteOwnEvent => "delete_own_event",
            Permission::CommentOnEvent => "comment_on_event",
            Permission::ReportContent => "report_content",
            Permission::ManageOwnProfile => "manage_own_profile",
            Permission::ManagePromotions => "manage_promotions",
            Permission::ViewEventAnalytics => "view_event_analytics",
            Permission::ModerateContent => "moderate_content",
            Permission::ManageUsers => "manage_users",
            Permission::ManageVenues => "manage_venues",
        }
    }

    pub fn parse(input: &str) -> Option<Permission> {
        let needle = input.trim().to_lowercase();
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == needle)
    }
}

lazy_static! {
    /// Single source of truth for capability checks.
    static ref ROLE_PERMISSIONS: HashMap<Role, HashSet<Permission>> = {
        use Permission::*;

        let guest = HashSet::from([ViewEvents, ReportContent]);

        let mut parent = guest.clone();
        parent.extend([CreateEvent, CommentOnEvent, ManageOwnProfile]);

        let mut organiser = parent.clone();
        organiser.extend([EditOwnEvent, DeleteOwnEvent, ViewEventAnalytics]);

        let mut partner = guest.clone();
        partner.extend([
            CreateEvent,
            EditOwnEvent,
            ManageOwnProfile,
            ManagePromotions,
            ViewEventAnalytics,
        ]);

        let admin: HashSet<Permission> = Permission::ALL.into_iter().collect();

        HashMap::from([
            (Role::Guest, guest),
            (Role::Parent, parent),
            (Role::Organiser, organiser),
            (Role::Partner, partner),
            (Role::Admin, admin),
        ])
    };

    /// Privilege chains for display and grouping. Partner is a disjoint
    /// branch rooted at guest. Never used for capability checks.
    static ref ROLE_HIERARCHY: HashMap<Role, Vec<Role>> = HashMap::from([
        (Role::Guest, vec![Role::Guest]),
        (Role::Parent, vec![Role::Parent, Role::Guest]),
        (
            Role::Organiser,
            vec![Role::Organiser, Role::Parent, Role::Guest],
        ),
        (
            Role::Admin,
            vec![Role::Admin, Role::Organiser, Role::Parent, Role::Guest],
        ),
        (Role::Partner, vec![Role::Partner, Role::Guest]),
    ]);

    /// Screen name (normalized) to roles allowed through navigation.
    static ref SCREEN_ACCESS: HashMap<&'static str, Vec<Role>> = HashMap::from([
        ("home", Role::ALL.to_vec()),
        ("eventmap", Role::ALL.to_vec()),
        ("eventdetail", Role::ALL.to_vec()),
        (
            "createevent",
            vec![Role::Parent, Role::Organiser, Role::Partner, Role::Admin],
        ),
        (
            "profile",
            vec![Role::Parent, Role::Organiser, Role::Partner, Role::Admin],
        ),
        ("organiserdashboard", vec![Role::Organiser, Role::Admin]),
        ("partnerdashboard", vec![Role::Partner, Role::Admin]),
        ("moderationqueue", vec![Role::Admin]),
        ("admin", vec![Role::Admin]),
    ]);
}

/// Membership test against the role's permission set.
///
/// Accepts the raw string forms found in stored profile documents;
/// returns `false` for empty or unrecognized input rather than erroring.
pub fn has_permission(role: &str, permission: &str) -> bool {
    let Some(role) = Role::parse(role) else {
        return false;
    };
    let Some(permission) = Permission::parse(permission) else {
        return false;
    };
    role.has_permission(permission)
}

/// Whether navigation should let `role` open `screen`.
///
/// Screen names are matched case-insensitively with an optional trailing
/// "Screen" suffix stripped, so "EventMapScreen" and "eventmap" are the
/// same screen. Unknown screens and empty input are denied.
pub fn can_access_screen(role: &str, screen: &str) -> bool {
    let Some(role) = Role::parse(role) else {
        return false;
    };

    let normalized = screen.trim().to_lowercase();
    let normalized = normalized.strip_suffix("screen").unwrap_or(&normalized);
    if normalized.is_empty() {
        return false;
    }

    SCREEN_ACCESS
        .get(normalized)
        .is_some_and(|allowed| allowed.contains(&role))
}

/// The static privilege chain for a role: itself first, then everything
/// below it. Empty for unrecognized input.
pub fn role_hierarchy(role: &str) -> Vec<Role> {
    Role::parse(role)
        .and_then(|r| ROLE_HIERARCHY.get(&r).cloned())
        .unwrap_or_default()
}
