use serde::{Deserialize, Serialize};

use crate::domain::moderation::entity::ContentType;
use crate::domain::role::Role;

/// The user performing a governance operation.
///
/// Role and city come from the externally-stored profile document; the
/// active city may be absent while the profile is still loading, which
/// every operation treats as an unavailable dependency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
    pub city_id: Option<String>,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role, city_id: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            city_id,
        }
    }
}

/// Content handed over for review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitContentRequest {
    pub content_type: ContentType,

    /// Document id of the content in its own collection
    pub content_id: String,

    /// Opaque snapshot of the content as the user submitted it
    pub content_data: serde_json::Value,
}
