//! Governance pipeline for user-generated content in the family-events app.
//!
//! Screens collect input, this crate decides what happens to it:
//!
//! 1. [`infrastructure::security::SubmissionThrottle`] gates the attempt,
//! 2. [`application::moderation::ModerationService`] screens the content,
//!    writes a moderation record and mirrors a visibility flag onto the
//!    content document,
//! 3. [`domain::moderation::visibility`] later decides what each viewer
//!    sees, consulting [`domain::role`] for privileged roles,
//! 4. an admin approves or rejects, which mutates the moderation record
//!    and the content document together.
//!
//! Two cross-cutting rules hold everywhere: unmoderated content is never
//! shown to ordinary users, and every record belongs to exactly one city.
//! The document store is reached through narrow async repository traits;
//! no concrete database is assumed.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
