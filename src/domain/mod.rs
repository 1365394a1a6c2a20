pub mod moderation;
pub mod role;
pub mod shared;
