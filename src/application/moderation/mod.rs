pub mod dto;
pub mod service;

pub use dto::{Actor, SubmitContentRequest};
pub use service::ModerationService;
