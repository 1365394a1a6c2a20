pub mod submission_throttle;

pub use submission_throttle::{SubmissionKind, SubmissionThrottle};
