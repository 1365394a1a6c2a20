pub mod screening;
pub mod security;
pub mod store;
