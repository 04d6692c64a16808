pub mod cache;
pub mod chat;
pub mod metrics;
