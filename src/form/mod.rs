//! HTTP form boundary: session bookkeeping, activity uploads and report export.

pub mod handlers;
pub mod models;
pub mod multipart_parser;

pub use handlers::config;
