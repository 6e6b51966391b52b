pub mod api;
pub mod catalog;
pub mod charts;
pub mod config;
pub mod format;
pub mod queue;

// Public API
pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use queue::{QueueCleared, RequestQueue};
