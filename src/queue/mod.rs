//! Request queue for API calls made around login
//!
//! This module provides:
//! - FIFO serialization of API calls while a login is in progress
//! - A grace window after login during which calls stay serialized
//! - Rejection of waiting calls at logout

mod error;
mod job;
pub mod request_queue;

pub use error::QueueCleared;
pub use request_queue::{RequestQueue, AUTH_GRACE_PERIOD, PACING_DELAY};
