//! Marketplace API client and payload types

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{
    AuthSession, DashboardStats, EmissionSummary, LoginCredentials, MarketplaceStats,
    MonthlyTrend, RegisterData, User, UserType,
};
