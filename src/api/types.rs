//! Payloads exchanged with the marketplace API

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Buyer,
    Seller,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub location: String,
    #[serde(rename = "type")]
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_verification: Option<Value>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterData {
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub industry: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// A signed-in user and the bearer token issued for them
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthEnvelope {
    #[serde(default)]
    #[allow(dead_code)]
    pub success: bool,
    #[serde(default)]
    #[allow(dead_code)]
    pub message: String,
    pub data: AuthData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthData {
    pub user: User,
    pub access_token: String,
    #[serde(default)]
    #[allow(dead_code)]
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub emissions: f64,
    #[serde(default)]
    pub offsets: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_emissions: Option<f64>,
}

impl MonthlyTrend {
    /// Net emissions as reported, or emissions minus offsets
    pub fn net(&self) -> f64 {
        self.net_emissions
            .unwrap_or(self.emissions - self.offsets)
    }
}

/// Emissions in kg CO2e over a reporting window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionSummary {
    pub total_emissions: f64,
    pub total_offsets: f64,
    pub net_emissions: f64,
    pub offset_percentage: f64,
    pub emissions_by_category: BTreeMap<String, f64>,
    pub monthly_trends: Vec<MonthlyTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub emission_summary: EmissionSummary,
    #[serde(default)]
    pub recent_activities: Vec<Value>,
    #[serde(default)]
    pub recent_purchases: Vec<Value>,
    #[serde(default)]
    pub net_zero_progress: f64,
    #[serde(default)]
    pub recommendations_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceStats {
    pub total_credits_purchased: f64,
    pub total_credits_retired: f64,
    pub total_credits_available_for_retirement: f64,
    pub total_investment: f64,
    pub average_price_per_ton: f64,
    pub number_of_purchases: u32,
}
