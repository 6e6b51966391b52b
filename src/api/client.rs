//! HTTP client for the marketplace API
//!
//! Every call is routed through the [`RequestQueue`], so calls made while a
//! login is settling run one at a time and pick up the fresh token.

use super::error::{error_from_response, ApiError};
use super::types::{
    AuthEnvelope, AuthSession, DashboardStats, EmissionSummary, LoginCredentials,
    MarketplaceStats, RegisterData, User,
};
use crate::config::ApiConfig;
use crate::queue::RequestQueue;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

const API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
    queue: RequestQueue,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token().is_some())
            .field("queue", &self.queue)
            .finish()
    }
}

impl ApiClient {
    /// Create a client for the API at `config.base_url`
    pub fn new(config: &ApiConfig, queue: RequestQueue) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            http,
            base_url: config.trimmed_base_url().to_string(),
            token: Arc::new(RwLock::new(None)),
            queue,
        })
    }

    /// The queue this client routes its calls through
    pub fn queue(&self) -> &RequestQueue {
        &self.queue
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Forget the token and discard every call still waiting in the queue
    pub fn logout(&self) {
        self.clear_token();
        self.queue.clear();
        info!("Logged out");
    }

    /// Send a request through the queue and decode the JSON response
    pub async fn request<T>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        let endpoint = endpoint.to_string();
        self.queue
            .enqueue(move || async move { client.send(method, &endpoint, body).await })
            .await
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, ApiError> {
        self.authenticate("/auth/login", serde_json::to_value(credentials)?)
            .await
    }

    pub async fn register(&self, data: &RegisterData) -> Result<AuthSession, ApiError> {
        self.authenticate("/auth/register", serde_json::to_value(data)?)
            .await
    }

    pub async fn register_buyer(&self, data: &RegisterData) -> Result<AuthSession, ApiError> {
        self.authenticate("/auth/register/buyer", serde_json::to_value(data)?)
            .await
    }

    pub async fn register_seller(&self, data: &RegisterData) -> Result<AuthSession, ApiError> {
        self.authenticate("/auth/register/seller", serde_json::to_value(data)?)
            .await
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.request(Method::GET, "/auth/me", None).await
    }

    /// Whether the held token is still accepted by the server
    pub async fn validate_token(&self) -> bool {
        if self.token().is_none() {
            return false;
        }
        self.current_user().await.is_ok()
    }

    pub async fn dashboard_stats(&self, days_back: u32) -> Result<DashboardStats, ApiError> {
        let endpoint = format!("/dashboard/stats?days_back={}", days_back);
        self.request(Method::GET, &endpoint, None).await
    }

    pub async fn emission_summary(&self, days_back: u32) -> Result<EmissionSummary, ApiError> {
        let endpoint = format!("/emissions/summary?days_back={}", days_back);
        self.request(Method::GET, &endpoint, None).await
    }

    pub async fn marketplace_stats(&self) -> Result<MarketplaceStats, ApiError> {
        self.request(Method::GET, "/marketplace/stats", None).await
    }

    /// Run a login-style call as the head of the queue, so calls made while it
    /// is in flight wait behind it and go out with the new token.
    async fn authenticate(&self, endpoint: &str, body: Value) -> Result<AuthSession, ApiError> {
        self.queue.start_authentication();

        let client = self.clone();
        let endpoint = endpoint.to_string();
        self.queue
            .enqueue(move || async move { client.exchange_credentials(&endpoint, body).await })
            .await
    }

    async fn exchange_credentials(
        &self,
        endpoint: &str,
        body: Value,
    ) -> Result<AuthSession, ApiError> {
        match self
            .send::<AuthEnvelope>(Method::POST, endpoint, Some(body))
            .await
        {
            Ok(envelope) => {
                let token = envelope.data.access_token;
                self.set_token(token.clone());
                self.queue.complete_authentication();
                info!("Authenticated as {}", envelope.data.user.email);
                Ok(AuthSession {
                    user: envelope.data.user,
                    token,
                })
            }
            Err(e) => {
                warn!("Authentication against {} failed: {}", endpoint, e);
                self.queue.clear();
                Err(e)
            }
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}{}", self.base_url, API_PREFIX, endpoint);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            warn!("{} rejected the session token", url);
            self.clear_token();
            self.queue.clear();
            return Err(ApiError::AuthenticationRequired);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_from_response(status, &body));
        }

        Ok(response.json::<T>().await?)
    }

    fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
