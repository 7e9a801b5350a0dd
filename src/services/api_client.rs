// src/services/api_client.rs
// DOCUMENTATION: Remote REST API client
// PURPOSE: Base URL handling, bearer-token injection and error mapping for every service

use crate::errors::PortalError;
use crate::models::{Envelope, Page};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Ordered query parameters sent to the API
pub type ApiQuery = Vec<(String, String)>;

/// Remote API client
/// DOCUMENTATION: Cheap to clone; the inner reqwest client is shared.
/// Per-session clients are derived with `with_token`.
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client for making requests
    client: Client,
    /// API base URL without trailing slash
    base_url: String,
    /// Bearer token of the current session
    token: Option<String>,
}

/// Error payload the API sends with non-2xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ApiClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Same client, authenticated as the session's user
    pub fn with_token(&self, token: Option<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: token.filter(|t| !t.is_empty()),
        }
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header(reqwest::header::ACCEPT, "application/json");

        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET a list endpoint
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ApiQuery,
    ) -> Result<Page<T>, PortalError> {
        self.get(path, query).await
    }

    /// GET a single resource, unwrapping `{ data }` when present
    pub async fn get_one<T: DeserializeOwned>(&self, path: &str) -> Result<T, PortalError> {
        let envelope: Envelope<T> = self.get(path, &ApiQuery::new()).await?;
        Ok(envelope.into_inner())
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &ApiQuery,
    ) -> Result<T, PortalError> {
        log::debug!("API GET {} {:?}", path, query);
        let builder = self.request(Method::GET, path).query(query);
        self.send(builder, path).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PortalError> {
        log::debug!("API POST {}", path);
        let builder = self.request(Method::POST, path).json(body);
        let envelope: Envelope<T> = self.send(builder, path).await?;
        Ok(envelope.into_inner())
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, PortalError> {
        log::debug!("API PATCH {}", path);
        let builder = self.request(Method::PATCH, path).json(body);
        let envelope: Envelope<T> = self.send(builder, path).await?;
        Ok(envelope.into_inner())
    }

    /// POST to an action endpoint (`/publish`, `/approve`) whose answer we ignore
    pub async fn post_action<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), PortalError> {
        log::debug!("API POST {} (action)", path);
        let builder = self.request(Method::POST, path).json(body);
        self.send_empty(builder, path).await
    }

    pub async fn patch_action<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(), PortalError> {
        log::debug!("API PATCH {} (action)", path);
        let builder = self.request(Method::PATCH, path).json(body);
        self.send_empty(builder, path).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), PortalError> {
        log::debug!("API DELETE {}", path);
        let builder = self.request(Method::DELETE, path);
        self.send_empty(builder, path).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        path: &str,
    ) -> Result<T, PortalError> {
        let response = self.dispatch(builder, path).await?;

        response.json::<T>().await.map_err(|e| {
            log::error!("Failed to parse API response for {}: {}", path, e);
            PortalError::ExternalApiError(format!("Parse error: {}", e))
        })
    }

    async fn send_empty(&self, builder: RequestBuilder, path: &str) -> Result<(), PortalError> {
        self.dispatch(builder, path).await.map(|_| ())
    }

    async fn dispatch(&self, builder: RequestBuilder, path: &str) -> Result<Response, PortalError> {
        let response = builder.send().await.map_err(|e| {
            log::error!("API request to {} failed: {}", path, e);
            PortalError::ExternalApiError(format!("Request failed: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            // No automatic redirect; the page decides what to do.
            log::warn!("API answered 401 for {} (token present: {})", path, self.has_token());
            return Err(PortalError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.trim().is_empty());

        log::error!("API error {} for {}: {}", status, path, body);

        match status {
            StatusCode::NOT_FOUND => Err(PortalError::NotFound(
                message.unwrap_or_else(|| path.to_string()),
            )),
            StatusCode::FORBIDDEN => Err(PortalError::Forbidden),
            StatusCode::TOO_MANY_REQUESTS => Err(PortalError::RateLimitExceeded),
            _ => Err(PortalError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}
