//! Bookmark Service Client for Fusen.
//!
//! Implements `BookmarkClientTrait` — create, list, get, update and delete
//! against the remote REST API via `reqwest`. Every failure is classified into
//! a `ServiceErrorKind` bucket here, so callers match on kinds instead of
//! inspecting transport errors. No retries, no caching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::types::bookmark::{Bookmark, BookmarkInput, ErrorResponse};
use crate::types::errors::{Operation, ServiceError, ServiceErrorKind};
use crate::types::settings::ClientSettings;

/// Trait defining the remote bookmark operations.
#[async_trait]
pub trait BookmarkClientTrait: Send + Sync {
    async fn create_bookmark(&self, input: &BookmarkInput) -> Result<Bookmark, ServiceError>;
    /// Lists bookmarks in the order the service returns them.
    async fn list_bookmarks(&self, limit: u32, offset: u32) -> Result<Vec<Bookmark>, ServiceError>;
    async fn get_bookmark(&self, id: i64) -> Result<Bookmark, ServiceError>;
    async fn update_bookmark(&self, id: i64, input: &BookmarkInput) -> Result<Bookmark, ServiceError>;
    async fn delete_bookmark(&self, id: i64) -> Result<(), ServiceError>;
}

/// HTTP client for the `/bookmarks` resource.
pub struct BookmarkClient {
    http: reqwest::Client,
    base_url: String,
}

impl BookmarkClient {
    /// Creates a client for the API described by `settings`.
    pub fn new(settings: &ClientSettings) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/bookmarks", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/bookmarks/{}", self.base_url, id)
    }

    /// Builds and sends a request, turning every non-2xx answer into a
    /// server-reported failure.
    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Response, ServiceError> {
        let request = request.build().map_err(|e| {
            warn!(%operation, error = %e, "Error setting up request");
            ServiceError::new(operation, ServiceErrorKind::Setup(e.to_string()))
        })?;
        debug!(%operation, method = %request.method(), url = %request.url(), "sending request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| classify_transport_error(operation, e))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(server_failure(operation, response).await)
        }
    }

    async fn read_json<T: DeserializeOwned>(operation: Operation, response: Response) -> Result<T, ServiceError> {
        response.json::<T>().await.map_err(|e| {
            warn!(%operation, error = %e, "Unreadable response body");
            ServiceError::new(operation, ServiceErrorKind::NoResponse(e.to_string()))
        })
    }
}

/// Buckets a `reqwest` error raised before any response arrived.
fn classify_transport_error(operation: Operation, err: reqwest::Error) -> ServiceError {
    if err.is_builder() {
        warn!(%operation, error = %err, "Error setting up request");
        ServiceError::new(operation, ServiceErrorKind::Setup(err.to_string()))
    } else {
        warn!(%operation, error = %err, "No response received");
        ServiceError::new(operation, ServiceErrorKind::NoResponse(err.to_string()))
    }
}

/// Reads the structured error body, if any, from a non-2xx response.
async fn server_failure(operation: Operation, response: Response) -> ServiceError {
    let status = response.status().as_u16();
    let body = response
        .bytes()
        .await
        .ok()
        .and_then(|bytes| serde_json::from_slice::<ErrorResponse>(&bytes).ok());
    let (error_code, message) = match body {
        Some(body) => (body.error_code, body.message),
        None => (None, None),
    };

    warn!(
        %operation,
        status,
        error_code = error_code.as_deref().unwrap_or("-"),
        message = message.as_deref().unwrap_or("-"),
        "API Error"
    );

    ServiceError::new(
        operation,
        ServiceErrorKind::Server {
            status,
            error_code,
            message,
        },
    )
}

#[async_trait]
impl BookmarkClientTrait for BookmarkClient {
    async fn create_bookmark(&self, input: &BookmarkInput) -> Result<Bookmark, ServiceError> {
        let request = self.http.post(self.collection_url()).json(input);
        let response = self.send(Operation::Create, request).await?;
        Self::read_json(Operation::Create, response).await
    }

    async fn list_bookmarks(&self, limit: u32, offset: u32) -> Result<Vec<Bookmark>, ServiceError> {
        let request = self
            .http
            .get(self.collection_url())
            .query(&[("limit", limit), ("offset", offset)]);
        let response = self.send(Operation::List, request).await?;
        Self::read_json(Operation::List, response).await
    }

    async fn get_bookmark(&self, id: i64) -> Result<Bookmark, ServiceError> {
        let request = self.http.get(self.item_url(id));
        let response = self.send(Operation::Get, request).await?;
        Self::read_json(Operation::Get, response).await
    }

    async fn update_bookmark(&self, id: i64, input: &BookmarkInput) -> Result<Bookmark, ServiceError> {
        let request = self.http.put(self.item_url(id)).json(input);
        let response = self.send(Operation::Update, request).await?;
        Self::read_json(Operation::Update, response).await
    }

    async fn delete_bookmark(&self, id: i64) -> Result<(), ServiceError> {
        let request = self.http.delete(self.item_url(id));
        self.send(Operation::Delete, request).await?;
        Ok(())
    }
}
