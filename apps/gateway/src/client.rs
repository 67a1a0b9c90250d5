use axum::body::Body;
use axum::http::{header, Method, Response, StatusCode};
use axum_helpers::{AppError, SHARER_USER_HEADER};
use std::time::Duration;

/// Thin JSON pass-through to the business tier. The gateway validates input
/// and forwards method, path, query, caller header and body unchanged;
/// upstream status and body come back untouched.
#[derive(Clone)]
pub struct ServerClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServerClient {
    pub fn new(base_url: String) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self { http, base_url }
    }

    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        sharer_id: Option<i64>,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<Response<Body>, AppError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method, &url);
        if let Some(id) = sharer_id {
            request = request.header(SHARER_USER_HEADER, id);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let upstream = request.send().await.map_err(|e| {
            tracing::error!("Upstream request to {} failed: {}", url, e);
            AppError::ServiceUnavailable("Server is unavailable".to_string())
        })?;

        let status = upstream.status();
        let content_type = upstream
            .headers()
            .get(header::CONTENT_TYPE)
            .cloned();
        let bytes = upstream.bytes().await.map_err(|e| {
            tracing::error!("Failed to read upstream response body: {}", e);
            AppError::ServiceUnavailable("Server is unavailable".to_string())
        })?;

        let mut response = Response::builder().status(status);
        if let Some(content_type) = content_type {
            response = response.header(header::CONTENT_TYPE, content_type);
        }

        response
            .body(Body::from(bytes))
            .map_err(|e| AppError::InternalServerError(e.to_string()))
    }

    /// Readiness: the gateway is ready when the server's liveness probe is.
    pub async fn ping(&self) -> Result<(), AppError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|_| AppError::ServiceUnavailable("Server is unavailable".to_string()))?;

        if response.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(AppError::ServiceUnavailable(
                "Server is unavailable".to_string(),
            ))
        }
    }
}
