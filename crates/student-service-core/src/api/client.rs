//! API client for communicating with the Student Service REST API.
//!
//! Every call goes through `ApiClient::request`, which attaches the bearer
//! token from the session store and recovers once from an expired token by
//! calling the refresh endpoint and replaying the request.

use std::sync::Arc;

use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::SessionStore;
use crate::config::ClientConfig;
use crate::models::AuthPayload;

use super::{ApiError, Method, RequestOptions};

/// Endpoint exchanging a refresh token for a new access token
pub const REFRESH_PATH: &str = "/api/v1/auth/refresh";

/// Status and safe-parsed body of one HTTP exchange.
struct RawResponse {
    status: StatusCode,
    body: Value,
}

/// API client for the Student Service backend.
/// Clone is cheap - the connection pool, session store and refresh gate are shared.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    /// Serializes token refreshes so concurrent 401s trigger one refresh call.
    refresh_gate: Arc<Mutex<()>>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, store: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: crate::config::normalize_base_url(&config.base_url),
            store,
            refresh_gate: Arc::new(Mutex::new(())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    pub fn url(&self, path: &str) -> String {
        build_url(&self.base_url, path)
    }

    /// Perform a call, refreshing the access token at most once on a 401.
    ///
    /// On success the safe-parsed body is returned. Failures carry the status
    /// and body of the original response, or of the retry when one was made.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value, ApiError> {
        let url = self.url(path);
        let sent_token = self.store.access_token();

        let response = self.send(&url, &options, sent_token.as_deref()).await?;
        if response.status.is_success() {
            return Ok(response.body);
        }

        let original = Self::failure(&url, response);
        if !original.is_unauthorized() {
            return Err(original);
        }

        let Some(token) = self.recover_from_unauthorized(sent_token.as_deref()).await? else {
            return Err(original);
        };

        debug!(url = %url, "Retrying request with refreshed token");
        let retry = self.send(&url, &options, Some(&token)).await?;
        if retry.status.is_success() {
            Ok(retry.body)
        } else {
            Err(Self::failure(&url, retry))
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::Get)).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let options = RequestOptions::new(Method::Post).with_body(serde_json::to_value(body)?);
        self.request(path, options).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value, ApiError> {
        let options = RequestOptions::new(Method::Put).with_body(serde_json::to_value(body)?);
        self.request(path, options).await
    }

    pub async fn del(&self, path: &str) -> Result<Value, ApiError> {
        self.request(path, RequestOptions::new(Method::Delete)).await
    }

    // ===== Typed helpers =====

    pub async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        decode(self.get(path).await?)
    }

    pub async fn post_as<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        decode(self.post(path, body).await?)
    }

    pub async fn put_as<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        decode(self.put(path, body).await?)
    }

    // ===== Internals =====

    async fn send(
        &self,
        url: &str,
        options: &RequestOptions,
        token: Option<&str>,
    ) -> Result<RawResponse, ApiError> {
        let mut headers = HeaderMap::new();
        if options.body.is_some() {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
        }
        if let Some(token) = token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidHeader("Authorization".to_string()))?;
            headers.insert(header::AUTHORIZATION, value);
        }
        // Caller overrides replace the defaults
        headers.extend(options.headers.clone());

        debug!(method = options.method.as_str(), url = %url, "Sending request");

        let mut request = self
            .client
            .request(options.method.into(), url)
            .headers(headers);
        if let Some(ref body) = options.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(status = %status, url = %url, "Response received");

        Ok(RawResponse {
            status,
            body: parse_body(&text),
        })
    }

    fn failure(url: &str, response: RawResponse) -> ApiError {
        debug!(
            status = %response.status,
            url = %url,
            body = %ApiError::truncate_body(&response.body),
            "Request failed"
        );
        ApiError::from_status(response.status, response.body)
    }

    /// Obtain a usable token after a 401, or clear the session.
    ///
    /// Holds the refresh gate for the whole exchange. If the stored token no
    /// longer matches the one the failed attempt carried, a concurrent caller
    /// already refreshed and its token is reused.
    async fn recover_from_unauthorized(
        &self,
        sent_token: Option<&str>,
    ) -> Result<Option<String>, ApiError> {
        let _gate = self.refresh_gate.lock().await;

        if let Some(current) = self.store.access_token() {
            if Some(current.as_str()) != sent_token {
                debug!("Access token was refreshed by a concurrent request");
                return Ok(Some(current));
            }
        }

        match self.refresh_access_token().await? {
            Some(token) => {
                info!("Access token refreshed");
                Ok(Some(token))
            }
            None => {
                info!("Session expired, signing out");
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to clear session");
                }
                Ok(None)
            }
        }
    }

    /// Exchange the stored refresh token for a new access token.
    ///
    /// Returns `Ok(None)` when there is no refresh token, the endpoint rejects
    /// it, the response lacks a token, or the session was cleared meanwhile.
    /// Never recurses into 401 handling.
    async fn refresh_access_token(&self) -> Result<Option<String>, ApiError> {
        let Some(refresh_token) = self.store.refresh_token() else {
            debug!("No refresh token available");
            return Ok(None);
        };

        let url = self.url(REFRESH_PATH);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        let status = response.status();
        let body = parse_body(&response.text().await?);
        if !status.is_success() {
            warn!(status = %status, "Token refresh rejected");
            return Ok(None);
        }

        let Some(token) = body
            .pointer("/data/token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
        else {
            warn!("Token refresh response did not include a token");
            return Ok(None);
        };

        let payload = body
            .get("data")
            .map(AuthPayload::from_value_lenient)
            .unwrap_or_default();

        // Signed out while the refresh was in flight
        let Some(mut session) = self.store.load() else {
            info!("Session cleared during token refresh, discarding new token");
            return Ok(None);
        };
        session.apply_refresh(&token, &payload);
        if let Err(e) = self.store.save(&session) {
            warn!(error = %e, "Failed to persist refreshed session");
        }

        Ok(Some(token))
    }
}

/// Join the base URL and a path with exactly one `/` between them.
pub fn build_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Decode a response body without ever failing: empty text is `Null`,
/// valid JSON is returned as parsed, anything else as a raw string.
pub fn parse_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApiResponse, Page};

    #[test]
    fn test_build_url_single_separator() {
        assert_eq!(build_url("https://x/", "v1/a"), "https://x/v1/a");
        assert_eq!(build_url("https://x", "/v1/a"), "https://x/v1/a");
        assert_eq!(build_url("https://x//", "//v1/a"), "https://x/v1/a");
        assert_eq!(
            build_url("https://x", "/api/v1/students?page=0&size=20"),
            "https://x/api/v1/students?page=0&size=20"
        );
    }

    #[test]
    fn test_parse_body_json() {
        assert_eq!(
            parse_body(r#"{"data": {"id": 1}}"#),
            json!({"data": {"id": 1}})
        );
        assert_eq!(parse_body("[1,2]"), json!([1, 2]));
    }

    #[test]
    fn test_parse_body_empty_is_null() {
        assert_eq!(parse_body(""), Value::Null);
    }

    #[test]
    fn test_parse_body_non_json_is_raw_text() {
        assert_eq!(parse_body("OK"), Value::String("OK".into()));
        assert_eq!(parse_body("{broken"), Value::String("{broken".into()));
        assert_eq!(parse_body("  "), Value::String("  ".into()));
    }

    #[test]
    fn test_decode_reports_shape_mismatch() {
        let ok: ApiResponse<Page<i64>> = decode(json!({"data": {"content": [1]}})).unwrap();
        assert_eq!(ok.data.content, vec![1]);

        let err = decode::<ApiResponse<Page<i64>>>(json!("plain text")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[test]
    fn test_new_strips_trailing_slashes() {
        let store: Arc<dyn SessionStore> = Arc::new(crate::auth::MemorySessionStore::new());
        let client = ApiClient::new(&ClientConfig::new("http://localhost:8080///"), store).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.url("api/v1/health"), "http://localhost:8080/api/v1/health");
    }
}
