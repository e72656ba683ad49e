use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// HTTP transport for the CLOB REST API
///
/// Owns a pooled `reqwest::Client`. Build one at startup, share it by cloning
/// (clones reuse the same connection pool) and drop it at shutdown.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    host: String,
    user_agent: HeaderValue,
}

impl HttpClient {
    /// Build a client from validated settings
    pub fn new(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            user_agent: HeaderValue::from_str(&config.user_agent)?,
        })
    }

    /// Wrap an existing `reqwest::Client`
    pub fn from_client(client: reqwest::Client, host: impl Into<String>) -> Self {
        let host: String = host.into();
        Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            user_agent: HeaderValue::from_static(crate::config::DEFAULT_USER_AGENT),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        self.request::<(), T>(Method::GET, path, headers, None).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        self.request(Method::POST, path, headers, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        self.request::<(), T>(Method::DELETE, path, headers, None).await
    }

    pub async fn delete_with_body<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        headers: Option<HeaderMap>,
    ) -> Result<T> {
        self.request(Method::DELETE, path, headers, Some(body)).await
    }

    /// Send a request and decode the body.
    ///
    /// Anything but `200 OK` becomes [`Error::Api`] carrying the response text.
    pub async fn request<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        headers: Option<HeaderMap>,
        body: Option<&B>,
    ) -> Result<T> {
        let url = format!("{}{}", self.host, path);
        debug!(%method, path, "sending request");

        let headers = overload_headers(headers, &self.user_agent);
        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if status != StatusCode::OK {
            let message = resp.text().await.unwrap_or_default();
            warn!(%method, path, status = status.as_u16(), %message, "request rejected");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let bytes = resp.bytes().await?;
        let value = decode_body(&content_type, &bytes)?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Add the headers every CLOB request carries, overriding caller values.
///
/// `Accept-Encoding: gzip` is negotiated by reqwest itself so that it can
/// also decompress the body.
pub fn overload_headers(headers: Option<HeaderMap>, user_agent: &HeaderValue) -> HeaderMap {
    let mut headers = headers.unwrap_or_default();
    headers.insert(USER_AGENT, user_agent.clone());
    headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers
}

/// Empty bodies decode to `{}`, JSON bodies are parsed, anything else is
/// returned as a JSON string.
pub(crate) fn decode_body(content_type: &str, body: &[u8]) -> Result<Value> {
    if body.trim_ascii().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    if content_type.contains("application/json") {
        return Ok(serde_json::from_slice(body)?);
    }
    Ok(Value::String(String::from_utf8_lossy(body).into_owned()))
}
