//! Raw JSON transport.
//!
//! Thin wrapper over `reqwest` that maps every failure into the client
//! error taxonomy: connection problems become transport errors, non-2xx
//! responses become server rejections with the message extracted from the
//! JSON body (`detail` / `error` / `message`) falling back to the raw body
//! or the HTTP status text.

use reqwest::multipart::Form;
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

use stocktrack_core::{ClientError, ClientResult};

/// JSON HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct Http {
    client: reqwest::Client,
    base: String,
}

/// Pick the user-facing message out of an error response body.
pub(crate) fn server_message(status: StatusCode, body: &str) -> String {
    if let Ok(data) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "error", "message"] {
            if let Some(text) = data.get(key).and_then(Value::as_str) {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    return trimmed.to_string();
                }
            }
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    format!(
        "HTTP {} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("")
    )
    .trim_end()
    .to_string()
}

impl Http {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn handle(&self, response: Response) -> ClientResult<Value> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ClientError::transport(err.to_string()))?;

        if !status.is_success() {
            let message = server_message(status, &body);
            tracing::debug!(status = status.as_u16(), %message, "server rejected request");
            return Err(ClientError::server(status.as_u16(), message));
        }

        if body.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_str(&body).map_err(|_| {
            ClientError::server(status.as_u16(), "Sunucudan geçerli JSON alınamadı.")
        })
    }

    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<Value> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|err| ClientError::transport(err.to_string()))?;
        self.handle(response).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<Value> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|err| ClientError::transport(err.to_string()))?;
        self.handle(response).await
    }

    /// POST a multipart form body (the fault registry's mark/repair
    /// endpoints take form data, not JSON).
    pub async fn post_form(&self, path: &str, form: Form) -> ClientResult<Value> {
        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(|err| ClientError::transport(err.to_string()))?;
        self.handle(response).await
    }
}
