use log::debug;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::{NewTemplate, QRTemplate};

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Failed to reach template store: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Template store returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Unexpected template store response: {0}")]
    Decode(String),
}

impl TemplateError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Client
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct TemplateClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl TemplateClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: Client::new(), base_url, token: None }
    }

    /// Sent as `Authorization: Bearer <token>` on every request.
    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self { token: Some(token.into()), ..self }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list(&self) -> Result<Vec<QRTemplate>, TemplateError> {
        let res = self.send(self.http.get(self.url("/templates"))).await?;
        decode(res).await
    }

    pub async fn get(&self, id: &str) -> Result<QRTemplate, TemplateError> {
        let res = self.send(self.http.get(self.url(&format!("/templates/{id}")))).await?;
        decode(res).await
    }

    pub async fn create(&self, template: &NewTemplate) -> Result<QRTemplate, TemplateError> {
        let res = self.send(self.http.post(self.url("/templates")).json(template)).await?;
        decode(res).await
    }

    pub async fn update(&self, id: &str, template: &NewTemplate) -> Result<QRTemplate, TemplateError> {
        let res = self.send(self.http.put(self.url(&format!("/templates/{id}"))).json(template)).await?;
        decode(res).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), TemplateError> {
        self.send(self.http.delete(self.url(&format!("/templates/{id}")))).await?;
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, TemplateError> {
        let req = match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        };
        let res = req.send().await.map_err(TemplateError::Transport)?;
        let status = res.status();
        debug!("Template store {} {}", status.as_u16(), res.url().path());
        if status.is_success() {
            return Ok(res);
        }

        let body = res.text().await.unwrap_or_default();
        Err(TemplateError::Status { status: status.as_u16(), message: status_message(status, body) })
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, TemplateError> {
    let bytes = res.bytes().await.map_err(TemplateError::Transport)?;
    serde_json::from_slice(&bytes).map_err(|e| TemplateError::Decode(e.to_string()))
}

// Prefers the server's text, then the canonical reason phrase
fn status_message(status: StatusCode, body: String) -> String {
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status.canonical_reason().unwrap_or("no message").to_string()
}
