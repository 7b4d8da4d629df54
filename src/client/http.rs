//! HTTP implementation of [`LinkTransport`]
//!
//! ureq is blocking, so every call runs on tokio's blocking pool.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, trace, warn};
use ureq::Agent;

use super::{ClientError, LinkTransport};
use crate::config::ApiConfig;
use crate::models::{ApiErrorBody, Link, LinkPayload};

const LINKS_PATH: &str = "/api/links";

/// Success bodies come either bare or wrapped as `{"link": …}`
#[derive(Deserialize)]
#[serde(untagged)]
enum LinkEnvelope {
    Wrapped { link: Link },
    Bare(Link),
}

#[derive(Debug, Clone, Copy)]
enum Method {
    Post,
    Put,
}

pub struct HttpTransport {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(
            &config.base_url,
            config.token.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn links_url(&self, short_code: Option<&str>) -> String {
        match short_code {
            Some(code) => format!("{}{}/{}", self.base_url, LINKS_PATH, code),
            None => format!("{}{}", self.base_url, LINKS_PATH),
        }
    }

    /// Send one request (sync, called inside spawn_blocking)
    fn send_sync(
        agent: Agent,
        method: Method,
        url: String,
        token: Option<String>,
        payload: LinkPayload,
    ) -> Result<Link, ClientError> {
        let builder = match method {
            Method::Post => agent.post(&url),
            Method::Put => agent.put(&url),
        };
        let builder = match token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        };

        let resp = builder.send_json(&payload).map_err(|e| {
            warn!("Link API request to \"{}\" failed: {}", url, e);
            ClientError::Network(e.to_string())
        })?;

        let status = resp.status();
        let text = resp
            .into_body()
            .read_to_string()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        trace!("Link API {} responded {}: {}", url, status, text);

        if status.is_success() {
            decode_link(&text)
        } else {
            Err(decode_error(status.as_u16(), &text))
        }
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        payload: &LinkPayload,
    ) -> Result<Link, ClientError> {
        debug!("Link API {:?} {}", method, url);
        let agent = self.agent.clone();
        let token = self.token.clone();
        let payload = payload.clone();

        tokio::task::spawn_blocking(move || Self::send_sync(agent, method, url, token, payload))
            .await
            .unwrap_or_else(|e| {
                warn!("Link API spawn_blocking failed: {}", e);
                Err(ClientError::Network(format!("request task failed: {}", e)))
            })
    }
}

fn decode_link(text: &str) -> Result<Link, ClientError> {
    let link = match serde_json::from_str::<LinkEnvelope>(text) {
        Ok(LinkEnvelope::Wrapped { link }) | Ok(LinkEnvelope::Bare(link)) => link,
        Err(e) => return Err(ClientError::Decode(e.to_string())),
    };
    if link.short_code.is_empty() {
        return Err(ClientError::Decode(
            "response has no shortCode".to_string(),
        ));
    }
    Ok(link)
}

/// Error bodies that are not `{error, variantIndex?}` are reported verbatim
fn decode_error(status: u16, text: &str) -> ClientError {
    let body = serde_json::from_str::<ApiErrorBody>(text).unwrap_or_else(|_| {
        let raw = text.trim();
        ApiErrorBody {
            error: if raw.is_empty() {
                format!("Request failed with status {}", status)
            } else {
                raw.to_string()
            },
            variant_index: None,
        }
    });
    ClientError::Remote { status, body }
}

#[async_trait]
impl LinkTransport for HttpTransport {
    async fn create_link(&self, payload: &LinkPayload) -> Result<Link, ClientError> {
        let url = self.links_url(None);
        self.send(Method::Post, url, payload).await
    }

    async fn update_link(
        &self,
        short_code: &str,
        payload: &LinkPayload,
    ) -> Result<Link, ClientError> {
        let url = self.links_url(Some(short_code));
        self.send(Method::Put, url, payload).await
    }

    fn name(&self) -> &'static str {
        "HTTP"
    }
}
