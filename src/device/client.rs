//! LED status and control requests.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::error::DeviceError;
use crate::config::AgentConfig;
use crate::error::AgentError;

const STATUS_PATH: &str = "/led/stat";
const CONTROL_PATH: &str = "/led/control";

/// Body of a control request: `{"ledNum": 2, "ledOn": true}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedCommand {
    pub led_num: i64,
    pub led_on: bool,
}

/// Client for the two-endpoint LED API.
///
/// The public operations never fail: every error is rendered to a message
/// string the model can relay. The `try_` variants expose the typed error.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    base_url: String,
    http: reqwest::Client,
}

impl DeviceClient {
    /// Create a client with the given base URL and request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AgentError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, http))
    }

    pub fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        Self::new(config.api_base.clone(), config.device_timeout)
    }

    /// Create a client around an existing reqwest client.
    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Read the status of all LEDs.
    pub async fn get_status(&self) -> String {
        render(self.try_get_status().await)
    }

    /// Switch one LED on or off.
    pub async fn set_status(&self, led_num: i64, led_on: bool) -> String {
        render(self.try_set_status(led_num, led_on).await)
    }

    pub async fn try_get_status(&self) -> Result<String, DeviceError> {
        let url = format!("{}{STATUS_PATH}", self.base_url);
        debug!(%url, "device get_status");

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(DeviceError::from_transport)?;
        read_message(resp, url).await
    }

    pub async fn try_set_status(&self, led_num: i64, led_on: bool) -> Result<String, DeviceError> {
        let url = format!("{}{CONTROL_PATH}", self.base_url);
        let command = LedCommand { led_num, led_on };
        debug!(%url, led_num, led_on, "device set_status");

        // `.json()` sets `content-type: application/json`.
        let resp = self
            .http
            .post(&url)
            .json(&command)
            .send()
            .await
            .map_err(DeviceError::from_transport)?;
        read_message(resp, url).await
    }
}

fn render(result: Result<String, DeviceError>) -> String {
    match result {
        Ok(message) => message,
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "device request failed");
            err.to_string()
        }
    }
}

async fn read_message(resp: reqwest::Response, url: String) -> Result<String, DeviceError> {
    let status = resp.status();
    let body = resp.text().await.map_err(DeviceError::from_transport)?;

    if !status.is_success() {
        debug!(%url, status = status.as_u16(), "device returned error status");
        return Err(DeviceError::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    extract_message(body)
}

/// Pull `message` out of a JSON body, falling back to the raw text.
fn extract_message(body: String) -> Result<String, DeviceError> {
    let value: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Could not decode JSON from response");
            return Err(DeviceError::Decode { body });
        }
    };

    Ok(match value.get("message") {
        Some(Value::String(message)) => message.clone(),
        Some(other) => other.to_string(),
        None => format!("Raw response content: {body}"),
    })
}
