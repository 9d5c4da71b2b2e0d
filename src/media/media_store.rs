use std::time::Duration;

use serde_json::{json, Value};

use crate::error::{AppError, Result};

/// External media store. Takes a raw image (base64 data URI) and returns a
/// durable URL. An upload failure aborts the send that requested it.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload_image(&self, data_uri: &str) -> Result<String>;
}

/// HTTP client for a Cloudinary-style unsigned upload endpoint.
pub struct HttpMediaStore {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: Option<String>,
}

impl HttpMediaStore {
    pub fn new(upload_url: String, upload_preset: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            upload_url,
            upload_preset,
        }
    }
}

#[async_trait::async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload_image(&self, data_uri: &str) -> Result<String> {
        let mut body = json!({ "file": data_uri });
        if let Some(preset) = &self.upload_preset {
            body["upload_preset"] = json!(preset);
        }

        let response = self
            .client
            .post(&self.upload_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upload(format!("Media store request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Upload(format!(
                "Media store returned {}: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AppError::Upload(format!("Failed to parse media store response: {}", e)))?;

        body.get("secure_url")
            .and_then(|v| v.as_str())
            .or_else(|| body.get("url").and_then(|v| v.as_str()))
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::Upload("No URL in media store response".to_string()))
    }
}
