use async_trait::async_trait;
use reqwest::multipart;
use serde_json::Value;
use sha1::{Digest, Sha1};

use crate::config::CloudinaryConfig;
use crate::errors::{AppError, Result};
use crate::services::media::{MediaStore, UploadedMedia};

#[derive(Clone)]
pub struct CloudinaryService {
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    client: reqwest::Client,
}

impl CloudinaryService {
    pub fn new(config: &CloudinaryConfig) -> Self {
        Self {
            api_base: config.api_base.trim_end_matches('/').to_string(),
            cloud_name: config.cloud_name.clone(),
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!("{}/{}/{}/{}", self.api_base, self.cloud_name, resource_type, action)
    }

    /// Surfaces the provider's `error.message` when present.
    async fn read_body(response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        let result: Value = response
            .json()
            .await
            .map_err(|e| AppError::cloudinary(format!("Failed to parse response: {}", e)))?;

        if let Some(error) = result.get("error") {
            let error_msg = error["message"]
                .as_str()
                .unwrap_or("Unknown Cloudinary error");
            return Err(AppError::cloudinary(error_msg));
        }

        if !status.is_success() {
            return Err(AppError::cloudinary(format!("Cloudinary API error: {}", status)));
        }

        Ok(result)
    }
}

/// Request signature: params sorted by key, joined as `k=v&k=v`, secret
/// appended, SHA-1 hex.
pub fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!("{:x}", Sha1::digest(format!("{}{}", to_sign, api_secret)))
}

#[async_trait]
impl MediaStore for CloudinaryService {
    async fn upload(&self, payload: &str, folder: &str) -> Result<UploadedMedia> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("folder", folder), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );

        let form = multipart::Form::new()
            .text("file", payload.to_string())
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("folder", folder.to_string())
            .text("signature", signature);

        let response = self
            .client
            .post(self.endpoint("auto", "upload"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::cloudinary(format!("Upload failed: {}", e)))?;

        let result = Self::read_body(response).await?;
        let media = parse_upload(&result)?;

        tracing::info!(public_id = %media.public_id, "media uploaded");
        Ok(media)
    }

    async fn destroy(&self, public_id: &str, is_video: bool) -> Result<()> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id), ("timestamp", timestamp.as_str())],
            &self.api_secret,
        );

        let params = [
            ("public_id", public_id),
            ("api_key", self.api_key.as_str()),
            ("timestamp", timestamp.as_str()),
            ("signature", signature.as_str()),
        ];

        let resource_type = if is_video { "video" } else { "image" };
        let response = self
            .client
            .post(self.endpoint(resource_type, "destroy"))
            .form(&params)
            .send()
            .await?;

        let result = Self::read_body(response).await?;

        if result["result"] != "ok" {
            return Err(AppError::cloudinary(format!(
                "Failed to delete media: {}",
                result["result"]
            )));
        }

        Ok(())
    }
}

fn parse_upload(result: &Value) -> Result<UploadedMedia> {
    let public_id = result["public_id"]
        .as_str()
        .ok_or_else(|| AppError::cloudinary("No public ID in response"))?
        .to_string();

    let url = result["url"]
        .as_str()
        .or_else(|| result["secure_url"].as_str())
        .ok_or_else(|| AppError::cloudinary("No URL in response"))?
        .to_string();

    Ok(UploadedMedia { public_id, url })
}
