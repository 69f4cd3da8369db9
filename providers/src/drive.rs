//! Google Drive uploads.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::DriveSettings;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(rename = "webViewLink")]
    pub web_view_link: Option<String>,
}

#[async_trait]
pub trait DriveClient: Send + Sync {
    async fn upload(&self, name: &str, mime: &str, bytes: Vec<u8>) -> Result<DriveFile>;
}

#[derive(Clone)]
pub struct GoogleDrive {
    client: Client,
    settings: DriveSettings,
}

impl GoogleDrive {
    pub fn new(settings: DriveSettings) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, settings })
    }
}

/// Metadata part followed by the media part, as the multipart upload endpoint expects.
fn multipart_related(boundary: &str, metadata: &str, mime: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(bytes.len() + metadata.len() + 256);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n\
             --{boundary}\r\nContent-Type: {mime}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[async_trait]
impl DriveClient for GoogleDrive {
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    async fn upload(&self, name: &str, mime: &str, bytes: Vec<u8>) -> Result<DriveFile> {
        let mut metadata = json!({ "name": name, "mimeType": mime });
        if let Some(folder) = &self.settings.folder_id {
            metadata["parents"] = json!([folder]);
        }
        let boundary = format!("hookbot-{}", Uuid::new_v4().simple());
        let body = multipart_related(&boundary, &metadata.to_string(), mime, &bytes);

        let url = format!(
            "{}/upload/drive/v3/files",
            self.settings.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(url)
            .query(&[("uploadType", "multipart"), ("fields", "id,name,webViewLink")])
            .bearer_auth(&self.settings.access_token)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={boundary}"),
            )
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            bail!("Drive API error ({status}): {text}");
        }
        let file: DriveFile = response.json().await?;
        info!(file_id = %file.id, "Uploaded to Drive");
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::multipart_related;

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_related("b", r#"{"name":"a.txt"}"#, "text/plain", b"hello");
        let text = String::from_utf8(body).unwrap();
        assert!(text.starts_with("--b\r\nContent-Type: application/json"));
        assert!(text.contains("\r\n\r\n{\"name\":\"a.txt\"}\r\n--b\r\nContent-Type: text/plain\r\n\r\nhello"));
        assert!(text.ends_with("\r\n--b--\r\n"));
    }
}
