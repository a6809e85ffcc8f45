//! Clova General OCR 클라이언트

use super::OcrEngine;
use crate::error::OcrError;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const API_VERSION: &str = "V2";
const SECRET_HEADER: &str = "X-OCR-SECRET";

/// 요청 본문
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OcrRequest {
    version: &'static str,
    request_id: String,
    timestamp: i64,
    images: Vec<OcrImage>,
}

#[derive(Serialize)]
struct OcrImage {
    format: String,
    data: String,
    name: String,
}

/// 응답 본문 (필요한 부분만)
#[derive(Deserialize)]
struct OcrResponse {
    #[serde(default)]
    images: Vec<ResponseImage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseImage {
    #[serde(default)]
    infer_result: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    fields: Vec<ResponseField>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseField {
    infer_text: String,
}

pub struct ClovaOcr {
    client: reqwest::Client,
    url: String,
    secret: String,
    sequence: AtomicU64,
}

impl ClovaOcr {
    pub fn new(url: impl Into<String>, secret: impl Into<String>, timeout: Duration) -> Result<Self, OcrError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            url: url.into(),
            secret: secret.into(),
            sequence: AtomicU64::new(0),
        })
    }

    fn next_request_id(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!("printcheck-{}-{}", chrono::Utc::now().timestamp_millis(), seq)
    }

    async fn request(&self, image_path: &Path) -> Result<Vec<String>, OcrError> {
        let bytes = tokio::fs::read(image_path).await?;

        let name = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());

        let body = OcrRequest {
            version: API_VERSION,
            request_id: self.next_request_id(),
            timestamp: chrono::Utc::now().timestamp_millis(),
            images: vec![OcrImage {
                format: image_format(image_path).to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(&bytes),
                name,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header(SECRET_HEADER, &self.secret)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(OcrError::Status {
                status: status.as_u16(),
                body: text.chars().take(300).collect(),
            });
        }

        parse_response(&text)
    }
}

impl OcrEngine for ClovaOcr {
    async fn recognize(&self, image_path: &Path) -> Result<Vec<String>, OcrError> {
        tracing::debug!(path = %image_path.display(), "OCR 요청");
        self.request(image_path).await
    }
}

/// 응답 JSON → 첫 이미지의 inferText 목록
pub fn parse_response(body: &str) -> Result<Vec<String>, OcrError> {
    let response: OcrResponse = serde_json::from_str(body)
        .map_err(|e| OcrError::MalformedResponse(format!("JSON 해석 실패: {}", e)))?;

    let image = response
        .images
        .into_iter()
        .next()
        .ok_or_else(|| OcrError::MalformedResponse("images가 비어 있습니다".into()))?;

    if image.infer_result.as_deref() == Some("FAILURE") {
        return Err(OcrError::MalformedResponse(format!(
            "인식 실패: {}",
            image.message.unwrap_or_default()
        )));
    }

    Ok(image.fields.into_iter().map(|f| f.infer_text).collect())
}

fn image_format(path: &Path) -> &'static str {
    match path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "png",
        _ => "jpg",
    }
}
