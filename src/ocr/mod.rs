//! OCR 연동 모듈
//!
//! OCR 엔진은 `OcrEngine` 트레이트 뒤에 숨긴다. 실제 호출은 Clova OCR(HTTP),
//! 테스트에서는 메모리 상의 가짜 엔진을 쓴다.

pub mod cache;
mod clova;

pub use cache::{CacheEntry, CacheFile};
pub use clova::{parse_response, ClovaOcr};

use crate::error::OcrError;
use std::future::Future;
use std::path::Path;

/// 이미지 1장 → 인식된 텍스트 토큰 (읽은 순서대로)
pub trait OcrEngine: Sync {
    fn recognize(&self, image_path: &Path) -> impl Future<Output = Result<Vec<String>, OcrError>> + Send;
}
