//! 통합 테스트 공용 도우미

#![allow(dead_code)]

use image::{Rgb, RgbImage};
use printcheck::error::OcrError;
use printcheck::ocr::OcrEngine;
use printcheck::scanner::{self, ImageInfo};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 파일명별로 정해진 응답을 돌려주는 OCR
#[derive(Default)]
pub struct MockOcr {
    /// 원본 파일명 → 토큰 (None이면 OCR 실패)
    responses: HashMap<String, Option<Vec<String>>>,
    calls: AtomicUsize,
}

impl MockOcr {
    pub fn with(mut self, file_name: &str, tokens: &[&str]) -> Self {
        self.responses.insert(
            file_name.to_string(),
            Some(tokens.iter().map(|t| t.to_string()).collect()),
        );
        self
    }

    pub fn failing(mut self, file_name: &str) -> Self {
        self.responses.insert(file_name.to_string(), None);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OcrEngine for MockOcr {
    async fn recognize(&self, image_path: &Path) -> Result<Vec<String>, OcrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let cropped_name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let original = cropped_name.trim_start_matches("cropped_");

        match self.responses.get(original) {
            Some(Some(tokens)) => Ok(tokens.clone()),
            Some(None) => Err(OcrError::MalformedResponse("mock failure".into())),
            None => Ok(Vec::new()),
        }
    }
}

/// 폴더에 작은 PNG 사진들을 만들고 스캔 결과를 돌려준다
pub fn create_images(folder: &Path, names: &[&str]) -> Vec<ImageInfo> {
    for (i, name) in names.iter().enumerate() {
        let shade = (40 * i as u32 % 200) as u8 + 30;
        let img = RgbImage::from_pixel(32, 400, Rgb([shade, shade, shade]));
        img.save(folder.join(name)).expect("테스트 이미지 저장 실패");
    }
    scanner::scan_folder(folder).expect("스캔 실패")
}
