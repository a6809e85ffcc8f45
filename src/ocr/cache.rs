//! OCR 결과 캐시 모듈
//!
//! 원본 이미지의 SHA-256과 전처리 설정(자르기 높이, 대비, 밝기)을 키로 OCR 토큰을 저장해,
//! 같은 사진을 다시 돌릴 때 OCR 호출을 생략한다.

use crate::error::Result;
use crate::preprocess::PreprocessOptions;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".ocr-cache.json";

/// 캐시 파일 구조
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// 버전 (호환성 확인용)
    version: u32,
    /// 키 → OCR 결과
    entries: HashMap<String, CacheEntry>,
}

/// 캐시 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub file_size: u64,
    /// OCR 토큰 (읽은 순서)
    pub tokens: Vec<String>,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// 캐시 파일 읽기. 없거나 깨졌거나 버전이 다르면 빈 캐시.
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %cache_path.display(), error = %e, "캐시 파일을 열 수 없어 새로 만듭니다");
                return Self::default();
            }
        };

        match serde_json::from_reader::<_, CacheFile>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(cache) => {
                tracing::warn!(found = cache.version, expected = Self::CURRENT_VERSION, "캐시 버전 불일치, 새로 만듭니다");
                Self::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "캐시 파일 해석 실패, 새로 만듭니다");
                Self::default()
            }
        }
    }

    pub fn save(&self, folder: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// 캐시 파일 삭제. 파일이 있었으면 true.
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(cache_path)?;
        Ok(true)
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(|e| e.tokens.as_slice())
    }

    pub fn insert(&mut self, key: String, entry: CacheEntry) {
        self.entries.insert(key, entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 캐시 키: 원본 바이트의 SHA-256 + 전처리 설정
pub fn compute_cache_key(path: &Path, preprocess: &PreprocessOptions) -> Result<String> {
    let bytes = std::fs::read(path)?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let digest = hex::encode(hasher.finalize());

    Ok(format!(
        "{}-h{}-c{}-b{}",
        digest, preprocess.crop_height, preprocess.contrast, preprocess.brightness
    ))
}
