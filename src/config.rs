use crate::error::{PrintCheckError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const SECRET_ENV: &str = "CLOVA_OCR_SECRET";
pub const URL_ENV: &str = "CLOVA_OCR_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ocr_url: Option<String>,
    pub ocr_secret: Option<String>,
    /// 자를 상단 영역 높이 (px)
    pub crop_height: u32,
    pub contrast: f32,
    pub brightness: f32,
    /// 동시 OCR 요청 수
    pub concurrency: usize,
    pub timeout_seconds: u64,
    /// 명단의 학번 열 이름
    pub id_column: String,
    /// 명단의 이름 열 이름
    pub name_column: String,
    /// 명단 중복을 에러로 처리
    pub strict_roster: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr_url: None,
            ocr_secret: None,
            crop_height: 350,
            contrast: 2.0,
            brightness: 1.5,
            concurrency: 4,
            timeout_seconds: 30,
            id_column: "학번".into(),
            name_column: "이름".into(),
            strict_roster: false,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PrintCheckError::Config("홈 디렉터리를 찾을 수 없습니다".into()))?;
        Ok(home.join(".config").join("printcheck").join("config.json"))
    }

    pub fn get_ocr_secret(&self) -> Result<String> {
        // 환경 변수 우선
        if let Ok(secret) = std::env::var(SECRET_ENV) {
            if !secret.trim().is_empty() {
                return Ok(secret);
            }
        }

        self.ocr_secret.clone().ok_or(PrintCheckError::MissingOcrSecret)
    }

    pub fn get_ocr_url(&self) -> Result<String> {
        if let Ok(url) = std::env::var(URL_ENV) {
            if !url.trim().is_empty() {
                return Ok(url);
            }
        }

        self.ocr_url.clone().ok_or(PrintCheckError::MissingOcrUrl)
    }

    pub fn set_ocr_secret(&mut self, secret: String) -> Result<()> {
        self.ocr_secret = Some(secret);
        self.save()
    }

    pub fn set_ocr_url(&mut self, url: String) -> Result<()> {
        self.ocr_url = Some(url);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.crop_height, 350);
        assert_eq!(config.contrast, 2.0);
        assert_eq!(config.brightness, 1.5);
        assert_eq!(config.id_column, "학번");
        assert_eq!(config.name_column, "이름");
        assert!(!config.strict_roster);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"crop_height": 400, "concurrency": 8}"#).unwrap();
        assert_eq!(config.crop_height, 400);
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.ocr_secret.is_none());
    }
}
