//! 이미지 전처리 모듈
//!
//! OCR 전에 사진 상단(학번・이름・프린트 번호가 있는 머리말 영역)만 잘라내고
//! 대비・밝기를 올린다.

use crate::error::OcrError;
use crate::scanner::ImageInfo;
use image::{DynamicImage, GenericImageView, Rgb, RgbImage};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 전처리 설정
#[derive(Debug, Clone, Copy)]
pub struct PreprocessOptions {
    /// 남길 상단 높이 (px)
    pub crop_height: u32,
    /// 대비 배율 (1.0 = 원본)
    pub contrast: f32,
    /// 밝기 배율 (1.0 = 원본)
    pub brightness: f32,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            crop_height: 350,
            contrast: 2.0,
            brightness: 1.5,
        }
    }
}

/// 잘라낸 이미지의 저장 경로
pub fn cropped_path(cropped_dir: &Path, file_name: &str) -> PathBuf {
    cropped_dir.join(format!("cropped_{}", file_name))
}

/// 원본을 읽어 전처리 후 dst에 저장
pub fn crop_and_enhance(src: &Path, dst: &Path, options: &PreprocessOptions) -> Result<(), OcrError> {
    let img = image::open(src)
        .map_err(|e| OcrError::Preprocess(format!("{}: {}", src.display(), e)))?;

    let enhanced = enhance(&img, options);

    enhanced
        .save(dst)
        .map_err(|e| OcrError::Preprocess(format!("{}: {}", dst.display(), e)))?;

    Ok(())
}

/// 상단 자르기 + 대비 + 밝기 (메모리 상 처리)
pub fn enhance(img: &DynamicImage, options: &PreprocessOptions) -> RgbImage {
    let (width, height) = img.dimensions();
    let crop_height = options.crop_height.min(height);
    let mut cropped = img.crop_imm(0, 0, width, crop_height).to_rgb8();

    adjust_contrast(&mut cropped, options.contrast);
    adjust_brightness(&mut cropped, options.brightness);

    cropped
}

/// 회색조 평균 휘도를 기준으로 각 채널을 factor배 벌린다
fn adjust_contrast(img: &mut RgbImage, factor: f32) {
    let pixel_count = (img.width() as u64 * img.height() as u64).max(1);
    let luma_sum: u64 = img.pixels().map(|p| luminance(p) as u64).sum();
    let mean = (luma_sum as f32 / pixel_count as f32 + 0.5).floor();

    for pixel in img.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = clamp_channel(mean + factor * (*channel as f32 - mean));
        }
    }
}

/// 각 채널을 factor배
fn adjust_brightness(img: &mut RgbImage, factor: f32) {
    for pixel in img.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = clamp_channel(*channel as f32 * factor);
        }
    }
}

/// ITU-R 601-2 휘도
fn luminance(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    ((r as u32 * 299 + g as u32 * 587 + b as u32 * 114) / 1000) as u8
}

fn clamp_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// 여러 장을 병렬 전처리. 결과는 입력 순서를 유지한다.
pub fn preprocess_all(
    images: &[ImageInfo],
    cropped_dir: &Path,
    options: &PreprocessOptions,
) -> Vec<Result<PathBuf, OcrError>> {
    images
        .par_iter()
        .map(|img| {
            let dst = cropped_path(cropped_dir, &img.file_name);
            crop_and_enhance(&img.path, &dst, options).map(|_| dst)
        })
        .collect()
}
