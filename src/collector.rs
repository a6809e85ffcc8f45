//! 판독 파이프라인 모듈
//!
//! 이미지마다 자르기 → OCR → 필드 추출 → 명단 대조를 거쳐 Record를 정확히 1건 만든다.
//! 한 장의 실패(전처리・OCR)는 그 장의 ERROR 레코드로만 남고 배치는 계속된다.

use crate::error::{OcrError, PrintCheckError, Result};
use crate::ocr::cache::{compute_cache_key, CacheEntry, CacheFile};
use crate::ocr::OcrEngine;
use crate::preprocess::{self, PreprocessOptions};
use crate::scanner::ImageInfo;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use printcheck_common::{resolve_record, Record, Roster, StopwordSet};
use rayon::prelude::*;
use std::path::PathBuf;

/// 수집 설정
#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// 잘라낸 이미지 저장 폴더
    pub cropped_dir: PathBuf,
    pub preprocess: PreprocessOptions,
    /// 동시 OCR 요청 수 (1이면 순차)
    pub concurrency: usize,
    /// 진행 표시줄 출력
    pub show_progress: bool,
}

/// 수집 결과
#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// 입력 이미지와 같은 순서, 같은 개수
    pub records: Vec<Record>,
    /// 이번에 새로 OCR한 결과 (캐시 저장용)
    pub new_cache_entries: Vec<(String, CacheEntry)>,
}

/// 이미지별 OCR 입력
enum Job {
    Cached(Vec<String>),
    Cropped(PathBuf),
    Broken(OcrError),
}

/// 모든 이미지를 판독
pub async fn collect_records<E: OcrEngine>(
    images: &[ImageInfo],
    engine: &E,
    roster: &Roster,
    stopwords: &StopwordSet,
    cache: Option<&CacheFile>,
    options: &CollectOptions,
) -> Result<CollectOutcome> {
    std::fs::create_dir_all(&options.cropped_dir)?;

    // 1. 캐시 확인
    let keys: Vec<Option<String>> = match cache {
        Some(_) => images
            .par_iter()
            .map(|img| compute_cache_key(&img.path, &options.preprocess).ok())
            .collect(),
        None => vec![None; images.len()],
    };
    let hits: Vec<Option<Vec<String>>> = keys
        .iter()
        .map(|key| {
            let key = key.as_deref()?;
            cache?.get(key).map(|tokens| tokens.to_vec())
        })
        .collect();

    let hit_count = hits.iter().filter(|h| h.is_some()).count();
    if hit_count > 0 {
        tracing::info!(hits = hit_count, "캐시 적중");
    }

    // 2. 캐시 미스만 병렬 전처리
    let pending: Vec<ImageInfo> = images
        .iter()
        .zip(&hits)
        .filter(|(_, hit)| hit.is_none())
        .map(|(img, _)| img.clone())
        .collect();

    let cropped_dir = options.cropped_dir.clone();
    let preprocess_options = options.preprocess;
    let mut cropped = tokio::task::spawn_blocking(move || {
        preprocess::preprocess_all(&pending, &cropped_dir, &preprocess_options)
    })
    .await
    .map_err(|e| PrintCheckError::Task(e.to_string()))?
    .into_iter();

    let mut jobs = Vec::with_capacity(images.len());
    for hit in hits {
        let job = match hit {
            Some(tokens) => Job::Cached(tokens),
            None => match cropped.next() {
                Some(Ok(path)) => Job::Cropped(path),
                Some(Err(e)) => Job::Broken(e),
                None => Job::Broken(OcrError::Preprocess("전처리 결과 누락".into())),
            },
        };
        jobs.push(job);
    }

    // 3. OCR + 판독 (순서 유지, 동시 요청 수 제한)
    let progress = progress_bar(images.len() as u64, options.show_progress);

    let progress_ref = &progress;

    let results: Vec<(Record, Option<(String, CacheEntry)>)> = stream::iter(images.iter().zip(keys).zip(jobs))
        .map(move |((img, key), job)| async move {
            let outcome = process_one(img, key, job, engine, roster, stopwords).await;
            progress_ref.inc(1);
            outcome
        })
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    progress.finish_and_clear();

    let mut outcome = CollectOutcome::default();
    for (record, entry) in results {
        outcome.records.push(record);
        outcome.new_cache_entries.extend(entry);
    }

    Ok(outcome)
}

async fn process_one<E: OcrEngine>(
    img: &ImageInfo,
    key: Option<String>,
    job: Job,
    engine: &E,
    roster: &Roster,
    stopwords: &StopwordSet,
) -> (Record, Option<(String, CacheEntry)>) {
    let (tokens, fresh) = match job {
        Job::Cached(tokens) => (Ok(tokens), false),
        Job::Cropped(path) => (engine.recognize(&path).await, true),
        Job::Broken(e) => (Err(e), false),
    };

    match tokens {
        Ok(tokens) => {
            let record = resolve_record(&img.file_name, &tokens, roster, stopwords);
            tracing::debug!(
                file = %img.file_name,
                print_type = %record.print_type,
                student_id = %record.student_id,
                name = %record.name,
                status = ?record.status,
                "판독 완료"
            );

            let entry = match key {
                Some(key) if fresh => Some((
                    key,
                    CacheEntry {
                        file_name: img.file_name.clone(),
                        file_size: std::fs::metadata(&img.path).map(|m| m.len()).unwrap_or(0),
                        tokens,
                    },
                )),
                _ => None,
            };

            (record, entry)
        }
        Err(e) => {
            tracing::warn!(file = %img.file_name, error = %e, "판독 실패, ERROR 레코드로 기록");
            (Record::error_sentinel(&img.file_name), None)
        }
    }
}

fn progress_bar(len: u64, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} ({eta})") {
        bar.set_style(style);
    }
    bar
}

/// 실패 레코드의 파일명 목록
pub fn failed_files(records: &[Record]) -> Vec<&str> {
    records
        .iter()
        .filter(|r| !r.is_success())
        .map(|r| r.image_id.as_str())
        .collect()
}
