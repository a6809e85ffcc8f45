use anyhow::Context;
use clap::Parser;
use printcheck::{cli, collector, config, error, ocr, pipeline, preprocess, roster, scanner};
use cli::{Cli, Commands};
use config::Config;
use printcheck_common::{resolve_record, DuplicatePolicy, StopwordSet};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Run { folder, roster: roster_path, output, format, crop_height, concurrency, use_cache, strict_roster } => {
            println!("📝 printcheck - 프린트 제출 판독\n");

            // 배치 시작 전에 치명적 오류를 모두 확인
            println!("[1/4] 명단 로드 중...");
            let roster_options = roster_options(&config, strict_roster || config.strict_roster);
            let roster = roster::load_roster(&roster_path, &roster_options)
                .with_context(|| format!("명단 로드 실패: {}", roster_path.display()))?;
            println!("✔ 학생 {}명\n", roster.len());

            let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
            pipeline::prepare_output_dir(&output_dir)?;

            let engine = ocr::ClovaOcr::new(
                config.get_ocr_url()?,
                config.get_ocr_secret()?,
                Duration::from_secs(config.timeout_seconds),
            )?;

            println!("[2/4] 사진 스캔 중...");
            let images = scanner::scan_folder(&folder)?;
            if images.is_empty() {
                return Err(error::PrintCheckError::NoImagesFound(folder.display().to_string()).into());
            }
            println!("✔ 사진 {}장\n", images.len());

            println!("[3/4] OCR 판독 중...{}", if use_cache { " (캐시 사용)" } else { "" });
            let mut cache = use_cache.then(|| ocr::CacheFile::load(&folder));
            let options = collector::CollectOptions {
                cropped_dir: output_dir.join("cropped"),
                preprocess: preprocess::PreprocessOptions {
                    crop_height: crop_height.unwrap_or(config.crop_height),
                    contrast: config.contrast,
                    brightness: config.brightness,
                },
                concurrency: concurrency.unwrap_or(config.concurrency),
                show_progress: !cli.verbose,
            };
            let outcome = collector::collect_records(
                &images,
                &engine,
                &roster,
                &StopwordSet::default(),
                cache.as_ref(),
                &options,
            )
            .await?;

            if let Some(cache) = cache.as_mut() {
                for (key, entry) in outcome.new_cache_entries {
                    cache.insert(key, entry);
                }
                if let Err(e) = cache.save(&folder) {
                    tracing::warn!(error = %e, "캐시 저장 실패");
                }
            }
            println!("✔ 판독 완료\n");

            println!("[4/4] 결과 저장 중...");
            let summary = pipeline::write_outputs(&outcome.records, &output_dir, format)?;
            report(&summary);
        }

        Commands::Matrix { input, output, format } => {
            println!("📊 printcheck - 제출 매트릭스\n");

            let records = printcheck::export::table::read_results_csv(&input)?;
            let output_dir = output
                .or_else(|| input.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."));

            let summary = pipeline::write_matrix(&records, &output_dir, format)?;
            report(&summary);
        }

        Commands::Extract { roster: roster_path, text } => {
            let roster = roster::load_roster(&roster_path, &roster_options(&config, config.strict_roster))?;

            let text = if text.is_empty() {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                text.join(" ")
            };
            let tokens: Vec<&str> = text.split_whitespace().collect();

            let fields = printcheck_common::extract_fields(&tokens, &StopwordSet::default());
            let record = resolve_record("-", &tokens, &roster, &StopwordSet::default());

            println!("추출:");
            println!("  프린트 종류: {}", fields.print_type.as_deref().unwrap_or("-"));
            println!("  학번: {}", fields.student_id.as_deref().unwrap_or("-"));
            println!("  이름: {}", fields.name.as_deref().unwrap_or("-"));
            println!("명단 대조 후:");
            println!("  학번: {}", or_dash(&record.student_id));
            println!("  이름: {}", or_dash(&record.name));
            println!("  상태: {:?}", record.status);
        }

        Commands::Config { set_secret, set_url, show } => {
            let mut config = config;

            if let Some(secret) = set_secret {
                config.set_ocr_secret(secret)?;
                println!("✔ OCR 시크릿 키를 설정했습니다");
            }

            if let Some(url) = set_url {
                config.set_ocr_url(url)?;
                println!("✔ OCR API 주소를 설정했습니다");
            }

            if show {
                println!("설정:");
                println!("  OCR API 주소: {}", config.ocr_url.as_deref().unwrap_or("미설정"));
                println!("  OCR 시크릿 키: {}", if config.ocr_secret.is_some() { "설정됨" } else { "미설정" });
                println!("  자르기 높이: {}px", config.crop_height);
                println!("  대비/밝기: {} / {}", config.contrast, config.brightness);
                println!("  동시 요청 수: {}", config.concurrency);
                println!("  타임아웃: {}초", config.timeout_seconds);
                println!("  명단 열: {} / {}", config.id_column, config.name_column);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = ocr::CacheFile::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = ocr::CacheFile::load(&target);
                    println!("캐시 정보:");
                    println!("  경로: {}", cache_path.display());
                    println!("  건수: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  크기: {} bytes", meta.len());
                    }
                } else {
                    println!("캐시 파일이 없습니다: {}", cache_path.display());
                }
            }

            if clear {
                match ocr::CacheFile::clear(&target) {
                    Ok(true) => println!("✔ 캐시를 삭제했습니다: {}", cache_path.display()),
                    Ok(false) => println!("캐시 파일이 없습니다"),
                    Err(e) => println!("캐시 삭제 오류: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn roster_options(config: &Config, strict: bool) -> roster::RosterOptions {
    roster::RosterOptions {
        id_column: config.id_column.clone(),
        name_column: config.name_column.clone(),
        policy: if strict { DuplicatePolicy::Reject } else { DuplicatePolicy::LastWins },
    }
}

fn report(summary: &pipeline::OutputSummary) {
    if !summary.result_path.as_os_str().is_empty() {
        println!("✔ 결과표 저장: {}", summary.result_path.display());
    }

    match &summary.failed_path {
        Some(path) => println!("⚠️ 인식 실패 {}건, 목록 저장 완료: {}", summary.failed_count, path.display()),
        None if !summary.result_path.as_os_str().is_empty() => println!("✔ 인식 실패 없음"),
        None => {}
    }

    for path in &summary.matrix_paths {
        println!(
            "✅ 학생-프린트 제출 여부 매트릭스 저장 완료: {} (학생 {}명 × 프린트 {}종)",
            path.display(),
            summary.student_count,
            summary.print_type_count
        );
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}
