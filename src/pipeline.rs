//! 판독 결과 저장 단계
//!
//! 결과표, 실패 목록(있을 때만), 제출 매트릭스를 출력 폴더에 쓴다.

use crate::cli::ExportFormat;
use crate::collector::failed_files;
use crate::error::{PrintCheckError, Result};
use crate::export::{self, table, FAILED_FILE, RESULT_FILE};
use printcheck_common::{build_matrix, Record};
use std::path::{Path, PathBuf};

/// 저장 결과 요약
#[derive(Debug, Clone)]
pub struct OutputSummary {
    pub result_path: PathBuf,
    /// 실패 이미지가 없으면 None
    pub failed_path: Option<PathBuf>,
    pub failed_count: usize,
    pub matrix_paths: Vec<PathBuf>,
    pub student_count: usize,
    pub print_type_count: usize,
}

const WRITE_CHECK_FILE: &str = ".printcheck-write-check";

/// 배치 시작 전 출력 폴더 준비: 만들고, 실제로 파일을 써 본 뒤 지운다
pub fn prepare_output_dir(output_dir: &Path) -> Result<()> {
    let not_writable = |source: std::io::Error| PrintCheckError::OutputNotWritable {
        path: output_dir.display().to_string(),
        source,
    };

    std::fs::create_dir_all(output_dir).map_err(not_writable)?;

    let check_path = output_dir.join(WRITE_CHECK_FILE);
    std::fs::write(&check_path, b"").map_err(not_writable)?;
    std::fs::remove_file(&check_path).map_err(not_writable)?;
    Ok(())
}

pub fn write_outputs(records: &[Record], output_dir: &Path, format: ExportFormat) -> Result<OutputSummary> {
    std::fs::create_dir_all(output_dir)?;

    let result_path = output_dir.join(RESULT_FILE);
    table::write_results_csv(records, &result_path)?;

    let failed = failed_files(records);
    let failed_path = if failed.is_empty() {
        None
    } else {
        let path = output_dir.join(FAILED_FILE);
        table::write_failed_csv(&failed, &path)?;
        Some(path)
    };

    let summary = write_matrix(records, output_dir, format)?;

    Ok(OutputSummary {
        result_path,
        failed_path,
        failed_count: failed.len(),
        ..summary
    })
}

/// 매트릭스만 저장
pub fn write_matrix(records: &[Record], output_dir: &Path, format: ExportFormat) -> Result<OutputSummary> {
    std::fs::create_dir_all(output_dir)?;

    let matrix = build_matrix(records);
    tracing::info!(
        students = matrix.rows().len(),
        print_types = matrix.columns().len(),
        "제출 매트릭스 생성"
    );
    let matrix_paths = export::export_matrix(&matrix, format, output_dir)?;

    Ok(OutputSummary {
        result_path: PathBuf::new(),
        failed_path: None,
        failed_count: 0,
        matrix_paths,
        student_count: matrix.rows().len(),
        print_type_count: matrix.columns().len(),
    })
}
