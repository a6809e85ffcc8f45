pub mod table;
pub mod excel;

use crate::cli::ExportFormat;
use crate::error::Result;
use printcheck_common::SubmissionMatrix;
use std::path::{Path, PathBuf};

pub const RESULT_FILE: &str = "result.csv";
pub const FAILED_FILE: &str = "failed_images.csv";
pub const MATRIX_STEM: &str = "student_vs_print_type";

/// 매트릭스를 지정 형식으로 저장하고 만든 파일 경로를 돌려준다
pub fn export_matrix(
    matrix: &SubmissionMatrix,
    format: ExportFormat,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    if format.includes_csv() {
        let path = output_dir.join(format!("{}.csv", MATRIX_STEM));
        table::write_matrix_csv(matrix, &path)?;
        written.push(path);
    }

    if format.includes_xlsx() {
        let path = output_dir.join(format!("{}.xlsx", MATRIX_STEM));
        excel::write_matrix_xlsx(matrix, &path)?;
        written.push(path);
    }

    Ok(written)
}
