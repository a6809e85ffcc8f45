//! 제출 매트릭스 Excel 출력

use crate::error::{PrintCheckError, Result};
use printcheck_common::matrix::marker;
use printcheck_common::SubmissionMatrix;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};
use std::path::Path;

const SHEET_NAME: &str = "제출 현황";

pub fn write_matrix_xlsx(matrix: &SubmissionMatrix, path: &Path) -> Result<()> {
    let header_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);
    let key_format = Format::new().set_border(FormatBorder::Thin);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(SHEET_NAME)
        .map_err(|e| PrintCheckError::ExcelGeneration(format!("시트 이름 설정 오류: {}", e)))?;

    worksheet
        .set_column_width(0, 20)
        .map_err(|e| PrintCheckError::ExcelGeneration(format!("열 너비 설정 오류: {}", e)))?;

    worksheet
        .write_string_with_format(0, 0, super::table::COL_IDENTIFIER, &header_format)
        .map_err(|e| PrintCheckError::ExcelGeneration(format!("헤더 쓰기 오류: {}", e)))?;
    for (i, column) in matrix.columns().iter().enumerate() {
        worksheet
            .write_string_with_format(0, (i + 1) as u16, column, &header_format)
            .map_err(|e| PrintCheckError::ExcelGeneration(format!("헤더 쓰기 오류: {}", e)))?;
    }

    for (r, row) in matrix.rows().iter().enumerate() {
        let excel_row = (r + 1) as u32;
        worksheet
            .write_string_with_format(excel_row, 0, &row.key, &key_format)
            .map_err(|e| PrintCheckError::ExcelGeneration(format!("셀 쓰기 오류: {}", e)))?;

        for (c, &present) in row.cells.iter().enumerate() {
            worksheet
                .write_string_with_format(excel_row, (c + 1) as u16, marker(present), &cell_format)
                .map_err(|e| PrintCheckError::ExcelGeneration(format!("셀 쓰기 오류: {}", e)))?;
        }
    }

    workbook
        .save(path)
        .map_err(|e| PrintCheckError::ExcelGeneration(format!("저장 오류: {}", e)))?;

    Ok(())
}
