//! CSV 입출력
//!
//! 한글이 엑셀에서 깨지지 않도록 UTF-8 BOM을 붙여 쓴다.

use crate::error::{PrintCheckError, Result};
use printcheck_common::matrix::marker;
use printcheck_common::{Record, SubmissionMatrix, ERROR_MARKER};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub const COL_FILE: &str = "파일명";
pub const COL_PRINT_TYPE: &str = "프린트 종류";
pub const COL_STUDENT_ID: &str = "학번";
pub const COL_NAME: &str = "이름";
pub const COL_IDENTIFIER: &str = "식별자";

fn bom_writer(path: &Path) -> Result<csv::Writer<BufWriter<File>>> {
    let mut file = BufWriter::new(File::create(path)?);
    file.write_all(UTF8_BOM)?;
    Ok(csv::Writer::from_writer(file))
}

/// 결과표: 이미지 1장당 1행
pub fn write_results_csv(records: &[Record], path: &Path) -> Result<()> {
    let mut writer = bom_writer(path)?;
    writer.write_record([COL_FILE, COL_PRINT_TYPE, COL_STUDENT_ID, COL_NAME])?;

    for record in records {
        writer.write_record([
            record.image_id.as_str(),
            record.print_type.as_str(),
            record.student_id.as_str(),
            record.name.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// 실패 목록: 파일명만
pub fn write_failed_csv(files: &[&str], path: &Path) -> Result<()> {
    let mut writer = bom_writer(path)?;
    writer.write_record([COL_FILE])?;

    for file in files {
        writer.write_record([*file])?;
    }

    writer.flush()?;
    Ok(())
}

/// 제출 매트릭스: 식별자 + 프린트 종류별 O/X
pub fn write_matrix_csv(matrix: &SubmissionMatrix, path: &Path) -> Result<()> {
    let mut writer = bom_writer(path)?;

    let mut header = vec![COL_IDENTIFIER];
    header.extend(matrix.columns().iter().map(|c| c.as_str()));
    writer.write_record(&header)?;

    for row in matrix.rows() {
        let mut line = vec![row.key.as_str()];
        line.extend(row.cells.iter().map(|&present| marker(present)));
        writer.write_record(&line)?;
    }

    writer.flush()?;
    Ok(())
}

/// 결과표를 다시 읽어 Record로 복원 (상태는 값으로 재판정)
pub fn read_results_csv(path: &Path) -> Result<Vec<Record>> {
    if !path.is_file() {
        return Err(PrintCheckError::FileNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let index_of = |column: &str| {
        headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| PrintCheckError::InvalidResultTable(format!("'{}' 열이 없습니다", column)))
    };
    let file_col = index_of(COL_FILE)?;
    let print_col = index_of(COL_PRINT_TYPE)?;
    let id_col = index_of(COL_STUDENT_ID)?;
    let name_col = index_of(COL_NAME)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| row.get(i).unwrap_or_default().trim();

        let record = if [print_col, id_col, name_col].iter().all(|&i| cell(i) == ERROR_MARKER) {
            Record::error_sentinel(cell(file_col))
        } else {
            Record::new(cell(file_col), cell(print_col), cell(id_col), cell(name_col))
        };
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use printcheck_common::{build_matrix, RecordStatus};

    #[test]
    fn test_results_csv_has_bom_and_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.csv");
        let records = vec![Record::new("a.jpg", "pp.011~018", "100001", "박민수")];

        write_results_csv(&records, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("파일명,프린트 종류,학번,이름"));
        assert_eq!(lines.next(), Some("a.jpg,pp.011~018,100001,박민수"));
    }

    #[test]
    fn test_read_results_restores_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.csv");
        let records = vec![
            Record::new("a.jpg", "pp.011~018", "100001", "박민수"),
            Record::new("b.jpg", "", "", ""),
            Record::error_sentinel("c.jpg"),
        ];
        write_results_csv(&records, &path).unwrap();

        let restored = read_results_csv(&path).unwrap();
        assert_eq!(restored, records);
        assert_eq!(restored[2].status, RecordStatus::Failed);
    }

    #[test]
    fn test_read_results_missing_column() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.csv");
        std::fs::write(&path, "파일명,학번\na.jpg,100001\n").unwrap();

        let result = read_results_csv(&path);
        assert!(matches!(result, Err(PrintCheckError::InvalidResultTable(_))));
    }

    #[test]
    fn test_matrix_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        let matrix = build_matrix(&[
            Record::new("a.jpg", "pp.101~105", "100001", "박민수"),
            Record::new("b.jpg", "pp.011~018", "100002", "김지은"),
        ]);

        write_matrix_csv(&matrix, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let text = text.trim_start_matches('\u{feff}');
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "식별자,pp.011~018,pp.101~105");
        assert_eq!(lines[1], "김지은 (100002),O,X");
        assert_eq!(lines[2], "박민수 (100001),X,O");
    }

    #[test]
    fn test_failed_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("failed.csv");

        write_failed_csv(&["x.jpg", "y.jpg"], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.trim_start_matches('\u{feff}').lines().collect();
        assert_eq!(lines, vec!["파일명", "x.jpg", "y.jpg"]);
    }
}
