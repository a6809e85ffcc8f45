//! 명단 파일 로드 모듈
//!
//! CSV(UTF-8, BOM 허용) 또는 Excel(첫 시트)에서 학번・이름 열을 읽어 Roster를 만든다.

use crate::error::{PrintCheckError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use printcheck_common::{DuplicatePolicy, Roster};
use std::path::Path;

/// 명단 로드 옵션
#[derive(Debug, Clone)]
pub struct RosterOptions {
    pub id_column: String,
    pub name_column: String,
    pub policy: DuplicatePolicy,
}

impl Default for RosterOptions {
    fn default() -> Self {
        Self {
            id_column: "학번".into(),
            name_column: "이름".into(),
            policy: DuplicatePolicy::LastWins,
        }
    }
}

/// 명단 파일을 읽어 Roster 생성
pub fn load_roster(path: &Path, options: &RosterOptions) -> Result<Roster> {
    if !path.is_file() {
        return Err(PrintCheckError::FileNotFound(path.display().to_string()));
    }

    let table = read_table(path)?;
    let roster = roster_from_table(&table, options)?;

    for entry in roster.overrides() {
        tracing::warn!(field = entry.field, value = %entry.value, "명단 중복: 뒤 행으로 덮어씀");
    }
    tracing::info!(path = %path.display(), students = roster.len(), "명단 로드 완료");

    Ok(roster)
}

/// 헤더 포함 표에서 Roster 생성
pub fn roster_from_table(table: &[Vec<String>], options: &RosterOptions) -> Result<Roster> {
    let (header, rows) = table
        .split_first()
        .ok_or_else(|| PrintCheckError::InvalidRoster("빈 파일".into()))?;

    let id_col = column_index(header, &options.id_column)?;
    let name_col = column_index(header, &options.name_column)?;

    let mut pairs = Vec::with_capacity(rows.len());
    for (line, row) in rows.iter().enumerate() {
        let id = row.get(id_col).map(|s| s.trim()).unwrap_or_default();
        let name = row.get(name_col).map(|s| s.trim()).unwrap_or_default();

        if id.is_empty() || name.is_empty() {
            // 헤더가 1행이므로 데이터 행 번호는 +2
            tracing::warn!(row = line + 2, "학번 또는 이름이 비어 있어 건너뜀");
            continue;
        }
        pairs.push((id, name));
    }

    let roster = Roster::from_pairs(pairs, options.policy)?;
    if roster.is_empty() {
        return Err(PrintCheckError::InvalidRoster("학생이 한 명도 없습니다".into()));
    }

    Ok(roster)
}

fn column_index(header: &[String], column: &str) -> Result<usize> {
    header
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| PrintCheckError::InvalidRoster(format!("'{}' 열이 없습니다", column)))
}

fn read_table(path: &Path) -> Result<Vec<Vec<String>>> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xls" => read_excel(path),
        _ => read_csv(path),
    }
}

fn read_csv(path: &Path) -> Result<Vec<Vec<String>>> {
    let content = std::fs::read_to_string(path)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(&content);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut table = Vec::new();
    for record in reader.records() {
        let record = record?;
        table.push(record.iter().map(str::to_string).collect());
    }

    Ok(table)
}

fn read_excel(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| PrintCheckError::ExcelRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PrintCheckError::ExcelRead("시트가 없습니다".into()))?
        .map_err(|e| PrintCheckError::ExcelRead(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// 숫자 셀(100001.0)은 정수 표기로
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Float(f) if f.fract() == 0.0 => format!("{}", *f as i64),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
