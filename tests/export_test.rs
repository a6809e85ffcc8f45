//! Excel 입출력 통합 테스트
//!
//! 매트릭스 xlsx 출력과 xlsx 명단 읽기

use calamine::{open_workbook_auto, Reader};
use printcheck::cli::ExportFormat;
use printcheck::export::{excel, export_matrix};
use printcheck::roster::{load_roster, RosterOptions};
use printcheck_common::{build_matrix, Record};
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

fn sample_records() -> Vec<Record> {
    vec![
        Record::new("a.jpg", "pp.011~018", "100001", "박민수"),
        Record::new("b.jpg", "pp.019~025", "100002", "김지은"),
        Record::new("c.jpg", "pp.011~018", "100002", "김지은"),
    ]
}

#[test]
fn test_matrix_xlsx_contents() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("matrix.xlsx");
    let matrix = build_matrix(&sample_records());

    excel::write_matrix_xlsx(&matrix, &path).expect("xlsx 생성 실패");

    let mut workbook = open_workbook_auto(&path).unwrap();
    let range = workbook.worksheet_range("제출 현황").unwrap();
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect();

    assert_eq!(rows[0], vec!["식별자", "pp.011~018", "pp.019~025"]);
    assert_eq!(rows[1], vec!["김지은 (100002)", "O", "O"]);
    assert_eq!(rows[2], vec!["박민수 (100001)", "O", "X"]);
}

#[test]
fn test_export_matrix_formats() {
    let dir = tempdir().expect("Failed to create temp dir");
    let matrix = build_matrix(&sample_records());

    let csv_only = export_matrix(&matrix, ExportFormat::Csv, dir.path()).unwrap();
    assert_eq!(csv_only.len(), 1);
    assert!(csv_only[0].extension().unwrap() == "csv");

    let both = export_matrix(&matrix, ExportFormat::Both, dir.path()).unwrap();
    assert_eq!(both.len(), 2);
    assert!(both.iter().all(|p| p.exists()));
}

#[test]
fn test_empty_matrix_still_written() {
    let dir = tempdir().expect("Failed to create temp dir");
    let matrix = build_matrix(&[Record::error_sentinel("x.jpg")]);

    let written = export_matrix(&matrix, ExportFormat::Both, dir.path()).unwrap();
    assert_eq!(written.len(), 2);
}

/// 숫자 학번 셀도 문자열로 읽힌다
#[test]
fn test_roster_from_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("student_list.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "학번").unwrap();
    sheet.write_string(0, 1, "이름").unwrap();
    sheet.write_number(1, 0, 100001.0).unwrap();
    sheet.write_string(1, 1, "박민수").unwrap();
    sheet.write_string(2, 0, "100002").unwrap();
    sheet.write_string(2, 1, " 김지은 ").unwrap();
    workbook.save(&path).unwrap();

    let roster = load_roster(&path, &RosterOptions::default()).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.name_for("100001"), Some("박민수"));
    assert_eq!(roster.id_for("김지은"), Some("100002"));
}

