//! 제출 현황 매트릭스 모듈
//!
//! 판독 성공 레코드를 학생 × 프린트 종류 표로 피벗한다.
//! 같은 (학번, 프린트 종류) 쌍은 사진이 몇 장이든 한 칸으로 합친다.

use crate::types::Record;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

pub const PRESENT: &str = "O";
pub const ABSENT: &str = "X";

lazy_static::lazy_static! {
    static ref FIRST_NUMBER_RE: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// 매트릭스 1행 (학생 1명)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixRow {
    /// "이름 (학번)"
    pub key: String,
    /// columns와 같은 순서의 제출 여부
    pub cells: Vec<bool>,
}

/// 학생 × 프린트 종류 제출 현황표
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionMatrix {
    columns: Vec<String>,
    rows: Vec<MatrixRow>,
}

impl SubmissionMatrix {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 특정 칸의 제출 여부
    pub fn cell(&self, row_key: &str, column: &str) -> Option<bool> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.key == row_key)
            .and_then(|r| r.cells.get(col).copied())
    }
}

/// O/X 표기
pub fn marker(present: bool) -> &'static str {
    if present {
        PRESENT
    } else {
        ABSENT
    }
}

/// 행 키 "이름 (학번)"
pub fn row_key(name: &str, student_id: &str) -> String {
    format!("{} ({})", name, student_id)
}

/// 레코드 목록에서 매트릭스 생성
pub fn build_matrix(records: &[Record]) -> SubmissionMatrix {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut submissions: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
    let mut labels: BTreeSet<&str> = BTreeSet::new();

    for record in records.iter().filter(|r| is_complete(r)) {
        if !seen.insert((record.student_id.as_str(), record.print_type.as_str())) {
            continue;
        }

        labels.insert(record.print_type.as_str());
        submissions
            .entry(row_key(&record.name, &record.student_id))
            .or_default()
            .insert(record.print_type.as_str());
    }

    let mut columns: Vec<&str> = labels.into_iter().collect();
    columns.sort_by(|a, b| compare_print_types(a, b));

    let rows = submissions
        .into_iter()
        .map(|(key, submitted)| MatrixRow {
            key,
            cells: columns.iter().map(|c| submitted.contains(c)).collect(),
        })
        .collect();

    SubmissionMatrix {
        columns: columns.into_iter().map(str::to_string).collect(),
        rows,
    }
}

/// 매트릭스 대상: 성공 상태이고 세 필드가 모두 채워진 레코드
fn is_complete(record: &Record) -> bool {
    record.is_success()
        && !record.print_type.is_empty()
        && !record.student_id.is_empty()
        && !record.name.is_empty()
}

/// 라벨의 첫 정수 (pp.011~018 → 11). u64를 넘으면 u64::MAX
pub fn leading_number(label: &str) -> Option<u64> {
    FIRST_NUMBER_RE
        .find(label)
        .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
}

/// 첫 숫자열에서 앞자리 0을 뗀 부분. 길이가 같으면 문자열 비교가 곧 수 비교
fn leading_digits(label: &str) -> Option<&str> {
    FIRST_NUMBER_RE
        .find(label)
        .map(|m| m.as_str().trim_start_matches('0'))
}

/// 열 정렬: 숫자가 있는 라벨을 첫 정수 오름차순으로 먼저, 나머지는 문자열 순
pub fn compare_print_types(a: &str, b: &str) -> Ordering {
    match (leading_digits(a), leading_digits(b)) {
        (Some(x), Some(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| x.cmp(y))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(file: &str, print_type: &str, id: &str, name: &str) -> Record {
        Record::new(file, print_type, id, name)
    }

    #[test]
    fn test_duplicates_collapse_to_single_cell() {
        let records = vec![
            record("a.jpg", "pp.011~018", "100001", "박민수"),
            record("b.jpg", "pp.011~018", "100001", "박민수"),
        ];
        let matrix = build_matrix(&records);

        assert_eq!(matrix.columns(), &["pp.011~018".to_string()]);
        assert_eq!(matrix.rows().len(), 1);
        assert_eq!(matrix.rows()[0].cells, vec![true]);
    }

    #[test]
    fn test_columns_sorted_by_leading_number() {
        let records = vec![
            record("a.jpg", "pp.101~105", "100001", "박민수"),
            record("b.jpg", "pp.011~018", "100001", "박민수"),
            record("c.jpg", "pp.019~025", "100002", "김지은"),
        ];
        let matrix = build_matrix(&records);

        assert_eq!(
            matrix.columns(),
            &["pp.011~018".to_string(), "pp.019~025".to_string(), "pp.101~105".to_string()]
        );
    }

    #[test]
    fn test_rows_sorted_and_absence_materialized() {
        let records = vec![
            record("a.jpg", "pp.011~018", "100002", "박민수"),
            record("b.jpg", "pp.019~025", "100001", "김지은"),
        ];
        let matrix = build_matrix(&records);

        let keys: Vec<&str> = matrix.rows().iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["김지은 (100001)", "박민수 (100002)"]);
        assert_eq!(matrix.cell("김지은 (100001)", "pp.011~018"), Some(false));
        assert_eq!(matrix.cell("김지은 (100001)", "pp.019~025"), Some(true));
        assert_eq!(matrix.cell("박민수 (100002)", "pp.011~018"), Some(true));
        assert_eq!(matrix.cell("없는학생 (0)", "pp.011~018"), None);
    }

    #[test]
    fn test_same_name_rows_ordered_by_id() {
        let records = vec![
            record("a.jpg", "pp.011~018", "100002", "박민수"),
            record("b.jpg", "pp.011~018", "100001", "박민수"),
        ];
        let matrix = build_matrix(&records);

        assert_eq!(matrix.rows()[0].key, "박민수 (100001)");
        assert_eq!(matrix.rows()[1].key, "박민수 (100002)");
    }

    #[test]
    fn test_failed_and_partial_records_excluded() {
        let records = vec![
            Record::error_sentinel("err.jpg"),
            record("partial.jpg", "pp.011~018", "100001", ""),
            record("noprint.jpg", "", "100002", "김지은"),
            record("empty.jpg", "", "", ""),
        ];
        let matrix = build_matrix(&records);

        assert!(matrix.is_empty());
        assert!(matrix.columns().is_empty());
    }

    #[test]
    fn test_compare_print_types_non_numeric_last() {
        let mut labels = vec!["기타", "pp.101~105", "pp.011~018"];
        labels.sort_by(|a, b| compare_print_types(a, b));
        assert_eq!(labels, vec!["pp.011~018", "pp.101~105", "기타"]);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("pp.011~018"), Some(11));
        assert_eq!(leading_number("PP101~105"), Some(101));
        assert_eq!(leading_number("없음"), None);
        assert_eq!(leading_number("pp99999999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn test_long_digit_runs_compare_numerically() {
        let mut labels = vec![
            "pp99999999999999999999999",
            "pp100000000000000000000000",
            "pp.011~018",
            "기타",
        ];
        labels.sort_by(|a, b| compare_print_types(a, b));
        assert_eq!(
            labels,
            vec!["pp.011~018", "pp99999999999999999999999", "pp100000000000000000000000", "기타"]
        );
    }

    #[test]
    fn test_fullwidth_digits_are_not_numbers() {
        assert_eq!(leading_number("pp.０１１~０１８"), None);
    }

    #[test]
    fn test_marker() {
        assert_eq!(marker(true), "O");
        assert_eq!(marker(false), "X");
    }
}
