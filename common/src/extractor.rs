//! OCR 텍스트 필드 추출 모듈
//!
//! OCR 토큰을 공백으로 이어 붙인 문자열에서 프린트 종류, 학번, 이름 후보를 찾는다.
//! 학번과 이름은 라벨 기반 매칭을 먼저 시도하고, 실패하면 느슨한 패턴으로 첫 후보를 고른다.

use crate::types::ExtractedFields;
use regex::Regex;
use std::collections::HashSet;

/// 이름 후보에서 제외하는 단어 (양식 라벨 등)
pub const DEFAULT_STOPWORDS: &[&str] = &["학번", "성명", "제출자", "이름", "다음", "프린트", "문제"];

lazy_static::lazy_static! {
    // 예: pp.011~018, PP011~018
    static ref PRINT_TYPE_RE: Regex = Regex::new(r"(?i)pp\.?[0-9]{3}~[0-9]{3}").unwrap();
    static ref LABELED_ID_RE: Regex = Regex::new(r"학번[^0-9]*([0-9]{5,6})").unwrap();
    static ref BARE_ID_RE: Regex = Regex::new(r"\b[0-9]{5,6}\b").unwrap();
    static ref LABELED_NAME_RE: Regex = Regex::new(r"(?:이름|성명)\s*[:\-]?\s*([가-힣]{2,4})").unwrap();
    static ref HANGUL_RUN_RE: Regex = Regex::new(r"[가-힣]{2,4}").unwrap();
}

/// 이름 후보 제외 단어 집합
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::from_words(DEFAULT_STOPWORDS.iter().copied())
    }
}

/// OCR 토큰을 공백 하나로 연결
pub fn join_tokens<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// 프린트 종류 (첫 번째 매치만 사용)
pub fn extract_print_type(text: &str) -> Option<String> {
    PRINT_TYPE_RE
        .find(text)
        .map(|m| m.as_str().replace(',', "").trim().to_string())
}

/// 학번: "학번" 라벨 뒤 5~6자리 → 없으면 단독 5~6자리 숫자 중 첫 번째
pub fn extract_student_id(text: &str) -> Option<String> {
    if let Some(caps) = LABELED_ID_RE.captures(text) {
        return Some(caps[1].to_string());
    }

    BARE_ID_RE.find(text).map(|m| m.as_str().to_string())
}

/// 이름: "이름"/"성명" 라벨 뒤 한글 2~4자 → 없으면 제외 단어가 아닌 첫 한글 2~4자
pub fn extract_name(text: &str, stopwords: &StopwordSet) -> Option<String> {
    if let Some(caps) = LABELED_NAME_RE.captures(text) {
        return Some(caps[1].to_string());
    }

    HANGUL_RUN_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|candidate| !stopwords.contains(candidate))
        .map(str::to_string)
}

/// 토큰 목록에서 세 필드를 각각 독립적으로 추출
pub fn extract_fields<S: AsRef<str>>(tokens: &[S], stopwords: &StopwordSet) -> ExtractedFields {
    let joined = join_tokens(tokens);

    ExtractedFields {
        print_type: extract_print_type(&joined),
        student_id: extract_student_id(&joined),
        name: extract_name(&joined, stopwords),
    }
}
