//! 에러 타입 정의

use thiserror::Error;

/// 공통 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    #[error("명단 오류: {0}")]
    Roster(String),

    #[error("명단 중복 항목: {field} = {value}")]
    DuplicateRosterEntry { field: &'static str, value: String },
}

/// Result 타입 별칭
pub type Result<T> = std::result::Result<T, Error>;
