//! 판독 결과 타입 정의
//!
//! - ExtractedFields: OCR 텍스트에서 뽑아낸 명단 대조 전의 값
//! - Record: 이미지 1장당 1건의 최종 판독 결과

use serde::{Deserialize, Serialize};

/// OCR 실패 시 모든 필드에 채우는 표식
pub const ERROR_MARKER: &str = "ERROR";

/// 패턴 매칭 결과 (명단 대조 전)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub print_type: Option<String>,
    pub student_id: Option<String>,
    pub name: Option<String>,
}

/// 판독 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Success,
    Failed,
}

/// 이미지 1장의 판독 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub image_id: String,
    pub print_type: String,
    pub student_id: String,
    pub name: String,
    pub status: RecordStatus,
}

impl Record {
    /// 판독 값으로 Record를 만들고 성공/실패를 판정한다.
    ///
    /// 프린트 종류가 비었거나 학번・이름이 모두 비었으면 Failed.
    pub fn new(
        image_id: impl Into<String>,
        print_type: impl Into<String>,
        student_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let print_type = print_type.into();
        let student_id = student_id.into();
        let name = name.into();

        let status = if print_type.is_empty() || (student_id.is_empty() && name.is_empty()) {
            RecordStatus::Failed
        } else {
            RecordStatus::Success
        };

        Self {
            image_id: image_id.into(),
            print_type,
            student_id,
            name,
            status,
        }
    }

    /// OCR 호출 실패용 표식 레코드
    pub fn error_sentinel(image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            print_type: ERROR_MARKER.to_string(),
            student_id: ERROR_MARKER.to_string(),
            name: ERROR_MARKER.to_string(),
            status: RecordStatus::Failed,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RecordStatus::Success
    }

    pub fn is_error_sentinel(&self) -> bool {
        self.print_type == ERROR_MARKER
            && self.student_id == ERROR_MARKER
            && self.name == ERROR_MARKER
    }
}
