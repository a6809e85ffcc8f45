//! Print Check Common Library
//!
//! 입출력 없이 동작하는 판독 로직: 명단, 필드 추출, 명단 대조, 레코드 판정, 제출 매트릭스

pub mod types;
pub mod error;
pub mod roster;
pub mod extractor;
pub mod reconciler;
pub mod matrix;

pub use types::{ExtractedFields, Record, RecordStatus, ERROR_MARKER};
pub use error::{Error, Result};
pub use roster::{DuplicatePolicy, Roster, RosterOverride};
pub use extractor::{extract_fields, extract_name, extract_print_type, extract_student_id, join_tokens, StopwordSet};
pub use reconciler::{reconcile, reconcile_fields, Identity};
pub use matrix::{build_matrix, MatrixRow, SubmissionMatrix};

/// 토큰 목록 → 추출 → 명단 대조 → Record
pub fn resolve_record<S: AsRef<str>>(
    image_id: &str,
    tokens: &[S],
    roster: &Roster,
    stopwords: &StopwordSet,
) -> Record {
    let fields = extract_fields(tokens, stopwords);
    let identity = reconcile_fields(&fields, roster);

    Record::new(
        image_id,
        fields.print_type.unwrap_or_default(),
        identity.student_id,
        identity.name,
    )
}
