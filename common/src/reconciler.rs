//! 명단 대조 모듈
//!
//! 추출한 학번・이름을 명단과 맞춰 본다. 결과는 명단에 있는 값이거나 빈 문자열뿐이다.
//!
//! 1. 명단에 없는 학번/이름은 버린다 (OCR 오인식 대비)
//! 2. 이름이 남았으면: 학번이 없을 때 이름으로 채우고, 서로 어긋나면 학번 쪽을 믿고 이름을 다시 구한다
//! 3. 학번만 남았으면 학번으로 이름을 구한다
//! 4. 둘 다 없으면 미확인

use crate::roster::Roster;
use crate::types::ExtractedFields;

/// 명단 대조 후의 신원
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub student_id: String,
    pub name: String,
}

impl Identity {
    pub fn is_unresolved(&self) -> bool {
        self.student_id.is_empty() && self.name.is_empty()
    }
}

/// 학번・이름을 명단 기준으로 정리
pub fn reconcile(student_id: Option<&str>, name: Option<&str>, roster: &Roster) -> Identity {
    let name = name.filter(|n| roster.contains_name(n));
    let student_id = student_id.filter(|id| roster.contains_id(id));

    match (student_id, name) {
        (None, Some(name)) => Identity {
            student_id: roster.id_for(name).unwrap_or_default().to_string(),
            name: name.to_string(),
        },
        (Some(id), Some(name)) if roster.id_for(name) != Some(id) => Identity {
            student_id: id.to_string(),
            name: roster.name_for(id).unwrap_or_default().to_string(),
        },
        (Some(id), Some(name)) => Identity {
            student_id: id.to_string(),
            name: name.to_string(),
        },
        (Some(id), None) => Identity {
            student_id: id.to_string(),
            name: roster.name_for(id).unwrap_or_default().to_string(),
        },
        (None, None) => Identity::default(),
    }
}

/// ExtractedFields 그대로 대조
pub fn reconcile_fields(fields: &ExtractedFields, roster: &Roster) -> Identity {
    reconcile(fields.student_id.as_deref(), fields.name.as_deref(), roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::DuplicatePolicy;

    fn roster() -> Roster {
        Roster::from_pairs(
            [("123456", "Kim"), ("654321", "Lee"), ("100001", "박민수")],
            DuplicatePolicy::Reject,
        )
        .unwrap()
    }

    fn identity(id: &str, name: &str) -> Identity {
        Identity {
            student_id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_both_consistent() {
        assert_eq!(reconcile(Some("123456"), Some("Kim"), &roster()), identity("123456", "Kim"));
    }

    #[test]
    fn test_conflict_trusts_student_id() {
        assert_eq!(reconcile(Some("123456"), Some("Lee"), &roster()), identity("123456", "Kim"));
    }

    #[test]
    fn test_fill_id_from_name() {
        assert_eq!(reconcile(None, Some("박민수"), &roster()), identity("100001", "박민수"));
    }

    #[test]
    fn test_fill_name_from_id() {
        assert_eq!(reconcile(Some("654321"), None, &roster()), identity("654321", "Lee"));
    }

    #[test]
    fn test_unknown_name_purged() {
        let result = reconcile(None, Some("Zog"), &roster());
        assert_eq!(result, Identity::default());
        assert!(result.is_unresolved());
    }

    #[test]
    fn test_unknown_id_falls_back_to_name() {
        assert_eq!(reconcile(Some("999999"), Some("Lee"), &roster()), identity("654321", "Lee"));
    }

    #[test]
    fn test_unknown_name_falls_back_to_id() {
        assert_eq!(reconcile(Some("123456"), Some("Zog"), &roster()), identity("123456", "Kim"));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let roster = roster();
        let cases = [
            (Some("123456"), Some("Lee")),
            (None, Some("박민수")),
            (Some("654321"), None),
            (Some("000000"), Some("Zog")),
        ];

        for (id, name) in cases {
            let first = reconcile(id, name, &roster);
            let second = reconcile(
                Some(first.student_id.as_str()).filter(|s| !s.is_empty()),
                Some(first.name.as_str()).filter(|s| !s.is_empty()),
                &roster,
            );
            assert_eq!(first, second, "재대조 결과가 다름: {:?}", (id, name));
        }
    }

    #[test]
    fn test_reconcile_fields() {
        let fields = ExtractedFields {
            print_type: Some("pp.011~018".to_string()),
            student_id: Some("100001".to_string()),
            name: None,
        };
        assert_eq!(reconcile_fields(&fields, &roster()), identity("100001", "박민수"));
    }
}
