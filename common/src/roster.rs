//! 학생 명단 모듈
//!
//! 학번↔이름 양방향 조회표. 한 번 만들면 변경하지 않는다.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// 중복 키 처리 방침
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// 나중 행이 앞 행을 덮어쓴다 (덮어쓴 값은 `overrides()`로 확인)
    #[default]
    LastWins,
    /// 중복이 있으면 명단 생성 실패
    Reject,
}

/// 덮어쓰기가 일어난 항목
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterOverride {
    /// "학번" 또는 "이름"
    pub field: &'static str,
    pub value: String,
}

/// 학생 명단
#[derive(Debug, Clone, Default)]
pub struct Roster {
    id_to_name: HashMap<String, String>,
    name_to_id: HashMap<String, String>,
    overrides: Vec<RosterOverride>,
}

impl Roster {
    /// (학번, 이름) 쌍에서 명단을 만든다. 양쪽 값은 trim 후 저장.
    pub fn from_pairs<I, A, B>(pairs: I, policy: DuplicatePolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut roster = Self::default();

        for (id, name) in pairs {
            let id = id.as_ref().trim().to_string();
            let name = name.as_ref().trim().to_string();

            if id.is_empty() || name.is_empty() {
                return Err(Error::Roster(format!("빈 값이 있는 행: '{}' / '{}'", id, name)));
            }

            if roster.id_to_name.contains_key(&id) {
                roster.record_duplicate("학번", &id, policy)?;
            }
            if roster.name_to_id.contains_key(&name) {
                roster.record_duplicate("이름", &name, policy)?;
            }

            roster.id_to_name.insert(id.clone(), name.clone());
            roster.name_to_id.insert(name, id);
        }

        Ok(roster)
    }

    fn record_duplicate(&mut self, field: &'static str, value: &str, policy: DuplicatePolicy) -> Result<()> {
        match policy {
            DuplicatePolicy::Reject => Err(Error::DuplicateRosterEntry {
                field,
                value: value.to_string(),
            }),
            DuplicatePolicy::LastWins => {
                self.overrides.push(RosterOverride {
                    field,
                    value: value.to_string(),
                });
                Ok(())
            }
        }
    }

    /// 학번 → 이름
    pub fn name_for(&self, student_id: &str) -> Option<&str> {
        self.id_to_name.get(student_id).map(|s| s.as_str())
    }

    /// 이름 → 학번
    pub fn id_for(&self, name: &str) -> Option<&str> {
        self.name_to_id.get(name).map(|s| s.as_str())
    }

    pub fn contains_id(&self, student_id: &str) -> bool {
        self.id_to_name.contains_key(student_id)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// 등록된 학번 수
    pub fn len(&self) -> usize {
        self.id_to_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_name.is_empty()
    }

    /// LastWins 방침에서 덮어쓴 항목 목록
    pub fn overrides(&self) -> &[RosterOverride] {
        &self.overrides
    }
}
