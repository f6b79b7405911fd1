//! Static question bank and type catalog
//!
//! Read-only inputs to the engine. The built-in bank is embedded JSON parsed
//! once; callers may also load a custom bank from a JSON string with the
//! same shape (`{<typeId>: [{id, text}, ...]}`).

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Question type catalog entry.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// The speaking task catalog, in display order.
pub static TYPES: &[TypeInfo] = &[
    TypeInfo {
        id: "read_aloud",
        name: "Read Aloud",
        icon: "📖",
    },
    TypeInfo {
        id: "repeat_sentence",
        name: "Repeat Sentence",
        icon: "🔁",
    },
    TypeInfo {
        id: "describe_image",
        name: "Describe Image",
        icon: "🖼️",
    },
    TypeInfo {
        id: "retell_lecture",
        name: "Re-tell Lecture",
        icon: "🎓",
    },
    TypeInfo {
        id: "answer_short_question",
        name: "Answer Short Question",
        icon: "❓",
    },
];

/// Look up a catalog entry by id.
pub fn type_info(id: &str) -> Option<&'static TypeInfo> {
    TYPES.iter().find(|t| t.id == id)
}

/// One bank question with a stable id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Question {
    pub id: String,
    pub text: String,
}

/// Type id -> ordered question list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionBank {
    #[serde(flatten)]
    by_type: BTreeMap<String, Vec<Question>>,
}

static BUILTIN: Lazy<QuestionBank> = Lazy::new(|| {
    QuestionBank::from_json(include_str!("data/question_bank.json"))
        .expect("embedded question bank is valid")
});

impl QuestionBank {
    /// The embedded default bank.
    pub fn builtin() -> &'static QuestionBank {
        &BUILTIN
    }

    /// Parse a bank from a JSON string.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Ordered questions for a type. Empty slice for an unknown type.
    pub fn questions(&self, type_id: &str) -> &[Question] {
        self.by_type.get(type_id).map_or(&[], Vec::as_slice)
    }

    /// Find a question by (type, id).
    pub fn find(&self, type_id: &str, question_id: &str) -> Option<&Question> {
        self.questions(type_id).iter().find(|q| q.id == question_id)
    }

    /// Catalog-order type ids that have at least one question.
    pub fn available_types(&self) -> Vec<&'static str> {
        TYPES
            .iter()
            .map(|t| t.id)
            .filter(|id| !self.questions(id).is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank_covers_catalog() {
        let bank = QuestionBank::builtin();
        for t in TYPES {
            assert!(
                !bank.questions(t.id).is_empty(),
                "no questions for {}",
                t.id
            );
        }
    }

    #[test]
    fn test_builtin_ids_stable_and_unique() {
        let bank = QuestionBank::builtin();
        for t in TYPES {
            let mut ids: Vec<_> = bank.questions(t.id).iter().map(|q| &q.id).collect();
            let n = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), n, "duplicate ids under {}", t.id);
        }
    }

    #[test]
    fn test_find() {
        let bank = QuestionBank::builtin();
        let first = &bank.questions("read_aloud")[0];
        assert_eq!(bank.find("read_aloud", &first.id), Some(first));
        assert!(bank.find("read_aloud", "missing").is_none());
        assert!(bank.find("missing_type", "x").is_none());
    }

    #[test]
    fn test_from_json_custom_bank() {
        let bank = QuestionBank::from_json(
            r#"{"read_aloud": [{"id": "a", "text": "Say this."}]}"#,
        )
        .unwrap();
        assert_eq!(bank.questions("read_aloud").len(), 1);
        assert_eq!(bank.available_types(), vec!["read_aloud"]);
    }
}
