//! Journal records exchanged with the API.

use crate::carousel::Item;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded complex and the goals derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    /// Server-assigned id.
    pub id: i64,
    /// Owner of the record.
    pub user_id: String,
    /// What the complex is about.
    pub content: String,
    /// Free-form grouping label.
    pub category: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Goals attached to this complex.
    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Item for Complex {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// A goal derived from a complex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Server-assigned id.
    pub id: i64,
    /// Complex this goal belongs to.
    pub complex_id: i64,
    /// The goal as first stated.
    pub surface_goal: String,
    /// What the goal is really about.
    pub underlying_goal: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a complex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexInput {
    /// What the complex is about.
    pub content: String,
    /// Grouping label.
    pub category: String,
}

impl ComplexInput {
    /// Trims both fields and rejects empty ones.
    pub fn new(content: &str, category: &str) -> Result<Self> {
        let content = content.trim();
        let category = category.trim();
        if content.is_empty() {
            return Err(Error::Validation("content is required".to_string()));
        }
        if category.is_empty() {
            return Err(Error::Validation("category is required".to_string()));
        }
        Ok(Self {
            content: content.to_string(),
            category: category.to_string(),
        })
    }
}

/// Payload for recording an action taken towards a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionInput {
    /// What was done.
    pub content: String,
    /// When it was completed, if it has been.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    /// Grouping label.
    pub category: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLEX_JSON: &str = r#"{
        "id": 7,
        "user_id": "test-user-uuid-12345",
        "content": "I freeze when speaking in meetings",
        "category": "work",
        "created_at": "2024-05-01T09:30:00Z",
        "updated_at": "2024-05-02T10:00:00Z",
        "goals": [{
            "id": 3,
            "complex_id": 7,
            "surface_goal": "speak once per meeting",
            "underlying_goal": "feel my ideas matter",
            "created_at": "2024-05-01T09:31:00Z",
            "updated_at": "2024-05-01T09:31:00Z"
        }]
    }"#;

    #[test]
    fn test_decode_complex_with_goals() {
        let complex: Complex = serde_json::from_str(COMPLEX_JSON).unwrap();
        assert_eq!(complex.id, 7);
        assert_eq!(complex.category, "work");
        assert_eq!(complex.goals.len(), 1);
        assert_eq!(complex.goals[0].complex_id, 7);
        assert_eq!(complex.key(), "7");
    }

    #[test]
    fn test_goals_default_to_empty() {
        let json = r#"{"id":1,"user_id":"u","content":"c","category":"k",
            "created_at":"2024-01-01T00:00:00Z","updated_at":"2024-01-01T00:00:00Z"}"#;
        let complex: Complex = serde_json::from_str(json).unwrap();
        assert!(complex.goals.is_empty());
    }

    #[test]
    fn test_input_trims_and_validates() {
        let input = ComplexInput::new("  shy  ", " social ").unwrap();
        assert_eq!(input.content, "shy");
        assert_eq!(input.category, "social");

        assert!(ComplexInput::new("   ", "x").unwrap_err().is_validation());
        assert!(ComplexInput::new("x", "").unwrap_err().is_validation());
    }

    #[test]
    fn test_input_serializes_snake_case() {
        let input = ComplexInput::new("a", "b").unwrap();
        assert_eq!(
            serde_json::to_string(&input).unwrap(),
            r#"{"content":"a","category":"b"}"#
        );
    }

    #[test]
    fn test_action_omits_missing_completion() {
        let now = "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let action = ActionInput {
            content: "practiced".to_string(),
            completed_at: None,
            category: "work".to_string(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&action).unwrap();
        assert!(!json.contains("completed_at"));
    }
}
