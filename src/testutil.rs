//! Scratch data directories and fixtures shared by unit tests.

use std::path::PathBuf;

use uuid::Uuid;

/// Fresh, not-yet-created directory under the system temp dir.
pub fn scratch_dir() -> PathBuf {
  std::env::temp_dir().join(format!("little-toeic-{}", Uuid::new_v4()))
}

pub fn problem_json(id: i64) -> serde_json::Value {
  serde_json::json!({
    "id": id,
    "type": "vocabulary",
    "question": format!("Question number {id}: choose the best word."),
    "choices": [
      { "id": "A", "text": "adjust" },
      { "id": "B", "text": "adjustment" },
      { "id": "C", "text": "adjustable" },
      { "id": "D", "text": "adjusting" }
    ],
    "correct_answer": "B",
    "explanation": null
  })
}
