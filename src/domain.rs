//! Domain models: a multiple-choice problem and its labeled choices.
//!
//! Field-level shape is enforced by serde. Cross-field rules (the answer key
//! pointing at an existing choice) are NOT enforced when loading.

use serde::{Deserialize, Serialize};

/// One selectable answer option ("A".."D").
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
  pub id: String,
  pub text: String,
}

/// A single practice question as authored in the JSON data files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
  pub id: i64,
  /// Free-form category label, e.g. "grammar" or "vocabulary".
  #[serde(rename = "type")]
  pub kind: String,
  pub question: String,
  pub choices: Vec<Choice>,
  pub correct_answer: String,
  #[serde(default)]
  pub explanation: Option<String>,
}

impl Problem {
  pub fn choice(&self, id: &str) -> Option<&Choice> {
    self.choices.iter().find(|c| c.id == id)
  }

  /// True when `correct_answer` names one of the choices and choice ids are unique.
  pub fn answer_key_is_consistent(&self) -> bool {
    let unique = self
      .choices
      .iter()
      .enumerate()
      .all(|(i, c)| self.choices[..i].iter().all(|prev| prev.id != c.id));
    unique && self.choice(&self.correct_answer).is_some()
  }
}
