//! Domain models shared by the generator and the HTTP layer: question records and generation modes.

use serde::{Deserialize, Serialize};

/// Option labels used by every true/false question, in answer-index order.
pub const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// Number of options carried by a multiple-choice question.
pub const MCQ_OPTION_COUNT: usize = 4;

/// Which kind of question a record is.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
  /// Fill-in-the-blank with four options.
  Mcq,
  /// Statement that is either the original sentence or a mutated one.
  TrueFalse,
}

/// One self-graded quiz question. Built once by an assembler and never mutated afterwards.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
  pub question: String,
  pub options: Vec<String>,
  pub answer_index: usize,
  #[serde(rename = "type")]
  pub kind: QuestionKind,
}

impl Question {
  pub fn mcq(question: String, options: Vec<String>, answer_index: usize) -> Self {
    Self { question, options, answer_index, kind: QuestionKind::Mcq }
  }

  /// `is_true` selects the answer: index 0 ("True") or 1 ("False").
  pub fn true_false(statement: String, is_true: bool) -> Self {
    Self {
      question: statement,
      options: TRUE_FALSE_OPTIONS.iter().map(|s| s.to_string()).collect(),
      answer_index: if is_true { 0 } else { 1 },
      kind: QuestionKind::TrueFalse,
    }
  }

  /// The option text marked as correct.
  pub fn answer(&self) -> Option<&str> {
    self.options.get(self.answer_index).map(String::as_str)
  }

  /// Checks the shape invariants every emitted question must satisfy.
  pub fn is_well_formed(&self) -> bool {
    if self.question.trim().is_empty() || self.answer_index >= self.options.len() {
      return false;
    }
    match self.kind {
      QuestionKind::Mcq => {
        if self.options.len() != MCQ_OPTION_COUNT {
          return false;
        }
        let mut seen = std::collections::HashSet::new();
        self.options.iter().all(|o| seen.insert(o.as_str()))
      }
      QuestionKind::TrueFalse => self.options.iter().map(String::as_str).eq(TRUE_FALSE_OPTIONS),
    }
  }
}

/// Generation mode requested by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
  #[default]
  Mcq,
  TrueFalse,
  Mixed,
}

impl Mode {
  /// Lenient parse: trims and case-folds; anything unrecognized means `Mcq`.
  pub fn parse(raw: &str) -> Self {
    match raw.trim().to_lowercase().as_str() {
      "tf" => Mode::TrueFalse,
      "mixed" => Mode::Mixed,
      _ => Mode::Mcq,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Mode::Mcq => "mcq",
      Mode::TrueFalse => "tf",
      Mode::Mixed => "mixed",
    }
  }

  pub fn includes_mcq(&self) -> bool {
    matches!(self, Mode::Mcq | Mode::Mixed)
  }

  pub fn includes_true_false(&self) -> bool {
    matches!(self, Mode::TrueFalse | Mode::Mixed)
  }
}

impl std::fmt::Display for Mode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mode_parse_is_lenient() {
    assert_eq!(Mode::parse("mcq"), Mode::Mcq);
    assert_eq!(Mode::parse(" TF "), Mode::TrueFalse);
    assert_eq!(Mode::parse("Mixed"), Mode::Mixed);
    assert_eq!(Mode::parse(""), Mode::Mcq);
    assert_eq!(Mode::parse("essay"), Mode::Mcq);
  }

  #[test]
  fn question_serializes_with_type_field() {
    let q = Question::true_false("Cats purr.".into(), false);
    let v = serde_json::to_value(&q).expect("json");
    assert_eq!(v["type"], "true_false");
    assert_eq!(v["answer_index"], 1);
    assert_eq!(v["options"], serde_json::json!(["True", "False"]));

    let m = Question::mcq("A _____ b.".into(), vec!["w".into(), "x".into(), "y".into(), "z".into()], 2);
    assert_eq!(serde_json::to_value(&m).expect("json")["type"], "mcq");
  }

  #[test]
  fn well_formed_rejects_broken_shapes() {
    let ok = Question::mcq("q".into(), vec!["a".into(), "b".into(), "c".into(), "d".into()], 3);
    assert!(ok.is_well_formed());
    assert_eq!(ok.answer(), Some("d"));

    let dup = Question::mcq("q".into(), vec!["a".into(), "a".into(), "c".into(), "d".into()], 0);
    assert!(!dup.is_well_formed());

    let short = Question::mcq("q".into(), vec!["a".into(), "b".into()], 0);
    assert!(!short.is_well_formed());

    let out_of_range = Question::mcq("q".into(), vec!["a".into(), "b".into(), "c".into(), "d".into()], 4);
    assert!(!out_of_range.is_well_formed());

    let mut tf = Question::true_false("s".into(), true);
    assert!(tf.is_well_formed());
    tf.options = vec!["Yes".into(), "No".into()];
    assert!(!tf.is_well_formed());
  }
}
