//! Wrong-answer generation and word substitution.

use rand::seq::SliceRandom;
use rand::Rng;
use regex::{NoExpand, RegexBuilder};

use super::frequency::{is_content_word, FrequencyModel};

/// Marker that replaces the keyword in fill-in-the-blank questions.
pub const BLANK: &str = "_____";

/// Size of the high-frequency pool distractors are drawn from.
pub const DISTRACTOR_POOL: usize = 100;

/// Up to `k` distinct high-frequency content words other than `correct`, in random order.
///
/// Returns fewer than `k` when the model is too small; callers must check.
pub fn make_distractors<R: Rng + ?Sized>(
  correct: &str,
  freq: &FrequencyModel,
  k: usize,
  rng: &mut R,
) -> Vec<String> {
  let mut pool: Vec<&str> = freq
    .most_common(DISTRACTOR_POOL)
    .into_iter()
    .filter(|w| *w != correct && is_content_word(w))
    .collect();
  pool.shuffle(rng);
  pool.into_iter().take(k).map(str::to_string).collect()
}

/// Replace the first case-insensitive whole-word match of `word` with `replacement`.
///
/// Returns the sentence unchanged when `word` is empty or absent.
pub fn replace_word(sentence: &str, word: &str, replacement: &str) -> String {
  if word.is_empty() {
    return sentence.to_string();
  }
  let pattern = format!(r"\b{}\b", regex::escape(word));
  match RegexBuilder::new(&pattern).case_insensitive(true).build() {
    Ok(re) => re.replacen(sentence, 1, NoExpand(replacement)).into_owned(),
    Err(_) => sentence.to_string(),
  }
}

/// Blank out the first whole-word occurrence of `word`.
pub fn blank_word(sentence: &str, word: &str) -> String {
  replace_word(sentence, word, BLANK)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn model() -> FrequencyModel {
    FrequencyModel::build("photosynthesis chlorophyll sunlight glucose oxygen carbon water roots")
  }

  #[test]
  fn distractors_exclude_the_answer_and_are_distinct() {
    let freq = model();
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
      let d = make_distractors("glucose", &freq, 3, &mut rng);
      assert_eq!(d.len(), 3);
      assert!(!d.iter().any(|w| w == "glucose"));
      let mut sorted = d.clone();
      sorted.sort();
      sorted.dedup();
      assert_eq!(sorted.len(), 3);
      assert!(d.iter().all(|w| freq.contains(w)));
    }
  }

  #[test]
  fn short_model_yields_short_result() {
    let freq = FrequencyModel::build("glucose oxygen");
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(make_distractors("glucose", &freq, 3, &mut rng), vec!["oxygen".to_string()]);
    assert!(make_distractors("glucose", &FrequencyModel::default(), 1, &mut rng).is_empty());
  }

  #[test]
  fn same_seed_same_distractors() {
    let freq = model();
    let a = make_distractors("water", &freq, 3, &mut StdRng::seed_from_u64(42));
    let b = make_distractors("water", &freq, 3, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
  }

  #[test]
  fn blank_replaces_first_whole_word_ignoring_case() {
    assert_eq!(blank_word("Cells divide; cells grow.", "cells"), "_____ divide; cells grow.");
    assert_eq!(blank_word("The cellular cell.", "cell"), "The cellular _____.");
  }

  #[test]
  fn blank_is_noop_when_missing() {
    assert_eq!(blank_word("Nothing here.", "cell"), "Nothing here.");
    assert_eq!(blank_word("Nothing here.", ""), "Nothing here.");
  }

  #[test]
  fn replacement_is_literal() {
    assert_eq!(replace_word("Pay the price.", "price", "$1"), "Pay the $1.");
  }
}
