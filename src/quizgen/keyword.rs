//! Per-sentence keyword choice.

use super::frequency::{is_content_word, FrequencyModel};
use super::text::tokenize_words;

/// Pick the most salient word of `sentence`: highest corpus frequency, then longest.
///
/// Only content words that also appear in `freq` qualify. Full ties keep the
/// earliest occurrence in the sentence. `None` means the sentence is unusable.
pub fn choose_keyword(sentence: &str, freq: &FrequencyModel) -> Option<String> {
  let mut candidates: Vec<String> = tokenize_words(sentence)
    .into_iter()
    .filter(|w| is_content_word(w) && freq.contains(w))
    .collect();
  // stable sort, descending
  candidates.sort_by(|a, b| {
    (freq.count(b), b.chars().count()).cmp(&(freq.count(a), a.chars().count()))
  });
  candidates.into_iter().next()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn prefers_frequency_then_length() {
    let freq = FrequencyModel::build("Enzymes catalyze reactions. Enzymes speed metabolism. Proteins fold.");
    assert_eq!(choose_keyword("Proteins catalyze enzymes quickly.", &freq).as_deref(), Some("enzymes"));
    // all count 1: longest wins
    assert_eq!(choose_keyword("Proteins fold metabolism.", &freq).as_deref(), Some("metabolism"));
  }

  #[test]
  fn full_ties_keep_sentence_order() {
    let freq = FrequencyModel::build("alpha bravo delta gamma");
    assert_eq!(choose_keyword("gamma delta alpha", &freq).as_deref(), Some("gamma"));
  }

  #[test]
  fn words_outside_the_model_do_not_qualify() {
    let freq = FrequencyModel::build("mitochondria powerhouse");
    assert_eq!(choose_keyword("The zebra runs fast.", &freq), None);
    assert_eq!(choose_keyword("It is in the of.", &freq), None);
  }
}
