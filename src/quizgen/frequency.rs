//! Global word-frequency model over content words.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use super::text::tokenize_words;

/// Hand-curated English function words. Membership is kept stable so that
/// generated quizzes stay comparable across releases.
pub const BASIC_STOPWORDS: &[&str] = &[
  "the", "and", "for", "are", "but", "not", "you", "with", "that", "this", "have", "from", "they",
  "was", "were", "will", "would", "there", "their", "what", "when", "where", "which", "your", "about",
  "can", "could", "should", "into", "than", "then", "them", "these", "those", "over", "also", "such",
  "has", "had", "did", "does", "doing", "been", "being", "its", "it's", "our", "out", "any", "all",
  "him", "her", "his", "she", "himself", "herself", "ours", "yours", "mine", "theirs", "who", "whom",
  "to", "of", "in", "on", "at", "by", "as", "is", "it", "a", "an", "or", "if", "so", "we", "i",
];

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| BASIC_STOPWORDS.iter().copied().collect());

/// Minimum length (exclusive) for a token to count as a content word.
pub const MIN_CONTENT_LEN: usize = 3;

pub fn is_stopword(word: &str) -> bool {
  STOPWORDS.contains(word)
}

/// Longer than three characters and not a stopword. Expects a lowercased token.
pub fn is_content_word(word: &str) -> bool {
  word.chars().count() > MIN_CONTENT_LEN && !is_stopword(word)
}

/// Occurrence counts of content words across one input text.
///
/// Words remember the order in which they were first seen; ranking ties
/// are resolved by that order so results do not depend on hash iteration.
#[derive(Clone, Debug, Default)]
pub struct FrequencyModel {
  entries: Vec<(String, usize)>,
  index: HashMap<String, usize>,
}

impl FrequencyModel {
  /// Tokenize `text` and count every content word.
  pub fn build(text: &str) -> Self {
    let mut model = Self::default();
    for word in tokenize_words(text) {
      if is_content_word(&word) {
        model.add(word);
      }
    }
    model
  }

  fn add(&mut self, word: String) {
    match self.index.get(&word) {
      Some(&i) => self.entries[i].1 += 1,
      None => {
        self.index.insert(word.clone(), self.entries.len());
        self.entries.push((word, 1));
      }
    }
  }

  /// Count for `word`, 0 when absent.
  pub fn count(&self, word: &str) -> usize {
    self.index.get(word).map(|&i| self.entries[i].1).unwrap_or(0)
  }

  pub fn contains(&self, word: &str) -> bool {
    self.index.contains_key(word)
  }

  /// Number of distinct content words.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Up to `n` words by descending count; equal counts keep first-seen order.
  pub fn most_common(&self, n: usize) -> Vec<&str> {
    let mut ranked: Vec<&(String, usize)> = self.entries.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(n).map(|(w, _)| w.as_str()).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counts_only_content_words() {
    let m = FrequencyModel::build("The cell divides. The cell grows and the nucleus splits; cell walls hold.");
    assert_eq!(m.count("cell"), 3);
    assert_eq!(m.count("nucleus"), 1);
    assert_eq!(m.count("the"), 0);
    assert_eq!(m.count("and"), 0);
    assert_eq!(m.count("hold"), 1);
    assert!(m.contains("walls"));
  }

  #[test]
  fn long_stopwords_are_excluded() {
    let m = FrequencyModel::build("Those which would themselves herself theirs");
    assert!(!m.contains("those"));
    assert!(!m.contains("which"));
    assert!(!m.contains("herself"));
    assert!(m.contains("themselves"));
  }

  #[test]
  fn most_common_breaks_ties_by_first_occurrence() {
    let m = FrequencyModel::build("zebra apple mango apple zebra kiwi-fruit");
    assert_eq!(m.most_common(10), vec!["zebra", "apple", "mango", "kiwi-fruit"]);
    assert_eq!(m.most_common(1), vec!["zebra"]);
    assert_eq!(m.len(), 4);
  }

  #[test]
  fn stopword_list_has_expected_members() {
    assert!(is_stopword("it's"));
    assert!(is_stopword("i"));
    assert!(!is_stopword("cell"));
    assert!(!is_content_word("cat"));
    assert!(is_content_word("cats"));
  }
}
