//! True/false statement assembly.

use rand::Rng;

use crate::domain::Question;

use super::distractor::{make_distractors, replace_word};
use super::frequency::FrequencyModel;
use super::keyword::choose_keyword;

/// Build one true/false question from `sentence`.
///
/// A fair coin decides the branch. The false branch swaps the keyword for a
/// distractor and gives up on the sentence when no distractor exists or the
/// keyword cannot be located verbatim.
pub fn build_true_false<R: Rng + ?Sized>(sentence: &str, freq: &FrequencyModel, rng: &mut R) -> Option<Question> {
  let keyword = choose_keyword(sentence, freq)?;
  if rng.gen_bool(0.5) {
    let false_word = make_distractors(&keyword, freq, 1, rng).into_iter().next()?;
    let mutated = replace_word(sentence, &keyword, &false_word);
    if mutated == sentence {
      return None;
    }
    Some(Question::true_false(mutated, false))
  } else {
    Some(Question::true_false(sentence.to_string(), true))
  }
}

/// Walk the pool in order and collect up to `limit` statements.
pub fn generate_true_false<R: Rng + ?Sized>(
  sentences: &[String],
  freq: &FrequencyModel,
  limit: usize,
  rng: &mut R,
) -> Vec<Question> {
  let mut out = Vec::new();
  for sentence in sentences {
    if out.len() >= limit {
      break;
    }
    if let Some(q) = build_true_false(sentence, freq, rng) {
      out.push(q);
    }
  }
  out
}
