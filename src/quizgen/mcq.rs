//! Fill-in-the-blank multiple-choice assembly.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::trace;

use crate::domain::{Question, MCQ_OPTION_COUNT};

use super::distractor::{blank_word, make_distractors};
use super::frequency::FrequencyModel;
use super::keyword::choose_keyword;

/// Build one MCQ from `sentence`, or `None` when the sentence cannot back a question.
pub fn build_mcq<R: Rng + ?Sized>(sentence: &str, freq: &FrequencyModel, rng: &mut R) -> Option<Question> {
  let keyword = choose_keyword(sentence, freq)?;
  let blanked = blank_word(sentence, &keyword);
  if blanked == sentence {
    trace!(target: "quiz", %keyword, "keyword not found verbatim; skipping sentence");
    return None;
  }

  let mut options = vec![keyword.clone()];
  for d in make_distractors(&keyword, freq, MCQ_OPTION_COUNT - 1, rng) {
    if !options.contains(&d) {
      options.push(d);
    }
  }
  if options.len() < MCQ_OPTION_COUNT {
    return None;
  }
  options.truncate(MCQ_OPTION_COUNT);
  options.shuffle(rng);
  let answer_index = options.iter().position(|o| *o == keyword)?;
  Some(Question::mcq(blanked, options, answer_index))
}

/// Walk the pool in order and collect up to `limit` MCQs.
pub fn generate_mcq<R: Rng + ?Sized>(
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
    if let Some(q) = build_mcq(sentence, freq, rng) {
      out.push(q);
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::QuestionKind;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  const TEXT: &str = "Plants convert sunlight into glucose. Animals breathe oxygen and exhale carbon. \
                      Roots absorb water from soil. Leaves contain chlorophyll pigments.";

  fn pool() -> Vec<String> {
    crate::quizgen::text::split_sentences(TEXT)
  }

  #[test]
  fn builds_well_formed_questions() {
    let freq = FrequencyModel::build(TEXT);
    let mut rng = StdRng::seed_from_u64(3);
    let qs = generate_mcq(&pool(), &freq, 10, &mut rng);
    assert_eq!(qs.len(), 4);
    for q in &qs {
      assert_eq!(q.kind, QuestionKind::Mcq);
      assert!(q.is_well_formed(), "{q:?}");
      assert!(q.question.contains("_____"));
      let answer = q.answer().expect("answer");
      assert!(freq.contains(answer));
    }
  }

  #[test]
  fn respects_limit() {
    let freq = FrequencyModel::build(TEXT);
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(generate_mcq(&pool(), &freq, 2, &mut rng).len(), 2);
    assert!(generate_mcq(&pool(), &freq, 0, &mut rng).is_empty());
  }

  #[test]
  fn skips_when_vocabulary_is_too_small() {
    let text = "Glucose feeds cells. Oxygen feeds cells.";
    let freq = FrequencyModel::build(text);
    let mut rng = StdRng::seed_from_u64(9);
    // four content words in total: glucose, feeds, cells, oxygen
    let qs = generate_mcq(&crate::quizgen::text::split_sentences(text), &freq, 5, &mut rng);
    assert_eq!(qs.len(), 2);

    let tiny = "Glucose feeds cells.";
    let freq = FrequencyModel::build(tiny);
    assert!(build_mcq(tiny, &freq, &mut rng).is_none());
  }

  #[test]
  fn keyword_ending_in_apostrophe_cannot_be_blanked() {
    // "students'" is the keyword of both sentences, but `\b` never matches after the apostrophe
    let text = "The students' books matter. Students' essays matter.";
    let freq = FrequencyModel::build(text);
    let sentences = crate::quizgen::text::split_sentences(text);
    assert_eq!(choose_keyword(&sentences[0], &freq).as_deref(), Some("students'"));
    assert_eq!(make_distractors("students'", &freq, 3, &mut StdRng::seed_from_u64(0)).len(), 3);
    for seed in 0..10 {
      let mut rng = StdRng::seed_from_u64(seed);
      assert!(build_mcq(&sentences[0], &freq, &mut rng).is_none());
      assert!(generate_mcq(&sentences, &freq, 5, &mut rng).is_empty());
    }
  }
}
