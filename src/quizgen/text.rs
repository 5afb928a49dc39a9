//! Tokenizing and sentence splitting.
//!
//! The splitter is purely lexical: it breaks on whitespace that follows `.`, `!` or `?`
//! and knows nothing about abbreviations ("Dr. Smith" becomes two sentences).

use once_cell::sync::Lazy;
use regex::Regex;

/// A letter followed by at least one letter, hyphen or apostrophe.
static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z\-']+").unwrap());
static SENTENCE_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]\s+").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse every whitespace run (newlines included) into one space and trim.
pub fn normalize_whitespace(text: &str) -> String {
  WHITESPACE_RE.replace_all(text.trim(), " ").trim().to_string()
}

/// Lowercased word tokens in text order. No stemming.
pub fn tokenize_words(text: &str) -> Vec<String> {
  WORD_RE.find_iter(text).map(|m| m.as_str().to_lowercase()).collect()
}

/// Number of word tokens, without allocating them.
pub fn word_count(text: &str) -> usize {
  WORD_RE.find_iter(text).count()
}

/// Split into sentences; each one is whitespace-collapsed and empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
  let mut out = Vec::new();
  let mut start = 0;
  for m in SENTENCE_END_RE.find_iter(text) {
    // keep the terminator, drop the whitespace after it
    push_sentence(&mut out, &text[start..m.start() + 1]);
    start = m.end();
  }
  push_sentence(&mut out, &text[start..]);
  out
}

fn push_sentence(out: &mut Vec<String>, raw: &str) {
  let s = normalize_whitespace(raw);
  if !s.is_empty() {
    out.push(s);
  }
}
