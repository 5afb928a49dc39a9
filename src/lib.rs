//! Quizforge · self-graded quizzes from study text
//!
//! The heart of the crate is [`quizgen`], a heuristic generator that turns plain text
//! into multiple-choice and true/false questions using only word statistics.
//! Around it sit the optional pieces of the web service: document extraction,
//! an OpenAI-compatible client and the Axum router.

pub mod ai;
pub mod config;
pub mod domain;
pub mod extract;
pub mod logic;
pub mod protocol;
pub mod quizgen;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod util;

pub use domain::{Mode, Question, QuestionKind};
pub use quizgen::{generate_quiz, generate_quiz_with_rng};
