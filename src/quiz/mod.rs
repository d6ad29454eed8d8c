//! Quiz phase: question generation and session state machine
//!
//! This module must be pure and deterministic:
//! - Seeded RNG only (injected, never ambient)
//! - No rendering or platform dependencies
//! - All submission handling is a total function over its input

pub mod question;
pub mod session;

pub use question::{Operator, Question, generate};
pub use session::{AnswerOutcome, QuizPhase, QuizSession, QuizState, SubmitResult};
