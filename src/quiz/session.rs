//! Quiz session state machine
//!
//! Ten questions, up to three submissions each (one initial try plus a second
//! and a last chance). Only correct answers count toward the spear count handed
//! to the throwing phase; a question that exhausts its attempts advances the
//! session without credit.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::question::{self, Question};
use crate::consts::TOTAL_QUESTIONS;

/// Wrong submissions still allowed after a fresh question is shown
const ATTEMPTS_PER_QUESTION: u8 = 2;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    InProgress,
    Complete,
}

/// Mutable per-session quiz progress
#[derive(Debug, Clone)]
pub struct QuizState {
    /// Index of the current question, in [0, TOTAL_QUESTIONS)
    pub question_index: usize,
    /// Questions answered correctly so far
    pub correct_count: u32,
    /// Wrong submissions still allowed on the current question (2, 1 or 0)
    pub attempts_remaining: u8,
}

/// Outcome of one accepted submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// Answer matched; the session moved on
    Correct,
    /// Wrong; a second attempt is offered on the same question
    IncorrectRetry,
    /// Wrong; the last-chance attempt is offered on the same question
    IncorrectFinal,
    /// Third wrong submission; the session advanced without credit
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitResult {
    pub outcome: AnswerOutcome,
    pub session_complete: bool,
}

/// Quiz session: question sequence, attempt budget and scoring
#[derive(Debug, Clone)]
pub struct QuizSession {
    rng: Pcg32,
    state: QuizState,
    current: Question,
    phase: QuizPhase,
}

impl QuizSession {
    /// Start a fresh session from a seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let current = question::generate(&mut rng);
        Self {
            rng,
            state: QuizState {
                question_index: 0,
                correct_count: 0,
                attempts_remaining: ATTEMPTS_PER_QUESTION,
            },
            current,
            phase: QuizPhase::InProgress,
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase == QuizPhase::Complete
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    /// The question currently awaiting an answer
    pub fn current_question(&self) -> &Question {
        &self.current
    }

    /// Spear count handed to the throwing phase (one per correct answer)
    pub fn ammunition(&self) -> u32 {
        self.state.correct_count
    }

    /// Handle one submission.
    ///
    /// Returns `None` for empty or non-numeric input (and for submissions after
    /// completion), which leaves the session untouched; the caller re-prompts.
    pub fn submit_answer(&mut self, raw: &str) -> Option<SubmitResult> {
        if self.phase == QuizPhase::Complete {
            return None;
        }
        let answer: i32 = raw.trim().parse().ok()?;

        if answer == self.current.answer {
            self.state.correct_count += 1;
            let complete = self.advance();
            return Some(SubmitResult {
                outcome: AnswerOutcome::Correct,
                session_complete: complete,
            });
        }

        match self.state.attempts_remaining {
            2 => {
                self.state.attempts_remaining = 1;
                Some(SubmitResult {
                    outcome: AnswerOutcome::IncorrectRetry,
                    session_complete: false,
                })
            }
            1 => {
                self.state.attempts_remaining = 0;
                Some(SubmitResult {
                    outcome: AnswerOutcome::IncorrectFinal,
                    session_complete: false,
                })
            }
            _ => {
                // Attempt budget spent: advance without credit
                let complete = self.advance();
                Some(SubmitResult {
                    outcome: AnswerOutcome::Exhausted,
                    session_complete: complete,
                })
            }
        }
    }

    /// Move to the next question, or complete the session after the last one.
    /// Returns true once the session is complete.
    fn advance(&mut self) -> bool {
        self.state.question_index += 1;
        if self.state.question_index < TOTAL_QUESTIONS {
            self.current = question::generate(&mut self.rng);
            self.state.attempts_remaining = ATTEMPTS_PER_QUESTION;
            false
        } else {
            self.phase = QuizPhase::Complete;
            true
        }
    }
}
