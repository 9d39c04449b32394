//! Vocabulary quiz session.
//!
//! Draws each word of a fixed pool exactly once, in random order, and asks
//! for its meaning among up to three distractor meanings taken from the rest
//! of the pool. Scoring is one point per correctly answered question.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::core::models::WordEntry;

/// Number of wrong options offered alongside the correct meaning.
pub const DISTRACTOR_COUNT: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("Quiz pool is empty")]
    EmptyPool,
}

/// The question currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub word: String,
    /// Correct answer.
    pub meaning: String,
    /// Shuffled answer choices, including `meaning`.
    pub options: Vec<String>,
    pub answered: bool,
    pub selected: Option<String>,
}

impl QuizQuestion {
    /// Whether the submitted answer was right. `None` until answered.
    pub fn is_correct(&self) -> Option<bool> {
        self.selected.as_ref().map(|s| *s == self.meaning)
    }
}

pub struct QuizSession {
    full_pool: Vec<WordEntry>,
    remaining: Vec<WordEntry>,
    current: Option<QuizQuestion>,
    score: u32,
    asked: usize,
    complete: bool,
    rng: StdRng,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic session, for tests and reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            full_pool: Vec::new(),
            remaining: Vec::new(),
            current: None,
            score: 0,
            asked: 0,
            complete: false,
            rng,
        }
    }

    /// Start a new quiz over `words` and draw the first question.
    ///
    /// An empty pool leaves the session untouched.
    pub fn initialize(&mut self, words: Vec<WordEntry>) -> Result<(), QuizError> {
        if words.is_empty() {
            return Err(QuizError::EmptyPool);
        }

        self.remaining = words.clone();
        self.full_pool = words;
        self.score = 0;
        self.asked = 0;
        self.complete = false;
        self.current = None;

        log::info!("Quiz started with {} word(s)", self.full_pool.len());
        self.draw_next();
        Ok(())
    }

    /// Draw the next question, or finish when the pool is exhausted.
    pub fn draw_next(&mut self) {
        if self.remaining.is_empty() {
            if !self.complete && !self.full_pool.is_empty() {
                log::info!(
                    "Quiz complete: {}/{} correct",
                    self.score,
                    self.full_pool.len()
                );
            }
            self.complete = !self.full_pool.is_empty();
            self.current = None;
            return;
        }

        let idx = self.rng.gen_range(0..self.remaining.len());
        let word = self.remaining.swap_remove(idx);

        let options = self.build_options(&word);
        self.asked += 1;
        self.current = Some(QuizQuestion {
            word: word.word,
            meaning: word.meaning,
            options,
            answered: false,
            selected: None,
        });
    }

    /// Submit an answer for the current question.
    ///
    /// Returns whether it was correct, or `None` if there is no open question
    /// (already answered, or none drawn).
    pub fn answer(&mut self, choice: &str) -> Option<bool> {
        let question = self.current.as_mut()?;
        if question.answered {
            return None;
        }

        question.answered = true;
        question.selected = Some(choice.to_string());
        let correct = choice == question.meaning;
        if correct {
            self.score += 1;
        }
        Some(correct)
    }

    /// Move on to the next question, answered or not.
    pub fn advance(&mut self) {
        self.draw_next();
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn current(&self) -> Option<&QuizQuestion> {
        self.current.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Questions drawn so far, including the current one.
    pub fn questions_asked(&self) -> usize {
        self.asked
    }

    pub fn pool_size(&self) -> usize {
        self.full_pool.len()
    }

    /// Words not yet drawn.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    // ── Helpers ─────────────────────────────────────────────────────

    /// Correct meaning plus up to three distinct distractors, shuffled.
    fn build_options(&mut self, word: &WordEntry) -> Vec<String> {
        let mut others: Vec<&WordEntry> = self
            .full_pool
            .iter()
            .filter(|w| w.word != word.word)
            .collect();
        others.shuffle(&mut self.rng);

        let mut options = vec![word.meaning.clone()];
        for other in others {
            if options.len() > DISTRACTOR_COUNT {
                break;
            }
            if !options.contains(&other.meaning) {
                options.push(other.meaning.clone());
            }
        }

        options.shuffle(&mut self.rng);
        options
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}
