//! Loan literacy challenge: three short multiple-choice levels shown
//! next to the calculator.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizLevel {
    pub title:          String,
    pub question:       String,
    pub options:        Vec<String>,
    /// Index into `options`.
    pub correct_option: usize,
    /// Shown once the level is answered correctly.
    pub explanation:    String,
}

impl QuizLevel {
    pub fn correct_answer(&self) -> &str {
        self.options
            .get(self.correct_option)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOutcome {
    pub level:          usize,
    pub correct:        bool,
    pub correct_answer: String,
    pub explanation:    String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiteracyQuiz {
    pub levels: Vec<QuizLevel>,
}

impl LiteracyQuiz {
    pub fn builtin() -> Self {
        let level = |title: &str, question: &str, options: [&str; 2], explanation: &str| QuizLevel {
            title:          title.into(),
            question:       question.into(),
            options:        options.iter().map(|o| o.to_string()).collect(),
            correct_option: 0,
            explanation:    explanation.into(),
        };
        Self {
            levels: vec![
                level(
                    "What's a Good Credit Score?",
                    "Your score is 720. Is this good?",
                    ["Yes, it's good", "No, it's poor"],
                    "720+ is generally considered a good score.",
                ),
                level(
                    "EMI Trap",
                    "You get an offer for a 0% EMI phone. What should you check?",
                    ["Check hidden charges", "Nothing, 0% means free"],
                    "There may be hidden processing fees or inflated MRP.",
                ),
                level(
                    "Interest Game",
                    "Is 6% interest on reducing balance better than 5% flat interest?",
                    ["Yes, reducing is better", "No, flat is better"],
                    "Reducing interest means you pay less over time.",
                ),
            ],
        }
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.levels.is_empty() {
            return Err(CoreError::Config("literacy quiz has no levels".into()));
        }
        for (i, level) in self.levels.iter().enumerate() {
            if level.options.len() < 2 || level.correct_option >= level.options.len() {
                return Err(CoreError::Config(format!(
                    "quiz level {} needs two or more options and a valid answer index",
                    i + 1
                )));
            }
        }
        Ok(())
    }

    /// `level` is 1-based, as shown to the player.
    pub fn level(&self, level: usize) -> CoreResult<&QuizLevel> {
        level
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .ok_or_else(|| {
                CoreError::invalid_input("level", format!("must be 1..={}, got {level}", self.levels.len()))
            })
    }

    pub fn answer(&self, level: usize, option: usize) -> CoreResult<QuizOutcome> {
        let quiz_level = self.level(level)?;
        if option >= quiz_level.options.len() {
            return Err(CoreError::invalid_input(
                "option",
                format!("level {level} has {} options, got {option}", quiz_level.options.len()),
            ));
        }
        Ok(QuizOutcome {
            level,
            correct: option == quiz_level.correct_option,
            correct_answer: quiz_level.correct_answer().to_string(),
            explanation: quiz_level.explanation.clone(),
        })
    }
}

impl Default for LiteracyQuiz {
    fn default() -> Self {
        Self::builtin()
    }
}
