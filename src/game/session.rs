// Scoring state for one playthrough of a mini-game. The sequence is
// fixed once the session starts (no re-shuffling mid-session), so each
// item is presented exactly once per playthrough.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::catalog::{GameItem, QuizQuestion, WasteCategory};

/// Points per correct quiz answer.
pub const QUIZ_POINTS_PER_CORRECT: u32 = 100;
/// Points per correctly binned item in the sorting game.
pub const SORTING_POINTS_PER_CORRECT: u32 = 20;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameMode {
    Quiz,
    Sorting,
}

impl GameMode {
    /// Fixed per-mode point policy, not configurable per call.
    pub const fn points_per_correct(self) -> u32 {
        match self {
            GameMode::Quiz => QUIZ_POINTS_PER_CORRECT,
            GameMode::Sorting => SORTING_POINTS_PER_CORRECT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("session is already complete")]
    SessionComplete,
    #[error("answer does not match the active game mode")]
    WrongMode,
    #[error("option index {0} is out of range")]
    InvalidOption(usize),
}

#[derive(Debug, Clone)]
enum Deck {
    Quiz {
        questions: Vec<QuizQuestion>,
    },
    Sorting {
        catalog: Vec<GameItem>,
        items: Vec<GameItem>,
        session_size: usize,
    },
}

/// Result of a single answer or bin-choice submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub awarded: u32,
    pub explanation: Option<String>,
    pub complete: bool,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    deck: Deck,
    position: usize,
    score: u32,
    correct_answers: u32,
    total_questions: u32,
    streak: u32,
    phase: GamePhase,
}

impl GameSession {
    /// Start a quiz session over the full fixed question list, in order.
    pub fn quiz(questions: Vec<QuizQuestion>) -> Self {
        let total = questions.len() as u32;
        Self::with_deck(GameMode::Quiz, Deck::Quiz { questions }, total)
    }

    /// Start a sorting session by sampling `session_size` items from the
    /// catalog without replacement (shuffle + truncate). `session_size`
    /// is clamped to the catalog length.
    pub fn sorting<R: Rng + ?Sized>(
        catalog: Vec<GameItem>,
        session_size: usize,
        rng: &mut R,
    ) -> Self {
        let items = sample_items(&catalog, session_size, rng);
        let total = items.len() as u32;
        Self::with_deck(
            GameMode::Sorting,
            Deck::Sorting {
                catalog,
                items,
                session_size,
            },
            total,
        )
    }

    fn with_deck(mode: GameMode, deck: Deck, total_questions: u32) -> Self {
        let phase = if total_questions == 0 {
            GamePhase::Complete
        } else {
            GamePhase::InProgress
        };
        Self {
            mode,
            deck,
            position: 0,
            score: 0,
            correct_answers: 0,
            total_questions,
            streak: 0,
            phase,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_answers(&self) -> u32 {
        self.correct_answers
    }

    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Index of the next item or question to be presented.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_complete(&self) -> bool {
        self.phase == GamePhase::Complete
    }

    /// The question currently awaiting an answer, if this is an
    /// in-progress quiz session.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match &self.deck {
            Deck::Quiz { questions } if self.phase == GamePhase::InProgress => {
                questions.get(self.position)
            }
            _ => None,
        }
    }

    /// The item currently awaiting a bin choice, if this is an
    /// in-progress sorting session.
    pub fn current_item(&self) -> Option<&GameItem> {
        match &self.deck {
            Deck::Sorting { items, .. } if self.phase == GamePhase::InProgress => {
                items.get(self.position)
            }
            _ => None,
        }
    }

    /// The sampled items of a sorting session, in presentation order.
    pub fn items(&self) -> Option<&[GameItem]> {
        match &self.deck {
            Deck::Sorting { items, .. } => Some(items),
            Deck::Quiz { .. } => None,
        }
    }

    /// Submit an answer for the current quiz question.
    pub fn answer_quiz(&mut self, option_index: usize) -> Result<AnswerOutcome, GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::SessionComplete);
        }
        let question = match &self.deck {
            Deck::Quiz { questions } => &questions[self.position],
            Deck::Sorting { .. } => return Err(GameError::WrongMode),
        };
        if option_index >= question.options.len() {
            return Err(GameError::InvalidOption(option_index));
        }
        let correct = option_index == question.correct_answer;
        let explanation = question.explanation.clone();
        Ok(self.apply(correct, Some(explanation)))
    }

    /// Commit a bin choice for the current sorting item.
    pub fn sort_into(&mut self, bin: WasteCategory) -> Result<AnswerOutcome, GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::SessionComplete);
        }
        let correct = match &mut self.deck {
            Deck::Sorting { items, .. } => {
                let item = &mut items[self.position];
                item.sorted = true;
                item.category == bin
            }
            Deck::Quiz { .. } => return Err(GameError::WrongMode),
        };
        Ok(self.apply(correct, None))
    }

    fn apply(&mut self, correct: bool, explanation: Option<String>) -> AnswerOutcome {
        let awarded = if correct {
            self.mode.points_per_correct()
        } else {
            0
        };
        self.score += awarded;
        if correct {
            self.correct_answers += 1;
            self.streak += 1;
        } else {
            self.streak = 0;
        }
        self.position += 1;
        if self.position as u32 >= self.total_questions {
            self.phase = GamePhase::Complete;
        }
        AnswerOutcome {
            correct,
            awarded,
            explanation,
            complete: self.is_complete(),
        }
    }

    /// Reset to a fresh session over the same catalog: a new shuffle for
    /// sorting, index zero for quiz, all totals zeroed.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Deck::Sorting {
            catalog,
            items,
            session_size,
        } = &mut self.deck
        {
            *items = sample_items(catalog, *session_size, rng);
            self.total_questions = items.len() as u32;
        }
        self.position = 0;
        self.score = 0;
        self.correct_answers = 0;
        self.streak = 0;
        self.phase = if self.total_questions == 0 {
            GamePhase::Complete
        } else {
            GamePhase::InProgress
        };
    }
}

fn sample_items<R: Rng + ?Sized>(
    catalog: &[GameItem],
    session_size: usize,
    rng: &mut R,
) -> Vec<GameItem> {
    let mut items = catalog.to_vec();
    items.shuffle(rng);
    items.truncate(session_size.min(items.len()));
    for item in &mut items {
        item.sorted = false;
    }
    items
}
