use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{info, instrument};

use super::session::{AnswerOutcome, GameMode, GameSession};
use crate::catalog::{
    builtin_quiz_questions, builtin_sorting_items, GameItem, QuizQuestion, WasteCategory,
};
use crate::shared::AppError;

/// Number of catalog items dealt per sorting session.
pub const SORTING_SESSION_SIZE: usize = 6;

/// A submitted answer, shaped by the game mode it targets.
#[derive(Debug, Clone, Copy)]
pub enum SubmitAnswer {
    /// Option index for a quiz question.
    Option(usize),
    /// Bin choice for a sorting item.
    Bin(WasteCategory),
}

/// Manages at most one active mini-game session per player. Sessions
/// live only in memory for the duration of a playthrough; nothing is
/// persisted.
pub struct GameService {
    sessions: RwLock<HashMap<String, GameSession>>,
    sorting_catalog: Vec<GameItem>,
    quiz_catalog: Vec<QuizQuestion>,
}

impl GameService {
    pub fn new() -> Self {
        Self::with_catalogs(builtin_sorting_items(), builtin_quiz_questions())
    }

    pub fn with_catalogs(
        sorting_catalog: Vec<GameItem>,
        quiz_catalog: Vec<QuizQuestion>,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            sorting_catalog,
            quiz_catalog,
        }
    }

    /// Start a fresh session for the player, replacing any existing one.
    #[instrument(skip(self))]
    pub async fn start(&self, player_id: &str, mode: GameMode) -> GameSession {
        let session = match mode {
            GameMode::Quiz => GameSession::quiz(self.quiz_catalog.clone()),
            GameMode::Sorting => GameSession::sorting(
                self.sorting_catalog.clone(),
                SORTING_SESSION_SIZE,
                &mut rand::rng(),
            ),
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(player_id.to_string(), session.clone());

        info!(
            player_id = %player_id,
            %mode,
            total_questions = session.total_questions(),
            "Started game session"
        );
        session
    }

    /// Submit an answer for the player's active session. Returns the
    /// outcome together with the updated session state.
    #[instrument(skip(self))]
    pub async fn submit(
        &self,
        player_id: &str,
        answer: SubmitAnswer,
    ) -> Result<(AnswerOutcome, GameSession), AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(player_id).ok_or_else(|| {
            AppError::NotFound(format!("No active game session for player: {player_id}"))
        })?;

        let outcome = match answer {
            SubmitAnswer::Option(option_index) => session.answer_quiz(option_index)?,
            SubmitAnswer::Bin(bin) => session.sort_into(bin)?,
        };

        info!(
            player_id = %player_id,
            correct = outcome.correct,
            awarded = outcome.awarded,
            score = session.score(),
            streak = session.streak(),
            "Answer submitted"
        );
        Ok((outcome, session.clone()))
    }

    /// Snapshot of the player's active session, if any.
    pub async fn get(&self, player_id: &str) -> Option<GameSession> {
        let sessions = self.sessions.read().await;
        sessions.get(player_id).cloned()
    }

    /// Restart the player's session over the same catalog: a fresh
    /// shuffle for sorting, index zero for quiz.
    #[instrument(skip(self))]
    pub async fn restart(&self, player_id: &str) -> Result<GameSession, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(player_id).ok_or_else(|| {
            AppError::NotFound(format!("No game session to restart for player: {player_id}"))
        })?;

        session.restart(&mut rand::rng());
        info!(player_id = %player_id, "Restarted game session");
        Ok(session.clone())
    }

    /// Drop the player's session, e.g. when they leave the game screen.
    pub async fn end(&self, player_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        sessions.remove(player_id).is_some()
    }
}

impl Default for GameService {
    fn default() -> Self {
        Self::new()
    }
}
