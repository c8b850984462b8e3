use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

use super::service::SubmitAnswer;
use super::session::{GameMode, GamePhase, GameSession};
use crate::catalog::WasteCategory;
use crate::shared::{AppError, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub player_id: String,
    pub mode: GameMode,
}

/// What the player is currently being asked. Quiz views never reveal
/// the correct option; explanations come back with the answer.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PromptView {
    Question {
        id: String,
        question: String,
        options: Vec<String>,
        icon: String,
    },
    Item {
        id: String,
        name: String,
        icon: String,
        bins: Vec<WasteCategory>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub player_id: String,
    pub mode: Option<GameMode>,
    pub phase: GamePhase,
    pub score: u32,
    pub correct_answers: u32,
    pub total_questions: u32,
    pub streak: u32,
    pub position: usize,
    pub current: Option<PromptView>,
}

impl SessionView {
    pub fn from_session(player_id: &str, session: &GameSession) -> Self {
        let current = session
            .current_question()
            .map(|question| PromptView::Question {
                id: question.id.clone(),
                question: question.question.clone(),
                options: question.options.clone(),
                icon: question.icon.clone(),
            })
            .or_else(|| {
                session.current_item().map(|item| PromptView::Item {
                    id: item.id.clone(),
                    name: item.name.clone(),
                    icon: item.icon.clone(),
                    bins: WasteCategory::iter().collect(),
                })
            });

        Self {
            player_id: player_id.to_string(),
            mode: Some(session.mode()),
            phase: session.phase(),
            score: session.score(),
            correct_answers: session.correct_answers(),
            total_questions: session.total_questions(),
            streak: session.streak(),
            position: session.position(),
            current,
        }
    }

    /// View for a player with no active session.
    pub fn not_started(player_id: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            mode: None,
            phase: GamePhase::NotStarted,
            score: 0,
            correct_answers: 0,
            total_questions: 0,
            streak: 0,
            position: 0,
            current: None,
        }
    }
}

/// Exactly one of the two fields must be present, matching the mode of
/// the active session.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct AnswerRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin: Option<WasteCategory>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnswerView {
    pub correct: bool,
    pub awarded: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub session: SessionView,
}

/// POST /game/sessions
#[instrument(name = "start_game_session", skip(state))]
pub async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<SessionView>, AppError> {
    if request.player_id.trim().is_empty() {
        return Err(AppError::BadRequest("Player ID cannot be empty".to_string()));
    }

    let session = state.games.start(&request.player_id, request.mode).await;
    Ok(Json(SessionView::from_session(&request.player_id, &session)))
}

/// GET /game/sessions/:player_id
///
/// Always 200; a player with no active session reads as `not_started`.
#[instrument(name = "get_game_session", skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Json<SessionView> {
    match state.games.get(&player_id).await {
        Some(session) => Json(SessionView::from_session(&player_id, &session)),
        None => Json(SessionView::not_started(&player_id)),
    }
}

/// POST /game/sessions/:player_id/answers
#[instrument(name = "submit_game_answer", skip(state))]
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<AnswerView>, AppError> {
    let answer = match (request.option_index, request.bin) {
        (Some(option_index), None) => SubmitAnswer::Option(option_index),
        (None, Some(bin)) => SubmitAnswer::Bin(bin),
        _ => {
            return Err(AppError::BadRequest(
                "Provide exactly one of option_index or bin".to_string(),
            ))
        }
    };

    let (outcome, session) = state.games.submit(&player_id, answer).await?;
    Ok(Json(AnswerView {
        correct: outcome.correct,
        awarded: outcome.awarded,
        explanation: outcome.explanation,
        session: SessionView::from_session(&player_id, &session),
    }))
}

/// POST /game/sessions/:player_id/restart
#[instrument(name = "restart_game_session", skip(state))]
pub async fn restart_session(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.games.restart(&player_id).await?;
    Ok(Json(SessionView::from_session(&player_id, &session)))
}
