pub mod handlers;
pub mod service;
pub mod session;

pub use service::{GameService, SubmitAnswer, SORTING_SESSION_SIZE};
pub use session::{
    AnswerOutcome, GameError, GameMode, GamePhase, GameSession, QUIZ_POINTS_PER_CORRECT,
    SORTING_POINTS_PER_CORRECT,
};
