use chess_core::{Color, GameController, GameState, Move, MoveError, MoveOutcome, Position};
use log::info;
use thiserror::Error;

use crate::search::{search, SearchConfig, MAX_DEPTH, MIN_DEPTH};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("it is not {0}'s turn")]
    NotEngineTurn(Color),

    #[error("no legal move available")]
    NoMoveAvailable,

    #[error("engine move rejected: {0}")]
    Rejected(#[from] MoveError),
}

/// The automated opponent: a color plus search settings.
#[derive(Debug, Clone)]
pub struct ChessAI {
    color: Color,
    config: SearchConfig,
}

impl ChessAI {
    pub fn new(color: Color, depth: u8) -> Self {
        ChessAI {
            color,
            config: SearchConfig {
                depth: depth.clamp(MIN_DEPTH, MAX_DEPTH),
                ..SearchConfig::default()
            },
        }
    }

    pub fn with_parallel_root(mut self, parallel_root: bool) -> Self {
        self.config.parallel_root = parallel_root;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Best move for the side to move on `position`.
    pub fn get_move(&self, position: &Position) -> Option<Move> {
        search(position, &self.config).best_move
    }

    /// Searches a copy of the live position and commits the chosen move
    /// through the controller's normal path.
    pub fn play_turn(&self, game: &mut GameController) -> Result<MoveOutcome, EngineError> {
        if game.state() != GameState::ToMove(self.color) {
            return Err(EngineError::NotEngineTurn(self.color));
        }

        let snapshot = game.position().clone();
        let mv = self.get_move(&snapshot).ok_or(EngineError::NoMoveAvailable)?;
        let outcome = game.play(&mv)?;
        info!("{} engine plays {}", self.color, outcome.notation);
        Ok(outcome)
    }
}

impl Default for ChessAI {
    fn default() -> Self {
        ChessAI::new(Color::Black, SearchConfig::default().depth)
    }
}
