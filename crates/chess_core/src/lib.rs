// Core chess rules: positions, move generation, legality and game flow
pub mod attack;
pub mod error;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod notation;
pub mod piece;
pub mod position;
pub mod record;
pub mod square;

// Re-export main types for convenience
pub use attack::{is_attacked, is_checkmate, is_in_check, is_legal, is_stalemate, legal_moves};
pub use error::{MoveError, SquareParseError};
pub use game::{
    attempt_move, legal_moves_matching, GameController, GameResult, GameState, MoveOutcome,
    MoveStatus,
};
pub use moves::{Move, MoveType};
pub use notation::move_notation;
pub use piece::{Color, Piece, PieceType};
pub use position::{CastleSide, CastlingRights, Position};
pub use record::{undo, GameRecord, RecordEntry};
pub use square::Square;

/// The standard starting position.
pub fn initial_position() -> Position {
    Position::initial()
}
