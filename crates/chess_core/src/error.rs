use thiserror::Error;

use crate::{PieceType, Square};

/// Why a move request was turned down. A rejection never changes game state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is over")]
    GameOver,

    #[error("a promotion choice is pending")]
    PromotionPending,

    #[error("no promotion is pending")]
    NoPromotionPending,

    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("cannot promote to {0}")]
    InvalidPromotion(PieceType),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid square: {0:?}")]
pub struct SquareParseError(pub String);
