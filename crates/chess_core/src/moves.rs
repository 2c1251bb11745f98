use crate::{Piece, PieceType, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Normal,
    Capture,
    EnPassant,
    Castle,
}

/// A fully described move: what moved, what it took, and any special effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceType>,
    pub move_type: MoveType,
}

impl Move {
    pub fn new(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Self {
        let move_type = if captured.is_some() {
            MoveType::Capture
        } else {
            MoveType::Normal
        };
        Self {
            from,
            to,
            piece,
            captured,
            promotion: None,
            move_type,
        }
    }

    pub fn castle(from: Square, to: Square, king: Piece) -> Self {
        Self {
            from,
            to,
            piece: king,
            captured: None,
            promotion: None,
            move_type: MoveType::Castle,
        }
    }

    /// `captured` is the pawn standing behind `to`, not anything on `to` itself.
    pub fn en_passant(from: Square, to: Square, pawn: Piece, captured: Piece) -> Self {
        Self {
            from,
            to,
            piece: pawn,
            captured: Some(captured),
            promotion: None,
            move_type: MoveType::EnPassant,
        }
    }

    /// Same move with a different promotion piece.
    pub fn with_promotion(mut self, promotion: PieceType) -> Self {
        self.promotion = Some(promotion);
        self
    }

    pub fn is_castle(&self) -> bool {
        self.move_type == MoveType::Castle
    }

    pub fn is_en_passant(&self) -> bool {
        self.move_type == MoveType::EnPassant
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// True for a pawn arriving on its last rank.
    pub fn is_promotion(&self) -> bool {
        self.piece.piece_type == PieceType::Pawn && self.to.row == self.piece.color.promotion_row()
    }

    /// Square of the pawn removed by an en passant capture.
    pub fn en_passant_victim(&self) -> Square {
        Square {
            row: self.from.row,
            col: self.to.col,
        }
    }

    /// Rook relocation `(from, to)` for a castling move.
    pub fn castle_rook_squares(&self) -> Option<(Square, Square)> {
        if !self.is_castle() {
            return None;
        }
        let row = self.from.row;
        if self.to.col > self.from.col {
            Some((Square { row, col: 7 }, Square { row, col: self.from.col + 1 }))
        } else {
            Some((Square { row, col: 0 }, Square { row, col: self.from.col - 1 }))
        }
    }

    /// Long-algebraic form such as `e2e4` or `e7e8q`.
    pub fn to_uci(&self) -> String {
        match self.promotion {
            Some(kind) if self.is_promotion() => format!(
                "{}{}{}",
                self.from,
                self.to,
                kind.board_letter().to_ascii_lowercase()
            ),
            _ => format!("{}{}", self.from, self.to),
        }
    }
}
