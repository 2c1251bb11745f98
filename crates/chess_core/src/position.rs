use std::fmt;

use crate::{Color, Move, Piece, PieceType, Square};

/// Which rook a castling right refers to; the value indexes `rook_moved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    QueenSide = 0,
    KingSide = 1,
}

impl CastleSide {
    pub fn rook_col(self) -> u8 {
        match self {
            CastleSide::QueenSide => 0,
            CastleSide::KingSide => 7,
        }
    }

    fn from_rook_col(col: u8) -> Option<Self> {
        match col {
            0 => Some(CastleSide::QueenSide),
            7 => Some(CastleSide::KingSide),
            _ => None,
        }
    }
}

/// "Has moved" flags. Each one only ever goes from false to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub white_king_moved: bool,
    pub black_king_moved: bool,
    pub white_rook_moved: [bool; 2],
    pub black_rook_moved: [bool; 2],
}

impl CastlingRights {
    /// Every flag set: no castling for either side.
    pub fn none() -> Self {
        Self {
            white_king_moved: true,
            black_king_moved: true,
            white_rook_moved: [true; 2],
            black_rook_moved: [true; 2],
        }
    }

    pub fn king_moved(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_king_moved,
            Color::Black => self.black_king_moved,
        }
    }

    pub fn rook_moved(&self, color: Color, side: CastleSide) -> bool {
        match color {
            Color::White => self.white_rook_moved[side as usize],
            Color::Black => self.black_rook_moved[side as usize],
        }
    }

    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        !self.king_moved(color) && !self.rook_moved(color, side)
    }

    fn mark_king_moved(&mut self, color: Color) {
        match color {
            Color::White => self.white_king_moved = true,
            Color::Black => self.black_king_moved = true,
        }
    }

    fn mark_rook_moved(&mut self, color: Color, side: CastleSide) {
        match color {
            Color::White => self.white_rook_moved[side as usize] = true,
            Color::Black => self.black_rook_moved[side as usize] = true,
        }
    }
}

/// Board snapshot plus the state needed to generate moves from it.
///
/// Positions are values: applying a move derives a new one and leaves the
/// original untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Position {
    squares: [[Option<Piece>; 8]; 8],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Self::initial()
    }
}

impl Position {
    /// The standard starting setup, White to move.
    pub fn initial() -> Self {
        let mut position = Self::empty();

        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (col, &piece_type) in back_rank.iter().enumerate() {
            position.squares[0][col] = Some(Piece::new(piece_type, Color::Black));
            position.squares[1][col] = Some(Piece::new(PieceType::Pawn, Color::Black));
            position.squares[6][col] = Some(Piece::new(PieceType::Pawn, Color::White));
            position.squares[7][col] = Some(Piece::new(piece_type, Color::White));
        }

        position
    }

    /// An empty board, White to move, no castling flags set.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            side_to_move: Color::White,
            castling_rights: CastlingRights::default(),
            en_passant: None,
        }
    }

    pub fn with_piece(mut self, square: Square, piece: Piece) -> Self {
        self.squares[square.row as usize][square.col as usize] = Some(piece);
        self
    }

    pub fn with_side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    pub fn with_castling_rights(mut self, rights: CastlingRights) -> Self {
        self.castling_rights = rights;
        self
    }

    pub fn with_en_passant(mut self, target: Option<Square>) -> Self {
        self.en_passant = target;
        self
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row as usize][square.col as usize]
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Occupied squares with their pieces, row-major.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.is(PieceType::King, color))
            .map(|(sq, _)| sq)
    }

    fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row as usize][square.col as usize] = piece;
    }

    /// Derives the position after `mv`, which must have been generated from
    /// this position. A promoting move without a chosen piece becomes a queen.
    pub fn apply(&self, mv: &Move) -> Position {
        let mut next = self.clone();
        let mover = mv.piece;

        next.set(mv.from, None);
        if let Some((rook_from, rook_to)) = mv.castle_rook_squares() {
            let rook = next.piece_at(rook_from);
            next.set(rook_from, None);
            next.set(rook_to, rook);
        }
        if mv.is_en_passant() {
            next.set(mv.en_passant_victim(), None);
        }

        let arriving = if mv.is_promotion() {
            Piece::new(mv.promotion.unwrap_or(PieceType::Queen), mover.color)
        } else {
            mover
        };
        next.set(mv.to, Some(arriving));

        match mover.piece_type {
            PieceType::King => next.castling_rights.mark_king_moved(mover.color),
            PieceType::Rook if mv.from.row == mover.color.back_row() => {
                if let Some(side) = CastleSide::from_rook_col(mv.from.col) {
                    next.castling_rights.mark_rook_moved(mover.color, side);
                }
            }
            _ => {}
        }
        if let Some(captured) = mv.captured {
            if captured.piece_type == PieceType::Rook && mv.to.row == captured.color.back_row() {
                if let Some(side) = CastleSide::from_rook_col(mv.to.col) {
                    next.castling_rights.mark_rook_moved(captured.color, side);
                }
            }
        }

        next.en_passant = if mover.piece_type == PieceType::Pawn
            && (mv.to.row as i8 - mv.from.row as i8).abs() == 2
        {
            Some(Square {
                row: (mv.from.row + mv.to.row) / 2,
                col: mv.from.col,
            })
        } else {
            None
        };
        next.side_to_move = mover.color.opponent();

        next
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let symbol = self
                    .piece_at(Square { row, col })
                    .map_or('.', |piece| piece.symbol());
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn initial_setup_has_kings_on_e_file() {
        let position = Position::initial();
        assert_eq!(position.king_square(Color::White), Some(sq("e1")));
        assert_eq!(position.king_square(Color::Black), Some(sq("e8")));
        assert_eq!(position.pieces().count(), 32);
        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.en_passant(), None);
    }

    #[test]
    fn double_push_sets_en_passant_target_and_single_push_clears_it() {
        let start = Position::initial();
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        let after = start.apply(&Move::new(sq("e2"), sq("e4"), pawn, None));
        assert_eq!(after.en_passant(), Some(sq("e3")));
        assert_eq!(after.side_to_move(), Color::Black);

        let black_pawn = Piece::new(PieceType::Pawn, Color::Black);
        let next = after.apply(&Move::new(sq("a7"), sq("a6"), black_pawn, None));
        assert_eq!(next.en_passant(), None);
        // the original value is untouched
        assert_eq!(start, Position::initial());
    }

    #[test]
    fn rook_move_and_rook_capture_clear_rights() {
        let white_rook = Piece::new(PieceType::Rook, Color::White);
        let black_rook = Piece::new(PieceType::Rook, Color::Black);
        let position = Position::empty()
            .with_piece(sq("e1"), Piece::new(PieceType::King, Color::White))
            .with_piece(sq("e8"), Piece::new(PieceType::King, Color::Black))
            .with_piece(sq("a1"), white_rook)
            .with_piece(sq("h1"), white_rook)
            .with_piece(sq("h8"), black_rook);

        let moved = position.apply(&Move::new(sq("a1"), sq("a4"), white_rook, None));
        assert!(moved.castling_rights().rook_moved(Color::White, CastleSide::QueenSide));
        assert!(!moved.castling_rights().rook_moved(Color::White, CastleSide::KingSide));

        let capture = Move::new(sq("h1"), sq("h8"), white_rook, Some(black_rook));
        let captured = position.apply(&capture);
        assert!(captured.castling_rights().rook_moved(Color::Black, CastleSide::KingSide));
        assert!(captured.castling_rights().rook_moved(Color::White, CastleSide::KingSide));
        assert!(!captured.castling_rights().king_moved(Color::Black));
    }

    #[test]
    fn display_puts_rank_eight_on_top() {
        let text = Position::initial().to_string();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "8  r n b q k b n r");
    }
}
