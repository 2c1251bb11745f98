//! Pseudo-legal move generation: piece movement patterns and board
//! occupancy only. Whether the mover's king ends up safe is decided in
//! [`crate::attack`].

use crate::position::CastleSide;
use crate::{Color, Move, Piece, PieceType, Position, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] =
    [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];

const KING_OFFSETS: [(i8, i8); 8] =
    [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// What a destination set is being generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenMode {
    /// Squares the piece may move to, castling included.
    Moves,
    /// Squares the piece attacks: pawn diagonals regardless of occupancy,
    /// no pawn pushes, no castling.
    Attacks,
}

/// Destinations for the piece on `from`, sorted row-major. Empty if `from`
/// is vacant.
pub fn destinations(position: &Position, from: Square, mode: GenMode) -> Vec<Square> {
    let piece = match position.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    let mut targets = Vec::new();
    match piece.piece_type {
        PieceType::Pawn => pawn_targets(position, from, piece.color, mode, &mut targets),
        PieceType::Knight => {
            step_targets(position, from, piece.color, &KNIGHT_OFFSETS, &mut targets)
        }
        PieceType::Bishop => slide_targets(position, from, piece.color, &DIAGONALS, &mut targets),
        PieceType::Rook => slide_targets(position, from, piece.color, &ORTHOGONALS, &mut targets),
        PieceType::Queen => {
            slide_targets(position, from, piece.color, &DIAGONALS, &mut targets);
            slide_targets(position, from, piece.color, &ORTHOGONALS, &mut targets);
        }
        PieceType::King => {
            step_targets(position, from, piece.color, &KING_OFFSETS, &mut targets);
            if mode == GenMode::Moves {
                castle_targets(position, from, piece.color, &mut targets);
            }
        }
    }

    targets.sort_unstable();
    targets
}

/// Pseudo-legal moves for every piece of `color`, ordered by origin and then
/// destination, both row-major. Promotions default to a queen.
pub fn pseudo_legal_moves(position: &Position, color: Color) -> Vec<Move> {
    position
        .pieces_of(color)
        .flat_map(|(from, _)| pseudo_legal_moves_from(position, from))
        .collect()
}

pub fn pseudo_legal_moves_from(position: &Position, from: Square) -> Vec<Move> {
    let piece = match position.piece_at(from) {
        Some(p) => p,
        None => return Vec::new(),
    };

    destinations(position, from, GenMode::Moves)
        .into_iter()
        .map(|to| describe_move(position, from, to, piece))
        .collect()
}

fn describe_move(position: &Position, from: Square, to: Square, piece: Piece) -> Move {
    let col_diff = (to.col as i8 - from.col as i8).abs();

    if piece.piece_type == PieceType::King && col_diff == 2 {
        return Move::castle(from, to, piece);
    }

    if piece.piece_type == PieceType::Pawn && col_diff == 1 && position.is_empty(to) {
        let victim_square = Square { row: from.row, col: to.col };
        if let Some(victim) = position.piece_at(victim_square) {
            return Move::en_passant(from, to, piece, victim);
        }
    }

    let mv = Move::new(from, to, piece, position.piece_at(to));
    if mv.is_promotion() {
        mv.with_promotion(PieceType::Queen)
    } else {
        mv
    }
}

fn pawn_targets(
    position: &Position,
    from: Square,
    color: Color,
    mode: GenMode,
    targets: &mut Vec<Square>,
) {
    let dir = color.pawn_direction();

    if mode == GenMode::Moves {
        if let Some(one) = from.offset(dir, 0).filter(|sq| position.is_empty(*sq)) {
            targets.push(one);
            if from.row == color.pawn_start_row() {
                if let Some(two) = from.offset(2 * dir, 0).filter(|sq| position.is_empty(*sq)) {
                    targets.push(two);
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(to) = from.offset(dir, d_col) else {
            continue;
        };
        if mode == GenMode::Attacks {
            targets.push(to);
            continue;
        }
        match position.piece_at(to) {
            Some(occupant) if occupant.color != color => targets.push(to),
            Some(_) => {}
            None if is_en_passant_capture(position, from, to, color) => targets.push(to),
            None => {}
        }
    }
}

/// The target must be the current en-passant square with an enemy pawn
/// standing directly behind it.
fn is_en_passant_capture(position: &Position, from: Square, to: Square, color: Color) -> bool {
    if position.en_passant() != Some(to) {
        return false;
    }
    let victim = Square { row: from.row, col: to.col };
    matches!(position.piece_at(victim), Some(p) if p.is(PieceType::Pawn, color.opponent()))
}

fn step_targets(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[(i8, i8)],
    targets: &mut Vec<Square>,
) {
    for &(d_row, d_col) in offsets {
        if let Some(to) = from.offset(d_row, d_col) {
            if position.piece_at(to).map_or(true, |p| p.color != color) {
                targets.push(to);
            }
        }
    }
}

fn slide_targets(
    position: &Position,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    targets: &mut Vec<Square>,
) {
    for &(d_row, d_col) in directions {
        let mut current = from.offset(d_row, d_col);
        while let Some(to) = current {
            match position.piece_at(to) {
                None => targets.push(to),
                Some(p) => {
                    if p.color != color {
                        targets.push(to);
                    }
                    break;
                }
            }
            current = to.offset(d_row, d_col);
        }
    }
}

/// Castle destinations gated on rights, king and rook on their home squares,
/// and empty squares between them. Attack checks happen in legality filtering.
fn castle_targets(position: &Position, from: Square, color: Color, targets: &mut Vec<Square>) {
    let row = color.back_row();
    if from != (Square { row, col: 4 }) {
        return;
    }
    let rights = position.castling_rights();

    for side in [CastleSide::QueenSide, CastleSide::KingSide] {
        if !rights.can_castle(color, side) {
            continue;
        }
        let rook_square = Square { row, col: side.rook_col() };
        if position.piece_at(rook_square) != Some(Piece::new(PieceType::Rook, color)) {
            continue;
        }
        let (mut between, dest_col) = match side {
            CastleSide::QueenSide => (1..4, 2),
            CastleSide::KingSide => (5..7, 6),
        };
        if between.all(|col| position.is_empty(Square { row, col })) {
            targets.push(Square { row, col: dest_col });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn knights_and_pawns_in_the_opening() {
        let position = Position::initial();
        assert_eq!(destinations(&position, sq("g1"), GenMode::Moves), vec![sq("f3"), sq("h3")]);
        assert_eq!(destinations(&position, sq("e2"), GenMode::Moves), vec![sq("e4"), sq("e3")]);
        assert!(destinations(&position, sq("a1"), GenMode::Moves).is_empty());
        assert_eq!(pseudo_legal_moves(&position, Color::White).len(), 20);
    }

    #[test]
    fn sliders_stop_at_first_occupied_square() {
        let rook = Piece::new(PieceType::Rook, Color::White);
        let position = Position::empty()
            .with_piece(sq("d4"), rook)
            .with_piece(sq("d6"), Piece::new(PieceType::Pawn, Color::Black))
            .with_piece(sq("f4"), Piece::new(PieceType::Pawn, Color::White));
        let targets = destinations(&position, sq("d4"), GenMode::Moves);
        assert!(targets.contains(&sq("d6")));
        assert!(!targets.contains(&sq("d7")));
        assert!(targets.contains(&sq("e4")));
        assert!(!targets.contains(&sq("f4")));
        assert_eq!(targets.len(), 2 + 3 + 3 + 1);
    }

    #[test]
    fn pawn_attacks_ignore_occupancy() {
        let position =
            Position::empty().with_piece(sq("e4"), Piece::new(PieceType::Pawn, Color::White));
        assert_eq!(destinations(&position, sq("e4"), GenMode::Attacks), vec![sq("d5"), sq("f5")]);
        assert_eq!(destinations(&position, sq("e4"), GenMode::Moves), vec![sq("e5")]);
    }

    #[test]
    fn castle_needs_rook_at_home_and_empty_path() {
        let king = Piece::new(PieceType::King, Color::White);
        let rook = Piece::new(PieceType::Rook, Color::White);
        let position = Position::empty()
            .with_piece(sq("e1"), king)
            .with_piece(sq("h1"), rook)
            .with_piece(sq("b1"), Piece::new(PieceType::Knight, Color::White))
            .with_piece(sq("a1"), rook);
        let targets = destinations(&position, sq("e1"), GenMode::Moves);
        assert!(targets.contains(&sq("g1")));
        assert!(!targets.contains(&sq("c1")));
        assert!(!destinations(&position, sq("e1"), GenMode::Attacks).contains(&sq("g1")));

        let without_rook = Position::empty().with_piece(sq("e1"), king);
        assert!(!destinations(&without_rook, sq("e1"), GenMode::Moves).contains(&sq("g1")));
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let position =
            Position::empty().with_piece(sq("b7"), Piece::new(PieceType::Pawn, Color::White));
        let moves = pseudo_legal_moves_from(&position, sq("b7"));
        assert_eq!(moves.len(), 1);
        assert_eq!(moves[0].promotion, Some(PieceType::Queen));
    }
}
