//! Attack queries and legality filtering, all pure functions of a [`Position`].

use crate::movegen::{self, GenMode};
use crate::{Color, Move, Position, Square};

/// True if any piece of `by` attacks `square`.
pub fn is_attacked(position: &Position, square: Square, by: Color) -> bool {
    position
        .pieces_of(by)
        .any(|(from, _)| movegen::destinations(position, from, GenMode::Attacks).contains(&square))
}

/// True if `color`'s king is attacked. A position without that king is
/// never in check; callers treat the missing king as the end of the game.
pub fn is_in_check(position: &Position, color: Color) -> bool {
    match position.king_square(color) {
        Some(king) => is_attacked(position, king, color.opponent()),
        None => false,
    }
}

/// Full legality of a caller-supplied move. It must match the pseudo-legal
/// move generated for its squares in piece, capture and kind, may name a
/// promotion only when promoting and then only to queen, rook, bishop or
/// knight, and must not leave the mover's king attacked.
pub fn is_legal(position: &Position, mv: &Move) -> bool {
    let generated = movegen::pseudo_legal_moves_from(position, mv.from)
        .into_iter()
        .find(|m| m.to == mv.to);
    let Some(generated) = generated else {
        return false;
    };
    if generated.piece != mv.piece
        || generated.captured != mv.captured
        || generated.move_type != mv.move_type
    {
        return false;
    }

    let resolved = match mv.promotion {
        None => generated,
        Some(kind) if generated.is_promotion() && kind.is_promotion_choice() => {
            generated.with_promotion(kind)
        }
        Some(_) => return false,
    };
    keeps_king_safe(position, &resolved)
}

/// Legality of a move already known to be pseudo-legal.
fn keeps_king_safe(position: &Position, mv: &Move) -> bool {
    let color = mv.piece.color;
    if mv.is_castle() && !castle_path_is_safe(position, mv, color) {
        return false;
    }
    !is_in_check(&position.apply(mv), color)
}

/// King not in check, and start, transit and destination squares unattacked.
fn castle_path_is_safe(position: &Position, mv: &Move, color: Color) -> bool {
    let opponent = color.opponent();
    let step: i8 = if mv.to.col > mv.from.col { 1 } else { -1 };

    let mut col = mv.from.col as i8;
    loop {
        let square = Square { row: mv.from.row, col: col as u8 };
        if is_attacked(position, square, opponent) {
            return false;
        }
        if col == mv.to.col as i8 {
            return true;
        }
        col += step;
    }
}

/// Every legal move for `color`, ordered by origin then destination,
/// both row-major.
pub fn legal_moves(position: &Position, color: Color) -> Vec<Move> {
    if position.king_square(color).is_none() {
        return Vec::new();
    }
    movegen::pseudo_legal_moves(position, color)
        .into_iter()
        .filter(|mv| keeps_king_safe(position, mv))
        .collect()
}

/// Legal moves of the piece on `from`, whatever its color.
pub fn legal_moves_from(position: &Position, from: Square) -> Vec<Move> {
    let Some(piece) = position.piece_at(from) else {
        return Vec::new();
    };
    if position.king_square(piece.color).is_none() {
        return Vec::new();
    }
    movegen::pseudo_legal_moves_from(position, from)
        .into_iter()
        .filter(|mv| keeps_king_safe(position, mv))
        .collect()
}

/// In check with no legal reply.
pub fn is_checkmate(position: &Position, color: Color) -> bool {
    is_in_check(position, color) && legal_moves(position, color).is_empty()
}

/// Not in check, yet no legal move.
pub fn is_stalemate(position: &Position, color: Color) -> bool {
    !is_in_check(position, color) && legal_moves(position, color).is_empty()
}
