use chess_core::{Color, PieceType, Position, Square};

// Standard piece values used in chess engines, measured in centipawns (100 = 1 pawn)
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;
const KING_VALUE: i32 = 20000; // losing the king outweighs everything else

// Pawn bonus terms. Only each side's pawn starting rank is inspected, not how
// far pawns have actually advanced.
const OWN_HOME_PAWN_BONUS: i32 = 50;
const OPPONENT_HOME_PAWN_BONUS: i32 = 0;

/// Static score of `position` from `perspective`'s point of view: material
/// plus the fixed pawn bonus. Positive favors `perspective`.
pub fn evaluate_position(position: &Position, perspective: Color) -> i32 {
    let mut score = 0;

    for (_, piece) in position.pieces() {
        let value = piece_value(piece.piece_type);
        if piece.color == perspective {
            score += value;
        } else {
            score -= value;
        }
    }

    score + pawn_bonus(position, perspective)
}

pub fn piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => KING_VALUE,
    }
}

fn pawn_bonus(position: &Position, perspective: Color) -> i32 {
    let opponent = perspective.opponent();
    let mut bonus = 0;

    for col in 0..8 {
        let own = Square { row: perspective.pawn_start_row(), col };
        if position.piece_at(own).is_some_and(|p| p.is(PieceType::Pawn, perspective)) {
            bonus += OWN_HOME_PAWN_BONUS;
        }
        let theirs = Square { row: opponent.pawn_start_row(), col };
        if position.piece_at(theirs).is_some_and(|p| p.is(PieceType::Pawn, opponent)) {
            bonus -= OPPONENT_HOME_PAWN_BONUS;
        }
    }

    bonus
}
