use crate::{Move, PieceType};

/// Short algebraic notation for a committed move.
///
/// Castles are `O-O`/`O-O-O`, en passant is `exd6 e.p.`, pawn moves name the
/// destination (prefixed `{file}x` on captures), and other pieces use the
/// first letter of their kind's name, which makes knights and kings both `K`.
/// A promotion is written for the piece that arrives, so `e7e8` promoting to
/// a queen reads `Qe8`.
pub fn move_notation(mv: &Move) -> String {
    if mv.is_castle() {
        return if mv.to.col > mv.from.col { "O-O" } else { "O-O-O" }.to_string();
    }

    if mv.is_en_passant() {
        return format!("{}x{} e.p.", mv.from.file_char(), mv.to);
    }

    let arriving = if mv.is_promotion() {
        mv.promotion.unwrap_or(PieceType::Queen)
    } else {
        mv.piece.piece_type
    };

    if arriving == PieceType::Pawn {
        return if mv.is_capture() {
            format!("{}x{}", mv.from.file_char(), mv.to)
        } else {
            mv.to.to_string()
        };
    }

    let letter = arriving.notation_letter();
    if mv.is_capture() {
        format!("{}x{}", letter, mv.to)
    } else {
        format!("{}{}", letter, mv.to)
    }
}
