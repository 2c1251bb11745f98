use crate::{Move, Position};

/// One committed ply: the move, its notation, and the position it was played from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordEntry {
    pub mv: Move,
    pub notation: String,
    pub prior: Position,
}

/// Ordered history of committed moves; the undo stack.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameRecord {
    entries: Vec<RecordEntry>,
}

impl GameRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mv: Move, notation: String, prior: Position) {
        self.entries.push(RecordEntry { mv, notation, prior });
    }

    /// Pops the last ply and returns the position it was played from, or
    /// `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<Position> {
        self.entries.pop().map(|entry| entry.prior)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&RecordEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[RecordEntry] {
        &self.entries
    }

    pub fn notation(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.notation.as_str()).collect()
    }

    /// Numbered move list, e.g. `1. e4 e5 2. Kf3`.
    pub fn move_list(&self) -> String {
        self.entries
            .chunks(2)
            .enumerate()
            .map(|(i, pair)| {
                let plies: Vec<&str> = pair.iter().map(|e| e.notation.as_str()).collect();
                format!("{}. {}", i + 1, plies.join(" "))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Free-function form of [`GameRecord::undo`].
pub fn undo(record: &mut GameRecord) -> Option<Position> {
    record.undo()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Piece, PieceType, Square};

    #[test]
    fn undo_on_empty_record_is_a_no_op() {
        let mut record = GameRecord::new();
        assert_eq!(undo(&mut record), None);
        assert!(record.is_empty());
    }

    #[test]
    fn move_list_numbers_pairs() {
        let mut record = GameRecord::new();
        let start = Position::initial();
        let pawn = Piece::new(PieceType::Pawn, Color::White);
        let e2 = Square::from_algebraic("e2").unwrap();
        let e4 = Square::from_algebraic("e4").unwrap();
        let mv = crate::Move::new(e2, e4, pawn, None);
        record.push(mv, "e4".into(), start.clone());
        record.push(mv, "e5".into(), start.clone());
        record.push(mv, "Kf3".into(), start.clone());
        assert_eq!(record.move_list(), "1. e4 e5 2. Kf3");
        assert_eq!(record.undo(), Some(start));
        assert_eq!(record.notation(), vec!["e4", "e5"]);
    }
}
