use log::{debug, info, warn};

use crate::attack::{self, is_in_check};
use crate::notation::move_notation;
use crate::record::GameRecord;
use crate::{Color, Move, MoveError, PieceType, Position, Square};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Checkmate { winner: Color },
    Stalemate,
    /// The position has no king of this color; play cannot continue.
    KingMissing(Color),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    ToMove(Color),
    /// A pawn move to the last rank is waiting for the player to pick a piece.
    AwaitingPromotionChoice { from: Square, to: Square, color: Color },
    GameOver(GameResult),
}

/// Everything the caller learns from a committed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub mv: Move,
    pub position: Position,
    pub notation: String,
    pub is_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
}

/// Result of [`GameController::attempt_move`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveStatus {
    Committed(MoveOutcome),
    AwaitingPromotion { from: Square, to: Square },
}

/// Legal moves of `color`, optionally narrowed to those starting on `from`.
pub fn legal_moves_matching(position: &Position, color: Color, from: Option<Square>) -> Vec<Move> {
    match from {
        Some(square) => attack::legal_moves_from(position, square)
            .into_iter()
            .filter(|mv| mv.piece.color == color)
            .collect(),
        None => attack::legal_moves(position, color),
    }
}

/// Plays `from`-`to` for the side to move on `position` without touching it.
///
/// A promotion with no choice becomes a queen; a choice outside
/// queen/rook/bishop/knight is rejected.
pub fn attempt_move(
    position: &Position,
    from: Square,
    to: Square,
    promotion: Option<PieceType>,
) -> Result<MoveOutcome, MoveError> {
    let side = position.side_to_move();
    let mut mv = legal_moves_matching(position, side, Some(from))
        .into_iter()
        .find(|mv| mv.to == to)
        .ok_or(MoveError::IllegalMove { from, to })?;

    if mv.is_promotion() {
        let choice = promotion.unwrap_or(PieceType::Queen);
        if !choice.is_promotion_choice() {
            return Err(MoveError::InvalidPromotion(choice));
        }
        mv = mv.with_promotion(choice);
    }

    let next = position.apply(&mv);
    let opponent = side.opponent();
    let is_check = is_in_check(&next, opponent);
    let has_reply = !attack::legal_moves(&next, opponent).is_empty();
    let state = classify(&next, has_reply, is_check);
    Ok(MoveOutcome {
        notation: move_notation(&mv),
        is_check,
        is_checkmate: matches!(state, GameState::GameOver(GameResult::Checkmate { .. })),
        is_stalemate: state == GameState::GameOver(GameResult::Stalemate),
        position: next,
        mv,
    })
}

/// Turn-taking state machine over a live [`Position`] with undo history.
#[derive(Debug, Clone)]
pub struct GameController {
    position: Position,
    record: GameRecord,
    state: GameState,
}

impl Default for GameController {
    fn default() -> Self {
        Self::new()
    }
}

impl GameController {
    pub fn new() -> Self {
        Self::from_position(Position::initial())
    }

    /// Starts from an arbitrary position, which may already be finished.
    pub fn from_position(position: Position) -> Self {
        let state = terminal_state(&position);
        Self {
            position,
            record: GameRecord::new(),
            state,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("game reset to the initial position");
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.state, GameState::GameOver(_))
    }

    pub fn result(&self) -> Option<GameResult> {
        match self.state {
            GameState::GameOver(result) => Some(result),
            _ => None,
        }
    }

    pub fn is_in_check(&self) -> bool {
        is_in_check(&self.position, self.side_to_move())
    }

    pub fn last_move(&self) -> Option<Move> {
        self.record.last().map(|entry| entry.mv)
    }

    /// Full-move number of the side to move, starting at 1.
    pub fn move_number(&self) -> usize {
        self.record.len() / 2 + 1
    }

    pub fn notation(&self) -> Vec<&str> {
        self.record.notation()
    }

    /// All legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        attack::legal_moves(&self.position, self.side_to_move())
    }

    /// Legal moves from `square` for the side to move, for highlighting.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves_matching(&self.position, self.side_to_move(), Some(square))
    }

    /// Requests `from`-`to`. A promoting move with no `promotion` parks the
    /// game in [`GameState::AwaitingPromotionChoice`] instead of committing.
    pub fn attempt_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<MoveStatus, MoveError> {
        self.ensure_to_move()?;

        let Some(mv) = self.legal_moves_from(from).into_iter().find(|mv| mv.to == to) else {
            warn!("rejected illegal move {}{}", from, to);
            return Err(MoveError::IllegalMove { from, to });
        };

        if mv.is_promotion() && promotion.is_none() {
            self.state = GameState::AwaitingPromotionChoice {
                from,
                to,
                color: mv.piece.color,
            };
            debug!("awaiting promotion choice for {}{}", from, to);
            return Ok(MoveStatus::AwaitingPromotion { from, to });
        }

        self.commit(from, to, promotion).map(MoveStatus::Committed)
    }

    /// Completes a pending promotion. An invalid kind is rejected and the
    /// choice stays pending.
    pub fn choose_promotion(&mut self, kind: PieceType) -> Result<MoveOutcome, MoveError> {
        let GameState::AwaitingPromotionChoice { from, to, .. } = self.state else {
            return Err(MoveError::NoPromotionPending);
        };
        if !kind.is_promotion_choice() {
            warn!("rejected promotion to {}", kind);
            return Err(MoveError::InvalidPromotion(kind));
        }
        self.commit(from, to, Some(kind))
    }

    /// Drops a pending promotion without moving. Returns whether one was pending.
    pub fn cancel_promotion(&mut self) -> bool {
        if let GameState::AwaitingPromotionChoice { .. } = self.state {
            self.state = GameState::ToMove(self.side_to_move());
            true
        } else {
            false
        }
    }

    /// Commits a move produced by the search engine, through the same path
    /// as human moves. Promotions default to a queen.
    pub fn play(&mut self, mv: &Move) -> Result<MoveOutcome, MoveError> {
        self.ensure_to_move()?;
        self.commit(mv.from, mv.to, mv.promotion)
    }

    /// Takes back the last ply. No-op on an empty history or a finished game;
    /// a pending promotion is discarded.
    pub fn undo(&mut self) -> Option<Position> {
        if self.is_over() || self.record.is_empty() {
            return None;
        }
        let prior = self.record.undo()?;
        self.position = prior.clone();
        self.state = GameState::ToMove(prior.side_to_move());
        debug!("undid last move, {} plies remain", self.record.len());
        Some(prior)
    }

    fn ensure_to_move(&self) -> Result<(), MoveError> {
        match self.state {
            GameState::ToMove(_) => Ok(()),
            GameState::AwaitingPromotionChoice { .. } => Err(MoveError::PromotionPending),
            GameState::GameOver(_) => Err(MoveError::GameOver),
        }
    }

    fn commit(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<MoveOutcome, MoveError> {
        let outcome = attempt_move(&self.position, from, to, promotion)?;
        let prior = std::mem::replace(&mut self.position, outcome.position.clone());
        self.record.push(outcome.mv, outcome.notation.clone(), prior);
        let has_reply = !(outcome.is_checkmate || outcome.is_stalemate);
        self.state = classify(&self.position, has_reply, outcome.is_check);
        debug!("{} played {}", outcome.mv.piece.color, outcome.notation);

        if let GameState::GameOver(result) = self.state {
            info!("game over: {:?}", result);
        }
        Ok(outcome)
    }
}

fn terminal_state(position: &Position) -> GameState {
    let side = position.side_to_move();
    let has_move = !attack::legal_moves(position, side).is_empty();
    classify(position, has_move, is_in_check(position, side))
}

/// State of `position` given whether its side to move has a legal move and
/// is in check.
fn classify(position: &Position, has_move: bool, in_check: bool) -> GameState {
    for color in [Color::White, Color::Black] {
        if position.king_square(color).is_none() {
            return GameState::GameOver(GameResult::KingMissing(color));
        }
    }

    let side = position.side_to_move();
    if has_move {
        GameState::ToMove(side)
    } else if in_check {
        GameState::GameOver(GameResult::Checkmate { winner: side.opponent() })
    } else {
        GameState::GameOver(GameResult::Stalemate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Piece;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    fn promotion_position() -> Position {
        Position::empty()
            .with_piece(sq("e1"), Piece::new(PieceType::King, Color::White))
            .with_piece(sq("a7"), Piece::new(PieceType::Pawn, Color::White))
            .with_piece(sq("h5"), Piece::new(PieceType::King, Color::Black))
    }

    #[test]
    fn illegal_move_leaves_state_alone() {
        let mut game = GameController::new();
        let err = game.attempt_move(sq("e2"), sq("e5"), None).unwrap_err();
        assert_eq!(err, MoveError::IllegalMove { from: sq("e2"), to: sq("e5") });
        assert_eq!(game.position(), &Position::initial());
        assert!(game.record().is_empty());

        // black piece on white's turn
        assert!(game.attempt_move(sq("e7"), sq("e5"), None).is_err());
    }

    #[test]
    fn promotion_waits_for_a_choice() {
        let mut game = GameController::from_position(promotion_position());
        let status = game.attempt_move(sq("a7"), sq("a8"), None).unwrap();
        assert_eq!(status, MoveStatus::AwaitingPromotion { from: sq("a7"), to: sq("a8") });
        assert!(matches!(game.state(), GameState::AwaitingPromotionChoice { .. }));
        assert_eq!(game.attempt_move(sq("e1"), sq("e2"), None), Err(MoveError::PromotionPending));

        assert_eq!(
            game.choose_promotion(PieceType::King),
            Err(MoveError::InvalidPromotion(PieceType::King))
        );
        assert!(matches!(game.state(), GameState::AwaitingPromotionChoice { .. }));

        let outcome = game.choose_promotion(PieceType::Knight).unwrap();
        assert_eq!(outcome.notation, "Ka8");
        assert_eq!(
            game.position().piece_at(sq("a8")),
            Some(Piece::new(PieceType::Knight, Color::White))
        );
        assert_eq!(game.state(), GameState::ToMove(Color::Black));
    }

    #[test]
    fn promotion_with_choice_commits_directly() {
        let mut game = GameController::from_position(promotion_position());
        let status = game.attempt_move(sq("a7"), sq("a8"), Some(PieceType::Rook)).unwrap();
        let MoveStatus::Committed(outcome) = status else {
            panic!("expected a committed move");
        };
        assert_eq!(outcome.mv.promotion, Some(PieceType::Rook));
        assert_eq!(game.choose_promotion(PieceType::Queen), Err(MoveError::NoPromotionPending));
    }

    #[test]
    fn cancel_promotion_returns_to_move() {
        let mut game = GameController::from_position(promotion_position());
        game.attempt_move(sq("a7"), sq("a8"), None).unwrap();
        assert!(game.cancel_promotion());
        assert_eq!(game.state(), GameState::ToMove(Color::White));
        assert!(!game.cancel_promotion());
    }

    #[test]
    fn undo_restores_prior_position_and_notation() {
        let mut game = GameController::new();
        assert_eq!(game.undo(), None);
        game.attempt_move(sq("e2"), sq("e4"), None).unwrap();
        game.attempt_move(sq("e7"), sq("e5"), None).unwrap();
        assert_eq!(game.notation(), vec!["e4", "e5"]);
        assert_eq!(game.move_number(), 2);

        let prior = game.undo().unwrap();
        assert_eq!(prior.side_to_move(), Color::Black);
        assert_eq!(prior.en_passant(), Some(sq("e3")));
        assert_eq!(game.notation(), vec!["e4"]);
        assert_eq!(game.state(), GameState::ToMove(Color::Black));
        assert_eq!(game.last_move().map(|m| m.to), Some(sq("e4")));
    }

    #[test]
    fn fools_mate_is_sticky() {
        let mut game = GameController::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            game.attempt_move(sq(from), sq(to), None).unwrap();
        }
        assert_eq!(game.result(), Some(GameResult::Checkmate { winner: Color::Black }));
        assert_eq!(game.notation().last(), Some(&"Qh4"));
        assert_eq!(game.attempt_move(sq("a2"), sq("a3"), None), Err(MoveError::GameOver));
        assert_eq!(game.undo(), None);
        assert!(game.legal_moves().is_empty());

        game.reset();
        assert_eq!(game.state(), GameState::ToMove(Color::White));
        assert_eq!(game.legal_moves().len(), 20);
    }

    #[test]
    fn missing_king_ends_the_game() {
        let position =
            Position::empty().with_piece(sq("e1"), Piece::new(PieceType::King, Color::White));
        let game = GameController::from_position(position);
        assert_eq!(game.result(), Some(GameResult::KingMissing(Color::Black)));
    }

    fn queen_and_king_against_king() -> Position {
        Position::empty()
            .with_piece(sq("h8"), Piece::new(PieceType::King, Color::Black))
            .with_piece(sq("f7"), Piece::new(PieceType::King, Color::White))
            .with_piece(sq("g5"), Piece::new(PieceType::Queen, Color::White))
    }

    #[test]
    fn outcome_flags_match_the_resulting_state() {
        let mut game = GameController::from_position(queen_and_king_against_king());
        let status = game.attempt_move(sq("g5"), sq("g6"), None).unwrap();
        let MoveStatus::Committed(outcome) = status else {
            panic!("expected a committed move");
        };
        assert!(outcome.is_stalemate && !outcome.is_checkmate && !outcome.is_check);
        assert_eq!(game.result(), Some(GameResult::Stalemate));

        let mut game = GameController::from_position(queen_and_king_against_king());
        let status = game.attempt_move(sq("g5"), sq("g7"), None).unwrap();
        let MoveStatus::Committed(outcome) = status else {
            panic!("expected a committed move");
        };
        assert!(outcome.is_checkmate && outcome.is_check && !outcome.is_stalemate);
        assert_eq!(game.result(), Some(GameResult::Checkmate { winner: Color::White }));
    }

    #[test]
    fn moving_beside_a_missing_king_is_not_stalemate() {
        let position = Position::empty()
            .with_piece(sq("e1"), Piece::new(PieceType::King, Color::White))
            .with_piece(sq("a2"), Piece::new(PieceType::Pawn, Color::White));
        let outcome = attempt_move(&position, sq("a2"), sq("a3"), None).unwrap();
        assert!(!outcome.is_stalemate && !outcome.is_checkmate);
    }

    #[test]
    fn pure_attempt_move_defaults_to_queen() {
        let outcome = attempt_move(&promotion_position(), sq("a7"), sq("a8"), None).unwrap();
        assert_eq!(outcome.mv.promotion, Some(PieceType::Queen));
        assert_eq!(outcome.notation, "Qa8");
        assert_eq!(
            attempt_move(&promotion_position(), sq("a7"), sq("a8"), Some(PieceType::Pawn)),
            Err(MoveError::InvalidPromotion(PieceType::Pawn))
        );
    }
}
