use std::io::Write;

use chess_core::{GameController, GameResult, GameState, MoveOutcome, MoveStatus};
use chess_engine::ChessAI;
use log::debug;

use crate::command::Command;
use crate::CliError;

const HELP: &str = "\
commands:
  e2e4 | e7e8q     move (optional promotion letter q/r/b/n)
  promote <q|r|b|n> finish a pending promotion
  cancel           abandon a pending promotion
  moves [square]   list legal moves
  undo             take back your last move
  reset            start a new game
  board            show the board
  history          show the move list
  quit";

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One game at the terminal: the controller plus the optional engine side.
pub struct Session {
    game: GameController,
    engine: Option<ChessAI>,
}

impl Session {
    pub fn new(engine: Option<ChessAI>) -> Self {
        Self {
            game: GameController::new(),
            engine,
        }
    }

    pub fn game(&self) -> &GameController {
        &self.game
    }

    /// Prints the board and lets the engine open if it plays White.
    pub fn start(&mut self, out: &mut impl Write) -> Result<(), CliError> {
        self.show_board(out)?;
        self.engine_reply(out)
    }

    pub fn handle(&mut self, command: Command, out: &mut impl Write) -> Result<Flow, CliError> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Board => self.show_board(out)?,
            Command::History => writeln!(out, "{}", self.game.record().move_list())?,
            Command::Moves(from) => {
                let moves = match from {
                    Some(square) => self.game.legal_moves_from(square),
                    None => self.game.legal_moves(),
                };
                let listed: Vec<String> = moves.iter().map(|m| m.to_uci()).collect();
                writeln!(out, "{}", listed.join(" "))?;
            }
            Command::Move { from, to, promotion } => {
                match self.game.attempt_move(from, to, promotion)? {
                    MoveStatus::Committed(outcome) => {
                        self.report(&outcome, out)?;
                        self.engine_reply(out)?;
                    }
                    MoveStatus::AwaitingPromotion { .. } => {
                        writeln!(out, "promote to? (promote q|r|b|n)")?;
                    }
                }
            }
            Command::Promote(kind) => {
                let outcome = self.game.choose_promotion(kind)?;
                self.report(&outcome, out)?;
                self.engine_reply(out)?;
            }
            Command::CancelPromotion => {
                if self.game.cancel_promotion() {
                    writeln!(out, "promotion cancelled")?;
                }
            }
            Command::Undo => self.undo(out)?,
            Command::Reset => {
                self.game.reset();
                self.show_board(out)?;
                self.engine_reply(out)?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Takes back plies until a human is to move again.
    fn undo(&mut self, out: &mut impl Write) -> Result<(), CliError> {
        if self.game.undo().is_none() {
            writeln!(out, "nothing to undo")?;
            return Ok(());
        }
        if let Some(engine) = &self.engine {
            if self.game.side_to_move() == engine.color() && self.game.undo().is_none() {
                debug!("engine's opening move cannot be undone");
            }
        }
        self.show_board(out)?;
        self.engine_reply(out)
    }

    fn engine_reply(&mut self, out: &mut impl Write) -> Result<(), CliError> {
        let Some(engine) = &self.engine else {
            return Ok(());
        };
        if self.game.state() != GameState::ToMove(engine.color()) {
            return Ok(());
        }
        let outcome = engine.play_turn(&mut self.game)?;
        self.report(&outcome, out)
    }

    fn report(&self, outcome: &MoveOutcome, out: &mut impl Write) -> Result<(), CliError> {
        writeln!(out, "{}. {}", self.game.record().len().div_ceil(2), outcome.notation)?;
        self.show_board(out)?;
        match self.game.result() {
            Some(GameResult::Checkmate { winner }) => writeln!(out, "checkmate, {} wins", winner)?,
            Some(GameResult::Stalemate) => writeln!(out, "stalemate")?,
            Some(GameResult::KingMissing(color)) => {
                writeln!(out, "{} has no king, game over", color)?
            }
            None if outcome.is_check => writeln!(out, "check")?,
            None => {}
        }
        Ok(())
    }

    fn show_board(&self, out: &mut impl Write) -> Result<(), CliError> {
        writeln!(out, "{}", self.game.position())?;
        if !self.game.is_over() {
            writeln!(out, "{} to move", self.game.side_to_move())?;
        }
        Ok(())
    }
}
