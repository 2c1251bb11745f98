use chess_core::{PieceType, Square};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command {0:?}, try `help`")]
    Unknown(String),

    #[error("invalid square {0:?}")]
    BadSquare(String),

    #[error("invalid promotion piece {0:?}, use q, r, b or n")]
    BadPromotion(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Move {
        from: Square,
        to: Square,
        promotion: Option<PieceType>,
    },
    Promote(PieceType),
    CancelPromotion,
    Moves(Option<Square>),
    Undo,
    Reset,
    Board,
    History,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandError::Empty)?.to_ascii_lowercase();
        let arg = words.next();

        let command = match head.as_str() {
            "quit" | "exit" => Command::Quit,
            "help" | "?" => Command::Help,
            "board" => Command::Board,
            "history" => Command::History,
            "undo" => Command::Undo,
            "reset" | "new" => Command::Reset,
            "cancel" => Command::CancelPromotion,
            "moves" => Command::Moves(arg.map(parse_square).transpose()?),
            "promote" => {
                let letter = arg.unwrap_or_default();
                Command::Promote(parse_promotion(letter)?)
            }
            text => parse_move(text)?,
        };
        Ok(command)
    }
}

fn parse_square(text: &str) -> Result<Square, CommandError> {
    Square::from_algebraic(text).ok_or_else(|| CommandError::BadSquare(text.to_string()))
}

/// A single letter; pawn and king are refused later by the controller.
fn parse_promotion(text: &str) -> Result<PieceType, CommandError> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) => PieceType::from_letter(letter)
            .ok_or_else(|| CommandError::BadPromotion(text.to_string())),
        _ => Err(CommandError::BadPromotion(text.to_string())),
    }
}

/// `e2e4`, `e2-e4` or `e7e8q`.
fn parse_move(text: &str) -> Result<Command, CommandError> {
    let compact: String = text.chars().filter(|c| *c != '-').collect();
    if !compact.is_ascii() || !(4..=5).contains(&compact.len()) {
        return Err(CommandError::Unknown(text.to_string()));
    }

    let from = parse_square(&compact[0..2])?;
    let to = parse_square(&compact[2..4])?;
    let promotion = match compact.get(4..) {
        Some(rest) if !rest.is_empty() => Some(parse_promotion(rest)?),
        _ => None,
    };
    Ok(Command::Move { from, to, promotion })
}
