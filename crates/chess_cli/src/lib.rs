//! Terminal front end: reads moves from stdin and plays against the engine.

pub mod command;
pub mod session;

use std::io::{self, BufRead, Write};

use chess_core::{Color, MoveError};
use chess_engine::{ChessAI, EngineError};
use clap::{Parser, ValueEnum};
use log::info;
use thiserror::Error;

pub use command::{Command, CommandError};
pub use session::{Flow, Session};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Command(#[from] CommandError),

    #[error("{0}")]
    Move(#[from] MoveError),

    #[error("{0}")]
    Engine(#[from] EngineError),
}

impl CliError {
    /// Errors the player can recover from by typing something else.
    fn is_recoverable(&self) -> bool {
        !matches!(self, CliError::Io(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EngineSide {
    White,
    Black,
    #[value(name = "none")]
    Neither,
}

impl EngineSide {
    fn color(self) -> Option<Color> {
        match self {
            EngineSide::White => Some(Color::White),
            EngineSide::Black => Some(Color::Black),
            EngineSide::Neither => None,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "chess-duel", about = "Play chess against a minimax engine in the terminal")]
pub struct Args {
    /// Side played by the engine; `none` for two human players.
    #[arg(long, value_enum, default_value_t = EngineSide::Black)]
    pub engine: EngineSide,

    /// Engine search depth in plies.
    #[arg(long, default_value_t = chess_engine::search::DEFAULT_DEPTH)]
    pub depth: u8,

    /// Score the engine's root moves in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// Log filter, e.g. `info` or `chess_engine=debug`. Falls back to RUST_LOG.
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    pub fn engine(&self) -> Option<ChessAI> {
        self.engine
            .color()
            .map(|color| ChessAI::new(color, self.depth).with_parallel_root(self.parallel))
    }
}

fn init_logging(args: &Args) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);
    if let Some(filter) = &args.log_level {
        builder.parse_filters(filter);
    }
    builder.init();
}

pub fn run() -> Result<(), CliError> {
    let args = Args::parse();
    init_logging(&args);
    info!("starting with engine {:?} at depth {}", args.engine, args.depth);

    let stdin = io::stdin();
    let stdout = io::stdout();
    play(args.engine(), stdin.lock(), &mut stdout.lock())
}

/// The read-eval loop, generic over its streams.
pub fn play(
    engine: Option<ChessAI>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut session = Session::new(engine);
    session.start(out)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let result = Command::parse(&line)
            .map_err(CliError::from)
            .and_then(|command| session.handle(command, out));
        match result {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) if err.is_recoverable() => writeln!(out, "error: {}", err)?,
            Err(err) => return Err(err),
        }
        out.flush()?;
    }

    Ok(())
}
