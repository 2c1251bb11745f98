pub mod ai;
pub mod evaluation;
pub mod search;

pub use ai::{ChessAI, EngineError};
pub use evaluation::evaluate_position;
pub use search::{choose_automated_move, search, SearchConfig, SearchResult, SearchStats};
