// Fixed-depth minimax with alpha-beta pruning over cloned positions
use chess_core::{legal_moves, Color, Move, Position};
use log::{debug, trace};
use rayon::prelude::*;

use crate::evaluation::evaluate_position;

pub const DEFAULT_DEPTH: u8 = 3;
pub const MIN_DEPTH: u8 = 1;
pub const MAX_DEPTH: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies searched, counting the root move itself.
    pub depth: u8,
    /// Score root moves on the rayon pool. Every root child gets a full
    /// window, so the chosen move matches the sequential search.
    pub parallel_root: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            parallel_root: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub leaves: u64,
}

impl SearchStats {
    fn merge(&mut self, other: SearchStats) {
        self.nodes += other.nodes;
        self.leaves += other.leaves;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// `None` when the side to move has no legal move.
    pub best_move: Option<Move>,
    pub score: Option<i32>,
    pub stats: SearchStats,
}

/// Picks a move for the side to move on `position`, or `None` if it has no
/// legal move. The caller decides between checkmate and stalemate.
pub fn choose_automated_move(position: &Position, depth: u8) -> Option<Move> {
    let config = SearchConfig {
        depth,
        ..SearchConfig::default()
    };
    search(position, &config).best_move
}

/// Scores every legal root move and keeps the best one. Ties go to the move
/// generated first (row-major origin, then row-major destination).
pub fn search(position: &Position, config: &SearchConfig) -> SearchResult {
    let automated = position.side_to_move();
    let depth = config.depth.max(MIN_DEPTH);
    let root_moves = legal_moves(position, automated);

    if root_moves.is_empty() {
        debug!("no legal move available for {}", automated);
        return SearchResult {
            best_move: None,
            score: None,
            stats: SearchStats::default(),
        };
    }

    let scored: Vec<(i32, SearchStats)> = if config.parallel_root {
        root_moves
            .par_iter()
            .map(|mv| score_root_move(position, mv, depth, automated))
            .collect()
    } else {
        root_moves
            .iter()
            .map(|mv| score_root_move(position, mv, depth, automated))
            .collect()
    };

    let mut stats = SearchStats::default();
    let mut best: Option<(Move, i32)> = None;
    for (mv, (score, root_stats)) in root_moves.iter().zip(scored) {
        stats.merge(root_stats);
        trace!("root move {} scored {}", mv.to_uci(), score);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((*mv, score));
        }
    }

    debug!(
        "{} searched {} root moves at depth {}: {} nodes, {} leaves",
        automated,
        root_moves.len(),
        depth,
        stats.nodes,
        stats.leaves
    );

    SearchResult {
        best_move: best.map(|(mv, _)| mv),
        score: best.map(|(_, score)| score),
        stats,
    }
}

fn score_root_move(
    position: &Position,
    mv: &Move,
    depth: u8,
    automated: Color,
) -> (i32, SearchStats) {
    let mut stats = SearchStats::default();
    let child = position.apply(mv);
    let score = minimax(&child, depth - 1, i32::MIN, i32::MAX, false, automated, &mut stats);
    (score, stats)
}

/// Depth-exhausted nodes and nodes without legal moves are both scored
/// statically, so mates carry no bonus beyond the material swing.
fn minimax(
    position: &Position,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    automated: Color,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;

    if depth == 0 {
        stats.leaves += 1;
        return evaluate_position(position, automated);
    }

    let moves = legal_moves(position, position.side_to_move());
    if moves.is_empty() {
        stats.leaves += 1;
        return evaluate_position(position, automated);
    }

    if maximizing {
        let mut best = i32::MIN;
        for mv in &moves {
            let child = position.apply(mv);
            let score = minimax(&child, depth - 1, alpha, beta, false, automated, stats);
            best = best.max(score);
            alpha = alpha.max(score);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for mv in &moves {
            let child = position.apply(mv);
            let score = minimax(&child, depth - 1, alpha, beta, true, automated, stats);
            best = best.min(score);
            beta = beta.min(score);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}
