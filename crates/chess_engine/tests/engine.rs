use chess_core::{
    legal_moves, Color, GameController, MoveStatus, Piece, PieceType, Position, Square,
};
use chess_engine::{choose_automated_move, search, ChessAI, EngineError, SearchConfig};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn sq(s: &str) -> Square {
    Square::from_algebraic(s).unwrap()
}

#[test]
fn only_legal_move_is_chosen() {
    let position = Position::empty()
        .with_piece(sq("a1"), Piece::new(PieceType::King, Color::White))
        .with_piece(sq("b8"), Piece::new(PieceType::Rook, Color::Black))
        .with_piece(sq("h8"), Piece::new(PieceType::King, Color::Black));
    let moves = legal_moves(&position, Color::White);
    assert_eq!(moves.len(), 1);

    assert_eq!(choose_automated_move(&position, 1), Some(moves[0]));
}

#[test]
fn search_leaves_the_position_untouched() {
    let mut game = GameController::new();
    game.attempt_move(sq("e2"), sq("e4"), None).unwrap();
    let before = game.position().clone();

    let mv = choose_automated_move(game.position(), 3).unwrap();
    assert_eq!(game.position(), &before);
    assert_eq!(mv.piece.color, Color::Black);
    assert!(legal_moves(&before, Color::Black).contains(&mv));
}

#[test]
fn parallel_root_agrees_with_sequential() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = GameController::new();

    for _ in 0..6 {
        let sequential = search(game.position(), &SearchConfig { depth: 2, parallel_root: false });
        let parallel = search(game.position(), &SearchConfig { depth: 2, parallel_root: true });
        assert_eq!(sequential.best_move, parallel.best_move);
        assert_eq!(sequential.score, parallel.score);
        assert_eq!(sequential.stats, parallel.stats);

        let moves = game.legal_moves();
        let mv = *moves.choose(&mut rng).unwrap();
        game.play(&mv).unwrap();
    }
}

#[test]
fn engine_promotes_to_a_queen() {
    let position = Position::empty()
        .with_piece(sq("h1"), Piece::new(PieceType::King, Color::White))
        .with_piece(sq("c2"), Piece::new(PieceType::Pawn, Color::Black))
        .with_piece(sq("a8"), Piece::new(PieceType::King, Color::Black))
        .with_side_to_move(Color::Black);
    let mut game = GameController::from_position(position);

    let outcome = ChessAI::new(Color::Black, 2).play_turn(&mut game).unwrap();
    assert_eq!(outcome.notation, "Qc1");
    assert_eq!(
        game.position().piece_at(sq("c1")),
        Some(Piece::new(PieceType::Queen, Color::Black))
    );
}

#[test]
fn checkmated_engine_has_no_move() {
    let position = Position::empty()
        .with_piece(sq("h8"), Piece::new(PieceType::King, Color::Black))
        .with_piece(sq("f7"), Piece::new(PieceType::King, Color::White))
        .with_piece(sq("g6"), Piece::new(PieceType::Queen, Color::White));
    let mut game = GameController::from_position(position);
    let status = game.attempt_move(sq("g6"), sq("g7"), None).unwrap();
    assert!(matches!(status, MoveStatus::Committed(ref o) if o.is_checkmate));

    assert_eq!(choose_automated_move(game.position(), 3), None);
    let ai = ChessAI::new(Color::Black, 3);
    assert!(matches!(ai.play_turn(&mut game), Err(EngineError::NotEngineTurn(Color::Black))));
}

#[test]
fn engine_versus_engine_stays_legal() {
    let mut game = GameController::new();
    let white = ChessAI::new(Color::White, 1);
    let black = ChessAI::new(Color::Black, 2);

    for ply in 0..16 {
        if game.is_over() {
            break;
        }
        let ai = if ply % 2 == 0 { &white } else { &black };
        let before = game.record().len();
        ai.play_turn(&mut game).unwrap();
        assert_eq!(game.record().len(), before + 1);
    }
}
