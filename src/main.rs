use std::process::ExitCode;

fn main() -> ExitCode {
    match chess_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("chess-duel: {}", err);
            ExitCode::FAILURE
        }
    }
}
