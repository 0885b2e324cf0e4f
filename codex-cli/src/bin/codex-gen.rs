use clap::Parser;
use codex_cli::generate::{GenArgs, run};

fn main() {
    codex_cli::init_logger();
    let args = GenArgs::parse();
    let stdout = std::io::stdout();
    if let Err(e) = run(&args, &mut stdout.lock()) {
        codex_cli::exit_with(&e);
    }
}
