use clap::Parser;
use codex_cli::convert::{ConvertArgs, main_with};

fn main() {
    codex_cli::init_logger();
    let args = ConvertArgs::parse();
    if let Err(e) = main_with(&args) {
        codex_cli::exit_with(&e);
    }
}
