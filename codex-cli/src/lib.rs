//! codex command-line programs.
//!
//! Two one-shot programs share this library:
//! - `codex-gen` loads the database, cross-references it, and prints every
//!   merchant, quest, and NPC.
//! - `soda-convert` converts the legacy pipe-delimited exports into the
//!   recipe document and ID-range item shards.
//!
//! Both run with no arguments from the directory holding `db/` and `soda/`.

pub mod args;
pub mod convert;
pub mod error;
pub mod generate;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

pub use error::CliError;

/// Install the `env_logger` backend (`RUST_LOG` overrides the `info` default).
pub fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Print the single-line failure diagnostic and exit with status 1.
pub fn exit_with(err: &CliError) -> ! {
    eprintln!(
        "{} {}",
        "Failed run:".if_supports_color(Stderr, |t| t.red()),
        err
    );
    std::process::exit(1);
}
