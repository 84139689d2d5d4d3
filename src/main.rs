mod config;
mod echo;
mod error;
mod terminal;

use std::fs::File;
use std::io;
use std::os::fd::AsFd;
use std::process;

use config::Config;
use echo::Echo;
use error::OsError;
use terminal::RawMode;

fn main() {
    if let Err(err) = Config::from_env().init_logging() {
        die(&err);
    }
    if let Err(err) = run() {
        die(&err);
    }
}

/// Everything that needs raw mode happens in here, so the guard is gone by
/// the time an error reaches `die`.
fn run() -> Result<(), OsError> {
    let stdin = io::stdin();
    let input = stdin
        .as_fd()
        .try_clone_to_owned()
        .map(File::from)
        .map_err(|e| OsError::new("dup", e))?;

    let raw = RawMode::enable(stdin.as_fd())?;
    tracing::debug!(original = ?raw.original(), "captured terminal attributes");

    Echo::new(input, io::stdout().lock()).run()?;
    raw.disable()
}

pub(crate) fn die(err: &OsError) -> ! {
    tracing::error!(call = err.call(), kind = ?err.kind(), "{err}");
    eprintln!("{err}");
    process::exit(1);
}
