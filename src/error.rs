use std::io;

use nix::errno::Errno;
use thiserror::Error;

/// A failed operating-system call, labelled with the call that failed.
#[derive(Debug, Error)]
#[error("{call}: {source}")]
pub struct OsError {
    call: &'static str,
    #[source]
    source: io::Error,
}

impl OsError {
    pub fn new(call: &'static str, source: io::Error) -> Self {
        Self { call, source }
    }

    pub fn errno(call: &'static str, errno: Errno) -> Self {
        Self::new(call, io::Error::from(errno))
    }

    pub fn call(&self) -> &'static str {
        self.call
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}
