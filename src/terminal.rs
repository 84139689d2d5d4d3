use std::os::fd::BorrowedFd;

use nix::sys::termios::{
    self, ControlFlags, InputFlags, LocalFlags, OutputFlags, SetArg, SpecialCharacterIndices,
    Termios,
};

use crate::error::OsError;

/// Fewest bytes a read waits for. Zero lets a read come back empty.
const READ_MIN_BYTES: u8 = 0;
/// Longest a read blocks, in tenths of a second.
const READ_TIMEOUT_DECISECONDS: u8 = 1;

/// A terminal device whose attributes can be read and written.
pub trait Tty {
    fn attrs(&self) -> nix::Result<Termios>;
    fn set_attrs(&self, when: SetArg, attrs: &Termios) -> nix::Result<()>;
}

impl Tty for BorrowedFd<'_> {
    fn attrs(&self) -> nix::Result<Termios> {
        termios::tcgetattr(self)
    }

    fn set_attrs(&self, when: SetArg, attrs: &Termios) -> nix::Result<()> {
        termios::tcsetattr(self, when, attrs)
    }
}

/// Snapshot of the device's current attributes.
pub fn capture<T: Tty>(tty: &T) -> Result<Termios, OsError> {
    tty.attrs().map_err(|e| OsError::errno("tcgetattr", e))
}

/// Turns a cooked configuration into the raw one, leaving unrelated bits alone.
pub fn make_raw(attrs: &mut Termios) {
    attrs.input_flags.remove(
        InputFlags::BRKINT
            | InputFlags::ICRNL
            | InputFlags::INPCK
            | InputFlags::ISTRIP
            | InputFlags::IXON,
    );
    attrs.output_flags.remove(OutputFlags::OPOST);
    attrs.control_flags.insert(ControlFlags::CS8);
    attrs.local_flags.remove(
        LocalFlags::ECHO | LocalFlags::ICANON | LocalFlags::IEXTEN | LocalFlags::ISIG,
    );
    attrs.control_chars[SpecialCharacterIndices::VMIN as usize] = READ_MIN_BYTES;
    attrs.control_chars[SpecialCharacterIndices::VTIME as usize] = READ_TIMEOUT_DECISECONDS;
}

/// Keeps a terminal in raw mode for as long as it lives.
///
/// The original attributes go back to the device through [`RawMode::disable`]
/// or, on any other way out of scope, when the guard is dropped.
pub struct RawMode<T: Tty> {
    tty: T,
    original: Termios,
    restored: bool,
}

impl<T: Tty> RawMode<T> {
    pub fn enable(tty: T) -> Result<Self, OsError> {
        let original = capture(&tty)?;
        let mut raw = original.clone();
        make_raw(&mut raw);
        tty.set_attrs(SetArg::TCSAFLUSH, &raw)
            .map_err(|e| OsError::errno("tcsetattr", e))?;
        tracing::info!("raw mode enabled");
        Ok(Self {
            tty,
            original,
            restored: false,
        })
    }

    pub fn original(&self) -> &Termios {
        &self.original
    }

    pub fn disable(mut self) -> Result<(), OsError> {
        self.restore()
    }

    fn restore(&mut self) -> Result<(), OsError> {
        self.restored = true;
        self.tty
            .set_attrs(SetArg::TCSAFLUSH, &self.original)
            .map_err(|e| OsError::errno("tcsetattr", e))?;
        tracing::info!("terminal attributes restored");
        Ok(())
    }
}

impl<T: Tty> Drop for RawMode<T> {
    fn drop(&mut self) {
        if self.restored {
            return;
        }
        if let Err(err) = self.restore() {
            crate::die(&err);
        }
    }
}
