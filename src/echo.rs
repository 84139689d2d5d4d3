use std::io::{self, Read, Write};

use crate::error::OsError;

const QUIT: u8 = b'q';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Reads one byte per step and prints its value until `q` arrives.
pub struct Echo<R, W> {
    input: R,
    output: W,
}

impl<R: Read, W: Write> Echo<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn run(&mut self) -> Result<(), OsError> {
        while self.step()? == Flow::Continue {}
        Ok(())
    }

    pub fn step(&mut self) -> Result<Flow, OsError> {
        let byte = self.read_byte()?;
        tracing::trace!(byte, "read");

        render(byte, &mut self.output)
            .and_then(|()| self.output.flush())
            .map_err(|e| OsError::new("write", e))?;

        if byte == QUIT {
            Ok(Flow::Quit)
        } else {
            Ok(Flow::Continue)
        }
    }

    /// A timed-out read leaves the byte at zero.
    fn read_byte(&mut self) -> Result<u8, OsError> {
        let mut buf = [0u8; 1];
        match self.input.read(&mut buf) {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
            Err(e) => return Err(OsError::new("read", e)),
        }
        Ok(buf[0])
    }
}

/// Writes one report line for `byte`.
pub fn render<W: Write>(byte: u8, out: &mut W) -> io::Result<()> {
    if byte.is_ascii_control() {
        write!(out, "{byte}\r\n")
    } else {
        write!(out, "{byte} ('")?;
        out.write_all(&[byte])?;
        out.write_all(b"')\r\n")
    }
}
