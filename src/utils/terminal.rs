//! Raw-mode terminal handling

use std::io::{self, Write};

use crossterm::{
    terminal::{disable_raw_mode, enable_raw_mode},
    tty::IsTty,
};
use tracing::warn;

/// Raw terminal mode, restored on drop
#[derive(Debug)]
pub struct RawModeGuard(());

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self(()))
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Whether stdin is an interactive terminal we can read keys from
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_tty()
}

/// Writer that turns `\n` into `\r\n`, for log output while raw mode has
/// output post-processing switched off
#[derive(Debug)]
pub struct CrlfWriter<W>(pub W);

impl<W: Write> Write for CrlfWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for (i, line) in buf.split(|&b| b == b'\n').enumerate() {
            if i > 0 {
                self.0.write_all(b"\r\n")?;
            }
            self.0.write_all(line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_writer() {
        let mut out = CrlfWriter(Vec::new());
        write!(out, "first\nsecond\n").unwrap();
        write!(out, "no newline").unwrap();
        assert_eq!(out.0, b"first\r\nsecond\r\nno newline");
    }
}
