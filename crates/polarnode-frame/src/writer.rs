use std::io::{ErrorKind, Write};

use crate::error::CaptureError;

/// Writes messages as hex lines, one message per line.
///
/// The output is readable by [`CaptureReader`](crate::CaptureReader).
pub struct CaptureWriter<W> {
    inner: W,
    written: usize,
}

impl<W: Write> CaptureWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    /// Write one message as a line of space-separated uppercase hex pairs.
    pub fn write_message(&mut self, message: &[u8]) -> Result<(), CaptureError> {
        let mut line = format_hex(message);
        line.push('\n');
        self.write_all_retrying(line.as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Write a `#` comment line. Embedded newlines are replaced with spaces.
    pub fn write_comment(&mut self, comment: &str) -> Result<(), CaptureError> {
        let line = format!("# {}\n", comment.replace(['\r', '\n'], " "));
        self.write_all_retrying(line.as_bytes())
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), CaptureError> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CaptureError::Io(err)),
            }
        }
    }

    /// Number of messages written so far.
    pub fn messages_written(&self) -> usize {
        self.written
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    fn write_all_retrying(&mut self, buf: &[u8]) -> Result<(), CaptureError> {
        let mut offset = 0usize;
        while offset < buf.len() {
            match self.inner.write(&buf[offset..]) {
                Ok(0) => return Err(CaptureError::Io(ErrorKind::WriteZero.into())),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(CaptureError::Io(err)),
            }
        }
        Ok(())
    }
}

/// Format bytes as space-separated uppercase hex pairs, e.g. `"AB 2A 00"`.
pub fn format_hex(bytes: &[u8]) -> String {
    let encoded = hex::encode_upper(bytes);
    let mut out = String::with_capacity(encoded.len() + bytes.len());
    for (i, c) in encoded.chars().enumerate() {
        if i > 0 && i % 2 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}
