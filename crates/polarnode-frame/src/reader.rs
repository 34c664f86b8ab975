use std::io::BufRead;

use crate::error::CaptureError;

/// One message read from a capture, with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedMessage {
    /// 1-based line number in the capture.
    pub line: usize,
    pub bytes: Vec<u8>,
}

/// Reads hex-encoded messages from a line-oriented capture.
///
/// Each non-empty line is one complete message. Hex pairs may be separated
/// by whitespace and may carry a `0x` prefix; `#` starts a comment. Lines
/// are handled as bytes, so a line that is not UTF-8 is reported as invalid
/// hex like any other malformed line.
pub struct CaptureReader<R> {
    inner: R,
    line: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> CaptureReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: Vec::new(),
            line_no: 0,
        }
    }

    /// Read the next message.
    ///
    /// Returns `Ok(None)` at end of input. A line that is not valid hex yields
    /// `Err(CaptureError::InvalidHex)`; the reader stays usable and continues
    /// with the following line on the next call.
    pub fn read_message(&mut self) -> Result<Option<CapturedMessage>, CaptureError> {
        loop {
            self.line.clear();
            if self.inner.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let content = strip_comment(&self.line);
            if content.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            let bytes = parse_hex(content).map_err(|source| CaptureError::InvalidHex {
                line: self.line_no,
                source,
            })?;
            return Ok(Some(CapturedMessage {
                line: self.line_no,
                bytes,
            }));
        }
    }

    /// Number of lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_no
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: BufRead> Iterator for CaptureReader<R> {
    type Item = Result<CapturedMessage, CaptureError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_message().transpose()
    }
}

fn strip_comment(line: &[u8]) -> &[u8] {
    match line.iter().position(|&b| b == b'#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Parse hex text such as `"AB 2A 00"`, `"0xAB 0x2A"` or `"ab2a00"`.
pub fn parse_hex(text: impl AsRef<[u8]>) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.as_ref();
    let mut compact = Vec::with_capacity(text.len());
    for token in text
        .split(u8::is_ascii_whitespace)
        .filter(|token| !token.is_empty())
    {
        let token = token
            .strip_prefix(&b"0x"[..])
            .or_else(|| token.strip_prefix(&b"0X"[..]))
            .unwrap_or(token);
        compact.extend_from_slice(token);
    }
    hex::decode(compact)
}
