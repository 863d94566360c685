//! [`std::io::Write`] adapter over the streaming encoder state.

use std::io::{self, Write};

use crate::stream::Pending;

/// Encodes everything written to it and forwards the characters to `inner`.
///
/// Like [`crate::StreamEncoder`], at most two raw bytes are held back
/// between writes. Call [`EncoderWriter::finish`] to flush them; dropping
/// the writer discards them.
///
/// A failed `write` consumes none of its input. If `inner` fails after
/// accepting part of the encoded characters, the input counts as written,
/// the remaining characters stay buffered, and the error is reported by
/// the next call that has to send them.
///
/// # Example
///
/// ```
/// use std::io::Write;
/// use nl_base64::EncoderWriter;
///
/// let mut writer = EncoderWriter::new(Vec::new());
/// writer.write_all(b"hel").unwrap();
/// writer.write_all(b"lo").unwrap();
/// let (total, out) = writer.finish(true).unwrap();
/// assert_eq!(total, 8);
/// assert_eq!(out, b"aGVsbG8=");
/// ```
pub struct EncoderWriter<W: Write> {
    pending: Pending,
    emitted: usize,
    // Encoded characters not yet accepted by `inner`.
    buf: Vec<u8>,
    inner: W,
}

impl<W: Write> EncoderWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            pending: Pending::Empty,
            emitted: 0,
            buf: Vec::new(),
            inner,
        }
    }

    /// Characters accepted by the inner writer so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Sends buffered characters to `inner`, keeping whatever it does not
    /// accept.
    fn write_buf(&mut self) -> io::Result<()> {
        while !self.buf.is_empty() {
            match self.inner.write(&self.buf) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "failed to write encoded characters",
                    ));
                }
                Ok(n) => {
                    self.buf.drain(..n);
                    self.emitted += n;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// Flushes buffered groups (padded if `pad` is set) and returns the
    /// total number of characters written together with the inner writer.
    pub fn finish(mut self, pad: bool) -> io::Result<(usize, W)> {
        let mut tail = [0u8; 4];
        let len = self.pending.flush(pad, &mut tail);
        self.pending = Pending::Empty;
        self.buf.extend_from_slice(&tail[..len]);
        self.write_buf()?;
        self.inner.flush()?;
        log::trace!("base64 writer finished: {} characters", self.emitted);
        Ok((self.emitted, self.inner))
    }
}

impl<W: Write> Write for EncoderWriter<W> {
    fn write(&mut self, input: &[u8]) -> io::Result<usize> {
        // Leftovers from an earlier partial write go first.
        self.write_buf()?;

        let saved = self.pending;
        self.buf.reserve(input.len().div_ceil(3) * 4);
        for &byte in input {
            if let Some(quantum) = self.pending.push(byte) {
                self.buf.extend_from_slice(&quantum);
            }
        }
        let encoded = self.buf.len();
        match self.write_buf() {
            Err(e) if self.buf.len() == encoded => {
                self.pending = saved;
                self.buf.clear();
                Err(e)
            }
            _ => Ok(input.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.write_buf()?;
        self.inner.flush()
    }
}
