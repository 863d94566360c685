//! Streaming base64 encoder that needs only O(1) intermediate state.
//!
//! Raw bytes are fed one call at a time; encoded characters are pushed to
//! a caller-supplied sink as soon as a full four-character quantum is
//! known. At most two pending six-bit groups (plus one partial group) are
//! held between calls.

use crate::alphabet::sextet_to_char;
use crate::constants::PAD_BYTE;

/// Six-bit groups buffered between input bytes.
///
/// The last group of each variant is partial: its low bits are filled in
/// by the next input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// Nothing buffered; the next byte starts a new quantum.
    Empty,
    /// One input byte seen.
    One { c0: u8, c1: u8 },
    /// Two input bytes seen.
    Two { c0: u8, c1: u8, c2: u8 },
}

impl Pending {
    /// Number of raw bytes buffered (0, 1 or 2).
    pub fn len(&self) -> usize {
        match self {
            Pending::Empty => 0,
            Pending::One { .. } => 1,
            Pending::Two { .. } => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Pending::Empty)
    }

    /// Advances the state by one input byte.
    ///
    /// Returns the four encoded characters of the quantum completed by a
    /// third byte, and `None` otherwise.
    pub fn push(&mut self, byte: u8) -> Option<[u8; 4]> {
        let (next, quantum) = match *self {
            Pending::Empty => (
                Pending::One {
                    c0: byte >> 2,
                    c1: (byte << 4) & 0x3F,
                },
                None,
            ),
            Pending::One { c0, c1 } => (
                Pending::Two {
                    c0,
                    c1: c1 | (byte >> 4),
                    c2: (byte << 2) & 0x3F,
                },
                None,
            ),
            Pending::Two { c0, c1, c2 } => (
                Pending::Empty,
                Some([
                    sextet_to_char(c0),
                    sextet_to_char(c1),
                    sextet_to_char(c2 | (byte >> 6)),
                    sextet_to_char(byte & 0x3F),
                ]),
            ),
        };
        *self = next;
        quantum
    }

    /// Writes the characters for the buffered groups into `out`, followed
    /// by padding when `pad` is set, and returns how many were written.
    ///
    /// The state itself is left untouched.
    pub fn flush(&self, pad: bool, out: &mut [u8; 4]) -> usize {
        let (written, pad_count) = match *self {
            Pending::Empty => (0, 0),
            Pending::One { c0, c1 } => {
                out[0] = sextet_to_char(c0);
                out[1] = sextet_to_char(c1);
                (2, 2)
            }
            Pending::Two { c0, c1, c2 } => {
                out[0] = sextet_to_char(c0);
                out[1] = sextet_to_char(c1);
                out[2] = sextet_to_char(c2);
                (3, 1)
            }
        };
        if !pad {
            return written;
        }
        out[written..written + pad_count].fill(PAD_BYTE);
        written + pad_count
    }
}

/// Incremental base64 encoder writing one character at a time to `sink`.
///
/// A session is opened with [`StreamEncoder::start`], fed with
/// [`StreamEncoder::more`] and closed with [`StreamEncoder::finish`], which
/// consumes the encoder. A new session needs a new `start`.
///
/// The sink is called synchronously and in output order from within `more`
/// and `finish`.
///
/// # Example
///
/// ```
/// use nl_base64::StreamEncoder;
///
/// let mut out = String::new();
/// let mut encoder = StreamEncoder::start(|ch| out.push(char::from(ch)));
/// assert_eq!(encoder.more(b"hel"), 4);
/// assert_eq!(encoder.more(b"lo"), 4);
/// let (total, _) = encoder.finish(true);
/// assert_eq!(total, 8);
/// assert_eq!(out, "aGVsbG8=");
/// ```
pub struct StreamEncoder<F: FnMut(u8)> {
    pending: Pending,
    emitted: usize,
    sink: F,
}

impl<F: FnMut(u8)> StreamEncoder<F> {
    /// Opens a new encoding session writing to `sink`.
    pub fn start(sink: F) -> Self {
        Self {
            pending: Pending::Empty,
            emitted: 0,
            sink,
        }
    }

    /// Currently buffered groups.
    pub fn pending(&self) -> Pending {
        self.pending
    }

    /// Characters emitted since [`StreamEncoder::start`].
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    fn emit(&mut self, chars: &[u8]) {
        for &ch in chars {
            (self.sink)(ch);
        }
        self.emitted += chars.len();
    }

    /// Feeds `input` through the encoder.
    ///
    /// Returns the number of characters emitted during this call, which is
    /// always a multiple of four.
    pub fn more(&mut self, input: &[u8]) -> usize {
        let before = self.emitted;
        for &byte in input {
            if let Some(quantum) = self.pending.push(byte) {
                self.emit(&quantum);
            }
        }
        self.emitted - before
    }

    /// Flushes any buffered groups and closes the session.
    ///
    /// One buffered byte yields two characters, followed by `==` when `pad`
    /// is set. Two buffered bytes yield three characters, followed by `=`
    /// when `pad` is set.
    ///
    /// Returns the total number of characters emitted during the session,
    /// together with the sink.
    pub fn finish(mut self, pad: bool) -> (usize, F) {
        let mut tail = [0u8; 4];
        let len = self.pending.flush(pad, &mut tail);
        self.emit(&tail[..len]);
        log::trace!(
            "base64 stream finished: {} characters (pad: {pad})",
            self.emitted
        );
        (self.emitted, self.sink)
    }
}

/// Encodes `input` through a [`StreamEncoder`] session into a string.
///
/// With `pad` set the result is standard padded base64; without it the
/// trailing `=` characters are omitted.
///
/// # Example
///
/// ```
/// use nl_base64::encode_stream;
///
/// assert_eq!(encode_stream(b"AB", true), "QUI=");
/// assert_eq!(encode_stream(b"AB", false), "QUI");
/// ```
pub fn encode_stream(input: &[u8], pad: bool) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);
    let mut encoder = StreamEncoder::start(|ch| out.push(char::from(ch)));
    encoder.more(input);
    let _ = encoder.finish(pad);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &[u8], pad: bool) -> (usize, Vec<u8>) {
        let mut out = Vec::new();
        let mut encoder = StreamEncoder::start(|ch| out.push(ch));
        encoder.more(input);
        let (total, _) = encoder.finish(pad);
        (total, out)
    }

    #[test]
    fn test_transitions() {
        let mut out = Vec::new();
        let mut encoder = StreamEncoder::start(|ch| out.push(ch));
        assert_eq!(encoder.pending(), Pending::Empty);

        assert_eq!(encoder.more(b"A"), 0);
        assert_eq!(encoder.pending(), Pending::One { c0: 16, c1: 16 });

        assert_eq!(encoder.more(b"B"), 0);
        assert_eq!(encoder.pending(), Pending::Two { c0: 16, c1: 20, c2: 8 });

        assert_eq!(encoder.more(b"C"), 4);
        assert_eq!(encoder.pending(), Pending::Empty);
        assert_eq!(encoder.emitted(), 4);

        let (total, _) = encoder.finish(true);
        assert_eq!(total, 4);
        assert_eq!(out, b"QUJD");
    }

    #[test]
    fn test_more_reports_per_call_count() {
        let mut encoder = StreamEncoder::start(|_| {});
        assert_eq!(encoder.more(b""), 0);
        assert_eq!(encoder.more(b"ab"), 0);
        assert_eq!(encoder.more(b"cdefg"), 8);
        assert_eq!(encoder.pending().len(), 1);
        assert_eq!(encoder.more(b"hijk"), 4);
        assert_eq!(encoder.pending().len(), 2);
        assert_eq!(encoder.emitted(), 12);
    }

    #[test]
    fn test_flush_leaves_state() {
        let mut pending = Pending::Empty;
        assert_eq!(pending.push(b'A'), None);
        let mut out = [0u8; 4];
        assert_eq!(pending.flush(true, &mut out), 4);
        assert_eq!(&out, b"QQ==");
        assert_eq!(pending.flush(false, &mut out), 2);
        assert_eq!(pending.len(), 1);
    }

    #[test]
    fn test_finish_from_empty() {
        assert_eq!(collect(b"", true), (0, Vec::new()));
        assert_eq!(collect(b"foo", true), (4, b"Zm9v".to_vec()));
        assert_eq!(collect(b"foo", false), (4, b"Zm9v".to_vec()));
    }

    #[test]
    fn test_finish_from_one() {
        assert_eq!(collect(b"A", true), (4, b"QQ==".to_vec()));
        assert_eq!(collect(b"A", false), (2, b"QQ".to_vec()));
    }

    #[test]
    fn test_finish_from_two() {
        assert_eq!(collect(b"AB", true), (4, b"QUI=".to_vec()));
        assert_eq!(collect(b"AB", false), (3, b"QUI".to_vec()));
    }

    #[test]
    fn test_sink_reused_for_new_session() {
        let mut out = Vec::new();
        let mut encoder = StreamEncoder::start(|ch| out.push(ch));
        encoder.more(b"f");
        let (first, sink) = encoder.finish(true);
        assert_eq!(first, 4);

        let mut encoder = StreamEncoder::start(sink);
        assert_eq!(encoder.emitted(), 0);
        encoder.more(b"o");
        let (second, _) = encoder.finish(true);
        assert_eq!(second, 4);
        assert_eq!(out, b"Zg==bw==");
    }
}
