//! One-shot (block) base64 decoding.
//!
//! Input is consumed through a per-quartet state machine. A `=` in the
//! third or fourth position of a quartet terminates decoding; anything
//! after it is not examined. Characters are consumed in pairs, so input
//! of odd length is rejected before anything is written; an unpadded tail
//! of two characters is accepted.

use crate::alphabet::char_to_sextet;
use crate::constants::PAD_BYTE;
use crate::Base64Error;

/// Position within the current four-character quartet, carrying the
/// sextet still needed to complete the next output byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quartet {
    NeedFirst,
    HaveFirst(u8),
    HaveSecond(u8),
    HaveThird(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Emit(u8),
    Stop,
}

struct QuartetDecoder {
    state: Quartet,
}

impl QuartetDecoder {
    /// Characters are consumed in pairs; an odd count leaves a lone
    /// trailing character.
    fn new(len: usize) -> Result<Self, Base64Error> {
        if len % 2 == 1 {
            return Err(Base64Error::TruncatedInput { len });
        }
        Ok(Self {
            state: Quartet::NeedFirst,
        })
    }

    fn sextet(ch: u8, offset: usize) -> Result<u8, Base64Error> {
        char_to_sextet(ch).ok_or(Base64Error::InvalidSymbol { byte: ch, offset })
    }

    fn step(&mut self, ch: u8, offset: usize) -> Result<Step, Base64Error> {
        match self.state {
            Quartet::NeedFirst => {
                self.state = Quartet::HaveFirst(Self::sextet(ch, offset)?);
                Ok(Step::Continue)
            }
            Quartet::HaveFirst(a) => {
                let b = Self::sextet(ch, offset)?;
                self.state = Quartet::HaveSecond(b);
                Ok(Step::Emit((a << 2) | (b >> 4)))
            }
            Quartet::HaveSecond(_) | Quartet::HaveThird(_) if ch == PAD_BYTE => Ok(Step::Stop),
            Quartet::HaveSecond(b) => {
                let c = Self::sextet(ch, offset)?;
                self.state = Quartet::HaveThird(c);
                Ok(Step::Emit((b << 4) | (c >> 2)))
            }
            Quartet::HaveThird(c) => {
                let d = Self::sextet(ch, offset)?;
                self.state = Quartet::NeedFirst;
                Ok(Step::Emit((c << 6) | d))
            }
        }
    }
}

/// Upper bound on the decoded size of `input_len` base64 characters.
///
/// # Example
///
/// ```
/// use nl_base64::decoded_len_max;
///
/// assert_eq!(decoded_len_max(0), 0);
/// assert_eq!(decoded_len_max(4), 3);
/// assert_eq!(decoded_len_max(6), 4);
/// assert_eq!(decoded_len_max(7), 5);
/// ```
pub const fn decoded_len_max(input_len: usize) -> usize {
    const TAIL: [usize; 4] = [0, 0, 1, 2];
    input_len / 4 * 3 + TAIL[input_len % 4]
}

/// Decodes base64 in place, returning the number of decoded bytes.
///
/// The decoded bytes occupy `buf[..n]`. Writes never overtake reads, so
/// the output can safely alias the input.
///
/// # Errors
///
/// - [`Base64Error::TruncatedInput`] if the input has odd length.
/// - [`Base64Error::InvalidSymbol`] for a character outside the alphabet, or
///   `=` in the first two positions of a quartet.
///
/// On error a prefix of `buf` may already have been overwritten.
///
/// # Example
///
/// ```
/// use nl_base64::decode_in_place;
///
/// let mut buf = *b"aGVsbG8=";
/// let len = decode_in_place(&mut buf).unwrap();
/// assert_eq!(&buf[..len], b"hello");
/// ```
pub fn decode_in_place(buf: &mut [u8]) -> Result<usize, Base64Error> {
    let mut decoder = QuartetDecoder::new(buf.len())?;
    let mut written = 0;
    for offset in 0..buf.len() {
        match decoder.step(buf[offset], offset)? {
            Step::Continue => {}
            Step::Emit(byte) => {
                buf[written] = byte;
                written += 1;
            }
            Step::Stop => break,
        }
    }
    Ok(written)
}

/// Decodes `input` into `out`, returning the number of decoded bytes.
///
/// # Errors
///
/// Same as [`decode_in_place`], plus [`Base64Error::BufferTooSmall`] when
/// `out` is shorter than [`decoded_len_max`] of the input.
///
/// # Example
///
/// ```
/// use nl_base64::decode_into;
///
/// let mut out = [0u8; 16];
/// let len = decode_into(b"Zm9vYmFy", &mut out).unwrap();
/// assert_eq!(&out[..len], b"foobar");
/// ```
pub fn decode_into(input: &[u8], out: &mut [u8]) -> Result<usize, Base64Error> {
    let needed = decoded_len_max(input.len());
    if out.len() < needed {
        return Err(Base64Error::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }

    let mut decoder = QuartetDecoder::new(input.len())?;
    let mut written = 0;
    for (offset, &ch) in input.iter().enumerate() {
        match decoder.step(ch, offset)? {
            Step::Continue => {}
            Step::Emit(byte) => {
                out[written] = byte;
                written += 1;
            }
            Step::Stop => break,
        }
    }
    Ok(written)
}

/// Decodes a base64 string or byte slice into a new buffer.
///
/// # Example
///
/// ```
/// use nl_base64::{decode, Base64Error};
///
/// assert_eq!(decode("aGVsbG8gd29ybGQ=").unwrap(), b"hello world");
/// assert!(matches!(decode("|"), Err(Base64Error::TruncatedInput { .. })));
/// ```
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, Base64Error> {
    let mut buf = input.as_ref().to_vec();
    match decode_in_place(&mut buf) {
        Ok(len) => {
            buf.truncate(len);
            Ok(buf)
        }
        Err(err) => {
            log::debug!("base64 decode of {} characters failed: {err}", buf.len());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(decode("").unwrap(), b"");
    }

    #[test]
    fn test_padded() {
        assert_eq!(decode("Zg==").unwrap(), b"f");
        assert_eq!(decode("Zm8=").unwrap(), b"fo");
        assert_eq!(decode("Zm9v").unwrap(), b"foo");
    }

    #[test]
    fn test_unpadded_tail() {
        assert_eq!(decode("Zg").unwrap(), b"f");
        assert_eq!(decode("Zm9vYg").unwrap(), b"foob");
    }

    #[test]
    fn test_pad_stops_decoding() {
        assert_eq!(decode("Zg==Zm9v").unwrap(), b"f");
        assert_eq!(decode("Zm8=||||").unwrap(), b"fo");
    }

    #[test]
    fn test_pad_in_data_position() {
        assert_eq!(
            decode("=A"),
            Err(Base64Error::InvalidSymbol {
                byte: b'=',
                offset: 0
            })
        );
        assert_eq!(
            decode("Z==="),
            Err(Base64Error::InvalidSymbol {
                byte: b'=',
                offset: 1
            })
        );
    }

    #[test]
    fn test_odd_length() {
        assert_eq!(decode("Z"), Err(Base64Error::TruncatedInput { len: 1 }));
        assert_eq!(decode("Zm8"), Err(Base64Error::TruncatedInput { len: 3 }));
        assert_eq!(decode("Zg="), Err(Base64Error::TruncatedInput { len: 3 }));
        assert_eq!(decode("Zm9vY"), Err(Base64Error::TruncatedInput { len: 5 }));
    }

    #[test]
    fn test_invalid_symbol_offset() {
        assert_eq!(
            decode("Zm9v!A"),
            Err(Base64Error::InvalidSymbol {
                byte: b'!',
                offset: 4
            })
        );
    }

    #[test]
    fn test_decode_into_buffer_too_small() {
        let mut out = [0u8; 2];
        assert_eq!(
            decode_into(b"Zm9v", &mut out),
            Err(Base64Error::BufferTooSmall {
                needed: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_step_sequence() {
        let mut decoder = QuartetDecoder::new(4).unwrap();
        assert_eq!(decoder.step(b'Q', 0), Ok(Step::Continue));
        assert_eq!(decoder.step(b'Q', 1), Ok(Step::Emit(b'A')));
        assert_eq!(decoder.state, Quartet::HaveSecond(16));
        assert_eq!(decoder.step(b'=', 2), Ok(Step::Stop));
    }
}
