//! Base64 encoding and decoding utilities.
//!
//! This crate provides:
//! - Block encoding and decoding of whole buffers, including in-place decode
//! - A streaming encoder that needs only three bytes of state and pushes
//!   characters to a caller-supplied sink
//! - An [`std::io::Write`] adapter over the same streaming state
//!
//! Only the standard alphabet (RFC 4648, `+` and `/`) with `=` padding is
//! supported.
//!
//! # Example
//!
//! ```
//! use nl_base64::{decode, encode, encode_stream};
//!
//! let data = b"hello world";
//! let encoded = encode(data);
//! assert_eq!(encoded, encode_stream(data, true));
//! assert_eq!(decode(&encoded).unwrap(), data);
//! ```

mod alphabet;
mod constants;
mod decode;
mod encode;
mod stream;
mod writer;

pub use alphabet::{char_to_sextet, sextet_to_char};
pub use constants::{ALPHABET, ALPHABET_BYTES, PAD, PAD_BYTE, UNDETERMINED};
pub use decode::{decode, decode_in_place, decode_into, decoded_len_max};
pub use encode::{encode, encode_into, encoded_len};
pub use stream::{encode_stream, Pending, StreamEncoder};
pub use writer::EncoderWriter;

use thiserror::Error;

/// Error type for base64 operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Base64Error {
    /// A character outside the alphabet, or `=` where data was expected.
    #[error("invalid base64 symbol 0x{byte:02x} at offset {offset}")]
    InvalidSymbol { byte: u8, offset: usize },
    /// Input of odd length: characters are consumed in pairs.
    #[error("truncated base64 input: odd length {len}")]
    TruncatedInput { len: usize },
    /// The caller-supplied output slice cannot hold the result.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
}
