/// Standard base64 alphabet (RFC 4648, no URL-safe substitutions).
pub const ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Standard base64 alphabet as a byte array (used for byte-level operations and const evaluation).
pub const ALPHABET_BYTES: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Padding character.
pub const PAD: char = '=';

/// Padding character as a byte.
pub const PAD_BYTE: u8 = b'=';

/// Marker for a six-bit group that the input did not determine.
///
/// It is outside `0..64`, so [`crate::sextet_to_char`] renders it as [`PAD`].
pub const UNDETERMINED: u8 = 0xFF;
