//! Mapping between six-bit values and alphabet characters.

use crate::constants::{ALPHABET_BYTES, PAD_BYTE};

const INVALID: u8 = 0xFF;

/// Reverse lookup table, indexed by input byte.
static DECODE_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < 64 {
        table[ALPHABET_BYTES[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Converts a six-bit value to its alphabet character.
///
/// The mapping is total: any value outside `0..64` yields the pad
/// character `=`.
///
/// # Example
///
/// ```
/// use nl_base64::sextet_to_char;
///
/// assert_eq!(sextet_to_char(0), b'A');
/// assert_eq!(sextet_to_char(63), b'/');
/// assert_eq!(sextet_to_char(0xFF), b'=');
/// ```
#[inline]
pub const fn sextet_to_char(value: u8) -> u8 {
    if value < 64 {
        ALPHABET_BYTES[value as usize]
    } else {
        PAD_BYTE
    }
}

/// Converts an alphabet character back to its six-bit value.
///
/// Returns `None` for `=` and for every byte outside the alphabet.
///
/// # Example
///
/// ```
/// use nl_base64::char_to_sextet;
///
/// assert_eq!(char_to_sextet(b'a'), Some(26));
/// assert_eq!(char_to_sextet(b'='), None);
/// assert_eq!(char_to_sextet(b'|'), None);
/// ```
#[inline]
pub fn char_to_sextet(ch: u8) -> Option<u8> {
    match DECODE_TABLE[ch as usize] {
        INVALID => None,
        value => Some(value),
    }
}
