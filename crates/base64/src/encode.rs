//! One-shot (block) base64 encoding.

use crate::alphabet::sextet_to_char;
use crate::constants::{ALPHABET_BYTES, UNDETERMINED};
use crate::Base64Error;

/// Pre-computed two-character lookup table for base64 encoding.
/// Entry `i * 64 + j` holds the characters for sextets `i` and `j`.
static TABLE2: [[u8; 2]; 4096] = {
    let mut table = [[0u8; 2]; 4096];
    let mut i = 0;
    while i < 64 {
        let mut j = 0;
        while j < 64 {
            let idx = i * 64 + j;
            table[idx][0] = ALPHABET_BYTES[i];
            table[idx][1] = ALPHABET_BYTES[j];
            j += 1;
        }
        i += 1;
    }
    table
};

/// Returns the encoded length of `input_len` bytes: `4 * ceil(input_len / 3)`.
///
/// # Example
///
/// ```
/// use nl_base64::encoded_len;
///
/// assert_eq!(encoded_len(0), 0);
/// assert_eq!(encoded_len(1), 4);
/// assert_eq!(encoded_len(3), 4);
/// assert_eq!(encoded_len(4), 8);
/// ```
pub const fn encoded_len(input_len: usize) -> usize {
    input_len.div_ceil(3) * 4
}

/// Splits a trailing group of one or two bytes into four sextets.
///
/// Sextets not determined by the input are set to [`UNDETERMINED`].
fn tail_sextets(tail: &[u8]) -> [u8; 4] {
    match *tail {
        [o1] => [o1 >> 2, (o1 << 4) & 0x3F, UNDETERMINED, UNDETERMINED],
        [o1, o2] => [
            o1 >> 2,
            ((o1 << 4) & 0x3F) | (o2 >> 4),
            (o2 << 2) & 0x3F,
            UNDETERMINED,
        ],
        _ => unreachable!("tail holds one or two bytes"),
    }
}

/// Encodes `input` into `out`, returning the number of characters written.
///
/// Always writes exactly [`encoded_len`] characters. A final group of one
/// or two bytes still produces four characters; the slots the input does
/// not determine are rendered as `=`.
///
/// # Errors
///
/// Returns [`Base64Error::BufferTooSmall`] if `out` cannot hold the output.
/// Nothing is written in that case.
///
/// # Example
///
/// ```
/// use nl_base64::encode_into;
///
/// let mut out = [0u8; 8];
/// let len = encode_into(b"hello", &mut out).unwrap();
/// assert_eq!(&out[..len], b"aGVsbG8=");
/// ```
pub fn encode_into(input: &[u8], out: &mut [u8]) -> Result<usize, Base64Error> {
    let needed = encoded_len(input.len());
    if out.len() < needed {
        return Err(Base64Error::BufferTooSmall {
            needed,
            available: out.len(),
        });
    }

    let mut chunks = input.chunks_exact(3);
    let mut offset = 0;
    for chunk in &mut chunks {
        let (o1, o2, o3) = (chunk[0], chunk[1], chunk[2]);
        let v1 = ((o1 as usize) << 4) | ((o2 as usize) >> 4);
        let v2 = (((o2 & 0b1111) as usize) << 8) | (o3 as usize);
        out[offset..offset + 2].copy_from_slice(&TABLE2[v1]);
        out[offset + 2..offset + 4].copy_from_slice(&TABLE2[v2]);
        offset += 4;
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        for (slot, sextet) in out[offset..offset + 4].iter_mut().zip(tail_sextets(tail)) {
            *slot = sextet_to_char(sextet);
        }
        offset += 4;
    }

    Ok(offset)
}

/// Encodes a byte slice to a base64 string.
///
/// Never fails; every byte value is accepted.
///
/// # Example
///
/// ```
/// use nl_base64::encode;
///
/// assert_eq!(encode(b"hello world"), "aGVsbG8gd29ybGQ=");
/// assert_eq!(encode(b"A"), "QQ==");
/// ```
pub fn encode(input: &[u8]) -> String {
    let mut out = vec![0u8; encoded_len(input.len())];
    let written = match encode_into(input, &mut out) {
        Ok(written) => written,
        Err(_) => unreachable!("output sized by encoded_len"),
    };
    out.truncate(written);
    out.into_iter().map(char::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn test_single_byte() {
        assert_eq!(encode(b"f"), "Zg==");
    }

    #[test]
    fn test_two_bytes() {
        assert_eq!(encode(b"fo"), "Zm8=");
    }

    #[test]
    fn test_three_bytes() {
        assert_eq!(encode(b"foo"), "Zm9v");
    }

    #[test]
    fn test_various_lengths() {
        assert_eq!(encode(b"foob"), "Zm9vYg==");
        assert_eq!(encode(b"fooba"), "Zm9vYmE=");
        assert_eq!(encode(b"foobar"), "Zm9vYmFy");
    }

    #[test]
    fn test_tail_sextets_mark_undetermined_slots() {
        assert_eq!(tail_sextets(&[0x41]), [16, 16, UNDETERMINED, UNDETERMINED]);
        assert_eq!(tail_sextets(&[0x41, 0x42]), [16, 20, 8, UNDETERMINED]);
    }

    #[test]
    fn test_buffer_too_small() {
        let mut out = [0u8; 7];
        assert_eq!(
            encode_into(b"hello", &mut out),
            Err(Base64Error::BufferTooSmall {
                needed: 8,
                available: 7
            })
        );
        assert_eq!(out, [0u8; 7]);
    }

    #[test]
    fn test_binary_data() {
        let data: Vec<u8> = (0..=255).collect();
        let encoded = encode(&data);
        assert_eq!(encoded.len(), encoded_len(256));
        for c in encoded.chars() {
            assert!(
                c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '=',
                "Invalid base64 character: {}",
                c
            );
        }
    }
}
