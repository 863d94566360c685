//! Q-format helpers.
//!
//! A Qm.n value is a 32-bit integer whose low `n` bits are fractional.
//! `QInt` and `QUint` are the signed and unsigned containers.

/// Signed Qm.n container.
pub type QInt = i32;

/// Unsigned Qm.n container.
pub type QUint = u32;

/// Largest fractional width a 32-bit container supports.
pub const MAX_FRAC_BITS: usize = 31;

/// `2^bits - 1`.
///
/// # Example
///
/// ```
/// use nl_fixed_point::mask;
///
/// assert_eq!(mask(0), 0);
/// assert_eq!(mask(4), 0xF);
/// assert_eq!(mask(31), 0x7FFF_FFFF);
/// ```
pub const fn mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

/// Encodes `x` as a signed value with `p` fractional bits, truncating toward zero.
///
/// Values outside the `i32` range saturate.
///
/// # Example
///
/// ```
/// use nl_fixed_point::q_signed;
///
/// assert_eq!(q_signed(1, 1.0), 2);
/// assert_eq!(q_signed(29, -std::f64::consts::PI), -1686629713);
/// ```
pub fn q_signed(p: u32, x: f64) -> QInt {
    (x * 2f64.powi(p as i32)) as QInt
}

/// Encodes `x` as an unsigned value with `p` fractional bits, truncating toward zero.
///
/// Negative values clamp to zero; values above `u32::MAX` saturate.
pub fn q_unsigned(p: u32, x: f64) -> QUint {
    (x * 2f64.powi(p as i32)) as QUint
}

/// Converts a signed Q value with `p` fractional bits back to a float.
pub fn q_to_f64_signed(p: u32, x: QInt) -> f64 {
    f64::from(x) / 2f64.powi(p as i32)
}

/// Converts an unsigned Q value with `p` fractional bits back to a float.
pub fn q_to_f64_unsigned(p: u32, x: QUint) -> f64 {
    f64::from(x) / 2f64.powi(p as i32)
}

/// Narrows an unsigned value from `from` to `to` fractional bits.
///
/// The dropped bits round up: `2^(from - to) - 1` is added before the shift.
///
/// # Panics
///
/// Panics if `to > from` or `from - to >= 64`.
pub fn qdown_u64(from: u32, to: u32, x: u64) -> u64 {
    let shift = from - to;
    // Widened so the rounding bias cannot carry out of 64 bits.
    ((u128::from(x) + u128::from(mask(shift))) >> shift) as u64
}

/// Narrows a signed value from `from` to `to` fractional bits.
///
/// Same rounding bias as [`qdown_u64`], followed by an arithmetic shift,
/// so results round toward positive infinity.
///
/// # Example
///
/// ```
/// use nl_fixed_point::{q_signed, qdown_i32};
///
/// let pi = std::f64::consts::PI;
/// assert_eq!(qdown_i32(29, 23, q_signed(29, -pi)), -26353589);
/// assert_eq!(qdown_i32(29, 23, q_signed(29, pi)), 26353590);
/// ```
pub fn qdown_i32(from: u32, to: u32, x: QInt) -> QInt {
    let shift = from - to;
    ((i64::from(x) + mask(shift) as i64) >> shift) as QInt
}

/// Integer part of a signed value with `from` fractional bits.
///
/// # Example
///
/// ```
/// use nl_fixed_point::{q_signed, qint_i32};
///
/// assert_eq!(qint_i32(17, q_signed(17, -std::f64::consts::PI)), -3);
/// ```
pub fn qint_i32(from: u32, x: QInt) -> QInt {
    qdown_i32(from, 0, x)
}

/// Widens a signed value from `from` to `to` fractional bits.
pub fn qup_i32(from: u32, to: u32, x: QInt) -> QInt {
    x << (to - from)
}
