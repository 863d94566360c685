//! Integer to fixed-point conversion.
//!
//! Raw 16- and 32-bit sensor samples are scaled by a per-bit resolution in
//! Q0.31 and narrowed to a caller-chosen number of fractional bits, with
//! explicit range checks instead of silent wraparound.
//!
//! # Example
//!
//! ```
//! use nl_fixed_point::{int16_to_fixed32, q_to_f64_signed};
//!
//! // 0.0098 units per count, result in Q24.7.
//! let fixed = int16_to_fixed32(-2000, 0x141205C, 7).unwrap();
//! assert!((q_to_f64_signed(7, fixed) + 19.6).abs() < 1.0 / 128.0);
//! ```

mod convert;
mod q;

pub use convert::{
    int16_to_fixed32, int32_to_fixed32, to_fixed32, uint16_to_fixed32, uint32_to_fixed32,
    RawSample,
};
pub use q::{
    mask, q_signed, q_to_f64_signed, q_to_f64_unsigned, q_unsigned, qdown_i32, qdown_u64,
    qint_i32, qup_i32, QInt, QUint, MAX_FRAC_BITS,
};

use thiserror::Error;

/// Error type for fixed-point conversions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixedPointError {
    /// More fractional bits were requested than a 32-bit value holds.
    #[error("{frac_bits} fractional bits requested, at most 31 supported")]
    FracBitsOutOfRange { frac_bits: usize },
    /// The scaled result does not fit in 32 bits.
    #[error("scaled value {value} does not fit in 32 bits")]
    MagnitudeOverflow { value: u64 },
}
