//! Raw sample to fixed-point conversion.
//!
//! A raw sample is scaled by a resolution given in Q0.31 ("units per raw
//! bit"). The product is formed at 64 bits and narrowed from 31 to the
//! requested number of fractional bits, rounding the dropped bits up.
//!
//! Signed samples are converted through their unsigned magnitude and the
//! sign is re-applied afterwards, so `x` and `-x` always produce results of
//! equal magnitude.

use crate::q::{qdown_u64, QInt, QUint, MAX_FRAC_BITS};
use crate::FixedPointError;

/// Converts a raw unsigned 32-bit sample to an unsigned Qm.n value.
///
/// # Arguments
///
/// * `raw_value` - The raw sample.
/// * `scale_factor` - Resolution of one raw bit, in Q0.31.
/// * `desired_frac_bits` - Fractional bits `n` of the result, at most 31.
///
/// # Errors
///
/// - [`FixedPointError::FracBitsOutOfRange`] if `desired_frac_bits > 31`.
/// - [`FixedPointError::MagnitudeOverflow`] if the result needs more than 32 bits.
///
/// # Example
///
/// ```
/// use nl_fixed_point::uint32_to_fixed32;
///
/// // 1000 counts at 0.0098 per count, as Q29.2 (rounded up).
/// assert_eq!(uint32_to_fixed32(1000, 0x141205C, 2).unwrap(), 0x28);
/// ```
pub fn uint32_to_fixed32(
    raw_value: u32,
    scale_factor: u32,
    desired_frac_bits: usize,
) -> Result<QUint, FixedPointError> {
    if desired_frac_bits > MAX_FRAC_BITS {
        log::debug!("rejecting {desired_frac_bits} fractional bits");
        return Err(FixedPointError::FracBitsOutOfRange {
            frac_bits: desired_frac_bits,
        });
    }

    let wide = u64::from(raw_value) * u64::from(scale_factor);
    let value = qdown_u64(MAX_FRAC_BITS as u32, desired_frac_bits as u32, wide);

    // The integer part must fit in the remaining 32 - n bits.
    QUint::try_from(value).map_err(|_| {
        log::debug!(
            "{raw_value} x 0x{scale_factor:08x} at {desired_frac_bits} fractional bits overflows"
        );
        FixedPointError::MagnitudeOverflow { value }
    })
}

/// Converts a raw unsigned 16-bit sample to an unsigned Qm.n value.
///
/// See [`uint32_to_fixed32`].
pub fn uint16_to_fixed32(
    raw_value: u16,
    scale_factor: u32,
    desired_frac_bits: usize,
) -> Result<QUint, FixedPointError> {
    uint32_to_fixed32(u32::from(raw_value), scale_factor, desired_frac_bits)
}

/// Converts a raw signed 32-bit sample to a signed Qm.n value.
///
/// The magnitude is taken by two's-complement negation as an unsigned
/// value, which also covers `i32::MIN`. The unsigned result is negated
/// back the same way and reinterpreted as `i32`.
///
/// # Example
///
/// ```
/// use nl_fixed_point::int32_to_fixed32;
///
/// assert_eq!(int32_to_fixed32(-2000, 0x141205C, 7).unwrap(), -2509);
/// assert_eq!(int32_to_fixed32(2000, 0x141205C, 7).unwrap(), 2509);
/// ```
pub fn int32_to_fixed32(
    raw_value: i32,
    scale_factor: u32,
    desired_frac_bits: usize,
) -> Result<QInt, FixedPointError> {
    let magnitude = raw_value.unsigned_abs();
    let unsigned = uint32_to_fixed32(magnitude, scale_factor, desired_frac_bits)?;
    let bits = if raw_value < 0 {
        unsigned.wrapping_neg()
    } else {
        unsigned
    };
    Ok(bits as QInt)
}

/// Converts a raw signed 16-bit sample to a signed Qm.n value.
///
/// See [`int32_to_fixed32`].
pub fn int16_to_fixed32(
    raw_value: i16,
    scale_factor: u32,
    desired_frac_bits: usize,
) -> Result<QInt, FixedPointError> {
    int32_to_fixed32(i32::from(raw_value), scale_factor, desired_frac_bits)
}

/// A raw sample width that can be converted to a 32-bit fixed-point value.
pub trait RawSample: Copy {
    /// Signedness-matching 32-bit container of the result.
    type Fixed;

    fn to_fixed32(
        self,
        scale_factor: u32,
        desired_frac_bits: usize,
    ) -> Result<Self::Fixed, FixedPointError>;
}

impl RawSample for u16 {
    type Fixed = QUint;

    fn to_fixed32(
        self,
        scale_factor: u32,
        desired_frac_bits: usize,
    ) -> Result<QUint, FixedPointError> {
        uint16_to_fixed32(self, scale_factor, desired_frac_bits)
    }
}

impl RawSample for u32 {
    type Fixed = QUint;

    fn to_fixed32(
        self,
        scale_factor: u32,
        desired_frac_bits: usize,
    ) -> Result<QUint, FixedPointError> {
        uint32_to_fixed32(self, scale_factor, desired_frac_bits)
    }
}

impl RawSample for i16 {
    type Fixed = QInt;

    fn to_fixed32(
        self,
        scale_factor: u32,
        desired_frac_bits: usize,
    ) -> Result<QInt, FixedPointError> {
        int16_to_fixed32(self, scale_factor, desired_frac_bits)
    }
}

impl RawSample for i32 {
    type Fixed = QInt;

    fn to_fixed32(
        self,
        scale_factor: u32,
        desired_frac_bits: usize,
    ) -> Result<QInt, FixedPointError> {
        int32_to_fixed32(self, scale_factor, desired_frac_bits)
    }
}

/// Converts any supported raw sample to a 32-bit fixed-point value.
///
/// # Example
///
/// ```
/// use nl_fixed_point::to_fixed32;
///
/// assert_eq!(to_fixed32(1000u16, 0x141205C, 7).unwrap(), 0x4E7u32);
/// assert_eq!(to_fixed32(-4000i16, 0x141205C, 7).unwrap(), -5018);
/// ```
pub fn to_fixed32<T: RawSample>(
    raw_value: T,
    scale_factor: u32,
    desired_frac_bits: usize,
) -> Result<T::Fixed, FixedPointError> {
    raw_value.to_fixed32(scale_factor, desired_frac_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 0.0098 per count, Q0.31.
    const RESOLUTION: u32 = 0x141205C;

    #[test]
    fn test_frac_bits_out_of_range() {
        let err = FixedPointError::FracBitsOutOfRange { frac_bits: 32 };
        assert_eq!(int16_to_fixed32(0, 0, 32), Err(err.clone()));
        assert_eq!(uint16_to_fixed32(0, 0, 32), Err(err.clone()));
        assert_eq!(int32_to_fixed32(0, 0, 32), Err(err.clone()));
        assert_eq!(uint32_to_fixed32(0, 0, 32), Err(err));
    }

    #[test]
    fn test_result_out_of_range() {
        assert!(matches!(
            int16_to_fixed32(i16::MAX, u32::MAX, 31),
            Err(FixedPointError::MagnitudeOverflow { .. })
        ));
        assert!(matches!(
            uint16_to_fixed32(u16::MAX, u32::MAX, 31),
            Err(FixedPointError::MagnitudeOverflow { .. })
        ));
        assert!(matches!(
            int32_to_fixed32(i32::MAX, u32::MAX, 31),
            Err(FixedPointError::MagnitudeOverflow { .. })
        ));
        assert_eq!(
            uint32_to_fixed32(u32::MAX, u32::MAX, 31),
            Err(FixedPointError::MagnitudeOverflow {
                value: u64::from(u32::MAX) * u64::from(u32::MAX)
            })
        );
    }

    #[test]
    fn test_zero_scale() {
        assert_eq!(int16_to_fixed32(i16::MAX, 0, 0), Ok(0));
        assert_eq!(uint16_to_fixed32(u16::MAX, 0, 0), Ok(0));
        assert_eq!(int32_to_fixed32(i32::MAX, 0, 0), Ok(0));
        assert_eq!(uint32_to_fixed32(u32::MAX, 0, 0), Ok(0));
    }

    #[test]
    fn test_zero_value() {
        assert_eq!(int16_to_fixed32(0, 1, 0), Ok(0));
        assert_eq!(uint16_to_fixed32(0, 1, 15), Ok(0));
        assert_eq!(int32_to_fixed32(0, 1, 0), Ok(0));
        assert_eq!(uint32_to_fixed32(0, 1, 0), Ok(0));
    }

    #[test]
    fn test_fractional_bits() {
        assert_eq!(int16_to_fixed32(1000, RESOLUTION, 2), Ok(0x28));
        assert_eq!(int16_to_fixed32(1000, RESOLUTION, 3), Ok(0x4F));
        assert_eq!(
            int16_to_fixed32(-2000, RESOLUTION, 7),
            Ok(0xFFFF_F633u32 as i32)
        );
    }

    #[test]
    fn test_signedness() {
        assert_eq!(uint16_to_fixed32(1000, RESOLUTION, 7), Ok(0x4E7));
        assert_eq!(int16_to_fixed32(1000, RESOLUTION, 7), Ok(0x4E7));
        assert_eq!(
            int16_to_fixed32(-4000, RESOLUTION, 7),
            Ok(0xFFFF_EC66u32 as i32)
        );
        assert_eq!(int16_to_fixed32(0, RESOLUTION, 7), Ok(0));
    }

    #[test]
    fn test_int32_min_magnitude() {
        // |i32::MIN| = 2^31; at full scale-of-one that is exactly 1.0 in Q0.31.
        assert_eq!(int32_to_fixed32(i32::MIN, 1, 0), Ok(-1));
        assert_eq!(int32_to_fixed32(i32::MIN, 0x8000_0000, 0), Ok(i32::MIN));
    }

    #[test]
    fn test_identity_scale() {
        for frac_bits in 0..=MAX_FRAC_BITS {
            assert_eq!(uint32_to_fixed32(1, 1, frac_bits), Ok(1));
            assert_eq!(int32_to_fixed32(1, 1, frac_bits), Ok(1));
            assert_eq!(int32_to_fixed32(-1, 1, frac_bits), Ok(-1));
        }
    }

    #[test]
    fn test_generic_entry() {
        assert_eq!(to_fixed32(1000u32, RESOLUTION, 7), Ok(0x4E7u32));
        assert_eq!(to_fixed32(-1000i32, RESOLUTION, 7), Ok(-0x4E7));
        assert!(to_fixed32(1u16, 1, 40).is_err());
    }
}
