//! Core logic behind the command-line filters:
//! - `nl-base64`: encode stdin to base64 (streaming), or decode it with `--decode`
//! - `nl-fixed`: convert raw integer samples to Qm.n fixed point

use std::io::{self, Read, Write};

use nl_base64::{Base64Error, EncoderWriter};
use nl_fixed_point::{
    int16_to_fixed32, int32_to_fixed32, q_to_f64_signed, q_to_f64_unsigned, uint16_to_fixed32,
    uint32_to_fixed32, FixedPointError,
};
use thiserror::Error;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Base64(#[from] Base64Error),
    #[error("{0}")]
    FixedPoint(#[from] FixedPointError),
    #[error("Unknown width: {0}")]
    UnknownWidth(String),
    #[error("Invalid number for {what}: {value}")]
    InvalidNumber { what: &'static str, value: String },
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}

// ── nl-base64 ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Base64Options {
    pub decode: bool,
    pub pad: bool,
}

/// Parses `nl-base64` arguments, not including the program name.
pub fn parse_base64_args<I>(args: I) -> Result<Base64Options, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Base64Options {
        decode: false,
        pad: true,
    };
    for arg in args {
        match arg.as_str() {
            "--decode" | "-d" => options.decode = true,
            "--no-pad" => options.pad = false,
            other => return Err(CliError::UnknownArgument(other.to_string())),
        }
    }
    Ok(options)
}

/// Streams `input` through the base64 encoder into `output`.
///
/// Returns the number of characters written.
pub fn encode_stream<R: Read, W: Write>(
    mut input: R,
    output: W,
    pad: bool,
) -> Result<usize, CliError> {
    let mut writer = EncoderWriter::new(output);
    io::copy(&mut input, &mut writer)?;
    let (total, _) = writer.finish(pad)?;
    Ok(total)
}

/// Decodes base64 text, ignoring ASCII whitespace such as line breaks.
pub fn decode_text(text: &[u8]) -> Result<Vec<u8>, CliError> {
    let compact: Vec<u8> = text
        .iter()
        .copied()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    Ok(nl_base64::decode(compact)?)
}

// ── nl-fixed ──────────────────────────────────────────────────────────────

/// Raw sample width and signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    U16,
    I16,
    U32,
    I32,
}

impl std::str::FromStr for Width {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "u16" | "uint16" => Ok(Width::U16),
            "i16" | "int16" => Ok(Width::I16),
            "u32" | "uint32" => Ok(Width::U32),
            "i32" | "int32" => Ok(Width::I32),
            other => Err(CliError::UnknownWidth(other.to_string())),
        }
    }
}

/// A converted sample: raw result bits plus their real value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converted {
    pub bits: u32,
    pub value: f64,
}

impl std::fmt::Display for Converted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{:08X} {}", self.bits, self.value)
    }
}

fn parse_number<T>(what: &'static str, value: &str) -> Result<T, CliError>
where
    T: TryFrom<i64>,
{
    let invalid = || CliError::InvalidNumber {
        what,
        value: value.to_string(),
    };
    let (negative, digits) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value),
    };
    let magnitude = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => digits.parse::<u64>(),
    }
    .ok()
    .and_then(|m| i64::try_from(m).ok())
    .ok_or_else(invalid)?;
    let signed = if negative { -magnitude } else { magnitude };
    T::try_from(signed).map_err(|_| invalid())
}

/// Parses a Q0.31 scale factor given in decimal or `0x` hex.
pub fn parse_scale(value: &str) -> Result<u32, CliError> {
    parse_number("scale", value)
}

/// Parses a fractional bit count. Range checking is left to the converter.
pub fn parse_frac_bits(value: &str) -> Result<usize, CliError> {
    parse_number("frac-bits", value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedOptions {
    pub width: Width,
    pub scale: u32,
    pub frac_bits: usize,
    pub raw: Vec<String>,
}

/// Parses `nl-fixed` arguments, not including the program name.
///
/// Anything that is not a flag is a raw sample; a leading `-` on its own
/// marks a negative sample, so only `--` prefixes are treated as flags.
pub fn parse_fixed_args<I>(args: I) -> Result<FixedOptions, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut width = None;
    let mut scale = None;
    let mut frac_bits = None;
    let mut raw = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--width" => {
                let value = args.next().ok_or(CliError::MissingArgument("--width"))?;
                width = Some(value.parse::<Width>()?);
            }
            "--scale" => {
                let value = args.next().ok_or(CliError::MissingArgument("--scale"))?;
                scale = Some(parse_scale(&value)?);
            }
            "--frac-bits" => {
                let value = args
                    .next()
                    .ok_or(CliError::MissingArgument("--frac-bits"))?;
                frac_bits = Some(parse_frac_bits(&value)?);
            }
            flag if flag.starts_with("--") => {
                return Err(CliError::UnknownArgument(flag.to_string()));
            }
            _ => raw.push(arg),
        }
    }

    Ok(FixedOptions {
        width: width.ok_or(CliError::MissingArgument("--width"))?,
        scale: scale.ok_or(CliError::MissingArgument("--scale"))?,
        frac_bits: frac_bits.ok_or(CliError::MissingArgument("--frac-bits"))?,
        raw,
    })
}

/// Converts one raw sample given as text.
pub fn convert(
    width: Width,
    raw: &str,
    scale_factor: u32,
    frac_bits: usize,
) -> Result<Converted, CliError> {
    let p = frac_bits as u32;
    let converted = match width {
        Width::U16 => {
            let bits = uint16_to_fixed32(parse_number("raw", raw)?, scale_factor, frac_bits)?;
            Converted {
                bits,
                value: q_to_f64_unsigned(p, bits),
            }
        }
        Width::U32 => {
            let bits = uint32_to_fixed32(parse_number("raw", raw)?, scale_factor, frac_bits)?;
            Converted {
                bits,
                value: q_to_f64_unsigned(p, bits),
            }
        }
        Width::I16 => {
            let fixed = int16_to_fixed32(parse_number("raw", raw)?, scale_factor, frac_bits)?;
            Converted {
                bits: fixed as u32,
                value: q_to_f64_signed(p, fixed),
            }
        }
        Width::I32 => {
            let fixed = int32_to_fixed32(parse_number("raw", raw)?, scale_factor, frac_bits)?;
            Converted {
                bits: fixed as u32,
                value: q_to_f64_signed(p, fixed),
            }
        }
    };
    log::debug!("{width:?} {raw} -> {converted}");
    Ok(converted)
}
