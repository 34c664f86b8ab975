//! IEEE 754 binary16 conversion.
//!
//! Layout: bit 15 sign, bits 14..10 exponent (bias 15), bits 9..0 fraction.
//! Every binary16 value is exactly representable as `f32`, so decoding is lossless.

const SIGN_MASK: u16 = 0x8000;
const EXPONENT_MASK: u16 = 0x7C00;
const FRACTION_MASK: u16 = 0x03FF;
const QUIET_NAN_BIT: u16 = 0x0200;

/// Decode a binary16 bit pattern.
///
/// Total: NaN and the infinities are ordinary outputs.
pub fn decode_f16(bits: u16) -> f32 {
    let sign = if bits & SIGN_MASK != 0 { -1.0 } else { 1.0 };
    let exponent = ((bits & EXPONENT_MASK) >> 10) as i32;
    let fraction = (bits & FRACTION_MASK) as f32;

    match exponent {
        0 => sign * 2f32.powi(-14) * (fraction / 1024.0),
        31 if fraction != 0.0 => f32::NAN,
        31 => sign * f32::INFINITY,
        _ => sign * 2f32.powi(exponent - 15) * (1.0 + fraction / 1024.0),
    }
}

/// Encode an `f32` as binary16, rounding to nearest with ties to even.
///
/// Magnitudes beyond the binary16 range become infinity; values below half the
/// smallest subnormal become signed zero. NaN stays NaN.
pub fn encode_f16(value: f32) -> u16 {
    let x = value.to_bits();
    let sign = ((x >> 16) as u16) & SIGN_MASK;
    let exponent = ((x >> 23) & 0xFF) as i32;
    let mantissa = x & 0x007F_FFFF;

    if exponent == 0xFF {
        let nan = if mantissa != 0 { QUIET_NAN_BIT } else { 0 };
        return sign | EXPONENT_MASK | nan;
    }

    let half_exponent = exponent - 127 + 15;
    if half_exponent >= 0x1F {
        return sign | EXPONENT_MASK;
    }

    if half_exponent <= 0 {
        let shift = (14 - half_exponent) as u32;
        if shift > 24 {
            return sign;
        }
        let significand = mantissa | 0x0080_0000;
        let fraction = round_shift(significand, shift);
        // A carry out of the fraction lands on the smallest normal exponent.
        return sign | fraction as u16;
    }

    let bits = sign | ((half_exponent as u16) << 10) | (mantissa >> 13) as u16;
    let rem = mantissa & 0x1FFF;
    if rem > 0x1000 || (rem == 0x1000 && bits & 1 == 1) {
        // Carry may roll over into the exponent, up to infinity.
        bits + 1
    } else {
        bits
    }
}

fn round_shift(value: u32, shift: u32) -> u32 {
    let kept = value >> shift;
    let rem = value & ((1 << shift) - 1);
    let halfway = 1 << (shift - 1);
    if rem > halfway || (rem == halfway && kept & 1 == 1) {
        kept + 1
    } else {
        kept
    }
}
