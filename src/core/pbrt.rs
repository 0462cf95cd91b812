//! Type definition of Float, otherwise constants and functions which
//! can be used almost everywhere else in the code.

// std
use std::f32::consts::PI;

// see pbrt.h

pub type Float = f32;

pub const MACHINE_EPSILON: Float = std::f32::EPSILON * 0.5;
pub const SHADOW_EPSILON: Float = 0.0001;

/// Bump a floating-point value up to the next greater representable
/// floating-point value.
pub fn next_float_up(v: Float) -> Float {
    if v.is_infinite() && v > 0.0 {
        return v;
    }
    // skip negative zero
    let v: Float = if v == -0.0 { 0.0 } else { v };
    let bits: u32 = v.to_bits();
    if v >= 0.0 {
        Float::from_bits(bits + 1)
    } else {
        Float::from_bits(bits - 1)
    }
}

/// Bump a floating-point value down to the next smaller representable
/// floating-point value.
pub fn next_float_down(v: Float) -> Float {
    if v.is_infinite() && v < 0.0 {
        return v;
    }
    let v: Float = if v == 0.0 { -0.0 } else { v };
    let bits: u32 = v.to_bits();
    if v > 0.0 {
        Float::from_bits(bits - 1)
    } else {
        Float::from_bits(bits + 1)
    }
}

/// Conservative bound on the relative error of *n* chained
/// floating-point operations.
pub fn gamma(n: i32) -> Float {
    (n as Float * MACHINE_EPSILON) / (1.0 - n as Float * MACHINE_EPSILON)
}

/// Convert from angles expressed in degrees to radians.
pub fn radians(deg: Float) -> Float {
    (PI / 180.0) * deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_float_steps_one_ulp() {
        assert!(next_float_up(1.0) > 1.0);
        assert!(next_float_down(1.0) < 1.0);
        assert_eq!(next_float_down(next_float_up(1.0)), 1.0);
        assert!(next_float_up(-0.0) > 0.0);
        assert!(next_float_down(0.0) < 0.0);
        assert_eq!(next_float_up(Float::INFINITY), Float::INFINITY);
    }

    #[test]
    fn gamma_grows_with_n() {
        assert!(gamma(3) > 0.0);
        assert!(gamma(7) > gamma(3));
    }
}
