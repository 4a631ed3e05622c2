use crate::PlError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PlError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PlError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(PlError::InvalidArg { what })
    }
}

/// Three-way sign: -1, 0 or +1. Zero (of either sign) maps to 0.
///
/// Unlike [`f64::signum`], which returns ±1 for ±0.0, this is what the
/// friction and zero-crossing logic need.
#[inline]
pub fn sign(v: Real) -> Real {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
pub fn deg_to_rad(deg: Real) -> Real {
    deg.to_radians()
}

#[inline]
pub fn rad_to_deg(rad: Real) -> Real {
    rad.to_degrees()
}

/// Snap `value` onto the grid `origin + k * step`. A non-positive step is a no-op.
pub fn snap_to_step(value: Real, origin: Real, step: Real) -> Real {
    if step <= 0.0 || !step.is_finite() {
        return value;
    }
    let k = ((value - origin) / step).round();
    origin + k * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero_mass() {
        assert!(ensure_positive(0.0, "mass").is_err());
        assert_eq!(ensure_positive(2.0, "mass").unwrap(), 2.0);
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-0.0), 0.0);
        assert_eq!(sign(3.0), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }

    #[test]
    fn snap_to_step_rounds_to_grid() {
        assert!((snap_to_step(0.27, 0.0, 0.1) - 0.3).abs() < 1e-12);
        assert!((snap_to_step(3.3, 0.5, 1.0) - 3.5).abs() < 1e-12);
        assert_eq!(snap_to_step(3.3, 0.0, 0.0), 3.3);
    }
}
