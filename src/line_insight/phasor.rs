//! Complex number representation of a sinusoidal signal.
//!
//! A [`Phasor`] keeps its polar form (RMS value and phase angle in degrees)
//! and its cartesian form in sync. Addition and subtraction work on the
//! cartesian parts; multiplication, division and powers work on the polar
//! parts and keep the phase angle within (-180, 180].

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use num_complex::Complex64;

use super::error::PhasorError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Phasor {
    rms_value: f64,
    phase_angle_degrees: f64,
    cartesian: Complex64,
}

/*
* @brief Wrap a phase angle into (-180, 180].
* @param angle_degrees Angle in degrees
* @return Equivalent angle in (-180, 180]
*/
pub fn normalize_angle(angle_degrees: f64) -> f64 {
    let mut angle = angle_degrees % 360.0;
    if angle > 180.0 {
        angle -= 360.0;
    } else if angle <= -180.0 {
        angle += 360.0;
    }
    angle
}

impl Phasor {
    /// The zero phasor, also the fallback value of invalid arithmetic.
    pub const ZERO: Phasor = Phasor {
        rms_value: 0.0,
        phase_angle_degrees: 0.0,
        cartesian: Complex64 { re: 0.0, im: 0.0 },
    };

    /// Polar constructor. The angle is kept as given.
    pub fn new(rms_value: f64, phase_angle_degrees: f64) -> Self {
        let radians = phase_angle_degrees.to_radians();
        Self {
            rms_value,
            phase_angle_degrees,
            cartesian: Complex64::new(rms_value * radians.cos(), rms_value * radians.sin()),
        }
    }

    /// Cartesian constructor, deriving the RMS value and a quadrant-corrected angle.
    pub fn from_cartesian(real: f64, imaginary: f64) -> Self {
        let phase_angle_degrees = if real == 0.0 {
            // Border of Q1/Q2 or Q3/Q4, or the zero phasor
            if imaginary < 0.0 {
                -90.0
            } else if imaginary > 0.0 {
                90.0
            } else {
                0.0
            }
        } else {
            let angle = (imaginary / real).atan().to_degrees();
            if real < 0.0 {
                if imaginary >= 0.0 {
                    angle + 180.0
                } else {
                    angle - 180.0
                }
            } else {
                angle
            }
        };

        Self {
            rms_value: real.hypot(imaginary),
            phase_angle_degrees,
            cartesian: Complex64::new(real, imaginary),
        }
    }

    fn from_polar_normalized(rms_value: f64, phase_angle_degrees: f64) -> Self {
        Self::new(rms_value, normalize_angle(phase_angle_degrees))
    }

    pub fn rms_value(&self) -> f64 {
        self.rms_value
    }

    pub fn phase_angle_degrees(&self) -> f64 {
        self.phase_angle_degrees
    }

    pub fn real(&self) -> f64 {
        self.cartesian.re
    }

    pub fn imaginary(&self) -> f64 {
        self.cartesian.im
    }

    pub fn to_complex(&self) -> Complex64 {
        self.cartesian
    }

    pub fn is_zero(&self) -> bool {
        self.rms_value == 0.0
    }

    pub fn checked_div(self, rhs: Phasor) -> Result<Phasor, PhasorError> {
        if rhs.rms_value == 0.0 {
            return Err(PhasorError::DivideByZero);
        }
        Ok(Self::from_polar_normalized(
            self.rms_value / rhs.rms_value,
            self.phase_angle_degrees - rhs.phase_angle_degrees,
        ))
    }

    pub fn checked_pow(self, exponent: f64) -> Result<Phasor, PhasorError> {
        if self.rms_value == 0.0 && exponent <= 0.0 {
            return Err(PhasorError::ZeroToNonPositivePower { exponent });
        }
        Ok(Self::from_polar_normalized(
            self.rms_value.powf(exponent),
            self.phase_angle_degrees * exponent,
        ))
    }

    /// Raise the phasor to a power, reporting a zero base with a non-positive
    /// exponent and returning the zero phasor in that case.
    pub fn pow(self, exponent: f64) -> Phasor {
        self.checked_pow(exponent).unwrap_or_else(|err| {
            log::error!("Error: {err}");
            Phasor::ZERO
        })
    }
}

impl From<Complex64> for Phasor {
    fn from(value: Complex64) -> Self {
        Phasor::from_cartesian(value.re, value.im)
    }
}

impl Add for Phasor {
    type Output = Phasor;

    fn add(self, rhs: Phasor) -> Phasor {
        Phasor::from(self.cartesian + rhs.cartesian)
    }
}

impl Sub for Phasor {
    type Output = Phasor;

    fn sub(self, rhs: Phasor) -> Phasor {
        Phasor::from(self.cartesian - rhs.cartesian)
    }
}

impl Mul for Phasor {
    type Output = Phasor;

    fn mul(self, rhs: Phasor) -> Phasor {
        Phasor::from_polar_normalized(
            self.rms_value * rhs.rms_value,
            self.phase_angle_degrees + rhs.phase_angle_degrees,
        )
    }
}

/// Division that reports a zero divisor and falls back to the zero phasor.
/// Use [`Phasor::checked_div`] to handle the error instead.
impl Div for Phasor {
    type Output = Phasor;

    fn div(self, rhs: Phasor) -> Phasor {
        self.checked_div(rhs).unwrap_or_else(|err| {
            log::error!("Error: {err}");
            Phasor::ZERO
        })
    }
}

impl fmt::Display for Phasor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.6} @ {:.6}deg", self.rms_value, self.phase_angle_degrees)
    }
}
