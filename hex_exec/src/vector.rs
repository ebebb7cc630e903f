//! # 3D vector maths
//!
//! A small immutable vector type used for foot positions, body displacement and link offsets.
//! Every operation returns a new value.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};
use std::{
    convert::TryFrom,
    fmt,
    ops::{Add, Mul, Neg, Sub},
    str::FromStr,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A three dimensional vector.
///
/// Serialised as a `[x, y, z]` array so that vectors can be written compactly in parameter
/// files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A principal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Errors which can occur in vector operations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum VectorError {
    #[error("Invalid axis given, expected x, y or z, got {0:?}")]
    InvalidAxis(String),

    #[error("Expected 3 elements to build a vector, got {0}")]
    InvalidLength(usize),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Vector3 = Vector3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length of the vector.
    pub fn length(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }

    /// Unit vector in the same direction, or the zero vector if this vector has no length.
    pub fn normalized(&self) -> Vector3 {
        let length = self.length();

        if length == 0.0 {
            Vector3::ZERO
        } else {
            *self * (1.0 / length)
        }
    }

    pub fn dot(&self, other: &Vector3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Get the component of the vector along the given axis.
    pub fn component(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Rotate the vector about a principal axis by `angle_rad`.
    ///
    /// The two components orthogonal to `axis` are rotated with the 2D rotation formula, taken
    /// in the order `(y, z)` for X, `(x, z)` for Y and `(x, y)` for Z. The component along
    /// `axis` is unchanged.
    pub fn rotated(&self, angle_rad: f64, axis: Axis) -> Vector3 {
        let (s, c) = angle_rad.sin_cos();
        let Vector3 { x, y, z } = *self;

        match axis {
            Axis::X => Vector3::new(x, c * y - s * z, s * y + c * z),
            Axis::Y => Vector3::new(c * x - s * z, y, s * x + c * z),
            Axis::Z => Vector3::new(c * x - s * y, s * x + c * y, z),
        }
    }

    /// Rotate the vector about an axis given by name (`"x"`, `"y"` or `"z"`).
    pub fn rotated_named(&self, angle_rad: f64, axis: &str) -> Result<Vector3, VectorError> {
        Ok(self.rotated(angle_rad, axis.parse()?))
    }

    /// True if every component is within `tolerance` of `other`'s.
    pub fn is_close(&self, other: &Vector3, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        self * -1.0
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(a: [f64; 3]) -> Self {
        Vector3::new(a[0], a[1], a[2])
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl TryFrom<&[f64]> for Vector3 {
    type Error = VectorError;

    fn try_from(s: &[f64]) -> Result<Self, Self::Error> {
        match s {
            [x, y, z] => Ok(Vector3::new(*x, *y, *z)),
            _ => Err(VectorError::InvalidLength(s.len())),
        }
    }
}

impl From<nalgebra::Vector3<f64>> for Vector3 {
    fn from(v: nalgebra::Vector3<f64>) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for nalgebra::Vector3<f64> {
    fn from(v: Vector3) -> Self {
        nalgebra::Vector3::new(v.x, v.y, v.z)
    }
}

impl Axis {
    /// Index of the axis in an `[x, y, z]` array.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// The next axis in right-handed cyclic order (x -> y -> z -> x).
    pub fn next(&self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }

    /// The unit vector along this axis.
    pub fn unit(&self) -> nalgebra::Unit<nalgebra::Vector3<f64>> {
        match self {
            Axis::X => nalgebra::Vector3::x_axis(),
            Axis::Y => nalgebra::Vector3::y_axis(),
            Axis::Z => nalgebra::Vector3::z_axis(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl FromStr for Axis {
    type Err = VectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(VectorError::InvalidAxis(s.to_string())),
        }
    }
}

impl TryFrom<String> for Axis {
    type Error = VectorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Axis> for String {
    fn from(a: Axis) -> Self {
        a.name().to_string()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    const AXES: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    fn assert_vec_eq(a: Vector3, b: Vector3) {
        assert!(a.is_close(&b, 1e-12), "{} != {}", a, b);
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(-0.5, 4.0, 0.25);

        assert_eq!(a + b, Vector3::new(0.5, 6.0, 3.25));
        assert_eq!(a - b, Vector3::new(1.5, -2.0, 2.75));
        assert_eq!(a * -2.0, Vector3::new(-2.0, -4.0, -6.0));
        assert_eq!(-a, a * -1.0);
        assert_eq!(a.dot(&b), 8.25);
        assert_eq!(Vector3::new(3.0, 0.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_normalized() {
        assert_eq!(Vector3::ZERO.normalized(), Vector3::ZERO);

        let n = Vector3::new(0.0, -3.0, 4.0).normalized();
        assert_abs_diff_eq!(n.length(), 1.0, epsilon = 1e-12);
        assert_vec_eq(n, Vector3::new(0.0, -0.6, 0.8));
    }

    #[test]
    fn test_rotation_quarter_turns() {
        let v = Vector3::new(1.0, 2.0, 3.0);

        assert_vec_eq(v.rotated(FRAC_PI_2, Axis::X), Vector3::new(1.0, -3.0, 2.0));
        assert_vec_eq(v.rotated(FRAC_PI_2, Axis::Y), Vector3::new(-3.0, 2.0, 1.0));
        assert_vec_eq(v.rotated(FRAC_PI_2, Axis::Z), Vector3::new(-2.0, 1.0, 3.0));
    }

    #[test]
    fn test_rotation_properties() {
        let v = Vector3::new(0.3, -1.2, 0.7);

        for axis in AXES.iter().copied() {
            assert_eq!(v.rotated(0.0, axis), v);

            for i in 0..16 {
                let a = -PI + i as f64 * 0.41;
                let b = 0.3 - i as f64 * 0.17;

                let r = v.rotated(a, axis);
                assert_abs_diff_eq!(r.length(), v.length(), epsilon = 1e-12);
                assert_abs_diff_eq!(r.component(axis), v.component(axis));
                assert_vec_eq(r.rotated(b, axis), v.rotated(a + b, axis));
            }
        }
    }

    #[test]
    fn test_named_axes() {
        let v = Vector3::new(1.0, 0.0, 0.0);

        assert_eq!(v.rotated_named(PI, "z"), Ok(v.rotated(PI, Axis::Z)));
        assert_eq!(
            v.rotated_named(PI, "w"),
            Err(VectorError::InvalidAxis("w".into()))
        );
        assert_eq!("Y".parse::<Axis>(), Err(VectorError::InvalidAxis("Y".into())));

        for axis in AXES.iter() {
            assert_eq!(axis.name().parse::<Axis>(), Ok(*axis));
        }
    }

    #[test]
    fn test_conversions() {
        let v = Vector3::new(-0.3706, 0.0, 0.0);

        assert_eq!(v.to_string(), "[-0.3706, 0, 0]");
        assert_eq!(Vector3::try_from(&[1.0, 2.0, 3.0][..]), Ok(Vector3::new(1.0, 2.0, 3.0)));
        assert_eq!(
            Vector3::try_from(&[1.0, 2.0][..]),
            Err(VectorError::InvalidLength(2))
        );

        let na: nalgebra::Vector3<f64> = v.into();
        assert_eq!(Vector3::from(na), v);
    }
}
