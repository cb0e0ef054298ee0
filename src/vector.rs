use std::ops::{Neg, Add, Sub, Mul};
use std::fmt;

#[derive(PartialEq, Clone, Copy, Default, Debug)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}
impl Vec3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn unit_x() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    pub fn unit_y() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    pub fn unit_z() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    pub fn len(&self) -> f32 {
        self.len_sq().sqrt()
    }

    pub fn len_sq(&self) -> f32 {
        self.x*self.x + self.y*self.y + self.z*self.z
    }

    pub fn dot(&self, vec: Vec3) -> f32 {
        self.x*vec.x + self.y*vec.y + self.z*vec.z
    }

    pub fn cross(&self, vec: Vec3) -> Self {
        Self::new(
            self.y*vec.z - self.z*vec.y,
            self.z*vec.x - self.x*vec.z,
            self.x*vec.y - self.y*vec.x,
        )
    }

    /// Divides by the length. A zero vector comes back as NaNs.
    ///
    /// Scales by the largest component first so the squared length neither
    /// overflows for huge vectors nor underflows for tiny ones.
    pub fn normalized(&self) -> Self {
        let max = self.x.abs().max(self.y.abs()).max(self.z.abs());
        let scaled = Self::new(self.x / max, self.y / max, self.z / max);
        let len = scaled.len();
        Self::new(scaled.x / len, scaled.y / len, scaled.z / len)
    }

    /// Componentwise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: Vec3, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, other: f32) -> Self::Output {
        Self::new(self.x * other, self.y * other, self.z * other)
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}


#[test]
fn cross_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    let cross = v.cross(v2);
    assert!(cross == Vec3::new(-45.0, 0.0, 30.0));
}

#[test]
fn cross_of_basis_is_right_handed() {
    assert!(Vec3::unit_x().cross(Vec3::unit_y()) == Vec3::unit_z());
    assert!(Vec3::unit_y().cross(Vec3::unit_x()) == -Vec3::unit_z());
}

#[test]
fn dot_test() {
    let v  = Vec3::new(4.0, 3.0, 6.0);
    let v2 = Vec3::new(2.0, 9.0, 3.0);

    let dot = v.dot(v2);
    assert!(dot == 53.0);
}

#[test]
fn normalized_has_unit_length() {
    let v = Vec3::new(1.0, 0.4, -0.2).normalized();
    assert!((v.len() - 1.0).abs() < 1e-6);
    assert!(v.x > 0.0 && v.z < 0.0);
}

#[test]
fn normalizing_extreme_magnitudes_keeps_direction() {
    let huge = Vec3::new(1e20, 1e20, 0.0).normalized();
    let half = std::f32::consts::FRAC_1_SQRT_2;
    assert!(huge.approx_eq(Vec3::new(half, half, 0.0), 1e-6));

    let tiny = Vec3::new(1e-23, 0.0, 0.0).normalized();
    assert!(tiny.approx_eq(Vec3::unit_x(), 1e-6));

    let subnormal = Vec3::new(0.0, -1e-40, 0.0).normalized();
    assert!(subnormal.approx_eq(-Vec3::unit_y(), 1e-6));
}

#[test]
fn normalizing_zero_gives_nan() {
    let v = Vec3::zero().normalized();
    assert!(v.x.is_nan() && v.y.is_nan() && v.z.is_nan());
}
