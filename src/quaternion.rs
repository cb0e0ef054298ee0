use std::ops::{Mul, Neg};
use std::fmt;

use crate::vector::Vec3;

/// A quaternion with vector part `(x, y, z)` and scalar part `w`.
///
/// Only unit quaternions describe pure rotations. Nothing here normalizes or
/// checks the norm; a non-unit quaternion silently produces a scaled result.
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}
impl Quaternion {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn from_parts(v: Vec3, w: f32) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    pub fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    /// Rotation of `angle` radians about `axis`.
    ///
    /// `axis` must already be unit length. Any angle is accepted; `angle` and
    /// `angle + 2π` give the same rotation with opposite sign.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half = angle / 2.0;
        Self::from_parts(axis * half.sin(), half.cos())
    }

    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn dot(&self, other: Quaternion) -> f32 {
        self.x*other.x + self.y*other.y + self.z*other.z + self.w*other.w
    }

    pub fn norm_sq(&self) -> f32 {
        self.dot(*self)
    }

    pub fn norm(&self) -> f32 {
        self.norm_sq().sqrt()
    }

    /// Hamilton product `self * rhs`. Applying the result rotates by `rhs` first.
    pub fn multiply(&self, rhs: Quaternion) -> Self {
        let lv = self.vector();
        let rv = rhs.vector();

        let v = lv.cross(rv) + lv * rhs.w + rv * self.w;
        let w = self.w * rhs.w - lv.dot(rv);

        Self::from_parts(v, w)
    }

    /// Negates the vector part. For unit quaternions this is the inverse.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Rotates `vec` with the sandwich product `q * (vec, 0) * conj(q)`.
    pub fn rotate(&self, vec: Vec3) -> Vec3 {
        rotate_vector(vec, *self)
    }

    pub fn approx_eq(&self, other: Quaternion, eps: f32) -> bool {
        (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
            && (self.z - other.z).abs() <= eps
            && (self.w - other.w).abs() <= eps
    }

    /// `q` and `-q` are the same rotation.
    pub fn same_rotation(&self, other: Quaternion, eps: f32) -> bool {
        self.approx_eq(other, eps) || self.approx_eq(-other, eps)
    }
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        self.multiply(other)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2}, {:.2})", self.x, self.y, self.z, self.w)
    }
}

pub fn multiply(lhs: Quaternion, rhs: Quaternion) -> Quaternion {
    lhs.multiply(rhs)
}

pub fn conjugate(quat: Quaternion) -> Quaternion {
    quat.conjugate()
}

/// See [`Quaternion::from_axis_angle`]. `axis` must be normalized by the caller.
pub fn make_rotate_axis_angle_quaternion(axis: Vec3, angle: f32) -> Quaternion {
    Quaternion::from_axis_angle(axis, angle)
}

/// Rotates `vec` by `quat` with the sandwich product `quat * (vec, 0) * conj(quat)`
/// and returns the vector part.
///
/// `quat` should be unit length; a non-unit quaternion scales the result by its
/// squared norm. The scalar part of the product is discarded without a check.
pub fn rotate_vector(vec: Vec3, quat: Quaternion) -> Vec3 {
    let r = Quaternion::from_parts(vec, 0.0);
    quat.multiply(r).multiply(quat.conjugate()).vector()
}

#[test]
fn multiply_basis_units() {
    let i = Quaternion::new(1.0, 0.0, 0.0, 0.0);
    let j = Quaternion::new(0.0, 1.0, 0.0, 0.0);
    let k = Quaternion::new(0.0, 0.0, 1.0, 0.0);
    let minus_one = Quaternion::new(0.0, 0.0, 0.0, -1.0);

    assert!(i * j == k);
    assert!(j * i == -k);
    assert!(j * k == i);
    assert!(k * i == j);
    assert!(i * i == minus_one);
    assert!(i * j * k == minus_one);
}

#[test]
fn multiply_matches_hand_computed_product() {
    let a = Quaternion::new(1.0, 2.0, 3.0, 4.0);
    let b = Quaternion::new(5.0, 6.0, 7.0, 8.0);

    assert!(multiply(a, b) == Quaternion::new(24.0, 48.0, 48.0, -6.0));
    assert!(multiply(b, a) == Quaternion::new(32.0, 32.0, 56.0, -6.0));
}

#[test]
fn multiply_is_not_commutative() {
    let a = make_rotate_axis_angle_quaternion(Vec3::unit_x(), 0.5);
    let b = make_rotate_axis_angle_quaternion(Vec3::unit_y(), 0.7);

    assert!(!(a * b).approx_eq(b * a, 1e-3));
}

#[test]
fn conjugate_negates_vector_part() {
    let q = Quaternion::new(0.1, -0.2, 0.3, 0.9);
    assert!(conjugate(q) == Quaternion::new(-0.1, 0.2, -0.3, 0.9));
    assert!(conjugate(conjugate(q)) == q);
}

#[test]
fn product_with_conjugate_is_identity() {
    let axis = Vec3::new(1.0, 0.4, -0.2).normalized();
    let q = make_rotate_axis_angle_quaternion(axis, 0.45);

    assert!((q * conjugate(q)).approx_eq(Quaternion::identity(), 1e-6));
    assert!((conjugate(q) * q).approx_eq(Quaternion::identity(), 1e-6));
}

#[test]
fn zero_angle_is_identity() {
    let axis = Vec3::new(-3.0, 1.0, 2.0).normalized();
    let q = make_rotate_axis_angle_quaternion(axis, 0.0);
    assert!(q.approx_eq(Quaternion::identity(), 1e-7));
}

#[test]
fn full_turn_is_identity_up_to_sign() {
    let axis = Vec3::new(0.0, 0.6, 0.8);
    let q = make_rotate_axis_angle_quaternion(axis, 2.0 * std::f32::consts::PI);

    assert!(q.same_rotation(Quaternion::identity(), 1e-6));
    assert!((q.w + 1.0).abs() < 1e-6);
}

#[test]
fn axis_angle_has_unit_norm() {
    let axis = Vec3::new(1.0, 0.4, -0.2).normalized();
    for angle in [-7.0, -1.0, 0.45, 3.0, 100.0] {
        let q = make_rotate_axis_angle_quaternion(axis, angle);
        assert!((q.norm() - 1.0).abs() < 1e-6);
    }
}

#[test]
fn quarter_turn_about_z_maps_x_to_y() {
    let q = make_rotate_axis_angle_quaternion(Vec3::unit_z(), std::f32::consts::FRAC_PI_2);
    let v = rotate_vector(Vec3::unit_x(), q);
    assert!(v.approx_eq(Vec3::unit_y(), 1e-6));
}

#[test]
fn rotation_preserves_length() {
    let axis = Vec3::new(0.3, -0.5, 0.8).normalized();
    let q = make_rotate_axis_angle_quaternion(axis, 1.3);
    let v = Vec3::new(2.1, -0.9, 1.3);

    assert!((rotate_vector(v, q).len() - v.len()).abs() < 1e-5);
}

#[test]
fn vector_along_axis_is_fixed() {
    let axis = Vec3::new(1.0, 1.0, 0.0).normalized();
    let q = make_rotate_axis_angle_quaternion(axis, 2.2);
    let v = axis * 3.0;
    assert!(rotate_vector(v, q).approx_eq(v, 1e-5));
}

#[test]
fn non_unit_quaternion_scales_silently() {
    let q = make_rotate_axis_angle_quaternion(Vec3::unit_z(), 0.3);
    let doubled = Quaternion::new(q.x * 2.0, q.y * 2.0, q.z * 2.0, q.w * 2.0);
    let v = Vec3::new(1.0, 0.0, 0.0);

    assert!((rotate_vector(v, doubled).len() - 4.0).abs() < 1e-5);
}
