use std::ops::Mul;
use std::fmt;

use crate::vector::Vec3;
use crate::quaternion::Quaternion;

/// 4 x 4 matrix stored row-major as `m[row][col]`.
///
/// Vectors are row vectors multiplied from the left, so `v * (a * b)` applies
/// `a` first and then `b`.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Mat4x4 {
    pub m: [[f32; 4]; 4],
}
impl Mat4x4 {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        r0c0: f32, r0c1: f32, r0c2: f32, r0c3: f32,
        r1c0: f32, r1c1: f32, r1c2: f32, r1c3: f32,
        r2c0: f32, r2c1: f32, r2c2: f32, r2c3: f32,
        r3c0: f32, r3c1: f32, r3c2: f32, r3c3: f32,
    ) -> Self {
        Self {
            m: [
                [r0c0, r0c1, r0c2, r0c3],
                [r1c0, r1c1, r1c2, r1c3],
                [r2c0, r2c1, r2c2, r2c3],
                [r3c0, r3c1, r3c2, r3c3],
            ]
        }
    }

    pub fn identity() -> Self {
        Self::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0
        )
    }

    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[i][0], self.m[i][1], self.m[i][2])
    }

    pub fn col(&self, j: usize) -> Vec3 {
        Vec3::new(self.m[0][j], self.m[1][j], self.m[2][j])
    }

    pub fn approx_eq(&self, other: &Mat4x4, eps: f32) -> bool {
        self.m.iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl From<[[f32; 4]; 4]> for Mat4x4 {
    fn from(m: [[f32; 4]; 4]) -> Mat4x4 {
        Self { m }
    }
}

impl From<Quaternion> for Mat4x4 {
    /// Convert the quaternion to a 4 x 4 rotation matrix for row vectors.
    ///
    /// Row `i` is the image of basis vector `i` under the sandwich product.
    /// A non-unit quaternion bakes its squared norm in as a uniform scale.
    fn from(q: Quaternion) -> Mat4x4 {
        let (ww, xx, yy, zz) = (q.w * q.w, q.x * q.x, q.y * q.y, q.z * q.z);

        let xy = q.x * q.y;
        let xz = q.x * q.z;
        let yz = q.y * q.z;

        let wx = q.w * q.x;
        let wy = q.w * q.y;
        let wz = q.w * q.z;

        Mat4x4::new(
            ww + xx - yy - zz, 2.0 * (xy + wz),   2.0 * (xz - wy),   0.0,
            2.0 * (xy - wz),   ww - xx + yy - zz, 2.0 * (yz + wx),   0.0,
            2.0 * (xz + wy),   2.0 * (yz - wx),   ww - xx - yy + zz, 0.0,
            0.0,               0.0,               0.0,               1.0,
        )
    }
}

impl Mul for Mat4x4 {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * other.m[k][j]).sum();
            }
        }
        Mat4x4 { m }
    }
}

impl Mul<Mat4x4> for Vec3 {
    type Output = Vec3;

    /// Linear part only, the translation row is ignored.
    fn mul(self, other: Mat4x4) -> Self::Output {
        let m = &other.m;
        Vec3::new(
            self.x * m[0][0] + self.y * m[1][0] + self.z * m[2][0],
            self.x * m[0][1] + self.y * m[1][1] + self.z * m[2][1],
            self.x * m[0][2] + self.y * m[1][2] + self.z * m[2][2],
        )
    }
}

impl fmt::Display for Mat4x4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.m.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{cell:6.3}")?;
            }
        }
        Ok(())
    }
}

/// Rotation matrix equivalent to [`rotate_vector`](crate::quaternion::rotate_vector)
/// with `q`, for use with [`transform`]. `q` should be unit length.
pub fn make_rotate_matrix(q: Quaternion) -> Mat4x4 {
    Mat4x4::from(q)
}

/// Row vector `vec` times the upper-left 3 x 3 block of `mat`.
pub fn transform(vec: Vec3, mat: Mat4x4) -> Vec3 {
    vec * mat
}


#[test]
fn mat_multiply() {
    let a = Mat4x4::new(
        1.0, 2.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 1.0, 0.0,
        0.0, 0.0, 0.0, 1.0
    );
    let b = Mat4x4::new(
        1.0, 0.0, 0.0, 0.0,
        3.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 2.0, 0.0,
        0.0, 0.0, 0.0, 1.0
    );

    assert!(a * b == Mat4x4::new(
        7.0, 2.0, 0.0, 0.0,
        3.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 2.0, 0.0,
        0.0, 0.0, 0.0, 1.0
    ));
    assert!(a * Mat4x4::identity() == a);
}

#[test]
fn transform_uses_rows_of_matrix() {
    let mat = Mat4x4::from([
        [1.0, 2.0, 3.0, 9.0],
        [4.0, 5.0, 6.0, 9.0],
        [7.0, 8.0, 9.0, 9.0],
        [9.0, 9.0, 9.0, 9.0],
    ]);
    // Translation row and column don't take part.
    assert!(transform(Vec3::new(1.0, 0.0, 0.0), mat) == Vec3::new(1.0, 2.0, 3.0));
    assert!(transform(Vec3::new(1.0, 1.0, 1.0), mat) == Vec3::new(12.0, 15.0, 18.0));
    assert!(transform(Vec3::new(10.0, 11.0, 12.0), mat) == Vec3::new(138.0, 171.0, 204.0));
}

#[test]
fn identity_quaternion_gives_identity_matrix() {
    assert!(make_rotate_matrix(Quaternion::identity()) == Mat4x4::identity());
}

#[test]
fn rotation_matrix_keeps_affine_frame() {
    let q = Quaternion::from_axis_angle(Vec3::new(1.0, 0.4, -0.2).normalized(), 0.45);
    let m = make_rotate_matrix(q);

    assert!(m.m[3] == [0.0, 0.0, 0.0, 1.0]);
    assert!(m.m[0][3] == 0.0 && m.m[1][3] == 0.0 && m.m[2][3] == 0.0);
}

#[test]
fn rows_are_rotated_basis_vectors() {
    let q = Quaternion::from_axis_angle(Vec3::new(-0.3, 0.9, 0.2).normalized(), 1.1);
    let m = make_rotate_matrix(q);

    assert!(m.row(0).approx_eq(q.rotate(Vec3::unit_x()), 1e-6));
    assert!(m.row(1).approx_eq(q.rotate(Vec3::unit_y()), 1e-6));
    assert!(m.row(2).approx_eq(q.rotate(Vec3::unit_z()), 1e-6));
}

#[test]
fn rotation_block_is_orthonormal() {
    let q = Quaternion::from_axis_angle(Vec3::new(2.0, -1.0, 0.5).normalized(), -2.4);
    let m = make_rotate_matrix(q);

    for i in 0..3 {
        assert!((m.row(i).len() - 1.0).abs() < 1e-6);
        assert!((m.col(i).len() - 1.0).abs() < 1e-6);
        for j in (i + 1)..3 {
            assert!(m.row(i).dot(m.row(j)).abs() < 1e-6);
        }
    }
    // Right handed, no reflection.
    assert!(m.row(0).cross(m.row(1)).approx_eq(m.row(2), 1e-6));
}

#[test]
fn quarter_turn_about_z_matrix() {
    let q = Quaternion::from_axis_angle(Vec3::unit_z(), std::f32::consts::FRAC_PI_2);
    let m = make_rotate_matrix(q);
    let expected = Mat4x4::new(
         0.0, 1.0, 0.0, 0.0,
        -1.0, 0.0, 0.0, 0.0,
         0.0, 0.0, 1.0, 0.0,
         0.0, 0.0, 0.0, 1.0
    );
    assert!(m.approx_eq(&expected, 1e-6));
}

#[test]
fn matrix_display_uses_fixed_columns() {
    let text = Mat4x4::identity().to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines.len() == 4);
    assert!(lines[0] == " 1.000  0.000  0.000  0.000");
    assert!(lines[3] == " 0.000  0.000  0.000  1.000");
}
