use cgmath::{InnerSpace, Rad, Rotation3};

use quatrot::random::Randf32;
use quatrot::{
    Mat4x4, Quaternion, Vec3,
    conjugate, make_rotate_axis_angle_quaternion, make_rotate_matrix, multiply,
    rotate_vector, transform,
};

fn to_cgmath(q: Quaternion) -> cgmath::Quaternion<f32> {
    cgmath::Quaternion::new(q.w, q.x, q.y, q.z)
}

fn vec3(v: cgmath::Vector3<f32>) -> Vec3 {
    Vec3::new(v.x, v.y, v.z)
}

#[test]
fn scenario_paths_agree() {
    let axis = Vec3::new(1.0, 0.4, -0.2).normalized();
    let q = make_rotate_axis_angle_quaternion(axis, 0.45);
    let point = Vec3::new(2.1, -0.9, 1.3);

    let m = make_rotate_matrix(q);
    let by_quaternion = rotate_vector(point, q);
    let by_matrix = transform(point, m);

    assert!((q.norm() - 1.0).abs() < 1e-6);
    assert!(by_quaternion.approx_eq(by_matrix, 1e-5));
    assert!((by_quaternion.len() - point.len()).abs() < 1e-5);
    assert!(!by_quaternion.approx_eq(point, 0.1));
}

#[test]
fn random_rotations_agree() {
    let mut rand = Randf32::seed(31337);
    for _ in 0..200 {
        let q = rand.unit_quaternion();
        let v = rand.vec3_in(-3.0..3.0);

        let a = rotate_vector(v, q);
        let b = transform(v, make_rotate_matrix(q));
        assert!(a.approx_eq(b, 1e-5), "{a} != {b} for {q}");
        assert!((a.len() - v.len()).abs() < 1e-5);
        assert!((multiply(q, conjugate(q))).approx_eq(Quaternion::identity(), 1e-5));
    }
}

#[test]
fn composing_quaternions_matches_composing_matrices() {
    let a = make_rotate_axis_angle_quaternion(Vec3::new(1.0, 2.0, 3.0).normalized(), 0.9);
    let b = make_rotate_axis_angle_quaternion(Vec3::new(-2.0, 0.5, 1.0).normalized(), -1.7);
    let v = Vec3::new(0.7, -1.2, 2.5);

    // a * b rotates by b first, which is b's matrix first for row vectors.
    let ab = make_rotate_matrix(a * b);
    assert!(ab.approx_eq(&(make_rotate_matrix(b) * make_rotate_matrix(a)), 1e-5));
    assert!(!ab.approx_eq(&(make_rotate_matrix(a) * make_rotate_matrix(b)), 1e-3));

    let stepwise = rotate_vector(rotate_vector(v, b), a);
    assert!(rotate_vector(v, a * b).approx_eq(stepwise, 1e-5));
    assert!(transform(v, ab).approx_eq(stepwise, 1e-5));
}

#[test]
fn matches_cgmath_quaternion() {
    let mut rand = Randf32::seed(99);
    for _ in 0..50 {
        let axis = rand.unit_vec3();
        let angle = rand.angle();
        let v = rand.vec3_in(-5.0..5.0);

        let ours = make_rotate_axis_angle_quaternion(axis, angle);
        let theirs = cgmath::Quaternion::from_axis_angle(
            cgmath::Vector3::new(axis.x, axis.y, axis.z).normalize(),
            Rad(angle),
        );
        assert!((to_cgmath(ours) - theirs).magnitude() < 1e-5);

        let rotated = theirs * cgmath::Vector3::new(v.x, v.y, v.z);
        assert!(rotate_vector(v, ours).approx_eq(vec3(rotated), 1e-4));
    }
}

#[test]
fn rows_match_cgmath_columns() {
    let q = make_rotate_axis_angle_quaternion(Vec3::new(0.2, -0.7, 0.4).normalized(), 2.3);
    let ours = make_rotate_matrix(q);
    let theirs = cgmath::Matrix3::from(to_cgmath(q));

    // cgmath multiplies column vectors from the right, so its columns are our rows.
    assert!(ours.row(0).approx_eq(vec3(theirs.x), 1e-6));
    assert!(ours.row(1).approx_eq(vec3(theirs.y), 1e-6));
    assert!(ours.row(2).approx_eq(vec3(theirs.z), 1e-6));
}

#[test]
fn inverse_rotation_undoes_rotation() {
    let q = make_rotate_axis_angle_quaternion(Vec3::unit_y(), 1.0);
    let v = Vec3::new(3.0, 1.0, -2.0);

    assert!(rotate_vector(rotate_vector(v, q), conjugate(q)).approx_eq(v, 1e-5));
    let back = make_rotate_matrix(q) * make_rotate_matrix(conjugate(q));
    assert!(back.approx_eq(&Mat4x4::identity(), 1e-6));
}
