use std::fmt;

use log::{debug, warn};

use crate::matrix::{Mat4x4, make_rotate_matrix, transform};
use crate::quaternion::{Quaternion, make_rotate_axis_angle_quaternion, rotate_vector};
use crate::random::Randf32;
use crate::vector::Vec3;

/// Width of one printed column, in characters.
const COLUMN_WIDTH: usize = 7;

/// Largest componentwise difference between two vectors.
fn max_abs_diff(a: Vec3, b: Vec3) -> f32 {
    let d = a - b;
    d.x.abs().max(d.y.abs()).max(d.z.abs())
}

/// Absolute tolerance scaled up for points far from the origin.
fn scaled_tolerance(tolerance: f32, point: Vec3) -> f32 {
    tolerance * point.len().max(1.0)
}

/// One point rotated both ways by the same quaternion.
#[derive(Clone, Copy, Debug)]
pub struct Report {
    pub rotation: Quaternion,
    pub matrix: Mat4x4,
    pub point: Vec3,
    pub by_quaternion: Vec3,
    pub by_matrix: Vec3,
}
impl Report {
    /// `axis` must be unit length.
    pub fn new(axis: Vec3, angle: f32, point: Vec3) -> Self {
        let rotation = make_rotate_axis_angle_quaternion(axis, angle);
        Self::from_rotation(rotation, point)
    }

    pub fn from_rotation(rotation: Quaternion, point: Vec3) -> Self {
        let matrix = make_rotate_matrix(rotation);
        let by_quaternion = rotate_vector(point, rotation);
        let by_matrix = transform(point, matrix);

        Self {
            rotation,
            matrix,
            point,
            by_quaternion,
            by_matrix,
        }
    }

    pub fn deviation(&self) -> f32 {
        max_abs_diff(self.by_quaternion, self.by_matrix)
    }

    pub fn agrees(&self, tolerance: f32) -> bool {
        self.deviation() <= scaled_tolerance(tolerance, self.point)
    }

    /// Both paths scale by `|q|^2` alike, so a non-unit rotation only shows up
    /// in the norm. Logs a warning for it.
    #[must_use]
    pub fn check(&self, tolerance: f32) -> bool {
        let norm = self.rotation.norm();
        debug!("deviation between paths: {:e}", self.deviation());
        if (norm - 1.0).abs() > tolerance {
            warn!("rotation is not unit length: |q| = {norm}");
            return false;
        }
        true
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, values: &[f32], label: &str) -> fmt::Result {
    for v in values {
        write!(f, "{:<width$}", format!("{v:.2}"), width = COLUMN_WIDTH)?;
    }
    write!(f, ": {label}")
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let q = self.rotation;
        let a = self.by_quaternion;
        let b = self.by_matrix;

        write_row(f, &[q.x, q.y, q.z, q.w], "rotation")?;
        writeln!(f)?;
        writeln!(f, "rotateMatrix")?;
        writeln!(f, "{}", self.matrix)?;
        write_row(f, &[a.x, a.y, a.z], "rotateByQuaternion")?;
        writeln!(f)?;
        write_row(f, &[b.x, b.y, b.z], "rotateByMatrix")
    }
}


/// Outcome of rotating random points by random rotations both ways.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Sweep {
    pub samples: usize,
    pub failures: usize,
    pub max_deviation: f32,
    /// Largest change in length caused by the quaternion path.
    pub max_length_error: f32,
}
impl Sweep {
    pub fn run(rand: &mut Randf32, samples: usize, tolerance: f32) -> Self {
        let mut sweep = Sweep { samples, ..Default::default() };

        for i in 0..samples {
            let rotation = rand.unit_quaternion();
            let point = rand.vec3_in(-10.0..10.0);
            let report = Report::from_rotation(rotation, point);

            let deviation = report.deviation();
            let length_error = (report.by_quaternion.len() - point.len()).abs();
            if !report.agrees(tolerance) {
                sweep.failures += 1;
                warn!("sample {i}: paths differ by {deviation:e} for q = {rotation}, p = {point}");
            }
            sweep.max_deviation = sweep.max_deviation.max(deviation);
            sweep.max_length_error = sweep.max_length_error.max(length_error);
        }
        sweep
    }

    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}
impl fmt::Display for Sweep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} samples, {} failures, max deviation {:e}, max length error {:e}",
            self.samples,
            self.failures,
            self.max_deviation,
            self.max_length_error,
        )
    }
}


#[test]
fn default_scenario_agrees() {
    let axis = Vec3::new(1.0, 0.4, -0.2).normalized();
    let report = Report::new(axis, 0.45, Vec3::new(2.1, -0.9, 1.3));

    assert!((report.rotation.norm() - 1.0).abs() < 1e-6);
    assert!(report.by_quaternion.approx_eq(report.by_matrix, 1e-5));
    assert!(report.agrees(1e-5));
    assert!(report.check(1e-5));
}

#[test]
fn report_layout() {
    let report = Report::new(Vec3::unit_z(), 0.0, Vec3::new(1.0, -2.0, 0.5));
    let text = report.to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines.len() == 8);
    assert!(lines[0] == "0.00   0.00   0.00   1.00   : rotation");
    assert!(lines[1] == "rotateMatrix");
    assert!(lines[2] == " 1.000  0.000  0.000  0.000");
    assert!(lines[6] == "1.00   -2.00  0.50   : rotateByQuaternion");
    assert!(lines[7] == "1.00   -2.00  0.50   : rotateByMatrix");
}

#[test]
fn default_scenario_text() {
    let axis = Vec3::new(1.0, 0.4, -0.2).normalized();
    let text = Report::new(axis, 0.45, Vec3::new(2.1, -0.9, 1.3)).to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0] == "0.20   0.08   -0.04  0.97   : rotation");
    assert!(lines[2] == " 0.983 -0.046 -0.175  0.000");
    assert!(lines[6] == "2.15   -1.44  0.46   : rotateByQuaternion");
    assert!(lines[7] == "2.15   -1.44  0.46   : rotateByMatrix");
}

#[test]
fn non_unit_rotation_scales_both_paths() {
    let point = Vec3::new(1.0, 1.0, 1.0);
    let report = Report::from_rotation(Quaternion::new(0.3, 0.0, 0.0, 2.0), point);

    assert!(report.agrees(1e-5));
    assert!((report.by_quaternion.len() - 4.09 * point.len()).abs() < 1e-4);
    assert!(!report.check(1e-5));
}

#[test]
fn scaling_axis_fails_the_norm_check() {
    // An axis that is not unit length gives a quaternion that scales.
    let report = Report::new(Vec3::new(2.0, 0.0, 0.0), 1.0, Vec3::new(0.0, 1.0, 0.0));

    assert!(report.agrees(1e-5));
    assert!(!report.check(1e-5));
}

#[test]
fn sweep_finds_no_disagreement() {
    let mut rand = Randf32::seed(2024);
    let sweep = Sweep::run(&mut rand, 500, 1e-5);

    assert!(sweep.samples == 500);
    assert!(sweep.passed(), "{sweep}");
    assert!(sweep.max_length_error < 1e-3);
}
