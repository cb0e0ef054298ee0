use std::ops::Range;
use std::f32::consts::PI;

use crate::vector::Vec3;
use crate::quaternion::Quaternion;

/// 2^24, one more than the largest integer held exactly in an f32 mantissa.
const F32_MANTISSA: f32 = (1u32 << f32::MANTISSA_DIGITS) as f32;

/// Top 24 bits of `bits` as a float in [0, 1). Never rounds up to 1.
fn unit_interval(bits: u64) -> f32 {
    (bits >> (64 - f32::MANTISSA_DIGITS)) as f32 / F32_MANTISSA
}


/// Xorshift generator for sampling rotations. Deterministic for a given seed.
pub struct Randf32 {
    state: u64,
}
impl Randf32 {
    pub fn new() -> Self {
        Self {
            state: 555555555,
        }
    }
    /// A zero state would stay zero forever, so it is replaced by the default.
    pub fn seed(seed: u64) -> Self {
        if seed == 0 {
            return Self::new();
        }
        Self {
            state: seed,
        }
    }
    pub fn next(&mut self) -> f32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        unit_interval(self.state)
    }
    /// The scaled value can still round onto `range.end`; that case falls back to the start.
    pub fn next_in(&mut self, range: Range<f32>) -> f32 {
        let f = (range.end - range.start) * self.next() + range.start;
        if f < range.end { f } else { range.start }
    }
    pub fn vec3_in(&mut self, range: Range<f32>) -> Vec3 {
        Vec3::new(
            self.next_in(range.clone()),
            self.next_in(range.clone()),
            self.next_in(range),
        )
    }
    pub fn unit_vec3(&mut self) -> Vec3 {
        loop {
            let vec = self.vec3_in(-1.0..1.0);
            let len_sq = vec.len_sq();
            if len_sq <= 1.0 && len_sq > 1e-4 {
                return vec.normalized();
            }
        }
    }
    pub fn angle(&mut self) -> f32 {
        self.next_in(-2.0 * PI..2.0 * PI)
    }
    pub fn unit_quaternion(&mut self) -> Quaternion {
        let axis = self.unit_vec3();
        let angle = self.angle();
        Quaternion::from_axis_angle(axis, angle)
    }
}


#[test]
fn same_seed_same_sequence() {
    let mut a = Randf32::seed(42);
    let mut b = Randf32::seed(42);
    for _ in 0..16 {
        assert!(a.next() == b.next());
    }
}

#[test]
fn next_in_stays_in_range() {
    let mut rand = Randf32::seed(7);
    for _ in 0..1000 {
        let f = rand.next_in(-3.0..5.0);
        assert!((-3.0..5.0).contains(&f));
    }
}

#[test]
fn unit_interval_excludes_one() {
    assert!(unit_interval(u64::MAX) < 1.0);
    assert!(unit_interval(0) == 0.0);
}

#[test]
fn next_in_excludes_end_of_narrow_range() {
    let mut rand = Randf32::seed(11);
    let range = 1.0..1.0000001;
    for _ in 0..1000 {
        let f = rand.next_in(range.clone());
        assert!(range.contains(&f));
    }
}

#[test]
fn zero_seed_still_produces_values() {
    let mut rand = Randf32::seed(0);
    assert!(rand.next() != rand.next());
}

#[test]
fn sampled_quaternions_are_unit() {
    let mut rand = Randf32::new();
    for _ in 0..100 {
        assert!((rand.unit_quaternion().norm() - 1.0).abs() < 1e-5);
    }
}
