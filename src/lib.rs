//! Rotating a point by a unit quaternion, either directly with the sandwich
//! product or through the equivalent rotation matrix, and checking that both
//! give the same answer.
//!
//! All operations are total over `f32`. None of them normalize their inputs:
//! the rotation axis and the quaternion must be unit length for the results to
//! be pure rotations, and violating that produces no diagnostic.
pub mod vector;
pub mod quaternion;
pub mod matrix;
pub mod random;
pub mod report;
pub mod config;
pub mod error;

pub use crate::vector::Vec3;
pub use crate::quaternion::{
    Quaternion,
    multiply,
    conjugate,
    make_rotate_axis_angle_quaternion,
    rotate_vector,
};
pub use crate::matrix::{Mat4x4, make_rotate_matrix, transform};
