//! Vector helpers on top of `cgmath`.
//!
//! Addition, scaling, `dot` and `cross` are the `cgmath` operators. What lives
//! here are the operations whose behaviour has to be pinned down exactly:
//! normalization of a zero-length vector is an error in every build profile,
//! and `lerp` blends with `a * (1 - t) + b * t` so both end points are exact.

use cgmath::InnerSpace;

use crate::{error::Error, types::{Float, Vec3}};

pub fn length(v: Vec3) -> Float {
    v.dot(v).sqrt()
}

pub fn normalize(v: Vec3) -> Result<Vec3, Error> {
    let len = length(v);
    if len == 0.0 || !len.is_finite() {
        return Err(Error::DegenerateVector);
    }
    Ok(v / len)
}

/// Not clamped, `t` outside `[0, 1]` extrapolates.
pub fn lerp(t: Float, a: Vec3, b: Vec3) -> Vec3 {
    a * (1.0 - t) + b * t
}
