use cgmath::{num_traits::zero, vec3};

use crate::{
    ray::Ray,
    types::{Color, Float, SKY_BLUE, WHITE},
    vector::{lerp, normalize},
};

/// Background gradient: white looking straight down, sky blue straight up.
/// Only the direction of the ray matters.
///
/// A ray without a direction is a miss like any other and gets the horizon
/// color, halfway between the two.
pub fn sky(ray: &Ray) -> Color {
    let d = normalize(ray.dir).unwrap_or_else(|_| zero());
    let t = 0.5 * (d.y + 1.0);
    lerp(t, WHITE, SKY_BLUE)
}

/// Flat red/green ramp over the image plane, no camera involved.
pub fn uv_gradient(u: Float, v: Float) -> Color {
    vec3(u, v, 0.5)
}
