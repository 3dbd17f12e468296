use cgmath::{num_traits::zero, vec3, Deg, Rad};

use crate::{error::Error, ray::Ray, types::{Float, Vec3}, vector::normalize};

/// Pinhole camera. Image plane coordinates `(u, v)` sweep from `lower_left`
/// along `horizontal` and `vertical`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    lower_left: Vec3,
}

impl Camera {
    pub fn from_basis(origin: Vec3, horizontal: Vec3, vertical: Vec3, lower_left: Vec3) -> Self {
        Self { origin, horizontal, vertical, lower_left }
    }

    /// Camera at `lookfrom` looking towards `lookat`, `vfov` is the vertical
    /// field of view in degrees.
    ///
    /// Fails with [`Error::DegenerateVector`] when `lookfrom == lookat` or
    /// `vup` is parallel to the view direction.
    pub fn look_at(lookfrom: Vec3, lookat: Vec3, vup: Vec3, vfov: Float, aspect: Float) -> Result<Self, Error> {
        let half_height = (Rad::from(Deg(vfov)).0 / 2.0).tan();
        let half_width = aspect * half_height;

        let w = normalize(lookfrom - lookat)?;
        let u = normalize(vup.cross(w))?;
        let v = w.cross(u);

        Ok(Self {
            origin: lookfrom,
            horizontal: 2.0 * half_width * u,
            vertical: 2.0 * half_height * v,
            lower_left: lookfrom - half_width * u - half_height * v - w,
        })
    }

    pub fn ray(&self, u: Float, v: Float) -> Ray {
        Ray {
            origin: self.origin,
            dir: self.lower_left + self.horizontal * u + self.vertical * v - self.origin,
        }
    }
}

impl Default for Camera {
    /// 4x2 image plane one unit in front of the origin.
    fn default() -> Self {
        Self::from_basis(zero(), vec3(4.0, 0.0, 0.0), vec3(0.0, 2.0, 0.0), vec3(-2.0, -1.0, -1.0))
    }
}
