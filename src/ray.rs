use crate::types::{Float, Vec3};

/// Half-line `origin + t * dir`. `dir` is not normalized and may even be zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }

    pub fn position_at(&self, t: Float) -> Vec3 {
        self.origin + self.dir * t
    }
}
