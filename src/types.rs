use cgmath::Vector3;

// Single precision keeps quantized output identical to the float-based reference.
pub type Float = f32;
pub type Vec3 = Vector3<Float>;
pub type Color = Vector3<Float>;

pub const WHITE: Color = Vector3 { x: 1.0, y: 1.0, z: 1.0 };
pub const SKY_BLUE: Color = Vector3 { x: 0.5, y: 0.7, z: 1.0 };
