//! One ray per pixel through a pinhole camera, shaded with a sky gradient.

pub mod camera;
pub mod config;
pub mod error;
pub mod image;
pub mod ppm;
pub mod ray;
pub mod render;
pub mod shading;
pub mod types;
pub mod vector;

pub use error::Error;
