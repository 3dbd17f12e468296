#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("image dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    #[error("pixel ({x}, {y}) is outside of the {width}x{height} image")]
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,
}
