use rayon::{iter::{IndexedParallelIterator, ParallelIterator}, slice::ParallelSliceMut};

use crate::{error::Error, types::{Color, Float}};

/// Bytes per pixel, RGB.
pub const CHANNELS: usize = 3;

/// Deliberately not 255 or 256: `floor(c * 255.99)` maps 1.0 to 255 while
/// keeping the reference's rounding bias, so output matches it pixel for pixel.
pub const QUANTIZE_SCALE: Float = 255.99;

/// Dense row-major RGB8 render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: usize,
    height: usize,
    bytes: Vec<u8>,
}

/// Read-only handoff to an encoder.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub bytes: &'a [u8],
}

/// One mutable row of an [`ImageBuffer`], rows never overlap.
#[derive(Debug)]
pub struct Scanline<'a> {
    y: usize,
    height: usize,
    bytes: &'a mut [u8],
}

impl ImageBuffer {
    pub fn new(width: i32, height: i32) -> Result<Self, Error> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let invalid = Error::InvalidDimensions { width, height };
        let (width, height) = (width as usize, height as usize);
        let len = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(invalid)?;
        Ok(Self { width, height, bytes: vec![0; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn write(&mut self, x: usize, y: usize, r: Float, g: Float, b: Float) -> Result<(), Error> {
        let index = self.index(x, y)?;
        store(&mut self.bytes[index..index + CHANNELS], r, g, b);
        Ok(())
    }

    pub fn pixel(&self, x: usize, y: usize) -> Result<[u8; CHANNELS], Error> {
        let index = self.index(x, y)?;
        Ok([self.bytes[index], self.bytes[index + 1], self.bytes[index + 2]])
    }

    pub fn view(&self) -> ImageView<'_> {
        ImageView { width: self.width, height: self.height, bytes: &self.bytes }
    }

    pub fn par_scanlines_mut(&mut self) -> impl IndexedParallelIterator<Item = Scanline<'_>> + '_ {
        let height = self.height;
        self.bytes
            .par_chunks_mut(self.width * CHANNELS)
            .enumerate()
            .map(move |(y, bytes)| Scanline { y, height, bytes })
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, Error> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok((y * self.width + x) * CHANNELS)
    }
}

impl Scanline<'_> {
    pub fn y(&self) -> usize {
        self.y
    }

    pub fn width(&self) -> usize {
        self.bytes.len() / CHANNELS
    }

    pub fn write(&mut self, x: usize, color: Color) -> Result<(), Error> {
        let width = self.width();
        if x >= width {
            return Err(Error::OutOfBounds { x, y: self.y, width, height: self.height });
        }
        let index = x * CHANNELS;
        store(&mut self.bytes[index..index + CHANNELS], color.x, color.y, color.z);
        Ok(())
    }
}

/// Float to byte cast saturates, so values outside `[0, 1]` clamp and NaN
/// becomes 0.
pub fn quantize(channel: Float) -> u8 {
    (channel * QUANTIZE_SCALE) as u8
}

fn store(pixel: &mut [u8], r: Float, g: Float, b: Float) {
    pixel[0] = quantize(r);
    pixel[1] = quantize(g);
    pixel[2] = quantize(b);
}
