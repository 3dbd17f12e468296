use std::io::{self, Write};

use crate::image::ImageView;

/// Binary (P6) PPM. Bytes are written as stored, row 0 first.
pub fn write_ppm<W: Write>(image: ImageView<'_>, mut out: W) -> io::Result<()> {
    out.write_all(b"P6\n")?;
    out.write_fmt(format_args!("{} {}\n", image.width, image.height))?;
    out.write_all(b"255\n")?;
    out.write_all(image.bytes)?;
    out.flush()
}

#[cfg(test)]
mod test {
    use crate::image::ImageBuffer;

    use super::write_ppm;

    #[test]
    fn header_and_pixels() {
        let mut img = ImageBuffer::new(2, 1).unwrap();
        img.write(1, 0, 0.0, 1.0, 0.5).unwrap();

        let mut out = Vec::new();
        write_ppm(img.view(), &mut out).unwrap();
        assert_eq!(out, b"P6\n2 1\n255\n\x00\x00\x00\x00\xff\x7f".to_vec());
    }
}
