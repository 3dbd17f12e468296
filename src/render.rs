use std::time::Instant;

use rayon::iter::ParallelIterator;
use tracing::{debug, info, warn};

use crate::{
    camera::Camera,
    config::{Demo, RenderConfig},
    error::Error,
    image::ImageBuffer,
    shading::{sky, uv_gradient},
    types::{Color, Float},
};

/// Runs `shade_pixel(u, v)` for every pixel with `u = x / width` and
/// `v = y / height`, rows in parallel.
///
/// Every pixel is independent, so the result does not depend on scheduling.
/// A pixel whose shader fails is left zeroed and the rest of the image is
/// still rendered; the error of the first failing pixel in row-major order is
/// returned afterwards.
pub fn render<F>(image: &mut ImageBuffer, shade_pixel: F) -> Result<(), Error>
where
    F: Fn(Float, Float) -> Result<Color, Error> + Sync,
{
    let width = image.width() as Float;
    let height = image.height() as Float;
    let rows = image.height();
    let start = Instant::now();

    let results: Vec<Result<(), Error>> = image
        .par_scanlines_mut()
        .map(|mut line| {
            let y = line.y();
            let v = y as Float / height;
            let mut failed = None;
            for x in 0..line.width() {
                let u = x as Float / width;
                if let Err(err) = shade_pixel(u, v).and_then(|color| line.write(x, color)) {
                    warn!(x, y, %err, "failed to shade pixel");
                    failed.get_or_insert(err);
                }
            }
            debug!(y, percent = progress_percent(y, rows), "rendered scanline");
            failed.map_or(Ok(()), Err)
        })
        .collect();

    info!(width = image.width(), height = image.height(), elapsed = ?start.elapsed(), "render finished");
    results.into_iter().collect()
}

/// Share of the image done once row `y` is finished, 100 at the last row.
fn progress_percent(y: usize, rows: usize) -> Float {
    100.0 * y as Float / rows.saturating_sub(1).max(1) as Float
}

pub fn render_sky(image: &mut ImageBuffer, camera: &Camera) -> Result<(), Error> {
    render(image, |u, v| Ok(sky(&camera.ray(u, v))))
}

pub fn render_uv_gradient(image: &mut ImageBuffer) -> Result<(), Error> {
    render(image, |u, v| Ok(uv_gradient(u, v)))
}

/// Allocates the target described by `config` and renders the selected demo into it.
pub fn generate_image(config: &RenderConfig) -> Result<ImageBuffer, Error> {
    let mut image = ImageBuffer::new(config.width, config.height)?;
    info!(width = config.width, height = config.height, demo = %config.demo, "rendering");
    match config.demo {
        Demo::Sky => {
            let camera = config.camera.build(image.width(), image.height())?;
            debug!(?camera, "camera ready");
            render_sky(&mut image, &camera)?;
        }
        Demo::UvGradient => render_uv_gradient(&mut image)?,
    }
    Ok(image)
}

#[cfg(test)]
mod test {
    use cgmath::{num_traits::zero, vec3};

    use crate::{
        camera::Camera,
        config::{CameraSettings, Demo, RenderConfig},
        error::Error,
        image::{quantize, ImageBuffer},
        shading::sky,
        types::Float,
    };

    use super::{generate_image, progress_percent, render, render_sky, render_uv_gradient};

    #[test]
    fn parallel_matches_sequential() {
        let camera = Camera::look_at(vec3(-1.0, 2.0, 3.0), vec3(0.0, 0.0, -1.0), vec3(0.0, 1.0, 0.0), 60.0, 2.0).unwrap();
        let mut parallel = ImageBuffer::new(64, 32).unwrap();
        render_sky(&mut parallel, &camera).unwrap();

        let mut sequential = ImageBuffer::new(64, 32).unwrap();
        for y in 0..32 {
            for x in 0..64 {
                let u = x as Float / 64.0;
                let v = y as Float / 32.0;
                let c = sky(&camera.ray(u, v));
                sequential.write(x, y, c.x, c.y, c.z).unwrap();
            }
        }
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn default_camera_sky() {
        let mut img = ImageBuffer::new(200, 100).unwrap();
        render_sky(&mut img, &Camera::default()).unwrap();

        // first row looks down and is the whitest, blue channel is always 1
        let bottom = img.pixel(100, 0).unwrap();
        let top = img.pixel(100, 99).unwrap();
        assert_eq!(bottom[2], 255);
        assert_eq!(top[2], 255);
        assert!(bottom[0] > top[0]);
        assert!(bottom[1] > top[1]);
    }

    #[test]
    fn uv_gradient_pixels() {
        let mut img = ImageBuffer::new(200, 100).unwrap();
        render_uv_gradient(&mut img).unwrap();
        assert_eq!(img.pixel(0, 0), Ok([0, 0, 127]));
        assert_eq!(img.pixel(100, 50), Ok([127, 127, 127]));
        assert_eq!(img.pixel(199, 99), Ok([254, 253, 127]));
    }

    #[test]
    fn zero_direction_pixel_is_background() {
        // center pixel of a 200x100 image maps to a zero direction
        let camera = Camera::from_basis(zero(), vec3(4.0, 0.0, 0.0), vec3(0.0, 2.0, 0.0), vec3(-2.0, -1.0, 0.0));
        assert_eq!(camera.ray(0.5, 0.5).dir, zero());

        let mut img = ImageBuffer::new(200, 100).unwrap();
        assert_eq!(render_sky(&mut img, &camera), Ok(()));

        let horizon = sky(&camera.ray(0.5, 0.5));
        assert_eq!(img.pixel(100, 50), Ok([quantize(horizon.x), quantize(horizon.y), quantize(horizon.z)]));
        for y in 0..100 {
            for x in 0..200 {
                assert_eq!(img.pixel(x, y).unwrap()[2], 255);
            }
        }
    }

    #[test]
    fn pixel_error_keeps_rendering() {
        let mut img = ImageBuffer::new(4, 4).unwrap();
        let result = render(&mut img, |u, v| {
            if u == 0.5 && v >= 0.5 {
                Err(Error::DegenerateVector)
            } else {
                Ok(vec3(1.0, 1.0, 1.0))
            }
        });
        assert_eq!(result, Err(Error::DegenerateVector));
        assert_eq!(img.pixel(2, 2), Ok([0, 0, 0]));
        assert_eq!(img.pixel(2, 3), Ok([0, 0, 0]));
        assert_eq!(img.pixel(3, 3), Ok([255, 255, 255]));
        assert_eq!(img.pixel(0, 0), Ok([255, 255, 255]));
    }

    #[test]
    fn progress() {
        assert_eq!(progress_percent(0, 100), 0.0);
        assert_eq!(progress_percent(99, 100), 100.0);
        assert_eq!(progress_percent(0, 1), 0.0);
        assert_eq!(progress_percent(1, 3), 50.0);
    }

    #[test]
    fn shader_sees_normalized_coordinates() {
        let mut img = ImageBuffer::new(4, 2).unwrap();
        render(&mut img, |u, v| {
            assert!((0.0..1.0).contains(&u));
            assert!((0.0..1.0).contains(&v));
            Ok(vec3(u, v, 0.0))
        })
        .unwrap();
        assert_eq!(img.pixel(3, 1), Ok([191, 127, 0]));
    }

    #[test]
    fn generate_from_config() {
        let config = RenderConfig { width: 20, height: 10, ..RenderConfig::default() };
        let image = generate_image(&config).unwrap();

        let mut expected = ImageBuffer::new(20, 10).unwrap();
        render_sky(&mut expected, &Camera::default()).unwrap();
        assert_eq!(image, expected);

        let gradient = RenderConfig { demo: Demo::UvGradient, ..config };
        assert_eq!(generate_image(&gradient).unwrap().pixel(0, 0), Ok([0, 0, 127]));
    }

    #[test]
    fn generate_rejects_bad_config() {
        let config = RenderConfig { width: 0, ..RenderConfig::default() };
        assert_eq!(generate_image(&config), Err(Error::InvalidDimensions { width: 0, height: 100 }));

        let camera = CameraSettings::LookAt {
            lookfrom: [0.0, 0.0, 0.0],
            lookat: [0.0, 0.0, 0.0],
            vup: [0.0, 1.0, 0.0],
            vfov: 90.0,
            aspect: None,
        };
        let config = RenderConfig { camera, ..RenderConfig::default() };
        assert_eq!(generate_image(&config), Err(Error::DegenerateVector));
    }
}
