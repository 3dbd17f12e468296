use std::{fmt, io::Read, path::PathBuf, str::FromStr};

use serde::Deserialize;
use structopt::StructOpt;

use crate::{camera::Camera, error::Error, types::Float};

/// Which image to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Demo {
    /// Camera rays shaded with the sky gradient.
    #[default]
    Sky,
    /// `(u, v, 0.5)` per pixel, no camera.
    UvGradient,
}

impl FromStr for Demo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sky" => Ok(Demo::Sky),
            "uv-gradient" => Ok(Demo::UvGradient),
            other => Err(format!("unknown demo `{other}`, expected `sky` or `uv-gradient`")),
        }
    }
}

impl fmt::Display for Demo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Demo::Sky => "sky",
            Demo::UvGradient => "uv-gradient",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CameraSettings {
    Basis {
        #[serde(default)]
        origin: [Float; 3],
        horizontal: [Float; 3],
        vertical: [Float; 3],
        lower_left: [Float; 3],
    },
    LookAt {
        lookfrom: [Float; 3],
        lookat: [Float; 3],
        #[serde(default = "default_vup")]
        vup: [Float; 3],
        vfov: Float,
        /// Defaults to the image's width / height.
        aspect: Option<Float>,
    },
}

fn default_vup() -> [Float; 3] {
    [0.0, 1.0, 0.0]
}

impl Default for CameraSettings {
    fn default() -> Self {
        CameraSettings::Basis {
            origin: [0.0, 0.0, 0.0],
            horizontal: [4.0, 0.0, 0.0],
            vertical: [0.0, 2.0, 0.0],
            lower_left: [-2.0, -1.0, -1.0],
        }
    }
}

impl CameraSettings {
    pub fn build(&self, width: usize, height: usize) -> Result<Camera, Error> {
        match *self {
            CameraSettings::Basis { origin, horizontal, vertical, lower_left } => Ok(Camera::from_basis(
                origin.into(),
                horizontal.into(),
                vertical.into(),
                lower_left.into(),
            )),
            CameraSettings::LookAt { lookfrom, lookat, vup, vfov, aspect } => {
                let aspect = aspect.unwrap_or(width as Float / height as Float);
                Camera::look_at(lookfrom.into(), lookat.into(), vup.into(), vfov, aspect)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: i32,
    pub height: i32,
    pub demo: Demo,
    pub camera: CameraSettings,
    /// Size of the rayon pool, all cores when unset.
    pub threads: Option<usize>,
    pub output: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            demo: Demo::Sky,
            camera: CameraSettings::default(),
            threads: None,
            output: PathBuf::from("render.bmp"),
        }
    }
}

/// Command line values that win over the config file.
#[derive(Debug, Clone, Default, PartialEq, StructOpt)]
#[structopt(rename_all = "kebab-case")]
pub struct ConfigOverrides {
    /// Output image, `.ppm` is written directly, anything else goes through `image` (BMP, PNG)
    #[structopt(parse(from_os_str))]
    pub output: Option<PathBuf>,
    #[structopt(long)]
    pub width: Option<i32>,
    #[structopt(long)]
    pub height: Option<i32>,
    /// `sky` or `uv-gradient`
    #[structopt(long)]
    pub demo: Option<Demo>,
    #[structopt(long)]
    pub threads: Option<usize>,
}

impl RenderConfig {
    pub fn from_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    pub fn merge(self, overrides: ConfigOverrides) -> Self {
        Self {
            width: overrides.width.unwrap_or(self.width),
            height: overrides.height.unwrap_or(self.height),
            demo: overrides.demo.unwrap_or(self.demo),
            threads: overrides.threads.or(self.threads),
            output: overrides.output.unwrap_or(self.output),
            camera: self.camera,
        }
    }
}
