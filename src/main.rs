use std::{fs::File, io::BufWriter, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use rayt::{
    config::{ConfigOverrides, RenderConfig},
    image::ImageView,
    ppm,
    render::generate_image,
};
use structopt::StructOpt;
use tracing::{info, Level};

#[derive(Debug, StructOpt)]
#[structopt(name = "rayt", rename_all = "kebab-case")]
struct Opt {
    /// JSON render config, command line options take precedence
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,
    #[structopt(long, default_value = "info")]
    log_level: Level,
    #[structopt(flatten)]
    overrides: ConfigOverrides,
}

fn main() -> Result<()> {
    let opts = Opt::from_args();
    tracing_subscriber::fmt()
        .with_max_level(opts.log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&opts)?;
    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("cannot configure the thread pool")?;
    }

    let img = generate_image(&config).context("render failed")?;
    save(img.view(), &config.output)?;
    info!(output = %config.output.display(), "image saved");
    Ok(())
}

fn load_config(opts: &Opt) -> Result<RenderConfig> {
    let config = match &opts.config {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("cannot open config {}", path.display()))?;
            RenderConfig::from_reader(file).with_context(|| format!("cannot parse config {}", path.display()))?
        }
        None => RenderConfig::default(),
    };
    Ok(config.merge(opts.overrides.clone()))
}

fn save(view: ImageView<'_>, path: &Path) -> Result<()> {
    let is_ppm = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));
    if is_ppm {
        let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
        ppm::write_ppm(view, BufWriter::new(file))?;
    } else {
        image::save_buffer(
            path,
            view.bytes,
            view.width as u32,
            view.height as u32,
            image::ColorType::Rgb8,
        )
        .with_context(|| format!("cannot encode {}", path.display()))?;
    }
    Ok(())
}
