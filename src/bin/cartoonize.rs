//! Command-line front end: load an image, cartoonize it, apply a filter, save.

use std::fs;
use std::path::{Path, PathBuf};

use cartoonize_rust::filters::resize::{fit_within, PREVIEW_MAX_SIDE};
use cartoonize_rust::image::{from_raw, into_raw};
use cartoonize_rust::{CartoonPipeline, FilterCatalog, PipelineConfig};
use clap::Parser;
use log::info;

/// Cartoonize an image and optionally apply a filter on top
#[derive(Parser, Debug)]
#[command(author, version, about = "Turn a photo into a cartoon", long_about = None)]
struct Args {
    /// Input image path
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output image path, format picked from the extension
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Filter applied after the cartoon effect
    #[arg(short = 'f', long, default_value = "Cartoon")]
    filter: String,

    /// Pyramid levels (overrides the config file)
    #[arg(short = 'd', long)]
    down_samples: Option<usize>,

    /// Bilateral passes (overrides the config file)
    #[arg(short = 's', long)]
    smoothing_passes: Option<usize>,

    /// JSON pipeline config; missing fields take their defaults
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Shrink the result so its longer side is 750 px
    #[arg(short = 'p', long, default_value_t = false)]
    preview: bool,

    /// Fail on unknown filter names instead of skipping the filter
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Print the filter names and exit
    #[arg(long, default_value_t = false)]
    list_filters: bool,
}

fn load_config(path: &Path) -> Result<PipelineConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();

    if args.list_filters {
        for name in FilterCatalog::menu_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(d) = args.down_samples {
        config.down_samples = d;
    }
    if let Some(s) = args.smoothing_passes {
        config.smoothing_passes = s;
    }

    let decoded = image::open(&args.input)
        .map_err(|e| format!("Failed to open {}: {e}", args.input.display()))?
        .to_rgb8();
    let (width, height) = decoded.dimensions();
    let input = from_raw(decoded.into_raw(), width as usize, height as usize, 3).map_err(|e| e.to_string())?;
    info!("loaded {} ({width}x{height})", args.input.display());

    let cartoon = CartoonPipeline::new(config).render(input.view()).map_err(|e| e.to_string())?;
    let mut result = if args.strict {
        FilterCatalog::try_apply(cartoon.view(), &args.filter).map_err(|e| e.to_string())?
    } else {
        FilterCatalog::apply(cartoon.view(), &args.filter)
    };
    if args.preview {
        result = fit_within(result.view(), PREVIEW_MAX_SIDE);
    }

    save(&result, &args.output)?;
    info!("wrote {}", args.output.display());
    Ok(())
}

fn save(result: &ndarray::Array3<u8>, path: &Path) -> Result<(), String> {
    let (height, width, channels) = result.dim();
    let data = into_raw(result.clone());
    let color = match channels {
        1 => image::ExtendedColorType::L8,
        _ => image::ExtendedColorType::Rgb8,
    };
    image::save_buffer(path, &data, width as u32, height as u32, color)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}
