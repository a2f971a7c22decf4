use std::time::Duration;

use clap::Parser;

use helioscope::logging;
use helioscope::imagery::stitched_filename;
use helioscope::{Imagery, ImageryConfig};

#[derive(Parser)]
#[command(name = "fetch-tiles")]
#[command(about = "Fetch a grid of satellite tiles around a point and stitch them into one PNG")]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Latitude in decimal degrees
    #[arg(value_name = "LAT")]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(value_name = "LON")]
    lon: f64,

    /// Slippy-map zoom level
    #[arg(value_name = "ZOOM")]
    zoom: u32,

    /// Tiles on each side of the center tile (1 gives a 3x3 grid)
    #[arg(value_name = "RADIUS")]
    radius: u32,

    /// Imagery provider: esri, google or gibs
    #[arg(value_name = "PROVIDER")]
    provider: String,

    /// API key for providers that need one
    #[arg(long, env = "GOOGLE_MAPS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "HELIOSCOPE_TIMEOUT", default_value_t = 5.0)]
    timeout: f64,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Cli::parse();

    let config = ImageryConfig {
        timeout: Duration::try_from_secs_f64(args.timeout)
            .map_err(|e| anyhow::anyhow!("Invalid timeout {}: {}", args.timeout, e))?,
        ..ImageryConfig::default()
    };
    let imagery = Imagery::new(&args.provider, config)?;

    let img = imagery.stitched_tiles(
        args.lat,
        args.lon,
        args.zoom,
        args.radius,
        args.api_key.as_deref(),
    )?;

    let output = stitched_filename(args.lat, args.lon, args.zoom);
    img.save(&output)
        .map_err(|e| anyhow::anyhow!("Failed to save stitched image: {}", e))?;
    tracing::info!(width = img.width(), height = img.height(), %output, "stitched tiles");

    // The GUI shell reads this line to find the image.
    println!("{}", output);

    Ok(())
}
