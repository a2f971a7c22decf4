use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use helioscope::logging;
use helioscope::{DetectorConfig, SolarDetector, YoloSegModel};

#[derive(Parser)]
#[command(name = "detect-solar")]
#[command(about = "Detect solar panels in an image and print a JSON summary")]
struct Cli {
    /// Path to input image file
    #[arg(value_name = "IMAGE")]
    image_path: Option<PathBuf>,

    /// Path to the segmentation model (.rten)
    #[arg(value_name = "MODEL")]
    model_path: Option<PathBuf>,

    /// Anything after the model path is ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    _extra: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Cli::parse();

    let (Some(image_path), Some(model_path)) = (args.image_path, args.model_path) else {
        let mut stdout = std::io::stdout();
        write!(stdout, "{{}}")?;
        stdout.flush()?;
        return Ok(());
    };

    let model = YoloSegModel::load(&model_path, DetectorConfig::default())?;
    let detector = SolarDetector::new(model);
    let summary = detector.run(&image_path)?;

    println!("{}", summary.to_json()?);

    Ok(())
}
