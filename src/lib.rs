pub mod detection;
pub mod error;
pub mod imagery;
pub mod logging;
pub mod models;

pub use detection::{DetectorConfig, SegmentationModel, SolarDetector, YoloSegModel};
pub use error::{ErrorKind, ImageryError};
pub use imagery::{Imagery, ImageryConfig, Provider, TileCoord};
pub use models::{DetectionSummary, Instance, PixelBox, Segmentation};
