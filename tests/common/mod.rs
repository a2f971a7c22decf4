mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from helioscope for tests
pub use helioscope::imagery::{HttpResponse, Transport};
pub use helioscope::{
    DetectionSummary, ErrorKind, Imagery, ImageryConfig, ImageryError, Instance, PixelBox,
    Provider, Segmentation, SegmentationModel, SolarDetector, TileCoord,
};
