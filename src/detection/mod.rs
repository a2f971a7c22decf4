pub mod contours;
pub mod model;
pub mod nms;
pub mod overlay;
pub mod preprocessing;
pub mod summary;

use std::path::Path;

use image::{DynamicImage, ImageReader};

use crate::models::{DetectionSummary, Segmentation};
pub use model::YoloSegModel;
pub use summary::annotated_path;

/// Anything that turns an image into segmented instances.
pub trait SegmentationModel {
    fn segment(&self, image: &DynamicImage) -> anyhow::Result<Segmentation>;
}

impl<M: SegmentationModel + ?Sized> SegmentationModel for &M {
    fn segment(&self, image: &DynamicImage) -> anyhow::Result<Segmentation> {
        (**self).segment(image)
    }
}

/// Inference parameters for [`YoloSegModel`].
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    pub input_size: u32,
    pub conf_threshold: f32,
    pub iou_threshold: f32,
    pub max_detections: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            input_size: 640,
            conf_threshold: 0.25,
            iou_threshold: 0.7,
            max_detections: 300,
        }
    }
}

/// Runs a segmentation model over an image file and summarises the result
pub struct SolarDetector<M> {
    model: M,
}

impl<M: SegmentationModel> SolarDetector<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Segment an in-memory image.
    pub fn detect(&self, img: &DynamicImage) -> anyhow::Result<Segmentation> {
        let segmentation = self.model.segment(img)?;
        tracing::debug!(
            instances = segmentation.instances.len(),
            masks_present = segmentation.masks_present,
            "model finished"
        );
        Ok(segmentation)
    }

    /// Segment the image at `image_path`, save the annotated overlay next to
    /// it and build the summary.
    pub fn run(&self, image_path: &Path) -> anyhow::Result<DetectionSummary> {
        tracing::debug!(path = %image_path.display(), "loading image");
        let img = ImageReader::open(image_path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;

        let segmentation = self.detect(&img)?;

        let overlay_path = annotated_path(image_path);
        overlay::render_overlay(&img, &segmentation)
            .save(&overlay_path)
            .map_err(|e| anyhow::anyhow!("Failed to save overlay image: {}", e))?;
        tracing::debug!(path = %overlay_path.display(), "saved overlay");

        Ok(DetectionSummary::from_segmentation(&segmentation, &overlay_path))
    }
}
