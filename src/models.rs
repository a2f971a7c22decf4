use serde::Serialize;

/// Axis-aligned box in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl PixelBox {
    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self {
            x1: cx - w / 2.0,
            y1: cy - h / 2.0,
            x2: cx + w / 2.0,
            y2: cy + h / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        (self.x2 - self.x1).max(0.0)
    }

    pub fn height(&self) -> f32 {
        (self.y2 - self.y1).max(0.0)
    }

    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    pub fn iou(&self, other: &PixelBox) -> f32 {
        let inter = PixelBox {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        }
        .area();

        let union = self.area() + other.area() - inter;
        if union <= 0.0 {
            return 0.0;
        }
        inter / union
    }

    /// Clamp to `[0, width] x [0, height]`.
    pub fn clamp_to(&self, width: f32, height: f32) -> Self {
        Self {
            x1: self.x1.clamp(0.0, width),
            y1: self.y1.clamp(0.0, height),
            x2: self.x2.clamp(0.0, width),
            y2: self.y2.clamp(0.0, height),
        }
    }
}

/// One segmented object.
#[derive(Debug, Clone)]
pub struct Instance {
    pub confidence: f64,
    pub bbox: PixelBox,
    /// Mask outline as ordered `[x, y]` points.
    pub polygon: Vec<[f32; 2]>,
}

/// Everything a segmentation model returned for one image.
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    /// False when the model produced no mask set at all.
    pub masks_present: bool,
    pub instances: Vec<Instance>,
}

impl Segmentation {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_instances(instances: Vec<Instance>) -> Self {
        Self {
            masks_present: !instances.is_empty(),
            instances,
        }
    }

    pub fn max_confidence(&self) -> Option<f64> {
        self.instances
            .iter()
            .map(|inst| inst.confidence)
            .reduce(f64::max)
    }
}

/// JSON record printed by the detection runner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionSummary {
    pub has_solar: bool,
    pub confidence: f64,
    pub panel_count_est: usize,
    pub pv_area_sqm_est: f64,
    pub capacity_kw_est: f64,
    pub qc_status: String,
    pub qc_notes: Vec<String>,
    pub bbox_or_mask: Vec<Vec<[f64; 2]>>,
    pub audit_overlay_path: String,
}
