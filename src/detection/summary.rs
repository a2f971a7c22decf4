use std::path::{Path, PathBuf};

use crate::models::{DetectionSummary, Segmentation};

/// Area per detected panel in square metres. Uncalibrated placeholder.
pub const AREA_PER_PANEL_SQM: f64 = 1.6;
/// Capacity per detected panel in kW. Uncalibrated placeholder.
pub const CAPACITY_PER_PANEL_KW: f64 = 0.3;

pub const STATUS_VERIFIABLE: &str = "verifiable";
pub const STATUS_NOT_VERIFIABLE: &str = "not_verifiable";
const NOTE_MODULE_GRID: &str = "distinct module grid";

/// Overlay path for an input image: every `.png` becomes `_annotated.png`.
///
/// Paths without `.png` come back unchanged.
pub fn annotated_path(image_path: &Path) -> PathBuf {
    PathBuf::from(
        image_path
            .to_string_lossy()
            .replace(".png", "_annotated.png"),
    )
}

impl DetectionSummary {
    pub fn from_segmentation(segmentation: &Segmentation, overlay_path: &Path) -> Self {
        let has_solar = segmentation.masks_present && !segmentation.instances.is_empty();

        let (confidence, panel_count) = if has_solar {
            (
                segmentation.max_confidence().unwrap_or(0.0),
                segmentation.instances.len(),
            )
        } else {
            (0.0, 0)
        };

        let (qc_status, qc_notes) = if has_solar {
            (STATUS_VERIFIABLE, vec![NOTE_MODULE_GRID.to_string()])
        } else {
            (STATUS_NOT_VERIFIABLE, Vec::new())
        };

        let bbox_or_mask: Vec<Vec<[f64; 2]>> = if has_solar {
            segmentation
                .instances
                .iter()
                .map(|inst| {
                    inst.polygon
                        .iter()
                        .map(|&[x, y]| [x as f64, y as f64])
                        .collect()
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            has_solar,
            confidence,
            panel_count_est: panel_count,
            pv_area_sqm_est: AREA_PER_PANEL_SQM * panel_count as f64,
            capacity_kw_est: CAPACITY_PER_PANEL_KW * panel_count as f64,
            qc_status: qc_status.to_string(),
            qc_notes,
            bbox_or_mask,
            audit_overlay_path: overlay_path.to_string_lossy().into_owned(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
