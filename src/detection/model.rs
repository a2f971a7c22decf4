use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, GrayImage, Luma};
use rten::Model;
use rten_tensor::NdTensor;
use rten_tensor::prelude::*;

use crate::detection::contours::mask_outline;
use crate::detection::nms::{self, Candidate};
use crate::detection::preprocessing::{self, Letterbox};
use crate::detection::{DetectorConfig, SegmentationModel};
use crate::models::{Instance, PixelBox, Segmentation};

/// Box coordinates at the head of each prediction column.
const BOX_ROWS: usize = 4;

/// YOLOv8-style instance segmentation model run through `rten`.
///
/// Expects two outputs: predictions `[1, 4 + classes + k, anchors]` and mask
/// prototypes `[1, k, mh, mw]`. ONNX exports must be converted to `.rten`
/// first (`rten-convert model.onnx`).
pub struct YoloSegModel {
    model: Model,
    config: DetectorConfig,
}

impl YoloSegModel {
    pub fn load(path: &Path, config: DetectorConfig) -> anyhow::Result<Self> {
        if !path.exists() {
            anyhow::bail!("Model file not found: {}", path.display());
        }

        let model = Model::load_file(path)
            .with_context(|| format!("Failed to load model {}", path.display()))?;

        Ok(Self { model, config })
    }

    fn run(&self, input: NdTensor<f32, 4>) -> anyhow::Result<(NdTensor<f32, 3>, NdTensor<f32, 4>)> {
        let input_id = *self
            .model
            .input_ids()
            .first()
            .ok_or_else(|| anyhow::anyhow!("Model has no inputs"))?;
        let output_ids = self.model.output_ids().to_vec();
        if output_ids.len() < 2 {
            anyhow::bail!(
                "Expected a segmentation model with 2 outputs, found {}",
                output_ids.len()
            );
        }

        let mut outputs = self
            .model
            .run(vec![(input_id, input.view().into())], &output_ids[..2], None)?;

        let protos: NdTensor<f32, 4> = outputs.remove(1).try_into()?;
        let preds: NdTensor<f32, 3> = outputs.remove(0).try_into()?;
        Ok((preds, protos))
    }
}

impl SegmentationModel for YoloSegModel {
    fn segment(&self, image: &DynamicImage) -> anyhow::Result<Segmentation> {
        let (input_img, letterbox) = preprocessing::letterbox(image, self.config.input_size);
        let input = preprocessing::to_input_tensor(&input_img);

        let (preds, protos) = self.run(input)?;

        decode(
            &preds,
            &protos,
            &letterbox,
            (image.width(), image.height()),
            &self.config,
        )
    }
}

/// Turn raw predictions `[1, 4 + classes + k, anchors]` and prototypes
/// `[1, k, mh, mw]` into instances in source-image pixels.
///
/// `src` is the source image size the letterbox was built from.
pub fn decode(
    preds: &NdTensor<f32, 3>,
    protos: &NdTensor<f32, 4>,
    letterbox: &Letterbox,
    src: (u32, u32),
    config: &DetectorConfig,
) -> anyhow::Result<Segmentation> {
    let [_, rows, anchors] = preds.shape();
    let [_, mask_dim, mask_h, mask_w] = protos.shape();
    if rows < BOX_ROWS + mask_dim + 1 {
        anyhow::bail!(
            "Prediction tensor has {} rows, too few for {} mask coefficients",
            rows,
            mask_dim
        );
    }
    let num_classes = rows - BOX_ROWS - mask_dim;

    let mut candidates = Vec::new();
    for a in 0..anchors {
        // best class score
        let confidence = (0..num_classes)
            .map(|c| preds[[0, BOX_ROWS + c, a]])
            .fold(f32::MIN, f32::max);

        if confidence < config.conf_threshold {
            continue;
        }

        let bbox = PixelBox::from_center(
            preds[[0, 0, a]],
            preds[[0, 1, a]],
            preds[[0, 2, a]],
            preds[[0, 3, a]],
        );
        let coeffs = (0..mask_dim)
            .map(|k| preds[[0, BOX_ROWS + num_classes + k, a]])
            .collect();

        candidates.push(Candidate {
            bbox,
            confidence,
            coeffs,
        });
    }

    let kept = nms::non_max_suppression(candidates, config.iou_threshold, config.max_detections);
    tracing::debug!(detections = kept.len(), "segmentation decoded");

    let (src_w, src_h) = (src.0 as f32, src.1 as f32);
    let stride_x = letterbox.size as f32 / mask_w as f32;
    let stride_y = letterbox.size as f32 / mask_h as f32;
    let instances = kept
        .iter()
        .map(|cand| {
            let mask = decode_mask(protos, cand, letterbox, mask_w, mask_h);
            let polygon = mask_outline(&mask)
                .into_iter()
                .map(|(mx, my)| {
                    let (x, y) = letterbox.to_source(
                        (mx as f32 + 0.5) * stride_x,
                        (my as f32 + 0.5) * stride_y,
                    );
                    [x.clamp(0.0, src_w), y.clamp(0.0, src_h)]
                })
                .collect();

            let (x1, y1) = letterbox.to_source(cand.bbox.x1, cand.bbox.y1);
            let (x2, y2) = letterbox.to_source(cand.bbox.x2, cand.bbox.y2);

            Instance {
                confidence: cand.confidence as f64,
                bbox: PixelBox { x1, y1, x2, y2 }.clamp_to(src_w, src_h),
                polygon,
            }
        })
        .collect();

    Ok(Segmentation::from_instances(instances))
}

/// Binary mask at prototype resolution, cropped to the candidate's box.
fn decode_mask(
    protos: &NdTensor<f32, 4>,
    cand: &Candidate,
    letterbox: &Letterbox,
    mask_w: usize,
    mask_h: usize,
) -> GrayImage {
    let sx = mask_w as f32 / letterbox.size as f32;
    let sy = mask_h as f32 / letterbox.size as f32;
    let crop = PixelBox {
        x1: cand.bbox.x1 * sx,
        y1: cand.bbox.y1 * sy,
        x2: cand.bbox.x2 * sx,
        y2: cand.bbox.y2 * sy,
    };

    let mut mask = GrayImage::new(mask_w as u32, mask_h as u32);
    for my in 0..mask_h {
        let cy = my as f32 + 0.5;
        if cy < crop.y1 || cy > crop.y2 {
            continue;
        }
        for mx in 0..mask_w {
            let cx = mx as f32 + 0.5;
            if cx < crop.x1 || cx > crop.x2 {
                continue;
            }
            let logit: f32 = cand
                .coeffs
                .iter()
                .enumerate()
                .map(|(k, coeff)| coeff * protos[[0, k, my, mx]])
                .sum();
            // sigmoid(logit) > 0.5
            if logit > 0.0 {
                mask.put_pixel(mx as u32, my as u32, Luma([255]));
            }
        }
    }
    mask
}
