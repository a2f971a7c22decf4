use image::{DynamicImage, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::models::Segmentation;

const BOX_COLOR: Rgb<u8> = Rgb([255, 56, 56]);
const OUTLINE_COLOR: Rgb<u8> = Rgb([255, 221, 51]);
/// Height of the confidence bar drawn above each box.
const BAR_HEIGHT: u32 = 4;

/// Draw boxes, mask outlines and confidence bars onto a copy of `image`.
pub fn render_overlay(image: &DynamicImage, segmentation: &Segmentation) -> RgbImage {
    let mut canvas = image.to_rgb8();

    for inst in &segmentation.instances {
        let x = inst.bbox.x1.round() as i32;
        let y = inst.bbox.y1.round() as i32;
        let w = inst.bbox.width().round().max(1.0) as u32;
        let h = inst.bbox.height().round().max(1.0) as u32;

        draw_hollow_rect_mut(&mut canvas, Rect::at(x, y).of_size(w, h), BOX_COLOR);

        let bar_w = ((w as f64 * inst.confidence.clamp(0.0, 1.0)).round() as u32).max(1);
        let bar_y = (y - BAR_HEIGHT as i32).max(0);
        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(x, bar_y).of_size(bar_w, BAR_HEIGHT),
            BOX_COLOR,
        );

        let points = &inst.polygon;
        for (i, &[x0, y0]) in points.iter().enumerate() {
            let [x1, y1] = points[(i + 1) % points.len()];
            draw_line_segment_mut(&mut canvas, (x0, y0), (x1, y1), OUTLINE_COLOR);
        }
    }

    canvas
}
