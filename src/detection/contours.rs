use image::GrayImage;
use imageproc::contours::{BorderType, find_contours};

/// Outer border of the largest foreground region in a binary mask.
///
/// Points are pixel coordinates in traversal order; an empty mask yields an
/// empty outline.
pub fn mask_outline(mask: &GrayImage) -> Vec<(u32, u32)> {
    find_contours::<u32>(mask)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer)
        .max_by_key(|c| c.points.len())
        .map(|c| c.points.into_iter().map(|p| (p.x, p.y)).collect())
        .unwrap_or_default()
}
