use image::{RgbImage, imageops};

/// Concatenate images left to right, top-aligned.
///
/// Canvas height is the tallest input; shorter inputs leave black below them.
pub fn hstack(images: &[RgbImage]) -> RgbImage {
    let total_width: u32 = images.iter().map(|img| img.width()).sum();
    let max_height = images.iter().map(|img| img.height()).max().unwrap_or(0);

    let mut out = RgbImage::new(total_width, max_height);
    let mut x_offset = 0i64;
    for img in images {
        imageops::replace(&mut out, img, x_offset, 0);
        x_offset += img.width() as i64;
    }
    out
}

/// Concatenate images top to bottom, left-aligned.
pub fn vstack(images: &[RgbImage]) -> RgbImage {
    let max_width = images.iter().map(|img| img.width()).max().unwrap_or(0);
    let total_height: u32 = images.iter().map(|img| img.height()).sum();

    let mut out = RgbImage::new(max_width, total_height);
    let mut y_offset = 0i64;
    for img in images {
        imageops::replace(&mut out, img, 0, y_offset);
        y_offset += img.height() as i64;
    }
    out
}

/// Stitch a row-major grid of tiles into one image.
pub fn stitch_grid(rows: &[Vec<RgbImage>]) -> RgbImage {
    let row_images: Vec<RgbImage> = rows.iter().map(|row| hstack(row)).collect();
    vstack(&row_images)
}
