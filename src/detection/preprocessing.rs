use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};
use rten_tensor::NdTensor;

/// Gray used by YOLO letterboxing.
const PAD_VALUE: u8 = 114;

/// Mapping between a letterboxed model input and the source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub pad_x: u32,
    pub pad_y: u32,
    pub size: u32,
}

impl Letterbox {
    /// Model-input point back to source-image pixels.
    pub fn to_source(&self, x: f32, y: f32) -> (f32, f32) {
        (
            (x - self.pad_x as f32) / self.scale,
            (y - self.pad_y as f32) / self.scale,
        )
    }
}

/// Resize keeping aspect ratio and pad to a `size` x `size` square.
pub fn letterbox(img: &DynamicImage, size: u32) -> (RgbImage, Letterbox) {
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();

    let scale = (size as f32 / width as f32).min(size as f32 / height as f32);
    let scaled_w = ((width as f32 * scale).round() as u32).clamp(1, size);
    let scaled_h = ((height as f32 * scale).round() as u32).clamp(1, size);

    let scaled = imageops::resize(&rgb, scaled_w, scaled_h, FilterType::Triangle);

    let mut canvas = RgbImage::from_pixel(size, size, Rgb([PAD_VALUE; 3]));
    let pad_x = (size - scaled_w) / 2;
    let pad_y = (size - scaled_h) / 2;
    imageops::overlay(&mut canvas, &scaled, pad_x.into(), pad_y.into());

    (
        canvas,
        Letterbox {
            scale,
            pad_x,
            pad_y,
            size,
        },
    )
}

/// NCHW float tensor with channels scaled to `[0, 1]`.
pub fn to_input_tensor(img: &RgbImage) -> NdTensor<f32, 4> {
    let (width, height) = img.dimensions();
    let plane = (width * height) as usize;
    let mut data = vec![0f32; 3 * plane];

    for (x, y, pixel) in img.enumerate_pixels() {
        let idx = (y * width + x) as usize;
        for c in 0..3 {
            data[c * plane + idx] = pixel[c] as f32 / 255.0;
        }
    }

    NdTensor::from_data([1, 3, height as usize, width as usize], data)
}
