use std::cell::RefCell;
use std::io::Cursor;
use std::time::Duration;

use helioscope::imagery::{HttpResponse, Transport};
use helioscope::{Imagery, ImageryConfig, Instance, PixelBox, Provider, Segmentation, SegmentationModel};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// One request seen by [`StubTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

/// Transport that answers from a closure and records every request.
pub struct StubTransport {
    respond: Box<dyn Fn(&str) -> HttpResponse>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl StubTransport {
    pub fn new(respond: impl Fn(&str) -> HttpResponse + 'static) -> Self {
        Self {
            respond: Box::new(respond),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Every request gets the same response.
    pub fn always(resp: HttpResponse) -> Self {
        Self::new(move |_| resp.clone())
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.requests.borrow().len()
    }
}

impl Transport for StubTransport {
    fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        timeout: Duration,
    ) -> helioscope::error::Result<HttpResponse> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            timeout,
        });
        Ok((self.respond)(url))
    }
}

/// Fetcher for `provider` over a borrowed stub so the test can inspect it afterwards.
pub fn imagery_with(provider: Provider, stub: &StubTransport) -> Imagery<&StubTransport> {
    Imagery::with_transport(provider, ImageryConfig::default(), stub)
}

/// Encode a solid-color RGB image.
pub fn encode_tile(width: u32, height: u32, color: [u8; 3], format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(color));
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, format).expect("Failed to encode test tile");
    bytes.into_inner()
}

pub fn png_response(width: u32, height: u32, color: [u8; 3]) -> HttpResponse {
    HttpResponse {
        status: 200,
        content_type: Some("image/png".to_string()),
        body: encode_tile(width, height, color, ImageFormat::Png),
    }
}

pub fn jpeg_response(width: u32, height: u32, color: [u8; 3]) -> HttpResponse {
    HttpResponse {
        status: 200,
        content_type: Some("image/jpeg".to_string()),
        body: encode_tile(width, height, color, ImageFormat::Jpeg),
    }
}

pub fn status_response(status: u16) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("text/plain".to_string()),
        body: b"not found".to_vec(),
    }
}

pub fn html_response(status: u16) -> HttpResponse {
    HttpResponse {
        status,
        content_type: Some("text/html; charset=utf-8".to_string()),
        body: b"<!DOCTYPE html><html><body>Service exception</body></html>".to_vec(),
    }
}

/// Parse `x`, `y`, `z` back out of an ESRI tile URL (`.../tile/{z}/{y}/{x}`).
pub fn esri_tile_of(url: &str) -> TileXyz {
    let parts: Vec<i64> = url
        .rsplit('/')
        .take(3)
        .map(|p| p.parse().expect("Tile URL should end in numbers"))
        .collect();
    TileXyz {
        x: parts[0],
        y: parts[1],
        z: parts[2],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileXyz {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

/// Model that returns a fixed segmentation.
pub struct StubModel {
    pub segmentation: Segmentation,
}

impl SegmentationModel for StubModel {
    fn segment(&self, _image: &DynamicImage) -> anyhow::Result<Segmentation> {
        Ok(self.segmentation.clone())
    }
}

/// Square instance with a four-point outline.
pub fn make_instance(confidence: f64, x: f32, y: f32, size: f32) -> Instance {
    Instance {
        confidence,
        bbox: PixelBox {
            x1: x,
            y1: y,
            x2: x + size,
            y2: y + size,
        },
        polygon: vec![[x, y], [x + size, y], [x + size, y + size], [x, y + size]],
    }
}

/// Creates a 100x100 gray PNG in a temp dir and returns the dir and image path.
pub fn create_test_image(name: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join(name);
    let img = RgbImage::from_pixel(100, 100, Rgb([90u8, 90u8, 90u8]));
    img.save_with_format(&path, ImageFormat::Png)
        .expect("Failed to save test image");
    (dir, path)
}
