pub mod provider;
pub mod stitch;
pub mod tile;
pub mod transport;
pub mod wms;

use std::time::Duration;

use image::RgbImage;

use crate::error::{ImageryError, Result, body_snippet};
pub use provider::Provider;
pub use tile::TileCoord;
pub use transport::{HttpResponse, HttpTransport, Transport};
pub use wms::BBox;

/// Characters of a bad tile body surfaced for debugging.
const TILE_SNIPPET_CHARS: usize = 200;
/// Characters of a bad WMS body surfaced for debugging.
const WMS_SNIPPET_CHARS: usize = 500;

/// Shortest round-trip rendering of a coordinate, with a signed two-digit
/// exponent when one is needed (`37.0`, `1e-05`, `1.5e+16`).
///
/// The GUI shell builds file names and WMS bounds the same way.
pub fn coord_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    let debug = format!("{:?}", value);
    match debug.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => debug,
    }
}

/// File name the stitched grid for a point is saved under.
pub fn stitched_filename(lat: f64, lon: f64, zoom: u32) -> String {
    format!("tile_{}_{}_{}.png", coord_repr(lat), coord_repr(lon), zoom)
}

/// Request settings shared by every fetch.
#[derive(Debug, Clone)]
pub struct ImageryConfig {
    pub timeout: Duration,
    /// Sent on WMS requests; GIBS rejects empty identifiers.
    pub user_agent: String,
}

impl Default for ImageryConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            user_agent: "Mozilla/5.0 (compatible; Imagen/1.0)".to_string(),
        }
    }
}

/// Imagery fetcher bound to one provider.
pub struct Imagery<T = HttpTransport> {
    provider: Provider,
    config: ImageryConfig,
    transport: T,
}

impl Imagery<HttpTransport> {
    /// Resolve `provider` and build a fetcher backed by a real HTTP client.
    ///
    /// The provider is validated before the client is created, so `osm` and
    /// unknown names never touch the network stack.
    pub fn new(provider: &str, config: ImageryConfig) -> Result<Self> {
        let provider: Provider = provider.parse()?;
        Ok(Self::with_transport(provider, config, HttpTransport::new()?))
    }
}

impl<T: Transport> Imagery<T> {
    /// Resolve `provider` by name and bind it to `transport`.
    pub fn from_name(provider: &str, config: ImageryConfig, transport: T) -> Result<Self> {
        Ok(Self::with_transport(provider.parse()?, config, transport))
    }

    pub fn with_transport(provider: Provider, config: ImageryConfig, transport: T) -> Self {
        Self {
            provider,
            config,
            transport,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn config(&self) -> &ImageryConfig {
        &self.config
    }

    /// Download and decode one tile.
    pub fn down_tile(&self, tile: TileCoord, key: Option<&str>) -> Result<RgbImage> {
        self.provider.require_tiles("discrete tile download")?;
        let url = self.provider.tile_url(tile, key)?;

        tracing::debug!(x = tile.x, y = tile.y, zoom = tile.zoom, "fetching tile");
        let resp = self.transport.get(&url, &[], self.config.timeout)?;

        if !resp.is_success() {
            return Err(ImageryError::Network {
                status: resp.status,
                url,
            });
        }

        match image::load_from_memory(&resp.body) {
            Ok(img) => Ok(img.to_rgb8()),
            Err(source) => {
                let snippet = body_snippet(&resp.body, TILE_SNIPPET_CHARS);
                tracing::warn!(%url, %snippet, "tile response is not a decodable image");
                Err(ImageryError::Decode {
                    url,
                    snippet,
                    source,
                })
            }
        }
    }

    /// Single image around a point: the containing tile, or a WMS
    /// bounding-box image for providers without tiles.
    pub fn center_tile(&self, lat: f64, lon: f64, zoom: u32, key: Option<&str>) -> Result<RgbImage> {
        if !self.provider.supports_tiles() {
            return self.gibs_wms(lat, lon, zoom);
        }

        self.down_tile(TileCoord::from_lat_lon(lat, lon, zoom), key)
    }

    /// Fetch a `(2r+1)`-square grid of tiles around a point and stitch it.
    ///
    /// Tiles are fetched row by row, top row first, left column first. The
    /// first failing tile aborts the whole grid.
    pub fn stitched_tiles(
        &self,
        lat: f64,
        lon: f64,
        zoom: u32,
        radius: u32,
        key: Option<&str>,
    ) -> Result<RgbImage> {
        self.provider.require_tiles("stitched tiles")?;

        let center = TileCoord::from_lat_lon(lat, lon, zoom);
        let radius = radius as i64;
        tracing::debug!(x = center.x, y = center.y, zoom, radius, "stitching tile grid");

        let mut rows = Vec::new();
        for dy in -radius..=radius {
            let mut row = Vec::new();
            for dx in -radius..=radius {
                row.push(self.down_tile(center.offset(dx, dy), key)?);
            }
            rows.push(row);
        }

        Ok(stitch::stitch_grid(&rows))
    }

    /// Fetch one WMS image from NASA GIBS centered on a point.
    ///
    /// `zoom` only selects the bounding-box half-width.
    pub fn gibs_wms(&self, lat: f64, lon: f64, zoom: u32) -> Result<RgbImage> {
        let bbox = BBox::around(lat, lon, wms::half_width_for_zoom(zoom));
        let url = wms::get_map_url(&bbox);

        tracing::debug!(%url, "requesting GIBS WMS image");
        let headers = [("User-Agent", self.config.user_agent.as_str())];
        let resp = self.transport.get(&url, &headers, self.config.timeout)?;

        if !resp.is_success() {
            let snippet = body_snippet(&resp.body, WMS_SNIPPET_CHARS);
            tracing::warn!(status = resp.status, %snippet, "GIBS request failed");
            return Err(ImageryError::Network {
                status: resp.status,
                url,
            });
        }

        let is_image = resp
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.contains("image"));
        if !is_image {
            let snippet = body_snippet(&resp.body, WMS_SNIPPET_CHARS);
            tracing::warn!(content_type = ?resp.content_type, %snippet, "GIBS returned non-image data");
            return Err(ImageryError::NotAnImage {
                url,
                content_type: resp.content_type,
                snippet,
            });
        }

        image::load_from_memory(&resp.body)
            .map(|img| img.to_rgb8())
            .map_err(|source| ImageryError::Decode {
                snippet: body_snippet(&resp.body, WMS_SNIPPET_CHARS),
                url,
                source,
            })
    }
}
