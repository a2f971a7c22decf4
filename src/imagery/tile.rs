use std::f64::consts::PI;

/// Latitude limit of the spherical Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub x: i64,
    pub y: i64,
    pub zoom: u32,
}

impl TileCoord {
    pub fn new(x: i64, y: i64, zoom: u32) -> Self {
        Self { x, y, zoom }
    }

    /// Tile containing the given WGS-84 position at `zoom`.
    pub fn from_lat_lon(lat: f64, lon: f64, zoom: u32) -> Self {
        let n = 2f64.powi(zoom as i32);
        let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

        let x = ((lon + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * n).floor();

        let max = n as i64 - 1;
        Self {
            x: (x as i64).clamp(0, max),
            y: (y as i64).clamp(0, max),
            zoom,
        }
    }

    /// Tile shifted by `(dx, dy)`; no wrapping at the antimeridian.
    pub fn offset(&self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            zoom: self.zoom,
        }
    }
}
