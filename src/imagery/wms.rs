//! NASA GIBS WMS 1.3.0 request construction.

use super::coord_repr;

const GIBS_WMS_ENDPOINT: &str = "https://gibs.earthdata.nasa.gov/wms/epsg4326/best/wms.cgi";
const GIBS_LAYER: &str = "VIIRS_SNPP_CorrectedReflectance_TrueColor";

/// Output raster edge length requested from the service.
pub const WMS_SIZE: u32 = 1024;

/// Geographic extent in EPSG:4326.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BBox {
    /// Square box of `half_width` degrees around a center point.
    pub fn around(lat: f64, lon: f64, half_width: f64) -> Self {
        Self {
            min_lat: lat - half_width,
            min_lon: lon - half_width,
            max_lat: lat + half_width,
            max_lon: lon + half_width,
        }
    }

    /// WMS 1.3.0 `BBOX` parameter; EPSG:4326 uses lat,lon axis order.
    pub fn to_wms_param(&self) -> String {
        format!(
            "{},{},{},{}",
            coord_repr(self.min_lat),
            coord_repr(self.min_lon),
            coord_repr(self.max_lat),
            coord_repr(self.max_lon)
        )
    }
}

/// Half-width in degrees for a zoom level.
pub fn half_width_for_zoom(zoom: u32) -> f64 {
    match zoom {
        2 => 20.0,
        3 => 10.0,
        4 => 5.0,
        5 => 2.0,
        _ => 5.0,
    }
}

/// `GetMap` URL for the true-color VIIRS layer over `bbox`.
pub fn get_map_url(bbox: &BBox) -> String {
    format!(
        "{GIBS_WMS_ENDPOINT}?service=WMS&request=GetMap&layers={GIBS_LAYER}&styles=\
         &width={WMS_SIZE}&height={WMS_SIZE}&format=image/jpeg&transparent=false\
         &version=1.3.0&crs=EPSG:4326&bbox={}",
        bbox.to_wms_param()
    )
}
