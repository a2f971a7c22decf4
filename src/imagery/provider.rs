use std::fmt;
use std::str::FromStr;

use crate::error::{ImageryError, Result};
use crate::imagery::tile::TileCoord;

const ESRI_TILE_ROOT: &str =
    "https://services.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile";
const GOOGLE_TILE_ROOT: &str = "https://mt1.google.com/vt/lyrs=s";

/// Imagery source selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// ESRI World Imagery REST tiles, no key required.
    Esri,
    /// Google satellite tiles, API key required.
    Google,
    /// NASA GIBS; bounding-box WMS requests only.
    Gibs,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Esri => "esri",
            Provider::Google => "google",
            Provider::Gibs => "gibs",
        }
    }

    /// Whether the provider has a discrete x/y/z tile endpoint.
    pub fn supports_tiles(&self) -> bool {
        !matches!(self, Provider::Gibs)
    }

    /// Fails with a capability error for providers without discrete tiles.
    pub fn require_tiles(&self, operation: &'static str) -> Result<()> {
        if self.supports_tiles() {
            Ok(())
        } else {
            Err(self.unsupported(operation))
        }
    }

    fn unsupported(&self, operation: &'static str) -> ImageryError {
        ImageryError::Capability {
            provider: self.name(),
            operation,
            hint: "only the bounding-box (WMS) path is supported; use esri or google for tiles",
        }
    }

    /// Build the URL of a single tile.
    pub fn tile_url(&self, tile: TileCoord, key: Option<&str>) -> Result<String> {
        let TileCoord { x, y, zoom } = tile;
        match self {
            Provider::Esri => Ok(format!("{ESRI_TILE_ROOT}/{zoom}/{y}/{x}")),
            Provider::Google => {
                let key = key.ok_or_else(|| {
                    ImageryError::Config("Google Maps provider requires API key".to_string())
                })?;
                Ok(format!("{GOOGLE_TILE_ROOT}&x={x}&y={y}&z={zoom}&key={key}"))
            }
            Provider::Gibs => Err(self.unsupported("discrete tile download")),
        }
    }
}

impl FromStr for Provider {
    type Err = ImageryError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "esri" => Ok(Provider::Esri),
            "google" => Ok(Provider::Google),
            "gibs" => Ok(Provider::Gibs),
            "osm" => Err(ImageryError::Config(
                "OSM tiles cannot be used programmatically due to usage policy".to_string(),
            )),
            other => Err(ImageryError::Config(format!("unknown provider: {other}"))),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
