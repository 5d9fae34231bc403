//! Immutable raster snapshots
//!
//! A [`RasterSnapshot`] is the captured pixel content of the drawing surface.
//! The core never looks at individual pixels: snapshots are compared as whole
//! values and passed around by cheap clone. The pixel buffer sits behind an
//! `Arc` so copying a whole slot registry into history does not copy pixels.

use std::fmt;
use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::{FontError, Result};

/// Bytes per pixel (RGBA)
pub const BYTES_PER_PIXEL: usize = 4;

/// Opaque, immutable RGBA pixel buffer
#[derive(Clone, PartialEq, Eq)]
pub struct RasterSnapshot {
    width: u32,
    height: u32,
    pixels: Arc<[u8]>,
}

impl RasterSnapshot {
    /// Byte length of a `width`x`height` RGBA buffer, or an error if it does
    /// not fit in memory addressing
    pub fn buffer_len(width: u32, height: u32) -> Result<usize> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| {
                FontError::InvalidRaster(format!("{}x{} raster is too large", width, height))
            })
    }

    /// Wrap an RGBA buffer, checking that its length matches the dimensions
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = Self::buffer_len(width, height)?;
        if pixels.len() != expected {
            return Err(FontError::InvalidRaster(format!(
                "{}x{} raster needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.into(),
        })
    }

    /// Wrap a buffer whose length the caller already guarantees
    pub(crate) fn from_buffer(width: u32, height: u32, pixels: &[u8]) -> Self {
        debug_assert_eq!(Self::buffer_len(width, height).ok(), Some(pixels.len()));
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    /// A fully transparent raster, the content of a freshly cleared surface
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        let len = Self::buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0u8; len].into(),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes, row-major
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    /// True if no pixel has any alpha
    pub fn is_blank(&self) -> bool {
        self.pixels
            .chunks_exact(BYTES_PER_PIXEL)
            .all(|px| px[3] == 0)
    }
}

impl fmt::Debug for RasterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterSnapshot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// Wire form: `{"width": .., "height": .., "rgba": "<base64>"}`
#[derive(Serialize, Deserialize)]
struct EncodedRaster {
    width: u32,
    height: u32,
    rgba: String,
}

impl Serialize for RasterSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        EncodedRaster {
            width: self.width,
            height: self.height,
            rgba: BASE64.encode(&self.pixels),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RasterSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let encoded = EncodedRaster::deserialize(deserializer)?;
        let pixels = BASE64
            .decode(encoded.rgba.as_bytes())
            .map_err(serde::de::Error::custom)?;
        RasterSnapshot::from_rgba(encoded.width, encoded.height, pixels)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_rejects_wrong_length() {
        let result = RasterSnapshot::from_rgba(2, 2, vec![0; 15]);
        assert!(matches!(result, Err(FontError::InvalidRaster(_))));
    }

    #[test]
    fn test_value_equality() {
        let a = RasterSnapshot::from_rgba(1, 1, vec![1, 2, 3, 4]).unwrap();
        let b = RasterSnapshot::from_rgba(1, 1, vec![1, 2, 3, 4]).unwrap();
        let c = RasterSnapshot::from_rgba(1, 1, vec![1, 2, 3, 5]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_blank_detection() {
        assert!(RasterSnapshot::blank(3, 2).unwrap().is_blank());
        let inked = RasterSnapshot::from_rgba(1, 1, vec![0, 0, 0, 255]).unwrap();
        assert!(!inked.is_blank());
    }

    #[test]
    fn test_json_encoding_uses_base64() {
        let raster = RasterSnapshot::from_rgba(1, 1, vec![0, 0, 0, 255]).unwrap();
        let json = serde_json::to_value(&raster).unwrap();
        assert_eq!(json["width"], 1);
        assert_eq!(json["height"], 1);
        assert_eq!(json["rgba"], "AAAA/w==");

        let back: RasterSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, raster);
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        assert!(matches!(
            RasterSnapshot::from_rgba(u32::MAX, u32::MAX, Vec::new()),
            Err(FontError::InvalidRaster(_))
        ));
        assert!(RasterSnapshot::blank(u32::MAX, u32::MAX).is_err());
        assert_eq!(RasterSnapshot::buffer_len(3, 2).unwrap(), 24);

        let json = serde_json::json!({ "width": u32::MAX, "height": u32::MAX, "rgba": "" });
        assert!(serde_json::from_value::<RasterSnapshot>(json).is_err());
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let json = serde_json::json!({ "width": 2, "height": 2, "rgba": "AAAA/w==" });
        assert!(serde_json::from_value::<RasterSnapshot>(json).is_err());
    }
}
