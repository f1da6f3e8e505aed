//! Parameter types for image transforms.
//!
//! These describe *what* to do to an image, not how. The batch layer hands a
//! [`Transform`] to every worker; the worker applies it to its own buffer.
//!
//! - [`Threshold`]: Sobel component cut-off, `0..=255`. Out-of-range values
//!   are rejected on construction, never clamped.
//! - [`Transform`]: greyscale or Sobel, plus the filename suffix of its output.

use super::buffer::PixelBuffer;
use super::greyscale::convert_to_greyscale;
use super::grid::{buffer_to_grid, grid_to_buffer};
use super::sobel::detect_edges;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("threshold {0} is outside 0-255")]
pub struct RangeError(pub i64);

/// Validated Sobel threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Threshold(u8);

impl Threshold {
    pub fn new(value: i64) -> Result<Self, RangeError> {
        u8::try_from(value).map(Self).map_err(|_| RangeError(value))
    }

    pub fn value(self) -> i32 {
        self.0 as i32
    }
}

impl TryFrom<i64> for Threshold {
    type Error = RangeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for i64 {
    fn from(t: Threshold) -> i64 {
        t.0 as i64
    }
}

/// The operation a batch applies to each image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transform {
    Greyscale,
    Sobel { threshold: Threshold },
}

impl Transform {
    /// Suffix appended to the source file stem when saving the result.
    pub fn suffix(&self) -> &'static str {
        match self {
            Transform::Greyscale => "_Greyscale",
            Transform::Sobel { .. } => "_Sobel",
        }
    }

    /// Run the transform, consuming the input buffer.
    pub fn apply(&self, buffer: PixelBuffer) -> PixelBuffer {
        match *self {
            Transform::Greyscale => convert_to_greyscale(buffer),
            Transform::Sobel { threshold } => {
                let grid = buffer_to_grid(buffer);
                grid_to_buffer(detect_edges(&grid, threshold))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_accepts_full_byte_range() {
        assert_eq!(Threshold::new(0).unwrap().value(), 0);
        assert_eq!(Threshold::new(255).unwrap().value(), 255);
    }

    #[test]
    fn threshold_rejects_out_of_range() {
        assert_eq!(Threshold::new(-1), Err(RangeError(-1)));
        assert_eq!(Threshold::new(256), Err(RangeError(256)));
        assert!(RangeError(300).to_string().contains("300"));
    }

    #[test]
    fn threshold_deserializes_with_validation() {
        let ok: Threshold = serde_json::from_str("42").unwrap();
        assert_eq!(ok.value(), 42);
        assert!(serde_json::from_str::<Threshold>("999").is_err());
    }

    #[test]
    fn suffixes() {
        assert_eq!(Transform::Greyscale.suffix(), "_Greyscale");
        let sobel = Transform::Sobel {
            threshold: Threshold::new(10).unwrap(),
        };
        assert_eq!(sobel.suffix(), "_Sobel");
    }

    #[test]
    fn sobel_apply_keeps_dimensions() {
        let sobel = Transform::Sobel {
            threshold: Threshold::new(0).unwrap(),
        };
        let out = sobel.apply(PixelBuffer::new(6, 4));
        assert_eq!((out.width(), out.height()), (6, 4));
    }

    #[test]
    fn transform_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Transform::Sobel {
            threshold: Threshold::new(12).unwrap(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"sobel","threshold":12}"#);
    }
}
