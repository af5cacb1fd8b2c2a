//! Grid-cell extents for view size variants

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned when constructing a [`Size`] with a zero dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{dimension} must be positive (was {value})")]
pub struct InvalidSizeError {
    /// Which dimension was rejected ("width" or "height")
    pub dimension: &'static str,
    /// The rejected value
    pub value: u32,
}

/// A width x height extent in grid cells.
///
/// Sizes are totally ordered by width, then height, so they can key a sorted
/// map and "smallest size" is deterministic. Both dimensions must be at least
/// one cell.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawSize")]
pub struct Size {
    width: u32,
    height: u32,
}

/// Unvalidated mirror of [`Size`] so deserialization goes through the
/// checked constructor.
#[derive(Deserialize)]
struct RawSize {
    width: u32,
    height: u32,
}

impl TryFrom<RawSize> for Size {
    type Error = InvalidSizeError;

    fn try_from(raw: RawSize) -> Result<Self, Self::Error> {
        Size::new(raw.width, raw.height)
    }
}

impl Size {
    /// Create a new size. Fails if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, InvalidSizeError> {
        if width == 0 {
            return Err(InvalidSizeError {
                dimension: "width",
                value: width,
            });
        }
        if height == 0 {
            return Err(InvalidSizeError {
                dimension: "height",
                value: height,
            });
        }
        Ok(Self { width, height })
    }

    /// Width in grid cells
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in grid cells
    pub fn height(&self) -> u32 {
        self.height
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(w: u32, h: u32) -> Size {
        Size::new(w, h).unwrap()
    }

    #[test]
    fn test_construction() {
        let s = size(2, 1);
        assert_eq!(s.width(), 2);
        assert_eq!(s.height(), 1);
        assert_eq!(s, size(2, 1));
        assert_ne!(s, size(1, 2));
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = Size::new(0, 1).unwrap_err();
        assert_eq!(err.dimension, "width");
        let err = Size::new(1, 0).unwrap_err();
        assert_eq!(err.dimension, "height");
        assert!(Size::new(0, 0).is_err());
    }

    #[test]
    fn test_ordering_width_then_height() {
        // 2x1 sorts after 1x2: width is compared first.
        assert!(size(1, 2) < size(2, 1));
        assert!(size(2, 1) < size(2, 2));
        assert!(size(1, 1) < size(1, 2));
    }

    #[test]
    fn test_ordering_is_total_and_transitive() {
        let mut sizes = Vec::new();
        for w in 1..=5u32 {
            for h in 1..=4u32 {
                sizes.push(size(w, h));
            }
        }
        assert_eq!(sizes.len(), 20);

        let mut sorted = sizes.clone();
        sorted.sort();

        // Pairwise: consistent with equality, antisymmetric, transitive.
        for a in &sizes {
            for b in &sizes {
                assert_eq!(a == b, a.cmp(b).is_eq());
                assert_eq!(a.cmp(b), b.cmp(a).reverse());
                for c in &sizes {
                    if a <= b && b <= c {
                        assert!(a <= c);
                    }
                }
            }
        }

        // Smallest element is the minimum under the documented rule.
        assert_eq!(sorted[0], size(1, 1));
        assert_eq!(sorted[sorted.len() - 1], size(5, 4));
    }

    #[test]
    fn test_display() {
        assert_eq!(size(3, 2).to_string(), "3x2");
    }

    #[test]
    fn test_serde_round_trip_revalidates() {
        let s = size(2, 1);
        let json = serde_json::to_string(&s).unwrap();
        let back: Size = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);

        // A zero dimension must not sneak in through deserialization.
        let bad: Result<Size, _> = serde_json::from_str(r#"{"width":0,"height":1}"#);
        assert!(bad.is_err());
    }
}
