use crate::core::geo::Point;
use crate::core::size::Size;
use serde::{Deserialize, Serialize};

/// How a sized rectangle is positioned relative to its anchor pixel.
///
/// `Middle` centers the rectangle on the anchor; `TopLeft` puts the anchor at
/// the rectangle's top-left corner, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    TopLeft,
    Top,
    TopRight,
    Left,
    Middle,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Alignment {
    /// The fraction of the rectangle's width/height that sits left of/above
    /// the anchor.
    fn anchor_factors(&self) -> (f64, f64) {
        match self {
            Alignment::TopLeft => (0.0, 0.0),
            Alignment::Top => (0.5, 0.0),
            Alignment::TopRight => (1.0, 0.0),
            Alignment::Left => (0.0, 0.5),
            Alignment::Middle => (0.5, 0.5),
            Alignment::Right => (1.0, 0.5),
            Alignment::BottomLeft => (0.0, 1.0),
            Alignment::Bottom => (0.5, 1.0),
            Alignment::BottomRight => (1.0, 1.0),
        }
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Middle
    }
}

/// Computes the top-left pixel of a rectangle of `size` aligned to `anchor`.
pub fn align_top_left(anchor: &Point, alignment: Alignment, size: &Size) -> Point {
    let (fx, fy) = alignment.anchor_factors();
    Point::new(anchor.x - size.width * fx, anchor.y - size.height * fy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Alignment; 9] = [
        Alignment::TopLeft,
        Alignment::Top,
        Alignment::TopRight,
        Alignment::Left,
        Alignment::Middle,
        Alignment::Right,
        Alignment::BottomLeft,
        Alignment::Bottom,
        Alignment::BottomRight,
    ];

    #[test]
    fn test_middle_centers_on_anchor() {
        let anchor = Point::new(100.0, 50.0);
        let size = Size::new(32.0, 16.0);
        let top_left = align_top_left(&anchor, Alignment::Middle, &size);

        assert_eq!(top_left, Point::new(84.0, 42.0));
    }

    #[test]
    fn test_top_left_keeps_anchor() {
        let anchor = Point::new(7.0, 9.0);
        let size = Size::new(10.0, 10.0);
        assert_eq!(align_top_left(&anchor, Alignment::TopLeft, &size), anchor);
    }

    #[test]
    fn test_center_offset_matches_factor_table() {
        let anchor = Point::new(0.0, 0.0);
        let size = Size::new(20.0, 40.0);

        for alignment in ALL {
            let (fx, fy) = alignment.anchor_factors();
            let top_left = align_top_left(&anchor, alignment, &size);
            let center = Point::new(
                top_left.x + size.width / 2.0,
                top_left.y + size.height / 2.0,
            );

            // Center-of-mass offset from the anchor is (0.5 - f) * dimension.
            assert!((center.x - (0.5 - fx) * size.width).abs() < 1e-12);
            assert!((center.y - (0.5 - fy) * size.height).abs() < 1e-12);
        }
    }
}
