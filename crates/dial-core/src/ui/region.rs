//! Spatial hit regions used by page hit-testing.
//!
//! Every page declares its regions as an ordered table; the first region
//! containing the touch point wins.

use super::core::TouchPoint;

/// Open upper bound for regions that extend to the display edge.
pub const EDGE: u16 = u16::MAX;

/// A touchable area in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Axis-aligned box, `x0..x1` by `y0..y1` (upper bounds exclusive)
    Rect { x0: u16, y0: u16, x1: u16, y1: u16 },
    /// Disc around a center point
    Circle { cx: u16, cy: u16, radius: u16 },
}

impl Region {
    pub const fn rect(x0: u16, y0: u16, x1: u16, y1: u16) -> Self {
        Region::Rect { x0, y0, x1, y1 }
    }

    pub const fn circle(cx: u16, cy: u16, radius: u16) -> Self {
        Region::Circle { cx, cy, radius }
    }

    pub fn contains(&self, point: TouchPoint) -> bool {
        match *self {
            Region::Rect { x0, y0, x1, y1 } => {
                point.x >= x0 && point.x < x1 && point.y >= y0 && point.y < y1
            }
            Region::Circle { cx, cy, radius } => {
                let dx = point.x as i32 - cx as i32;
                let dy = point.y as i32 - cy as i32;
                let r = radius as i32;
                dx * dx + dy * dy <= r * r
            }
        }
    }
}

/// Return the target of the first region that contains `point`.
pub fn first_hit<T: Copy>(table: &[(Region, T)], point: TouchPoint) -> Option<T> {
    table
        .iter()
        .find(|(region, _)| region.contains(point))
        .map(|(_, target)| *target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_upper_bounds_exclusive() {
        let r = Region::rect(10, 10, 20, 20);
        assert!(r.contains(TouchPoint::new(10, 10)));
        assert!(r.contains(TouchPoint::new(19, 19)));
        assert!(!r.contains(TouchPoint::new(20, 15)));
        assert!(!r.contains(TouchPoint::new(15, 20)));
    }

    #[test]
    fn test_circle_contains() {
        let c = Region::circle(120, 120, 10);
        assert!(c.contains(TouchPoint::new(120, 130)));
        assert!(!c.contains(TouchPoint::new(128, 128)));
    }

    #[test]
    fn test_first_hit_respects_order() {
        let table = [
            (Region::rect(0, 0, EDGE, 40), 1u8),
            (Region::rect(0, 0, EDGE, 80), 2u8),
        ];
        assert_eq!(first_hit(&table, TouchPoint::new(5, 5)), Some(1));
        assert_eq!(first_hit(&table, TouchPoint::new(5, 50)), Some(2));
        assert_eq!(first_hit(&table, TouchPoint::new(5, 90)), None);
    }
}
