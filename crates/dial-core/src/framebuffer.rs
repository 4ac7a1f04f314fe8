//! Off-screen copy of the panel with damage tracking.
//!
//! Pages render here rather than over SPI. Writing a pixel with the color it
//! already has is free; anything else grows a damage box, and [`flush`]
//! pushes only that box to the panel in one `fill_contiguous` call. A ticking
//! seconds box therefore costs a few kilobytes per frame instead of a full
//! screen.
//!
//! [`flush`]: FrameBuffer::flush

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{ContainsPoint, Rectangle};
use log::debug;

use crate::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX};

const STRIDE: usize = DISPLAY_WIDTH_PX as usize;

const SCREEN: Rectangle = Rectangle::new(
    Point::zero(),
    Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX),
);

/// Inclusive corners of everything written since the last flush.
#[derive(Debug, Clone, Copy)]
struct Damage {
    top_left: Point,
    bottom_right: Point,
}

impl Damage {
    fn at(point: Point) -> Self {
        Self {
            top_left: point,
            bottom_right: point,
        }
    }

    fn include(&mut self, point: Point) {
        self.top_left = self.top_left.component_min(point);
        self.bottom_right = self.bottom_right.component_max(point);
    }

    fn area(&self) -> Rectangle {
        Rectangle::with_corners(self.top_left, self.bottom_right)
    }
}

/// 240x240 Rgb565 buffer, 115,200 bytes on the heap (PSRAM on the watch).
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
    damage: Option<Damage>,
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    /// A black buffer, matching a freshly reset panel.
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::BLACK; STRIDE * DISPLAY_HEIGHT_PX as usize],
            damage: None,
        }
    }

    /// `point` must lie on screen.
    #[inline]
    fn put(&mut self, point: Point, color: Rgb565) {
        let slot = &mut self.pixels[point.y as usize * STRIDE + point.x as usize];
        if *slot == color {
            return;
        }
        *slot = color;
        match &mut self.damage {
            Some(damage) => damage.include(point),
            None => self.damage = Some(Damage::at(point)),
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.damage.is_some()
    }

    /// Mark the whole screen damaged, e.g. after the panel lost its contents.
    pub fn invalidate(&mut self) {
        self.damage = Some(Damage {
            top_left: Point::zero(),
            bottom_right: Point::new(DISPLAY_WIDTH_PX as i32 - 1, DISPLAY_HEIGHT_PX as i32 - 1),
        });
    }

    /// Push the damaged box to `display` and forget the damage.
    ///
    /// Does nothing when no pixel changed.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(damage) = self.damage.take() else {
            return Ok(());
        };
        let area = damage.area();
        debug!(
            "Flushing {}x{} at ({}, {})",
            area.size.width, area.size.height, area.top_left.x, area.top_left.y
        );

        let left = area.top_left.x as usize;
        let width = area.size.width as usize;
        let pixels = &self.pixels;
        let colors = area.rows().flat_map(move |y| {
            let start = y as usize * STRIDE + left;
            pixels[start..start + width].iter().copied()
        });

        display.fill_contiguous(&area, colors)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        SCREEN.size
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if SCREEN.contains(point) {
                self.put(point, color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Rectangle::points walks rows top to bottom, the order colors arrive in.
        for (point, color) in area.points().zip(colors) {
            if SCREEN.contains(point) {
                self.put(point, color);
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        for point in area.intersection(&SCREEN).points() {
            self.put(point, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_solid(&SCREEN, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_unchanged_pixels_stay_clean() {
        let mut fb = FrameBuffer::new();
        fb.clear(Rgb565::BLACK).unwrap();
        assert!(!fb.is_dirty(), "clearing to the same color changes nothing");
    }

    #[test]
    fn test_flush_sends_only_damaged_box() {
        let mut fb = FrameBuffer::new();
        Rectangle::new(Point::new(2, 3), Size::new(4, 2))
            .into_styled(PrimitiveStyle::with_fill(Rgb565::RED))
            .draw(&mut fb)
            .unwrap();
        assert!(fb.is_dirty());

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        fb.flush(&mut display).unwrap();
        assert_eq!(
            display.affected_area(),
            Rectangle::new(Point::new(2, 3), Size::new(4, 2)),
            "only the filled rectangle is sent"
        );
        assert!(!fb.is_dirty(), "flush forgets the damage");
    }

    #[test]
    fn test_off_screen_pixels_ignored() {
        let mut fb = FrameBuffer::new();
        Pixel(Point::new(-1, 500), Rgb565::WHITE).draw(&mut fb).unwrap();
        fb.fill_solid(
            &Rectangle::new(Point::new(240, 0), Size::new(10, 10)),
            Rgb565::WHITE,
        )
        .unwrap();
        assert!(!fb.is_dirty());
    }

    #[test]
    fn test_contiguous_fill_clipped_at_edge() {
        let mut fb = FrameBuffer::new();
        let area = Rectangle::new(Point::new(238, 0), Size::new(4, 1));
        fb.fill_contiguous(&area, [Rgb565::RED; 4]).unwrap();

        let damage = fb.damage.map(|d| d.area());
        assert_eq!(
            damage,
            Some(Rectangle::new(Point::new(238, 0), Size::new(2, 1))),
            "columns past the right edge are dropped"
        );
    }
}
