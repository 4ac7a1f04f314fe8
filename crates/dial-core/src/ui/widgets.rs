// src/ui/widgets.rs
//! Retained widgets and the per-page widget registry.
//!
//! Pages build all of their widgets once at boot. Afterwards only the text,
//! color, bounds and visibility of existing widgets change. Every color a
//! widget paints with carries a [`ColorRole`], so a theme change is a single
//! pass over each page's [`WidgetRegistry`] instead of a hand-written list of
//! widgets to recolor.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment,
};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use super::styling::{PALETTE, ThemeColors};
use crate::theme::{DEFAULT_OUTLINE_INDEX, DEFAULT_TEXT_INDEX};

extern crate alloc;
use alloc::vec::Vec;

/// Maximum label length in characters.
pub const LABEL_CAPACITY: usize = 24;

/// How a paint reacts to a theme broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    /// Follows the theme's text color
    Text,
    /// Follows the theme's outline color
    Outline,
    /// Never recolored
    Fixed,
}

/// A color together with the role that decides how it is recolored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paint {
    pub role: ColorRole,
    pub color: Rgb565,
}

impl Paint {
    pub const fn text() -> Self {
        Self {
            role: ColorRole::Text,
            color: PALETTE[DEFAULT_TEXT_INDEX],
        }
    }

    pub const fn outline() -> Self {
        Self {
            role: ColorRole::Outline,
            color: PALETTE[DEFAULT_OUTLINE_INDEX],
        }
    }

    pub const fn fixed(color: Rgb565) -> Self {
        Self {
            role: ColorRole::Fixed,
            color,
        }
    }

    /// Re-resolve the color from the theme. Returns `true` if it changed.
    fn apply(&mut self, colors: &ThemeColors) -> bool {
        let next = match self.role {
            ColorRole::Text => colors.text,
            ColorRole::Outline => colors.outline,
            ColorRole::Fixed => self.color,
        };
        let changed = next != self.color;
        self.color = next;
        changed
    }
}

/// Font presets.
///
/// Larger text is produced by integer pixel scaling of these fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Medium,
}

impl TextSize {
    pub fn font(&self) -> &'static MonoFont<'static> {
        match self {
            TextSize::Small => &embedded_graphics::mono_font::ascii::FONT_6X10,
            TextSize::Medium => &embedded_graphics::mono_font::ascii::FONT_10X20,
        }
    }
}

/// Geometry of a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Rect {
        bounds: Rectangle,
        stroke_width: u32,
    },
    RoundedRect {
        bounds: Rectangle,
        radius: u32,
        stroke_width: u32,
    },
    Circle {
        top_left: Point,
        diameter: u32,
        stroke_width: u32,
    },
    /// Text anchored at a point. The stroke paint, when present, is drawn
    /// as a halo `halo` pixels around the glyphs.
    Label {
        text: heapless::String<LABEL_CAPACITY>,
        anchor: Point,
        alignment: Alignment,
        size: TextSize,
        scale: u32,
        halo: u32,
    },
}

/// A single retained drawable node.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    kind: WidgetKind,
    fill: Option<Paint>,
    stroke: Option<Paint>,
    visible: bool,
}

impl Widget {
    pub fn rect(bounds: Rectangle) -> Self {
        Self::new(WidgetKind::Rect {
            bounds,
            stroke_width: 0,
        })
    }

    pub fn rounded_rect(bounds: Rectangle, radius: u32) -> Self {
        Self::new(WidgetKind::RoundedRect {
            bounds,
            radius,
            stroke_width: 0,
        })
    }

    pub fn circle(center: Point, diameter: u32) -> Self {
        let r = (diameter / 2) as i32;
        Self::new(WidgetKind::Circle {
            top_left: center - Point::new(r, r),
            diameter,
            stroke_width: 0,
        })
    }

    /// Text centered horizontally and vertically on `anchor`.
    pub fn label(text: &str, anchor: Point, size: TextSize) -> Self {
        let mut label = heapless::String::new();
        label.push_str(text).ok();
        Self::new(WidgetKind::Label {
            text: label,
            anchor,
            alignment: Alignment::Center,
            size,
            scale: 1,
            halo: 0,
        })
        .with_fill(Paint::text())
    }

    fn new(kind: WidgetKind) -> Self {
        Self {
            kind,
            fill: None,
            stroke: None,
            visible: true,
        }
    }

    pub fn with_fill(mut self, paint: Paint) -> Self {
        self.fill = Some(paint);
        self
    }

    /// Outline for shapes, halo for labels.
    pub fn with_stroke(mut self, paint: Paint, width: u32) -> Self {
        self.stroke = Some(paint);
        match &mut self.kind {
            WidgetKind::Rect { stroke_width, .. }
            | WidgetKind::RoundedRect { stroke_width, .. }
            | WidgetKind::Circle { stroke_width, .. } => *stroke_width = width,
            WidgetKind::Label { halo, .. } => *halo = width,
        }
        self
    }

    /// Integer pixel scale for labels; ignored by shapes.
    pub fn with_scale(mut self, factor: u32) -> Self {
        if let WidgetKind::Label { scale, .. } = &mut self.kind {
            *scale = factor.max(1);
        }
        self
    }

    pub fn with_alignment(mut self, value: Alignment) -> Self {
        if let WidgetKind::Label { alignment, .. } = &mut self.kind {
            *alignment = value;
        }
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn fill(&self) -> Option<Paint> {
        self.fill
    }

    pub fn stroke(&self) -> Option<Paint> {
        self.stroke
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Label text, `None` for shapes.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            WidgetKind::Label { text, .. } => Some(text.as_str()),
            _ => None,
        }
    }

    /// Replace a label's text. Returns `true` if anything changed.
    pub fn set_text(&mut self, value: &str) -> bool {
        let WidgetKind::Label { text, .. } = &mut self.kind else {
            return false;
        };
        if text.as_str() == value {
            return false;
        }
        text.clear();
        for c in value.chars() {
            if text.push(c).is_err() {
                break;
            }
        }
        true
    }

    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        changed
    }

    /// Move or resize a shape. Labels are left untouched.
    pub fn set_bounds(&mut self, value: Rectangle) -> bool {
        match &mut self.kind {
            WidgetKind::Rect { bounds, .. } | WidgetKind::RoundedRect { bounds, .. } => {
                let changed = *bounds != value;
                *bounds = value;
                changed
            }
            _ => false,
        }
    }

    /// Override a fixed fill color (swatches, highlights).
    pub fn set_fill_color(&mut self, color: Rgb565) -> bool {
        match &mut self.fill {
            Some(paint) if paint.role == ColorRole::Fixed && paint.color != color => {
                paint.color = color;
                true
            }
            _ => false,
        }
    }

    pub fn apply_theme(&mut self, colors: &ThemeColors) -> bool {
        let mut changed = false;
        if let Some(paint) = &mut self.fill {
            changed |= paint.apply(colors);
        }
        if let Some(paint) = &mut self.stroke {
            changed |= paint.apply(colors);
        }
        changed
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if !self.visible {
            return Ok(());
        }
        match &self.kind {
            WidgetKind::Rect {
                bounds,
                stroke_width,
            } => bounds
                .into_styled(self.shape_style(*stroke_width))
                .draw(display),
            WidgetKind::RoundedRect {
                bounds,
                radius,
                stroke_width,
            } => RoundedRectangle::with_equal_corners(*bounds, Size::new(*radius, *radius))
                .into_styled(self.shape_style(*stroke_width))
                .draw(display),
            WidgetKind::Circle {
                top_left,
                diameter,
                stroke_width,
            } => Circle::new(*top_left, *diameter)
                .into_styled(self.shape_style(*stroke_width))
                .draw(display),
            WidgetKind::Label {
                text,
                anchor,
                alignment,
                size,
                scale,
                halo,
            } => {
                if let (Some(paint), true) = (self.stroke, *halo > 0) {
                    let h = *halo as i32;
                    for (dx, dy) in [
                        (-h, 0),
                        (h, 0),
                        (0, -h),
                        (0, h),
                        (-h, -h),
                        (h, h),
                        (-h, h),
                        (h, -h),
                    ] {
                        draw_text(
                            display,
                            text,
                            *anchor + Point::new(dx, dy),
                            *alignment,
                            *size,
                            *scale,
                            paint.color,
                        )?;
                    }
                }
                let color = self.fill.map(|p| p.color).unwrap_or(Rgb565::WHITE);
                draw_text(display, text, *anchor, *alignment, *size, *scale, color)
            }
        }
    }

    fn shape_style(&self, stroke_width: u32) -> PrimitiveStyle<Rgb565> {
        let mut builder = PrimitiveStyleBuilder::new().stroke_alignment(StrokeAlignment::Inside);
        if let Some(fill) = self.fill {
            builder = builder.fill_color(fill.color);
        }
        if let (Some(stroke), true) = (self.stroke, stroke_width > 0) {
            builder = builder.stroke_color(stroke.color).stroke_width(stroke_width);
        }
        builder.build()
    }
}

fn draw_text<D: DrawTarget<Color = Rgb565>>(
    display: &mut D,
    text: &str,
    anchor: Point,
    alignment: Alignment,
    size: TextSize,
    scale: u32,
    color: Rgb565,
) -> Result<(), D::Error> {
    let character_style = MonoTextStyle::new(size.font(), color);
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Middle)
        .build();

    if scale <= 1 {
        Text::with_text_style(text, anchor, character_style, text_style).draw(display)?;
    } else {
        let mut scaled = ScaledTarget {
            target: display,
            origin: anchor,
            scale,
        };
        Text::with_text_style(text, Point::zero(), character_style, text_style)
            .draw(&mut scaled)?;
    }
    Ok(())
}

/// Draw target adapter that magnifies every pixel into a `scale`×`scale`
/// block around `origin`.
struct ScaledTarget<'a, D> {
    target: &'a mut D,
    origin: Point,
    scale: u32,
}

impl<D: DrawTarget<Color = Rgb565>> Dimensions for ScaledTarget<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        let outer = self.target.bounding_box();
        let s = self.scale as i32;
        let top_left = Point::new(
            (outer.top_left.x - self.origin.x).div_euclid(s),
            (outer.top_left.y - self.origin.y).div_euclid(s),
        );
        Rectangle::new(
            top_left,
            Size::new(
                outer.size.width / self.scale + 2,
                outer.size.height / self.scale + 2,
            ),
        )
    }
}

impl<D: DrawTarget<Color = Rgb565>> DrawTarget for ScaledTarget<'_, D> {
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let s = self.scale as i32;
        for Pixel(point, color) in pixels {
            let block = Rectangle::new(
                self.origin + Point::new(point.x * s, point.y * s),
                Size::new(self.scale, self.scale),
            );
            self.target.fill_solid(&block, color)?;
        }
        Ok(())
    }
}

/// Handle to a widget inside a [`WidgetRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetId(usize);

/// Ordered list of a page's widgets, drawn back to front.
#[derive(Debug, Default)]
pub struct WidgetRegistry {
    widgets: Vec<Widget>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
        }
    }

    pub fn add(&mut self, widget: Widget) -> WidgetId {
        self.widgets.push(widget);
        WidgetId(self.widgets.len() - 1)
    }

    pub fn get(&self, id: WidgetId) -> &Widget {
        &self.widgets[id.0]
    }

    pub fn get_mut(&mut self, id: WidgetId) -> &mut Widget {
        &mut self.widgets[id.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Widget> {
        self.widgets.iter()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Set a label's text, returning `true` if it changed.
    pub fn set_text(&mut self, id: WidgetId, text: &str) -> bool {
        self.get_mut(id).set_text(text)
    }

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> bool {
        self.get_mut(id).set_visible(visible)
    }

    /// Re-resolve every themed paint of every widget.
    pub fn apply_theme(&mut self, colors: &ThemeColors) -> bool {
        let mut changed = false;
        for widget in &mut self.widgets {
            changed |= widget.apply_theme(colors);
        }
        changed
    }

    pub fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        for widget in &self.widgets {
            widget.draw(display)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::RgbColor;

    fn colors() -> ThemeColors {
        ThemeColors {
            text: Rgb565::RED,
            outline: Rgb565::BLUE,
        }
    }

    #[test]
    fn test_apply_theme_follows_roles() {
        let mut registry = WidgetRegistry::new();
        let label = registry.add(
            Widget::label("12", Point::new(10, 10), TextSize::Medium)
                .with_stroke(Paint::outline(), 2),
        );
        let fixed = registry.add(
            Widget::rect(Rectangle::new(Point::zero(), Size::new(4, 4)))
                .with_fill(Paint::fixed(Rgb565::GREEN)),
        );

        assert!(registry.apply_theme(&colors()));

        let label = registry.get(label);
        assert_eq!(label.fill().map(|p| p.color), Some(Rgb565::RED));
        assert_eq!(label.stroke().map(|p| p.color), Some(Rgb565::BLUE));
        assert_eq!(
            registry.get(fixed).fill().map(|p| p.color),
            Some(Rgb565::GREEN)
        );

        assert!(!registry.apply_theme(&colors()), "second pass is a no-op");
    }

    #[test]
    fn test_set_text_reports_change() {
        let mut widget = Widget::label("00", Point::zero(), TextSize::Small);
        assert!(!widget.set_text("00"));
        assert!(widget.set_text("01"));
        assert_eq!(widget.text(), Some("01"));
    }

    #[test]
    fn test_set_text_truncates_to_capacity() {
        let mut widget = Widget::label("", Point::zero(), TextSize::Small);
        widget.set_text("abcdefghijklmnopqrstuvwxyz0123");
        assert_eq!(widget.text().map(|t| t.len()), Some(LABEL_CAPACITY));
    }

    #[test]
    fn test_fixed_fill_override_ignores_themed_paint() {
        let mut themed = Widget::rect(Rectangle::new(Point::zero(), Size::new(4, 4)))
            .with_fill(Paint::text());
        assert!(!themed.set_fill_color(Rgb565::CYAN));

        let mut swatch = Widget::rect(Rectangle::new(Point::zero(), Size::new(4, 4)))
            .with_fill(Paint::fixed(Rgb565::BLACK));
        assert!(swatch.set_fill_color(Rgb565::CYAN));
    }
}
