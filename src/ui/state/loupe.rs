// SPDX-License-Identifier: MPL-2.0
//! Loupe zoom for the lightbox image.
//!
//! Holding the primary button over the image magnifies it to its natural
//! pixel scale, anchored where the pointer sits; dragging pans the
//! magnified view under the pointer. The drag is tracked globally, so
//! leaving the image bounds keeps panning; releasing anywhere returns
//! the image to its fitted, centered display.

use iced::widget::scrollable::AbsoluteOffset;
use iced::{Point, Size};

/// An in-flight loupe interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Loupe {
    /// Uniform magnification factor: natural width over displayed width.
    scale: f32,
    /// Transform origin as percentages of the displayed image size.
    origin: (f32, f32),
    natural: Size,
    displayed: Size,
}

/// Loupe state for the active lightbox image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LoupeZoom {
    active: Option<Loupe>,
}

impl LoupeZoom {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_zooming(&self) -> bool {
        self.active.is_some()
    }

    /// Current magnification factor, while zooming.
    #[must_use]
    pub fn scale(&self) -> Option<f32> {
        self.active.map(|loupe| loupe.scale)
    }

    /// Current transform origin in percent of the displayed size.
    #[must_use]
    pub fn origin(&self) -> Option<(f32, f32)> {
        self.active.map(|loupe| loupe.origin)
    }

    /// Primary button pressed at `cursor` (relative to the displayed
    /// image's top-left corner).
    ///
    /// Activates only when the natural pixel size exceeds the displayed
    /// size; otherwise there is nothing to magnify and this is a no-op.
    /// Returns whether the loupe engaged.
    pub fn press(&mut self, natural: Size, displayed: Size, cursor: Point) -> bool {
        if natural.width <= displayed.width && natural.height <= displayed.height {
            return false;
        }
        if displayed.width <= 0.0 || displayed.height <= 0.0 {
            return false;
        }
        self.active = Some(Loupe {
            scale: natural.width / displayed.width,
            origin: origin_percent(displayed, cursor),
            natural,
            displayed,
        });
        true
    }

    /// Pointer moved to `cursor` (same coordinate space as [`press`],
    /// possibly outside the image bounds). Updates the transform origin so
    /// the magnified view pans under the pointer. No-op when not zooming.
    ///
    /// [`press`]: LoupeZoom::press
    pub fn pointer_moved(&mut self, cursor: Point) {
        if let Some(loupe) = self.active.as_mut() {
            loupe.origin = origin_percent(loupe.displayed, cursor);
        }
    }

    /// Pointer released: drop the magnification, back to fitted display.
    pub fn release(&mut self) {
        self.active = None;
    }

    /// Hard reset, used when the displayed image changes or the lightbox
    /// reopens: zoom never carries across images.
    pub fn reset(&mut self) {
        self.active = None;
    }

    /// Scroll offset that puts the transform-origin point of the magnified
    /// image under the same point of the viewport: `f · (natural − displayed)`
    /// per axis.
    #[must_use]
    pub fn viewport_offset(&self) -> Option<AbsoluteOffset> {
        self.active.map(|loupe| {
            let (fx, fy) = (loupe.origin.0 / 100.0, loupe.origin.1 / 100.0);
            AbsoluteOffset {
                x: (fx * (loupe.natural.width - loupe.displayed.width)).max(0.0),
                y: (fy * (loupe.natural.height - loupe.displayed.height)).max(0.0),
            }
        })
    }
}

/// Cursor position as clamped percentages of the displayed image size.
fn origin_percent(displayed: Size, cursor: Point) -> (f32, f32) {
    (
        (cursor.x / displayed.width * 100.0).clamp(0.0, 100.0),
        (cursor.y / displayed.height * 100.0).clamp(0.0, 100.0),
    )
}

/// Letterbox-fits `natural` into `viewport` without ever upscaling.
///
/// When the image is smaller than the viewport on both axes it displays at
/// its natural size, which is exactly the case where the loupe refuses to
/// engage.
#[must_use]
pub fn fit_size(natural: Size, viewport: Size) -> Size {
    if natural.width <= 0.0 || natural.height <= 0.0 {
        return Size::ZERO;
    }
    let ratio = (viewport.width / natural.width)
        .min(viewport.height / natural.height)
        .min(1.0);
    Size::new(natural.width * ratio, natural.height * ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NATURAL: Size = Size {
        width: 2000.0,
        height: 1000.0,
    };
    const DISPLAYED: Size = Size {
        width: 800.0,
        height: 400.0,
    };

    #[test]
    fn press_engages_only_when_there_is_something_to_magnify() {
        let mut loupe = LoupeZoom::new();
        let small = Size::new(400.0, 200.0);
        assert!(!loupe.press(small, small, Point::new(10.0, 10.0)));
        assert!(!loupe.is_zooming());

        assert!(loupe.press(NATURAL, DISPLAYED, Point::new(10.0, 10.0)));
        assert!(loupe.is_zooming());
    }

    #[test]
    fn scale_is_natural_over_displayed_width() {
        let mut loupe = LoupeZoom::new();
        loupe.press(NATURAL, DISPLAYED, Point::new(0.0, 0.0));
        assert_eq!(loupe.scale(), Some(2.5));
    }

    #[test]
    fn origin_is_pointer_position_in_percent() {
        let mut loupe = LoupeZoom::new();
        loupe.press(NATURAL, DISPLAYED, Point::new(400.0, 100.0));
        assert_eq!(loupe.origin(), Some((50.0, 25.0)));
    }

    #[test]
    fn moving_pans_the_origin() {
        let mut loupe = LoupeZoom::new();
        loupe.press(NATURAL, DISPLAYED, Point::new(0.0, 0.0));
        loupe.pointer_moved(Point::new(800.0, 400.0));
        assert_eq!(loupe.origin(), Some((100.0, 100.0)));
    }

    #[test]
    fn moves_outside_the_image_clamp_to_the_edges() {
        let mut loupe = LoupeZoom::new();
        loupe.press(NATURAL, DISPLAYED, Point::new(400.0, 200.0));
        loupe.pointer_moved(Point::new(-50.0, 9999.0));
        assert_eq!(loupe.origin(), Some((0.0, 100.0)));
    }

    #[test]
    fn move_without_press_is_a_no_op() {
        let mut loupe = LoupeZoom::new();
        loupe.pointer_moved(Point::new(100.0, 100.0));
        assert!(!loupe.is_zooming());
    }

    #[test]
    fn release_returns_to_unscaled_display() {
        let mut loupe = LoupeZoom::new();
        loupe.press(NATURAL, DISPLAYED, Point::new(0.0, 0.0));
        loupe.release();
        assert!(!loupe.is_zooming());
        assert_eq!(loupe.scale(), None);
        assert_eq!(loupe.viewport_offset(), None);
    }

    #[test]
    fn switching_images_resets_zoom_first() {
        let mut loupe = LoupeZoom::new();
        loupe.press(NATURAL, DISPLAYED, Point::new(0.0, 0.0));
        loupe.reset();
        assert!(!loupe.is_zooming());
    }

    #[test]
    fn viewport_offset_tracks_the_origin_fraction() {
        let mut loupe = LoupeZoom::new();
        loupe.press(NATURAL, DISPLAYED, Point::new(0.0, 0.0));
        assert_eq!(
            loupe.viewport_offset(),
            Some(AbsoluteOffset { x: 0.0, y: 0.0 })
        );

        loupe.pointer_moved(Point::new(800.0, 400.0));
        // 100% of (2000-800, 1000-400).
        assert_eq!(
            loupe.viewport_offset(),
            Some(AbsoluteOffset {
                x: 1200.0,
                y: 600.0
            })
        );

        loupe.pointer_moved(Point::new(400.0, 200.0));
        assert_eq!(
            loupe.viewport_offset(),
            Some(AbsoluteOffset { x: 600.0, y: 300.0 })
        );
    }

    #[test]
    fn fit_size_letterboxes_without_upscaling() {
        let viewport = Size::new(800.0, 800.0);
        let fitted = fit_size(NATURAL, viewport);
        assert_eq!(fitted, Size::new(800.0, 400.0));

        // Smaller images keep their natural size.
        let small = Size::new(300.0, 100.0);
        assert_eq!(fit_size(small, viewport), small);
    }

    #[test]
    fn fitted_display_of_a_large_image_always_engages_the_loupe() {
        let viewport = Size::new(800.0, 800.0);
        let displayed = fit_size(NATURAL, viewport);
        let mut loupe = LoupeZoom::new();
        assert!(loupe.press(NATURAL, displayed, Point::new(1.0, 1.0)));
    }
}
