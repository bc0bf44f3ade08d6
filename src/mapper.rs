use eframe::egui;

use crate::store::Point;

/// Converts between offsets inside the displayed image and natural pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    natural: egui::Vec2,
    display: egui::Vec2,
}

impl CoordinateMapper {
    /// Returns `None` when either size has a zero (or negative) dimension.
    pub fn new(natural: egui::Vec2, display: egui::Vec2) -> Option<Self> {
        if natural.x <= 0.0 || natural.y <= 0.0 || display.x <= 0.0 || display.y <= 0.0 {
            return None;
        }
        Some(Self { natural, display })
    }

    pub fn natural_size(&self) -> egui::Vec2 {
        self.natural
    }

    /// Display offset (relative to the image's top-left corner) to natural pixels.
    pub fn to_natural(&self, offset: egui::Vec2) -> Point {
        Point::new(
            (offset.x * self.natural.x / self.display.x).round() as i32,
            (offset.y * self.natural.y / self.display.y).round() as i32,
        )
    }

    /// Natural pixels to a display offset, unrounded.
    pub fn to_display(&self, point: Point) -> egui::Vec2 {
        egui::vec2(
            point.x as f32 * self.display.x / self.natural.x,
            point.y as f32 * self.display.y / self.natural.y,
        )
    }
}

/// Display size for an image of `natural` size shown in `available` space.
///
/// A fixed `scale` wins; otherwise the image is fitted preserving aspect ratio.
pub fn display_size(
    natural: egui::Vec2,
    available: egui::Vec2,
    scale: Option<f32>,
) -> egui::Vec2 {
    match scale {
        Some(factor) => natural * factor,
        None => {
            if natural.x <= 0.0 || natural.y <= 0.0 {
                return egui::Vec2::ZERO;
            }
            let fit = (available.x / natural.x).min(available.y / natural.y).max(0.0);
            natural * fit
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper(nw: f32, nh: f32, dw: f32, dh: f32) -> CoordinateMapper {
        CoordinateMapper::new(egui::vec2(nw, nh), egui::vec2(dw, dh)).unwrap()
    }

    #[test]
    fn test_identity_scale() {
        let m = mapper(400.0, 300.0, 400.0, 300.0);
        assert_eq!(m.to_natural(egui::vec2(12.0, 34.0)), Point::new(12, 34));
        assert_eq!(m.to_display(Point::new(12, 34)), egui::vec2(12.0, 34.0));
    }

    #[test]
    fn test_downscaled_display_rounds() {
        // 1000x800 image shown at half size
        let m = mapper(1000.0, 800.0, 500.0, 400.0);
        assert_eq!(m.to_natural(egui::vec2(50.0, 100.0)), Point::new(100, 200));
        assert_eq!(m.to_natural(egui::vec2(10.3, 10.2)), Point::new(21, 20));
    }

    #[test]
    fn test_non_uniform_scale() {
        let m = mapper(200.0, 100.0, 100.0, 100.0);
        assert_eq!(m.to_natural(egui::vec2(10.0, 10.0)), Point::new(20, 10));
        assert_eq!(m.to_display(Point::new(20, 10)), egui::vec2(10.0, 10.0));
    }

    #[test]
    fn test_round_trip_within_one_pixel() {
        let sizes = [
            (1920.0, 1080.0, 640.0, 360.0),
            (333.0, 777.0, 1000.0, 512.5),
            (50.0, 50.0, 49.0, 51.0),
            (4000.0, 3000.0, 123.0, 97.0),
        ];
        for (nw, nh, dw, dh) in sizes {
            let m = mapper(nw, nh, dw, dh);
            for x in (0..nw as i32).step_by(37) {
                for y in (0..nh as i32).step_by(41) {
                    let p = Point::new(x, y);
                    let back = m.to_natural(m.to_display(p));
                    assert!((back.x - p.x).abs() <= 1, "{p:?} -> {back:?}");
                    assert!((back.y - p.y).abs() <= 1, "{p:?} -> {back:?}");
                }
            }
        }
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(CoordinateMapper::new(egui::vec2(0.0, 10.0), egui::vec2(10.0, 10.0)).is_none());
        assert!(CoordinateMapper::new(egui::vec2(10.0, 10.0), egui::vec2(10.0, 0.0)).is_none());
    }

    #[test]
    fn test_display_size_fixed_scale() {
        let size = display_size(egui::vec2(100.0, 50.0), egui::vec2(10.0, 10.0), Some(2.0));
        assert_eq!(size, egui::vec2(200.0, 100.0));
    }

    #[test]
    fn test_display_size_fits_preserving_aspect() {
        let size = display_size(egui::vec2(800.0, 400.0), egui::vec2(400.0, 400.0), None);
        assert_eq!(size, egui::vec2(400.0, 200.0));

        let size = display_size(egui::vec2(100.0, 200.0), egui::vec2(400.0, 300.0), None);
        assert_eq!(size, egui::vec2(150.0, 300.0));
    }
}
