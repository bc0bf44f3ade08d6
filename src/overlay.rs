use eframe::egui;

use crate::mapper::CoordinateMapper;
use crate::store::Point;

/// Edge length of a marker cross, in display pixels.
pub const MARKER_SIZE: f32 = 10.0;

const RETICLE_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 0, 0);
const MARKER_COLOR: egui::Color32 = egui::Color32::from_rgb(0, 200, 255);
const LABEL_FONT_SIZE: f32 = 12.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub point: Point,
    /// Top-left of the cross box; the cross is centred on the target pixel.
    pub origin: egui::Pos2,
    pub label: String,
}

impl Marker {
    pub fn center(&self) -> egui::Pos2 {
        self.origin + egui::Vec2::splat(MARKER_SIZE * 0.5)
    }
}

/// Everything drawn over the image for one frame, derived from session state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    pub reticle: Option<egui::Pos2>,
    pub markers: Vec<Marker>,
}

impl Overlay {
    /// One marker per point, in stored order. No mapper means no markers.
    pub fn build(
        image_rect: egui::Rect,
        mapper: Option<&CoordinateMapper>,
        points: &[Point],
        reticle: Option<egui::Vec2>,
    ) -> Self {
        let markers = match mapper {
            Some(mapper) => points
                .iter()
                .map(|&point| {
                    let center = image_rect.min + mapper.to_display(point);
                    Marker {
                        point,
                        origin: center - egui::Vec2::splat(MARKER_SIZE * 0.5),
                        label: format!("({}, {})", point.x, point.y),
                    }
                })
                .collect(),
            None => Vec::new(),
        };

        Self {
            reticle: reticle.map(|offset| image_rect.min + offset),
            markers,
        }
    }

    pub fn paint(&self, painter: &egui::Painter, image_rect: egui::Rect) {
        if let Some(pos) = self.reticle {
            let stroke = egui::Stroke::new(1.0, RETICLE_COLOR);
            painter.hline(image_rect.x_range(), pos.y, stroke);
            painter.vline(pos.x, image_rect.y_range(), stroke);
        }

        for marker in &self.markers {
            self.paint_marker(painter, marker);
        }
    }

    fn paint_marker(&self, painter: &egui::Painter, marker: &Marker) {
        let stroke = egui::Stroke::new(2.0, MARKER_COLOR);
        let c = marker.center();
        let half = MARKER_SIZE * 0.5;
        painter.line_segment([c - egui::vec2(half, 0.0), c + egui::vec2(half, 0.0)], stroke);
        painter.line_segment([c - egui::vec2(0.0, half), c + egui::vec2(0.0, half)], stroke);

        let galley = painter.layout_no_wrap(
            marker.label.clone(),
            egui::FontId::monospace(LABEL_FONT_SIZE),
            egui::Color32::BLACK,
        );
        let text_pos = egui::pos2(marker.origin.x + MARKER_SIZE + 4.0, marker.origin.y);
        let background = egui::Rect::from_min_size(text_pos, galley.size()).expand(2.0);
        painter.rect_filled(background, 2.0, egui::Color32::WHITE);
        painter.galley(text_pos, galley, egui::Color32::BLACK);
    }
}
