//! Schematic yard map panel.
//!
//! Paints the fixed yard plan (walls, parking bays, work area, offices,
//! aisles) on a square canvas, then translates the session's marker arena
//! into vehicle glyphs. Markers are draggable; a release reports the map
//! position back to the application, which applies the optimistic patch and
//! dispatches persistence.

use egui::{
    Align2, Color32, CornerRadius, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2,
};
use fleetyard_core::geometry::MapPoint;
use fleetyard_core::status::Rgb;
use fleetyard_core::types::VehicleId;
use fleetyard_sync::session::MapSession;

/// Marker glyph footprint in screen pixels (constant, zoom-free canvas).
const GLYPH_SIZE: Vec2 = Vec2::new(30.0, 20.0);

/// A drag in progress.
#[derive(Debug, Clone)]
pub struct ActiveDrag {
    pub id: VehicleId,
    pub at: MapPoint,
}

/// Panel state kept across frames.
#[derive(Debug, Default)]
pub struct MapPanelState {
    /// Marker currently being dragged, if any
    pub drag: Option<ActiveDrag>,
}

/// Interaction produced by one frame.
#[derive(Debug, Clone)]
pub enum MapAction {
    /// A marker drag was released at this map position
    DragReleased { id: VehicleId, at: MapPoint },
}

/// Shows the yard map and returns the frame's interaction, if any.
pub fn show(
    ui: &mut egui::Ui,
    session: &MapSession,
    state: &mut MapPanelState,
    canvas_size: f64,
) -> Option<MapAction> {
    let side = ui
        .available_size()
        .min_elem()
        .max(240.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
    let rect = response.rect;
    let scale = side / canvas_size as f32;

    let to_screen = |p: MapPoint| {
        Pos2::new(
            rect.left() + p.lng as f32 * scale,
            rect.top() + p.lat as f32 * scale,
        )
    };
    let to_map = |pos: Pos2| {
        MapPoint::new(
            (((pos.y - rect.top()) / scale) as f64).clamp(0.0, canvas_size),
            (((pos.x - rect.left()) / scale) as f64).clamp(0.0, canvas_size),
        )
    };

    draw_plan(&painter, rect, scale);

    let mut action = None;

    for marker in session.markers() {
        let dragging_this = state
            .drag
            .as_ref()
            .filter(|d| d.id == marker.id)
            .map(|d| d.at);
        let screen_pos = to_screen(dragging_this.unwrap_or(marker.position));

        let glyph_rect = Rect::from_center_size(screen_pos, GLYPH_SIZE);
        let id = ui.id().with(marker.id.as_str());
        let glyph_response = ui
            .interact(glyph_rect, id, Sense::click_and_drag())
            .on_hover_text(marker.label.clone());

        if glyph_response.drag_started() {
            state.drag = Some(ActiveDrag {
                id: marker.id.clone(),
                at: marker.position,
            });
        }
        if glyph_response.dragged() {
            if let (Some(drag), Some(pointer)) =
                (state.drag.as_mut(), glyph_response.interact_pointer_pos())
            {
                drag.at = to_map(pointer);
            }
        }
        if glyph_response.drag_stopped() {
            if let Some(drag) = state.drag.take() {
                action = Some(MapAction::DragReleased {
                    id: drag.id,
                    at: drag.at,
                });
            }
        }

        draw_vehicle_glyph(&painter, glyph_rect, marker.color);
        painter.text(
            screen_pos + Vec2::new(0.0, -16.0),
            Align2::CENTER_CENTER,
            marker.id.as_str(),
            FontId::proportional(10.0),
            Color32::DARK_GRAY,
        );
    }

    action
}

/// Paints the fixed yard plan, scaled from canvas units to the panel.
fn draw_plan(painter: &egui::Painter, rect: Rect, scale: f32) {
    let area = |x: f32, y: f32, w: f32, h: f32| {
        Rect::from_min_size(
            Pos2::new(rect.left() + x * scale, rect.top() + y * scale),
            Vec2::new(w * scale, h * scale),
        )
    };
    let line = |painter: &egui::Painter, x1: f32, y1: f32, x2: f32, y2: f32, stroke: Stroke| {
        painter.line_segment(
            [
                Pos2::new(rect.left() + x1 * scale, rect.top() + y1 * scale),
                Pos2::new(rect.left() + x2 * scale, rect.top() + y2 * scale),
            ],
            stroke,
        );
    };

    let floor = Color32::from_rgb(0xF5, 0xF5, 0xF5);
    let aisle = Color32::from_rgb(0xEE, 0xEE, 0xEE);
    let green = Color32::from_rgb(0xE8, 0xF5, 0xE9);
    let bay_stroke = Stroke::new(1.0, Color32::from_rgb(0xCC, 0xCC, 0xCC));

    painter.rect_filled(rect, CornerRadius::ZERO, Color32::WHITE);
    painter.rect_stroke(
        area(100.0, 100.0, 800.0, 800.0),
        CornerRadius::ZERO,
        Stroke::new(3.0, Color32::from_rgb(0x33, 0x33, 0x33)),
        StrokeKind::Middle,
    );
    painter.rect_filled(area(150.0, 150.0, 700.0, 600.0), CornerRadius::ZERO, floor);

    // Parking bay separators, top and bottom rows
    for i in 0..10 {
        let x = 200.0 + i as f32 * 65.0;
        line(painter, x, 180.0, x, 300.0, bay_stroke);
        line(painter, x, 600.0, x, 720.0, bay_stroke);
    }
    // Side bays
    for i in 0..4 {
        let y = 350.0 + i as f32 * 50.0;
        line(painter, 180.0, y, 300.0, y, bay_stroke);
        line(painter, 700.0, y, 820.0, y, bay_stroke);
    }

    // Central work area and offices
    painter.rect_filled(area(400.0, 400.0, 200.0, 200.0), CornerRadius::ZERO, green);
    painter.rect_filled(area(100.0, 750.0, 100.0, 150.0), CornerRadius::ZERO, green);
    painter.rect_filled(area(800.0, 750.0, 100.0, 150.0), CornerRadius::ZERO, green);

    // Aisles
    painter.rect_filled(area(350.0, 150.0, 50.0, 700.0), CornerRadius::ZERO, aisle);
    painter.rect_filled(area(650.0, 150.0, 50.0, 700.0), CornerRadius::ZERO, aisle);
    painter.rect_filled(area(150.0, 350.0, 700.0, 50.0), CornerRadius::ZERO, aisle);
    painter.rect_filled(area(150.0, 550.0, 700.0, 50.0), CornerRadius::ZERO, aisle);
}

/// Paints one vehicle glyph: body rectangle plus two wheels.
fn draw_vehicle_glyph(painter: &egui::Painter, glyph: Rect, color: Rgb) {
    let body = Rect::from_min_size(
        glyph.min + Vec2::new(5.0, 5.0),
        Vec2::new(20.0, 10.0),
    );
    painter.rect_filled(body, CornerRadius::same(3), to_color32(color));
    painter.rect_stroke(
        body,
        CornerRadius::same(3),
        Stroke::new(1.0, Color32::BLACK),
        StrokeKind::Middle,
    );

    let wheel = Color32::from_rgb(0x33, 0x33, 0x33);
    painter.circle_filled(glyph.min + Vec2::new(10.0, 15.0), 2.5, wheel);
    painter.circle_filled(glyph.min + Vec2::new(20.0, 15.0), 2.5, wheel);
}

fn to_color32(c: Rgb) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}
