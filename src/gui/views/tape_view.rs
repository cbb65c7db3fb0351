//! Tape visualization.
//!
//! Draws one frame of the model through the viewport transform: background
//! grid, occupied tape cells, machine overlay and the status overlay with
//! the clickable run icon. Only occupied cells are iterated, so drawing cost
//! tracks the written-cell count rather than the viewport or tape extent.

use std::collections::HashMap;

use egui::{
    Align2, Color32, FontId, Pos2, Rect, Sense, Shape, Stroke, TextureHandle, TextureOptions, Ui,
    Vec2,
};

use crate::commands::{Command, FrontendState};
use crate::gui::assets::SymbolCatalog;
use crate::viewport::Viewport;

const GRID_COLOR: Color32 = Color32::from_rgb(0, 20, 40);
const GRID_HIGHLIGHT: Color32 = Color32::from_rgb(0, 30, 45);
const TEXT_COLOR: Color32 = Color32::WHITE;

/// Pixel size of the overlay icon and the machine label strip rows
const UI_SIZE: f32 = 32.0;

/// Horizontal stride between machine label blocks
const LABEL_STRIDE: f32 = 110.0;

/// Tape view with its per-tile-size texture cache.
///
/// Textures are uploaded lazily from the catalog as symbols first appear and
/// dropped whenever the catalog was rebuilt at another tile size.
pub struct TapeView {
    textures: HashMap<String, TextureHandle>,
    texture_tile_size: u32,
}

impl Default for TapeView {
    fn default() -> Self {
        Self {
            textures: HashMap::new(),
            texture_tile_size: 0,
        }
    }
}

impl TapeView {
    /// Create a new tape view
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the tape panel and return any commands from overlay clicks
    pub fn show(
        &mut self,
        ui: &mut Ui,
        state: &mut FrontendState,
        catalog: &SymbolCatalog,
    ) -> Vec<Command> {
        let mut commands = Vec::new();

        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click());
        let rect = response.rect;
        state
            .viewport
            .set_window(rect.width() as u32, rect.height() as u32);

        if self.texture_tile_size != catalog.tile_size() {
            self.textures.clear();
            self.texture_tile_size = catalog.tile_size();
        }

        painter.rect_filled(rect, 0.0, Color32::BLACK);
        draw_grid(&painter, rect, &state.viewport);
        self.draw_tape(ui, &painter, rect, state, catalog);
        if state.show_machines {
            draw_machines(&painter, rect, state);
        }

        let icon_rect = draw_overlay(&painter, rect, state);
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if icon_rect.contains(pos) {
                    commands.push(Command::ToggleRun);
                }
            }
        }

        commands
    }

    fn draw_tape(
        &mut self,
        ui: &Ui,
        painter: &egui::Painter,
        rect: Rect,
        state: &FrontendState,
        catalog: &SymbolCatalog,
    ) {
        let ts = state.viewport.tile_size as i64;
        let (w, h) = (rect.width() as i64, rect.height() as i64);
        let uv = Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1.0, 1.0));

        for (&coord, &symbol) in state.model.tape().iter() {
            let (x, y) = state.viewport.to_screen(coord);
            if x + ts < 0 || y + ts < 0 || x > w || y > h {
                continue;
            }

            let (key, image) = catalog.resolve(symbol);
            let texture = self.textures.entry(key.to_string()).or_insert_with(|| {
                ui.ctx()
                    .load_texture(format!("sym-{}", key), image.clone(), TextureOptions::NEAREST)
            });

            let tile = Rect::from_min_size(
                rect.min + Vec2::new(x as f32, y as f32),
                Vec2::splat(ts as f32),
            );
            painter.image(texture.id(), tile, uv, Color32::WHITE);
        }
    }
}

/// Grid lines every tile, with highlight dots every 5 tiles that track the
/// pan offset so panning stays legible at any zoom.
fn draw_grid(painter: &egui::Painter, rect: Rect, viewport: &Viewport) {
    let ts = viewport.tile_size as f32;
    let stroke = Stroke::new(2.0, GRID_COLOR);

    for i in 0..=(rect.width() / ts) as i32 {
        let x = rect.min.x + i as f32 * ts;
        painter.line_segment([Pos2::new(x, rect.min.y), Pos2::new(x, rect.max.y)], stroke);
    }
    for i in 0..=(rect.height() / ts) as i32 {
        let y = rect.min.y + i as f32 * ts;
        painter.line_segment([Pos2::new(rect.min.x, y), Pos2::new(rect.max.x, y)], stroke);
    }

    // Dots start one block off-screen so they slide in while panning
    let block = viewport.tile_size as i64 * 5;
    let offset = (
        viewport.pan.0.rem_euclid(5),
        viewport.pan.1.rem_euclid(5),
    );
    for i in -1..=(rect.width() as i64 / block) {
        for j in -1..=(rect.height() as i64 / block) {
            let x = ((5 * i + offset.0) * viewport.tile_size as i64 + 1) as f32;
            let y = ((5 * j + offset.1) * viewport.tile_size as i64 + 1) as f32;
            painter.circle_filled(
                Pos2::new(rect.min.x + x, rect.min.y + y),
                2.0,
                GRID_HIGHLIGHT,
            );
        }
    }
}

/// Outlined squares at each machine head plus the label strip along the
/// bottom edge, most recently added machine first.
fn draw_machines(painter: &egui::Painter, rect: Rect, state: &FrontendState) {
    let ts = state.viewport.tile_size as f32;
    let font = FontId::monospace(13.0);

    for (m, machine) in state.model.machines().iter().rev().enumerate() {
        let color = Color32::from_rgb(machine.color[0], machine.color[1], machine.color[2]);
        let stroke = Stroke::new(2.0, color);

        let (x, y) = state.viewport.to_screen(machine.pos);
        painter.rect_stroke(
            Rect::from_min_size(
                rect.min + Vec2::new(x as f32, y as f32),
                Vec2::splat(ts),
            ),
            0.0,
            stroke,
        );

        let bx = rect.min.x + m as f32 * LABEL_STRIDE;
        painter.text(
            Pos2::new(bx + 5.0, rect.max.y - UI_SIZE),
            Align2::LEFT_TOP,
            &machine.label,
            font.clone(),
            TEXT_COLOR,
        );
        painter.text(
            Pos2::new(bx + 5.0, rect.max.y - UI_SIZE / 2.0),
            Align2::LEFT_TOP,
            format!("({}, {})", machine.pos.0, machine.pos.1),
            font.clone(),
            TEXT_COLOR,
        );
        painter.text(
            Pos2::new(bx + 40.0, rect.max.y - UI_SIZE / 2.0),
            Align2::LEFT_TOP,
            &machine.state,
            font.clone(),
            TEXT_COLOR,
        );
        painter.rect_stroke(
            Rect::from_min_size(
                Pos2::new(bx + 2.0, rect.max.y - (UI_SIZE + 5.0)),
                Vec2::new(100.0, UI_SIZE),
            ),
            0.0,
            stroke,
        );
    }
}

/// Rate and tick readout plus the run-state icon. Returns the icon's rect
/// for click handling.
fn draw_overlay(painter: &egui::Painter, rect: Rect, state: &FrontendState) -> Rect {
    let font = FontId::monospace(14.0);

    let rate = if state.clock.is_max_rate() {
        "MAX".to_string()
    } else {
        format!("{}", state.clock.rate() as u64)
    };
    painter.text(
        rect.min,
        Align2::LEFT_TOP,
        format!("Target sim rate: {} ticks/s", rate),
        font.clone(),
        TEXT_COLOR,
    );
    painter.text(
        rect.min + Vec2::new(0.0, UI_SIZE / 2.0),
        Align2::LEFT_TOP,
        format!("Elapsed ticks: {}", state.clock.elapsed()),
        font,
        TEXT_COLOR,
    );

    let icon_rect = Rect::from_min_size(
        Pos2::new(rect.max.x - UI_SIZE, rect.min.y),
        Vec2::splat(UI_SIZE),
    );
    let inner = icon_rect.shrink(8.0);
    if state.clock.is_running() {
        painter.add(Shape::convex_polygon(
            vec![
                inner.left_top(),
                Pos2::new(inner.right(), inner.center().y),
                inner.left_bottom(),
            ],
            Color32::from_rgb(90, 220, 90),
            Stroke::NONE,
        ));
    } else {
        let bar = inner.width() / 3.0;
        let color = Color32::from_rgb(220, 90, 90);
        painter.rect_filled(
            Rect::from_min_size(inner.left_top(), Vec2::new(bar, inner.height())),
            0.0,
            color,
        );
        painter.rect_filled(
            Rect::from_min_size(
                Pos2::new(inner.right() - bar, inner.top()),
                Vec2::new(bar, inner.height()),
            ),
            0.0,
            color,
        );
    }

    icon_rect
}
