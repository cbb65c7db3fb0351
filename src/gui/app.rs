//! Main GUI application: the frame loop.

use std::time::Instant;

use eframe::egui;

use crate::commands::{Command, Effect, FrontendState};
use crate::config::Config;
use crate::model::TapeModel;

use super::assets::SymbolCatalog;
use super::input;
use super::views::{StatusPanel, TapeView};

/// Main application state.
///
/// Owns the frontend context struct exclusively; each frame runs dispatch
/// input -> drain clock -> render, so every drawn frame reflects a
/// tick-aligned model state.
pub struct TapescopeApp {
    /// Model, clock, viewport, snapshot slot and display flags
    state: FrontendState,
    /// Symbol images at the current tile size
    catalog: SymbolCatalog,
    /// Tape view component
    tape_view: TapeView,
    /// Status panel component
    status_panel: StatusPanel,
    /// Configuration
    config: Config,
    /// Wall time of the previous frame
    last_frame: Instant,
    /// Wall time of startup, the plot's x origin
    started: Instant,
}

impl TapescopeApp {
    /// Create a new application driving `model`
    pub fn new(config: Config, model: Box<dyn TapeModel>) -> Self {
        let catalog = SymbolCatalog::load(&config.assets.symbol_dir, config.viewport.tile_size);
        let state = FrontendState::new(model, &config);
        let now = Instant::now();

        Self {
            state,
            catalog,
            tape_view: TapeView::new(),
            status_panel: StatusPanel::new(),
            config,
            last_frame: now,
            started: now,
        }
    }

    /// Apply commands and carry out their side effects
    fn apply_all(&mut self, ctx: &egui::Context, commands: Vec<Command>) {
        for command in commands {
            match self.state.apply(command) {
                Effect::None => {}
                Effect::ReloadSymbols => {
                    self.catalog = SymbolCatalog::load(
                        &self.config.assets.symbol_dir,
                        self.state.viewport.tile_size,
                    );
                }
                Effect::Quit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            }
        }
    }
}

impl eframe::App for TapescopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let dt_ms = now.duration_since(self.last_frame).as_secs_f64() * 1000.0;
        self.last_frame = now;

        // Dispatch input before stepping, then drain all ticks due this frame
        let commands = input::collect(ctx);
        self.apply_all(ctx, commands);

        let executed = self.state.frame(dt_ms);
        let achieved = if dt_ms > 0.0 {
            executed as f64 * 1000.0 / dt_ms
        } else {
            0.0
        };
        self.status_panel.record(
            now.duration_since(self.started).as_secs_f64(),
            self.state.clock.rate(),
            achieved,
        );

        egui::SidePanel::right("status_panel")
            .min_width(200.0)
            .default_width(240.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.status_panel.show(ui, &self.state);
                });
            });

        // Overlay clicks surface as commands, applied after the draw
        let mut clicked = Vec::new();
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                clicked = self.tape_view.show(ui, &mut self.state, &self.catalog);
            });
        self.apply_all(ctx, clicked);

        // Keep draining wall time while the simulation runs
        if self.state.clock.is_running() {
            ctx.request_repaint();
        }
    }
}

/// Run the GUI application
pub fn run_gui(config: Config, model: Box<dyn TapeModel>) -> eframe::Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                config.window.width as f32,
                config.window.height as f32,
            ])
            .with_min_inner_size([400.0, 300.0])
            .with_title("TAPESCOPE"),
        ..Default::default()
    };

    eframe::run_native(
        "TAPESCOPE",
        native_options,
        Box::new(|_cc| Box::new(TapescopeApp::new(config, model))),
    )
}
