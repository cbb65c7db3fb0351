//! Status panel showing clock, viewport and snapshot state.

use egui::Ui;
use egui_plot::{Line, Plot, PlotPoints};

use crate::clock::RunState;
use crate::commands::FrontendState;

/// Side panel with the clock readout, a tick-rate history plot and the
/// snapshot slot status.
pub struct StatusPanel {
    /// [seconds since start, target ticks/s]
    target_history: Vec<[f64; 2]>,
    /// [seconds since start, achieved ticks/s]
    achieved_history: Vec<[f64; 2]>,
    /// Maximum history length
    max_history: usize,
}

impl Default for StatusPanel {
    fn default() -> Self {
        Self {
            target_history: Vec::new(),
            achieved_history: Vec::new(),
            max_history: 600,
        }
    }
}

impl StatusPanel {
    /// Create a new status panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame's rates for the history plot
    pub fn record(&mut self, time_s: f64, target_rate: f64, achieved_rate: f64) {
        self.target_history.push([time_s, target_rate]);
        self.achieved_history.push([time_s, achieved_rate]);

        if self.target_history.len() > self.max_history {
            self.target_history.remove(0);
            self.achieved_history.remove(0);
        }
    }

    /// Render the status panel
    pub fn show(&mut self, ui: &mut Ui, state: &FrontendState) {
        egui::CollapsingHeader::new("Clock")
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new("clock_grid")
                    .num_columns(2)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("State:");
                        ui.label(match state.clock.state() {
                            RunState::Running => "Running",
                            RunState::Paused => "Paused",
                        });
                        ui.end_row();

                        ui.label("Target rate:");
                        ui.label(format!("{:.0} ticks/s", state.clock.rate()));
                        ui.end_row();

                        ui.label("Elapsed ticks:");
                        ui.label(format!("{}", state.clock.elapsed()));
                        ui.end_row();
                    });
            });

        ui.separator();

        egui::CollapsingHeader::new("Tick Rate")
            .default_open(true)
            .show(ui, |ui| {
                let achieved: PlotPoints = self.achieved_history.iter().copied().collect();
                let target: PlotPoints = self.target_history.iter().copied().collect();

                Plot::new("rate_plot")
                    .height(100.0)
                    .show_axes(true)
                    .show(ui, |plot_ui| {
                        plot_ui.line(Line::new(achieved).color(egui::Color32::LIGHT_BLUE));
                        plot_ui.line(Line::new(target).color(egui::Color32::GREEN));
                    });
            });

        ui.separator();

        egui::CollapsingHeader::new("Viewport")
            .default_open(true)
            .show(ui, |ui| {
                egui::Grid::new("viewport_grid")
                    .num_columns(2)
                    .spacing([20.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Tile size:");
                        ui.label(format!("{} px", state.viewport.tile_size));
                        ui.end_row();

                        ui.label("Pan offset:");
                        ui.label(format!("({}, {})", state.viewport.pan.0, state.viewport.pan.1));
                        ui.end_row();

                        ui.label("Occupied cells:");
                        ui.label(format!("{}", state.model.tape().occupied()));
                        ui.end_row();

                        ui.label("Machines:");
                        ui.label(format!("{}", state.model.machines().len()));
                        ui.end_row();
                    });
            });

        ui.separator();

        ui.label(if state.snapshots.has_checkpoint() {
            "Checkpoint: taken"
        } else {
            "Checkpoint: none"
        });

        if let Some(ref message) = state.status_message {
            ui.label(egui::RichText::new(message).italics());
        }
    }
}
