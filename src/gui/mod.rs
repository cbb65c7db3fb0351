//! GUI module for tapescope.
//!
//! Provides the viewer window using egui + eframe.
//!
//! ## Architecture
//!
//! Everything runs on one thread inside the eframe update loop:
//! - Key presses and overlay clicks become [`Command`](crate::commands::Command)
//!   values, applied to the state struct the app owns
//! - The fixed-timestep clock drains all due ticks for the frame
//! - The tape view then draws the tick-aligned model state, so a frame never
//!   shows a partially stepped model
//!
//! Repaints are requested while the clock runs; egui's vsync paces the
//! display rate, which never affects simulation timing.
//!
//! ## Usage
//!
//! ```no_run
//! use tapescope::{Config, TurmiteModel};
//! use tapescope::gui::run_gui;
//!
//! let config = Config::default();
//! run_gui(config, Box::new(TurmiteModel::demo())).unwrap();
//! ```

mod app;
mod input;
mod views;

pub mod assets;

pub use app::{run_gui, TapescopeApp};
pub use assets::SymbolCatalog;
