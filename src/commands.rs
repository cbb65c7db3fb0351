//! Commands for controlling the viewer, and the state they apply to.
//!
//! Input handling is split in two: the GUI layer translates raw events into
//! [`Command`] values, and the frame loop applies each value to the
//! [`FrontendState`] it owns. Every command mutates exactly one of the clock,
//! the viewport, the snapshot slot or the display flags; only clock ticks
//! ever touch the model's tape.

use log::{info, warn};

use crate::clock::SimClock;
use crate::config::Config;
use crate::model::TapeModel;
use crate::snapshot::SnapshotManager;
use crate::viewport::{PanDirection, Viewport};

/// A discrete viewer command produced from one input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Flip between running and paused
    ToggleRun,
    /// Multiply the target tick rate by 1.3, saturating at the maximum
    RateUp,
    /// Divide the target tick rate by 1.3, saturating at 1 tick/s
    RateDown,
    /// Double the tile size, saturating at 128 px
    ZoomIn,
    /// Halve the tile size, saturating at 4 px
    ZoomOut,
    /// Shift the pan offset by one step
    Pan(PanDirection),
    /// Execute one model step and pause
    SingleStep,
    /// Show or hide the machine overlay and label strip
    ToggleMachines,
    /// Capture the model into the snapshot slot
    Checkpoint,
    /// Replace the model with the last checkpoint
    Restore,
    /// Close the viewer
    Quit,
}

/// Side effect the frame loop must perform after applying a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Nothing beyond the state mutation
    None,
    /// The tile size changed; the symbol catalog must be reloaded
    ReloadSymbols,
    /// Terminate the viewer
    Quit,
}

/// Everything the frame loop owns: the live model and the component state
/// that commands act on.
pub struct FrontendState {
    pub model: Box<dyn TapeModel>,
    pub clock: SimClock,
    pub viewport: Viewport,
    pub snapshots: SnapshotManager,
    /// Whether the machine overlay and label strip are drawn
    pub show_machines: bool,
    /// Last command failure, shown in the status panel
    pub status_message: Option<String>,
}

impl FrontendState {
    /// Assemble the viewer state around a model. Takes the startup
    /// checkpoint, so a restore is valid from the first frame on.
    pub fn new(model: Box<dyn TapeModel>, config: &Config) -> Self {
        let mut clock = SimClock::new(config.clock.start_rate, config.clock.max_rate);
        if config.clock.start_paused {
            clock.toggle();
        }

        let mut snapshots = SnapshotManager::new();
        snapshots.checkpoint(&*model);

        Self {
            model,
            clock,
            viewport: Viewport::new(
                config.viewport.tile_size,
                (config.window.width, config.window.height),
            ),
            snapshots,
            show_machines: true,
            status_message: None,
        }
    }

    /// Drain one frame's worth of wall time through the clock.
    /// Returns the number of model steps executed.
    pub fn frame(&mut self, dt_ms: f64) -> u32 {
        self.clock.advance(dt_ms, &mut *self.model)
    }

    /// Apply one command. Each arm mutates a single component.
    pub fn apply(&mut self, command: Command) -> Effect {
        match command {
            Command::ToggleRun => self.clock.toggle(),
            Command::RateUp => self.clock.increase_rate(),
            Command::RateDown => self.clock.decrease_rate(),
            Command::ZoomIn => {
                if self.viewport.zoom_in() {
                    return Effect::ReloadSymbols;
                }
            }
            Command::ZoomOut => {
                if self.viewport.zoom_out() {
                    return Effect::ReloadSymbols;
                }
            }
            Command::Pan(direction) => self.viewport.pan_by(direction),
            Command::SingleStep => self.clock.single_step(&mut *self.model),
            Command::ToggleMachines => self.show_machines = !self.show_machines,
            Command::Checkpoint => {
                self.snapshots.checkpoint(&*self.model);
                self.status_message = None;
                info!("checkpoint taken at tick {}", self.clock.elapsed());
            }
            Command::Restore => match self.snapshots.restore() {
                Ok(model) => {
                    self.model = model;
                    self.status_message = None;
                    info!("restored from checkpoint");
                }
                Err(e) => {
                    warn!("restore rejected: {}", e);
                    self.status_message = Some(format!("Restore failed: {}", e));
                }
            },
            Command::Quit => return Effect::Quit,
        }
        Effect::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turmite::TurmiteModel;

    fn state() -> FrontendState {
        FrontendState::new(Box::new(TurmiteModel::demo()), &Config::default())
    }

    #[test]
    fn test_startup_checkpoint_makes_restore_valid() {
        let mut s = state();
        let initial = s.model.tape().clone();

        for _ in 0..50 {
            s.model.step();
        }
        assert_eq!(s.apply(Command::Restore), Effect::None);
        assert_eq!(s.model.tape(), &initial);
        assert!(s.status_message.is_none());
    }

    #[test]
    fn test_zoom_commands_request_catalog_reload() {
        let mut s = state();
        assert_eq!(s.apply(Command::ZoomIn), Effect::ReloadSymbols);
        assert_eq!(s.viewport.tile_size, 32);

        // Saturated zoom changes nothing, so no reload either
        s.viewport.tile_size = 128;
        assert_eq!(s.apply(Command::ZoomIn), Effect::None);
        s.viewport.tile_size = 4;
        assert_eq!(s.apply(Command::ZoomOut), Effect::None);
    }

    #[test]
    fn test_pan_commands_accumulate() {
        let mut s = state();
        s.viewport.tile_size = 32;
        for _ in 0..4 {
            assert_eq!(s.apply(Command::Pan(PanDirection::Up)), Effect::None);
        }
        assert_eq!(s.viewport.pan, (0, 12));
    }

    #[test]
    fn test_toggle_run_and_single_step() {
        let mut s = state();
        assert!(s.clock.is_running());
        s.apply(Command::ToggleRun);
        assert!(!s.clock.is_running());

        s.apply(Command::SingleStep);
        assert_eq!(s.clock.elapsed(), 1);
        assert!(!s.clock.is_running());
    }

    #[test]
    fn test_rate_commands_saturate_at_bounds() {
        let mut s = state();
        let start = s.clock.rate();
        s.apply(Command::RateUp);
        assert!((s.clock.rate() - start * 1.3).abs() < 1e-9);

        for _ in 0..100 {
            s.apply(Command::RateDown);
        }
        assert_eq!(s.clock.rate(), 1.0);
    }

    #[test]
    fn test_failed_restore_sets_status_message() {
        let mut s = state();
        // Empty the slot to exercise the precondition failure
        s.snapshots = SnapshotManager::new();
        s.apply(Command::Restore);
        assert!(s.status_message.is_some());

        // A successful checkpoint clears the message
        s.apply(Command::Checkpoint);
        assert!(s.status_message.is_none());
    }

    #[test]
    fn test_toggle_machines_flips_flag() {
        let mut s = state();
        assert!(s.show_machines);
        s.apply(Command::ToggleMachines);
        assert!(!s.show_machines);
        s.apply(Command::ToggleMachines);
        assert!(s.show_machines);
    }

    #[test]
    fn test_quit_produces_quit_effect() {
        let mut s = state();
        assert_eq!(s.apply(Command::Quit), Effect::Quit);
    }

    #[test]
    fn test_commands_never_touch_the_tape() {
        let mut s = state();
        s.apply(Command::ToggleRun);
        let before = s.model.tape().clone();

        for cmd in [
            Command::RateUp,
            Command::RateDown,
            Command::ZoomIn,
            Command::ZoomOut,
            Command::Pan(PanDirection::Left),
            Command::ToggleMachines,
            Command::Checkpoint,
            Command::Restore,
        ] {
            s.apply(cmd);
        }
        assert_eq!(s.model.tape(), &before);
    }

    #[test]
    fn test_start_paused_config() {
        let mut config = Config::default();
        config.clock.start_paused = true;
        let s = FrontendState::new(Box::new(TurmiteModel::demo()), &config);
        assert!(!s.clock.is_running());
    }
}
