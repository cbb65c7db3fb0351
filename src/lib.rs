//! # TAPESCOPE
//!
//! Interactive viewer and control surface for sparse-tape machine
//! simulations.
//!
//! ## Features
//!
//! - **Decoupled**: fixed-timestep clock keeps simulation progress
//!   independent of display refresh
//! - **Sparse**: rendering cost tracks occupied cells, never tape extent
//! - **Zoomable**: pannable viewport with power-of-two tile sizes
//! - **Restorable**: in-memory checkpoint/restore of the full model state
//! - **Configurable**: YAML configuration files
//!
//! ## Quick Start
//!
//! ```rust
//! use tapescope::{Config, FrontendState, TurmiteModel};
//!
//! // Wrap a model in the viewer state
//! let model = Box::new(TurmiteModel::demo());
//! let mut state = FrontendState::new(model, &Config::default());
//!
//! // Drain a second of wall time through the clock
//! state.frame(1000.0);
//! assert!(state.clock.elapsed() > 0);
//! ```
//!
//! ## Checkpoints
//!
//! ```rust
//! use tapescope::{Command, Config, FrontendState, TurmiteModel};
//!
//! let mut state = FrontendState::new(Box::new(TurmiteModel::demo()), &Config::default());
//! state.apply(Command::Checkpoint);
//! state.frame(1000.0);
//!
//! // Back to the captured state; the checkpoint survives for reuse
//! state.apply(Command::Restore);
//! ```

pub mod clock;
pub mod commands;
pub mod config;
pub mod gui;
pub mod model;
pub mod snapshot;
pub mod turmite;
pub mod viewport;

// Re-export main types
pub use clock::SimClock;
pub use commands::{Command, Effect, FrontendState};
pub use config::Config;
pub use model::{MachineView, SparseTape, TapeModel};
pub use snapshot::SnapshotManager;
pub use turmite::{Program, TurmiteModel};
pub use viewport::Viewport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
