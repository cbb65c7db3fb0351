//! View components for the viewer window.

mod status_panel;
mod tape_view;

pub use status_panel::StatusPanel;
pub use tape_view::TapeView;
