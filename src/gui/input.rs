//! Keyboard bindings.
//!
//! Raw key presses become [`Command`] values here; the app applies them to
//! its state, so what a key means and how state is stored stay separate.

use egui::Key;

use crate::commands::Command;
use crate::viewport::PanDirection;

/// The full keyboard surface of the viewer.
///
/// Up/Left increase the pan offset and Down/Right decrease it, which moves
/// the view the way the arrows point (the offset shifts content, not the
/// camera).
pub const KEY_BINDINGS: &[(Key, Command)] = &[
    (Key::Equals, Command::RateUp),
    (Key::Minus, Command::RateDown),
    (Key::CloseBracket, Command::ZoomIn),
    (Key::OpenBracket, Command::ZoomOut),
    (Key::ArrowUp, Command::Pan(PanDirection::Up)),
    (Key::ArrowDown, Command::Pan(PanDirection::Down)),
    (Key::ArrowLeft, Command::Pan(PanDirection::Left)),
    (Key::ArrowRight, Command::Pan(PanDirection::Right)),
    (Key::Enter, Command::ToggleRun),
    (Key::S, Command::SingleStep),
    (Key::M, Command::ToggleMachines),
    (Key::C, Command::Checkpoint),
    (Key::R, Command::Restore),
    (Key::Escape, Command::Quit),
];

/// Collect the commands for every bound key pressed this frame.
pub fn collect(ctx: &egui::Context) -> Vec<Command> {
    let mut commands = Vec::new();
    ctx.input(|input| {
        for &(key, command) in KEY_BINDINGS {
            if input.key_pressed(key) {
                commands.push(command);
            }
        }
    });
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_key_is_bound_twice() {
        for (i, (key, _)) in KEY_BINDINGS.iter().enumerate() {
            for (other, _) in &KEY_BINDINGS[i + 1..] {
                assert_ne!(key, other, "{:?} bound to two commands", key);
            }
        }
    }

    #[test]
    fn test_every_command_is_reachable() {
        let bound: Vec<Command> = KEY_BINDINGS.iter().map(|(_, c)| *c).collect();
        for command in [
            Command::ToggleRun,
            Command::RateUp,
            Command::RateDown,
            Command::ZoomIn,
            Command::ZoomOut,
            Command::Pan(PanDirection::Up),
            Command::Pan(PanDirection::Down),
            Command::Pan(PanDirection::Left),
            Command::Pan(PanDirection::Right),
            Command::SingleStep,
            Command::ToggleMachines,
            Command::Checkpoint,
            Command::Restore,
            Command::Quit,
        ] {
            assert!(bound.contains(&command), "{:?} has no key", command);
        }
    }
}
