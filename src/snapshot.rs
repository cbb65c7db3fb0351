//! Single-slot snapshot capture and restore for the live model.

use std::fmt;

use crate::model::TapeModel;

/// Holds at most one opaque model snapshot.
///
/// `checkpoint` overwrites the slot; `restore` clones out of it without
/// consuming it, so repeated restores all return to the same captured state.
#[derive(Default)]
pub struct SnapshotManager {
    slot: Option<Box<dyn TapeModel>>,
}

impl SnapshotManager {
    /// Create a manager with an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture the model's current state, replacing any previous snapshot
    pub fn checkpoint(&mut self, model: &dyn TapeModel) {
        self.slot = Some(model.clone_model());
    }

    /// Produce a fresh model from the retained snapshot.
    /// Fails when no checkpoint has been taken.
    pub fn restore(&self) -> Result<Box<dyn TapeModel>, RestoreError> {
        self.slot
            .as_ref()
            .map(|snapshot| snapshot.clone_model())
            .ok_or(RestoreError::NoCheckpoint)
    }

    /// True when a snapshot is retained
    pub fn has_checkpoint(&self) -> bool {
        self.slot.is_some()
    }
}

/// Errors that can occur on restore.
#[derive(Debug, PartialEq, Eq)]
pub enum RestoreError {
    NoCheckpoint,
}

impl fmt::Display for RestoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCheckpoint => write!(f, "no checkpoint has been taken"),
        }
    }
}

impl std::error::Error for RestoreError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TapeModel;
    use crate::turmite::TurmiteModel;

    #[test]
    fn test_restore_without_checkpoint_is_rejected() {
        let manager = SnapshotManager::new();
        assert!(!manager.has_checkpoint());
        assert_eq!(manager.restore().err(), Some(RestoreError::NoCheckpoint));
    }

    #[test]
    fn test_checkpoint_step_restore_round_trip() {
        let mut model = TurmiteModel::demo();
        for _ in 0..25 {
            model.step();
        }

        let mut manager = SnapshotManager::new();
        manager.checkpoint(&model);
        let tape_at_checkpoint = model.tape().clone();
        let machines_at_checkpoint = model.machines();

        for _ in 0..100 {
            model.step();
        }
        assert_ne!(model.tape(), &tape_at_checkpoint);

        let restored = manager.restore().unwrap();
        assert_eq!(restored.tape(), &tape_at_checkpoint);
        assert_eq!(restored.machines(), machines_at_checkpoint);
    }

    #[test]
    fn test_restore_is_repeatable() {
        let mut model = TurmiteModel::demo();
        for _ in 0..10 {
            model.step();
        }
        let mut manager = SnapshotManager::new();
        manager.checkpoint(&model);

        let first = manager.restore().unwrap();
        let second = manager.restore().unwrap();
        assert_eq!(first.tape(), second.tape());
        assert_eq!(first.machines(), second.machines());
        assert!(manager.has_checkpoint());
    }

    #[test]
    fn test_new_checkpoint_overwrites_old() {
        let mut model = TurmiteModel::demo();
        let mut manager = SnapshotManager::new();
        manager.checkpoint(&model);

        for _ in 0..40 {
            model.step();
        }
        manager.checkpoint(&model);

        let restored = manager.restore().unwrap();
        assert_eq!(restored.tape(), model.tape());
    }
}
