//! Muscle group selection for workout generation.

use crate::{Exercise, MuscleGroup};
use serde::{Deserialize, Serialize};

pub const MIN_EXERCISES_PER_GROUP: u32 = 1;
pub const MAX_EXERCISES_PER_GROUP: u32 = 4;
pub const DEFAULT_EXERCISES_PER_GROUP: u32 = 2;

/// One chosen muscle group and how many exercises to draw from it
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectionEntry {
    pub muscle_group: MuscleGroup,
    pub exercise_count: u32,
}

/// Ordered set of selected muscle groups
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
    default_count: Option<u32>,
}

/// Clamp a requested count into the allowed range
pub fn clamp_count(count: u32) -> u32 {
    count.clamp(MIN_EXERCISES_PER_GROUP, MAX_EXERCISES_PER_GROUP)
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection whose newly added groups start at `count` instead of 2
    pub fn with_default_count(count: u32) -> Self {
        Self {
            entries: Vec::new(),
            default_count: Some(clamp_count(count)),
        }
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, group: MuscleGroup) -> bool {
        self.entries.iter().any(|e| e.muscle_group == group)
    }

    /// Insert `group` at the default count; adding an existing group is a no-op
    pub fn add(&mut self, group: MuscleGroup) {
        if self.contains(group) {
            return;
        }
        self.entries.push(SelectionEntry {
            muscle_group: group,
            exercise_count: self.default_count.unwrap_or(DEFAULT_EXERCISES_PER_GROUP),
        });
    }

    /// Add `group` only if the catalog has exercises for it
    ///
    /// Returns `false` when the group is unavailable; the selection is
    /// left unchanged in that case.
    pub fn add_available(&mut self, group: MuscleGroup, catalog: &[Exercise]) -> bool {
        if !is_available(group, catalog) {
            tracing::debug!("Muscle group {} has no exercises, not selectable", group);
            return false;
        }
        self.add(group);
        true
    }

    pub fn remove(&mut self, group: MuscleGroup) {
        self.entries.retain(|e| e.muscle_group != group);
    }

    /// Set the count for a selected group, clamped to 1..=4
    pub fn set_count(&mut self, group: MuscleGroup, count: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.muscle_group == group) {
            entry.exercise_count = clamp_count(count);
        }
    }

    pub fn total_requested(&self) -> u32 {
        self.entries.iter().map(|e| e.exercise_count).sum()
    }
}

/// Whether any exercise in `catalog` trains `group`
pub fn is_available(group: MuscleGroup, catalog: &[Exercise]) -> bool {
    catalog.iter().any(|e| e.muscle_group == group)
}
