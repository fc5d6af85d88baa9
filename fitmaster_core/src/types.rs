//! Core domain types for FitMaster.
//!
//! This module defines the records shared by the store, the generator and
//! the session tracker:
//! - Exercise classification enums (muscle group, load type, exercise type)
//! - Exercise definitions and the form payload used to create them
//! - Workouts and their per-exercise snapshots
//! - The explicit user context passed into core operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Classification
// ============================================================================

/// Muscle group an exercise trains
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Shoulders,
    Arms,
    Abs,
    Cardio,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 7] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Legs,
        MuscleGroup::Shoulders,
        MuscleGroup::Arms,
        MuscleGroup::Abs,
        MuscleGroup::Cardio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "chest",
            MuscleGroup::Back => "back",
            MuscleGroup::Legs => "legs",
            MuscleGroup::Shoulders => "shoulders",
            MuscleGroup::Arms => "arms",
            MuscleGroup::Abs => "abs",
            MuscleGroup::Cardio => "cardio",
        }
    }
}

/// How an exercise is loaded
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LoadType {
    Bodyweight,
    AdditionalWeight,
    ResistanceBand,
    Machine,
}

impl LoadType {
    pub const ALL: [LoadType; 4] = [
        LoadType::Bodyweight,
        LoadType::AdditionalWeight,
        LoadType::ResistanceBand,
        LoadType::Machine,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoadType::Bodyweight => "bodyweight",
            LoadType::AdditionalWeight => "additional_weight",
            LoadType::ResistanceBand => "resistance_band",
            LoadType::Machine => "machine",
        }
    }
}

/// Priority tier used to bias workout generation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    Main,
    Auxiliary,
    Isolation,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 3] = [
        ExerciseType::Main,
        ExerciseType::Auxiliary,
        ExerciseType::Isolation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Main => "main",
            ExerciseType::Auxiliary => "auxiliary",
            ExerciseType::Isolation => "isolation",
        }
    }
}

macro_rules! impl_str_conversions {
    ($ty:ty, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = crate::Error;

            fn from_str(s: &str) -> crate::Result<Self> {
                let wanted = s.trim().to_lowercase().replace('-', "_");
                <$ty>::ALL
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| crate::Error::Validation(format!("unknown {}: {}", $what, s)))
            }
        }
    };
}

impl_str_conversions!(MuscleGroup, "muscle group");
impl_str_conversions!(LoadType, "load type");
impl_str_conversions!(ExerciseType, "exercise type");

// ============================================================================
// Identity
// ============================================================================

/// Opaque identity of the authenticated user
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Explicit context passed into every core operation
#[derive(Clone, Debug)]
pub struct UserContext {
    pub user_id: UserId,
    pub now: DateTime<Utc>,
}

impl UserContext {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            now: Utc::now(),
        }
    }
}

// ============================================================================
// Exercises
// ============================================================================

/// A user-owned exercise definition
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub load_type: LoadType,
    pub exercise_type: ExerciseType,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub technique: String,
    pub video_url: Option<String>,
    pub machine_name: Option<String>,
    pub machine_settings: Option<String>,
    pub comment: Option<String>,
    pub last_weight: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Form payload for creating or replacing an exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewExercise {
    pub name: String,
    pub muscle_group: MuscleGroup,
    pub load_type: LoadType,
    pub exercise_type: ExerciseType,
    pub sets: u32,
    pub reps: u32,
    #[serde(default)]
    pub technique: String,
    pub video_url: Option<String>,
    pub machine_name: Option<String>,
    pub machine_settings: Option<String>,
    pub comment: Option<String>,
}

impl NewExercise {
    pub const SETS_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
    pub const REPS_RANGE: std::ops::RangeInclusive<u32> = 1..=100;

    /// Form defaults: 3 sets of 10
    pub fn new(
        name: impl Into<String>,
        muscle_group: MuscleGroup,
        load_type: LoadType,
        exercise_type: ExerciseType,
    ) -> Self {
        Self {
            name: name.into(),
            muscle_group,
            load_type,
            exercise_type,
            sets: 3,
            reps: 10,
            technique: String::new(),
            video_url: None,
            machine_name: None,
            machine_settings: None,
            comment: None,
        }
    }

    /// Check required fields and numeric ranges, returning every problem found
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push("name is required".to_string());
        }
        if !Self::SETS_RANGE.contains(&self.sets) {
            errors.push(format!("sets must be between 1 and 10, got {}", self.sets));
        }
        if !Self::REPS_RANGE.contains(&self.reps) {
            errors.push(format!("reps must be between 1 and 100, got {}", self.reps));
        }
        if matches!(&self.video_url, Some(url) if url.trim().is_empty()) {
            errors.push("video url must not be blank".to_string());
        }

        errors
    }
}

// ============================================================================
// Workouts
// ============================================================================

/// Lifecycle status of a workout record
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutStatus {
    Active,
    Completed,
    Paused,
}

/// Snapshot of one exercise inside a workout
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutExercise {
    pub exercise_id: Uuid,
    pub sets: u32,
    pub reps: u32,
    pub weight: f64,
    pub completed: bool,
}

/// A persisted workout session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub user_id: UserId,
    pub name: String,
    pub exercises: Vec<WorkoutExercise>,
    pub status: WorkoutStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Payload for creating a workout record
#[derive(Clone, Debug)]
pub struct NewWorkout {
    pub user_id: UserId,
    pub name: String,
    pub exercises: Vec<WorkoutExercise>,
    pub status: WorkoutStatus,
    pub created_at: DateTime<Utc>,
}

/// Partial update of a workout record; `None` leaves a field untouched
#[derive(Clone, Debug, Default)]
pub struct WorkoutPatch {
    pub status: Option<WorkoutStatus>,
    pub exercises: Option<Vec<WorkoutExercise>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
