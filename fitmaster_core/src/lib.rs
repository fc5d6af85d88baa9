#![forbid(unsafe_code)]

//! Core domain model and business logic for FitMaster.
//!
//! This crate provides:
//! - Domain types (exercises, workouts, user context)
//! - Store interfaces and a JSON file store
//! - Muscle group selection and workout generation
//! - Active session tracking with a rest timer
//! - Configuration and logging

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod json_store;
pub mod catalog;
pub mod selection;
pub mod generator;
pub mod notify;
pub mod timer;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use store::{ExerciseCatalog, Identity, StaticIdentity, WorkoutQuery, WorkoutStore};
pub use json_store::JsonStore;
pub use catalog::{CatalogService, ExerciseFilter};
pub use selection::{Selection, SelectionEntry};
pub use generator::{generate_workout, replace_exercise, start_workout, GeneratedExercise};
pub use notify::{LogNotifier, Notifier};
pub use timer::{RestTimer, TimerState};
pub use session::{ActiveSession, SessionState, SessionView};
pub use stats::{load_stats, WorkoutStats};
