//! JSON file store with file locking.
//!
//! Exercises and workouts live in two JSON array files inside the data
//! directory. Reads take a shared lock; writes go to a temp file under an
//! exclusive lock and are renamed over the original.

use crate::store::{ExerciseCatalog, WorkoutQuery, WorkoutStore};
use crate::{
    Error, Exercise, NewExercise, NewWorkout, Result, UserId, Workout, WorkoutPatch,
};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

const EXERCISES_FILE: &str = "exercises.json";
const WORKOUTS_FILE: &str = "workouts.json";

/// File-backed implementation of both store traits
#[derive(Clone, Debug)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at `dir`; files are created lazily on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn exercises_path(&self) -> PathBuf {
        self.dir.join(EXERCISES_FILE)
    }

    pub fn workouts_path(&self) -> PathBuf {
        self.dir.join(WORKOUTS_FILE)
    }
}

/// Contents of a record file
enum Parsed<T> {
    Records(Vec<T>),
    Corrupt(serde_json::Error),
}

/// Read and parse a record array with shared locking
///
/// A missing or blank file parses as an empty list.
fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Parsed<T>> {
    if !path.exists() {
        tracing::debug!("No store file at {:?}, starting empty", path);
        return Ok(Parsed::Records(Vec::new()));
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let mut contents = String::new();
    let read = std::io::BufReader::new(&file).read_to_string(&mut contents);
    file.unlock()?;
    read?;

    if contents.trim().is_empty() {
        return Ok(Parsed::Records(Vec::new()));
    }

    Ok(match serde_json::from_str::<Vec<T>>(&contents) {
        Ok(records) => {
            tracing::debug!("Loaded {} records from {:?}", records.len(), path);
            Parsed::Records(records)
        }
        Err(e) => Parsed::Corrupt(e),
    })
}

/// Load a record array for reading
///
/// If the file is corrupted, logs a warning and returns an empty list.
fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match read_records(path)? {
        Parsed::Records(records) => Ok(records),
        Parsed::Corrupt(e) => {
            tracing::warn!(
                "Failed to parse store file {:?}: {}. Treating as empty.",
                path,
                e
            );
            Ok(Vec::new())
        }
    }
}

/// Path a corrupted store file is moved to before it gets replaced
fn corrupt_backup_path(path: &Path, now: DateTime<Utc>) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".corrupt-{}", now.format("%Y%m%dT%H%M%S%.3f")));
    path.with_file_name(name)
}

/// Load a record array for modification
///
/// A corrupted file is renamed aside (not deleted) so its records can be
/// recovered by hand, then the write starts from an empty list.
fn load_records_for_write<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    match read_records(path)? {
        Parsed::Records(records) => Ok(records),
        Parsed::Corrupt(e) => {
            let backup = corrupt_backup_path(path, Utc::now());
            std::fs::rename(path, &backup)?;
            tracing::warn!(
                "Failed to parse store file {:?}: {}. Moved it to {:?}.",
                path,
                e,
                backup
            );
            Ok(Vec::new())
        }
    }
}

/// Save a record array atomically
fn save_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::Store(format!("store path {:?} has no parent", path)))?;
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let contents = serde_json::to_string_pretty(records)?;
        writer.write_all(contents.as_bytes())?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!("Saved {} records to {:?}", records.len(), path);
    Ok(())
}

/// Load, modify and save a record file
fn update_records<T, R, F>(path: &Path, f: F) -> Result<R>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce(&mut Vec<T>) -> Result<R>,
{
    let mut records = load_records_for_write(path)?;
    let result = f(&mut records)?;
    save_records(path, &records)?;
    Ok(result)
}

impl ExerciseCatalog for JsonStore {
    fn list_exercises(&self, user: &UserId) -> Result<Vec<Exercise>> {
        let mut exercises: Vec<Exercise> = load_records::<Exercise>(&self.exercises_path())?
            .into_iter()
            .filter(|e| &e.user_id == user)
            .collect();
        exercises.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(exercises)
    }

    fn get_exercise(&self, user: &UserId, id: Uuid) -> Result<Option<Exercise>> {
        Ok(load_records::<Exercise>(&self.exercises_path())?
            .into_iter()
            .find(|e| e.id == id && &e.user_id == user))
    }

    fn create_exercise(
        &mut self,
        user: &UserId,
        data: NewExercise,
        now: DateTime<Utc>,
    ) -> Result<Exercise> {
        let exercise = Exercise {
            id: Uuid::new_v4(),
            user_id: user.clone(),
            name: data.name,
            muscle_group: data.muscle_group,
            load_type: data.load_type,
            exercise_type: data.exercise_type,
            sets: data.sets,
            reps: data.reps,
            technique: data.technique,
            video_url: data.video_url,
            machine_name: data.machine_name,
            machine_settings: data.machine_settings,
            comment: data.comment,
            last_weight: Some(0.0),
            created_at: now,
            updated_at: now,
        };

        update_records(&self.exercises_path(), |records: &mut Vec<Exercise>| {
            records.push(exercise.clone());
            Ok(())
        })?;

        tracing::info!("Created exercise {} ({})", exercise.name, exercise.id);
        Ok(exercise)
    }

    fn update_exercise(
        &mut self,
        user: &UserId,
        id: Uuid,
        data: NewExercise,
        now: DateTime<Utc>,
    ) -> Result<Exercise> {
        let updated = update_records(&self.exercises_path(), |records: &mut Vec<Exercise>| {
            let existing = records
                .iter_mut()
                .find(|e| e.id == id && &e.user_id == user)
                .ok_or_else(|| Error::NotFound(format!("exercise {}", id)))?;

            existing.name = data.name;
            existing.muscle_group = data.muscle_group;
            existing.load_type = data.load_type;
            existing.exercise_type = data.exercise_type;
            existing.sets = data.sets;
            existing.reps = data.reps;
            existing.technique = data.technique;
            existing.video_url = data.video_url;
            existing.machine_name = data.machine_name;
            existing.machine_settings = data.machine_settings;
            existing.comment = data.comment;
            existing.updated_at = now;
            Ok(existing.clone())
        })?;

        tracing::info!("Updated exercise {}", id);
        Ok(updated)
    }

    fn delete_exercise(&mut self, user: &UserId, id: Uuid) -> Result<()> {
        update_records(&self.exercises_path(), |records: &mut Vec<Exercise>| {
            let before = records.len();
            records.retain(|e| !(e.id == id && &e.user_id == user));
            if records.len() == before {
                return Err(Error::NotFound(format!("exercise {}", id)));
            }
            Ok(())
        })?;

        tracing::info!("Deleted exercise {}", id);
        Ok(())
    }
}

impl WorkoutStore for JsonStore {
    fn list_workouts(&self, query: &WorkoutQuery) -> Result<Vec<Workout>> {
        let records = load_records::<Workout>(&self.workouts_path())?;
        Ok(query.apply(records))
    }

    fn create_workout(&mut self, data: NewWorkout) -> Result<Workout> {
        let workout = Workout {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            name: data.name,
            exercises: data.exercises,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.created_at,
            completed_at: None,
        };

        update_records(&self.workouts_path(), |records: &mut Vec<Workout>| {
            records.push(workout.clone());
            Ok(())
        })?;

        tracing::info!("Created workout '{}' ({})", workout.name, workout.id);
        Ok(workout)
    }

    fn update_workout(&mut self, user: &UserId, id: Uuid, patch: WorkoutPatch) -> Result<Workout> {
        let updated = update_records(&self.workouts_path(), |records: &mut Vec<Workout>| {
            let existing = records
                .iter_mut()
                .find(|w| w.id == id && &w.user_id == user)
                .ok_or_else(|| Error::NotFound(format!("workout {}", id)))?;

            if let Some(status) = patch.status {
                existing.status = status;
            }
            if let Some(exercises) = patch.exercises {
                existing.exercises = exercises;
            }
            if patch.completed_at.is_some() {
                existing.completed_at = patch.completed_at;
            }
            if let Some(updated_at) = patch.updated_at {
                existing.updated_at = updated_at;
            }
            Ok(existing.clone())
        })?;

        tracing::info!("Updated workout {} (status {:?})", id, updated.status);
        Ok(updated)
    }
}
