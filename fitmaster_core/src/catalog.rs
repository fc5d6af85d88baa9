//! Exercise catalog management.
//!
//! Wraps an [`ExerciseCatalog`] store with form validation and the list
//! filters used by the exercise screen.

use crate::store::ExerciseCatalog;
use crate::{Error, Exercise, LoadType, MuscleGroup, NewExercise, Result, UserContext};
use std::collections::BTreeMap;
use uuid::Uuid;

/// List filter: name search plus optional muscle group and load type
#[derive(Clone, Debug, Default)]
pub struct ExerciseFilter {
    pub search: Option<String>,
    pub muscle_group: Option<MuscleGroup>,
    pub load_type: Option<LoadType>,
}

impl ExerciseFilter {
    pub fn matches(&self, exercise: &Exercise) -> bool {
        let matches_search = match &self.search {
            Some(term) => exercise
                .name
                .to_lowercase()
                .contains(&term.trim().to_lowercase()),
            None => true,
        };
        let matches_group = self
            .muscle_group
            .map_or(true, |g| exercise.muscle_group == g);
        let matches_load = self.load_type.map_or(true, |l| exercise.load_type == l);

        matches_search && matches_group && matches_load
    }
}

/// Validating front door to the exercise store
pub struct CatalogService<S> {
    store: S,
}

impl<S: ExerciseCatalog> CatalogService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The user's exercises, newest first, narrowed by `filter`
    pub fn list(&self, ctx: &UserContext, filter: &ExerciseFilter) -> Result<Vec<Exercise>> {
        let exercises = self.store.list_exercises(&ctx.user_id).map_err(|e| {
            tracing::error!("Failed to list exercises: {}", e);
            e
        })?;
        Ok(exercises.into_iter().filter(|e| filter.matches(e)).collect())
    }

    pub fn create(&mut self, ctx: &UserContext, data: NewExercise) -> Result<Exercise> {
        ensure_valid(&data)?;
        self.store.create_exercise(&ctx.user_id, data, ctx.now)
    }

    pub fn update(&mut self, ctx: &UserContext, id: Uuid, data: NewExercise) -> Result<Exercise> {
        ensure_valid(&data)?;
        self.store.update_exercise(&ctx.user_id, id, data, ctx.now)
    }

    pub fn delete(&mut self, ctx: &UserContext, id: Uuid) -> Result<()> {
        self.store.delete_exercise(&ctx.user_id, id)
    }
}

fn ensure_valid(data: &NewExercise) -> Result<()> {
    let errors = data.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!("Rejected exercise form: {:?}", errors);
        Err(Error::Validation(errors.join("; ")))
    }
}

/// Number of exercises per muscle group; groups without exercises are absent
pub fn counts_by_muscle_group(exercises: &[Exercise]) -> BTreeMap<MuscleGroup, usize> {
    let mut counts = BTreeMap::new();
    for exercise in exercises {
        *counts.entry(exercise.muscle_group).or_insert(0) += 1;
    }
    counts
}
