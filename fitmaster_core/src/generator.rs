//! Workout generator.
//!
//! Builds a workout from the exercise catalog and a muscle group selection:
//! - Exercises are drawn per selected group, in selection order
//! - Within a group, main and auxiliary exercises each get a 40% quota
//!   (at least one), isolation exercises fill the rest
//! - Shortfalls are backfilled from any unused exercise of the group
//! - No exercise id appears twice in one generated workout

use crate::selection::SelectionEntry;
use crate::store::WorkoutStore;
use crate::{
    Error, Exercise, ExerciseType, NewWorkout, Result, UserContext, Workout, WorkoutExercise,
    WorkoutStatus,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

/// Fraction of a group's target count reserved for each of the main and
/// auxiliary tiers
const TIER_FRACTION: f64 = 0.4;

/// A catalog exercise picked by the generator
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedExercise {
    pub exercise: Exercise,
    pub is_replaced: bool,
}

impl GeneratedExercise {
    fn picked(exercise: &Exercise) -> Self {
        Self {
            exercise: exercise.clone(),
            is_replaced: false,
        }
    }
}

/// Generate a workout for `selection` from `catalog`
///
/// Groups without any exercise in the catalog are skipped. A group with
/// fewer exercises than requested contributes all it has.
pub fn generate_workout<R: Rng + ?Sized>(
    catalog: &[Exercise],
    selection: &[SelectionEntry],
    rng: &mut R,
) -> Vec<GeneratedExercise> {
    let mut used: HashSet<Uuid> = HashSet::new();
    let mut workout = Vec::new();

    for entry in selection {
        let group: Vec<&Exercise> = catalog
            .iter()
            .filter(|e| e.muscle_group == entry.muscle_group)
            .collect();

        if group.is_empty() {
            tracing::debug!("No exercises for {}, skipping", entry.muscle_group);
            continue;
        }

        let picks = pick_for_group(&group, entry.exercise_count as usize, &mut used, rng);
        tracing::debug!(
            "Picked {}/{} exercises for {}",
            picks.len(),
            entry.exercise_count,
            entry.muscle_group
        );
        workout.extend(picks.into_iter().map(GeneratedExercise::picked));
    }

    tracing::info!(
        "Generated workout with {} exercises from {} muscle groups",
        workout.len(),
        selection.len()
    );
    workout
}

/// Type-stratified pick of up to `target` exercises from one muscle group
fn pick_for_group<'a, R: Rng + ?Sized>(
    group: &[&'a Exercise],
    target: usize,
    used: &mut HashSet<Uuid>,
    rng: &mut R,
) -> Vec<&'a Exercise> {
    let tier_quota = ((target as f64 * TIER_FRACTION).floor() as usize).max(1);
    let mut selected = Vec::with_capacity(target);
    let mut remaining = target;

    for tier in [ExerciseType::Main, ExerciseType::Auxiliary] {
        let pool = pool_of(group, Some(tier), used);
        if remaining == 0 || pool.is_empty() {
            continue;
        }
        let quota = remaining.min(tier_quota);
        take_shuffled(pool, quota, &mut selected, used, rng);
        remaining -= quota;
    }

    if remaining > 0 {
        let pool = pool_of(group, Some(ExerciseType::Isolation), used);
        take_shuffled(pool, remaining, &mut selected, used, rng);
    }

    if selected.len() < target {
        let pool = pool_of(group, None, used);
        let missing = target - selected.len();
        take_shuffled(pool, missing, &mut selected, used, rng);
    }

    selected
}

fn pool_of<'a>(
    group: &[&'a Exercise],
    tier: Option<ExerciseType>,
    used: &HashSet<Uuid>,
) -> Vec<&'a Exercise> {
    group
        .iter()
        .copied()
        .filter(|e| tier.map_or(true, |t| e.exercise_type == t))
        .filter(|e| !used.contains(&e.id))
        .collect()
}

/// Shuffle `pool` uniformly and move its first `count` entries into `selected`
fn take_shuffled<'a, R: Rng + ?Sized>(
    mut pool: Vec<&'a Exercise>,
    count: usize,
    selected: &mut Vec<&'a Exercise>,
    used: &mut HashSet<Uuid>,
    rng: &mut R,
) {
    pool.shuffle(rng);
    for exercise in pool.into_iter().take(count) {
        used.insert(exercise.id);
        selected.push(exercise);
    }
}

/// Swap the exercise at `index` for another one of the same muscle group
///
/// Candidates share the muscle group and exercise type of the replaced
/// exercise; if there are none, any type of the same group is accepted.
/// Exercises already in the workout are never candidates. Returns `false`
/// and leaves the workout untouched when nothing qualifies.
pub fn replace_exercise<R: Rng + ?Sized>(
    workout: &mut [GeneratedExercise],
    index: usize,
    catalog: &[Exercise],
    rng: &mut R,
) -> bool {
    let Some(current) = workout.get(index) else {
        return false;
    };
    let target = current.exercise.clone();
    let in_workout: HashSet<Uuid> = workout.iter().map(|g| g.exercise.id).collect();

    let eligible = |e: &&Exercise| {
        e.muscle_group == target.muscle_group && e.id != target.id && !in_workout.contains(&e.id)
    };

    let same_type: Vec<&Exercise> = catalog
        .iter()
        .filter(eligible)
        .filter(|e| e.exercise_type == target.exercise_type)
        .collect();

    let candidates = if same_type.is_empty() {
        catalog.iter().filter(eligible).collect()
    } else {
        same_type
    };

    let Some(replacement) = candidates.choose(rng) else {
        tracing::debug!("No replacement available for {}", target.name);
        return false;
    };

    tracing::info!("Replaced {} with {}", target.name, replacement.name);
    workout[index] = GeneratedExercise {
        exercise: (*replacement).clone(),
        is_replaced: true,
    };
    true
}

/// Translate a generated workout into a new active workout record
pub fn build_workout(ctx: &UserContext, generated: &[GeneratedExercise]) -> Result<NewWorkout> {
    if generated.is_empty() {
        return Err(Error::Validation(
            "cannot start a workout without exercises".into(),
        ));
    }

    let exercises = generated
        .iter()
        .map(|g| WorkoutExercise {
            exercise_id: g.exercise.id,
            sets: g.exercise.sets,
            reps: g.exercise.reps,
            weight: 0.0,
            completed: false,
        })
        .collect();

    Ok(NewWorkout {
        user_id: ctx.user_id.clone(),
        name: format!("Workout {}", ctx.now.format("%Y-%m-%d")),
        exercises,
        status: WorkoutStatus::Active,
        created_at: ctx.now,
    })
}

/// Persist a generated workout as the user's new active workout
pub fn start_workout<S: WorkoutStore + ?Sized>(
    store: &mut S,
    ctx: &UserContext,
    generated: &[GeneratedExercise],
) -> Result<Workout> {
    let new_workout = build_workout(ctx, generated)?;
    let workout = store.create_workout(new_workout).map_err(|e| {
        tracing::error!("Failed to start workout: {}", e);
        e
    })?;
    tracing::info!(
        "Started workout '{}' with {} exercises",
        workout.name,
        workout.exercises.len()
    );
    Ok(workout)
}
