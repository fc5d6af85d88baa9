//! Home screen summary.

use crate::store::{ExerciseCatalog, WorkoutQuery, WorkoutStore};
use crate::{Result, UserContext, Workout};
use chrono::Duration;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, Serialize, PartialEq, Eq)]
pub struct WorkoutStats {
    pub total_exercises: usize,
    pub total_workouts: usize,
    pub workouts_this_week: usize,
}

/// Count workouts created within the seven days before `ctx.now`
pub fn workouts_in_last_week(workouts: &[Workout], ctx: &UserContext) -> usize {
    let week_ago = ctx.now - Duration::days(7);
    workouts.iter().filter(|w| w.created_at > week_ago).count()
}

pub fn load_stats<S>(store: &S, ctx: &UserContext) -> Result<WorkoutStats>
where
    S: ExerciseCatalog + WorkoutStore + ?Sized,
{
    let exercises = store.list_exercises(&ctx.user_id)?;
    let workouts = store.list_workouts(&WorkoutQuery::for_user(ctx.user_id.clone()))?;

    Ok(WorkoutStats {
        total_exercises: exercises.len(),
        total_workouts: workouts.len(),
        workouts_this_week: workouts_in_last_week(&workouts, ctx),
    })
}
