//! Active workout session tracking.
//!
//! A [`SessionView`] walks the user through their most recent active workout:
//! - Loading joins each workout entry with its exercise and prepares per-set
//!   results
//! - Set operations record weight and completion and drive the rest timer
//! - Finishing writes the results back and ends the session
//!
//! Loads are tied to the view through [`LoadTicket`]s so a load that completes
//! after the view was torn down is discarded.

use crate::notify::Notifier;
use crate::store::{ExerciseCatalog, WorkoutQuery, WorkoutStore};
use crate::timer::RestTimer;
use crate::{
    Exercise, Result, UserContext, Workout, WorkoutExercise, WorkoutPatch, WorkoutStatus,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Recorded result of one set
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct SetResult {
    pub weight: f64,
    pub completed: bool,
}

/// A workout entry joined with its exercise, plus live per-set state
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveWorkoutExercise {
    pub entry: WorkoutExercise,
    pub exercise: Exercise,
    pub current_set: usize,
    pub set_results: Vec<SetResult>,
}

impl ActiveWorkoutExercise {
    pub fn new(entry: WorkoutExercise, exercise: Exercise) -> Self {
        let set_results = vec![
            SetResult {
                weight: entry.weight,
                completed: false,
            };
            entry.sets as usize
        ];
        Self {
            entry,
            exercise,
            current_set: 0,
            set_results,
        }
    }

    pub fn total_sets(&self) -> usize {
        self.set_results.len()
    }

    pub fn completed_sets(&self) -> usize {
        self.set_results.iter().filter(|s| s.completed).count()
    }

    pub fn is_complete(&self) -> bool {
        self.set_results.iter().all(|s| s.completed)
    }

    /// Snapshot to persist: the first set's weight stands for the exercise
    pub fn finalize(&self) -> WorkoutExercise {
        WorkoutExercise {
            exercise_id: self.entry.exercise_id,
            sets: self.entry.sets,
            reps: self.entry.reps,
            weight: self.set_results.first().map_or(0.0, |s| s.weight),
            completed: self.is_complete(),
        }
    }
}

/// An active workout loaded from the store, ready to be tracked
#[derive(Clone, Debug)]
pub struct LoadedWorkout {
    pub workout: Workout,
    pub exercises: Vec<ActiveWorkoutExercise>,
}

/// Fetch the user's most recent active workout and join its exercises
///
/// Returns `Ok(None)` when there is no active workout. Entries whose exercise
/// no longer exists are not tracked but stay on the workout.
pub fn load_active_workout<S>(store: &S, ctx: &UserContext) -> Result<Option<LoadedWorkout>>
where
    S: ExerciseCatalog + WorkoutStore + ?Sized,
{
    let query = WorkoutQuery::for_user(ctx.user_id.clone())
        .with_status(WorkoutStatus::Active)
        .with_limit(1);
    let Some(workout) = store.list_workouts(&query)?.into_iter().next() else {
        tracing::info!("No active workout for {}", ctx.user_id);
        return Ok(None);
    };

    let catalog: HashMap<_, _> = store
        .list_exercises(&ctx.user_id)?
        .into_iter()
        .map(|e| (e.id, e))
        .collect();

    let exercises = workout
        .exercises
        .iter()
        .filter_map(|entry| match catalog.get(&entry.exercise_id) {
            Some(exercise) => Some(ActiveWorkoutExercise::new(entry.clone(), exercise.clone())),
            None => {
                tracing::warn!(
                    "Exercise {} of workout {} no longer exists, skipping",
                    entry.exercise_id,
                    workout.id
                );
                None
            }
        })
        .collect();

    Ok(Some(LoadedWorkout { workout, exercises }))
}

/// Live state of one workout session
pub struct ActiveSession {
    workout: Workout,
    exercises: Vec<ActiveWorkoutExercise>,
    current_index: usize,
    timer: RestTimer,
    notifier: Box<dyn Notifier>,
}

impl std::fmt::Debug for ActiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveSession")
            .field("workout", &self.workout.id)
            .field("exercises", &self.exercises.len())
            .field("current_index", &self.current_index)
            .field("timer", &self.timer)
            .finish()
    }
}

impl ActiveSession {
    pub fn new(loaded: LoadedWorkout, timer: RestTimer, notifier: Box<dyn Notifier>) -> Self {
        Self {
            workout: loaded.workout,
            exercises: loaded.exercises,
            current_index: 0,
            timer,
            notifier,
        }
    }

    pub fn workout(&self) -> &Workout {
        &self.workout
    }

    pub fn exercises(&self) -> &[ActiveWorkoutExercise] {
        &self.exercises
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_exercise(&self) -> Option<&ActiveWorkoutExercise> {
        self.exercises.get(self.current_index)
    }

    pub fn timer(&self) -> &RestTimer {
        &self.timer
    }

    fn set_mut(&mut self, exercise_index: usize, set_index: usize) -> Option<&mut SetResult> {
        self.exercises
            .get_mut(exercise_index)
            .and_then(|ex| ex.set_results.get_mut(set_index))
    }

    pub fn update_set_weight(&mut self, exercise_index: usize, set_index: usize, weight: f64) {
        if let Some(set) = self.set_mut(exercise_index, set_index) {
            set.weight = weight;
        }
    }

    /// Mark a set done and move the set pointer forward
    ///
    /// Completing any set but the last one starts the rest timer.
    pub fn complete_set(&mut self, exercise_index: usize, set_index: usize) {
        let Some(exercise) = self.exercises.get_mut(exercise_index) else {
            return;
        };
        let total = exercise.total_sets();
        let Some(set) = exercise.set_results.get_mut(set_index) else {
            return;
        };

        set.completed = true;
        exercise.current_set = (set_index + 1).min(total - 1);
        tracing::debug!(
            "Completed set {}/{} of {}",
            set_index + 1,
            total,
            exercise.exercise.name
        );

        if set_index + 1 < total {
            self.timer.start(self.notifier.as_mut());
        }
    }

    /// Clear a set's completion; the set pointer stays where it is
    pub fn uncomplete_set(&mut self, exercise_index: usize, set_index: usize) {
        if let Some(set) = self.set_mut(exercise_index, set_index) {
            set.completed = false;
        }
    }

    pub fn next_exercise(&mut self) -> bool {
        if self.current_index + 1 >= self.exercises.len() {
            return false;
        }
        self.jump_to(self.current_index + 1);
        true
    }

    pub fn previous_exercise(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.jump_to(self.current_index - 1);
        true
    }

    /// Select an exercise by position (clamped) and reset the rest timer
    pub fn jump_to(&mut self, index: usize) {
        self.current_index = index.min(self.exercises.len().saturating_sub(1));
        self.timer.reset();
    }

    /// Percentage of all sets completed, 0 for a workout without sets
    pub fn progress(&self) -> f64 {
        let total: usize = self.exercises.iter().map(|e| e.total_sets()).sum();
        if total == 0 {
            return 0.0;
        }
        let completed: usize = self.exercises.iter().map(|e| e.completed_sets()).sum();
        completed as f64 / total as f64 * 100.0
    }

    pub fn start_timer(&mut self) {
        self.timer.start(self.notifier.as_mut());
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    pub fn resume_timer(&mut self) {
        self.timer.resume();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    pub fn set_rest_duration(&mut self, seconds: u32) -> Result<()> {
        self.timer.set_duration(seconds)
    }

    /// Advance the rest timer by one second
    pub fn tick(&mut self) -> crate::timer::TimerState {
        self.timer.tick(self.notifier.as_mut())
    }

    /// Entries to persist, in workout order
    ///
    /// Entries whose exercise was missing at load time are kept unchanged.
    pub fn finalized_exercises(&self) -> Vec<WorkoutExercise> {
        let mut tracked = self.exercises.iter().peekable();
        self.workout
            .exercises
            .iter()
            .map(|entry| match tracked.next_if(|e| e.entry.exercise_id == entry.exercise_id) {
                Some(active) => active.finalize(),
                None => entry.clone(),
            })
            .collect()
    }
}

/// Ticket identifying the view instance a load was started for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Lifecycle of the session view
#[derive(Debug)]
pub enum SessionState {
    Loading,
    InProgress(ActiveSession),
    /// No active workout exists; the caller should send the user to the generator
    Empty,
    Finished(Workout),
}

/// Session tracker owned by one view instance
pub struct SessionView {
    state: SessionState,
    generation: u64,
    rest_seconds: u32,
    notifier: Option<Box<dyn Notifier>>,
}

impl SessionView {
    /// Create a view in the Loading state
    ///
    /// `rest_seconds` seeds the rest timer of the loaded session.
    pub fn new(rest_seconds: u32, notifier: Box<dyn Notifier>) -> Result<Self> {
        crate::timer::validate_duration(rest_seconds)?;
        Ok(Self {
            state: SessionState::Loading,
            generation: 0,
            rest_seconds,
            notifier: Some(notifier),
        })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&ActiveSession> {
        match &self.state {
            SessionState::InProgress(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut ActiveSession> {
        match &mut self.state {
            SessionState::InProgress(session) => Some(session),
            _ => None,
        }
    }

    /// Start a load; only the returned ticket can apply its result
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.reclaim_notifier();
        self.state = SessionState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply the outcome of a load started with `ticket`
    ///
    /// Returns `Ok(false)` if the ticket is stale and the result was discarded.
    /// A failed load leaves the view in Loading and returns the error.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Option<LoadedWorkout>>,
    ) -> Result<bool> {
        if ticket.0 != self.generation || !matches!(self.state, SessionState::Loading) {
            tracing::debug!("Discarding stale session load {:?}", ticket);
            return Ok(false);
        }

        match result {
            Ok(Some(loaded)) if loaded.exercises.is_empty() => {
                tracing::warn!(
                    "Active workout '{}' has no exercises left to track",
                    loaded.workout.name
                );
                self.state = SessionState::Empty;
            }
            Ok(Some(loaded)) => {
                let timer = RestTimer::new(self.rest_seconds)?;
                let notifier: Box<dyn Notifier> = match self.notifier.take() {
                    Some(notifier) => notifier,
                    None => Box::new(crate::notify::NoopNotifier),
                };
                tracing::info!(
                    "Session started for workout '{}' ({} exercises)",
                    loaded.workout.name,
                    loaded.exercises.len()
                );
                self.state = SessionState::InProgress(ActiveSession::new(loaded, timer, notifier));
            }
            Ok(None) => self.state = SessionState::Empty,
            Err(e) => {
                tracing::error!("Error loading active workout: {}", e);
                return Err(e);
            }
        }
        Ok(true)
    }

    /// Load the active workout from `store` into this view
    pub fn load<S>(&mut self, store: &S, ctx: &UserContext) -> Result<bool>
    where
        S: ExerciseCatalog + WorkoutStore + ?Sized,
    {
        let ticket = self.begin_load();
        let result = load_active_workout(store, ctx);
        self.apply_load(ticket, result)
    }

    /// Write the results back and finish the session
    ///
    /// On a store failure the session stays in progress so the user can retry.
    pub fn finish<S>(&mut self, store: &mut S, ctx: &UserContext) -> Result<Workout>
    where
        S: WorkoutStore + ?Sized,
    {
        let session = match &self.state {
            SessionState::InProgress(session) => session,
            _ => {
                return Err(crate::Error::Other(
                    "no workout session in progress".into(),
                ))
            }
        };

        let patch = WorkoutPatch {
            status: Some(WorkoutStatus::Completed),
            exercises: Some(session.finalized_exercises()),
            completed_at: Some(ctx.now),
            updated_at: Some(ctx.now),
        };

        let workout = store
            .update_workout(&ctx.user_id, session.workout.id, patch)
            .map_err(|e| {
                tracing::error!("Error finishing workout: {}", e);
                e
            })?;

        tracing::info!("Finished workout '{}'", workout.name);
        self.reclaim_notifier();
        self.state = SessionState::Finished(workout.clone());
        Ok(workout)
    }

    /// Drop all session state; loads still in flight will be discarded
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.reclaim_notifier();
        self.state = SessionState::Loading;
        tracing::debug!("Session view torn down");
    }

    fn reclaim_notifier(&mut self) {
        let state = std::mem::replace(&mut self.state, SessionState::Loading);
        self.state = match state {
            SessionState::InProgress(session) => {
                self.notifier = Some(session.notifier);
                SessionState::Loading
            }
            other => other,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_store::JsonStore;
    use crate::notify::NoopNotifier;
    use crate::timer::TimerState;
    use crate::{Error, ExerciseType, LoadType, MuscleGroup, NewExercise, NewWorkout, UserId};
    use uuid::Uuid;

    fn ctx() -> UserContext {
        UserContext::new(UserId::new("alice"))
    }

    fn new_view() -> SessionView {
        SessionView::new(90, Box::new(NoopNotifier)).unwrap()
    }

    /// Store with one active workout of `sets` per exercise
    fn seeded_store(dir: &std::path::Path, sets: &[u32]) -> JsonStore {
        let mut store = JsonStore::new(dir);
        let ctx = ctx();
        let mut entries = Vec::new();
        for (i, &n) in sets.iter().enumerate() {
            let mut form = NewExercise::new(
                format!("Exercise {}", i),
                MuscleGroup::Chest,
                LoadType::AdditionalWeight,
                ExerciseType::Main,
            );
            form.sets = n;
            let exercise = store.create_exercise(&ctx.user_id, form, ctx.now).unwrap();
            entries.push(WorkoutExercise {
                exercise_id: exercise.id,
                sets: n,
                reps: 10,
                weight: 20.0,
                completed: false,
            });
        }
        store
            .create_workout(NewWorkout {
                user_id: ctx.user_id.clone(),
                name: "Push day".into(),
                exercises: entries,
                status: WorkoutStatus::Active,
                created_at: ctx.now,
            })
            .unwrap();
        store
    }

    fn in_progress(store: &JsonStore) -> SessionView {
        let mut view = new_view();
        assert!(view.load(store, &ctx()).unwrap());
        assert!(view.session().is_some());
        view
    }

    #[test]
    fn test_load_initializes_set_results() {
        crate::logging::init_test();
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(temp_dir.path(), &[3, 4]);
        let view = in_progress(&store);
        let session = view.session().unwrap();

        assert_eq!(session.exercises().len(), 2);
        let first = &session.exercises()[0];
        assert_eq!(first.current_set, 0);
        assert_eq!(first.set_results.len(), 3);
        assert!(first
            .set_results
            .iter()
            .all(|s| s.weight == 20.0 && !s.completed));
        assert_eq!(session.timer().state(), TimerState::Idle);
    }

    #[test]
    fn test_load_without_active_workout_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(temp_dir.path());
        let mut view = new_view();

        assert!(view.load(&store, &ctx()).unwrap());
        assert!(matches!(view.state(), SessionState::Empty));
    }

    #[test]
    fn test_load_after_teardown_is_discarded() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(temp_dir.path(), &[3]);
        let mut view = new_view();

        let ticket = view.begin_load();
        let result = load_active_workout(&store, &ctx());
        view.teardown();

        assert!(!view.apply_load(ticket, result).unwrap());
        assert!(matches!(view.state(), SessionState::Loading));
    }

    #[test]
    fn test_complete_set_advances_and_starts_timer() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(temp_dir.path(), &[3]);
        let mut view = in_progress(&store);
        let session = view.session_mut().unwrap();

        session.complete_set(0, 0);
        assert_eq!(session.exercises()[0].current_set, 1);
        assert!(session.timer().is_running());

        session.reset_timer();
        session.complete_set(0, 2);
        assert_eq!(session.exercises()[0].current_set, 2);
        assert!(!session.timer().is_running(), "last set must not start timer");

        // Pointer never passes the last set
        session.complete_set(0, 2);
        assert_eq!(session.exercises()[0].current_set, 2);
    }

    #[test]
    fn test_uncomplete_keeps_pointer() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(temp_dir.path(), &[3]);
        let mut view = in_progress(&store);
        let session = view.session_mut().unwrap();

        session.complete_set(0, 1);
        session.uncomplete_set(0, 1);

        let exercise = &session.exercises()[0];
        assert!(!exercise.set_results[1].completed);
        assert_eq!(exercise.current_set, 2);
    }

    #[test]
    fn test_out_of_range_indices_are_ignored() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(temp_dir.path(), &[2]);
        let mut view = in_progress(&store);
        let session = view.session_mut().unwrap();
        let before = session.exercises().to_vec();

        session.complete_set(3, 0);
        session.complete_set(0, 9);
        session.update_set_weight(0, 9, 50.0);
        session.uncomplete_set(7, 0);

        assert_eq!(session.exercises(), before.as_slice());
    }

    #[test]
    fn test_progress_half_done() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(temp_dir.path(), &[3, 3]);
        let mut view = in_progress(&store);
        let session = view.session_mut().unwrap();

        assert_eq!(session.progress(), 0.0);
        let mut last = 0.0;
        for set in 0..3 {
            session.complete_set(0, set);
            assert!(session.progress() >= last);
            last = session.progress();
        }
        assert!((session.progress() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_without_sets_is_zero() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(temp_dir.path(), &[0]);
        let view = in_progress(&store);
        assert_eq!(view.session().unwrap().progress(), 0.0);
    }

    #[test]
    fn test_navigation_clamps_and_resets_timer() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(temp_dir.path(), &[3, 3, 3]);
        let mut view = in_progress(&store);
        let session = view.session_mut().unwrap();

        assert!(!session.previous_exercise());
        session.complete_set(0, 0);
        assert!(session.timer().is_running());

        assert!(session.next_exercise());
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.timer().state(), TimerState::Idle);
        assert_eq!(session.timer().time_left(), 90);

        session.jump_to(10);
        assert_eq!(session.current_index(), 2);
        assert!(!session.next_exercise());

        assert!(session.previous_exercise());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_rest_timer_runs_through_session() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = seeded_store(temp_dir.path(), &[3]);
        let mut view = in_progress(&store);
        let session = view.session_mut().unwrap();

        session.set_rest_duration(30).unwrap();
        session.complete_set(0, 0);
        for _ in 0..30 {
            session.tick();
        }
        assert!(session.timer().is_finished());
        assert_eq!(session.timer().time_left(), 0);
    }

    #[test]
    fn test_finish_uses_first_set_weight() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = seeded_store(temp_dir.path(), &[3, 2]);
        let mut view = in_progress(&store);
        let ctx = ctx();

        {
            let session = view.session_mut().unwrap();
            session.update_set_weight(0, 0, 60.0);
            session.update_set_weight(0, 1, 80.0);
            session.update_set_weight(0, 2, 100.0);
            for set in 0..3 {
                session.complete_set(0, set);
            }
            session.complete_set(1, 0);
        }

        let workout = view.finish(&mut store, &ctx).unwrap();

        assert_eq!(workout.status, WorkoutStatus::Completed);
        assert_eq!(workout.completed_at, Some(ctx.now));
        assert_eq!(workout.exercises[0].weight, 60.0);
        assert!(workout.exercises[0].completed);
        assert_eq!(workout.exercises[1].weight, 20.0);
        assert!(!workout.exercises[1].completed);
        assert!(matches!(view.state(), SessionState::Finished(_)));

        // Completed workouts are no longer picked up
        let mut next = new_view();
        next.load(&store, &ctx).unwrap();
        assert!(matches!(next.state(), SessionState::Empty));
    }

    fn delete_nth_exercise(store: &mut JsonStore, n: usize) -> Uuid {
        let user = ctx().user_id;
        let mut ids: Vec<_> = store
            .list_workouts(&WorkoutQuery::for_user(user.clone()))
            .unwrap()[0]
            .exercises
            .iter()
            .map(|e| e.exercise_id)
            .collect();
        let id = ids.remove(n);
        store.delete_exercise(&user, id).unwrap();
        id
    }

    #[test]
    fn test_load_with_all_exercises_deleted_is_empty() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = seeded_store(temp_dir.path(), &[3]);
        delete_nth_exercise(&mut store, 0);

        let mut view = new_view();
        assert!(view.load(&store, &ctx()).unwrap());
        assert!(matches!(view.state(), SessionState::Empty));
    }

    #[test]
    fn test_finish_keeps_entries_of_deleted_exercises() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = seeded_store(temp_dir.path(), &[2, 3, 2]);
        let deleted = delete_nth_exercise(&mut store, 1);
        let mut view = in_progress(&store);

        {
            let session = view.session_mut().unwrap();
            assert_eq!(session.exercises().len(), 2);
            session.update_set_weight(1, 0, 45.0);
            session.complete_set(1, 0);
            session.complete_set(1, 1);
        }

        let workout = view.finish(&mut store, &ctx()).unwrap();

        assert_eq!(workout.exercises.len(), 3);
        let kept = &workout.exercises[1];
        assert_eq!(kept.exercise_id, deleted);
        assert_eq!(kept.sets, 3);
        assert_eq!(kept.weight, 20.0);
        assert!(!kept.completed);
        assert_eq!(workout.exercises[2].weight, 45.0);
        assert!(workout.exercises[2].completed);
    }

    struct FailingStore;

    impl WorkoutStore for FailingStore {
        fn list_workouts(&self, _query: &WorkoutQuery) -> Result<Vec<Workout>> {
            Err(Error::Store("backend unavailable".into()))
        }

        fn create_workout(&mut self, _data: NewWorkout) -> Result<Workout> {
            Err(Error::Store("backend unavailable".into()))
        }

        fn update_workout(
            &mut self,
            _user: &UserId,
            _id: Uuid,
            _patch: WorkoutPatch,
        ) -> Result<Workout> {
            Err(Error::Store("backend unavailable".into()))
        }
    }

    #[test]
    fn test_failed_finish_keeps_session() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = seeded_store(temp_dir.path(), &[2]);
        let mut view = in_progress(&store);
        view.session_mut().unwrap().complete_set(0, 0);

        let result = view.finish(&mut FailingStore, &ctx());
        assert!(matches!(result, Err(Error::Store(_))));

        let session = view.session().expect("session kept for retry");
        assert!(session.exercises()[0].set_results[0].completed);

        // Retry against a working store succeeds
        assert!(view.finish(&mut store, &ctx()).is_ok());
    }

    #[test]
    fn test_failed_load_stays_loading() {
        let mut view = new_view();
        let ticket = view.begin_load();

        let result = view.apply_load(ticket, Err(Error::Store("offline".into())));

        assert!(result.is_err());
        assert!(matches!(view.state(), SessionState::Loading));
    }
}
