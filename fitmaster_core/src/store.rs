//! Collaborator interfaces for persistence and identity.
//!
//! The core never talks to a backend directly. It goes through these traits,
//! scoped by the user id carried in [`UserContext`](crate::UserContext).

use crate::{
    Error, Exercise, NewExercise, NewWorkout, Result, UserId, Workout, WorkoutPatch,
    WorkoutStatus,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Store of user-owned exercise definitions
pub trait ExerciseCatalog {
    /// All exercises owned by `user`, newest first
    fn list_exercises(&self, user: &UserId) -> Result<Vec<Exercise>>;

    fn get_exercise(&self, user: &UserId, id: Uuid) -> Result<Option<Exercise>>;

    fn create_exercise(
        &mut self,
        user: &UserId,
        data: NewExercise,
        now: DateTime<Utc>,
    ) -> Result<Exercise>;

    fn update_exercise(
        &mut self,
        user: &UserId,
        id: Uuid,
        data: NewExercise,
        now: DateTime<Utc>,
    ) -> Result<Exercise>;

    fn delete_exercise(&mut self, user: &UserId, id: Uuid) -> Result<()>;
}

/// Filter for listing workouts
#[derive(Clone, Debug)]
pub struct WorkoutQuery {
    pub user_id: UserId,
    pub status: Option<WorkoutStatus>,
    pub limit: Option<usize>,
}

impl WorkoutQuery {
    pub fn for_user(user_id: UserId) -> Self {
        Self {
            user_id,
            status: None,
            limit: None,
        }
    }

    pub fn with_status(mut self, status: WorkoutStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Apply the query to a set of records: filter, order newest first, truncate
    pub fn apply(&self, workouts: impl IntoIterator<Item = Workout>) -> Vec<Workout> {
        let mut matched: Vec<Workout> = workouts
            .into_iter()
            .filter(|w| w.user_id == self.user_id)
            .filter(|w| self.status.map_or(true, |s| w.status == s))
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = self.limit {
            matched.truncate(limit);
        }
        matched
    }
}

/// Store of workout records
pub trait WorkoutStore {
    /// Workouts matching `query`, newest first
    fn list_workouts(&self, query: &WorkoutQuery) -> Result<Vec<Workout>>;

    fn create_workout(&mut self, data: NewWorkout) -> Result<Workout>;

    fn update_workout(&mut self, user: &UserId, id: Uuid, patch: WorkoutPatch) -> Result<Workout>;
}

/// Source of the authenticated user
pub trait Identity {
    /// The current user, or [`Error::NotAuthenticated`]
    fn current_user(&self) -> Result<UserId>;
}

/// Identity fixed at construction, e.g. from configuration or a CLI flag
#[derive(Clone, Debug, Default)]
pub struct StaticIdentity {
    user: Option<UserId>,
}

impl StaticIdentity {
    pub fn new(user: Option<UserId>) -> Self {
        Self { user }
    }
}

impl Identity for StaticIdentity {
    fn current_user(&self) -> Result<UserId> {
        match &self.user {
            Some(user) if !user.0.trim().is_empty() => Ok(user.clone()),
            _ => Err(Error::NotAuthenticated),
        }
    }
}
