use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::{
    BodyPart, Exercise, ExerciseID, LogEntry, ReadError, Reps, Session, UserID, Weight, Workout,
    WorkoutID,
};

#[allow(async_fn_in_trait)]
pub trait ProgressService: Send + Sync + 'static {
    async fn get_weekly_volume(
        &self,
        session: &Session,
        user_id: UserID,
    ) -> Result<BTreeMap<NaiveDate, BTreeMap<BodyPart, f32>>, ReadError>;
    async fn get_one_rep_max_trend(
        &self,
        session: &Session,
        user_id: UserID,
        exercise_id: ExerciseID,
    ) -> Result<Vec<(NaiveDate, f32)>, ReadError>;
}

/// Monday of the week the date falls into.
#[must_use]
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Epley estimate of the one-rep max for a completed set.
#[must_use]
pub fn estimated_one_rep_max(weight: Weight, reps: Reps) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    {
        f32::from(weight) * (1.0 + u32::from(reps) as f32 / 30.0)
    }
}

/// Sum of `weight × reps` over completed sets, grouped by the Monday of the
/// workout's week and the exercise's body part.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn weekly_volume(
    entries: &[LogEntry],
    workouts: &[Workout],
    exercises: &[Exercise],
) -> BTreeMap<NaiveDate, BTreeMap<BodyPart, f32>> {
    let dates = workouts
        .iter()
        .map(|w| (w.id, w.date))
        .collect::<BTreeMap<WorkoutID, NaiveDate>>();
    let body_parts = exercises
        .iter()
        .map(|e| (e.id, e.body_part))
        .collect::<BTreeMap<ExerciseID, BodyPart>>();

    let mut volume: BTreeMap<NaiveDate, BTreeMap<BodyPart, f32>> = BTreeMap::new();

    for entry in entries {
        let Some((weight, reps)) = executed(entry) else {
            continue;
        };
        let Some(date) = dates.get(&entry.workout_id) else {
            continue;
        };
        let Some(body_part) = body_parts.get(&entry.exercise_id) else {
            continue;
        };
        *volume
            .entry(week_start(*date))
            .or_default()
            .entry(*body_part)
            .or_default() += f32::from(weight) * u32::from(reps) as f32;
    }

    volume
}

/// Best estimated one-rep max per date for one exercise, chronologically.
#[must_use]
pub fn one_rep_max_trend(
    entries: &[LogEntry],
    workouts: &[Workout],
    exercise_id: ExerciseID,
) -> Vec<(NaiveDate, f32)> {
    let dates = workouts
        .iter()
        .map(|w| (w.id, w.date))
        .collect::<BTreeMap<WorkoutID, NaiveDate>>();

    let mut trend: BTreeMap<NaiveDate, f32> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.exercise_id == exercise_id) {
        let Some((weight, reps)) = executed(entry) else {
            continue;
        };
        let Some(date) = dates.get(&entry.workout_id) else {
            continue;
        };
        let estimate = estimated_one_rep_max(weight, reps);
        trend
            .entry(*date)
            .and_modify(|best| *best = best.max(estimate))
            .or_insert(estimate);
    }

    trend.into_iter().collect()
}

fn executed(entry: &LogEntry) -> Option<(Weight, Reps)> {
    if !entry.completed {
        return None;
    }
    match (entry.weight, entry.reps) {
        (Some(weight), Some(reps)) if f32::from(weight) > 0.0 && u32::from(reps) > 0 => {
            Some((weight, reps))
        }
        _ => None,
    }
}
