//! Reconciliation of the stored log entries of a workout against an edited
//! plan. `reconcile` computes a sequence of row operations from a snapshot,
//! `ReconcilePlan::apply` runs them in order. Application is not atomic,
//! a failed operation leaves earlier ones in place and is reported as
//! `ReconcileFailure`.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use crate::{
    BlueprintItem, DayNumber, ExerciseID, LogEntry, LogEntryRepository, LogTargets, Occurrences,
    SetNumber, ValidationError, WorkoutID, expansion::expand_item,
};

#[derive(Debug, Clone, PartialEq)]
pub enum LogOperation {
    Insert(Vec<LogEntry>),
    UpdateTargets {
        workout_id: WorkoutID,
        exercise_id: ExerciseID,
        targets: LogTargets,
    },
    TrimSets {
        workout_id: WorkoutID,
        exercise_id: ExerciseID,
        max_set: SetNumber,
    },
    RemoveExercise {
        workout_id: WorkoutID,
        exercise_id: ExerciseID,
    },
    TrimDays {
        workout_id: WorkoutID,
        max_day: DayNumber,
    },
}

impl LogOperation {
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            LogOperation::TrimSets { .. }
                | LogOperation::RemoveExercise { .. }
                | LogOperation::TrimDays { .. }
        )
    }
}

impl fmt::Display for LogOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogOperation::Insert(entries) => write!(f, "insert {} log entries", entries.len()),
            LogOperation::UpdateTargets { exercise_id, .. } => {
                write!(f, "update targets of exercise {exercise_id}")
            }
            LogOperation::TrimSets {
                exercise_id,
                max_set,
                ..
            } => write!(f, "delete sets above {max_set} of exercise {exercise_id}"),
            LogOperation::RemoveExercise { exercise_id, .. } => {
                write!(f, "delete log entries of exercise {exercise_id}")
            }
            LogOperation::TrimDays { max_day, .. } => write!(f, "delete days above {max_day}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilePlan {
    operations: Vec<LogOperation>,
}

impl ReconcilePlan {
    #[must_use]
    pub fn operations(&self) -> &[LogOperation] {
        &self.operations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Whether applying the plan would discard logged data.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.operations.iter().any(LogOperation::is_destructive)
    }

    pub async fn apply<R: LogEntryRepository>(
        self,
        repository: &R,
    ) -> Result<ReconcileReport, ReconcileFailure> {
        let total = self.operations.len();

        for (applied, operation) in self.operations.into_iter().enumerate() {
            let result: Result<(), Box<dyn std::error::Error + Send + Sync>> =
                match operation.clone() {
                    LogOperation::Insert(entries) => repository
                        .create_log_entries(entries)
                        .await
                        .map_err(Into::into),
                    LogOperation::UpdateTargets {
                        workout_id,
                        exercise_id,
                        targets,
                    } => repository
                        .update_log_targets(workout_id, exercise_id, targets)
                        .await
                        .map_err(Into::into),
                    LogOperation::TrimSets {
                        workout_id,
                        exercise_id,
                        max_set,
                    } => repository
                        .delete_sets_above(workout_id, exercise_id, max_set)
                        .await
                        .map_err(Into::into),
                    LogOperation::RemoveExercise {
                        workout_id,
                        exercise_id,
                    } => repository
                        .delete_exercise_log(workout_id, exercise_id)
                        .await
                        .map_err(Into::into),
                    LogOperation::TrimDays { workout_id, max_day } => repository
                        .delete_days_above(workout_id, max_day)
                        .await
                        .map_err(Into::into),
                };

            if let Err(source) = result {
                return Err(ReconcileFailure {
                    applied,
                    total,
                    operation,
                    source,
                });
            }
        }

        Ok(ReconcileReport { applied: total })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    pub applied: usize,
}

#[derive(thiserror::Error, Debug)]
#[error("applied {applied} of {total} operations, failed to {operation}: {source}")]
pub struct ReconcileFailure {
    pub applied: usize,
    pub total: usize,
    pub operation: LogOperation,
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

/// Computes the operations that bring the stored log entries of a workout in
/// line with an edited plan.
///
/// Exercises absent from the snapshot are inserted fully expanded. Known
/// exercises get their target fields refreshed on every row, their set count
/// reconciled against the day-one rows and missing days backfilled with the
/// new target set count. Exercises dropped from the plan and days beyond the
/// new occurrences are deleted, including any logged data.
pub fn reconcile(
    workout_id: WorkoutID,
    existing: &[LogEntry],
    items: &[BlueprintItem],
    occurrences: Occurrences,
) -> Result<ReconcilePlan, ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyPlan);
    }

    let days = DayNumber::sequence(occurrences).collect::<Vec<_>>();
    let last_day = DayNumber::from(occurrences);

    let mut coverage: BTreeMap<ExerciseID, BTreeMap<DayNumber, BTreeSet<SetNumber>>> =
        BTreeMap::new();
    for entry in existing {
        coverage
            .entry(entry.exercise_id)
            .or_default()
            .entry(entry.day)
            .or_default()
            .insert(entry.set);
    }

    let mut operations = vec![];

    for item in items {
        let Some(exercise_days) = coverage.get(&item.exercise_id) else {
            operations.push(LogOperation::Insert(expand_item(workout_id, item, &days)));
            continue;
        };

        operations.push(LogOperation::UpdateTargets {
            workout_id,
            exercise_id: item.exercise_id,
            targets: LogTargets::from(item),
        });

        #[allow(clippy::cast_possible_truncation)]
        let current_sets = exercise_days
            .get(&DayNumber::FIRST)
            .map_or(0, |sets| sets.len() as u32);
        let target_sets = u32::from(item.sets);

        if target_sets > current_sets {
            // Days without any rows get a full backfill below.
            let grow_days = days
                .iter()
                .copied()
                .filter(|day| exercise_days.contains_key(day))
                .collect::<Vec<_>>();
            let grown = expand_item(workout_id, item, &grow_days)
                .into_iter()
                .filter(|entry| u32::from(entry.set) > current_sets)
                .collect::<Vec<_>>();
            if !grown.is_empty() {
                operations.push(LogOperation::Insert(grown));
            }
        } else if target_sets < current_sets {
            operations.push(LogOperation::TrimSets {
                workout_id,
                exercise_id: item.exercise_id,
                max_set: SetNumber::from(item.sets),
            });
        }

        let missing_days = days
            .iter()
            .copied()
            .filter(|day| !exercise_days.contains_key(day))
            .collect::<Vec<_>>();
        if !missing_days.is_empty() {
            operations.push(LogOperation::Insert(expand_item(
                workout_id,
                item,
                &missing_days,
            )));
        }
    }

    let planned = items.iter().map(|i| i.exercise_id).collect::<BTreeSet<_>>();
    for exercise_id in coverage.keys().filter(|id| !planned.contains(id)) {
        operations.push(LogOperation::RemoveExercise {
            workout_id,
            exercise_id: *exercise_id,
        });
    }

    if existing.iter().any(|entry| entry.day > last_day) {
        operations.push(LogOperation::TrimDays {
            workout_id,
            max_day: last_day,
        });
    }

    Ok(ReconcilePlan { operations })
}
