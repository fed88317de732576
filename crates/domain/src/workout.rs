use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use chrono::NaiveDate;
use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{
    BlueprintItem, CoachFeedback, CreateError, DeleteError, ExerciseID, Name, OrderToken,
    ReadError, ReconcileReport, Session, Sets, TargetReps, TemplateID, Tempo, UpdateError,
    UserID, blueprint::Rest,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService: Send + Sync + 'static {
    async fn get_workouts(
        &self,
        session: &Session,
        user_id: UserID,
    ) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(
        &self,
        session: &Session,
        id: WorkoutID,
    ) -> Result<(Workout, Vec<LogEntry>), ReadError>;
    async fn create_workout(
        &self,
        session: &Session,
        user_id: UserID,
        name: Name,
        date: NaiveDate,
        occurrences: Occurrences,
        items: Vec<BlueprintItem>,
    ) -> Result<Workout, CreateError>;
    async fn create_workout_from_template(
        &self,
        session: &Session,
        user_id: UserID,
        template_id: TemplateID,
        name: Name,
        date: NaiveDate,
        occurrences: Occurrences,
    ) -> Result<Workout, CreateError>;
    async fn edit_workout_plan(
        &self,
        session: &Session,
        id: WorkoutID,
        items: Vec<BlueprintItem>,
        occurrences: Occurrences,
    ) -> Result<ReconcileReport, UpdateError>;
    async fn modify_workout(
        &self,
        session: &Session,
        id: WorkoutID,
        name: Option<Name>,
        date: Option<NaiveDate>,
    ) -> Result<Workout, UpdateError>;
    async fn duplicate_workout(
        &self,
        session: &Session,
        id: WorkoutID,
        target_date: NaiveDate,
        options: DuplicateOptions,
    ) -> Result<Workout, CreateError>;
    async fn delete_workout(&self, session: &Session, id: WorkoutID)
    -> Result<WorkoutID, DeleteError>;
    async fn update_execution(
        &self,
        session: &Session,
        key: LogKey,
        weight: Option<Weight>,
        reps: Option<Reps>,
        completed: bool,
    ) -> Result<LogEntry, UpdateError>;
    async fn attach_set_video(
        &self,
        session: &Session,
        key: LogKey,
        video: Vec<u8>,
        content_type: &str,
    ) -> Result<LogEntry, UpdateError>;
    async fn comment_set(
        &self,
        session: &Session,
        key: LogKey,
        comment: Option<String>,
    ) -> Result<LogEntry, UpdateError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self, user_id: UserID) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn modify_workout(
        &self,
        id: WorkoutID,
        name: Option<Name>,
        date: Option<NaiveDate>,
        occurrences: Option<Occurrences>,
    ) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait LogEntryRepository {
    async fn read_log_entries(&self, workout_id: WorkoutID) -> Result<Vec<LogEntry>, ReadError>;
    async fn count_exercise_references(&self, exercise_id: ExerciseID)
    -> Result<usize, ReadError>;
    async fn create_log_entries(&self, entries: Vec<LogEntry>) -> Result<(), CreateError>;
    async fn update_log_targets(
        &self,
        workout_id: WorkoutID,
        exercise_id: ExerciseID,
        targets: LogTargets,
    ) -> Result<(), UpdateError>;
    async fn update_log_execution(
        &self,
        key: LogKey,
        weight: Option<Weight>,
        reps: Option<Reps>,
        completed: bool,
    ) -> Result<LogEntry, UpdateError>;
    async fn update_log_video(
        &self,
        key: LogKey,
        video_url: Option<String>,
    ) -> Result<LogEntry, UpdateError>;
    async fn update_log_comment(
        &self,
        key: LogKey,
        comment: Option<String>,
    ) -> Result<LogEntry, UpdateError>;
    async fn delete_sets_above(
        &self,
        workout_id: WorkoutID,
        exercise_id: ExerciseID,
        max_set: SetNumber,
    ) -> Result<(), DeleteError>;
    async fn delete_exercise_log(
        &self,
        workout_id: WorkoutID,
        exercise_id: ExerciseID,
    ) -> Result<(), DeleteError>;
    async fn delete_days_above(
        &self,
        workout_id: WorkoutID,
        max_day: DayNumber,
    ) -> Result<(), DeleteError>;
    async fn delete_workout_log(&self, workout_id: WorkoutID) -> Result<(), DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workout {
    pub id: WorkoutID,
    pub user_id: UserID,
    pub name: Name,
    pub date: NaiveDate,
    pub occurrences: Occurrences,
    pub feedback: Option<CoachFeedback>,
}

#[derive(Deref, Display, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// Number of training days a workout spans.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Occurrences(u32);

impl Occurrences {
    pub fn new(value: u32) -> Result<Self, OccurrencesError> {
        if !(1..100).contains(&value) {
            return Err(OccurrencesError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Occurrences {
    type Error = OccurrencesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Occurrences::new(parsed_value),
            Err(_) => Err(OccurrencesError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum OccurrencesError {
    #[error("Occurrences must be in the range 1 to 99")]
    OutOfRange,
    #[error("Occurrences must be an integer")]
    ParseError,
}

#[derive(Debug, Display, Clone, Copy, Hash, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayNumber(u32);

impl DayNumber {
    pub const FIRST: DayNumber = DayNumber(1);

    pub fn new(value: u32) -> Result<Self, DayNumberError> {
        if !(1..100).contains(&value) {
            return Err(DayNumberError::OutOfRange);
        }

        Ok(Self(value))
    }

    pub fn sequence(through: Occurrences) -> impl Iterator<Item = DayNumber> {
        (1..=through.0).map(DayNumber)
    }
}

impl From<Occurrences> for DayNumber {
    fn from(value: Occurrences) -> Self {
        Self(value.0)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DayNumberError {
    #[error("Day must be in the range 1 to 99")]
    OutOfRange,
}

#[derive(Debug, Display, Clone, Copy, Hash, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetNumber(u32);

impl SetNumber {
    pub const FIRST: SetNumber = SetNumber(1);

    pub fn new(value: u32) -> Result<Self, SetNumberError> {
        if !(1..100).contains(&value) {
            return Err(SetNumberError::OutOfRange);
        }

        Ok(Self(value))
    }

    pub fn sequence(through: Sets) -> impl Iterator<Item = SetNumber> {
        (1..=u32::from(through)).map(SetNumber)
    }
}

impl From<Sets> for SetNumber {
    fn from(value: Sets) -> Self {
        Self(u32::from(value))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SetNumberError {
    #[error("Set must be in the range 1 to 99")]
    OutOfRange,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 kg")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// One set of one exercise on one training day. Log entries have no
/// surrogate id, the four coordinates identify a row.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub workout_id: WorkoutID,
    pub exercise_id: ExerciseID,
    pub day: DayNumber,
    pub set: SetNumber,
    pub order: OrderToken,
    pub target_reps: TargetReps,
    pub tempo: Tempo,
    pub rest: Rest,
    pub notes: String,
    pub weight: Option<Weight>,
    pub reps: Option<Reps>,
    pub completed: bool,
    pub video_url: Option<String>,
    pub coach_comment: Option<String>,
}

impl LogEntry {
    #[must_use]
    pub fn key(&self) -> LogKey {
        LogKey {
            workout_id: self.workout_id,
            exercise_id: self.exercise_id,
            day: self.day,
            set: self.set,
        }
    }
}

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LogKey {
    pub workout_id: WorkoutID,
    pub exercise_id: ExerciseID,
    pub day: DayNumber,
    pub set: SetNumber,
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.workout_id, self.exercise_id, self.day, self.set
        )
    }
}

/// Planning fields shared by every log entry of one exercise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogTargets {
    pub order: OrderToken,
    pub target_reps: TargetReps,
    pub tempo: Tempo,
    pub rest: Rest,
    pub notes: String,
}

impl From<&BlueprintItem> for LogTargets {
    fn from(value: &BlueprintItem) -> Self {
        Self {
            order: value.order.clone(),
            target_reps: value.target_reps.clone(),
            tempo: value.tempo.clone(),
            rest: value.rest,
            notes: value.notes.clone(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateOptions {
    pub carry_weights: bool,
}

/// Builds the log entries of a duplicated workout: identical plan
/// coordinates and targets, execution state reset. With `carry_weights` the
/// source weights are kept as targets to beat.
#[must_use]
pub fn duplicate_rows(
    entries: &[LogEntry],
    new_id: WorkoutID,
    options: DuplicateOptions,
) -> Vec<LogEntry> {
    entries
        .iter()
        .map(|entry| LogEntry {
            workout_id: new_id,
            exercise_id: entry.exercise_id,
            day: entry.day,
            set: entry.set,
            order: entry.order.clone(),
            target_reps: entry.target_reps.clone(),
            tempo: entry.tempo.clone(),
            rest: entry.rest,
            notes: entry.notes.clone(),
            weight: if options.carry_weights {
                entry.weight
            } else {
                None
            },
            reps: None,
            completed: false,
            video_url: None,
            coach_comment: None,
        })
        .collect()
}

/// Recovers the plan of a workout from its day-one log entries. Items are
/// ordered by order token, ties broken by exercise id.
#[must_use]
pub fn blueprint_of(entries: &[LogEntry]) -> Vec<BlueprintItem> {
    let mut groups: BTreeMap<ExerciseID, Vec<&LogEntry>> = BTreeMap::new();

    for entry in entries.iter().filter(|e| e.day == DayNumber::FIRST) {
        groups.entry(entry.exercise_id).or_default().push(entry);
    }

    let mut items = groups
        .into_iter()
        .filter_map(|(exercise_id, rows)| {
            let sets = rows.iter().map(|r| r.set).collect::<BTreeSet<_>>().len();
            let sets = Sets::new(u32::try_from(sets).ok()?).ok()?;
            let first = rows.iter().min_by_key(|r| r.set)?;
            Some(BlueprintItem {
                exercise_id,
                order: first.order.clone(),
                sets,
                target_reps: first.target_reps.clone(),
                tempo: first.tempo.clone(),
                rest: first.rest,
                notes: first.notes.clone(),
            })
        })
        .collect::<Vec<_>>();

    items.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.exercise_id.cmp(&b.exercise_id))
    });
    items
}
