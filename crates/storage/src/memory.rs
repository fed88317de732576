//! In-memory storage. All state lives behind a single lock, log entries are
//! keyed by their plan coordinates so reads come back in (workout, exercise,
//! day, set) order.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use ferrum_domain as domain;

use domain::{NotFoundError, StorageError};

#[derive(Default)]
pub struct Memory {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    session: Option<domain::Session>,
    users: BTreeMap<domain::UserID, domain::User>,
    exercises: BTreeMap<domain::ExerciseID, domain::Exercise>,
    templates: BTreeMap<domain::TemplateID, domain::Template>,
    workouts: BTreeMap<domain::WorkoutID, domain::Workout>,
    log_entries: BTreeMap<domain::LogKey, domain::LogEntry>,
    videos: BTreeMap<String, (Vec<u8>, String)>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl domain::SessionRepository for Memory {
    async fn request_session(
        &self,
        user_id: domain::UserID,
    ) -> Result<domain::Session, domain::ReadError> {
        let mut state = self.write();
        let user = state
            .users
            .get(&user_id)
            .ok_or(NotFoundError::User(user_id))?;
        let session = domain::Session::from(user);
        state.session = Some(session);
        Ok(session)
    }

    async fn initialize_session(&self) -> Result<domain::Session, domain::ReadError> {
        self.read().session.ok_or(StorageError::NoSession.into())
    }

    async fn delete_session(&self) -> Result<(), domain::DeleteError> {
        self.write().session = None;
        Ok(())
    }
}

impl domain::UserRepository for Memory {
    async fn read_users(&self) -> Result<Vec<domain::User>, domain::ReadError> {
        Ok(self.read().users.values().cloned().collect())
    }

    async fn create_user(&self, user: domain::User) -> Result<domain::User, domain::CreateError> {
        let mut state = self.write();
        if state.users.contains_key(&user.id) {
            return Err(StorageError::Rejected(format!("user {} already exists", user.id)).into());
        }
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn replace_user(&self, user: domain::User) -> Result<domain::User, domain::UpdateError> {
        let mut state = self.write();
        let stored = state
            .users
            .get_mut(&user.id)
            .ok_or(NotFoundError::User(user.id))?;
        *stored = user.clone();
        Ok(user)
    }

    async fn delete_user(&self, id: domain::UserID) -> Result<domain::UserID, domain::DeleteError> {
        self.write()
            .users
            .remove(&id)
            .ok_or(NotFoundError::User(id))?;
        Ok(id)
    }
}

impl domain::ExerciseRepository for Memory {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        Ok(self.read().exercises.values().cloned().collect())
    }

    async fn create_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::CreateError> {
        let mut state = self.write();
        if state.exercises.contains_key(&exercise.id) {
            return Err(
                StorageError::Rejected(format!("exercise {} already exists", exercise.id)).into(),
            );
        }
        state.exercises.insert(exercise.id, exercise.clone());
        Ok(exercise)
    }

    async fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let mut state = self.write();
        let stored = state
            .exercises
            .get_mut(&exercise.id)
            .ok_or(NotFoundError::Exercise(exercise.id))?;
        *stored = exercise.clone();
        Ok(exercise)
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        self.write()
            .exercises
            .remove(&id)
            .ok_or(NotFoundError::Exercise(id))?;
        Ok(id)
    }
}

impl domain::TemplateRepository for Memory {
    async fn read_templates(&self) -> Result<Vec<domain::Template>, domain::ReadError> {
        Ok(self.read().templates.values().cloned().collect())
    }

    async fn read_template(
        &self,
        id: domain::TemplateID,
    ) -> Result<domain::Template, domain::ReadError> {
        self.read()
            .templates
            .get(&id)
            .cloned()
            .ok_or(NotFoundError::Template(id).into())
    }

    async fn create_template(
        &self,
        template: domain::Template,
    ) -> Result<domain::Template, domain::CreateError> {
        let mut state = self.write();
        if state.templates.contains_key(&template.id) {
            return Err(
                StorageError::Rejected(format!("template {} already exists", template.id)).into(),
            );
        }
        state.templates.insert(template.id, template.clone());
        Ok(template)
    }

    async fn modify_template(
        &self,
        id: domain::TemplateID,
        name: Option<domain::Name>,
        description: Option<String>,
        items: Option<Vec<domain::BlueprintItem>>,
    ) -> Result<domain::Template, domain::UpdateError> {
        let mut state = self.write();
        let template = state
            .templates
            .get_mut(&id)
            .ok_or(NotFoundError::Template(id))?;
        if let Some(name) = name {
            template.name = name;
        }
        if let Some(description) = description {
            template.description = description;
        }
        if let Some(items) = items {
            template.items = items;
        }
        Ok(template.clone())
    }

    async fn delete_template(
        &self,
        id: domain::TemplateID,
    ) -> Result<domain::TemplateID, domain::DeleteError> {
        self.write()
            .templates
            .remove(&id)
            .ok_or(NotFoundError::Template(id))?;
        Ok(id)
    }
}

impl domain::WorkoutRepository for Memory {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        Ok(self
            .read()
            .workouts
            .values()
            .filter(|w| w.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        self.read()
            .workouts
            .get(&id)
            .cloned()
            .ok_or(NotFoundError::Workout(id).into())
    }

    async fn create_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        let mut state = self.write();
        if state.workouts.contains_key(&workout.id) {
            return Err(
                StorageError::Rejected(format!("workout {} already exists", workout.id)).into(),
            );
        }
        state.workouts.insert(workout.id, workout.clone());
        Ok(workout)
    }

    async fn modify_workout(
        &self,
        id: domain::WorkoutID,
        name: Option<domain::Name>,
        date: Option<NaiveDate>,
        occurrences: Option<domain::Occurrences>,
    ) -> Result<domain::Workout, domain::UpdateError> {
        let mut state = self.write();
        let workout = state
            .workouts
            .get_mut(&id)
            .ok_or(NotFoundError::Workout(id))?;
        if let Some(name) = name {
            workout.name = name;
        }
        if let Some(date) = date {
            workout.date = date;
        }
        if let Some(occurrences) = occurrences {
            workout.occurrences = occurrences;
        }
        Ok(workout.clone())
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.write()
            .workouts
            .remove(&id)
            .ok_or(NotFoundError::Workout(id))?;
        Ok(id)
    }
}

impl domain::LogEntryRepository for Memory {
    async fn read_log_entries(
        &self,
        workout_id: domain::WorkoutID,
    ) -> Result<Vec<domain::LogEntry>, domain::ReadError> {
        Ok(self
            .read()
            .log_entries
            .values()
            .filter(|e| e.workout_id == workout_id)
            .cloned()
            .collect())
    }

    async fn count_exercise_references(
        &self,
        exercise_id: domain::ExerciseID,
    ) -> Result<usize, domain::ReadError> {
        Ok(self
            .read()
            .log_entries
            .values()
            .filter(|e| e.exercise_id == exercise_id)
            .count())
    }

    async fn create_log_entries(
        &self,
        entries: Vec<domain::LogEntry>,
    ) -> Result<(), domain::CreateError> {
        let mut state = self.write();
        for entry in &entries {
            if state.log_entries.contains_key(&entry.key()) {
                return Err(StorageError::Rejected(format!(
                    "log entry {} already exists",
                    entry.key()
                ))
                .into());
            }
        }
        for entry in entries {
            state.log_entries.insert(entry.key(), entry);
        }
        Ok(())
    }

    async fn update_log_targets(
        &self,
        workout_id: domain::WorkoutID,
        exercise_id: domain::ExerciseID,
        targets: domain::LogTargets,
    ) -> Result<(), domain::UpdateError> {
        let mut state = self.write();
        for entry in state
            .log_entries
            .values_mut()
            .filter(|e| e.workout_id == workout_id && e.exercise_id == exercise_id)
        {
            entry.order = targets.order.clone();
            entry.target_reps = targets.target_reps.clone();
            entry.tempo = targets.tempo.clone();
            entry.rest = targets.rest;
            entry.notes = targets.notes.clone();
        }
        Ok(())
    }

    async fn update_log_execution(
        &self,
        key: domain::LogKey,
        weight: Option<domain::Weight>,
        reps: Option<domain::Reps>,
        completed: bool,
    ) -> Result<domain::LogEntry, domain::UpdateError> {
        let mut state = self.write();
        let entry = state
            .log_entries
            .get_mut(&key)
            .ok_or(NotFoundError::LogEntry(key))?;
        entry.weight = weight;
        entry.reps = reps;
        entry.completed = completed;
        Ok(entry.clone())
    }

    async fn update_log_video(
        &self,
        key: domain::LogKey,
        video_url: Option<String>,
    ) -> Result<domain::LogEntry, domain::UpdateError> {
        let mut state = self.write();
        let entry = state
            .log_entries
            .get_mut(&key)
            .ok_or(NotFoundError::LogEntry(key))?;
        entry.video_url = video_url;
        Ok(entry.clone())
    }

    async fn update_log_comment(
        &self,
        key: domain::LogKey,
        comment: Option<String>,
    ) -> Result<domain::LogEntry, domain::UpdateError> {
        let mut state = self.write();
        let entry = state
            .log_entries
            .get_mut(&key)
            .ok_or(NotFoundError::LogEntry(key))?;
        entry.coach_comment = comment;
        Ok(entry.clone())
    }

    async fn delete_sets_above(
        &self,
        workout_id: domain::WorkoutID,
        exercise_id: domain::ExerciseID,
        max_set: domain::SetNumber,
    ) -> Result<(), domain::DeleteError> {
        self.write().log_entries.retain(|key, _| {
            !(key.workout_id == workout_id && key.exercise_id == exercise_id && key.set > max_set)
        });
        Ok(())
    }

    async fn delete_exercise_log(
        &self,
        workout_id: domain::WorkoutID,
        exercise_id: domain::ExerciseID,
    ) -> Result<(), domain::DeleteError> {
        self.write()
            .log_entries
            .retain(|key, _| !(key.workout_id == workout_id && key.exercise_id == exercise_id));
        Ok(())
    }

    async fn delete_days_above(
        &self,
        workout_id: domain::WorkoutID,
        max_day: domain::DayNumber,
    ) -> Result<(), domain::DeleteError> {
        self.write()
            .log_entries
            .retain(|key, _| !(key.workout_id == workout_id && key.day > max_day));
        Ok(())
    }

    async fn delete_workout_log(
        &self,
        workout_id: domain::WorkoutID,
    ) -> Result<(), domain::DeleteError> {
        self.write()
            .log_entries
            .retain(|key, _| key.workout_id != workout_id);
        Ok(())
    }
}

impl domain::FeedbackRepository for Memory {
    async fn update_feedback(
        &self,
        workout_id: domain::WorkoutID,
        feedback: Option<domain::CoachFeedback>,
    ) -> Result<(), domain::UpdateError> {
        let mut state = self.write();
        let workout = state
            .workouts
            .get_mut(&workout_id)
            .ok_or(NotFoundError::Workout(workout_id))?;
        workout.feedback = feedback;
        Ok(())
    }
}

impl domain::MediaRepository for Memory {
    async fn upload_video(
        &self,
        name: &str,
        video: Vec<u8>,
        content_type: &str,
    ) -> Result<String, domain::CreateError> {
        self.write()
            .videos
            .insert(name.to_string(), (video, content_type.to_string()));
        Ok(format!("memory://set-videos/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use domain::{
        ExerciseRepository, FeedbackRepository, LogEntryRepository, MediaRepository,
        SessionRepository, TemplateRepository, UserRepository, WorkoutRepository,
    };

    use crate::tests::data::{
        EXERCISE, EXERCISES, EXERCISE_2, LOG_ENTRIES, LOG_ENTRY, TEMPLATE, USER, USERS, USER_2,
        WORKOUT,
    };

    use super::*;

    #[tokio::test]
    async fn test_users() {
        let memory = Memory::new();

        memory.create_user(USER.clone()).await.unwrap();
        memory.create_user(USER_2.clone()).await.unwrap();

        assert_eq!(memory.read_users().await.unwrap(), USERS.to_vec());

        assert!(matches!(
            memory.create_user(USER.clone()).await,
            Err(domain::CreateError::Storage(StorageError::Rejected(_)))
        ));

        let mut renamed = USER.clone();
        renamed.name = domain::Name::new("Alicia").unwrap();
        assert_eq!(memory.replace_user(renamed.clone()).await.unwrap(), renamed);

        assert_eq!(memory.delete_user(USER_2.id).await.unwrap(), USER_2.id);
        assert!(matches!(
            memory.delete_user(USER_2.id).await,
            Err(domain::DeleteError::NotFound(NotFoundError::User(id))) if id == USER_2.id
        ));
        assert_eq!(memory.read_users().await.unwrap(), vec![renamed]);
    }

    #[tokio::test]
    async fn test_sessions() {
        let memory = Memory::new();

        assert!(matches!(
            memory.initialize_session().await,
            Err(domain::ReadError::Storage(StorageError::NoSession))
        ));

        memory.create_user(USER.clone()).await.unwrap();

        assert!(matches!(
            memory.request_session(USER_2.id).await,
            Err(domain::ReadError::NotFound(NotFoundError::User(id))) if id == USER_2.id
        ));

        let session = memory.request_session(USER.id).await.unwrap();
        assert_eq!(session, domain::Session::from(&*USER));
        assert_eq!(memory.initialize_session().await.unwrap(), session);

        memory.delete_session().await.unwrap();
        assert!(matches!(
            memory.initialize_session().await,
            Err(domain::ReadError::Storage(StorageError::NoSession))
        ));
    }

    #[tokio::test]
    async fn test_exercises() {
        let memory = Memory::new();

        memory.create_exercise(EXERCISE.clone()).await.unwrap();
        memory.create_exercise(EXERCISE_2.clone()).await.unwrap();

        assert_eq!(memory.read_exercises().await.unwrap(), EXERCISES.to_vec());

        let mut changed = EXERCISE.clone();
        changed.notes = "low bar".to_string();
        assert_eq!(
            memory.replace_exercise(changed.clone()).await.unwrap(),
            changed
        );

        assert_eq!(
            memory.delete_exercise(EXERCISE.id).await.unwrap(),
            EXERCISE.id
        );
        assert_eq!(
            memory.read_exercises().await.unwrap(),
            vec![EXERCISE_2.clone()]
        );
    }

    #[tokio::test]
    async fn test_templates() {
        let memory = Memory::new();

        memory.create_template(TEMPLATE.clone()).await.unwrap();

        assert_eq!(
            memory.read_templates().await.unwrap(),
            vec![TEMPLATE.clone()]
        );
        assert_eq!(
            memory.read_template(TEMPLATE.id).await.unwrap(),
            TEMPLATE.clone()
        );

        let modified = memory
            .modify_template(
                TEMPLATE.id,
                Some(domain::Name::new("Lower Body B").unwrap()),
                None,
                Some(TEMPLATE.items[..1].to_vec()),
            )
            .await
            .unwrap();
        assert_eq!(modified.name, domain::Name::new("Lower Body B").unwrap());
        assert_eq!(modified.description, TEMPLATE.description);
        assert_eq!(modified.items, TEMPLATE.items[..1].to_vec());

        assert_eq!(
            memory.delete_template(TEMPLATE.id).await.unwrap(),
            TEMPLATE.id
        );
        assert!(matches!(
            memory.read_template(TEMPLATE.id).await,
            Err(domain::ReadError::NotFound(NotFoundError::Template(id))) if id == TEMPLATE.id
        ));
    }

    #[tokio::test]
    async fn test_workouts() {
        let memory = Memory::new();

        memory.create_workout(WORKOUT.clone()).await.unwrap();

        assert_eq!(
            memory.read_workouts(USER_2.id).await.unwrap(),
            vec![WORKOUT.clone()]
        );
        assert_eq!(memory.read_workouts(USER.id).await.unwrap(), vec![]);

        let modified = memory
            .modify_workout(
                WORKOUT.id,
                None,
                NaiveDate::from_ymd_opt(2024, 3, 11),
                Some(domain::Occurrences::new(3).unwrap()),
            )
            .await
            .unwrap();
        assert_eq!(modified.name, WORKOUT.name);
        assert_eq!(modified.date, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert_eq!(modified.occurrences, domain::Occurrences::new(3).unwrap());

        assert_eq!(memory.delete_workout(WORKOUT.id).await.unwrap(), WORKOUT.id);
        assert!(matches!(
            memory.read_workout(WORKOUT.id).await,
            Err(domain::ReadError::NotFound(NotFoundError::Workout(id))) if id == WORKOUT.id
        ));
    }

    #[tokio::test]
    async fn test_log_entries() {
        let memory = Memory::new();

        memory
            .create_log_entries(LOG_ENTRIES.clone())
            .await
            .unwrap();

        assert_eq!(
            memory.read_log_entries(WORKOUT.id).await.unwrap(),
            LOG_ENTRIES.to_vec()
        );
        assert!(matches!(
            memory.create_log_entries(vec![LOG_ENTRY.clone()]).await,
            Err(domain::CreateError::Storage(StorageError::Rejected(_)))
        ));

        let updated = memory
            .update_log_execution(
                LOG_ENTRY.key(),
                Some(domain::Weight::new(100.0).unwrap()),
                Some(domain::Reps::new(5).unwrap()),
                true,
            )
            .await
            .unwrap();
        assert_eq!(updated.weight, Some(domain::Weight::new(100.0).unwrap()));
        assert_eq!(updated.reps, Some(domain::Reps::new(5).unwrap()));
        assert!(updated.completed);

        let mut missing = LOG_ENTRY.key();
        missing.workout_id = 99.into();
        assert!(matches!(
            memory.update_log_execution(missing, None, None, false).await,
            Err(domain::UpdateError::NotFound(NotFoundError::LogEntry(key))) if key == missing
        ));
    }

    #[rstest]
    #[case(EXERCISE.id, 6)]
    #[case(EXERCISE_2.id, 4)]
    #[case(99.into(), 0)]
    #[tokio::test]
    async fn test_count_exercise_references(
        #[case] exercise_id: domain::ExerciseID,
        #[case] expected: usize,
    ) {
        let memory = Memory::new();
        memory
            .create_log_entries(LOG_ENTRIES.clone())
            .await
            .unwrap();

        assert_eq!(
            memory.count_exercise_references(exercise_id).await.unwrap(),
            expected
        );
    }

    #[tokio::test]
    async fn test_log_entry_deletion() {
        let memory = Memory::new();
        memory
            .create_log_entries(LOG_ENTRIES.clone())
            .await
            .unwrap();

        memory
            .delete_sets_above(WORKOUT.id, EXERCISE.id, domain::SetNumber::new(2).unwrap())
            .await
            .unwrap();
        let entries = memory.read_log_entries(WORKOUT.id).await.unwrap();
        assert_eq!(entries.len(), 8);
        assert!(
            entries
                .iter()
                .filter(|e| e.exercise_id == EXERCISE.id)
                .all(|e| u32::from(e.set) <= 2)
        );

        memory
            .delete_days_above(WORKOUT.id, domain::DayNumber::FIRST)
            .await
            .unwrap();
        let entries = memory.read_log_entries(WORKOUT.id).await.unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries.iter().all(|e| e.day == domain::DayNumber::FIRST));

        memory
            .delete_exercise_log(WORKOUT.id, EXERCISE_2.id)
            .await
            .unwrap();
        let entries = memory.read_log_entries(WORKOUT.id).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.exercise_id == EXERCISE.id));

        memory.delete_workout_log(WORKOUT.id).await.unwrap();
        assert_eq!(memory.read_log_entries(WORKOUT.id).await.unwrap(), vec![]);
    }

    #[tokio::test]
    async fn test_targets_update() {
        let memory = Memory::new();
        memory
            .create_log_entries(LOG_ENTRIES.clone())
            .await
            .unwrap();

        let targets = domain::LogTargets {
            order: domain::OrderToken::new("A1").unwrap(),
            target_reps: domain::TargetReps::new("3").unwrap(),
            tempo: domain::Tempo::default(),
            rest: domain::Rest::new(180).unwrap(),
            notes: "heavier".to_string(),
        };
        memory
            .update_log_targets(WORKOUT.id, EXERCISE.id, targets.clone())
            .await
            .unwrap();

        let entries = memory.read_log_entries(WORKOUT.id).await.unwrap();
        for entry in entries.iter().filter(|e| e.exercise_id == EXERCISE.id) {
            assert_eq!(entry.order, targets.order);
            assert_eq!(entry.target_reps, targets.target_reps);
            assert_eq!(entry.tempo, targets.tempo);
            assert_eq!(entry.rest, targets.rest);
            assert_eq!(entry.notes, targets.notes);
        }
        for entry in entries.iter().filter(|e| e.exercise_id == EXERCISE_2.id) {
            assert_eq!(entry.target_reps, domain::TargetReps::new("8-12").unwrap());
        }
    }

    #[tokio::test]
    async fn test_feedback() {
        let memory = Memory::new();
        memory.create_workout(WORKOUT.clone()).await.unwrap();

        let feedback = domain::CoachFeedback::new("strong session".to_string());
        memory
            .update_feedback(WORKOUT.id, Some(feedback.clone()))
            .await
            .unwrap();
        assert_eq!(
            memory.read_workout(WORKOUT.id).await.unwrap().feedback,
            Some(feedback)
        );

        memory.update_feedback(WORKOUT.id, None).await.unwrap();
        assert_eq!(memory.read_workout(WORKOUT.id).await.unwrap().feedback, None);

        assert!(matches!(
            memory.update_feedback(99.into(), None).await,
            Err(domain::UpdateError::NotFound(NotFoundError::Workout(_)))
        ));
    }

    #[tokio::test]
    async fn test_upload_video() {
        let memory = Memory::new();

        let url = memory
            .upload_video("clip", vec![1, 2, 3], "video/mp4")
            .await
            .unwrap();

        assert_eq!(url, "memory://set-videos/clip");
        assert_eq!(
            memory.read().videos.get("clip"),
            Some(&(vec![1, 2, 3], "video/mp4".to_string()))
        );
    }
}
