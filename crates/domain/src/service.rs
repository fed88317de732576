use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use futures_util::future::{try_join, try_join_all};
use log::{debug, error};

use crate::{
    BlueprintItem, BodyPart, CoachFeedback, CreateError, DeleteError, DuplicateOptions, Email,
    Exercise, ExerciseID, ExerciseRepository, ExerciseService, FeedbackRepository,
    FeedbackService, LogEntry, LogEntryRepository, LogKey, MediaRepository, Name, NotFoundError,
    Occurrences, ProgressService, ReadError, ReconcileReport, Reps, Role, Session,
    SessionRepository, SessionService, Template, TemplateID, TemplateRepository, TemplateService,
    UpdateError, User, UserID, UserRepository, UserService, ValidationError, Weight, Workout,
    WorkoutID, WorkoutRepository, WorkoutService, duplicate_rows, expand, one_rep_max_trend,
    reconcile, weekly_volume,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R> Service<R>
where
    R: ExerciseRepository + Send + Sync + 'static,
{
    async fn validate_item_references(&self, items: &[BlueprintItem]) -> Result<(), ReadError> {
        let known = self
            .repository
            .read_exercises()
            .await?
            .iter()
            .map(|e| e.id)
            .collect::<BTreeSet<_>>();
        for item in items {
            if !known.contains(&item.exercise_id) {
                return Err(NotFoundError::Exercise(item.exercise_id).into());
            }
        }
        Ok(())
    }
}

impl<R> SessionService for Service<R>
where
    R: SessionRepository + Send + Sync + 'static,
{
    async fn request_session(&self, user_id: UserID) -> Result<Session, ReadError> {
        log_on_error!(
            self.repository.request_session(user_id),
            ReadError,
            "request",
            "session"
        )
    }

    async fn initialize_session(&self) -> Result<Session, ReadError> {
        log_on_error!(
            self.repository.initialize_session(),
            ReadError,
            "initialize",
            "session"
        )
    }

    async fn delete_session(&self) -> Result<(), DeleteError> {
        log_on_error!(
            self.repository.delete_session(),
            DeleteError,
            "delete",
            "session"
        )
    }
}

impl<R> UserService for Service<R>
where
    R: UserRepository + WorkoutRepository + LogEntryRepository + Send + Sync + 'static,
{
    async fn get_users(&self, session: &Session) -> Result<Vec<User>, ReadError> {
        session.require_admin()?;
        log_on_error!(self.repository.read_users(), ReadError, "get", "users")
    }

    async fn create_user(
        &self,
        session: &Session,
        name: Name,
        email: Email,
        role: Role,
    ) -> Result<User, CreateError> {
        session.require_admin()?;
        let email = self
            .validate_user_email(session, email.as_ref(), UserID::nil())
            .await?;
        let user = User {
            id: UserID::new(),
            name,
            email,
            role,
        };
        log_on_error!(
            self.repository.create_user(user),
            CreateError,
            "create",
            "user"
        )
    }

    async fn replace_user(&self, session: &Session, user: User) -> Result<User, UpdateError> {
        session.require_admin()?;
        let email = self
            .validate_user_email(session, user.email.as_ref(), user.id)
            .await?;
        let user = User { email, ..user };
        log_on_error!(
            self.repository.replace_user(user),
            UpdateError,
            "replace",
            "user"
        )
    }

    async fn delete_user(&self, session: &Session, id: UserID) -> Result<UserID, DeleteError> {
        session.require_admin()?;
        log_on_error!(
            async {
                let workouts = self.repository.read_workouts(id).await?;
                for workout in workouts {
                    self.repository.delete_workout(workout.id).await?;
                    self.repository.delete_workout_log(workout.id).await?;
                }
                self.repository.delete_user(id).await
            },
            DeleteError,
            "delete",
            "user"
        )
    }
}

impl<R> ExerciseService for Service<R>
where
    R: ExerciseRepository + TemplateRepository + LogEntryRepository + Send + Sync + 'static,
{
    async fn get_exercises(&self, _session: &Session) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn create_exercise(
        &self,
        session: &Session,
        name: Name,
        body_part: BodyPart,
        video_url: Option<String>,
        notes: String,
    ) -> Result<Exercise, CreateError> {
        session.require_admin()?;
        let name = self
            .validate_exercise_name(session, name.as_ref(), ExerciseID::nil())
            .await?;
        let exercise = Exercise {
            id: ExerciseID::new(),
            name,
            body_part,
            video_url,
            notes,
        };
        log_on_error!(
            self.repository.create_exercise(exercise),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn replace_exercise(
        &self,
        session: &Session,
        exercise: Exercise,
    ) -> Result<Exercise, UpdateError> {
        session.require_admin()?;
        let name = self
            .validate_exercise_name(session, exercise.name.as_ref(), exercise.id)
            .await?;
        let exercise = Exercise { name, ..exercise };
        log_on_error!(
            self.repository.replace_exercise(exercise),
            UpdateError,
            "replace",
            "exercise"
        )
    }

    async fn delete_exercise(
        &self,
        session: &Session,
        id: ExerciseID,
    ) -> Result<ExerciseID, DeleteError> {
        session.require_admin()?;
        log_on_error!(
            async {
                if self.repository.count_exercise_references(id).await? > 0 {
                    return Err(ValidationError::Conflict(
                        "exercise is referenced by log entries".to_string(),
                    )
                    .into());
                }
                let templates = self.repository.read_templates().await?;
                if templates
                    .iter()
                    .flat_map(|t| &t.items)
                    .any(|item| item.exercise_id == id)
                {
                    return Err(ValidationError::Conflict(
                        "exercise is referenced by templates".to_string(),
                    )
                    .into());
                }
                self.repository.delete_exercise(id).await
            },
            DeleteError,
            "delete",
            "exercise"
        )
    }
}

impl<R> TemplateService for Service<R>
where
    R: TemplateRepository + ExerciseRepository + Send + Sync + 'static,
{
    async fn get_templates(&self, _session: &Session) -> Result<Vec<Template>, ReadError> {
        log_on_error!(
            self.repository.read_templates(),
            ReadError,
            "get",
            "templates"
        )
    }

    async fn create_template(
        &self,
        session: &Session,
        name: Name,
        description: String,
        items: Vec<BlueprintItem>,
    ) -> Result<Template, CreateError> {
        session.require_admin()?;
        let name = self
            .validate_template_name(session, name.as_ref(), TemplateID::nil())
            .await?;
        self.validate_item_references(&items).await?;
        let template = Template {
            id: TemplateID::new(),
            name,
            description,
            items,
        };
        log_on_error!(
            self.repository.create_template(template),
            CreateError,
            "create",
            "template"
        )
    }

    async fn modify_template(
        &self,
        session: &Session,
        id: TemplateID,
        name: Option<Name>,
        description: Option<String>,
        items: Option<Vec<BlueprintItem>>,
    ) -> Result<Template, UpdateError> {
        session.require_admin()?;
        let name = match name {
            Some(name) => Some(self.validate_template_name(session, name.as_ref(), id).await?),
            None => None,
        };
        if let Some(items) = &items {
            self.validate_item_references(items).await?;
        }
        log_on_error!(
            self.repository.modify_template(id, name, description, items),
            UpdateError,
            "modify",
            "template"
        )
    }

    async fn delete_template(
        &self,
        session: &Session,
        id: TemplateID,
    ) -> Result<TemplateID, DeleteError> {
        session.require_admin()?;
        log_on_error!(
            self.repository.delete_template(id),
            DeleteError,
            "delete",
            "template"
        )
    }
}

impl<R> WorkoutService for Service<R>
where
    R: WorkoutRepository
        + LogEntryRepository
        + TemplateRepository
        + ExerciseRepository
        + MediaRepository
        + Send
        + Sync
        + 'static,
{
    async fn get_workouts(
        &self,
        session: &Session,
        user_id: UserID,
    ) -> Result<Vec<Workout>, ReadError> {
        session.require_owner_or_admin(user_id)?;
        log_on_error!(
            self.repository.read_workouts(user_id),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(
        &self,
        session: &Session,
        id: WorkoutID,
    ) -> Result<(Workout, Vec<LogEntry>), ReadError> {
        log_on_error!(
            async {
                let workout = self.repository.read_workout(id).await?;
                session.require_owner_or_admin(workout.user_id)?;
                let entries = self.repository.read_log_entries(id).await?;
                Ok((workout, entries))
            },
            ReadError,
            "get",
            "workout"
        )
    }

    async fn create_workout(
        &self,
        session: &Session,
        user_id: UserID,
        name: Name,
        date: NaiveDate,
        occurrences: Occurrences,
        items: Vec<BlueprintItem>,
    ) -> Result<Workout, CreateError> {
        session.require_owner_or_admin(user_id)?;
        self.validate_item_references(&items).await?;
        let workout = Workout {
            id: WorkoutID::new(),
            user_id,
            name,
            date,
            occurrences,
            feedback: None,
        };
        let entries = expand(workout.id, &items, occurrences)?;
        log_on_error!(
            async {
                self.repository.create_log_entries(entries).await?;
                self.repository.create_workout(workout).await
            },
            CreateError,
            "create",
            "workout"
        )
    }

    async fn create_workout_from_template(
        &self,
        session: &Session,
        user_id: UserID,
        template_id: TemplateID,
        name: Name,
        date: NaiveDate,
        occurrences: Occurrences,
    ) -> Result<Workout, CreateError> {
        let template = log_on_error!(
            self.repository.read_template(template_id),
            ReadError,
            "get",
            "template"
        )?;
        self.create_workout(session, user_id, name, date, occurrences, template.items)
            .await
    }

    async fn edit_workout_plan(
        &self,
        session: &Session,
        id: WorkoutID,
        items: Vec<BlueprintItem>,
        occurrences: Occurrences,
    ) -> Result<ReconcileReport, UpdateError> {
        let workout = self.repository.read_workout(id).await?;
        session.require_owner_or_admin(workout.user_id)?;
        self.validate_item_references(&items).await?;
        let existing = self.repository.read_log_entries(id).await?;
        let plan = reconcile(id, &existing, &items, occurrences)?;
        if plan.is_destructive() {
            session.require_admin()?;
        }
        log_on_error!(
            async {
                let report = plan.apply(&self.repository).await?;
                if workout.occurrences != occurrences {
                    self.repository
                        .modify_workout(id, None, None, Some(occurrences))
                        .await?;
                }
                Ok(report)
            },
            UpdateError,
            "edit",
            "workout plan"
        )
    }

    async fn modify_workout(
        &self,
        session: &Session,
        id: WorkoutID,
        name: Option<Name>,
        date: Option<NaiveDate>,
    ) -> Result<Workout, UpdateError> {
        log_on_error!(
            async {
                let workout = self.repository.read_workout(id).await?;
                session.require_owner_or_admin(workout.user_id)?;
                self.repository.modify_workout(id, name, date, None).await
            },
            UpdateError,
            "modify",
            "workout"
        )
    }

    async fn duplicate_workout(
        &self,
        session: &Session,
        id: WorkoutID,
        target_date: NaiveDate,
        options: DuplicateOptions,
    ) -> Result<Workout, CreateError> {
        log_on_error!(
            async {
                let (source, entries) = try_join(
                    self.repository.read_workout(id),
                    self.repository.read_log_entries(id),
                )
                .await?;
                session.require_owner_or_admin(source.user_id)?;
                let duplicate = Workout {
                    id: WorkoutID::new(),
                    user_id: source.user_id,
                    name: source.name.clone(),
                    date: target_date,
                    occurrences: source.occurrences,
                    feedback: None,
                };
                let rows = duplicate_rows(&entries, duplicate.id, options);
                if !rows.is_empty() {
                    self.repository.create_log_entries(rows).await?;
                }
                self.repository.create_workout(duplicate).await
            },
            CreateError,
            "duplicate",
            "workout"
        )
    }

    async fn delete_workout(
        &self,
        session: &Session,
        id: WorkoutID,
    ) -> Result<WorkoutID, DeleteError> {
        session.require_admin()?;
        log_on_error!(
            async {
                let workout = self.repository.read_workout(id).await?;
                let id = self.repository.delete_workout(workout.id).await?;
                self.repository.delete_workout_log(workout.id).await?;
                Ok(id)
            },
            DeleteError,
            "delete",
            "workout"
        )
    }

    async fn update_execution(
        &self,
        session: &Session,
        key: LogKey,
        weight: Option<Weight>,
        reps: Option<Reps>,
        completed: bool,
    ) -> Result<LogEntry, UpdateError> {
        log_on_error!(
            async {
                let workout = self.repository.read_workout(key.workout_id).await?;
                session.require_owner_or_admin(workout.user_id)?;
                self.repository
                    .update_log_execution(key, weight, reps, completed)
                    .await
            },
            UpdateError,
            "update",
            "log entry"
        )
    }

    async fn attach_set_video(
        &self,
        session: &Session,
        key: LogKey,
        video: Vec<u8>,
        content_type: &str,
    ) -> Result<LogEntry, UpdateError> {
        log_on_error!(
            async {
                let workout = self.repository.read_workout(key.workout_id).await?;
                session.require_owner_or_admin(workout.user_id)?;
                let name = format!(
                    "{}-{}-{}-{}",
                    key.workout_id, key.exercise_id, key.day, key.set
                );
                let url = self
                    .repository
                    .upload_video(&name, video, content_type)
                    .await?;
                self.repository.update_log_video(key, Some(url)).await
            },
            UpdateError,
            "attach",
            "set video"
        )
    }

    async fn comment_set(
        &self,
        session: &Session,
        key: LogKey,
        comment: Option<String>,
    ) -> Result<LogEntry, UpdateError> {
        session.require_admin()?;
        log_on_error!(
            self.repository.update_log_comment(key, comment),
            UpdateError,
            "comment",
            "log entry"
        )
    }
}

impl<R> FeedbackService for Service<R>
where
    R: FeedbackRepository + WorkoutRepository + Send + Sync + 'static,
{
    async fn write_feedback(
        &self,
        session: &Session,
        workout_id: WorkoutID,
        comment: String,
    ) -> Result<CoachFeedback, UpdateError> {
        session.require_admin()?;
        log_on_error!(
            async {
                self.repository.read_workout(workout_id).await?;
                let feedback = CoachFeedback::new(comment);
                self.repository
                    .update_feedback(workout_id, Some(feedback.clone()))
                    .await?;
                Ok(feedback)
            },
            UpdateError,
            "write",
            "feedback"
        )
    }

    async fn acknowledge_feedback(
        &self,
        session: &Session,
        workout_id: WorkoutID,
    ) -> Result<CoachFeedback, UpdateError> {
        log_on_error!(
            async {
                let workout = self.repository.read_workout(workout_id).await?;
                session.require_owner_or_admin(workout.user_id)?;
                let feedback = workout
                    .feedback
                    .ok_or(NotFoundError::Feedback(workout_id))?
                    .acknowledged();
                self.repository
                    .update_feedback(workout_id, Some(feedback.clone()))
                    .await?;
                Ok(feedback)
            },
            UpdateError,
            "acknowledge",
            "feedback"
        )
    }

    async fn get_unread_feedback(
        &self,
        session: &Session,
    ) -> Result<Vec<(WorkoutID, CoachFeedback)>, ReadError> {
        log_on_error!(
            async {
                let workouts = self.repository.read_workouts(session.user_id).await?;
                Ok(workouts
                    .into_iter()
                    .filter_map(|w| {
                        w.feedback
                            .filter(|f| f.unread)
                            .map(|feedback| (w.id, feedback))
                    })
                    .collect())
            },
            ReadError,
            "get",
            "unread feedback"
        )
    }
}

impl<R> ProgressService for Service<R>
where
    R: WorkoutRepository + LogEntryRepository + ExerciseRepository + Send + Sync + 'static,
{
    async fn get_weekly_volume(
        &self,
        session: &Session,
        user_id: UserID,
    ) -> Result<BTreeMap<NaiveDate, BTreeMap<BodyPart, f32>>, ReadError> {
        session.require_owner_or_admin(user_id)?;
        log_on_error!(
            async {
                let workouts = self.repository.read_workouts(user_id).await?;
                let (exercises, entries) = try_join(
                    self.repository.read_exercises(),
                    try_join_all(
                        workouts
                            .iter()
                            .map(|w| self.repository.read_log_entries(w.id)),
                    ),
                )
                .await?;
                let entries = entries.into_iter().flatten().collect::<Vec<_>>();
                Ok(weekly_volume(&entries, &workouts, &exercises))
            },
            ReadError,
            "get",
            "weekly volume"
        )
    }

    async fn get_one_rep_max_trend(
        &self,
        session: &Session,
        user_id: UserID,
        exercise_id: ExerciseID,
    ) -> Result<Vec<(NaiveDate, f32)>, ReadError> {
        session.require_owner_or_admin(user_id)?;
        log_on_error!(
            async {
                let workouts = self.repository.read_workouts(user_id).await?;
                let entries = try_join_all(
                    workouts
                        .iter()
                        .map(|w| self.repository.read_log_entries(w.id)),
                )
                .await?
                .into_iter()
                .flatten()
                .collect::<Vec<_>>();
                Ok(one_rep_max_trend(&entries, &workouts, exercise_id))
            },
            ReadError,
            "get",
            "one-rep max trend"
        )
    }
}
