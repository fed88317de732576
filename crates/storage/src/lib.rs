#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

use chrono::NaiveDate;
use ferrum_domain as domain;

use domain::{
    ExerciseRepository, FeedbackRepository, LogEntryRepository, MediaRepository,
    SessionRepository, TemplateRepository, UserRepository, WorkoutRepository,
};

pub mod memory;
pub mod rest;

pub use memory::Memory;
pub use rest::{HttpSender, Rest, SendRequest};

#[cfg(test)]
mod tests {
    pub mod data;
}

/// Concrete storage backend, selected at startup.
pub enum Store {
    Rest(Rest<HttpSender>),
    Memory(Memory),
}

impl Store {
    pub fn rest(base_url: &str, api_key: &str) -> Result<Self, domain::StorageError> {
        Ok(Self::Rest(Rest::new(base_url, api_key)?))
    }

    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(Memory::new())
    }
}

macro_rules! delegate {
    ($self:ident, $method:ident($($arg:expr),*)) => {
        match $self {
            Store::Rest(rest) => rest.$method($($arg),*).await,
            Store::Memory(memory) => memory.$method($($arg),*).await,
        }
    };
}

impl SessionRepository for Store {
    async fn request_session(
        &self,
        user_id: domain::UserID,
    ) -> Result<domain::Session, domain::ReadError> {
        delegate!(self, request_session(user_id))
    }

    async fn initialize_session(&self) -> Result<domain::Session, domain::ReadError> {
        delegate!(self, initialize_session())
    }

    async fn delete_session(&self) -> Result<(), domain::DeleteError> {
        delegate!(self, delete_session())
    }
}

impl UserRepository for Store {
    async fn read_users(&self) -> Result<Vec<domain::User>, domain::ReadError> {
        delegate!(self, read_users())
    }

    async fn create_user(&self, user: domain::User) -> Result<domain::User, domain::CreateError> {
        delegate!(self, create_user(user))
    }

    async fn replace_user(&self, user: domain::User) -> Result<domain::User, domain::UpdateError> {
        delegate!(self, replace_user(user))
    }

    async fn delete_user(&self, id: domain::UserID) -> Result<domain::UserID, domain::DeleteError> {
        delegate!(self, delete_user(id))
    }
}

impl ExerciseRepository for Store {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        delegate!(self, read_exercises())
    }

    async fn create_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::CreateError> {
        delegate!(self, create_exercise(exercise))
    }

    async fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        delegate!(self, replace_exercise(exercise))
    }

    async fn delete_exercise(
        &self,
        id: domain::ExerciseID,
    ) -> Result<domain::ExerciseID, domain::DeleteError> {
        delegate!(self, delete_exercise(id))
    }
}

impl TemplateRepository for Store {
    async fn read_templates(&self) -> Result<Vec<domain::Template>, domain::ReadError> {
        delegate!(self, read_templates())
    }

    async fn read_template(
        &self,
        id: domain::TemplateID,
    ) -> Result<domain::Template, domain::ReadError> {
        delegate!(self, read_template(id))
    }

    async fn create_template(
        &self,
        template: domain::Template,
    ) -> Result<domain::Template, domain::CreateError> {
        delegate!(self, create_template(template))
    }

    async fn modify_template(
        &self,
        id: domain::TemplateID,
        name: Option<domain::Name>,
        description: Option<String>,
        items: Option<Vec<domain::BlueprintItem>>,
    ) -> Result<domain::Template, domain::UpdateError> {
        delegate!(self, modify_template(id, name, description, items))
    }

    async fn delete_template(
        &self,
        id: domain::TemplateID,
    ) -> Result<domain::TemplateID, domain::DeleteError> {
        delegate!(self, delete_template(id))
    }
}

impl WorkoutRepository for Store {
    async fn read_workouts(
        &self,
        user_id: domain::UserID,
    ) -> Result<Vec<domain::Workout>, domain::ReadError> {
        delegate!(self, read_workouts(user_id))
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        delegate!(self, read_workout(id))
    }

    async fn create_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        delegate!(self, create_workout(workout))
    }

    async fn modify_workout(
        &self,
        id: domain::WorkoutID,
        name: Option<domain::Name>,
        date: Option<NaiveDate>,
        occurrences: Option<domain::Occurrences>,
    ) -> Result<domain::Workout, domain::UpdateError> {
        delegate!(self, modify_workout(id, name, date, occurrences))
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        delegate!(self, delete_workout(id))
    }
}

impl LogEntryRepository for Store {
    async fn read_log_entries(
        &self,
        workout_id: domain::WorkoutID,
    ) -> Result<Vec<domain::LogEntry>, domain::ReadError> {
        delegate!(self, read_log_entries(workout_id))
    }

    async fn count_exercise_references(
        &self,
        exercise_id: domain::ExerciseID,
    ) -> Result<usize, domain::ReadError> {
        delegate!(self, count_exercise_references(exercise_id))
    }

    async fn create_log_entries(
        &self,
        entries: Vec<domain::LogEntry>,
    ) -> Result<(), domain::CreateError> {
        delegate!(self, create_log_entries(entries))
    }

    async fn update_log_targets(
        &self,
        workout_id: domain::WorkoutID,
        exercise_id: domain::ExerciseID,
        targets: domain::LogTargets,
    ) -> Result<(), domain::UpdateError> {
        delegate!(self, update_log_targets(workout_id, exercise_id, targets))
    }

    async fn update_log_execution(
        &self,
        key: domain::LogKey,
        weight: Option<domain::Weight>,
        reps: Option<domain::Reps>,
        completed: bool,
    ) -> Result<domain::LogEntry, domain::UpdateError> {
        delegate!(self, update_log_execution(key, weight, reps, completed))
    }

    async fn update_log_video(
        &self,
        key: domain::LogKey,
        video_url: Option<String>,
    ) -> Result<domain::LogEntry, domain::UpdateError> {
        delegate!(self, update_log_video(key, video_url))
    }

    async fn update_log_comment(
        &self,
        key: domain::LogKey,
        comment: Option<String>,
    ) -> Result<domain::LogEntry, domain::UpdateError> {
        delegate!(self, update_log_comment(key, comment))
    }

    async fn delete_sets_above(
        &self,
        workout_id: domain::WorkoutID,
        exercise_id: domain::ExerciseID,
        max_set: domain::SetNumber,
    ) -> Result<(), domain::DeleteError> {
        delegate!(self, delete_sets_above(workout_id, exercise_id, max_set))
    }

    async fn delete_exercise_log(
        &self,
        workout_id: domain::WorkoutID,
        exercise_id: domain::ExerciseID,
    ) -> Result<(), domain::DeleteError> {
        delegate!(self, delete_exercise_log(workout_id, exercise_id))
    }

    async fn delete_days_above(
        &self,
        workout_id: domain::WorkoutID,
        max_day: domain::DayNumber,
    ) -> Result<(), domain::DeleteError> {
        delegate!(self, delete_days_above(workout_id, max_day))
    }

    async fn delete_workout_log(
        &self,
        workout_id: domain::WorkoutID,
    ) -> Result<(), domain::DeleteError> {
        delegate!(self, delete_workout_log(workout_id))
    }
}

impl FeedbackRepository for Store {
    async fn update_feedback(
        &self,
        workout_id: domain::WorkoutID,
        feedback: Option<domain::CoachFeedback>,
    ) -> Result<(), domain::UpdateError> {
        delegate!(self, update_feedback(workout_id, feedback))
    }
}

impl MediaRepository for Store {
    async fn upload_video(
        &self,
        name: &str,
        video: Vec<u8>,
        content_type: &str,
    ) -> Result<String, domain::CreateError> {
        delegate!(self, upload_video(name, video, content_type))
    }
}
