use crate::{
    exercise::ExerciseID,
    reconciliation::ReconcileFailure,
    template::TemplateID,
    user::UserID,
    workout::{LogKey, WorkoutID},
};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("a workout plan must contain at least one exercise")]
    EmptyPlan,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("administrator role required")]
    AdminRequired,
    #[error("owned by another user")]
    NotOwner,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("user {0} not found")]
    User(UserID),
    #[error("exercise {0} not found")]
    Exercise(ExerciseID),
    #[error("template {0} not found")]
    Template(TemplateID),
    #[error("workout {0} not found")]
    Workout(WorkoutID),
    #[error("log entry {0} not found")]
    LogEntry(LogKey),
    #[error("feedback on workout {0} not found")]
    Feedback(WorkoutID),
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ReadError> for CreateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Validation(validation) => CreateError::Validation(validation),
            ReadError::Authorization(authorization) => CreateError::Authorization(authorization),
            ReadError::NotFound(not_found) => CreateError::NotFound(not_found),
            ReadError::Storage(storage) => CreateError::Storage(storage),
            ReadError::Other(other) => CreateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Incomplete(#[from] ReconcileFailure),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ReadError> for UpdateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Validation(validation) => UpdateError::Validation(validation),
            ReadError::Authorization(authorization) => UpdateError::Authorization(authorization),
            ReadError::NotFound(not_found) => UpdateError::NotFound(not_found),
            ReadError::Storage(storage) => UpdateError::Storage(storage),
            ReadError::Other(other) => UpdateError::Other(other),
        }
    }
}

impl From<CreateError> for UpdateError {
    fn from(value: CreateError) -> Self {
        match value {
            CreateError::Validation(validation) => UpdateError::Validation(validation),
            CreateError::Authorization(authorization) => UpdateError::Authorization(authorization),
            CreateError::NotFound(not_found) => UpdateError::NotFound(not_found),
            CreateError::Storage(storage) => UpdateError::Storage(storage),
            CreateError::Other(other) => UpdateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ReadError> for DeleteError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Validation(validation) => DeleteError::Validation(validation),
            ReadError::Authorization(authorization) => DeleteError::Authorization(authorization),
            ReadError::NotFound(not_found) => DeleteError::NotFound(not_found),
            ReadError::Storage(storage) => DeleteError::Storage(storage),
            ReadError::Other(other) => DeleteError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("no session")]
    NoSession,
    #[error("rejected: {0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_error_from_read_error() {
        assert!(matches!(
            CreateError::from(ReadError::NotFound(NotFoundError::User(UserID::nil()))),
            CreateError::NotFound(NotFoundError::User(id)) if id.is_nil()
        ));
        assert!(matches!(
            CreateError::from(ReadError::Storage(StorageError::NoSession)),
            CreateError::Storage(StorageError::NoSession)
        ));
        assert!(matches!(
            CreateError::from(ReadError::Other("foo".into())),
            CreateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_update_error_from_read_error() {
        assert!(matches!(
            UpdateError::from(ReadError::Authorization(AuthorizationError::NotOwner)),
            UpdateError::Authorization(AuthorizationError::NotOwner)
        ));
        assert!(matches!(
            UpdateError::from(ReadError::Storage(StorageError::NoConnection)),
            UpdateError::Storage(StorageError::NoConnection)
        ));
        assert!(matches!(
            UpdateError::from(ReadError::Other("foo".into())),
            UpdateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_update_error_from_create_error() {
        assert!(matches!(
            UpdateError::from(CreateError::Validation(ValidationError::EmptyPlan)),
            UpdateError::Validation(ValidationError::EmptyPlan)
        ));
        assert!(matches!(
            UpdateError::from(CreateError::Storage(StorageError::NoSession)),
            UpdateError::Storage(StorageError::NoSession)
        ));
    }

    #[test]
    fn test_delete_error_from_read_error() {
        assert!(matches!(
            DeleteError::from(ReadError::Authorization(AuthorizationError::AdminRequired)),
            DeleteError::Authorization(AuthorizationError::AdminRequired)
        ));
        assert!(matches!(
            DeleteError::from(ReadError::Other("foo".into())),
            DeleteError::Other(error) if error.to_string() == "foo"
        ));
    }
}
